//! Job configuration: raw file shapes + the normalized, ordered job list.
//!
//! Two on-disk formats decode into the same `JobConfig`:
//! - XML, the native format (tables and jobs nested under `modules/module/config`)
//! - JSON, a flat `{ "tables": [...], "jobs": [...] }` document
//!
//! Only the ordering and the `inputs` / `output` / `query` fields matter to the
//! graph builder. The remaining job attributes are carried through untouched.

pub mod load;
pub mod raw;

pub use load::load_config;

use serde::Deserialize;

/// One job as declared in the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct JobDefinition {
    #[serde(rename = "@description", alias = "description", default)]
    pub description: String,

    /// Comma-separated input references.
    #[serde(rename = "@inputs", alias = "inputs", default)]
    pub inputs: String,

    /// Comma-separated output references.
    #[serde(rename = "@output", alias = "output", alias = "outputs", default)]
    pub output: String,

    #[serde(rename = "@priority", alias = "priority", default)]
    pub priority: Option<i32>,

    #[serde(rename = "@startTime", alias = "startTime", default)]
    pub start_time: Option<i64>,

    #[serde(rename = "@schema", alias = "schema", default)]
    pub schema: String,

    #[serde(rename = "@index", alias = "index", default)]
    pub index: String,

    /// Query text; doubles as the node label.
    #[serde(default)]
    pub query: String,
}

/// A table imported from outside the job list. Always counts as a producer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ExtTable {
    #[serde(rename = "@name", alias = "name")]
    pub name: String,
}

/// Normalized config: external tables first, then jobs, both in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct JobConfig {
    #[serde(default)]
    pub tables: Vec<ExtTable>,

    #[serde(default)]
    pub jobs: Vec<JobDefinition>,
}

impl JobConfig {
    pub fn from_xml_str(text: &str) -> anyhow::Result<Self> {
        let raw: raw::RawConfig = quick_xml::de::from_str(text)?;
        Ok(raw.flatten())
    }

    pub fn from_json_str(text: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn node_count(&self) -> usize {
        self.tables.len() + self.jobs.len()
    }
}
