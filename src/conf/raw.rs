//! Raw XML shape.
//!
//! ```xml
//! <config>
//!   <modules>
//!     <module>
//!       <config>
//!         <tables><table name="..."/></tables>
//!         <jobs><job inputs="..." output="..."><query>...</query></job></jobs>
//!       </config>
//!     </module>
//!   </modules>
//! </config>
//! ```
//!
//! Every level may repeat; `flatten` concatenates in document order.

use crate::conf::{ExtTable, JobConfig, JobDefinition};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct RawConfig {
    #[serde(default)]
    pub modules: Vec<RawModules>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawModules {
    #[serde(default)]
    pub module: Vec<RawModule>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawModule {
    #[serde(default)]
    pub config: Vec<RawModuleConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawModuleConfig {
    #[serde(default)]
    pub tables: Vec<RawTables>,

    #[serde(default)]
    pub jobs: Vec<RawJobs>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawTables {
    #[serde(default)]
    pub table: Vec<ExtTable>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawJobs {
    #[serde(default)]
    pub job: Vec<JobDefinition>,
}

impl RawConfig {
    pub fn flatten(self) -> JobConfig {
        let mut out = JobConfig::default();
        let configs = self
            .modules
            .into_iter()
            .flat_map(|m| m.module)
            .flat_map(|m| m.config);

        for cfg in configs {
            for tables in cfg.tables {
                out.tables.extend(tables.table);
            }
            for jobs in cfg.jobs {
                out.jobs.extend(jobs.job);
            }
        }
        out
    }
}
