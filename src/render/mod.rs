//! Graph serialization.
//!
//! All dialects consume the same node list and emit one vertex per node and one
//! directed edge per resolved input (consumer -> producer). Output depends only
//! on the node list and the label style.

pub mod gexf;
pub mod gv;
pub mod json;

use crate::graph::JobNode;
use clap::ValueEnum;
use std::io::Write;

/// What a vertex is labelled with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LabelStyle {
    /// Numeric node id.
    #[default]
    Id,
    /// Table name or query text.
    Name,
    /// `<name>_<id>`.
    #[value(name = "name_id", alias = "name-id")]
    NameId,
}

impl LabelStyle {
    pub fn label(self, node: &JobNode) -> String {
        match self {
            LabelStyle::Id => node.id.to_string(),
            LabelStyle::Name => node.label.clone(),
            LabelStyle::NameId => format!("{}_{}", node.label, node.id),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Graphviz DOT.
    #[default]
    Gv,
    /// GEXF 1.2 (Gephi).
    Gexf,
    /// Node list as JSON.
    Json,
}

impl Format {
    pub fn writer(self) -> Box<dyn GraphWriter> {
        match self {
            Format::Gv => Box::new(gv::GvWriter),
            Format::Gexf => Box::new(gexf::GexfWriter),
            Format::Json => Box::new(json::JsonWriter),
        }
    }
}

pub trait GraphWriter {
    fn write_graph(
        &self,
        nodes: &[JobNode],
        style: LabelStyle,
        out: &mut dyn Write,
    ) -> anyhow::Result<()>;
}
