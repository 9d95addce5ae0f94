//! JSON output: the node list with styled labels, for scripting.

use crate::graph::{JobNode, JobRef};
use crate::render::{GraphWriter, LabelStyle};
use serde::Serialize;
use std::io::Write;

pub struct JsonWriter;

#[derive(Serialize)]
struct NodeView<'a> {
    id: usize,
    label: String,
    external: bool,
    inputs: &'a [JobRef],
}

#[derive(Serialize)]
struct GraphView<'a> {
    nodes: Vec<NodeView<'a>>,
}

impl GraphWriter for JsonWriter {
    fn write_graph(
        &self,
        nodes: &[JobNode],
        style: LabelStyle,
        out: &mut dyn Write,
    ) -> anyhow::Result<()> {
        let view = GraphView {
            nodes: nodes
                .iter()
                .map(|n| NodeView {
                    id: n.id,
                    label: style.label(n),
                    external: n.external,
                    inputs: &n.inputs,
                })
                .collect(),
        };
        serde_json::to_writer_pretty(&mut *out, &view)?;
        writeln!(out)?;
        Ok(())
    }
}
