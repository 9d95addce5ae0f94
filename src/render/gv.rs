//! Graphviz DOT output.

use crate::graph::JobNode;
use crate::render::{GraphWriter, LabelStyle};
use std::io::Write;

pub struct GvWriter;

impl GraphWriter for GvWriter {
    fn write_graph(
        &self,
        nodes: &[JobNode],
        style: LabelStyle,
        out: &mut dyn Write,
    ) -> anyhow::Result<()> {
        writeln!(out, "digraph jobs {{")?;

        for node in nodes {
            let label = escape(&style.label(node));
            if node.external {
                writeln!(out, "  {} [label=\"{}\", shape=box];", node.id, label)?;
            } else {
                writeln!(out, "  {} [label=\"{}\"];", node.id, label)?;
            }
        }

        for node in nodes {
            for input in &node.inputs {
                writeln!(out, "  {} -> {};", node.id, input.id)?;
            }
        }

        writeln!(out, "}}")?;
        Ok(())
    }
}

/// Escape a string for use inside a double-quoted DOT id.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            c => out.push(c),
        }
    }
    out
}
