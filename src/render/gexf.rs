//! GEXF 1.2 output, readable by Gephi.

use crate::graph::JobNode;
use crate::render::{GraphWriter, LabelStyle};
use quick_xml::escape::escape;
use std::io::Write;

pub struct GexfWriter;

impl GraphWriter for GexfWriter {
    fn write_graph(
        &self,
        nodes: &[JobNode],
        style: LabelStyle,
        out: &mut dyn Write,
    ) -> anyhow::Result<()> {
        writeln!(out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            out,
            r#"<gexf xmlns="http://www.gexf.net/1.2draft" version="1.2">"#
        )?;
        writeln!(out, r#"  <graph mode="static" defaultedgetype="directed">"#)?;

        writeln!(out, "    <nodes>")?;
        for node in nodes {
            writeln!(
                out,
                r#"      <node id="{}" label="{}"/>"#,
                node.id,
                escape(style.label(node).as_str())
            )?;
        }
        writeln!(out, "    </nodes>")?;

        writeln!(out, "    <edges>")?;
        let edges = nodes
            .iter()
            .flat_map(|n| n.inputs.iter().map(move |r| (n.id, r.id)));
        for (eid, (source, target)) in edges.enumerate() {
            writeln!(
                out,
                r#"      <edge id="{}" source="{}" target="{}"/>"#,
                eid, source, target
            )?;
        }
        writeln!(out, "    </edges>")?;

        writeln!(out, "  </graph>")?;
        writeln!(out, "</gexf>")?;
        Ok(())
    }
}
