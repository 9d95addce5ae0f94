//! Dependency graph construction.
//!
//! Every external table and every job becomes one `JobNode`. Ids are dense and
//! follow declaration order, tables first. Each job input is resolved against
//! the producers declared before the job; outputs are registered afterwards,
//! so a job never sees itself or anything declared later.
//!
//! Table names are always matched case-insensitively, whatever the reference
//! syntax: they are plain names, never window definitions.

pub mod producers;

pub use producers::ProducerTable;

use crate::conf::JobConfig;
use crate::window::{RefParser, RefSyntax, canonical_name};
use anyhow::{Context, bail};
use serde::Serialize;

/// Id an unresolved input falls back to.
pub const FALLBACK_ID: usize = 0;

/// A resolved input edge: the reference name and the producer it points to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobRef {
    pub name: String,
    pub id: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobNode {
    pub id: usize,
    /// Table name for imports, query text for jobs.
    pub label: String,
    pub inputs: Vec<JobRef>,
    pub external: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    pub syntax: RefSyntax,
    /// Treat inputs without a prior producer as errors instead of pointing them at node 0.
    pub strict: bool,
}

/// Split a comma-separated reference list, trimming spaces and tabs.
///
/// An empty or blank list has no references; otherwise every comma-separated
/// piece is kept, even when it trims to nothing.
pub fn split_refs(csv: &str) -> Vec<String> {
    if csv.trim_matches([' ', '\t']).is_empty() {
        return Vec::new();
    }
    csv.split(',')
        .map(|s| s.trim_matches([' ', '\t']).to_string())
        .collect()
}

/// Build the node list for `cfg`, ids in declaration order.
pub fn build_graph(cfg: &JobConfig, opts: BuildOptions) -> anyhow::Result<Vec<JobNode>> {
    let parser = RefParser::new(opts.syntax)?;
    let mut producers = ProducerTable::new();
    let mut nodes = Vec::with_capacity(cfg.node_count());

    for table in &cfg.tables {
        let id = nodes.len();
        producers.record(canonical_name(&table.name), id);
        nodes.push(JobNode {
            id,
            label: table.name.clone(),
            inputs: Vec::new(),
            external: true,
        });
    }

    for job in &cfg.jobs {
        let id = nodes.len();
        tracing::debug!(
            job = id,
            description = %job.description,
            priority = ?job.priority,
            start_time = ?job.start_time,
            schema = %job.schema,
            index = %job.index,
            "job"
        );

        let mut inputs = Vec::new();
        for token in split_refs(&job.inputs) {
            let w = parser
                .parse(&token)
                .with_context(|| format!("input of job {}", id))?;
            let resolved = match producers.resolve(&w.name) {
                Some(pid) => pid,
                None if opts.strict => {
                    bail!("job {} reads {:?}, which no earlier table or job produces", id, w.name)
                }
                None => {
                    tracing::warn!(
                        job = id,
                        reference = %w.name,
                        fallback = FALLBACK_ID,
                        "no earlier producer for input"
                    );
                    FALLBACK_ID
                }
            };
            tracing::debug!(job = id, window = %w, producer = resolved, "resolved input");
            inputs.push(JobRef {
                name: w.name,
                id: resolved,
            });
        }

        for token in split_refs(&job.output) {
            let w = parser
                .parse(&token)
                .with_context(|| format!("output of job {}", id))?;
            producers.record(w.name, id);
        }

        nodes.push(JobNode {
            id,
            label: job.query.clone(),
            inputs,
            external: false,
        });
    }

    tracing::debug!(nodes = nodes.len(), names = producers.len(), "built graph");
    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conf::{ExtTable, JobDefinition};
    use pretty_assertions::assert_eq;

    fn job(inputs: &str, output: &str, query: &str) -> JobDefinition {
        JobDefinition {
            inputs: inputs.to_string(),
            output: output.to_string(),
            query: query.to_string(),
            ..Default::default()
        }
    }

    fn config(tables: &[&str], jobs: Vec<JobDefinition>) -> JobConfig {
        JobConfig {
            tables: tables
                .iter()
                .map(|t| ExtTable { name: t.to_string() })
                .collect(),
            jobs,
        }
    }

    fn edge(name: &str, id: usize) -> JobRef {
        JobRef {
            name: name.to_string(),
            id,
        }
    }

    fn edges(nodes: &[JobNode]) -> Vec<Vec<usize>> {
        nodes
            .iter()
            .map(|n| n.inputs.iter().map(|r| r.id).collect())
            .collect()
    }

    #[test]
    fn split_refs_counts() {
        assert_eq!(split_refs(""), Vec::<String>::new());
        assert_eq!(split_refs(" \t "), Vec::<String>::new());
        assert_eq!(split_refs("a"), vec!["a"]);
        assert_eq!(split_refs("a, b"), vec!["a", "b"]);
        assert_eq!(split_refs("\ta ,b\t, c "), vec!["a", "b", "c"]);
        assert_eq!(split_refs("a,,b"), vec!["a", "", "b"]);
    }

    #[test]
    fn chain_of_jobs() {
        let cfg = config(
            &["raw_events"],
            vec![job("raw_events", "daily_agg", "Q1"), job("daily_agg", "report", "Q2")],
        );
        let nodes = build_graph(&cfg, BuildOptions::default()).unwrap();

        assert_eq!(
            nodes,
            vec![
                JobNode {
                    id: 0,
                    label: "raw_events".to_string(),
                    inputs: vec![],
                    external: true,
                },
                JobNode {
                    id: 1,
                    label: "Q1".to_string(),
                    inputs: vec![edge("raw_events", 0)],
                    external: false,
                },
                JobNode {
                    id: 2,
                    label: "Q2".to_string(),
                    inputs: vec![edge("daily_agg", 1)],
                    external: false,
                },
            ]
        );
    }

    #[test]
    fn imports_come_first_without_inputs() {
        let cfg = config(&["a", "b", "c"], vec![job("c", "d", "J")]);
        let nodes = build_graph(&cfg, BuildOptions::default()).unwrap();

        let ids: Vec<usize> = nodes.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        for n in &nodes[..3] {
            assert!(n.external);
            assert!(n.inputs.is_empty());
        }
        assert_eq!(nodes[3].inputs, vec![edge("c", 2)]);
    }

    #[test]
    fn missing_producer_falls_back_to_zero() {
        let cfg = config(
            &["something_else"],
            vec![job("missing_table", "x", "Q1")],
        );
        let nodes = build_graph(&cfg, BuildOptions::default()).unwrap();
        assert_eq!(nodes[1].inputs, vec![edge("missing_table", 0)]);
    }

    #[test]
    fn missing_producer_is_an_error_when_strict() {
        let cfg = config(&["t"], vec![job("missing_table", "x", "Q1")]);
        let opts = BuildOptions {
            strict: true,
            ..Default::default()
        };
        let err = build_graph(&cfg, opts).unwrap_err();
        assert!(err.to_string().contains("missing_table"));
    }

    #[test]
    fn no_forward_references() {
        // Job 0 reads "later", which only job 1 produces.
        let cfg = config(
            &[],
            vec![job("later", "first", "A"), job("", "later", "B"), job("later", "", "C")],
        );
        let nodes = build_graph(&cfg, BuildOptions::default()).unwrap();
        assert_eq!(edges(&nodes), vec![vec![0], vec![], vec![1]]);
    }

    #[test]
    fn job_does_not_consume_its_own_output() {
        let cfg = config(&["t"], vec![job("x", "x", "self")]);
        let nodes = build_graph(&cfg, BuildOptions::default()).unwrap();
        assert_eq!(nodes[1].inputs, vec![edge("x", 0)]);
    }

    #[test]
    fn later_producer_overwrites_without_rewriting_earlier_edges() {
        let cfg = config(
            &["t"],
            vec![
                job("t", "x", "first"),
                job("x", "", "reads first"),
                job("t", "x", "second"),
                job("x", "", "reads second"),
            ],
        );
        let nodes = build_graph(&cfg, BuildOptions::default()).unwrap();
        assert_eq!(edges(&nodes), vec![vec![], vec![0], vec![1], vec![0], vec![3]]);
    }

    #[test]
    fn names_are_case_insensitive() {
        let cfg = config(
            &["Orders"],
            vec![job("orders, ORDERS ,Orders", "", "Q")],
        );
        let nodes = build_graph(&cfg, BuildOptions::default()).unwrap();
        assert_eq!(
            nodes[1].inputs,
            vec![edge("orders", 0), edge("orders", 0), edge("orders", 0)]
        );
    }

    #[test]
    fn multiple_outputs_share_the_job_id() {
        let cfg = config(
            &["t"],
            vec![job("t", "a, b", "split"), job("b, a", "", "join")],
        );
        let nodes = build_graph(&cfg, BuildOptions::default()).unwrap();
        assert_eq!(nodes[2].inputs, vec![edge("b", 1), edge("a", 1)]);
    }

    #[test]
    fn input_list_sizes() {
        let cfg = config(
            &["a", "b"],
            vec![job("", "", "none"), job("a", "", "one"), job("a, b", "", "two")],
        );
        let nodes = build_graph(&cfg, BuildOptions::default()).unwrap();
        let counts: Vec<usize> = nodes[2..].iter().map(|n| n.inputs.len()).collect();
        assert_eq!(counts, vec![0, 1, 2]);
    }

    #[test]
    fn empty_config_is_empty_graph() {
        let nodes = build_graph(&JobConfig::default(), BuildOptions::default()).unwrap();
        assert!(nodes.is_empty());
    }

    #[test]
    fn window_syntax_resolves_by_table_name() {
        let cfg = config(
            &["clicks"],
            vec![
                job("Clicks (window 60 delay 10 primary)", "agg (window 60)", "Q1"),
                job("agg (window 3600)", "", "Q2"),
            ],
        );
        let opts = BuildOptions {
            syntax: RefSyntax::Window,
            ..Default::default()
        };
        let nodes = build_graph(&cfg, opts).unwrap();
        assert_eq!(nodes[1].inputs, vec![edge("clicks", 0)]);
        assert_eq!(nodes[2].inputs, vec![edge("agg", 1)]);
    }

    #[test]
    fn window_syntax_error_names_the_job() {
        let cfg = config(&[], vec![job("t (window)", "", "Q")]);
        let opts = BuildOptions {
            syntax: RefSyntax::Window,
            ..Default::default()
        };
        let err = build_graph(&cfg, opts).unwrap_err();
        assert!(format!("{:#}", err).contains("input of job 0"));
    }
}
