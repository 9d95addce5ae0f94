use anyhow::Context;
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};

mod conf;
mod graph;
mod render;
mod window;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "jobgraph")]
#[command(about = "Render a job configuration as a dependency graph", long_about = None)]
struct Cli {
    /// Job configuration file (.xml, or .json).
    #[arg(long)]
    config: String,

    /// Output format.
    #[arg(long, value_enum, default_value_t = render::Format::Gv)]
    format: render::Format,

    /// Vertex labels.
    #[arg(long, value_enum, default_value_t = render::LabelStyle::Id)]
    style: render::LabelStyle,

    /// Parse references as `name (window <size> delay <offset> [primary])`.
    #[arg(long)]
    window_syntax: bool,

    /// Fail on inputs with no earlier producer instead of linking them to node 0.
    #[arg(long)]
    strict: bool,

    /// Write the graph here instead of stdout.
    #[arg(short = 'o', long)]
    out: Option<String>,
}

fn main() -> Result<()> {
    // stdout carries the graph; logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // 1) Load config.
    let cfg = conf::load_config(&cli.config)?;

    // 2) Build graph.
    let opts = graph::BuildOptions {
        syntax: if cli.window_syntax {
            window::RefSyntax::Window
        } else {
            window::RefSyntax::Plain
        },
        strict: cli.strict,
    };
    let nodes = graph::build_graph(&cfg, opts)?;

    // 3) Render.
    let writer = cli.format.writer();
    match &cli.out {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("create output file {}", path))?;
            let mut out = BufWriter::new(file);
            writer.write_graph(&nodes, cli.style, &mut out)?;
            out.flush()?;
        }
        None => {
            let mut out = io::stdout().lock();
            writer.write_graph(&nodes, cli.style, &mut out)?;
            out.flush()?;
        }
    }

    tracing::info!(
        nodes = nodes.len(),
        tables = cfg.tables.len(),
        jobs = cfg.jobs.len(),
        "processed config"
    );
    Ok(())
}
