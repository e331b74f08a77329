use std::io::Read;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

use graphpad::layout::{self, Canvas};
use graphpad::{TextFormat, export, report};

#[derive(Parser)]
#[command(name = "graphpad", about = "Analyze and convert graphs written as edge lists or adjacency matrices")]
struct Cli {
    /// Input file (reads from stdin if not provided)
    file: Option<std::path::PathBuf>,

    /// Read the input as an adjacency matrix instead of an edge list
    #[arg(long, short = 'm')]
    matrix: bool,

    /// Treat edges as directed
    #[arg(long, short = 'd')]
    directed: bool,

    /// What to print
    #[arg(long, short = 'e', value_enum, default_value_t = Emit::Stats)]
    emit: Emit,

    /// Re-position nodes before emitting
    #[arg(long, short = 'l', value_enum)]
    layout: Option<LayoutKind>,

    /// Log skipped lines and parse summaries to stderr
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Emit {
    Stats,
    ReportJson,
    Edges,
    Matrix,
    Dot,
    Json,
    Adjacency,
}

#[derive(Clone, Copy, ValueEnum)]
enum LayoutKind {
    Circle,
    Grid,
    Tree,
}

/// Stderr logger at `Debug` when verbose and `Warn` otherwise. `RUST_LOG`
/// is applied on top when the builder is installed.
fn logger(verbose: bool) -> env_logger::Builder {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);
    builder
}

fn main() {
    let cli = Cli::parse();

    logger(cli.verbose).parse_default_env().init();

    let input = match cli.file {
        Some(path) => std::fs::read_to_string(&path).unwrap_or_else(|e| {
            eprintln!("ERROR: failed to read {}: {e}", path.display());
            std::process::exit(1);
        }),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).unwrap_or_else(|e| {
                eprintln!("ERROR: failed to read stdin: {e}");
                std::process::exit(1);
            });
            buf
        }
    };

    let format = if cli.matrix {
        TextFormat::Matrix
    } else {
        TextFormat::EdgeList
    };

    let mut graph = match graphpad::parse(&input, format, cli.directed) {
        Ok(graph) => graph,
        Err(e) => {
            eprintln!("ERROR: {e}");
            std::process::exit(1);
        }
    };

    match cli.layout {
        Some(LayoutKind::Circle) => layout::circle(&mut graph, Canvas::default()),
        Some(LayoutKind::Grid) => layout::grid(&mut graph, Canvas::default()),
        Some(LayoutKind::Tree) => layout::tree(&mut graph, Canvas::default()),
        None => {}
    }

    let output = match cli.emit {
        Emit::Stats => Ok(report::render(&graphpad::StatsReport::compute(&graph))),
        Emit::ReportJson => graphpad::StatsReport::compute(&graph).to_json(),
        Emit::Edges => Ok(graphpad::serialize(&graph, TextFormat::EdgeList)),
        Emit::Matrix => Ok(graphpad::serialize(&graph, TextFormat::Matrix)),
        Emit::Dot => Ok(export::to_dot(&graph)),
        Emit::Json => export::to_json(&graph),
        Emit::Adjacency => Ok(export::to_adjacency_list(&graph)),
    };

    match output {
        Ok(text) if text.ends_with('\n') || text.is_empty() => print!("{text}"),
        Ok(text) => println!("{text}"),
        Err(e) => {
            eprintln!("ERROR: {e}");
            std::process::exit(1);
        }
    }
}
