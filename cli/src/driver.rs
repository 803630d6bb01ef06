//! The `nwtunnel` command: arguments and outcome-to-status mapping

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use log::{debug, error};

use nwtunnel_core::MaxFlowSolver;

use crate::loader::load_graph;
use crate::report::{
    render_no_path, render_success, OutputFormat, EXIT_LOAD_FAILURE, EXIT_NO_PATH, EXIT_SUCCESS,
};

#[derive(Debug, Parser)]
#[command(name = "nwtunnel")]
#[command(about = "max flow calculator", long_about = None)]
pub struct Cli {
    /// A JSON file describing the tunnel system as a list of edges
    #[arg(short, long)]
    pub graph_file: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Node the flow starts from
    pub start: String,

    /// Node the flow drains into
    pub end: String,
}

/// Loads the graph, solves, writes the report and returns the exit status
///
/// Results go to `out`, load failures and the no-path message to `err`.
/// Only failures to write the report itself surface as `Err`.
pub fn run<O, E>(cli: &Cli, out: &mut O, err: &mut E) -> io::Result<u8>
where
    O: Write,
    E: Write,
{
    let graph = match load_graph(&cli.graph_file) {
        Ok(graph) => graph,
        Err(load_error) => {
            error!("failed to load {}", cli.graph_file.display());
            writeln!(err, "{}", load_error)?;
            return Ok(EXIT_LOAD_FAILURE);
        }
    };

    debug!("computing max flow from {} to {}", cli.start, cli.end);
    match MaxFlowSolver::new().solve(&graph, &cli.start, &cli.end) {
        Ok(result) => {
            let report = render_success(&cli.start, &cli.end, &result, cli.format)?;
            writeln!(out, "{}", report)?;
            Ok(EXIT_SUCCESS)
        }
        Err(flow_error) => {
            writeln!(err, "{}", render_no_path(&flow_error, cli.format))?;
            Ok(EXIT_NO_PATH)
        }
    }
}
