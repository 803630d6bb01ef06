//! nwtunnel-perf: scaling runs of the max-flow engine on random graphs

use std::process::ExitCode;

use clap::Parser;
use log::error;

use nwtunnel_core::validation::{run_suite, ScalingScenario, DEFAULT_SCENARIOS};

#[derive(Parser)]
#[command(name = "nwtunnel-perf")]
#[command(about = "Time max-flow computations on random graphs", long_about = None)]
struct Cli {
    /// Seed for graph generation
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Scenario as NODESxDEGREE, repeatable; defaults to the standard suite
    #[arg(short, long = "scenario")]
    scenarios: Vec<ScalingScenario>,

    /// Print samples as JSON lines
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let scenarios = if cli.scenarios.is_empty() {
        DEFAULT_SCENARIOS.to_vec()
    } else {
        cli.scenarios
    };

    let samples = match run_suite(&scenarios, cli.seed) {
        Ok(samples) => samples,
        Err(err) => {
            error!("scaling run aborted");
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    for sample in samples {
        if cli.json {
            match serde_json::to_string(&sample) {
                Ok(line) => println!("{}", line),
                Err(err) => {
                    eprintln!("{}", err);
                    return ExitCode::FAILURE;
                }
            }
        } else {
            println!(
                "{:<14}{:<14}time: {:.5} seconds",
                format!("{} nodes", sample.scenario.nodes),
                format!("{} edges/n", sample.scenario.out_degree),
                sample.execution_time.as_secs_f64()
            );
        }
    }

    ExitCode::SUCCESS
}
