//! Command-line entry point: read an instance, run the search, leave the
//! best wave in the output file.

use std::env;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use wave_pick::bias::AisleBiasTable;
use wave_pick::io::{read_instance, FileCheckpoint};
use wave_pick::lp::HighsLpSolver;
use wave_pick::search::{SearchConfig, SearchRunner};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("usage: wave-pick <instance-file> <output-file>");
        return ExitCode::FAILURE;
    }

    let instance = match read_instance(&args[1]) {
        Ok(instance) => instance,
        Err(error) => {
            tracing::error!(%error, path = %args[1], "could not read instance");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(
        orders = instance.n_orders(),
        items = instance.n_items(),
        aisles = instance.n_aisles(),
        lower = instance.bounds().lower,
        upper = instance.bounds().upper,
        "instance loaded"
    );

    let bias = AisleBiasTable::from_instance(&instance);
    let config = SearchConfig::new();
    let solver = HighsLpSolver::new();
    let mut sink = FileCheckpoint::new(&args[2]);

    match SearchRunner::run(&instance, &bias, &solver, &mut sink, &config) {
        Ok(result) => {
            match &result.best {
                Some(best) => tracing::info!(
                    productivity = best.productivity,
                    orders = best.orders.len(),
                    aisles = best.aisles.len(),
                    output = %args[2],
                    "best wave written"
                ),
                None => tracing::warn!("no feasible wave found; nothing written"),
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            tracing::error!(%error, output = %args[2], "checkpoint write failed");
            ExitCode::FAILURE
        }
    }
}
