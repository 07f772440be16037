use std::process::ExitCode;

use clap::Parser;
use lob_bench::config::init_logging;
use lob_bench::report::append_csv;
use lob_bench::{CliArgs, Harness, Result};

fn run(args: &CliArgs) -> Result<()> {
    let config = args.to_config()?;
    let report = Harness::new(config)?.run()?;

    println!("{report}");

    if let Some(path) = &args.csv {
        append_csv(path, &report)?;
        tracing::info!(path = %path.display(), "appended csv record");
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(&args.log_level);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "benchmark aborted");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
