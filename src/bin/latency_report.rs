use std::process::ExitCode;

use clap::Parser;
use lob_bench::config::init_logging;
use lob_bench::{BenchConfig, BenchError, Harness, LatencySamples, RunReport, Variant, NO_PRICE};

/// Run every variant on the same event stream and compare latency distributions
#[derive(Parser, Debug)]
#[command(name = "latency-report")]
struct Args {
    #[arg(long, default_value_t = BenchConfig::DEFAULT_EVENTS)]
    events: usize,

    #[arg(long, default_value_t = BenchConfig::DEFAULT_WARMUP)]
    warmup: usize,

    #[arg(long, default_value_t = BenchConfig::DEFAULT_SAMPLE_EVERY)]
    sample_every: usize,

    #[arg(long, default_value_t = BenchConfig::DEFAULT_SEED)]
    seed: u64,

    #[arg(long, default_value_t = false)]
    pin_core: bool,

    #[arg(short = 'l', long, default_value = "warn", value_parser = ["trace", "debug", "info", "warn", "error"])]
    log_level: String,
}

fn print_report(report: &RunReport, samples: &LatencySamples) -> Result<(), BenchError> {
    let histogram = samples.histogram()?;

    println!("\n=== {} ({} events) ===", report.variant, report.events);
    println!("Throughput: {:.2} ev/sec", report.throughput);
    println!("---------------------------");
    println!("Min:    {:6} ns", report.latency.min);
    println!("P50:    {:6} ns", report.latency.median);
    println!("P95:    {:6} ns", report.latency.p95);
    println!("P99:    {:6} ns", report.latency.p99);
    println!("P99.9:  {:6} ns", report.latency.p999);
    println!("Max:    {:6} ns", report.latency.max);
    println!("---------------------------");
    println!(
        "Best bid/ask: {} / {}",
        report.best_bid.unwrap_or(NO_PRICE),
        report.best_ask.unwrap_or(NO_PRICE)
    );

    println!("\nDistribution:");
    let mut lower = 0;
    for v in histogram.iter_log(64, 2.0) {
        let count = v.count_since_last_iteration();
        let upper = v.value_iterated_to();
        if count > 0 {
            println!("{:8} ns - {:8} ns: {:10}", lower, upper, count);
        }
        lower = upper + 1;
    }
    Ok(())
}

fn run(args: &Args) -> Result<bool, BenchError> {
    let mut reports = Vec::with_capacity(Variant::ALL.len());

    for variant in Variant::ALL {
        let config = BenchConfig {
            variant,
            events: args.events,
            warmup: args.warmup,
            sample_every: args.sample_every,
            seed: args.seed,
            pin_core: args.pin_core,
        };
        let harness = Harness::new(config)?;
        let mut book = variant.build();
        let (report, samples) = harness.run_sampled(book.as_mut())?;
        print_report(&report, &samples)?;
        reports.push(report);
    }

    println!("\n=== Summary ===");
    for report in &reports {
        println!("{report}");
    }

    let first = &reports[0];
    let agree = reports
        .iter()
        .all(|r| r.best_bid == first.best_bid && r.best_ask == first.best_ask);
    if !agree {
        tracing::error!("variants disagree on final best bid/ask");
    }
    Ok(agree)
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args.log_level);

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            eprintln!("error: variants disagree on final best bid/ask");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_defaults_to_warn() {
        let args = Args::parse_from(["latency-report"]);
        assert_eq!(args.log_level, "warn");
    }

    #[test]
    fn test_log_level_restricted() {
        assert!(Args::try_parse_from(["latency-report", "-l", "debug"]).is_ok());
        assert!(Args::try_parse_from(["latency-report", "--log-level", "verbose"]).is_err());
    }
}
