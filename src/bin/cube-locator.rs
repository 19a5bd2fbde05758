use std::{io::{self, Write}, process::ExitCode};

use clap::{Parser, Subcommand};
use cube_locator::{
    selftest::{self, DEFAULT_TOLERANCE, SUITES},
    BoundaryPolicy,
    CubeLocator,
    LocatorConfig,
};
use tracing::{debug, error, info};
use tracing_subscriber::{fmt, EnvFilter};

/// Locate coordinates in a periodic cube of side length 2π
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Treatment of exact multiples of 2π (reject, normalize)
    #[arg(short, long, global=true, default_value_t=BoundaryPolicy::Reject)]
    boundary: BoundaryPolicy,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the position of each coordinate in [0, 2π)
    Locate {
        #[arg(required=true, allow_negative_numbers=true)]
        values: Vec<f64>,
    },
    /// Run the regression fixtures and a random invariant sweep
    SelfTest {
        /// Relative tolerance for regression cases
        #[arg(short, long, default_value_t=DEFAULT_TOLERANCE)]
        tolerance: f64,
        /// Number of random inputs to check (0 to skip)
        #[arg(short='n', long, default_value_t=10_000)]
        samples: usize,
        /// Random inputs are drawn from (-magnitude, magnitude)
        #[arg(short, long, default_value_t=1e6)]
        magnitude: f64,
        /// Seed for the random sweep
        #[arg(short, long, default_value_t=0)]
        seed: u64,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,cube_locator=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Print the position of each value, one per line. Returns the number of
/// rejected values.
fn locate(out: &mut impl Write, locator: &CubeLocator, values: &[f64]) -> io::Result<usize> {
    let mut rejected = 0;
    for &x in values {
        match locator.locate(x) {
            Ok(pos) => writeln!(out, "{pos}")?,
            Err(e) => {
                error!("{e}");
                rejected += 1;
            }
        }
    }
    Ok(rejected)
}

/// Run the fixtures and the random sweep. Returns the number of failures.
fn self_test(out: &mut impl Write, locator: &CubeLocator, tolerance: f64, samples: usize, magnitude: f64, seed: u64) -> io::Result<usize> {
    let mut failures = 0;
    for (i, suite) in SUITES.iter().enumerate() {
        if i > 0 {
            writeln!(out, "\n")?;
        }
        writeln!(out, "**** Testing {} ****", suite.name)?;
        let report = selftest::run_suite(locator, suite, tolerance);
        for outcome in report.outcomes.iter() {
            writeln!(out, "{outcome}")?;
        }
        failures += report.failures();
    }

    if samples > 0 {
        writeln!(out, "\n\n**** Checking {samples} random values in ±{magnitude} (seed {seed}) ****")?;
        let violations = selftest::property_sweep(locator, samples, magnitude, seed);
        for violation in violations.iter() {
            writeln!(out, "***** Violation at x = {:.7}: {:?}", violation.input, violation.kind)?;
        }
        if violations.is_empty() {
            writeln!(out, "***** All invariants held")?;
        }
        failures += violations.len();
    }

    if failures == 0 {
        info!("self-test passed");
    } else {
        error!(failures, "self-test failed");
    }
    Ok(failures)
}

fn run(out: &mut impl Write, args: Args) -> io::Result<usize> {
    let locator = CubeLocator::new(LocatorConfig::new(args.boundary));
    debug!(boundary = %args.boundary, rejects = args.boundary.rejects_boundary(), "configured locator");

    match args.command {
        Command::Locate { values } => locate(out, &locator, &values),
        Command::SelfTest { tolerance, samples, magnitude, seed } => self_test(out, &locator, tolerance, samples, magnitude, seed),
    }
}

/// Process exit status for a failure count
fn exit_status(failures: usize) -> u8 {
    if failures == 0 { 0 } else { 1 }
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();
    let mut stdout = io::stdout().lock();

    match run(&mut stdout, args) {
        Ok(failures) => ExitCode::from(exit_status(failures)),
        Err(e) => {
            error!("Unable to write output: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn run_args(args: &[&str]) -> (u8, String) {
        let args = Args::try_parse_from(args.iter().copied()).unwrap();
        let mut out = Vec::new();
        let failures = run(&mut out, args).unwrap();
        (exit_status(failures), String::from_utf8(out).unwrap())
    }

    #[test]
    fn locate_values() {
        let (status, out) = run_args(&["cube-locator", "locate", "5.83", "-0.23"]);
        assert_eq!(status, 0);
        let lines: Vec<f64> = out.lines().map(|line| line.parse().unwrap()).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], 5.83);
        assert!((lines[1] - 6.053185307).abs() < 1e-8);
    }

    #[test]
    fn locate_rejects_boundary() {
        let (status, out) = run_args(&["cube-locator", "locate", "-0.23", "0", "5.83"]);
        assert_eq!(status, 1);
        // Remaining values are still printed
        assert_eq!(out.lines().count(), 2);
        assert_eq!(out.lines().last(), Some("5.83"));
    }

    #[test]
    fn boundary_flag() {
        for args in [
            &["cube-locator", "--boundary", "normalize", "locate", "0"][..],
            &["cube-locator", "locate", "-b", "normalize", "0"][..],
            &["cube-locator", "locate", "0", "--boundary=normalize"][..],
        ] {
            let (status, out) = run_args(args);
            assert_eq!(status, 0, "{args:?}");
            assert_eq!(out.trim(), "0", "{args:?}");
        }

        let args = Args::try_parse_from(["cube-locator", "-b", "normalize", "self-test"]).unwrap();
        assert_eq!(args.boundary, BoundaryPolicy::Normalize);
        let args = Args::try_parse_from(["cube-locator", "self-test"]).unwrap();
        assert_eq!(args.boundary, BoundaryPolicy::Reject);
        assert!(Args::try_parse_from(["cube-locator", "-b", "reflect", "self-test"]).is_err());
    }

    #[test]
    fn locate_requires_values() {
        assert!(Args::try_parse_from(["cube-locator", "locate"]).is_err());
    }

    #[test]
    fn self_test_passes() {
        for policy in ["reject", "normalize"] {
            let (status, out) = run_args(&["cube-locator", "-b", policy, "self-test", "-n", "2000"]);
            assert_eq!(status, 0, "{out}");
            assert_eq!(out.matches("passed").count(), 16);
            assert!(out.contains("All invariants held"));
        }
    }

    #[test]
    fn self_test_fails_at_zero_tolerance() {
        let (status, out) = run_args(&["cube-locator", "self-test", "--tolerance", "0", "-n", "0"]);
        assert_eq!(status, 1);
        assert_eq!(out.matches("failed").count(), 16);
        assert!(!out.contains("random values"));
    }
}
