//! Regression fixtures and a relative-error harness for [CubeLocator].
//!
//! The fixtures are hand-computed positions for inputs above the cube,
//! inside it, and below zero. [run_suite] checks each against a relative
//! tolerance; [property_sweep] checks random inputs against the range and
//! congruence invariants.
use std::{f64::consts::TAU, fmt::Display};

use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::{debug, warn};

use crate::{util::math::ulp_step, CubeLocator, LocateError};

/// Default relative tolerance for regression cases
pub const DEFAULT_TOLERANCE: f64 = 1e-5;

/// Absolute congruence tolerance, scaled by `1 + |x|`
const CONGRUENCE_EPS: f64 = 1e-9;

/// A single regression case
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Case {
    pub input: f64,
    pub expected: f64,
}

impl Case {
    pub const fn new(input: f64, expected: f64) -> Self {
        Self { input, expected }
    }
}

/// A named group of regression cases
#[derive(Clone, Copy, Debug)]
pub struct Suite {
    pub name: &'static str,
    pub cases: &'static [Case],
}

/// Values greater than 2π
pub const ABOVE: Suite = Suite {
    name: "values greater than 2.0*pi",
    cases: &[
        Case::new(6.30, 0.01681469282),
        Case::new(500.25, 3.878360733),
        Case::new(185.03, 2.817626092),
        Case::new(7.20, 0.9168146928),
        Case::new(6.55, 0.2668146928),
    ],
};

/// Values inside the cube
pub const INSIDE: Suite = Suite {
    name: "values between 0.0 <= x <= 2.0*pi",
    cases: &[
        Case::new(5.83, 5.83),
        Case::new(0.50, 0.50),
        Case::new(4.13, 4.13),
        Case::new(6.20, 6.20),
        Case::new(5.11, 5.11),
    ],
};

/// Values below zero
pub const BELOW: Suite = Suite {
    name: "values x < 0.0",
    cases: &[
        Case::new(-0.23, 6.053185307),
        Case::new(-1.58, 4.703185307),
        Case::new(-3.65, 2.633185307),
        Case::new(-0.85, 5.433185307),
        Case::new(-7.85, 4.716370614),
        Case::new(-500.29, 2.364824574),
    ],
};

/// All regression suites, in reporting order
pub const SUITES: [Suite; 3] = [ABOVE, INSIDE, BELOW];

/// `|calc - expected| / |expected|`
#[inline]
pub fn relative_error(calc: f64, expected: f64) -> f64 {
    ((calc - expected) / expected).abs()
}

/// Result of running a single [Case]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaseOutcome {
    /// 1-based index within its suite
    pub index: usize,
    pub case: Case,
    pub result: Result<CaseValue, LocateError>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaseValue {
    pub calc: f64,
    pub error: f64,
    pub passed: bool,
}

impl CaseOutcome {
    pub fn passed(&self) -> bool {
        matches!(self.result, Ok(CaseValue { passed: true, .. }))
    }
}

impl Display for CaseOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.result {
            Ok(value) => write!(
                f,
                "***** Test #{} {} \t\t error= = {:.5e} \t\t calc = {:.7} \t\t exp = {:.7}",
                self.index,
                if value.passed { "passed" } else { "failed" },
                value.error,
                value.calc,
                self.case.expected,
            ),
            Err(e) => write!(
                f,
                "***** Test #{} failed \t\t {} \t\t exp = {:.7}",
                self.index,
                e,
                self.case.expected,
            ),
        }
    }
}

/// Outcomes of one [Suite]
#[derive(Clone, Debug, PartialEq)]
pub struct SuiteReport {
    pub name: &'static str,
    pub outcomes: Vec<CaseOutcome>,
}

impl SuiteReport {
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(CaseOutcome::passed)
    }

    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|outcome| !outcome.passed()).count()
    }
}

/// Run every case in `suite`, comparing with relative tolerance `tol`
pub fn run_suite(locator: &CubeLocator, suite: &Suite, tol: f64) -> SuiteReport {
    let outcomes = suite.cases
        .iter()
        .enumerate()
        .map(|(i, case)| {
            let result = locator.locate(case.input)
                .map(|calc| {
                    let error = relative_error(calc, case.expected);
                    CaseValue {
                        calc,
                        error,
                        passed: error < tol,
                    }
                });
            let outcome = CaseOutcome {
                index: i + 1,
                case: *case,
                result,
            };
            if !outcome.passed() {
                warn!(suite = suite.name, input = case.input, "regression case failed");
            }
            outcome
        })
        .collect();

    SuiteReport {
        name: suite.name,
        outcomes,
    }
}

/// An input that broke an invariant during [property_sweep]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Violation {
    pub input: f64,
    pub kind: ViolationKind,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViolationKind {
    /// Result outside `[0, 2π)`
    OutOfRange(f64),
    /// Result not congruent to the input modulo 2π
    NotCongruent(f64),
    /// Re-locating the result changed it
    NotIdempotent(f64),
}

/// Check `samples` random inputs in `±magnitude` against the locator's
/// invariants.
///
/// Every other input is drawn within two ulps of a multiple of 2π, where
/// rounding is most likely to push a result out of range. Inputs rejected
/// as boundaries are skipped. Nothing is sampled unless
/// `magnitude` is positive and finite.
pub fn property_sweep(locator: &CubeLocator, samples: usize, magnitude: f64, seed: u64) -> Vec<Violation> {
    if !(magnitude > 0. && magnitude.is_finite()) {
        warn!(magnitude, "skipping property sweep over an empty range");
        return Vec::new();
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut violations = Vec::new();
    let mut skipped = 0usize;
    let max_multiple = (magnitude / TAU).floor() as i64;

    for i in 0..samples {
        let input = if i % 2 == 1 && max_multiple >= 1 {
            let k = rng.gen_range(1..=max_multiple);
            let k = if rng.gen() { -k } else { k };
            ulp_step(k as f64 * TAU, rng.gen_range(-2..=2))
        } else {
            rng.gen_range(-magnitude..magnitude)
        };
        let pos = match locator.locate(input) {
            Ok(pos) => pos,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };

        if !(0. ..TAU).contains(&pos) {
            violations.push(Violation { input, kind: ViolationKind::OutOfRange(pos) });
            continue;
        }

        let k = ((input - pos) / TAU).round();
        if (input - pos - k * TAU).abs() >= CONGRUENCE_EPS * (1. + input.abs()) {
            violations.push(Violation { input, kind: ViolationKind::NotCongruent(pos) });
            continue;
        }

        if pos > 0. && locator.locate(pos) != Ok(pos) {
            violations.push(Violation { input, kind: ViolationKind::NotIdempotent(pos) });
        }
    }

    debug!(samples, skipped, violations = violations.len(), "property sweep finished");
    violations
}
