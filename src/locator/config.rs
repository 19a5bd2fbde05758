use std::{fmt::Display, str::FromStr};

use thiserror::Error;

/// How [CubeLocator](crate::CubeLocator) treats inputs that are exact
/// multiples of 2π
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BoundaryPolicy {
    /// Range-by-range case analysis. Zero, ±2π, and negative exact
    /// multiples of 2π are rejected.
    Reject,
    /// `x - 2π⌊x / 2π⌋`. Exact multiples map to `0`.
    Normalize,
}

impl BoundaryPolicy {
    /// All policies, in declaration order
    pub const ALL: [Self; 2] = [Self::Reject, Self::Normalize];

    /// Are exact multiples of 2π reported as errors?
    pub const fn rejects_boundary(&self) -> bool {
        matches!(self, Self::Reject)
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Reject => "reject",
            Self::Normalize => "normalize",
        }
    }
}

impl Default for BoundaryPolicy {
    fn default() -> Self {
        Self::Reject
    }
}

impl Display for BoundaryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("Unknown boundary policy: {0:?} (expected one of: reject, normalize)")]
pub struct ParseBoundaryPolicyError(String);

impl FromStr for BoundaryPolicy {
    type Err = ParseBoundaryPolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|policy| policy.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseBoundaryPolicyError(s.to_owned()))
    }
}

/// Configuration for a [CubeLocator](crate::CubeLocator)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LocatorConfig {
    /// Treatment of exact multiples of 2π
    pub boundary: BoundaryPolicy,
}

impl LocatorConfig {
    pub const fn new(boundary: BoundaryPolicy) -> Self {
        Self {
            boundary,
        }
    }
}
