mod config;
mod error;

use std::f64::consts::TAU;

use tracing::{debug, trace};

use crate::util::math::{fold_tau, fract_floor, mod2pi_pos};

pub use config::{BoundaryPolicy, LocatorConfig, ParseBoundaryPolicyError};
pub use error::LocateError;

/// Side length of the periodic cube
pub const DOMAIN_LENGTH: f64 = TAU;

/// Locate `x` in the periodic cube `[0, 2π)`, using the default
/// [BoundaryPolicy::Reject] policy.
///
/// Inputs within rounding distance of a multiple of 2π (such as `-1e-20`)
/// locate to `0.0`, and `0.0` itself is rejected, so `wrap(wrap(x))` fails
/// for them. Use [BoundaryPolicy::Normalize] when results need to be
/// re-wrapped.
///
/// ```
/// # use cube_locator::{wrap, LocateError};
/// assert!((wrap(-0.23).unwrap() - 6.053185307).abs() < 1e-8);
/// assert_eq!(wrap(5.83), Ok(5.83));
/// assert!(matches!(wrap(0.), Err(LocateError::UnrepresentableBoundary { .. })));
/// assert_eq!(wrap(-1e-20), Ok(0.));
/// ```
#[inline]
pub fn wrap(x: f64) -> Result<f64, LocateError> {
    CubeLocator::default().locate(x)
}

/// Maps coordinates onto one axis of the periodic cube
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CubeLocator {
    config: LocatorConfig,
}

impl From<LocatorConfig> for CubeLocator {
    fn from(value: LocatorConfig) -> Self {
        Self::new(value)
    }
}

impl CubeLocator {
    pub const fn new(config: LocatorConfig) -> Self {
        Self {
            config,
        }
    }

    pub const fn with_policy(boundary: BoundaryPolicy) -> Self {
        Self::new(LocatorConfig::new(boundary))
    }

    pub const fn config(&self) -> &LocatorConfig {
        &self.config
    }

    /// Find the position of `x` in `[0, 2π)`.
    ///
    /// Returns an error for non-finite input, and (under
    /// [BoundaryPolicy::Reject]) for exact multiples of 2π that fall outside
    /// the strict ranges.
    pub fn locate(&self, x: f64) -> Result<f64, LocateError> {
        if !x.is_finite() {
            debug!(x, "rejecting non-finite coordinate");
            return Err(LocateError::NonFinite { x });
        }

        if self.config.boundary.rejects_boundary() {
            return locate_by_range(x);
        }

        let pos = fold_tau(mod2pi_pos(x));
        trace!(x, pos, "normalized");
        Ok(pos)
    }
}

/// Case analysis over the input range.
///
/// `x` must be finite.
fn locate_by_range(x: f64) -> Result<f64, LocateError> {
    let pos = if x > TAU {
        // Above the cube
        let part = fract_floor(x / TAU);
        TAU * part
    } else if x < 0. && x.abs() < TAU {
        // Within one period below zero
        TAU - x.abs()
    } else if x < 0. && x.abs() > TAU {
        // More than one period below zero
        let part = fract_floor((x / TAU).abs());
        if part == 0. {
            // Would land on 2π
            debug!(x, "rejecting negative multiple of 2π");
            return Err(LocateError::UnrepresentableBoundary { x });
        }
        TAU - TAU * part
    } else if x > 0. && x < TAU {
        x
    } else {
        debug!(x, "rejecting boundary coordinate");
        return Err(LocateError::UnrepresentableBoundary { x });
    };

    let pos = fold_tau(pos);
    trace!(x, pos, "located");
    Ok(pos)
}
