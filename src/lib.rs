//! Locate coordinates in a periodic cube of side length 2π.
//!
//! Any finite coordinate maps to its equivalent position in `[0, 2π)`.

mod locator;
pub(crate) mod util;
pub mod selftest;

pub use locator::{
    wrap,
    BoundaryPolicy,
    CubeLocator,
    LocateError,
    LocatorConfig,
    ParseBoundaryPolicyError,
    DOMAIN_LENGTH,
};
