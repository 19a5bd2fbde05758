use thiserror::Error;

/// Error generated when [locating](crate::CubeLocator::locate) a coordinate
#[derive(Copy, Clone, Debug, PartialEq, Error)]
#[non_exhaustive]
pub enum LocateError {
    /// Input is an exact multiple of 2π (including zero) that the
    /// reference case analysis leaves unhandled
    #[error("Cannot find cube location x = {x:.5} (exact multiple of 2π)")]
    UnrepresentableBoundary {
        x: f64,
    },
    #[error("Cannot find cube location for non-finite x = {x}")]
    NonFinite {
        x: f64,
    },
}

impl LocateError {
    /// The rejected input
    pub const fn input(&self) -> f64 {
        match self {
            Self::UnrepresentableBoundary { x } => *x,
            Self::NonFinite { x } => *x,
        }
    }
}
