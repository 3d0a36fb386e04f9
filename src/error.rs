//! Error types for energy-balance computations.

use thiserror::Error;

/// Errors raised by a single calculator call.
///
/// All errors are local to one call; the calculator holds no state that a
/// failure could corrupt.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// The requested panel technology is not in the catalog.
    #[error("unknown panel type \"{name}\", available: {available}")]
    InvalidPanelType {
        /// Key that was looked up.
        name: String,
        /// Comma-separated list of catalog keys.
        available: String,
    },

    /// A negative number of panels was requested.
    #[error("panel count must be >= 0, got {count}")]
    InvalidPanelCount {
        /// Count that was requested.
        count: i64,
    },

    /// ROI requested for an installation that costs nothing.
    #[error("return on investment is undefined for a zero installation cost")]
    RoiUndefined,
}

/// Result alias for calculator operations.
pub type Result<T> = std::result::Result<T, SimError>;
