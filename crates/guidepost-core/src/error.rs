#![forbid(unsafe_code)]

//! Tour error model.
//!
//! All failures are synchronous and surface at the call that caused them.
//! Nothing is retried. Zero-size targets and empty content are not errors.

use std::fmt;

/// Errors from tour operations.
#[derive(Debug, Clone, PartialEq)]
pub enum TourError {
    /// `start` was called with an index outside `[0, len)`.
    IndexOutOfRange { index: usize, len: usize },
    /// The tour has no steps.
    EmptyStepList,
    /// The step's target could not be measured on the surface.
    MissingTarget { index: usize },
    /// The configuration failed validation.
    InvalidConfig(Vec<String>),
    /// A render surface operation failed.
    Surface(String),
}

/// Standard result type for tour APIs.
pub type Result<T> = std::result::Result<T, TourError>;

impl TourError {
    /// Wrap a surface error by its display text.
    pub fn surface(err: impl fmt::Display) -> Self {
        Self::Surface(err.to_string())
    }

    /// Error type label for tracing fields.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::IndexOutOfRange { .. } => "index_out_of_range",
            Self::EmptyStepList => "empty_step_list",
            Self::MissingTarget { .. } => "missing_target",
            Self::InvalidConfig(_) => "invalid_config",
            Self::Surface(_) => "surface",
        }
    }

    /// Whether the tour is still usable after this error.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Surface(_))
    }
}

impl fmt::Display for TourError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "step index {index} out of range for {len} steps")
            }
            Self::EmptyStepList => write!(f, "tour has no steps"),
            Self::MissingTarget { index } => {
                write!(f, "target of step {index} is not on the surface")
            }
            Self::InvalidConfig(errors) => {
                write!(f, "invalid config: {}", errors.join("; "))
            }
            Self::Surface(msg) => write!(f, "render surface: {msg}"),
        }
    }
}

impl std::error::Error for TourError {}
