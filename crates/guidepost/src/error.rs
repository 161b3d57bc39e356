#![forbid(unsafe_code)]

//! Top-level error for applications that both load configuration and drive
//! a tour.

use std::fmt;

#[cfg(feature = "config")]
use guidepost_core::config::ConfigError;
use guidepost_core::error::TourError;

/// Any Guidepost failure.
#[derive(Debug)]
pub enum Error {
    /// A tour operation failed.
    Tour(TourError),
    /// Configuration could not be read or parsed.
    #[cfg(feature = "config")]
    Config(ConfigError),
}

impl Error {
    /// Whether the tour can keep being driven after this error.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Tour(err) => err.is_recoverable(),
            #[cfg(feature = "config")]
            Self::Config(_) => true,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tour(err) => write!(f, "{err}"),
            #[cfg(feature = "config")]
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Tour(err) => Some(err),
            #[cfg(feature = "config")]
            Self::Config(err) => Some(err),
        }
    }
}

impl From<TourError> for Error {
    fn from(err: TourError) -> Self {
        Self::Tour(err)
    }
}

#[cfg(feature = "config")]
impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for Guidepost applications.
pub type Result<T> = std::result::Result<T, Error>;
