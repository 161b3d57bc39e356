#![forbid(unsafe_code)]

//! Guidepost public facade crate.
//!
//! Re-exports the types needed to build and drive a tour, and a prelude for
//! day-to-day use.
//!
//! ```ignore
//! use guidepost::prelude::*;
//!
//! let mut tour = Tour::new(&mut surface, steps, TourConfig::default())?;
//! tour.start_first(&mut surface)?;
//! // after the host paints:
//! tour.after_paint(&mut surface, ticket)?;
//! ```

mod error;

pub use error::{Error, Result};

// --- Core re-exports -------------------------------------------------------

#[cfg(feature = "config")]
pub use guidepost_core::config::ConfigError;
pub use guidepost_core::config::{ScrollBehavior, TourConfig};
pub use guidepost_core::error::TourError;
pub use guidepost_core::geometry::{Measurement, Point, Rect, Size};
pub use guidepost_core::node::NodeHandle;
pub use guidepost_core::position::{MessageGeometry, OverlayGeometry, ScrollTarget};
pub use guidepost_core::step::{Placement, Step, StepContent};

// --- Backend re-exports ----------------------------------------------------

pub use guidepost_backend::{NodeKind, NodeStyle, PaintTicket, RenderSurface};

// --- Runtime re-exports ----------------------------------------------------

pub use guidepost_runtime::{
    OverlayHandles, OverlayLifecycle, PaintOutcome, StepSequencer, Tour, TourAdvanceReason,
    TourEvent, TourPhase,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Error, NodeHandle, PaintOutcome, PaintTicket, Placement, Rect, RenderSurface, Result, Step,
        Tour, TourConfig, TourError, TourEvent,
    };

    pub use crate::{backend, core, runtime};
}

pub use guidepost_backend as backend;
pub use guidepost_core as core;
pub use guidepost_runtime as runtime;
