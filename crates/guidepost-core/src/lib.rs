#![forbid(unsafe_code)]

//! Core: geometry, steps, configuration, errors, and the position engine.
//!
//! # Role in Guidepost
//! `guidepost-core` is pure data and pure functions. It knows nothing about
//! any render surface; it turns a measured target rectangle plus
//! configuration into backdrop, scroll, and message/arrow geometry.
//!
//! # Primary responsibilities
//! - **Geometry**: document-absolute [`Rect`](geometry::Rect), points, sizes,
//!   and viewport-to-document conversion.
//! - **Position engine**: the two-pass layout in [`position`].
//! - **Configuration**: [`TourConfig`](config::TourConfig) with defaults,
//!   validation, and optional TOML/JSON loading.
//! - **Errors**: the [`TourError`](error::TourError) model.

pub mod config;
pub mod error;
pub mod geometry;
pub mod node;
pub mod position;
pub mod step;

pub use config::{ScrollBehavior, TourConfig};
pub use error::{Result, TourError};
pub use geometry::{Measurement, Point, Rect, Size};
pub use node::NodeHandle;
pub use position::{MessageGeometry, OverlayGeometry, ScrollTarget};
pub use step::{Placement, Step, StepContent};
