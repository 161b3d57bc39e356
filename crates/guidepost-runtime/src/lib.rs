#![forbid(unsafe_code)]

//! Guidepost Runtime
//!
//! Stateful parts of a guided tour, driven over a
//! [`RenderSurface`](guidepost_backend::RenderSurface).
//!
//! # Key Components
//!
//! - [`Tour`] - Driver: composes the sequencer, the overlay, and the position engine
//! - [`StepSequencer`] - Pure state machine over the step list
//! - [`OverlayLifecycle`] - Sole owner of the backdrop, message box, and arrow
//!
//! # How it fits in the system
//! `guidepost-core` computes geometry; this crate decides when to compute it
//! and writes the results through the surface. Layout runs in two passes:
//! pass 1 on every transition, pass 2 when the host returns the
//! [`PaintTicket`](guidepost_backend::PaintTicket) to [`Tour::after_paint`].

pub mod overlay;
pub mod sequencer;
pub mod tour;

pub use overlay::{OverlayHandles, OverlayLifecycle};
pub use sequencer::{StepSequencer, TourAdvanceReason, TourEvent, TourPhase};
pub use tour::{PaintOutcome, Tour};
