#![forbid(unsafe_code)]

//! Test harness and reference fixtures for Guidepost.
//!
//! - [`HeadlessSurface`]: in-memory [`RenderSurface`](guidepost_backend::RenderSurface)
//!   that lays out content only when painted, with a JSONL journal of every call
//! - [`log_capture`]: a `tracing-subscriber` layer for asserting on spans and events

pub mod headless;
pub mod log_capture;

pub use headless::{
    DEFAULT_LINE_HEIGHT, DEFAULT_VIEWPORT, HeadlessError, HeadlessSurface, ScrollCall, SurfaceOp,
};
pub use log_capture::{CaptureHandle, CapturedEvent, CapturedSpan, SpanCapture, with_captured_tracing};
