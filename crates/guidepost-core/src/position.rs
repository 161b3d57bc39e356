#![forbid(unsafe_code)]

//! Position engine: backdrop, scroll destination, and message/arrow layout.
//!
//! Every function here is pure. Inputs are document-absolute, so results do
//! not depend on where the surface is currently scrolled.
//!
//! # Two passes
//!
//! The message box's height depends on its rendered content, which the host
//! only knows after laying it out. Layout is therefore split:
//!
//! 1. [`compute_pass_one`]: backdrop cutout and scroll destination, from the
//!    target alone.
//! 2. [`compute_message_geometry`]: message offset and arrow, once the box
//!    height `h` has been measured after the next paint.
//!
//! # Invariants
//!
//! 1. The backdrop contains the target, inflated by `radius` on every side.
//! 2. The arrow is horizontally centred on the target.
//! 3. A `Top` message ends `arrow_height` above the backdrop; a `Bottom`
//!    message starts `arrow_height` below it.
//! 4. `h = 0` needs no special case.

use crate::config::TourConfig;
use crate::geometry::{Point, Rect, Size};
use crate::step::Placement;

/// Scroll destination in document coordinates. `x` is always `0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollTarget {
    pub x: f64,
    pub y: f64,
}

/// Message box and arrow placement from pass 2.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MessageGeometry {
    /// Top of the message box.
    pub message_y: f64,
    /// Arrow origin. `x` is document-absolute, `y` is relative to the
    /// message box top.
    pub arrow_origin: Point,
    /// Arrow width and height.
    pub arrow_size: Size,
}

/// Everything the overlay needs to draw one step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OverlayGeometry {
    /// Backdrop cutout.
    pub backdrop: Rect,
    /// Where pass 1 scrolled to.
    pub scroll: ScrollTarget,
    /// `None` until pass 2 has measured the message box.
    pub message: Option<MessageGeometry>,
}

impl OverlayGeometry {
    /// Attach pass-2 results.
    #[must_use]
    pub fn with_message(mut self, message: MessageGeometry) -> Self {
        self.message = Some(message);
        self
    }

    /// True once both passes have run.
    pub fn is_complete(&self) -> bool {
        self.message.is_some()
    }
}

/// Expand `target` by `config.radius` on every side.
pub fn compute_backdrop(target: Rect, config: &TourConfig) -> Rect {
    target.inflate(config.radius)
}

/// Where to scroll so the target and its message are visible.
///
/// `Top` scrolls further down so the space above the target shows; `Bottom`
/// brings the target's top edge plus offset into view. No clamping.
pub fn compute_scroll_target(
    target: Rect,
    placement: Placement,
    config: &TourConfig,
    viewport_height: f64,
) -> ScrollTarget {
    let y = match placement {
        Placement::Top => {
            target.y - viewport_height
                + target.height
                + config.radius
                + config.scroll_bottom_offset
        }
        Placement::Bottom => target.y - config.radius - config.scroll_bottom_offset,
    };
    ScrollTarget { x: 0.0, y }
}

/// Message box offset and arrow placement for a measured box height.
pub fn compute_message_geometry(
    target: Rect,
    message_box_height: f64,
    placement: Placement,
    config: &TourConfig,
) -> MessageGeometry {
    let h = message_box_height;
    let (message_y, arrow_y) = match placement {
        Placement::Top => (
            target.y - config.radius - config.arrow_height - h,
            h,
        ),
        Placement::Bottom => (
            target.y + target.height + config.radius + config.arrow_height,
            -config.arrow_height,
        ),
    };
    let arrow_x = target.center_x() - config.arrow_width / 2.0;

    MessageGeometry {
        message_y,
        arrow_origin: Point::new(arrow_x, arrow_y),
        arrow_size: Size::new(config.arrow_width, config.arrow_height),
    }
}

/// Pass 1: backdrop and scroll destination.
pub fn compute_pass_one(
    target: Rect,
    placement: Placement,
    config: &TourConfig,
    viewport_height: f64,
) -> OverlayGeometry {
    OverlayGeometry {
        backdrop: compute_backdrop(target, config),
        scroll: compute_scroll_target(target, placement, config, viewport_height),
        message: None,
    }
}
