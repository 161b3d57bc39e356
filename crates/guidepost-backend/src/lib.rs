#![forbid(unsafe_code)]
#![doc = "Render surface trait for Guidepost: the host boundary for element measurement, styling, scrolling, and paint scheduling."]
#![doc = ""]
#![doc = "This crate defines the boundary between the tour runtime and a host that"]
#![doc = "can draw (a DOM, a GPU canvas, a terminal grid, or the headless surface in"]
#![doc = "`guidepost-harness`). The runtime never touches host elements except through"]
#![doc = "[`RenderSurface`]."]

use core::fmt;

pub use guidepost_core::config::ScrollBehavior;
use guidepost_core::geometry::{Measurement, Size};
use guidepost_core::node::NodeHandle;
use guidepost_core::step::StepContent;

/// The overlay primitives a tour asks the surface to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Dimmed layer with a cutout around the target.
    Backdrop,
    /// Container for the message and its arrow.
    MessageBox,
    /// Pointer from the message box to the target.
    Arrow,
    /// Slot that receives [`StepContent`].
    Content,
}

impl NodeKind {
    /// Stable class-like name for hosts and log fields.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Backdrop => "backdrop",
            Self::MessageBox => "msgbox",
            Self::Arrow => "arrow",
            Self::Content => "content",
        }
    }
}

/// Positional and size properties applied to a node.
///
/// `None` leaves the property untouched.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NodeStyle {
    pub left: Option<f64>,
    pub top: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl NodeStyle {
    /// An empty style.
    pub const fn new() -> Self {
        Self {
            left: None,
            top: None,
            width: None,
            height: None,
        }
    }

    /// Set `left`.
    #[must_use]
    pub const fn left(mut self, value: f64) -> Self {
        self.left = Some(value);
        self
    }

    /// Set `top`.
    #[must_use]
    pub const fn top(mut self, value: f64) -> Self {
        self.top = Some(value);
        self
    }

    /// Set `width`.
    #[must_use]
    pub const fn width(mut self, value: f64) -> Self {
        self.width = Some(value);
        self
    }

    /// Set `height`.
    #[must_use]
    pub const fn height(mut self, value: f64) -> Self {
        self.height = Some(value);
        self
    }

    /// Overlay `other` on top of `self`: properties set in `other` win.
    #[must_use]
    pub fn merge(self, other: NodeStyle) -> Self {
        Self {
            left: other.left.or(self.left),
            top: other.top.or(self.top),
            width: other.width.or(self.width),
            height: other.height.or(self.height),
        }
    }
}

/// Handle for a deferred layout continuation.
///
/// A tour hands a ticket to [`RenderSurface::on_next_paint`]; the host must
/// return it to the tour exactly once after its next layout/paint. The
/// generation lets the tour recognise continuations that are no longer
/// current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaintTicket {
    generation: u64,
    step: usize,
}

impl PaintTicket {
    /// Create a ticket.
    pub const fn new(generation: u64, step: usize) -> Self {
        Self { generation, step }
    }

    /// Generation this continuation belongs to.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Step index that was rendering when the ticket was issued.
    pub const fn step(&self) -> usize {
        self.step
    }
}

impl fmt::Display for PaintTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "paint(gen={}, step={})", self.generation, self.step)
    }
}

/// Host boundary for a tour.
///
/// All methods are called from the single thread that drives the tour.
pub trait RenderSurface {
    /// Platform-specific error type.
    type Error: fmt::Debug + fmt::Display;

    /// Default mount point (the document body on web hosts).
    fn root(&self) -> NodeHandle;

    /// Create a detached node.
    fn create_node(&mut self, kind: NodeKind) -> Result<NodeHandle, Self::Error>;

    /// Measure a node.
    ///
    /// Returns the bounding rectangle relative to the viewport together with
    /// the current scroll offsets, or `None` if the node is not on the surface.
    fn measure(&self, node: NodeHandle) -> Option<Measurement>;

    /// Visible client area.
    fn viewport(&self) -> Size;

    /// Apply positional/size properties.
    fn set_style(&mut self, node: NodeHandle, style: &NodeStyle) -> Result<(), Self::Error>;

    /// Replace the rendered content of a node.
    fn set_content(&mut self, node: NodeHandle, content: &StepContent) -> Result<(), Self::Error>;

    /// Attach `node` as a child of `parent`.
    fn attach(&mut self, node: NodeHandle, parent: NodeHandle) -> Result<(), Self::Error>;

    /// Detach `node` from `parent`.
    fn detach(&mut self, node: NodeHandle, parent: NodeHandle) -> Result<(), Self::Error>;

    /// Scroll the document. Fire-and-forget; `behavior` is a hint.
    fn scroll_to(&mut self, x: f64, y: f64, behavior: ScrollBehavior);

    /// Schedule `ticket` to be handed back after the next layout/paint.
    fn on_next_paint(&mut self, ticket: PaintTicket);
}
