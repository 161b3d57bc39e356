#![forbid(unsafe_code)]

//! Overlay lifecycle: the single backdrop/message/arrow set shared by every step.
//!
//! # Invariants
//!
//! 1. The overlay is the only owner of its primitives; other components see
//!    them through [`OverlayHandles`], never mutate them.
//! 2. `mount`/`unmount` are idempotent.
//! 3. Geometry may be applied in any mount state.
//! 4. After [`OverlayLifecycle::set_content`] the message geometry is stale
//!    until the next pass 2 applies a fresh [`MessageGeometry`].
//!
//! [`MessageGeometry`]: guidepost_core::position::MessageGeometry

use guidepost_backend::{NodeKind, NodeStyle, RenderSurface};
use guidepost_core::error::{Result, TourError};
use guidepost_core::node::NodeHandle;
use guidepost_core::position::OverlayGeometry;
use guidepost_core::step::StepContent;

const TARGET: &str = "guidepost.overlay";

/// Read-only view of the overlay's primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayHandles {
    pub backdrop: NodeHandle,
    pub message_box: NodeHandle,
    pub arrow: NodeHandle,
    pub content: NodeHandle,
}

/// Owner of the overlay primitives and their attach state.
#[derive(Debug)]
pub struct OverlayLifecycle {
    handles: OverlayHandles,
    mount_point: NodeHandle,
    mounted: bool,
    needs_measure: bool,
    geometry: Option<OverlayGeometry>,
}

fn surface_error(op: &'static str, err: impl std::fmt::Display) -> TourError {
    let err = TourError::surface(err);
    tracing::error!(target: TARGET, op, error = %err, "surface operation failed");
    err
}

impl OverlayLifecycle {
    /// Create the primitives on `surface`.
    ///
    /// The arrow and content slot are attached under the message box once,
    /// here; `mount` only moves the backdrop and message box.
    pub fn new<S: RenderSurface>(surface: &mut S, mount_point: Option<NodeHandle>) -> Result<Self> {
        let mut create = |kind: NodeKind| {
            surface
                .create_node(kind)
                .map_err(|e| surface_error("create_node", e))
        };
        let backdrop = create(NodeKind::Backdrop)?;
        let message_box = create(NodeKind::MessageBox)?;
        let arrow = create(NodeKind::Arrow)?;
        let content = create(NodeKind::Content)?;

        surface
            .attach(arrow, message_box)
            .map_err(|e| surface_error("attach", e))?;
        surface
            .attach(content, message_box)
            .map_err(|e| surface_error("attach", e))?;

        let mount_point = mount_point.unwrap_or_else(|| surface.root());
        tracing::debug!(
            target: TARGET,
            backdrop = %backdrop,
            message_box = %message_box,
            mount_point = %mount_point,
            "overlay created"
        );

        Ok(Self {
            handles: OverlayHandles {
                backdrop,
                message_box,
                arrow,
                content,
            },
            mount_point,
            mounted: false,
            needs_measure: false,
            geometry: None,
        })
    }

    /// Attach the backdrop and message box to the mount point.
    ///
    /// Returns `true` if the overlay was attached by this call.
    pub fn mount<S: RenderSurface>(&mut self, surface: &mut S) -> Result<bool> {
        if self.mounted {
            return Ok(false);
        }
        surface
            .attach(self.handles.backdrop, self.mount_point)
            .map_err(|e| surface_error("attach", e))?;
        surface
            .attach(self.handles.message_box, self.mount_point)
            .map_err(|e| surface_error("attach", e))?;
        self.mounted = true;
        tracing::debug!(target: TARGET, mount_point = %self.mount_point, "overlay mounted");
        Ok(true)
    }

    /// Detach the backdrop and message box.
    ///
    /// Returns `true` if the overlay was detached by this call.
    pub fn unmount<S: RenderSurface>(&mut self, surface: &mut S) -> Result<bool> {
        if !self.mounted {
            return Ok(false);
        }
        surface
            .detach(self.handles.backdrop, self.mount_point)
            .map_err(|e| surface_error("detach", e))?;
        surface
            .detach(self.handles.message_box, self.mount_point)
            .map_err(|e| surface_error("detach", e))?;
        self.mounted = false;
        tracing::debug!(target: TARGET, "overlay unmounted");
        Ok(true)
    }

    /// Write computed positions and sizes onto the primitives.
    pub fn apply_geometry<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        geometry: &OverlayGeometry,
    ) -> Result<()> {
        let backdrop = geometry.backdrop;
        let style = NodeStyle::new()
            .left(backdrop.x)
            .top(backdrop.y)
            .width(backdrop.width)
            .height(backdrop.height);
        surface
            .set_style(self.handles.backdrop, &style)
            .map_err(|e| surface_error("set_style", e))?;

        if let Some(message) = geometry.message {
            surface
                .set_style(self.handles.message_box, &NodeStyle::new().top(message.message_y))
                .map_err(|e| surface_error("set_style", e))?;
            let arrow = NodeStyle::new()
                .left(message.arrow_origin.x)
                .top(message.arrow_origin.y)
                .width(message.arrow_size.width)
                .height(message.arrow_size.height);
            surface
                .set_style(self.handles.arrow, &arrow)
                .map_err(|e| surface_error("set_style", e))?;
            self.needs_measure = false;
        }

        self.geometry = Some(*geometry);
        Ok(())
    }

    /// Replace the message content. Message geometry is stale afterwards.
    pub fn set_content<S: RenderSurface>(
        &mut self,
        surface: &mut S,
        content: &StepContent,
    ) -> Result<()> {
        surface
            .set_content(self.handles.content, content)
            .map_err(|e| surface_error("set_content", e))?;
        self.needs_measure = true;
        Ok(())
    }

    /// Rendered height of the message box, if the surface can measure it.
    pub fn message_box_height<S: RenderSurface>(&self, surface: &S) -> Option<f64> {
        surface
            .measure(self.handles.message_box)
            .map(|m| m.rect.height)
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// True between a content change and the pass 2 that follows it.
    pub fn needs_measure(&self) -> bool {
        self.needs_measure
    }

    pub fn handles(&self) -> OverlayHandles {
        self.handles
    }

    pub fn mount_point(&self) -> NodeHandle {
        self.mount_point
    }

    /// Last geometry written to the primitives.
    pub fn geometry(&self) -> Option<&OverlayGeometry> {
        self.geometry.as_ref()
    }
}
