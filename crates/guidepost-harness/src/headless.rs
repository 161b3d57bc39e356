#![forbid(unsafe_code)]

//! In-memory [`RenderSurface`] with deferred layout.
//!
//! Nodes live in a flat map keyed by handle. Targets are added with a fixed
//! document rect; overlay nodes are positioned by their style. Content is
//! only laid out on [`HeadlessSurface::paint`], so the message box reports a
//! height of zero until the first paint after its content changes, like a
//! browser before its next frame.
//!
//! Every mutating call is appended to a journal that can be dumped as JSONL.

use std::collections::HashMap;
use std::fmt;

use guidepost_backend::{NodeKind, NodeStyle, PaintTicket, RenderSurface, ScrollBehavior};
use guidepost_core::geometry::{Measurement, Point, Rect, Size};
use guidepost_core::node::NodeHandle;
use guidepost_core::step::StepContent;

/// Default line height used to lay out content.
pub const DEFAULT_LINE_HEIGHT: f64 = 18.0;

/// Default viewport.
pub const DEFAULT_VIEWPORT: Size = Size::new(1280.0, 800.0);

/// Errors reported by [`HeadlessSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadlessError {
    UnknownNode(NodeHandle),
    NotAChild { node: NodeHandle, parent: NodeHandle },
    /// A failure switched on with one of the `fail_*` toggles.
    InjectedFailure(&'static str),
}

impl fmt::Display for HeadlessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownNode(node) => write!(f, "unknown node {node}"),
            Self::NotAChild { node, parent } => write!(f, "{node} is not a child of {parent}"),
            Self::InjectedFailure(op) => write!(f, "injected failure in {op}"),
        }
    }
}

impl std::error::Error for HeadlessError {}

/// A recorded `scroll_to` call, before clamping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollCall {
    pub x: f64,
    pub y: f64,
    pub behavior: ScrollBehavior,
}

/// One journal entry.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    Create { node: NodeHandle, kind: NodeKind },
    Style { node: NodeHandle, style: NodeStyle },
    Content { node: NodeHandle, lines: usize },
    Attach { node: NodeHandle, parent: NodeHandle },
    Detach { node: NodeHandle, parent: NodeHandle },
    Scroll(ScrollCall),
    Schedule(PaintTicket),
    Paint { frame: u64, tickets: usize },
}

impl SurfaceOp {
    /// Journal entry as a single-line JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::json;
        match self {
            Self::Create { node, kind } => {
                json!({ "op": "create", "node": node.raw(), "kind": kind.as_str() })
            }
            Self::Style { node, style } => json!({
                "op": "style",
                "node": node.raw(),
                "left": style.left,
                "top": style.top,
                "width": style.width,
                "height": style.height,
            }),
            Self::Content { node, lines } => {
                json!({ "op": "content", "node": node.raw(), "lines": lines })
            }
            Self::Attach { node, parent } => {
                json!({ "op": "attach", "node": node.raw(), "parent": parent.raw() })
            }
            Self::Detach { node, parent } => {
                json!({ "op": "detach", "node": node.raw(), "parent": parent.raw() })
            }
            Self::Scroll(call) => json!({
                "op": "scroll",
                "x": call.x,
                "y": call.y,
                "behavior": match call.behavior {
                    ScrollBehavior::Smooth => "smooth",
                    ScrollBehavior::Instant => "instant",
                },
            }),
            Self::Schedule(ticket) => json!({
                "op": "schedule",
                "generation": ticket.generation(),
                "step": ticket.step(),
            }),
            Self::Paint { frame, tickets } => {
                json!({ "op": "paint", "frame": frame, "tickets": tickets })
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Node {
    kind: Option<NodeKind>,
    parent: Option<NodeHandle>,
    children: Vec<NodeHandle>,
    style: NodeStyle,
    content: Option<StepContent>,
    /// Document rect for targets added with `add_target`.
    fixed_rect: Option<Rect>,
    /// Height computed by the last paint.
    laid_out_height: f64,
}

/// Deterministic in-memory surface for tests and demos.
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    nodes: HashMap<NodeHandle, Node>,
    root: NodeHandle,
    next_id: u64,
    viewport: Size,
    line_height: f64,
    scroll: Point,
    scroll_log: Vec<ScrollCall>,
    pending_paints: Vec<PaintTicket>,
    paint_count: u64,
    fail_set_style: bool,
    fail_attach: bool,
    fail_detach: bool,
    journal: Vec<SurfaceOp>,
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessSurface {
    /// Empty surface with a root node, scrolled to the top.
    pub fn new() -> Self {
        let root = NodeHandle::from_raw(0);
        let mut nodes = HashMap::new();
        nodes.insert(root, Node::default());
        Self {
            nodes,
            root,
            next_id: 1,
            viewport: DEFAULT_VIEWPORT,
            line_height: DEFAULT_LINE_HEIGHT,
            scroll: Point::ZERO,
            scroll_log: Vec::new(),
            pending_paints: Vec::new(),
            paint_count: 0,
            fail_set_style: false,
            fail_attach: false,
            fail_detach: false,
            journal: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_viewport(mut self, viewport: Size) -> Self {
        self.viewport = viewport;
        self
    }

    #[must_use]
    pub fn with_line_height(mut self, line_height: f64) -> Self {
        self.line_height = line_height;
        self
    }

    fn allocate(&mut self, node: Node) -> NodeHandle {
        let handle = NodeHandle::from_raw(self.next_id);
        self.next_id += 1;
        self.nodes.insert(handle, node);
        handle
    }

    /// Add a host element under the root at a document-absolute rect.
    pub fn add_target(&mut self, rect: Rect) -> NodeHandle {
        let handle = self.allocate(Node {
            parent: Some(self.root),
            fixed_rect: Some(rect),
            ..Node::default()
        });
        if let Some(root) = self.nodes.get_mut(&self.root) {
            root.children.push(handle);
        }
        handle
    }

    /// Move a target. Returns `false` for unknown or non-target nodes.
    pub fn move_target(&mut self, node: NodeHandle, rect: Rect) -> bool {
        match self.nodes.get_mut(&node) {
            Some(Node {
                fixed_rect: Some(current),
                ..
            }) => {
                *current = rect;
                true
            }
            _ => false,
        }
    }

    /// Remove a node from the surface entirely.
    pub fn remove_node(&mut self, node: NodeHandle) -> bool {
        let Some(removed) = self.nodes.remove(&node) else {
            return false;
        };
        if let Some(parent) = removed.parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|c| *c != node);
        }
        true
    }

    /// Lay out content, then hand back every ticket scheduled since the
    /// previous paint, in scheduling order.
    pub fn paint(&mut self) -> Vec<PaintTicket> {
        let line_height = self.line_height;
        for node in self.nodes.values_mut() {
            let height = match (node.kind, &node.content) {
                (Some(NodeKind::Content), Some(content)) => {
                    content.as_str().lines().count() as f64 * line_height
                }
                _ => 0.0,
            };
            node.laid_out_height = height;
        }
        self.paint_count += 1;
        let tickets = std::mem::take(&mut self.pending_paints);
        self.journal.push(SurfaceOp::Paint {
            frame: self.paint_count,
            tickets: tickets.len(),
        });
        tickets
    }

    /// Make every subsequent `set_style` fail.
    pub fn fail_set_style(&mut self, fail: bool) {
        self.fail_set_style = fail;
    }

    /// Make every subsequent `attach` fail.
    pub fn fail_attach(&mut self, fail: bool) {
        self.fail_attach = fail;
    }

    /// Make every subsequent `detach` fail.
    pub fn fail_detach(&mut self, fail: bool) {
        self.fail_detach = fail;
    }

    pub fn kind(&self, node: NodeHandle) -> Option<NodeKind> {
        self.nodes.get(&node).and_then(|n| n.kind)
    }

    pub fn parent(&self, node: NodeHandle) -> Option<NodeHandle> {
        self.nodes.get(&node).and_then(|n| n.parent)
    }

    pub fn children(&self, parent: NodeHandle) -> Vec<NodeHandle> {
        self.nodes
            .get(&parent)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// True if `node` is connected to the root.
    pub fn is_attached(&self, node: NodeHandle) -> bool {
        let mut current = node;
        for _ in 0..self.nodes.len() {
            if current == self.root {
                return true;
            }
            match self.parent(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
        false
    }

    pub fn style(&self, node: NodeHandle) -> Option<NodeStyle> {
        self.nodes.get(&node).map(|n| n.style)
    }

    pub fn content(&self, node: NodeHandle) -> Option<&StepContent> {
        self.nodes.get(&node).and_then(|n| n.content.as_ref())
    }

    /// Current scroll offset, after clamping.
    pub fn scroll(&self) -> Point {
        self.scroll
    }

    pub fn scroll_log(&self) -> &[ScrollCall] {
        &self.scroll_log
    }

    /// Tickets scheduled but not yet returned by `paint`.
    pub fn pending_paints(&self) -> &[PaintTicket] {
        &self.pending_paints
    }

    pub fn paint_count(&self) -> u64 {
        self.paint_count
    }

    pub fn journal(&self) -> &[SurfaceOp] {
        &self.journal
    }

    /// Journal as JSON lines.
    pub fn journal_jsonl(&self) -> String {
        let mut out = String::new();
        for op in &self.journal {
            out.push_str(&op.to_json().to_string());
            out.push('\n');
        }
        out
    }

    fn node_mut(&mut self, node: NodeHandle) -> Result<&mut Node, HeadlessError> {
        self.nodes
            .get_mut(&node)
            .ok_or(HeadlessError::UnknownNode(node))
    }

    fn document_rect(&self, node: &Node) -> Rect {
        if let Some(rect) = node.fixed_rect {
            return rect;
        }
        let style = node.style;
        let height = match node.kind {
            Some(NodeKind::MessageBox) => node
                .children
                .iter()
                .filter_map(|c| self.nodes.get(c))
                .filter(|c| c.kind == Some(NodeKind::Content))
                .map(|c| c.laid_out_height)
                .sum(),
            Some(NodeKind::Content) => node.laid_out_height,
            _ => style.height.unwrap_or(0.0),
        };
        let width = match node.kind {
            Some(NodeKind::MessageBox) => style.width.unwrap_or(self.viewport.width),
            _ => style.width.unwrap_or(0.0),
        };
        Rect::new(
            style.left.unwrap_or(0.0),
            style.top.unwrap_or(0.0),
            width,
            height,
        )
    }
}

impl RenderSurface for HeadlessSurface {
    type Error = HeadlessError;

    fn root(&self) -> NodeHandle {
        self.root
    }

    fn create_node(&mut self, kind: NodeKind) -> Result<NodeHandle, Self::Error> {
        let node = self.allocate(Node {
            kind: Some(kind),
            ..Node::default()
        });
        self.journal.push(SurfaceOp::Create { node, kind });
        Ok(node)
    }

    fn measure(&self, node: NodeHandle) -> Option<Measurement> {
        let state = self.nodes.get(&node)?;
        let document = self.document_rect(state);
        let viewport_relative = document.translate(Point::new(-self.scroll.x, -self.scroll.y));
        Some(Measurement::new(viewport_relative, self.scroll))
    }

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn set_style(&mut self, node: NodeHandle, style: &NodeStyle) -> Result<(), Self::Error> {
        if self.fail_set_style {
            return Err(HeadlessError::InjectedFailure("set_style"));
        }
        let state = self.node_mut(node)?;
        state.style = state.style.merge(*style);
        self.journal.push(SurfaceOp::Style {
            node,
            style: *style,
        });
        Ok(())
    }

    fn set_content(&mut self, node: NodeHandle, content: &StepContent) -> Result<(), Self::Error> {
        let state = self.node_mut(node)?;
        state.content = Some(content.clone());
        state.laid_out_height = 0.0;
        self.journal.push(SurfaceOp::Content {
            node,
            lines: content.as_str().lines().count(),
        });
        Ok(())
    }

    fn attach(&mut self, node: NodeHandle, parent: NodeHandle) -> Result<(), Self::Error> {
        if self.fail_attach {
            return Err(HeadlessError::InjectedFailure("attach"));
        }
        if !self.nodes.contains_key(&parent) {
            return Err(HeadlessError::UnknownNode(parent));
        }
        let previous = self.node_mut(node)?.parent.replace(parent);
        if let Some(old) = previous.and_then(|p| self.nodes.get_mut(&p)) {
            old.children.retain(|c| *c != node);
        }
        if let Some(new) = self.nodes.get_mut(&parent) {
            new.children.push(node);
        }
        self.journal.push(SurfaceOp::Attach { node, parent });
        Ok(())
    }

    fn detach(&mut self, node: NodeHandle, parent: NodeHandle) -> Result<(), Self::Error> {
        if self.fail_detach {
            return Err(HeadlessError::InjectedFailure("detach"));
        }
        let state = self.node_mut(node)?;
        if state.parent != Some(parent) {
            return Err(HeadlessError::NotAChild { node, parent });
        }
        state.parent = None;
        if let Some(old) = self.nodes.get_mut(&parent) {
            old.children.retain(|c| *c != node);
        }
        self.journal.push(SurfaceOp::Detach { node, parent });
        Ok(())
    }

    fn scroll_to(&mut self, x: f64, y: f64, behavior: ScrollBehavior) {
        let call = ScrollCall { x, y, behavior };
        self.scroll_log.push(call);
        self.journal.push(SurfaceOp::Scroll(call));
        self.scroll = Point::new(x.max(0.0), y.max(0.0));
    }

    fn on_next_paint(&mut self, ticket: PaintTicket) {
        self.pending_paints.push(ticket);
        self.journal.push(SurfaceOp::Schedule(ticket));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_measure_is_viewport_relative() {
        let mut surface = HeadlessSurface::new();
        let target = surface.add_target(Rect::new(10.0, 900.0, 40.0, 20.0));
        surface.scroll_to(0.0, 300.0, ScrollBehavior::Instant);

        let m = surface.measure(target).unwrap();
        assert_eq!(m.rect, Rect::new(10.0, 600.0, 40.0, 20.0));
        assert_eq!(m.scroll, Point::new(0.0, 300.0));
        assert_eq!(m.to_document(), Rect::new(10.0, 900.0, 40.0, 20.0));
    }

    #[test]
    fn scroll_clamps_at_top() {
        let mut surface = HeadlessSurface::new();
        surface.scroll_to(0.0, -150.0, ScrollBehavior::Smooth);
        assert_eq!(surface.scroll(), Point::ZERO);
        assert_eq!(surface.scroll_log()[0].y, -150.0);
    }

    #[test]
    fn removed_target_is_unmeasurable() {
        let mut surface = HeadlessSurface::new();
        let target = surface.add_target(Rect::new(0.0, 0.0, 1.0, 1.0));
        assert!(surface.remove_node(target));
        assert!(surface.measure(target).is_none());
        assert!(surface.children(surface.root()).is_empty());
        assert!(!surface.remove_node(target));
    }

    #[test]
    fn message_box_height_needs_paint() {
        let mut surface = HeadlessSurface::new().with_line_height(10.0);
        let message_box = surface.create_node(NodeKind::MessageBox).unwrap();
        let content = surface.create_node(NodeKind::Content).unwrap();
        let arrow = surface.create_node(NodeKind::Arrow).unwrap();
        surface.attach(arrow, message_box).unwrap();
        surface.attach(content, message_box).unwrap();
        surface
            .set_content(content, &StepContent::from("one\ntwo"))
            .unwrap();

        assert_eq!(surface.measure(message_box).unwrap().rect.height, 0.0);
        surface.paint();
        assert_eq!(surface.measure(message_box).unwrap().rect.height, 20.0);
        assert_eq!(
            surface.measure(message_box).unwrap().rect.width,
            DEFAULT_VIEWPORT.width
        );

        surface
            .set_content(content, &StepContent::from("only"))
            .unwrap();
        assert_eq!(surface.measure(message_box).unwrap().rect.height, 0.0);
        surface.paint();
        assert_eq!(surface.measure(message_box).unwrap().rect.height, 10.0);
    }

    #[test]
    fn attach_moves_between_parents() {
        let mut surface = HeadlessSurface::new();
        let a = surface.create_node(NodeKind::MessageBox).unwrap();
        let b = surface.create_node(NodeKind::Backdrop).unwrap();
        let child = surface.create_node(NodeKind::Arrow).unwrap();

        surface.attach(child, a).unwrap();
        surface.attach(child, b).unwrap();
        assert!(surface.children(a).is_empty());
        assert_eq!(surface.children(b), vec![child]);
        assert!(!surface.is_attached(child));

        surface.attach(b, surface.root()).unwrap();
        assert!(surface.is_attached(child));
    }

    #[test]
    fn detach_requires_parent() {
        let mut surface = HeadlessSurface::new();
        let root = surface.root();
        let node = surface.create_node(NodeKind::Backdrop).unwrap();
        let err = surface.detach(node, root).unwrap_err();
        assert_eq!(err, HeadlessError::NotAChild { node, parent: root });
        assert_eq!(err.to_string(), format!("{node} is not a child of {root}"));
    }

    #[test]
    fn paint_drains_tickets_in_order() {
        let mut surface = HeadlessSurface::new();
        surface.on_next_paint(PaintTicket::new(1, 0));
        surface.on_next_paint(PaintTicket::new(2, 1));
        assert_eq!(surface.pending_paints().len(), 2);

        let tickets = surface.paint();
        assert_eq!(tickets, vec![PaintTicket::new(1, 0), PaintTicket::new(2, 1)]);
        assert!(surface.pending_paints().is_empty());
        assert!(surface.paint().is_empty());
        assert_eq!(surface.paint_count(), 2);
    }

    #[test]
    fn injected_failures() {
        let mut surface = HeadlessSurface::new();
        let node = surface.create_node(NodeKind::Backdrop).unwrap();
        surface.fail_set_style(true);
        surface.fail_attach(true);
        assert_eq!(
            surface.set_style(node, &NodeStyle::new().top(1.0)),
            Err(HeadlessError::InjectedFailure("set_style"))
        );
        let root = surface.root();
        assert!(surface.attach(node, root).is_err());
    }

    #[test]
    fn journal_is_valid_jsonl() {
        let mut surface = HeadlessSurface::new();
        let node = surface.create_node(NodeKind::Backdrop).unwrap();
        surface
            .set_style(node, &NodeStyle::new().left(5.0).top(6.0))
            .unwrap();
        surface.scroll_to(0.0, 42.0, ScrollBehavior::Smooth);
        surface.paint();

        let jsonl = surface.journal_jsonl();
        let lines: Vec<serde_json::Value> = jsonl
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0]["op"], "create");
        assert_eq!(lines[0]["kind"], "backdrop");
        assert_eq!(lines[1]["left"], 5.0);
        assert!(lines[1]["width"].is_null());
        assert_eq!(lines[2]["behavior"], "smooth");
        assert_eq!(lines[3]["frame"], 1);
    }
}
