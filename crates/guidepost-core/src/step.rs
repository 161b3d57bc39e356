#![forbid(unsafe_code)]

//! Tour steps: what to highlight, what to say, and where to say it.

use std::fmt;

use crate::node::NodeHandle;

/// Where the message box renders relative to the highlighted target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Placement {
    /// Above the target; the arrow sits at the box bottom pointing down.
    Top,
    /// Below the target; the arrow sits above the box pointing up.
    #[default]
    Bottom,
}

impl Placement {
    /// Stable lowercase name for log fields.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message markup shown inside the message box.
///
/// The string is opaque to the tour; the surface decides how to render it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StepContent(String);

impl StepContent {
    /// Create content from markup.
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    /// The raw markup.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when there is nothing to render.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for StepContent {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for StepContent {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A single tour step.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    target: NodeHandle,
    content: StepContent,
    placement: Placement,
}

impl Step {
    /// Create a step with the default [`Placement::Bottom`].
    pub fn new(target: NodeHandle, content: impl Into<StepContent>) -> Self {
        Self {
            target,
            content: content.into(),
            placement: Placement::default(),
        }
    }

    /// Set the placement.
    #[must_use]
    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// The element to highlight.
    pub fn target(&self) -> NodeHandle {
        self.target
    }

    /// The message content.
    pub fn content(&self) -> &StepContent {
        &self.content
    }

    /// Where the message renders.
    pub fn placement_mode(&self) -> Placement {
        self.placement
    }
}
