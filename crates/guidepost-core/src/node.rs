#![forbid(unsafe_code)]

//! Opaque handles to host elements.

use std::fmt;

/// Opaque, non-owning reference to an element on a render surface.
///
/// Handles are minted by the surface (targets by the host application,
/// overlay primitives by `RenderSurface::create_node`). Holding a handle does
/// not keep the element alive; a surface may report it as absent later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(u64);

impl NodeHandle {
    /// Wrap a raw surface id.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw surface id.
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::NodeHandle;

    #[test]
    fn raw_round_trip_and_display() {
        let handle = NodeHandle::from_raw(42);
        assert_eq!(handle.raw(), 42);
        assert_eq!(handle.to_string(), "#42");
    }
}
