#![forbid(unsafe_code)]

//! Tour configuration.
//!
//! [`TourConfig`] holds the layout constants used by the position engine and
//! the overlay. It is set once when a tour is built and never changes
//! afterwards.
//!
//! # Loading
//!
//! With the `config` feature, partial TOML or JSON documents are merged over
//! the built-in defaults:
//!
//! ```toml
//! # guidepost.toml
//! radius = 12
//! arrow_height = 40
//! scroll_behavior = "instant"
//! ```
//!
//! ```rust,ignore
//! let config = TourConfig::from_toml_file("guidepost.toml")?;
//! let config = TourConfig::from_json_str(r#"{ "radius": 4 }"#)?;
//! ```

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::node::NodeHandle;

/// Default padding between the target and the backdrop cutout.
pub const DEFAULT_RADIUS: f64 = 10.0;
/// Default arrow width.
pub const DEFAULT_ARROW_WIDTH: f64 = 10.0;
/// Default arrow height (also the gap between backdrop and message box).
pub const DEFAULT_ARROW_HEIGHT: f64 = 50.0;
/// Default scroll offset used when the message renders above the target.
pub const DEFAULT_SCROLL_TOP_OFFSET: f64 = 100.0;
/// Default scroll offset kept between the viewport edge and the highlight.
pub const DEFAULT_SCROLL_BOTTOM_OFFSET: f64 = 100.0;

/// Scroll animation hint passed through to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "lowercase"))]
pub enum ScrollBehavior {
    /// Animated scroll.
    #[default]
    Smooth,
    /// Jump immediately.
    Instant,
}

/// Tour configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct TourConfig {
    /// Padding around the target inside the backdrop cutout.
    pub radius: f64,
    /// Arrow width.
    pub arrow_width: f64,
    /// Arrow height.
    pub arrow_height: f64,
    /// Offset from the top of the viewport for top-placed messages.
    ///
    /// Validated and carried for hosts; the scroll formulas use
    /// [`scroll_bottom_offset`](Self::scroll_bottom_offset) for both
    /// placements.
    pub scroll_top_offset: f64,
    /// Offset kept between the viewport edge and the highlight when scrolling.
    pub scroll_bottom_offset: f64,
    /// Parent the overlay attaches to. `None` means the surface root.
    #[cfg_attr(feature = "config", serde(skip))]
    pub mount_point: Option<NodeHandle>,
    /// Scroll animation hint.
    pub scroll_behavior: ScrollBehavior,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RADIUS,
            arrow_width: DEFAULT_ARROW_WIDTH,
            arrow_height: DEFAULT_ARROW_HEIGHT,
            scroll_top_offset: DEFAULT_SCROLL_TOP_OFFSET,
            scroll_bottom_offset: DEFAULT_SCROLL_BOTTOM_OFFSET,
            mount_point: None,
            scroll_behavior: ScrollBehavior::default(),
        }
    }
}

impl TourConfig {
    /// Set the backdrop radius.
    #[must_use]
    pub fn radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Set the arrow width.
    #[must_use]
    pub fn arrow_width(mut self, width: f64) -> Self {
        self.arrow_width = width;
        self
    }

    /// Set the arrow height.
    #[must_use]
    pub fn arrow_height(mut self, height: f64) -> Self {
        self.arrow_height = height;
        self
    }

    /// Set the top scroll offset.
    #[must_use]
    pub fn scroll_top_offset(mut self, offset: f64) -> Self {
        self.scroll_top_offset = offset;
        self
    }

    /// Set the bottom scroll offset.
    #[must_use]
    pub fn scroll_bottom_offset(mut self, offset: f64) -> Self {
        self.scroll_bottom_offset = offset;
        self
    }

    /// Attach the overlay under `parent` instead of the surface root.
    #[must_use]
    pub fn mount_point(mut self, parent: NodeHandle) -> Self {
        self.mount_point = Some(parent);
        self
    }

    /// Set the scroll behavior hint.
    #[must_use]
    pub fn scroll_behavior(mut self, behavior: ScrollBehavior) -> Self {
        self.scroll_behavior = behavior;
        self
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let non_negative = [
            ("radius", self.radius),
            ("arrow_width", self.arrow_width),
            ("arrow_height", self.arrow_height),
            ("scroll_top_offset", self.scroll_top_offset),
            ("scroll_bottom_offset", self.scroll_bottom_offset),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() {
                errors.push(format!("{name} must be finite, got {value}"));
            } else if value < 0.0 {
                errors.push(format!("{name} must be >= 0, got {value}"));
            }
        }

        errors
    }
}

/// Errors from loading a [`TourConfig`].
#[cfg(feature = "config")]
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    Toml(toml::de::Error),
    /// JSON parse error.
    Json(serde_json::Error),
}

#[cfg(feature = "config")]
impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
        }
    }
}

#[cfg(feature = "config")]
impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Toml(e) => Some(e),
            Self::Json(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = TourConfig::default();
        assert_eq!(config.radius, 10.0);
        assert_eq!(config.arrow_width, 10.0);
        assert_eq!(config.arrow_height, 50.0);
        assert_eq!(config.scroll_top_offset, 100.0);
        assert_eq!(config.scroll_bottom_offset, 100.0);
        assert_eq!(config.mount_point, None);
        assert_eq!(config.scroll_behavior, ScrollBehavior::Smooth);
    }

    #[test]
    fn builder_overrides() {
        let config = TourConfig::default()
            .radius(4.0)
            .arrow_width(8.0)
            .arrow_height(20.0)
            .scroll_top_offset(30.0)
            .scroll_bottom_offset(60.0)
            .mount_point(NodeHandle::from_raw(3))
            .scroll_behavior(ScrollBehavior::Instant);

        assert_eq!(config.radius, 4.0);
        assert_eq!(config.arrow_width, 8.0);
        assert_eq!(config.arrow_height, 20.0);
        assert_eq!(config.scroll_top_offset, 30.0);
        assert_eq!(config.scroll_bottom_offset, 60.0);
        assert_eq!(config.mount_point, Some(NodeHandle::from_raw(3)));
        assert_eq!(config.scroll_behavior, ScrollBehavior::Instant);
    }

    #[test]
    fn default_validates_clean() {
        let errors = TourConfig::default().validate();
        assert!(errors.is_empty(), "default should validate: {errors:?}");
    }

    #[test]
    fn zero_values_are_valid() {
        let config = TourConfig::default()
            .radius(0.0)
            .arrow_height(0.0)
            .scroll_bottom_offset(0.0);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn validate_catches_negative_radius() {
        let errors = TourConfig::default().radius(-1.0).validate();
        assert!(errors.iter().any(|e| e.contains("radius")));
    }

    #[test]
    fn validate_catches_non_finite() {
        let errors = TourConfig::default()
            .arrow_width(f64::NAN)
            .scroll_top_offset(f64::INFINITY)
            .validate();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.contains("arrow_width")));
        assert!(errors.iter().any(|e| e.contains("scroll_top_offset")));
    }

    #[cfg(feature = "config")]
    #[test]
    fn partial_json_merges_over_defaults() {
        let config = TourConfig::from_json_str(r#"{ "radius": 4, "scroll_behavior": "instant" }"#)
            .expect("valid json");
        assert_eq!(config.radius, 4.0);
        assert_eq!(config.scroll_behavior, ScrollBehavior::Instant);
        assert_eq!(config.arrow_height, DEFAULT_ARROW_HEIGHT);
        assert_eq!(config.scroll_bottom_offset, DEFAULT_SCROLL_BOTTOM_OFFSET);
        assert_eq!(config.mount_point, None);
    }

    #[cfg(feature = "config")]
    #[test]
    fn partial_toml_merges_over_defaults() {
        let config = TourConfig::from_toml_str("arrow_height = 40.0\nscroll_bottom_offset = 20.0\n")
            .expect("valid toml");
        assert_eq!(config.arrow_height, 40.0);
        assert_eq!(config.scroll_bottom_offset, 20.0);
        assert_eq!(config.radius, DEFAULT_RADIUS);
    }

    #[cfg(feature = "config")]
    #[test]
    fn malformed_json_is_reported() {
        let err = TourConfig::from_json_str("{ radius: ").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
        assert!(err.to_string().starts_with("JSON parse error"));
    }

    #[cfg(feature = "config")]
    #[test]
    fn config_file_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("guidepost.json");
        std::fs::write(&path, r#"{ "arrow_width": 14 }"#).expect("write config");
        let config = TourConfig::from_json_file(&path).expect("load config");
        assert_eq!(config.arrow_width, 14.0);

        let missing = TourConfig::from_toml_file(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io(_)));
    }
}
