//! Layout configuration.
//!
//! Options are plain data with sensible defaults; override only what you need:
//!
//! ```ignore
//! use std::time::Duration;
//! use spark_layouts::LayoutConfig;
//!
//! let config = LayoutConfig {
//!     manual_repeat_delay: Duration::from_millis(100),
//!     ..Default::default()
//! };
//! ```

use std::time::Duration;

/// Default weight for children whose `flex` attribute is `true`.
pub const DEFAULT_FLEX: u32 = 10;

/// Delay before the manual flex pass runs a second time.
pub const MANUAL_REPEAT_DELAY: Duration = Duration::from_millis(50);

/// Glyph box used to measure text content (width, height in px).
pub const GLYPH_SIZE: (f32, f32) = (8.0, 16.0);

/// Tunables shared by every layout created from one runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Weight given to `flex: true` children.
    pub default_flex: u32,
    /// How long the manual flex engine waits before re-measuring.
    pub manual_repeat_delay: Duration,
    /// Size of one character of text content, used by the render pass.
    pub glyph_size: (f32, f32),
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            default_flex: DEFAULT_FLEX,
            manual_repeat_delay: MANUAL_REPEAT_DELAY,
            glyph_size: GLYPH_SIZE,
        }
    }
}

impl LayoutConfig {
    pub fn with_default_flex(mut self, weight: u32) -> Self {
        self.default_flex = weight;
        self
    }

    pub fn with_manual_repeat_delay(mut self, delay: Duration) -> Self {
        self.manual_repeat_delay = delay;
        self
    }

    pub fn with_glyph_size(mut self, width: f32, height: f32) -> Self {
        self.glyph_size = (width, height);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LayoutConfig::default();
        assert_eq!(config.default_flex, 10);
        assert_eq!(config.manual_repeat_delay, Duration::from_millis(50));
    }

    #[test]
    fn test_builders() {
        let config = LayoutConfig::default()
            .with_default_flex(3)
            .with_manual_repeat_delay(Duration::from_millis(5));
        assert_eq!(config.default_flex, 3);
        assert_eq!(config.manual_repeat_delay, Duration::from_millis(5));
    }
}
