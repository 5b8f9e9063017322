//! Display toggles applied to every derived representation.

use edgeview_core::Color;

use crate::config::DisplayConfig;

/// Current toggle values of a viewing session.
///
/// Plain data; the dispatcher is the only writer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    /// Surface opacity in `[0, 1]`
    pub opacity: f32,
    /// Lit (shadow proxy) versus unlit (background proxy) fill
    pub lit: bool,
    /// Screen-space line width in pixels
    pub thickness: f32,
    /// Draw thick screen-space lines instead of thin hardware lines
    pub use_thick_lines: bool,
    pub line_color: Color,
}

impl Default for RenderState {
    fn default() -> Self {
        Self::from(&DisplayConfig::default())
    }
}

impl From<&DisplayConfig> for RenderState {
    fn from(display: &DisplayConfig) -> Self {
        Self {
            opacity: display.opacity,
            lit: display.lit,
            thickness: display.thickness,
            use_thick_lines: display.use_thick_lines,
            line_color: display.line_color,
        }
    }
}

impl RenderState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_opaque(&self) -> bool {
        self.opacity == 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = RenderState::default();
        assert_eq!(state.opacity, 0.85);
        assert!(!state.lit);
        assert_eq!(state.thickness, 1.5);
        assert!(state.use_thick_lines);
        assert_eq!(state.line_color, Color::from_hex(0xbbddff));
        assert!(!state.is_opaque());
    }

    #[test]
    fn test_from_display_config() {
        let display = DisplayConfig {
            opacity: 1.0,
            lit: true,
            thickness: 4.0,
            ..Default::default()
        };
        let state = RenderState::from(&display);
        assert!(state.is_opaque());
        assert!(state.lit);
        assert_eq!(state.thickness, 4.0);
    }
}
