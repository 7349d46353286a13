//! Configuration for text mutation.

use crate::document::SaveOptions;
use crate::layout::Color;

/// Font used when a captured font cannot be written with.
pub const DEFAULT_FALLBACK_FONT: &str = "helv";

/// Layout constants for the overlay writer.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLayout {
    /// Blanked area is the page inset by this margin on every side.
    pub margin: f32,
    /// X of every written line.
    pub text_left: f32,
    /// Baseline of the first written line.
    pub first_baseline: f32,
    /// Distance between baselines.
    pub line_pitch: f32,
    /// Lines whose baseline would exceed `page_height - bottom_margin` are dropped.
    pub bottom_margin: f32,
    /// Font for written lines.
    pub font_name: String,
    /// Font size for written lines.
    pub font_size: f32,
    /// Text color.
    pub text_color: Color,
    /// Fill of the blanked area.
    pub fill: Color,
}

impl Default for OverlayLayout {
    fn default() -> Self {
        Self {
            margin: 50.0,
            text_left: 60.0,
            first_baseline: 70.0,
            line_pitch: 14.0,
            bottom_margin: 70.0,
            font_name: DEFAULT_FALLBACK_FONT.to_string(),
            font_size: 11.0,
            text_color: Color::black(),
            fill: Color::white(),
        }
    }
}

impl OverlayLayout {
    /// Set the font size and line pitch together.
    pub fn with_font_size(mut self, font_size: f32, line_pitch: f32) -> Self {
        self.font_size = font_size;
        self.line_pitch = line_pitch;
        self
    }

    /// Set the margins.
    pub fn with_margins(mut self, margin: f32, bottom_margin: f32) -> Self {
        self.margin = margin;
        self.bottom_margin = bottom_margin;
        self
    }
}

/// Text mutation configuration.
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Fill painted over redacted regions.
    pub redaction_fill: Color,

    /// Font retried once when inserting with the captured font fails.
    pub fallback_font: String,

    /// Options passed to every save.
    pub save_options: SaveOptions,

    /// Overlay writer layout.
    pub overlay: OverlayLayout,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            redaction_fill: Color::white(),
            fallback_font: DEFAULT_FALLBACK_FONT.to_string(),
            save_options: SaveOptions::full_rewrite(),
            overlay: OverlayLayout::default(),
        }
    }

    /// Set the redaction fill color.
    pub fn with_redaction_fill(mut self, fill: Color) -> Self {
        self.redaction_fill = fill;
        self
    }

    /// Set the fallback font.
    pub fn with_fallback_font(mut self, font_name: impl Into<String>) -> Self {
        self.fallback_font = font_name.into();
        self
    }

    /// Set the save options.
    pub fn with_save_options(mut self, options: SaveOptions) -> Self {
        self.save_options = options;
        self
    }

    /// Set the overlay layout.
    pub fn with_overlay(mut self, overlay: OverlayLayout) -> Self {
        self.overlay = overlay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.redaction_fill, Color::white());
        assert_eq!(config.fallback_font, "helv");
        assert_eq!(config.save_options, SaveOptions::full_rewrite());

        let overlay = config.overlay;
        assert_eq!(overlay.margin, 50.0);
        assert_eq!(overlay.first_baseline, 70.0);
        assert_eq!(overlay.line_pitch, 14.0);
        assert_eq!(overlay.font_size, 11.0);
    }

    #[test]
    fn test_builder() {
        let config = EditorConfig::new()
            .with_redaction_fill(Color::black())
            .with_fallback_font("cour")
            .with_save_options(SaveOptions::plain())
            .with_overlay(
                OverlayLayout::default()
                    .with_font_size(9.0, 11.0)
                    .with_margins(36.0, 40.0),
            );

        assert_eq!(config.redaction_fill, Color::black());
        assert_eq!(config.fallback_font, "cour");
        assert!(!config.save_options.compress);
        assert_eq!(config.overlay.font_size, 9.0);
        assert_eq!(config.overlay.line_pitch, 11.0);
        assert_eq!(config.overlay.margin, 36.0);
        assert_eq!(config.overlay.bottom_margin, 40.0);
    }
}
