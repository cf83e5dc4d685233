//! Icon styling. Plain data consumed identically by the raster and
//! vector output backends.

/// Visual parameters for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    /// Output edge length in pixels (icons are square).
    pub size_px: u32,
    /// Outline width per 100px of icon size.
    pub line_width: f64,
    /// Fill color of the silhouette.
    pub face_color: String,
    /// Outline color of the silhouette and the label.
    pub edge_color: String,
    /// Fill color of the label.
    pub text_color: String,
    /// Label height as a fraction of icon size.
    pub text_size: f64,
    /// Extent padding as a fraction of the shape's own span.
    pub padding: f64,
    /// Draw the region name label.
    pub show_text: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            size_px: 256,
            line_width: 0.5,
            face_color: "#0E7A6F".to_string(),
            edge_color: "#0A5A52".to_string(),
            text_color: "#FFFFFF".to_string(),
            text_size: 0.12,
            padding: 0.07,
            show_text: true,
        }
    }
}

impl Style {
    /// Silhouette outline width in pixels.
    #[inline]
    pub fn stroke_width(&self) -> f64 {
        self.line_width * self.size_px as f64 / 100.0
    }

    /// Label outline width in pixels. Fixed ratio so the name stays
    /// legible at any silhouette line width.
    #[inline]
    pub fn label_outline_width(&self) -> f64 {
        self.size_px as f64 * 0.015
    }

    /// Label font size in pixels.
    #[inline]
    pub fn label_font_size(&self) -> f64 {
        self.size_px as f64 * self.text_size
    }
}
