//! Save payload and draw plan types.
//!
//! The editing surface hands over one payload per save: per page, the
//! viewport that was active when overlay geometry was last set, the current
//! rotation, and the overlays themselves. Planning turns that into
//! page-space drawing instructions for the external document library's
//! draw-rectangle and draw-text primitives.

pub mod planner;

pub use planner::plan_save;

use crate::config::DEFAULT_LINE_HEIGHT;
use crate::fonts::FontWeight;
use crate::overlay::{BoundsSnapshot, OverlayId, Rotation};
use serde::{Deserialize, Serialize};

/// RGB color with unit-range channels, as the document library expects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel (0.0 - 1.0)
    pub r: f32,
    /// Green channel (0.0 - 1.0)
    pub g: f32,
    /// Blue channel (0.0 - 1.0)
    pub b: f32,
}

impl Color {
    /// Create a new color.
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Opaque white, used for mask rectangles.
    pub fn white() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    /// Parse a `#rrggbb` string.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_retouch::save::Color;
    ///
    /// let red = Color::from_hex("#ff0000").unwrap();
    /// assert_eq!(red, Color::new(1.0, 0.0, 0.0));
    /// assert!(Color::from_hex("red").is_none());
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let byte = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
        Some(Self::new(
            byte(0..2)? as f32 / 255.0,
            byte(2..4)? as f32 / 255.0,
            byte(4..6)? as f32 / 255.0,
        ))
    }
}

fn default_opacity() -> f32 {
    1.0
}

fn default_line_height() -> f32 {
    DEFAULT_LINE_HEIGHT
}

fn default_font_family() -> String {
    "Helvetica".to_string()
}

/// One overlay as the editing surface last left it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayState {
    /// Stable overlay id, when the surface tracks one
    #[serde(default)]
    pub id: Option<OverlayId>,
    /// Replacement text (empty overlays are not drawn)
    pub text: String,
    /// Left edge in viewport pixels
    pub left: f32,
    /// Top edge in viewport pixels
    pub top: f32,
    /// Width in viewport pixels
    pub width: f32,
    /// Height in viewport pixels
    pub height: f32,
    /// Font size in viewport pixels
    pub font_size: f32,
    /// Canonical font family
    #[serde(default = "default_font_family")]
    pub font_family: String,
    /// Two-valued weight
    #[serde(default)]
    pub font_weight: FontWeight,
    /// Line-height ratio
    #[serde(default = "default_line_height")]
    pub line_height: f32,
    /// Fill color as `#rrggbb`
    pub fill: String,
    /// Overlay opacity in the editor (not applied to the saved text)
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    /// Bounds captured when the overlay was first activated
    #[serde(default)]
    pub original_bounds: Option<BoundsSnapshot>,
}

/// One page's worth of save state.
///
/// `width`/`height` are the viewport dimensions the overlay geometry is
/// expressed in; the page's intrinsic dimensions come from the document
/// library at plan time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSave {
    /// One-based page number
    pub page_number: u32,
    /// Viewport width in pixels
    pub width: f32,
    /// Viewport height in pixels
    pub height: f32,
    /// Current page rotation
    #[serde(default)]
    pub rotation: Rotation,
    /// Overlays on this page
    #[serde(default)]
    pub overlays: Vec<OverlayState>,
}

/// The full save request from the editing surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePayload {
    /// Pages carrying at least one overlay
    pub pages: Vec<PageSave>,
}

/// Mask rectangle in final page coordinates (bottom-up Y).
///
/// Drawn filled and opaque with no border, before the text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaskOp {
    /// Left edge
    pub rect_x: f32,
    /// Bottom edge (bottom-up convention)
    pub rect_y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
    /// Fill color (always white)
    pub color: Color,
    /// Opacity (always 1.0)
    pub opacity: f32,
}

/// Text drawing instruction in final page coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextOp {
    /// Left edge
    pub x: f32,
    /// Baseline origin (bottom-up convention)
    pub y: f32,
    /// Font size in page units
    pub size: f32,
    /// Line height in page units
    pub line_height: f32,
    /// Wrap width in page units
    pub max_width: f32,
    /// Resolved base font name
    pub font: String,
    /// Text color
    pub color: Color,
    /// The text to draw
    pub text: String,
}

/// Mask-then-draw pair for one overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayDrawPlan {
    /// Drawn first, covering the original content
    pub mask: MaskOp,
    /// Drawn second, on top of the mask
    pub text: TextOp,
}

/// All drawing instructions for one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagePlan {
    /// One-based page number
    pub page_number: u32,
    /// One entry per surviving overlay
    pub overlays: Vec<OverlayDrawPlan>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex() {
        assert_eq!(Color::from_hex("#ffffff"), Some(Color::white()));
        assert_eq!(Color::from_hex("#000000"), Some(Color::new(0.0, 0.0, 0.0)));
        let gray = Color::from_hex("#333333").unwrap();
        assert!((gray.r - 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_color_from_hex_rejects_malformed() {
        assert!(Color::from_hex("333333").is_none());
        assert!(Color::from_hex("#33333").is_none());
        assert!(Color::from_hex("#33333g").is_none());
        assert!(Color::from_hex("").is_none());
    }

    #[test]
    fn test_payload_deserializes_editing_surface_shape() {
        let json = r##"{
            "pages": [{
                "pageNumber": 1,
                "width": 800.0,
                "height": 1035.0,
                "rotation": 90,
                "overlays": [{
                    "text": "Edited",
                    "left": 40.0,
                    "top": 60.0,
                    "width": 200.0,
                    "height": 30.0,
                    "fontSize": 14.0,
                    "fontFamily": "Arial",
                    "fontWeight": "bold",
                    "lineHeight": 1.3,
                    "fill": "#112233",
                    "originalBounds": {
                        "leftRatio": 0.05,
                        "topRatio": 0.058,
                        "widthRatio": 0.25,
                        "heightRatio": 0.029,
                        "captureRotation": 0
                    }
                }]
            }]
        }"##;

        let payload: SavePayload = serde_json::from_str(json).unwrap();
        let page = &payload.pages[0];
        assert_eq!(page.page_number, 1);
        assert_eq!(page.rotation.steps(), 1);
        let overlay = &page.overlays[0];
        assert!(overlay.font_weight.is_bold());
        assert_eq!(overlay.opacity, 1.0);
        let bounds = overlay.original_bounds.unwrap();
        assert_eq!(bounds.capture_rotation.steps(), 0);
    }

    #[test]
    fn test_payload_defaults() {
        let json = r##"{
            "pages": [{
                "pageNumber": 2,
                "width": 612.0,
                "height": 792.0,
                "overlays": [{
                    "text": "x",
                    "left": 0.0,
                    "top": 0.0,
                    "width": 10.0,
                    "height": 10.0,
                    "fontSize": 12.0,
                    "fill": "#000000"
                }]
            }]
        }"##;
        let payload: SavePayload = serde_json::from_str(json).unwrap();
        let page = &payload.pages[0];
        assert_eq!(page.rotation.steps(), 0);
        let overlay = &page.overlays[0];
        assert_eq!(overlay.font_family, "Helvetica");
        assert!(!overlay.font_weight.is_bold());
        assert_eq!(overlay.line_height, DEFAULT_LINE_HEIGHT);
        assert!(overlay.original_bounds.is_none());
    }
}
