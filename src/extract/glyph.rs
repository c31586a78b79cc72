//! Glyph stream normalization.
//!
//! The structured-text provider walks a page and reports one event per
//! character in visitation order, which is not reading order. This module
//! turns those events into typed [`TextItem`]s, validating every field at
//! the boundary: the provider's quads, colors, and font names are treated as
//! untrusted and degrade to fallbacks instead of failing the page.

use crate::config::DEFAULT_LINE_HEIGHT;
use crate::fonts::{self, FontWeight};
use crate::geometry::{Point, Rect};

/// Fill used when the provider reports no color or a malformed one.
pub const FALLBACK_FILL: &str = "#333333";

/// Character bounding quad as reported by the provider.
///
/// Only the upper-left and lower-right corners matter for an axis-aligned
/// glyph box.
#[derive(Debug, Clone, Copy)]
pub struct Quad {
    /// Upper-left corner
    pub upper_left: Point,
    /// Lower-right corner
    pub lower_right: Point,
}

/// One character event from the structured-text provider.
#[derive(Debug, Clone)]
pub struct GlyphEvent {
    /// The character (a ligature may report more than one scalar)
    pub text: String,
    /// Baseline origin point
    pub origin: Point,
    /// Raw font descriptor name, possibly subset-tagged
    pub font_name: String,
    /// Font size in page units
    pub font_size: f32,
    /// Bounding quad, when the provider has one
    pub quad: Option<Quad>,
    /// RGB fill, either 0–1 or 0–255 per channel
    pub color: Option<[f32; 3]>,
}

/// One normalized glyph or merged word fragment.
#[derive(Debug, Clone)]
pub struct TextItem {
    /// Text content
    pub text: String,
    /// Left edge, page units
    pub x: f32,
    /// Top edge, page units
    pub y: f32,
    /// Width, page units
    pub width: f32,
    /// Height, page units
    pub height: f32,
    /// Font size in page units
    pub font_size: f32,
    /// Canonical font family
    pub font_family: String,
    /// Two-valued weight
    pub font_weight: FontWeight,
    /// Fill color as `#rrggbb`
    pub fill: String,
    /// Line-height ratio
    pub line_height: f32,
}

impl TextItem {
    /// Bounding box of this item.
    pub fn bbox(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Right edge, page units.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Convert an RGB triple to a `#rrggbb` string.
///
/// Accepts channels in 0–1 or 0–255 range; channels are clamped to
/// [0, 255]. `None` or non-finite components fall back to [`FALLBACK_FILL`].
pub fn hex_from_rgb(color: Option<[f32; 3]>) -> String {
    let Some([r, g, b]) = color else {
        return FALLBACK_FILL.to_string();
    };
    if !(r.is_finite() && g.is_finite() && b.is_finite()) {
        log::warn!("non-finite color component ({r}, {g}, {b}), using fallback fill");
        return FALLBACK_FILL.to_string();
    }

    let scale = if r <= 1.0 && g <= 1.0 && b <= 1.0 { 255.0 } else { 1.0 };
    let channel = |v: f32| -> u8 { (v * scale).round().clamp(0.0, 255.0) as u8 };
    format!("#{:02x}{:02x}{:02x}", channel(r), channel(g), channel(b))
}

/// Derive the glyph bounding box from the quad, or from the origin and font
/// size when the quad is missing or degenerate.
fn glyph_bbox(event: &GlyphEvent) -> Rect {
    if let Some(quad) = event.quad {
        let rect = Rect::from_corners(
            quad.upper_left.x,
            quad.upper_left.y,
            quad.lower_right.x,
            quad.lower_right.y,
        );
        if !rect.is_degenerate() {
            return rect;
        }
        log::warn!("degenerate quad for {:?}, falling back to origin box", event.text);
    }
    Rect::new(event.origin.x, event.origin.y, event.font_size, event.font_size)
}

/// Normalize a page's glyph events into text items.
///
/// Pure-whitespace characters are dropped; the rest keep one item per
/// character with resolved family, weight, and fill.
pub fn normalize_glyphs(events: &[GlyphEvent]) -> Vec<TextItem> {
    events
        .iter()
        .filter(|event| !event.text.trim().is_empty())
        .map(|event| {
            let bbox = glyph_bbox(event);
            TextItem {
                text: event.text.clone(),
                x: bbox.x,
                y: bbox.y,
                width: bbox.width,
                height: bbox.height,
                font_size: event.font_size,
                font_family: fonts::resolve_family(&event.font_name),
                font_weight: fonts::resolve_weight(&event.font_name),
                fill: hex_from_rgb(event.color),
                line_height: DEFAULT_LINE_HEIGHT,
            }
        })
        .collect()
}
