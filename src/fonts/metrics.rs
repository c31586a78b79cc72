//! Width estimation for the three font classes.
//!
//! The editing surface sizes overlays, and the save planner sanity-checks
//! mask boxes, with estimated text widths. Per-character widths are
//! approximations of the standard base fonts in 1/1000 em units; true
//! per-font measurement is out of scope.

use crate::fonts::FontClass;

/// Fixed advance for the monospace class, in 1/1000 em.
const MONO_ADVANCE: f32 = 600.0;

/// Width adjustment applied to bold proportional faces.
const BOLD_FACTOR: f32 = 1.05;

/// Approximate advance width of one character in 1/1000 em units.
fn char_width_units(ch: char, class: FontClass) -> f32 {
    if class == FontClass::Mono {
        return MONO_ADVANCE;
    }

    // Category table shared by the proportional classes; the serif class
    // runs slightly narrower overall.
    let units = match ch {
        ' ' => 278.0,
        'i' | 'j' | 'l' | '.' | ',' | ':' | ';' | '\'' | '!' | '|' => 222.0,
        't' | 'f' | 'r' | '(' | ')' | '[' | ']' | '-' | '/' => 333.0,
        'm' | 'w' => 778.0,
        'M' | 'W' => 889.0,
        'A'..='Z' => 667.0,
        '0'..='9' => 556.0,
        _ => 500.0,
    };

    match class {
        FontClass::Serif => units * 0.92,
        _ => units,
    }
}

/// Estimate the rendered width of `text` at `font_size`.
///
/// # Examples
///
/// ```
/// use pdf_retouch::fonts::FontClass;
/// use pdf_retouch::fonts::metrics::text_width;
///
/// let w = text_width("hello", 12.0, FontClass::Sans, false);
/// assert!(w > 0.0 && w < 12.0 * 5.0);
/// ```
pub fn text_width(text: &str, font_size: f32, class: FontClass, bold: bool) -> f32 {
    let units: f32 = text.chars().map(|c| char_width_units(c, class)).sum();
    let width = units * font_size / 1000.0;
    if bold && class != FontClass::Mono {
        width * BOLD_FACTOR
    } else {
        width
    }
}

/// Wrap text into lines no wider than `max_width`, greedily by word.
///
/// Embedded newlines are hard breaks. A single word wider than `max_width`
/// is kept on its own line rather than split.
pub fn wrap_text(text: &str, max_width: f32, font_size: f32, class: FontClass, bold: bool) -> Vec<String> {
    let mut lines = Vec::new();

    for hard_line in text.split('\n') {
        if hard_line.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in hard_line.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if text_width(&candidate, font_size, class, bold) <= max_width || current.is_empty() {
                current = candidate;
            } else {
                lines.push(current);
                current = word.to_string();
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Number of lines `text` occupies when wrapped to `max_width`.
pub fn line_count(text: &str, max_width: f32, font_size: f32, class: FontClass, bold: bool) -> usize {
    wrap_text(text, max_width, font_size, class, bold).len()
}
