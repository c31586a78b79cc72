//! Vertical line clustering.
//!
//! Characters arrive in visitation order, so reading lines are recovered
//! geometrically: a character joins the first line whose representative top
//! is within a fixed tolerance of its own, otherwise it opens a new line.
//! Clustering runs on un-merged characters; word merging happens afterwards
//! within each line.

use crate::extract::glyph::TextItem;
use crate::utils::safe_float_cmp;

/// A provisional reading line.
#[derive(Debug, Clone)]
pub struct Line {
    /// Representative top, taken from the line's founding character
    pub y: f32,
    /// Members, sorted left-to-right after clustering
    pub items: Vec<TextItem>,
}

/// Cluster a page's characters into lines by vertical proximity.
///
/// Returns lines sorted by `y` ascending with items sorted by `x` ascending.
/// The input is not mutated; clustering is a pure fold over the slice.
pub fn cluster_lines(items: &[TextItem], tolerance: f32) -> Vec<Line> {
    let mut lines: Vec<Line> = Vec::new();

    for item in items {
        match lines.iter_mut().find(|line| (line.y - item.y).abs() <= tolerance) {
            Some(line) => line.items.push(item.clone()),
            None => lines.push(Line {
                y: item.y,
                items: vec![item.clone()],
            }),
        }
    }

    for line in &mut lines {
        line.items.sort_by(|a, b| safe_float_cmp(a.x, b.x));
    }
    lines.sort_by(|a, b| safe_float_cmp(a.y, b.y));
    lines
}
