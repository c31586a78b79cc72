//! Paragraph assembly from finalized lines.
//!
//! Consecutive lines fold into one paragraph while they stay left-aligned,
//! keep the same size and fill, are vertically close, and the previous line
//! does not end in a period (a hard break signal). Everything else flushes
//! the open paragraph. No upstream structure exists; these heuristics are
//! the only paragraph signal available.

use crate::config::{LayoutConfig, DEFAULT_LINE_HEIGHT, MAX_LINE_HEIGHT, MIN_LINE_HEIGHT};
use crate::extract::glyph::TextItem;
use crate::fonts::FontWeight;
use serde::{Deserialize, Serialize};

/// A finalized reading line: merged text plus dominant style.
#[derive(Debug, Clone)]
pub struct ParagraphLine {
    /// Words joined by single spaces
    pub text: String,
    /// Left edge over all words
    pub min_x: f32,
    /// Right edge over all words
    pub max_x: f32,
    /// Top of the line
    pub y: f32,
    /// Height of the tallest word
    pub height: f32,
    /// Largest font size on the line
    pub font_size: f32,
    /// First word's family
    pub font_family: String,
    /// First word's weight
    pub font_weight: FontWeight,
    /// First word's fill
    pub fill: String,
    /// First word's line-height ratio
    pub line_height: f32,
}

impl ParagraphLine {
    /// Collapse a line's merged words into one dominant-style record.
    ///
    /// Returns `None` for an empty word list.
    pub fn from_words(words: &[TextItem]) -> Option<Self> {
        let first = words.first()?;
        let text = words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        let mut min_x = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut y = f32::INFINITY;
        let mut height: f32 = 0.0;
        let mut font_size: f32 = 0.0;
        for word in words {
            min_x = min_x.min(word.x);
            max_x = max_x.max(word.right());
            y = y.min(word.y);
            height = height.max(word.height);
            font_size = font_size.max(word.font_size);
        }

        Some(Self {
            text,
            min_x,
            max_x,
            y,
            height,
            font_size,
            font_family: first.font_family.clone(),
            font_weight: first.font_weight,
            fill: first.fill.clone(),
            line_height: first.line_height,
        })
    }
}

/// A reconstructed paragraph of original page text.
///
/// Immutable once produced; edits become overlays, never mutations of the
/// block.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedBlock {
    /// Newline-joined line text
    pub text: String,
    /// Left edge, page units
    pub x: f32,
    /// Top edge, page units
    pub y: f32,
    /// Width including the calibration pad
    pub width: f32,
    /// Height of the tight line box
    pub height: f32,
    /// Style of the paragraph's first line
    pub font_size: f32,
    /// Canonical family
    pub font_family: String,
    /// Two-valued weight
    pub font_weight: FontWeight,
    /// Derived line-height ratio, clamped to [1, 3]
    pub line_height: f32,
    /// Fill color as `#rrggbb`
    pub fill: String,
}

/// The extraction result for one page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedPage {
    /// Zero-based page number
    pub page_number: usize,
    /// Page width, page units
    pub width: f32,
    /// Page height, page units
    pub height: f32,
    /// Paragraph blocks in reading order
    pub blocks: Vec<ParsedBlock>,
}

/// Decide whether `cur` continues the paragraph whose last line is `prev`.
fn continues_paragraph(prev: &ParagraphLine, cur: &ParagraphLine, config: &LayoutConfig) -> bool {
    let max_size = prev.font_size.max(cur.font_size);

    let aligned = (cur.min_x - prev.min_x).abs()
        <= config.align_slack_min.max(config.align_slack_font_factor * max_size);
    let same_size = (prev.font_size - cur.font_size).abs() <= config.font_size_tolerance;
    let same_fill = prev.fill == cur.fill;
    let hard_break = prev.text.trim_end().ends_with('.');
    let gap = cur.y - prev.y;
    let gap_ok = gap <= prev.height.max(cur.height).max(max_size) + config.paragraph_gap_slack;

    aligned && same_size && same_fill && !hard_break && gap_ok
}

/// Derive a paragraph's line-height ratio from its constituent lines.
///
/// Always returns a value in `[MIN_LINE_HEIGHT, MAX_LINE_HEIGHT]`, falling
/// back to the default ratio when the inputs are degenerate.
pub fn derive_paragraph_line_height(lines: &[ParagraphLine], block_height: f32) -> f32 {
    let clamp = |v: f32| v.clamp(MIN_LINE_HEIGHT, MAX_LINE_HEIGHT);

    let Some(first) = lines.first() else {
        return clamp(DEFAULT_LINE_HEIGHT);
    };
    let font_size = first.font_size;
    if !font_size.is_finite() || font_size <= 0.0 {
        return clamp(DEFAULT_LINE_HEIGHT);
    }

    if lines.len() == 1 {
        let candidates = [
            first.line_height,
            first.height / font_size,
            block_height / font_size,
        ];
        let valid: Vec<f32> = candidates
            .into_iter()
            .filter(|v| v.is_finite() && *v > 0.0)
            .collect();
        if valid.is_empty() {
            return clamp(DEFAULT_LINE_HEIGHT);
        }
        return clamp(valid.iter().sum::<f32>() / valid.len() as f32);
    }

    let step_count = (lines.len() - 1) as f32;
    let mut step_sum = 0.0;
    for pair in lines.windows(2) {
        step_sum += pair[1].y - pair[0].y;
    }
    let mut avg_step = step_sum / step_count;
    if !avg_step.is_finite() || avg_step <= 0.0 {
        avg_step = block_height / step_count;
    }
    let per_line = block_height / lines.len() as f32;

    let blended = (avg_step / font_size + per_line / font_size) / 2.0;
    if !blended.is_finite() {
        return clamp(DEFAULT_LINE_HEIGHT);
    }
    clamp(blended)
}

/// Flush a run of lines into one block.
fn flush_paragraph(lines: &[ParagraphLine], config: &LayoutConfig) -> ParsedBlock {
    let first = &lines[0];
    let last = &lines[lines.len() - 1];

    let mut min_x = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    for line in lines {
        min_x = min_x.min(line.min_x);
        max_x = max_x.max(line.max_x);
    }
    let height = (last.y + last.height) - first.y;

    let text = lines
        .iter()
        .map(|l| l.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    ParsedBlock {
        text,
        x: min_x,
        y: first.y,
        width: (max_x - min_x) + config.width_calibration_pad,
        height,
        font_size: first.font_size,
        font_family: first.font_family.clone(),
        font_weight: first.font_weight,
        line_height: derive_paragraph_line_height(lines, height),
        fill: first.fill.clone(),
    }
}

/// Fold finalized lines (sorted by `y`) into paragraph blocks.
///
/// Deterministic: the same input always yields the same blocks. A trailing
/// stray line flushes as its own one-line paragraph.
pub fn assemble_paragraphs(lines: &[ParagraphLine], config: &LayoutConfig) -> Vec<ParsedBlock> {
    let mut blocks = Vec::new();
    let mut open: Vec<ParagraphLine> = Vec::new();

    for line in lines {
        if let Some(prev) = open.last() {
            if !continues_paragraph(prev, line, config) {
                blocks.push(flush_paragraph(&open, config));
                open.clear();
            }
        }
        open.push(line.clone());
    }
    if !open.is_empty() {
        blocks.push(flush_paragraph(&open, config));
    }

    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str, min_x: f32, y: f32, font_size: f32, fill: &str) -> ParagraphLine {
        ParagraphLine {
            text: text.to_string(),
            min_x,
            max_x: min_x + 200.0,
            y,
            height: font_size,
            font_size,
            font_family: "Arial".to_string(),
            font_weight: FontWeight::Normal,
            fill: fill.to_string(),
            line_height: DEFAULT_LINE_HEIGHT,
        }
    }

    #[test]
    fn test_close_aligned_lines_merge() {
        // identical style, 15-unit gap at size 12: max(12,12,12) + 18 = 30 allowed
        let lines = vec![
            line("first line", 50.0, 100.0, 12.0, "#333333"),
            line("second line", 50.0, 115.0, 12.0, "#333333"),
        ];
        let blocks = assemble_paragraphs(&lines, &LayoutConfig::default());
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "first line\nsecond line");
    }

    #[test]
    fn test_trailing_period_is_a_hard_break() {
        let lines = vec![
            line("sentence ends.", 50.0, 100.0, 12.0, "#333333"),
            line("new paragraph", 50.0, 115.0, 12.0, "#333333"),
        ];
        let blocks = assemble_paragraphs(&lines, &LayoutConfig::default());
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_font_size_change_splits() {
        let lines = vec![
            line("heading", 50.0, 100.0, 18.0, "#333333"),
            line("body", 50.0, 125.0, 12.0, "#333333"),
        ];
        let blocks = assemble_paragraphs(&lines, &LayoutConfig::default());
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_fill_change_splits() {
        let lines = vec![
            line("dark", 50.0, 100.0, 12.0, "#333333"),
            line("red", 50.0, 115.0, 12.0, "#ff0000"),
        ];
        let blocks = assemble_paragraphs(&lines, &LayoutConfig::default());
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_indent_beyond_slack_splits() {
        // slack = max(10, 1.5 * 12) = 18; 40-unit indent splits
        let lines = vec![
            line("flush left", 50.0, 100.0, 12.0, "#333333"),
            line("indented", 90.0, 115.0, 12.0, "#333333"),
        ];
        let blocks = assemble_paragraphs(&lines, &LayoutConfig::default());
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_large_gap_splits() {
        // gap 60 > max(12,12,12) + 18
        let lines = vec![
            line("first", 50.0, 100.0, 12.0, "#333333"),
            line("far below", 50.0, 160.0, 12.0, "#333333"),
        ];
        let blocks = assemble_paragraphs(&lines, &LayoutConfig::default());
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_stray_last_line_flushes() {
        let lines = vec![
            line("para one.", 50.0, 100.0, 12.0, "#333333"),
            line("stray", 50.0, 300.0, 12.0, "#333333"),
        ];
        let blocks = assemble_paragraphs(&lines, &LayoutConfig::default());
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].text, "stray");
    }

    #[test]
    fn test_block_box_covers_lines_plus_pad() {
        let mut second = line("second", 50.0, 115.0, 12.0, "#333333");
        second.max_x = 280.0;
        let lines = vec![line("first", 50.0, 100.0, 12.0, "#333333"), second];
        let blocks = assemble_paragraphs(&lines, &LayoutConfig::default());
        assert_eq!(blocks.len(), 1);
        let block = &blocks[0];
        assert_eq!(block.x, 50.0);
        assert_eq!(block.y, 100.0);
        assert_eq!(block.width, 230.0 + 4.0);
        assert_eq!(block.height, 115.0 + 12.0 - 100.0);
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let lines = vec![
            line("alpha", 50.0, 100.0, 12.0, "#333333"),
            line("beta.", 50.0, 115.0, 12.0, "#333333"),
            line("gamma", 50.0, 130.0, 12.0, "#333333"),
        ];
        let config = LayoutConfig::default();
        let a = assemble_paragraphs(&lines, &config);
        let b = assemble_paragraphs(&lines, &config);
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.text, y.text);
            assert_eq!(x.x, y.x);
            assert_eq!(x.line_height, y.line_height);
        }
    }

    // ------------------------------------------------------------------
    // derive_paragraph_line_height
    // ------------------------------------------------------------------

    #[test]
    fn test_line_height_single_line() {
        let l = line("only", 50.0, 100.0, 12.0, "#333333");
        // candidates: 1.2, 12/12=1.0, 14.4/12=1.2 -> mean 1.1333
        let lh = derive_paragraph_line_height(std::slice::from_ref(&l), 14.4);
        assert!((lh - (1.2 + 1.0 + 1.2) / 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_line_height_multi_line() {
        let lines = vec![
            line("a", 50.0, 100.0, 12.0, "#333333"),
            line("b", 50.0, 118.0, 12.0, "#333333"),
            line("c", 50.0, 136.0, 12.0, "#333333"),
        ];
        // avg step 18, block height 48: (18/12 + 16/12) / 2 = 1.4167
        let lh = derive_paragraph_line_height(&lines, 48.0);
        assert!((lh - ((18.0 / 12.0) + (16.0 / 12.0)) / 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_line_height_always_clamped() {
        let mut degenerate = line("x", 0.0, 0.0, 0.0, "#333333");
        degenerate.line_height = f32::NAN;
        degenerate.height = -5.0;
        let lh = derive_paragraph_line_height(std::slice::from_ref(&degenerate), f32::NAN);
        assert!((MIN_LINE_HEIGHT..=MAX_LINE_HEIGHT).contains(&lh));

        let mut nan_size = line("x", 0.0, 0.0, f32::NAN, "#333333");
        nan_size.height = 12.0;
        let lh = derive_paragraph_line_height(std::slice::from_ref(&nan_size), 12.0);
        assert!((MIN_LINE_HEIGHT..=MAX_LINE_HEIGHT).contains(&lh));

        // huge spacing clamps to the max
        let sparse = vec![
            line("a", 0.0, 0.0, 10.0, "#333333"),
            line("b", 0.0, 200.0, 10.0, "#333333"),
        ];
        assert_eq!(derive_paragraph_line_height(&sparse, 210.0), MAX_LINE_HEIGHT);

        // zero block height on a single line clamps to the min
        let flat = line("a", 0.0, 0.0, 12.0, "#333333");
        let lh = derive_paragraph_line_height(std::slice::from_ref(&flat), 0.0);
        assert!((MIN_LINE_HEIGHT..=MAX_LINE_HEIGHT).contains(&lh));
    }

    #[test]
    fn test_line_height_non_positive_steps_fall_back() {
        // identical y values: avg step 0, falls back to block_height/(n-1)
        let lines = vec![
            line("a", 0.0, 100.0, 12.0, "#333333"),
            line("b", 0.0, 100.0, 12.0, "#333333"),
        ];
        let lh = derive_paragraph_line_height(&lines, 28.8);
        // fallback step 28.8, per-line 14.4: (2.4 + 1.2) / 2 = 1.8
        assert!((lh - 1.8).abs() < 1e-5);
    }

    #[test]
    fn test_empty_lines_use_default() {
        let lh = derive_paragraph_line_height(&[], 100.0);
        assert_eq!(lh, DEFAULT_LINE_HEIGHT);
    }
}
