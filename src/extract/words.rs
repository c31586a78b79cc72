//! Word merging within a line.
//!
//! Whitespace glyphs were dropped at normalization, so word boundaries are
//! recovered from horizontal gaps: a gap above 25% of the current font size
//! separates words, anything tighter is intra-word kerning. The separating
//! space re-appears when line text is joined word-by-word.

use crate::extract::glyph::TextItem;

/// Merge a line's characters (sorted left-to-right) into words.
///
/// Each output item covers the union box of its merged characters and keeps
/// the first character's style. Merging an already-merged word is the
/// identity.
pub fn merge_words(items: &[TextItem], gap_ratio: f32) -> Vec<TextItem> {
    let mut words: Vec<TextItem> = Vec::new();
    let mut current: Option<TextItem> = None;

    for item in items {
        let starts_new_word = match &current {
            None => true,
            // Gap wide enough to separate words
            Some(word) => item.x - word.right() > gap_ratio * item.font_size,
        };

        if starts_new_word {
            if let Some(word) = current.take() {
                words.push(word);
            }
            current = Some(item.clone());
        } else if let Some(word) = current.as_mut() {
            word.text.push_str(&item.text);
            let merged = word.bbox().union(&item.bbox());
            word.x = merged.x;
            word.y = merged.y;
            word.width = merged.width;
            word.height = merged.height;
        }
    }

    if let Some(word) = current {
        words.push(word);
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::FontWeight;

    fn item(text: &str, x: f32, width: f32) -> TextItem {
        TextItem {
            text: text.to_string(),
            x,
            y: 100.0,
            width,
            height: 12.0,
            font_size: 12.0,
            font_family: "Arial".to_string(),
            font_weight: FontWeight::Normal,
            fill: "#333333".to_string(),
            line_height: 1.2,
        }
    }

    #[test]
    fn test_tight_characters_merge() {
        // gaps of 1.0 unit, threshold 0.25 * 12 = 3.0
        let items = vec![item("h", 0.0, 6.0), item("i", 7.0, 4.0)];
        let words = merge_words(&items, 0.25);
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].text, "hi");
        assert_eq!(words[0].x, 0.0);
        assert_eq!(words[0].width, 11.0);
    }

    #[test]
    fn test_wide_gap_splits_words() {
        let items = vec![item("a", 0.0, 6.0), item("b", 20.0, 6.0)];
        let words = merge_words(&items, 0.25);
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].text, "a");
        assert_eq!(words[1].text, "b");
    }

    #[test]
    fn test_threshold_scales_with_font_size() {
        // 4-unit gap: splits at size 12 (threshold 3) but not size 24 (threshold 6)
        let small = vec![item("a", 0.0, 6.0), item("b", 10.0, 6.0)];
        assert_eq!(merge_words(&small, 0.25).len(), 2);

        let mut big = small.clone();
        for it in &mut big {
            it.font_size = 24.0;
        }
        assert_eq!(merge_words(&big, 0.25).len(), 1);
    }

    #[test]
    fn test_merge_is_idempotent_on_single_word() {
        let word = item("hello", 10.0, 30.0);
        let words = merge_words(std::slice::from_ref(&word), 0.25);
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].text, word.text);
        assert_eq!(words[0].x, word.x);
        assert_eq!(words[0].width, word.width);
    }

    #[test]
    fn test_word_box_is_union_of_characters() {
        let items = vec![item("t", 0.0, 5.0), item("a", 6.0, 6.0), item("g", 13.0, 6.0)];
        let words = merge_words(&items, 0.25);
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].x, 0.0);
        assert_eq!(words[0].width, 19.0);
    }

    #[test]
    fn test_empty_line() {
        assert!(merge_words(&[], 0.25).is_empty());
    }
}
