//! Layout reconstruction pipeline.
//!
//! Turns a page's glyph stream into paragraph blocks in four passes, leaves
//! first: glyph normalization, vertical line clustering, word merging within
//! each line, and paragraph assembly. Each pass is a pure function over its
//! input, so pages can be processed in parallel by the host with no shared
//! state.
//!
//! ```
//! use pdf_retouch::config::LayoutConfig;
//! use pdf_retouch::extract::{extract_page, GlyphEvent, PageInput};
//! use pdf_retouch::geometry::Point;
//!
//! let input = PageInput {
//!     page_number: 0,
//!     bounds: (0.0, 0.0, 612.0, 792.0),
//!     glyphs: vec![GlyphEvent {
//!         text: "A".to_string(),
//!         origin: Point::new(72.0, 100.0),
//!         font_name: "ArialMT".to_string(),
//!         font_size: 12.0,
//!         quad: None,
//!         color: None,
//!     }],
//! };
//! let page = extract_page(&input, &LayoutConfig::default()).unwrap();
//! assert_eq!(page.blocks.len(), 1);
//! ```

pub mod glyph;
pub mod lines;
pub mod paragraphs;
pub mod words;

pub use glyph::{GlyphEvent, Quad, TextItem};
pub use paragraphs::{ParagraphLine, ParsedBlock, ParsedPage};

use crate::config::LayoutConfig;
use crate::error::{Error, Result};

/// Extraction input for one page, as delivered by the text provider.
#[derive(Debug, Clone)]
pub struct PageInput {
    /// Zero-based page number
    pub page_number: usize,
    /// Page bounds as `(x0, y0, x1, y1)`
    pub bounds: (f32, f32, f32, f32),
    /// Character events in visitation order
    pub glyphs: Vec<GlyphEvent>,
}

/// Run the full reconstruction pipeline for one page.
///
/// Malformed glyph data degrades to fallbacks inside the pipeline; only
/// unusable page bounds fail the page.
pub fn extract_page(input: &PageInput, config: &LayoutConfig) -> Result<ParsedPage> {
    let (x0, y0, x1, y1) = input.bounds;
    let width = x1 - x0;
    let height = y1 - y0;
    if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
        return Err(Error::PageExtraction {
            page: input.page_number,
            reason: format!("degenerate page bounds {:?}", input.bounds),
        });
    }

    let items = glyph::normalize_glyphs(&input.glyphs);
    let clustered = lines::cluster_lines(&items, config.line_tolerance);

    let paragraph_lines: Vec<ParagraphLine> = clustered
        .iter()
        .map(|line| words::merge_words(&line.items, config.word_gap_ratio))
        .filter_map(|words| ParagraphLine::from_words(&words))
        .collect();

    let blocks = paragraphs::assemble_paragraphs(&paragraph_lines, config);
    log::debug!(
        "page {}: {} glyphs -> {} lines -> {} blocks",
        input.page_number,
        items.len(),
        paragraph_lines.len(),
        blocks.len()
    );

    Ok(ParsedPage {
        page_number: input.page_number,
        width,
        height,
        blocks,
    })
}

/// Extract every page, isolating failures.
///
/// A page that fails is logged and skipped; its siblings are unaffected.
pub fn extract_pages(inputs: &[PageInput], config: &LayoutConfig) -> Vec<ParsedPage> {
    inputs
        .iter()
        .filter_map(|input| match extract_page(input, config) {
            Ok(page) => Some(page),
            Err(err) => {
                log::warn!("skipping page {}: {}", input.page_number, err);
                None
            },
        })
        .collect()
}
