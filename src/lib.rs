//! # pdf_retouch
//!
//! Rebuilds editable paragraphs from a page's per-glyph text runs and plans
//! rotation-aware masked redraws so edits can be written back onto the page.
//!
//! ## What it does
//!
//! - **Layout reconstruction**: a flat stream of character records
//!   (position, size, font, color) becomes words, lines, and finally
//!   paragraph blocks, using geometric clustering heuristics; no upstream
//!   structure is assumed.
//! - **Rotation-aware geometry**: overlay rectangles are tracked as
//!   viewport-relative ratios plus a rotation epoch, so an edit placed under
//!   one rotation/zoom state masks the right content after the page has been
//!   rotated or rescaled since.
//! - **Save planning**: each edited overlay becomes a white mask rectangle
//!   plus a text drawing instruction in the document's bottom-up page
//!   coordinates, ready for an external document library's draw primitives.
//!
//! Rasterization, binary document decoding, the editing UI, and the final
//! write-out are external collaborators; this crate owns the layout and
//! geometry core between them.
//!
//! ## Quick start
//!
//! ```
//! use pdf_retouch::config::LayoutConfig;
//! use pdf_retouch::extract::{extract_page, GlyphEvent, PageInput};
//! use pdf_retouch::geometry::Point;
//! use pdf_retouch::save::{plan_save, SavePayload};
//!
//! # fn main() -> pdf_retouch::Result<()> {
//! // Reconstruct paragraphs from a page's glyph stream
//! let input = PageInput {
//!     page_number: 0,
//!     bounds: (0.0, 0.0, 612.0, 792.0),
//!     glyphs: vec![GlyphEvent {
//!         text: "A".to_string(),
//!         origin: Point::new(72.0, 96.0),
//!         font_name: "BAAAAA+ArialMT".to_string(),
//!         font_size: 12.0,
//!         quad: None,
//!         color: Some([0.0, 0.0, 0.0]),
//!     }],
//! };
//! let page = extract_page(&input, &LayoutConfig::default())?;
//! assert_eq!(page.blocks.len(), 1);
//!
//! // Plan a save from the editing surface's payload
//! let payload: SavePayload = serde_json::from_str(
//!     r#"{"pages": []}"#,
//! ).map_err(|e| pdf_retouch::Error::InvalidPayload(e.to_string()))?;
//! let plans = plan_save(&payload, |_| Some((612.0, 792.0)))?;
//! assert!(plans.is_empty());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Geometry primitives
pub mod geometry;

// Font normalization and metrics
pub mod fonts;

// Layout reconstruction
pub mod extract;

// Overlay geometry and bounds snapshots
pub mod overlay;

// Save planning
pub mod save;

// Re-exports
pub use error::{Error, Result};
pub use extract::{extract_page, extract_pages, ParsedBlock, ParsedPage};
pub use overlay::{BoundsSnapshot, BoundsSnapshotStore, OverlayId, Rotation};
pub use save::{plan_save, SavePayload};

// Internal utilities
pub(crate) mod utils {
    //! Internal utility functions.

    use std::cmp::Ordering;

    /// Compare two floats without panicking on NaN.
    ///
    /// NaN values are treated as equal to each other and greater than all
    /// other values, so sorts over provider-supplied coordinates never
    /// panic.
    #[inline]
    pub fn safe_float_cmp(a: f32, b: f32) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => a.partial_cmp(&b).unwrap(),
        }
    }

}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
