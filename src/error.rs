//! Error types for the retouch pipeline.
//!
//! Per-page and per-overlay anomalies are recovered locally with fallbacks
//! and logged skips; only document-level failures surface through these
//! variants.

/// Result type alias for retouch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during extraction and save planning.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Extraction failed for a single page (siblings are unaffected)
    #[error("Failed to extract page {page}: {reason}")]
    PageExtraction {
        /// Zero-based page index
        page: usize,
        /// Reason for the failure
        reason: String,
    },

    /// Save payload could not be interpreted
    #[error("Invalid save payload: {0}")]
    InvalidPayload(String),

    /// The document library returned no bounds for a page named in the payload
    #[error("No page bounds available for page {0}")]
    MissingPageBounds(u32),

    /// Save planning failed for the whole document
    #[error("Save failed: {0}")]
    SaveFailed(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_extraction_error() {
        let err = Error::PageExtraction {
            page: 3,
            reason: "degenerate page bounds".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("page 3"));
        assert!(msg.contains("degenerate page bounds"));
    }

    #[test]
    fn test_missing_page_bounds_error() {
        let err = Error::MissingPageBounds(7);
        assert!(format!("{}", err).contains("page 7"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
