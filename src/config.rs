//! Configuration for layout reconstruction.

/// Default line-height ratio used when nothing better can be derived.
pub const DEFAULT_LINE_HEIGHT: f32 = 1.2;

/// Lower clamp for derived paragraph line heights.
pub const MIN_LINE_HEIGHT: f32 = 1.0;

/// Upper clamp for derived paragraph line heights.
pub const MAX_LINE_HEIGHT: f32 = 3.0;

/// Tuning constants for the clustering heuristics.
///
/// The defaults reproduce empirically tuned values and are what the layout
/// scenarios in `tests/` are calibrated against. They are exposed so a host
/// can adjust them for unusual inputs, but they are not DPI-aware.
#[derive(Debug, Clone, Copy)]
pub struct LayoutConfig {
    /// Horizontal gap beyond which two characters belong to separate words,
    /// as a ratio of the current character's font size.
    pub word_gap_ratio: f32,

    /// Vertical distance within which a character joins an existing line.
    pub line_tolerance: f32,

    /// Minimum left-edge alignment slack between consecutive paragraph lines.
    pub align_slack_min: f32,

    /// Left-edge alignment slack as a multiple of the larger font size.
    pub align_slack_font_factor: f32,

    /// Maximum font-size difference between lines of one paragraph.
    pub font_size_tolerance: f32,

    /// Extra vertical gap allowed between lines of one paragraph, on top of
    /// the larger of the two line heights.
    pub paragraph_gap_slack: f32,

    /// Width added to every flushed paragraph box to absorb measurement
    /// error at the right edge.
    pub width_calibration_pad: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutConfig {
    /// Create a configuration with the tuned default constants.
    pub fn new() -> Self {
        Self {
            word_gap_ratio: 0.25,
            line_tolerance: 3.0,
            align_slack_min: 10.0,
            align_slack_font_factor: 1.5,
            font_size_tolerance: 0.5,
            paragraph_gap_slack: 18.0,
            width_calibration_pad: 4.0,
        }
    }

    /// Override the word-gap ratio.
    pub fn with_word_gap_ratio(mut self, ratio: f32) -> Self {
        self.word_gap_ratio = ratio;
        self
    }

    /// Override the line clustering tolerance.
    pub fn with_line_tolerance(mut self, tolerance: f32) -> Self {
        self.line_tolerance = tolerance;
        self
    }

    /// Override the paragraph gap slack.
    pub fn with_paragraph_gap_slack(mut self, slack: f32) -> Self {
        self.paragraph_gap_slack = slack;
        self
    }
}
