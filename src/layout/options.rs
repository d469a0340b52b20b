//! Tunable layout parameters.
//!
//! Every threshold in the clustering, grouping, and spacing heuristics was
//! chosen empirically; they live here as configurable constants rather than
//! as load-bearing literals inside the algorithms.

/// Parameters for the layout analysis pipeline.
#[derive(Debug, Clone)]
pub struct LayoutParams {
    /// Minimum absolute baseline tolerance for joining a run to a line.
    pub line_tolerance_min: f64,

    /// Baseline tolerance as a fraction of the run's font size.
    pub line_tolerance_ratio: f64,

    /// Minimum absolute horizontal gap that splits two runs into clusters.
    pub gap_threshold_min: f64,

    /// Gap threshold as a fraction of the average font size.
    pub gap_threshold_ratio: f64,

    /// Widening factor applied to the gap threshold when both runs share
    /// the same font.
    pub same_font_gap_factor: f64,

    /// Diagonal-distance absorption limit as a fraction of the average
    /// font size (rescues slightly rotated runs from a horizontal split).
    pub diagonal_ratio: f64,

    /// Rotations below this magnitude (degrees) are treated as none.
    pub rotation_epsilon_deg: f64,

    /// Two rotations within this many degrees count as the same.
    pub rotation_match_deg: f64,

    /// Left edges within `avg_font_size * this` count as left-aligned.
    pub paragraph_align_ratio: f64,

    /// Maximum inter-line baseline gap, as a multiple of the average font
    /// size, for two lines to stay in one paragraph. Intentionally wide
    /// (1x-3x real-world line spacing).
    pub paragraph_gap_ratio: f64,

    /// Auto mode: average words per group above which a page with at least
    /// `auto_min_multiline` multi-line groups merges.
    pub auto_avg_words_with_multiline: f64,

    /// Auto mode: multi-line group count for the combined rule above.
    pub auto_min_multiline: usize,

    /// Auto mode: average words per group that alone forces merging.
    pub auto_avg_words: f64,

    /// Auto mode: fraction of long groups that alone forces merging.
    pub auto_long_text_ratio: f64,

    /// A group counts as "long" with at least this many words...
    pub auto_long_words: usize,

    /// ...or at least this many characters.
    pub auto_long_chars: usize,

    /// Fraction of the gap threshold at which the baseline-advance test of
    /// the space synthesizer fires.
    pub advance_space_factor: f64,

    /// Estimated character width clamp, as fractions of the font size.
    pub char_width_min_ratio: f64,
    pub char_width_max_ratio: f64,
}

impl LayoutParams {
    /// Create layout parameters with the default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the gap threshold ratio.
    pub fn with_gap_threshold_ratio(mut self, ratio: f64) -> Self {
        self.gap_threshold_ratio = ratio;
        self
    }

    /// Set the paragraph inter-line gap cap.
    pub fn with_paragraph_gap_ratio(mut self, ratio: f64) -> Self {
        self.paragraph_gap_ratio = ratio;
        self
    }

    /// Set the auto-mode word-count thresholds.
    pub fn with_auto_word_thresholds(mut self, with_multiline: f64, alone: f64) -> Self {
        self.auto_avg_words_with_multiline = with_multiline;
        self.auto_avg_words = alone;
        self
    }
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            line_tolerance_min: 2.0,
            line_tolerance_ratio: 0.12,
            gap_threshold_min: 1.5,
            gap_threshold_ratio: 0.6,
            same_font_gap_factor: 1.4,
            diagonal_ratio: 0.8,
            rotation_epsilon_deg: 0.5,
            rotation_match_deg: 1.0,
            paragraph_align_ratio: 0.3,
            paragraph_gap_ratio: 3.0,
            auto_avg_words_with_multiline: 8.0,
            auto_min_multiline: 2,
            auto_avg_words: 12.0,
            auto_long_text_ratio: 0.4,
            auto_long_words: 5,
            auto_long_chars: 30,
            advance_space_factor: 0.8,
            char_width_min_ratio: 0.35,
            char_width_max_ratio: 1.25,
        }
    }
}
