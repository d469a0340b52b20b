//! Editable-string synthesis from an ordered group of runs.
//!
//! Raw glyph runs carry no explicit whitespace between them; the display
//! string is rebuilt by concatenating member texts and inserting a single
//! space wherever the geometry says a word boundary must have been.

use super::geometry::RunGeometry;
use super::metrics::FontMetricsTable;
use super::options::LayoutParams;
use crate::model::TextRun;

/// Build a group's display string from its ordered member runs.
///
/// This is used once at group-construction time to fix `original_text`,
/// and is exposed for hosts that need to re-synthesize text for ad-hoc run
/// sequences.
pub fn build_group_text(
    runs: &[TextRun],
    metrics: &FontMetricsTable,
    params: &LayoutParams,
) -> String {
    let geoms: Vec<RunGeometry> = runs
        .iter()
        .map(|r| RunGeometry::estimate(r, metrics))
        .collect();
    synthesize_text(runs, &geoms, params)
}

/// Synthesize the display string for runs with precomputed geometry.
pub(crate) fn synthesize_text(
    runs: &[TextRun],
    geoms: &[RunGeometry],
    params: &LayoutParams,
) -> String {
    let mut result = String::new();

    for (i, run) in runs.iter().enumerate() {
        let text = run.visible_text();
        if i > 0 && needs_space(&runs[i - 1], &geoms[i - 1], run, &geoms[i], params) {
            result.push(' ');
        }
        result.push_str(text);
    }

    result
}

fn needs_space(
    prev: &TextRun,
    prev_geom: &RunGeometry,
    next: &TextRun,
    next_geom: &RunGeometry,
    params: &LayoutParams,
) -> bool {
    // The next run already carries its own leading whitespace.
    if next.visible_text().starts_with(char::is_whitespace) {
        return false;
    }

    // A hyphenated word split across runs stays joined.
    if prev.visible_text().trim_end().ends_with('-') {
        return false;
    }

    let avg_font_size = (prev.font_size + next.font_size) / 2.0;
    let hint = prev
        .spacing_hint()
        .into_iter()
        .chain(next.spacing_hint())
        .fold(0.0_f64, f64::max);
    let threshold = params
        .gap_threshold_min
        .max(hint)
        .max(avg_font_size * params.gap_threshold_ratio);

    let gap = next_geom.bbox.left - prev_geom.right();
    if gap > threshold {
        return true;
    }

    // Secondary test on the raw baseline advance, for runs whose widths
    // are themselves estimates: subtract a sanitized run width built from
    // a per-glyph width clamped to a plausible character-width band.
    let glyphs = prev.glyph_count().max(1) as f64;
    let char_width = (prev_geom.width / glyphs).clamp(
        prev.font_size * params.char_width_min_ratio,
        prev.font_size * params.char_width_max_ratio,
    );
    let advance = next_geom.baseline_x - prev_geom.baseline_x;
    advance - char_width * glyphs > threshold * params.advance_space_factor
}
