//! Paragraph grouping: merging consecutive line clusters.
//!
//! Line clusters are merged into paragraph groups using left-alignment,
//! font continuity, and baseline-spacing heuristics. In auto mode the
//! merge only happens on pages that look paragraph-heavy; sparse pages
//! (forms, tables, labels) keep line-level groups, which edit better.

use super::geometry::{circular_mean_degrees, run_rotation};
use super::lines::LineCluster;
use super::options::LayoutParams;
use crate::model::{BBox, GroupId, GroupingMode, Point, TextGroup};

/// Turn a page's line clusters into editable groups under the given mode.
pub(crate) fn group_page(
    clusters: Vec<LineCluster>,
    page_index: usize,
    mode: GroupingMode,
    params: &LayoutParams,
) -> Vec<TextGroup> {
    let merge = match mode {
        GroupingMode::SingleLine => false,
        GroupingMode::Paragraph => true,
        GroupingMode::Auto => {
            let heavy = is_paragraph_heavy(&clusters, params);
            log::debug!(
                "auto grouping page {}: {} clusters, paragraph-heavy = {}",
                page_index,
                clusters.len(),
                heavy
            );
            heavy
        }
    };

    let grouped: Vec<Vec<LineCluster>> = if merge {
        merge_into_paragraphs(clusters, params)
    } else {
        clusters.into_iter().map(|c| vec![c]).collect()
    };

    grouped
        .into_iter()
        .enumerate()
        .map(|(seq, lines)| make_group(lines, GroupId { page_index, seq }, params))
        .collect()
}

/// Per-page auto-mode decision. The thresholds are empirical; they are
/// exposed on [`LayoutParams`] rather than treated as exact behavior.
fn is_paragraph_heavy(clusters: &[LineCluster], params: &LayoutParams) -> bool {
    let texts: Vec<&str> = clusters
        .iter()
        .map(|c| c.text.as_str())
        .filter(|t| !t.trim().is_empty())
        .collect();
    if texts.is_empty() {
        return false;
    }

    let count = texts.len() as f64;
    let word_counts: Vec<usize> = texts.iter().map(|t| t.split_whitespace().count()).collect();
    let avg_words = word_counts.iter().sum::<usize>() as f64 / count;

    let long_groups = texts
        .iter()
        .zip(&word_counts)
        .filter(|(t, w)| **w >= params.auto_long_words || t.chars().count() >= params.auto_long_chars)
        .count();
    let long_text_ratio = long_groups as f64 / count;

    // Line clusters have not been merged yet, so each spans one line; the
    // multi-line clause only fires when re-evaluating already-merged
    // groups.
    let multi_line_groups = texts.iter().filter(|t| t.lines().count() > 1).count();

    (multi_line_groups >= params.auto_min_multiline && avg_words > params.auto_avg_words_with_multiline)
        || avg_words > params.auto_avg_words
        || long_text_ratio > params.auto_long_text_ratio
}

/// Single greedy pass: a line joins the open paragraph iff it is
/// left-aligned with, in the same font as, and vertically close to the
/// paragraph's most recent line.
fn merge_into_paragraphs(
    clusters: Vec<LineCluster>,
    params: &LayoutParams,
) -> Vec<Vec<LineCluster>> {
    let mut paragraphs: Vec<Vec<LineCluster>> = Vec::new();

    for cluster in clusters {
        match paragraphs.last_mut() {
            Some(open)
                if open
                    .last()
                    .is_some_and(|prev| lines_continue(prev, &cluster, params)) =>
            {
                open.push(cluster);
            }
            _ => paragraphs.push(vec![cluster]),
        }
    }

    paragraphs
}

fn lines_continue(prev: &LineCluster, next: &LineCluster, params: &LayoutParams) -> bool {
    let avg_font_size = (prev.font_size() + next.font_size()) / 2.0;

    if (prev.left - next.left).abs() > avg_font_size * params.paragraph_align_ratio {
        return false;
    }
    if prev.font_id() != next.font_id() {
        return false;
    }
    // Cap on the baseline gap; wide on purpose (1x-3x real line spacing).
    (prev.baseline - next.baseline).abs() <= avg_font_size * params.paragraph_gap_ratio
}

/// Build one group from one or more line clusters. A single cluster stays
/// a line-level group; multiple clusters become a paragraph carrying the
/// per-line run counts and spacing needed to split it back apart.
fn make_group(lines: Vec<LineCluster>, id: GroupId, params: &LayoutParams) -> TextGroup {
    let text = lines
        .iter()
        .map(|l| l.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    let (line_run_counts, line_spacing) = if lines.len() > 1 {
        let counts: Vec<usize> = lines.iter().map(|l| l.runs.len()).collect();
        let spacings: Vec<f64> = lines
            .windows(2)
            .map(|w| (w[0].baseline - w[1].baseline).abs())
            .filter(|s| *s > 0.0)
            .collect();
        let spacing = if spacings.is_empty() {
            None
        } else {
            Some(spacings.iter().sum::<f64>() / spacings.len() as f64)
        };
        (Some(counts), spacing)
    } else {
        (None, None)
    };

    let bbox = lines
        .iter()
        .flat_map(|l| l.geoms.iter())
        .fold(BBox::empty(), |acc, g| acc.union(&g.bbox));

    let runs: Vec<_> = lines.into_iter().flat_map(|l| l.runs).collect();

    let rotation = circular_mean_degrees(
        runs.iter()
            .filter_map(|r| run_rotation(r, params.rotation_epsilon_deg)),
    );
    let anchor = rotation.and(runs.first().map(|r| Point {
        x: r.baseline_x(),
        y: r.baseline_y(),
    }));

    let first = runs.first();
    TextGroup {
        id,
        text: text.clone(),
        original_text: text,
        font_id: first.map(|r| r.font_id.clone()).unwrap_or_default(),
        font_size: first.map(|r| r.font_size).unwrap_or(0.0),
        fill_color: first.and_then(|r| r.fill_color.clone()),
        rotation,
        anchor,
        bbox,
        line_run_counts,
        line_spacing,
        original_runs: runs,
    }
}
