//! Round-trip rebuilding: edited groups back into low-level runs.
//!
//! Three strategies, tried in order of fidelity, each returning
//! `Option<Vec<TextRun>>` so the chain short-circuits on the first one
//! that applies:
//!
//! 1. paragraph line-split — re-slices the group's original per-line run
//!    templates, preserving per-run transforms for multi-line edits;
//! 2. glyph-capacity redistribution — when the edited text has exactly the
//!    original glyph count, every run keeps its transform/font/color;
//! 3. single-merged-element fallback — always succeeds, sacrificing
//!    multi-run formatting fidelity.
//!
//! An unedited group short-circuits all three and emits verbatim clones of
//! its frozen runs, preserving every hint byte-for-byte.

use crate::dirty::page_images_differ;
use crate::model::{Document, ImageElement, TextGroup, TextRun};

/// Minimum font size assumed when inferring a line spacing fallback.
const MIN_SPACING_FONT_SIZE: f64 = 6.0;

/// Line spacing as a multiple of the font size when nothing better is
/// recorded or inferable.
const SPACING_FONT_FACTOR: f64 = 1.2;

/// Rebuild a page-based document from its edited groups and images.
///
/// Each page's run list is regenerated from its groups (verbatim for
/// unedited groups); runs without text never enter a group and pass
/// through unchanged at their original positions. The supplied current
/// images are installed, and the opaque content-stream passthrough
/// survives only on pages where neither text nor images changed.
pub fn restore_glyph_elements(
    document: &Document,
    groups: &[Vec<TextGroup>],
    images: &[Vec<ImageElement>],
    original_images: &[Vec<ImageElement>],
    force_single_element: bool,
) -> Document {
    let mut out = document.clone();

    for (page_index, page) in out.pages.iter_mut().enumerate() {
        let Some(page_groups) = groups.get(page_index) else {
            continue;
        };

        let mut texts: Vec<TextRun> = page_groups
            .iter()
            .flat_map(|g| rebuild_group_runs(g, force_single_element))
            .collect();
        // Textless runs (spacing artifacts) were excluded from grouping;
        // re-emit them at their original positions.
        for (index, run) in page.texts.iter().enumerate() {
            if run.text.is_none() {
                texts.insert(index.min(texts.len()), run.clone());
            }
        }
        page.texts = texts;

        if let Some(current) = images.get(page_index) {
            page.images = current.clone();
        }

        let text_edited = page_groups.iter().any(|g| g.is_edited());
        let images_edited = page_images_differ(
            images.get(page_index).map(Vec::as_slice).unwrap_or(&[]),
            original_images
                .get(page_index)
                .map(Vec::as_slice)
                .unwrap_or(&[]),
        );
        if text_edited || images_edited {
            page.content_stream = None;
        }
    }

    out
}

/// Regenerate the low-level runs for one group.
pub fn rebuild_group_runs(group: &TextGroup, force_single_element: bool) -> Vec<TextRun> {
    if !group.is_edited() {
        return group.original_runs.clone();
    }

    if force_single_element {
        log::debug!("group {}: forced single-element rebuild", group.id);
        return merge_into_single(group);
    }

    if let Some(runs) = try_split_paragraph(group) {
        log::debug!("group {}: paragraph line-split rebuild", group.id);
        return runs;
    }
    if let Some(runs) = try_redistribute(group) {
        log::debug!("group {}: glyph-capacity rebuild", group.id);
        return runs;
    }
    log::debug!("group {}: single-element fallback", group.id);
    merge_into_single(group)
}

/// Paragraph path: split the edited text on `\n` and re-slice the group's
/// original per-line run templates. Only applies to paragraph-shaped
/// groups whose edited text still contains newlines.
fn try_split_paragraph(group: &TextGroup) -> Option<Vec<TextRun>> {
    if !group.text.contains('\n') {
        return None;
    }
    let counts = group.line_run_counts.as_ref()?;
    let templates = slice_templates(&group.original_runs, counts)?;

    let spacing = group
        .line_spacing
        .filter(|s| *s > 0.0)
        .or_else(|| inferred_spacing(&templates))
        .unwrap_or_else(|| group.font_size.max(MIN_SPACING_FONT_SIZE) * SPACING_FONT_FACTOR);
    let direction = baseline_direction(&templates);

    let last_template = templates.len() - 1;
    let mut out = Vec::new();
    for (line_index, line_text) in group.text.split('\n').enumerate() {
        let template_index = line_index.min(last_template);
        let template = templates[template_index];

        let shift = (line_index as f64 - template_index as f64) * spacing * direction;
        let mut line_runs: Vec<TextRun> = template.to_vec();
        for run in &mut line_runs {
            shift_baseline(run, shift);
        }

        distribute_chars(line_text, &mut line_runs);
        out.append(&mut line_runs);
    }
    Some(out)
}

/// Slice the frozen runs into per-line templates using the recorded run
/// counts. Returns `None` when the counts cannot index the run list.
fn slice_templates<'a>(runs: &'a [TextRun], counts: &[usize]) -> Option<Vec<&'a [TextRun]>> {
    if counts.is_empty() || runs.is_empty() {
        return None;
    }
    let mut templates = Vec::with_capacity(counts.len());
    let mut offset = 0;
    for &count in counts {
        if count == 0 || offset + count > runs.len() {
            return None;
        }
        templates.push(&runs[offset..offset + count]);
        offset += count;
    }
    Some(templates)
}

/// Average non-zero baseline delta between consecutive template lines.
fn inferred_spacing(templates: &[&[TextRun]]) -> Option<f64> {
    let baselines: Vec<f64> = templates
        .iter()
        .filter_map(|t| t.first().map(|r| r.baseline_y()))
        .collect();
    let deltas: Vec<f64> = baselines
        .windows(2)
        .map(|w| (w[0] - w[1]).abs())
        .filter(|d| *d > 0.0)
        .collect();
    if deltas.is_empty() {
        None
    } else {
        Some(deltas.iter().sum::<f64>() / deltas.len() as f64)
    }
}

/// +1 when template baselines increase line over line, -1 when they
/// decrease (the common top-of-page-first layout).
fn baseline_direction(templates: &[&[TextRun]]) -> f64 {
    let first = templates.first().and_then(|t| t.first());
    let last = templates.last().and_then(|t| t.first());
    match (first, last) {
        (Some(a), Some(b)) if b.baseline_y() > a.baseline_y() => 1.0,
        _ => -1.0,
    }
}

/// Redistribution path: when the edited text has exactly the original
/// total glyph count, refill the original runs in place so every run
/// keeps its transform, font, and color.
fn try_redistribute(group: &TextGroup) -> Option<Vec<TextRun>> {
    if group.original_runs.is_empty() {
        return None;
    }
    let capacity: usize = group.original_runs.iter().map(TextRun::glyph_count).sum();
    if group.text.chars().count() != capacity {
        return None;
    }
    let mut runs = group.original_runs.clone();
    distribute_chars(&group.text, &mut runs);
    Some(runs)
}

/// Fallback: one run cloned from the first original, carrying the whole
/// edited string with newlines stripped.
fn merge_into_single(group: &TextGroup) -> Vec<TextRun> {
    let Some(first) = group.original_runs.first() else {
        return Vec::new();
    };
    let mut run = first.clone();
    run.text = Some(group.text.replace(['\n', '\r'], ""));
    run.glyph_codes = None;
    vec![run]
}

/// Distribute the text's characters across the runs using each run's
/// original glyph count as its capacity; the last run absorbs any
/// remainder. Glyph-code hints are cleared on every run whose text
/// actually changed, since they no longer correspond.
fn distribute_chars(text: &str, runs: &mut [TextRun]) {
    let mut chars = text.chars();
    let last = runs.len().saturating_sub(1);
    for (i, run) in runs.iter_mut().enumerate() {
        let assigned: String = if i == last {
            chars.by_ref().collect()
        } else {
            chars.by_ref().take(run.glyph_count()).collect()
        };
        if run.visible_text() != assigned {
            run.text = Some(assigned);
            run.glyph_codes = None;
        }
    }
}

/// Shift a run's baseline Y, through the text matrix when present.
fn shift_baseline(run: &mut TextRun, dy: f64) {
    if dy == 0.0 {
        return;
    }
    if let Some(m) = &mut run.text_matrix {
        m[5] += dy;
    } else {
        run.y = Some(run.y.unwrap_or(0.0) + dy);
    }
}
