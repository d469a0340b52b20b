//! Line clustering: raw runs to visual lines to word clusters.
//!
//! Runs are grouped onto shared baselines first, then split within each
//! line into word clusters wherever the horizontal gap says two runs
//! cannot belong to the same editable unit. Rotated text gets two escape
//! hatches: a diagonal-distance test that absorbs runs a purely horizontal
//! gap test would wrongly split, and outright split suppression when both
//! runs carry the same non-trivial rotation.

use std::cmp::Ordering;

use super::geometry::{run_rotation, RunGeometry};
use super::metrics::FontMetricsTable;
use super::options::LayoutParams;
use super::text::synthesize_text;
use crate::model::{Page, TextRun};

/// A word cluster on a single visual line, the line-level group candidate.
#[derive(Debug, Clone)]
pub(crate) struct LineCluster {
    /// Member runs, sorted by X.
    pub runs: Vec<TextRun>,
    /// Geometry per member run.
    pub geoms: Vec<RunGeometry>,
    /// Synthesized display text.
    pub text: String,
    /// Baseline of the cluster (first member's baseline).
    pub baseline: f64,
    /// Left edge of the cluster.
    pub left: f64,
}

impl LineCluster {
    fn new(members: Vec<(TextRun, RunGeometry)>, params: &LayoutParams) -> Self {
        let (runs, geoms): (Vec<_>, Vec<_>) = members.into_iter().unzip();
        let text = synthesize_text(&runs, &geoms, params);
        let baseline = geoms.first().map(|g| g.baseline).unwrap_or(0.0);
        let left = geoms
            .iter()
            .map(|g| g.bbox.left)
            .fold(f64::INFINITY, f64::min);
        Self {
            runs,
            geoms,
            text,
            baseline,
            left,
        }
    }

    /// Dominant font size (first member's).
    pub fn font_size(&self) -> f64 {
        self.runs.first().map(|r| r.font_size).unwrap_or(0.0)
    }

    /// Dominant font id (first member's).
    pub fn font_id(&self) -> &str {
        self.runs.first().map(|r| r.font_id.as_str()).unwrap_or("")
    }
}

/// Cluster a page's runs into word clusters, top of page first, left to
/// right within each line.
pub(crate) fn cluster_page(
    page: &Page,
    metrics: &FontMetricsTable,
    params: &LayoutParams,
) -> Vec<LineCluster> {
    let mut entries: Vec<(TextRun, RunGeometry)> = page
        .texts
        .iter()
        .filter(|r| r.text.is_some())
        .map(|r| (r.clone(), RunGeometry::estimate(r, metrics)))
        .collect();

    if entries.is_empty() {
        return Vec::new();
    }

    // Baseline descending puts the top of the page first.
    entries.sort_by(|a, b| {
        b.1.baseline
            .partial_cmp(&a.1.baseline)
            .unwrap_or(Ordering::Equal)
    });

    let mut lines: Vec<(f64, Vec<(TextRun, RunGeometry)>)> = Vec::new();
    for (run, geom) in entries {
        let tolerance = params
            .line_tolerance_min
            .max(run.font_size * params.line_tolerance_ratio);
        match lines.last_mut() {
            Some((baseline, members)) if (*baseline - geom.baseline).abs() <= tolerance => {
                members.push((run, geom));
            }
            _ => lines.push((geom.baseline, vec![(run, geom)])),
        }
    }

    let mut clusters = Vec::new();
    for (_, mut members) in lines {
        members.sort_by(|a, b| {
            a.1.bbox
                .left
                .partial_cmp(&b.1.bbox.left)
                .unwrap_or(Ordering::Equal)
        });
        split_line_into_clusters(members, params, &mut clusters);
    }

    log::debug!("clustered page into {} word clusters", clusters.len());
    clusters
}

fn split_line_into_clusters(
    members: Vec<(TextRun, RunGeometry)>,
    params: &LayoutParams,
    out: &mut Vec<LineCluster>,
) {
    if members.is_empty() {
        return;
    }

    let avg_font_size =
        members.iter().map(|(r, _)| r.font_size).sum::<f64>() / members.len() as f64;
    let threshold = params
        .gap_threshold_min
        .max(avg_font_size * params.gap_threshold_ratio);

    let mut current: Vec<(TextRun, RunGeometry)> = Vec::new();
    for (run, geom) in members {
        let split = match current.last() {
            None => false,
            Some((prev, prev_geom)) => should_split(
                prev,
                prev_geom,
                &run,
                &geom,
                threshold,
                avg_font_size,
                params,
            ),
        };
        if split {
            out.push(LineCluster::new(std::mem::take(&mut current), params));
        }
        current.push((run, geom));
    }
    if !current.is_empty() {
        out.push(LineCluster::new(current, params));
    }
}

fn should_split(
    prev: &TextRun,
    prev_geom: &RunGeometry,
    next: &TextRun,
    next_geom: &RunGeometry,
    threshold: f64,
    avg_font_size: f64,
    params: &LayoutParams,
) -> bool {
    let same_font = prev.font_id == next.font_id;
    let factor = if same_font {
        params.same_font_gap_factor
    } else {
        1.0
    };
    let gap = next_geom.bbox.left - prev_geom.right();
    if gap <= threshold * factor {
        return false;
    }

    // Rotated text renders on a slight diagonal; the straight-line
    // distance between the previous run's end and the next run's start is
    // the honest gap there.
    let dx = next_geom.baseline_x - prev_geom.right();
    let dy = next_geom.baseline - prev_geom.baseline;
    let diagonal = (dx * dx + dy * dy).sqrt();
    if diagonal <= (avg_font_size * params.diagonal_ratio).max(threshold) {
        return false;
    }

    // Two runs sharing the same non-trivial rotation stay together.
    if let (Some(a), Some(b)) = (
        run_rotation(prev, params.rotation_epsilon_deg),
        run_rotation(next, params.rotation_epsilon_deg),
    ) {
        if (a - b).abs() <= params.rotation_match_deg {
            return false;
        }
    }

    true
}
