//! Layout analysis: from raw glyph runs to editable groups.
//!
//! The pipeline runs one page at a time: per-run geometry estimation,
//! baseline clustering into lines, word clustering within lines, and
//! (policy-dependent) merging of lines into paragraphs.

mod geometry;
mod lines;
mod metrics;
mod options;
mod paragraphs;
mod text;

pub use geometry::{circular_mean_degrees, run_rotation, RunGeometry};
pub use metrics::{FontMetrics, FontMetricsTable};
pub use options::LayoutParams;
pub use text::build_group_text;

use crate::model::{Document, GroupingMode, TextGroup};
use rayon::prelude::*;

/// Group a document's text into editable groups, one list per page.
///
/// Deterministic for a given document and mode; pages are independent, so
/// they are processed in parallel and collected back in page order.
pub fn group_document_text(document: &Document, mode: GroupingMode) -> Vec<Vec<TextGroup>> {
    group_document_text_with_params(document, mode, &LayoutParams::default())
}

/// Group a document's text with explicit layout parameters.
pub fn group_document_text_with_params(
    document: &Document,
    mode: GroupingMode,
    params: &LayoutParams,
) -> Vec<Vec<TextGroup>> {
    let metrics = FontMetricsTable::new(&document.fonts);
    document
        .pages
        .par_iter()
        .enumerate()
        .map(|(page_index, page)| {
            let clusters = lines::cluster_page(page, &metrics, params);
            paragraphs::group_page(clusters, page_index, mode, params)
        })
        .collect()
}
