//! Per-page dirty tracking against the frozen original snapshot.
//!
//! A page is dirty when any of its groups carries an edited text or when
//! its current image list drifted from the original beyond a small
//! floating-point tolerance. The flags let an exporter ship only changed
//! pages.

use crate::model::{ImageElement, TextGroup};
use rayon::prelude::*;

/// Geometry comparisons use this tolerance; payload identity, format, and
/// z-order compare exactly.
const GEOMETRY_TOLERANCE: f64 = 0.25;

/// Compute one dirty flag per page.
///
/// Pages are independent, so the reduction runs in parallel and collects
/// back in page order.
pub fn get_dirty_pages(
    groups: &[Vec<TextGroup>],
    images: &[Vec<ImageElement>],
    original_images: &[Vec<ImageElement>],
) -> Vec<bool> {
    groups
        .par_iter()
        .enumerate()
        .map(|(page_index, page_groups)| {
            page_groups.iter().any(TextGroup::is_edited)
                || page_images_differ(
                    images.get(page_index).map(Vec::as_slice).unwrap_or(&[]),
                    original_images
                        .get(page_index)
                        .map(Vec::as_slice)
                        .unwrap_or(&[]),
                )
        })
        .collect()
}

/// Element-wise image comparison by position. Images are never reordered
/// by the editing core, so index alignment is stable; a length mismatch
/// means something was added or removed and counts as dirty.
pub(crate) fn page_images_differ(
    current: &[ImageElement],
    original: &[ImageElement],
) -> bool {
    if current.len() != original.len() {
        return true;
    }
    current
        .iter()
        .zip(original)
        .any(|(c, o)| image_differs(c, o))
}

fn image_differs(current: &ImageElement, original: &ImageElement) -> bool {
    let boxes = [
        (current.x, original.x),
        (current.y, original.y),
        (current.width, original.width),
        (current.height, original.height),
        (current.left, original.left),
        (current.right, original.right),
        (current.top, original.top),
        (current.bottom, original.bottom),
    ];
    if boxes.iter().any(|(c, o)| !opt_approx_eq(*c, *o)) {
        return true;
    }

    match (&current.transform, &original.transform) {
        (Some(c), Some(o)) => {
            if c.iter()
                .zip(o)
                .any(|(a, b)| (a - b).abs() > GEOMETRY_TOLERANCE)
            {
                return true;
            }
        }
        (None, None) => {}
        _ => return true,
    }

    current.data != original.data
        || current.format != original.format
        || current.z_order != original.z_order
}

fn opt_approx_eq(a: Option<f64>, b: Option<f64>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => (a - b).abs() <= GEOMETRY_TOLERANCE,
        (None, None) => true,
        _ => false,
    }
}
