//! Image editing: bounding-box transforms and reset-to-original.
//!
//! Images are only ever moved and resized; their payloads are opaque. Both
//! operations address an image by id within a page and are no-ops when the
//! id does not resolve, so stale UI events never corrupt state.

use crate::model::{ImageBox, ImageElement};

/// Box changes smaller than this are treated as no-ops.
const BOX_EPSILON: f64 = 1e-4;

/// Move/resize an image to a new canonical box.
///
/// All redundant box fields are rewritten consistently, and the affine
/// placement transform (the image's own, or its frozen original's when the
/// current one was dropped) is rebuilt to match the new box while keeping
/// the sign of each scale component, so mirrored images stay mirrored.
/// Returns `true` when the image was actually changed.
pub fn transform_image(
    images: &mut [Vec<ImageElement>],
    original_images: &[Vec<ImageElement>],
    page_index: usize,
    image_id: &str,
    next: ImageBox,
) -> bool {
    let Some(page) = images.get_mut(page_index) else {
        return false;
    };
    let Some(image) = page.iter_mut().find(|i| i.id == image_id) else {
        log::debug!("transform_image: id {image_id} not on page {page_index}");
        return false;
    };

    if next.approx_eq(&image.canonical_box(), BOX_EPSILON) {
        return false;
    }

    let template = image.transform.or_else(|| {
        original_images
            .get(page_index)
            .and_then(|p| p.iter().find(|i| i.id == image_id))
            .and_then(|i| i.transform)
    });
    if let Some(m) = template {
        image.transform = Some(rebuild_transform(&m, &next));
    }
    image.apply_box(next);
    true
}

/// Replace an image with a clone of its frozen original.
///
/// No-op when no original with that id is recorded. Returns `true` when
/// the image was restored.
pub fn reset_image(
    images: &mut [Vec<ImageElement>],
    original_images: &[Vec<ImageElement>],
    page_index: usize,
    image_id: &str,
) -> bool {
    let Some(original) = original_images
        .get(page_index)
        .and_then(|p| p.iter().find(|i| i.id == image_id))
    else {
        return false;
    };
    let Some(slot) = images
        .get_mut(page_index)
        .and_then(|p| p.iter_mut().find(|i| i.id == image_id))
    else {
        return false;
    };
    *slot = original.clone();
    true
}

/// Rewrite a placement transform's scale and translation for a new box,
/// preserving each scale component's sign and the skew components. A
/// negative vertical scale draws downward from its origin, so the vertical
/// translation moves to the top edge in that case.
fn rebuild_transform(m: &[f64; 6], b: &ImageBox) -> [f64; 6] {
    let sx = if m[0] < 0.0 { -1.0 } else { 1.0 };
    let sy = if m[3] < 0.0 { -1.0 } else { 1.0 };
    let f = if sy < 0.0 { b.top() } else { b.bottom };
    [b.width * sx, m[1], m[2], b.height * sy, b.left, f]
}
