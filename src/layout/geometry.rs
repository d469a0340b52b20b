//! Per-run geometry estimation.
//!
//! Runs frequently arrive without explicit width or height; this module
//! derives a usable bounding box from font metrics, spacing hints, and the
//! baseline origin, with a generic fallback when even the font is unknown.

use super::metrics::FontMetricsTable;
use crate::model::{BBox, TextRun};

/// Estimated geometry for a single run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunGeometry {
    /// Baseline origin X (text-matrix e, or explicit x).
    pub baseline_x: f64,
    /// Baseline Y (text-matrix f, or explicit y).
    pub baseline: f64,
    pub width: f64,
    pub height: f64,
    /// Bounding box split around the baseline by the ascent/descent ratio.
    /// Y grows toward `bottom` in this convention.
    pub bbox: BBox,
}

impl RunGeometry {
    /// Estimate a run's geometry, preferring explicit values and falling
    /// back to metric-derived estimates.
    pub fn estimate(run: &TextRun, metrics: &FontMetricsTable) -> Self {
        let baseline_x = run.baseline_x();
        let baseline = run.baseline_y();

        let m = metrics.get(&run.font_id);
        let width = estimate_width(run, metrics);

        let height = match run.height {
            Some(h) if h > 0.0 => h,
            _ => ((m.total_units() / m.units_per_em) * run.font_size).max(run.font_size),
        };

        let ascent_ratio = m.ascent_ratio();
        let bbox = BBox {
            left: baseline_x,
            right: baseline_x + width,
            bottom: baseline + height * ascent_ratio,
            top: baseline - height * (1.0 - ascent_ratio),
        };

        Self {
            baseline_x,
            baseline,
            width,
            height,
            bbox,
        }
    }

    /// Right edge of the run.
    pub fn right(&self) -> f64 {
        self.baseline_x + self.width
    }
}

fn estimate_width(run: &TextRun, metrics: &FontMetricsTable) -> f64 {
    if let Some(w) = run.width {
        if w > 0.0 {
            return w;
        }
    }

    // Spacing-only runs (empty visible text) carry their advance as a hint.
    if run.visible_text().is_empty() {
        if let Some(hint) = run.spacing_hint() {
            return hint;
        }
        return 0.0;
    }

    let glyph_count = run.glyph_count();
    if glyph_count == 0 {
        return 0.0;
    }

    if metrics.contains(&run.font_id) {
        let m = metrics.get(&run.font_id);
        let total = m.total_units().max(0.8 * m.units_per_em);
        let advance_units = (0.5 * m.units_per_em).max(total / glyph_count as f64);
        advance_units / m.units_per_em * run.font_size * glyph_count as f64
    } else {
        run.font_size * glyph_count as f64 * 0.5
    }
}

/// Rotation angle of a run in degrees, derived from its text matrix as
/// `atan2(b, a)` and normalized to `(-180, 180]`. Angles below
/// `epsilon_deg` in magnitude are treated as no rotation.
pub fn run_rotation(run: &TextRun, epsilon_deg: f64) -> Option<f64> {
    let m = run.text_matrix?;
    let mut angle = m[1].atan2(m[0]).to_degrees();
    if angle <= -180.0 {
        angle += 360.0;
    }
    if angle.abs() < epsilon_deg {
        None
    } else {
        Some(angle)
    }
}

/// Circular mean of a set of angles in degrees: sum of the unit vectors at
/// each angle, then `atan2` of the resultant. Returns `None` when the set
/// is empty or the resultant magnitude is negligible (opposing rotations
/// cancel out).
pub fn circular_mean_degrees(angles: impl IntoIterator<Item = f64>) -> Option<f64> {
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut count = 0usize;
    for deg in angles {
        let rad = deg.to_radians();
        sum_x += rad.cos();
        sum_y += rad.sin();
        count += 1;
    }
    if count == 0 {
        return None;
    }
    let magnitude = (sum_x * sum_x + sum_y * sum_y).sqrt();
    if magnitude < 1e-6 {
        return None;
    }
    let mut angle = sum_y.atan2(sum_x).to_degrees();
    if angle <= -180.0 {
        angle += 360.0;
    }
    Some(angle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Font;

    fn table() -> FontMetricsTable {
        FontMetricsTable::new(&[Font::new("F1")])
    }

    fn rotated_matrix(deg: f64, x: f64, y: f64) -> [f64; 6] {
        let r = deg.to_radians();
        [r.cos(), r.sin(), -r.sin(), r.cos(), x, y]
    }

    #[test]
    fn test_explicit_geometry_wins() {
        let run = TextRun {
            width: Some(42.0),
            height: Some(15.0),
            ..TextRun::new("Hello", 10.0, 20.0, "F1", 12.0)
        };
        let g = RunGeometry::estimate(&run, &table());
        assert_eq!(g.width, 42.0);
        assert_eq!(g.height, 15.0);
        assert_eq!(g.baseline_x, 10.0);
        assert_eq!(g.baseline, 20.0);
    }

    #[test]
    fn test_metric_width_estimate() {
        // Default metrics: advance = max(500, 1000/5)/1000 * 12 * 5 = 30.
        let run = TextRun::new("Hello", 0.0, 0.0, "F1", 12.0);
        let g = RunGeometry::estimate(&run, &table());
        assert!((g.width - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_font_generic_width() {
        let run = TextRun::new("Hello", 0.0, 0.0, "missing", 12.0);
        let g = RunGeometry::estimate(&run, &table());
        assert!((g.width - 12.0 * 5.0 * 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_text_uses_spacing_hint() {
        let run = TextRun {
            space_width: Some(4.5),
            ..TextRun::new("", 0.0, 0.0, "F1", 12.0)
        };
        let g = RunGeometry::estimate(&run, &table());
        assert_eq!(g.width, 4.5);
    }

    #[test]
    fn test_height_clamped_to_font_size() {
        let font = Font {
            units_per_em: Some(1000.0),
            ascent: Some(500.0),
            descent: Some(-100.0),
            ..Font::new("F2")
        };
        let metrics = FontMetricsTable::new(std::slice::from_ref(&font));
        let run = TextRun::new("x", 0.0, 0.0, "F2", 12.0);
        let g = RunGeometry::estimate(&run, &metrics);
        // 600/1000 * 12 = 7.2 clamps up to the font size.
        assert_eq!(g.height, 12.0);
    }

    #[test]
    fn test_bbox_split_around_baseline() {
        let run = TextRun {
            height: Some(10.0),
            ..TextRun::new("x", 0.0, 100.0, "F1", 10.0)
        };
        let g = RunGeometry::estimate(&run, &table());
        assert!((g.bbox.bottom - 108.0).abs() < 1e-9);
        assert!((g.bbox.top - 98.0).abs() < 1e-9);
    }

    #[test]
    fn test_run_rotation_threshold() {
        let mut run = TextRun::new("x", 0.0, 0.0, "F1", 12.0);
        run.text_matrix = Some(rotated_matrix(0.2, 0.0, 0.0));
        assert_eq!(run_rotation(&run, 0.5), None);

        run.text_matrix = Some(rotated_matrix(10.0, 0.0, 0.0));
        let angle = run_rotation(&run, 0.5).unwrap();
        assert!((angle - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_circular_mean() {
        let mean = circular_mean_degrees([10.0, 12.0]).unwrap();
        assert!((mean - 11.0).abs() < 1e-6);

        // Wraparound: mean of 179 and -179 is 180, not 0.
        let mean = circular_mean_degrees([179.0, -179.0]).unwrap();
        assert!((mean.abs() - 180.0).abs() < 1e-6);

        assert_eq!(circular_mean_degrees([]), None);
        assert_eq!(circular_mean_degrees([90.0, -90.0]), None);
    }
}
