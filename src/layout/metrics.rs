//! Per-font vertical metrics with safe defaults.

use crate::model::Font;
use std::collections::HashMap;

/// Default units per em when the descriptor is missing or zero.
const DEFAULT_UNITS_PER_EM: f64 = 1000.0;

/// Default ascent/descent split of the em square.
const DEFAULT_ASCENT_RATIO: f64 = 0.8;
const DEFAULT_DESCENT_RATIO: f64 = 0.2;

/// Vertical metrics for one font, fully defaulted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    /// Design units per em square, always > 0.
    pub units_per_em: f64,
    /// Ascent in font units (above the baseline, positive).
    pub ascent: f64,
    /// Descent in font units (below the baseline, negative).
    pub descent: f64,
}

impl FontMetrics {
    /// Generic 80/20 metric used when a lookup misses entirely.
    pub fn fallback() -> Self {
        Self {
            units_per_em: DEFAULT_UNITS_PER_EM,
            ascent: DEFAULT_ASCENT_RATIO * DEFAULT_UNITS_PER_EM,
            descent: -DEFAULT_DESCENT_RATIO * DEFAULT_UNITS_PER_EM,
        }
    }

    fn from_font(font: &Font) -> Self {
        let units_per_em = match font.units_per_em {
            Some(u) if u > 0.0 => u,
            _ => DEFAULT_UNITS_PER_EM,
        };
        let ascent = font
            .ascent
            .unwrap_or(DEFAULT_ASCENT_RATIO * units_per_em);
        let descent = font
            .descent
            .unwrap_or(-DEFAULT_DESCENT_RATIO * units_per_em);
        Self {
            units_per_em,
            ascent,
            descent,
        }
    }

    /// Total vertical extent in font units (ascent plus |descent|).
    pub fn total_units(&self) -> f64 {
        self.ascent - self.descent
    }

    /// Fraction of the vertical extent above the baseline.
    pub fn ascent_ratio(&self) -> f64 {
        let total = self.total_units();
        if total > 0.0 {
            self.ascent / total
        } else {
            DEFAULT_ASCENT_RATIO
        }
    }

    /// Fraction of the vertical extent below the baseline.
    pub fn descent_ratio(&self) -> f64 {
        1.0 - self.ascent_ratio()
    }
}

/// Map from font identifier (primary and secondary) to defaulted metrics.
///
/// Lookups are total: a miss yields the generic 80/20 metric, so every
/// consuming function stays free of missing-data branches.
#[derive(Debug, Clone, Default)]
pub struct FontMetricsTable {
    by_id: HashMap<String, FontMetrics>,
}

impl FontMetricsTable {
    /// Build the table from a document's font list. Both the primary id
    /// and the secondary uid key the same metrics.
    pub fn new(fonts: &[Font]) -> Self {
        let mut by_id = HashMap::with_capacity(fonts.len() * 2);
        for font in fonts {
            let metrics = FontMetrics::from_font(font);
            by_id.insert(font.id.clone(), metrics);
            if let Some(uid) = &font.uid {
                by_id.insert(uid.clone(), metrics);
            }
        }
        Self { by_id }
    }

    /// Metrics for a font id, falling back to the generic 80/20 metric.
    pub fn get(&self, font_id: &str) -> FontMetrics {
        self.by_id
            .get(font_id)
            .copied()
            .unwrap_or_else(FontMetrics::fallback)
    }

    /// Whether the table has an entry for this id (without the fallback).
    pub fn contains(&self, font_id: &str) -> bool {
        self.by_id.contains_key(font_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let font = Font::new("F1");
        let table = FontMetricsTable::new(std::slice::from_ref(&font));
        let m = table.get("F1");
        assert_eq!(m.units_per_em, 1000.0);
        assert_eq!(m.ascent, 800.0);
        assert_eq!(m.descent, -200.0);
        assert_eq!(m.total_units(), 1000.0);
        assert!((m.ascent_ratio() - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_zero_units_per_em_defaults() {
        let font = Font {
            units_per_em: Some(0.0),
            ..Font::new("F1")
        };
        let table = FontMetricsTable::new(std::slice::from_ref(&font));
        assert_eq!(table.get("F1").units_per_em, 1000.0);
    }

    #[test]
    fn test_explicit_metrics_kept() {
        let font = Font {
            units_per_em: Some(2048.0),
            ascent: Some(1638.0),
            descent: Some(-410.0),
            ..Font::new("F1")
        };
        let table = FontMetricsTable::new(std::slice::from_ref(&font));
        let m = table.get("F1");
        assert_eq!(m.units_per_em, 2048.0);
        assert_eq!(m.total_units(), 2048.0);
    }

    #[test]
    fn test_uid_aliases_same_metrics() {
        let font = Font {
            uid: Some("UID-1".to_string()),
            units_per_em: Some(2048.0),
            ..Font::new("F1")
        };
        let table = FontMetricsTable::new(std::slice::from_ref(&font));
        assert_eq!(table.get("F1"), table.get("UID-1"));
        assert!(table.contains("UID-1"));
    }

    #[test]
    fn test_miss_yields_fallback() {
        let table = FontMetricsTable::new(&[]);
        assert!(!table.contains("nope"));
        assert_eq!(table.get("nope"), FontMetrics::fallback());
    }
}
