//! Page-level types: positioned text runs and image elements.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default page size (US Letter, 72 dpi points).
pub const DEFAULT_PAGE_WIDTH: f64 = 612.0;
pub const DEFAULT_PAGE_HEIGHT: f64 = 792.0;

/// A single page in the document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Page width in points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,

    /// Page height in points.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    /// Positioned glyph runs in content order.
    #[serde(default)]
    pub texts: Vec<TextRun>,

    /// Image elements in content order.
    #[serde(default)]
    pub images: Vec<ImageElement>,

    /// Opaque content-stream passthrough data. Preserved verbatim on export
    /// unless a text or image edit on this page invalidates the stream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_stream: Option<Value>,
}

impl Page {
    /// Create a new empty page with the given dimensions.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Default::default()
        }
    }

    /// Page width, defaulting to US Letter when absent.
    pub fn width_or_default(&self) -> f64 {
        self.width.unwrap_or(DEFAULT_PAGE_WIDTH)
    }

    /// Page height, defaulting to US Letter when absent.
    pub fn height_or_default(&self) -> f64 {
        self.height.unwrap_or(DEFAULT_PAGE_HEIGHT)
    }

    /// Check if the page has no text or image content.
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty() && self.images.is_empty()
    }
}

/// The smallest positioned unit of text: a string plus its placement,
/// font, and size. Runs are atomic; editing happens at the group level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRun {
    /// Text content. May be empty (spacing-only runs) or absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Affine text matrix `[a, b, c, d, e, f]` mapping glyph space to page
    /// space; `(e, f)` is the baseline origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_matrix: Option<[f64; 6]>,

    /// Plain baseline X when no text matrix is present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,

    /// Plain baseline Y when no text matrix is present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,

    /// Identifier of the font this run is set in.
    #[serde(default)]
    pub font_id: String,

    /// Nominal font size in points.
    #[serde(default)]
    pub font_size: f64,

    /// Explicit run width, when the producer emitted one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,

    /// Explicit run height, when the producer emitted one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    /// Fill color of the glyphs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<FillColor>,

    /// Width of the space glyph, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space_width: Option<f64>,

    /// Word spacing hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_spacing: Option<f64>,

    /// Character spacing hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub char_spacing: Option<f64>,

    /// Original glyph codes. Only meaningful while the run text is
    /// unchanged; cleared by the rebuilder on any text edit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glyph_codes: Option<Vec<u32>>,
}

impl Default for TextRun {
    fn default() -> Self {
        Self {
            text: None,
            text_matrix: None,
            x: None,
            y: None,
            font_id: String::new(),
            font_size: 0.0,
            width: None,
            height: None,
            fill_color: None,
            space_width: None,
            word_spacing: None,
            char_spacing: None,
            glyph_codes: None,
        }
    }
}

impl TextRun {
    /// Create a run with text, baseline position, font id, and size.
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_id: impl Into<String>,
        font_size: f64,
    ) -> Self {
        Self {
            text: Some(text.into()),
            x: Some(x),
            y: Some(y),
            font_id: font_id.into(),
            font_size,
            ..Default::default()
        }
    }

    /// Baseline X: the text-matrix e component, or the explicit x.
    pub fn baseline_x(&self) -> f64 {
        self.text_matrix
            .map(|m| m[4])
            .or(self.x)
            .unwrap_or(0.0)
    }

    /// Baseline Y: the text-matrix f component, or the explicit y.
    pub fn baseline_y(&self) -> f64 {
        self.text_matrix
            .map(|m| m[5])
            .or(self.y)
            .unwrap_or(0.0)
    }

    /// Visible text content ("" when absent).
    pub fn visible_text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// Number of glyph slots in this run. The model text is decoded
    /// Unicode, so chars are the stable proxy for glyph capacity.
    pub fn glyph_count(&self) -> usize {
        self.visible_text().chars().count()
    }

    /// First spacing hint greater than zero, in space/word/char priority.
    pub fn spacing_hint(&self) -> Option<f64> {
        [self.space_width, self.word_spacing, self.char_spacing]
            .into_iter()
            .flatten()
            .find(|v| *v > 0.0)
    }
}

/// Fill color as a color-space tag plus component array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillColor {
    /// Color space tag (e.g. "DeviceRGB", "DeviceGray").
    pub space: String,

    /// Color components in that space.
    pub components: Vec<f64>,
}

/// An image element with a (redundantly encoded) bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageElement {
    /// Stable image identifier within its page.
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,

    /// Affine placement transform `[a, b, c, d, e, f]`. A negative scale
    /// component encodes a mirrored image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<[f64; 6]>,

    /// Raw image payload. Absent when the page's images are loaded lazily.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,

    /// Image format tag (e.g. "png", "jpeg").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Z-order among the page's images.
    #[serde(default)]
    pub z_order: i64,
}

/// Canonical image bounding box: `left/bottom/width/height`, Y-up
/// (`top = bottom + height`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageBox {
    pub left: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

impl ImageBox {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn top(&self) -> f64 {
        self.bottom + self.height
    }

    /// Approximate equality within a tolerance on all four edges.
    pub fn approx_eq(&self, other: &ImageBox, tolerance: f64) -> bool {
        (self.left - other.left).abs() <= tolerance
            && (self.bottom - other.bottom).abs() <= tolerance
            && (self.width - other.width).abs() <= tolerance
            && (self.height - other.height).abs() <= tolerance
    }
}

impl ImageElement {
    /// Create a bare image element with an id and canonical box.
    pub fn new(id: impl Into<String>, left: f64, bottom: f64, width: f64, height: f64) -> Self {
        let mut img = Self {
            id: id.into(),
            x: None,
            y: None,
            width: None,
            height: None,
            left: None,
            right: None,
            top: None,
            bottom: None,
            transform: None,
            data: None,
            format: None,
            z_order: 0,
        };
        img.apply_box(ImageBox {
            left,
            bottom,
            width,
            height,
        });
        img
    }

    /// Reconcile the redundant box fields into the canonical
    /// `left/bottom/width/height` representation. The two encodings are not
    /// assumed consistent; edge fields win over `x/y/width/height`.
    pub fn canonical_box(&self) -> ImageBox {
        let left = self.left.or(self.x).unwrap_or(0.0);
        let bottom = self.bottom.or(self.y).unwrap_or(0.0);
        let width = self
            .width
            .or_else(|| match (self.left, self.right) {
                (Some(l), Some(r)) => Some(r - l),
                _ => None,
            })
            .unwrap_or(0.0);
        let height = self
            .height
            .or_else(|| match (self.bottom, self.top) {
                (Some(b), Some(t)) => Some(t - b),
                _ => None,
            })
            .unwrap_or(0.0);
        ImageBox {
            left,
            bottom,
            width,
            height,
        }
    }

    /// Rewrite every redundant box field consistently from a canonical box,
    /// restoring the `right = left + width`, `top = bottom + height`
    /// invariant.
    pub fn apply_box(&mut self, b: ImageBox) {
        self.left = Some(b.left);
        self.bottom = Some(b.bottom);
        self.width = Some(b.width);
        self.height = Some(b.height);
        self.right = Some(b.right());
        self.top = Some(b.top());
        self.x = Some(b.left);
        self.y = Some(b.bottom);
    }
}
