//! Document-level types.

use super::Page;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// A page-based document model as produced by the conversion service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Opaque document metadata blob, preserved verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,

    /// Opaque XMP metadata blob, preserved verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xmp_metadata: Option<Value>,

    /// Font descriptors referenced by text runs.
    #[serde(default)]
    pub fonts: Vec<Font>,

    /// Pages in document order.
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Parse a document model from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a document model from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Serialize the document model to compact JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize the document model to pretty-printed JSON.
    pub fn to_json_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the document model to a JSON file.
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_json_string()?)?;
        Ok(())
    }
}

/// A font descriptor with design-space vertical metrics.
///
/// Immutable once loaded; defaulting of missing metrics happens in the
/// font metrics table, not on the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Font {
    /// Primary font identifier referenced by `TextRun::font_id`.
    pub id: String,

    /// Secondary identifier some producers emit alongside the primary one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    /// Design units per em square.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units_per_em: Option<f64>,

    /// Ascent in font units (above the baseline).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ascent: Option<f64>,

    /// Descent in font units (below the baseline, negative).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descent: Option<f64>,
}

impl Font {
    /// Create a font descriptor with just an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            uid: None,
            units_per_em: None,
            ascent: None,
            descent: None,
        }
    }
}
