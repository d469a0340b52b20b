//! Derived, editable text groups.
//!
//! A group is the human-meaningful unit (word/line/paragraph cluster)
//! synthesized from one or more runs; it is what the editing surface
//! actually mutates. Groups are recomputed deterministically from the
//! document whenever it loads or the grouping policy changes.

use super::page::{FillColor, TextRun};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Grouping policy for turning a page's runs into editable groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupingMode {
    /// Keep line-level groups as produced by the line clusterer.
    SingleLine,
    /// Always merge consecutive line groups into paragraphs.
    Paragraph,
    /// Decide per page whether the content is paragraph-heavy.
    #[default]
    Auto,
}

impl FromStr for GroupingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single_line" | "single-line" | "line" => Ok(Self::SingleLine),
            "paragraph" => Ok(Self::Paragraph),
            "auto" => Ok(Self::Auto),
            other => Err(format!("unknown grouping mode: {other}")),
        }
    }
}

impl fmt::Display for GroupingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SingleLine => write!(f, "single_line"),
            Self::Paragraph => write!(f, "paragraph"),
            Self::Auto => write!(f, "auto"),
        }
    }
}

/// Group identifier scoped to `(page_index, seq)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupId {
    /// Zero-based page index.
    pub page_index: usize,
    /// Sequence number of the group on its page.
    pub seq: usize,
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.page_index, self.seq)
    }
}

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A merged bounding box in the run coordinate convention (Y grows toward
/// `bottom`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl BBox {
    /// A box that is the identity for `union`.
    pub fn empty() -> Self {
        Self {
            left: f64::INFINITY,
            right: f64::NEG_INFINITY,
            top: f64::INFINITY,
            bottom: f64::NEG_INFINITY,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.left > self.right
    }

    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            left: self.left.min(other.left),
            right: self.right.max(other.right),
            top: self.top.min(other.top),
            bottom: self.bottom.max(other.bottom),
        }
    }
}

/// An editable text group derived from one or more runs.
///
/// `original_runs` and `original_text` are frozen at construction time;
/// `text` is the only field the editing surface mutates, and diffing always
/// compares the two.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextGroup {
    /// Identifier scoped to `(page_index, seq)`.
    pub id: GroupId,

    /// The runs this group was built from. Frozen baseline; never mutated.
    pub original_runs: Vec<TextRun>,

    /// Current (possibly edited) text.
    pub text: String,

    /// Text as synthesized at construction time.
    pub original_text: String,

    /// Dominant font identifier (taken from the first run).
    pub font_id: String,

    /// Dominant font size (taken from the first run).
    pub font_size: f64,

    /// Dominant fill color (taken from the first run).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<FillColor>,

    /// Circular-mean rotation in degrees, when the members carry one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,

    /// Baseline origin of the first run, set when the group has rotation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<Point>,

    /// Merged bounding box of the member runs.
    pub bbox: BBox,

    /// Original run count per line; `Some` only for paragraph groups.
    /// Needed to split a paragraph back into its template lines on rebuild.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_run_counts: Option<Vec<usize>>,

    /// Average non-zero inter-line baseline spacing of a paragraph group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_spacing: Option<f64>,
}

impl TextGroup {
    /// Whether the group's text was edited.
    pub fn is_edited(&self) -> bool {
        self.text != self.original_text
    }

    /// Whether this group is a merged paragraph with per-line templates.
    pub fn is_paragraph(&self) -> bool {
        self.line_run_counts
            .as_ref()
            .is_some_and(|c| c.len() > 1)
    }
}
