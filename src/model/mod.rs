//! Document model types.
//!
//! The model mirrors the JSON produced by the external conversion service:
//! a document is an ordered list of pages, each carrying positioned glyph
//! runs and image elements. Page order is stable and is the sole ordering
//! key used everywhere else in the crate.

mod document;
mod group;
mod page;

pub use document::{Document, Font};
pub use group::{BBox, GroupId, GroupingMode, Point, TextGroup};
pub use page::{FillColor, ImageBox, ImageElement, Page, TextRun};
