//! # glyphflow
//!
//! Text-layout reconstruction for glyph-level document models.
//!
//! This library takes the positioned glyph runs of a page-based document,
//! clusters them into human-editable line and paragraph groups, and folds
//! edited text and images back into low-level runs that still render in
//! place.
//!
//! ## Quick Start
//!
//! ```no_run
//! use glyphflow::{EditSession, GroupingMode};
//!
//! fn main() -> glyphflow::Result<()> {
//!     let document = glyphflow::model::Document::from_json_file("document.json")?;
//!
//!     let mut session = EditSession::new(document, GroupingMode::Auto);
//!     if let Some(text) = session.group_text(0, 0) {
//!         println!("first group: {text}");
//!     }
//!     session.set_group_text(0, 0, "Edited text");
//!
//!     let rebuilt = session.export(false);
//!     rebuilt.to_json_file("edited.json")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Layout analysis**: font-metric geometry estimation, baseline line
//!   clustering, gap-based word clustering, paragraph merging
//! - **Text synthesis**: whitespace reconstruction from run geometry
//! - **Round-trip rebuild**: edited groups back into positioned runs
//! - **Image editing**: box transforms with mirrored-placement support
//! - **Dirty tracking**: per-page change flags for incremental export
//!
//! Pages are independent throughout; multi-page work fans out with Rayon.

pub mod dirty;
pub mod error;
pub mod images;
pub mod layout;
pub mod model;
pub mod rebuild;

// Re-export commonly used types
pub use dirty::get_dirty_pages;
pub use error::{Error, Result};
pub use images::{reset_image, transform_image};
pub use layout::{
    build_group_text, group_document_text, group_document_text_with_params, FontMetrics,
    FontMetricsTable, LayoutParams,
};
pub use model::{
    BBox, Document, FillColor, Font, GroupId, GroupingMode, ImageBox, ImageElement, Page, Point,
    TextGroup, TextRun,
};
pub use rebuild::{rebuild_group_runs, restore_glyph_elements};

/// A stateful editing session over one loaded document.
///
/// The session owns the only mutable state in the system: the current
/// groups and the current image lists. The document and the original image
/// snapshot are frozen at construction and retained unchanged for dirty
/// tracking and reset.
#[derive(Debug, Clone)]
pub struct EditSession {
    document: Document,
    mode: GroupingMode,
    params: LayoutParams,
    groups: Vec<Vec<TextGroup>>,
    images: Vec<Vec<ImageElement>>,
    original_images: Vec<Vec<ImageElement>>,
}

impl EditSession {
    /// Open a session, grouping the document's text under the given mode.
    pub fn new(document: Document, mode: GroupingMode) -> Self {
        Self::with_params(document, mode, LayoutParams::default())
    }

    /// Open a session with explicit layout parameters.
    pub fn with_params(document: Document, mode: GroupingMode, params: LayoutParams) -> Self {
        let groups = layout::group_document_text_with_params(&document, mode, &params);
        let images: Vec<Vec<ImageElement>> =
            document.pages.iter().map(|p| p.images.clone()).collect();
        Self {
            original_images: images.clone(),
            document,
            mode,
            params,
            groups,
            images,
        }
    }

    /// The frozen document this session was opened on.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Current grouping mode.
    pub fn mode(&self) -> GroupingMode {
        self.mode
    }

    /// Regroup under a new mode. Discards pending text edits, since the
    /// groups they lived on no longer exist.
    pub fn set_mode(&mut self, mode: GroupingMode) {
        self.mode = mode;
        self.groups =
            layout::group_document_text_with_params(&self.document, mode, &self.params);
    }

    /// Current groups, one list per page.
    pub fn groups(&self) -> &[Vec<TextGroup>] {
        &self.groups
    }

    /// Mutable access to the current groups, for hosts that edit in bulk.
    pub fn groups_mut(&mut self) -> &mut [Vec<TextGroup>] {
        &mut self.groups
    }

    /// Current text of a group, if it exists.
    pub fn group_text(&self, page_index: usize, seq: usize) -> Option<&str> {
        self.groups
            .get(page_index)
            .and_then(|p| p.get(seq))
            .map(|g| g.text.as_str())
    }

    /// Replace a group's text. Returns `false` when the group does not
    /// exist.
    pub fn set_group_text(&mut self, page_index: usize, seq: usize, text: impl Into<String>) -> bool {
        match self
            .groups
            .get_mut(page_index)
            .and_then(|p| p.get_mut(seq))
        {
            Some(group) => {
                group.text = text.into();
                true
            }
            None => false,
        }
    }

    /// Current images, one list per page.
    pub fn images(&self) -> &[Vec<ImageElement>] {
        &self.images
    }

    /// Install lazily loaded images for one page.
    ///
    /// The loaded list becomes both the current state and the original
    /// snapshot for that page, so a lazy load alone never marks the page
    /// dirty. Text groups are unaffected.
    pub fn set_page_images(&mut self, page_index: usize, page_images: Vec<ImageElement>) {
        if page_index >= self.images.len() {
            return;
        }
        self.images[page_index] = page_images.clone();
        self.original_images[page_index] = page_images;
    }

    /// Move/resize an image. See [`transform_image`].
    pub fn transform_image(&mut self, page_index: usize, image_id: &str, next: ImageBox) -> bool {
        images::transform_image(
            &mut self.images,
            &self.original_images,
            page_index,
            image_id,
            next,
        )
    }

    /// Restore an image to its original box and transform. See
    /// [`reset_image`].
    pub fn reset_image(&mut self, page_index: usize, image_id: &str) -> bool {
        images::reset_image(&mut self.images, &self.original_images, page_index, image_id)
    }

    /// One dirty flag per page.
    pub fn dirty_pages(&self) -> Vec<bool> {
        dirty::get_dirty_pages(&self.groups, &self.images, &self.original_images)
    }

    /// Fold the session's edits back into a fresh document.
    pub fn export(&self, force_single_element: bool) -> Document {
        rebuild::restore_glyph_elements(
            &self.document,
            &self.groups,
            &self.images,
            &self.original_images,
            force_single_element,
        )
    }
}
