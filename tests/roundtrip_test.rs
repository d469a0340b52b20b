//! Round-trip integration tests: group, edit, rebuild, diff.

use glyphflow::model::{Document, Font, ImageElement, Page, TextRun};
use glyphflow::{
    get_dirty_pages, group_document_text, restore_glyph_elements, EditSession, GroupingMode,
    ImageBox,
};

fn run(text: &str, x: f64, y: f64) -> TextRun {
    TextRun {
        width: Some(text.chars().count() as f64 * 6.0),
        glyph_codes: Some(text.chars().map(|c| c as u32).collect()),
        ..TextRun::new(text, x, y, "F1", 12.0)
    }
}

fn prose_document() -> Document {
    let mut doc = Document::new();
    doc.fonts.push(Font::new("F1"));

    let mut page0 = Page::new(612.0, 792.0);
    page0.texts.push(run("The quick brown fox jumps over the lazy dog near", 50.0, 700.0));
    page0.texts.push(run("the river bank while the sun sets slowly behind", 50.0, 686.0));
    page0.texts.push(run("the distant hills and the evening grows quiet", 50.0, 672.0));
    page0.images.push(ImageElement::new("img-0", 300.0, 100.0, 200.0, 150.0));
    doc.pages.push(page0);

    let mut page1 = Page::new(612.0, 792.0);
    page1.texts.push(run("Standalone caption", 50.0, 400.0));
    doc.pages.push(page1);

    doc
}

#[test]
fn test_no_edit_round_trip_is_identity() {
    let doc = prose_document();
    let images: Vec<Vec<ImageElement>> = doc.pages.iter().map(|p| p.images.clone()).collect();

    for mode in [
        GroupingMode::SingleLine,
        GroupingMode::Paragraph,
        GroupingMode::Auto,
    ] {
        let groups = group_document_text(&doc, mode);
        assert!(groups
            .iter()
            .flatten()
            .all(|g| g.text == g.original_text));

        let rebuilt = restore_glyph_elements(&doc, &groups, &images, &images, false);
        for (page, original) in rebuilt.pages.iter().zip(&doc.pages) {
            assert_eq!(page.texts, original.texts, "mode {mode}");
        }
    }
}

#[test]
fn test_glyph_preserving_edit_keeps_run_transforms() {
    let doc = prose_document();
    let mut groups = group_document_text(&doc, GroupingMode::SingleLine);

    let original_positions: Vec<(f64, f64)> = groups[1][0]
        .original_runs
        .iter()
        .map(|r| (r.baseline_x(), r.baseline_y()))
        .collect();

    // Same glyph count as "Standalone caption".
    let replacement = "Different wording!";
    assert_eq!(
        replacement.chars().count(),
        groups[1][0].original_text.chars().count()
    );
    groups[1][0].text = replacement.to_string();

    let rebuilt = restore_glyph_elements(&doc, &groups, &[], &[], false);
    let page = &rebuilt.pages[1];
    assert_eq!(page.texts.len(), original_positions.len());
    for run in &page.texts {
        let pos = (run.baseline_x(), run.baseline_y());
        assert!(original_positions.contains(&pos));
        assert_eq!(run.font_id, "F1");
        assert_eq!(run.font_size, 12.0);
    }
    let joined: String = page.texts.iter().map(|r| r.visible_text()).collect();
    assert_eq!(joined, replacement);
}

#[test]
fn test_changed_length_edit_falls_back_to_single_run() {
    let doc = prose_document();
    let mut groups = group_document_text(&doc, GroupingMode::SingleLine);
    groups[1][0].text = "Short".to_string();

    let rebuilt = restore_glyph_elements(&doc, &groups, &[], &[], false);
    let page = &rebuilt.pages[1];
    assert_eq!(page.texts.len(), 1);
    assert_eq!(page.texts[0].visible_text(), "Short");
    assert!(page.texts[0].glyph_codes.is_none());
    // Fallback run inherits the first original run's placement.
    assert_eq!(page.texts[0].baseline_x(), 50.0);
    assert_eq!(page.texts[0].baseline_y(), 400.0);
}

#[test]
fn test_paragraph_edit_preserves_line_layout() {
    let doc = prose_document();
    let mut groups = group_document_text(&doc, GroupingMode::Paragraph);
    assert_eq!(groups[0].len(), 1);

    let original_baselines: Vec<f64> = groups[0][0]
        .original_runs
        .iter()
        .map(TextRun::baseline_y)
        .collect();

    // Keep the line structure; change one word.
    let edited = groups[0][0].text.replacen("quick", "agile", 1);
    groups[0][0].text = edited;

    let rebuilt = restore_glyph_elements(&doc, &groups, &[], &[], false);
    let baselines: Vec<f64> = rebuilt.pages[0].texts.iter().map(TextRun::baseline_y).collect();
    assert_eq!(baselines, original_baselines);
    assert!(rebuilt.pages[0].texts[0].visible_text().contains("agile"));
}

#[test]
fn test_dirty_flags_isolate_edited_page() {
    let doc = prose_document();
    let images: Vec<Vec<ImageElement>> = doc.pages.iter().map(|p| p.images.clone()).collect();
    let mut groups = group_document_text(&doc, GroupingMode::Auto);

    assert_eq!(get_dirty_pages(&groups, &images, &images), vec![false, false]);

    // Flip exactly one character on page 1.
    let mut text = groups[1][0].text.clone();
    text.replace_range(0..1, "s");
    groups[1][0].text = text;
    assert_eq!(get_dirty_pages(&groups, &images, &images), vec![false, true]);
}

#[test]
fn test_image_transform_then_reset_restores_original() {
    let doc = prose_document();
    let mut session = EditSession::new(doc, GroupingMode::Auto);
    let before = session.images()[0][0].clone();

    assert!(session.transform_image(
        0,
        "img-0",
        ImageBox {
            left: 10.0,
            bottom: 10.0,
            width: 80.0,
            height: 60.0,
        },
    ));
    assert_ne!(session.images()[0][0], before);
    assert_eq!(session.dirty_pages()[0], true);

    assert!(session.reset_image(0, "img-0"));
    let after = &session.images()[0][0];
    let a = after.canonical_box();
    let b = before.canonical_box();
    assert!(a.approx_eq(&b, 1e-4));
    assert_eq!(after.transform, before.transform);
    assert_eq!(session.dirty_pages()[0], false);
}

#[test]
fn test_spacing_runs_survive_round_trip() {
    let mut doc = prose_document();
    let mut spacer = TextRun::new("", 50.0, 500.0, "F1", 12.0);
    spacer.text = None;
    spacer.space_width = Some(4.0);
    doc.pages[1].texts.insert(0, spacer);

    let groups = group_document_text(&doc, GroupingMode::Auto);
    let rebuilt = restore_glyph_elements(&doc, &groups, &[], &[], false);
    assert_eq!(rebuilt.pages[1].texts.len(), doc.pages[1].texts.len());
    assert_eq!(rebuilt.pages[1].texts, doc.pages[1].texts);
}

#[test]
fn test_export_survives_json_round_trip() {
    let doc = prose_document();
    let mut session = EditSession::new(doc, GroupingMode::Auto);
    session.set_group_text(1, 0, "Rewritten caption text");
    let exported = session.export(false);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("edited.json");
    exported.to_json_file(&path).unwrap();

    let reloaded = Document::from_json_file(&path).unwrap();
    assert_eq!(reloaded.page_count(), exported.page_count());
    let joined: String = reloaded.pages[1]
        .texts
        .iter()
        .map(|r| r.visible_text())
        .collect();
    assert_eq!(joined, "Rewritten caption text");
}
