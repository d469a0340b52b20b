//! Grouping and text-synthesis integration tests.

use glyphflow::model::{Document, Font, Page, TextRun};
use glyphflow::{
    build_group_text, group_document_text, FontMetricsTable, GroupingMode, LayoutParams,
};

fn run(text: &str, x: f64, y: f64) -> TextRun {
    TextRun {
        width: Some(text.chars().count() as f64 * 6.0),
        ..TextRun::new(text, x, y, "F1", 12.0)
    }
}

fn document_with(runs: Vec<TextRun>) -> Document {
    let mut doc = Document::new();
    doc.fonts.push(Font::new("F1"));
    let mut page = Page::new(612.0, 792.0);
    page.texts = runs;
    doc.pages.push(page);
    doc
}

fn prose_lines() -> Vec<TextRun> {
    vec![
        run("The quick brown fox jumps over the lazy dog near", 50.0, 700.0),
        run("the river bank while the sun sets slowly behind", 50.0, 686.0),
        run("the distant hills and the evening grows quiet", 50.0, 672.0),
    ]
}

#[test]
fn test_spacing_heuristic_is_deterministic() {
    let table = FontMetricsTable::new(&[Font::new("F1")]);
    let params = LayoutParams::default();

    let mk = |x: f64| TextRun {
        width: Some(30.0),
        ..TextRun::new(if x == 0.0 { "Hello" } else { "World" }, x, 100.0, "F1", 12.0)
    };

    // Gap 10 exceeds the word threshold of max(1.5, 12 * 0.6) = 7.2.
    let spaced = build_group_text(&[mk(0.0), mk(40.0)], &table, &params);
    assert_eq!(spaced, "Hello World");

    // Gap 1 does not.
    let joined = build_group_text(&[mk(0.0), mk(31.0)], &table, &params);
    assert_eq!(joined, "HelloWorld");
}

#[test]
fn test_paragraph_line_symmetry() {
    let doc = document_with(prose_lines());

    let merged = group_document_text(&doc, GroupingMode::Paragraph);
    assert_eq!(merged[0].len(), 1);
    let paragraph = &merged[0][0];
    let counts = paragraph.line_run_counts.clone().unwrap();

    // Splitting the unedited paragraph text back on newlines recovers the
    // original line boundaries.
    let lines: Vec<&str> = paragraph.text.split('\n').collect();
    assert_eq!(lines.len(), counts.len());

    let split = group_document_text(&doc, GroupingMode::SingleLine);
    assert_eq!(split[0].len(), counts.len());
    for (group, count) in split[0].iter().zip(&counts) {
        assert_eq!(group.original_runs.len(), *count);
    }
    for (group, line) in split[0].iter().zip(&lines) {
        assert_eq!(group.text.as_str(), *line);
    }
}

#[test]
fn test_auto_mode_merges_prose_keeps_sparse() {
    let prose = document_with(prose_lines());
    let merged = group_document_text(&prose, GroupingMode::Auto);
    assert_eq!(merged[0].len(), 1);

    let sparse = document_with(vec![
        run("Name", 50.0, 700.0),
        run("Date", 50.0, 686.0),
        run("Total", 50.0, 672.0),
    ]);
    let kept = group_document_text(&sparse, GroupingMode::Auto);
    assert_eq!(kept[0].len(), 3);
}

#[test]
fn test_rotation_circular_mean_and_threshold() {
    let rotated = |text: &str, deg: f64, x: f64| {
        let r = deg.to_radians();
        TextRun {
            text: Some(text.to_string()),
            text_matrix: Some([r.cos(), r.sin(), -r.sin(), r.cos(), x, 100.0]),
            font_id: "F1".to_string(),
            font_size: 12.0,
            width: Some(24.0),
            ..Default::default()
        }
    };

    let doc = document_with(vec![rotated("ab", 10.0, 0.0), rotated("cd", 12.0, 28.0)]);
    let groups = group_document_text(&doc, GroupingMode::SingleLine);
    assert_eq!(groups[0].len(), 1);
    let rotation = groups[0][0].rotation.unwrap();
    assert!((rotation - 11.0).abs() < 0.1, "rotation {rotation}");
    assert!(groups[0][0].anchor.is_some());

    // Below the 0.5 degree threshold counts as unrotated.
    let flat = document_with(vec![rotated("ab", 0.2, 0.0)]);
    let groups = group_document_text(&flat, GroupingMode::SingleLine);
    assert!(groups[0][0].rotation.is_none());
    assert!(groups[0][0].anchor.is_none());
}

#[test]
fn test_group_ids_are_page_scoped_and_sequential() {
    let mut doc = document_with(prose_lines());
    let mut page = Page::new(612.0, 792.0);
    page.texts.push(run("Second page text", 50.0, 400.0));
    doc.pages.push(page);

    let groups = group_document_text(&doc, GroupingMode::SingleLine);
    for (page_index, page_groups) in groups.iter().enumerate() {
        for (seq, group) in page_groups.iter().enumerate() {
            assert_eq!(group.id.page_index, page_index);
            assert_eq!(group.id.seq, seq);
        }
    }
}

#[test]
fn test_fonts_resolved_by_uid_fallback() {
    // Runs referencing a font by uid still get its metrics.
    let mut font = Font::new("F1");
    font.uid = Some("font-uid-1".to_string());
    font.units_per_em = Some(2048.0);
    font.ascent = Some(1638.0);
    font.descent = Some(-410.0);

    let mut doc = Document::new();
    doc.fonts.push(font);
    let mut page = Page::new(612.0, 792.0);
    page.texts.push(TextRun::new("Hello", 0.0, 100.0, "font-uid-1", 12.0));
    doc.pages.push(page);

    let groups = group_document_text(&doc, GroupingMode::SingleLine);
    assert_eq!(groups[0].len(), 1);
    // (1638 + 410) / 2048 = 1.0 em tall at 12pt.
    let bbox = groups[0][0].bbox;
    assert!(((bbox.bottom - bbox.top) - 12.0).abs() < 1e-9);
}

#[test]
fn test_empty_and_whitespace_pages() {
    let empty = document_with(Vec::new());
    assert!(group_document_text(&empty, GroupingMode::Auto)[0].is_empty());

    let mut no_text = TextRun::new("x", 0.0, 100.0, "F1", 12.0);
    no_text.text = None;
    let doc = document_with(vec![no_text]);
    assert!(group_document_text(&doc, GroupingMode::Auto)[0].is_empty());
}
