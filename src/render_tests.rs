use super::*;
use crate::segments::{FormatChange, Segment, Selection};

fn options(width: usize) -> RenderOptions {
    RenderOptions {
        width,
        alignment: Alignment::Left,
        line_spacing: 0,
        default_color: Color::White,
        background: Color::Black,
        highlight: None,
        highlight_style: Style::default().add_modifier(Modifier::REVERSED),
    }
}

fn line_text(line: &Line<'_>) -> String {
    line.spans
        .iter()
        .map(|span| span.content.as_ref())
        .collect()
}

fn rendered_texts(result: &RenderResult) -> Vec<String> {
    result.lines.iter().map(line_text).collect()
}

#[test]
fn wraps_on_word_boundaries_keeping_whitespace() {
    let document = Document::from_script("the quick brown fox");

    let result = render_document(&document, &options(10));

    assert_eq!(rendered_texts(&result), vec!["the quick ", "brown fox"]);
    let lines = result.layout.lines();
    assert_eq!((lines[0].start, lines[0].end), (0, 10));
    assert_eq!((lines[1].start, lines[1].end), (10, 19));
}

#[test]
fn every_char_has_a_place_in_the_layout() {
    let document = Document::from_script("alpha beta\ngamma  delta epsilon\n\nzeta");

    let result = render_document(&document, &options(8));

    let mut seen: Vec<usize> = result
        .layout
        .lines()
        .iter()
        .flat_map(|line| line.glyphs.iter().map(|glyph| glyph.offset))
        .collect();
    let newlines: Vec<usize> = document
        .text()
        .chars()
        .enumerate()
        .filter(|(_, ch)| *ch == '\n')
        .map(|(idx, _)| idx)
        .collect();
    seen.extend(newlines);
    seen.sort_unstable();
    assert_eq!(seen, (0..document.len()).collect::<Vec<_>>());
}

#[test]
fn hard_breaks_words_longer_than_the_line() {
    let document = Document::from_script("abcdefghij");

    let result = render_document(&document, &options(4));

    assert_eq!(rendered_texts(&result), vec!["abcd", "efgh", "ij"]);
    assert_eq!(result.layout.lines()[1].start, 4);
}

#[test]
fn newline_ends_line_before_the_break() {
    let document = Document::from_script("ab\ncd");

    let result = render_document(&document, &options(20));

    let lines = result.layout.lines();
    assert_eq!(lines.len(), 2);
    assert_eq!((lines[0].start, lines[0].end), (0, 2));
    assert_eq!((lines[1].start, lines[1].end), (3, 5));
}

#[test]
fn one_span_per_formatting_run() {
    let document = Document::from_script("Hello World")
        .apply_format(Selection::range(6, 11), FormatChange::Bold(true));

    let result = render_document(&document, &options(40));

    let spans = &result.lines[0].spans;
    assert_eq!(spans.len(), 2);
    assert_eq!(spans[0].content, "Hello ");
    assert_eq!(spans[1].content, "World");
    assert!(spans[1].style.add_modifier.contains(Modifier::BOLD));
    assert_eq!(spans[0].style.fg, Some(Color::White));
}

#[test]
fn segment_colour_overrides_default() {
    let red = crate::color::Rgb::new(0xFF, 0, 0);
    let document = Document::from_segments(vec![Segment::new(
        "red",
        Format {
            color: Some(red),
            ..Format::default()
        },
    )]);

    let result = render_document(&document, &options(40));

    assert_eq!(result.lines[0].spans[0].style.fg, Some(Color::Rgb(0xFF, 0, 0)));
}

#[test]
fn highlight_splits_runs() {
    let document = Document::from_script("abcdef");
    let mut opts = options(40);
    opts.highlight = Some(2..4);

    let result = render_document(&document, &opts);

    let spans = &result.lines[0].spans;
    assert_eq!(spans.len(), 3);
    assert_eq!(spans[1].content, "cd");
    assert!(spans[1].style.add_modifier.contains(Modifier::REVERSED));
}

#[test]
fn center_alignment_pads_glyph_columns() {
    let document = Document::from_script("abcd");
    let mut opts = options(10);
    opts.alignment = Alignment::Center;

    let result = render_document(&document, &opts);

    assert_eq!(line_text(&result.lines[0]), "   abcd");
    assert_eq!(result.layout.lines()[0].glyphs[0].column, 3);
    assert_eq!(result.layout.offset_at(ViewPoint::new(0, 0)), Some(0));
    assert_eq!(result.layout.offset_at(ViewPoint::new(0, 4)), Some(1));
}

#[test]
fn right_alignment_ignores_trailing_whitespace() {
    let document = Document::from_script("ab cd");
    let mut opts = options(3);
    opts.alignment = Alignment::Right;

    let result = render_document(&document, &opts);

    assert_eq!(rendered_texts(&result), vec![" ab ", " cd"]);
}

#[test]
fn spacing_inserts_spacer_rows_between_lines() {
    let document = Document::from_script("ab\ncd\nef");
    let mut opts = options(10);
    opts.line_spacing = 1;

    let result = render_document(&document, &opts);

    let layout = &result.layout;
    assert_eq!(layout.total_lines(), 5);
    assert!(layout.lines()[1].spacer);
    assert!(!layout.lines()[4].spacer);
    assert_eq!(layout.offset_at(ViewPoint::new(1, 3)), Some(2));
    assert_eq!(layout.step_line(0, 1), Some(2));
    assert_eq!(layout.step_line(4, -2), Some(0));
    assert_eq!(layout.step_line(4, 1), None);
}

#[test]
fn offset_at_resolves_columns_and_line_ends() {
    let document = Document::from_script("hello world");

    let result = render_document(&document, &options(6));
    let layout = &result.layout;

    assert_eq!(layout.offset_at(ViewPoint::new(0, 1)), Some(1));
    assert_eq!(layout.offset_at(ViewPoint::new(0, 50)), Some(6));
    assert_eq!(layout.offset_at(ViewPoint::new(1, 0)), Some(6));
    assert_eq!(layout.offset_at(ViewPoint::new(1, 50)), Some(11));
    assert_eq!(layout.offset_at(ViewPoint::new(2, 0)), None);
}

#[test]
fn point_at_moves_soft_wrap_caret_to_next_line() {
    let document = Document::from_script("hello world\nx");

    let result = render_document(&document, &options(6));
    let layout = &result.layout;

    assert_eq!(layout.point_at(2), ViewPoint::new(0, 2));
    assert_eq!(layout.point_at(6), ViewPoint::new(1, 0));
    assert_eq!(layout.point_at(11), ViewPoint::new(1, 5));
    assert_eq!(layout.point_at(12), ViewPoint::new(2, 0));
    assert_eq!(layout.point_at(13), ViewPoint::new(2, 1));
    assert_eq!(layout.point_at(99), ViewPoint::new(2, 1));
}

#[test]
fn wide_characters_take_two_columns() {
    let document = Document::from_script("日本語");

    let result = render_document(&document, &options(40));
    let layout = &result.layout;

    assert_eq!(layout.lines()[0].glyphs[1].column, 2);
    assert_eq!(layout.offset_at(ViewPoint::new(0, 3)), Some(1));
    assert_eq!(layout.point_at(3), ViewPoint::new(0, 6));
}

#[test]
fn empty_document_renders_one_empty_line() {
    let result = render_document(&Document::new(), &options(20));

    assert_eq!(result.lines.len(), 1);
    assert_eq!(result.layout.offset_at(ViewPoint::new(0, 5)), Some(0));
    assert_eq!(result.layout.text_len(), 0);
}

#[test]
fn combining_mark_shares_the_column_of_what_follows() {
    let document = Document::from_script("e\u{301}x");

    let result = render_document(&document, &options(40));
    let glyphs = &result.layout.lines()[0].glyphs;

    assert_eq!(rendered_texts(&result), vec!["e\u{301}x"]);
    assert_eq!((glyphs[1].column, glyphs[1].width), (1, 0));
    assert_eq!(glyphs[2].column, 1);
    assert_eq!(result.layout.offset_at(ViewPoint::new(0, 1)), Some(2));
}

#[test]
fn mark_without_a_base_gets_its_own_cell() {
    let document = Document::from_script("a \u{301}b\n\u{200B}");

    let result = render_document(&document, &options(40));
    let layout = &result.layout;

    assert_eq!(rendered_texts(&result), vec!["a \u{25CC}\u{301}b", "\u{25CC}\u{200B}"]);
    assert_eq!(layout.lines()[0].glyphs[2].width, 1);
    assert_eq!(layout.point_at(2), ViewPoint::new(0, 2));
    assert_eq!(layout.offset_at(ViewPoint::new(1, 0)), Some(5));
    assert_eq!(layout.text_slice(0..6), "a \u{301}b\n\u{200B}");
}

#[test]
fn hard_break_keeps_marks_with_their_base() {
    let document = Document::from_script("日\u{301}x");

    let result = render_document(&document, &options(1));

    assert_eq!(rendered_texts(&result), vec!["日\u{301}", "x"]);
}

#[test]
fn background_fills_text_padding_and_spacers() {
    let mut opts = options(10);
    opts.alignment = Alignment::Center;
    opts.line_spacing = 1;
    opts.background = Color::Rgb(0, 0, 0x40);

    let result = render_document(&Document::from_script("hi\nthere"), &opts);

    assert_eq!(result.lines.len(), 3);
    for line in &result.lines {
        assert_eq!(line.style.bg, Some(Color::Rgb(0, 0, 0x40)));
        for span in &line.spans {
            assert_eq!(span.style.bg, Some(Color::Rgb(0, 0, 0x40)));
        }
    }
}
