use std::ops::Range;

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use serde::{Deserialize, Serialize};
use unicode_width::UnicodeWidthChar;

use crate::segments::{Document, Format};

/// A cell position in the rendered view, relative to the top of the content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewPoint {
    pub line: usize,
    pub column: u16,
}

impl ViewPoint {
    pub const fn new(line: usize, column: u16) -> Self {
        Self { line, column }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    pub fn label(self) -> &'static str {
        match self {
            Alignment::Left => "Left",
            Alignment::Center => "Center",
            Alignment::Right => "Right",
        }
    }
}

#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub width: usize,
    pub alignment: Alignment,
    /// Blank rows inserted after every visual line.
    pub line_spacing: usize,
    pub default_color: Color,
    pub background: Color,
    pub highlight: Option<Range<usize>>,
    pub highlight_style: Style,
}

#[derive(Debug)]
pub struct RenderResult {
    pub lines: Vec<Line<'static>>,
    pub layout: ViewLayout,
}

/// Where every character of the document ended up on screen.
#[derive(Clone, Debug, Default)]
pub struct ViewLayout {
    chars: Vec<char>,
    lines: Vec<VisualLine>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisualLine {
    /// First char offset shown on this line.
    pub start: usize,
    /// Offset a caret takes when placed after the last cell of the line.
    pub end: usize,
    pub glyphs: Vec<Glyph>,
    /// Column just past the last glyph.
    pub end_column: u16,
    pub spacer: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyph {
    pub offset: usize,
    pub column: u16,
    pub width: u16,
}

pub fn render_document(document: &Document, options: &RenderOptions) -> RenderResult {
    let mut cells: Vec<Cell> = Vec::with_capacity(document.len());
    for (range, segment) in document.segment_ranges() {
        let style = segment_style(&segment.format, options.default_color, options.background);
        for (ch, offset) in segment.text.chars().zip(range) {
            let mut width = cell_width(ch);
            // A zero-width char with nothing to combine with gets a cell of its own.
            let standalone = width == 0
                && cells
                    .last()
                    .is_none_or(|previous| previous.ch == '\n' || previous.ch.is_whitespace());
            if standalone {
                width = 1;
            }
            cells.push(Cell {
                ch,
                offset,
                style,
                width,
                standalone,
            });
        }
    }

    let tokens = tokenize(&cells);
    let raw_lines = wrap_tokens(&tokens, options.width.max(1), cells.len());

    let mut renderer = Renderer {
        options,
        lines: Vec::new(),
        visual: Vec::new(),
    };
    let count = raw_lines.len();
    for (idx, raw) in raw_lines.into_iter().enumerate() {
        let end = raw.end;
        renderer.push_line(raw);
        if idx + 1 < count {
            for _ in 0..options.line_spacing {
                renderer.push_spacer(end);
            }
        }
    }

    RenderResult {
        lines: renderer.lines,
        layout: ViewLayout {
            chars: cells.iter().map(|cell| cell.ch).collect(),
            lines: renderer.visual,
        },
    }
}

fn segment_style(format: &Format, default_color: Color, background: Color) -> Style {
    let mut style = Style::default()
        .fg(format
            .color
            .map(|rgb| rgb.to_ratatui())
            .unwrap_or(default_color))
        .bg(background);
    if format.bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    if format.italic {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if format.underlined {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    style
}

fn cell_width(ch: char) -> u16 {
    match ch {
        '\t' => 1,
        ch if ch.is_control() => 1,
        _ => UnicodeWidthChar::width(ch).unwrap_or(0) as u16,
    }
}

/// Base shown under a combining mark that has no char to attach to.
const DOTTED_CIRCLE: char = '\u{25CC}';

#[derive(Clone, Copy)]
struct Cell {
    ch: char,
    offset: usize,
    style: Style,
    width: u16,
    standalone: bool,
}

impl Cell {
    fn push_display(&self, out: &mut String) {
        match self.ch {
            '\t' => out.push(' '),
            ch if ch.is_control() => out.push(' '),
            ch if self.standalone => {
                out.push(DOTTED_CIRCLE);
                out.push(ch);
            }
            ch => out.push(ch),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Word,
    Whitespace,
}

enum Token<'a> {
    Run { kind: TokenKind, cells: &'a [Cell] },
    LineBreak { offset: usize },
}

fn token_width(cells: &[Cell]) -> usize {
    cells.iter().map(|cell| cell.width as usize).sum()
}

fn tokenize(cells: &[Cell]) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut run_start = 0;
    let mut run_kind: Option<TokenKind> = None;

    for (idx, cell) in cells.iter().enumerate() {
        if cell.ch == '\n' {
            if let Some(kind) = run_kind.take() {
                tokens.push(Token::Run {
                    kind,
                    cells: &cells[run_start..idx],
                });
            }
            tokens.push(Token::LineBreak {
                offset: cell.offset,
            });
            run_start = idx + 1;
            continue;
        }
        let kind = if cell.ch.is_whitespace() {
            TokenKind::Whitespace
        } else {
            TokenKind::Word
        };
        match run_kind {
            Some(current) if current == kind => {}
            Some(current) => {
                tokens.push(Token::Run {
                    kind: current,
                    cells: &cells[run_start..idx],
                });
                run_start = idx;
                run_kind = Some(kind);
            }
            None => {
                run_start = idx;
                run_kind = Some(kind);
            }
        }
    }
    if let Some(kind) = run_kind {
        tokens.push(Token::Run {
            kind,
            cells: &cells[run_start..],
        });
    }
    tokens
}

struct RawLine {
    start: usize,
    end: usize,
    cells: Vec<Cell>,
}

struct LineBuilder {
    start: usize,
    cells: Vec<Cell>,
    width: usize,
}

impl LineBuilder {
    fn new(start: usize) -> Self {
        Self {
            start,
            cells: Vec::new(),
            width: 0,
        }
    }

    fn push(&mut self, cell: Cell) {
        self.width += cell.width as usize;
        self.cells.push(cell);
    }

    fn consume_pending(&mut self, pending: &mut Vec<Cell>) {
        for cell in pending.drain(..) {
            self.push(cell);
        }
    }

    fn next_offset(&self) -> usize {
        self.cells
            .last()
            .map(|cell| cell.offset + 1)
            .unwrap_or(self.start)
    }

    fn build(self, end: usize) -> RawLine {
        RawLine {
            start: self.start,
            end,
            cells: self.cells,
        }
    }
}

/// Breaks the token stream into lines no wider than `width`.
///
/// Whitespace at a soft break stays on the line it follows, so every char
/// keeps a place in the layout.
fn wrap_tokens(tokens: &[Token<'_>], width: usize, total: usize) -> Vec<RawLine> {
    let mut lines = Vec::new();
    let mut builder = LineBuilder::new(0);
    let mut pending: Vec<Cell> = Vec::new();

    for token in tokens {
        match token {
            Token::LineBreak { offset } => {
                builder.consume_pending(&mut pending);
                lines.push(builder.build(*offset));
                builder = LineBuilder::new(offset + 1);
            }
            Token::Run {
                kind: TokenKind::Whitespace,
                cells,
            } => pending.extend_from_slice(cells),
            Token::Run {
                kind: TokenKind::Word,
                cells,
            } => {
                let pending_width = token_width(&pending);
                let word_width = token_width(cells);
                if builder.width > 0 && builder.width + pending_width + word_width > width {
                    builder.consume_pending(&mut pending);
                    let next = builder.next_offset();
                    lines.push(builder.build(next));
                    builder = LineBuilder::new(next);
                }
                builder.consume_pending(&mut pending);
                if word_width <= width.saturating_sub(builder.width) {
                    for cell in cells.iter() {
                        builder.push(*cell);
                    }
                    continue;
                }
                for cell in cells.iter() {
                    if cell.width > 0
                        && builder.width > 0
                        && builder.width + cell.width as usize > width
                    {
                        let next = builder.next_offset();
                        lines.push(builder.build(next));
                        builder = LineBuilder::new(next);
                    }
                    builder.push(*cell);
                }
            }
        }
    }

    builder.consume_pending(&mut pending);
    lines.push(builder.build(total));
    lines
}

struct Renderer<'a> {
    options: &'a RenderOptions,
    lines: Vec<Line<'static>>,
    visual: Vec<VisualLine>,
}

impl Renderer<'_> {
    fn push_line(&mut self, raw: RawLine) {
        let visible = raw
            .cells
            .iter()
            .rposition(|cell| !cell.ch.is_whitespace())
            .map(|idx| token_width(&raw.cells[..=idx]))
            .unwrap_or(0);
        let free = self.options.width.saturating_sub(visible);
        let padding = match self.options.alignment {
            Alignment::Left => 0,
            Alignment::Center => free / 2,
            Alignment::Right => free,
        };

        let background = self.background();
        let mut spans: Vec<Span<'static>> = Vec::new();
        if padding > 0 {
            spans.push(Span::styled(" ".repeat(padding), background));
        }

        let mut glyphs = Vec::with_capacity(raw.cells.len());
        let mut column = padding as u16;
        let mut run = String::new();
        let mut run_style: Option<Style> = None;
        for cell in &raw.cells {
            let style = self.cell_style(cell);
            if run_style != Some(style) {
                if let Some(previous) = run_style {
                    spans.push(Span::styled(std::mem::take(&mut run), previous));
                }
                run_style = Some(style);
            }
            cell.push_display(&mut run);
            glyphs.push(Glyph {
                offset: cell.offset,
                column,
                width: cell.width,
            });
            column = column.saturating_add(cell.width);
        }
        if let Some(style) = run_style {
            spans.push(Span::styled(run, style));
        }

        self.lines.push(Line::from(spans).style(background));
        self.visual.push(VisualLine {
            start: raw.start,
            end: raw.end,
            glyphs,
            end_column: column,
            spacer: false,
        });
    }

    fn push_spacer(&mut self, offset: usize) {
        self.lines.push(Line::default().style(self.background()));
        self.visual.push(VisualLine {
            start: offset,
            end: offset,
            glyphs: Vec::new(),
            end_column: 0,
            spacer: true,
        });
    }

    fn background(&self) -> Style {
        Style::default().bg(self.options.background)
    }

    fn cell_style(&self, cell: &Cell) -> Style {
        match &self.options.highlight {
            Some(range) if range.contains(&cell.offset) => {
                cell.style.patch(self.options.highlight_style)
            }
            _ => cell.style,
        }
    }
}

impl ViewLayout {
    pub fn lines(&self) -> &[VisualLine] {
        &self.lines
    }

    pub fn total_lines(&self) -> usize {
        self.lines.len()
    }

    /// Length of the laid-out text in chars.
    pub fn text_len(&self) -> usize {
        self.chars.len()
    }

    pub fn text_slice(&self, range: Range<usize>) -> String {
        let end = range.end.min(self.chars.len());
        let start = range.start.min(end);
        self.chars[start..end].iter().collect()
    }

    /// Char offset a caret placed at `point` would take.
    ///
    /// Columns left of the first glyph resolve to the line start, columns past
    /// the last glyph to the line end. A zero-width glyph shares its column
    /// with whatever follows, so a caret never lands between a char and the
    /// marks combining with it. Lines outside the layout don't resolve.
    pub fn offset_at(&self, point: ViewPoint) -> Option<usize> {
        let line = self.lines.get(point.line)?;
        if line.spacer {
            return Some(line.end);
        }
        line.glyphs
            .iter()
            .find(|glyph| point.column < glyph.column.saturating_add(glyph.width))
            .map(|glyph| glyph.offset)
            .or(Some(line.end))
    }

    /// Visual position of the caret at `offset`.
    ///
    /// At a soft wrap the caret is placed at the start of the following line.
    /// An offset inside a combined char shows where that char ends.
    pub fn point_at(&self, offset: usize) -> ViewPoint {
        let offset = offset.min(self.chars.len());
        let mut fallback = ViewPoint::default();
        for (idx, line) in self.lines.iter().enumerate() {
            if line.spacer || line.start > offset {
                continue;
            }
            if let Some(glyph) = line.glyphs.iter().find(|glyph| glyph.offset == offset) {
                return ViewPoint::new(idx, glyph.column);
            }
            if offset <= line.end {
                fallback = ViewPoint::new(idx, line.end_column);
                if offset < line.end || !self.continues_after(idx, offset) {
                    return fallback;
                }
            }
        }
        fallback
    }

    /// Whether a caret can rest at `offset`, i.e. it is not inside a combined char.
    pub fn is_caret_stop(&self, offset: usize) -> bool {
        offset <= self.chars.len() && self.offset_at(self.point_at(offset)) == Some(offset)
    }

    fn continues_after(&self, idx: usize, offset: usize) -> bool {
        self.lines[idx + 1..]
            .iter()
            .find(|line| !line.spacer)
            .is_some_and(|line| line.start == offset)
    }

    pub fn line_start(&self, line: usize) -> Option<ViewPoint> {
        let visual = self.lines.get(line)?;
        let column = visual.glyphs.first().map(|glyph| glyph.column).unwrap_or(0);
        Some(ViewPoint::new(line, column))
    }

    pub fn line_end(&self, line: usize) -> Option<ViewPoint> {
        let visual = self.lines.get(line)?;
        Some(ViewPoint::new(line, visual.end_column))
    }

    /// The nearest non-spacer line `delta` content lines away, if any.
    pub fn step_line(&self, line: usize, delta: isize) -> Option<usize> {
        let mut current = line;
        let mut remaining = delta.unsigned_abs();
        while remaining > 0 {
            current = if delta < 0 {
                current.checked_sub(1)?
            } else {
                current + 1
            };
            let visual = self.lines.get(current)?;
            if !visual.spacer {
                remaining -= 1;
            }
        }
        Some(current)
    }
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod render_tests;
