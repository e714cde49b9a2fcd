//! The formatted-run model behind the prompter view.
//!
//! A [`Document`] is an ordered list of [`Segment`]s whose texts, concatenated
//! in order, form the whole script. Character offsets (counted in `char`s) are
//! derived purely from that order.

use std::ops::Range;

use tracing::debug;

use crate::color::Rgb;

/// Formatting shared by every character of a segment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Format {
    pub bold: bool,
    pub italic: bool,
    pub underlined: bool,
    /// `None` inherits the view's default text colour.
    pub color: Option<Rgb>,
}

impl Format {
    pub fn with_change(mut self, change: FormatChange) -> Self {
        match change {
            FormatChange::Bold(value) => self.bold = value,
            FormatChange::Italic(value) => self.italic = value,
            FormatChange::Underline(value) => self.underlined = value,
            FormatChange::Color(value) => self.color = value,
        }
        self
    }

    pub fn flag(&self, kind: FormatKind) -> bool {
        match kind {
            FormatKind::Bold => self.bold,
            FormatKind::Italic => self.italic,
            FormatKind::Underline => self.underlined,
        }
    }

    /// Adopts the formatting read back from the document for toolbar display.
    /// A segment without its own colour leaves the current colour in place.
    pub fn absorb(&mut self, read: Format) {
        self.bold = read.bold;
        self.italic = read.italic;
        self.underlined = read.underlined;
        if read.color.is_some() {
            self.color = read.color;
        }
    }
}

/// The boolean toggles offered by the toolbar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatKind {
    Bold,
    Italic,
    Underline,
}

impl FormatKind {
    pub fn set(self, value: bool) -> FormatChange {
        match self {
            FormatKind::Bold => FormatChange::Bold(value),
            FormatKind::Italic => FormatChange::Italic(value),
            FormatKind::Underline => FormatChange::Underline(value),
        }
    }
}

/// A single formatting field together with the value to assign to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatChange {
    Bold(bool),
    Italic(bool),
    Underline(bool),
    Color(Option<Rgb>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub format: Format,
}

impl Segment {
    pub fn new(text: impl Into<String>, format: Format) -> Self {
        Self {
            text: text.into(),
            format,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Format::default())
    }

    /// Length in chars.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn with_text(&self, text: String) -> Self {
        Self {
            text,
            format: self.format,
        }
    }
}

/// Offsets into the document's concatenated text.
///
/// `Inactive` means nothing is selected; toolbar state then follows the caret
/// or the defaults. A `Range` whose ends coincide is a zero-width selection and
/// never mutates the document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Inactive,
    Range {
        start: usize,
        end: usize,
    },
}

impl Selection {
    pub fn range(start: usize, end: usize) -> Self {
        Selection::Range { start, end }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Selection::Range { .. })
    }

    /// Ordered bounds clamped to `[0, total]`, or `None` when inactive.
    pub fn clamped(&self, total: usize) -> Option<Range<usize>> {
        match *self {
            Selection::Inactive => None,
            Selection::Range { start, end } => {
                let (low, high) = if start <= end { (start, end) } else { (end, start) };
                Some(low.min(total)..high.min(total))
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    segments: Vec<Segment>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh document holding the whole script as one unformatted segment.
    pub fn from_script(script: &str) -> Self {
        if script.is_empty() {
            return Self::new();
        }
        Self {
            segments: vec![Segment::plain(script)],
        }
    }

    /// Builds a document from raw segments, discarding empty ones.
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        Self {
            segments: segments
                .into_iter()
                .filter(|segment| !segment.is_empty())
                .collect(),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Total length in chars.
    pub fn len(&self) -> usize {
        self.segments.iter().map(Segment::len).sum()
    }

    pub fn text(&self) -> String {
        self.segments
            .iter()
            .map(|segment| segment.text.as_str())
            .collect()
    }

    /// Each segment paired with the char range it covers.
    pub fn segment_ranges(&self) -> impl Iterator<Item = (Range<usize>, &Segment)> {
        let mut position = 0;
        self.segments.iter().map(move |segment| {
            let start = position;
            position += segment.len();
            (start..position, segment)
        })
    }

    /// Assigns `change` to every character inside `selection`.
    ///
    /// Segments straddling a selection bound are split in place; segments
    /// outside the selection are kept as they are. Inactive and zero-width
    /// selections return the document unchanged.
    #[must_use]
    pub fn apply_format(self, selection: Selection, change: FormatChange) -> Self {
        let total = self.len();
        let Some(range) = selection.clamped(total) else {
            return self;
        };
        if range.start >= range.end {
            return self;
        }

        let mut output = Vec::with_capacity(self.segments.len() + 2);
        let mut position = 0;
        for segment in self.segments {
            let length = segment.len();
            let segment_end = position + length;

            if segment_end <= range.start || position >= range.end {
                output.push(segment);
                position = segment_end;
                continue;
            }

            let selected_start = range.start.saturating_sub(position);
            let selected_end = length.min(range.end - position);

            let (before_end, after) = split_text(&segment.text, selected_end);
            let (before, selected) = split_text(&before_end, selected_start);

            if !before.is_empty() {
                output.push(segment.with_text(before));
            }
            if !selected.is_empty() {
                output.push(Segment::new(selected, segment.format.with_change(change)));
            }
            if !after.is_empty() {
                output.push(segment.with_text(after));
            }
            position = segment_end;
        }

        debug!(
            start = range.start,
            end = range.end,
            ?change,
            segments = output.len(),
            "applied format"
        );
        Self { segments: output }
    }

    /// Merges adjacent segments with identical formatting.
    #[must_use]
    pub fn normalize(self) -> Self {
        let before = self.segments.len();
        let mut merged: Vec<Segment> = Vec::with_capacity(before);
        for segment in self.segments {
            if segment.is_empty() {
                continue;
            }
            match merged.last_mut() {
                Some(previous) if previous.format == segment.format => {
                    previous.text.push_str(&segment.text);
                }
                _ => merged.push(segment),
            }
        }
        if merged.len() != before {
            debug!(before, after = merged.len(), "normalized segments");
        }
        Self { segments: merged }
    }

    /// Formatting at a caret position.
    ///
    /// Both segment bounds are inclusive, so a caret sitting exactly between
    /// two segments reports the earlier one.
    pub fn format_at(&self, offset: usize) -> Option<Format> {
        let offset = offset.min(self.len());
        self.segment_ranges()
            .find(|(range, _)| range.start <= offset && offset <= range.end)
            .map(|(_, segment)| segment.format)
    }

    /// Formatting of the character starting at `offset`.
    pub fn format_of_char(&self, offset: usize) -> Option<Format> {
        self.segment_ranges()
            .find(|(range, _)| range.contains(&offset))
            .map(|(_, segment)| segment.format)
    }
}

pub fn char_to_byte_idx(text: &str, char_idx: usize) -> usize {
    if char_idx == 0 {
        return 0;
    }
    for (count, (byte_idx, _)) in text.char_indices().enumerate() {
        if count == char_idx {
            return byte_idx;
        }
    }
    text.len()
}

fn split_text(text: &str, offset: usize) -> (String, String) {
    let byte_idx = char_to_byte_idx(text, offset);
    (text[..byte_idx].to_string(), text[byte_idx..].to_string())
}

#[cfg(test)]
#[path = "segments_tests.rs"]
mod segments_tests;
