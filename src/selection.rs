//! Maps on-screen selections onto document offsets.
//!
//! The view keeps its own notion of a selection, anchored to cells of the
//! rendered layout the same way a platform text selection is anchored to
//! rendered nodes. [`compute_offsets`] turns that into char offsets by
//! measuring rendered text, which is only valid because the renderer gives
//! every char of the document exactly one place in the layout.

use tracing::warn;

use crate::render::{ViewLayout, ViewPoint};

/// Rendered content that a selection can be measured against.
pub trait RenderedRoot {
    /// The position before the first rendered character.
    fn contents_start(&self) -> ViewPoint;

    /// Text rendered between two positions, in reading order.
    ///
    /// Returns `None` when either position lies outside the rendered content.
    fn text_between(&self, from: ViewPoint, to: ViewPoint) -> Option<String>;
}

impl RenderedRoot for ViewLayout {
    fn contents_start(&self) -> ViewPoint {
        ViewPoint::new(0, 0)
    }

    fn text_between(&self, from: ViewPoint, to: ViewPoint) -> Option<String> {
        let a = self.offset_at(from)?;
        let b = self.offset_at(to)?;
        Some(self.text_slice(a.min(b)..a.max(b)))
    }
}

/// A range between two view positions, `start` never after `end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NativeRange {
    pub start: ViewPoint,
    pub end: ViewPoint,
}

/// The selection as the view tracks it: where the user pressed (`anchor`) and
/// where the caret currently is (`focus`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NativeSelection {
    anchor: Option<ViewPoint>,
    focus: Option<ViewPoint>,
}

impl NativeSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a caret at `point`, dropping any selected range.
    pub fn collapse(&mut self, point: ViewPoint) {
        self.anchor = Some(point);
        self.focus = Some(point);
    }

    /// Moves the focus while keeping the anchor.
    pub fn extend(&mut self, point: ViewPoint) {
        if self.anchor.is_none() {
            self.anchor = Some(point);
        }
        self.focus = Some(point);
    }

    pub fn remove_all_ranges(&mut self) {
        self.anchor = None;
        self.focus = None;
    }

    pub fn range_count(&self) -> usize {
        usize::from(self.anchor.is_some() && self.focus.is_some())
    }

    pub fn focus(&self) -> Option<ViewPoint> {
        self.focus
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    pub fn range(&self) -> Option<NativeRange> {
        let anchor = self.anchor?;
        let focus = self.focus?;
        Some(NativeRange {
            start: anchor.min(focus),
            end: anchor.max(focus),
        })
    }
}

/// What a selection read found.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionRead {
    /// A non-empty run of text is selected.
    Range { start: usize, end: usize },
    /// Only a caret is placed; toolbar state should follow its position.
    Caret(usize),
    /// Nothing could be read; the selection should become inactive.
    Unavailable,
}

/// Converts the view's selection into document offsets.
///
/// `start` is the length of the text rendered before the selection, `end`
/// adds the length of the selected text.
pub fn compute_offsets(root: &impl RenderedRoot, native: &NativeSelection) -> SelectionRead {
    if native.range_count() == 0 {
        warn!("selection read without ranges");
        return SelectionRead::Unavailable;
    }
    let Some(range) = native.range() else {
        return SelectionRead::Unavailable;
    };

    let Some(preceding) = root.text_between(root.contents_start(), range.start) else {
        warn!(?range, "selection start outside rendered content");
        return SelectionRead::Unavailable;
    };
    let start = preceding.chars().count();

    let Some(selected) = root.text_between(range.start, range.end) else {
        warn!(?range, "selection end outside rendered content");
        return SelectionRead::Unavailable;
    };
    let length = selected.chars().count();

    if length > 0 {
        SelectionRead::Range {
            start,
            end: start + length,
        }
    } else {
        SelectionRead::Caret(start)
    }
}

/// Caret movements driven by navigation keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
}

/// Where the focus ends up after `motion`, starting from `from`.
///
/// Horizontal moves step to the neighbouring caret stop, passing over marks
/// that combine with the char before them; vertical moves keep the column and
/// skip spacer rows.
pub fn move_point(layout: &ViewLayout, from: ViewPoint, motion: Motion) -> ViewPoint {
    match motion {
        Motion::Left | Motion::Right => {
            let Some(offset) = layout.offset_at(from) else {
                return from;
            };
            let target = if motion == Motion::Left {
                (0..offset).rev().find(|&o| layout.is_caret_stop(o))
            } else {
                (offset + 1..=layout.text_len()).find(|&o| layout.is_caret_stop(o))
            };
            layout.point_at(target.unwrap_or(offset))
        }
        Motion::Up | Motion::Down => {
            let delta = if motion == Motion::Up { -1 } else { 1 };
            match layout.step_line(from.line, delta) {
                Some(line) => ViewPoint::new(line, from.column),
                None => from,
            }
        }
        Motion::LineStart => layout.line_start(from.line).unwrap_or(from),
        Motion::LineEnd => layout.line_end(from.line).unwrap_or(from),
    }
}
