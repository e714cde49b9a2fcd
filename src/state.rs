use tracing::debug;

use crate::color::Rgb;
use crate::segments::{Document, Format, FormatChange, FormatKind, Selection};
use crate::selection::SelectionRead;

/// Everything the prompter knows about formatting: the document, the active
/// selection and the toolbar's default format.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditorState {
    pub document: Document,
    pub selection: Selection,
    pub default_format: Format,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// The result of reading the view's selection.
    SelectionRead(SelectionRead),
    /// Flip a toolbar toggle, relative to the format the toolbar shows.
    Toggle(FormatKind),
    /// Colour picker input: always becomes the toolbar colour.
    SetColor(Option<Rgb>),
    Apply(FormatChange),
}

/// Side effects the view has to carry out after a reduction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Effects {
    pub clear_native_selection: bool,
    pub document_changed: bool,
}

impl EditorState {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            selection: Selection::Inactive,
            default_format: Format::default(),
        }
    }

    pub fn from_script(script: &str) -> Self {
        Self::new(Document::from_script(script))
    }

    #[must_use]
    pub fn reduce(self, action: Action) -> (Self, Effects) {
        let (mut state, mut effects) = match action {
            Action::SelectionRead(read) => (self.read_selection(read), Effects::default()),
            Action::Toggle(kind) => {
                let value = !self.default_format.flag(kind);
                self.apply(kind.set(value))
            }
            Action::SetColor(color) => {
                let mut state = self;
                state.default_format.color = color;
                state.apply(FormatChange::Color(color))
            }
            Action::Apply(change) => self.apply(change),
        };

        if !state.selection.is_active() {
            let before = state.document.segments().len();
            state.document = state.document.normalize();
            if state.document.segments().len() != before {
                effects.document_changed = true;
            }
        }
        (state, effects)
    }

    fn read_selection(mut self, read: SelectionRead) -> Self {
        match read {
            SelectionRead::Range { start, end } => {
                self.selection = Selection::range(start, end);
                if let Some(format) = self.document.format_of_char(start) {
                    self.default_format.absorb(format);
                }
            }
            SelectionRead::Caret(offset) => {
                self.selection = Selection::Inactive;
                if let Some(format) = self.document.format_at(offset) {
                    self.default_format.absorb(format);
                }
            }
            SelectionRead::Unavailable => {
                self.selection = Selection::Inactive;
            }
        }
        self
    }

    fn apply(mut self, change: FormatChange) -> (Self, Effects) {
        if !self.selection.is_active() {
            self.default_format = self.default_format.with_change(change);
            return (self, Effects::default());
        }

        debug!(selection = ?self.selection, ?change, "formatting selection");
        let document = std::mem::take(&mut self.document);
        self.document = document.apply_format(self.selection, change);
        self.selection = Selection::Inactive;
        (
            self,
            Effects {
                clear_native_selection: true,
                document_changed: true,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segments::Segment;

    fn reduce(state: EditorState, action: Action) -> EditorState {
        state.reduce(action).0
    }

    #[test]
    fn toggle_without_selection_only_changes_defaults() {
        let state = EditorState::from_script("Hello World");

        let (state, effects) = state.reduce(Action::Toggle(FormatKind::Bold));

        assert!(state.default_format.bold);
        assert_eq!(state.document, Document::from_script("Hello World"));
        assert_eq!(effects, Effects::default());
    }

    #[test]
    fn toggle_with_selection_formats_and_clears() {
        let state = EditorState::from_script("Hello World");
        let state = reduce(
            state,
            Action::SelectionRead(SelectionRead::Range { start: 6, end: 11 }),
        );
        assert!(state.selection.is_active());

        let (state, effects) = state.reduce(Action::Toggle(FormatKind::Bold));

        assert_eq!(state.selection, Selection::Inactive);
        assert!(effects.clear_native_selection);
        assert!(effects.document_changed);
        assert_eq!(state.document.segments().len(), 2);
        assert_eq!(state.document.segments()[1].text, "World");
        assert!(state.document.segments()[1].format.bold);
    }

    #[test]
    fn formatting_a_selection_leaves_toolbar_flags_alone() {
        let state = EditorState::from_script("Hello World");
        let state = reduce(
            state,
            Action::SelectionRead(SelectionRead::Range { start: 0, end: 5 }),
        );

        let state = reduce(state, Action::Toggle(FormatKind::Bold));
        assert!(state.document.segments()[0].format.bold);
        assert!(!state.default_format.bold);

        let state = reduce(
            state,
            Action::SelectionRead(SelectionRead::Range { start: 6, end: 11 }),
        );
        let state = reduce(state, Action::Apply(FormatChange::Italic(true)));
        assert!(state.document.segments()[2].format.italic);
        assert!(!state.default_format.italic);

        // With no selection left, the next toggle flips the untouched default.
        let state = reduce(state, Action::Toggle(FormatKind::Bold));
        assert!(state.default_format.bold);
    }

    #[test]
    fn selection_read_reflects_format_at_selection_start() {
        let state = EditorState::from_script("Hello World");
        let state = reduce(
            state,
            Action::SelectionRead(SelectionRead::Range { start: 6, end: 11 }),
        );
        let state = reduce(state, Action::Toggle(FormatKind::Italic));

        let state = reduce(
            state,
            Action::SelectionRead(SelectionRead::Range { start: 6, end: 8 }),
        );
        assert!(state.default_format.italic);

        let state = reduce(
            state,
            Action::SelectionRead(SelectionRead::Range { start: 5, end: 8 }),
        );
        assert!(!state.default_format.italic);
    }

    #[test]
    fn caret_read_uses_inclusive_boundary() {
        let document = Document::from_segments(vec![
            Segment::new(
                "AB",
                Format {
                    bold: true,
                    ..Format::default()
                },
            ),
            Segment::plain("CD"),
        ]);
        let state = EditorState::new(document);

        let state = reduce(state, Action::SelectionRead(SelectionRead::Caret(2)));
        assert!(state.default_format.bold);

        let state = reduce(state, Action::SelectionRead(SelectionRead::Caret(3)));
        assert!(!state.default_format.bold);
        assert_eq!(state.selection, Selection::Inactive);
    }

    #[test]
    fn second_toggle_unformats_the_same_range() {
        let state = EditorState::from_script("abcdef");
        let select = Action::SelectionRead(SelectionRead::Range { start: 2, end: 4 });

        let state = reduce(state, select);
        let state = reduce(state, Action::Toggle(FormatKind::Underline));
        let state = reduce(state, select);
        assert!(state.default_format.underlined);
        let state = reduce(state, Action::Toggle(FormatKind::Underline));

        assert_eq!(state.document, Document::from_script("abcdef"));
    }

    #[test]
    fn unavailable_read_deactivates_selection_and_keeps_defaults() {
        let state = EditorState::from_script("abc");
        let state = reduce(state, Action::Toggle(FormatKind::Bold));
        let state = reduce(
            state,
            Action::SelectionRead(SelectionRead::Range { start: 0, end: 2 }),
        );

        let state = reduce(state, Action::SelectionRead(SelectionRead::Unavailable));

        assert_eq!(state.selection, Selection::Inactive);
        assert!(!state.default_format.bold);
    }

    #[test]
    fn set_colour_updates_defaults_and_selection() {
        let red = Some(Rgb::new(0xFF, 0, 0));
        let state = EditorState::from_script("abcdef");

        let state = reduce(state, Action::SetColor(red));
        assert_eq!(state.default_format.color, red);
        assert_eq!(state.document.segments().len(), 1);

        let state = reduce(
            state,
            Action::SelectionRead(SelectionRead::Range { start: 0, end: 3 }),
        );
        let blue = Some(Rgb::new(0, 0, 0xFF));
        let state = reduce(state, Action::SetColor(blue));

        assert_eq!(state.default_format.color, blue);
        assert_eq!(state.document.segments()[0].text, "abc");
        assert_eq!(state.document.segments()[0].format.color, blue);
        assert_eq!(state.document.segments()[1].format.color, None);
    }

    #[test]
    fn normalization_waits_for_inactive_selection() {
        let bold = Format {
            bold: true,
            ..Format::default()
        };
        let document = Document::from_segments(vec![
            Segment::new("AB", bold),
            Segment::new("CD", bold),
        ]);
        let state = EditorState::new(document);

        let state = reduce(
            state,
            Action::SelectionRead(SelectionRead::Range { start: 0, end: 1 }),
        );
        assert_eq!(state.document.segments().len(), 2);

        let (state, effects) = state.reduce(Action::SelectionRead(SelectionRead::Caret(1)));
        assert_eq!(state.document.segments().len(), 1);
        assert!(effects.document_changed);
    }

    #[test]
    fn actions_on_empty_document_are_harmless() {
        let state = EditorState::from_script("");

        let state = reduce(
            state,
            Action::SelectionRead(SelectionRead::Range { start: 0, end: 4 }),
        );
        let state = reduce(state, Action::Toggle(FormatKind::Bold));

        assert!(state.document.is_empty());
        assert_eq!(state.selection, Selection::Inactive);
    }
}
