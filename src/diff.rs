//! Working out what an edit meant from the field state around it.
//!
//! A formatted field contains separators the user never typed. When one of
//! them is deleted, stripping the new text would just bring it back and leave
//! the caret stuck, so deletions are replayed on the digits of the previous
//! state instead: deleting a separator removes the digit next to it.

use std::fmt;

use crate::edit::{char_slice, char_tail, EditRequest, EditSnapshot, FieldState};

/// Kind of edit inferred from a before/after snapshot pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKind {
    /// Backspace without a selection: one char before the cursor removed.
    BackwardDelete,
    /// Delete without a selection: one char after the cursor removed.
    ForwardDelete,
    /// Anything else: typing, pasting, replacing a selection, setting text.
    Other,
}

impl fmt::Display for EditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BackwardDelete => write!(f, "backspace"),
            Self::ForwardDelete => write!(f, "delete"),
            Self::Other => write!(f, "edit"),
        }
    }
}

/// Classifies the edit that turned `before` into `after`.
///
/// # Example
///
/// ```
/// use card_field::diff::{classify_edit, EditKind};
/// use card_field::EditSnapshot;
///
/// let before = EditSnapshot::new("1234", 4);
/// assert_eq!(classify_edit(&before, &EditSnapshot::new("123", 3)), EditKind::BackwardDelete);
///
/// let before = EditSnapshot::new("1234", 0);
/// assert_eq!(classify_edit(&before, &EditSnapshot::new("234", 0)), EditKind::ForwardDelete);
/// ```
pub fn classify_edit(before: &EditSnapshot, after: &EditSnapshot) -> EditKind {
    if before.has_selection() {
        return EditKind::Other;
    }
    let was = before.cursor_position();
    let now = after.cursor_position();
    let (old, new) = (before.value(), after.value());

    if was == now + 1
        && char_slice(old, 0, was - 1) == char_slice(new, 0, now)
        && char_tail(old, was) == char_tail(new, now)
    {
        EditKind::BackwardDelete
    } else if was == now
        && char_slice(old, 0, was) == char_slice(new, 0, now)
        && char_tail(old, was + 1) == char_tail(new, now)
    {
        EditKind::ForwardDelete
    } else {
        EditKind::Other
    }
}

/// Strips every non-digit, moving the cursor to the number of digits before it.
///
/// ```
/// use card_field::diff::numbers_only;
///
/// let state = numbers_only("4242 4242", 6);
/// assert_eq!(state.value, "42424242");
/// assert_eq!(state.position, 5);
/// ```
pub fn numbers_only(value: &str, position: usize) -> FieldState {
    FieldState {
        value: digits_of(value),
        position: char_slice(value, 0, position)
            .chars()
            .filter(char::is_ascii_digit)
            .count(),
    }
}

/// Numbers-only state the user meant to produce with `request`.
///
/// Deletions are replayed on the digits of `before`; any other edit takes the
/// digits of `after` as they are.
pub fn reconstruct(request: &EditRequest) -> FieldState {
    reconstruct_as(request, classify_edit(&request.before, &request.after))
}

/// Like [`reconstruct`], for an already classified edit.
pub fn reconstruct_as(request: &EditRequest, kind: EditKind) -> FieldState {
    let (snapshot, replay) = match kind {
        EditKind::Other => (&request.after, false),
        EditKind::BackwardDelete | EditKind::ForwardDelete => (&request.before, true),
    };
    let mut state = numbers_only(snapshot.value(), snapshot.cursor_position());
    if !replay {
        return state;
    }

    // Stripped values are ASCII, so char and byte indices agree.
    match kind {
        EditKind::ForwardDelete if state.position < state.value.len() => {
            state.value.remove(state.position);
        }
        EditKind::BackwardDelete if state.position > 0 => {
            state.position -= 1;
            state.value.remove(state.position);
        }
        _ => {}
    }
    state
}

fn digits_of(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}
