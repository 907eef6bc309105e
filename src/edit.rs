//! Values exchanged between a text field and its validator.
//!
//! Every position in this crate counts `char`s (Unicode scalar values), not
//! bytes, so a cursor never lands inside a multi-byte character.

use zeroize::Zeroize;

/// A text field's contents and caret at one instant.
///
/// The anchor equals the cursor when nothing is selected. Both positions are
/// clamped to the length of the value on construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EditSnapshot {
    value: String,
    cursor_position: usize,
    anchor_position: usize,
}

impl EditSnapshot {
    /// A snapshot with no selection.
    pub fn new(value: impl Into<String>, cursor_position: usize) -> Self {
        Self::with_selection(value, cursor_position, cursor_position)
    }

    /// A snapshot selecting the text between `anchor_position` and `cursor_position`.
    pub fn with_selection(
        value: impl Into<String>,
        anchor_position: usize,
        cursor_position: usize,
    ) -> Self {
        let value = value.into();
        let length = char_len(&value);
        Self {
            value,
            cursor_position: cursor_position.min(length),
            anchor_position: anchor_position.min(length),
        }
    }

    /// A snapshot with the cursor after the last character.
    pub fn at_end(value: impl Into<String>) -> Self {
        let value = value.into();
        let length = char_len(&value);
        Self::new(value, length)
    }

    /// The field's text.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Caret position.
    #[inline]
    pub const fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    /// Selection anchor; equal to the cursor without a selection.
    #[inline]
    pub const fn anchor_position(&self) -> usize {
        self.anchor_position
    }

    /// Returns true if some text is selected.
    #[inline]
    pub const fn has_selection(&self) -> bool {
        self.anchor_position != self.cursor_position
    }

    /// Selected range as `(start, end)`, empty without a selection.
    #[inline]
    pub fn selection(&self) -> (usize, usize) {
        (
            self.anchor_position.min(self.cursor_position),
            self.anchor_position.max(self.cursor_position),
        )
    }

    /// Length of the value in chars.
    #[inline]
    pub fn len(&self) -> usize {
        char_len(&self.value)
    }

    /// Returns true if the value is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl Zeroize for EditSnapshot {
    fn zeroize(&mut self) {
        self.value.zeroize();
        self.cursor_position = 0;
        self.anchor_position = 0;
    }
}

impl From<ValidateResult> for EditSnapshot {
    fn from(result: ValidateResult) -> Self {
        Self::new(result.value, result.cursor_position)
    }
}

/// One edit as seen by the field: its state right before and right after.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EditRequest {
    /// State before the user's action.
    pub before: EditSnapshot,
    /// State after the user's action, before any reformatting.
    pub after: EditSnapshot,
}

impl EditRequest {
    /// Pairs two snapshots.
    #[inline]
    pub fn new(before: EditSnapshot, after: EditSnapshot) -> Self {
        Self { before, after }
    }

    /// A request that replaces `before` entirely with `value`, cursor at the end.
    pub fn replace_all(before: EditSnapshot, value: impl Into<String>) -> Self {
        Self::new(before, EditSnapshot::at_end(value))
    }
}

/// What the field should show after an edit, and how the value looks.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidateResult {
    /// Canonical text to display.
    pub value: String,
    /// Caret position within `value`.
    pub cursor_position: usize,
    /// The value is wrong; the field should show an error.
    pub invalid: bool,
    /// Entry is complete; focus may advance to the next field.
    pub finished: bool,
}

/// A value with a caret, passed between the differencer and the formatters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldState {
    /// Field text, stripped or formatted depending on the stage.
    pub value: String,
    /// Caret position within `value`.
    pub position: usize,
}

impl FieldState {
    /// Creates a state, clamping `position` to the value.
    pub fn new(value: impl Into<String>, position: usize) -> Self {
        let value = value.into();
        let position = position.min(char_len(&value));
        Self { value, position }
    }
}

/// Number of chars in `s`.
#[inline]
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte offset of char index `index`, clamped to the end of `s`.
#[inline]
pub(crate) fn byte_offset(s: &str, index: usize) -> usize {
    s.char_indices().nth(index).map_or(s.len(), |(offset, _)| offset)
}

/// Chars `start..end` of `s`, with both bounds clamped.
pub(crate) fn char_slice(s: &str, start: usize, end: usize) -> &str {
    let start = byte_offset(s, start);
    let end = byte_offset(s, end).max(start);
    &s[start..end]
}

/// Chars from `start` to the end of `s`.
#[inline]
pub(crate) fn char_tail(s: &str, start: usize) -> &str {
    &s[byte_offset(s, start)..]
}
