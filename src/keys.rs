//! A headless single-line text field driven by keystrokes.
//!
//! [`apply_keystroke`] performs the raw edit a line edit would make, before
//! any validator runs. Pairing the snapshot before and after a keystroke gives
//! the [`EditRequest`](crate::EditRequest) a field hands to its validator.
//!
//! Keystroke scripts describe a sequence of keys as text: plain characters are
//! typed one by one and `<...>` tokens name special keys.
//!
//! | Token | Key |
//! |-------|-----|
//! | `<bs>`, `<backspace>` | Backspace |
//! | `<del>`, `<delete>` | Delete |
//! | `<left>`, `<right>` | Arrow keys |
//! | `<home>`, `<end>` | Line start / end |
//! | `<all>` | Select all |
//! | `<paste:TEXT>` | Paste `TEXT` in one edit |
//! | `<lt>` | A literal `<` |
//!
//! Inside a token, `\>` stands for `>` and `\\` for a backslash.
//!
//! ```
//! use card_field::keys::{apply_script, parse_script};
//! use card_field::EditSnapshot;
//!
//! let keys = parse_script("4243<bs>2").unwrap();
//! let snapshot = apply_script(&EditSnapshot::default(), &keys);
//! assert_eq!(snapshot.value(), "4242");
//! ```

use std::fmt;

use crate::edit::{char_len, char_slice, char_tail, EditSnapshot};
use crate::error::ParseError;

/// One key press (or paste) on a text field.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Keystroke {
    /// Type or paste text, replacing the selection.
    Insert(String),
    /// Remove the selection, or the char before the cursor.
    Backspace,
    /// Remove the selection, or the char after the cursor.
    Delete,
    /// Move the cursor one char left.
    Left,
    /// Move the cursor one char right.
    Right,
    /// Move the cursor to the start.
    Home,
    /// Move the cursor to the end.
    End,
    /// Select from `anchor` to `cursor`.
    Select {
        /// Fixed end of the selection.
        anchor: usize,
        /// Moving end of the selection, where the caret is.
        cursor: usize,
    },
    /// Select the whole value.
    SelectAll,
}

impl fmt::Display for Keystroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert(text) if text.chars().count() == 1 && text != "<" => f.write_str(text),
            Self::Insert(text) => {
                f.write_str("<paste:")?;
                for c in text.chars() {
                    if matches!(c, '>' | '\\') {
                        f.write_str("\\")?;
                    }
                    write!(f, "{}", c)?;
                }
                f.write_str(">")
            }
            Self::Backspace => f.write_str("<bs>"),
            Self::Delete => f.write_str("<del>"),
            Self::Left => f.write_str("<left>"),
            Self::Right => f.write_str("<right>"),
            Self::Home => f.write_str("<home>"),
            Self::End => f.write_str("<end>"),
            Self::Select { anchor, cursor } => write!(f, "<select:{}-{}>", anchor, cursor),
            Self::SelectAll => f.write_str("<all>"),
        }
    }
}

/// Applies one keystroke to a field, without any reformatting.
pub fn apply_keystroke(snapshot: &EditSnapshot, key: &Keystroke) -> EditSnapshot {
    let value = snapshot.value();
    let length = snapshot.len();
    let cursor = snapshot.cursor_position();
    let (start, end) = snapshot.selection();

    match key {
        Keystroke::Insert(text) => splice(value, start, end, text),
        Keystroke::Backspace | Keystroke::Delete if snapshot.has_selection() => {
            splice(value, start, end, "")
        }
        Keystroke::Backspace if cursor > 0 => splice(value, cursor - 1, cursor, ""),
        Keystroke::Delete if cursor < length => splice(value, cursor, cursor + 1, ""),
        Keystroke::Backspace | Keystroke::Delete => snapshot.clone(),
        Keystroke::Left if snapshot.has_selection() => EditSnapshot::new(value, start),
        Keystroke::Right if snapshot.has_selection() => EditSnapshot::new(value, end),
        Keystroke::Left => EditSnapshot::new(value, cursor.saturating_sub(1)),
        Keystroke::Right => EditSnapshot::new(value, cursor + 1),
        Keystroke::Home => EditSnapshot::new(value, 0),
        Keystroke::End => EditSnapshot::new(value, length),
        Keystroke::Select { anchor, cursor } => {
            EditSnapshot::with_selection(value, *anchor, *cursor)
        }
        Keystroke::SelectAll => EditSnapshot::with_selection(value, 0, length),
    }
}

/// Applies a sequence of keystrokes without any reformatting.
pub fn apply_script(snapshot: &EditSnapshot, keys: &[Keystroke]) -> EditSnapshot {
    keys.iter()
        .fold(snapshot.clone(), |current, key| apply_keystroke(&current, key))
}

/// Replaces chars `start..end` of `value` with `text`, caret after the insertion.
fn splice(value: &str, start: usize, end: usize, text: &str) -> EditSnapshot {
    let mut result = String::with_capacity(value.len() + text.len());
    result.push_str(char_slice(value, 0, start));
    result.push_str(text);
    result.push_str(char_tail(value, end));
    EditSnapshot::new(result, start + char_len(text))
}

/// Parses a keystroke script.
///
/// # Errors
///
/// Returns [`ParseError::UnknownKey`] for an unrecognised `<...>` token and
/// [`ParseError::UnterminatedKey`] for a `<` without its closing `>`.
pub fn parse_script(script: &str) -> Result<Vec<Keystroke>, ParseError> {
    let chars: Vec<char> = script.chars().collect();
    let mut keys = Vec::with_capacity(chars.len());
    let mut index = 0;

    while index < chars.len() {
        if chars[index] != '<' {
            keys.push(Keystroke::Insert(chars[index].to_string()));
            index += 1;
            continue;
        }
        let close = token_end(&chars, index + 1)
            .ok_or(ParseError::UnterminatedKey { position: index })?;
        let token: String = chars[index + 1..close].iter().collect();
        keys.push(parse_token(&unescape(&token)).ok_or_else(|| ParseError::UnknownKey {
            token: format!("<{}>", token),
            position: index,
        })?);
        index = close + 1;
    }
    Ok(keys)
}

/// Index of the `>` closing a token whose body starts at `start`.
fn token_end(chars: &[char], start: usize) -> Option<usize> {
    let mut escaped = false;
    for (index, &c) in chars.iter().enumerate().skip(start) {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '>' => return Some(index),
            _ => {}
        }
    }
    None
}

fn unescape(token: &str) -> String {
    let mut result = String::with_capacity(token.len());
    let mut chars = token.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => result.push(chars.next().unwrap_or('\\')),
            c => result.push(c),
        }
    }
    result
}

fn parse_token(token: &str) -> Option<Keystroke> {
    if let Some(text) = token.strip_prefix("paste:") {
        return Some(Keystroke::Insert(text.to_string()));
    }
    if let Some(range) = token.strip_prefix("select:") {
        let (anchor, cursor) = range.split_once('-')?;
        return Some(Keystroke::Select {
            anchor: anchor.trim().parse().ok()?,
            cursor: cursor.trim().parse().ok()?,
        });
    }
    let key = match token.to_ascii_lowercase().as_str() {
        "bs" | "backspace" => Keystroke::Backspace,
        "del" | "delete" => Keystroke::Delete,
        "left" => Keystroke::Left,
        "right" => Keystroke::Right,
        "home" => Keystroke::Home,
        "end" => Keystroke::End,
        "all" => Keystroke::SelectAll,
        "lt" => Keystroke::Insert("<".to_string()),
        _ => return None,
    };
    Some(key)
}
