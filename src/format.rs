//! Canonical display formatting for numeric card fields.
//!
//! Formatters take a numbers-only [`FieldState`] and return the text the field
//! should display, moving the caret so it stays next to the same digit.
//!
//! # Format Conventions
//!
//! - **Card number**: digit groups separated by single spaces, grouping chosen
//!   by network (`XXXX XXXX XXXX XXXX`, Amex `XXXX XXXXXX XXXXX`)
//! - **Expiry date**: `MM/YY`, with a leading zero implied for months 2-9
//!
//! # Example
//!
//! ```
//! use card_field::format::{format_card_number, format_expire_state};
//! use card_field::FieldState;
//!
//! assert_eq!(format_card_number("4242424242424242"), "4242 4242 4242 4242");
//! assert_eq!(format_card_number("378282246310005"), "3782 822463 10005");
//!
//! let state = format_expire_state(&FieldState::new("3", 1));
//! assert_eq!(state, FieldState::new("03/", 3));
//! ```

use crate::edit::{char_len, FieldState};
use crate::validate::card_number_groups;

/// Separator between card number groups.
pub const GROUP_SEPARATOR: char = ' ';

/// Separator between expiry month and year.
pub const EXPIRE_SEPARATOR: char = '/';

/// Formats a card number using the grouping of its network.
pub fn format_card_state(state: &FieldState) -> FieldState {
    format_card_state_with_groups(state, &card_number_groups(&state.value))
}

/// Formats a card number with an explicit grouping scheme.
///
/// A space goes after every group that ends before the end of the value;
/// digits past the last group follow its separator without further spaces.
/// The caret moves past each space inserted strictly before it, so a caret
/// right at the end of a group stays in front of the separator. This is
/// stricter than counting a space at the caret too, which would give 10
/// below instead of 9.
///
/// ```
/// use card_field::format::format_card_state_with_groups;
/// use card_field::FieldState;
///
/// let state = FieldState::new("4242424242424242", 8);
/// let formatted = format_card_state_with_groups(&state, &[4, 4, 4, 4, 4]);
/// assert_eq!(formatted, FieldState::new("4242 4242 4242 4242", 9));
/// ```
pub fn format_card_state_with_groups(state: &FieldState, groups: &[usize]) -> FieldState {
    let length = char_len(&state.value);
    let cursor = state.position.min(length);
    let mut boundaries = groups
        .iter()
        .filter(|&&group| group > 0)
        .scan(0usize, |end, &group| {
            *end += group;
            Some(*end)
        })
        .take_while(|&end| end < length)
        .peekable();

    let mut value = String::with_capacity(length + groups.len());
    let mut position = cursor;
    for (index, c) in state.value.chars().enumerate() {
        if boundaries.next_if_eq(&index).is_some() {
            value.push(GROUP_SEPARATOR);
            if index < cursor {
                position += 1;
            }
        }
        value.push(c);
    }
    FieldState { value, position }
}

/// Formats expiry digits (`MMYY`) as `MM/YY` while they are typed.
///
/// - A `1` followed by a digit above `2` cannot start a month, so the second
///   digit is dropped and only the `1` kept.
/// - A first digit above `1` gets a leading zero (`3` is `03`).
/// - From two digits on, the value is cut to four digits and a slash is put
///   after the month.
pub fn format_expire_state(state: &FieldState) -> FieldState {
    let mut digits: Vec<char> = state.value.chars().collect();
    let mut position = state.position.min(digits.len());

    match digits.as_slice() {
        [] => return FieldState::new(String::new(), 0),
        ['1', second, ..] if *second > '2' => {
            return FieldState::new("1", position.min(1));
        }
        [first, ..] if *first > '1' => {
            digits.insert(0, '0');
            position += 1;
        }
        _ => {}
    }

    if digits.len() > 1 {
        digits.truncate(4);
        digits.insert(2, EXPIRE_SEPARATOR);
        if position >= 2 {
            position += 1;
        }
    }
    let value: String = digits.into_iter().collect();
    FieldState::new(value, position)
}

/// Strips all formatting from a value, leaving only ASCII digits.
///
/// ```
/// use card_field::format::strip_formatting;
///
/// assert_eq!(strip_formatting("4242 4242 4242 4242"), "4242424242424242");
/// assert_eq!(strip_formatting("03/29"), "0329");
/// ```
pub fn strip_formatting(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Formats a card number for display, ignoring any formatting already present.
pub fn format_card_number(input: &str) -> String {
    format_card_state(&FieldState::new(strip_formatting(input), 0)).value
}

/// Formats an expiry date for display, ignoring any formatting already present.
///
/// ```
/// use card_field::format::format_expire_date;
///
/// assert_eq!(format_expire_date("329"), "03/29");
/// assert_eq!(format_expire_date("12/30"), "12/30");
/// ```
pub fn format_expire_date(input: &str) -> String {
    format_expire_state(&FieldState::new(strip_formatting(input), 0)).value
}
