//! Masking of card data for display and logging.
//!
//! Field values never reach log output; when a card number has to be shown
//! outside the field (debug output, CLI summaries) it goes through these
//! helpers first.
//!
//! PCI-DSS allows displaying the last 4 digits of a card number. The CVC is
//! never shown, not even its length.

use crate::edit::FieldState;
use crate::format::{format_card_state_with_groups, strip_formatting};
use crate::validate::card_number_groups;

/// Placeholder shown instead of a secret value.
pub const REDACTED: &str = "***";

/// Masks a card number, keeping the last 4 digits and the network grouping.
///
/// Any formatting in `input` is ignored. Numbers of 4 digits or fewer are
/// masked entirely.
///
/// # Example
///
/// ```
/// use card_field::mask::mask_card_number;
///
/// assert_eq!(mask_card_number("4242 4242 4242 4242"), "**** **** **** 4242");
/// assert_eq!(mask_card_number("378282246310005"), "**** ****** *0005");
/// assert_eq!(mask_card_number("424"), "***");
/// ```
pub fn mask_card_number(input: &str) -> String {
    let digits = strip_formatting(input);
    let groups = card_number_groups(&digits);
    let len = digits.len();
    let hidden = if len > 4 { len - 4 } else { len };

    // Digits are ASCII, so byte and char indices agree.
    let masked: String = "*".repeat(hidden) + &digits[hidden..];
    format_card_state_with_groups(&FieldState::new(masked, 0), &groups).value
}

/// Extracts the last 4 digits of a card number.
///
/// Returns an empty string if there are fewer than 4 digits.
#[inline]
pub fn last_four(input: &str) -> String {
    let digits = strip_formatting(input);
    if digits.len() >= 4 {
        digits[digits.len() - 4..].to_string()
    } else {
        String::new()
    }
}

/// Masks a value entirely, for the CVC and other secrets.
#[inline]
pub fn mask_secret(input: &str) -> &'static str {
    if input.is_empty() {
        ""
    } else {
        REDACTED
    }
}
