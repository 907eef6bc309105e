//! Card number classification while the number is being typed.
//!
//! Unlike a one-shot validator this has to answer for every prefix of a
//! number: a short prefix is [`Incomplete`](ValidationState::Incomplete), not
//! wrong, and only a number that reached a length its network issues is held
//! to the Luhn checksum.

use crate::card::{CardBrand, DEFAULT_GROUPS, DEFAULT_TYPICAL_LENGTH, MAX_CARD_DIGITS, MIN_CARD_DIGITS};
use crate::detect::detect_brand;
use crate::luhn;
use crate::verdict::{ValidationState, Verdict};

/// Classifies a card number.
///
/// `number` may contain whitespace; any other non-digit makes it invalid.
///
/// # Example
///
/// ```
/// use card_field::validate::classify_card_number;
/// use card_field::ValidationState;
///
/// assert_eq!(classify_card_number("4242").state, ValidationState::Incomplete);
///
/// let verdict = classify_card_number("4242 4242 4242 4242");
/// assert_eq!(verdict.state, ValidationState::Valid);
/// assert!(verdict.finished);
///
/// assert_eq!(classify_card_number("4242424242424241").state, ValidationState::Invalid);
/// ```
pub fn classify_card_number(number: &str) -> Verdict {
    let mut digits = Vec::with_capacity(MAX_CARD_DIGITS);
    for c in number.chars() {
        match c {
            '0'..='9' => digits.push(c as u8 - b'0'),
            c if c.is_whitespace() => {}
            _ => return Verdict::invalid(),
        }
    }
    classify_digits(&digits)
}

/// Classifies a card number given as digits (0-9).
pub fn classify_digits(digits: &[u8]) -> Verdict {
    if digits.is_empty() {
        return Verdict::incomplete();
    }

    let length = digits.len();
    let brand = detect_brand(digits);
    let (typical, max, valid_length) = match brand {
        Some(brand) => (
            brand.typical_length(),
            brand.max_length(),
            brand.is_valid_length(length),
        ),
        None => (
            DEFAULT_TYPICAL_LENGTH,
            MAX_CARD_DIGITS,
            (MIN_CARD_DIGITS..=MAX_CARD_DIGITS).contains(&length),
        ),
    };

    if length > max {
        return Verdict::invalid();
    }
    if !valid_length {
        return Verdict::incomplete();
    }
    if luhn::validate(digits) {
        Verdict::valid(length == typical || length == max)
    } else if length >= typical {
        Verdict::invalid()
    } else {
        Verdict::incomplete()
    }
}

/// Digit grouping for displaying `digits`, looked up from its network.
///
/// Only ASCII digits in `digits` are considered.
///
/// ```
/// use card_field::validate::card_number_groups;
///
/// assert_eq!(card_number_groups("4242424242424242"), vec![4, 4, 4, 4, 4]);
/// assert_eq!(card_number_groups("378282246310005"), vec![4, 6, 5]);
/// ```
pub fn card_number_groups(digits: &str) -> Vec<usize> {
    let values: Vec<u8> = digits
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();
    match detect_brand(&values) {
        Some(brand) => brand.groups(values.len()).to_vec(),
        None => DEFAULT_GROUPS.to_vec(),
    }
}

/// Returns true if the number is complete and valid.
#[inline]
pub fn is_valid(number: &str) -> bool {
    classify_card_number(number).state == ValidationState::Valid
}

/// Detects the brand of a (possibly partial) displayed card number.
#[inline]
pub fn brand_of(number: &str) -> Option<CardBrand> {
    crate::detect::detect_brand_str(number)
}
