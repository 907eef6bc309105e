//! Card brand detection using BIN/IIN prefix matching.
//!
//! Detection runs on every keystroke, so it has to cope with partial numbers:
//! a prefix that could still belong to several networks yields `None` until
//! enough digits are typed to tell them apart.

use crate::CardBrand;

/// Detects the card brand from a sequence of digits (0-9).
///
/// # Example
///
/// ```
/// use card_field::detect::detect_brand;
/// use card_field::CardBrand;
///
/// assert_eq!(detect_brand(&[4]), Some(CardBrand::Visa));
/// assert_eq!(detect_brand(&[3, 7]), Some(CardBrand::Amex));
///
/// // "3" alone could still be Amex, Diners or JCB
/// assert_eq!(detect_brand(&[3]), None);
/// ```
#[inline]
pub fn detect_brand(digits: &[u8]) -> Option<CardBrand> {
    // Order matters for overlapping ranges: specific patterns first.
    match digits {
        // Mir: 2200-2204 (must be before Mastercard 2221-2720)
        [2, 2, 0, 0..=4, ..] => Some(CardBrand::Mir),

        // Mastercard: 51-55 or 2221-2720
        [5, 1..=5, ..] => Some(CardBrand::Mastercard),
        [2, 2, 2, 1..=9, ..] => Some(CardBrand::Mastercard),
        [2, 2, 3..=9, _, ..] => Some(CardBrand::Mastercard),
        [2, 3..=6, _, _, ..] => Some(CardBrand::Mastercard),
        [2, 7, 0..=1, _, ..] => Some(CardBrand::Mastercard),
        [2, 7, 2, 0, ..] => Some(CardBrand::Mastercard),

        // American Express: 34 or 37
        [3, 4, ..] | [3, 7, ..] => Some(CardBrand::Amex),

        // Diners Club: 36, 38, 300-305, 309
        [3, 6, ..] | [3, 8, ..] => Some(CardBrand::DinersClub),
        [3, 0, 0..=5, ..] => Some(CardBrand::DinersClub),
        [3, 0, 9, ..] => Some(CardBrand::DinersClub),

        // JCB: 3528-3589
        [3, 5, 2, 8..=9, ..] => Some(CardBrand::Jcb),
        [3, 5, 3..=8, _, ..] => Some(CardBrand::Jcb),

        [4, ..] => Some(CardBrand::Visa),

        // Discover: 6011, 644-649, 65
        [6, 0, 1, 1, ..] => Some(CardBrand::Discover),
        [6, 4, 4..=9, ..] => Some(CardBrand::Discover),
        [6, 5, ..] => Some(CardBrand::Discover),

        // UnionPay: 62
        [6, 2, ..] => Some(CardBrand::UnionPay),

        // Maestro: 50, 56-58, remaining 6x ranges
        [5, 0, ..] | [5, 6..=8, ..] => Some(CardBrand::Maestro),
        [6, 0, 1, 0 | 2..=9, ..] | [6, 0, 0 | 2..=9, ..] => Some(CardBrand::Maestro),
        [6, 1, ..] | [6, 3, ..] | [6, 6..=9, ..] => Some(CardBrand::Maestro),

        _ => None,
    }
}

/// Detects the card brand from text, ignoring everything but ASCII digits.
///
/// Accepts the displayed value of a card number field, separators included.
///
/// ```
/// use card_field::detect::detect_brand_str;
/// use card_field::CardBrand;
///
/// assert_eq!(detect_brand_str("3782 822463 10005"), Some(CardBrand::Amex));
/// ```
pub fn detect_brand_str(input: &str) -> Option<CardBrand> {
    let digits: Vec<u8> = input
        .bytes()
        .filter(u8::is_ascii_digit)
        .take(8)
        .map(|b| b - b'0')
        .collect();
    detect_brand(&digits)
}
