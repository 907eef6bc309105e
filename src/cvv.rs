//! CVV/CVC/CID classification.
//!
//! The number of digits depends on the card network, so the classifier is
//! given the card number the user entered alongside the code:
//!
//! - American Express: 4 digits (printed on front)
//! - All other cards: 3 digits (printed on back)
//!
//! # Example
//!
//! ```
//! use card_field::cvv::classify_cvc;
//! use card_field::{ValidationState, Verdict};
//!
//! assert_eq!(classify_cvc("4242 4242 4242 4242", "123"), Verdict::valid(true));
//! assert_eq!(classify_cvc("3782 822463 10005", "123").state, ValidationState::Incomplete);
//! ```

use crate::card::{CardBrand, DEFAULT_CVC_LENGTH};
use crate::detect::detect_brand_str;
use crate::verdict::Verdict;

/// Returns the expected CVC length for the network of `card_number`.
///
/// Falls back to 3 digits while the network is unknown.
#[inline]
pub fn cvc_length_for_number(card_number: &str) -> usize {
    detect_brand_str(card_number).map_or(DEFAULT_CVC_LENGTH, |brand| brand.cvc_length())
}

/// Classifies a CVC for the card number it belongs to.
pub fn classify_cvc(card_number: &str, cvc: &str) -> Verdict {
    classify_cvc_for_length(cvc, cvc_length_for_number(card_number))
}

/// Classifies a CVC for a known card brand.
#[inline]
pub fn classify_cvc_for_brand(brand: CardBrand, cvc: &str) -> Verdict {
    classify_cvc_for_length(cvc, brand.cvc_length())
}

fn classify_cvc_for_length(cvc: &str, expected: usize) -> Verdict {
    if !cvc.bytes().all(|b| b.is_ascii_digit()) {
        return Verdict::invalid();
    }
    let length = cvc.len();
    if length < expected {
        Verdict::incomplete()
    } else if length > expected {
        Verdict::invalid()
    } else {
        Verdict::valid(true)
    }
}
