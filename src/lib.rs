//! # card_field
//!
//! Live reformatting and validation of payment card input fields.
//!
//! Every keystroke in a card form hands the field's state right before and
//! right after the edit to a [`FieldValidator`]. The validator works out what
//! the user meant, judges the value and returns the canonical text to show,
//! where the caret goes, and whether the field is invalid or finished.
//!
//! ## Features
//!
//! - Card numbers grouped by network as they are typed (`4242 4242 4242 4242`,
//!   Amex `3782 822463 10005`)
//! - Expiry dates shown as `MM/YY`, with implied leading zeros
//! - CVC length that follows the card number's network
//! - Backspace and delete over separators remove the neighbouring digit
//! - Luhn, length and date checks reported as valid, incomplete or invalid
//! - A headless [`CardForm`] with focus order and auto-advance
//! - Interfaces: library, CLI (`cli` feature), WASM (`wasm` feature)
//!
//! ## Quick Start
//!
//! ```rust
//! use card_field::{EditRequest, EditSnapshot, FieldValidator};
//!
//! let number = FieldValidator::card_number();
//!
//! // The user typed the 16th digit.
//! let result = number.evaluate(&EditRequest::new(
//!     EditSnapshot::new("4242 4242 4242 424", 18),
//!     EditSnapshot::new("4242 4242 4242 4242", 19),
//! ));
//! assert_eq!(result.value, "4242 4242 4242 4242");
//! assert!(result.finished);
//!
//! // Backspace right after a separator removes the digit before it.
//! let result = number.evaluate(&EditRequest::new(
//!     EditSnapshot::new("4242 4", 5),
//!     EditSnapshot::new("42424", 4),
//! ));
//! assert_eq!(result.value, "4244");
//! assert_eq!(result.cursor_position, 3);
//! ```
//!
//! ## Expiry Dates
//!
//! ```rust
//! use card_field::expiry::YearMonth;
//! use card_field::{EditRequest, EditSnapshot, FieldValidator};
//!
//! let expire = FieldValidator::expire_date().with_today(YearMonth::new(2026, 10));
//!
//! let result = expire.evaluate(&EditRequest::new(
//!     EditSnapshot::default(),
//!     EditSnapshot::new("3", 1),
//! ));
//! assert_eq!(result.value, "03/");
//! assert_eq!(result.cursor_position, 3);
//! ```
//!
//! ## CVC
//!
//! ```rust
//! use card_field::{EditRequest, EditSnapshot, FieldValidator};
//!
//! let cvc = FieldValidator::cvc(|| "3782 822463 10005".to_string());
//! let result = cvc.evaluate(&EditRequest::new(
//!     EditSnapshot::new("12", 2),
//!     EditSnapshot::new("123", 3),
//! ));
//! // Amex needs four digits.
//! assert!(!result.invalid);
//! assert!(!result.finished);
//! ```
//!
//! ## Card Form
//!
//! ```rust
//! use card_field::keys::Keystroke;
//! use card_field::{CardField, CardForm, FormConfig};
//!
//! let mut form = CardForm::new(&FormConfig::default());
//! form.edit(CardField::Number, &Keystroke::Insert("4242424242424242".into()));
//! form.edit(CardField::ExpireDate, &Keystroke::Insert("1230".into()));
//! form.edit(CardField::Cvc, &Keystroke::Insert("123".into()));
//!
//! let details = form.collect();
//! assert_eq!(details.expire_month(), 12);
//! println!("Card: {:?}", details); // number and CVC masked
//! ```
//!
//! ## Supported Card Brands
//!
//! | Brand | Prefix | Length | Grouping | CVC |
//! |-------|--------|--------|----------|-----|
//! | Visa | 4 | 13, 16, 19 | 4-4-4-4 | 3 |
//! | Mastercard | 51-55, 2221-2720 | 16 | 4-4-4-4 | 3 |
//! | American Express | 34, 37 | 15 | 4-6-5 | 4 |
//! | Discover | 6011, 644-649, 65 | 16-19 | 4-4-4-4 | 3 |
//! | Diners Club | 36, 38, 300-305 | 14-19 | 4-6-4 (14 digits) | 3 |
//! | JCB | 3528-3589 | 16-19 | 4-4-4-4 | 3 |
//! | UnionPay | 62 | 16-19 | 4-4-4-4 | 3 |
//! | Maestro | 50, 56-69 | 12-19 | 4-4-4-4 | 3 |
//! | Mir | 2200-2204 | 16-19 | 4-4-4-4 | 3 |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | Serialize/Deserialize on field and form types |
//! | `cli` | `cardfield` command-line tool |
//! | `wasm` | WebAssembly bindings |
//!
//! ## Security
//!
//! - Card digits never appear in log events
//! - `Debug` and `Display` of [`UncheckedCardDetails`] show masked values only
//! - Form values are zeroized when the form or the details are dropped
//! - No unsafe code (`#![deny(unsafe_code)]`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod card;
pub mod cvv;
pub mod detect;
pub mod diff;
pub mod edit;
pub mod error;
pub mod expiry;
pub mod field;
pub mod form;
pub mod format;
pub mod keys;
pub mod luhn;
pub mod mask;
pub mod validate;
pub mod verdict;

#[cfg(feature = "wasm")]
mod wasm;

// Re-export main types at crate root
pub use card::{CardBrand, MAX_CARD_DIGITS, MIN_CARD_DIGITS};
pub use edit::{EditRequest, EditSnapshot, FieldState, ValidateResult};
pub use error::ParseError;
pub use field::{FieldKind, FieldValidator};
pub use form::{CardField, CardForm, FieldUpdate, FormConfig, UncheckedCardDetails};
pub use verdict::{ValidationState, Verdict};

// Re-export the classifiers
pub use cvv::classify_cvc;
pub use expiry::classify_expire_date;
pub use validate::{card_number_groups, classify_card_number, is_valid};
