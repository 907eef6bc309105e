//! The card entry form: fields, focus order and submission.
//!
//! A [`CardForm`] owns one text field per configured [`CardField`], keeps each
//! field's displayed text and caret, and runs the field's
//! [`FieldValidator`] on every keystroke. When a field becomes finished with
//! the caret at its end, the form reports the next field to focus.
//!
//! Fields always come in this order, optional ones only when the
//! [`FormConfig`] asks for them:
//!
//! number → expiry → CVC → [cardholder name] → [country] → [zip]
//!
//! # Example
//!
//! ```
//! use card_field::form::{CardField, CardForm, FormConfig};
//! use card_field::keys::Keystroke;
//!
//! let mut form = CardForm::new(&FormConfig::default());
//! let update = form
//!     .edit(CardField::Number, &Keystroke::Insert("4242424242424242".into()))
//!     .unwrap();
//!
//! assert_eq!(update.result.value, "4242 4242 4242 4242");
//! assert_eq!(update.advance_to, Some(CardField::ExpireDate));
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use zeroize::Zeroize;

use crate::edit::{char_len, EditRequest, EditSnapshot, ValidateResult};
use crate::error::ParseError;
use crate::expiry::{expire_month, expire_year, YearMonth};
use crate::field::{FieldKind, FieldValidator};
use crate::format::strip_formatting;
use crate::keys::{apply_keystroke, Keystroke};
use crate::mask::{mask_card_number, mask_secret};
use crate::verdict::{ValidationState, Verdict};

/// A field of the card entry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardField {
    /// Card number.
    Number,
    /// Expiry date.
    ExpireDate,
    /// Card verification code.
    Cvc,
    /// Cardholder name.
    Name,
    /// Billing address country.
    AddressCountry,
    /// Billing address postal code.
    AddressZip,
}

impl CardField {
    /// Every field, in focus order.
    pub const ALL: [CardField; 6] = [
        Self::Number,
        Self::ExpireDate,
        Self::Cvc,
        Self::Name,
        Self::AddressCountry,
        Self::AddressZip,
    ];

    /// Kind of pipeline the field runs.
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::Number => FieldKind::CardNumber,
            Self::ExpireDate => FieldKind::ExpireDate,
            Self::Cvc => FieldKind::Cvc,
            Self::Name => FieldKind::CardholderName,
            Self::AddressCountry => FieldKind::Country,
            Self::AddressZip => FieldKind::FreeText,
        }
    }

    /// Short name, as accepted by [`FromStr`].
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::ExpireDate => "expire",
            Self::Cvc => "cvc",
            Self::Name => "name",
            Self::AddressCountry => "country",
            Self::AddressZip => "zip",
        }
    }
}

impl fmt::Display for CardField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CardField {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "number" | "card" | "card-number" => Ok(Self::Number),
            "expire" | "expiry" | "exp" => Ok(Self::ExpireDate),
            "cvc" | "cvv" => Ok(Self::Cvc),
            "name" | "cardholder" => Ok(Self::Name),
            "country" => Ok(Self::AddressCountry),
            "zip" | "postcode" => Ok(Self::AddressZip),
            _ => Err(ParseError::UnknownField(s.to_string())),
        }
    }
}

/// Which optional fields a form carries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct FormConfig {
    /// Ask for the cardholder name.
    pub need_cardholder_name: bool,
    /// Ask for the billing country.
    pub need_country: bool,
    /// Ask for the billing postal code.
    pub need_zip: bool,
    /// Country the country field starts with, empty for none.
    pub default_country: String,
}

impl FormConfig {
    /// A form asking for every field.
    pub fn full(default_country: impl Into<String>) -> Self {
        Self {
            need_cardholder_name: true,
            need_country: true,
            need_zip: true,
            default_country: default_country.into(),
        }
    }

    /// The fields this configuration asks for, in focus order.
    pub fn fields(&self) -> Vec<CardField> {
        CardField::ALL
            .into_iter()
            .filter(|field| match field {
                CardField::Name => self.need_cardholder_name,
                CardField::AddressCountry => self.need_country,
                CardField::AddressZip => self.need_zip,
                _ => true,
            })
            .collect()
    }
}

/// Outcome of one keystroke on a form field.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FieldUpdate {
    /// What the field shows now.
    pub result: ValidateResult,
    /// Field to focus next, set when this keystroke finished the field.
    pub advance_to: Option<CardField>,
}

struct Slot {
    field: CardField,
    validator: FieldValidator,
    snapshot: EditSnapshot,
    result: ValidateResult,
}

impl Slot {
    fn new(field: CardField) -> Self {
        Self {
            field,
            validator: FieldValidator::for_kind(field.kind()),
            snapshot: EditSnapshot::default(),
            result: ValidateResult::default(),
        }
    }

    /// Value as the classifier expects it.
    fn classifier_input(&self) -> String {
        if self.field.kind().is_numeric() {
            strip_formatting(self.snapshot.value())
        } else {
            self.snapshot.value().to_string()
        }
    }
}

/// A card entry form.
pub struct CardForm {
    slots: Vec<Slot>,
    focus: CardField,
}

impl CardForm {
    /// Creates an empty form, with the country pre-filled if configured.
    pub fn new(config: &FormConfig) -> Self {
        let mut form = Self {
            slots: config.fields().into_iter().map(Slot::new).collect(),
            focus: CardField::Number,
        };
        if config.need_country && !config.default_country.is_empty() {
            form.set_value(CardField::AddressCountry, &config.default_country);
        }
        form
    }

    /// Pins the month expiry dates are judged against.
    pub fn with_today(mut self, today: YearMonth) -> Self {
        if let Some(index) = self.index_of(CardField::ExpireDate) {
            let slot = &mut self.slots[index];
            slot.validator = slot.validator.clone().with_today(today);
        }
        self
    }

    /// The form's fields, in focus order.
    pub fn fields(&self) -> impl Iterator<Item = CardField> + '_ {
        self.slots.iter().map(|slot| slot.field)
    }

    /// Returns true if the form carries `field`.
    #[inline]
    pub fn contains(&self, field: CardField) -> bool {
        self.index_of(field).is_some()
    }

    /// The focused field.
    #[inline]
    pub const fn focus(&self) -> CardField {
        self.focus
    }

    /// Moves focus to `field`. Returns false if the form does not carry it.
    pub fn set_focus(&mut self, field: CardField) -> bool {
        if self.contains(field) {
            self.focus = field;
            true
        } else {
            false
        }
    }

    /// The field after `field` in focus order.
    pub fn next_field(&self, field: CardField) -> Option<CardField> {
        let index = self.index_of(field)?;
        self.slots.get(index + 1).map(|slot| slot.field)
    }

    /// The field before `field` in focus order.
    pub fn previous_field(&self, field: CardField) -> Option<CardField> {
        let index = self.index_of(field)?;
        index
            .checked_sub(1)
            .and_then(|previous| self.slots.get(previous))
            .map(|slot| slot.field)
    }

    /// Text a field displays.
    pub fn value(&self, field: CardField) -> Option<&str> {
        self.slot(field).map(|slot| slot.snapshot.value())
    }

    /// Text and caret of a field.
    pub fn snapshot(&self, field: CardField) -> Option<&EditSnapshot> {
        self.slot(field).map(|slot| &slot.snapshot)
    }

    /// Outcome of the last edit that changed a field.
    pub fn result(&self, field: CardField) -> Option<&ValidateResult> {
        self.slot(field).map(|slot| &slot.result)
    }

    /// Applies a keystroke to `field`.
    ///
    /// Keystrokes that leave the text unchanged (caret movement, selection,
    /// backspace at the start) only move the caret; the validator runs when
    /// the text changes. Returns `None` if the form does not carry `field`.
    pub fn edit(&mut self, field: CardField, key: &Keystroke) -> Option<FieldUpdate> {
        let index = self.index_of(field)?;
        let before = self.slots[index].snapshot.clone();
        let after = apply_keystroke(&before, key);

        if after.value() == before.value() {
            let slot = &mut self.slots[index];
            let result = ValidateResult {
                cursor_position: after.cursor_position(),
                ..slot.result.clone()
            };
            slot.snapshot = after;
            return Some(FieldUpdate {
                result,
                advance_to: None,
            });
        }
        Some(self.apply(index, EditRequest::new(before, after)))
    }

    /// Applies a keystroke to the focused field, following any focus advance.
    pub fn edit_focused(&mut self, key: &Keystroke) -> FieldUpdate {
        let focus = self.focus;
        let update = self.edit(focus, key).unwrap_or_else(|| FieldUpdate {
            result: ValidateResult::default(),
            advance_to: None,
        });
        if let Some(next) = update.advance_to {
            self.focus = next;
        }
        update
    }

    /// Replaces the whole text of `field`, as a paste over everything would.
    pub fn set_value(&mut self, field: CardField, value: &str) -> Option<FieldUpdate> {
        let index = self.index_of(field)?;
        let before = self.slots[index].snapshot.clone();
        Some(self.apply(index, EditRequest::replace_all(before, value)))
    }

    /// First field, in focus order, whose value is not valid yet.
    ///
    /// This is the field to focus and flag when the user tries to submit.
    pub fn first_invalid(&self) -> Option<CardField> {
        (0..self.slots.len())
            .find(|&index| {
                let verdict = self.verdict(index);
                verdict.state != ValidationState::Valid
            })
            .map(|index| self.slots[index].field)
    }

    /// Returns true when every field holds a valid value.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.first_invalid().is_none()
    }

    /// Assembles the entered card details, without checking them.
    ///
    /// The card number is returned without its display spaces. Fields the
    /// form does not carry are left empty.
    pub fn collect(&self) -> UncheckedCardDetails {
        let text = |field| self.value(field).unwrap_or_default().to_string();
        let expire = text(CardField::ExpireDate);

        UncheckedCardDetails {
            number: strip_formatting(&text(CardField::Number)),
            cvc: text(CardField::Cvc),
            expire_month: expire_month(&expire),
            expire_year: expire_year(&expire),
            cardholder_name: text(CardField::Name),
            address_country: text(CardField::AddressCountry),
            address_zip: text(CardField::AddressZip),
        }
    }

    fn apply(&mut self, index: usize, request: EditRequest) -> FieldUpdate {
        let result = self.validator(index).evaluate(&request);

        let slot = &mut self.slots[index];
        let field = slot.field;
        let was_finished = slot.result.finished;
        slot.snapshot = EditSnapshot::new(result.value.clone(), result.cursor_position);
        slot.result = result.clone();

        if field == CardField::Number {
            self.refresh(CardField::Cvc);
        }

        let at_end = result.cursor_position == char_len(&result.value);
        let advance_to = if result.finished && !was_finished && at_end {
            self.next_field(field)
        } else {
            None
        };
        if let Some(next) = advance_to {
            tracing::debug!(from = %field, to = %next, "field finished, advancing focus");
        }
        FieldUpdate { result, advance_to }
    }

    /// Re-judges a field whose verdict depends on another field.
    fn refresh(&mut self, field: CardField) {
        if let Some(index) = self.index_of(field) {
            let verdict = self.verdict(index);
            let slot = &mut self.slots[index];
            if !slot.snapshot.is_empty() {
                slot.result.invalid = verdict.is_invalid();
                slot.result.finished = verdict.finished;
            }
        }
    }

    fn verdict(&self, index: usize) -> Verdict {
        let slot = &self.slots[index];
        self.validator(index).classify(&slot.classifier_input())
    }

    /// The slot's validator, with the CVC bound to the current card number.
    fn validator(&self, index: usize) -> FieldValidator {
        let slot = &self.slots[index];
        if slot.field != CardField::Cvc {
            return slot.validator.clone();
        }
        let number = self.value(CardField::Number).unwrap_or_default().to_string();
        slot.validator
            .clone()
            .with_card_number_source(Arc::new(move || number.clone()))
    }

    fn index_of(&self, field: CardField) -> Option<usize> {
        self.slots.iter().position(|slot| slot.field == field)
    }

    fn slot(&self, field: CardField) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.field == field)
    }
}

impl fmt::Debug for CardForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardForm")
            .field("fields", &self.fields().collect::<Vec<_>>())
            .field("focus", &self.focus)
            .finish()
    }
}

impl Drop for CardForm {
    fn drop(&mut self) {
        for slot in &mut self.slots {
            slot.snapshot.zeroize();
            slot.result.value.zeroize();
        }
    }
}

/// Card details as entered, before any server-side check.
///
/// Debug and Display output is masked. The values are zeroed on drop.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct UncheckedCardDetails {
    number: String,
    cvc: String,
    expire_month: u32,
    expire_year: u32,
    cardholder_name: String,
    address_country: String,
    address_zip: String,
}

impl UncheckedCardDetails {
    /// Card number digits.
    #[inline]
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Card verification code.
    #[inline]
    pub fn cvc(&self) -> &str {
        &self.cvc
    }

    /// Expiry month, 0 if missing.
    #[inline]
    pub const fn expire_month(&self) -> u32 {
        self.expire_month
    }

    /// Four-digit expiry year.
    #[inline]
    pub const fn expire_year(&self) -> u32 {
        self.expire_year
    }

    /// Cardholder name, empty if not asked for.
    #[inline]
    pub fn cardholder_name(&self) -> &str {
        &self.cardholder_name
    }

    /// Billing country, empty if not asked for.
    #[inline]
    pub fn address_country(&self) -> &str {
        &self.address_country
    }

    /// Billing postal code, empty if not asked for.
    #[inline]
    pub fn address_zip(&self) -> &str {
        &self.address_zip
    }

    /// The card number with all but the last 4 digits masked.
    #[inline]
    pub fn masked_number(&self) -> String {
        mask_card_number(&self.number)
    }
}

impl fmt::Debug for UncheckedCardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UncheckedCardDetails")
            .field("number", &self.masked_number())
            .field("cvc", &mask_secret(&self.cvc))
            .field("expire_month", &self.expire_month)
            .field("expire_year", &self.expire_year)
            .field("cardholder_name", &self.cardholder_name)
            .field("address_country", &self.address_country)
            .field("address_zip", &self.address_zip)
            .finish()
    }
}

impl fmt::Display for UncheckedCardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:02}/{}",
            self.masked_number(),
            self.expire_month,
            self.expire_year
        )
    }
}

impl Zeroize for UncheckedCardDetails {
    fn zeroize(&mut self) {
        self.number.zeroize();
        self.cvc.zeroize();
        self.expire_month.zeroize();
        self.expire_year.zeroize();
        self.cardholder_name.zeroize();
        self.address_country.zeroize();
        self.address_zip.zeroize();
    }
}

impl Drop for UncheckedCardDetails {
    fn drop(&mut self) {
        self.zeroize();
    }
}
