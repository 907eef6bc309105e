//! The per-field edit pipeline.
//!
//! A [`FieldValidator`] is built once per field and turns every edit into the
//! text the field should display plus a verdict on it. Numeric fields go
//! through three steps:
//!
//! 1. [`diff::reconstruct`](crate::diff::reconstruct) recovers the digits the
//!    user meant and where the caret is among them.
//! 2. The field's classifier judges those digits.
//! 3. The field's formatter puts the separators back and moves the caret.
//!
//! The expiry date is judged on its formatted value, since its formatter can
//! drop a digit that cannot start a month.
//!
//! Text fields skip the first and last step.
//!
//! # Example
//!
//! ```
//! use card_field::{EditRequest, EditSnapshot, FieldValidator};
//!
//! let number = FieldValidator::card_number();
//! let result = number.evaluate(&EditRequest::new(
//!     EditSnapshot::new("4242", 4),
//!     EditSnapshot::new("42424", 5),
//! ));
//! assert_eq!(result.value, "4242 4");
//! assert_eq!(result.cursor_position, 6);
//! assert!(!result.invalid);
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::cvv::classify_cvc;
use crate::diff::{classify_edit, reconstruct_as, EditKind};
use crate::edit::{char_len, char_slice, EditRequest, FieldState, ValidateResult};
use crate::error::ParseError;
use crate::expiry::{classify_expire_date_at, YearMonth};
use crate::format::{format_card_state, format_expire_state};
use crate::validate::classify_card_number;
use crate::verdict::Verdict;

/// Read-only accessor for the card number a CVC belongs to.
pub type CardNumberSource = Arc<dyn Fn() -> String + Send + Sync>;

/// Caller-supplied rule judging a text field's value.
pub type TextRule = Arc<dyn Fn(&str) -> Verdict + Send + Sync>;

/// Kind of field, selecting its classifier and formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldKind {
    /// Card number, grouped by network.
    CardNumber,
    /// Expiry date, `MM/YY`.
    ExpireDate,
    /// Card verification code.
    Cvc,
    /// Cardholder name, upper-cased.
    CardholderName,
    /// Required free text, such as a postal code.
    FreeText,
    /// Billing country; complete as soon as one is chosen.
    Country,
}

impl FieldKind {
    /// Returns true for kinds whose value is reduced to digits.
    #[inline]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::CardNumber | Self::ExpireDate | Self::Cvc)
    }

    /// Short name, as accepted by [`FromStr`].
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CardNumber => "number",
            Self::ExpireDate => "expire",
            Self::Cvc => "cvc",
            Self::CardholderName => "name",
            Self::FreeText => "text",
            Self::Country => "country",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FieldKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "number" | "card" | "card-number" => Ok(Self::CardNumber),
            "expire" | "expiry" | "exp" => Ok(Self::ExpireDate),
            "cvc" | "cvv" => Ok(Self::Cvc),
            "name" | "cardholder" => Ok(Self::CardholderName),
            "text" | "zip" => Ok(Self::FreeText),
            "country" => Ok(Self::Country),
            _ => Err(ParseError::UnknownField(s.to_string())),
        }
    }
}

/// Edit pipeline for one field.
///
/// Holds no state that changes between edits; the only context it reads is
/// the card number accessor of a CVC field and an optional fixed "today" for
/// the expiry date.
#[derive(Clone)]
pub struct FieldValidator {
    kind: FieldKind,
    card_number: Option<CardNumberSource>,
    rule: Option<TextRule>,
    today: Option<YearMonth>,
}

impl FieldValidator {
    fn of(kind: FieldKind) -> Self {
        Self {
            kind,
            card_number: None,
            rule: None,
            today: None,
        }
    }

    /// Card number field.
    pub fn card_number() -> Self {
        Self::of(FieldKind::CardNumber)
    }

    /// Expiry date field, judged against the current month.
    pub fn expire_date() -> Self {
        Self::of(FieldKind::ExpireDate)
    }

    /// CVC field reading the card number through `card_number`.
    pub fn cvc<F>(card_number: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Self {
            card_number: Some(Arc::new(card_number)),
            ..Self::of(FieldKind::Cvc)
        }
    }

    /// Cardholder name field.
    pub fn cardholder_name() -> Self {
        Self::of(FieldKind::CardholderName)
    }

    /// Required free text field: invalid while empty, never finished.
    pub fn required() -> Self {
        Self::of(FieldKind::FreeText)
    }

    /// Free text field judged by `rule`.
    pub fn text_with_rule<F>(rule: F) -> Self
    where
        F: Fn(&str) -> Verdict + Send + Sync + 'static,
    {
        Self {
            rule: Some(Arc::new(rule)),
            ..Self::of(FieldKind::FreeText)
        }
    }

    /// Country field: invalid while empty, finished once set.
    pub fn country() -> Self {
        Self::of(FieldKind::Country)
    }

    /// Validator for `kind` with default context.
    ///
    /// A CVC built this way assumes an unknown card network.
    pub fn for_kind(kind: FieldKind) -> Self {
        Self::of(kind)
    }

    /// Pins the month expiry dates are judged against.
    pub fn with_today(mut self, today: YearMonth) -> Self {
        self.today = Some(today);
        self
    }

    /// Replaces the card number accessor used by a CVC field.
    pub fn with_card_number_source(mut self, source: CardNumberSource) -> Self {
        self.card_number = Some(source);
        self
    }

    /// The field kind.
    #[inline]
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Runs the pipeline for one edit.
    pub fn evaluate(&self, request: &EditRequest) -> ValidateResult {
        let (edit, state) = if self.kind.is_numeric() {
            let edit = classify_edit(&request.before, &request.after);
            (edit, reconstruct_as(request, edit))
        } else {
            let after = &request.after;
            (
                EditKind::Other,
                self.prepare_text(after.value(), after.cursor_position()),
            )
        };

        let formatted = self.format(&state);
        // The expiry formatter may drop digits, so judge what is displayed.
        let verdict = match self.kind {
            FieldKind::ExpireDate => self.classify(&formatted.value),
            _ => self.classify(&state.value),
        };

        tracing::trace!(
            field = %self.kind,
            edit = %edit,
            length = state.value.len(),
            state = %verdict.state,
            finished = verdict.finished,
            "field edit evaluated"
        );

        ValidateResult {
            cursor_position: formatted.position.min(char_len(&formatted.value)),
            value: formatted.value,
            invalid: verdict.is_invalid(),
            finished: verdict.finished,
        }
    }

    /// Judges a value the way [`evaluate`](Self::evaluate) does.
    ///
    /// Numeric kinds expect the stripped digits; the expiry date also accepts
    /// its `MM/YY` display.
    pub fn classify(&self, value: &str) -> Verdict {
        match self.kind {
            FieldKind::CardNumber => classify_card_number(value),
            FieldKind::ExpireDate => {
                classify_expire_date_at(value, self.today.unwrap_or_else(YearMonth::now))
            }
            FieldKind::Cvc => {
                let number = self.card_number.as_ref().map(|source| source()).unwrap_or_default();
                classify_cvc(&number, value)
            }
            FieldKind::FreeText => match &self.rule {
                Some(rule) => rule(value),
                None => required(value, false),
            },
            FieldKind::CardholderName => required(value, false),
            FieldKind::Country => required(value, true),
        }
    }

    /// Puts the field's display formatting on a prepared state.
    pub fn format(&self, state: &FieldState) -> FieldState {
        match self.kind {
            FieldKind::CardNumber => format_card_state(state),
            FieldKind::ExpireDate => format_expire_state(state),
            _ => FieldState::new(state.value.clone(), state.position),
        }
    }

    fn prepare_text(&self, value: &str, position: usize) -> FieldState {
        if self.kind != FieldKind::CardholderName {
            return FieldState::new(value, position);
        }
        // Upper-casing may change the char count ("ß" -> "SS"), so map the
        // caret through the upper-cased prefix.
        let position = char_len(&char_slice(value, 0, position).to_uppercase());
        FieldState::new(value.to_uppercase(), position)
    }
}

fn required(value: &str, finish_when_set: bool) -> Verdict {
    if value.is_empty() {
        Verdict::invalid()
    } else {
        Verdict::valid(finish_when_set)
    }
}

impl fmt::Debug for FieldValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldValidator")
            .field("kind", &self.kind)
            .field("card_number", &self.card_number.as_ref().map(|_| "<source>"))
            .field("rule", &self.rule.as_ref().map(|_| "<rule>"))
            .field("today", &self.today)
            .finish()
    }
}
