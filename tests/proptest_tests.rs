//! Property-based tests using proptest.
//!
//! These tests verify invariants that should hold for all inputs,
//! helping discover edge cases that manual tests might miss.

use card_field::diff::numbers_only;
use card_field::expiry::YearMonth;
use card_field::format::{
    format_card_number, format_card_state, format_expire_date, strip_formatting,
};
use card_field::keys::{apply_script, parse_script, Keystroke};
use card_field::{
    luhn, EditRequest, EditSnapshot, FieldKind, FieldState, FieldValidator,
};
use proptest::prelude::*;

const TODAY: YearMonth = YearMonth::new(2026, 10);

// =============================================================================
// STRATEGIES
// =============================================================================

/// Generates a random digit string of a length within range.
fn digit_string(range: std::ops::RangeInclusive<usize>) -> impl Strategy<Value = String> {
    proptest::collection::vec(prop::char::range('0', '9'), range)
        .prop_map(|chars| chars.into_iter().collect())
}

/// Generates a Luhn-valid 16-digit Visa number.
fn visa_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec(0u8..=9, 14).prop_map(|body| {
        let mut digits = vec![4u8];
        digits.extend(body);
        digits.push(luhn::generate_check_digit(&digits));
        digits.iter().map(|d| char::from(b'0' + d)).collect()
    })
}

/// Text a card field could plausibly hold, including separators and junk.
fn field_text() -> impl Strategy<Value = String> {
    "[0-9 /a-zé]{0,24}"
}

fn field_kind() -> impl Strategy<Value = FieldKind> {
    prop_oneof![
        Just(FieldKind::CardNumber),
        Just(FieldKind::ExpireDate),
        Just(FieldKind::Cvc),
        Just(FieldKind::CardholderName),
        Just(FieldKind::FreeText),
        Just(FieldKind::Country),
    ]
}

fn keystroke() -> impl Strategy<Value = Keystroke> {
    prop_oneof![
        4 => "[0-9a/ ]".prop_map(Keystroke::Insert),
        1 => "[0-9 -]{0,20}".prop_map(Keystroke::Insert),
        2 => Just(Keystroke::Backspace),
        1 => Just(Keystroke::Delete),
        1 => Just(Keystroke::Left),
        1 => Just(Keystroke::Right),
        1 => Just(Keystroke::Home),
        1 => Just(Keystroke::End),
        1 => Just(Keystroke::SelectAll),
        1 => (0usize..30, 0usize..30).prop_map(|(anchor, cursor)| Keystroke::Select { anchor, cursor }),
    ]
}

fn validator(kind: FieldKind) -> FieldValidator {
    match kind {
        FieldKind::Cvc => FieldValidator::cvc(|| "4242".to_string()),
        kind => FieldValidator::for_kind(kind).with_today(TODAY),
    }
}

// =============================================================================
// FORMATTER PROPERTIES
// =============================================================================

proptest! {
    /// Formatting an already formatted card number changes nothing.
    #[test]
    fn card_format_idempotent(digits in digit_string(0..=19)) {
        let once = format_card_number(&digits);
        prop_assert_eq!(format_card_number(&once), once);
    }

    /// Formatting an already formatted expiry date changes nothing.
    #[test]
    fn expire_format_idempotent(digits in digit_string(0..=6)) {
        let once = format_expire_date(&digits);
        prop_assert_eq!(format_expire_date(&once), once);
    }

    /// The card formatter only adds separators.
    #[test]
    fn card_format_preserves_digits(digits in digit_string(0..=19)) {
        prop_assert_eq!(strip_formatting(&format_card_number(&digits)), digits);
    }

    /// The caret stays next to the same digit after formatting.
    #[test]
    fn card_format_keeps_caret_on_digit(
        (digits, position) in digit_string(0..=19)
            .prop_flat_map(|d| { let len = d.len(); (Just(d), 0..=len) })
    ) {
        let formatted = format_card_state(&FieldState::new(digits.clone(), position));
        prop_assert!(formatted.position <= formatted.value.len());
        let back = numbers_only(&formatted.value, formatted.position);
        prop_assert_eq!(back.position, position);
    }

    /// Formatted expiry dates never exceed `MM/YY`.
    #[test]
    fn expire_format_bounded(digits in digit_string(0..=10)) {
        prop_assert!(format_expire_date(&digits).len() <= 5);
    }
}

// =============================================================================
// PIPELINE PROPERTIES
// =============================================================================

proptest! {
    /// The returned caret always lies within the returned value.
    #[test]
    fn cursor_within_value(
        kind in field_kind(),
        before in field_text(),
        before_cursor in 0usize..30,
        after in field_text(),
        after_cursor in 0usize..30,
    ) {
        let request = EditRequest::new(
            EditSnapshot::new(before, before_cursor),
            EditSnapshot::new(after, after_cursor),
        );
        let result = validator(kind).evaluate(&request);
        prop_assert!(result.cursor_position <= result.value.chars().count());
    }

    /// Numeric fields only ever display digits and their separators.
    #[test]
    fn numeric_fields_display_digits_only(
        before in field_text(),
        anchor in 0usize..30,
        cursor in 0usize..30,
        after in field_text(),
        after_cursor in 0usize..30,
    ) {
        let request = EditRequest::new(
            EditSnapshot::with_selection(before, anchor, cursor),
            EditSnapshot::new(after, after_cursor),
        );
        for kind in [FieldKind::CardNumber, FieldKind::ExpireDate, FieldKind::Cvc] {
            let result = validator(kind).evaluate(&request);
            prop_assert!(result.value.chars().all(|c| c.is_ascii_digit() || c == ' ' || c == '/'));
        }
    }

    /// Running the pipeline on its own output is stable.
    #[test]
    fn pipeline_fixed_point(kind in field_kind(), text in field_text()) {
        let v = validator(kind);
        let first = v.evaluate(&EditRequest::replace_all(EditSnapshot::default(), text));
        let again = v.evaluate(&EditRequest::replace_all(
            EditSnapshot::default(),
            first.value.clone(),
        ));
        prop_assert_eq!(again.value, first.value);
    }

    /// A finished field is never flagged invalid.
    #[test]
    fn finished_implies_valid(kind in field_kind(), text in field_text()) {
        let result = validator(kind).evaluate(&EditRequest::replace_all(EditSnapshot::default(), text));
        prop_assert!(!(result.finished && result.invalid));
    }

    /// Typing a valid Visa number key by key finishes on the last digit.
    #[test]
    fn typed_visa_finishes(card in visa_strategy()) {
        let number = FieldValidator::card_number();
        let mut snapshot = EditSnapshot::default();
        let mut finished = Vec::new();
        for c in card.chars() {
            let keys = [Keystroke::Insert(c.to_string())];
            let after = apply_script(&snapshot, &keys);
            let result = number.evaluate(&EditRequest::new(snapshot, after));
            finished.push(result.finished);
            snapshot = EditSnapshot::new(result.value, result.cursor_position);
        }
        prop_assert_eq!(finished.last(), Some(&true));
        prop_assert_eq!(strip_formatting(snapshot.value()), card);
    }
}

// =============================================================================
// ROBUSTNESS
// =============================================================================

proptest! {
    /// Random key sequences never panic and keep the caret in bounds.
    #[test]
    fn keystrokes_never_panic(kind in field_kind(), keys in proptest::collection::vec(keystroke(), 0..40)) {
        let v = validator(kind);
        let mut snapshot = EditSnapshot::default();
        for key in &keys {
            let after = apply_script(&snapshot, std::slice::from_ref(key));
            let result = v.evaluate(&EditRequest::new(snapshot, after));
            prop_assert!(result.cursor_position <= result.value.chars().count());
            snapshot = EditSnapshot::new(result.value, result.cursor_position);
        }
    }

    /// Script parsing never panics on arbitrary input.
    #[test]
    fn parse_script_never_panics(script in ".*") {
        if let Ok(keys) = parse_script(&script) {
            let _ = apply_script(&EditSnapshot::default(), &keys);
        }
    }

    /// Arbitrary Unicode in a text field never panics.
    #[test]
    fn text_fields_handle_unicode(
        before in "\\PC{0,12}",
        after in "\\PC{0,12}",
        cursor in 0usize..16,
    ) {
        let request = EditRequest::new(EditSnapshot::at_end(before), EditSnapshot::new(after, cursor));
        let result = FieldValidator::cardholder_name().evaluate(&request);
        prop_assert!(result.cursor_position <= result.value.chars().count());
    }
}
