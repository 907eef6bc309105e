//! Fuzz target for the field pipeline.
//!
//! Tests that arbitrary before/after snapshots never panic and always give a
//! caret inside the returned value.

#![no_main]

use arbitrary::Arbitrary;
use card_field::expiry::YearMonth;
use card_field::{EditRequest, EditSnapshot, FieldKind, FieldValidator};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    kind: u8,
    before: &'a str,
    before_anchor: usize,
    before_cursor: usize,
    after: &'a str,
    after_cursor: usize,
    card_number: &'a str,
}

fuzz_target!(|input: Input<'_>| {
    let kind = match input.kind % 6 {
        0 => FieldKind::CardNumber,
        1 => FieldKind::ExpireDate,
        2 => FieldKind::Cvc,
        3 => FieldKind::CardholderName,
        4 => FieldKind::FreeText,
        _ => FieldKind::Country,
    };
    let number = input.card_number.to_string();
    let validator = match kind {
        FieldKind::Cvc => FieldValidator::cvc(move || number.clone()),
        kind => FieldValidator::for_kind(kind).with_today(YearMonth::new(2026, 10)),
    };

    let request = EditRequest::new(
        EditSnapshot::with_selection(input.before, input.before_anchor, input.before_cursor),
        EditSnapshot::new(input.after, input.after_cursor),
    );
    let result = validator.evaluate(&request);
    assert!(result.cursor_position <= result.value.chars().count());
    assert!(!(result.finished && result.invalid));
});
