//! Fuzz target for the formatters.
//!
//! Tests that formatting never panics and is idempotent on arbitrary input.

#![no_main]

use card_field::format;
use card_field::FieldState;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (&str, usize)| {
    let (text, position) = data;

    let card = format::format_card_number(text);
    assert_eq!(format::format_card_number(&card), card);
    assert_eq!(format::strip_formatting(&card), format::strip_formatting(text));

    let expire = format::format_expire_date(text);
    assert_eq!(format::format_expire_date(&expire), expire);

    let digits = format::strip_formatting(text);
    let state = format::format_card_state(&FieldState::new(digits.clone(), position));
    assert!(state.position <= state.value.len());
    let state = format::format_expire_state(&FieldState::new(digits, position));
    assert!(state.position <= state.value.len());
});
