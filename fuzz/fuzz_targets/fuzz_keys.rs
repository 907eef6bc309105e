//! Fuzz target for keystroke scripts.
//!
//! Parses arbitrary scripts and types them into every field of a full form.

#![no_main]

use card_field::expiry::YearMonth;
use card_field::keys::parse_script;
use card_field::{CardField, CardForm, FormConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let Ok(keys) = parse_script(data) else {
        return;
    };

    let mut form = CardForm::new(&FormConfig::full("US")).with_today(YearMonth::new(2026, 10));
    for field in CardField::ALL {
        for key in &keys {
            if let Some(update) = form.edit(field, key) {
                let value = &update.result.value;
                assert!(update.result.cursor_position <= value.chars().count());
            }
        }
    }
    let _ = form.first_invalid();
    let _ = format!("{:?}", form.collect());
});
