//! Keystroke-level integration tests for card_field.
//!
//! These tests drive fields the way a user would: one key at a time, with the
//! field's displayed text fed back into the next edit.

use card_field::expiry::YearMonth;
use card_field::keys::{apply_keystroke, parse_script, Keystroke};
use card_field::{
    CardField, CardForm, EditRequest, EditSnapshot, FieldValidator, FormConfig, ValidateResult,
};

// =============================================================================
// REAL-WORLD TEST CARD NUMBERS
// =============================================================================
// These are official test card numbers from payment processors.
// They pass Luhn validation but are not real cards.

mod test_cards {
    // Visa test cards (from Stripe, Braintree, etc.)
    pub const VISA_1: &str = "4111111111111111";
    pub const VISA_2: &str = "4012888888881881";
    pub const VISA_13: &str = "4222222222222";
    pub const VISA_5: &str = "4242424242424242";

    // Mastercard test cards
    pub const MC_1: &str = "5555555555554444";
    pub const MC_2: &str = "5105105105105100";
    // New Mastercard 2-series
    pub const MC_2SERIES: &str = "2223000048400011";

    // American Express test cards
    pub const AMEX_1: &str = "378282246310005";
    pub const AMEX_2: &str = "371449635398431";

    // Discover test cards
    pub const DISCOVER_1: &str = "6011111111111117";
    pub const DISCOVER_2: &str = "6011000990139424";

    // Diners Club test cards
    pub const DINERS_1: &str = "30569309025904";
    pub const DINERS_2: &str = "38520000023237";

    // JCB test cards
    pub const JCB_1: &str = "3530111333300000";
    pub const JCB_2: &str = "3566002020360505";
}

use test_cards::*;

const TODAY: YearMonth = YearMonth::new(2026, 10);

/// A single text field with a validator attached.
///
/// Like a line edit, it only calls the validator when the text changes.
struct TestField {
    validator: FieldValidator,
    snapshot: EditSnapshot,
    last: ValidateResult,
}

impl TestField {
    fn new(validator: FieldValidator) -> Self {
        Self {
            validator,
            snapshot: EditSnapshot::default(),
            last: ValidateResult::default(),
        }
    }

    fn key(&mut self, key: &Keystroke) -> ValidateResult {
        let after = apply_keystroke(&self.snapshot, key);
        if after.value() == self.snapshot.value() {
            self.last.cursor_position = after.cursor_position();
            self.snapshot = after;
            return self.last.clone();
        }
        let result = self
            .validator
            .evaluate(&EditRequest::new(self.snapshot.clone(), after));
        self.snapshot = EditSnapshot::new(result.value.clone(), result.cursor_position);
        self.last = result.clone();
        result
    }

    fn script(&mut self, script: &str) -> Vec<ValidateResult> {
        parse_script(script)
            .unwrap()
            .iter()
            .map(|key| self.key(key))
            .collect()
    }

    fn last(&mut self, script: &str) -> ValidateResult {
        self.script(script).pop().unwrap()
    }
}

// =============================================================================
// CARD NUMBER TYPING
// =============================================================================

#[test]
fn test_test_cards_finish_on_last_digit() {
    let cards = [
        (VISA_1, "4111 1111 1111 1111"),
        (VISA_2, "4012 8888 8888 1881"),
        (VISA_5, "4242 4242 4242 4242"),
        (MC_1, "5555 5555 5555 4444"),
        (MC_2, "5105 1051 0510 5100"),
        (MC_2SERIES, "2223 0000 4840 0011"),
        (AMEX_1, "3782 822463 10005"),
        (AMEX_2, "3714 496353 98431"),
        (DISCOVER_1, "6011 1111 1111 1117"),
        (DISCOVER_2, "6011 0009 9013 9424"),
        (DINERS_1, "3056 930902 5904"),
        (DINERS_2, "3852 000002 3237"),
        (JCB_1, "3530 1113 3330 0000"),
        (JCB_2, "3566 0020 2036 0505"),
    ];

    for (card, display) in cards {
        let mut field = TestField::new(FieldValidator::card_number());
        let results = field.script(card);
        let (last, typing) = results.split_last().unwrap();

        assert_eq!(last.value, display, "card {}", card);
        assert_eq!(last.cursor_position, display.len(), "card {}", card);
        assert!(last.finished, "card {} should finish", card);
        assert!(!last.invalid, "card {} should be valid", card);
        for result in typing {
            assert!(!result.finished, "card {} finished early at {}", card, result.value);
            assert!(!result.invalid, "card {} invalid early at {}", card, result.value);
        }
    }
}

#[test]
fn test_short_visa_is_valid_but_not_finished() {
    let mut field = TestField::new(FieldValidator::card_number());
    let result = field.last(VISA_13);
    assert_eq!(result.value, "4222 2222 2222 2");
    assert!(!result.invalid);
    assert!(!result.finished);
}

#[test]
fn test_bad_checksum_is_invalid_at_full_length() {
    let mut field = TestField::new(FieldValidator::card_number());
    let results = field.script("4242424242424241");
    assert!(results.last().unwrap().invalid);
    assert!(!results[14].invalid);
}

#[test]
fn test_too_long_is_invalid() {
    let mut field = TestField::new(FieldValidator::card_number());
    let result = field.last("37828224631000500");
    assert!(result.invalid);
    assert!(!result.finished);
}

#[test]
fn test_insert_in_the_middle() {
    let mut field = TestField::new(FieldValidator::card_number());
    field.script("42424242<home><right><right>");
    let result = field.key(&Keystroke::Insert("9".into()));
    assert_eq!(result.value, "4294 2424 2");
    assert_eq!(result.cursor_position, 3);
}

#[test]
fn test_typing_letters_is_ignored() {
    let mut field = TestField::new(FieldValidator::card_number());
    let result = field.last("42a42");
    assert_eq!(result.value, "4242");
    assert_eq!(result.cursor_position, 4);
}

// =============================================================================
// DELETING AROUND SEPARATORS
// =============================================================================

#[test]
fn test_backspace_after_separator_removes_digit_before_it() {
    let mut field = TestField::new(FieldValidator::card_number());
    field.script("42424<left>");
    assert_eq!(field.snapshot.cursor_position(), 5);

    let result = field.key(&Keystroke::Backspace);
    assert_eq!(result.value, "4244");
    assert_eq!(result.cursor_position, 3);
}

#[test]
fn test_delete_before_separator_removes_digit_after_it() {
    let mut field = TestField::new(FieldValidator::card_number());
    field.script("42424242<home><right><right><right><right>");
    assert_eq!(field.snapshot.cursor_position(), 4);

    let result = field.key(&Keystroke::Delete);
    assert_eq!(result.value, "4242 242");
    assert_eq!(result.cursor_position, 4);
}

#[test]
fn test_backspace_at_end_of_group() {
    let mut field = TestField::new(FieldValidator::card_number());
    let result = field.last("42424<bs>");
    assert_eq!(result.value, "4242");
    assert_eq!(result.cursor_position, 4);
}

#[test]
fn test_backspace_everything() {
    let mut field = TestField::new(FieldValidator::card_number());
    let result = field.last("424242<bs><bs><bs><bs><bs><bs><bs>");
    assert_eq!(result.value, "");
    assert_eq!(result.cursor_position, 0);
}

#[test]
fn test_select_and_delete() {
    let mut field = TestField::new(FieldValidator::card_number());
    field.script("42424242");
    let result = field.last("<select:2-7><del>");
    assert_eq!(result.value, "4224 2");
    assert_eq!(result.cursor_position, 2);
}

#[test]
fn test_paste_formatted_number() {
    let mut field = TestField::new(FieldValidator::card_number());
    let result = field.last("<paste:3782-822463-10005>");
    assert_eq!(result.value, "3782 822463 10005");
    assert_eq!(result.cursor_position, 17);
    assert!(result.finished);
}

#[test]
fn test_paste_over_everything() {
    let mut field = TestField::new(FieldValidator::card_number());
    field.script(VISA_5);
    let result = field.last(&format!("<all><paste:{}>", AMEX_1));
    assert_eq!(result.value, "3782 822463 10005");
}

// =============================================================================
// EXPIRY DATE
// =============================================================================

fn expire_field() -> TestField {
    TestField::new(FieldValidator::expire_date().with_today(TODAY))
}

#[test]
fn test_expiry_leading_zero() {
    let mut field = expire_field();
    let results = field.script("35");
    assert_eq!(results[0].value, "03/");
    assert_eq!(results[0].cursor_position, 3);
    assert_eq!(results[1].value, "03/5");
    assert_eq!(results[1].cursor_position, 4);
}

#[test]
fn test_expiry_thirteenth_month_is_dropped() {
    let mut field = expire_field();
    let results = field.script("132");
    assert_eq!(results[1].value, "1");
    assert_eq!(results[1].cursor_position, 1);
    assert!(!results[1].invalid);
    assert!(!results[1].finished);
    assert_eq!(results[2].value, "12/");
    assert_eq!(results[2].cursor_position, 3);
}

#[test]
fn test_expiry_complete() {
    let mut field = expire_field();
    let result = field.last("1230");
    assert_eq!(result.value, "12/30");
    assert!(result.finished);
    assert!(!result.invalid);

    // Typing past the year changes nothing
    let result = field.last("9");
    assert_eq!(result.value, "12/30");
}

#[test]
fn test_expiry_backspace_over_slash() {
    let mut field = expire_field();
    field.script("12");
    assert_eq!(field.snapshot.value(), "12/");

    let result = field.key(&Keystroke::Backspace);
    assert_eq!(result.value, "1");
    assert_eq!(result.cursor_position, 1);
}

#[test]
fn test_expiry_past_and_far_future() {
    let mut field = expire_field();
    assert!(field.last("0926").invalid);

    let mut field = expire_field();
    assert!(!field.last("1026").invalid);

    let mut field = expire_field();
    assert!(field.last("0147").invalid);
}

#[test]
fn test_expiry_zero_month_is_invalid() {
    let mut field = expire_field();
    let result = field.last("00");
    assert_eq!(result.value, "00/");
    assert!(result.invalid);
}

// =============================================================================
// CVC
// =============================================================================

#[test]
fn test_cvc_follows_network() {
    let mut visa = TestField::new(FieldValidator::cvc(|| VISA_5.to_string()));
    let results = visa.script("1234");
    assert!(results[2].finished);
    assert!(results[3].invalid);

    let mut amex = TestField::new(FieldValidator::cvc(|| AMEX_1.to_string()));
    let results = amex.script("1234");
    assert!(!results[2].finished);
    assert!(!results[2].invalid);
    assert!(results[3].finished);
}

#[test]
fn test_cvc_without_number_expects_three_digits() {
    let mut field = TestField::new(FieldValidator::cvc(String::new));
    assert!(field.last("123").finished);
}

// =============================================================================
// FORM
// =============================================================================

fn type_focused(form: &mut CardForm, text: &str) {
    for c in text.chars() {
        form.edit_focused(&Keystroke::Insert(c.to_string()));
    }
}

#[test]
fn test_form_auto_advance() {
    let mut form = CardForm::new(&FormConfig::default()).with_today(TODAY);
    assert_eq!(form.focus(), CardField::Number);

    type_focused(&mut form, VISA_5);
    assert_eq!(form.focus(), CardField::ExpireDate);

    type_focused(&mut form, "1230");
    assert_eq!(form.focus(), CardField::Cvc);

    type_focused(&mut form, "123");
    assert_eq!(form.focus(), CardField::Cvc);
    assert!(form.is_complete());

    let details = form.collect();
    assert_eq!(details.number(), VISA_5);
    assert_eq!(details.expire_month(), 12);
    assert_eq!(details.expire_year(), 2030);
    assert_eq!(details.cvc(), "123");
}

#[test]
fn test_form_full_config() {
    let mut form = CardForm::new(&FormConfig::full("US")).with_today(TODAY);
    type_focused(&mut form, AMEX_1);
    type_focused(&mut form, "0429");
    type_focused(&mut form, "1234");
    assert_eq!(form.focus(), CardField::Name);

    type_focused(&mut form, "ada lovelace");
    assert_eq!(form.value(CardField::Name), Some("ADA LOVELACE"));
    assert_eq!(form.first_invalid(), Some(CardField::AddressZip));

    form.set_value(CardField::AddressZip, "10001");
    assert_eq!(form.first_invalid(), None);

    let details = form.collect();
    assert_eq!(details.cardholder_name(), "ADA LOVELACE");
    assert_eq!(details.address_country(), "US");
    assert!(!format!("{:?}", details).contains(AMEX_1));
}

#[test]
fn test_form_number_change_rejudges_cvc() {
    let mut form = CardForm::new(&FormConfig::default());
    form.set_value(CardField::Number, AMEX_1);
    form.set_value(CardField::Cvc, "1234");
    assert!(form.result(CardField::Cvc).unwrap().finished);

    form.set_value(CardField::Number, VISA_5);
    let cvc = form.result(CardField::Cvc).unwrap();
    assert!(cvc.invalid);
    assert!(!cvc.finished);
    assert_eq!(form.first_invalid(), Some(CardField::ExpireDate));
}
