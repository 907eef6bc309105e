//! WebAssembly bindings for the field pipeline.
//!
//! A web page keeps the field state it had before each `input` event and
//! passes both states to [`evaluate_edit`], then writes the returned value
//! and caret back into the `<input>`.
//!
//! # Usage from JavaScript
//!
//! ```javascript
//! import init, { evaluate_edit } from 'card_field';
//!
//! await init();
//!
//! let before = { value: "", cursor: 0 };
//! input.addEventListener("input", () => {
//!     const result = evaluate_edit(
//!         "number",
//!         before.value, before.cursor,
//!         input.value, input.selectionStart,
//!         null,
//!     );
//!     input.value = result.value;
//!     input.setSelectionRange(result.cursor_position, result.cursor_position);
//!     input.classList.toggle("invalid", result.invalid);
//!     before = { value: result.value, cursor: result.cursor_position };
//! });
//! ```
//!
//! Positions are counted in Unicode scalar values. For the digits and
//! separators of card fields this is the same as JavaScript's UTF-16 offsets.

#![cfg(feature = "wasm")]

use wasm_bindgen::prelude::*;

use crate::edit::{EditRequest, EditSnapshot, ValidateResult};
use crate::field::{FieldKind, FieldValidator};
use crate::keys::{apply_keystroke, parse_script};

/// Outcome of one edit, returned to JavaScript.
#[wasm_bindgen]
pub struct EditResult {
    value: String,
    cursor_position: usize,
    invalid: bool,
    finished: bool,
}

#[wasm_bindgen]
impl EditResult {
    #[wasm_bindgen(getter)]
    pub fn value(&self) -> String {
        self.value.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn cursor_position(&self) -> usize {
        self.cursor_position
    }

    #[wasm_bindgen(getter)]
    pub fn invalid(&self) -> bool {
        self.invalid
    }

    #[wasm_bindgen(getter)]
    pub fn finished(&self) -> bool {
        self.finished
    }
}

impl From<ValidateResult> for EditResult {
    fn from(result: ValidateResult) -> Self {
        Self {
            value: result.value,
            cursor_position: result.cursor_position,
            invalid: result.invalid,
            finished: result.finished,
        }
    }
}

fn validator(kind: &str, card_number: Option<String>) -> Result<FieldValidator, JsValue> {
    let kind: FieldKind = kind
        .parse()
        .map_err(|e: crate::ParseError| JsValue::from_str(&e.to_string()))?;
    Ok(match (kind, card_number) {
        (FieldKind::Cvc, Some(number)) => FieldValidator::cvc(move || number.clone()),
        (kind, _) => FieldValidator::for_kind(kind),
    })
}

/// Runs the pipeline of field `kind` on one edit.
///
/// `kind` is one of `number`, `expire`, `cvc`, `name`, `text` or `country`.
/// `card_number` is only read by `cvc` fields.
///
/// # Example
/// ```javascript
/// const result = evaluate_edit("expire", "", 0, "3", 1, null);
/// console.log(result.value);  // "03/"
/// ```
#[wasm_bindgen]
pub fn evaluate_edit(
    kind: &str,
    before_value: &str,
    before_cursor: usize,
    after_value: &str,
    after_cursor: usize,
    card_number: Option<String>,
) -> Result<EditResult, JsValue> {
    let request = EditRequest::new(
        EditSnapshot::new(before_value, before_cursor),
        EditSnapshot::new(after_value, after_cursor),
    );
    Ok(validator(kind, card_number)?.evaluate(&request).into())
}

/// Types a keystroke script into an empty field, returning every step.
///
/// # Example
/// ```javascript
/// const steps = replay_script("number", "42424<bs>", null);
/// console.log(steps[steps.length - 1].value);  // "4242"
/// ```
#[wasm_bindgen]
pub fn replay_script(
    kind: &str,
    script: &str,
    card_number: Option<String>,
) -> Result<js_sys::Array, JsValue> {
    let validator = validator(kind, card_number)?;
    let keys = parse_script(script).map_err(|e| JsValue::from_str(&e.to_string()))?;

    let steps = js_sys::Array::new();
    let mut snapshot = EditSnapshot::default();
    for key in &keys {
        let after = apply_keystroke(&snapshot, key);
        let result = validator.evaluate(&EditRequest::new(snapshot, after));
        snapshot = EditSnapshot::new(result.value.clone(), result.cursor_position);
        steps.push(&JsValue::from(EditResult::from(result)));
    }
    Ok(steps)
}

/// Formats a card number with the grouping of its network.
///
/// # Example
/// ```javascript
/// format_card("378282246310005")  // "3782 822463 10005"
/// ```
#[wasm_bindgen]
pub fn format_card(card_number: &str) -> String {
    crate::format::format_card_number(card_number)
}

/// Formats expiry digits as `MM/YY`.
#[wasm_bindgen]
pub fn format_expiry(date: &str) -> String {
    crate::format::format_expire_date(date)
}

/// Detects the card brand from a (partial) card number.
///
/// # Example
/// ```javascript
/// const brand = detect_brand("4242");  // "Visa"
/// ```
#[wasm_bindgen]
pub fn detect_brand(card_number: &str) -> Option<String> {
    crate::detect::detect_brand_str(card_number).map(|b| b.name().to_string())
}

/// Masks a card number, showing only the last 4 digits.
#[wasm_bindgen]
pub fn mask_card(card_number: &str) -> String {
    crate::mask::mask_card_number(card_number)
}

/// CVC length expected for a card number.
#[wasm_bindgen]
pub fn cvc_length(card_number: &str) -> usize {
    crate::cvv::cvc_length_for_number(card_number)
}
