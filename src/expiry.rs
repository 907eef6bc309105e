//! Expiry date classification and parsing of the `MM/YY` field value.
//!
//! The field holds at most four digits, `MMYY`, displayed as `MM/YY`. A
//! single leading digit above 1 stands for a month with an implied leading
//! zero (`3` is March), matching what the formatter displays.
//!
//! # Example
//!
//! ```
//! use card_field::expiry::{classify_expire_date_at, expire_month, expire_year, YearMonth};
//! use card_field::{ValidationState, Verdict};
//!
//! let today = YearMonth::new(2026, 10);
//! assert_eq!(classify_expire_date_at("12/30", today), Verdict::valid(true));
//! assert_eq!(classify_expire_date_at("01/20", today), Verdict::invalid());
//! assert_eq!(classify_expire_date_at("1", today).state, ValidationState::Incomplete);
//!
//! assert_eq!(expire_month("12/30"), 12);
//! assert_eq!(expire_year("12/30"), 2030);
//! ```

use std::fmt;

use chrono::Datelike;

use crate::verdict::Verdict;

/// Years past the current one an expiry date may lie.
pub const MAX_YEARS_AHEAD: u16 = 20;

/// A calendar month, used as "today" when judging expiry dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct YearMonth {
    /// Four-digit year.
    pub year: u16,
    /// Month, 1-12.
    pub month: u8,
}

impl YearMonth {
    /// Creates a year/month pair.
    #[inline]
    pub const fn new(year: u16, month: u8) -> Self {
        Self { year, month }
    }

    /// The current month in local time.
    pub fn now() -> Self {
        let now = chrono::Local::now();
        Self {
            year: u16::try_from(now.year()).unwrap_or(u16::MAX),
            month: now.month() as u8,
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:04}", self.month, self.year)
    }
}

/// Classifies an expiry date against the current month.
#[inline]
pub fn classify_expire_date(value: &str) -> Verdict {
    classify_expire_date_at(value, YearMonth::now())
}

/// Classifies an expiry date against a given `today`.
///
/// `value` may be the raw digits or the displayed `MM/YY`; whitespace and
/// slashes are skipped, any other non-digit makes the date invalid. Digits
/// past the fourth are ignored since the field never displays them.
pub fn classify_expire_date_at(value: &str, today: YearMonth) -> Verdict {
    let mut digits = Vec::with_capacity(4);
    for c in value.chars() {
        match c {
            '0'..='9' => digits.push(c as u8 - b'0'),
            '/' => {}
            c if c.is_whitespace() => {}
            _ => return Verdict::invalid(),
        }
    }
    if digits.first().is_some_and(|&first| first > 1) {
        digits.insert(0, 0);
    }
    if digits.len() < 2 {
        return Verdict::incomplete();
    }

    let month = digits[0] * 10 + digits[1];
    if !(1..=12).contains(&month) {
        return Verdict::invalid();
    }
    if digits.len() < 4 {
        return Verdict::incomplete();
    }

    let year = 2000 + u16::from(digits[2]) * 10 + u16::from(digits[3]);
    let expiry = YearMonth::new(year, month);
    if expiry < today || year > today.year.saturating_add(MAX_YEARS_AHEAD) {
        return Verdict::invalid();
    }
    Verdict::valid(true)
}

/// Month of a displayed `MM/YY` value, 0 when it does not parse.
pub fn expire_month(value: &str) -> u32 {
    value
        .split('/')
        .next()
        .and_then(|month| month.trim().parse().ok())
        .unwrap_or(0)
}

/// Four-digit year of a displayed `MM/YY` value.
///
/// The two-digit segment after the slash is offset by 2000; a missing or
/// unparsable segment counts as 0, giving 2000.
pub fn expire_year(value: &str) -> u32 {
    let year: u32 = value
        .split('/')
        .nth(1)
        .and_then(|year| year.trim().parse().ok())
        .unwrap_or(0);
    year + 2000
}
