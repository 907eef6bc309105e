//! Luhn (mod 10) checksum used to judge complete card numbers.

/// Doubled digit with 9 subtracted when the result exceeds 9, indexed by digit.
const DOUBLE_TABLE: [u8; 10] = [0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

/// Validates a sequence of digits (0-9) with the Luhn algorithm.
///
/// ```
/// use card_field::luhn::validate;
///
/// assert!(validate(&[4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2]));
/// assert!(!validate(&[4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 3]));
/// ```
#[inline]
pub fn validate(digits: &[u8]) -> bool {
    !digits.is_empty() && compute_checksum(digits) % 10 == 0
}

/// Runs the Luhn check over the ASCII digits of `input`, skipping anything else.
///
/// Returns `false` when `input` holds no digits at all.
pub fn passes(input: &str) -> bool {
    let digits: Vec<u8> = input
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();
    validate(&digits)
}

/// Computes the Luhn sum (not reduced modulo 10).
///
/// The rightmost digit is kept, the one left of it doubled, and so on.
#[inline]
pub fn compute_checksum(digits: &[u8]) -> u32 {
    digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &digit)| {
            if i % 2 == 1 {
                DOUBLE_TABLE[digit as usize] as u32
            } else {
                digit as u32
            }
        })
        .sum()
}

/// Computes the check digit that makes `digits` followed by it pass.
///
/// ```
/// use card_field::luhn::generate_check_digit;
///
/// assert_eq!(generate_check_digit(&[4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4, 2, 4]), 2);
/// ```
#[inline]
pub fn generate_check_digit(digits: &[u8]) -> u8 {
    // Every existing digit moves one place left once the check digit is appended.
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &digit)| {
            if i % 2 == 0 {
                DOUBLE_TABLE[digit as usize] as u32
            } else {
                digit as u32
            }
        })
        .sum();
    ((10 - (sum % 10)) % 10) as u8
}
