//! Card networks and the per-network rules used while a number is typed.
//!
//! Each [`CardBrand`] carries the lengths its numbers may have, the length at
//! which entry is considered complete, the CVC length printed on its cards and
//! the digit grouping used to display the number.

use std::fmt;

/// Supported credit card brands/networks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardBrand {
    /// Visa - Prefix 4, lengths 13, 16, 19
    Visa,
    /// Mastercard - Prefix 51-55, 2221-2720, length 16
    Mastercard,
    /// American Express - Prefix 34, 37, length 15
    Amex,
    /// Discover - Prefix 6011, 644-649, 65, length 16-19
    Discover,
    /// Diners Club - Prefix 36, 38, 300-305, length 14-19
    DinersClub,
    /// JCB - Prefix 3528-3589, length 16-19
    Jcb,
    /// UnionPay - Prefix 62, length 16-19
    UnionPay,
    /// Maestro - Prefix 50, 56-69, length 12-19
    Maestro,
    /// Mir - Prefix 2200-2204, length 16-19
    Mir,
}

/// Maximum number of digits in a credit card number.
pub const MAX_CARD_DIGITS: usize = 19;

/// Minimum number of digits in a credit card number.
pub const MIN_CARD_DIGITS: usize = 12;

/// Length at which a number of an unknown network counts as complete.
pub const DEFAULT_TYPICAL_LENGTH: usize = 16;

/// CVC length expected when the network cannot be determined.
pub const DEFAULT_CVC_LENGTH: usize = 3;

/// Grouping used for every network without a scheme of its own.
pub const DEFAULT_GROUPS: &[usize] = &[4, 4, 4, 4, 4];

impl CardBrand {
    /// Returns the valid lengths for this card brand.
    #[inline]
    pub const fn valid_lengths(&self) -> &'static [u8] {
        match self {
            Self::Visa => &[13, 16, 19],
            Self::Mastercard => &[16],
            Self::Amex => &[15],
            Self::Discover => &[16, 17, 18, 19],
            Self::DinersClub => &[14, 15, 16, 17, 18, 19],
            Self::Jcb => &[16, 17, 18, 19],
            Self::UnionPay => &[16, 17, 18, 19],
            Self::Maestro => &[12, 13, 14, 15, 16, 17, 18, 19],
            Self::Mir => &[16, 17, 18, 19],
        }
    }

    /// Returns true if the given length is valid for this brand.
    #[inline]
    pub const fn is_valid_length(&self, length: usize) -> bool {
        let valid = self.valid_lengths();
        let mut i = 0;
        while i < valid.len() {
            if valid[i] as usize == length {
                return true;
            }
            i += 1;
        }
        false
    }

    /// Longest number this brand issues.
    #[inline]
    pub const fn max_length(&self) -> usize {
        let valid = self.valid_lengths();
        valid[valid.len() - 1] as usize
    }

    /// The length most cards of this brand have.
    ///
    /// Reaching it with a passing checksum lets the field auto-advance even
    /// though longer numbers would still be accepted.
    #[inline]
    pub const fn typical_length(&self) -> usize {
        match self {
            Self::Amex => 15,
            Self::DinersClub => 14,
            _ => 16,
        }
    }

    /// Number of CVC digits printed on cards of this brand.
    ///
    /// American Express prints a 4-digit CID on the front, everyone else a
    /// 3-digit code on the back.
    #[inline]
    pub const fn cvc_length(&self) -> usize {
        match self {
            Self::Amex => 4,
            _ => DEFAULT_CVC_LENGTH,
        }
    }

    /// Digit groups used to display a number of `length` digits.
    pub fn groups(&self, length: usize) -> &'static [usize] {
        match self {
            Self::Amex => &[4, 6, 5],
            Self::DinersClub if length <= 14 => &[4, 6, 4],
            _ => DEFAULT_GROUPS,
        }
    }

    /// Returns a human-readable name for the card brand.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Visa => "Visa",
            Self::Mastercard => "Mastercard",
            Self::Amex => "American Express",
            Self::Discover => "Discover",
            Self::DinersClub => "Diners Club",
            Self::Jcb => "JCB",
            Self::UnionPay => "UnionPay",
            Self::Maestro => "Maestro",
            Self::Mir => "Mir",
        }
    }
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_brand_valid_lengths() {
        assert!(CardBrand::Visa.is_valid_length(16));
        assert!(CardBrand::Visa.is_valid_length(13));
        assert!(CardBrand::Visa.is_valid_length(19));
        assert!(!CardBrand::Visa.is_valid_length(15));

        assert!(CardBrand::Amex.is_valid_length(15));
        assert!(!CardBrand::Amex.is_valid_length(16));
    }

    #[test]
    fn test_max_and_typical_length() {
        assert_eq!(CardBrand::Visa.max_length(), 19);
        assert_eq!(CardBrand::Visa.typical_length(), 16);
        assert_eq!(CardBrand::Amex.max_length(), 15);
        assert_eq!(CardBrand::Amex.typical_length(), 15);
        assert_eq!(CardBrand::Mastercard.max_length(), 16);
        assert_eq!(CardBrand::DinersClub.typical_length(), 14);
    }

    #[test]
    fn test_cvc_length() {
        assert_eq!(CardBrand::Amex.cvc_length(), 4);
        assert_eq!(CardBrand::Visa.cvc_length(), 3);
        assert_eq!(CardBrand::Mir.cvc_length(), 3);
    }

    #[test]
    fn test_groups() {
        assert_eq!(CardBrand::Amex.groups(15), &[4, 6, 5]);
        assert_eq!(CardBrand::DinersClub.groups(14), &[4, 6, 4]);
        assert_eq!(CardBrand::DinersClub.groups(16), DEFAULT_GROUPS);
        assert_eq!(CardBrand::Visa.groups(16), DEFAULT_GROUPS);
    }

    #[test]
    fn test_card_brand_names() {
        assert_eq!(CardBrand::Visa.name(), "Visa");
        assert_eq!(CardBrand::Amex.name(), "American Express");
        assert_eq!(CardBrand::Mastercard.to_string(), "Mastercard");
    }
}
