//! Classifier verdicts shared by the card number, expiry and CVC checks.

use std::fmt;

/// How a field value looks to its classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValidationState {
    /// The value is acceptable as it stands.
    Valid,
    /// The value is wrong and cannot become right by typing more.
    Invalid,
    /// The value is well-formed so far but too short to judge.
    Incomplete,
}

impl fmt::Display for ValidationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => write!(f, "valid"),
            Self::Invalid => write!(f, "invalid"),
            Self::Incomplete => write!(f, "incomplete"),
        }
    }
}

/// Result of classifying a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Verdict {
    /// Classification of the value.
    pub state: ValidationState,
    /// Entry is complete and focus may move to the next field.
    pub finished: bool,
}

impl Verdict {
    /// A valid value, optionally complete.
    #[inline]
    pub const fn valid(finished: bool) -> Self {
        Self {
            state: ValidationState::Valid,
            finished,
        }
    }

    /// An invalid value. Never finished.
    #[inline]
    pub const fn invalid() -> Self {
        Self {
            state: ValidationState::Invalid,
            finished: false,
        }
    }

    /// A value that is too short to judge. Never finished.
    #[inline]
    pub const fn incomplete() -> Self {
        Self {
            state: ValidationState::Incomplete,
            finished: false,
        }
    }

    /// Returns true if the state is [`ValidationState::Invalid`].
    #[inline]
    pub const fn is_invalid(&self) -> bool {
        matches!(self.state, ValidationState::Invalid)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.finished {
            write!(f, "{} (finished)", self.state)
        } else {
            write!(f, "{}", self.state)
        }
    }
}
