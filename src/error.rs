//! Errors raised at the crate's text interfaces.
//!
//! Editing a field never fails: a bad value is reported through
//! [`ValidateResult::invalid`](crate::ValidateResult::invalid). Errors only
//! come from parsing names and keystroke scripts, as the CLI and the WASM
//! bindings do.

use std::fmt;

/// Errors that can occur while parsing field names or keystroke scripts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The name does not match any field.
    UnknownField(String),

    /// A `<...>` token in a keystroke script is not a known key.
    UnknownKey {
        /// The token as written, brackets included.
        token: String,
        /// Char offset of the token in the script.
        position: usize,
    },

    /// A `<` opened a key token that was never closed.
    UnterminatedKey {
        /// Char offset of the opening `<`.
        position: usize,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownField(name) => write!(
                f,
                "unknown field '{}' (expected number, expire, cvc, name, country or zip)",
                name.escape_default()
            ),
            Self::UnknownKey { token, position } => {
                write!(f, "unknown key {} at position {}", token, position)
            }
            Self::UnterminatedKey { position } => {
                write!(f, "unterminated key starting at position {}", position)
            }
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ParseError::UnknownField("iban".into()).to_string(),
            "unknown field 'iban' (expected number, expire, cvc, name, country or zip)"
        );
        assert_eq!(
            ParseError::UnknownKey {
                token: "<tab>".into(),
                position: 4
            }
            .to_string(),
            "unknown key <tab> at position 4"
        );
        assert_eq!(
            ParseError::UnterminatedKey { position: 2 }.to_string(),
            "unterminated key starting at position 2"
        );
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ParseError>();
    }
}
