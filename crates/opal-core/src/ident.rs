//! # Identifier Well-Formedness
//!
//! Rules for what counts as a valid *source* identifier — the name a schema
//! author wrote for a class or field. Internal names produced by explicit
//! overrides are deliberately not held to these rules: an override is a
//! verbatim literal and may contain characters (such as `-`) that no source
//! identifier could.

use thiserror::Error;

/// A source identifier failed well-formedness validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentError {
    /// The identifier was empty.
    #[error("identifier is empty")]
    Empty,

    /// The identifier contained a character outside `[A-Za-z0-9_]`.
    #[error("identifier {identifier:?} contains invalid character {found:?}")]
    InvalidCharacter {
        /// The offending identifier, verbatim.
        identifier: String,
        /// The first character that violated the rule.
        found: char,
    },
}

/// Whether `s` is a well-formed source identifier: non-empty, ASCII
/// alphanumerics and underscore only.
pub fn is_well_formed_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Validate a source identifier, returning the specific violation.
pub fn ensure_well_formed(s: &str) -> Result<(), IdentError> {
    if s.is_empty() {
        return Err(IdentError::Empty);
    }
    match s.chars().find(|c| !c.is_ascii_alphanumeric() && *c != '_') {
        Some(found) => Err(IdentError::InvalidCharacter {
            identifier: s.to_owned(),
            found,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_alnum_and_underscore() {
        for ident in ["a", "A1", "my_field", "_leading", "Class2Name"] {
            assert!(is_well_formed_identifier(ident), "{ident} should be valid");
            assert_eq!(ensure_well_formed(ident), Ok(()));
        }
    }

    #[test]
    fn rejects_empty() {
        assert!(!is_well_formed_identifier(""));
        assert_eq!(ensure_well_formed(""), Err(IdentError::Empty));
    }

    #[test]
    fn rejects_punctuation_and_whitespace() {
        assert_eq!(
            ensure_well_formed("my-field"),
            Err(IdentError::InvalidCharacter {
                identifier: "my-field".to_owned(),
                found: '-',
            })
        );
        assert!(!is_well_formed_identifier("two words"));
        assert!(!is_well_formed_identifier("dotted.name"));
    }
}
