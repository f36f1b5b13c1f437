//! Opaque document identifiers.
//!
//! Account ids are issued by the identity provider; module and certification
//! ids are generated by the document store on insert. All three are opaque
//! strings constrained only enough to be safe as path segments and keys.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Maximum accepted identifier length in bytes.
pub const DOCUMENT_ID_MAX: usize = 128;

/// Validation errors raised when parsing a document identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdValidationError {
    /// The identifier was empty.
    #[error("{kind} id must not be empty")]
    Empty {
        /// Kind of document the id refers to.
        kind: &'static str,
    },
    /// The identifier carried leading or trailing whitespace.
    #[error("{kind} id must not contain surrounding whitespace")]
    Padded {
        /// Kind of document the id refers to.
        kind: &'static str,
    },
    /// The identifier exceeded [`DOCUMENT_ID_MAX`].
    #[error("{kind} id must be at most {max} bytes")]
    TooLong {
        /// Kind of document the id refers to.
        kind: &'static str,
        /// Maximum permitted length.
        max: usize,
    },
    /// The identifier contained a path separator or control character.
    #[error("{kind} id must not contain '/' or control characters")]
    InvalidCharacters {
        /// Kind of document the id refers to.
        kind: &'static str,
    },
}

fn validate(kind: &'static str, id: String) -> Result<String, IdValidationError> {
    if id.is_empty() {
        return Err(IdValidationError::Empty { kind });
    }
    if id.trim() != id {
        return Err(IdValidationError::Padded { kind });
    }
    if id.len() > DOCUMENT_ID_MAX {
        return Err(IdValidationError::TooLong {
            kind,
            max: DOCUMENT_ID_MAX,
        });
    }
    if id.chars().any(|c| c == '/' || c.is_control()) {
        return Err(IdValidationError::InvalidCharacters { kind });
    }
    Ok(id)
}

macro_rules! define_document_id {
    ($(#[$meta:meta])* $name:ident => $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and construct an identifier from raw input.
            pub fn new(id: impl Into<String>) -> Result<Self, IdValidationError> {
                validate($kind, id.into()).map(Self)
            }

            /// Generate a fresh random identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().simple().to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

define_document_id! {
    /// Account identifier issued by the identity provider.
    AccountId => "account"
}

define_document_id! {
    /// Training module identifier generated by the document store.
    ModuleId => "module"
}

define_document_id! {
    /// Certification identifier generated by the document store.
    CertificationId => "certification"
}

#[cfg(test)]
mod tests {
    //! Regression coverage for identifier validation.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", IdValidationError::Empty { kind: "module" })]
    #[case(" abc", IdValidationError::Padded { kind: "module" })]
    #[case("a/b", IdValidationError::InvalidCharacters { kind: "module" })]
    #[case("a\nb", IdValidationError::InvalidCharacters { kind: "module" })]
    fn rejects_invalid_module_ids(#[case] raw: &str, #[case] expected: IdValidationError) {
        assert_eq!(ModuleId::new(raw), Err(expected));
    }

    #[rstest]
    fn rejects_overlong_ids() {
        let raw = "x".repeat(DOCUMENT_ID_MAX + 1);
        assert_eq!(
            AccountId::new(raw),
            Err(IdValidationError::TooLong {
                kind: "account",
                max: DOCUMENT_ID_MAX,
            })
        );
    }

    #[rstest]
    fn accepts_provider_style_uids() {
        let id = AccountId::new("Xk3v9QpL2mZrT8sWbN4cYd7eFgH1").expect("valid uid");
        assert_eq!(id.as_ref(), "Xk3v9QpL2mZrT8sWbN4cYd7eFgH1");
    }

    #[rstest]
    fn generated_ids_are_distinct_and_valid() {
        let first = ModuleId::generate();
        let second = ModuleId::generate();
        assert_ne!(first, second);
        assert!(ModuleId::new(first.to_string()).is_ok());
    }

    #[rstest]
    fn deserialisation_validates() {
        let result: Result<CertificationId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }
}
