//! Credentials and sessions exchanged with the identity provider.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

use crate::domain::{AccountId, AccountValidationError, Email};

/// Domain error returned when credential payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Email was missing or malformed.
    InvalidEmail(AccountValidationError),
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail(error) => write!(f, "{error}"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// Validated email/password pair.
///
/// The password keeps caller-provided whitespace and is zeroed on drop.
///
/// # Examples
/// ```
/// use nicu_training::domain::Credentials;
///
/// let creds = Credentials::try_from_parts(" rt@nicu.example ", "hunter22").expect("valid");
/// assert_eq!(creds.email().as_ref(), "rt@nicu.example");
/// assert_eq!(creds.password(), "hunter22");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    email: Email,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Construct credentials from raw inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let email = Email::new(email).map_err(CredentialsValidationError::InvalidEmail)?;
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email address used as the login name.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Password supplied by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Authenticated session issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    account_id: AccountId,
    email: Email,
}

impl AuthSession {
    /// Pair an account id with its email.
    pub fn new(account_id: AccountId, email: Email) -> Self {
        Self { account_id, email }
    }

    /// Authenticated account.
    pub fn account_id(&self) -> &AccountId {
        &self.account_id
    }

    /// Email of the authenticated account.
    pub fn email(&self) -> &Email {
        &self.email
    }
}

/// Session transitions published by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A session started after registration or login.
    SignedIn(AuthSession),
    /// The session for an account ended.
    SignedOut(AccountId),
}
