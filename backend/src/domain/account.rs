//! User accounts and their course enrollments.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{AccountId, ModuleId};

/// Validation errors for account fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountValidationError {
    /// Email was blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Email lacked a local part, an `@`, or a domain.
    #[error("email must look like name@domain")]
    MalformedEmail,
}

/// Email address reported by the identity provider.
///
/// Stored trimmed; case is preserved for display while comparisons in the
/// identity provider are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and construct an email address.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AccountValidationError::EmptyEmail);
        }
        match trimmed.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
            {
                Ok(Self(trimmed.to_owned()))
            }
            _ => Err(AccountValidationError::MalformedEmail),
        }
    }

    /// Lowercased form used as a lookup key.
    pub fn normalized(&self) -> String {
        self.0.to_lowercase()
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = AccountValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Set of module ids a user is enrolled in.
///
/// Adds are unions and removes are differences, so repeating either leaves
/// the set unchanged. Serialises as a sorted JSON array.
///
/// # Examples
/// ```
/// use nicu_training::domain::{CourseSet, ModuleId};
///
/// let module = ModuleId::new("hfov-basics").expect("module id");
/// let mut courses = CourseSet::default();
/// assert!(courses.enroll(module.clone()));
/// assert!(!courses.enroll(module.clone()));
/// assert_eq!(courses.len(), 1);
/// assert!(courses.withdraw(&module));
/// assert!(!courses.withdraw(&module));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseSet(BTreeSet<ModuleId>);

impl CourseSet {
    /// Add a module; returns `true` when it was not already present.
    pub fn enroll(&mut self, module_id: ModuleId) -> bool {
        self.0.insert(module_id)
    }

    /// Remove a module; returns `true` when it was present.
    pub fn withdraw(&mut self, module_id: &ModuleId) -> bool {
        self.0.remove(module_id)
    }

    /// Whether the module is in the set.
    pub fn contains(&self, module_id: &ModuleId) -> bool {
        self.0.contains(module_id)
    }

    /// Number of enrolled modules.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no modules are enrolled.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate module ids in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &ModuleId> {
        self.0.iter()
    }
}

impl FromIterator<ModuleId> for CourseSet {
    fn from_iter<T: IntoIterator<Item = ModuleId>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Stored user account.
///
/// ## Invariants
/// - `is_admin` is decided once at registration and only changes through an
///   explicit admin-set operation.
/// - `courses` has set semantics regardless of how the store encodes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    id: AccountId,
    email: Email,
    is_admin: bool,
    #[serde(default)]
    courses: CourseSet,
}

impl UserAccount {
    /// Build a freshly registered account with no enrollments.
    pub fn new(id: AccountId, email: Email, is_admin: bool) -> Self {
        Self {
            id,
            email,
            is_admin,
            courses: CourseSet::default(),
        }
    }

    /// Replace the enrollment set.
    pub fn with_courses(mut self, courses: CourseSet) -> Self {
        self.courses = courses;
        self
    }

    /// Account identifier.
    pub fn id(&self) -> &AccountId {
        &self.id
    }

    /// Email address.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Whether the account holds admin rights.
    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// Enrolled module ids.
    pub fn courses(&self) -> &CourseSet {
        &self.courses
    }

    /// Mutable access for enrollment updates.
    pub fn courses_mut(&mut self) -> &mut CourseSet {
        &mut self.courses
    }

    /// Grant or revoke admin rights.
    pub fn set_admin(&mut self, is_admin: bool) {
        self.is_admin = is_admin;
    }
}
