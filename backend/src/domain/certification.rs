//! Professional certifications held by therapists.
//!
//! `status` is stored data. Nothing recomputes it from the issue and expiry
//! dates; changing that is a product decision, not a bug fix.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::CertificationId;

/// Validation errors for certification records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CertificationValidationError {
    /// Name was blank once trimmed.
    #[error("certification name must not be empty")]
    EmptyName,
}

/// Stored lifecycle status of a certification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertificationStatus {
    /// Current and valid.
    Active,
    /// Approaching expiry.
    Expiring,
    /// Lapsed.
    Expired,
}

/// A certification awaiting an id from the document store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificationDraft {
    name: String,
    issue_date: NaiveDate,
    expiry_date: NaiveDate,
    status: CertificationStatus,
}

impl CertificationDraft {
    /// Validate a certification's content.
    pub fn new(
        name: impl Into<String>,
        issue_date: NaiveDate,
        expiry_date: NaiveDate,
        status: CertificationStatus,
    ) -> Result<Self, CertificationValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CertificationValidationError::EmptyName);
        }
        Ok(Self {
            name,
            issue_date,
            expiry_date,
            status,
        })
    }

    /// Attach the store-generated id.
    pub fn into_certification(self, id: CertificationId) -> Certification {
        Certification {
            id,
            name: self.name,
            issue_date: self.issue_date,
            expiry_date: self.expiry_date,
            status: self.status,
        }
    }
}

/// A stored certification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    id: CertificationId,
    name: String,
    issue_date: NaiveDate,
    expiry_date: NaiveDate,
    status: CertificationStatus,
}

impl Certification {
    /// Stable certification identifier.
    pub fn id(&self) -> &CertificationId {
        &self.id
    }

    /// Certification name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Issue date.
    pub fn issue_date(&self) -> NaiveDate {
        self.issue_date
    }

    /// Expiry date.
    pub fn expiry_date(&self) -> NaiveDate {
        self.expiry_date
    }

    /// Stored status.
    pub fn status(&self) -> CertificationStatus {
        self.status
    }
}
