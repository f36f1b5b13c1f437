//! Content bundle parsing and validation.
//!
//! A bundle is the static `{ modules, certifications }` document an operator
//! supplies once to populate an empty catalogue. Ids present in the bundle
//! are ignored; the store generates fresh ones on insert.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::BundleError;
use crate::seed::{
    CategorySeed, CertificationSeed, CertificationStatusSeed, CompletionSeed, ModuleSeed,
};

/// Current supported bundle version.
const SUPPORTED_VERSION: u32 = 1;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A validated seed content bundle.
///
/// # Example
///
/// ```
/// use training_content::ContentBundle;
///
/// let json = r#"{
///     "modules": [{
///         "title": "Neonatal ventilator set-up",
///         "description": "Circuit assembly and pre-use checks",
///         "category": "ventilation",
///         "duration": 45,
///         "required": true
///     }],
///     "certifications": []
/// }"#;
///
/// let bundle = ContentBundle::from_json(json).expect("valid bundle");
/// assert_eq!(bundle.modules().len(), 1);
/// assert!(bundle.certifications().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentBundle {
    version: u32,
    modules: Vec<ModuleSeed>,
    certifications: Vec<CertificationSeed>,
}

impl ContentBundle {
    /// Parses a bundle from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError`] if the JSON is malformed, the version is
    /// unsupported, or any entry fails validation.
    pub fn from_json(json: &str) -> Result<Self, BundleError> {
        let raw: RawBundle = serde_json::from_str(json).map_err(|e| BundleError::ParseError {
            message: e.to_string(),
        })?;

        Self::from_raw(raw)
    }

    /// Loads a bundle from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`BundleError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, BundleError> {
        let contents = fs::read_to_string(path).map_err(|e| BundleError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_json(&contents)
    }

    fn from_raw(raw: RawBundle) -> Result<Self, BundleError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(BundleError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        let modules = raw
            .modules
            .into_iter()
            .enumerate()
            .map(|(index, module)| module.validate(index))
            .collect::<Result<Vec<_>, _>>()?;

        let certifications = raw
            .certifications
            .into_iter()
            .enumerate()
            .map(|(index, cert)| cert.validate(index))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            version: raw.version,
            modules,
            certifications,
        })
    }

    /// Returns the bundle version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns the module seeds in bundle order.
    #[must_use]
    pub fn modules(&self) -> &[ModuleSeed] {
        &self.modules
    }

    /// Returns the certification seeds in bundle order.
    #[must_use]
    pub fn certifications(&self) -> &[CertificationSeed] {
        &self.certifications
    }
}

const fn default_version() -> u32 {
    SUPPORTED_VERSION
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBundle {
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default)]
    modules: Vec<RawModule>,
    #[serde(default)]
    certifications: Vec<RawCertification>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawModule {
    title: String,
    #[serde(default)]
    description: String,
    category: String,
    duration: u32,
    #[serde(default)]
    completed: bool,
    #[serde(default)]
    score: Option<i32>,
    #[serde(default)]
    completed_date: Option<String>,
    #[serde(default)]
    due_date: Option<String>,
    #[serde(default)]
    required: bool,
}

impl RawModule {
    fn validate(self, index: usize) -> Result<ModuleSeed, BundleError> {
        const COLLECTION: &str = "modules";

        if self.title.trim().is_empty() {
            return Err(BundleError::BlankField {
                collection: COLLECTION,
                index,
                field: "title",
            });
        }

        let category =
            CategorySeed::from_name(&self.category).ok_or_else(|| BundleError::UnknownCategory {
                index,
                value: self.category.clone(),
            })?;

        if self.duration == 0 {
            return Err(BundleError::ZeroDuration { index });
        }

        let completed_on = self
            .completed_date
            .as_deref()
            .map(|value| parse_date(COLLECTION, index, "completedDate", value))
            .transpose()?;
        let completion = match (self.completed, self.score, completed_on) {
            (true, Some(score), Some(completed_on)) => Some(CompletionSeed {
                score,
                completed_on,
            }),
            (false, None, None) => None,
            _ => return Err(BundleError::InconsistentCompletion { index }),
        };

        let due_date = self
            .due_date
            .as_deref()
            .map(|value| parse_date(COLLECTION, index, "dueDate", value))
            .transpose()?;

        Ok(ModuleSeed {
            title: self.title,
            description: self.description,
            category,
            duration_minutes: self.duration,
            completion,
            due_date,
            required: self.required,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCertification {
    name: String,
    issue_date: String,
    expiry_date: String,
    status: String,
}

impl RawCertification {
    fn validate(self, index: usize) -> Result<CertificationSeed, BundleError> {
        const COLLECTION: &str = "certifications";

        if self.name.trim().is_empty() {
            return Err(BundleError::BlankField {
                collection: COLLECTION,
                index,
                field: "name",
            });
        }

        let issue_date = parse_date(COLLECTION, index, "issueDate", &self.issue_date)?;
        let expiry_date = parse_date(COLLECTION, index, "expiryDate", &self.expiry_date)?;
        let status = CertificationStatusSeed::from_name(&self.status).ok_or_else(|| {
            BundleError::UnknownStatus {
                index,
                value: self.status.clone(),
            }
        })?;

        Ok(CertificationSeed {
            name: self.name,
            issue_date,
            expiry_date,
            status,
        })
    }
}

fn parse_date(
    collection: &'static str,
    index: usize,
    field: &'static str,
    value: &str,
) -> Result<NaiveDate, BundleError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| BundleError::InvalidDate {
        collection,
        index,
        field,
        value: value.to_owned(),
    })
}
