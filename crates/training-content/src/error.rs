//! Error types for the training-content crate.
//!
//! Every variant carries the position of the offending entry so operators can
//! fix a bundle without bisecting it by hand.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or validating a seed content bundle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BundleError {
    /// The bundle file could not be read.
    #[error("failed to read content bundle at '{path}': {message}")]
    IoError {
        /// Path to the bundle file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The bundle JSON is malformed or missing required fields.
    #[error("invalid content bundle JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The bundle version is not supported.
    #[error("unsupported content bundle version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Version declared by the bundle.
        actual: u32,
    },

    /// A module title or certification name is blank.
    #[error("{collection} entry {index} has a blank {field}")]
    BlankField {
        /// Collection holding the entry (`modules` or `certifications`).
        collection: &'static str,
        /// Index of the entry within its collection.
        index: usize,
        /// Name of the blank field.
        field: &'static str,
    },

    /// A module declares a category outside the catalogue.
    #[error("module {index} has unknown category '{value}'")]
    UnknownCategory {
        /// Index of the module.
        index: usize,
        /// The unrecognised category.
        value: String,
    },

    /// A module declares a zero-minute duration.
    #[error("module {index} must last at least one minute")]
    ZeroDuration {
        /// Index of the module.
        index: usize,
    },

    /// A module's completion fields disagree with its `completed` flag.
    #[error("module {index} must set score and completedDate together with completed = true")]
    InconsistentCompletion {
        /// Index of the module.
        index: usize,
    },

    /// A certification declares a status outside the known set.
    #[error("certification {index} has unknown status '{value}'")]
    UnknownStatus {
        /// Index of the certification.
        index: usize,
        /// The unrecognised status.
        value: String,
    },

    /// A date field is not an ISO-8601 calendar date.
    #[error("{collection} entry {index} has invalid {field} '{value}' (expected YYYY-MM-DD)")]
    InvalidDate {
        /// Collection holding the entry.
        collection: &'static str,
        /// Index of the entry within its collection.
        index: usize,
        /// Name of the date field.
        field: &'static str,
        /// The rejected value.
        value: String,
    },
}
