//! Shared validation helpers for inbound HTTP adapters.

use std::ops::RangeInclusive;

use serde_json::json;

use crate::domain::{AccountId, Error, ModuleId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidId,
    OutOfRange,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::OutOfRange => "out_of_range",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

pub(crate) const ACCOUNT_ID: FieldName = FieldName::new("accountId");
pub(crate) const MODULE_ID: FieldName = FieldName::new("moduleId");
pub(crate) const SCORE: FieldName = FieldName::new("score");

/// Accepted completion scores.
pub(crate) const SCORE_RANGE: RangeInclusive<i32> = 0..=100;

fn field_error(
    field: FieldName,
    message: impl Into<String>,
    code: ErrorCode,
    value: impl Into<serde_json::Value>,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value.into(),
        "code": code.as_str(),
    }))
}

pub(crate) fn parse_module_id(value: String, field: FieldName) -> Result<ModuleId, Error> {
    ModuleId::new(value.clone())
        .map_err(|err| field_error(field, err.to_string(), ErrorCode::InvalidId, value))
}

pub(crate) fn parse_account_id(value: String, field: FieldName) -> Result<AccountId, Error> {
    AccountId::new(value.clone())
        .map_err(|err| field_error(field, err.to_string(), ErrorCode::InvalidId, value))
}

pub(crate) fn validate_score(score: i32) -> Result<i32, Error> {
    if SCORE_RANGE.contains(&score) {
        Ok(score)
    } else {
        Err(field_error(
            SCORE,
            format!(
                "score must be between {} and {}",
                SCORE_RANGE.start(),
                SCORE_RANGE.end()
            ),
            ErrorCode::OutOfRange,
            score,
        ))
    }
}
