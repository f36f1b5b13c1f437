//! Training module catalogue entries.
//!
//! A module is completed at most once in normal flow: the completion score
//! and date are written together with the `completed` flag, and
//! [`ModuleCompletion`] keeps them in a single value so a partial triple
//! cannot be represented.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::ModuleId;

/// Days ahead of today within which a pending module counts as upcoming.
pub const UPCOMING_WINDOW_DAYS: i64 = 30;

/// Days ahead of today within which a pending module is flagged as urgent.
pub const URGENT_WINDOW_DAYS: i64 = 7;

/// Validation errors for module records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrainingModuleValidationError {
    /// Title was blank once trimmed.
    #[error("module title must not be empty")]
    EmptyTitle,
    /// Duration was zero minutes.
    #[error("module duration must be at least one minute")]
    ZeroDuration,
    /// Completion fields disagree with the `completed` flag.
    #[error("completed modules need both score and completedDate; pending modules need neither")]
    InconsistentCompletion,
    /// Category name is not part of the catalogue.
    #[error("unknown module category '{0}'")]
    UnknownCategory(String),
}

/// Catalogue category of a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleCategory {
    /// Mechanical and non-invasive ventilation.
    Ventilation,
    /// Devices and consumables.
    Equipment,
    /// Bedside procedures.
    Procedures,
    /// Patient and staff safety.
    Safety,
    /// Unit protocols and guidelines.
    Protocols,
}

impl ModuleCategory {
    /// Every category in display order.
    pub const ALL: [Self; 5] = [
        Self::Ventilation,
        Self::Equipment,
        Self::Procedures,
        Self::Safety,
        Self::Protocols,
    ];

    /// Lowercase wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ventilation => "ventilation",
            Self::Equipment => "equipment",
            Self::Procedures => "procedures",
            Self::Safety => "safety",
            Self::Protocols => "protocols",
        }
    }
}

impl fmt::Display for ModuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleCategory {
    type Err = TrainingModuleValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| TrainingModuleValidationError::UnknownCategory(s.to_owned()))
    }
}

/// Score and date recorded when a module is completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleCompletion {
    score: i32,
    completed_on: NaiveDate,
}

impl ModuleCompletion {
    /// Pair a score with its completion date. Range checks are the caller's.
    pub fn new(score: i32, completed_on: NaiveDate) -> Self {
        Self {
            score,
            completed_on,
        }
    }

    /// Recorded score.
    pub fn score(&self) -> i32 {
        self.score
    }

    /// Calendar date of completion.
    pub fn completed_on(&self) -> NaiveDate {
        self.completed_on
    }
}

/// How close a pending module is to its due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DueStatus {
    /// The due date has passed.
    Overdue,
    /// Due today or within [`URGENT_WINDOW_DAYS`].
    Urgent,
    /// Due later than the urgent window.
    Scheduled,
}

/// A module awaiting an id from the document store.
///
/// # Examples
/// ```
/// use nicu_training::domain::{ModuleCategory, TrainingModuleDraft};
///
/// let draft = TrainingModuleDraft::new(
///     "Neonatal ventilator set-up",
///     "Circuit assembly and pre-use checks",
///     ModuleCategory::Ventilation,
///     45,
///     true,
/// )
/// .expect("valid draft");
/// assert_eq!(draft.title(), "Neonatal ventilator set-up");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingModuleDraft {
    title: String,
    description: String,
    category: ModuleCategory,
    duration_minutes: NonZeroU32,
    completion: Option<ModuleCompletion>,
    due_date: Option<NaiveDate>,
    required: bool,
}

impl TrainingModuleDraft {
    /// Validate the immutable parts of a module.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: ModuleCategory,
        duration_minutes: u32,
        required: bool,
    ) -> Result<Self, TrainingModuleValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(TrainingModuleValidationError::EmptyTitle);
        }
        let duration_minutes =
            NonZeroU32::new(duration_minutes).ok_or(TrainingModuleValidationError::ZeroDuration)?;

        Ok(Self {
            title,
            description: description.into(),
            category,
            duration_minutes,
            completion: None,
            due_date: None,
            required,
        })
    }

    /// Set the due date.
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Ship the module already completed.
    pub fn with_completion(mut self, completion: ModuleCompletion) -> Self {
        self.completion = Some(completion);
        self
    }

    /// Display title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Attach the store-generated id.
    pub fn into_module(self, id: ModuleId) -> TrainingModule {
        TrainingModule {
            id,
            title: self.title,
            description: self.description,
            category: self.category,
            duration_minutes: self.duration_minutes,
            completion: self.completion,
            due_date: self.due_date,
            required: self.required,
        }
    }
}

/// A stored training module.
///
/// ## Invariants
/// - `score` and `completedDate` are present exactly when `completed` is true.
/// - `duration` is a positive number of minutes.
///
/// Serialises as the camelCase catalogue document:
/// `{"id","title","description","category","duration","completed","score",
/// "completedDate","dueDate","required"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TrainingModuleDto", into = "TrainingModuleDto")]
pub struct TrainingModule {
    id: ModuleId,
    title: String,
    description: String,
    category: ModuleCategory,
    duration_minutes: NonZeroU32,
    completion: Option<ModuleCompletion>,
    due_date: Option<NaiveDate>,
    required: bool,
}

impl TrainingModule {
    /// Stable module identifier.
    pub fn id(&self) -> &ModuleId {
        &self.id
    }

    /// Display title.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Display description.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Catalogue category.
    pub fn category(&self) -> ModuleCategory {
        self.category
    }

    /// Duration in minutes.
    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes.get()
    }

    /// Whether the module is mandatory.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether the module has been completed.
    pub fn is_completed(&self) -> bool {
        self.completion.is_some()
    }

    /// Completion details, present only once completed.
    pub fn completion(&self) -> Option<ModuleCompletion> {
        self.completion
    }

    /// Recorded score, present only once completed.
    pub fn score(&self) -> Option<i32> {
        self.completion.map(|c| c.score())
    }

    /// Completion date, present only once completed.
    pub fn completed_on(&self) -> Option<NaiveDate> {
        self.completion.map(|c| c.completed_on())
    }

    /// Due date as stored, whether or not the module is completed.
    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Record a completion, replacing any earlier one.
    pub fn with_completion(mut self, completion: ModuleCompletion) -> Self {
        self.completion = Some(completion);
        self
    }

    /// Calendar days from `today` until the due date.
    ///
    /// `None` once completed or when no due date is set; negative when
    /// overdue and zero when due today.
    pub fn days_until_due(&self, today: NaiveDate) -> Option<i64> {
        if self.is_completed() {
            return None;
        }
        self.due_date.map(|due| (due - today).num_days())
    }

    /// Whether the module is pending and due within
    /// [`UPCOMING_WINDOW_DAYS`], today included.
    pub fn is_due_within_window(&self, today: NaiveDate) -> bool {
        self.days_until_due(today)
            .is_some_and(|days| (0..=UPCOMING_WINDOW_DAYS).contains(&days))
    }

    /// Due status of a pending module with a due date.
    pub fn due_status(&self, today: NaiveDate) -> Option<DueStatus> {
        self.days_until_due(today).map(|days| match days {
            d if d < 0 => DueStatus::Overdue,
            d if d <= URGENT_WINDOW_DAYS => DueStatus::Urgent,
            _ => DueStatus::Scheduled,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrainingModuleDto {
    id: ModuleId,
    title: String,
    #[serde(default)]
    description: String,
    category: ModuleCategory,
    duration: u32,
    completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    score: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    completed_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    due_date: Option<NaiveDate>,
    required: bool,
}

impl From<TrainingModule> for TrainingModuleDto {
    fn from(value: TrainingModule) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            category: value.category,
            duration: value.duration_minutes.get(),
            completed: value.completion.is_some(),
            score: value.completion.map(|c| c.score),
            completed_date: value.completion.map(|c| c.completed_on),
            due_date: value.due_date,
            required: value.required,
        }
    }
}

impl TryFrom<TrainingModuleDto> for TrainingModule {
    type Error = TrainingModuleValidationError;

    fn try_from(value: TrainingModuleDto) -> Result<Self, Self::Error> {
        let completion = match (value.completed, value.score, value.completed_date) {
            (true, Some(score), Some(date)) => Some(ModuleCompletion::new(score, date)),
            (false, None, None) => None,
            _ => return Err(TrainingModuleValidationError::InconsistentCompletion),
        };
        let mut draft = TrainingModuleDraft::new(
            value.title,
            value.description,
            value.category,
            value.duration,
            value.required,
        )?;
        draft.completion = completion;
        draft.due_date = value.due_date;
        Ok(draft.into_module(value.id))
    }
}
