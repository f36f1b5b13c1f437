//! Aggregate progress figures and catalogue views over training modules.
//!
//! Everything here is a pure function of the module list and a calendar
//! date, so the same inputs always yield the same figures.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{DueStatus, ModuleCategory, TrainingModule};

/// Summary figures shown on the dashboard.
///
/// ## Invariants
/// - `completed_modules <= total_modules`.
/// - `upcoming_due <= total_modules - completed_modules`.
/// - `average_score` is zero when no completed module has a score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStats {
    total_modules: usize,
    completed_modules: usize,
    average_score: i64,
    upcoming_due: usize,
}

impl ProgressStats {
    /// Compute stats for `modules` as seen on `today`.
    ///
    /// The average covers completed modules with a score, zero included, and
    /// rounds half away from zero for non-negative means.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use nicu_training::domain::ProgressStats;
    ///
    /// let today = NaiveDate::from_ymd_opt(2024, 3, 10).expect("date");
    /// let stats = ProgressStats::from_modules(&[], today);
    /// assert_eq!(stats.total_modules(), 0);
    /// assert_eq!(stats.average_score(), 0);
    /// ```
    pub fn from_modules(modules: &[TrainingModule], today: NaiveDate) -> Self {
        let scores: Vec<i64> = modules
            .iter()
            .filter_map(TrainingModule::score)
            .map(i64::from)
            .collect();

        Self {
            total_modules: modules.len(),
            completed_modules: modules.iter().filter(|m| m.is_completed()).count(),
            average_score: rounded_mean(&scores),
            upcoming_due: modules
                .iter()
                .filter(|m| m.is_due_within_window(today))
                .count(),
        }
    }

    /// Number of modules in the catalogue.
    pub fn total_modules(&self) -> usize {
        self.total_modules
    }

    /// Number of completed modules.
    pub fn completed_modules(&self) -> usize {
        self.completed_modules
    }

    /// Rounded mean score across completed modules.
    pub fn average_score(&self) -> i64 {
        self.average_score
    }

    /// Pending modules due within the upcoming window.
    pub fn upcoming_due(&self) -> usize {
        self.upcoming_due
    }

    /// Modules not yet completed.
    pub fn remaining_modules(&self) -> usize {
        self.total_modules.saturating_sub(self.completed_modules)
    }

    /// Completed share of the catalogue as a whole percentage.
    pub fn completion_percent(&self) -> u8 {
        if self.total_modules == 0 {
            return 0;
        }
        let pct = (200 * self.completed_modules + self.total_modules) / (2 * self.total_modules);
        u8::try_from(pct).unwrap_or(100)
    }
}

// floor(mean + 0.5) without floating point.
fn rounded_mean(values: &[i64]) -> i64 {
    let Ok(count) = i64::try_from(values.len()) else {
        return 0;
    };
    if count == 0 {
        return 0;
    }
    let sum: i64 = values.iter().sum();
    (2 * sum + count).div_euclid(2 * count)
}

/// Completion filter used by the catalogue listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleFilter {
    /// Every module.
    #[default]
    All,
    /// Completed modules only.
    Completed,
    /// Modules not yet completed.
    Pending,
    /// Mandatory modules.
    Required,
}

impl ModuleFilter {
    /// Whether `module` passes this filter.
    pub fn matches(self, module: &TrainingModule) -> bool {
        match self {
            Self::All => true,
            Self::Completed => module.is_completed(),
            Self::Pending => !module.is_completed(),
            Self::Required => module.is_required(),
        }
    }
}

/// Catalogue listing request: a completion filter plus an optional category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModuleQuery {
    /// Completion filter.
    pub filter: ModuleFilter,
    /// Restrict to one category when set.
    pub category: Option<ModuleCategory>,
}

impl ModuleQuery {
    /// Apply the query to `modules`, preserving input order.
    pub fn apply(self, modules: &[TrainingModule]) -> Vec<TrainingModule> {
        let filtered = filter_modules(modules, self.filter);
        match self.category {
            Some(category) => modules_by_category(&filtered, category),
            None => filtered,
        }
    }
}

/// A pending module with its distance to the due date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingModule {
    module: TrainingModule,
    days_until_due: i64,
    status: DueStatus,
}

impl UpcomingModule {
    /// Describe `module` as of `today`; `None` when completed or undated.
    pub fn from_module(module: TrainingModule, today: NaiveDate) -> Option<Self> {
        let days_until_due = module.days_until_due(today)?;
        let status = module.due_status(today)?;
        Some(Self {
            module,
            days_until_due,
            status,
        })
    }

    /// The module itself.
    pub fn module(&self) -> &TrainingModule {
        &self.module
    }

    /// Calendar days until due; negative when overdue.
    pub fn days_until_due(&self) -> i64 {
        self.days_until_due
    }

    /// Overdue, urgent or scheduled.
    pub fn status(&self) -> DueStatus {
        self.status
    }
}

/// Modules in `category`, preserving input order.
pub fn modules_by_category(
    modules: &[TrainingModule],
    category: ModuleCategory,
) -> Vec<TrainingModule> {
    modules
        .iter()
        .filter(|m| m.category() == category)
        .cloned()
        .collect()
}

/// Modules passing `filter`, preserving input order.
pub fn filter_modules(modules: &[TrainingModule], filter: ModuleFilter) -> Vec<TrainingModule> {
    modules
        .iter()
        .filter(|m| filter.matches(m))
        .cloned()
        .collect()
}

/// Pending modules with a due date, earliest first.
///
/// Overdue modules are included and sort ahead of everything else. Ties keep
/// input order.
pub fn upcoming_modules(modules: &[TrainingModule]) -> Vec<TrainingModule> {
    let mut pending: Vec<TrainingModule> = modules
        .iter()
        .filter(|m| !m.is_completed() && m.due_date().is_some())
        .cloned()
        .collect();
    pending.sort_by_key(TrainingModule::due_date);
    pending
}

/// The `limit` most recently completed modules, newest first.
pub fn recently_completed(modules: &[TrainingModule], limit: usize) -> Vec<TrainingModule> {
    let mut completed: Vec<TrainingModule> = modules
        .iter()
        .filter(|m| m.is_completed())
        .cloned()
        .collect();
    completed.sort_by(|a, b| b.completed_on().cmp(&a.completed_on()));
    completed.truncate(limit);
    completed
}
