//! Validated seed records produced from a content bundle.
//!
//! These types mirror the catalogue shapes without depending on backend
//! domain types, so the backend maps them into its own entities.

use chrono::NaiveDate;

/// Training category declared by a seed module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategorySeed {
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

impl CategorySeed {
    /// Parse the lowercase wire name used by bundles.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ventilation" => Some(Self::Ventilation),
            "equipment" => Some(Self::Equipment),
            "procedures" => Some(Self::Procedures),
            "safety" => Some(Self::Safety),
            "protocols" => Some(Self::Protocols),
            _ => None,
        }
    }

    /// Lowercase wire name, the inverse of [`Self::from_name`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ventilation => "ventilation",
            Self::Equipment => "equipment",
            Self::Procedures => "procedures",
            Self::Safety => "safety",
            Self::Protocols => "protocols",
        }
    }
}

/// Score and completion date recorded together for a completed module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionSeed {
    /// Assessment score, nominally 0 to 100.
    pub score: i32,
    /// Calendar date the module was completed.
    pub completed_on: NaiveDate,
}

/// A training module ready to be inserted under a freshly generated id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSeed {
    /// Display title.
    pub title: String,
    /// Display description.
    pub description: String,
    /// Catalogue category.
    pub category: CategorySeed,
    /// Duration in minutes; always positive.
    pub duration_minutes: u32,
    /// Completion details when the bundle ships the module as completed.
    pub completion: Option<CompletionSeed>,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Whether the module is mandatory.
    pub required: bool,
}

/// Stored status of a certification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CertificationStatusSeed {
    /// Current and valid.
    Active,
    /// Approaching its expiry date.
    Expiring,
    /// Past its expiry date.
    Expired,
}

impl CertificationStatusSeed {
    /// Parse the lowercase wire name used by bundles.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "active" => Some(Self::Active),
            "expiring" => Some(Self::Expiring),
            "expired" => Some(Self::Expired),
            _ => None,
        }
    }
}

/// A certification ready to be inserted under a freshly generated id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificationSeed {
    /// Certification name.
    pub name: String,
    /// Date the certification was issued.
    pub issue_date: NaiveDate,
    /// Date the certification lapses.
    pub expiry_date: NaiveDate,
    /// Stored status; never recomputed from the dates.
    pub status: CertificationStatusSeed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ventilation", Some(CategorySeed::Ventilation))]
    #[case("protocols", Some(CategorySeed::Protocols))]
    #[case("Ventilation", None)]
    #[case("", None)]
    fn category_names_are_lowercase(#[case] name: &str, #[case] expected: Option<CategorySeed>) {
        assert_eq!(CategorySeed::from_name(name), expected);
    }

    #[rstest]
    fn category_names_round_trip() {
        for category in [
            CategorySeed::Ventilation,
            CategorySeed::Equipment,
            CategorySeed::Procedures,
            CategorySeed::Safety,
            CategorySeed::Protocols,
        ] {
            assert_eq!(CategorySeed::from_name(category.name()), Some(category));
        }
    }

    #[rstest]
    #[case("expiring", Some(CertificationStatusSeed::Expiring))]
    #[case("lapsed", None)]
    fn status_names_are_recognised(
        #[case] name: &str,
        #[case] expected: Option<CertificationStatusSeed>,
    ) {
        assert_eq!(CertificationStatusSeed::from_name(name), expected);
    }
}
