//! Shared outcome type for collection seeding.

/// Result of attempting to seed a collection.
///
/// Distinguishes a fresh batch insert from a collection that already held
/// documents, so callers can skip seeding without treating it as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedingResult {
    /// The collection was empty and the batch was written.
    Applied {
        /// Number of documents written.
        inserted: usize,
    },
    /// The collection already held documents; nothing was written.
    AlreadySeeded,
}

impl SeedingResult {
    /// Number of documents written by this attempt.
    pub fn inserted(self) -> usize {
        match self {
            Self::Applied { inserted } => inserted,
            Self::AlreadySeeded => 0,
        }
    }
}
