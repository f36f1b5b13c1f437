//! Seed content bundles for the NICU respiratory training catalogue.
//!
//! This crate loads the static `{ modules, certifications }` bundle an
//! operator supplies to populate an empty catalogue. It validates every entry
//! up front and is independent of backend domain types to avoid circular
//! dependencies.
//!
//! # Example
//!
//! ```
//! use training_content::{CategorySeed, ContentBundle};
//!
//! let json = r#"{
//!     "version": 1,
//!     "modules": [{
//!         "id": "ignored",
//!         "title": "Surfactant administration",
//!         "description": "LISA and INSURE techniques",
//!         "category": "procedures",
//!         "duration": 30,
//!         "completed": true,
//!         "score": 92,
//!         "completedDate": "2024-01-15",
//!         "required": true
//!     }],
//!     "certifications": [{
//!         "name": "Neonatal Resuscitation Program",
//!         "issueDate": "2023-03-01",
//!         "expiryDate": "2025-03-01",
//!         "status": "active"
//!     }]
//! }"#;
//!
//! let bundle = ContentBundle::from_json(json).expect("valid bundle");
//! let module = bundle.modules().first().expect("one module");
//! assert_eq!(module.category, CategorySeed::Procedures);
//! assert_eq!(module.completion.map(|c| c.score), Some(92));
//! ```

mod bundle;
mod error;
mod seed;

pub use bundle::ContentBundle;
pub use error::BundleError;
pub use seed::{
    CategorySeed, CertificationSeed, CertificationStatusSeed, CompletionSeed, ModuleSeed,
};
