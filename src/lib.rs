//! Job tailor library
//!
//! Classifies job postings into role categories and fills LaTeX résumé and
//! cover-letter templates with posting-specific values.

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{JobTailorError, Result};
pub use input::posting::JobPosting;
pub use processing::catalog::{RoleCatalog, RoleCategory};
pub use processing::classifier::{RoleClassifier, RoleScoreBreakdown};
pub use processing::template::{CustomizedDocument, TemplateCustomizer};
