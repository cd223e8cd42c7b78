//! Job text analysis: keyword counting, role classification and template customization

pub mod catalog;
pub mod classifier;
pub mod keywords;
pub mod template;
