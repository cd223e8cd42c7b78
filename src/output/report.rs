//! Report structures shared by the output formatters

use crate::input::posting::JobPosting;
use crate::processing::catalog::RoleCategory;
use crate::processing::classifier::{KeywordHit, RoleAssessment};
use crate::processing::template::{CustomizedDocument, StructureWarning};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub source: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub role: RoleCategory,
    pub role_title: String,
    pub threshold: f64,
    pub breakdown: Vec<BreakdownEntry>,
    pub fallback: bool,
    pub total_score: f64,
    pub top_keywords: Vec<KeywordHit>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub role: RoleCategory,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomizationReport {
    pub template: String,
    pub role: RoleCategory,
    pub display_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    pub replacements: usize,
    pub warnings: Vec<StructureWarning>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_to: Option<String>,
}

impl ClassificationReport {
    pub fn from_assessment(
        source: &str,
        posting: &JobPosting,
        assessment: &RoleAssessment,
        threshold: f64,
        max_keywords: usize,
    ) -> Self {
        let breakdown = assessment
            .breakdown
            .above(threshold)
            .into_iter()
            .map(|(role, percentage)| BreakdownEntry { role, percentage })
            .collect();

        let mut top_keywords = assessment.hits.clone();
        top_keywords.sort_by(|a, b| {
            b.contribution
                .partial_cmp(&a.contribution)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.phrase.cmp(&b.phrase))
        });
        top_keywords.truncate(max_keywords);

        Self {
            source: source.to_string(),
            title: posting.title.clone(),
            company: posting.company_name().map(str::to_string),
            role: assessment.role,
            role_title: assessment.role.display_title().to_string(),
            threshold,
            breakdown,
            fallback: assessment.breakdown.fallback,
            total_score: assessment.total_score,
            top_keywords,
        }
    }
}

impl CustomizationReport {
    pub fn new(
        template: &str,
        role: RoleCategory,
        company: Option<&str>,
        document: &CustomizedDocument,
        saved_to: Option<&str>,
    ) -> Self {
        Self {
            template: template.to_string(),
            role,
            display_title: document.display_title.clone(),
            company: company.map(str::to_string),
            replacements: document.replacements,
            warnings: document.warnings.clone(),
            saved_to: saved_to.map(str::to_string),
        }
    }
}
