//! Role categories and the weighted keyword catalog used to score postings

use crate::error::{JobTailorError, Result};
use crate::processing::keywords::normalize_text;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Job-family archetype a posting can be classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleCategory {
    FullstackDeveloper,
    DevopsCloud,
    BackendDeveloper,
    AndroidDeveloper,
    AiProductEngineer,
    IncidentManagementSre,
    ItBusinessAnalyst,
}

impl RoleCategory {
    pub const ALL: [RoleCategory; 7] = [
        RoleCategory::FullstackDeveloper,
        RoleCategory::DevopsCloud,
        RoleCategory::BackendDeveloper,
        RoleCategory::AndroidDeveloper,
        RoleCategory::AiProductEngineer,
        RoleCategory::IncidentManagementSre,
        RoleCategory::ItBusinessAnalyst,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleCategory::FullstackDeveloper => "fullstack_developer",
            RoleCategory::DevopsCloud => "devops_cloud",
            RoleCategory::BackendDeveloper => "backend_developer",
            RoleCategory::AndroidDeveloper => "android_developer",
            RoleCategory::AiProductEngineer => "ai_product_engineer",
            RoleCategory::IncidentManagementSre => "incident_management_sre",
            RoleCategory::ItBusinessAnalyst => "it_business_analyst",
        }
    }

    /// Human-readable title, used when a posting carries no usable job title.
    pub fn display_title(&self) -> &'static str {
        match self {
            RoleCategory::FullstackDeveloper => "Full-Stack Developer",
            RoleCategory::DevopsCloud => "DevOps and Cloud Engineer",
            RoleCategory::BackendDeveloper => "Backend Developer",
            RoleCategory::AndroidDeveloper => "Android Developer",
            RoleCategory::AiProductEngineer => "AI Product Engineer",
            RoleCategory::IncidentManagementSre => "Site Reliability Engineer",
            RoleCategory::ItBusinessAnalyst => "IT Business Analyst",
        }
    }
}

impl fmt::Display for RoleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleCategory {
    type Err = JobTailorError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase().replace(['-', ' '], "_");
        RoleCategory::ALL
            .iter()
            .copied()
            .find(|role| role.as_str() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = RoleCategory::ALL.iter().map(|r| r.as_str()).collect();
                JobTailorError::InvalidInput(format!(
                    "Unknown role category: {}. Supported: {}",
                    s,
                    known.join(", ")
                ))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedKeyword {
    pub phrase: String,
    pub weight: f64,
}

impl WeightedKeyword {
    pub fn new(phrase: impl Into<String>, weight: f64) -> Self {
        Self {
            phrase: phrase.into(),
            weight,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDefinition {
    pub role: RoleCategory,
    pub keywords: Vec<WeightedKeyword>,
}

/// Ordered, read-only catalog of role categories.
///
/// Declaration order matters: it breaks score ties and fixes the order of
/// every breakdown. `default_category` receives the whole share when a text
/// carries no keyword signal at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleCatalog {
    default_category: RoleCategory,
    categories: Vec<CategoryDefinition>,
}

impl RoleCatalog {
    pub fn new(default_category: RoleCategory, categories: Vec<CategoryDefinition>) -> Result<Self> {
        let catalog = Self {
            default_category,
            categories,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let catalog: RoleCatalog = toml::from_str(content)
            .map_err(|e| JobTailorError::Catalog(format!("Failed to parse catalog: {}", e)))?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| JobTailorError::Catalog(format!("Failed to serialize catalog: {}", e)))
    }

    pub fn default_category(&self) -> RoleCategory {
        self.default_category
    }

    pub fn categories(&self) -> &[CategoryDefinition] {
        &self.categories
    }

    pub fn roles(&self) -> impl Iterator<Item = RoleCategory> + '_ {
        self.categories.iter().map(|c| c.role)
    }

    pub fn get(&self, role: RoleCategory) -> Option<&CategoryDefinition> {
        self.categories.iter().find(|c| c.role == role)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Check the invariants every loaded catalog must hold.
    pub fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(JobTailorError::Catalog("catalog declares no categories".to_string()));
        }

        let mut seen = HashSet::new();
        for definition in &self.categories {
            if !seen.insert(definition.role) {
                return Err(JobTailorError::Catalog(format!(
                    "category {} is declared more than once",
                    definition.role
                )));
            }

            if definition.keywords.is_empty() {
                return Err(JobTailorError::Catalog(format!(
                    "category {} has no keywords",
                    definition.role
                )));
            }

            let mut phrases = HashSet::new();
            for keyword in &definition.keywords {
                if !keyword.weight.is_finite() || keyword.weight <= 0.0 {
                    return Err(JobTailorError::Catalog(format!(
                        "keyword '{}' in {} has invalid weight {}",
                        keyword.phrase, definition.role, keyword.weight
                    )));
                }

                let normalized = normalize_text(&keyword.phrase.replace('-', " "));
                if normalized.is_empty() {
                    return Err(JobTailorError::Catalog(format!(
                        "category {} contains an empty keyword",
                        definition.role
                    )));
                }
                if !phrases.insert(normalized) {
                    warn!(
                        "Keyword '{}' appears twice in {}; its hits will be counted twice",
                        keyword.phrase, definition.role
                    );
                }
            }
        }

        if !seen.contains(&self.default_category) {
            return Err(JobTailorError::Catalog(format!(
                "default category {} is not declared in the catalog",
                self.default_category
            )));
        }

        Ok(())
    }

    /// Built-in catalog.
    ///
    /// Backend-specific terms carry more weight than the bare `ai` token so a
    /// Java/Spring posting that mentions an AI integration stays backend.
    pub fn builtin() -> Self {
        fn keywords(entries: &[(&str, f64)]) -> Vec<WeightedKeyword> {
            entries
                .iter()
                .map(|&(phrase, weight)| WeightedKeyword::new(phrase, weight))
                .collect()
        }

        let categories = vec![
            CategoryDefinition {
                role: RoleCategory::FullstackDeveloper,
                keywords: keywords(&[
                    ("full stack", 3.0),
                    ("fullstack", 3.0),
                    ("react", 2.0),
                    ("angular", 2.0),
                    ("vue", 2.0),
                    ("next.js", 2.0),
                    ("node.js", 2.0),
                    ("nodejs", 2.0),
                    ("typescript", 1.5),
                    ("javascript", 1.5),
                    ("frontend", 1.5),
                    ("front end", 1.5),
                    ("html", 1.0),
                    ("css", 1.0),
                ]),
            },
            CategoryDefinition {
                role: RoleCategory::DevopsCloud,
                keywords: keywords(&[
                    ("devops", 3.0),
                    ("infrastructure as code", 3.0),
                    ("kubernetes", 2.5),
                    ("k8s", 2.5),
                    ("terraform", 2.5),
                    ("cloud infrastructure", 2.5),
                    ("platform engineer", 2.5),
                    ("docker", 2.0),
                    ("ansible", 2.0),
                    ("helm", 2.0),
                    ("aws", 2.0),
                    ("azure", 2.0),
                    ("gcp", 2.0),
                    ("ci/cd", 2.0),
                    ("jenkins", 2.0),
                ]),
            },
            CategoryDefinition {
                role: RoleCategory::BackendDeveloper,
                keywords: keywords(&[
                    ("backend", 3.0),
                    ("back end", 3.0),
                    ("java", 3.0),
                    ("spring boot", 3.0),
                    ("microservices", 3.0),
                    ("spring", 1.5),
                    ("rest api", 2.0),
                    ("server side", 2.0),
                    ("hibernate", 2.0),
                    ("kafka", 2.0),
                    ("golang", 2.0),
                    ("c#", 2.0),
                    (".net", 2.0),
                    ("postgresql", 1.5),
                    ("sql", 1.0),
                    ("api integration", 1.0),
                ]),
            },
            CategoryDefinition {
                role: RoleCategory::AndroidDeveloper,
                keywords: keywords(&[
                    ("android", 3.0),
                    ("kotlin", 3.0),
                    ("jetpack compose", 3.0),
                    ("android sdk", 3.0),
                    ("mobile app", 2.0),
                    ("play store", 2.0),
                    ("mobile", 1.0),
                    ("gradle", 1.0),
                ]),
            },
            CategoryDefinition {
                role: RoleCategory::AiProductEngineer,
                keywords: keywords(&[
                    ("llm", 3.0),
                    ("large language model", 3.0),
                    ("generative ai", 3.0),
                    ("genai", 3.0),
                    ("prompt engineering", 3.0),
                    ("langchain", 3.0),
                    ("ai product", 3.0),
                    ("machine learning", 2.5),
                    ("artificial intelligence", 2.0),
                    ("openai", 2.0),
                    ("pytorch", 2.0),
                    ("nlp", 2.0),
                    ("rag", 2.0),
                    ("ai", 1.0),
                ]),
            },
            CategoryDefinition {
                role: RoleCategory::IncidentManagementSre,
                keywords: keywords(&[
                    ("site reliability", 3.0),
                    ("sre", 3.0),
                    ("incident management", 3.0),
                    ("incident response", 3.0),
                    ("on call", 2.0),
                    ("observability", 2.0),
                    ("postmortem", 2.0),
                    ("pagerduty", 2.0),
                    ("prometheus", 2.0),
                    ("grafana", 2.0),
                    ("slo", 2.0),
                    ("sla", 1.5),
                    ("monitoring", 1.5),
                    ("uptime", 1.5),
                ]),
            },
            CategoryDefinition {
                role: RoleCategory::ItBusinessAnalyst,
                keywords: keywords(&[
                    ("business analyst", 3.0),
                    ("business analysis", 3.0),
                    ("requirements gathering", 3.0),
                    ("functional requirements", 2.5),
                    ("gap analysis", 2.5),
                    ("bpmn", 2.5),
                    ("stakeholder", 2.0),
                    ("stakeholders", 2.0),
                    ("user stories", 2.0),
                    ("process improvement", 2.0),
                    ("uml", 1.5),
                    ("jira", 1.0),
                ]),
            },
        ];

        Self {
            default_category: RoleCategory::FullstackDeveloper,
            categories,
        }
    }
}

impl Default for RoleCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
