//! Role classification: weighted keyword scoring over the role catalog

use crate::config::ClassificationConfig;
use crate::error::Result;
use crate::input::posting::JobPosting;
use crate::processing::catalog::{RoleCatalog, RoleCategory};
use crate::processing::keywords::{normalize_text, KeywordPattern};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Scores job text against a [`RoleCatalog`].
///
/// Every keyword hit adds `weight * occurrences` to its category. The best
/// category is the one with the highest score; on ties the category declared
/// first in the catalog wins. Text without any hit resolves to the catalog's
/// default category, which then also holds 100% of the breakdown.
///
/// The classifier holds no mutable state and can be shared across threads.
#[derive(Debug, Clone)]
pub struct RoleClassifier {
    catalog: RoleCatalog,
    compiled: Vec<CompiledCategory>,
    title_weight: f64,
}

#[derive(Debug, Clone)]
struct CompiledCategory {
    role: RoleCategory,
    keywords: Vec<(KeywordPattern, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleScore {
    pub role: RoleCategory,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleShare {
    pub role: RoleCategory,
    pub percentage: f64,
}

/// Percentage share of every catalog category, in catalog order.
/// Shares are non-negative and sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleScoreBreakdown {
    shares: Vec<RoleShare>,
    /// True when no keyword matched and the default category took the whole share
    pub fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordHit {
    pub role: RoleCategory,
    pub phrase: String,
    pub count: usize,
    pub weight: f64,
    pub contribution: f64,
}

/// Full classification of a posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleAssessment {
    pub role: RoleCategory,
    pub breakdown: RoleScoreBreakdown,
    pub scores: Vec<RoleScore>,
    pub hits: Vec<KeywordHit>,
    pub total_score: f64,
}

impl RoleScoreBreakdown {
    pub fn get(&self, role: RoleCategory) -> f64 {
        self.shares
            .iter()
            .find(|share| share.role == role)
            .map_or(0.0, |share| share.percentage)
    }

    pub fn shares(&self) -> &[RoleShare] {
        &self.shares
    }

    pub fn iter(&self) -> impl Iterator<Item = (RoleCategory, f64)> + '_ {
        self.shares.iter().map(|share| (share.role, share.percentage))
    }

    pub fn total(&self) -> f64 {
        self.shares.iter().map(|share| share.percentage).sum()
    }

    /// Categories at or above `threshold`, highest first. Equal percentages
    /// keep catalog order.
    pub fn above(&self, threshold: f64) -> Vec<(RoleCategory, f64)> {
        let mut selected: Vec<(RoleCategory, f64)> =
            self.iter().filter(|(_, pct)| *pct >= threshold).collect();
        selected.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        selected
    }
}

impl RoleClassifier {
    /// Compile every catalog phrase once.
    pub fn new(catalog: RoleCatalog) -> Result<Self> {
        catalog.validate()?;

        let compiled = catalog
            .categories()
            .iter()
            .map(|definition| {
                let keywords = definition
                    .keywords
                    .iter()
                    .map(|keyword| Ok((KeywordPattern::new(&keyword.phrase)?, keyword.weight)))
                    .collect::<Result<Vec<_>>>()?;
                Ok(CompiledCategory {
                    role: definition.role,
                    keywords,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "Compiled {} keyword patterns across {} role categories",
            compiled.iter().map(|c| c.keywords.len()).sum::<usize>(),
            compiled.len()
        );

        Ok(Self {
            catalog,
            compiled,
            title_weight: 1.0,
        })
    }

    /// Build from configuration, loading an external catalog when one is set.
    pub fn from_config(config: &ClassificationConfig) -> Result<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => RoleCatalog::load(path)?,
            None => RoleCatalog::builtin(),
        };

        Ok(Self::new(catalog)?.with_title_weight(config.title_weight))
    }

    pub fn with_title_weight(mut self, title_weight: f64) -> Self {
        self.title_weight = title_weight;
        self
    }

    pub fn catalog(&self) -> &RoleCatalog {
        &self.catalog
    }

    /// Keyword hits in catalog order, each carrying its weighted contribution.
    pub fn keyword_hits(&self, text: &str) -> Vec<KeywordHit> {
        self.collect_hits(&normalize_text(text), 1.0)
    }

    /// Raw weighted score per category, in catalog order.
    pub fn raw_scores(&self, text: &str) -> Vec<RoleScore> {
        self.scores_from_hits(&self.keyword_hits(text))
    }

    pub fn analyze_job_role(&self, text: &str) -> RoleCategory {
        self.best_role(&self.raw_scores(text))
    }

    pub fn get_role_percentages(&self, text: &str) -> RoleScoreBreakdown {
        self.breakdown_from_scores(&self.raw_scores(text))
    }

    pub fn get_role_breakdown(&self, text: &str, threshold: f64) -> Vec<(RoleCategory, f64)> {
        self.get_role_percentages(text).above(threshold)
    }

    /// Classify a structured posting. Title hits are scaled by the configured
    /// title weight; description hits count once.
    pub fn assess(&self, posting: &JobPosting) -> RoleAssessment {
        let mut hits = self.collect_hits(&normalize_text(&posting.title), self.title_weight);

        for hit in self.collect_hits(&normalize_text(&posting.description), 1.0) {
            match hits
                .iter_mut()
                .find(|existing| existing.role == hit.role && existing.phrase == hit.phrase)
            {
                Some(existing) => {
                    existing.count += hit.count;
                    existing.contribution += hit.contribution;
                }
                None => hits.push(hit),
            }
        }

        let scores = self.scores_from_hits(&hits);
        let role = self.best_role(&scores);
        let breakdown = self.breakdown_from_scores(&scores);
        let total_score = scores.iter().map(|s| s.score).sum();

        RoleAssessment {
            role,
            breakdown,
            scores,
            hits,
            total_score,
        }
    }

    fn collect_hits(&self, normalized: &str, multiplier: f64) -> Vec<KeywordHit> {
        let mut hits = Vec::new();
        if normalized.is_empty() || multiplier <= 0.0 {
            return hits;
        }

        for category in &self.compiled {
            for (pattern, weight) in &category.keywords {
                let count = pattern.count(normalized);
                if count > 0 {
                    hits.push(KeywordHit {
                        role: category.role,
                        phrase: pattern.phrase().to_string(),
                        count,
                        weight: *weight,
                        contribution: *weight * count as f64 * multiplier,
                    });
                }
            }
        }

        hits
    }

    fn scores_from_hits(&self, hits: &[KeywordHit]) -> Vec<RoleScore> {
        self.compiled
            .iter()
            .map(|category| {
                let score = hits
                    .iter()
                    .filter(|hit| hit.role == category.role)
                    .map(|hit| hit.contribution)
                    .sum();
                debug!("Score for {}: {:.2}", category.role, score);
                RoleScore {
                    role: category.role,
                    score,
                }
            })
            .collect()
    }

    fn best_role(&self, scores: &[RoleScore]) -> RoleCategory {
        let mut best: Option<&RoleScore> = None;
        for score in scores {
            // Strict comparison keeps the earliest declared category on ties
            if score.score > 0.0 && best.map_or(true, |b| score.score > b.score) {
                best = Some(score);
            }
        }

        match best {
            Some(score) => score.role,
            None => {
                warn!(
                    "No keyword signal, falling back to {}",
                    self.catalog.default_category()
                );
                self.catalog.default_category()
            }
        }
    }

    fn breakdown_from_scores(&self, scores: &[RoleScore]) -> RoleScoreBreakdown {
        let total: f64 = scores.iter().map(|s| s.score).sum();

        if total <= 0.0 {
            let default = self.catalog.default_category();
            let shares = scores
                .iter()
                .map(|s| RoleShare {
                    role: s.role,
                    percentage: if s.role == default { 100.0 } else { 0.0 },
                })
                .collect();
            return RoleScoreBreakdown {
                shares,
                fallback: true,
            };
        }

        let shares = scores
            .iter()
            .map(|s| RoleShare {
                role: s.role,
                percentage: s.score / total * 100.0,
            })
            .collect();

        RoleScoreBreakdown {
            shares,
            fallback: false,
        }
    }
}
