//! Keyword normalization and phrase counting
//!
//! Phrases are matched as atomic units against normalized text. A phrase only
//! counts when it is not glued to surrounding word characters, so `python`
//! never matches inside `python123` and `java` never matches inside
//! `javascript`.
//!
//! Separator policy: inside a phrase, a space and a hyphen are interchangeable.
//! The phrase `full stack` therefore matches both `full stack` and
//! `full-stack`, and configuring both spellings would count the same text
//! twice. Closed compounds (`fullstack`) are a different token and must be
//! configured separately.

use crate::error::{JobTailorError, Result};
use log::warn;
use regex::Regex;
use std::collections::BTreeMap;

/// Lowercase, fold typographic punctuation and collapse whitespace.
///
/// The result never has leading/trailing whitespace or runs of more than one
/// space, and `normalize_text(&normalize_text(x)) == normalize_text(x)`.
pub fn normalize_text(text: &str) -> String {
    let folded: String = text.chars().map(fold_punctuation).collect();
    folded
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn fold_punctuation(c: char) -> char {
    match c {
        '\u{2018}' | '\u{2019}' => '\'',
        '\u{201C}' | '\u{201D}' => '"',
        '\u{2010}' | '\u{2011}' | '\u{2013}' | '\u{2014}' => '-',
        _ => c,
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// A single keyword phrase compiled for repeated matching.
#[derive(Debug, Clone)]
pub struct KeywordPattern {
    phrase: String,
    regex: Regex,
    left_bounded: bool,
    right_bounded: bool,
}

impl KeywordPattern {
    pub fn new(phrase: &str) -> Result<Self> {
        let canonical = normalize_text(phrase);
        let parts: Vec<&str> = canonical
            .split(|c| c == ' ' || c == '-')
            .filter(|part| !part.is_empty())
            .collect();

        if parts.is_empty() {
            return Err(JobTailorError::InvalidInput(format!(
                "keyword phrase '{}' has no matchable content",
                phrase
            )));
        }

        let pattern = parts
            .iter()
            .map(|part| regex::escape(part))
            .collect::<Vec<_>>()
            .join("[ -]");
        let regex = Regex::new(&pattern)?;

        let canonical = parts.join(" ");
        let left_bounded = canonical.chars().next().is_some_and(is_word_char);
        let right_bounded = canonical.chars().last().is_some_and(is_word_char);

        Ok(Self {
            phrase: canonical,
            regex,
            left_bounded,
            right_bounded,
        })
    }

    /// The normalized form of the phrase, used as its identity.
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    /// Count non-overlapping occurrences in already-normalized text.
    pub fn count(&self, normalized: &str) -> usize {
        let mut count = 0;
        let mut start = 0;

        while start <= normalized.len() {
            let Some(mat) = self.regex.find_at(normalized, start) else {
                break;
            };

            if self.is_isolated(normalized, mat.start(), mat.end()) {
                count += 1;
                start = mat.end();
            } else {
                // Retry one character later so an overlapping isolated match is not skipped
                let step = normalized[mat.start()..]
                    .chars()
                    .next()
                    .map_or(1, char::len_utf8);
                start = mat.start() + step;
            }
        }

        count
    }

    fn is_isolated(&self, text: &str, start: usize, end: usize) -> bool {
        let left_ok = !self.left_bounded
            || text[..start].chars().next_back().map_or(true, |c| !is_word_char(c));
        let right_ok = !self.right_bounded
            || text[end..].chars().next().map_or(true, |c| !is_word_char(c));
        left_ok && right_ok
    }
}

/// A keyword list compiled once and reused across many texts.
#[derive(Debug, Clone, Default)]
pub struct KeywordAnalyzer {
    patterns: Vec<KeywordPattern>,
}

impl KeywordAnalyzer {
    pub fn new<I, S>(phrases: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = phrases
            .into_iter()
            .map(|phrase| KeywordPattern::new(phrase.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Count every configured phrase, keeping only phrases that occur.
    pub fn extract(&self, text: &str) -> BTreeMap<String, usize> {
        let normalized = normalize_text(text);
        let mut found = BTreeMap::new();

        if normalized.is_empty() {
            return found;
        }

        for pattern in &self.patterns {
            let count = pattern.count(&normalized);
            if count > 0 {
                found.insert(pattern.phrase().to_string(), count);
            }
        }

        found
    }
}

/// Count occurrences of a single phrase. The text is normalized first, so
/// already-normalized input is accepted unchanged.
pub fn count_keyword_occurrences(text: &str, phrase: &str) -> usize {
    if phrase.trim().is_empty() {
        return 0;
    }

    match KeywordPattern::new(phrase) {
        Ok(pattern) => pattern.count(&normalize_text(text)),
        Err(e) => {
            warn!("Skipping keyword '{}': {}", phrase, e);
            0
        }
    }
}

/// Count each phrase of `keywords` in `text`, keeping only those that occur.
/// Keys are the normalized phrases.
pub fn extract_keywords<S: AsRef<str>>(text: &str, keywords: &[S]) -> BTreeMap<String, usize> {
    let mut found = BTreeMap::new();
    let normalized = normalize_text(text);

    if normalized.is_empty() {
        return found;
    }

    for keyword in keywords {
        let phrase = keyword.as_ref();
        let pattern = match KeywordPattern::new(phrase) {
            Ok(pattern) => pattern,
            Err(e) => {
                warn!("Skipping keyword '{}': {}", phrase, e);
                continue;
            }
        };

        let count = pattern.count(&normalized);
        if count > 0 {
            found.insert(pattern.phrase().to_string(), count);
        }
    }

    found
}
