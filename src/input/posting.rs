//! Job posting record handed over by scrapers and mail readers

use crate::error::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl JobPosting {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Build a posting from free text. The title is the first of the first five
    /// lines whose trimmed length is 6 to 99 bytes, with no `@` and no leading
    /// `-`; the remaining lines are the description.
    pub fn from_plain_text(text: &str) -> Self {
        let lines: Vec<&str> = text.lines().collect();

        let title_idx = lines.iter().take(5).position(|line| {
            let trimmed = line.trim();
            trimmed.len() > 5
                && trimmed.len() < 100
                && !trimmed.contains('@')
                && !trimmed.starts_with('-')
        });

        match title_idx {
            Some(idx) => {
                let description = lines
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != idx)
                    .map(|(_, line)| *line)
                    .collect::<Vec<_>>()
                    .join("\n");
                Self::new(lines[idx].trim(), description.trim())
            }
            None => Self::new("", text.trim()),
        }
    }

    /// Company name when present and not blank.
    pub fn company_name(&self) -> Option<&str> {
        self.company
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    pub fn full_text(&self) -> String {
        if self.title.trim().is_empty() {
            self.description.clone()
        } else {
            format!("{}\n{}", self.title, self.description)
        }
    }
}
