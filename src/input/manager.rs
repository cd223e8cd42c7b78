//! Input manager for job postings and templates

use crate::error::{JobTailorError, Result};
use crate::input::file_detector::FileType;
use crate::input::posting::JobPosting;
use crate::input::text_extractor::{MarkdownExtractor, PlainTextExtractor, TextExtractor};
use log::info;
use std::collections::HashMap;
use std::path::Path;

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Read a file as text. Markdown is flattened; JSON and LaTeX are returned verbatim.
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(JobTailorError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let text = match self.detect_file_type(path)? {
            FileType::Text | FileType::Json | FileType::Latex => {
                info!("Reading text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(JobTailorError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    /// Load a job posting from `.json`, `.txt` or `.md`.
    pub async fn load_posting(&mut self, path: &Path) -> Result<JobPosting> {
        let file_type = self.detect_file_type(path)?;
        let text = self.extract_text(path).await?;

        match file_type {
            FileType::Json => JobPosting::from_json_str(&text),
            FileType::Text | FileType::Markdown => Ok(JobPosting::from_plain_text(&text)),
            _ => Err(JobTailorError::UnsupportedFormat(format!(
                "Job postings must be .json, .txt or .md: {}",
                path.display()
            ))),
        }
    }

    /// Load a template from `.tex` or `.txt`.
    pub async fn load_template(&mut self, path: &Path) -> Result<String> {
        match self.detect_file_type(path)? {
            FileType::Latex | FileType::Text => self.extract_text(path).await,
            _ => Err(JobTailorError::UnsupportedFormat(format!(
                "Templates must be .tex or .txt: {}",
                path.display()
            ))),
        }
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                JobTailorError::InvalidInput(format!("File has no extension: {}", path.display()))
            })?;

        Ok(FileType::from_extension(extension))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}
