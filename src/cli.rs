//! CLI interface for the job tailor

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "job-tailor")]
#[command(about = "Classify job postings and tailor LaTeX résumé templates to them")]
#[command(long_about = "Score job postings against a weighted role catalog and fill company, title and role placeholders into LaTeX templates without breaking their structure")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify a job posting into its best-fit role
    Classify {
        /// Path to the job posting (TXT, MD, JSON)
        #[arg(short, long)]
        job: PathBuf,

        /// Override the posting title
        #[arg(short, long)]
        title: Option<String>,

        /// Output format: console, json
        #[arg(short, long, default_value = "console")]
        output: String,
    },

    /// Show the percentage breakdown across role categories
    Breakdown {
        /// Path to the job posting (TXT, MD, JSON)
        #[arg(short, long)]
        job: PathBuf,

        /// Minimum percentage to list a category
        #[arg(long)]
        threshold: Option<f64>,

        /// Output format: console, json
        #[arg(short, long, default_value = "console")]
        output: String,
    },

    /// List the catalog keywords found in a job posting
    Keywords {
        /// Path to the job posting (TXT, MD, JSON)
        #[arg(short, long)]
        job: PathBuf,

        /// Output format: console, json
        #[arg(short, long, default_value = "console")]
        output: String,
    },

    /// Fill a LaTeX template with values from a job posting
    Customize {
        /// Path to the template (TEX, TXT)
        #[arg(long)]
        template: PathBuf,

        /// Path to the job posting (TXT, MD, JSON)
        #[arg(short, long)]
        job: PathBuf,

        /// Company name, overriding the posting
        #[arg(long)]
        company: Option<String>,

        /// Job title, overriding the posting
        #[arg(short, long)]
        title: Option<String>,

        /// Role category, skipping classification
        #[arg(short, long)]
        role: Option<String>,

        /// Write the customized template to this file instead of stdout
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Fail when customization changes the template structure
        #[arg(long)]
        strict: bool,

        /// Output format for the summary: console, json
        #[arg(short, long, default_value = "console")]
        output: String,
    },

    /// Print the active role catalog
    Catalog {
        /// Output format: console, json
        #[arg(short, long, default_value = "console")]
        output: String,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        _ => Err(format!("Invalid output format: {}. Supported: console, json", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("console"), Ok(OutputFormat::Console));
        assert!(parse_output_format("html").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("job.md"), &["txt", "md"]).is_ok());
        assert!(validate_file_extension(Path::new("job.PDF"), &["txt", "md"]).is_err());
        assert!(validate_file_extension(Path::new("job"), &["txt"]).is_err());
    }

    #[test]
    fn test_cli_parses_customize() {
        let cli = Cli::try_parse_from([
            "job-tailor",
            "customize",
            "--template",
            "resume.tex",
            "--job",
            "job.json",
            "--company",
            "Acme",
            "--strict",
        ])
        .unwrap();

        match cli.command {
            Commands::Customize { company, strict, role, .. } => {
                assert_eq!(company.as_deref(), Some("Acme"));
                assert!(strict);
                assert!(role.is_none());
            }
            _ => panic!("expected customize command"),
        }
    }
}
