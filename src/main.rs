//! Job tailor: classify job postings and tailor LaTeX templates to them

use clap::Parser;
use job_tailor::cli::{self, Cli, Commands, ConfigAction};
use job_tailor::config::{Config, OutputFormat};
use job_tailor::error::{JobTailorError, Result};
use job_tailor::input::manager::InputManager;
use job_tailor::output::formatter::{save_to_file, ReportGenerator};
use job_tailor::output::report::{ClassificationReport, CustomizationReport};
use job_tailor::processing::catalog::RoleCategory;
use job_tailor::processing::classifier::RoleClassifier;
use job_tailor::processing::template::TemplateCustomizer;
use log::{error, info};
use std::path::Path;
use std::process;

const JOB_EXTENSIONS: &[&str] = &["txt", "md", "markdown", "json"];
const TEMPLATE_EXTENSIONS: &[&str] = &["tex", "txt"];
const TOP_KEYWORDS: usize = 10;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    let generator = ReportGenerator::new(config.output.color_output);

    match command {
        Commands::Classify { job, title, output } => {
            let format = output_format(&output)?;
            let classifier = RoleClassifier::from_config(&config.classification)?;

            let mut posting = load_posting(&job).await?;
            if let Some(title) = title {
                posting.title = title;
            }

            let assessment = classifier.assess(&posting);
            info!("Classified {} as {}", job.display(), assessment.role);

            let report = ClassificationReport::from_assessment(
                &job.to_string_lossy(),
                &posting,
                &assessment,
                config.classification.breakdown_threshold,
                TOP_KEYWORDS,
            );
            println!("{}", generator.formatter(format).format_classification(&report)?);
        }

        Commands::Breakdown { job, threshold, output } => {
            let format = output_format(&output)?;
            let threshold = threshold.unwrap_or(config.classification.breakdown_threshold);
            let classifier = RoleClassifier::from_config(&config.classification)?;

            let posting = load_posting(&job).await?;
            let assessment = classifier.assess(&posting);

            let report = ClassificationReport::from_assessment(
                &job.to_string_lossy(),
                &posting,
                &assessment,
                threshold,
                0,
            );
            println!("{}", generator.formatter(format).format_classification(&report)?);
        }

        Commands::Keywords { job, output } => {
            let format = output_format(&output)?;
            let classifier = RoleClassifier::from_config(&config.classification)?;

            let posting = load_posting(&job).await?;
            let hits = classifier.keyword_hits(&posting.full_text());

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&hits)?),
                OutputFormat::Console => {
                    if hits.is_empty() {
                        println!("No catalog keywords found in {}", job.display());
                    }
                    for hit in &hits {
                        println!("{:<26} {:<24} ×{}", hit.role.as_str(), hit.phrase, hit.count);
                    }
                }
            }
        }

        Commands::Customize {
            template,
            job,
            company,
            title,
            role,
            save,
            strict,
            output,
        } => {
            let format = output_format(&output)?;
            cli::validate_file_extension(&template, TEMPLATE_EXTENSIONS)
                .map_err(|e| JobTailorError::InvalidInput(format!("Template file: {}", e)))?;

            let mut manager = InputManager::new();
            let template_text = manager.load_template(&template).await?;
            let mut posting = load_posting(&job).await?;
            if let Some(company) = company {
                posting.company = Some(company);
            }
            if let Some(title) = title {
                posting.title = title;
            }

            let role = match role {
                Some(role) => role.parse::<RoleCategory>()?,
                None => RoleClassifier::from_config(&config.classification)?
                    .assess(&posting)
                    .role,
            };

            let customizer = TemplateCustomizer::from_config(&config.template)?;
            let document = customizer.customize_posting(&template_text, &posting, role);

            let report = CustomizationReport::new(
                &template.to_string_lossy(),
                role,
                posting.company_name(),
                &document,
                save.as_deref().map(|p| p.to_str().unwrap_or_default()),
            );

            let text = if strict || config.template.strict {
                document.into_strict()?
            } else {
                document.text
            };

            match &save {
                Some(path) => {
                    save_to_file(&text, path)?;
                    info!("Saved customized template to {}", path.display());
                    println!("{}", generator.formatter(format).format_customization(&report)?);
                }
                None => {
                    print!("{}", text);
                    eprintln!("{}", generator.formatter(format).format_customization(&report)?);
                }
            }
        }

        Commands::Catalog { output } => {
            let format = output_format(&output)?;
            let classifier = RoleClassifier::from_config(&config.classification)?;
            println!("{}", generator.formatter(format).format_catalog(classifier.catalog())?);
        }

        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => {
                let content = toml::to_string_pretty(&config)
                    .map_err(|e| JobTailorError::Configuration(e.to_string()))?;
                println!("{}", content);
            }
            ConfigAction::Reset => {
                Config::default().save()?;
                println!("Configuration reset to defaults at {}", Config::config_path().display());
            }
            ConfigAction::Path => {
                println!("{}", Config::config_path().display());
            }
        },
    }

    Ok(())
}

fn output_format(output: &str) -> Result<OutputFormat> {
    cli::parse_output_format(output).map_err(JobTailorError::InvalidInput)
}

async fn load_posting(path: &Path) -> Result<job_tailor::JobPosting> {
    cli::validate_file_extension(path, JOB_EXTENSIONS)
        .map_err(|e| JobTailorError::InvalidInput(format!("Job posting file: {}", e)))?;

    let mut manager = InputManager::new();
    manager.load_posting(path).await
}
