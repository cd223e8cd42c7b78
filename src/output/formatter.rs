//! Output formatters for classification and customization reports

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::{ClassificationReport, CustomizationReport};
use crate::processing::catalog::RoleCatalog;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for rendering reports in one output format
pub trait OutputFormatter {
    fn format_classification(&self, report: &ClassificationReport) -> Result<String>;
    fn format_customization(&self, report: &CustomizationReport) -> Result<String>;
    fn format_catalog(&self, catalog: &RoleCatalog) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// JSON formatter for scripting and downstream tools
pub struct JsonFormatter {
    pretty: bool,
}

/// Picks the formatter matching the requested format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_bar(&self, percentage: f64) -> String {
        let filled = (percentage / 5.0).round().clamp(0.0, 20.0) as usize;
        let bar = format!("{}{}", "■".repeat(filled), "·".repeat(20 - filled));

        let color = match percentage {
            p if p >= 50.0 => Color::Green,
            p if p >= 20.0 => Color::Yellow,
            _ => Color::White,
        };
        self.colorize(&bar, color)
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_classification(&self, report: &ClassificationReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("ROLE CLASSIFICATION", 1));
        output.push_str(&format!("Source: {}\n", report.source));
        if !report.title.is_empty() {
            output.push_str(&format!("Title: {}\n", report.title));
        }
        if let Some(company) = &report.company {
            output.push_str(&format!("Company: {}\n", company));
        }
        output.push_str(&format!(
            "Best fit: {} ({})\n",
            self.colorize(&report.role_title, Color::Cyan),
            report.role
        ));
        if report.fallback {
            output.push_str(&self.colorize(
                "No catalog keyword matched; using the default category\n",
                Color::Yellow,
            ));
        }

        output.push_str(&self.format_header(
            &format!("Breakdown (>= {:.1}%)", report.threshold),
            2,
        ));
        for entry in &report.breakdown {
            output.push_str(&format!(
                "  {:<26} {} {:>5.1}%\n",
                entry.role.as_str(),
                self.format_bar(entry.percentage),
                entry.percentage
            ));
        }

        if !report.top_keywords.is_empty() {
            output.push_str(&self.format_header("Top keywords", 3));
            for hit in &report.top_keywords {
                output.push_str(&format!(
                    "  • {} ×{} → {} (+{:.1})\n",
                    hit.phrase, hit.count, hit.role, hit.contribution
                ));
            }
        }

        Ok(output)
    }

    fn format_customization(&self, report: &CustomizationReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("TEMPLATE CUSTOMIZATION", 1));
        output.push_str(&format!("Template: {}\n", report.template));
        output.push_str(&format!("Role: {}\n", report.role));
        output.push_str(&format!("Title used: {}\n", report.display_title));
        if let Some(company) = &report.company {
            output.push_str(&format!("Company: {}\n", company));
        }
        output.push_str(&format!("Placeholders replaced: {}\n", report.replacements));
        if let Some(path) = &report.saved_to {
            output.push_str(&format!("Saved to: {}\n", path));
        }

        if report.warnings.is_empty() {
            output.push_str(&self.colorize("Structure preserved\n", Color::Green));
        } else {
            output.push_str(&self.format_header("Warnings", 2));
            for warning in &report.warnings {
                output.push_str(&format!("  {} {}\n", self.colorize("!", Color::Red), warning));
            }
        }

        Ok(output)
    }

    fn format_catalog(&self, catalog: &RoleCatalog) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("ROLE CATALOG", 1));
        output.push_str(&format!("Default category: {}\n", catalog.default_category()));

        for definition in catalog.categories() {
            output.push_str(&self.format_header(
                &format!("{} ({})", definition.role.display_title(), definition.role),
                2,
            ));
            let keywords: Vec<String> = definition
                .keywords
                .iter()
                .map(|k| format!("{} [{:.1}]", k.phrase, k.weight))
                .collect();
            output.push_str(&format!("  {}\n", keywords.join(", ")));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn render<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_classification(&self, report: &ClassificationReport) -> Result<String> {
        self.render(report)
    }

    fn format_customization(&self, report: &CustomizationReport) -> Result<String> {
        self.render(report)
    }

    fn format_catalog(&self, catalog: &RoleCatalog) -> Result<String> {
        self.render(catalog)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl ReportGenerator {
    pub fn new(use_colors: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors),
            json_formatter: JsonFormatter::new(true),
        }
    }

    pub fn formatter(&self, format: OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new(true)
    }
}

pub fn save_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}
