//! LaTeX template customization with structural checks
//!
//! Placeholders come in two forms: bare (`COMPANY_NAME`) and braced
//! (`{COMPANY_NAME}`). A braced placeholder is replaced together with its
//! braces when it stands alone as a group. When the braces are an argument
//! (after `\textbf`, `\href{url}`, `\newcommand{\name}` or an optional `[..]`
//! argument, whitespace allowed in between) they are kept. Placeholders whose
//! value is empty are left untouched and reported as unresolved.
//!
//! `Position` is only recognised in braced form, so the ordinary word
//! "Position" in a template is never rewritten.

use crate::config::TemplateConfig;
use crate::error::{JobTailorError, Result};
use crate::input::posting::JobPosting;
use crate::processing::catalog::RoleCategory;
use log::{debug, warn};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

pub const COMPANY_PLACEHOLDERS: &[&str] = &["COMPANY_NAME", "COMPANY_NAME_PLACEHOLDER"];

pub const TITLE_PLACEHOLDERS: &[&str] = &[
    "JOB_TITLE",
    "JOB_TITLE_PLACEHOLDER",
    "ROLE_TITLE",
    "ROLE_TITLE_PLACEHOLDER",
    "Position",
];

pub const ROLE_PLACEHOLDERS: &[&str] = &["ROLE_TYPE", "ROLE_TYPE_PLACEHOLDER"];

/// Names that only count as placeholders when written as `{Name}`.
pub const BRACED_ONLY_PLACEHOLDERS: &[&str] = &["Position"];

/// Markers whose disappearance means the document no longer compiles.
pub const ESSENTIAL_MARKERS: &[&str] = &[r"\documentclass", r"\begin{document}", r"\end{document}"];

const LATEX_SPECIAL_CHARS: &[char] = &['&', '%', '$', '#', '_', '{', '}'];

const TEXT_BACKSLASH: &str = r"\textbackslash{}";

/// Escape the characters that break LaTeX compilation in running text.
///
/// A backslash followed by one of the special characters is an existing
/// escape and is kept, so escaping twice gives the same result as escaping
/// once. Any other backslash becomes `\textbackslash{}`, so a value can never
/// start a control sequence or swallow the template's next brace.
pub fn escape_latex_chars(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 8);
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        if c == '\\' {
            if rest.starts_with(TEXT_BACKSLASH) {
                escaped.push_str(TEXT_BACKSLASH);
                rest = &rest[TEXT_BACKSLASH.len()..];
                continue;
            }

            match rest[1..].chars().next() {
                Some(next) if LATEX_SPECIAL_CHARS.contains(&next) => {
                    escaped.push('\\');
                    escaped.push(next);
                    rest = &rest[1 + next.len_utf8()..];
                }
                _ => {
                    escaped.push_str(TEXT_BACKSLASH);
                    rest = &rest[1..];
                }
            }
            continue;
        }

        if LATEX_SPECIAL_CHARS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
        rest = &rest[c.len_utf8()..];
    }

    escaped
}

/// Replace every placeholder named in `replacements` in a single pass.
pub fn replace_placeholders(template: &str, replacements: &HashMap<String, String>) -> Result<String> {
    if replacements.is_empty() {
        return Ok(template.to_string());
    }

    let placeholders = PlaceholderSet::new(replacements.keys())?;
    Ok(placeholders.replace(template, replacements).text)
}

/// Whether a `{` preceded by `prefix` opens a command argument rather than a
/// standalone group.
fn opens_argument(prefix: &str) -> bool {
    let prefix = prefix.trim_end();
    if prefix.ends_with('}') || prefix.ends_with(']') {
        return true;
    }

    let name = prefix.strip_suffix('*').unwrap_or(prefix);
    let stem = name.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    stem.len() < name.len() && stem.ends_with('\\')
}

fn is_placeholder_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A set of placeholder names compiled into one matcher.
///
/// Names are tried longest first, so `JOB_TITLE_PLACEHOLDER` is never read as
/// `JOB_TITLE` followed by a stray `_PLACEHOLDER`. Inserted values are never
/// scanned again.
#[derive(Debug, Clone)]
pub struct PlaceholderSet {
    names: Vec<String>,
    braced_only: Vec<String>,
    pattern: Regex,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Substitution {
    pub text: String,
    pub replaced: usize,
}

impl PlaceholderSet {
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut names: Vec<String> = names.into_iter().map(|n| n.as_ref().to_string()).collect();

        if let Some(bad) = names.iter().find(|name| !is_placeholder_name(name)) {
            return Err(JobTailorError::InvalidPlaceholder(bad.clone()));
        }
        if names.is_empty() {
            return Err(JobTailorError::InvalidPlaceholder(
                "no placeholder names given".to_string(),
            ));
        }

        names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        names.dedup();

        let alternation = names
            .iter()
            .map(|name| regex::escape(name))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(
            r"\{{(?P<braced>{alt})\}}|\b(?P<bare>{alt})\b",
            alt = alternation
        ))?;

        Ok(Self {
            names,
            braced_only: Vec::new(),
            pattern,
        })
    }

    /// Restrict some names to the `{Name}` form; bare occurrences are plain text.
    pub fn braced_only<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.braced_only = names.into_iter().map(|n| n.as_ref().to_string()).collect();
        self
    }

    fn placeholder_in<'t>(&self, caps: &Captures<'t>) -> Option<(&'t str, bool)> {
        if let Some(m) = caps.name("braced") {
            return Some((m.as_str(), true));
        }
        caps.name("bare")
            .map(|m| m.as_str())
            .filter(|name| !self.braced_only.iter().any(|n| n == name))
            .map(|name| (name, false))
    }

    /// Names in matching order (longest first).
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn replace(&self, template: &str, values: &HashMap<String, String>) -> Substitution {
        let mut replaced = 0;

        let text = self
            .pattern
            .replace_all(template, |caps: &Captures| {
                let Some((name, braced)) = self.placeholder_in(caps) else {
                    return caps[0].to_string();
                };

                match values.get(name).filter(|value| !value.trim().is_empty()) {
                    Some(value) => {
                        replaced += 1;
                        let start = caps.get(0).map_or(0, |m| m.start());
                        if braced && opens_argument(&template[..start]) {
                            format!("{{{}}}", value)
                        } else {
                            value.clone()
                        }
                    }
                    None => caps[0].to_string(),
                }
            })
            .into_owned();

        Substitution { text, replaced }
    }

    /// Names that occur in `text`, in matching order.
    pub fn find(&self, text: &str) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();
        for caps in self.pattern.captures_iter(text) {
            if let Some((name, _)) = self.placeholder_in(&caps) {
                if !found.iter().any(|n| n == name) {
                    found.push(name.to_string());
                }
            }
        }
        found.sort_by_key(|name| self.names.iter().position(|n| n == name));
        found
    }
}

/// Counts used to decide whether customization damaged the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureSnapshot {
    pub markers: BTreeMap<String, usize>,
    pub section_count: usize,
    /// Unescaped `{` minus unescaped `}`
    pub brace_balance: i64,
}

#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum StructureWarning {
    #[error("marker {marker} was present before customization but is missing after")]
    MissingMarker { marker: String },

    #[error("section count changed from {before} to {after}")]
    SectionCountChanged { before: usize, after: usize },

    #[error("brace balance changed from {before} to {after}")]
    BraceBalanceChanged { before: i64, after: i64 },

    #[error("placeholder {name} was left unresolved")]
    UnresolvedPlaceholder { name: String },
}

fn brace_balance(text: &str) -> i64 {
    let mut balance = 0;
    let mut after_backslash = false;

    for c in text.chars() {
        if !after_backslash {
            match c {
                '{' => balance += 1,
                '}' => balance -= 1,
                _ => {}
            }
        }
        after_backslash = c == '\\' && !after_backslash;
    }

    balance
}

/// Compare two snapshots. Markers must survive, the section count may drift
/// by at most one and the brace balance must not move.
pub fn validate_structure(before: &StructureSnapshot, after: &StructureSnapshot) -> Vec<StructureWarning> {
    let mut warnings = Vec::new();

    for (marker, count) in &before.markers {
        let still_there = after.markers.get(marker).copied().unwrap_or(0);
        if *count > 0 && still_there == 0 {
            warnings.push(StructureWarning::MissingMarker {
                marker: marker.clone(),
            });
        }
    }

    if before.section_count.abs_diff(after.section_count) > 1 {
        warnings.push(StructureWarning::SectionCountChanged {
            before: before.section_count,
            after: after.section_count,
        });
    }

    if before.brace_balance != after.brace_balance {
        warnings.push(StructureWarning::BraceBalanceChanged {
            before: before.brace_balance,
            after: after.brace_balance,
        });
    }

    warnings
}

/// Result of a customization. The text is always returned; warnings say how
/// far it can be trusted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomizedDocument {
    pub text: String,
    pub display_title: String,
    pub replacements: usize,
    pub warnings: Vec<StructureWarning>,
}

impl CustomizedDocument {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Fail when any warning was raised.
    pub fn into_strict(self) -> Result<String> {
        if self.warnings.is_empty() {
            return Ok(self.text);
        }

        let reasons: Vec<String> = self.warnings.iter().map(|w| w.to_string()).collect();
        Err(JobTailorError::StructureValidation(reasons.join("; ")))
    }
}

/// Fills company, title and role placeholders into a LaTeX template.
#[derive(Debug, Clone)]
pub struct TemplateCustomizer {
    placeholders: PlaceholderSet,
    section_pattern: Regex,
    default_title_markers: Vec<String>,
}

impl TemplateCustomizer {
    pub fn new() -> Result<Self> {
        Self::from_config(&TemplateConfig::default())
    }

    pub fn from_config(config: &TemplateConfig) -> Result<Self> {
        let placeholders = PlaceholderSet::new(
            COMPANY_PLACEHOLDERS
                .iter()
                .chain(TITLE_PLACEHOLDERS)
                .chain(ROLE_PLACEHOLDERS),
        )?
        .braced_only(BRACED_ONLY_PLACEHOLDERS);
        let section_pattern = Regex::new(r"\\(?:sub){0,2}section\*?\s*[\[{]")?;

        Ok(Self {
            placeholders,
            section_pattern,
            default_title_markers: config
                .default_title_markers
                .iter()
                .map(|marker| marker.trim().to_lowercase())
                .collect(),
        })
    }

    pub fn placeholders(&self) -> &PlaceholderSet {
        &self.placeholders
    }

    pub fn inspect_structure(&self, text: &str) -> StructureSnapshot {
        let markers = ESSENTIAL_MARKERS
            .iter()
            .map(|marker| (marker.to_string(), text.matches(marker).count()))
            .collect();

        StructureSnapshot {
            markers,
            section_count: self.section_pattern.find_iter(text).count(),
            brace_balance: brace_balance(text),
        }
    }

    /// The posting title, or the role's display title when the posting title
    /// is blank, a generic marker such as "Position", or a placeholder name.
    pub fn display_title(&self, title: &str, role: RoleCategory) -> String {
        let trimmed = title.trim();
        let lowered = trimmed.to_lowercase();

        let is_default = trimmed.is_empty()
            || self.default_title_markers.iter().any(|marker| *marker == lowered)
            || self.placeholders.names().iter().any(|name| name == trimmed);

        if is_default {
            role.display_title().to_string()
        } else {
            trimmed.to_string()
        }
    }

    /// Escaped values for every known placeholder name.
    pub fn build_replacements(&self, company: &str, title: &str, role: RoleCategory) -> HashMap<String, String> {
        let company = escape_latex_chars(company.trim());
        let title = escape_latex_chars(&self.display_title(title, role));
        let role_title = escape_latex_chars(role.display_title());

        let mut replacements = HashMap::new();
        for name in COMPANY_PLACEHOLDERS {
            replacements.insert(name.to_string(), company.clone());
        }
        for name in TITLE_PLACEHOLDERS {
            replacements.insert(name.to_string(), title.clone());
        }
        for name in ROLE_PLACEHOLDERS {
            replacements.insert(name.to_string(), role_title.clone());
        }
        replacements
    }

    pub fn customize_template(
        &self,
        template: &str,
        company: &str,
        title: &str,
        role: RoleCategory,
    ) -> CustomizedDocument {
        let before = self.inspect_structure(template);
        let display_title = self.display_title(title, role);
        let replacements = self.build_replacements(company, title, role);

        let substitution = self.placeholders.replace(template, &replacements);
        debug!(
            "Replaced {} placeholders for '{}' at '{}'",
            substitution.replaced, display_title, company
        );

        let after = self.inspect_structure(&substitution.text);
        let mut warnings = validate_structure(&before, &after);
        warnings.extend(
            self.placeholders
                .find(&substitution.text)
                .into_iter()
                .map(|name| StructureWarning::UnresolvedPlaceholder { name }),
        );

        for warning in &warnings {
            warn!("Template customization: {}", warning);
        }

        CustomizedDocument {
            text: substitution.text,
            display_title,
            replacements: substitution.replaced,
            warnings,
        }
    }

    pub fn customize_posting(&self, template: &str, posting: &JobPosting, role: RoleCategory) -> CustomizedDocument {
        self.customize_template(template, posting.company_name().unwrap_or(""), &posting.title, role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESUME_TEMPLATE: &str = r"\documentclass{article}
\begin{document}
{\Large COMPANY_NAME}
\section{Application for JOB_TITLE_PLACEHOLDER}
Dear {COMPANY_NAME_PLACEHOLDER} team, I am applying as ROLE_TITLE.
\section*{Experience}
\textbf{JOB_TITLE}
\end{document}
";

    fn values(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_escape_latex_chars() {
        assert_eq!(escape_latex_chars("Johnson & Johnson"), r"Johnson \& Johnson");
        assert_eq!(escape_latex_chars("100% $5 #1"), r"100\% \$5 \#1");
        assert_eq!(escape_latex_chars("R_D {core}"), r"R\_D \{core\}");
        assert_eq!(escape_latex_chars("Plain text"), "Plain text");
    }

    #[test]
    fn test_escape_is_idempotent() {
        let once = escape_latex_chars("AT&T 50% off");
        assert_eq!(escape_latex_chars(&once), once);
    }

    #[test]
    fn test_escape_lone_backslash() {
        assert_eq!(escape_latex_chars(r"Acme\"), r"Acme\textbackslash{}");
        assert_eq!(escape_latex_chars(r"C:\new"), r"C:\textbackslash{}new");
        assert_eq!(escape_latex_chars(r"a\\&b"), r"a\textbackslash{}\&b");

        let once = escape_latex_chars(r"R\D \& more\");
        assert_eq!(once, r"R\textbackslash{}D \& more\textbackslash{}");
        assert_eq!(escape_latex_chars(&once), once);
    }

    #[test]
    fn test_trailing_backslash_keeps_structure() {
        let customizer = TemplateCustomizer::new().unwrap();
        let document = customizer.customize_template(
            r"{\Large COMPANY_NAME}",
            r"Acme\",
            "Data Engineer",
            RoleCategory::BackendDeveloper,
        );

        assert_eq!(document.text, r"{\Large Acme\textbackslash{}}");
        assert!(document.is_clean(), "{:?}", document.warnings);
    }

    #[test]
    fn test_replace_prefers_longest_name() {
        let replacements = values(&[("JOB_TITLE", "Engineer"), ("JOB_TITLE_PLACEHOLDER", "Lead")]);
        let output = replace_placeholders("JOB_TITLE_PLACEHOLDER / JOB_TITLE", &replacements).unwrap();
        assert_eq!(output, "Lead / Engineer");
        assert!(!output.contains("_PLACEHOLDER"));
    }

    #[test]
    fn test_replace_with_only_short_name_leaves_long_name_intact() {
        let replacements = values(&[("JOB_TITLE", "Engineer")]);
        let output = replace_placeholders("JOB_TITLE_PLACEHOLDER", &replacements).unwrap();
        assert_eq!(output, "JOB_TITLE_PLACEHOLDER");
    }

    #[test]
    fn test_braced_and_bare_forms() {
        let replacements = values(&[("COMPANY_NAME", "Acme")]);

        let standalone = replace_placeholders("Dear {COMPANY_NAME} team", &replacements).unwrap();
        assert_eq!(standalone, "Dear Acme team");

        let argument = replace_placeholders(r"\textbf{COMPANY_NAME}", &replacements).unwrap();
        assert_eq!(argument, r"\textbf{Acme}");

        let bare = replace_placeholders(r"{\Large COMPANY_NAME}", &replacements).unwrap();
        assert_eq!(bare, r"{\Large Acme}");
    }

    #[test]
    fn test_later_command_arguments_keep_braces() {
        let replacements = values(&[("COMPANY_NAME", "Acme Corp"), ("JOB_TITLE", "Data Engineer")]);

        let cases = [
            (r"\newcommand{\company}{COMPANY_NAME}", r"\newcommand{\company}{Acme Corp}"),
            (r"\href{https://x.io}{COMPANY_NAME}", r"\href{https://x.io}{Acme Corp}"),
            (r"\textcolor{blue}{JOB_TITLE}", r"\textcolor{blue}{Data Engineer}"),
            (r"\textbf {COMPANY_NAME}", r"\textbf {Acme Corp}"),
            (r"\section*{JOB_TITLE}", r"\section*{Data Engineer}"),
            (r"\item[x] {JOB_TITLE}", r"\item[x] {Data Engineer}"),
            ("{COMPANY_NAME}{JOB_TITLE}", "Acme Corp{Data Engineer}"),
        ];

        for (template, expected) in cases {
            assert_eq!(replace_placeholders(template, &replacements).unwrap(), expected);
        }
    }

    #[test]
    fn test_standalone_group_after_escaped_text_loses_braces() {
        let replacements = values(&[("COMPANY_NAME", "Acme")]);
        assert_eq!(
            replace_placeholders("100\\% at {COMPANY_NAME}.", &replacements).unwrap(),
            "100\\% at Acme."
        );
    }

    #[test]
    fn test_opens_argument() {
        assert!(opens_argument(r"\textbf"));
        assert!(opens_argument(r"\section* "));
        assert!(opens_argument(r"\href{url}"));
        assert!(opens_argument("\\newcommand{\\x}\n"));
        assert!(!opens_argument("Dear "));
        assert!(!opens_argument(""));
        assert!(!opens_argument(r"\\"));
    }

    #[test]
    fn test_position_only_in_braced_form() {
        let customizer = TemplateCustomizer::new().unwrap();
        let document = customizer.customize_template(
            r"\textbf{Position:} JOB_TITLE; applying for {Position}; \emph{Position}",
            "Acme",
            "Data Engineer",
            RoleCategory::BackendDeveloper,
        );

        assert_eq!(
            document.text,
            r"\textbf{Position:} Data Engineer; applying for Data Engineer; \emph{Data Engineer}"
        );
        assert_eq!(document.replacements, 3);
        assert!(document.is_clean(), "{:?}", document.warnings);
    }

    #[test]
    fn test_argument_placeholders_survive_customization() {
        let customizer = TemplateCustomizer::new().unwrap();
        let document = customizer.customize_template(
            r"\newcommand{\company}{COMPANY_NAME}\href{https://x.io}{COMPANY_NAME}",
            "Acme Corp",
            "Data Engineer",
            RoleCategory::BackendDeveloper,
        );

        assert_eq!(
            document.text,
            r"\newcommand{\company}{Acme Corp}\href{https://x.io}{Acme Corp}"
        );
        assert!(document.is_clean());
    }

    #[test]
    fn test_empty_values_are_skipped() {
        let replacements = values(&[("COMPANY_NAME", ""), ("JOB_TITLE", "Engineer")]);
        let output = replace_placeholders("COMPANY_NAME hires JOB_TITLE", &replacements).unwrap();
        assert_eq!(output, "COMPANY_NAME hires Engineer");
    }

    #[test]
    fn test_inserted_values_are_not_rescanned() {
        let replacements = values(&[("COMPANY_NAME", "JOB_TITLE Inc"), ("JOB_TITLE", "Engineer")]);
        let output = replace_placeholders("COMPANY_NAME", &replacements).unwrap();
        assert_eq!(output, "JOB_TITLE Inc");
    }

    #[test]
    fn test_invalid_placeholder_name() {
        let replacements = values(&[("COMPANY NAME", "Acme")]);
        assert!(matches!(
            replace_placeholders("x", &replacements),
            Err(JobTailorError::InvalidPlaceholder(_))
        ));
    }

    #[test]
    fn test_customize_escapes_company() {
        let customizer = TemplateCustomizer::new().unwrap();
        let document = customizer.customize_template(
            r"{\Large COMPANY_NAME}",
            "Johnson & Johnson",
            "Data Engineer",
            RoleCategory::BackendDeveloper,
        );

        assert!(document.text.contains(r"Johnson \& Johnson"));
        assert!(!document.text.contains("Johnson & Johnson"));
        assert!(document.is_clean());
    }

    #[test]
    fn test_customize_full_template_preserves_structure() {
        let customizer = TemplateCustomizer::new().unwrap();
        let document = customizer.customize_template(
            RESUME_TEMPLATE,
            "Acme {Labs}",
            "Platform Engineer",
            RoleCategory::DevopsCloud,
        );

        assert!(document.is_clean(), "{:?}", document.warnings);
        assert_eq!(document.replacements, 5);
        assert!(document.text.contains(r"\section{Application for Platform Engineer}"));
        assert!(document.text.contains(r"Dear Acme \{Labs\} team"));
        assert!(document.text.contains(r"\textbf{Platform Engineer}"));
        assert!(document.text.contains("applying as Platform Engineer."));

        let before = customizer.inspect_structure(RESUME_TEMPLATE);
        let after = customizer.inspect_structure(&document.text);
        assert_eq!(before, after);
        assert_eq!(after.section_count, 2);
        assert_eq!(after.brace_balance, 0);
    }

    #[test]
    fn test_title_falls_back_to_role() {
        let customizer = TemplateCustomizer::new().unwrap();
        assert_eq!(
            customizer.display_title("  ", RoleCategory::AndroidDeveloper),
            "Android Developer"
        );
        assert_eq!(
            customizer.display_title("Position", RoleCategory::ItBusinessAnalyst),
            "IT Business Analyst"
        );
        assert_eq!(
            customizer.display_title("JOB_TITLE", RoleCategory::DevopsCloud),
            "DevOps and Cloud Engineer"
        );
        assert_eq!(
            customizer.display_title(" Kotlin Engineer ", RoleCategory::AndroidDeveloper),
            "Kotlin Engineer"
        );
    }

    #[test]
    fn test_missing_company_is_reported_but_text_returned() {
        let customizer = TemplateCustomizer::new().unwrap();
        let document = customizer.customize_template(
            "COMPANY_NAME: JOB_TITLE",
            "",
            "",
            RoleCategory::AndroidDeveloper,
        );

        assert_eq!(document.text, "COMPANY_NAME: Android Developer");
        assert_eq!(
            document.warnings,
            vec![StructureWarning::UnresolvedPlaceholder {
                name: "COMPANY_NAME".to_string()
            }]
        );
        assert!(matches!(
            document.into_strict(),
            Err(JobTailorError::StructureValidation(_))
        ));
    }

    #[test]
    fn test_validate_structure_detects_damage() {
        let customizer = TemplateCustomizer::new().unwrap();
        let before = customizer.inspect_structure(
            "\\begin{document}\\section{A}\\section{B}\\section{C}\\end{document}",
        );
        let after = customizer.inspect_structure("\\section{A}{");

        let warnings = validate_structure(&before, &after);
        assert!(warnings.contains(&StructureWarning::MissingMarker {
            marker: r"\begin{document}".to_string()
        }));
        assert!(warnings.contains(&StructureWarning::MissingMarker {
            marker: r"\end{document}".to_string()
        }));
        assert!(warnings.contains(&StructureWarning::SectionCountChanged { before: 3, after: 1 }));
        assert!(warnings.contains(&StructureWarning::BraceBalanceChanged { before: 0, after: 1 }));
    }

    #[test]
    fn test_section_drift_of_one_is_tolerated() {
        let customizer = TemplateCustomizer::new().unwrap();
        let before = customizer.inspect_structure("\\section{A}\\subsection{B}");
        let after = customizer.inspect_structure("\\section{A}");
        assert!(validate_structure(&before, &after).is_empty());
    }

    #[test]
    fn test_escaped_braces_do_not_count() {
        assert_eq!(brace_balance(r"\{ { }"), 0);
        assert_eq!(brace_balance(r"{ \}"), 1);
    }

    #[test]
    fn test_customize_posting_uses_company() {
        let customizer = TemplateCustomizer::new().unwrap();
        let posting = JobPosting::new("Site Reliability Engineer", "on-call").with_company("Ops & Co");
        let document = customizer.customize_posting(
            "COMPANY_NAME_PLACEHOLDER - ROLE_TITLE_PLACEHOLDER",
            &posting,
            RoleCategory::IncidentManagementSre,
        );
        assert_eq!(document.text, r"Ops \& Co - Site Reliability Engineer");
    }

    #[test]
    fn test_find_lists_remaining_placeholders() {
        let customizer = TemplateCustomizer::new().unwrap();
        let found = customizer
            .placeholders()
            .find("JOB_TITLE and {COMPANY_NAME} and JOB_TITLE again");
        assert_eq!(found, vec!["COMPANY_NAME".to_string(), "JOB_TITLE".to_string()]);
    }
}
