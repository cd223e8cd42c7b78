//! Property tests for keyword counting, classification and template filling

use job_tailor::processing::catalog::RoleCatalog;
use job_tailor::processing::classifier::RoleClassifier;
use job_tailor::processing::keywords::{count_keyword_occurrences, extract_keywords, normalize_text};
use job_tailor::processing::template::{replace_placeholders, TemplateCustomizer};
use job_tailor::RoleCategory;
use proptest::prelude::*;
use std::collections::HashMap;

const VOCABULARY: &[&str] = &[
    "kotlin", "android", "java", "spring boot", "microservices", "terraform", "kubernetes",
    "react", "llm", "ai", "incident management", "on-call", "business analyst", "stakeholders",
    "the", "team", "remote", "salary", "&", "C#", ".NET", "node.js",
];

fn job_text() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::collection::vec(prop::sample::select(VOCABULARY), 0..40).prop_map(|words| words.join(" ")),
        ".{0,200}",
    ]
}

fn latex_value() -> impl Strategy<Value = String> {
    "[a-z&%$#_{}\\\\ ]{1,20}"
}

proptest! {
    #[test]
    fn normalize_is_idempotent(text in "[A-Za-z0-9ÄÖäö \t\n.,’“”–-]{0,200}") {
        let once = normalize_text(&text);
        prop_assert_eq!(normalize_text(&once), once.clone());
        prop_assert_eq!(once.trim(), once.as_str());
        prop_assert!(!once.contains("  "));
        prop_assert_eq!(once.to_lowercase(), once.clone());
    }

    #[test]
    fn repeated_keyword_is_counted_once_per_occurrence(keyword in "[a-z]{2,8}", n in 0usize..12) {
        let text = vec![format!(".{}.", keyword); n].join(" ");
        prop_assert_eq!(count_keyword_occurrences(&text, &keyword), n);
    }

    #[test]
    fn multi_word_phrase_is_atomic(first in "[a-z]{2,8}", second in "[a-z]{2,8}") {
        let phrase = format!("{} {}", first, second);
        let split = format!("{}. {}", first, second);
        prop_assert_eq!(count_keyword_occurrences(&split, &phrase), 0);
        prop_assert_eq!(count_keyword_occurrences(&phrase.to_uppercase(), &phrase), 1);
    }

    #[test]
    fn extracted_counts_are_positive(text in job_text()) {
        let found = extract_keywords(&text, VOCABULARY);
        prop_assert!(found.values().all(|count| *count > 0));

        let none: &[&str] = &[];
        prop_assert!(extract_keywords(&text, none).is_empty());
    }

    #[test]
    fn percentages_sum_to_one_hundred(text in job_text()) {
        let classifier = RoleClassifier::new(RoleCatalog::builtin()).unwrap();
        let breakdown = classifier.get_role_percentages(&text);

        prop_assert!((breakdown.total() - 100.0).abs() < 0.01);
        prop_assert!(breakdown.iter().all(|(_, percentage)| percentage >= 0.0));
        prop_assert_eq!(breakdown.shares().len(), RoleCategory::ALL.len());

        let best = classifier.analyze_job_role(&text);
        let top = breakdown.iter().map(|(_, p)| p).fold(0.0, f64::max);
        prop_assert!((breakdown.get(best) - top).abs() < 1e-9);
    }

    #[test]
    fn higher_threshold_lists_a_subset(text in job_text()) {
        let classifier = RoleClassifier::new(RoleCatalog::builtin()).unwrap();
        let loose = classifier.get_role_breakdown(&text, 5.0);
        let strict = classifier.get_role_breakdown(&text, 10.0);

        prop_assert!(strict.len() <= loose.len());
        for entry in &strict {
            prop_assert!(loose.contains(entry));
        }
        prop_assert!(loose.windows(2).all(|pair| pair[0].1 >= pair[1].1));
        prop_assert!(loose.iter().all(|(_, percentage)| *percentage >= 5.0));
    }

    #[test]
    fn placeholders_are_fully_replaced(company in "[a-z]{1,12}", title in "[a-z]{1,12}") {
        let template = "COMPANY_NAME JOB_TITLE_PLACEHOLDER {COMPANY_NAME_PLACEHOLDER} \\textbf{JOB_TITLE}";
        let replacements: HashMap<String, String> = [
            ("COMPANY_NAME", company.as_str()),
            ("COMPANY_NAME_PLACEHOLDER", company.as_str()),
            ("JOB_TITLE", title.as_str()),
            ("JOB_TITLE_PLACEHOLDER", title.as_str()),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let output = replace_placeholders(template, &replacements).unwrap();
        prop_assert!(!output.contains("COMPANY_NAME"));
        prop_assert!(!output.contains("JOB_TITLE"));
        prop_assert!(!output.contains("_PLACEHOLDER"));
        prop_assert_eq!(
            output,
            format!("{c} {t} {c} \\textbf{{{t}}}", c = company, t = title)
        );
    }

    #[test]
    fn customization_keeps_structure(company in latex_value(), title in latex_value()) {
        let template = "\\documentclass{article}\n\\begin{document}\n{\\Large COMPANY_NAME}\n\
                        \\section{JOB_TITLE}\nDear {COMPANY_NAME_PLACEHOLDER},\n\
                        \\subsection*{Role}\nROLE_TYPE\n\\end{document}\n";
        let customizer = TemplateCustomizer::new().unwrap();
        let document = customizer.customize_template(template, &company, &title, RoleCategory::DevopsCloud);

        let before = customizer.inspect_structure(template);
        let after = customizer.inspect_structure(&document.text);
        prop_assert_eq!(before.brace_balance, after.brace_balance);
        prop_assert!(before.section_count.abs_diff(after.section_count) <= 1);
        let end_marker = "\\end{document}";
        prop_assert!(document.text.contains(end_marker));
    }
}
