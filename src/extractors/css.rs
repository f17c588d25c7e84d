// CSS analyzer
//
// Extracts selectors (classified by their leading punctuation), declarations
// and at-rules. Only innermost `{ ... }` blocks are treated as rules, so
// selectors nested in @media/@supports are still found.

use crate::error::ExtractionError;
use crate::extractors::base::{
    Analyzer, ImportInfo, RuleInfo, SelectorInfo, SelectorType, StructuralSummary,
    StylesheetDetails, SummaryDetails,
};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static BLOCK_COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());
static RULE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^{}]+)\{([^{}]*)\}").unwrap());
static AT_RULE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@([A-Za-z-]+)([^{;]*)").unwrap());
static IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"@import\s+(?:url\(\s*)?['"]?([^'")\s;]+)"#).unwrap()
});

pub struct CssAnalyzer;

impl Analyzer for CssAnalyzer {
    fn name(&self) -> &'static str {
        "css"
    }

    fn analyze_source(
        &self,
        _path: &Path,
        content: &str,
    ) -> Result<StructuralSummary, ExtractionError> {
        let code = BLOCK_COMMENT_RE.replace_all(content, "");
        let mut summary = StructuralSummary::empty(self.name());
        let mut details = StylesheetDetails::default();

        for caps in IMPORT_RE.captures_iter(&code) {
            summary.imports.push(ImportInfo::new(&caps[1]));
        }
        for caps in AT_RULE_RE.captures_iter(&code) {
            let at_rule = format!("@{} {}", &caps[1], caps[2].trim());
            details.at_rules.push(at_rule.trim().to_string());
        }

        for caps in RULE_RE.captures_iter(&code) {
            // Statements like `@import ...;` can precede the selector in the same span
            let prelude = caps[1].rsplit(';').next().unwrap_or_default();
            for selector in prelude.split(',') {
                let selector = selector.split_whitespace().collect::<Vec<_>>().join(" ");
                if selector.is_empty() {
                    continue;
                }
                details.selectors.push(SelectorInfo {
                    selector_type: classify_selector(&selector),
                    selector,
                });
            }
            details.rules.extend(parse_declarations(&caps[2]));
        }

        summary.details = Some(SummaryDetails::Stylesheet(details));
        Ok(summary)
    }
}

/// `.` class, `#` id, `@` at-rule, any combinator compound, else element
pub fn classify_selector(selector: &str) -> SelectorType {
    if selector.starts_with('.') {
        SelectorType::Class
    } else if selector.starts_with('#') {
        SelectorType::Id
    } else if selector.starts_with('@') {
        SelectorType::AtRule
    } else if selector.contains([' ', '>', '+', '~']) {
        SelectorType::Compound
    } else {
        SelectorType::Element
    }
}

fn parse_declarations(block: &str) -> Vec<RuleInfo> {
    block
        .split(';')
        .filter_map(|decl| {
            let (property, value) = decl.split_once(':')?;
            let property = property.trim();
            let value = value.trim();
            (!property.is_empty() && !value.is_empty()).then(|| RuleInfo {
                property: property.to_string(),
                value: value.to_string(),
            })
        })
        .collect()
}
