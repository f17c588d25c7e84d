// Ruby analyzer

use crate::error::ExtractionError;
use crate::extractors::base::{
    has_live_content, strip_hash_comments, Analyzer, EntryPoint, FunctionInfo, ImportInfo,
    StructuralSummary, TypeInfo, TypeKind,
};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static REQUIRE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*(require|require_relative|load)\s*\(?\s*['"]([^'"]+)['"]"#).unwrap()
});
static DEF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^([ \t]*)def\s+(self\.)?([A-Za-z_]\w*[?!=]?)").unwrap()
});
static TYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*(class|module)\s+([A-Z][\w:]*)").unwrap());
static MAIN_GUARD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*if\s+(?:__FILE__\s*==\s*\$(?:0|PROGRAM_NAME)|\$(?:0|PROGRAM_NAME)\s*==\s*__FILE__)")
        .unwrap()
});
static EMBEDDED_DOC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?ms)^=begin\b.*?^=end\b[^\n]*").unwrap());

pub struct RubyAnalyzer;

impl Analyzer for RubyAnalyzer {
    fn name(&self) -> &'static str {
        "ruby"
    }

    fn analyze_source(
        &self,
        _path: &Path,
        content: &str,
    ) -> Result<StructuralSummary, ExtractionError> {
        let code = strip_hash_comments(&EMBEDDED_DOC_RE.replace_all(content, ""));
        let mut summary = StructuralSummary::empty(self.name());

        for caps in REQUIRE_RE.captures_iter(&code) {
            summary.imports.push(ImportInfo::new(&caps[2]));
        }

        let mut top_level_defs = 0;
        for caps in DEF_RE.captures_iter(&code) {
            let mut function = FunctionInfo::new(&caps[3]);
            function.is_static = caps.get(2).is_some();
            function.is_method = !caps[1].is_empty();
            if caps[1].is_empty() {
                top_level_defs += 1;
            }
            summary.functions.push(function);
        }

        for caps in TYPE_RE.captures_iter(&code) {
            let kind = if &caps[1] == "class" { TypeKind::Class } else { TypeKind::Module };
            summary.types.push(TypeInfo::new(&caps[2], kind));
        }

        if MAIN_GUARD_RE.is_match(&code) {
            summary.entry_points.insert(EntryPoint::MainGuard);
        }
        if top_level_defs == 0 && has_live_content(&code) {
            summary.entry_points.insert(EntryPoint::Script);
        }

        Ok(summary)
    }
}
