// Shell (sh/bash/zsh) analyzer
//
// Shell has no entry function. Any live content marks the file as runnable,
// and a file without function definitions is a script in its own right.

use crate::error::ExtractionError;
use crate::extractors::base::{
    has_live_content, is_control_keyword, strip_hash_comments, Analyzer, EntryPoint, FunctionInfo,
    ImportInfo, StructuralSummary,
};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static SOURCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*(?:source|\.)\s+['"]?([^'"\s;]+)['"]?"#).unwrap()
});
static FUNCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:function\s+([A-Za-z_][\w:-]*)\s*(?:\(\s*\))?|([A-Za-z_][\w:-]*)\s*\(\s*\))\s*\{?")
        .unwrap()
});

pub struct ShellAnalyzer;

impl Analyzer for ShellAnalyzer {
    fn name(&self) -> &'static str {
        "shell"
    }

    fn analyze_source(
        &self,
        _path: &Path,
        content: &str,
    ) -> Result<StructuralSummary, ExtractionError> {
        let code = strip_hash_comments(content);
        let mut summary = StructuralSummary::empty(self.name());

        for caps in SOURCE_RE.captures_iter(&code) {
            summary.imports.push(ImportInfo::new(&caps[1]));
        }

        for caps in FUNCTION_RE.captures_iter(&code) {
            let Some(name) = caps.get(1).or_else(|| caps.get(2)).map(|m| m.as_str()) else {
                continue;
            };
            if is_control_keyword(name) {
                continue;
            }
            if name == "main" {
                summary.entry_points.insert(EntryPoint::MainFunction);
            }
            summary.functions.push(FunctionInfo::new(name));
        }

        if has_live_content(&code) {
            summary.entry_points.insert(EntryPoint::Content);
            if summary.functions.is_empty() {
                summary.entry_points.insert(EntryPoint::Script);
            }
        }

        Ok(summary)
    }
}
