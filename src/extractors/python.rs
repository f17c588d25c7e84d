// Python analyzer
//
// Indentation decides whether a def is top-level or a method. Python has no
// canonical entry function, so a file without top-level defs counts as a
// script when it has any live content.

use crate::error::ExtractionError;
use crate::extractors::base::{
    has_live_content, strip_hash_comments, Analyzer, EntryPoint, FunctionInfo, ImportInfo,
    StructuralSummary, TypeInfo, TypeKind, Visibility,
};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static IMPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*import[ \t]+([^\n]+)").unwrap());
static FROM_IMPORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*from[ \t]+(\.*[\w.]*)[ \t]+import\b").unwrap());
static DEF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^([ \t]*)(async[ \t]+)?def[ \t]+([A-Za-z_]\w*)[ \t]*\(").unwrap()
});
static CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*class[ \t]+([A-Za-z_]\w*)").unwrap());
static MAIN_GUARD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^if\s+__name__\s*==\s*['"]__main__['"]\s*:"#).unwrap()
});

pub struct PythonAnalyzer;

impl Analyzer for PythonAnalyzer {
    fn name(&self) -> &'static str {
        "python"
    }

    fn analyze_source(
        &self,
        _path: &Path,
        content: &str,
    ) -> Result<StructuralSummary, ExtractionError> {
        let code = strip_hash_comments(content);
        let mut summary = StructuralSummary::empty(self.name());

        for caps in IMPORT_RE.captures_iter(&code) {
            for item in caps[1].split(',') {
                let item = item.trim().trim_end_matches(['(', ')', '\\']).trim();
                if item.is_empty() {
                    continue;
                }
                let (module, alias) = match item.split_once(" as ") {
                    Some((module, alias)) => (module.trim(), Some(alias.trim().to_string())),
                    None => (item, None),
                };
                summary
                    .imports
                    .push(ImportInfo::new(module).with_alias(alias));
            }
        }
        for caps in FROM_IMPORT_RE.captures_iter(&code) {
            summary.imports.push(ImportInfo::new(&caps[1]));
        }

        let lines: Vec<&str> = code.lines().collect();
        let mut top_level_defs = 0;
        for caps in DEF_RE.captures_iter(&code) {
            let indent = caps[1].len();
            let name = &caps[3];
            let mut function = FunctionInfo::new(name);
            function.is_async = caps.get(2).is_some();
            function.is_method = indent > 0;
            function.visibility = Some(python_visibility(name));

            let line_no = code[..caps.get(0).map_or(0, |m| m.start())].matches('\n').count();
            function.is_static = preceding_decorators(&lines, line_no)
                .any(|d| d == "@staticmethod" || d == "@classmethod");

            if indent == 0 {
                top_level_defs += 1;
                if name == "main" {
                    summary.entry_points.insert(EntryPoint::MainFunction);
                }
            }
            summary.functions.push(function);
        }

        for caps in CLASS_RE.captures_iter(&code) {
            let mut info = TypeInfo::new(&caps[1], TypeKind::Class);
            info.visibility = Some(python_visibility(&caps[1]));
            summary.types.push(info);
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

/// Leading underscore is private by convention; dunders are public protocol
fn python_visibility(name: &str) -> Visibility {
    if name.starts_with('_') && !(name.starts_with("__") && name.ends_with("__")) {
        Visibility::Private
    } else {
        Visibility::Public
    }
}

/// Decorator lines stacked directly above `line_no`
fn preceding_decorators<'a>(lines: &'a [&'a str], line_no: usize) -> impl Iterator<Item = &'a str> {
    lines[..line_no.min(lines.len())]
        .iter()
        .rev()
        .map(|l| l.trim())
        .take_while(|l| l.starts_with('@'))
}
