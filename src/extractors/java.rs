// Java analyzer
//
// Method matching is call-shaped (`name(...) {`), so control keywords and
// `new` are filtered out of both the return-type and name positions.

use crate::error::ExtractionError;
use crate::extractors::base::{
    is_control_keyword, strip_c_style_comments, visibility_from_keywords, Analyzer, EntryPoint,
    FunctionInfo, ImportInfo, StructuralSummary, TypeInfo, TypeKind, has_keyword,
};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*import\s+(static\s+)?([\w.]+(?:\.\*)?)\s*;").unwrap()
});
static TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^\s*((?:(?:public|private|protected|static|final|abstract|sealed|non-sealed|strictfp)\s+)*)(class|interface|enum|record|@interface)\s+([A-Za-z_]\w*)",
    )
    .unwrap()
});
static METHOD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^\s*((?:(?:public|private|protected|static|final|abstract|synchronized|native|default|strictfp)\s+)*)(?:<[^>]+>\s+)?(?:([\w.]+(?:<[^()]*?>)?(?:\[\])*)\s+)?([A-Za-z_]\w*)\s*\([^)]*\)\s*(?:throws\s+[\w.,\s]+?)?\s*\{",
    )
    .unwrap()
});

pub struct JavaAnalyzer;

impl Analyzer for JavaAnalyzer {
    fn name(&self) -> &'static str {
        "java"
    }

    fn analyze_source(
        &self,
        _path: &Path,
        content: &str,
    ) -> Result<StructuralSummary, ExtractionError> {
        let code = strip_c_style_comments(content);
        let mut summary = StructuralSummary::empty(self.name());

        for caps in IMPORT_RE.captures_iter(&code) {
            summary.imports.push(ImportInfo::new(&caps[2]));
        }

        for caps in TYPE_RE.captures_iter(&code) {
            let kind = match &caps[2] {
                "interface" | "@interface" => TypeKind::Interface,
                "enum" => TypeKind::Enum,
                _ => TypeKind::Class,
            };
            let mut info = TypeInfo::new(&caps[3], kind);
            info.visibility = visibility_from_keywords(&caps[1]);
            summary.types.push(info);
        }

        for caps in METHOD_RE.captures_iter(&code) {
            let name = &caps[3];
            let return_type = caps.get(2).map_or("", |m| m.as_str());
            if is_control_keyword(name) || is_control_keyword(return_type) {
                continue;
            }
            // A bare `name(...) {` without modifiers or return type is a call followed by a block
            if caps[1].is_empty() && return_type.is_empty() {
                continue;
            }
            let modifiers = &caps[1];
            let mut function = FunctionInfo::new(name);
            function.visibility = visibility_from_keywords(modifiers);
            function.is_static = has_keyword(modifiers, "static");
            function.is_const = has_keyword(modifiers, "final");
            function.is_method = true;
            if name == "main" && function.is_static {
                summary.entry_points.insert(EntryPoint::MainFunction);
            }
            summary.functions.push(function);
        }

        Ok(summary)
    }
}
