// Go analyzer

use crate::error::ExtractionError;
use crate::extractors::base::{
    strip_c_style_comments, Analyzer, EntryPoint, FunctionInfo, ImportInfo, StructuralSummary,
    TypeInfo, TypeKind, Visibility,
};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static IMPORT_SINGLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^import\s+(?:([A-Za-z_.]\w*)\s+)?"([^"]+)""#).unwrap()
});
static IMPORT_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?ms)^import\s*\((.*?)\)").unwrap());
static IMPORT_SPEC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*(?:([A-Za-z_.]\w*)\s+)?"([^"]+)""#).unwrap()
});
static FUNC_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^func\s+(\([^)]*\)\s*)?([A-Za-z_]\w*)\s*[\[(]").unwrap()
});
static TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(?:type\s+|\t|    )([A-Za-z_]\w*)(?:\[[^\]]*\])?\s+(struct|interface)\b|^type\s+([A-Za-z_]\w*)\s+(?:=\s*)?[\w*.\[\]]")
        .unwrap()
});

pub struct GoAnalyzer;

impl Analyzer for GoAnalyzer {
    fn name(&self) -> &'static str {
        "go"
    }

    fn analyze_source(
        &self,
        _path: &Path,
        content: &str,
    ) -> Result<StructuralSummary, ExtractionError> {
        let code = strip_c_style_comments(content);
        let mut summary = StructuralSummary::empty(self.name());

        for caps in IMPORT_SINGLE_RE.captures_iter(&code) {
            summary.imports.push(go_import(caps.get(1).map(|m| m.as_str()), &caps[2]));
        }
        for block in IMPORT_BLOCK_RE.captures_iter(&code) {
            for caps in IMPORT_SPEC_RE.captures_iter(&block[1]) {
                summary.imports.push(go_import(caps.get(1).map(|m| m.as_str()), &caps[2]));
            }
        }

        for caps in FUNC_RE.captures_iter(&code) {
            let name = &caps[2];
            let mut function = FunctionInfo::new(name);
            function.is_method = caps.get(1).is_some();
            function.visibility = Some(exported(name));
            if name == "main" && !function.is_method {
                summary.entry_points.insert(EntryPoint::MainFunction);
            }
            summary.functions.push(function);
        }

        for caps in TYPE_RE.captures_iter(&code) {
            let (name, kind) = match (caps.get(1), caps.get(2), caps.get(3)) {
                (Some(name), Some(kind), _) => (
                    name.as_str(),
                    if kind.as_str() == "struct" { TypeKind::Struct } else { TypeKind::Interface },
                ),
                (_, _, Some(name)) => (name.as_str(), TypeKind::TypeAlias),
                _ => continue,
            };
            let mut info = TypeInfo::new(name, kind);
            info.visibility = Some(exported(name));
            summary.types.push(info);
        }

        Ok(summary)
    }
}

fn go_import(alias: Option<&str>, path: &str) -> ImportInfo {
    // Standard library paths have no dot in their first element
    let is_std = !path.split('/').next().unwrap_or(path).contains('.');
    ImportInfo::new(path)
        .with_alias(alias.map(str::to_string))
        .system(is_std)
}

/// Capitalised identifiers are exported
fn exported(name: &str) -> Visibility {
    if name.chars().next().is_some_and(char::is_uppercase) {
        Visibility::Public
    } else {
        Visibility::Private
    }
}
