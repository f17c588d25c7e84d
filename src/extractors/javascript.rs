// JavaScript / TypeScript analyzer
//
// One implementation serves both; TypeScript additionally reports
// interfaces, enums, type aliases and namespaces.

use crate::error::ExtractionError;
use crate::extractors::base::{
    is_control_keyword, strip_c_style_comments, visibility_from_keywords, Analyzer, EntryPoint,
    FunctionInfo, ImportInfo, StructuralSummary, TypeInfo, TypeKind, Visibility, has_keyword,
};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static IMPORT_FROM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*import\s+(?:type\s+)?([^'";]*?)\s*from\s*['"]([^'"]+)['"]"#).unwrap()
});
static IMPORT_BARE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?m)^\s*import\s*['"]([^'"]+)['"]"#).unwrap());
static REQUIRE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:(?:const|let|var)\s+([A-Za-z_$][\w$]*)\s*=\s*)?require\(\s*['"]([^'"]+)['"]\s*\)"#)
        .unwrap()
});
static FUNCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*((?:export\s+)?(?:default\s+)?(?:async\s+)?)function\s*\*?\s*([A-Za-z_$][\w$]*)")
        .unwrap()
});
static ARROW_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^\s*((?:export\s+)?)(?:const|let|var)\s+([A-Za-z_$][\w$]*)\s*(?::[^=]+)?=\s*(async\s+)?(?:\([^)]*\)|[A-Za-z_$][\w$]*)\s*(?::[^=]+)?=>",
    )
    .unwrap()
});
static METHOD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^[ \t]+((?:(?:public|private|protected|static|async|readonly|override|abstract)\s+)*)(?:get\s+|set\s+)?\*?([A-Za-z_$#][\w$]*)\s*(?:<[^>]*>)?\s*\([^)]*\)\s*(?::\s*[^{;]+)?\{",
    )
    .unwrap()
});
static CLASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*((?:export\s+)?(?:default\s+)?)(?:abstract\s+)?class\s+([A-Za-z_$][\w$]*)")
        .unwrap()
});
static TS_TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^\s*((?:export\s+)?(?:declare\s+)?)(?:const\s+)?(interface|enum|type|namespace|module)\s+([A-Za-z_$][\w$]*)",
    )
    .unwrap()
});

pub struct JavaScriptAnalyzer {
    typescript: bool,
}

impl JavaScriptAnalyzer {
    pub const fn javascript() -> Self {
        Self { typescript: false }
    }

    pub const fn typescript() -> Self {
        Self { typescript: true }
    }
}

impl Analyzer for JavaScriptAnalyzer {
    fn name(&self) -> &'static str {
        if self.typescript { "typescript" } else { "javascript" }
    }

    fn analyze_source(
        &self,
        _path: &Path,
        content: &str,
    ) -> Result<StructuralSummary, ExtractionError> {
        let code = strip_c_style_comments(content);
        let mut summary = StructuralSummary::empty(self.name());

        for caps in IMPORT_FROM_RE.captures_iter(&code) {
            summary
                .imports
                .push(ImportInfo::new(&caps[2]).with_alias(import_alias(&caps[1])));
        }
        for caps in IMPORT_BARE_RE.captures_iter(&code) {
            summary.imports.push(ImportInfo::new(&caps[1]));
        }
        for caps in REQUIRE_RE.captures_iter(&code) {
            summary.imports.push(
                ImportInfo::new(&caps[2]).with_alias(caps.get(1).map(|m| m.as_str().to_string())),
            );
        }

        for caps in FUNCTION_RE.captures_iter(&code) {
            let mut function = FunctionInfo::new(&caps[2]);
            function.is_async = has_keyword(&caps[1], "async");
            function.visibility = has_keyword(&caps[1], "export").then_some(Visibility::Public);
            summary.functions.push(function);
        }
        for caps in ARROW_RE.captures_iter(&code) {
            let mut function = FunctionInfo::new(&caps[2]);
            function.is_async = caps.get(3).is_some();
            function.visibility = has_keyword(&caps[1], "export").then_some(Visibility::Public);
            summary.functions.push(function);
        }
        for caps in METHOD_RE.captures_iter(&code) {
            let name = &caps[2];
            if is_control_keyword(name) || name == "function" {
                continue;
            }
            let modifiers = &caps[1];
            let mut function = FunctionInfo::new(name);
            function.is_method = true;
            function.is_static = has_keyword(modifiers, "static");
            function.is_async = has_keyword(modifiers, "async");
            function.visibility = if name.starts_with('#') {
                Some(Visibility::Private)
            } else {
                visibility_from_keywords(modifiers)
            };
            summary.functions.push(function);
        }

        for caps in CLASS_RE.captures_iter(&code) {
            let mut info = TypeInfo::new(&caps[2], TypeKind::Class);
            info.visibility = has_keyword(&caps[1], "export").then_some(Visibility::Public);
            summary.types.push(info);
        }
        if self.typescript {
            for caps in TS_TYPE_RE.captures_iter(&code) {
                let kind = match &caps[2] {
                    "interface" => TypeKind::Interface,
                    "enum" => TypeKind::Enum,
                    "type" => TypeKind::TypeAlias,
                    _ => TypeKind::Module,
                };
                let mut info = TypeInfo::new(&caps[3], kind);
                info.visibility = has_keyword(&caps[1], "export").then_some(Visibility::Public);
                summary.types.push(info);
            }
        }

        if summary.functions.iter().any(|f| f.name == "main" && !f.is_method) {
            summary.entry_points.insert(EntryPoint::MainFunction);
        }
        if content.starts_with("#!") {
            summary.entry_points.insert(EntryPoint::Script);
        }

        Ok(summary)
    }
}

/// `* as ns` and default imports bind a local name
fn import_alias(clause: &str) -> Option<String> {
    let clause = clause.trim();
    if let Some(rest) = clause.strip_prefix('*') {
        return rest
            .trim()
            .strip_prefix("as")
            .map(|alias| alias.trim().to_string());
    }
    let default = clause.split(',').next()?.trim();
    if default.is_empty() || default.starts_with('{') {
        None
    } else {
        Some(default.to_string())
    }
}
