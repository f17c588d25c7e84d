// Rust analyzer
//
// Declarations are matched line-wise after comment stripping. Modifiers
// (pub, const, async) come from the keyword prefix of the matched span.

use crate::error::ExtractionError;
use crate::extractors::base::{
    strip_c_style_comments, Analyzer, EntryPoint, FunctionInfo, ImportInfo, StructuralSummary,
    TypeInfo, TypeKind, Visibility, has_keyword, indent_of,
};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static USE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:pub(?:\([^)]*\))?\s+)?use\s+([^;]+);").unwrap()
});
static EXTERN_CRATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*extern\s+crate\s+(\w+)(?:\s+as\s+(\w+))?\s*;").unwrap()
});
static FN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?m)^([ \t]*)((?:pub(?:\([^)]*\))?\s+)?(?:default\s+)?(?:const\s+)?(?:async\s+)?(?:unsafe\s+)?(?:extern\s+"[^"]*"\s+)?)fn\s+([A-Za-z_]\w*)"#,
    )
    .unwrap()
});
static TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^\s*((?:pub(?:\([^)]*\))?\s+)?(?:unsafe\s+)?)(struct|enum|trait|union|type|mod)\s+([A-Za-z_]\w*)",
    )
    .unwrap()
});

pub struct RustAnalyzer;

impl Analyzer for RustAnalyzer {
    fn name(&self) -> &'static str {
        "rust"
    }

    fn analyze_source(
        &self,
        _path: &Path,
        content: &str,
    ) -> Result<StructuralSummary, ExtractionError> {
        let code = strip_c_style_comments(content);
        let mut summary = StructuralSummary::empty(self.name());

        for caps in USE_RE.captures_iter(&code) {
            let body = caps[1].split_whitespace().collect::<Vec<_>>().join(" ");
            let (module, alias) = match body.rsplit_once(" as ") {
                Some((module, alias)) if !module.contains('{') => {
                    (module.to_string(), Some(alias.trim().to_string()))
                }
                _ => (body, None),
            };
            summary.imports.push(ImportInfo::new(module).with_alias(alias));
        }
        for caps in EXTERN_CRATE_RE.captures_iter(&code) {
            summary.imports.push(
                ImportInfo::new(&caps[1]).with_alias(caps.get(2).map(|m| m.as_str().to_string())),
            );
        }

        for caps in FN_RE.captures_iter(&code) {
            let modifiers = &caps[2];
            let mut function = FunctionInfo::new(&caps[3]);
            function.visibility = Some(rust_visibility(modifiers));
            function.is_const = has_keyword(modifiers, "const");
            function.is_async = has_keyword(modifiers, "async");
            function.is_method = indent_of(&caps[1]) > 0;
            if function.name == "main" && !function.is_method {
                summary.entry_points.insert(EntryPoint::MainFunction);
            }
            summary.functions.push(function);
        }

        for caps in TYPE_RE.captures_iter(&code) {
            let kind = match &caps[2] {
                "struct" => TypeKind::Struct,
                "enum" => TypeKind::Enum,
                "trait" => TypeKind::Trait,
                "union" => TypeKind::Union,
                "type" => TypeKind::TypeAlias,
                _ => TypeKind::Module,
            };
            let mut info = TypeInfo::new(&caps[3], kind);
            info.visibility = Some(rust_visibility(&caps[1]));
            summary.types.push(info);
        }

        Ok(summary)
    }
}

fn rust_visibility(modifiers: &str) -> Visibility {
    let trimmed = modifiers.trim_start();
    if trimmed.starts_with("pub(crate)") || trimmed.starts_with("pub(super)") {
        Visibility::Internal
    } else if trimmed.starts_with("pub") {
        Visibility::Public
    } else {
        Visibility::Private
    }
}
