// C / C++ analyzer
//
// Function definitions are matched as `<prefix> name(params) [const] {`.
// The prefix must be a plausible declaration head, and control keywords in
// the name position are rejected so `else if (x) {` is not a function.

use crate::error::ExtractionError;
use crate::extractors::base::{
    is_control_keyword, strip_c_style_comments, Analyzer, EntryPoint, FunctionInfo, ImportInfo,
    StructuralSummary, TypeInfo, TypeKind, Visibility, has_keyword,
};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static INCLUDE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?m)^\s*#\s*include\s*([<"])([^>"]+)[>"]"#).unwrap());
static FUNCTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^[ \t]*([A-Za-z_][\w \t\*&:<>,]*?[\s\*&])([A-Za-z_~][\w:~]*)\s*\(([^;{)]*)\)\s*(const\b)?\s*(?:noexcept\b)?\s*(?:override\b)?\s*(?:final\b)?\s*\{",
    )
    .unwrap()
});
static TYPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^\s*(?:typedef\s+)?(?:template\s*<[^>]*>\s*)?(struct|union|enum(?:\s+class|\s+struct)?|class|namespace)\s+([A-Za-z_]\w*)[^;{(]*\{",
    )
    .unwrap()
});
static CPP_SNIFF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*(?:class\s+\w+|namespace\s+\w+|template\s*<|public:|private:|using\s+namespace)|std::")
        .unwrap()
});

/// Heuristic used by the registry to route `.h` headers
pub fn looks_like_cpp(content: &str) -> bool {
    CPP_SNIFF_RE.is_match(&strip_c_style_comments(content))
}

pub struct CFamilyAnalyzer {
    cpp: bool,
}

impl CFamilyAnalyzer {
    pub const fn c() -> Self {
        Self { cpp: false }
    }

    pub const fn cpp() -> Self {
        Self { cpp: true }
    }
}

impl Analyzer for CFamilyAnalyzer {
    fn name(&self) -> &'static str {
        if self.cpp { "cpp" } else { "c" }
    }

    fn analyze_source(
        &self,
        _path: &Path,
        content: &str,
    ) -> Result<StructuralSummary, ExtractionError> {
        let code = strip_c_style_comments(content);
        let mut summary = StructuralSummary::empty(self.name());

        for caps in INCLUDE_RE.captures_iter(&code) {
            summary
                .imports
                .push(ImportInfo::new(&caps[2]).system(&caps[1] == "<"));
        }

        for caps in FUNCTION_RE.captures_iter(&code) {
            let prefix = &caps[1];
            let name = &caps[2];
            let head = prefix.split_whitespace().next().unwrap_or_default();
            if is_control_keyword(name) || is_control_keyword(head) || head == "typedef" {
                continue;
            }
            let mut function = FunctionInfo::new(name);
            function.is_static = has_keyword(prefix, "static");
            function.is_const = caps.get(4).is_some() || has_keyword(prefix, "constexpr");
            function.is_method = name.contains("::");
            if !self.cpp && function.is_static {
                // File-local linkage
                function.visibility = Some(Visibility::Private);
            }
            if name == "main" {
                summary.entry_points.insert(EntryPoint::MainFunction);
            }
            summary.functions.push(function);
        }

        for caps in TYPE_RE.captures_iter(&code) {
            let keyword = &caps[1];
            if !self.cpp && (keyword == "class" || keyword == "namespace") {
                continue;
            }
            let kind = match keyword.split_whitespace().next().unwrap_or_default() {
                "struct" => TypeKind::Struct,
                "union" => TypeKind::Union,
                "enum" => TypeKind::Enum,
                "class" => TypeKind::Class,
                _ => TypeKind::Module,
            };
            summary.types.push(TypeInfo::new(&caps[2], kind));
        }

        Ok(summary)
    }
}
