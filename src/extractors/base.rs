// Base extraction types and the analyzer contract
//
// Every analyzer produces the same StructuralSummary shape. The five core
// fields are always present, even when extraction failed and only `errors`
// carries anything.

use crate::error::ExtractionError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use super::structure::Shape;

/// Per-file structural summary
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StructuralSummary {
    /// Registry name of the analyzer that produced this summary
    #[serde(default)]
    pub language: String,
    pub imports: Vec<ImportInfo>,
    pub functions: Vec<FunctionInfo>,
    pub types: Vec<TypeInfo>,
    pub entry_points: BTreeSet<EntryPoint>,
    pub errors: Vec<String>,
    /// Variant-specific payload (stylesheets, structured documents)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<SummaryDetails>,
}

impl StructuralSummary {
    pub fn empty(language: &str) -> Self {
        Self {
            language: language.to_string(),
            ..Default::default()
        }
    }

    /// All-empty summary carrying a single tagged diagnostic
    pub fn degraded(language: &str, error: &ExtractionError) -> Self {
        let mut summary = Self::empty(language);
        summary.errors.push(error.to_string());
        summary
    }

    pub fn is_degraded(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_entry_point(&self) -> bool {
        !self.entry_points.is_empty()
    }

    pub fn function_names(&self) -> Vec<&str> {
        self.functions.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn type_names(&self) -> Vec<&str> {
        self.types.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn import_modules(&self) -> Vec<&str> {
        self.imports.iter().map(|i| i.module.as_str()).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportInfo {
    pub module: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// `#include <...>` style system import
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_system: Option<bool>,
}

impl ImportInfo {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            alias: None,
            is_system: None,
        }
    }

    pub fn with_alias(mut self, alias: Option<String>) -> Self {
        self.alias = alias;
        self
    }

    pub fn system(mut self, is_system: bool) -> Self {
        self.is_system = Some(is_system);
        self
    }
}

/// Function attributes vary by language, so all of them are optional
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FunctionInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_static: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_const: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_async: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_method: bool,
}

impl FunctionInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypeInfo {
    pub name: String,
    pub kind: TypeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
}

impl TypeInfo {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            visibility: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Struct,
    Enum,
    Trait,
    Interface,
    Module,
    Union,
    TypeAlias,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
    Protected,
    Internal,
}

/// Heuristic markers for a file being executable on its own
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EntryPoint {
    /// A function literally named `main`
    MainFunction,
    /// Python's `if __name__ == "__main__":`
    MainGuard,
    /// Script-style file with no top-level function definitions
    Script,
    /// Non-whitespace, non-comment content present
    Content,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SummaryDetails {
    Stylesheet(StylesheetDetails),
    Document(DocumentDetails),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StylesheetDetails {
    pub selectors: Vec<SelectorInfo>,
    pub rules: Vec<RuleInfo>,
    pub at_rules: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectorInfo {
    pub selector: String,
    #[serde(rename = "type")]
    pub selector_type: SelectorType,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SelectorType {
    Class,
    Id,
    AtRule,
    Compound,
    Element,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleInfo {
    pub property: String,
    pub value: String,
}

/// Top-level description of a JSON/YAML/TOML document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentDetails {
    #[serde(rename = "type")]
    pub value_type: super::structure::ValueType,
    /// Key count for objects, element count for arrays, 0 for scalars
    pub size: usize,
    pub keys: Vec<String>,
    pub structure: Shape,
}

impl DocumentDetails {
    /// Shape recorded for a top-level key
    pub fn structure_of(&self, key: &str) -> Option<&Shape> {
        self.structure.properties.as_ref()?.get(key)
    }
}

/// The extraction capability every language variant implements
///
/// Implementations receive decoded content and may fail with a typed
/// [`ExtractionError`]; the registry turns failures into degraded summaries,
/// so nothing escapes `analyze`.
pub trait Analyzer: Send + Sync {
    /// Registry name (`"rust"`, `"python"`, ...)
    fn name(&self) -> &'static str;

    fn analyze_source(
        &self,
        path: &Path,
        content: &str,
    ) -> Result<StructuralSummary, ExtractionError>;
}

/// Names that look like calls but are control flow
pub const CONTROL_KEYWORDS: &[&str] = &[
    "if", "else", "while", "for", "foreach", "switch", "catch", "return", "sizeof", "typeof",
    "do", "case", "new", "delete", "throw", "until", "unless", "elif", "match", "with",
];

pub fn is_control_keyword(name: &str) -> bool {
    CONTROL_KEYWORDS.contains(&name)
}

/// Remove `//` line comments and `/* */` block comments.
///
/// Block comments are replaced by their newlines so line structure survives.
/// String literals are not recognised: a `//` inside a string still starts
/// a comment, and declarations inside strings are still matched.
pub fn strip_c_style_comments(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '/' {
            match chars.peek() {
                Some('/') => {
                    for next in chars.by_ref() {
                        if next == '\n' {
                            out.push('\n');
                            break;
                        }
                    }
                    continue;
                }
                Some('*') => {
                    chars.next();
                    let mut prev = '\0';
                    for next in chars.by_ref() {
                        if next == '\n' {
                            out.push('\n');
                        }
                        if prev == '*' && next == '/' {
                            break;
                        }
                        prev = next;
                    }
                    continue;
                }
                _ => {}
            }
        }
        out.push(c);
    }
    out
}

/// Remove `#` comments that start a line or follow whitespace.
///
/// `$#` and `${#var}` survive, which keeps shell parameter expansions intact.
pub fn strip_hash_comments(content: &str) -> String {
    content
        .lines()
        .map(|line| {
            let mut prev: Option<char> = None;
            for (idx, c) in line.char_indices() {
                if c == '#' && prev.is_none_or(char::is_whitespace) {
                    return &line[..idx];
                }
                prev = Some(c);
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Leading whitespace width of a line (tabs count as one)
pub fn indent_of(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// True when anything other than whitespace remains
pub fn has_live_content(stripped: &str) -> bool {
    stripped.chars().any(|c| !c.is_whitespace())
}

/// Visibility from keyword co-occurrence in a declaration span
pub fn visibility_from_keywords(span: &str) -> Option<Visibility> {
    let words: Vec<&str> = span
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|w| !w.is_empty())
        .collect();

    if words.contains(&"public") {
        Some(Visibility::Public)
    } else if words.contains(&"private") {
        Some(Visibility::Private)
    } else if words.contains(&"protected") {
        Some(Visibility::Protected)
    } else if words.contains(&"internal") {
        Some(Visibility::Internal)
    } else {
        None
    }
}

/// True when `word` appears as a whole word in `span`
pub fn has_keyword(span: &str, word: &str) -> bool {
    span.split(|c: char| !c.is_alphanumeric() && c != '_')
        .any(|w| w == word)
}
