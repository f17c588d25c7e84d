// Genome's language analyzers
//
// Each analyzer is a best-effort, pattern-based implementation of the same
// contract: content in, StructuralSummary out. The registry maps a file to
// exactly one variant by extension, sniffing content only when the extension
// is ambiguous or missing.

pub mod base;
pub mod structure;

pub mod bash;
pub mod c_family;
pub mod css;
pub mod go;
pub mod java;
pub mod javascript;
pub mod json;
pub mod python;
pub mod ruby;
pub mod rust;
pub mod toml;
pub mod yaml;

pub use base::{
    Analyzer, DocumentDetails, EntryPoint, FunctionInfo, ImportInfo, RuleInfo, SelectorInfo,
    SelectorType, StructuralSummary, StylesheetDetails, SummaryDetails, TypeInfo, TypeKind,
    Visibility,
};
pub use structure::{Shape, ValueType};

use crate::error::ExtractionError;
use std::path::Path;
use tracing::{debug, warn};

/// Closed set of analyzer variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Rust,
    Python,
    JavaScript,
    TypeScript,
    Go,
    Java,
    C,
    Cpp,
    Ruby,
    Shell,
    Css,
    Json,
    Yaml,
    Toml,
    /// Fallback for anything unrecognised: all-empty summary
    Plain,
}

static RUST: rust::RustAnalyzer = rust::RustAnalyzer;
static PYTHON: python::PythonAnalyzer = python::PythonAnalyzer;
static JAVASCRIPT: javascript::JavaScriptAnalyzer = javascript::JavaScriptAnalyzer::javascript();
static TYPESCRIPT: javascript::JavaScriptAnalyzer = javascript::JavaScriptAnalyzer::typescript();
static GO: go::GoAnalyzer = go::GoAnalyzer;
static JAVA: java::JavaAnalyzer = java::JavaAnalyzer;
static C: c_family::CFamilyAnalyzer = c_family::CFamilyAnalyzer::c();
static CPP: c_family::CFamilyAnalyzer = c_family::CFamilyAnalyzer::cpp();
static RUBY: ruby::RubyAnalyzer = ruby::RubyAnalyzer;
static SHELL: bash::ShellAnalyzer = bash::ShellAnalyzer;
static CSS: css::CssAnalyzer = css::CssAnalyzer;
static JSON: json::JsonAnalyzer = json::JsonAnalyzer;
static YAML: yaml::YamlAnalyzer = yaml::YamlAnalyzer;
static TOML: toml::TomlAnalyzer = toml::TomlAnalyzer;
static PLAIN: PlainAnalyzer = PlainAnalyzer;

impl Language {
    /// Static extension mapping. `h` is deliberately absent: headers are sniffed.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let language = match ext {
            "rs" => Language::Rust,
            "py" | "pyw" | "pyi" => Language::Python,
            "js" | "jsx" | "mjs" | "cjs" => Language::JavaScript,
            "ts" | "tsx" | "mts" | "cts" => Language::TypeScript,
            "go" => Language::Go,
            "java" => Language::Java,
            "c" => Language::C,
            "cc" | "cpp" | "cxx" | "hpp" | "hh" | "hxx" => Language::Cpp,
            "rb" | "rake" => Language::Ruby,
            "sh" | "bash" | "zsh" => Language::Shell,
            "css" => Language::Css,
            "json" => Language::Json,
            "yml" | "yaml" => Language::Yaml,
            "toml" => Language::Toml,
            _ => return None,
        };
        Some(language)
    }

    /// Resolve the variant for `path`, sniffing `content` for ambiguous cases
    pub fn detect(path: &Path, content: Option<&str>) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("h") => match content {
                Some(text) if c_family::looks_like_cpp(text) => Language::Cpp,
                _ => Language::C,
            },
            Some(ext) => Self::from_extension(ext).unwrap_or(Language::Plain),
            None => content.and_then(Self::from_shebang).unwrap_or(Language::Plain),
        }
    }

    /// Interpreter named on a `#!` first line
    fn from_shebang(content: &str) -> Option<Self> {
        let first = content.lines().next()?.strip_prefix("#!")?;
        let mut parts = first.split_whitespace();
        let program = parts.next()?;
        let program = if program.ends_with("/env") {
            parts.find(|p| !p.starts_with('-'))?
        } else {
            program
        };
        let interpreter = program.rsplit('/').next()?;

        if interpreter.starts_with("python") {
            Some(Language::Python)
        } else if matches!(interpreter, "sh" | "bash" | "zsh" | "dash" | "ksh") {
            Some(Language::Shell)
        } else if matches!(interpreter, "node" | "nodejs") {
            Some(Language::JavaScript)
        } else if interpreter == "ruby" {
            Some(Language::Ruby)
        } else {
            None
        }
    }

    pub fn analyzer(&self) -> &'static dyn Analyzer {
        match self {
            Language::Rust => &RUST,
            Language::Python => &PYTHON,
            Language::JavaScript => &JAVASCRIPT,
            Language::TypeScript => &TYPESCRIPT,
            Language::Go => &GO,
            Language::Java => &JAVA,
            Language::C => &C,
            Language::Cpp => &CPP,
            Language::Ruby => &RUBY,
            Language::Shell => &SHELL,
            Language::Css => &CSS,
            Language::Json => &JSON,
            Language::Yaml => &YAML,
            Language::Toml => &TOML,
            Language::Plain => &PLAIN,
        }
    }

    pub fn name(&self) -> &'static str {
        self.analyzer().name()
    }
}

/// No-op analyzer for unrecognised files
pub struct PlainAnalyzer;

impl Analyzer for PlainAnalyzer {
    fn name(&self) -> &'static str {
        "plain"
    }

    fn analyze_source(
        &self,
        _path: &Path,
        _content: &str,
    ) -> Result<StructuralSummary, ExtractionError> {
        Ok(StructuralSummary::empty(self.name()))
    }
}

/// Extensions with a dedicated analyzer (used by discovery)
pub fn supported_extensions() -> &'static [&'static str] {
    &[
        "rs", "py", "pyw", "pyi", "js", "jsx", "mjs", "cjs", "ts", "tsx", "mts", "cts", "go",
        "java", "c", "h", "cc", "cpp", "cxx", "hpp", "hh", "hxx", "rb", "rake", "sh", "bash",
        "zsh", "css", "json", "yml", "yaml", "toml",
    ]
}

/// Analyze a file on disk. Never fails: read, decode and parse problems are
/// folded into a degraded summary.
pub fn analyze(path: &Path) -> StructuralSummary {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            let language = Language::detect(path, None);
            warn!("Failed to read {}: {}", path.display(), e);
            return StructuralSummary::degraded(language.name(), &ExtractionError::read(e.to_string()));
        }
    };

    match String::from_utf8(bytes) {
        Ok(content) => analyze_content(path, &content),
        Err(e) => {
            let language = Language::detect(path, None);
            warn!("{} is not valid UTF-8", path.display());
            StructuralSummary::degraded(
                language.name(),
                &ExtractionError::read(format!("file is not valid UTF-8: {}", e.utf8_error())),
            )
        }
    }
}

/// Analyze already-decoded content as if it came from `path`
pub fn analyze_content(path: &Path, content: &str) -> StructuralSummary {
    let language = Language::detect(path, Some(content));
    match language.analyzer().analyze_source(path, content) {
        Ok(summary) => {
            debug!(
                "Analyzed {} as {}: {} functions, {} types, {} imports",
                path.display(),
                language.name(),
                summary.functions.len(),
                summary.types.len(),
                summary.imports.len()
            );
            summary
        }
        Err(e) => {
            warn!("Degraded summary for {}: {}", path.display(), e);
            StructuralSummary::degraded(language.name(), &e)
        }
    }
}
