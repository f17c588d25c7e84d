use crate::extractors::{EntryPoint, TypeKind, Visibility};
use crate::tests::helpers::summarize;

const SOURCE: &str = r#"
use std::collections::HashMap;
use crate::config::{self, GenomeConfig};
use std::io::Result as IoResult;
extern crate serde as sd;

/// Docs mentioning fn fake() are not code
pub fn public_api() {}
pub(crate) async fn internal_task() {}
const fn helper() -> u32 { 1 }

pub struct Config;
enum State { A }
pub trait Runner {}
type Alias = u32;
mod inner {}

impl Config {
    pub fn method(&self) {}
}

fn main() {}
"#;

#[test]
fn test_rust_imports_with_aliases() {
    let summary = summarize("src/lib.rs", SOURCE);

    assert_eq!(
        summary.import_modules(),
        vec![
            "std::collections::HashMap",
            "crate::config::{self, GenomeConfig}",
            "std::io::Result",
            "serde",
        ]
    );
    assert_eq!(summary.imports[2].alias.as_deref(), Some("IoResult"));
    assert_eq!(summary.imports[3].alias.as_deref(), Some("sd"));
}

#[test]
fn test_rust_functions_and_modifiers() {
    let summary = summarize("src/lib.rs", SOURCE);

    assert_eq!(
        summary.function_names(),
        vec!["public_api", "internal_task", "helper", "method", "main"]
    );

    let internal = &summary.functions[1];
    assert_eq!(internal.visibility, Some(Visibility::Internal));
    assert!(internal.is_async);

    let helper = &summary.functions[2];
    assert_eq!(helper.visibility, Some(Visibility::Private));
    assert!(helper.is_const);

    let method = &summary.functions[3];
    assert!(method.is_method);
    assert_eq!(method.visibility, Some(Visibility::Public));

    assert!(summary.entry_points.contains(&EntryPoint::MainFunction));
}

#[test]
fn test_rust_types() {
    let summary = summarize("src/lib.rs", SOURCE);

    let kinds: Vec<(&str, TypeKind)> = summary
        .types
        .iter()
        .map(|t| (t.name.as_str(), t.kind))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("Config", TypeKind::Struct),
            ("State", TypeKind::Enum),
            ("Runner", TypeKind::Trait),
            ("Alias", TypeKind::TypeAlias),
            ("inner", TypeKind::Module),
        ]
    );
    assert_eq!(summary.types[0].visibility, Some(Visibility::Public));
    assert_eq!(summary.types[1].visibility, Some(Visibility::Private));
}

#[test]
fn test_rust_nested_main_is_not_entry_point() {
    let summary = summarize(
        "src/lib.rs",
        "impl App {\n    fn main(&self) {}\n}\n",
    );

    assert_eq!(summary.function_names(), vec!["main"]);
    assert!(summary.entry_points.is_empty());
}
