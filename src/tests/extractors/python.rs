use crate::extractors::{EntryPoint, TypeKind, Visibility};
use crate::tests::helpers::summarize;

const SOURCE: &str = r#"
import os, sys as system
from collections import OrderedDict
from . import sibling

class Widget:
    @staticmethod
    def build():
        pass

    def _hidden(self):
        pass

    def __init__(self):
        pass

async def fetch():
    pass

def main():
    pass

if __name__ == "__main__":
    main()
"#;

#[test]
fn test_python_imports() {
    let summary = summarize("app.py", SOURCE);

    assert_eq!(
        summary.import_modules(),
        vec!["os", "sys", "collections", "."]
    );
    assert_eq!(summary.imports[1].alias.as_deref(), Some("system"));
}

#[test]
fn test_python_functions_and_methods() {
    let summary = summarize("app.py", SOURCE);

    assert_eq!(
        summary.function_names(),
        vec!["build", "_hidden", "__init__", "fetch", "main"]
    );

    let build = &summary.functions[0];
    assert!(build.is_method);
    assert!(build.is_static);

    assert_eq!(summary.functions[1].visibility, Some(Visibility::Private));
    assert_eq!(summary.functions[2].visibility, Some(Visibility::Public));

    let fetch = &summary.functions[3];
    assert!(fetch.is_async);
    assert!(!fetch.is_method);

    assert_eq!(summary.types.len(), 1);
    assert_eq!(summary.types[0].name, "Widget");
    assert_eq!(summary.types[0].kind, TypeKind::Class);
}

#[test]
fn test_python_entry_points() {
    let summary = summarize("app.py", SOURCE);

    assert!(summary.entry_points.contains(&EntryPoint::MainFunction));
    assert!(summary.entry_points.contains(&EntryPoint::MainGuard));
    assert!(!summary.entry_points.contains(&EntryPoint::Script));
}

#[test]
fn test_python_script_without_functions() {
    let summary = summarize("run.py", "# setup\nprint('hi')\nx = 1\n");

    assert!(summary.functions.is_empty());
    assert_eq!(
        summary.entry_points.iter().copied().collect::<Vec<_>>(),
        vec![EntryPoint::Script]
    );
}

#[test]
fn test_python_comment_only_file_has_no_entry_point() {
    let summary = summarize("empty.py", "# nothing here\n\n   \n");

    assert!(summary.entry_points.is_empty());
}
