use crate::extractors::{EntryPoint, TypeKind, Visibility};
use crate::tests::helpers::summarize;

const SOURCE: &str = r#"package main

import (
	"fmt"
	str "strings"
	"github.com/acme/lib"
)
import "os"

// Server handles requests
type Server struct {
	addr string
}

type Handler interface {
	Serve()
}

type ID = string

func NewServer() *Server { return nil }

func (s *Server) start() error { return nil }

func main() {}
"#;

#[test]
fn test_go_imports_mark_standard_library() {
    let summary = summarize("cmd/main.go", SOURCE);

    assert_eq!(
        summary.import_modules(),
        vec!["os", "fmt", "strings", "github.com/acme/lib"]
    );
    assert_eq!(summary.imports[0].is_system, Some(true));
    assert_eq!(summary.imports[2].alias.as_deref(), Some("str"));
    assert_eq!(summary.imports[3].is_system, Some(false));
}

#[test]
fn test_go_functions_and_receivers() {
    let summary = summarize("cmd/main.go", SOURCE);

    assert_eq!(summary.function_names(), vec!["NewServer", "start", "main"]);
    assert_eq!(summary.functions[0].visibility, Some(Visibility::Public));
    assert!(!summary.functions[0].is_method);
    assert!(summary.functions[1].is_method);
    assert_eq!(summary.functions[1].visibility, Some(Visibility::Private));
    assert!(summary.entry_points.contains(&EntryPoint::MainFunction));
}

#[test]
fn test_go_types() {
    let summary = summarize("cmd/main.go", SOURCE);

    let kinds: Vec<(&str, TypeKind)> = summary
        .types
        .iter()
        .map(|t| (t.name.as_str(), t.kind))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("Server", TypeKind::Struct),
            ("Handler", TypeKind::Interface),
            ("ID", TypeKind::TypeAlias),
        ]
    );
}

#[test]
fn test_go_generic_struct() {
    let summary = summarize("list.go", "package list\n\ntype List[T any] struct {\n\titems []T\n}\n");

    assert_eq!(summary.type_names(), vec!["List"]);
    assert_eq!(summary.types[0].kind, TypeKind::Struct);
}
