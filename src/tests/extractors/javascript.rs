use crate::extractors::{EntryPoint, TypeKind, Visibility};
use crate::tests::helpers::summarize;

const SOURCE: &str = r#"
import React from 'react';
import * as path from "path";
import { a, b } from './util';
import './styles.css';
const fs = require('fs');

export async function load() {}
function helper() {}
export const handler = async (event) => {};
const add = (a, b) => a + b;

export class Service {
  constructor(opts) {
    this.opts = opts;
  }
  static create() {
    return new Service();
  }
  async run() {
    if (this.opts) {
      return 1;
    }
  }
  #secret() {}
}
"#;

#[test]
fn test_javascript_imports() {
    let summary = summarize("src/app.js", SOURCE);

    assert_eq!(
        summary.import_modules(),
        vec!["react", "path", "./util", "./styles.css", "fs"]
    );
    assert_eq!(summary.imports[0].alias.as_deref(), Some("React"));
    assert_eq!(summary.imports[1].alias.as_deref(), Some("path"));
    assert_eq!(summary.imports[2].alias, None);
    assert_eq!(summary.imports[4].alias.as_deref(), Some("fs"));
}

#[test]
fn test_javascript_functions_skip_control_flow() {
    let summary = summarize("src/app.js", SOURCE);

    assert_eq!(
        summary.function_names(),
        vec![
            "load",
            "helper",
            "handler",
            "add",
            "constructor",
            "create",
            "run",
            "#secret"
        ]
    );

    let load = &summary.functions[0];
    assert!(load.is_async);
    assert_eq!(load.visibility, Some(Visibility::Public));
    assert_eq!(summary.functions[1].visibility, None);
    assert!(summary.functions[2].is_async);

    let create = &summary.functions[5];
    assert!(create.is_method);
    assert!(create.is_static);
    assert_eq!(summary.functions[7].visibility, Some(Visibility::Private));
}

#[test]
fn test_javascript_classes() {
    let summary = summarize("src/app.js", SOURCE);

    assert_eq!(summary.types.len(), 1);
    assert_eq!(summary.types[0].name, "Service");
    assert_eq!(summary.types[0].kind, TypeKind::Class);
    assert_eq!(summary.types[0].visibility, Some(Visibility::Public));
}

#[test]
fn test_typescript_declarations() {
    let code = r#"
export interface User {
  name: string;
}
enum Color { Red, Green }
type Id = string;
namespace Api {}
export function main(): void {}
"#;
    let summary = summarize("src/types.ts", code);

    assert_eq!(summary.language, "typescript");
    let kinds: Vec<(&str, TypeKind)> = summary
        .types
        .iter()
        .map(|t| (t.name.as_str(), t.kind))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("User", TypeKind::Interface),
            ("Color", TypeKind::Enum),
            ("Id", TypeKind::TypeAlias),
            ("Api", TypeKind::Module),
        ]
    );
    assert!(summary.entry_points.contains(&EntryPoint::MainFunction));

    // Plain JavaScript does not report TypeScript-only declarations
    let js = summarize("src/types.js", code);
    assert!(js.types.is_empty());
}

#[test]
fn test_javascript_shebang_is_script() {
    let summary = summarize("bin/cli.js", "#!/usr/bin/env node\nconsole.log('hi');\n");

    assert!(summary.entry_points.contains(&EntryPoint::Script));
}
