use crate::extractors::{EntryPoint, TypeKind};
use crate::tests::helpers::summarize;

const SOURCE: &str = r#"require 'json'
require_relative "lib/helper"

=begin
def not_code
end
=end

module Tools
  class Runner
    def self.build
    end

    def run!
    end
  end
end

if __FILE__ == $0
  Tools::Runner.build
end
"#;

#[test]
fn test_ruby_requires_and_types() {
    let summary = summarize("tools.rb", SOURCE);

    assert_eq!(summary.import_modules(), vec!["json", "lib/helper"]);
    let kinds: Vec<(&str, TypeKind)> = summary
        .types
        .iter()
        .map(|t| (t.name.as_str(), t.kind))
        .collect();
    assert_eq!(
        kinds,
        vec![("Tools", TypeKind::Module), ("Runner", TypeKind::Class)]
    );
}

#[test]
fn test_ruby_methods_skip_embedded_docs() {
    let summary = summarize("tools.rb", SOURCE);

    assert_eq!(summary.function_names(), vec!["build", "run!"]);
    assert!(summary.functions[0].is_static);
    assert!(summary.functions.iter().all(|f| f.is_method));
}

#[test]
fn test_ruby_entry_points() {
    let summary = summarize("tools.rb", SOURCE);

    // No top-level defs, so the file is also a script
    assert!(summary.entry_points.contains(&EntryPoint::MainGuard));
    assert!(summary.entry_points.contains(&EntryPoint::Script));

    let library = summarize("lib.rb", "def helper\n  1\nend\n");
    assert!(library.entry_points.is_empty());
}
