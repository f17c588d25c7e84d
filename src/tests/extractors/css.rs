use crate::extractors::css::classify_selector;
use crate::extractors::{SelectorType, SummaryDetails};
use crate::tests::helpers::summarize;

fn stylesheet(code: &str) -> crate::extractors::StylesheetDetails {
    match summarize("site.css", code).details {
        Some(SummaryDetails::Stylesheet(details)) => details,
        other => panic!("expected stylesheet details, got {:?}", other),
    }
}

#[test]
fn test_css_class_and_id_selectors() {
    let details = stylesheet(".foo, #bar { color: red; }");

    let selectors: Vec<(&str, SelectorType)> = details
        .selectors
        .iter()
        .map(|s| (s.selector.as_str(), s.selector_type))
        .collect();
    assert_eq!(
        selectors,
        vec![(".foo", SelectorType::Class), ("#bar", SelectorType::Id)]
    );
    assert_eq!(details.rules.len(), 1);
    assert_eq!(details.rules[0].property, "color");
    assert_eq!(details.rules[0].value, "red");
}

#[test]
fn test_css_nested_media_and_imports() {
    let code = r#"@import url("base.css");
/* .ignored { color: blue; } */
@media (max-width: 600px) {
  nav > a, div   p { display: none; }
}
h1 { margin: 0 }
"#;
    let summary = summarize("site.css", code);
    assert_eq!(summary.import_modules(), vec!["base.css"]);

    let details = stylesheet(code);
    let selectors: Vec<(&str, SelectorType)> = details
        .selectors
        .iter()
        .map(|s| (s.selector.as_str(), s.selector_type))
        .collect();
    assert_eq!(
        selectors,
        vec![
            ("nav > a", SelectorType::Compound),
            ("div p", SelectorType::Compound),
            ("h1", SelectorType::Element),
        ]
    );
    assert_eq!(details.at_rules.len(), 2);
    assert!(details.at_rules[1].starts_with("@media"));

    let properties: Vec<&str> = details.rules.iter().map(|r| r.property.as_str()).collect();
    assert_eq!(properties, vec!["display", "margin"]);
}

#[test]
fn test_classify_selector() {
    assert_eq!(classify_selector(".btn"), SelectorType::Class);
    assert_eq!(classify_selector("#main"), SelectorType::Id);
    assert_eq!(classify_selector("@font-face"), SelectorType::AtRule);
    assert_eq!(classify_selector("ul li"), SelectorType::Compound);
    assert_eq!(classify_selector("a+b"), SelectorType::Compound);
    assert_eq!(classify_selector("body"), SelectorType::Element);
}
