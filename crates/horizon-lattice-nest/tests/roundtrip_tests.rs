//! Parse, stringify, filter and patch across module boundaries.

use horizon_lattice_nest::prelude::*;
use serde_json::{Value, json};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// A minimal rule store: one entry per stringified block.
struct StoredRule {
    text: String,
    style: RuleTree,
}

impl RuleHandle for StoredRule {
    fn text(&self) -> &str {
        &self.text
    }

    fn style(&self) -> Option<&RuleTree> {
        Some(&self.style)
    }
}

fn store(text: &str) -> Vec<StoredRule> {
    let tree = parse(text).expect("Failed to parse").unwrap_or_default();
    tree.stringify()
        .into_iter()
        .map(|block| {
            let parsed = parse(&block).expect("Block should re-parse").unwrap_or_default();
            let style = parsed
                .iter()
                .next()
                .and_then(|(_, value)| value.as_node().cloned())
                .unwrap_or_default();
            StoredRule { text: block, style }
        })
        .collect()
}

const SOURCES: &[&str] = &[
    "width: 1rem; height: 2px;",
    ".card { &:hover { color: red; } .title { margin: { top: 0; bottom: 1rem; } } }",
    "body > div { img { width: 50%; } @media (min-width: 720px) { img { width: 20rem; } } }",
    "@import url(\"style.css\") screen; p { color: rgba(0, 0, 0, 0.5); }",
    "@keyframes slidein { from { transform: translateX(0%); } to { transform: translateY(100%); } }",
    "@page { width: 2rem; margin: { right: 3rem; } }",
    "@media print { div { } }",
    "a { b: url(//x.png); } // trailing note\n",
    "div, section { .foo, & + #id { &::before { content: 'x'; } } }",
];

#[test]
fn test_stringify_reparses_to_same_tree() {
    init_tracing();

    for source in SOURCES {
        let tree = parse(source).unwrap().unwrap();
        for indentation in [0, 2, 4] {
            let text = stringify(&tree, indentation).concat();
            let reparsed = parse(&text).unwrap();
            assert_eq!(
                reparsed.as_ref(),
                Some(&tree),
                "Round trip failed for {:?} at indentation {}",
                source,
                indentation
            );
        }
    }
}

#[test]
fn test_scheme_relative_urls_survive_round_trip() {
    let tree = parse("a { b: url(//x.png); }").unwrap().unwrap();
    assert_eq!(tree.node("a").and_then(|rule| rule.property("b")), Some("url(//x.png)"));

    let reparsed = parse(&stringify(&tree, 2).concat()).unwrap();
    assert_eq!(reparsed, Some(tree));
}

#[test]
fn test_json_string_filters_stored_rules() {
    let rules = store(SOURCES[1]);
    let hovered = filter(json!(".card:hover")).unwrap();
    assert_eq!(hovered.select_rules(&rules).count(), 1);
}

#[test]
fn test_display_matches_default_stringify() {
    let tree = parse(SOURCES[1]).unwrap().unwrap();
    assert_eq!(tree.to_string(), tree.stringify().concat());
    assert_eq!(tree.stringify(), stringify(&tree, DEFAULT_INDENTATION));
}

#[test]
fn test_one_block_per_rule() {
    let rules = store(SOURCES[1]);
    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0].text, ".card:hover {\n  color: red;\n}\n");
    assert_eq!(
        rules[1].text,
        ".card .title {\n  margin-top: 0;\n  margin-bottom: 1rem;\n}\n"
    );

    let flat = store(SOURCES[0]);
    assert_eq!(flat.len(), 1);
    assert_eq!(flat[0].text, "width: 1rem;\nheight: 2px;\n");
}

#[test]
fn test_filter_stored_rules_by_text() {
    init_tracing();

    let rules = store(SOURCES[1]);
    let hovered = filter(".card:hover").unwrap();
    let selected: Vec<&str> = hovered.select_rules(&rules).map(|r| r.text()).collect();
    assert_eq!(selected, [rules[0].text.as_str()]);
}

#[test]
fn test_filter_stored_rules_by_style() {
    let rules = store(SOURCES[1]);

    let by_style = filter("{ margin-top: 0 }").unwrap();
    assert!(!by_style.matches_rule(&rules[0]));
    assert!(by_style.matches_rule(&rules[1]));

    let lenient = FilterEngine::new(FilterConfig::default().result_if_no_target(true))
        .compile("{ margin-top: 0 }")
        .unwrap();
    assert!(lenient.matches_rule(&rules[0]));
}

#[test]
fn test_filter_config_from_json() {
    let config: FilterConfig =
        serde_json::from_value(json!({ "stringToRegex": false })).unwrap();
    let engine = FilterEngine::new(config);

    let exact = engine.compile(json!({ "style": { "color": "red" } })).unwrap();
    let rules = store("a { color: red; } b { color: darkred; }");
    assert_eq!(exact.select_rules(&rules).count(), 1);

    let loose = filter(json!({ "style": { "color": "red" } })).unwrap();
    assert_eq!(loose.select_rules(&rules).count(), 2);
}

#[test]
fn test_custom_predicate() {
    let rules = store(SOURCES[2]);
    let at_rules = filter(MatcherSpec::function(|target: &Value| {
        target["text"].as_str().is_some_and(|text| text.starts_with('@'))
    }))
    .unwrap();
    assert_eq!(at_rules.select_rules(&rules).count(), 1);
}

#[test]
fn test_patch_rule_value_and_restore() {
    init_tracing();

    let rules = store(SOURCES[1]);
    let mut target = rules[1].to_value();
    let original = target.clone();

    let setter = create_setter(json!({ "style": { "margin-top": "2rem", "color": "red" } }), "change")
        .unwrap();
    let patch = setter.apply(&mut target).unwrap();
    assert_eq!(target["style"]["margin-top"], json!("2rem"));
    assert!(target["style"].get("color").is_none());

    setter.restore(&mut target, &patch).unwrap();
    assert_eq!(target, original);
}

#[test]
fn test_errors_are_classified() {
    assert!(parse("body { width: 1px; } }").unwrap_err().is_syntax());
    assert!(parse("p:unknown { color: red; }").unwrap_err().is_syntax());
    assert!(filter("").unwrap_err().is_syntax());
    assert!(create_setter(json!([]), "both").unwrap_err().is_type());
    assert!(create_setter(json!({ "x": 1 }), "sometimes").unwrap_err().is_type());
}
