use popgram::config::{ENUM_MEMBER, ENUM_TYPE, KEYWORD, KEYWORD_CONTROL, SourceKind, SourceSpec};
use popgram::{Grammar, GrammarConfig, GrammarError, PrecedenceOrder, generate, generate_verbose};
use regex::Regex;
use std::fs;
use std::path::Path;

fn pattern_for<'a>(grammar: &'a Grammar, name: &str) -> &'a str {
    grammar.patterns.iter().find(|r| r.name.as_deref() == Some(name)).map(|r| r.pattern.as_str()).unwrap()
}

fn position_of(grammar: &Grammar, name: &str) -> usize {
    grammar.patterns.iter().position(|r| r.name.as_deref() == Some(name)).unwrap()
}

fn fixture_config(dir: &Path) -> GrammarConfig {
    fs::write(dir.join("keyword.control.txt"), "Action\nTarget\n").unwrap();
    fs::write(dir.join("values.json"), r#"{ "Gadget": ["~Widget", "Widget", "Sprocket", "Action.Start"] }"#).unwrap();
    fs::write(dir.join("keys.json"), r#"{ "Wave": ["Target", "Where"] }"#).unwrap();
    GrammarConfig::popfile(dir)
}

#[test]
fn bundled_grammar_is_deterministic() {
    let config = GrammarConfig::default();
    let first = generate(&config).unwrap().to_json().unwrap();
    let second = generate(&config).unwrap().to_json().unwrap();
    assert_eq!(first, second);
}

#[test]
fn bundled_grammar_has_popfile_envelope() {
    let json = generate(&GrammarConfig::default()).unwrap().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["name"], "Popfile");
    assert_eq!(value["scopeName"], "source.popfile");
    assert_eq!(value["repository"], serde_json::json!({}));
    assert!(json.ends_with("}\n"));

    let fields = ["\"$schema\"", "\"name\"", "\"patterns\"", "\"repository\"", "\"scopeName\""];
    let offsets: Vec<usize> = fields.iter().map(|f| json.find(f).unwrap()).collect();
    assert!(offsets.windows(2).all(|w| w[0] < w[1]), "top-level fields out of order");
}

#[test]
fn bundled_rules_follow_precedence_order() {
    let grammar = generate(&GrammarConfig::default()).unwrap();

    let ranks: Vec<usize> =
        [KEYWORD_CONTROL, ENUM_TYPE, KEYWORD, ENUM_MEMBER].iter().map(|n| position_of(&grammar, n)).collect();
    assert_eq!(ranks, vec![4, 5, 6, 7]);
    assert_eq!(grammar.patterns.last().and_then(|r| r.name.as_deref()), Some("variable"));
    assert_eq!(pattern_for(&grammar, KEYWORD_CONTROL), r"(?i)\b(action|target)\b");
}

#[test]
fn bundled_keyword_rule_does_not_match_inside_longer_words() {
    let grammar = generate(&GrammarConfig::default()).unwrap();
    let keyword = Regex::new(pattern_for(&grammar, KEYWORD)).unwrap();

    assert!(keyword.is_match("\tTank"));
    assert!(!keyword.is_match("Tanker"));
    assert!(keyword.is_match("WaveSpawn"));
}

#[test]
fn sigil_routes_term_to_key_category() {
    let dir = tempfile::tempdir().unwrap();
    let grammar = generate(&fixture_config(dir.path())).unwrap();

    assert_eq!(pattern_for(&grammar, ENUM_TYPE), r"(?i)\b(gadget|where|widget)\b");
    assert_eq!(pattern_for(&grammar, ENUM_MEMBER), r"(?i)\b(action\.start|spawnbot|sprocket)\b");
}

#[test]
fn shared_terms_stay_with_the_higher_category() {
    let dir = tempfile::tempdir().unwrap();
    let res = generate_verbose(&fixture_config(dir.path())).unwrap();

    // "target" is claimed by keyword.control, "where" by the enum type extras.
    let keyword = res.details.categories.iter().find(|c| c.name == KEYWORD).unwrap();
    assert_eq!(keyword.candidates, 4);
    assert_eq!(keyword.kept, 2);
    assert_eq!(pattern_for(&res.grammar, KEYWORD), r"(?i)\b(itemname|wave)\b");
}

#[test]
fn fully_shadowed_category_is_omitted() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("keyword.control.txt"), "Action\nTarget\n").unwrap();
    fs::write(dir.path().join("values.json"), "{}").unwrap();
    fs::write(dir.path().join("keys.json"), r#"{ "Action": ["Target"] }"#).unwrap();

    let mut config = GrammarConfig::popfile(dir.path());
    config.extra_terms.clear();
    let res = generate_verbose(&config).unwrap();

    assert!(res.grammar.patterns.iter().all(|r| r.name.as_deref() != Some(KEYWORD)));
    assert!(res.grammar.patterns.iter().all(|r| r.name.as_deref() != Some(ENUM_TYPE)));
    let keyword = res.details.categories.iter().find(|c| c.name == KEYWORD).unwrap();
    assert!(!keyword.emitted);
    assert_eq!(keyword.shadowed, 2);
}

#[test]
fn missing_source_aborts_generation() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("keyword.control.txt"), "Action\n").unwrap();

    let err = generate(&GrammarConfig::popfile(dir.path())).unwrap_err();
    match err {
        GrammarError::Io { path, .. } => assert!(path.ends_with("values.json")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unranked_source_category_aborts_generation() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = fixture_config(dir.path());
    fs::write(dir.path().join("keyword.other.txt"), "Mystery\n").unwrap();
    config.sources.push(SourceSpec { file: "keyword.other.txt".to_string(), kind: SourceKind::List });

    let err = generate(&config).unwrap_err();
    assert!(matches!(err, GrammarError::UnlistedCategory { ref category } if category == "keyword.other"));
    assert!(err.to_string().contains("keyword.other"));
}

#[test]
fn custom_precedence_changes_ownership() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = fixture_config(dir.path());
    config.precedence = PrecedenceOrder::new([KEYWORD, KEYWORD_CONTROL, ENUM_TYPE, ENUM_MEMBER]);

    let grammar = generate(&config).unwrap();
    assert_eq!(pattern_for(&grammar, KEYWORD), r"(?i)\b(itemname|target|wave|where)\b");
    assert_eq!(pattern_for(&grammar, KEYWORD_CONTROL), r"(?i)\b(action)\b");
    assert_eq!(pattern_for(&grammar, ENUM_TYPE), r"(?i)\b(gadget|widget)\b");
    assert!(position_of(&grammar, KEYWORD) < position_of(&grammar, KEYWORD_CONTROL));
}
