//! Serialization of matcher configuration.

#![cfg(feature = "serde")]

use filters::{MatcherConfig, PatternSyntax};

#[test]
fn config_round_trips_through_json() {
    let config = MatcherConfig {
        files: vec!["a.rb".into()],
        include: vec![r"\.rbc$".into()],
        exclude: vec!["syntax: glob".into(), "*.orig".into()],
    };
    let json = serde_json::to_string(&config).unwrap();
    let restored: MatcherConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, config);
}

#[test]
fn missing_fields_default_to_empty() {
    let config: MatcherConfig = serde_json::from_str(r#"{"files": ["Rakefile"]}"#).unwrap();
    assert_eq!(config.files, ["Rakefile"]);
    assert!(config.include.is_empty());
    assert!(config.exclude.is_empty());

    let matcher = config.into_matcher().unwrap();
    assert!(matcher.matches("Rakefile").unwrap());
    assert!(!matcher.matches("lib/amp.rb").unwrap());
}

#[test]
fn syntax_names_are_lowercase() {
    assert_eq!(serde_json::to_string(&PatternSyntax::RelGlob).unwrap(), r#""relglob""#);
    let syntax: PatternSyntax = serde_json::from_str(r#""glob""#).unwrap();
    assert_eq!(syntax, PatternSyntax::Glob);
}
