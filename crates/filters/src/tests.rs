use super::*;

fn rb_matcher() -> PathMatcher {
    PathMatcher::builder()
        .file("a.rb")
        .include(Pattern::regex(r"\.rbc$").expect("regex"))
        .build()
        .expect("matcher")
}

#[test]
fn empty_matcher_selects_nothing() {
    let matcher = PathMatcher::builder().build().expect("empty matcher");
    for path in ["", "a.rb", "lib/amp.rb", "."] {
        assert!(!matcher.matches(path).expect("no conflict"), "{path}");
    }
    assert!(matcher.include_patterns().is_none());
    assert!(matcher.exclude_patterns().is_none());
    assert!(!matcher.has_predicate());
}

#[test]
fn default_matcher_is_empty() {
    let matcher = PathMatcher::default();
    assert!(!matcher.matches("a.rb").expect("no conflict"));
    assert_eq!(matcher.exact_files().count(), 0);
}

#[test]
fn exact_name_is_selected() {
    let matcher = rb_matcher();
    assert!(matcher.is_exact("a.rb"));
    assert!(!matcher.is_approximate("a.rb"));
    assert!(matcher.matches("a.rb").expect("no conflict"));
}

#[test]
fn include_pattern_selects_approximately() {
    let matcher = rb_matcher();
    assert!(matcher.is_included("b.rbc"));
    assert!(matcher.is_approximate("b.rbc"));
    assert!(matcher.matches("b.rbc").expect("no conflict"));
    assert!(!matcher.matches("c.txt").expect("no conflict"));
}

#[test]
fn exact_name_matching_include_is_not_approximate() {
    let matcher = PathMatcher::builder()
        .file("x.rbc")
        .include_pattern(r"\.rbc$")
        .build()
        .expect("matcher");
    assert!(matcher.is_included("x.rbc"));
    assert!(!matcher.is_approximate("x.rbc"));
    assert!(matcher.matches("x.rbc").expect("no conflict"));
}

#[test]
fn exact_and_excluded_conflict() {
    let matcher = PathMatcher::builder()
        .file("a.rb")
        .exclude_pattern("a.rb")
        .build()
        .expect("matcher");
    let err = matcher.matches("a.rb").expect_err("conflict");
    assert_eq!(err.conflict_path(), Some("a.rb"));
}

#[test]
fn exclusion_beats_include() {
    let matcher = PathMatcher::builder()
        .include_pattern(r"\.rbc$")
        .exclude_pattern("^vendor/")
        .build()
        .expect("matcher");
    assert!(matcher.is_excluded("vendor/x.rbc"));
    assert!(!matcher.matches("vendor/x.rbc").expect("no conflict"));
    assert!(matcher.matches("lib/x.rbc").expect("no conflict"));
}

#[test]
fn exclusion_alone_selects_nothing() {
    let matcher = PathMatcher::builder()
        .exclude_pattern("^tmp/")
        .build()
        .expect("matcher");
    assert!(!matcher.matches("lib/amp.rb").expect("no conflict"));
    assert!(!matcher.matches("tmp/x").expect("no conflict"));
}

#[test]
fn predicate_selects_without_includes() {
    let matcher = PathMatcher::builder()
        .predicate(|path| path.starts_with("lib/"))
        .build()
        .expect("matcher");
    assert!(matcher.has_predicate());
    assert!(!matcher.is_included("lib/amp.rb"));
    assert!(matcher.is_approximate("lib/amp.rb"));
    assert!(matcher.matches("lib/amp.rb").expect("no conflict"));
    assert!(!matcher.matches("test/amp.rb").expect("no conflict"));
}

#[test]
fn predicate_is_subject_to_exclusion() {
    let matcher = PathMatcher::builder()
        .predicate(|_| true)
        .exclude(Pattern::relglob("*.o").expect("relglob"))
        .build()
        .expect("matcher");
    assert!(matcher.matches("src/main.c").expect("no conflict"));
    assert!(!matcher.matches("build/main.o").expect("no conflict"));
}

#[test]
fn filter_preserves_order_and_drops_misses() {
    let matcher = rb_matcher();
    let kept = matcher
        .filter(vec!["c.txt", "b.rbc", "a.rb", "d.rbc"])
        .expect("no conflict");
    assert_eq!(kept, ["b.rbc", "a.rb", "d.rbc"]);
}

#[test]
fn filter_accepts_owned_strings() {
    let matcher = rb_matcher();
    let paths = vec![String::from("a.rb"), String::from("z.py")];
    assert_eq!(matcher.filter(paths).expect("no conflict"), ["a.rb"]);
}

#[test]
fn filter_detailed_tags_exact_paths() {
    let detailed = rb_matcher()
        .filter_detailed(["a.rb", "b.rbc", "c.txt"])
        .expect("no conflict");
    assert_eq!(
        detailed,
        [
            MatchedPath {
                path: "a.rb",
                exact: true
            },
            MatchedPath {
                path: "b.rbc",
                exact: false
            },
        ]
    );
}

#[test]
fn filter_stops_at_first_conflict() {
    let matcher = PathMatcher::builder()
        .files(["a.rb", "b.rb"])
        .exclude_pattern(r"\.rb$")
        .build()
        .expect("matcher");
    let err = matcher.filter(["x.txt", "b.rb", "a.rb"]).expect_err("conflict");
    assert_eq!(err.conflict_path(), Some("b.rb"));
}

#[test]
fn invalid_pattern_fails_build() {
    let err = PathMatcher::builder()
        .include_pattern("(")
        .build()
        .expect_err("invalid regex");
    assert_eq!(err.pattern(), Some("("));
}

#[test]
fn include_text_uses_ignore_dialect() {
    let matcher = PathMatcher::builder()
        .include_text("# compiled ruby\n\\.rbc$\nsyntax: glob\n*.so\n")
        .build()
        .expect("matcher");
    assert_eq!(matcher.include_patterns().map(PatternSet::len), Some(2));
    assert!(matcher.matches("ext/native.so").expect("no conflict"));
    assert!(matcher.matches("lib/a.rbc").expect("no conflict"));
}

#[test]
fn blank_include_text_counts_as_absent() {
    let matcher = PathMatcher::builder()
        .include_text("# nothing here\n")
        .build()
        .expect("matcher");
    assert!(matcher.include_patterns().is_none());
    assert!(!matcher.matches("anything").expect("no conflict"));
}

#[test]
fn clones_share_compiled_state() {
    let matcher = rb_matcher();
    let clone = matcher.clone();
    assert!(clone.matches("b.rbc").expect("no conflict"));
    assert_eq!(format!("{matcher:?}"), format!("{clone:?}"));
}

#[test]
fn matcher_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PathMatcher>();
}

#[test]
fn config_builds_equivalent_matcher() {
    let matcher = MatcherConfig {
        files: vec!["a.rb".into()],
        include: vec![r"\.rbc$".into()],
        exclude: Vec::new(),
    }
    .into_matcher()
    .expect("matcher");
    assert_eq!(
        matcher.filter(["a.rb", "b.rbc", "c.txt"]).expect("no conflict"),
        ["a.rb", "b.rbc"]
    );
}

#[test]
fn empty_config_selects_nothing() {
    let config = MatcherConfig::default();
    assert!(config.is_empty());
    let matcher = PathMatcher::try_from(config).expect("matcher");
    assert!(!matcher.matches("a.rb").expect("no conflict"));
}
