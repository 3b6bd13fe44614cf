//! Integration tests for changegroup path selection.
//!
//! Covers the decision order of [`PathMatcher`], the three pattern syntaxes,
//! ignore-style pattern text and the order and idempotence guarantees of
//! filtering.

use filters::{
    MatchedPath, MatcherConfig, MatcherError, PathMatcher, Pattern, PatternError, PatternSyntax,
};
use proptest::prelude::*;

// ============================================================================
// Decision order
// ============================================================================

#[test]
fn conflict_is_reported_for_exact_and_excluded_path() {
    let matcher = PathMatcher::builder()
        .file("a.rb")
        .exclude(Pattern::regex(r"a\.rb").unwrap())
        .build()
        .unwrap();

    let err = matcher.matches("a.rb").unwrap_err();
    assert!(matches!(err, MatcherError::Conflict { ref path } if path == "a.rb"));
    assert!(err.to_string().contains("both included and excluded"));
}

#[test]
fn conflict_wins_even_when_include_also_matches() {
    let matcher = PathMatcher::builder()
        .file("lib/a.rb")
        .include_pattern(r"\.rb$")
        .exclude_pattern("^lib/")
        .build()
        .unwrap();
    assert!(matcher.matches("lib/a.rb").is_err());
    assert!(!matcher.matches("lib/b.rb").unwrap());
}

#[test]
fn excluded_non_exact_path_is_not_a_conflict() {
    let matcher = PathMatcher::builder()
        .file("a.rb")
        .exclude_pattern(r"\.tmp$")
        .build()
        .unwrap();
    assert!(!matcher.matches("scratch.tmp").unwrap());
    assert!(matcher.matches("a.rb").unwrap());
}

#[test]
fn exact_only_matcher_ignores_everything_else() {
    let matcher = PathMatcher::builder()
        .files(["a.rb", "lib/b.rb"])
        .build()
        .unwrap();
    assert!(matcher.matches("a.rb").unwrap());
    assert!(matcher.matches("lib/b.rb").unwrap());
    assert!(!matcher.matches("lib/a.rb").unwrap());
    assert!(!matcher.matches("b.rb").unwrap());
}

#[test]
fn rbc_suffix_include() {
    let matcher = PathMatcher::builder()
        .include(Pattern::regex(r"\.rbc$").unwrap())
        .build()
        .unwrap();
    assert!(matcher.matches("foo.rbc").unwrap());
    assert!(matcher.matches("deep/dir/foo.rbc").unwrap());
    assert!(!matcher.matches("foo.rb").unwrap());
    assert!(!matcher.matches("foo.rbc.orig").unwrap());
}

// ============================================================================
// Pattern syntaxes
// ============================================================================

#[test]
fn rooted_glob_does_not_match_below_other_directories() {
    let matcher = PathMatcher::builder()
        .include(Pattern::glob("lib/**/*.rb").unwrap())
        .build()
        .unwrap();
    assert!(matcher.matches("lib/amp.rb").unwrap());
    assert!(matcher.matches("lib/amp/repo/local.rb").unwrap());
    assert!(!matcher.matches("test/lib/amp.rb").unwrap());
}

#[test]
fn glob_star_does_not_cross_separators() {
    let pattern = Pattern::glob("*.rb").unwrap();
    assert!(pattern.is_match("amp.rb"));
    assert!(!pattern.is_match("lib/amp.rb"));
}

#[test]
fn glob_directory_selects_contents() {
    let matcher = PathMatcher::builder()
        .include(Pattern::glob("doc").unwrap())
        .build()
        .unwrap();
    assert!(matcher.matches("doc/index.html").unwrap());
    assert!(!matcher.matches("docs/index.html").unwrap());
}

#[test]
fn relglob_exclude_applies_at_any_depth() {
    let matcher = PathMatcher::builder()
        .include_pattern(".")
        .exclude(Pattern::relglob("*.orig").unwrap())
        .build()
        .unwrap();
    assert!(!matcher.matches("a.orig").unwrap());
    assert!(!matcher.matches("lib/amp/a.orig").unwrap());
    assert!(matcher.matches("lib/amp/a.rb").unwrap());
}

#[test]
fn prefixed_pattern_lines_pick_their_syntax() {
    let matcher = PathMatcher::builder()
        .include_pattern("glob:bin/*")
        .include_pattern("relglob:*.gemspec")
        .include_pattern(r"re:^README")
        .build()
        .unwrap();
    let syntaxes: Vec<_> = matcher
        .include_patterns()
        .unwrap()
        .iter()
        .map(Pattern::syntax)
        .collect();
    assert_eq!(
        syntaxes,
        [PatternSyntax::Glob, PatternSyntax::RelGlob, PatternSyntax::Regexp]
    );
    assert!(matcher.matches("bin/amp").unwrap());
    assert!(matcher.matches("pkg/amp.gemspec").unwrap());
    assert!(matcher.matches("README.md").unwrap());
    assert!(!matcher.matches("lib/README").unwrap());
}

#[test]
fn ignore_text_drives_exclusion() {
    let ignore = "\
# editor droppings
syntax: glob
*.swp
*~
.DS_Store

syntax: regexp
^coverage/
";
    let matcher = PathMatcher::builder()
        .include_pattern(".")
        .exclude_text(ignore)
        .build()
        .unwrap();
    let paths = [
        "lib/amp.rb",
        "lib/.amp.rb.swp",
        "Rakefile~",
        "ext/.DS_Store",
        "coverage/index.html",
        "spec/coverage/x",
    ];
    assert_eq!(matcher.filter(paths).unwrap(), ["lib/amp.rb", "spec/coverage/x"]);
}

#[test]
fn unknown_syntax_line_fails_build() {
    let err = PathMatcher::builder()
        .exclude_text("syntax: path\nfoo\n")
        .build()
        .unwrap_err();
    assert!(matches!(err, MatcherError::UnknownSyntax { line: 1, .. }));
}

#[test]
fn empty_glob_exclude_fails_build_instead_of_excluding_everything() {
    for text in ["glob:", "relglob:", "syntax: glob\n/\n"] {
        let err = PathMatcher::builder()
            .file("a.rb")
            .exclude_text(text)
            .build()
            .unwrap_err();
        assert!(
            matches!(err, MatcherError::InvalidPattern { source: PatternError::EmptyGlob, .. }),
            "{text:?}"
        );
    }
}

#[test]
fn include_and_exclude_text_compile_into_one_matcher() {
    let matcher = PathMatcher::builder()
        .file("a.rb")
        .include_text("syntax: glob\n*.rbc\n")
        .exclude_text("^tmp/\n")
        .build()
        .unwrap();
    assert_eq!(
        matcher.filter(["a.rb", "lib/b.rbc", "tmp/c.rbc", "d.txt"]).unwrap(),
        ["a.rb", "lib/b.rbc"]
    );
}

// ============================================================================
// Filtering
// ============================================================================

#[test]
fn filter_detailed_matches_documented_example() {
    let matcher = PathMatcher::builder()
        .file("a.rb")
        .include(Pattern::regex(r"\.rbc$").unwrap())
        .build()
        .unwrap();

    let detailed = matcher.filter_detailed(["a.rb", "b.rbc", "c.txt"]).unwrap();
    assert_eq!(
        detailed,
        vec![
            MatchedPath { path: "a.rb", exact: true },
            MatchedPath { path: "b.rbc", exact: false },
        ]
    );
}

#[test]
fn empty_input_filters_to_empty_output() {
    let matcher = PathMatcher::builder().include_pattern(".").build().unwrap();
    assert!(matcher.filter(Vec::<String>::new()).unwrap().is_empty());
}

#[test]
fn matcher_is_usable_across_threads() {
    let matcher = PathMatcher::builder()
        .include(Pattern::relglob("*.rb").unwrap())
        .build()
        .unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|n| {
                let matcher = matcher.clone();
                scope.spawn(move || matcher.matches(&format!("lib/f{n}.rb")).unwrap())
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    });
}

#[test]
fn config_lines_behave_like_builder_text() {
    let config = MatcherConfig {
        files: vec!["Rakefile".into()],
        include: vec!["syntax: glob".into(), "lib/".into()],
        exclude: vec![r"\.orig$".into()],
    };
    let matcher = config.into_matcher().unwrap();
    assert!(matcher.matches("Rakefile").unwrap());
    assert!(matcher.matches("src/lib/x.rb").unwrap());
    assert!(!matcher.matches("lib/x.rb.orig").unwrap());
    assert!(!matcher.matches("test/x.rb").unwrap());
}

// ============================================================================
// Properties
// ============================================================================

fn path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-c]{1,3}", 1..4).prop_map(|parts| {
        let mut path = parts.join("/");
        path.push_str(".rb");
        path
    })
}

fn sample_matcher() -> PathMatcher {
    PathMatcher::builder()
        .files(["a.rb", "b/c.rb"])
        .include(Pattern::relglob("b*.rb").unwrap())
        .exclude(Pattern::glob("c").unwrap())
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn filtering_is_idempotent(paths in prop::collection::vec(path_strategy(), 0..32)) {
        let matcher = sample_matcher();
        let once = matcher.filter(paths.clone()).unwrap();
        let twice = matcher.filter(once.clone()).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn filter_output_is_an_ordered_subsequence(paths in prop::collection::vec(path_strategy(), 0..32)) {
        let matcher = sample_matcher();
        let kept = matcher.filter(paths.clone()).unwrap();
        let mut remaining = paths.iter();
        for path in &kept {
            prop_assert!(remaining.any(|candidate| candidate == path));
        }
        for path in &paths {
            prop_assert_eq!(kept.contains(path), matcher.matches(path).unwrap());
        }
    }

    #[test]
    fn empty_matcher_never_matches(path in "\\PC{0,40}") {
        let matcher = PathMatcher::builder().build().unwrap();
        prop_assert!(!matcher.matches(&path).unwrap());
    }
}
