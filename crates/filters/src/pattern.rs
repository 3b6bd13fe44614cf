//! Compiled path patterns and ignore-style pattern text.

use std::fmt;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use regex::Regex;

use crate::{MatcherError, PatternError, debug_filter};

/// Pattern languages understood by [`Pattern`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PatternSyntax {
    /// Regular expression searched anywhere in the path.
    #[default]
    Regexp,
    /// Glob matched against the whole path from the repository root.
    Glob,
    /// Glob matched against any trailing run of path components.
    RelGlob,
}

impl PatternSyntax {
    /// Returns the prefix that selects this syntax on a pattern line.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Regexp => "re:",
            Self::Glob => "glob:",
            Self::RelGlob => "relglob:",
        }
    }

    /// Looks up a syntax by the name used in prefixes and `syntax:` lines.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "re" | "regexp" => Some(Self::Regexp),
            "glob" => Some(Self::Glob),
            "relglob" => Some(Self::RelGlob),
            _ => None,
        }
    }

    /// Splits a recognised `name:` prefix off `line`.
    fn split_prefix(line: &str) -> Option<(Self, &str)> {
        let (name, rest) = line.split_once(':')?;
        Self::from_name(name).map(|syntax| (syntax, rest))
    }
}

impl fmt::Display for PatternSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Regexp => "regexp",
            Self::Glob => "glob",
            Self::RelGlob => "relglob",
        })
    }
}

/// A compiled path pattern that remembers its source text.
///
/// Globs match the named path and everything below it, so `glob:docs`
/// covers `docs/index.txt` as well as `docs` itself.
#[derive(Clone, Debug)]
pub struct Pattern {
    syntax: PatternSyntax,
    text: String,
    compiled: Compiled,
}

#[derive(Clone, Debug)]
enum Compiled {
    Regex(Regex),
    Glob(GlobSet),
}

impl Pattern {
    /// Compiles `text` using `syntax`.
    pub fn new(syntax: PatternSyntax, text: impl Into<String>) -> Result<Self, MatcherError> {
        let text = text.into();
        let compiled = match syntax {
            PatternSyntax::Regexp => Regex::new(&text).map(Compiled::Regex).map_err(PatternError::from),
            PatternSyntax::Glob => compile_glob(&text, false).map(Compiled::Glob),
            PatternSyntax::RelGlob => compile_glob(&text, true).map(Compiled::Glob),
        }
        .map_err(|source| MatcherError::InvalidPattern {
            syntax,
            pattern: text.clone(),
            source,
        })?;
        Ok(Self {
            syntax,
            text,
            compiled,
        })
    }

    /// Compiles a regular expression.
    pub fn regex(text: impl Into<String>) -> Result<Self, MatcherError> {
        Self::new(PatternSyntax::Regexp, text)
    }

    /// Compiles a glob anchored at the repository root.
    pub fn glob(text: impl Into<String>) -> Result<Self, MatcherError> {
        Self::new(PatternSyntax::Glob, text)
    }

    /// Compiles a glob that may match at any directory depth.
    pub fn relglob(text: impl Into<String>) -> Result<Self, MatcherError> {
        Self::new(PatternSyntax::RelGlob, text)
    }

    /// Compiles a pattern line, honouring a `re:`, `regexp:`, `glob:` or
    /// `relglob:` prefix and falling back to `default_syntax`.
    pub fn parse(line: &str, default_syntax: PatternSyntax) -> Result<Self, MatcherError> {
        match PatternSyntax::split_prefix(line) {
            Some((syntax, rest)) => Self::new(syntax, rest),
            None => Self::new(default_syntax, line),
        }
    }

    /// Returns the syntax the pattern was compiled with.
    #[must_use]
    pub const fn syntax(&self) -> PatternSyntax {
        self.syntax
    }

    /// Returns the pattern text without any syntax prefix.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns `true` when `path` matches the pattern.
    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        match &self.compiled {
            Compiled::Regex(regex) => regex.is_match(path),
            Compiled::Glob(set) => set.is_match(path),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.syntax.prefix(), self.text)
    }
}

fn compile_glob(text: &str, relative: bool) -> Result<GlobSet, PatternError> {
    let trimmed = text.trim_end_matches('/');
    if trimmed.trim_start_matches('/').is_empty() {
        return Err(PatternError::EmptyGlob);
    }
    let body = if relative {
        match trimmed.strip_prefix('/') {
            Some(anchored) => anchored.to_owned(),
            None => format!("**/{trimmed}"),
        }
    } else {
        trimmed.trim_start_matches('/').to_owned()
    };

    let mut builder = GlobSetBuilder::new();
    for expanded in [body.clone(), format!("{body}/**")] {
        builder.add(
            GlobBuilder::new(&expanded)
                .literal_separator(true)
                .backslash_escape(true)
                .build()?,
        );
    }
    Ok(builder.build()?)
}

/// An ordered list of patterns combined with any-of semantics.
///
/// Order does not change the outcome of [`matches_any`](Self::matches_any)
/// but is kept for diagnostics. An empty set matches nothing.
#[derive(Clone, Debug, Default)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    /// Collects already compiled patterns.
    #[must_use]
    pub fn new(patterns: impl IntoIterator<Item = Pattern>) -> Self {
        Self {
            patterns: patterns.into_iter().collect(),
        }
    }

    /// Compiles one pattern per item, each optionally prefixed with its syntax.
    pub fn compile<I, S>(lines: I, default_syntax: PatternSyntax) -> Result<Self, MatcherError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .map(|line| Pattern::parse(line.as_ref(), default_syntax))
            .collect::<Result<Vec<_>, _>>()
            .map(|patterns| Self { patterns })
    }

    /// Parses ignore-file style text.
    ///
    /// Each non-blank line is a pattern. `#` starts a comment unless escaped
    /// as `\#`. A `syntax: NAME` line changes the syntax of the lines that
    /// follow; the initial syntax is [`PatternSyntax::Regexp`]. Globs in pattern
    /// text, whether selected by `syntax: glob` or a `glob:` prefix, match at
    /// any depth like [`PatternSyntax::RelGlob`].
    pub fn parse_text(text: &str) -> Result<Self, MatcherError> {
        let mut syntax = PatternSyntax::Regexp;
        let mut patterns = Vec::new();

        for (index, raw) in text.lines().enumerate() {
            let line = strip_comment(raw);
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }

            if let Some(name) = line.strip_prefix("syntax:") {
                let name = name.trim();
                syntax = PatternSyntax::from_name(name)
                    .map(relative_globs)
                    .ok_or_else(|| MatcherError::UnknownSyntax {
                        name: name.to_owned(),
                        line: index + 1,
                    })?;
                continue;
            }

            let pattern = match PatternSyntax::split_prefix(line) {
                Some((explicit, rest)) => Pattern::new(relative_globs(explicit), rest)?,
                None => Pattern::new(syntax, line)?,
            };
            patterns.push(pattern);
        }

        Ok(Self { patterns })
    }

    /// Returns `true` when the set holds no patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Returns the number of patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Iterates the patterns in definition order.
    pub fn iter(&self) -> std::slice::Iter<'_, Pattern> {
        self.patterns.iter()
    }

    /// Returns `true` when any pattern matches `path`.
    #[must_use]
    pub fn matches_any(&self, path: &str) -> bool {
        self.first_match(path).is_some()
    }

    /// Returns the first pattern, in definition order, that matches `path`.
    #[must_use]
    pub fn first_match(&self, path: &str) -> Option<&Pattern> {
        self.patterns.iter().find(|pattern| {
            let matched = pattern.is_match(path);
            debug_filter::trace_pattern_evaluate(path, pattern.as_str(), matched);
            matched
        })
    }
}

impl FromIterator<Pattern> for PatternSet {
    fn from_iter<I: IntoIterator<Item = Pattern>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl IntoIterator for PatternSet {
    type Item = Pattern;
    type IntoIter = std::vec::IntoIter<Pattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.patterns.into_iter()
    }
}

impl<'a> IntoIterator for &'a PatternSet {
    type Item = &'a Pattern;
    type IntoIter = std::slice::Iter<'a, Pattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

const fn relative_globs(syntax: PatternSyntax) -> PatternSyntax {
    match syntax {
        PatternSyntax::Glob => PatternSyntax::RelGlob,
        other => other,
    }
}

fn strip_comment(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('#') => out.push('#'),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push('\\'),
            },
            '#' => break,
            other => out.push(other),
        }
    }
    out
}
