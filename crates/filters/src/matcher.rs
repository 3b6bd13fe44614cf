use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::{
    MatcherError, Pattern, PatternSet, PatternSyntax,
    debug_filter::{self, FilterTracer},
};

type Predicate = dyn Fn(&str) -> bool + Send + Sync;

/// Decides which paths enter a changegroup.
///
/// Three independent rule classes feed the decision: paths named exactly,
/// include patterns and exclude patterns, plus an optional predicate for
/// rules that patterns cannot express. A path is selected when it is named
/// exactly or matched approximately, and no exclude pattern matches it. A
/// path that is both named exactly and excluded is a caller mistake and is
/// reported as [`MatcherError::Conflict`].
///
/// With no include patterns and no predicate nothing is matched
/// approximately; only exact names are selected.
///
/// `PathMatcher` is immutable and cheaply clonable, and may be evaluated
/// from several threads at once.
///
/// # Examples
///
/// ```
/// use filters::{Pattern, PathMatcher};
///
/// let matcher = PathMatcher::builder()
///     .file("a.rb")
///     .include(Pattern::regex(r"\.rbc$")?)
///     .build()?;
///
/// let selected = matcher.filter_detailed(["a.rb", "b.rbc", "c.txt"])?;
/// assert_eq!(selected.len(), 2);
/// assert!(selected[0].exact);
/// assert!(!selected[1].exact);
/// # Ok::<(), filters::MatcherError>(())
/// ```
#[derive(Clone, Default)]
pub struct PathMatcher {
    inner: Arc<MatcherInner>,
}

#[derive(Default)]
struct MatcherInner {
    exact: HashSet<String>,
    include: Option<PatternSet>,
    exclude: Option<PatternSet>,
    predicate: Option<Box<Predicate>>,
}

/// A selected path and whether it was named exactly.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct MatchedPath<S> {
    /// The selected path, as supplied by the caller.
    pub path: S,
    /// `true` when the path is in the exact list.
    pub exact: bool,
}

impl PathMatcher {
    /// Starts building a matcher.
    #[must_use]
    pub fn builder() -> PathMatcherBuilder {
        PathMatcherBuilder::default()
    }

    /// Returns `true` when `path` is named exactly.
    #[must_use]
    pub fn is_exact(&self, path: &str) -> bool {
        self.inner.exact.contains(path)
    }

    /// Returns `true` when an exclude pattern matches `path`.
    #[must_use]
    pub fn is_excluded(&self, path: &str) -> bool {
        self.exclude_match(path).is_some()
    }

    /// Returns `true` when an include pattern matches `path`.
    #[must_use]
    pub fn is_included(&self, path: &str) -> bool {
        self.inner
            .include
            .as_ref()
            .is_some_and(|set| set.matches_any(path))
    }

    /// Returns `true` when `path` is matched by an include pattern or the
    /// predicate without being named exactly.
    #[must_use]
    pub fn is_approximate(&self, path: &str) -> bool {
        !self.is_exact(path) && self.approximate(path, self.is_included(path))
    }

    /// Decides whether `path` is selected.
    ///
    /// Evaluation order: exact membership, exclusion, the conflict check,
    /// then approximate matching.
    pub fn matches(&self, path: &str) -> Result<bool, MatcherError> {
        let exact = self.is_exact(path);
        let exclude_match = self.exclude_match(path);
        let excluded = exclude_match.is_some();

        if exact && excluded {
            debug_filter::trace_conflict(path, exclude_match.map(Pattern::as_str));
            return Err(MatcherError::Conflict {
                path: path.to_owned(),
            });
        }

        let included = self.is_included(path);
        let approximate = !exact && self.approximate(path, included);
        let selected = (exact || included || approximate) && !excluded;

        debug_filter::trace_path_decision(path, selected, exact);
        Ok(selected)
    }

    /// Keeps the paths that [`matches`](Self::matches) selects, in input order.
    ///
    /// The first conflicting path aborts the pass.
    pub fn filter<I, S>(&self, paths: I) -> Result<Vec<S>, MatcherError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(self
            .filter_detailed(paths)?
            .into_iter()
            .map(|matched| matched.path)
            .collect())
    }

    /// Like [`filter`](Self::filter), tagging each kept path with whether it
    /// was named exactly.
    pub fn filter_detailed<I, S>(&self, paths: I) -> Result<Vec<MatchedPath<S>>, MatcherError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tracer = FilterTracer::new();
        let mut selected = Vec::new();

        for path in paths {
            let candidate = path.as_ref();
            let keep = self.matches(candidate)?;
            let exact = keep && self.is_exact(candidate);
            tracer.record_evaluation(keep, exact);
            if keep {
                selected.push(MatchedPath { path, exact });
            }
        }

        tracer.summary();
        Ok(selected)
    }

    /// Iterates the exactly named paths in unspecified order.
    pub fn exact_files(&self) -> impl Iterator<Item = &str> + '_ {
        self.inner.exact.iter().map(String::as_str)
    }

    /// Returns the include patterns, if any were supplied.
    #[must_use]
    pub fn include_patterns(&self) -> Option<&PatternSet> {
        self.inner.include.as_ref()
    }

    /// Returns the exclude patterns, if any were supplied.
    #[must_use]
    pub fn exclude_patterns(&self) -> Option<&PatternSet> {
        self.inner.exclude.as_ref()
    }

    /// Returns `true` when a fallback predicate was supplied.
    #[must_use]
    pub fn has_predicate(&self) -> bool {
        self.inner.predicate.is_some()
    }

    fn exclude_match(&self, path: &str) -> Option<&Pattern> {
        self.inner
            .exclude
            .as_ref()
            .and_then(|set| set.first_match(path))
    }

    fn approximate(&self, path: &str, included: bool) -> bool {
        let inner = &*self.inner;
        if inner.include.is_none() && inner.predicate.is_none() {
            return false;
        }
        included || inner.predicate.as_ref().is_some_and(|predicate| predicate(path))
    }
}

impl fmt::Debug for PathMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathMatcher")
            .field("exact", &self.inner.exact)
            .field("include", &self.inner.include)
            .field("exclude", &self.inner.exclude)
            .field("predicate", &self.inner.predicate.is_some())
            .finish()
    }
}

enum PatternSource {
    Compiled(Pattern),
    Line(String),
    Text(String),
}

/// Builder for [`PathMatcher`].
///
/// Text patterns are compiled once, in order, by [`build`](Self::build).
#[derive(Default)]
pub struct PathMatcherBuilder {
    files: Vec<String>,
    include: Vec<PatternSource>,
    exclude: Vec<PatternSource>,
    predicate: Option<Box<Predicate>>,
}

impl PathMatcherBuilder {
    /// Names one path exactly.
    pub fn file(mut self, path: impl Into<String>) -> Self {
        self.files.push(path.into());
        self
    }

    /// Names several paths exactly.
    pub fn files<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Adds a compiled include pattern.
    pub fn include(mut self, pattern: Pattern) -> Self {
        self.include.push(PatternSource::Compiled(pattern));
        self
    }

    /// Adds an include pattern line, a regular expression unless prefixed
    /// with another syntax.
    pub fn include_pattern(mut self, line: impl Into<String>) -> Self {
        self.include.push(PatternSource::Line(line.into()));
        self
    }

    /// Adds include patterns in ignore-file text form.
    ///
    /// See [`PatternSet::parse_text`].
    pub fn include_text(mut self, text: impl Into<String>) -> Self {
        self.include.push(PatternSource::Text(text.into()));
        self
    }

    /// Adds a compiled exclude pattern.
    pub fn exclude(mut self, pattern: Pattern) -> Self {
        self.exclude.push(PatternSource::Compiled(pattern));
        self
    }

    /// Adds an exclude pattern line, a regular expression unless prefixed
    /// with another syntax.
    pub fn exclude_pattern(mut self, line: impl Into<String>) -> Self {
        self.exclude.push(PatternSource::Line(line.into()));
        self
    }

    /// Adds exclude patterns in ignore-file text form.
    pub fn exclude_text(mut self, text: impl Into<String>) -> Self {
        self.exclude.push(PatternSource::Text(text.into()));
        self
    }

    /// Sets the fallback predicate consulted for paths no include pattern matches.
    pub fn predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Box::new(predicate));
        self
    }

    /// Compiles the patterns and freezes the matcher.
    pub fn build(self) -> Result<PathMatcher, MatcherError> {
        let include = compile_sources(self.include, true)?;
        let exclude = compile_sources(self.exclude, false)?;
        Ok(PathMatcher {
            inner: Arc::new(MatcherInner {
                exact: self.files.into_iter().collect(),
                include,
                exclude,
                predicate: self.predicate,
            }),
        })
    }
}

impl fmt::Debug for PathMatcherBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathMatcherBuilder")
            .field("files", &self.files)
            .field("include", &self.include.len())
            .field("exclude", &self.exclude.len())
            .field("predicate", &self.predicate.is_some())
            .finish()
    }
}

/// Compiles sources in order. An empty result is reported as absent.
fn compile_sources(
    sources: Vec<PatternSource>,
    is_include: bool,
) -> Result<Option<PatternSet>, MatcherError> {
    let mut patterns = Vec::new();
    for source in sources {
        match source {
            PatternSource::Compiled(pattern) => patterns.push(pattern),
            PatternSource::Line(line) => {
                patterns.push(Pattern::parse(&line, PatternSyntax::Regexp)?);
            }
            PatternSource::Text(text) => patterns.extend(PatternSet::parse_text(&text)?),
        }
    }

    for pattern in &patterns {
        debug_filter::trace_pattern_compiled(
            pattern.as_str(),
            &pattern.syntax().to_string(),
            is_include,
        );
    }

    Ok((!patterns.is_empty()).then(|| PatternSet::new(patterns)))
}
