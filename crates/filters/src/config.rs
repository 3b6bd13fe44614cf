//! Plain-data description of a [`PathMatcher`].

use crate::{MatcherError, PathMatcher};

/// String-level matcher configuration.
///
/// `include` and `exclude` hold pattern lines in the ignore-file dialect
/// accepted by [`PatternSet::parse_text`](crate::PatternSet::parse_text):
/// regular expressions by default, with `syntax:` lines, syntax prefixes and
/// `#` comments honoured. Missing fields deserialize as empty lists.
///
/// ```
/// use filters::MatcherConfig;
///
/// let config = MatcherConfig {
///     files: vec!["a.rb".into()],
///     include: vec![r"\.rbc$".into()],
///     exclude: vec!["syntax: glob".into(), "tmp/".into()],
/// };
/// let matcher = config.into_matcher()?;
/// assert!(matcher.matches("a.rb")?);
/// assert!(!matcher.matches("tmp/cache.rbc")?);
/// # Ok::<(), filters::MatcherError>(())
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MatcherConfig {
    /// Paths selected exactly.
    pub files: Vec<String>,
    /// Include pattern lines.
    pub include: Vec<String>,
    /// Exclude pattern lines.
    pub exclude: Vec<String>,
}

impl MatcherConfig {
    /// Returns `true` when the configuration selects nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.include.is_empty()
    }

    /// Compiles the configuration into a matcher.
    pub fn into_matcher(self) -> Result<PathMatcher, MatcherError> {
        let mut builder = PathMatcher::builder().files(self.files);
        if !self.include.is_empty() {
            builder = builder.include_text(self.include.join("\n"));
        }
        if !self.exclude.is_empty() {
            builder = builder.exclude_text(self.exclude.join("\n"));
        }
        builder.build()
    }
}

impl TryFrom<MatcherConfig> for PathMatcher {
    type Error = MatcherError;

    fn try_from(config: MatcherConfig) -> Result<Self, Self::Error> {
        config.into_matcher()
    }
}
