use crate::PatternSyntax;

/// Errors produced while building or evaluating a [`PathMatcher`](crate::PathMatcher).
#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    /// A path is named explicitly and also matches an exclude pattern.
    #[error("file {path:?} is to be both included and excluded")]
    Conflict {
        /// The conflicting path.
        path: String,
    },
    /// A pattern could not be compiled.
    #[error("failed to compile {syntax} pattern '{pattern}': {source}")]
    InvalidPattern {
        /// Syntax the pattern was compiled with.
        syntax: PatternSyntax,
        /// The offending pattern text, without any syntax prefix.
        pattern: String,
        /// Underlying compiler error.
        #[source]
        source: PatternError,
    },
    /// A `syntax:` line in pattern text named an unknown syntax.
    #[error("unknown pattern syntax '{name}' on line {line}")]
    UnknownSyntax {
        /// The syntax name as written.
        name: String,
        /// One-based line number within the text.
        line: usize,
    },
}

impl MatcherError {
    /// Returns the conflicting path for [`MatcherError::Conflict`].
    #[must_use]
    pub fn conflict_path(&self) -> Option<&str> {
        match self {
            Self::Conflict { path } => Some(path),
            _ => None,
        }
    }

    /// Returns the offending pattern for [`MatcherError::InvalidPattern`].
    #[must_use]
    pub fn pattern(&self) -> Option<&str> {
        match self {
            Self::InvalidPattern { pattern, .. } => Some(pattern),
            _ => None,
        }
    }
}

/// Compiler error behind [`MatcherError::InvalidPattern`].
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    /// Regular-expression syntax error.
    #[error(transparent)]
    Regex(#[from] regex::Error),
    /// Glob syntax error.
    #[error(transparent)]
    Glob(#[from] globset::Error),
    /// A glob with nothing but separators, which would otherwise match
    /// every path at any depth.
    #[error("glob is empty")]
    EmptyGlob,
}
