#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `filters` decides which repository paths belong in a changegroup. A
//! [`PathMatcher`] combines three independent rule classes: paths named
//! exactly, include patterns and exclude patterns. An optional predicate
//! covers selection rules that patterns cannot express.
//!
//! # Design
//!
//! - [`Pattern`] is one compiled pattern that remembers its [`PatternSyntax`]
//!   and source text. Regular expressions search anywhere in the path; globs
//!   are rooted, and relative globs match at any directory depth. Globs also
//!   cover everything below a matched directory.
//! - [`PatternSet`] is an ordered, any-of list of patterns. It can be parsed
//!   from ignore-file text with `#` comments and `syntax:` switches.
//! - [`PathMatcher`] is built once through [`PathMatcherBuilder`] and is then
//!   immutable; clones share the compiled patterns.
//! - [`MatcherConfig`] is the plain-data form of a matcher, serialisable with
//!   the `serde` feature.
//!
//! # Invariants
//!
//! - Evaluation order is fixed: exact membership, exclusion, the conflict
//!   check, then approximate matching.
//! - A path that is named exactly and also excluded yields
//!   [`MatcherError::Conflict`] instead of a silent decision.
//! - Exclusion always wins over approximate matching.
//! - With no include patterns and no predicate only exact names are selected.
//! - Filtering preserves input order and never reorders or duplicates paths.
//!
//! # Errors
//!
//! Building reports [`MatcherError::InvalidPattern`] for a pattern that fails
//! to compile, carrying the pattern text and the underlying [`regex::Error`]
//! or [`globset::Error`]. Evaluation only fails on a conflict.
//!
//! # Examples
//!
//! ```
//! use filters::{Pattern, PathMatcher};
//!
//! let matcher = PathMatcher::builder()
//!     .files(["lib/amp.rb", "README"])
//!     .include(Pattern::relglob("*.rbc")?)
//!     .exclude(Pattern::glob("vendor")?)
//!     .build()?;
//!
//! let paths = ["lib/amp.rb", "lib/amp.rbc", "vendor/x.rbc", "notes.txt"];
//! assert_eq!(matcher.filter(paths)?, ["lib/amp.rb", "lib/amp.rbc"]);
//! # Ok::<(), filters::MatcherError>(())
//! ```
//!
//! # See also
//!
//! - `compress` for the bundle streams the selected paths are written into.
//! - [`globset`] and [`regex`] for the matching primitives used internally.

mod config;
pub mod debug_filter;
mod error;
mod matcher;
mod pattern;

pub use config::MatcherConfig;
pub use error::{MatcherError, PatternError};
pub use matcher::{MatchedPath, PathMatcher, PathMatcherBuilder};
pub use pattern::{Pattern, PatternSet, PatternSyntax};

#[cfg(test)]
mod tests;
