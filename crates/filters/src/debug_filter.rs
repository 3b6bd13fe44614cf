//! Structured tracing for pattern compilation and path decisions.
//!
//! All tracing is conditionally compiled behind the `tracing` feature flag
//! and produces no-op inline functions when disabled.
//!
//! # Examples
//!
//! ```
//! use filters::debug_filter::FilterTracer;
//!
//! let mut tracer = FilterTracer::new();
//! tracer.record_evaluation(true, true);
//! tracer.record_evaluation(true, false);
//! tracer.record_evaluation(false, false);
//! tracer.summary();
//!
//! assert_eq!(tracer.total_evaluated(), 3);
//! assert_eq!(tracer.total_exact(), 1);
//! ```

/// Target name for tracing events emitted by this crate.
#[cfg(feature = "tracing")]
const FILTER_TARGET: &str = "changegroup::filter";

// ============================================================================
// Tracing functions (feature-gated)
// ============================================================================

/// Traces a pattern compiled into a matcher.
///
/// * `pattern` - The pattern text without its syntax prefix
/// * `syntax` - Name of the syntax it was compiled with
/// * `is_include` - Whether it belongs to the include (true) or exclude list
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_pattern_compiled(pattern: &str, syntax: &str, is_include: bool) {
    tracing::debug!(
        target: FILTER_TARGET,
        pattern = %pattern,
        syntax = syntax,
        is_include = is_include,
        "pattern_compiled"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_pattern_compiled(_pattern: &str, _syntax: &str, _is_include: bool) {}

/// Traces evaluation of a path against a single pattern.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_pattern_evaluate(path: &str, pattern: &str, matched: bool) {
    tracing::trace!(
        target: FILTER_TARGET,
        path = %path,
        pattern = %pattern,
        matched = matched,
        "pattern_evaluate"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_pattern_evaluate(_path: &str, _pattern: &str, _matched: bool) {}

/// Traces the final decision for a path.
///
/// * `path` - The path that was evaluated
/// * `included` - Whether the path was selected
/// * `exact` - Whether it was named explicitly
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_path_decision(path: &str, included: bool, exact: bool) {
    tracing::debug!(
        target: FILTER_TARGET,
        path = %path,
        included = included,
        exact = exact,
        "path_decision"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_path_decision(_path: &str, _included: bool, _exact: bool) {}

/// Traces a path that is both named explicitly and excluded.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_conflict(path: &str, exclude_pattern: Option<&str>) {
    tracing::warn!(
        target: FILTER_TARGET,
        path = %path,
        exclude_pattern = ?exclude_pattern,
        "include_exclude_conflict"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_conflict(_path: &str, _exclude_pattern: Option<&str>) {}

/// Traces summary statistics for a filtering pass.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_filter_summary(total_evaluated: usize, total_included: usize, total_exact: usize) {
    tracing::info!(
        target: FILTER_TARGET,
        total_evaluated = total_evaluated,
        total_included = total_included,
        total_exact = total_exact,
        "filter_summary"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_filter_summary(_total_evaluated: usize, _total_included: usize, _total_exact: usize) {}

// ============================================================================
// FilterTracer - per-pass statistics
// ============================================================================

/// Aggregates statistics across one filtering pass.
#[derive(Debug, Clone, Default)]
pub struct FilterTracer {
    total_evaluated: usize,
    total_included: usize,
    total_exact: usize,
}

impl FilterTracer {
    /// Creates a tracer with zero counts.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            total_evaluated: 0,
            total_included: 0,
            total_exact: 0,
        }
    }

    /// Records one path decision.
    pub fn record_evaluation(&mut self, included: bool, exact: bool) {
        self.total_evaluated += 1;
        if included {
            self.total_included += 1;
            if exact {
                self.total_exact += 1;
            }
        }
    }

    /// Emits a summary trace event with the accumulated counts.
    pub fn summary(&self) {
        trace_filter_summary(self.total_evaluated, self.total_included, self.total_exact);
    }

    /// Returns the number of paths evaluated.
    #[must_use]
    pub const fn total_evaluated(&self) -> usize {
        self.total_evaluated
    }

    /// Returns the number of paths selected.
    #[must_use]
    pub const fn total_included(&self) -> usize {
        self.total_included
    }

    /// Returns the number of selected paths that were named explicitly.
    #[must_use]
    pub const fn total_exact(&self) -> usize {
        self.total_exact
    }

    /// Returns the number of paths dropped.
    #[must_use]
    pub const fn total_excluded(&self) -> usize {
        self.total_evaluated - self.total_included
    }
}
