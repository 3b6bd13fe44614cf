//! Structured tracing for bundle stream setup and teardown.
//!
//! Every function compiles to an inline no-op unless the `tracing` feature is
//! enabled, so call sites stay unconditional.

use crate::{Codec, CodecToken};

/// Target name for tracing events emitted by this crate.
#[cfg(feature = "tracing")]
const BUNDLE_TARGET: &str = "changegroup::bundle";

/// Traces a header that resolved to a registered codec.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_codec_resolved(token: CodecToken, writing: bool) {
    tracing::debug!(
        target: BUNDLE_TARGET,
        token = %token,
        writing = writing,
        "codec_resolved"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_codec_resolved(_token: CodecToken, _writing: bool) {}

/// Traces candidate header bytes that were reinterpreted as payload.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_header_pushback(candidate: &[u8]) {
    tracing::debug!(
        target: BUNDLE_TARGET,
        candidate = %String::from_utf8_lossy(candidate).escape_debug(),
        len = candidate.len(),
        "header_pushback"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_header_pushback(_candidate: &[u8]) {}

/// Traces the framing detected at the start of a deflate payload.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_deflate_framing(framing: &str) {
    tracing::trace!(
        target: BUNDLE_TARGET,
        framing = framing,
        "deflate_framing"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_deflate_framing(_framing: &str) {}

/// Traces a request for a codec that cannot produce a stream.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_codec_rejected(token: CodecToken, reason: &str) {
    tracing::warn!(
        target: BUNDLE_TARGET,
        token = %token,
        reason = reason,
        "codec_rejected"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_codec_rejected(_token: CodecToken, _reason: &str) {}

/// Traces a writer that was finished cleanly.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_stream_finished(codec: Codec, bytes_in: u64) {
    tracing::debug!(
        target: BUNDLE_TARGET,
        codec = %codec,
        bytes_in = bytes_in,
        "stream_finished"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_stream_finished(_codec: Codec, _bytes_in: u64) {}
