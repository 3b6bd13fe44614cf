#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! # Overview
//!
//! `changegroup` bundles the pieces a version-control engine needs to move a
//! group of changes between repositories: compressed bundle streams with
//! self-describing headers, and a path matcher that decides which files
//! belong in the group.
//!
//! - [`compress`] maps bundle headers to codecs and frames streams.
//! - [`filters`] selects paths by exact name, include and exclude patterns.
//! - [`hooks`] defines the notification points fired around changegroup
//!   construction.
//!
//! # Examples
//!
//! ```
//! use changegroup::{BundleStream, CodecToken, CompressionRegistry, PathMatcher};
//! use std::io::Write;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let matcher = PathMatcher::builder()
//!     .file("lib/amp.rb")
//!     .include_pattern(r"\.rbc$")
//!     .build()?;
//! let selected = matcher.filter(["lib/amp.rb", "lib/amp.rbc", "README"])?;
//!
//! let stream = BundleStream::new(CompressionRegistry::new());
//! let mut writer = stream.create(CodecToken::Zlib, Vec::new())?;
//! writer.write_all(selected.join("\n").as_bytes())?;
//! let bundle = writer.finish()?;
//! assert!(bundle.starts_with(b"HG10GZ"));
//! # Ok(())
//! # }
//! ```

pub use compress;
pub use filters;

pub use compress::{
    BundleError, BundleStream, Codec, CodecToken, CompressingWriter, CompressionLevel,
    CompressionRegistry, DecompressingReader, TOKEN_LEN,
};
pub use filters::{
    MatchedPath, MatcherConfig, MatcherError, PathMatcher, PathMatcherBuilder, Pattern,
    PatternSet, PatternSyntax,
};

pub mod hooks;

pub use hooks::{HookArgs, HookError, HookEvent, HookRegistry, HookSink};

/// Subscriber bootstrap, available with the `tracing` feature.
#[cfg(feature = "tracing")]
#[cfg_attr(docsrs, doc(cfg(feature = "tracing")))]
pub mod logging;

#[cfg(feature = "tracing")]
pub use logging::{TracingInitError, init_tracing};
