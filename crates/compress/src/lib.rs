#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `compress` frames changegroup payloads. A bundle stream starts with a short
//! magic header naming its compression scheme, or with no header at all for
//! streams written before the convention existed. This crate maps those
//! headers to codecs and wraps byte sinks and sources accordingly.
//!
//! # Design
//!
//! - [`CodecToken`] is the closed table of wire headers: `""`, `HG10UN`,
//!   `HG10GZ` and `HG10BZ`.
//! - [`Codec`] is the capability behind a token. It builds a
//!   [`CompressingWriter`] over any [`std::io::Write`] sink and a
//!   [`DecompressingReader`] over any [`std::io::Read`] source.
//! - [`CompressionRegistry`] is an immutable, explicitly constructed table of
//!   token to codec. There is no process-wide registry.
//! - [`BundleStream`] opens streams against a registry, emitting headers on
//!   the write side and sniffing them on the read side. Bytes read while
//!   sniffing a header that turns out not to be one are replayed through a
//!   [`Lookahead`] decorator.
//!
//! # Invariants
//!
//! - An unrecognised header is payload, never an error. Its bytes are yielded
//!   exactly once, before the rest of the source.
//! - A recognised but unimplemented codec (`HG10BZ`) fails when the stream is
//!   opened with [`BundleError::UnsupportedCodec`]. It never yields a stream.
//! - End of stream is `Ok(0)`. Errors from the wrapped sink or source are
//!   returned unchanged and nothing is retried.
//!
//! # Examples
//!
//! ```
//! use compress::{BundleStream, CodecToken, CompressionRegistry};
//! use std::io::{Cursor, Read, Write};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let stream = BundleStream::new(CompressionRegistry::new());
//!
//! let mut writer = stream.create(CodecToken::Zlib, Vec::new())?;
//! writer.write_all(b"changegroup payload")?;
//! let bytes = writer.finish()?;
//! assert!(bytes.starts_with(b"HG10GZ"));
//!
//! let mut reader = stream.sniff(Cursor::new(bytes))?;
//! let mut payload = Vec::new();
//! reader.read_to_end(&mut payload)?;
//! assert_eq!(payload, b"changegroup payload");
//! # Ok(())
//! # }
//! ```

mod codec;
pub mod debug_bundle;
mod error;
mod lookahead;
mod reader;
mod registry;
mod stream;
mod token;
mod writer;
pub mod zlib;

pub use codec::Codec;
pub use error::BundleError;
pub use lookahead::Lookahead;
pub use reader::DecompressingReader;
pub use registry::CompressionRegistry;
pub use stream::BundleStream;
pub use token::{CodecToken, TOKEN_LEN, UnknownCodecToken};
pub use writer::CompressingWriter;
pub use zlib::{CompressionLevel, CompressionLevelError};
