//! Codec capability pairs selected by a [`CodecToken`](crate::CodecToken).

use core::fmt;
use std::io::{Read, Write};

use crate::{
    BundleError, CodecToken, CompressingWriter, DecompressingReader, debug_bundle,
    zlib::CompressionLevel,
};

/// Compression schemes that can back a codec token.
///
/// Each variant produces a compressing writer over any sink and a
/// decompressing reader over any source. Codecs carry no state of their own
/// beyond their settings.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Codec {
    /// Bytes pass through untouched.
    Identity,
    /// zlib-framed deflate at the given level.
    Zlib(CompressionLevel),
    /// Block compression. Registered for the `HG10BZ` token but not implemented;
    /// every stream request fails with [`BundleError::UnsupportedCodec`].
    Bzip2,
}

impl Codec {
    /// Returns the canonical display name used for diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Zlib(_) => "zlib",
            Self::Bzip2 => "bzip2",
        }
    }

    /// Returns `true` when the codec can produce streams in this build.
    #[must_use]
    pub const fn is_supported(self) -> bool {
        !matches!(self, Self::Bzip2)
    }

    /// Returns the token this codec backs in the standard table.
    #[must_use]
    pub const fn standard_token(self) -> CodecToken {
        match self {
            Self::Identity => CodecToken::Uncompressed,
            Self::Zlib(_) => CodecToken::Zlib,
            Self::Bzip2 => CodecToken::Bzip2,
        }
    }

    /// Builds a writer that encodes everything written to it into `sink`.
    ///
    /// Failures name [`standard_token`](Self::standard_token).
    pub fn make_writer<W: Write>(self, sink: W) -> Result<CompressingWriter<W>, BundleError> {
        self.writer_for(self.standard_token(), sink)
    }

    /// Builds a reader that decodes the bytes of `source`.
    ///
    /// Failures name [`standard_token`](Self::standard_token).
    pub fn make_reader<R: Read>(self, source: R) -> Result<DecompressingReader<R>, BundleError> {
        self.reader_for(self.standard_token(), source)
    }

    /// Like [`make_writer`](Self::make_writer), reporting failures against `token`.
    pub(crate) fn writer_for<W: Write>(
        self,
        token: CodecToken,
        sink: W,
    ) -> Result<CompressingWriter<W>, BundleError> {
        match self {
            Self::Identity => Ok(CompressingWriter::plain(sink)),
            Self::Zlib(level) => Ok(CompressingWriter::zlib(sink, level)),
            Self::Bzip2 => Err(unsupported(token)),
        }
    }

    /// Like [`make_reader`](Self::make_reader), reporting failures against `token`.
    pub(crate) fn reader_for<R: Read>(
        self,
        token: CodecToken,
        source: R,
    ) -> Result<DecompressingReader<R>, BundleError> {
        match self {
            Self::Identity => Ok(DecompressingReader::plain(source)),
            Self::Zlib(_) => Ok(DecompressingReader::zlib(source)?),
            Self::Bzip2 => Err(unsupported(token)),
        }
    }
}

fn unsupported(token: CodecToken) -> BundleError {
    debug_bundle::trace_codec_rejected(token, "not implemented");
    BundleError::UnsupportedCodec { token }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
