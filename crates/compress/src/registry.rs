use std::io::{Read, Write};
use std::sync::Arc;

use crate::{
    BundleError, Codec, CodecToken, CompressingWriter, DecompressingReader,
    zlib::CompressionLevel,
};

/// Immutable table mapping codec tokens to codecs.
///
/// A registry is built once and handed to whatever needs to open streams.
/// Clones share the same table.
///
/// # Examples
///
/// ```
/// use compress::{CodecToken, CompressionRegistry};
/// use std::io::Write;
///
/// let registry = CompressionRegistry::new();
/// let mut writer = registry.buffer_writer_for(CodecToken::Uncompressed).unwrap();
/// writer.write_all(b"input string").unwrap();
/// assert_eq!(writer.finish().unwrap(), b"input string");
/// ```
#[derive(Clone, Debug)]
pub struct CompressionRegistry {
    entries: Arc<[(CodecToken, Codec)]>,
}

impl CompressionRegistry {
    /// Builds the standard table with the default deflate level.
    #[must_use]
    pub fn new() -> Self {
        Self::with_level(CompressionLevel::Default)
    }

    /// Builds the standard table compressing `HG10GZ` payloads at `level`.
    #[must_use]
    pub fn with_level(level: CompressionLevel) -> Self {
        Self::empty()
            .with_codec(CodecToken::Legacy, Codec::Identity)
            .with_codec(CodecToken::Uncompressed, Codec::Identity)
            .with_codec(CodecToken::Zlib, Codec::Zlib(level))
            .with_codec(CodecToken::Bzip2, Codec::Bzip2)
    }

    /// Returns a registry with no entries.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: Arc::new([]),
        }
    }

    /// Returns a new registry with `token` mapped to `codec`.
    ///
    /// A token that is already present keeps its position and takes the new codec.
    #[must_use]
    pub fn with_codec(&self, token: CodecToken, codec: Codec) -> Self {
        let mut entries = self.entries.to_vec();
        match entries.iter_mut().find(|(existing, _)| *existing == token) {
            Some(entry) => entry.1 = codec,
            None => entries.push((token, codec)),
        }
        Self {
            entries: entries.into(),
        }
    }

    /// Returns the codec registered for `token`.
    pub fn codec(&self, token: CodecToken) -> Result<Codec, BundleError> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == token)
            .map(|&(_, codec)| codec)
            .ok_or(BundleError::UnregisteredCodec { token })
    }

    /// Resolves candidate header bytes to a registered token.
    ///
    /// Only an exact match counts. `None` means the bytes are not a header.
    #[must_use]
    pub fn resolve(&self, candidate: &[u8]) -> Option<(CodecToken, Codec)> {
        self.entries
            .iter()
            .find(|(token, _)| token.as_bytes() == candidate)
            .copied()
    }

    /// Iterates the registered tokens in registration order.
    pub fn tokens(&self) -> impl Iterator<Item = CodecToken> + '_ {
        self.entries.iter().map(|&(token, _)| token)
    }

    /// Opens a compressing writer for `token` over `sink`.
    pub fn writer_for<W: Write>(
        &self,
        token: CodecToken,
        sink: W,
    ) -> Result<CompressingWriter<W>, BundleError> {
        self.codec(token)?.writer_for(token, sink)
    }

    /// Opens a compressing writer for `token` over a growable buffer.
    pub fn buffer_writer_for(
        &self,
        token: CodecToken,
    ) -> Result<CompressingWriter<Vec<u8>>, BundleError> {
        self.writer_for(token, Vec::new())
    }

    /// Opens a decompressing reader for `token` over `source`.
    pub fn reader_for<R: Read>(
        &self,
        token: CodecToken,
        source: R,
    ) -> Result<DecompressingReader<R>, BundleError> {
        self.codec(token)?.reader_for(token, source)
    }
}

impl Default for CompressionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
