//! Header emission and header sniffing around a codec payload.

use std::io::{Read, Write};

use crate::{
    BundleError, CodecToken, CompressingWriter, CompressionRegistry, DecompressingReader,
    TOKEN_LEN, debug_bundle, lookahead::fill,
};

/// Opens bundle streams against an injected [`CompressionRegistry`].
///
/// On the write side the token is the caller's declared intent. On the read
/// side a candidate header that does not name a registered token is treated
/// as the first bytes of the payload, which keeps streams that predate the
/// magic-header convention readable.
///
/// # Examples
///
/// ```
/// use compress::{BundleStream, CompressionRegistry};
/// use std::io::{Cursor, Read};
///
/// let stream = BundleStream::new(CompressionRegistry::new());
/// let mut reader = stream
///     .open_for_read(b"BUNDLE", Cursor::new(b"input data"))
///     .unwrap();
/// let mut out = String::new();
/// reader.read_to_string(&mut out).unwrap();
/// assert_eq!(out, "BUNDLEinput data");
/// ```
#[derive(Clone, Debug, Default)]
pub struct BundleStream {
    registry: CompressionRegistry,
}

impl BundleStream {
    /// Creates a stream opener backed by `registry`.
    #[must_use]
    pub const fn new(registry: CompressionRegistry) -> Self {
        Self { registry }
    }

    /// Returns the registry used to resolve tokens.
    #[must_use]
    pub const fn registry(&self) -> &CompressionRegistry {
        &self.registry
    }

    /// Wraps `sink` with the writer for `token`. No header is written.
    pub fn open_for_write<W: Write>(
        &self,
        token: CodecToken,
        sink: W,
    ) -> Result<CompressingWriter<W>, BundleError> {
        let writer = self.registry.writer_for(token, sink)?;
        debug_bundle::trace_codec_resolved(token, true);
        Ok(writer)
    }

    /// Writes the wire bytes of `token` to `sink`, then wraps it like
    /// [`open_for_write`](Self::open_for_write).
    ///
    /// The codec is resolved before anything is written, so an unsupported
    /// token leaves `sink` untouched.
    pub fn create<W: Write>(
        &self,
        token: CodecToken,
        mut sink: W,
    ) -> Result<CompressingWriter<W>, BundleError> {
        let codec = self.registry.codec(token)?;
        if !codec.is_supported() {
            return codec.writer_for(token, sink);
        }
        sink.write_all(token.as_bytes())?;
        self.open_for_write(token, sink)
    }

    /// Wraps `source` given header bytes the caller already consumed.
    ///
    /// A `candidate` equal to a registered token selects that codec for the
    /// rest of `source`. Anything else is payload: the returned reader yields
    /// `candidate` verbatim and then `source` unchanged.
    pub fn open_for_read<R: Read>(
        &self,
        candidate: &[u8],
        source: R,
    ) -> Result<DecompressingReader<R>, BundleError> {
        match self.registry.resolve(candidate) {
            Some((token, codec)) => {
                let reader = codec.reader_for(token, source)?;
                debug_bundle::trace_codec_resolved(token, false);
                Ok(reader)
            }
            None => {
                debug_bundle::trace_header_pushback(candidate);
                Ok(DecompressingReader::with_prefix(candidate.to_vec(), source))
            }
        }
    }

    /// Reads up to [`TOKEN_LEN`] bytes from `source` and opens it for reading.
    ///
    /// A stream shorter than a token cannot carry a header and is returned as
    /// payload; an empty stream is an empty legacy bundle.
    pub fn sniff<R: Read>(&self, mut source: R) -> Result<DecompressingReader<R>, BundleError> {
        let mut header = [0u8; TOKEN_LEN];
        let filled = fill(&mut source, &mut header)?;
        self.open_for_read(&header[..filled], source)
    }
}
