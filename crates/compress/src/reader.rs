//! Decoding side of a bundle stream.

use std::io::{self, IoSliceMut, Read};

use flate2::read::{GzDecoder, ZlibDecoder};

use crate::{Codec, Lookahead, debug_bundle, lookahead::fill, zlib::CompressionLevel};

/// Leading bytes of a gzip member (RFC 1952).
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Read half of a bundle stream.
///
/// Either a pass-through reader, possibly replaying header bytes that turned
/// out to be payload, or an incremental deflate decoder. Deflate payloads are
/// zlib-framed on the wire; gzip-framed payloads written by older tools are
/// recognised by their magic bytes and decoded as well. A return value of
/// `Ok(0)` from [`read`](Read::read) marks the end of the payload.
pub struct DecompressingReader<R: Read> {
    codec: Codec,
    inner: Decoder<R>,
    pushed_back: usize,
    bytes_out: u64,
}

enum Decoder<R: Read> {
    Plain(Lookahead<R>),
    Zlib(ZlibDecoder<Lookahead<R>>),
    Gzip(GzDecoder<Lookahead<R>>),
}

impl<R: Read> DecompressingReader<R> {
    pub(crate) fn plain(source: R) -> Self {
        Self::with_prefix(Vec::new(), source)
    }

    /// Pass-through reader that yields `prefix` before the bytes of `source`.
    pub(crate) fn with_prefix(prefix: Vec<u8>, source: R) -> Self {
        Self {
            codec: Codec::Identity,
            pushed_back: prefix.len(),
            inner: Decoder::Plain(Lookahead::with_prefix(prefix, source)),
            bytes_out: 0,
        }
    }

    /// Deflate reader. Peeks at the first two bytes of `source` to pick
    /// between zlib and gzip framing.
    pub(crate) fn zlib(mut source: R) -> io::Result<Self> {
        let mut magic = [0u8; GZIP_MAGIC.len()];
        let filled = fill(&mut source, &mut magic)?;
        let is_gzip = magic[..filled] == GZIP_MAGIC;
        let framed = Lookahead::with_prefix(&magic[..filled], source);
        debug_bundle::trace_deflate_framing(if is_gzip { "gzip" } else { "zlib" });

        let inner = if is_gzip {
            Decoder::Gzip(GzDecoder::new(framed))
        } else {
            Decoder::Zlib(ZlibDecoder::new(framed))
        };
        Ok(Self {
            codec: Codec::Zlib(CompressionLevel::Default),
            inner,
            pushed_back: 0,
            bytes_out: 0,
        })
    }

    /// Returns the codec decoding this stream.
    ///
    /// Decoders do not depend on the level the payload was written with, so a
    /// zlib reader always reports the default level.
    #[must_use]
    pub const fn codec(&self) -> Codec {
        self.codec
    }

    /// Returns how many header bytes were reinterpreted as payload.
    ///
    /// Non-zero only when the stream began with bytes that did not name a
    /// known codec.
    #[must_use]
    pub const fn pushed_back(&self) -> usize {
        self.pushed_back
    }

    /// Returns the number of decoded bytes handed out so far.
    #[must_use]
    pub const fn bytes_out(&self) -> u64 {
        self.bytes_out
    }

    /// Returns an immutable reference to the underlying source.
    #[must_use]
    pub fn get_ref(&self) -> &R {
        match &self.inner {
            Decoder::Plain(lookahead) => lookahead.get_ref(),
            Decoder::Zlib(decoder) => decoder.get_ref().get_ref(),
            Decoder::Gzip(decoder) => decoder.get_ref().get_ref(),
        }
    }
}

impl<R: Read> Read for DecompressingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = match &mut self.inner {
            Decoder::Plain(lookahead) => lookahead.read(buf)?,
            Decoder::Zlib(decoder) => decoder.read(buf)?,
            Decoder::Gzip(decoder) => decoder.read(buf)?,
        };
        self.bytes_out = self.bytes_out.saturating_add(read as u64);
        Ok(read)
    }

    fn read_vectored(&mut self, bufs: &mut [IoSliceMut<'_>]) -> io::Result<usize> {
        let read = match &mut self.inner {
            Decoder::Plain(lookahead) => lookahead.read_vectored(bufs)?,
            Decoder::Zlib(decoder) => decoder.read_vectored(bufs)?,
            Decoder::Gzip(decoder) => decoder.read_vectored(bufs)?,
        };
        self.bytes_out = self.bytes_out.saturating_add(read as u64);
        Ok(read)
    }
}

impl<R: Read> std::fmt::Debug for DecompressingReader<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecompressingReader")
            .field("codec", &self.codec)
            .field("pushed_back", &self.pushed_back)
            .field("bytes_out", &self.bytes_out)
            .finish_non_exhaustive()
    }
}
