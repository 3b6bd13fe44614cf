//! Encoding side of a bundle stream.

use std::io::{self, IoSlice, Write};

use flate2::write::ZlibEncoder;

use crate::{Codec, debug_bundle, zlib::CompressionLevel};

/// Write half of a bundle stream.
///
/// One of a fixed set of encoders chosen by the codec: a pass-through writer
/// or an incremental deflate encoder. Call [`finish`](Self::finish) to emit
/// any trailer and recover the sink. Dropping the writer instead leaves the
/// sink holding whatever was flushed so far; that output is not a complete
/// stream.
pub struct CompressingWriter<W: Write> {
    codec: Codec,
    inner: Encoder<W>,
    bytes_in: u64,
}

enum Encoder<W: Write> {
    Plain(W),
    Zlib(ZlibEncoder<W>),
}

impl<W: Write> CompressingWriter<W> {
    pub(crate) const fn plain(sink: W) -> Self {
        Self {
            codec: Codec::Identity,
            inner: Encoder::Plain(sink),
            bytes_in: 0,
        }
    }

    pub(crate) fn zlib(sink: W, level: CompressionLevel) -> Self {
        Self {
            codec: Codec::Zlib(level),
            inner: Encoder::Zlib(ZlibEncoder::new(sink, level.into())),
            bytes_in: 0,
        }
    }

    /// Returns the codec driving this writer.
    #[must_use]
    pub const fn codec(&self) -> Codec {
        self.codec
    }

    /// Returns the number of uncompressed bytes accepted so far.
    #[must_use]
    pub const fn bytes_in(&self) -> u64 {
        self.bytes_in
    }

    /// Provides immutable access to the underlying sink.
    #[must_use]
    pub fn get_ref(&self) -> &W {
        match &self.inner {
            Encoder::Plain(sink) => sink,
            Encoder::Zlib(encoder) => encoder.get_ref(),
        }
    }

    /// Completes the stream and returns the sink.
    pub fn finish(self) -> io::Result<W> {
        let sink = match self.inner {
            Encoder::Plain(mut sink) => {
                sink.flush()?;
                sink
            }
            Encoder::Zlib(encoder) => encoder.finish()?,
        };
        debug_bundle::trace_stream_finished(self.codec, self.bytes_in);
        Ok(sink)
    }
}

impl<W: Write> Write for CompressingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = match &mut self.inner {
            Encoder::Plain(sink) => sink.write(buf)?,
            Encoder::Zlib(encoder) => encoder.write(buf)?,
        };
        self.bytes_in = self.bytes_in.saturating_add(written as u64);
        Ok(written)
    }

    fn write_vectored(&mut self, bufs: &[IoSlice<'_>]) -> io::Result<usize> {
        let written = match &mut self.inner {
            Encoder::Plain(sink) => sink.write_vectored(bufs)?,
            Encoder::Zlib(encoder) => encoder.write_vectored(bufs)?,
        };
        self.bytes_in = self.bytes_in.saturating_add(written as u64);
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.inner {
            Encoder::Plain(sink) => sink.flush(),
            Encoder::Zlib(encoder) => encoder.flush(),
        }
    }
}

impl<W: Write> std::fmt::Debug for CompressingWriter<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompressingWriter")
            .field("codec", &self.codec)
            .field("bytes_in", &self.bytes_in)
            .finish_non_exhaustive()
    }
}
