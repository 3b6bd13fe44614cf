//! Reader decorator that replays speculatively consumed bytes.

use std::io::{self, IoSliceMut, Read};

/// Yields a pushed-back prefix before delegating to the wrapped reader.
///
/// The prefix is drained first and the inner reader is never touched until it
/// is empty, so bytes read while sniffing a header reach the caller exactly
/// once and in their original order.
#[derive(Debug)]
pub struct Lookahead<R> {
    prefix: Vec<u8>,
    pos: usize,
    inner: R,
}

impl<R> Lookahead<R> {
    /// Wraps `inner` without any pending bytes.
    #[must_use]
    pub fn new(inner: R) -> Self {
        Self::with_prefix(Vec::new(), inner)
    }

    /// Wraps `inner`, replaying `prefix` first.
    #[must_use]
    pub fn with_prefix(prefix: impl Into<Vec<u8>>, inner: R) -> Self {
        Self {
            prefix: prefix.into(),
            pos: 0,
            inner,
        }
    }

    /// Returns the pushed-back bytes that have not been read yet.
    #[must_use]
    pub fn pending(&self) -> &[u8] {
        &self.prefix[self.pos..]
    }

    /// Returns an immutable reference to the wrapped reader.
    #[must_use]
    pub const fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Returns a mutable reference to the wrapped reader.
    ///
    /// Reading through this reference bypasses any pending prefix bytes.
    #[must_use]
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Consumes the decorator and returns the pending prefix together with the reader.
    #[must_use]
    pub fn into_parts(mut self) -> (Vec<u8>, R) {
        self.prefix.drain(..self.pos);
        (self.prefix, self.inner)
    }
}

impl<R: Read> Read for Lookahead<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let pending = self.pending();
        if pending.is_empty() {
            return self.inner.read(buf);
        }
        let n = pending.len().min(buf.len());
        buf[..n].copy_from_slice(&pending[..n]);
        self.pos += n;
        if self.pos == self.prefix.len() {
            self.prefix = Vec::new();
            self.pos = 0;
        }
        Ok(n)
    }

    fn read_vectored(&mut self, bufs: &mut [IoSliceMut<'_>]) -> io::Result<usize> {
        if self.pending().is_empty() {
            return self.inner.read_vectored(bufs);
        }
        match bufs.iter_mut().find(|b| !b.is_empty()) {
            Some(buf) => self.read(buf),
            None => Ok(0),
        }
    }
}

/// Reads until `buf` is full or `source` reports end of stream.
///
/// Short reads are continued and `Interrupted` is retried; any other error is
/// returned as is.
pub(crate) fn fill<R: Read>(source: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match source.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
            Err(error) => return Err(error),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn prefix_is_replayed_before_inner() {
        let mut reader = Lookahead::with_prefix(&b"BUNDLE"[..], Cursor::new(b"input data"));
        let mut out = Vec::new();
        reader.read_to_end(&mut out).expect("read");
        assert_eq!(out, b"BUNDLEinput data");
    }

    #[test]
    fn small_buffers_split_prefix_without_loss() {
        let mut reader = Lookahead::with_prefix(&b"abc"[..], Cursor::new(b"def"));
        let mut byte = [0u8; 1];
        let mut out = Vec::new();
        loop {
            let n = reader.read(&mut byte).expect("read");
            if n == 0 {
                break;
            }
            out.push(byte[0]);
        }
        assert_eq!(out, b"abcdef");
    }

    #[test]
    fn read_does_not_span_prefix_and_inner() {
        let mut reader = Lookahead::with_prefix(&b"ab"[..], Cursor::new(b"cd"));
        let mut buf = [0u8; 8];
        assert_eq!(reader.read(&mut buf).expect("read"), 2);
        assert_eq!(&buf[..2], b"ab");
        assert!(reader.pending().is_empty());
        assert_eq!(reader.read(&mut buf).expect("read"), 2);
        assert_eq!(&buf[..2], b"cd");
        assert_eq!(reader.read(&mut buf).expect("read"), 0);
    }

    #[test]
    fn into_parts_returns_unread_prefix() {
        let mut reader = Lookahead::with_prefix(&b"xyz"[..], Cursor::new(Vec::new()));
        let mut buf = [0u8; 1];
        reader.read_exact(&mut buf).expect("read");
        let (pending, _inner) = reader.into_parts();
        assert_eq!(pending, b"yz");
    }

    #[test]
    fn vectored_reads_drain_prefix_first() {
        let mut reader = Lookahead::with_prefix(&b"head"[..], Cursor::new(b"tail"));
        let mut first = [0u8; 0];
        let mut second = [0u8; 16];
        let mut bufs = [IoSliceMut::new(&mut first), IoSliceMut::new(&mut second)];
        let n = reader.read_vectored(&mut bufs).expect("read");
        assert_eq!(n, 4);
        assert_eq!(&second[..4], b"head");
    }

    #[test]
    fn empty_prefix_is_transparent() {
        let mut reader = Lookahead::new(Cursor::new(b"plain"));
        let mut out = String::new();
        reader.read_to_string(&mut out).expect("read");
        assert_eq!(out, "plain");
    }
}
