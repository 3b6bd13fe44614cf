//! Wire tokens naming the compression scheme of a bundle stream.

use core::fmt;
use core::str::FromStr;

/// Width in bytes of every non-empty codec token.
pub const TOKEN_LEN: usize = 6;

/// Compression header values recognised at the start of a bundle stream.
///
/// The table is closed: new schemes are added as new variants, never inferred
/// from stream content. Wire values are case-sensitive.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum CodecToken {
    /// No header at all; streams that predate the magic-header convention.
    Legacy,
    /// `HG10UN`, explicitly uncompressed.
    Uncompressed,
    /// `HG10GZ`, zlib-framed deflate.
    Zlib,
    /// `HG10BZ`, block compression. Registered but not implemented.
    Bzip2,
}

impl CodecToken {
    /// Every token in table order.
    pub const ALL: [Self; 4] = [Self::Legacy, Self::Uncompressed, Self::Zlib, Self::Bzip2];

    /// Returns the literal header bytes written on the wire.
    #[must_use]
    pub const fn as_bytes(self) -> &'static [u8] {
        self.as_str().as_bytes()
    }

    /// Returns the literal header as text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Legacy => "",
            Self::Uncompressed => "HG10UN",
            Self::Zlib => "HG10GZ",
            Self::Bzip2 => "HG10BZ",
        }
    }

    /// Looks up the token whose wire value equals `bytes` exactly.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|token| token.as_bytes() == bytes)
    }

    /// Returns `true` when the token carries a compressed payload.
    #[must_use]
    pub const fn is_compressed(self) -> bool {
        matches!(self, Self::Zlib | Self::Bzip2)
    }
}

impl fmt::Display for CodecToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Legacy => f.write_str("<none>"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// Error returned when raw header bytes do not name a known codec.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown codec token: {}", String::from_utf8_lossy(.bytes).escape_debug())]
pub struct UnknownCodecToken {
    bytes: Vec<u8>,
}

impl UnknownCodecToken {
    /// Creates an error capturing the rejected bytes.
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Returns the rejected bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl TryFrom<&[u8]> for CodecToken {
    type Error = UnknownCodecToken;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes).ok_or_else(|| UnknownCodecToken::new(bytes))
    }
}

impl FromStr for CodecToken {
    type Err = UnknownCodecToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.as_bytes())
    }
}
