use std::io;

use crate::CodecToken;

/// Errors raised while opening or driving a bundle stream.
#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    /// The token is recognised but no working codec backs it.
    #[error("unsupported codec {token}: no implementation is available for this compression scheme")]
    UnsupportedCodec {
        /// Token that was requested.
        token: CodecToken,
    },
    /// The registry in use has no entry for the token.
    #[error("no codec registered for token {token}")]
    UnregisteredCodec {
        /// Token that was requested.
        token: CodecToken,
    },
    /// Failure reported by the wrapped sink or source.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl BundleError {
    /// Returns the token involved in a codec lookup failure.
    #[must_use]
    pub const fn token(&self) -> Option<CodecToken> {
        match self {
            Self::UnsupportedCodec { token } | Self::UnregisteredCodec { token } => Some(*token),
            Self::Io(_) => None,
        }
    }
}

impl From<BundleError> for io::Error {
    fn from(error: BundleError) -> Self {
        match error {
            BundleError::Io(inner) => inner,
            BundleError::UnsupportedCodec { .. } => Self::new(io::ErrorKind::Unsupported, error),
            BundleError::UnregisteredCodec { .. } => Self::new(io::ErrorKind::InvalidInput, error),
        }
    }
}
