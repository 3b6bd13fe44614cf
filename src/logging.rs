//! Subscriber bootstrap for the diagnostics emitted by the workspace crates.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Targets used by the workspace crates, for building filter directives.
pub const TARGETS: [&str; 3] = [
    "changegroup::bundle",
    "changegroup::filter",
    "changegroup::hooks",
];

/// Failure to install the global subscriber.
#[derive(Debug, thiserror::Error)]
pub enum TracingInitError {
    /// The filter directives did not parse.
    #[error("invalid tracing directives: {0}")]
    Directives(#[from] ParseError),
    /// A global subscriber is already installed.
    #[error(transparent)]
    Install(#[from] TryInitError),
}

/// Installs a formatting subscriber filtered by `directives`.
///
/// `directives` uses `EnvFilter` syntax, e.g.
/// `"changegroup::filter=debug,changegroup::bundle=trace"`. An empty string
/// falls back to the `RUST_LOG` environment variable.
///
/// ```rust,ignore
/// changegroup::init_tracing("changegroup::bundle=debug")?;
/// ```
pub fn init_tracing(directives: &str) -> Result<(), TracingInitError> {
    let filter = if directives.trim().is_empty() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(directives)?
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()?;
    Ok(())
}
