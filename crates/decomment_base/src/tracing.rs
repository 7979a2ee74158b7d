use crate::DecommentResult;
pub use tracing::instrument;
pub use tracing::{debug, error, info, trace, warn};
use tracing_error::ErrorLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/* 📖 # Why does tracing output go to stderr?

Standard output carries the program's actual output (greetings, diffs, prompts).
Log lines on stdout would corrupt it for anyone piping the result, so the fmt layer
writes to stderr. The filter comes from `RUST_LOG` and defaults to `warn`.
*/

/// Default filter directive used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "warn";

pub fn init_tracing() -> DecommentResult<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(ErrorLayer::default())
        .try_init()
        .map_err(|e| crate::err!("Failed to initialize tracing: {}", e))
}
