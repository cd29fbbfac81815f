//! Log filter setup for the shell binary

use tracing_subscriber::EnvFilter;

/// Directives used when `RUST_LOG` is unset, empty or unparsable
pub const DEFAULT_DIRECTIVES: &str = "fretwise=info,fretwise_core=warn";

/// Build the filter from the `RUST_LOG` value, falling back to
/// [`DEFAULT_DIRECTIVES`]
pub fn env_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .map(str::trim)
        .filter(|directives| !directives.is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}
