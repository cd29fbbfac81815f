use fretwise::{logging, repl};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // RUST_LOG replaces the defaults entirely, e.g. RUST_LOG=fretwise_core=debug
    let rust_log = std::env::var("RUST_LOG").ok();
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(logging::env_filter(rust_log.as_deref()))
        .init();

    tracing::info!("Starting Fretwise");
    repl::start()
}
