//! Twinbridge node application library

pub mod commands;

/// Install the global tracing subscriber.
///
/// Workspace crates log at debug, everything else at info; `RUST_LOG` adds to that.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("twinbridge=debug".parse().unwrap())
        .add_directive("bridge_engine=debug".parse().unwrap())
        .add_directive("bridge_api=debug".parse().unwrap())
        .add_directive("info".parse().unwrap());

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
