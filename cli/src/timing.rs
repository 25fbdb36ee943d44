//! Tracing setup and command timing.
//!
//! Library code logs through the `log` facade; the subscriber installed here
//! picks those records up as well. With `--timing`, every span created by
//! `#[tracing::instrument]` reports its duration when it closes.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    prelude::*,
};

/// Default level when `RUST_LOG` is not set.
fn default_level(verbose: bool, timing: bool) -> LevelFilter {
    if verbose {
        LevelFilter::DEBUG
    } else if timing {
        // span close events are emitted at INFO
        LevelFilter::INFO
    } else {
        LevelFilter::WARN
    }
}

pub fn init_tracing(verbose: bool, timing: bool) {
    let filter = EnvFilter::builder()
        .with_default_directive(default_level(verbose, timing).into())
        .from_env_lossy();

    let span_events = if timing {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(verbose)
                .with_level(true)
                .with_span_events(span_events)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
