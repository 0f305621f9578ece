//! Tracing setup for the driver.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Install the global subscriber if `KTC_LOG` or `RUST_LOG` is set.
///
/// Safe to call more than once; only the first call has an effect.
/// `tree` swaps the flat fmt output for an indented span tree.
pub fn init_tracing(tree: bool) {
    TRACING_INIT.call_once(|| {
        let Some(filter) = env_filter() else {
            return;
        };

        let flat = (!tree).then(|| {
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true)
        });
        let hierarchical = tree.then(|| {
            tracing_tree::HierarchicalLayer::new(2)
                .with_targets(true)
                .with_bracketed_fields(true)
        });

        tracing_subscriber::registry()
            .with(filter)
            .with(flat)
            .with(hierarchical)
            .init();
    });
}

fn env_filter() -> Option<EnvFilter> {
    EnvFilter::try_from_env("KTC_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .ok()
}
