use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the stderr subscriber. `RUST_LOG` wins; otherwise each `-v`
/// raises the level from warn.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directives = match verbosity {
            0 => "boq=warn,warn",
            1 => "boq=info,warn",
            2 => "boq=debug,warn",
            _ => "boq=trace,info",
        };
        EnvFilter::new(directives)
    });

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbosity > 1);

    // Keep any subscriber that is already installed.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
