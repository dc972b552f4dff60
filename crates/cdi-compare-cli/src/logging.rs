use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize logging to stderr so stdout stays machine-readable.
///
/// The filter comes from `RUST_LOG` when set, otherwise from `verbose`.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "cdic=debug,cdi_compare_core=debug"
    } else {
        "cdic=info,cdi_compare_core=warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let initialized = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false),
        )
        .try_init();

    if let Err(e) = initialized {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }
}
