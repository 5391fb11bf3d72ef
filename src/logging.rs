//! Diagnostic logging to stderr, gated by `AXIOM_DEBUG` or `--debug`.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable that turns on debug output.
pub const DEBUG_ENV: &str = "AXIOM_DEBUG";

/// True when `AXIOM_DEBUG` is `"true"` or `"1"`. Any other value, or no
/// value at all, means silent operation.
pub fn debug_enabled() -> bool {
    is_debug_value(std::env::var(DEBUG_ENV).ok().as_deref())
}

fn is_debug_value(value: Option<&str>) -> bool {
    matches!(value, Some("true") | Some("1"))
}

/// Initialize the stderr subscriber.
///
/// With `debug` off the filter is `off`, so nothing but command output and
/// the final error message reaches the terminal.
pub fn init_logging(debug: bool) {
    let directive = if debug { "axiom=debug" } else { "off" };

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time(),
        )
        .with(EnvFilter::new(directive))
        .try_init();
}
