use std::io;
use std::sync::Once;

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "YOMI_LOG";

const DEFAULT_FILTER: &str = "warn";

static INIT: Once = Once::new();

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber on stderr. Later calls are no-ops.
pub fn init_tracing(json: bool) {
    INIT.call_once(|| {
        let builder = tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_target(true)
            .with_env_filter(env_filter());
        if json {
            builder
                .json()
                .with_span_events(FmtSpan::CLOSE)
                .init();
        } else {
            builder.without_time().init();
        }
    });
}
