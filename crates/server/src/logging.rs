//! Tracing subscriber setup.

use chainswitch_core::config::LoggingConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const CRATES: &[&str] = &["chainswitch_core", "server", "tests"];

/// Builds the filter directives from `RUST_LOG` and the configured level.
///
/// `RUST_LOG=debug` and `RUST_LOG=trace` raise only this workspace's crates; any other
/// `RUST_LOG` value is used verbatim. Without `RUST_LOG`, `level` applies to the workspace and
/// everything else stays at `warn`.
#[must_use]
pub fn filter_directives(rust_log: Option<&str>, level: &str) -> String {
    let scoped = |level: &str| {
        let mut directives = String::from("warn");
        for krate in CRATES {
            directives.push_str(&format!(",{krate}={level}"));
        }
        directives
    };

    match rust_log {
        Some(shortcut @ ("debug" | "trace")) => scoped(shortcut),
        Some(custom) if !custom.trim().is_empty() => custom.to_string(),
        _ => scoped(level),
    }
}

/// Initializes the global subscriber. `json` selects structured output; anything else is
/// pretty-printed.
pub fn init_logging(config: &LoggingConfig) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let directives = filter_directives(rust_log.as_deref(), &config.level);
    let filter = EnvFilter::try_new(&directives)
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(None, "info")));

    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .pretty()
            .with_file(true)
            .with_line_number(true)
            .with_target(false);
        registry.with(fmt_layer).init();
    }
}
