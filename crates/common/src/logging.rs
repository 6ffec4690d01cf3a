//! Logging and tracing initialization.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::LoggingConfig;

/// Crates the configured level applies to.
const DRIFTVIEW_TARGETS: [&str; 3] = ["driftview_common", "driftview_core", "drift_preview"];

/// Filter directives for a configured `level`.
///
/// A bare level such as `"debug"` applies to the driftview crates and keeps
/// everything else at `warn`. A value that already holds directives
/// (`"driftview_core=trace,warn"`) is used as given.
pub fn filter_directives(level: &str) -> String {
    let level = level.trim();
    if level.contains('=') || level.contains(',') {
        return level.to_string();
    }
    let level = if level.is_empty() { "info" } else { level };
    let mut directives = String::from("warn");
    for target in DRIFTVIEW_TARGETS {
        directives.push_str(&format!(",{target}={level}"));
    }
    directives
}

/// Install the global subscriber, writing to stderr so stdout stays free
/// for tool output.
///
/// `RUST_LOG` takes precedence over `config.level`. Only the first call in a
/// process installs anything; the return value says whether this one did.
pub fn init_logging(config: &LoggingConfig) -> bool {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(&config.level)));
    let builder = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    let installed = if config.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.compact().with_target(true).finish())
    };
    installed.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_level_targets_driftview_crates() {
        assert_eq!(
            filter_directives("debug"),
            "warn,driftview_common=debug,driftview_core=debug,drift_preview=debug"
        );
        assert_eq!(
            filter_directives("  "),
            "warn,driftview_common=info,driftview_core=info,drift_preview=info"
        );
    }

    #[test]
    fn test_explicit_directives_pass_through() {
        assert_eq!(
            filter_directives("driftview_core=trace,warn"),
            "driftview_core=trace,warn"
        );
        assert_eq!(filter_directives("tokio=debug"), "tokio=debug");
    }

    #[test]
    fn test_second_init_keeps_first_subscriber() {
        init_logging(&LoggingConfig::default());
        let again = init_logging(&LoggingConfig {
            level: "debug".to_string(),
            json: true,
        });
        assert!(!again);
        tracing::info!("still logging");
    }
}
