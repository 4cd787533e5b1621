pub mod build_info;
pub mod paths;

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "budget_view=info";

/// Initializes the global tracing subscriber; a non-empty `RUST_LOG` replaces the default directive.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
        let filter = env_filter(rust_log.as_deref());

        // Logs go to stderr so rendered charts on stdout stay clean.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

/// Unset, blank, or unparsable input falls back to `budget_view=info`.
fn env_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|raw| !raw.trim().is_empty())
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_log_can_raise_crate_level() {
        let filter = env_filter(Some("budget_view=debug"));
        assert_eq!(filter.to_string(), "budget_view=debug");
    }

    #[test]
    fn default_directive_applies_without_rust_log() {
        assert_eq!(env_filter(None).to_string(), DEFAULT_DIRECTIVE);
        assert_eq!(env_filter(Some("  ")).to_string(), DEFAULT_DIRECTIVE);
    }
}
