//! Subscriber and error-report setup for binaries

use crate::Environment;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install color-eyre as the panic and error report hook.
///
/// Call before anything that can fail in `main()`; later calls do nothing.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_env_section(false)
        .display_location_section(true)
        .install();
}

/// Filter used when `RUST_LOG` is unset; the driver is kept quieter than our own spans
fn default_directive(environment: &Environment) -> &'static str {
    match environment {
        Environment::Production => "info,mongodb=warn",
        Environment::Development => "debug,mongodb=info",
    }
}

/// Install the global subscriber for `environment`.
///
/// Production writes one flattened JSON object per event; development writes
/// multi-line pretty output. Both include `tracing_error::ErrorLayer`, so
/// color-eyre reports carry the span trace of the failing call.
///
/// Returns `false` when a subscriber was already installed.
pub fn init_tracing(environment: &Environment) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(environment)));

    let (json, pretty) = if environment.is_production() {
        let json = fmt::layer().json().flatten_event(true).with_target(false);
        (Some(json), None)
    } else {
        let pretty = fmt::layer().pretty().with_file(false).with_line_number(false);
        (None, Some(pretty))
    };

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(pretty)
        .with(tracing_error::ErrorLayer::default())
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(?environment, "Tracing initialized");
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_quiets_driver() {
        assert_eq!(
            default_directive(&Environment::Production),
            "info,mongodb=warn"
        );
        assert!(default_directive(&Environment::Development).contains("mongodb=info"));
    }

    #[test]
    fn test_second_init_is_ignored() {
        temp_env::with_var("RUST_LOG", Some("warn"), || {
            init_tracing(&Environment::Development);
            assert!(!init_tracing(&Environment::Production));
        });
    }
}
