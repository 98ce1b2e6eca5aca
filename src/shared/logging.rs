//! Tracing subscriber setup
//!
//! The embedding host calls [`init_tracing`] once at startup. `RUST_LOG`
//! takes precedence over the configured level.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

pub type InitError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Install the global fmt subscriber. Fails if one is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), InitError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    }
}

/// Mask all but the last four digits of a CPF for log output.
pub fn mask_cpf(formatted: &str) -> String {
    let total = formatted.chars().filter(char::is_ascii_digit).count();
    let mut seen = 0;
    formatted
        .chars()
        .map(|c| {
            if c.is_ascii_digit() {
                seen += 1;
                if seen + 4 <= total {
                    return '*';
                }
            }
            c
        })
        .collect()
}
