// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Tracing subscriber setup.
//!
//! `RUST_LOG` selects the filter (default [`DEFAULT_FILTER`]) and
//! `LOG_FORMAT` selects JSON or human-readable output. The format is read
//! before the rest of the configuration so that configuration errors are
//! themselves logged in the requested format.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{ConfigSource, LogFormat, LOG_FORMAT};

pub const DEFAULT_FILTER: &str = "info,tower_http=debug";

/// Resolve the output format. Unknown values fall back to pretty output;
/// `ServerSettings::load` reports them as errors afterwards.
pub fn format_from(source: &impl ConfigSource) -> LogFormat {
    match source
        .get(LOG_FORMAT)
        .map(|v| v.trim().to_ascii_lowercase())
        .as_deref()
    {
        Some("json") => LogFormat::Json,
        _ => LogFormat::Pretty,
    }
}

pub fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber. Safe to call once per process.
pub fn init(format: LogFormat) {
    let registry = tracing_subscriber::registry().with(filter());
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_target(false))
            .init(),
        LogFormat::Pretty => registry.with(fmt::layer().with_target(true)).init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_source;

    #[test]
    fn format_defaults_to_pretty() {
        assert_eq!(format_from(&test_source(&[])), LogFormat::Pretty);
        assert_eq!(
            format_from(&test_source(&[(LOG_FORMAT, "yaml")])),
            LogFormat::Pretty
        );
    }

    #[test]
    fn format_accepts_json_in_any_case() {
        assert_eq!(
            format_from(&test_source(&[(LOG_FORMAT, " JSON ")])),
            LogFormat::Json
        );
    }
}
