// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Settings are addressed by dotted keys and read through a [`ConfigSource`].
//! The environment source maps a key to a variable name by upper-casing it
//! and replacing `.` and `-` with `_`, so `payos.client-id` is read from
//! `PAYOS_CLIENT_ID`. Configuration is loaded once at startup and any error
//! aborts the process.
//!
//! ## Keys
//!
//! | Key | Environment variable | Default |
//! |-----|----------------------|---------|
//! | `payos.client-id` | `PAYOS_CLIENT_ID` | Required |
//! | `payos.api-key` | `PAYOS_API_KEY` | Required |
//! | `payos.checksum-key` | `PAYOS_CHECKSUM_KEY` | Required |
//! | `payos.payout-client-id` | `PAYOS_PAYOUT_CLIENT_ID` | Required |
//! | `payos.payout-api-key` | `PAYOS_PAYOUT_API_KEY` | Required |
//! | `payos.payout-checksum-key` | `PAYOS_PAYOUT_CHECKSUM_KEY` | Required |
//! | `payos.log-level` | `PAYOS_LOG_LEVEL` | Required |
//! | `payos.base-url` | `PAYOS_BASE_URL` | `https://api-merchant.payos.vn` |
//! | `server.host` | `SERVER_HOST` | `0.0.0.0` |
//! | `server.port` | `SERVER_PORT` | `3001` |
//! | `frontend.url` | `FRONTEND_URL` | `http://localhost:3000` |
//! | `game.url` | `GAME_URL` | value of `frontend.url` |
//! | `log.format` | `LOG_FORMAT` | `pretty` |
//!
//! `RUST_LOG` is read directly by the tracing subscriber
//! (default `info,tower_http=debug`).

use std::collections::HashMap;
use std::net::SocketAddr;

use crate::providers::payos::{ClientRole, Credentials, LogLevel};

pub const PAYOS_CLIENT_ID: &str = "payos.client-id";
pub const PAYOS_API_KEY: &str = "payos.api-key";
pub const PAYOS_CHECKSUM_KEY: &str = "payos.checksum-key";
pub const PAYOS_PAYOUT_CLIENT_ID: &str = "payos.payout-client-id";
pub const PAYOS_PAYOUT_API_KEY: &str = "payos.payout-api-key";
pub const PAYOS_PAYOUT_CHECKSUM_KEY: &str = "payos.payout-checksum-key";
pub const PAYOS_LOG_LEVEL: &str = "payos.log-level";
pub const PAYOS_BASE_URL: &str = "payos.base-url";
pub const SERVER_HOST: &str = "server.host";
pub const SERVER_PORT: &str = "server.port";
pub const FRONTEND_URL: &str = "frontend.url";
pub const GAME_URL: &str = "game.url";
pub const LOG_FORMAT: &str = "log.format";

pub const DEFAULT_PAYOS_BASE_URL: &str = "https://api-merchant.payos.vn";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required configuration value `{key}`")]
    Missing { key: String },

    #[error("invalid `payos.log-level` value `{value}` (expected DEBUG, INFO, WARN, ERROR or NONE)")]
    InvalidLogLevel { value: String },

    #[error("invalid configuration value for `{key}`: {reason}")]
    Invalid { key: String, reason: String },

    #[error("payment and payout roles must use separate PayOS credentials")]
    SharedCredentials,
}

/// A read-only lookup of configuration values by dotted key.
pub trait ConfigSource {
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads configuration from process environment variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSource;

impl EnvSource {
    pub fn var_name(key: &str) -> String {
        key.chars()
            .map(|c| match c {
                '.' | '-' => '_',
                other => other.to_ascii_uppercase(),
            })
            .collect()
    }
}

impl ConfigSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(Self::var_name(key)).ok()
    }
}

impl ConfigSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub addr: SocketAddr,
    pub frontend_url: String,
    pub game_url: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone)]
pub struct PayosSettings {
    pub payment: Credentials,
    pub payout: Credentials,
    pub log_level: LogLevel,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub payos: PayosSettings,
}

impl Settings {
    /// Load and validate every setting. The first problem found is returned.
    pub fn load(source: &impl ConfigSource) -> Result<Self, ConfigError> {
        Ok(Self {
            payos: PayosSettings::load(source)?,
            server: ServerSettings::load(source)?,
        })
    }
}

impl PayosSettings {
    pub fn load(source: &impl ConfigSource) -> Result<Self, ConfigError> {
        let raw_level = verbatim(source, PAYOS_LOG_LEVEL)?;
        let log_level = raw_level
            .parse::<LogLevel>()
            .map_err(|_| ConfigError::InvalidLogLevel { value: raw_level })?;

        let payment = Credentials::new(
            verbatim(source, PAYOS_CLIENT_ID)?,
            verbatim(source, PAYOS_API_KEY)?,
            verbatim(source, PAYOS_CHECKSUM_KEY)?,
        );
        let payout = Credentials::new(
            verbatim(source, PAYOS_PAYOUT_CLIENT_ID)?,
            verbatim(source, PAYOS_PAYOUT_API_KEY)?,
            verbatim(source, PAYOS_PAYOUT_CHECKSUM_KEY)?,
        );

        let base_url = or_default(source, PAYOS_BASE_URL, DEFAULT_PAYOS_BASE_URL);
        let parsed = url::Url::parse(&base_url).map_err(|e| ConfigError::Invalid {
            key: PAYOS_BASE_URL.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid {
                key: PAYOS_BASE_URL.to_string(),
                reason: format!("unsupported scheme `{}`", parsed.scheme()),
            });
        }

        Ok(Self {
            payment,
            payout,
            log_level,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn credentials(&self, role: ClientRole) -> &Credentials {
        match role {
            ClientRole::Payment => &self.payment,
            ClientRole::Payout => &self.payout,
        }
    }
}

impl ServerSettings {
    pub fn load(source: &impl ConfigSource) -> Result<Self, ConfigError> {
        let host = or_default(source, SERVER_HOST, DEFAULT_HOST);
        let port = match optional(source, SERVER_PORT) {
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                key: SERVER_PORT.to_string(),
                reason: e.to_string(),
            })?,
            None => DEFAULT_PORT,
        };
        let addr: SocketAddr =
            format!("{host}:{port}")
                .parse()
                .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                    key: SERVER_HOST.to_string(),
                    reason: e.to_string(),
                })?;

        let frontend_url = or_default(source, FRONTEND_URL, DEFAULT_FRONTEND_URL);
        let game_url = optional(source, GAME_URL).unwrap_or_else(|| frontend_url.clone());

        let log_format = match optional(source, LOG_FORMAT)
            .map(|v| v.to_ascii_lowercase())
            .as_deref()
        {
            None | Some("pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    key: LOG_FORMAT.to_string(),
                    reason: format!("expected `json` or `pretty`, got `{other}`"),
                })
            }
        };

        Ok(Self {
            addr,
            frontend_url: frontend_url.trim_end_matches('/').to_string(),
            game_url: game_url.trim_end_matches('/').to_string(),
            log_format,
        })
    }
}

/// Blank values count as absent.
fn optional(source: &impl ConfigSource, key: &str) -> Option<String> {
    source
        .get(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(source: &impl ConfigSource, key: &str) -> Result<String, ConfigError> {
    optional(source, key).ok_or_else(|| ConfigError::Missing {
        key: key.to_string(),
    })
}

/// Like [`required`] but returns the value untrimmed. Used for the
/// credentials and the log level, which must be taken exactly as given.
fn verbatim(source: &impl ConfigSource, key: &str) -> Result<String, ConfigError> {
    source
        .get(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ConfigError::Missing {
            key: key.to_string(),
        })
}

fn or_default(source: &impl ConfigSource, key: &str, default: &str) -> String {
    optional(source, key).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
pub(crate) fn test_source(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[cfg(test)]
pub(crate) fn complete_source() -> HashMap<String, String> {
    test_source(&[
        (PAYOS_CLIENT_ID, "pay-client"),
        (PAYOS_API_KEY, "pay-api-key"),
        (PAYOS_CHECKSUM_KEY, "pay-checksum"),
        (PAYOS_PAYOUT_CLIENT_ID, "payout-client"),
        (PAYOS_PAYOUT_API_KEY, "payout-api-key"),
        (PAYOS_PAYOUT_CHECKSUM_KEY, "payout-checksum"),
        (PAYOS_LOG_LEVEL, "DEBUG"),
    ])
}
