// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Startup
//!
//! Turns validated [`Settings`] into the shared application state. Each
//! PayOS client is constructed exactly once here, from its own credential
//! tuple, before the router exists.

use std::sync::Arc;

use tracing::info;

use crate::config::{ConfigError, ConfigSource, PayosSettings, Settings};
use crate::providers::payos::{ClientRole, PayosClient, PayosError};
use crate::state::AppState;

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("client construction failed: {0}")]
    Client(#[from] PayosError),
}

/// The two PayOS client handles, one per role.
#[derive(Debug, Clone)]
pub struct PayosClients {
    pub payment: Arc<PayosClient>,
    pub payout: Arc<PayosClient>,
}

impl PayosClients {
    pub fn from_settings(settings: &PayosSettings) -> Result<Self, StartupError> {
        if settings.payment == settings.payout {
            return Err(ConfigError::SharedCredentials.into());
        }

        let payment = build_client(settings, ClientRole::Payment)?;
        let payout = build_client(settings, ClientRole::Payout)?;

        Ok(Self {
            payment: Arc::new(payment),
            payout: Arc::new(payout),
        })
    }
}

fn build_client(settings: &PayosSettings, role: ClientRole) -> Result<PayosClient, PayosError> {
    let credentials = settings.credentials(role).clone();
    info!(
        %role,
        client_id = credentials.client_id(),
        log_level = %settings.log_level,
        "constructing PayOS client"
    );
    PayosClient::new(role, credentials, settings.log_level, &settings.base_url)
}

/// Load settings and build the application state.
pub fn build_state(source: &impl ConfigSource) -> Result<(Settings, AppState), StartupError> {
    let settings = Settings::load(source)?;
    let clients = PayosClients::from_settings(&settings.payos)?;
    let state = AppState::new(clients, &settings.server);
    Ok((settings, state))
}
