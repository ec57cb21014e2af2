// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::bootstrap::PayosClients;
use crate::config::ServerSettings;

#[derive(Debug, Clone)]
pub struct AppState {
    pub clients: PayosClients,
    pub urls: Arc<RedirectUrls>,
}

/// Base URLs that PayOS redirects buyers back to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectUrls {
    /// Admin/web frontend, used by the package top-up flow.
    pub frontend: String,
    /// Game client, used by the in-game top-up flow.
    pub game: String,
}

impl AppState {
    pub fn new(clients: PayosClients, server: &ServerSettings) -> Self {
        Self {
            clients,
            urls: Arc::new(RedirectUrls {
                frontend: server.frontend_url.clone(),
                game: server.game_url.clone(),
            }),
        }
    }
}

#[cfg(test)]
pub(crate) fn test_state(payos_base_url: &str) -> AppState {
    use crate::providers::payos::testing::StubPayos;
    use crate::providers::payos::{ClientRole, LogLevel, PayosClient};

    let client = |role, credentials| {
        Arc::new(
            PayosClient::new(role, credentials, LogLevel::Debug, payos_base_url)
                .expect("test client"),
        )
    };
    AppState {
        clients: PayosClients {
            payment: client(ClientRole::Payment, StubPayos::payment_credentials()),
            payout: client(ClientRole::Payout, StubPayos::payout_credentials()),
        },
        urls: Arc::new(RedirectUrls {
            frontend: "http://localhost:3000".to_string(),
            game: "https://game.example".to_string(),
        }),
    }
}
