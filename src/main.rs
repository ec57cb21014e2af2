// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::process::ExitCode;

use teyvat_payos_server::{api::router, bootstrap::build_state, config::EnvSource, logging};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine; variables may come from the real environment.
    let dotenv = dotenvy::dotenv();

    logging::init(logging::format_from(&EnvSource));
    if let Ok(path) = dotenv {
        info!(path = %path.display(), "loaded environment file");
    }

    // Configuration problems abort startup before anything is served.
    let (settings, state) = match build_state(&EnvSource) {
        Ok(built) => built,
        Err(err) => {
            error!(error = %err, "startup aborted");
            return ExitCode::FAILURE;
        }
    };

    let app = router(state);
    let addr = settings.server.addr;
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(%addr, error = %err, "failed to bind listener");
            return ExitCode::FAILURE;
        }
    };

    info!(%addr, "Teyvat PayOS server listening (docs at /docs)");

    let shutdown = CancellationToken::new();
    tokio::spawn(wait_for_signal(shutdown.clone()));

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown.cancelled().await;
        info!("shutting down");
    });
    if let Err(err) = server.await {
        error!(error = %err, "server failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn wait_for_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    shutdown.cancel();
}
