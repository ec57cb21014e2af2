// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    cors,
    error::ApiError,
    models::{
        CancelOrderRequest, CreateGamePaymentLinkRequest, CreatePaymentLinkRequest,
        CreatePayoutRequest, GamePaymentLinkResponse, PaymentLinkResponse,
    },
    providers::payos::types::{
        PaymentItem, PaymentLinkInfo, PaymentTransaction, Payout, PayoutAccountBalance,
        PayoutTransaction, WebhookData, WebhookPayload,
    },
    state::AppState,
};

pub mod health;
pub mod payments;
pub mod payouts;

/// Build the HTTP surface. The CORS policy is the outermost layer so it
/// covers every route, the docs and the fallback alike.
pub fn router(state: AppState) -> Router {
    let payos_routes = Router::new()
        .route("/create-link", post(payments::create_payment_link))
        .route("/create-link-game", post(payments::create_game_payment_link))
        .route("/order/{order_code}", get(payments::get_order))
        .route("/order/{order_code}/cancel", post(payments::cancel_order))
        .route("/payouts", post(payouts::create_payout))
        .route("/payouts/balance", get(payouts::payout_balance))
        .route("/payouts/{payout_id}", get(payouts::get_payout))
        .route("/webhook", post(payments::webhook));

    Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .nest("/api/payos", payos_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .fallback(not_found)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(cors::layer())
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("No route for {}", uri.path()))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        health::liveness,
        payments::create_payment_link,
        payments::create_game_payment_link,
        payments::get_order,
        payments::cancel_order,
        payments::webhook,
        payouts::create_payout,
        payouts::get_payout,
        payouts::payout_balance
    ),
    components(
        schemas(
            health::HealthResponse,
            health::LiveResponse,
            CreatePaymentLinkRequest,
            CreateGamePaymentLinkRequest,
            CancelOrderRequest,
            CreatePayoutRequest,
            PaymentLinkResponse,
            GamePaymentLinkResponse,
            PaymentItem,
            PaymentLinkInfo,
            PaymentTransaction,
            Payout,
            PayoutTransaction,
            PayoutAccountBalance,
            WebhookData,
            WebhookPayload
        )
    ),
    tags(
        (name = "Health", description = "Liveness and health probes"),
        (name = "Payments", description = "PayOS payment links and orders"),
        (name = "Payouts", description = "PayOS payouts")
    )
)]
struct ApiDoc;
