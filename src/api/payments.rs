// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Payment links and orders, served by the payment-role PayOS client.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde_json::json;
use tracing::{info, warn};

use crate::{
    error::ApiError,
    models::{
        find_package, package_names, ApiResponse, CancelOrderRequest,
        CreateGamePaymentLinkRequest, CreatePaymentLinkRequest, GamePaymentLinkResponse,
        PaymentLinkResponse,
    },
    providers::payos::types::{
        CreatePaymentLink, PaymentItem, PaymentLinkInfo, WebhookData, WebhookPayload,
    },
    state::AppState,
};

/// Order codes are the current unix time in seconds, modulo one million.
fn next_order_code() -> i64 {
    Utc::now().timestamp() % 1_000_000
}

fn parse_order_code(raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|code| *code > 0)
        .ok_or_else(|| ApiError::bad_request("Invalid order code"))
}

fn package_redirect_urls(frontend: &str) -> (String, String) {
    (
        format!("{frontend}/test-payos?result=success"),
        format!("{frontend}/test-payos?result=cancel"),
    )
}

fn game_redirect_urls(game: &str, order_code: i64) -> (String, String) {
    (
        format!("{game}/payment-return.html?orderCode={order_code}"),
        format!("{game}/payment-return.html?orderCode={order_code}&cancel=1"),
    )
}

#[utoipa::path(
    post,
    path = "/api/payos/create-link",
    request_body = CreatePaymentLinkRequest,
    tag = "Payments",
    responses(
        (status = 200, description = "Checkout link created", body = PaymentLinkResponse),
        (status = 400, description = "Unknown package or invalid body"),
        (status = 502, description = "PayOS rejected the request")
    )
)]
pub async fn create_payment_link(
    State(state): State<AppState>,
    Json(request): Json<CreatePaymentLinkRequest>,
) -> Result<Json<ApiResponse<PaymentLinkResponse>>, ApiError> {
    request.validate()?;

    let package = find_package(&request.package_name).ok_or_else(|| {
        ApiError::bad_request("Package not found")
            .with_data(json!({ "availablePackages": package_names() }))
    })?;

    let (return_url, cancel_url) = package_redirect_urls(&state.urls.frontend);
    let order_code = next_order_code();
    let link = state
        .clients
        .payment
        .create_payment_link(&CreatePaymentLink {
            order_code,
            amount: package.amount,
            description: format!("Nạp {} - {}xu", package.name, package.xu_received),
            cancel_url,
            return_url,
            items: vec![PaymentItem {
                name: package.name.to_string(),
                quantity: 1,
                price: package.amount,
            }],
            buyer_name: None,
            buyer_email: None,
            buyer_phone: None,
            expired_at: None,
        })
        .await?;

    info!(
        order_code = link.order_code,
        uid = %request.uid,
        package = package.name,
        "payment link created"
    );

    Ok(Json(ApiResponse::success(PaymentLinkResponse {
        bin: link.bin,
        checkout_url: link.checkout_url,
        account_number: link.account_number,
        account_name: link.account_name,
        amount: link.amount,
        description: link.description,
        order_code: link.order_code,
        qr_code: link.qr_code,
        package_name: package.name.to_string(),
        xu_received: package.xu_received,
        uid: request.uid,
    })))
}

#[utoipa::path(
    post,
    path = "/api/payos/create-link-game",
    request_body = CreateGamePaymentLinkRequest,
    tag = "Payments",
    responses(
        (status = 200, description = "Checkout link created", body = GamePaymentLinkResponse),
        (status = 400, description = "Amount or coins below minimum"),
        (status = 502, description = "PayOS rejected the request")
    )
)]
pub async fn create_game_payment_link(
    State(state): State<AppState>,
    Json(request): Json<CreateGamePaymentLinkRequest>,
) -> Result<Json<ApiResponse<GamePaymentLinkResponse>>, ApiError> {
    request.validate()?;

    let order_code = next_order_code();
    let (return_url, cancel_url) = game_redirect_urls(&state.urls.game, order_code);
    let item_name = format!("{} xu", request.coins);
    let link = state
        .clients
        .payment
        .create_payment_link(&CreatePaymentLink {
            order_code,
            amount: request.amount,
            description: format!("Nạp {item_name}"),
            cancel_url,
            return_url,
            items: vec![PaymentItem {
                name: item_name,
                quantity: 1,
                price: request.amount,
            }],
            buyer_name: None,
            buyer_email: None,
            buyer_phone: None,
            expired_at: None,
        })
        .await?;

    info!(
        order_code = link.order_code,
        uid = %request.uid,
        coins = request.coins,
        "game payment link created"
    );

    Ok(Json(ApiResponse::success(GamePaymentLinkResponse {
        checkout_url: link.checkout_url,
        order_code: link.order_code,
        coins: request.coins,
    })))
}

#[utoipa::path(
    get,
    path = "/api/payos/order/{order_code}",
    params(("order_code" = i64, Path, description = "PayOS order code")),
    tag = "Payments",
    responses(
        (status = 200, body = PaymentLinkInfo),
        (status = 400, description = "Order code is not a positive integer")
    )
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_code): Path<String>,
) -> Result<Json<ApiResponse<PaymentLinkInfo>>, ApiError> {
    let order_code = parse_order_code(&order_code)?;
    let order = state
        .clients
        .payment
        .get_payment_link(&order_code.to_string())
        .await?;
    Ok(Json(ApiResponse::with_message("ok", order)))
}

#[utoipa::path(
    post,
    path = "/api/payos/order/{order_code}/cancel",
    params(("order_code" = i64, Path, description = "PayOS order code")),
    request_body = CancelOrderRequest,
    tag = "Payments",
    responses(
        (status = 200, body = PaymentLinkInfo),
        (status = 400, description = "Order code is not a positive integer")
    )
)]
pub async fn cancel_order(
    State(state): State<AppState>,
    Path(order_code): Path<String>,
    Json(request): Json<CancelOrderRequest>,
) -> Result<Json<ApiResponse<PaymentLinkInfo>>, ApiError> {
    let order_code = parse_order_code(&order_code)?;
    let reason = request
        .cancellation_reason
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty());
    let order = state
        .clients
        .payment
        .cancel_payment_link(&order_code.to_string(), reason)
        .await?;

    info!(order_code, status = %order.status, "payment link cancelled");
    Ok(Json(ApiResponse::with_message("ok", order)))
}

/// Receives payment notifications from PayOS.
#[utoipa::path(
    post,
    path = "/api/payos/webhook",
    request_body = WebhookPayload,
    tag = "Payments",
    responses(
        (status = 200, body = WebhookData),
        (status = 400, description = "Signature does not match")
    )
)]
pub async fn webhook(
    State(state): State<AppState>,
    Json(payload): Json<WebhookPayload>,
) -> Result<Json<ApiResponse<WebhookData>>, ApiError> {
    let data = state.clients.payment.verify_webhook(&payload).map_err(|e| {
        warn!(code = %payload.code, "rejected PayOS webhook");
        ApiError::from(e)
    })?;

    info!(
        order_code = data.order_code,
        amount = data.amount,
        success = payload.success,
        reference = %data.reference,
        "PayOS webhook received"
    );
    Ok(Json(ApiResponse::with_message("ok", data)))
}
