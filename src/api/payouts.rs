// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Payouts, served by the payout-role PayOS client.

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::{
    error::ApiError,
    models::{ApiResponse, CreatePayoutRequest},
    providers::payos::types::{CreatePayout, Payout, PayoutAccountBalance},
    state::AppState,
};

fn resolve_reference_id(raw: Option<&str>) -> String {
    raw.map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("payout-{}", Uuid::new_v4().simple()))
}

#[utoipa::path(
    post,
    path = "/api/payos/payouts",
    request_body = CreatePayoutRequest,
    tag = "Payouts",
    responses(
        (status = 200, body = Payout),
        (status = 400, description = "Invalid payout request"),
        (status = 502, description = "PayOS rejected the payout")
    )
)]
pub async fn create_payout(
    State(state): State<AppState>,
    Json(request): Json<CreatePayoutRequest>,
) -> Result<Json<ApiResponse<Payout>>, ApiError> {
    request.validate()?;

    let reference_id = resolve_reference_id(request.reference_id.as_deref());
    let idempotency_key = Uuid::new_v4().to_string();
    let payout = state
        .clients
        .payout
        .create_payout(
            &CreatePayout {
                reference_id,
                amount: request.amount,
                description: request.description.trim().to_string(),
                to_bin: request.to_bin.trim().to_string(),
                to_account_number: request.to_account_number.trim().to_string(),
                category: request.category,
            },
            &idempotency_key,
        )
        .await?;

    info!(
        payout_id = %payout.id,
        reference_id = %payout.reference_id,
        approval_state = %payout.approval_state,
        "payout created"
    );
    Ok(Json(ApiResponse::success(payout)))
}

#[utoipa::path(
    get,
    path = "/api/payos/payouts/{payout_id}",
    params(("payout_id" = String, Path, description = "PayOS payout ID")),
    tag = "Payouts",
    responses((status = 200, body = Payout))
)]
pub async fn get_payout(
    State(state): State<AppState>,
    Path(payout_id): Path<String>,
) -> Result<Json<ApiResponse<Payout>>, ApiError> {
    let payout_id = payout_id.trim();
    let valid = !payout_id.is_empty()
        && payout_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(ApiError::bad_request("Invalid payout id"));
    }
    let payout = state.clients.payout.get_payout(payout_id).await?;
    Ok(Json(ApiResponse::with_message("ok", payout)))
}

#[utoipa::path(
    get,
    path = "/api/payos/payouts/balance",
    tag = "Payouts",
    responses((status = 200, body = PayoutAccountBalance))
)]
pub async fn payout_balance(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<PayoutAccountBalance>>, ApiError> {
    let balance = state.clients.payout.payout_balance().await?;
    Ok(Json(ApiResponse::with_message("ok", balance)))
}
