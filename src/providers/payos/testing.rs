// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-process PayOS stand-in for tests.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use super::options::Credentials;
use super::signature;
use super::types::WebhookPayload;

/// Fixed credentials and fixtures understood by the stub.
pub struct StubPayos;

impl StubPayos {
    pub const CLIENT_ID: &'static str = "stub-payment-client";
    pub const API_KEY: &'static str = "stub-payment-api-key";
    pub const CHECKSUM_KEY: &'static str = "stub-payment-checksum";
    pub const PAYOUT_CLIENT_ID: &'static str = "stub-payout-client";
    pub const PAYOUT_API_KEY: &'static str = "stub-payout-api-key";
    pub const PAYOUT_CHECKSUM_KEY: &'static str = "stub-payout-checksum";

    /// Order code whose response data does not match its signature.
    pub const TAMPERED_ORDER: &'static str = "999999";

    pub fn payment_credentials() -> Credentials {
        Credentials::new(Self::CLIENT_ID, Self::API_KEY, Self::CHECKSUM_KEY)
    }

    pub fn payout_credentials() -> Credentials {
        Credentials::new(
            Self::PAYOUT_CLIENT_ID,
            Self::PAYOUT_API_KEY,
            Self::PAYOUT_CHECKSUM_KEY,
        )
    }

    /// A webhook body signed with the payment checksum key. When `tampered`
    /// is set the amount is changed after signing.
    pub fn webhook(tampered: bool) -> WebhookPayload {
        let mut data = json!({
            "orderCode": 123,
            "amount": 3000,
            "description": "VQRIO123",
            "accountNumber": "12345678",
            "reference": "TF230204212323",
            "transactionDateTime": "2023-02-04 18:25:00",
            "currency": "VND",
            "paymentLinkId": "124c33293c43417ab7879e14c8d9eb18",
            "code": "00",
            "desc": "Thành công",
            "counterAccountBankId": "",
            "counterAccountBankName": "",
            "counterAccountName": null,
            "counterAccountNumber": null,
            "virtualAccountName": "",
            "virtualAccountNumber": ""
        });
        let signature = signature::sign_object(Self::CHECKSUM_KEY, &data);
        if tampered {
            data["amount"] = json!(3_000_000);
        }
        WebhookPayload {
            code: "00".to_string(),
            desc: "success".to_string(),
            success: true,
            data,
            signature,
        }
    }
}

#[derive(Default)]
struct StubState {
    last_idempotency_key: Mutex<Option<String>>,
    last_signature_valid: Mutex<Option<bool>>,
}

pub struct StubHandle {
    pub base_url: String,
    state: Arc<StubState>,
}

impl StubHandle {
    pub fn last_idempotency_key(&self) -> Option<String> {
        self.state
            .last_idempotency_key
            .lock()
            .expect("stub lock")
            .clone()
    }

    pub fn last_signature_valid(&self) -> Option<bool> {
        *self.state.last_signature_valid.lock().expect("stub lock")
    }
}

pub async fn spawn_stub() -> StubHandle {
    let state = Arc::new(StubState::default());
    let app = Router::new()
        .route("/v2/payment-requests", post(create_payment_request))
        .route("/v2/payment-requests/{id}", get(get_payment_request))
        .route(
            "/v2/payment-requests/{id}/cancel",
            post(cancel_payment_request),
        )
        .route("/v1/payouts", post(create_payout))
        .route("/v1/payouts/{id}", get(get_payout))
        .route("/v1/payouts-account/balance", get(payout_balance))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub server");
    });

    StubHandle {
        base_url: format!("http://{addr}"),
        state,
    }
}

type StubResponse = (StatusCode, Json<Value>);

fn authorized(headers: &HeaderMap, creds: &Credentials) -> bool {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());
    header("x-client-id") == Some(creds.client_id()) && header("x-api-key") == Some(creds.api_key())
}

fn unauthorized() -> StubResponse {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "code": "201", "desc": "Invalid client credentials", "data": null })),
    )
}

fn signed(data: Value, checksum_key: &str) -> StubResponse {
    let signature = signature::sign_object(checksum_key, &data);
    (
        StatusCode::OK,
        Json(json!({ "code": "00", "desc": "success", "data": data, "signature": signature })),
    )
}

fn link_info(order_code: i64, status: &str, reason: Option<&str>) -> Value {
    json!({
        "id": format!("link-{order_code}"),
        "orderCode": order_code,
        "amount": 10000,
        "amountPaid": 0,
        "amountRemaining": 10000,
        "status": status,
        "createdAt": "2026-10-18T08:00:00+07:00",
        "transactions": [],
        "canceledAt": reason.map(|_| "2026-10-18T08:05:00+07:00"),
        "cancellationReason": reason
    })
}

async fn create_payment_request(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> StubResponse {
    if !authorized(&headers, &StubPayos::payment_credentials()) {
        return unauthorized();
    }
    let expected = signature::sign_payment_request(StubPayos::CHECKSUM_KEY, &body);
    let valid = body.get("signature").and_then(Value::as_str) == Some(expected.as_str());
    *state.last_signature_valid.lock().expect("stub lock") = Some(valid);

    let order_code = body.get("orderCode").and_then(Value::as_i64).unwrap_or(0);
    let data = json!({
        "bin": "970422",
        "accountNumber": "113366668888",
        "accountName": "TEYVAT STUDIO",
        "amount": body.get("amount").cloned().unwrap_or(Value::Null),
        "description": body.get("description").cloned().unwrap_or(Value::Null),
        "orderCode": order_code,
        "currency": "VND",
        "paymentLinkId": format!("link-{order_code}"),
        "status": "PENDING",
        "checkoutUrl": format!("https://pay.payos.vn/web/link-{order_code}"),
        "qrCode": "00020101021238570010A000000727"
    });
    signed(data, StubPayos::CHECKSUM_KEY)
}

async fn get_payment_request(Path(id): Path<String>, headers: HeaderMap) -> StubResponse {
    if !authorized(&headers, &StubPayos::payment_credentials()) {
        return unauthorized();
    }
    let order_code = id.parse::<i64>().unwrap_or(0);
    if id == StubPayos::TAMPERED_ORDER {
        let (status, Json(mut body)) =
            signed(link_info(order_code, "PENDING", None), StubPayos::CHECKSUM_KEY);
        body["data"]["amountPaid"] = json!(10000);
        return (status, Json(body));
    }
    signed(
        link_info(order_code, "PENDING", None),
        StubPayos::CHECKSUM_KEY,
    )
}

async fn cancel_payment_request(
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> StubResponse {
    if !authorized(&headers, &StubPayos::payment_credentials()) {
        return unauthorized();
    }
    let order_code = id.parse::<i64>().unwrap_or(0);
    let reason = body.get("cancellationReason").and_then(Value::as_str);
    signed(
        link_info(order_code, "CANCELLED", reason),
        StubPayos::CHECKSUM_KEY,
    )
}

fn payout_record(id: &str, reference_id: &str, amount: u64) -> Value {
    json!({
        "id": id,
        "referenceId": reference_id,
        "transactions": [{
            "id": format!("{id}-tx"),
            "referenceId": reference_id,
            "amount": amount,
            "description": "Rut tien",
            "toBin": "970422",
            "toAccountNumber": "0123456789",
            "toAccountName": null,
            "reference": null,
            "transactionDatetime": null,
            "errorMessage": null,
            "errorCode": null,
            "state": "PROCESSING"
        }],
        "category": null,
        "approvalState": "PROCESSING",
        "createdAt": "2026-10-18T08:00:00+07:00"
    })
}

async fn create_payout(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> StubResponse {
    if !authorized(&headers, &StubPayos::payout_credentials()) {
        return unauthorized();
    }
    let key = headers
        .get("x-idempotency-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    *state.last_idempotency_key.lock().expect("stub lock") = key;

    let expected = signature::sign_object(StubPayos::PAYOUT_CHECKSUM_KEY, &body);
    let valid = headers.get("x-signature").and_then(|v| v.to_str().ok()) == Some(expected.as_str());
    *state.last_signature_valid.lock().expect("stub lock") = Some(valid);

    let reference_id = body
        .get("referenceId")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let amount = body.get("amount").and_then(Value::as_u64).unwrap_or(0);
    signed(
        payout_record("payout-1", reference_id, amount),
        StubPayos::PAYOUT_CHECKSUM_KEY,
    )
}

async fn get_payout(Path(id): Path<String>, headers: HeaderMap) -> StubResponse {
    if !authorized(&headers, &StubPayos::payout_credentials()) {
        return unauthorized();
    }
    if id == "missing" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "code": "101", "desc": "Payout not found", "data": null })),
        );
    }
    signed(
        payout_record(&id, "ref-1", 50_000),
        StubPayos::PAYOUT_CHECKSUM_KEY,
    )
}

async fn payout_balance(headers: HeaderMap) -> StubResponse {
    if !authorized(&headers, &StubPayos::payout_credentials()) {
        return unauthorized();
    }
    signed(
        json!({
            "accountNumber": "0123456789",
            "accountName": "TEYVAT STUDIO",
            "currency": "VND",
            "balance": "1500000"
        }),
        StubPayos::PAYOUT_CHECKSUM_KEY,
    )
}
