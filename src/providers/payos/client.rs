// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! PayOS merchant API client.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};

use super::options::{ClientRole, Credentials, LogLevel};
use super::signature;
use super::types::{
    CreatePaymentLink, CreatePayout, Envelope, PaymentLink, PaymentLinkInfo, Payout,
    PayoutAccountBalance, WebhookData, WebhookPayload, SUCCESS_CODE,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, thiserror::Error)]
pub enum PayosError {
    #[error("PayOS client could not be built: {0}")]
    Client(String),

    #[error("PayOS request failed: {0}")]
    Request(String),

    #[error("PayOS returned error {code}: {desc}")]
    Api { code: String, desc: String },

    #[error("PayOS response was invalid: {0}")]
    InvalidResponse(String),

    #[error("PayOS signature verification failed")]
    InvalidSignature,
}

/// A PayOS client bound to one role and one credential tuple.
///
/// Built once at startup and shared read-only by request handlers. No
/// network traffic happens until one of the async methods is called.
#[derive(Debug, Clone)]
pub struct PayosClient {
    role: ClientRole,
    credentials: Credentials,
    log_level: LogLevel,
    base_url: String,
    http: Client,
}

impl PayosClient {
    pub fn new(
        role: ClientRole,
        credentials: Credentials,
        log_level: LogLevel,
        base_url: impl Into<String>,
    ) -> Result<Self, PayosError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| PayosError::Client(format!("failed to build HTTP client: {e}")))?;

        let client = Self {
            role,
            credentials,
            log_level,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        };
        client.emit(LogLevel::Debug, "PayOS client initialized", "-");
        Ok(client)
    }

    pub fn role(&self) -> ClientRole {
        self.role
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn create_payment_link(
        &self,
        request: &CreatePaymentLink,
    ) -> Result<PaymentLink, PayosError> {
        let path = "/v2/payment-requests";
        let mut body = serde_json::to_value(request)
            .map_err(|e| PayosError::InvalidResponse(format!("serialize body failed: {e}")))?;
        let signature = signature::sign_payment_request(self.credentials.checksum_key(), &body);
        body["signature"] = Value::String(signature);

        let builder = self.http.post(self.url(path)).json(&body);
        let data = self.send(builder, "POST", path, true).await?;
        decode(data, path)
    }

    /// Look up a payment link by order code or payment link id.
    pub async fn get_payment_link(&self, id: &str) -> Result<PaymentLinkInfo, PayosError> {
        let path = format!("/v2/payment-requests/{id}");
        let builder = self.http.get(self.url(&path));
        let data = self.send(builder, "GET", &path, true).await?;
        decode(data, &path)
    }

    pub async fn cancel_payment_link(
        &self,
        id: &str,
        cancellation_reason: Option<&str>,
    ) -> Result<PaymentLinkInfo, PayosError> {
        let path = format!("/v2/payment-requests/{id}/cancel");
        let body = match cancellation_reason {
            Some(reason) => json!({ "cancellationReason": reason }),
            None => json!({}),
        };
        let builder = self.http.post(self.url(&path)).json(&body);
        let data = self.send(builder, "POST", &path, true).await?;
        decode(data, &path)
    }

    pub async fn create_payout(
        &self,
        request: &CreatePayout,
        idempotency_key: &str,
    ) -> Result<Payout, PayosError> {
        let path = "/v1/payouts";
        let body = serde_json::to_value(request)
            .map_err(|e| PayosError::InvalidResponse(format!("serialize body failed: {e}")))?;
        let signature = signature::sign_object(self.credentials.checksum_key(), &body);

        let builder = self
            .http
            .post(self.url(path))
            .header("x-idempotency-key", idempotency_key)
            .header("x-signature", signature)
            .json(&body);
        let data = self.send(builder, "POST", path, false).await?;
        decode(data, path)
    }

    pub async fn get_payout(&self, payout_id: &str) -> Result<Payout, PayosError> {
        let path = format!("/v1/payouts/{payout_id}");
        let builder = self.http.get(self.url(&path));
        let data = self.send(builder, "GET", &path, false).await?;
        decode(data, &path)
    }

    pub async fn payout_balance(&self) -> Result<PayoutAccountBalance, PayosError> {
        let path = "/v1/payouts-account/balance";
        let builder = self.http.get(self.url(path));
        let data = self.send(builder, "GET", path, false).await?;
        decode(data, path)
    }

    /// Check a webhook notification against this client's checksum key and
    /// return its typed payment data.
    pub fn verify_webhook(&self, payload: &WebhookPayload) -> Result<WebhookData, PayosError> {
        if !signature::verify_object(
            self.credentials.checksum_key(),
            &payload.data,
            &payload.signature,
        ) {
            self.emit(LogLevel::Warn, "webhook signature mismatch", "webhook");
            return Err(PayosError::InvalidSignature);
        }
        decode(payload.data.clone(), "webhook")
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(
        &self,
        builder: RequestBuilder,
        method: &str,
        path: &str,
        verify_signature: bool,
    ) -> Result<Value, PayosError> {
        self.emit(LogLevel::Debug, &format!("{method} request"), path);

        let response = builder
            .header("x-client-id", self.credentials.client_id())
            .header("x-api-key", self.credentials.api_key())
            .send()
            .await
            .map_err(|e| {
                let error = PayosError::Request(format!("{method} {path} failed: {e}"));
                self.emit(LogLevel::Error, &error.to_string(), path);
                error
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            PayosError::Request(format!("{method} {path} body read failed: {e}"))
        })?;

        let envelope = match serde_json::from_str::<Envelope>(&text) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => {
                let error =
                    PayosError::Request(format!("{method} {path} returned {status}: {text}"));
                self.emit(LogLevel::Error, &error.to_string(), path);
                return Err(error);
            }
            Err(e) => {
                return Err(PayosError::InvalidResponse(format!(
                    "{method} {path} invalid JSON: {e}"
                )))
            }
        };

        if envelope.code != SUCCESS_CODE {
            self.emit(
                LogLevel::Warn,
                &format!("{method} rejected with code {}: {}", envelope.code, envelope.desc),
                path,
            );
            return Err(PayosError::Api {
                code: envelope.code,
                desc: envelope.desc,
            });
        }

        let data = envelope.data.ok_or_else(|| {
            PayosError::InvalidResponse(format!("{method} {path} response has no data"))
        })?;

        if verify_signature {
            if let Some(sig) = envelope.signature.as_deref() {
                if !signature::verify_object(self.credentials.checksum_key(), &data, sig) {
                    self.emit(LogLevel::Error, "response signature mismatch", path);
                    return Err(PayosError::InvalidSignature);
                }
            }
        }

        self.emit(LogLevel::Info, &format!("{method} succeeded"), path);
        Ok(data)
    }

    fn emit(&self, level: LogLevel, message: &str, path: &str) {
        if !self.log_level.allows(level) {
            return;
        }
        let role = self.role;
        let client_id = self.credentials.client_id();
        match level {
            LogLevel::Debug => debug!(%role, client_id, path, "{message}"),
            LogLevel::Info => info!(%role, client_id, path, "{message}"),
            LogLevel::Warn => warn!(%role, client_id, path, "{message}"),
            LogLevel::Error => error!(%role, client_id, path, "{message}"),
            LogLevel::None => {}
        }
    }
}

fn decode<T: DeserializeOwned>(data: Value, path: &str) -> Result<T, PayosError> {
    serde_json::from_value(data)
        .map_err(|e| PayosError::InvalidResponse(format!("{path} unexpected data: {e}")))
}
