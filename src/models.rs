// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # API Data Models
//!
//! Request and response bodies of the HTTP API. JSON field names are
//! camelCase to match the game and admin clients. Successful responses are
//! wrapped in [`ApiResponse`]; failures use the same shape with `error: -1`
//! (see `error::ApiError`).
//!
//! ## Model Categories
//!
//! - **Top-up packages**: fixed catalog of purchasable xu packages
//! - **Payment links**: PayOS checkout links for packages and in-game top-ups
//! - **Payouts**: disbursements through the payout client

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;

// =============================================================================
// Response envelope
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    /// Always `0` on success.
    pub error: i32,
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self::with_message("Success", data)
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            error: 0,
            message: message.into(),
            data,
        }
    }
}

// =============================================================================
// Top-up packages
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopUpPackage {
    pub name: &'static str,
    /// Price in VND.
    pub amount: u64,
    pub xu_received: u64,
}

pub const PACKAGES: [TopUpPackage; 5] = [
    TopUpPackage {
        name: "Gói 100",
        amount: 10_000,
        xu_received: 100,
    },
    TopUpPackage {
        name: "Gói 500",
        amount: 50_000,
        xu_received: 500,
    },
    TopUpPackage {
        name: "Gói 1000",
        amount: 100_000,
        xu_received: 1_000,
    },
    TopUpPackage {
        name: "Gói 5000",
        amount: 500_000,
        xu_received: 5_000,
    },
    TopUpPackage {
        name: "Gói 10000",
        amount: 1_000_000,
        xu_received: 10_000,
    },
];

pub fn find_package(name: &str) -> Option<&'static TopUpPackage> {
    PACKAGES.iter().find(|p| p.name == name)
}

pub fn package_names() -> Vec<&'static str> {
    PACKAGES.iter().map(|p| p.name).collect()
}

// =============================================================================
// Payment links
// =============================================================================

/// Minimum amount (VND) accepted for in-game top-ups.
pub const MIN_GAME_AMOUNT: u64 = 1_000;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentLinkRequest {
    /// Player receiving the xu.
    pub uid: String,
    /// Catalog package name, e.g. `Gói 100`.
    pub package_name: String,
}

impl CreatePaymentLinkRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.uid.trim().is_empty() {
            return Err(ApiError::bad_request("uid is required"));
        }
        if self.package_name.trim().is_empty() {
            return Err(ApiError::bad_request("packageName is required"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGamePaymentLinkRequest {
    pub uid: String,
    /// Amount in VND, at least 1000.
    pub amount: u64,
    /// Coins credited after payment, at least 1.
    pub coins: u64,
}

impl CreateGamePaymentLinkRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.uid.trim().is_empty() {
            return Err(ApiError::bad_request("uid is required"));
        }
        if self.amount < MIN_GAME_AMOUNT {
            return Err(ApiError::bad_request(format!(
                "amount must be at least {MIN_GAME_AMOUNT}"
            )));
        }
        if self.coins < 1 {
            return Err(ApiError::bad_request("coins must be at least 1"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLinkResponse {
    pub bin: String,
    pub checkout_url: String,
    pub account_number: String,
    pub account_name: String,
    pub amount: u64,
    pub description: String,
    pub order_code: i64,
    pub qr_code: String,
    pub package_name: String,
    pub xu_received: u64,
    pub uid: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GamePaymentLinkResponse {
    pub checkout_url: String,
    pub order_code: i64,
    pub coins: u64,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CancelOrderRequest {
    #[serde(default)]
    pub cancellation_reason: Option<String>,
}

// =============================================================================
// Payouts
// =============================================================================

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePayoutRequest {
    /// Caller reference; generated when absent.
    #[serde(default)]
    pub reference_id: Option<String>,
    /// Amount in VND.
    pub amount: u64,
    pub description: String,
    /// Receiving bank BIN.
    pub to_bin: String,
    pub to_account_number: String,
    #[serde(default)]
    pub category: Option<Vec<String>>,
}

impl CreatePayoutRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.amount == 0 {
            return Err(ApiError::bad_request("amount must be at least 1"));
        }
        if self.description.trim().is_empty() {
            return Err(ApiError::bad_request("description is required"));
        }
        if self.to_bin.trim().is_empty() || !self.to_bin.chars().all(|c| c.is_ascii_digit()) {
            return Err(ApiError::bad_request("toBin must be a numeric bank BIN"));
        }
        if self.to_account_number.trim().is_empty() {
            return Err(ApiError::bad_request("toAccountNumber is required"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn catalog_lookup_finds_known_packages() {
        let pkg = find_package("Gói 1000").expect("package exists");
        assert_eq!(pkg.amount, 100_000);
        assert_eq!(pkg.xu_received, 1_000);
        assert!(find_package("Gói 42").is_none());
        assert_eq!(package_names().len(), PACKAGES.len());
    }

    #[test]
    fn game_request_enforces_minimums() {
        let mut request = CreateGamePaymentLinkRequest {
            uid: "player-1".to_string(),
            amount: 999,
            coins: 10,
        };
        let error = request.validate().expect_err("amount below minimum");
        assert_eq!(error.status, StatusCode::BAD_REQUEST);

        request.amount = 1_000;
        request.coins = 0;
        assert!(request.validate().is_err());

        request.coins = 1;
        assert!(request.validate().is_ok());
    }

    #[test]
    fn payment_link_request_requires_fields() {
        let request = CreatePaymentLinkRequest {
            uid: " ".to_string(),
            package_name: "Gói 100".to_string(),
        };
        let error = request.validate().expect_err("blank uid");
        assert_eq!(error.message, "uid is required");
    }

    #[test]
    fn payout_request_rejects_non_numeric_bin() {
        let request = CreatePayoutRequest {
            reference_id: None,
            amount: 10_000,
            description: "Rut tien".to_string(),
            to_bin: "VCB".to_string(),
            to_account_number: "0123456789".to_string(),
            category: None,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn request_bodies_use_camel_case() {
        let request: CreatePayoutRequest = serde_json::from_str(
            r#"{"amount":1000,"description":"x","toBin":"970422","toAccountNumber":"1"}"#,
        )
        .expect("camelCase body");
        assert_eq!(request.to_bin, "970422");
        assert!(request.reference_id.is_none());
    }
}
