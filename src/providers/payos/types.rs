// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! PayOS request and response bodies (camelCase on the wire).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Response code PayOS uses for success.
pub const SUCCESS_CODE: &str = "00";

/// Envelope wrapping every PayOS response.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    pub code: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub signature: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct PaymentItem {
    pub name: String,
    pub quantity: u32,
    pub price: u64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentLink {
    pub order_code: i64,
    pub amount: u64,
    pub description: String,
    pub cancel_url: String,
    pub return_url: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<PaymentItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_phone: Option<String>,
    /// Unix timestamp after which the link stops accepting payments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expired_at: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLink {
    pub bin: String,
    pub account_number: String,
    pub account_name: String,
    pub amount: u64,
    pub description: String,
    pub order_code: i64,
    #[serde(default)]
    pub currency: Option<String>,
    pub payment_link_id: String,
    pub status: String,
    pub checkout_url: String,
    pub qr_code: String,
    #[serde(default)]
    pub expired_at: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTransaction {
    pub reference: String,
    pub amount: i64,
    pub account_number: String,
    pub description: String,
    pub transaction_date_time: String,
    #[serde(default)]
    pub virtual_account_name: Option<String>,
    #[serde(default)]
    pub virtual_account_number: Option<String>,
    #[serde(default)]
    pub counter_account_bank_id: Option<String>,
    #[serde(default)]
    pub counter_account_bank_name: Option<String>,
    #[serde(default)]
    pub counter_account_name: Option<String>,
    #[serde(default)]
    pub counter_account_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLinkInfo {
    pub id: String,
    pub order_code: i64,
    pub amount: u64,
    pub amount_paid: u64,
    pub amount_remaining: u64,
    pub status: String,
    pub created_at: String,
    #[serde(default)]
    pub transactions: Vec<PaymentTransaction>,
    #[serde(default)]
    pub canceled_at: Option<String>,
    #[serde(default)]
    pub cancellation_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreatePayout {
    pub reference_id: String,
    pub amount: u64,
    pub description: String,
    pub to_bin: String,
    pub to_account_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayoutTransaction {
    pub id: String,
    pub reference_id: String,
    pub amount: u64,
    pub description: String,
    pub to_bin: String,
    pub to_account_number: String,
    #[serde(default)]
    pub to_account_name: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub transaction_datetime: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
    pub state: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payout {
    pub id: String,
    pub reference_id: String,
    #[serde(default)]
    pub transactions: Vec<PayoutTransaction>,
    #[serde(default)]
    pub category: Option<Vec<String>>,
    pub approval_state: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayoutAccountBalance {
    pub account_number: String,
    pub account_name: String,
    pub currency: String,
    pub balance: String,
}

/// Payment notification posted by PayOS to the webhook URL.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct WebhookPayload {
    pub code: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub success: bool,
    pub data: Value,
    pub signature: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WebhookData {
    pub order_code: i64,
    pub amount: i64,
    pub description: String,
    pub account_number: String,
    pub reference: String,
    pub transaction_date_time: String,
    #[serde(default)]
    pub currency: Option<String>,
    pub payment_link_id: String,
    pub code: String,
    pub desc: String,
    #[serde(default)]
    pub counter_account_bank_id: Option<String>,
    #[serde(default)]
    pub counter_account_bank_name: Option<String>,
    #[serde(default)]
    pub counter_account_name: Option<String>,
    #[serde(default)]
    pub counter_account_number: Option<String>,
    #[serde(default)]
    pub virtual_account_name: Option<String>,
    #[serde(default)]
    pub virtual_account_number: Option<String>,
}
