// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! PayOS checksum signatures.
//!
//! Every signature is a hex-encoded HMAC-SHA256 keyed with the role's
//! checksum key. The signed message is the canonical form of a JSON object:
//! keys sorted ascending and joined as `key=value` pairs with `&`.

use hmac::{Hmac, Mac};
use serde_json::{Map, Value};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Fields covered by the payment-request signature.
const PAYMENT_REQUEST_FIELDS: [&str; 5] =
    ["amount", "cancelUrl", "description", "orderCode", "returnUrl"];

/// Render `object` in canonical `key=value&...` form.
///
/// `null` renders as an empty string, strings render raw, arrays and nested
/// objects render as JSON with their object keys sorted.
pub fn canonical_query(object: &Map<String, Value>) -> String {
    let mut keys: Vec<&String> = object.keys().collect();
    keys.sort();

    keys.into_iter()
        .map(|key| format!("{key}={}", canonical_value(&object[key.as_str()])))
        .collect::<Vec<_>>()
        .join("&")
}

fn canonical_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) if s == "null" || s == "undefined" => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => sorted(value).to_string(),
    }
}

fn sorted(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(sorted).collect()),
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut out = Map::new();
            for key in keys {
                out.insert(key.clone(), sorted(&map[key.as_str()]));
            }
            Value::Object(out)
        }
        other => other.clone(),
    }
}

/// HMAC-SHA256 over `message`, hex encoded.
pub fn sign(checksum_key: &str, message: &str) -> String {
    let mut mac = mac_for(checksum_key);
    mac.update(message.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Sign the canonical form of a JSON object. Non-object values are signed
/// as an empty object.
pub fn sign_object(checksum_key: &str, value: &Value) -> String {
    let empty = Map::new();
    let object = value.as_object().unwrap_or(&empty);
    sign(checksum_key, &canonical_query(object))
}

/// Signature for `POST /v2/payment-requests`, covering only the amount,
/// the redirect URLs, the description and the order code.
pub fn sign_payment_request(checksum_key: &str, body: &Value) -> String {
    let mut covered = Map::new();
    for field in PAYMENT_REQUEST_FIELDS {
        covered.insert(
            field.to_string(),
            body.get(field).cloned().unwrap_or(Value::Null),
        );
    }
    sign(checksum_key, &canonical_query(&covered))
}

/// Constant-time check of `signature` against the canonical form of `data`.
pub fn verify_object(checksum_key: &str, data: &Value, signature: &str) -> bool {
    let empty = Map::new();
    let object = data.as_object().unwrap_or(&empty);

    let mut mac = mac_for(checksum_key);
    mac.update(canonical_query(object).as_bytes());

    // Undecodable input is compared against zeros to keep timing uniform.
    let expected = hex::decode(signature.trim()).unwrap_or_else(|_| vec![0u8; 32]);
    mac.verify_slice(&expected).is_ok()
}

fn mac_for(checksum_key: &str) -> HmacSha256 {
    // HMAC is defined for keys of any length, so this never fails.
    match HmacSha256::new_from_slice(checksum_key.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => unreachable!("HMAC accepts any key length"),
    }
}

mod hex {
    use std::fmt::Write;

    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes.as_ref().iter().fold(String::new(), |mut s, b| {
            let _ = write!(s, "{b:02x}");
            s
        })
    }

    pub fn decode(s: &str) -> Result<Vec<u8>, ()> {
        if !s.len().is_multiple_of(2) || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(());
        }
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).map_err(|_| ()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn canonical_query_sorts_keys_and_blanks_nulls() {
        let value = json!({
            "orderCode": 123,
            "amount": 10000,
            "description": "Nap xu",
            "reference": null,
            "success": true
        });
        let query = canonical_query(value.as_object().unwrap());
        assert_eq!(
            query,
            "amount=10000&description=Nap xu&orderCode=123&reference=&success=true"
        );
    }

    #[test]
    fn canonical_query_serializes_arrays_with_sorted_objects() {
        let value = json!({
            "items": [{ "quantity": 1, "name": "Goi 100", "price": 10000 }],
            "amount": 10000
        });
        let query = canonical_query(value.as_object().unwrap());
        assert_eq!(
            query,
            r#"amount=10000&items=[{"name":"Goi 100","price":10000,"quantity":1}]"#
        );
    }

    #[test]
    fn sign_matches_known_hmac_vector() {
        // RFC 4231 test case 2.
        assert_eq!(
            sign("Jefe", "what do ya want for nothing?"),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }

    #[test]
    fn payment_request_signature_ignores_unsigned_fields() {
        let body = json!({
            "orderCode": 123,
            "amount": 10000,
            "description": "Nap xu",
            "cancelUrl": "https://example.com/cancel",
            "returnUrl": "https://example.com/return"
        });
        let mut with_items = body.clone();
        with_items["items"] = json!([{ "name": "x", "quantity": 1, "price": 10000 }]);

        let expected = sign(
            "checksum",
            "amount=10000&cancelUrl=https://example.com/cancel&description=Nap xu&orderCode=123&returnUrl=https://example.com/return",
        );
        assert_eq!(sign_payment_request("checksum", &body), expected);
        assert_eq!(sign_payment_request("checksum", &with_items), expected);
    }

    #[test]
    fn verify_accepts_matching_signature() {
        let data = json!({ "orderCode": 42, "amount": 2000, "description": "VQRIO123" });
        let signature = sign_object("checksum", &data);
        assert!(verify_object("checksum", &data, &signature));
        assert!(verify_object("checksum", &data, &signature.to_uppercase()));
    }

    #[test]
    fn verify_rejects_tampered_data_and_wrong_key() {
        let data = json!({ "orderCode": 42, "amount": 2000 });
        let signature = sign_object("checksum", &data);

        let tampered = json!({ "orderCode": 42, "amount": 2_000_000 });
        assert!(!verify_object("checksum", &tampered, &signature));
        assert!(!verify_object("other-key", &data, &signature));
    }

    #[test]
    fn verify_rejects_malformed_hex() {
        let data = json!({ "orderCode": 42 });
        assert!(!verify_object("checksum", &data, "not-hex-zz"));
        assert!(!verify_object("checksum", &data, "abc"));
    }

    #[test]
    fn hex_decode_rejects_sign_prefixed_pairs() {
        assert_eq!(hex::decode("0a0b"), Ok(vec![0x0a, 0x0b]));
        assert_eq!(hex::decode("+a0b"), Err(()));
        assert_eq!(hex::decode("0a-b"), Err(()));

        // "+5" would otherwise decode to the same byte as "05".
        let data = json!({ "orderCode": 42 });
        let signature = sign_object("checksum", &data);
        let forged = format!("+{}", &signature[1..]);
        assert!(!verify_object("checksum", &data, &forged));
    }
}
