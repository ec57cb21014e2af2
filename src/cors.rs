// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Cross-origin policy.
//!
//! One fixed policy covers every route: any origin, method and request
//! header, every response header exposed, no credentials, and preflight
//! responses cached for an hour. There is no per-route variation.

use std::time::Duration;

use tower_http::cors::{Any, CorsLayer};

/// How long browsers may cache a preflight response.
pub const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(3600);

/// Build the layer installed on the router.
///
/// `allow_credentials` stays off: browsers refuse credentialed responses
/// carrying a `*` origin, and tower-http panics on that combination.
pub fn layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers(Any)
        .allow_credentials(false)
        .max_age(PREFLIGHT_MAX_AGE)
}
