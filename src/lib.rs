// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Teyvat PayOS Server - payment and payout gateway
//!
//! Loads two independent PayOS credential sets at startup, builds one
//! client per role and serves the payment API behind a permissive CORS
//! policy. Startup fails fast on any configuration problem.
//!
//! ## Modules
//!
//! - `config` - Configuration keys and loading
//! - `bootstrap` - Client construction and application state
//! - `cors` - Cross-origin policy applied to every route
//! - `providers` - PayOS client, request signing and wire types
//! - `api` - HTTP API handlers (Axum)

pub mod api;
pub mod bootstrap;
pub mod config;
pub mod cors;
pub mod error;
pub mod logging;
pub mod models;
pub mod providers;
pub mod state;
