// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! PayOS integration for payment links and payouts.
//!
//! A [`PayosClient`] is bound to exactly one [`ClientRole`] and one
//! [`Credentials`] tuple. Requests are authenticated with the `x-client-id`
//! and `x-api-key` headers and signed with the role's checksum key.

mod client;
mod options;
pub mod signature;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{PayosClient, PayosError};
pub use options::{ClientRole, Credentials, LogLevel, ParseLogLevelError};
