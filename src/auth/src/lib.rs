// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Google Calendar client libraries for Rust - Authentication Components
//!
//! This crate contains the types and functions used to authenticate
//! server-to-server applications with a [service account key]. The client
//! crates consume a [token::TokenProvider] and use it to mint short-lived
//! bearer tokens for the RPCs issued by the application.
//!
//! The provider implements the [OAuth2 JWT-bearer grant]: it signs a
//! time-bounded claim set with the service account's RSA key and exchanges
//! that assertion for an access token at the key's token endpoint.
//!
//! [OAuth2 JWT-bearer grant]: https://datatracker.ietf.org/doc/html/rfc7523
//! [service account key]: https://google.aip.dev/auth/4112

pub mod errors;

/// Types and functions to work with service account keys.
pub mod key;

/// Types and functions to work with auth tokens.
pub mod token;

/// Pluggable persistence for tokens, keyed by account name.
pub mod store;

/// JSON Web Signature encoding for token-exchange assertions.
pub(crate) mod jws;

/// A `Result` alias where the `Err` case is
/// `google_calendar_auth::errors::CredentialError`.
pub type Result<T> = std::result::Result<T, crate::errors::CredentialError>;
