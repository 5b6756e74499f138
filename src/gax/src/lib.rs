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

//! Google Calendar API helpers.
//!
//! This crate contains the request machinery shared by the Google Calendar
//! client libraries for Rust: an authenticated HTTP client that keeps its
//! credential fresh and absorbs transient failures, and a lazy pager over
//! cursor-paged list endpoints.

/// An alias of [std::result::Result] where the error is always
/// [crate::error::Error].
pub type Result<T> = std::result::Result<T, crate::error::Error>;

/// The core error types used by clients.
pub mod error;

/// The authenticated HTTP client.
pub mod client;

/// Per-request configuration.
pub mod options;

/// Service response types.
pub mod response;

/// Retry decisions for the request loop.
pub(crate) mod retry;

/// A lazy iterator over cursor-paged list endpoints.
pub mod pager;
