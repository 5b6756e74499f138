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

//! Google Calendar API v3 client library.
//!
//! This crate exposes the listing surface of the [Calendar API]: calendars,
//! events, and recurring-event instances. Every list call returns a lazy
//! [Pager](gax::pager::Pager) that fetches pages on demand and hides the
//! `pageToken` bookkeeping.
//!
//! # Example
//! ```no_run
//! # use auth::{key::ServiceAccountKey, token::TokenProvider};
//! # use gax::client::Client;
//! # use google_calendar_v3::{CalendarClient, EventListParams};
//! # tokio_test::block_on(async {
//! let key = ServiceAccountKey::from_file("service-account.json").await?;
//! let provider = TokenProvider::new(key, ["https://www.googleapis.com/auth/calendar"])?;
//! let client = Client::new(provider, "https://www.googleapis.com/calendar/v3");
//! client.login().await?;
//!
//! let calendar = CalendarClient::new(client);
//! let params = EventListParams::default().set_single_events(true);
//! let mut events = calendar.list_events("primary", params);
//! while let Some(event) = events.next().await {
//!     println!("{}", event.summary.unwrap_or_default());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(()) });
//! ```
//!
//! [Calendar API]: https://developers.google.com/calendar/api/v3/reference

mod client;

/// Resource types returned by the Calendar API.
pub mod model;

pub use client::{CalendarClient, EventListParams, ListFetcher, ListPager};
