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

use serde::{Deserialize, Serialize};

/// An entry in the user's calendar list.
///
/// Only the fields the listing surface needs are modeled; everything else
/// the service sends is discarded on deserialization.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalendarListEntry {
    /// Identifier of the calendar.
    pub id: String,
    /// Title of the calendar.
    pub summary: String,
    pub description: Option<String>,
    /// The IANA time zone of the calendar, e.g. `"Europe/Paris"`.
    pub time_zone: Option<String>,
    /// Whether this is the account's primary calendar.
    pub primary: Option<bool>,
}

/// An event on a calendar, or one instance of a recurring event.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Event {
    /// Opaque identifier of the event.
    pub id: String,
    /// Status of the event: `"confirmed"`, `"tentative"` or `"cancelled"`.
    pub status: Option<String>,
    /// Title of the event.
    pub summary: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    /// The (inclusive) start time.
    pub start: Option<EventTime>,
    /// The (exclusive) end time.
    pub end: Option<EventTime>,
    /// For an instance of a recurring event, the id of the recurring event.
    pub recurring_event_id: Option<String>,
    /// An absolute link to the event in the Google Calendar UI.
    pub html_link: Option<String>,
}

/// The start or end of an event, either a date or an instant.
///
/// All-day events carry `date`; timed events carry `date_time` in RFC 3339.
/// The strings are kept as the wire sends them; interpreting them is the
/// caller's concern.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventTime {
    pub date: Option<String>,
    pub date_time: Option<String>,
    pub time_zone: Option<String>,
}
