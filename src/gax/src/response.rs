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

//! Response types.
//!
//! A [Response] carries both the decoded body and the raw response metadata.
//! Callers needing only the payload call [Response::into_body] and discard
//! the rest; callers needing status or headers use the accessors. A
//! non-success status yields a response with an empty body rather than an
//! error, so the status and headers remain inspectable.

use http::{HeaderMap, HeaderValue, StatusCode};

/// Represents a service response.
///
/// # Examples
///
/// ```
/// # use google_calendar_gax::response::Response;
/// let response = Response::from_body(serde_json::json!({"id": "primary"}));
/// assert!(response.status().is_success());
/// assert!(response.body().is_some());
/// ```
#[derive(Clone, Debug)]
pub struct Response<T> {
    status: StatusCode,
    headers: HeaderMap<HeaderValue>,
    body: Option<T>,
}

impl<T> Response<T> {
    /// Creates a response from its parts.
    pub fn new(status: StatusCode, headers: HeaderMap<HeaderValue>, body: Option<T>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Creates a successful response from a body. Useful for mocks.
    pub fn from_body(body: T) -> Self {
        Self {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: Some(body),
        }
    }

    /// The status returned by the service.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The headers returned by the service.
    pub fn headers(&self) -> &HeaderMap<HeaderValue> {
        &self.headers
    }

    /// The decoded body, if the service returned one.
    ///
    /// `None` when the response body was empty, or when the service
    /// responded with a non-success status.
    pub fn body(&self) -> Option<&T> {
        self.body.as_ref()
    }

    /// Consumes the response returning only its body.
    pub fn into_body(self) -> Option<T> {
        self.body
    }

    /// Consumes the response returning the metadata and the body.
    pub fn into_parts(self) -> (StatusCode, HeaderMap<HeaderValue>, Option<T>) {
        (self.status, self.headers, self.body)
    }
}
