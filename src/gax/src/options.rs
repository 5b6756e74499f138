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

use http::{HeaderName, HeaderValue};
use std::time::Duration;
use time::OffsetDateTime;

/// The recognized per-request options and their defaults.
///
/// # Example
/// ```
/// # use google_calendar_gax::options::RequestOptions;
/// # use std::time::Duration;
/// let options = RequestOptions::default()
///     .set_retry_times(5)
///     .set_retry_interval(Duration::from_millis(250));
/// assert_eq!(options.retry_times(), 5);
/// ```
#[derive(Clone, Debug)]
pub struct RequestOptions {
    retry_times: u32,
    retry_interval: Duration,
    extra_headers: Vec<(HeaderName, HeaderValue)>,
    now: Option<OffsetDateTime>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            retry_times: 3,
            retry_interval: Duration::from_secs(1),
            extra_headers: Vec::new(),
            now: None,
        }
    }
}

impl RequestOptions {
    /// Sets the total number of attempts, including the first one. Clamped
    /// to at least one attempt.
    pub fn set_retry_times(mut self, v: u32) -> Self {
        self.retry_times = v.max(1);
        self
    }

    /// The total number of attempts.
    pub fn retry_times(&self) -> u32 {
        self.retry_times
    }

    /// Sets the fixed delay between attempts.
    pub fn set_retry_interval(mut self, v: Duration) -> Self {
        self.retry_interval = v;
        self
    }

    /// The fixed delay between attempts.
    pub fn retry_interval(&self) -> Duration {
        self.retry_interval
    }

    /// Appends a header to the request. Caller headers are concatenated
    /// after the defaults, they do not replace them.
    pub fn add_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.extra_headers.push((name, value));
        self
    }

    /// The caller-supplied extra headers.
    pub fn extra_headers(&self) -> &[(HeaderName, HeaderValue)] {
        &self.extra_headers
    }

    /// Overrides the instant used for the token freshness check. Mostly
    /// useful in tests; when unset the wall clock is used.
    pub fn set_now(mut self, v: OffsetDateTime) -> Self {
        self.now = Some(v);
        self
    }

    /// The instant used for the token freshness check, if overridden.
    pub fn now(&self) -> Option<OffsetDateTime> {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = RequestOptions::default();
        assert_eq!(options.retry_times(), 3);
        assert_eq!(options.retry_interval(), Duration::from_secs(1));
        assert!(options.extra_headers().is_empty());
        assert!(options.now().is_none());
    }

    #[test]
    fn retry_times_has_a_floor() {
        let options = RequestOptions::default().set_retry_times(0);
        assert_eq!(options.retry_times(), 1);
    }

    #[test]
    fn headers_accumulate_in_order() {
        let options = RequestOptions::default()
            .add_header(
                HeaderName::from_static("x-test-one"),
                HeaderValue::from_static("1"),
            )
            .add_header(
                HeaderName::from_static("x-test-two"),
                HeaderValue::from_static("2"),
            );
        let names: Vec<_> = options
            .extra_headers()
            .iter()
            .map(|(n, _)| n.as_str())
            .collect();
        assert_eq!(names, vec!["x-test-one", "x-test-two"]);
    }
}
