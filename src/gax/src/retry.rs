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

use http::StatusCode;

/// The request loop's decision for a response status.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum RetryDecision {
    /// Transient server failure, try again after the retry interval.
    Retry,
    /// Authorization failure, rebuild the transport with a fresh token and
    /// try again.
    Reauthenticate,
    /// Success or a non-retryable client error, stop the loop.
    Stop,
}

/// Classifies a response status for the retry loop.
///
/// Internal server errors and bad-gateway-style statuses do not indicate
/// anything wrong with our request, so we retry them. A 401 means the token
/// was revoked or expired server-side. Everything else, success included,
/// terminates the loop.
pub(crate) fn classify(status: StatusCode) -> RetryDecision {
    match status.as_u16() {
        401 => RetryDecision::Reauthenticate,
        500 | 502 | 503 | 504 => RetryDecision::Retry,
        _ => RetryDecision::Stop,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(StatusCode::INTERNAL_SERVER_ERROR)]
    #[test_case(StatusCode::BAD_GATEWAY)]
    #[test_case(StatusCode::SERVICE_UNAVAILABLE)]
    #[test_case(StatusCode::GATEWAY_TIMEOUT)]
    fn retried(status: StatusCode) {
        assert_eq!(classify(status), RetryDecision::Retry);
    }

    #[test]
    fn reauthenticated() {
        assert_eq!(
            classify(StatusCode::UNAUTHORIZED),
            RetryDecision::Reauthenticate
        );
    }

    #[test_case(StatusCode::OK)]
    #[test_case(StatusCode::NO_CONTENT)]
    #[test_case(StatusCode::BAD_REQUEST)]
    #[test_case(StatusCode::FORBIDDEN)]
    #[test_case(StatusCode::NOT_FOUND)]
    #[test_case(StatusCode::NOT_IMPLEMENTED)]
    #[test_case(StatusCode::TOO_MANY_REQUESTS)]
    fn stopped(status: StatusCode) {
        assert_eq!(classify(status), RetryDecision::Stop);
    }
}
