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

use auth::errors::CredentialError;

/// The error type for client requests.
///
/// Requests fail in one of a small number of ways: the client was never
/// logged in, the credential could not be refreshed, the service could not
/// be reached even after retries, or the response body could not be decoded.
/// A resource responding with a non-success status is **not** an error; the
/// caller receives the [Response](crate::response::Response) and inspects
/// its status.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The client has no active transport. Call
    /// [login](crate::client::Client::login) first.
    #[error("no active transport, call login first")]
    NotLoggedIn,

    /// A login or re-login failed; the request was not dispatched.
    #[error("unable to obtain an access token")]
    Authentication(#[source] CredentialError),

    /// The request could not be built or dispatched.
    #[error("unable to issue the request")]
    Transport(#[source] reqwest::Error),

    /// No response was obtained within the retry budget.
    #[error("no response obtained after {attempts} attempts")]
    Exhausted {
        /// The number of attempts performed.
        attempts: u32,
        /// The transport failure observed on the last attempt.
        #[source]
        source: reqwest::Error,
    },

    /// The response body is not valid JSON for the expected type.
    #[error("unable to decode the response body")]
    Deserialization(#[source] serde_json::Error),

    /// The service answered with a status the caller treats as a failure,
    /// for example a non-success status on a page fetch.
    #[error("service returned status {status}")]
    UnexpectedStatus {
        /// The status returned by the service.
        status: http::StatusCode,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn authentication_preserves_source() {
        let e = Error::Authentication(CredentialError::MissingScopes);
        assert!(e.source().is_some(), "{e:?}");
        assert!(e.to_string().contains("access token"), "{e}");
    }

    #[test]
    fn exhausted_reports_attempts() {
        let inner = serde_json::from_str::<serde_json::Value>("no").unwrap_err();
        let e = Error::Deserialization(inner);
        assert!(e.source().is_some(), "{e:?}");
        let e = Error::NotLoggedIn;
        assert!(e.to_string().contains("login"), "{e}");
    }
}
