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

/// Represents an error creating or refreshing a token.
///
/// All the ways a token exchange can fail collapse into this type: the token
/// endpoint was unreachable, it rejected the request, or it returned a
/// payload we could not understand. None of these are fatal to the process;
/// the caller decides whether to abort the larger operation.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum CredentialError {
    /// The token endpoint could not be reached at all.
    #[error("unable to reach the token endpoint")]
    Transport(#[source] reqwest::Error),

    /// The token endpoint answered with a non-success status.
    #[error("token endpoint returned status {status}: {body}")]
    TokenEndpoint {
        /// The status returned by the token endpoint.
        status: StatusCode,
        /// A bounded copy of the response body, for diagnostics.
        body: String,
    },

    /// The token endpoint returned a body that is not a valid token payload.
    #[error("malformed token response")]
    MalformedResponse(#[source] serde_json::Error),

    /// The service account key is missing, truncated, or not a usable key.
    #[error("invalid service account key: {0}")]
    InvalidKey(String),

    /// The service account key file could not be read.
    #[error("unable to read service account key")]
    Io(#[from] std::io::Error),

    /// The service account key file could not be deserialized.
    #[error("unable to deserialize service account key")]
    Deserialization(#[source] serde_json::Error),

    /// A provider was built without any OAuth2 scopes.
    #[error("scopes must be provided")]
    MissingScopes,

    /// Anything else.
    #[error("{0}")]
    Other(String),
}
