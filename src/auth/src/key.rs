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

use crate::Result;
use crate::errors::CredentialError;
use serde::Deserialize;
use std::path::Path;
use zeroize::Zeroize;

/// A representation of a [service account key] in the format described by
/// [aip/4112].
///
/// Service account keys contain the cryptographic material (an RSA private
/// key) required to authenticate the caller. Treat them like unencrypted
/// passwords. The PEM text is wiped from memory when the value is dropped.
///
/// [aip/4112]: https://google.aip.dev/auth/4112
/// [service account key]: https://cloud.google.com/iam/docs/keys-create-delete#creating
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    /// The client email address of the service account, used as the issuer
    /// of token-exchange assertions.
    pub client_email: String,
    /// ID of the service account's private key.
    pub private_key_id: String,
    /// The PEM-encoded PKCS#8 private key associated with the service account.
    pub private_key: String,
    /// The OAuth2 token endpoint assertions are exchanged against.
    pub token_uri: String,
}

impl ServiceAccountKey {
    /// Reads a service account key from a JSON file.
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = tokio::fs::read(path).await?;
        Self::from_json(&contents)
    }

    /// Parses a service account key from JSON key data, for example, when
    /// the key is obtained from a secret manager or a similar service.
    pub fn from_json(contents: &[u8]) -> Result<Self> {
        serde_json::from_slice(contents).map_err(CredentialError::Deserialization)
    }
}

impl std::fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key_id", &self.private_key_id)
            .field("private_key", &"[censored]")
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

impl Drop for ServiceAccountKey {
    fn drop(&mut self) {
        self.private_key.zeroize();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    pub(crate) fn test_key_json(private_key: &str, token_uri: &str) -> Vec<u8> {
        json!({
            "type": "service_account",
            "client_email": "test-client-email@example.iam.gserviceaccount.com",
            "private_key_id": "test-private-key-id",
            "private_key": private_key,
            "token_uri": token_uri,
            "project_id": "test-project-id",
        })
        .to_string()
        .into_bytes()
    }

    #[test]
    fn from_json_tolerates_extra_fields() {
        let key = ServiceAccountKey::from_json(&test_key_json("pem", "https://example.com/token"))
            .unwrap();
        assert_eq!(
            key.client_email,
            "test-client-email@example.iam.gserviceaccount.com"
        );
        assert_eq!(key.private_key_id, "test-private-key-id");
        assert_eq!(key.token_uri, "https://example.com/token");
    }

    #[test]
    fn from_json_rejects_incomplete_keys() {
        let err = ServiceAccountKey::from_json(br#"{"client_email": "only-email"}"#).unwrap_err();
        assert!(
            matches!(err, CredentialError::Deserialization(_)),
            "{err:?}"
        );
    }

    #[tokio::test]
    async fn from_file_missing() {
        let err = ServiceAccountKey::from_file("/very/unlikely/to/exist.json")
            .await
            .unwrap_err();
        assert!(matches!(err, CredentialError::Io(_)), "{err:?}");
    }

    #[test]
    fn debug_redacts_private_key() {
        let key =
            ServiceAccountKey::from_json(&test_key_json("super-duper-secret", "https://e/token"))
                .unwrap();
        let fmt = format!("{key:?}");
        assert!(fmt.contains("test-client-email"), "{fmt}");
        assert!(!fmt.contains("super-duper-secret"), "{fmt}");
        assert!(fmt.contains("[censored]"), "{fmt}");
    }
}
