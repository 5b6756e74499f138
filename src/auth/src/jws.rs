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
use serde::Serialize;
use time::OffsetDateTime;

/// The claim set of a token-exchange assertion.
///
/// `iat` and `exp` bound the assertion's own lifetime. This is distinct from
/// the lifetime of the access token granted in exchange for it.
#[derive(Serialize)]
pub(crate) struct JwsClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    #[serde(with = "time::serde::timestamp")]
    pub exp: OffsetDateTime,
    #[serde(with = "time::serde::timestamp")]
    pub iat: OffsetDateTime,
}

impl JwsClaims {
    pub(crate) fn encode(&self) -> Result<String> {
        if self.exp < self.iat {
            return Err(CredentialError::Other(format!(
                "assertion expiration {:?} must be later than issued time {:?}",
                self.exp, self.iat
            )));
        }
        use base64::prelude::{BASE64_URL_SAFE_NO_PAD, Engine as _};
        let json = serde_json::to_string(&self)
            .map_err(|e| CredentialError::Other(format!("unable to encode assertion: {e}")))?;
        Ok(BASE64_URL_SAFE_NO_PAD.encode(json.as_bytes()))
    }
}

/// The header that describes who, what, and how the assertion was signed.
#[derive(Serialize)]
pub(crate) struct JwsHeader<'a> {
    pub alg: &'a str,
    pub typ: &'a str,
    pub kid: &'a str,
}

impl JwsHeader<'_> {
    pub(crate) fn encode(&self) -> Result<String> {
        use base64::prelude::{BASE64_URL_SAFE_NO_PAD, Engine as _};
        let json = serde_json::to_string(&self)
            .map_err(|e| CredentialError::Other(format!("unable to encode assertion: {e}")))?;
        Ok(BASE64_URL_SAFE_NO_PAD.encode(json.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use serde_json::Value;
    use std::time::Duration;

    fn b64_decode_to_json(s: &str) -> Value {
        let decoded = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(s)
            .unwrap();
        serde_json::from_slice(&decoded).unwrap()
    }

    #[test]
    fn claims_encode() {
        let now = OffsetDateTime::now_utc();
        let then = now + Duration::from_secs(300);
        let claims = JwsClaims {
            iss: "test-iss".to_string(),
            scope: "scope1 scope2".to_string(),
            aud: "https://example.com/token".to_string(),
            exp: then,
            iat: now,
        };

        let v = b64_decode_to_json(&claims.encode().unwrap());
        assert_eq!(v["iss"], "test-iss");
        assert_eq!(v["scope"], "scope1 scope2");
        assert_eq!(v["aud"], "https://example.com/token");
        assert_eq!(v["iat"], now.unix_timestamp());
        assert_eq!(v["exp"], then.unix_timestamp());
    }

    #[test]
    fn claims_encode_error_exp_before_iat() {
        let now = OffsetDateTime::now_utc();
        let claims = JwsClaims {
            iss: "test-iss".to_string(),
            scope: "scope".to_string(),
            aud: "aud".to_string(),
            exp: now - Duration::from_secs(60),
            iat: now,
        };
        let err = claims.encode().unwrap_err();
        assert!(
            err.to_string().contains("must be later than issued time"),
            "{err}"
        );
    }

    #[test]
    fn header_encode() {
        let header = JwsHeader {
            alg: "RS256",
            typ: "JWT",
            kid: "some-key-id",
        };
        let v = b64_decode_to_json(&header.encode().unwrap());
        assert_eq!(v["alg"], "RS256");
        assert_eq!(v["typ"], "JWT");
        assert_eq!(v["kid"], "some-key-id");
    }
}
