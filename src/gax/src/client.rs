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
use crate::error::Error;
use crate::options::RequestOptions;
use crate::response::Response;
use crate::retry::{RetryDecision, classify};
use auth::errors::CredentialError;
use auth::token::{Token, TokenProvider};
use http::Method;
use http::header::AUTHORIZATION;
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::Mutex;

/// Request bodies included in diagnostics are capped at this many bytes.
const BODY_SUMMARY_LIMIT: usize = 256;

/// Placeholder body for requests without one.
#[derive(serde::Serialize)]
pub struct NoBody;

/// Performs authorized HTTP calls against a base endpoint.
///
/// The client wraps a [TokenProvider] and keeps the credential fresh
/// transparently: the token's expiration is checked before every request,
/// and an authorization failure during use triggers one re-login-and-retry
/// cycle. Transient server failures are absorbed up to the configured retry
/// budget.
///
/// The client is cheap to clone; clones share the transport and the token
/// provider. Every call serializes on the shared state, so callers needing
/// real concurrency should use one client per concurrent workflow.
///
/// # Example
/// ```no_run
/// # use google_calendar_gax::client::Client;
/// # use google_calendar_gax::options::RequestOptions;
/// # use auth::{key::ServiceAccountKey, token::TokenProvider};
/// # tokio_test::block_on(async {
/// let key = ServiceAccountKey::from_file("service-account.json").await?;
/// let provider = TokenProvider::new(key, ["https://www.googleapis.com/auth/calendar"])?;
/// let client = Client::new(provider, "https://www.googleapis.com/calendar/v3");
/// client.login().await?;
/// let _response = client
///     .get::<serde_json::Value>("/users/me/calendarList", &[], RequestOptions::default())
///     .await?;
/// # Ok::<(), Box<dyn std::error::Error>>(()) });
/// ```
#[derive(Clone, Debug)]
pub struct Client {
    inner: Arc<InnerClient>,
}

#[derive(Debug)]
struct InnerClient {
    endpoint: String,
    auth: Mutex<TokenProvider>,
    transport: Mutex<Option<Transport>>,
}

/// A transport bound to one token. Rebuilt, never patched, when the token
/// is refreshed.
#[derive(Clone, Debug)]
struct Transport {
    http: reqwest::Client,
    expires_at: OffsetDateTime,
}

impl Client {
    /// Creates a client for `endpoint`, minting tokens with `provider`.
    ///
    /// The client starts unauthenticated; call [login][Client::login]
    /// before issuing requests.
    pub fn new(provider: TokenProvider, endpoint: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(InnerClient {
                endpoint: endpoint.into(),
                auth: Mutex::new(provider),
                transport: Mutex::new(None),
            }),
        }
    }

    /// The base endpoint this client targets.
    pub fn endpoint(&self) -> &str {
        &self.inner.endpoint
    }

    /// Returns a copy of the provider's cached token, if any.
    ///
    /// Callers can persist it in a [TokenStore](auth::store::TokenStore)
    /// and seed a future provider with it.
    pub async fn current_token(&self) -> Option<Token> {
        self.inner.auth.lock().await.current_token().cloned()
    }

    /// Obtains a token and activates a transport carrying its
    /// `Authorization` header.
    ///
    /// Reuses the provider's cached token while it remains valid, so a
    /// seeded provider logs in without a network round trip.
    pub async fn login(&self) -> Result<()> {
        self.login_at(OffsetDateTime::now_utc()).await
    }

    /// Like [login][Client::login], with the freshness check anchored at
    /// `now`.
    pub async fn login_at(&self, now: OffsetDateTime) -> Result<()> {
        let mut transport = self.inner.transport.lock().await;
        self.rebuild_transport(&mut transport, now, false).await
    }

    /// Issues a GET request without a body.
    pub async fn get<O>(
        &self,
        path: &str,
        query: &[(&str, String)],
        options: RequestOptions,
    ) -> Result<Response<O>>
    where
        O: serde::de::DeserializeOwned,
    {
        self.request::<NoBody, O>(Method::GET, path, query, None, options)
            .await
    }

    /// Issues a request against `endpoint + path`.
    ///
    /// The call fails immediately, without any network attempt, unless a
    /// prior [login][Client::login] succeeded. A stale token is refreshed
    /// synchronously before dispatch. The attempt loop retries transport
    /// failures and transient server statuses, and re-authenticates on 401,
    /// up to `options.retry_times()` total attempts with a fixed
    /// `options.retry_interval()` between them.
    ///
    /// If no response was ever obtained the call fails. Otherwise the last
    /// response is returned, decoded on success, body-less on a non-success
    /// status so the caller can still inspect status and headers.
    pub async fn request<B, O>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
        options: RequestOptions,
    ) -> Result<Response<O>>
    where
        B: serde::Serialize + ?Sized,
        O: serde::de::DeserializeOwned,
    {
        let now = options.now().unwrap_or_else(OffsetDateTime::now_utc);
        {
            let mut transport = self.inner.transport.lock().await;
            let stale = match transport.as_ref() {
                None => return Err(Error::NotLoggedIn),
                Some(t) => now >= t.expires_at,
            };
            if stale {
                self.rebuild_transport(&mut transport, now, false).await?;
            }
        }

        let url = format!("{}{}", self.inner.endpoint, path);
        let mut attempts = 0_u32;
        let mut last_response = None;
        let mut last_transport_error = None;
        loop {
            attempts += 1;
            let http = {
                let transport = self.inner.transport.lock().await;
                match transport.as_ref() {
                    Some(t) => t.http.clone(),
                    None => return Err(Error::NotLoggedIn),
                }
            };
            let mut builder = http.request(method.clone(), url.as_str());
            if !query.is_empty() {
                builder = builder.query(query);
            }
            if let Some(body) = body {
                builder = builder.json(body);
            }
            for (name, value) in options.extra_headers() {
                builder = builder.header(name.clone(), value.clone());
            }
            match builder.send().await {
                Ok(response) => match classify(response.status()) {
                    RetryDecision::Stop => return Self::finalize(&method, &url, response).await,
                    RetryDecision::Reauthenticate => {
                        tracing::debug!(%method, %url, "unauthorized, refreshing credential");
                        let mut transport = self.inner.transport.lock().await;
                        self.rebuild_transport(&mut transport, now, true).await?;
                        last_response = Some(response);
                    }
                    RetryDecision::Retry => {
                        tracing::debug!(
                            %method, %url,
                            status = %response.status(),
                            "transient server failure"
                        );
                        last_response = Some(response);
                    }
                },
                Err(e) => {
                    tracing::debug!(%method, %url, error = %e, "transport failure");
                    last_transport_error = Some(e);
                }
            }
            if attempts >= options.retry_times() {
                break;
            }
            tokio::time::sleep(options.retry_interval()).await;
        }

        match last_response {
            Some(response) => Self::finalize(&method, &url, response).await,
            None => {
                let source = last_transport_error
                    .expect("every attempt records either a response or a transport error");
                tracing::warn!(
                    %method, %url,
                    request_body = %summarize_request(body),
                    attempts,
                    "request failed without a response"
                );
                Err(Error::Exhausted { attempts, source })
            }
        }
    }

    /// Rebuilds the active transport from a fresh or still-valid token.
    ///
    /// With `force` set the provider's cache is bypassed, for tokens the
    /// service stopped accepting before their declared expiration. A failed
    /// rebuild drops back to the unauthenticated state.
    async fn rebuild_transport(
        &self,
        transport: &mut Option<Transport>,
        now: OffsetDateTime,
        force: bool,
    ) -> Result<()> {
        let mut auth = self.inner.auth.lock().await;
        let token = match auth.current_token() {
            Some(t) if !force && t.is_valid(now) => t.clone(),
            _ => match auth.generate_token(now).await {
                Ok(t) => t,
                Err(e) => {
                    *transport = None;
                    return Err(Error::Authentication(e));
                }
            },
        };

        let mut value =
            http::HeaderValue::from_str(&format!("{} {}", token.token_type, token.access_token))
                .map_err(|_| {
                    Error::Authentication(CredentialError::Other(
                        "token is not a valid header value".into(),
                    ))
                })?;
        value.set_sensitive(true);
        let mut headers = http::HeaderMap::new();
        headers.insert(AUTHORIZATION, value);
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(Error::Transport)?;
        *transport = Some(Transport {
            http,
            expires_at: token.expires_at,
        });
        Ok(())
    }

    /// Turns the terminal response of the attempt loop into the caller's
    /// result. An empty successful body decodes to `None`, not an error.
    async fn finalize<O>(
        method: &Method,
        url: &str,
        response: reqwest::Response,
    ) -> Result<Response<O>>
    where
        O: serde::de::DeserializeOwned,
    {
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.bytes().await.map_err(Error::Transport)?;
        if !status.is_success() {
            tracing::warn!(
                %method, %url, %status,
                body = %summarize(&String::from_utf8_lossy(&bytes)),
                "request rejected"
            );
            return Ok(Response::new(status, headers, None));
        }
        let body = if bytes.is_empty() {
            None
        } else {
            Some(serde_json::from_slice::<O>(&bytes).map_err(Error::Deserialization)?)
        };
        Ok(Response::new(status, headers, body))
    }
}

/// The request capability the listing clients program against.
///
/// [Client] is the production implementation; tests substitute doubles.
/// Payloads are JSON values so the trait stays object-safe.
#[async_trait::async_trait]
pub trait Requester: Send + Sync {
    async fn request_json(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
        options: RequestOptions,
    ) -> Result<Response<serde_json::Value>>;
}

#[async_trait::async_trait]
impl Requester for Client {
    async fn request_json(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
        options: RequestOptions,
    ) -> Result<Response<serde_json::Value>> {
        self.request(method, path, query, body.as_ref(), options)
            .await
    }
}

fn summarize(body: &str) -> String {
    if body.len() <= BODY_SUMMARY_LIMIT {
        return body.to_string();
    }
    let mut end = BODY_SUMMARY_LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

fn summarize_request<B: serde::Serialize + ?Sized>(body: Option<&B>) -> String {
    body.and_then(|b| serde_json::to_string(b).ok())
        .map(|s| summarize(&s))
        .unwrap_or_default()
}
