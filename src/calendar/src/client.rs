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

use crate::model::{CalendarListEntry, Event};
use gax::client::Requester;
use gax::error::Error;
use gax::options::RequestOptions;
use gax::pager::{Page, PageFetcher, Pager};
use http::Method;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;

// Everything a path segment must escape, over and above controls.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// The wire envelope common to all Calendar list responses.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct ListEnvelope<T> {
    #[serde(default)]
    items: Vec<T>,
    next_page_token: Option<String>,
}

impl<T> ListEnvelope<T> {
    fn empty() -> Self {
        Self {
            items: Vec::new(),
            next_page_token: None,
        }
    }
}

/// The pager type returned by the listing operations.
pub type ListPager<R, T> = Pager<ListFetcher<R, T>, T, fn(T) -> T>;

/// Typed access to the Calendar API listing surface.
///
/// The client is generic over the [Requester] so tests can substitute a
/// double; production code wraps a [gax::client::Client].
pub struct CalendarClient<R> {
    requester: Arc<R>,
    options: RequestOptions,
}

impl<R> CalendarClient<R>
where
    R: Requester + Send + Sync + 'static,
{
    /// Creates a client issuing requests through `requester`.
    pub fn new(requester: R) -> Self {
        Self {
            requester: Arc::new(requester),
            options: RequestOptions::default(),
        }
    }

    /// Overrides the request options used by this client's list calls.
    pub fn with_request_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// Lists the calendars on the account's calendar list.
    pub fn list_calendars(&self) -> ListPager<R, CalendarListEntry> {
        self.pager("/users/me/calendarList".to_string(), Vec::new())
    }

    /// Lists the events of one calendar.
    pub fn list_events(&self, calendar_id: &str, params: EventListParams) -> ListPager<R, Event> {
        self.pager(
            format!("/calendars/{}/events", segment(calendar_id)),
            params.into_query(),
        )
    }

    /// Lists the instances of one recurring event.
    pub fn list_instances(&self, calendar_id: &str, event_id: &str) -> ListPager<R, Event> {
        self.pager(
            format!(
                "/calendars/{}/events/{}/instances",
                segment(calendar_id),
                segment(event_id)
            ),
            Vec::new(),
        )
    }

    fn pager<T>(&self, path: String, params: Vec<(&'static str, String)>) -> ListPager<R, T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        Pager::new(ListFetcher {
            requester: self.requester.clone(),
            path,
            params,
            options: self.options.clone(),
            _marker: PhantomData,
        })
    }
}

/// Fetches one kind of list page, threading the `pageToken` cursor.
///
/// All the listing operations share this one fetcher; only the path and the
/// fixed query parameters differ.
pub struct ListFetcher<R, T> {
    requester: Arc<R>,
    path: String,
    params: Vec<(&'static str, String)>,
    options: RequestOptions,
    _marker: PhantomData<fn() -> T>,
}

#[async_trait::async_trait]
impl<R, T> PageFetcher for ListFetcher<R, T>
where
    R: Requester + Send + Sync,
    T: DeserializeOwned + Send,
{
    type Item = T;

    async fn fetch_page(&mut self, cursor: Option<&str>) -> gax::Result<Page<T>> {
        let mut query: Vec<(&str, String)> = self.params.clone();
        if let Some(cursor) = cursor {
            query.push(("pageToken", cursor.to_string()));
        }
        let response = self
            .requester
            .request_json(Method::GET, &self.path, &query, None, self.options.clone())
            .await?;
        let (status, _, body) = response.into_parts();
        if !status.is_success() {
            return Err(Error::UnexpectedStatus { status });
        }
        let envelope = match body {
            Some(value) => {
                serde_json::from_value::<ListEnvelope<T>>(value).map_err(Error::Deserialization)?
            }
            None => ListEnvelope::empty(),
        };
        Ok(Page {
            items: envelope.items,
            next_cursor: envelope.next_page_token,
        })
    }
}

fn segment(raw: &str) -> String {
    utf8_percent_encode(raw, SEGMENT).to_string()
}

/// The recognized filters for [CalendarClient::list_events].
#[derive(Clone, Debug, Default)]
pub struct EventListParams {
    time_min: Option<String>,
    time_max: Option<String>,
    single_events: Option<bool>,
    order_by: Option<String>,
    query: Option<String>,
    max_results: Option<u32>,
}

impl EventListParams {
    /// Lower bound (exclusive) on the end time of events, RFC 3339.
    pub fn set_time_min(mut self, v: impl Into<String>) -> Self {
        self.time_min = Some(v.into());
        self
    }

    /// Upper bound (exclusive) on the start time of events, RFC 3339.
    pub fn set_time_max(mut self, v: impl Into<String>) -> Self {
        self.time_max = Some(v.into());
        self
    }

    /// Expand recurring events into their instances.
    pub fn set_single_events(mut self, v: bool) -> Self {
        self.single_events = Some(v);
        self
    }

    /// Order of the returned events: `"startTime"` or `"updated"`.
    pub fn set_order_by(mut self, v: impl Into<String>) -> Self {
        self.order_by = Some(v.into());
        self
    }

    /// Free-text search over event fields.
    pub fn set_query(mut self, v: impl Into<String>) -> Self {
        self.query = Some(v.into());
        self
    }

    /// Maximum number of events per page.
    pub fn set_max_results(mut self, v: u32) -> Self {
        self.max_results = Some(v);
        self
    }

    fn into_query(self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(v) = self.time_min {
            query.push(("timeMin", v));
        }
        if let Some(v) = self.time_max {
            query.push(("timeMax", v));
        }
        if let Some(v) = self.single_events {
            query.push(("singleEvents", v.to_string()));
        }
        if let Some(v) = self.order_by {
            query.push(("orderBy", v));
        }
        if let Some(v) = self.query {
            query.push(("q", v));
        }
        if let Some(v) = self.max_results {
            query.push(("maxResults", v.to_string()));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gax::response::Response;
    use http::StatusCode;
    use serde_json::{Value, json};
    use std::sync::Mutex;

    /// A scripted [Requester] recording each call's path and query.
    struct FakeRequester {
        responses: Mutex<Vec<gax::Result<Response<Value>>>>,
        calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
    }

    impl FakeRequester {
        fn new(responses: Vec<gax::Result<Response<Value>>>) -> Self {
            Self {
                responses: Mutex::new(responses),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait::async_trait]
    impl Requester for FakeRequester {
        async fn request_json(
            &self,
            method: Method,
            path: &str,
            query: &[(&str, String)],
            body: Option<Value>,
            _options: RequestOptions,
        ) -> gax::Result<Response<Value>> {
            assert_eq!(method, Method::GET);
            assert!(body.is_none());
            self.calls.lock().unwrap().push((
                path.to_string(),
                query
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect(),
            ));
            self.responses.lock().unwrap().remove(0)
        }
    }

    fn client(responses: Vec<gax::Result<Response<Value>>>) -> CalendarClient<FakeRequester> {
        CalendarClient::new(FakeRequester::new(responses))
    }

    fn calls(client: &CalendarClient<FakeRequester>) -> Vec<(String, Vec<(String, String)>)> {
        client.requester.calls.lock().unwrap().clone()
    }

    #[tokio::test]
    async fn list_calendars_threads_the_cursor() {
        let client = client(vec![
            Ok(Response::from_body(json!({
                "items": [
                    {"id": "primary", "summary": "Work"},
                    {"id": "team", "summary": "Team"},
                ],
                "nextPageToken": "t1",
            }))),
            Ok(Response::from_body(json!({
                "items": [{"id": "holidays", "summary": "Holidays"}],
            }))),
        ]);

        let mut pager = client.list_calendars();
        let mut ids = Vec::new();
        while let Some(entry) = pager.next().await {
            ids.push(entry.id);
        }
        assert_eq!(ids, vec!["primary", "team", "holidays"]);
        assert!(pager.last_error().is_none());

        let calls = calls(&client);
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, "/users/me/calendarList");
        assert!(calls[0].1.is_empty(), "{:?}", calls[0].1);
        assert_eq!(
            calls[1].1,
            vec![("pageToken".to_string(), "t1".to_string())]
        );
    }

    #[tokio::test]
    async fn list_events_builds_path_and_params() {
        let client = client(vec![Ok(Response::from_body(json!({
            "items": [{"id": "evt-1", "summary": "standup"}],
        })))]);

        let params = EventListParams::default()
            .set_time_min("2025-06-01T00:00:00Z")
            .set_single_events(true)
            .set_order_by("startTime")
            .set_max_results(250);
        let mut pager = client.list_events("team room/b\u{fc}ro", params);
        let event = pager.next().await.unwrap();
        assert_eq!(event.id, "evt-1");
        assert_eq!(pager.next().await, None);

        let calls = calls(&client);
        assert_eq!(calls[0].0, "/calendars/team%20room%2Fb%C3%BCro/events");
        assert_eq!(
            calls[0].1,
            vec![
                ("timeMin".to_string(), "2025-06-01T00:00:00Z".to_string()),
                ("singleEvents".to_string(), "true".to_string()),
                ("orderBy".to_string(), "startTime".to_string()),
                ("maxResults".to_string(), "250".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn list_instances_targets_the_event() {
        let client = client(vec![Ok(Response::from_body(json!({
            "items": [
                {"id": "evt-1_20250602", "recurringEventId": "evt-1"},
                {"id": "evt-1_20250609", "recurringEventId": "evt-1"},
            ],
        })))]);

        let mut pager = client.list_instances("primary", "evt-1");
        let mut count = 0;
        while let Some(event) = pager.next().await {
            assert_eq!(event.recurring_event_id.as_deref(), Some("evt-1"));
            count += 1;
        }
        assert_eq!(count, 2);
        assert_eq!(
            calls(&client)[0].0,
            "/calendars/primary/events/evt-1/instances"
        );
    }

    #[tokio::test]
    async fn non_success_page_ends_iteration() {
        let client = client(vec![Ok(Response::new(
            StatusCode::FORBIDDEN,
            http::HeaderMap::new(),
            None,
        ))]);

        let mut pager = client.list_calendars();
        assert_eq!(pager.next().await, None);
        assert!(
            matches!(
                pager.last_error(),
                Some(Error::UnexpectedStatus { status }) if *status == StatusCode::FORBIDDEN
            ),
            "{:?}",
            pager.last_error()
        );
    }

    #[tokio::test]
    async fn empty_success_body_is_an_empty_page() {
        let client = client(vec![Ok(Response::new(
            StatusCode::OK,
            http::HeaderMap::new(),
            None,
        ))]);
        let mut pager = client.list_calendars();
        assert_eq!(pager.next().await, None);
        assert!(pager.last_error().is_none());
    }
}
