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

use crate::error::Error;
use std::collections::VecDeque;

/// One page of a paged list response.
#[derive(Clone, Debug, Default)]
pub struct Page<T> {
    /// The items in this page, in response order.
    pub items: Vec<T>,
    /// The continuation cursor, absent on the last page.
    pub next_cursor: Option<String>,
}

/// Fetches pages from one concrete list endpoint.
///
/// A `None` cursor must fetch the first page. The fetcher performs I/O; the
/// [Pager] owns all cursor bookkeeping.
#[async_trait::async_trait]
pub trait PageFetcher: Send {
    type Item: Send;

    async fn fetch_page(&mut self, cursor: Option<&str>) -> crate::Result<Page<Self::Item>>;
}

/// Presents a paged list endpoint as a single forward-only lazy sequence.
///
/// Nothing is fetched until the first [next](Pager::next) call. Each page is
/// drained front-to-back before the next one is fetched with the latest
/// cursor; iteration ends when a page carries no continuation cursor and is
/// fully consumed. The pager yields items converted through the mapping
/// function supplied at construction.
///
/// A fetch failure ends the iteration like a missing cursor does. The
/// failure is kept in [last_error](Pager::last_error) for callers that need
/// to tell the two apart.
///
/// # Example
/// ```
/// # use google_calendar_gax::pager::{Page, PageFetcher, Pager};
/// struct Numbers(Vec<Page<i32>>);
///
/// #[async_trait::async_trait]
/// impl PageFetcher for Numbers {
///     type Item = i32;
///     async fn fetch_page(
///         &mut self,
///         _cursor: Option<&str>,
///     ) -> google_calendar_gax::Result<Page<i32>> {
///         Ok(self.0.remove(0))
///     }
/// }
///
/// # tokio_test::block_on(async {
/// let pages = vec![
///     Page { items: vec![1, 2], next_cursor: Some("t1".into()) },
///     Page { items: vec![3], next_cursor: None },
/// ];
/// let mut pager = Pager::new(Numbers(pages));
/// let mut got = vec![];
/// while let Some(n) = pager.next().await {
///     got.push(n);
/// }
/// assert_eq!(got, vec![1, 2, 3]);
/// # });
/// ```
pub struct Pager<F, T, M>
where
    F: PageFetcher,
{
    fetcher: F,
    map: M,
    pending: VecDeque<F::Item>,
    cursor: Option<String>,
    page_count: u32,
    exhausted: bool,
    last_error: Option<Error>,
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<F> Pager<F, F::Item, fn(F::Item) -> F::Item>
where
    F: PageFetcher,
{
    /// Creates a pager yielding the fetcher's items unchanged.
    pub fn new(fetcher: F) -> Self {
        Self::with_mapper(fetcher, std::convert::identity)
    }
}

impl<F, T, M> Pager<F, T, M>
where
    F: PageFetcher,
    M: FnMut(F::Item) -> T,
{
    /// Creates a pager converting each raw item through `map`.
    ///
    /// `map` must be a pure transform; it runs once per yielded item.
    pub fn with_mapper(fetcher: F, map: M) -> Self {
        Self {
            fetcher,
            map,
            pending: VecDeque::new(),
            cursor: None,
            page_count: 0,
            exhausted: false,
            last_error: None,
            _marker: std::marker::PhantomData,
        }
    }

    /// Returns the next item, fetching a page when the current one is
    /// drained. Returns `None` at the end of the sequence, and keeps
    /// returning `None` afterwards.
    pub async fn next(&mut self) -> Option<T> {
        loop {
            if self.exhausted {
                return None;
            }
            if let Some(item) = self.pending.pop_front() {
                return Some((self.map)(item));
            }
            if self.page_count > 0 && self.cursor.is_none() {
                self.exhausted = true;
                return None;
            }
            let cursor = self.cursor.take();
            match self.fetcher.fetch_page(cursor.as_deref()).await {
                Ok(page) => {
                    self.page_count += 1;
                    self.pending = page.items.into();
                    self.cursor = page.next_cursor;
                    if self.pending.is_empty() && self.cursor.is_none() {
                        self.exhausted = true;
                        return None;
                    }
                }
                Err(e) => {
                    tracing::warn!(page = self.page_count + 1, error = %e, "page fetch failed");
                    self.last_error = Some(e);
                    self.exhausted = true;
                    return None;
                }
            }
        }
    }

    /// Restarts the iteration from the first page.
    ///
    /// Clears the cursor state and the exhaustion flag; nothing is fetched
    /// until the next [next](Pager::next) call.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.cursor = None;
        self.page_count = 0;
        self.exhausted = false;
        self.last_error = None;
    }

    /// The number of pages fetched so far.
    pub fn pages_fetched(&self) -> u32 {
        self.page_count
    }

    /// The fetch failure that ended the iteration, if any.
    ///
    /// The end of a sequence and a failed page fetch are indistinguishable
    /// through [next](Pager::next) alone; this accessor tells them apart.
    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    /// Adapts the pager into a [futures::Stream] of items.
    pub fn into_stream(self) -> impl futures::Stream<Item = T>
    where
        F: 'static,
        T: 'static,
        M: 'static,
    {
        futures::stream::unfold(self, |mut pager| async move {
            pager.next().await.map(|item| (item, pager))
        })
    }
}
