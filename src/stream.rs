// ABOUTME: Lazy page-cursor streamer turning a paged listing into an ordered item stream
// ABOUTME: Implements futures::Stream, fetching the next page only when the buffer runs dry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Page Cursor Streamer
//!
//! Listings are consumed one item at a time. The stream keeps the current page
//! in a buffer and only issues a request when the buffer is empty and the last
//! page named a continuation cursor:
//!
//! - a pull with buffered items performs no I/O,
//! - a pull on an empty buffer with a cursor performs exactly one request,
//! - a pull on an empty buffer without a cursor ends the stream.
//!
//! The buffer holds raw records. Each record is decoded on the pull that
//! yields it, so a record that fails to decode surfaces in server order after
//! every valid record before it.
//!
//! Laziness is a correctness property: taking the first N items (with
//! [`StreamConfig::with_max_items`] or `StreamExt::take`) never fetches a page
//! that is not needed for those N items, and dropping the stream mid-way
//! performs no further I/O.
//!
//! A failed fetch or decode is yielded as the `Err` of that pull and ends the
//! stream; items already yielded stay valid. Streams are single-pass.
//!
//! ```rust,no_run
//! use futures_util::StreamExt;
//! use canvas_client::context::CanvasContext;
//! use canvas_client::resources::courses::{list_courses, CourseFilter};
//! use canvas_client::stream::StreamConfig;
//!
//! async fn first_courses(context: &CanvasContext) {
//!     let config = StreamConfig::with_per_page(20).with_max_items(5);
//!     let mut courses = list_courses(context, &CourseFilter::default(), config);
//!     while let Some(course) = courses.next().await {
//!         match course {
//!             Ok(course) => println!("{}", course.name),
//!             Err(e) => eprintln!("listing failed: {e}"),
//!         }
//!     }
//! }
//! ```

use std::collections::VecDeque;
use std::pin::Pin;

use async_stream::try_stream;
use canvas_core::constants::PER_PAGE_PARAM;
use canvas_core::{CanvasError, CanvasResult, Page};
use futures_util::{Stream, TryStreamExt};
use serde_json::Value;
use tracing::debug;

use crate::context::CanvasContext;
use crate::transport::ApiRequest;

/// Default page size for listings
pub const DEFAULT_PER_PAGE: u32 = 50;

/// Smallest page size sent to the API
pub const MIN_PER_PAGE: u32 = 1;

/// Largest page size the API honours
pub const MAX_PER_PAGE: u32 = 100;

/// Paging behaviour of one stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreamConfig {
    /// Items requested per page; `None` uses the context default
    pub per_page: Option<u32>,
    /// Maximum number of pages to fetch (`None` for unlimited)
    pub max_pages: Option<usize>,
    /// Maximum number of items to yield (`None` for unlimited)
    pub max_items: Option<usize>,
}

impl StreamConfig {
    /// Configuration with an explicit page size
    #[must_use]
    pub fn with_per_page(per_page: u32) -> Self {
        Self {
            per_page: Some(per_page.clamp(MIN_PER_PAGE, MAX_PER_PAGE)),
            ..Self::default()
        }
    }

    /// Stop after this many pages
    #[must_use]
    pub const fn with_max_pages(mut self, max: usize) -> Self {
        self.max_pages = Some(max);
        self
    }

    /// Stop after this many items
    #[must_use]
    pub const fn with_max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }
}

/// Boxed lazy stream of decoded items
pub type ItemStream<T> = Pin<Box<dyn Stream<Item = CanvasResult<T>> + Send>>;

/// Stream the items of a paged listing
///
/// `decode` turns one raw record into an item and runs when that item is
/// pulled. `record` names the record type in page-shape errors. The starting
/// request gets a `per_page` parameter unless it already has one; follow-up
/// pages use the server's cursor verbatim.
#[must_use]
pub fn stream_pages<T, F>(
    context: CanvasContext,
    request: ApiRequest,
    config: StreamConfig,
    record: &'static str,
    decode: F,
) -> ItemStream<T>
where
    T: Send + 'static,
    F: Fn(Value) -> CanvasResult<T> + Send + 'static,
{
    let per_page = config
        .per_page
        .unwrap_or_else(|| context.per_page())
        .clamp(MIN_PER_PAGE, MAX_PER_PAGE);
    let first = if request.has_query(PER_PAGE_PARAM) {
        request
    } else {
        request.query(PER_PAGE_PARAM, per_page)
    };

    Box::pin(try_stream! {
        let mut buffer: VecDeque<Value> = VecDeque::new();
        let mut pending: Option<ApiRequest> = Some(first);
        let mut pages_fetched: usize = 0;
        let mut yielded: usize = 0;

        loop {
            if config.max_items.is_some_and(|max| yielded >= max) {
                break;
            }

            if let Some(raw) = buffer.pop_front() {
                let item = decode(raw)?;
                yielded += 1;
                yield item;
                continue;
            }

            // Buffer is empty: follow the cursor, if any
            let next_request = match pending.take() {
                Some(request) => request,
                None => break,
            };
            if config.max_pages.is_some_and(|max| pages_fetched >= max) {
                debug!(pages_fetched, "page limit reached, ending stream");
                break;
            }

            let page: Page<Value> = context.send(next_request).await?.into_page(record)?;
            pages_fetched += 1;
            debug!(
                page = pages_fetched,
                items = page.items.len(),
                has_next = !page.is_last(),
                "fetched listing page"
            );
            pending = page.next.map(ApiRequest::follow);
            buffer.extend(page.items);
        }
    })
}

/// Drain a stream into a `Vec`, stopping at the first failure
///
/// # Errors
///
/// Returns the first failure yielded by the stream
pub async fn collect_all<T>(stream: ItemStream<T>) -> Result<Vec<T>, CanvasError> {
    stream.try_collect().await
}
