//! Offset/limit pagination over remote listing endpoints.
//!
//! JIRA list endpoints return one bounded page per request. [`Paginated`]
//! turns such an endpoint into a single lazy iterator of items, requesting
//! the next page only once the previous one has been consumed.

use std::marker::PhantomData;
use std::num::NonZeroUsize;
use std::vec;
use tracing::debug;

/// Page size used when the caller does not pick one.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(50) {
    Some(size) => size,
    None => unreachable!(),
};

/// Position and size of a single page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    /// Index of the first item to return (JIRA `startAt`).
    pub offset: usize,

    /// Maximum number of items to return (JIRA `maxResults`).
    pub limit: usize,
}

/// Iteration state of a [`Paginated`] sequence.
enum State<T> {
    /// The next call to `next` must fetch the page at `offset`.
    Fetch { offset: usize },

    /// Items of the current page are being handed out.
    Drain {
        page: vec::IntoIter<T>,
        /// Offset of the page following this one, or `None` if this page was short.
        next_offset: Option<usize>,
    },

    /// A short page was drained or the fetch failed.
    Done,
}

/// A lazy, single-pass sequence over every item of a paginated listing.
///
/// Each page is requested with [`PageCursor`]. A page holding fewer items
/// than the requested limit is treated as the last one. A full page always
/// triggers one more request, so a listing whose length is an exact multiple
/// of the page size costs a final request that returns nothing.
///
/// Errors from the fetch function are yielded once and end the sequence.
pub struct Paginated<F, T, E>
where
    F: FnMut(PageCursor) -> Result<Vec<T>, E>,
{
    fetch: F,
    limit: NonZeroUsize,
    state: State<T>,
    _error: PhantomData<fn() -> E>,
}

/// Wraps `fetch` into a lazy sequence starting at offset 0 with
/// [`DEFAULT_PAGE_SIZE`] items per page.
pub fn paginate<F, T, E>(fetch: F) -> Paginated<F, T, E>
where
    F: FnMut(PageCursor) -> Result<Vec<T>, E>,
{
    Paginated {
        fetch,
        limit: DEFAULT_PAGE_SIZE,
        state: State::Fetch { offset: 0 },
        _error: PhantomData,
    }
}

impl<F, T, E> Paginated<F, T, E>
where
    F: FnMut(PageCursor) -> Result<Vec<T>, E>,
{
    /// Starts fetching at `offset` instead of 0.
    ///
    /// Has no effect once iteration has started.
    #[must_use]
    pub fn starting_at(mut self, offset: usize) -> Self {
        if let State::Fetch { .. } = self.state {
            self.state = State::Fetch { offset };
        }
        self
    }

    /// Requests `limit` items per page.
    #[must_use]
    pub fn page_size(mut self, limit: NonZeroUsize) -> Self {
        self.limit = limit;
        self
    }

    fn fetch_page(&mut self, offset: usize) -> Result<(), E> {
        let limit = self.limit.get();
        let page = (self.fetch)(PageCursor { offset, limit })?;
        let count = page.len();
        debug!(offset, limit, count, "Fetched page");

        let next_offset = (count >= limit).then_some(offset + limit);
        self.state = State::Drain {
            page: page.into_iter(),
            next_offset,
        };
        Ok(())
    }
}

impl<F, T, E> Iterator for Paginated<F, T, E>
where
    F: FnMut(PageCursor) -> Result<Vec<T>, E>,
{
    type Item = Result<T, E>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match &mut self.state {
                State::Done => return None,
                State::Fetch { offset } => {
                    let offset = *offset;
                    if let Err(e) = self.fetch_page(offset) {
                        self.state = State::Done;
                        return Some(Err(e));
                    }
                }
                State::Drain { page, next_offset } => {
                    if let Some(item) = page.next() {
                        return Some(Ok(item));
                    }
                    self.state = match *next_offset {
                        Some(offset) => State::Fetch { offset },
                        None => State::Done,
                    };
                }
            }
        }
    }
}

impl<F, T, E> std::iter::FusedIterator for Paginated<F, T, E> where
    F: FnMut(PageCursor) -> Result<Vec<T>, E>
{
}
