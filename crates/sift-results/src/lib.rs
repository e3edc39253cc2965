//! Search result processing for sift.
//!
//! A [`SearchController`] runs one request against an [`IndexExecutor`]:
//! it extracts the query's terms, runs the boolean query, computes paging
//! with [`paginate`], seeks the hit cursor and hands the page's hits to a
//! [`ResultAssembler`], which excerpts, highlights and truncates each
//! description. Non-fatal problems go to a [`SearchObserver`].

#![warn(missing_docs)]

mod assemble;
mod controller;
mod format;
mod hit;
mod observer;
mod page;

pub use assemble::ResultAssembler;
pub use controller::{
    ExecuteError, HitCursor, IndexExecutor, SearchController, SearchError, SearchPage,
    SearchRequest,
};
pub use format::{format_bytes, format_date};
pub use hit::{DisplayHit, ExtraProperty, RawHit};
pub use observer::{SearchObserver, SilentObserver, TracingObserver};
pub use page::{PageInfo, PageLink, paginate};
