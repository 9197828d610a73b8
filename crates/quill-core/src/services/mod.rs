//! Application services - orchestrate rules and ports for each use case.

mod accounts;
mod feed;
mod posts;

pub use accounts::{AccountService, Session};
pub use feed::{FEED_PAGE_SIZE, FeedAssembler, TIMELINE_PAGE_SIZE};
pub use posts::PostService;

#[cfg(test)]
pub(crate) mod fakes;
