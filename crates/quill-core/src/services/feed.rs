//! Feed assembly: paginated views over published posts.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::Post;
use crate::error::DomainError;
use crate::pagination::{Page, PageRequest};
use crate::ports::PostRepository;

/// Page size of the others'-posts feed.
pub const FEED_PAGE_SIZE: u64 = 5;

/// Page size of the global timeline.
pub const TIMELINE_PAGE_SIZE: u64 = 10;

/// Paginated views over published posts, in timeline order.
pub struct FeedAssembler {
    posts: Arc<dyn PostRepository>,
}

impl FeedAssembler {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    /// Published posts by anyone except the requester.
    pub async fn others_feed(
        &self,
        requester: Uuid,
        page: PageRequest,
    ) -> Result<Page<Post>, DomainError> {
        tracing::debug!(requester = %requester, ?page, "Assembling feed");
        self.published_page(Some(requester), page, FEED_PAGE_SIZE)
            .await
    }

    /// Published posts by everyone, the requester included.
    pub async fn timeline(
        &self,
        requester: Uuid,
        page: PageRequest,
    ) -> Result<Page<Post>, DomainError> {
        tracing::debug!(requester = %requester, ?page, "Assembling timeline");
        self.published_page(None, page, TIMELINE_PAGE_SIZE).await
    }

    async fn published_page(
        &self,
        exclude_author: Option<Uuid>,
        page: PageRequest,
        page_size: u64,
    ) -> Result<Page<Post>, DomainError> {
        let count = self.posts.count_published(exclude_author).await?;
        let window = page.resolve(count, page_size)?;
        let items = self
            .posts
            .find_published(exclude_author, window.offset, window.limit)
            .await?;
        Ok(Page::new(window, items))
    }
}
