//! Post use cases: create, read, update, delete and the author's own listing.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{NewPost, Post, PostChanges};
use crate::error::{DomainError, RepoError};
use crate::ports::PostRepository;
use crate::rules::{self, PublishRule};

/// Orchestrates post CRUD against the publish/visibility rules and the store.
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    rule: PublishRule,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, rule: PublishRule) -> Self {
        Self { posts, rule }
    }

    /// Create a post for `author_id`. Posts are drafts unless `is_draft` is false.
    pub async fn create(&self, author_id: Uuid, input: NewPost) -> Result<Post, DomainError> {
        input.validate().into_result()?;
        let stamp = self.rule.stamp_on_create(&input);

        let NewPost {
            title,
            content,
            is_draft,
            published_at,
        } = input;
        let mut post = Post::new(
            author_id,
            title.unwrap_or_default(),
            content.unwrap_or_default(),
        );
        post.is_draft = is_draft.unwrap_or(true);
        post.published_at = if stamp {
            Some(post.created_at)
        } else {
            published_at
        };

        let saved = self.posts.insert(post).await?;
        tracing::info!(post_id = %saved.id, author_id = %author_id, is_draft = saved.is_draft, "Post created");
        Ok(saved)
    }

    /// Fetch a post. Someone else's draft is reported exactly like a missing post.
    pub async fn get(&self, requester: Uuid, id: Uuid) -> Result<Post, DomainError> {
        match self.posts.find_by_id(id).await? {
            Some(post) if rules::is_visible(&post, requester) => Ok(post),
            Some(_) => {
                tracing::debug!(post_id = %id, requester = %requester, "Hiding draft from non-author");
                Err(DomainError::post_not_found(id))
            }
            None => Err(DomainError::post_not_found(id)),
        }
    }

    /// Apply a partial update. Only the author may do this.
    pub async fn update(
        &self,
        requester: Uuid,
        id: Uuid,
        changes: PostChanges,
    ) -> Result<Post, DomainError> {
        let mut post = self.owned_post(requester, id).await?;
        changes.validate().into_result()?;

        let stamp = self
            .rule
            .stamp_on_update(&post, &changes, chrono::Utc::now());
        post.apply(changes, stamp);

        let saved = self.posts.update(post).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::post_not_found(id),
            other => other.into(),
        })?;
        tracing::info!(post_id = %id, published = stamp.is_some(), "Post updated");
        Ok(saved)
    }

    /// Remove a post permanently. Only the author may do this.
    pub async fn delete(&self, requester: Uuid, id: Uuid) -> Result<(), DomainError> {
        self.owned_post(requester, id).await?;
        self.posts.delete(id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::post_not_found(id),
            other => other.into(),
        })?;
        tracing::info!(post_id = %id, "Post deleted");
        Ok(())
    }

    /// The requester's own posts, newest first by creation time.
    pub async fn list_mine(
        &self,
        requester: Uuid,
        drafts_only: bool,
    ) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.find_by_author(requester, drafts_only).await?)
    }

    async fn owned_post(&self, requester: Uuid, id: Uuid) -> Result<Post, DomainError> {
        let post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(id))?;
        if !rules::can_modify(&post, requester) {
            tracing::warn!(post_id = %id, requester = %requester, "Rejected modification by non-author");
            return Err(DomainError::Forbidden {
                entity_type: "post",
            });
        }
        Ok(post)
    }
}
