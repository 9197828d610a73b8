//! Visibility and publish rules.
//!
//! Pure decision functions: they never touch the store or the clock.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{NewPost, Post, PostChanges};

/// Whether `published_at` should be stamped with the current time.
///
/// `current_is_draft` is `None` when the post is being created, in which case the
/// incoming draft flag defaults to `true`. On update a missing incoming flag keeps
/// the current state. Stamping happens only for a draft becoming published without
/// an explicit `published_at`.
pub fn should_publish_now(
    current_is_draft: Option<bool>,
    incoming_is_draft: Option<bool>,
    incoming_published_at: Option<DateTime<Utc>>,
) -> bool {
    let was_draft = current_is_draft.unwrap_or(true);
    let is_draft_now = incoming_is_draft.or(current_is_draft).unwrap_or(true);
    was_draft && !is_draft_now && incoming_published_at.is_none()
}

/// Drafts are visible to their author only; published posts to everyone.
pub fn is_visible(post: &Post, requester: Uuid) -> bool {
    post.author_id == requester || !post.is_draft
}

/// Only the author may update or delete a post, whatever its draft state.
pub fn can_modify(post: &Post, requester: Uuid) -> bool {
    post.author_id == requester
}

/// What happens to `published_at` when a post goes draft → published again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PublishPolicy {
    /// Stamp only while `published_at` is still null; re-publishing keeps the
    /// original timestamp.
    #[default]
    FirstPublishOnly,
    /// Stamp on every draft → published transition.
    EveryPublish,
}

impl FromStr for PublishPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" | "first_publish_only" => Ok(Self::FirstPublishOnly),
            "every" | "every_publish" => Ok(Self::EveryPublish),
            other => Err(format!("unknown publish policy '{}'", other)),
        }
    }
}

/// Publish rule bound to a policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct PublishRule {
    policy: PublishPolicy,
}

impl PublishRule {
    pub fn new(policy: PublishPolicy) -> Self {
        Self { policy }
    }

    pub fn stamp_on_create(&self, input: &NewPost) -> bool {
        should_publish_now(None, input.is_draft, input.published_at)
    }

    /// The `published_at` an update must write on a draft → published transition,
    /// or `None` when the update's own fields decide.
    ///
    /// A post that goes live never ends up with a null `published_at`: when the
    /// policy keeps an earlier stamp, that stamp wins over an explicit `null`.
    pub fn stamp_on_update(
        &self,
        current: &Post,
        changes: &PostChanges,
        now: DateTime<Utc>,
    ) -> Option<DateTime<Utc>> {
        let transition = should_publish_now(
            Some(current.is_draft),
            changes.is_draft,
            changes.explicit_published_at(),
        );
        if !transition {
            return None;
        }
        match (self.policy, current.published_at) {
            (PublishPolicy::FirstPublishOnly, Some(first)) => Some(first),
            _ => Some(now),
        }
    }
}
