use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationErrors;

/// Maximum length of a post title, in characters.
pub const TITLE_MAX_CHARS: usize = 200;

/// Post entity - a blog post owned by its author.
///
/// A post starts out as a draft. `published_at` is stamped by the publish rule
/// (see [`crate::rules`]) or supplied explicitly by the author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub is_draft: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new draft post.
    pub fn new(author_id: Uuid, title: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            title,
            content,
            is_draft: true,
            published_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply the supplied fields and refresh `updated_at`.
    ///
    /// `stamp` overrides whatever `published_at` the changes carry.
    pub fn apply(&mut self, changes: PostChanges, stamp: Option<DateTime<Utc>>) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(content) = changes.content {
            self.content = content;
        }
        if let Some(is_draft) = changes.is_draft {
            self.is_draft = is_draft;
        }
        match (stamp, changes.published_at) {
            (Some(now), _) => self.published_at = Some(now),
            (None, Some(explicit)) => self.published_at = explicit,
            (None, None) => {}
        }
        self.updated_at = Utc::now();
    }
}

/// Listing order for feeds: `published_at` descending with unpublished posts
/// last, then `created_at` descending. Ties fall back to the id so pages are stable.
pub fn timeline_order(a: &Post, b: &Post) -> Ordering {
    let published = match (a.published_at, b.published_at) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    published
        .then_with(|| b.created_at.cmp(&a.created_at))
        .then_with(|| b.id.cmp(&a.id))
}

/// Input for creating a post.
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_draft: Option<bool>,
    pub published_at: Option<DateTime<Utc>>,
}

impl NewPost {
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        match self.title.as_deref() {
            Some(title) => check_title(title, &mut errors),
            None => errors.add("title", "This field is required."),
        }
        match self.content.as_deref() {
            Some(content) => check_content(content, &mut errors),
            None => errors.add("content", "This field is required."),
        }
        errors
    }
}

/// Partial update of a post. `None` leaves a field untouched.
///
/// `published_at` is doubly optional: `Some(None)` clears the timestamp.
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_draft: Option<bool>,
    pub published_at: Option<Option<DateTime<Utc>>>,
}

impl PostChanges {
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if let Some(title) = self.title.as_deref() {
            check_title(title, &mut errors);
        }
        if let Some(content) = self.content.as_deref() {
            check_content(content, &mut errors);
        }
        errors
    }

    /// Explicit, non-null `published_at` carried by this update.
    pub fn explicit_published_at(&self) -> Option<DateTime<Utc>> {
        self.published_at.flatten()
    }
}

fn check_title(title: &str, errors: &mut ValidationErrors) {
    if title.trim().is_empty() {
        errors.add("title", "This field may not be blank.");
    } else if title.chars().count() > TITLE_MAX_CHARS {
        errors.add(
            "title",
            format!(
                "Ensure this field has no more than {} characters.",
                TITLE_MAX_CHARS
            ),
        );
    }
}

fn check_content(content: &str, errors: &mut ValidationErrors) {
    if content.trim().is_empty() {
        errors.add("content", "This field may not be blank.");
    }
}
