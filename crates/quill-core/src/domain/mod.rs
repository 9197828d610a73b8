//! Domain entities - the core business objects.

mod post;
mod user;

pub use post::{NewPost, Post, PostChanges, TITLE_MAX_CHARS, timeline_order};
pub use user::{NewAccount, USERNAME_MAX_CHARS, User};
