//! Minimal in-process ports for service tests.

use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, User, timeline_order};
use crate::error::RepoError;
use crate::ports::{
    AuthError, BaseRepository, PasswordService, PostRepository, TokenClaims, TokenService,
    UserRepository,
};

#[derive(Default)]
pub struct FakePosts {
    rows: Mutex<Vec<Post>>,
}

impl FakePosts {
    pub async fn is_empty(&self) -> bool {
        self.rows.lock().unwrap().is_empty()
    }

    pub async fn overwrite(&self, post: Post) {
        let mut rows = self.rows.lock().unwrap();
        rows.retain(|p| p.id != post.id);
        rows.push(post);
    }

    fn published(&self, exclude_author: Option<Uuid>) -> Vec<Post> {
        let mut posts: Vec<Post> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| !p.is_draft && Some(p.author_id) != exclude_author)
            .cloned()
            .collect();
        posts.sort_by(timeline_order);
        posts
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for FakePosts {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.rows.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        self.rows.lock().unwrap().push(post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut rows = self.rows.lock().unwrap();
        let slot = rows
            .iter_mut()
            .find(|p| p.id == post.id)
            .ok_or(RepoError::NotFound)?;
        *slot = post.clone();
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|p| p.id != id);
        if rows.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl PostRepository for FakePosts {
    async fn find_by_author(
        &self,
        author_id: Uuid,
        drafts_only: bool,
    ) -> Result<Vec<Post>, RepoError> {
        let mut posts: Vec<Post> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.author_id == author_id && (!drafts_only || p.is_draft))
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn find_published(
        &self,
        exclude_author: Option<Uuid>,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError> {
        Ok(self
            .published(exclude_author)
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count_published(&self, exclude_author: Option<Uuid>) -> Result<u64, RepoError> {
        Ok(self.published(exclude_author).len() as u64)
    }
}

#[derive(Default)]
pub struct FakeUsers {
    rows: Mutex<Vec<User>>,
}

#[async_trait]
impl BaseRepository<User, Uuid> for FakeUsers {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.rows.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.username == user.username) {
            return Err(RepoError::Constraint("username taken".into()));
        }
        rows.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut rows = self.rows.lock().unwrap();
        let slot = rows
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(RepoError::NotFound)?;
        *slot = user.clone();
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|u| u.id != id);
        if rows.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for FakeUsers {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }
}

/// Reversible "hash" so tests stay fast.
pub struct PlainPasswords;

impl PasswordService for PlainPasswords {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(format!("plain:{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        Ok(hash == format!("plain:{password}"))
    }
}

/// Tokens of the form `<user_id>:<username>`.
pub struct FakeTokens;

impl TokenService for FakeTokens {
    fn generate_token(&self, user_id: Uuid, username: &str) -> Result<String, AuthError> {
        Ok(format!("{user_id}:{username}"))
    }

    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let (id, username) = token
            .split_once(':')
            .ok_or_else(|| AuthError::InvalidToken(token.to_string()))?;
        Ok(TokenClaims {
            user_id: id
                .parse()
                .map_err(|_| AuthError::InvalidToken(token.to_string()))?,
            username: username.to_string(),
        })
    }

    fn expiration_seconds(&self) -> i64 {
        3600
    }
}

mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fake_users_update_and_delete_touch_rows() {
        let users = FakeUsers::default();
        let mut alice = User::new("alice".into(), String::new(), "plain:x".into());
        users.insert(alice.clone()).await.unwrap();

        alice.email = "alice@example.com".into();
        users.update(alice.clone()).await.unwrap();
        let stored = users.find_by_id(alice.id).await.unwrap().unwrap();
        assert_eq!(stored.email, "alice@example.com");

        users.delete(alice.id).await.unwrap();
        assert!(users.find_by_id(alice.id).await.unwrap().is_none());
        assert!(matches!(
            users.delete(alice.id).await,
            Err(RepoError::NotFound)
        ));
        assert!(matches!(
            users.update(alice).await,
            Err(RepoError::NotFound)
        ));
    }
}
