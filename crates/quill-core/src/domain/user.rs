use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationErrors;

/// Maximum length of a username, in characters.
pub const USERNAME_MAX_CHARS: usize = 150;

/// Shortest password accepted at signup.
const PASSWORD_MIN_CHARS: usize = 6;

/// User entity - an account that can author posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and timestamps.
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    /// Email with the local part masked, safe to put in logs.
    pub fn masked_email(&self) -> String {
        mask_email(&self.email)
    }
}

fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at_pos) => {
            let (local, domain) = email.split_at(at_pos);
            let masked_local = match local.chars().next() {
                Some(first) if local.chars().count() > 1 => format!("{}***", first),
                _ => "***".to_string(),
            };
            format!("{}{}", masked_local, domain)
        }
        None => "***".to_string(),
    }
}

/// Signup input before validation.
#[derive(Debug, Clone, Default)]
pub struct NewAccount {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl NewAccount {
    /// Check field-level rules. Username uniqueness is checked by the account service.
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        match self.username.as_deref() {
            None => errors.add("username", "This field is required."),
            Some(name) if name.trim().is_empty() => {
                errors.add("username", "This field may not be blank.")
            }
            Some(name) => {
                if name.chars().count() > USERNAME_MAX_CHARS {
                    errors.add(
                        "username",
                        format!(
                            "Ensure this field has no more than {} characters.",
                            USERNAME_MAX_CHARS
                        ),
                    );
                }
                if !name
                    .chars()
                    .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
                {
                    errors.add(
                        "username",
                        "Enter a valid username. This value may contain only letters, \
                         numbers, and @/./+/-/_ characters.",
                    );
                }
            }
        }

        if let Some(email) = self.email.as_deref().filter(|e| !e.is_empty()) {
            if !looks_like_email(email) {
                errors.add("email", "Enter a valid email address.");
            }
        }

        match self.password.as_deref() {
            None => errors.add("password", "This field is required."),
            Some("") => errors.add("password", "This field may not be blank."),
            Some(password) if password.chars().count() < PASSWORD_MIN_CHARS => errors.add(
                "password",
                format!(
                    "Ensure this field has at least {} characters.",
                    PASSWORD_MIN_CHARS
                ),
            ),
            Some(_) => {}
        }

        errors
    }
}

fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };
    !local.is_empty()
        && !email.chars().any(char::is_whitespace)
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
