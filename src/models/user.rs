use chrono::{DateTime, Utc};
use table_derive::model;

use super::UNSAVED_ID;

#[model]
#[table(name = "users", auto_increment)]
pub struct User {
    #[primary_key]
    pub id: i64,

    #[field(create, update)]
    #[unique]
    pub username: String,

    /// Password hash. Never a plaintext password.
    #[field(create, update)]
    pub password: String,

    #[field(create, update)]
    #[unique]
    pub email: String,

    #[field(create, update)]
    pub first_name: Option<String>,

    #[field(create, update)]
    pub last_name: Option<String>,

    #[field(create, update)]
    #[soft_delete]
    pub enabled: bool,

    #[field(readonly)]
    #[created_at]
    pub created_at: DateTime<Utc>,

    #[field(readonly)]
    #[updated_at]
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// New enabled user. `password` must already be hashed.
    pub fn new(username: impl Into<String>, password: impl Into<String>, email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: UNSAVED_ID,
            username: username.into(),
            password: password.into(),
            email: email.into(),
            first_name: None,
            last_name: None,
            enabled: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_name(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self.last_name = Some(last_name.into());
        self
    }

    pub fn full_name(&self) -> Option<String> {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
            (Some(name), None) | (None, Some(name)) => Some(name.clone()),
            (None, None) => None,
        }
    }
}
