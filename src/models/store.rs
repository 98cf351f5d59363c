use chrono::{DateTime, Utc};
use table_derive::model;

use super::UNSAVED_ID;

#[model]
#[table(name = "stores", auto_increment)]
pub struct Store {
    #[primary_key]
    pub id: i64,

    #[field(create, update)]
    #[unique]
    pub name: String,

    #[field(create, update)]
    #[column(text)]
    pub description: Option<String>,

    #[field(create, update)]
    #[column(text)]
    pub address: Option<String>,

    #[field(create, update)]
    pub contact_email: Option<String>,

    #[field(create, update)]
    pub contact_phone: Option<String>,

    #[field(create, update)]
    pub logo_url: Option<String>,

    #[field(create, update)]
    pub website_url: Option<String>,

    #[field(create, update)]
    #[soft_delete]
    pub is_active: bool,

    #[field(readonly)]
    #[created_at]
    pub created_at: DateTime<Utc>,

    #[field(readonly)]
    #[updated_at]
    pub updated_at: DateTime<Utc>,
}

impl Store {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: UNSAVED_ID,
            name: name.into(),
            description: None,
            address: None,
            contact_email: None,
            contact_phone: None,
            logo_url: None,
            website_url: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_contact_email(mut self, email: impl Into<String>) -> Self {
        self.contact_email = Some(email.into());
        self
    }

    pub fn with_contact_phone(mut self, phone: impl Into<String>) -> Self {
        self.contact_phone = Some(phone.into());
        self
    }

    pub fn with_logo_url(mut self, url: impl Into<String>) -> Self {
        self.logo_url = Some(url.into());
        self
    }

    pub fn with_website_url(mut self, url: impl Into<String>) -> Self {
        self.website_url = Some(url.into());
        self
    }
}
