use table_derive::model;

/// Customer record keyed by an id assigned outside the database
#[model]
#[table(name = "customers")]
pub struct Customer {
    #[primary_key]
    #[field(create)]
    pub id: i64,

    #[field(create, update)]
    pub name: Option<String>,

    #[field(create, update)]
    pub code: String,
}

impl Customer {
    pub fn new(id: i64, code: impl Into<String>) -> Self {
        Self {
            id,
            name: None,
            code: code.into(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
