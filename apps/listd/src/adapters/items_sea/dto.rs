//! DTOs for items_sea adapter.

use time::OffsetDateTime;

/// DTO for creating a new item.
#[derive(Debug, Clone)]
pub struct ItemCreate {
    pub list_id: i32,
    pub name: String,
    pub done: bool,
    /// Creation time; `None` means now.
    pub at: Option<OffsetDateTime>,
}

impl ItemCreate {
    pub fn new(list_id: i32, name: impl Into<String>) -> Self {
        Self {
            list_id,
            name: name.into(),
            done: false,
            at: None,
        }
    }

    pub fn done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }

    pub fn at(mut self, at: OffsetDateTime) -> Self {
        self.at = Some(at);
        self
    }
}

/// DTO for a partial item update; `None` fields are left untouched.
#[derive(Debug, Clone)]
pub struct ItemUpdate {
    pub list_id: i32,
    pub id: i32,
    pub name: Option<String>,
    pub done: Option<bool>,
}
