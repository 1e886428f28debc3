//! DTOs for lists_sea adapter.

use time::OffsetDateTime;

/// DTO for creating a new list.
#[derive(Debug, Clone)]
pub struct ListCreate {
    pub name: String,
    /// Creation time; `None` means now.
    pub at: Option<OffsetDateTime>,
}

impl ListCreate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            at: None,
        }
    }

    /// Pin both timestamps, for reproducible fixture rows.
    pub fn at(mut self, at: OffsetDateTime) -> Self {
        self.at = Some(at);
        self
    }
}

/// DTO for updating a list.
#[derive(Debug, Clone)]
pub struct ListUpdate {
    pub id: i32,
    pub name: String,
}
