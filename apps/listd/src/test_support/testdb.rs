//! Truncate and seed the test database with the fixed fixture.
//!
//! Every seeded row carries [`FIXTURE_TIMESTAMP`], and id counters are reset
//! on truncate, so a reseed always reproduces identical rows.

use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};
use thiserror::Error;
use time::macros::datetime;
use time::OffsetDateTime;
use tracing::debug;

use crate::adapters::items_sea::ItemCreate;
use crate::adapters::lists_sea::ListCreate;
use crate::error::AppError;
use crate::repos::items::{self, Item};
use crate::repos::lists::{self, List};

pub const FIXTURE_TIMESTAMP: OffsetDateTime = datetime!(2024-01-01 00:00:00 UTC);

/// Fixture lists, in insertion order.
pub const FIXTURE_LISTS: [&str; 2] = ["Groceries", "Chores"];

/// Fixture items as (index into the seeded lists, name, done).
pub const FIXTURE_ITEMS: [(usize, &str, bool); 4] = [
    (0, "Milk", false),
    (0, "Eggs", true),
    (1, "Laundry", false),
    (1, "Dishes", false),
];

/// The harness step that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessStep {
    Guard,
    Connect,
    Migrate,
    Truncate,
    SeedLists,
    SeedItems,
}

impl HarnessStep {
    pub const fn as_str(&self) -> &'static str {
        match self {
            HarnessStep::Guard => "guard",
            HarnessStep::Connect => "connect",
            HarnessStep::Migrate => "migrate",
            HarnessStep::Truncate => "truncate",
            HarnessStep::SeedLists => "seed_lists",
            HarnessStep::SeedItems => "seed_items",
        }
    }
}

impl std::fmt::Display for HarnessStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("test harness step '{step}' failed: {source}")]
pub struct HarnessError {
    pub step: HarnessStep,
    #[source]
    pub source: AppError,
}

impl HarnessError {
    pub fn new(step: HarnessStep, source: impl Into<AppError>) -> Self {
        Self {
            step,
            source: source.into(),
        }
    }

    fn at(step: HarnessStep) -> impl FnOnce(AppError) -> Self {
        move |source| Self { step, source }
    }
}

/// The rows inserted by [`reseed`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    pub lists: Vec<List>,
    pub items: Vec<Item>,
}

impl Fixture {
    pub fn list(&self, name: &str) -> Option<&List> {
        self.lists.iter().find(|l| l.name == name)
    }

    pub fn item(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.name == name)
    }

    pub fn items_of(&self, list_id: i32) -> impl Iterator<Item = &Item> + '_ {
        self.items.iter().filter(move |i| i.list_id == list_id)
    }
}

/// Remove every row, items first, and restart the id counters.
pub async fn truncate<C: ConnectionTrait>(conn: &C) -> Result<(), HarnessError> {
    let backend = conn.get_database_backend();
    let statements: &[&str] = match backend {
        DatabaseBackend::Postgres => &["TRUNCATE TABLE items, lists RESTART IDENTITY CASCADE"],
        DatabaseBackend::Sqlite => &[
            "DELETE FROM items",
            "DELETE FROM lists",
            "DELETE FROM sqlite_sequence WHERE name IN ('items', 'lists')",
        ],
        DatabaseBackend::MySql => &[
            "DELETE FROM items",
            "DELETE FROM lists",
            "ALTER TABLE items AUTO_INCREMENT = 1",
            "ALTER TABLE lists AUTO_INCREMENT = 1",
        ],
    };

    for sql in statements {
        conn.execute(Statement::from_string(backend, *sql))
            .await
            .map_err(|e| HarnessError::new(HarnessStep::Truncate, e))?;
    }
    debug!(?backend, "test database truncated");
    Ok(())
}

/// Insert the fixture lists.
pub async fn seed_lists<C>(conn: &C) -> Result<Vec<List>, HarnessError>
where
    C: ConnectionTrait + Send + Sync,
{
    let mut seeded = Vec::with_capacity(FIXTURE_LISTS.len());
    for name in FIXTURE_LISTS {
        let list = lists::create(conn, ListCreate::new(name).at(FIXTURE_TIMESTAMP))
            .await
            .map_err(AppError::from)
            .map_err(HarnessError::at(HarnessStep::SeedLists))?;
        seeded.push(list);
    }
    Ok(seeded)
}

/// Insert the fixture items, pointing at the ids of `lists`.
pub async fn seed_items<C>(conn: &C, lists: &[List]) -> Result<Vec<Item>, HarnessError>
where
    C: ConnectionTrait + Send + Sync,
{
    let mut seeded = Vec::with_capacity(FIXTURE_ITEMS.len());
    for (list_idx, name, done) in FIXTURE_ITEMS {
        let list = lists.get(list_idx).ok_or_else(|| {
            HarnessError::new(
                HarnessStep::SeedItems,
                AppError::internal(format!(
                    "Fixture item '{name}' needs list #{list_idx} but only {} lists were seeded",
                    lists.len()
                )),
            )
        })?;
        let dto = ItemCreate::new(list.id, name)
            .done(done)
            .at(FIXTURE_TIMESTAMP);
        let item = items::create(conn, dto)
            .await
            .map_err(AppError::from)
            .map_err(HarnessError::at(HarnessStep::SeedItems))?;
        seeded.push(item);
    }
    Ok(seeded)
}

/// Truncate, then seed lists and items.
pub async fn reseed<C>(conn: &C) -> Result<Fixture, HarnessError>
where
    C: ConnectionTrait + Send + Sync,
{
    truncate(conn).await?;
    let lists = seed_lists(conn).await?;
    let items = seed_items(conn, &lists).await?;
    Ok(Fixture { lists, items })
}
