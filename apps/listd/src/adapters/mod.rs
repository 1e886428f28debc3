//! SeaORM adapters: the only code that builds queries.

pub mod items_sea;
pub mod lists_sea;
