//! Entity access for the domain layer.
//!
//! Repos accept any connection (pool or transaction), translate store
//! errors into `DomainError`, and turn "no row" into typed not-found errors.

pub mod items;
pub mod lists;
