//! Infrastructure layer - connection factory, transactions and database error translation.

pub mod db;
pub mod db_errors;
pub mod txn;
