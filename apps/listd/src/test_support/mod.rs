//! Integration-test harness: fixture seeding and the sequential suite runner.

pub mod app_builder;
pub mod suite;
pub mod testdb;

pub use app_builder::create_test_app;
pub use suite::{TestContext, TestOutcome, TestReport, TestStatus, TestSuite};
pub use testdb::{Fixture, HarnessError, HarnessStep, FIXTURE_TIMESTAMP};
