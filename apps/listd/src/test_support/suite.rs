//! Sequential test suite with a shared database and per-test fixture reset.
//!
//! A [`TestSuite`] is set up once per test binary. Each [`TestSuite::run`]
//! hands the test a clean fixture and restores it afterwards whether the
//! test passed, failed, or panicked, so one test cannot leak rows into the
//! next. [`TestSuite::finish`] closes the connection and yields the report
//! from which the process exit code is derived.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::{Duration, Instant};

use futures_util::FutureExt;
use tracing::{error, info, warn};

use crate::config::db::{Config, DbKind};
use crate::error::AppError;
use crate::infra::db::{apply_migrations, connect_db};
use crate::state::app_state::AppState;
use crate::test_support::app_builder::{create_test_app, TestAppBuilder};
use crate::test_support::testdb::{self, Fixture, HarnessError, HarnessStep};

/// What a single test gets to work with.
#[derive(Debug, Clone)]
pub struct TestContext {
    pub state: AppState,
    pub fixture: Fixture,
}

impl TestContext {
    /// Test service over the production routes, sharing the suite's pool.
    pub fn app(&self) -> TestAppBuilder {
        create_test_app(self.state.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestStatus {
    Passed,
    /// The test body panicked; the payload message is kept.
    Failed(String),
    /// The fixture could not be prepared, so the test never ran.
    Skipped(String),
    /// The test body finished but the fixture could not be restored after it.
    RestoreFailed(String),
}

#[derive(Debug, Clone)]
pub struct TestOutcome {
    pub name: String,
    pub status: TestStatus,
    pub elapsed: Duration,
}

impl TestOutcome {
    pub fn passed(&self) -> bool {
        self.status == TestStatus::Passed
    }
}

/// Summary returned by [`TestSuite::finish`]
#[derive(Debug, Clone, Default)]
pub struct TestReport {
    pub outcomes: Vec<TestOutcome>,
    /// Set when closing the connection failed.
    pub close_error: Option<String>,
}

impl TestReport {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    /// 0 when every test passed, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.failed() == 0 {
            0
        } else {
            1
        }
    }
}

pub struct TestSuite {
    state: AppState,
    fixture: Fixture,
    /// The last restore failed; reseed before handing out the fixture again.
    dirty: bool,
    outcomes: Vec<TestOutcome>,
}

impl TestSuite {
    /// Connect, migrate ephemeral databases, and seed the fixture.
    ///
    /// Refuses to touch a Postgres database whose name does not end in
    /// `_test`, since every run truncates it.
    pub async fn setup(config: Config) -> Result<Self, HarnessError> {
        if config.db_kind == DbKind::Postgres && !config.db_name.ends_with("_test") {
            return Err(HarnessError::new(
                HarnessStep::Guard,
                AppError::config(format!(
                    "Refusing to run tests against '{}': database name must end with '_test'",
                    config.db_name
                )),
            ));
        }

        let db = connect_db(&config)
            .await
            .map_err(|e| HarnessError::new(HarnessStep::Connect, e))?;

        if config.db_kind.is_ephemeral() {
            apply_migrations(&db)
                .await
                .map_err(|e| HarnessError::new(HarnessStep::Migrate, e))?;
        }

        let state = AppState::new(db, config);
        let fixture = testdb::reseed(state.db()).await?;

        info!(
            db_kind = %state.config().db_kind,
            lists = fixture.lists.len(),
            items = fixture.items.len(),
            "test suite ready"
        );

        Ok(Self {
            state,
            fixture,
            dirty: false,
            outcomes: Vec::new(),
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn fixture(&self) -> &Fixture {
        &self.fixture
    }

    /// Truncate and seed again. Failures are returned, not fatal; the
    /// suite stays usable and retries on the next [`TestSuite::run`].
    pub async fn reseed(&mut self) -> Result<&Fixture, HarnessError> {
        match testdb::reseed(self.state.db()).await {
            Ok(fixture) => {
                self.fixture = fixture;
                self.dirty = false;
                Ok(&self.fixture)
            }
            Err(e) => {
                self.dirty = true;
                Err(e)
            }
        }
    }

    /// Run one test against a clean fixture, then restore it.
    pub async fn run<F, Fut>(&mut self, name: &str, test: F) -> &TestOutcome
    where
        F: FnOnce(TestContext) -> Fut,
        Fut: Future<Output = ()>,
    {
        let start = Instant::now();

        let status = if self.dirty {
            match self.reseed().await {
                Ok(_) => None,
                Err(e) => Some(TestStatus::Skipped(e.to_string())),
            }
        } else {
            None
        };

        let status = match status {
            Some(skipped) => skipped,
            None => {
                let ctx = TestContext {
                    state: self.state.clone(),
                    fixture: self.fixture.clone(),
                };
                let result = AssertUnwindSafe(test(ctx)).catch_unwind().await;

                let restore = self.reseed().await.map(|_| ()).map_err(|e| {
                    warn!(test = name, step = %e.step, error = %e, "fixture restore failed");
                    format!("fixture restore failed at step '{}': {e}", e.step)
                });

                match (result, restore) {
                    (Ok(()), Ok(())) => TestStatus::Passed,
                    (Ok(()), Err(restore_msg)) => TestStatus::RestoreFailed(restore_msg),
                    (Err(payload), Ok(())) => TestStatus::Failed(panic_message(payload.as_ref())),
                    (Err(payload), Err(restore_msg)) => TestStatus::Failed(format!(
                        "{}; {restore_msg}",
                        panic_message(payload.as_ref())
                    )),
                }
            }
        };

        match &status {
            TestStatus::Passed => info!(test = name, "test passed"),
            TestStatus::Failed(msg) => error!(test = name, message = %msg, "test failed"),
            TestStatus::Skipped(msg) => error!(test = name, message = %msg, "test skipped"),
            TestStatus::RestoreFailed(msg) => {
                error!(test = name, message = %msg, "fixture restore failed")
            }
        }

        let idx = self.outcomes.len();
        self.outcomes.push(TestOutcome {
            name: name.to_string(),
            status,
            elapsed: start.elapsed(),
        });
        &self.outcomes[idx]
    }

    /// Close the connection and hand back the report.
    pub async fn finish(self) -> TestReport {
        let close_error = match self.state.close().await {
            Ok(()) => None,
            Err(e) => {
                warn!(error = %e, "closing test database failed");
                Some(e.to_string())
            }
        };
        TestReport {
            outcomes: self.outcomes,
            close_error,
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "test panicked".to_string()
    }
}
