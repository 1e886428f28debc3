use futures_util::future::LocalBoxFuture;
use listd::test_support::TestContext;

pub type TestFn = fn(TestContext) -> LocalBoxFuture<'static, ()>;

/// `(name, fn)` pair for the registry.
macro_rules! case {
    ($name:literal, $test:path) => {
        (
            $name,
            (|ctx| futures_util::FutureExt::boxed_local($test(ctx))) as $crate::handlers::TestFn,
        )
    };
}

mod items;
mod lists;

/// Every handler test, in execution order.
pub fn all() -> Vec<(&'static str, TestFn)> {
    let mut tests = Vec::new();
    tests.extend(lists::tests());
    tests.extend(items::tests());
    tests.extend(service::tests());
    tests
}
