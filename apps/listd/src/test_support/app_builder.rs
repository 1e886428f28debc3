//! Build an initialized Actix test service around an `AppState`.

use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::Error as ActixError;
use actix_web::{
    web::{self, ServiceConfig},
    App,
};

use crate::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use crate::state::app_state::AppState;

type RoutesFn = Box<dyn FnOnce(&mut ServiceConfig)>;

pub fn create_test_app(state: AppState) -> TestAppBuilder {
    TestAppBuilder {
        state,
        router: Router::Prod,
    }
}

enum Router {
    Prod,
    Custom(RoutesFn),
}

pub struct TestAppBuilder {
    state: AppState,
    router: Router,
}

impl TestAppBuilder {
    /// Serve ad-hoc routes, e.g. handlers that fail on purpose.
    pub fn with_routes<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut ServiceConfig) + 'static,
    {
        self.router = Router::Custom(Box::new(f));
        self
    }

    /// Build the service with the same middleware stack as `main.rs`.
    pub async fn build(
        self,
    ) -> impl Service<actix_http::Request, Response = ServiceResponse<BoxBody>, Error = ActixError>
    {
        let app = App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(web::Data::new(self.state));

        let app = match self.router {
            Router::Prod => app.configure(crate::routes::configure),
            Router::Custom(f) => app.configure(f),
        };

        actix_web::test::init_service(app).await
    }
}
