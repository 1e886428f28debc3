//! Emits one `request_completed` event per request.
//!
//! The event names the route template and the list/item ids it touched,
//! so a single line says e.g. "PUT /api/lists/{list_id}/items/{item_id}
//! list_id=1 item_id=2 -> 404". Level follows the status class.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpRequest};
use futures_util::future::LocalBoxFuture;
use tracing::Level;

use crate::middleware::trace_span::route_label;
use crate::trace_ctx;

/// Fields of the completion event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSummary {
    pub method: String,
    pub route: String,
    pub list_id: Option<String>,
    pub item_id: Option<String>,
    pub status: u16,
    pub latency_ms: u128,
}

impl RequestSummary {
    fn from_request(req: &HttpRequest, status: StatusCode, started: Instant) -> Self {
        let path_param = |name: &str| req.match_info().get(name).map(str::to_string);
        Self {
            method: req.method().to_string(),
            route: route_label(req.match_pattern()),
            list_id: path_param("list_id"),
            item_id: path_param("item_id"),
            status: status.as_u16(),
            latency_ms: started.elapsed().as_millis(),
        }
    }

    pub fn level(&self) -> Level {
        match self.status {
            500..=599 => Level::ERROR,
            400..=499 => Level::WARN,
            _ => Level::INFO,
        }
    }

    fn emit(&self) {
        let trace_id = trace_ctx::trace_id();
        let list_id = self.list_id.as_deref().unwrap_or("-");
        let item_id = self.item_id.as_deref().unwrap_or("-");
        macro_rules! completed {
            ($lvl:expr) => {
                tracing::event!(
                    $lvl,
                    trace_id = %trace_id,
                    method = %self.method,
                    route = %self.route,
                    list_id,
                    item_id,
                    status = self.status,
                    latency_ms = self.latency_ms as u64,
                    "request_completed"
                )
            };
        }
        let level = self.level();
        if level == Level::ERROR {
            completed!(Level::ERROR)
        } else if level == Level::WARN {
            completed!(Level::WARN)
        } else {
            completed!(Level::INFO)
        }
    }
}

pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let started = Instant::now();
        // Kept for the error branch, where no response carries the request.
        let http_req = req.request().clone();
        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;
            let summary = match &result {
                Ok(res) => RequestSummary::from_request(res.request(), res.status(), started),
                Err(err) => RequestSummary::from_request(
                    &http_req,
                    err.as_response_error().status_code(),
                    started,
                ),
            };
            summary.emit();
            result
        })
    }
}
