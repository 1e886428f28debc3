//! Opens the `http_request` span every handler log line nests under.
//!
//! The span carries the trace id set by `RequestTrace` and the matched route
//! template (`/api/lists/{list_id}/items/{item_id}`), never the raw path.
//! `list_id` and `item_id` start empty; the path-id extractors fill them in
//! once they have parsed a valid id.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::field::Empty;
use tracing::{info_span, Instrument, Span};

/// Route template for logs, or `"unmatched"` when no route applies.
pub fn route_label(pattern: Option<String>) -> String {
    pattern.unwrap_or_else(|| "unmatched".to_string())
}

fn request_span(req: &ServiceRequest) -> Span {
    let trace_id = req
        .extensions()
        .get::<String>()
        .cloned()
        .unwrap_or_else(|| "unknown".to_string());

    info_span!(
        "http_request",
        trace_id = %trace_id,
        method = %req.method(),
        route = %route_label(req.match_pattern()),
        list_id = Empty,
        item_id = Empty,
    )
}

#[derive(Clone, Default)]
pub struct TraceSpan;

impl<S, B> Transform<S, ServiceRequest> for TraceSpan
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceSpanMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceSpanMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct TraceSpanMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for TraceSpanMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let span = request_span(&req);
        // Call inside the span so synchronous work in the handler service
        // (routing, extractors) already sees it as current.
        let fut = span.in_scope(|| self.service.call(req));
        Box::pin(fut.instrument(span))
    }
}
