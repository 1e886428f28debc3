#![allow(dead_code)]

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, Error};
use serde::de::DeserializeOwned;
use serde_json::Value;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    listd_test_support::test_logging::init();
}

/// Send `req` and return the status with the body parsed as JSON
/// (`Value::Null` for an empty body).
pub async fn call_json<S>(app: &S, req: Request) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or_else(|e| {
            panic!(
                "response body is not JSON ({e}): {}",
                String::from_utf8_lossy(&body)
            )
        })
    };
    (status, json)
}

/// Send `req`, assert the `expected` status, and decode the body.
pub async fn call_ok<S, T>(app: &S, req: Request, expected: StatusCode) -> T
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
    T: DeserializeOwned,
{
    let (status, json) = call_json(app, req).await;
    assert_eq!(status, expected, "unexpected status, body: {json}");
    serde_json::from_value(json).expect("decode response body")
}
