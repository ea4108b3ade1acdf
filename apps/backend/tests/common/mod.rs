#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::{HeaderName, ETAG};
use actix_web::test;
use serde_json::Value;


// Logging is auto-installed for every test binary that declares `mod common;`
#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// Header value as a string; panics when absent.
pub fn header_str(resp: &ServiceResponse<BoxBody>, name: &str) -> String {
    let name = HeaderName::from_bytes(name.as_bytes()).expect("valid header name");
    resp.headers()
        .get(&name)
        .unwrap_or_else(|| panic!("{name} header should be present"))
        .to_str()
        .expect("header should be ASCII")
        .to_string()
}

/// The response's ETag; panics when absent.
pub fn etag_of(resp: &ServiceResponse<BoxBody>) -> String {
    header_str(resp, ETAG.as_str())
}

/// Read a JSON body, asserting the status first.
pub async fn json_body(resp: ServiceResponse<BoxBody>, expected_status: u16) -> Value {
    let status = resp.status().as_u16();
    let body = test::read_body(resp).await;
    assert_eq!(
        status,
        expected_status,
        "unexpected status; body: {}",
        String::from_utf8_lossy(&body)
    );
    serde_json::from_slice(&body).expect("body should be JSON")
}
