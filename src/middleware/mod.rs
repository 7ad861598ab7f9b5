// ABOUTME: HTTP middleware for request tracing and cross-origin access
// ABOUTME: Provides request ID generation, span creation, and CORS configuration

pub mod cors;
pub mod request_id;

// CORS configuration
pub use cors::setup_cors;

// Request tracing and correlation
pub use request_id::{create_request_span, request_id_middleware, RequestId, REQUEST_ID_HEADER};
