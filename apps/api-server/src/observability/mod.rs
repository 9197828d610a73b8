//! Observability module - request IDs.

mod request_id;

pub use request_id::{REQUEST_ID_HEADER, RequestIdMiddleware, tag_error};
