//! Request middleware: request ids, authentication and CSRF checks.

pub mod authenticate;
pub mod csrf;
pub mod request_id;

pub use authenticate::authenticate;
pub use csrf::csrf_protection;
pub use request_id::{REQUEST_ID_HEADER, propagate_request_id, request_id_layer};
