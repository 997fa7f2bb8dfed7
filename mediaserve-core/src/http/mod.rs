mod access_log;
mod connection;
mod error;
mod handler;
mod request;
mod request_id;
mod response;

#[cfg(test)]
mod tests;

pub use access_log::{AccessLog, HeaderLogging};
pub use connection::{ConnectionSettings, serve_connection};
pub use error::ConnectionError;
pub use handler::RequestHandler;
pub use request::{MAX_HEADERS, Request, RequestError, parse_request_head};
pub use request_id::RequestId;
pub use response::{ALLOWED_METHODS, Body, Response};
