mod builder;
mod error;
mod pem;
mod suites;

#[cfg(test)]
mod tests;

pub use builder::{ClientAuthMode, TlsContext, TlsContextBuilder};
pub use error::TlsError;
pub use pem::{load_ca_bundle, load_certs, load_private_key};
pub use suites::{cipher_suite_by_name, protocol_version, suite_name, suite_supports_version};
