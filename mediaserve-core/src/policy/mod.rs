mod cache;
mod cors;
mod engine;
mod error;

#[cfg(test)]
mod tests;

pub use cache::{CacheTable, ExtensionClass, forbids_caching};
pub use cors::CorsPolicy;
pub use engine::HeaderPolicyEngine;
pub use error::PolicyError;
