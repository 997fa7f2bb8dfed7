use thiserror::Error;

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("cors mode \"fixed\" requires an origin")]
    MissingFixedOrigin,

    #[error("invalid header value for {field}: {value:?}")]
    InvalidHeaderValue { field: &'static str, value: String },

    #[error("cache.markup must contain no-cache or no-store: {0:?}")]
    CacheableMarkup(String),
}

impl PolicyError {
    pub(crate) fn invalid(field: &'static str, value: &str) -> Self {
        Self::InvalidHeaderValue {
            field,
            value: value.to_string(),
        }
    }
}
