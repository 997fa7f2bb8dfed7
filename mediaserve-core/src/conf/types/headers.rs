use crate::conf::types::Origin;
use serde::{Deserialize, Serialize};

pub const ONE_YEAR_SECONDS: u64 = 31_536_000;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HeadersSpec {
    #[serde(skip)]
    pub origin: Origin,

    pub hsts_max_age_seconds: u64,
    pub cors: CorsSpec,
    pub cache: CacheSpec,
}

impl Default for HeadersSpec {
    fn default() -> Self {
        Self {
            origin: Origin::builtin("headers"),
            hsts_max_age_seconds: ONE_YEAR_SECONDS,
            cors: CorsSpec::default(),
            cache: CacheSpec::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CorsMode {
    #[default]
    Wildcard,
    Fixed,
    Reflect,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsSpec {
    pub mode: CorsMode,

    /// Required for `mode = "fixed"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,

    /// Only used by `mode = "reflect"`. Empty reflects any origin.
    pub allowed_origins: Vec<String>,
}

/// Cache-Control directives per extension class.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheSpec {
    /// .mp4 / .webm / .ogg
    pub media: String,
    /// .html / .htm and directory listings
    pub markup: String,
    /// everything else
    pub default: String,
}

impl Default for CacheSpec {
    fn default() -> Self {
        Self {
            media: format!("public, max-age={ONE_YEAR_SECONDS}"),
            markup: "no-store, no-cache, must-revalidate".to_string(),
            default: "public, max-age=3600".to_string(),
        }
    }
}
