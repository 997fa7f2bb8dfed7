use crate::conf::types::CacheSpec;
use crate::policy::PolicyError;
use http::HeaderValue;
use std::path::Path;

/// Caching class of a response, derived from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionClass {
    /// .mp4 / .webm / .ogg
    Media,
    /// .html / .htm and generated listings
    Markup,
    Other,
}

impl ExtensionClass {
    pub fn of_path(path: &Path) -> Self {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return ExtensionClass::Other;
        };

        match ext.to_ascii_lowercase().as_str() {
            "mp4" | "webm" | "ogg" => ExtensionClass::Media,
            "html" | "htm" => ExtensionClass::Markup,
            _ => ExtensionClass::Other,
        }
    }

    /// Classify by the raw request path, for responses that are not a served file.
    pub fn of_request_path(path: &str) -> Self {
        let last = path.rsplit('/').next().unwrap_or_default();
        Self::of_path(Path::new(last))
    }
}

/// Cache-Control value per extension class.
#[derive(Debug, Clone)]
pub struct CacheTable {
    media: HeaderValue,
    markup: HeaderValue,
    default: HeaderValue,
}

impl CacheTable {
    pub fn from_spec(spec: &CacheSpec) -> Result<Self, PolicyError> {
        let value = |field, v: &str| {
            HeaderValue::from_str(v).map_err(|_| PolicyError::invalid(field, v))
        };

        if !forbids_caching(&spec.markup) {
            return Err(PolicyError::CacheableMarkup(spec.markup.clone()));
        }

        Ok(Self {
            media: value("cache.media", &spec.media)?,
            markup: value("cache.markup", &spec.markup)?,
            default: value("cache.default", &spec.default)?,
        })
    }

    pub fn directive(&self, class: ExtensionClass) -> &HeaderValue {
        match class {
            ExtensionClass::Media => &self.media,
            ExtensionClass::Markup => &self.markup,
            ExtensionClass::Other => &self.default,
        }
    }
}

/// Whether a Cache-Control value carries `no-cache` or `no-store`.
pub fn forbids_caching(directive: &str) -> bool {
    directive.split(',').any(|d| {
        let name = d.split('=').next().unwrap_or_default().trim();
        name.eq_ignore_ascii_case("no-cache") || name.eq_ignore_ascii_case("no-store")
    })
}
