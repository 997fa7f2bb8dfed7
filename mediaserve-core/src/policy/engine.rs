use crate::conf::types::HeadersSpec;
use crate::policy::{CacheTable, CorsPolicy, ExtensionClass, PolicyError};
use http::HeaderValue;
use http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
    ACCESS_CONTROL_EXPOSE_HEADERS, CACHE_CONTROL, HeaderName, REFERRER_POLICY,
    STRICT_TRANSPORT_SECURITY, VARY, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS, X_XSS_PROTECTION,
};

const CORS_ALLOW_METHODS: &str = "GET, HEAD, OPTIONS";
const CORS_ALLOW_HEADERS: &str = "Range, Accept-Ranges, Content-Type";
const CORS_EXPOSE_HEADERS: &str = "Content-Range, Content-Length, Accept-Ranges";

/// Pure mapping from (extension class, request origin) to response headers.
///
/// Built once at startup and shared read-only by every connection.
#[derive(Debug, Clone)]
pub struct HeaderPolicyEngine {
    hsts: HeaderValue,
    cors: CorsPolicy,
    cache: CacheTable,
}

impl HeaderPolicyEngine {
    pub fn new(hsts_max_age_seconds: u64, cors: CorsPolicy, cache: CacheTable) -> Self {
        Self {
            hsts: HeaderValue::from_str(&format!(
                "max-age={hsts_max_age_seconds}; includeSubDomains"
            ))
            .unwrap_or_else(|_| HeaderValue::from_static("max-age=31536000; includeSubDomains")),
            cors,
            cache,
        }
    }

    pub fn from_spec(spec: &HeadersSpec) -> Result<Self, PolicyError> {
        Ok(Self::new(
            spec.hsts_max_age_seconds,
            CorsPolicy::from_spec(&spec.cors)?,
            CacheTable::from_spec(&spec.cache)?,
        ))
    }

    pub fn cors(&self) -> &CorsPolicy {
        &self.cors
    }

    /// Headers to add to a response, in emission order.
    pub fn decorate(
        &self,
        class: ExtensionClass,
        origin: Option<&str>,
    ) -> Vec<(HeaderName, HeaderValue)> {
        let mut headers = Vec::with_capacity(12);

        //--------------------------------------------------------------------------
        // Security headers
        //--------------------------------------------------------------------------
        headers.push((X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")));
        headers.push((X_FRAME_OPTIONS, HeaderValue::from_static("SAMEORIGIN")));
        headers.push((STRICT_TRANSPORT_SECURITY, self.hsts.clone()));
        headers.push((X_XSS_PROTECTION, HeaderValue::from_static("1; mode=block")));
        headers.push((
            REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ));

        //--------------------------------------------------------------------------
        // CORS, only when the request carries an allowed Origin
        //--------------------------------------------------------------------------
        if let Some(origin) = origin
            && let Some(allow_origin) = self.cors.allow_origin(origin)
        {
            headers.push((ACCESS_CONTROL_ALLOW_ORIGIN, allow_origin));
            headers.push((
                ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static(CORS_ALLOW_METHODS),
            ));
            headers.push((
                ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static(CORS_ALLOW_HEADERS),
            ));
            headers.push((
                ACCESS_CONTROL_EXPOSE_HEADERS,
                HeaderValue::from_static(CORS_EXPOSE_HEADERS),
            ));
        }

        if self.cors.varies_by_origin() {
            headers.push((VARY, HeaderValue::from_static("Origin")));
        }

        //--------------------------------------------------------------------------
        // Cache policy
        //--------------------------------------------------------------------------
        headers.push((CACHE_CONTROL, self.cache.directive(class).clone()));

        headers
    }
}
