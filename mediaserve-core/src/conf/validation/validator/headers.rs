use crate::conf::types::{CorsMode, HeadersSpec};
use crate::conf::validation::report::ValidationReport;
use crate::policy::forbids_caching;
use http::HeaderValue;

pub fn validate_headers(cfg: &HeadersSpec, report: &mut ValidationReport) {
    match (cfg.cors.mode, &cfg.cors.origin) {
        (CorsMode::Fixed, None) => report.fixed_cors_without_origin(&cfg.origin),
        (CorsMode::Fixed, Some(origin)) => {
            validate_header_value("cors.origin", origin, cfg, report)
        }
        (_, Some(_)) => report.cors_origin_ignored(&cfg.origin),
        (_, None) => {}
    }

    for allowed in &cfg.cors.allowed_origins {
        validate_header_value("cors.allowed_origins", allowed, cfg, report);
    }

    validate_header_value("cache.media", &cfg.cache.media, cfg, report);
    validate_header_value("cache.markup", &cfg.cache.markup, cfg, report);
    if !forbids_caching(&cfg.cache.markup) {
        report.cacheable_markup(&cfg.cache.markup, &cfg.origin);
    }
    validate_header_value("cache.default", &cfg.cache.default, cfg, report);
}

fn validate_header_value(
    field: &str,
    value: &str,
    cfg: &HeadersSpec,
    report: &mut ValidationReport,
) {
    if HeaderValue::from_str(value).is_err() {
        report.invalid_header_value(field, value, &cfg.origin);
    }
}
