use crate::http::{Request, RequestHandler, Response};
use crate::policy::{ExtensionClass, HeaderPolicyEngine};
use crate::static_files::{
    ConditionalHeaders, PathResolver, ResolveError, ResolvedTarget, ServeError, render_listing,
    serve_file,
};
use async_trait::async_trait;
use http::header::{IF_MODIFIED_SINCE, IF_NONE_MATCH, LOCATION};
use http::{HeaderValue, StatusCode};
use std::path::Path;

const LISTING_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// The static media site: resolution, rendering and header policy composed
/// behind the request hooks.
pub struct StaticSite {
    resolver: PathResolver,
    policy: HeaderPolicyEngine,
}

impl StaticSite {
    pub fn new(resolver: PathResolver, policy: HeaderPolicyEngine) -> Self {
        Self { resolver, policy }
    }

    pub fn root(&self) -> &Path {
        self.resolver.root()
    }

    async fn respond(&self, request: &Request) -> Response {
        let resolved = match self.resolver.resolve(
            &request.path,
            request.host(),
            request.query.as_deref(),
        ) {
            Ok(resolved) => resolved,
            Err(e) => return self.resolve_error(request, e),
        };

        match resolved {
            ResolvedTarget::File { path, content_type } => {
                let conditional = ConditionalHeaders {
                    if_none_match: request.header(&IF_NONE_MATCH).map(str::to_string),
                    if_modified_since: request.header(&IF_MODIFIED_SINCE).map(str::to_string),
                };

                match serve_file(&path, &content_type, &conditional).await {
                    Ok(mut response) => {
                        response.extensions.insert(ExtensionClass::of_path(&path));
                        response
                    }
                    Err(e) => serve_error(request, e),
                }
            }

            ResolvedTarget::Redirect { location } => {
                let mut response = Response::empty(StatusCode::MOVED_PERMANENTLY);
                match HeaderValue::from_str(&location) {
                    Ok(value) => {
                        response.headers.insert(LOCATION, value);
                        response
                    }
                    Err(_) => Response::error(StatusCode::BAD_REQUEST),
                }
            }

            ResolvedTarget::DirectoryListing {
                display_path,
                entries,
            } => {
                let body = render_listing(&display_path, &entries);
                let mut response = Response::bytes(
                    StatusCode::OK,
                    HeaderValue::from_static(LISTING_CONTENT_TYPE),
                    body,
                );
                response.extensions.insert(ExtensionClass::Markup);
                response
            }

            ResolvedTarget::NotFound => Response::error(StatusCode::NOT_FOUND),
        }
    }

    fn resolve_error(&self, request: &Request, err: ResolveError) -> Response {
        match err {
            ResolveError::PathTraversalRejected => {
                tracing::warn!(peer = %request.peer, path = %request.path, "path traversal rejected");
                Response::error(StatusCode::NOT_FOUND)
            }
            ResolveError::BadPath => Response::error(StatusCode::BAD_REQUEST),
            ResolveError::ListingDenied(e) => {
                tracing::warn!(path = %request.path, error = %e, "directory listing denied");
                Response::error(StatusCode::FORBIDDEN)
            }
        }
    }
}

fn serve_error(request: &Request, err: ServeError) -> Response {
    match err {
        ServeError::NotFound => Response::error(StatusCode::NOT_FOUND),
        ServeError::Forbidden => Response::error(StatusCode::FORBIDDEN),
        e => {
            tracing::error!(path = %request.path, error = %e, "failed to serve file");
            Response::error(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[async_trait]
impl RequestHandler for StaticSite {
    async fn on_request(&self, request: &Request) -> Response {
        self.respond(request).await
    }

    fn on_headers_ready(&self, request: &Request, response: &mut Response) {
        let class = response
            .extensions
            .get::<ExtensionClass>()
            .copied()
            .unwrap_or_else(|| ExtensionClass::of_request_path(&request.path));

        for (name, value) in self.policy.decorate(class, request.origin()) {
            response.headers.insert(name, value);
        }
    }

    fn on_rejection(&self, response: &mut Response) {
        for (name, value) in self.policy.decorate(ExtensionClass::Other, None) {
            response.headers.insert(name, value);
        }
    }
}
