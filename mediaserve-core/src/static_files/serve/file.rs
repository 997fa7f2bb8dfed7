use crate::http::{Body, Response};
use crate::static_files::ServeError;
use crate::static_files::serve::etag::FileValidators;
use http::header::{CONTENT_LENGTH, CONTENT_TYPE, ETAG, LAST_MODIFIED};
use http::{Extensions, HeaderMap, HeaderValue, StatusCode};
use httpdate::fmt_http_date;
use std::path::Path;
use tokio::fs;

/// Validators sent by the client for conditional GET.
#[derive(Debug, Default)]
pub struct ConditionalHeaders {
    pub if_none_match: Option<String>,
    pub if_modified_since: Option<String>,
}

/// Prepare a full-file response. Headers are complete before any byte is streamed.
pub async fn serve_file(
    path: &Path,
    content_type: &str,
    conditional: &ConditionalHeaders,
) -> Result<Response, ServeError> {
    let metadata = fs::metadata(path).await.map_err(ServeError::from_open)?;

    if !metadata.is_file() {
        return Err(ServeError::NotFound);
    }

    let len = metadata.len();
    let validators = FileValidators::from_metadata(&metadata);

    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(content_type) {
        headers.insert(CONTENT_TYPE, value);
    }
    if let Ok(value) = HeaderValue::from_str(&validators.etag) {
        headers.insert(ETAG, value);
    }
    if let Some(modified) = validators.modified
        && let Ok(value) = HeaderValue::from_str(&fmt_http_date(modified))
    {
        headers.insert(LAST_MODIFIED, value);
    }

    if validators.client_is_fresh(conditional) {
        headers.insert(CONTENT_LENGTH, HeaderValue::from_static("0"));
        return Ok(Response {
            status: StatusCode::NOT_MODIFIED,
            headers,
            body: Body::Empty,
            extensions: Extensions::new(),
        });
    }

    let file = fs::File::open(path).await.map_err(ServeError::from_open)?;

    headers.insert(CONTENT_LENGTH, HeaderValue::from(len));

    Ok(Response {
        status: StatusCode::OK,
        headers,
        body: Body::File { file, len },
        extensions: Extensions::new(),
    })
}
