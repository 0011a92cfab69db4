//! File Retrieval Route
//!
//! Returns the raw bytes of `?filename=` as an attachment. The name is
//! resolved by the configured [`FileAccessor`](crate::file_storage::FileAccessor)
//! and copied into `Content-Disposition` as given, with line breaks and other
//! bytes a header cannot carry turned into spaces.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use super::errors::{method_not_supported, ApiError, ApiResult};
use super::state::AppContext;

/// File routes with shared state
pub fn file_routes(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route(
            "/files",
            get(download_file_handler)
                .head(method_not_supported)
                .fallback(method_not_supported),
        )
        .with_state(ctx)
}

async fn download_file_handler(
    State(ctx): State<Arc<AppContext>>,
    Query(params): Query<Vec<(String, String)>>,
) -> ApiResult<Response> {
    // First occurrence wins when the parameter repeats.
    let filename = params
        .into_iter()
        .find(|(key, _)| key == "filename")
        .map(|(_, value)| value)
        .unwrap_or_default();

    if filename.is_empty() {
        return Err(ApiError::BadRequest("filename is required".to_string()));
    }

    let disposition = attachment_disposition(&filename);

    let files = ctx.files.clone();
    let data = tokio::task::spawn_blocking(move || files.read(&filename))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    let headers = [
        (
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/octet-stream"),
        ),
        (header::CONTENT_DISPOSITION, disposition),
    ];

    Ok((headers, data).into_response())
}

/// `attachment; filename=<name>` with every byte a header value cannot carry
/// replaced by a space
fn attachment_disposition(filename: &str) -> HeaderValue {
    let bytes: Vec<u8> = format!("attachment; filename={filename}")
        .into_bytes()
        .into_iter()
        .map(|b| if b == b'\t' || (b >= 0x20 && b != 0x7f) { b } else { b' ' })
        .collect();

    HeaderValue::from_bytes(&bytes).unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disposition_keeps_plain_names() {
        assert_eq!(
            attachment_disposition("../etc/hosts"),
            "attachment; filename=../etc/hosts"
        );
    }

    #[test]
    fn test_disposition_replaces_line_breaks() {
        assert_eq!(
            attachment_disposition("a\r\nSet-Cookie: x"),
            "attachment; filename=a  Set-Cookie: x"
        );
        assert_eq!(attachment_disposition("nul\0.txt"), "attachment; filename=nul .txt");
    }

    #[test]
    fn test_disposition_keeps_utf8_names() {
        let value = attachment_disposition("résumé.pdf");
        assert_eq!(value.as_bytes(), "attachment; filename=résumé.pdf".as_bytes());
    }
}
