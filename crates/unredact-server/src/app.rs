//! Upload form and processing endpoint.
//!
//! `GET /` serves the form. `POST /` takes a multipart body whose `pdf` file
//! field is run through the unredactor in aggressive mode; the rewritten
//! document comes back as a download.

use axum::Router;
use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, Multipart};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use tower_http::limit::RequestBodyLimitLayer;
use unredact::{UnredactOptions, Unredactor};

use crate::error::ServerError;
use crate::filename::download_name;

/// Largest accepted request body.
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Multipart field carrying the document.
const UPLOAD_FIELD: &str = "pdf";

const INDEX_HTML: &str = include_str!("index.html");

pub fn router() -> Router {
    Router::new()
        .route("/", get(index).post(upload))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_UPLOAD_BYTES))
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

struct Upload {
    file_name: String,
    data: Bytes,
}

/// Find the first `pdf` field. Other fields are skipped.
async fn read_upload(multipart: &mut Multipart) -> Result<Upload, ServerError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = match field.file_name() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => return Err(ServerError::MissingUpload),
        };
        let data = field.bytes().await?;
        return Ok(Upload { file_name, data });
    }
    Err(ServerError::MissingUpload)
}

async fn upload(mut multipart: Multipart) -> Result<Response, ServerError> {
    let Upload { file_name, data } = read_upload(&mut multipart).await?;
    let output_name = download_name(&file_name);
    if data.is_empty() {
        return Err(ServerError::EmptyUpload);
    }

    let unredactor =
        Unredactor::new(UnredactOptions::aggressive().with_max_input_bytes(MAX_UPLOAD_BYTES));
    let result = tokio::task::spawn_blocking(move || unredactor.unredact_bytes(&data)).await??;

    tracing::info!(
        file = %output_name,
        pages = result.report.page_count(),
        annotations_removed = result.report.totals.annotations_removed,
        path_ops_removed = result.report.totals.path_ops_removed,
        "unredacted upload"
    );

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{output_name}\""),
        ),
    ];
    Ok((headers, result.bytes).into_response())
}
