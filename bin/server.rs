// CSV Merger - Web Server
// Serves the merge page and turns uploaded CSV files into one merged
// download. Parse failures answer 422 with an explicit error body so the
// page never shows an empty table as if the merge had succeeded.

use anyhow::Result;
use axum::{
    extract::{DefaultBodyLimit, Multipart},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use csv_merger::{parse_csv_text, MergeEngine, MergeReport, ParsedFile, CSV_MIME_TYPE, MERGED_FILE_NAME};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

#[derive(Serialize)]
struct ApiError {
    success: bool,
    error: String,
}

fn error_response(status: StatusCode, message: String) -> Response {
    (
        status,
        Json(ApiError {
            success: false,
            error: message,
        }),
    )
        .into_response()
}

// ============================================================================
// Upload handling
// ============================================================================

/// Drain the multipart body into `(name, raw CSV text)` pairs, preserving
/// the order the files were submitted in.
async fn collect_uploads(
    multipart: &mut Multipart,
) -> Result<Vec<(String, String)>, (StatusCode, String)> {
    let mut files = Vec::new();

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                let name = field
                    .file_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("file_{}.csv", files.len() + 1));
                match field.text().await {
                    Ok(text) => files.push((name, text)),
                    Err(e) => {
                        return Err((
                            StatusCode::BAD_REQUEST,
                            format!("could not read upload {}: {}", name, e),
                        ))
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                return Err((StatusCode::BAD_REQUEST, format!("malformed upload: {}", e)))
            }
        }
    }

    Ok(files)
}

/// Fan out one parse task per file on the blocking pool, then join the
/// handles in submission order. All results are known before the merge
/// runs; the first failure abandons the whole operation.
async fn parse_all(
    files: Vec<(String, String)>,
) -> Result<Vec<ParsedFile>, (StatusCode, String)> {
    let mut handles = Vec::with_capacity(files.len());
    for (name, text) in files {
        handles.push(tokio::task::spawn_blocking(move || {
            parse_csv_text(&name, &text)
        }));
    }

    let mut parsed = Vec::with_capacity(handles.len());
    for handle in handles {
        match handle.await {
            Ok(Ok(file)) => parsed.push(file),
            Ok(Err(e)) => {
                error!("merge aborted: {}", e);
                return Err((StatusCode::UNPROCESSABLE_ENTITY, e.to_string()));
            }
            Err(e) => {
                error!("parse task panicked: {}", e);
                return Err((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error while parsing uploads".to_string(),
                ));
            }
        }
    }

    Ok(parsed)
}

async fn merge_uploads(multipart: &mut Multipart) -> Result<MergeReport, (StatusCode, String)> {
    let files = collect_uploads(multipart).await?;
    let parsed = parse_all(files).await?;

    let report = MergeEngine::new().merge(&parsed);
    info!(
        files = report.files_merged,
        rows = report.rows_kept,
        dropped = report.blank_rows_dropped,
        "merge complete"
    );
    Ok(report)
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// POST /api/merge - Merge uploaded CSV files, answer with the merged CSV
/// as a file download.
async fn merge_download(mut multipart: Multipart) -> Response {
    let report = match merge_uploads(&mut multipart).await {
        Ok(report) => report,
        Err((status, message)) => return error_response(status, message),
    };

    match report.to_csv() {
        Ok(csv_text) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, CSV_MIME_TYPE.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", MERGED_FILE_NAME),
                ),
            ],
            csv_text,
        )
            .into_response(),
        Err(e) => {
            error!("export failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// POST /api/merge/preview - Merge uploaded CSV files, answer with the
/// normalized table as JSON for display in the page.
async fn merge_preview(mut multipart: Multipart) -> Response {
    match merge_uploads(&mut multipart).await {
        Ok(report) => (StatusCode::OK, Json(ApiResponse::ok(report))).into_response(),
        Err((status, message)) => error_response(status, message),
    }
}

/// GET / - Serve the merge page
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/merge", post(merge_download))
        .route("/merge/preview", post(merge_preview));

    // No enforced limit on upload count or size
    let app = Router::new()
        .route("/", get(serve_index))
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::disable())
        .layer(CorsLayer::permissive());

    let addr = "0.0.0.0:3000";
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("merge server running on http://localhost:3000");

    axum::serve(listener, app).await?;

    Ok(())
}
