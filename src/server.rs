//! HTTP upload front end.
//!
//! `GET /` serves the upload form, `POST /` classifies the submitted `file`
//! part and renders the result into the same page, `POST /classify` does the
//! same and answers with JSON.

use crate::analysis::{analyze, Classification};
use crate::classifier::KeywordTable;
use crate::config::Config;
use crate::error::{Error, ExtractionError, ValidationError};
use crate::upload::{accept, UploadStore};
use anyhow::Context;
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use log::{error, info, warn};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    table: Arc<KeywordTable>,
    store: UploadStore,
}

impl AppState {
    pub fn new(table: KeywordTable, store: UploadStore) -> Self {
        Self {
            table: Arc::new(table),
            store,
        }
    }
}

/// Why a request did not produce a label
#[derive(Debug)]
enum Failure {
    Malformed(String),
    Rejected(ValidationError),
    Unreadable(ExtractionError),
    Internal(String),
}

impl Failure {
    fn status(&self) -> StatusCode {
        match self {
            Failure::Malformed(_) | Failure::Rejected(_) => StatusCode::BAD_REQUEST,
            Failure::Unreadable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Failure::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text shown to the user
    fn message(&self) -> String {
        match self {
            Failure::Malformed(msg) => format!("Malformed upload: {}", msg),
            Failure::Rejected(e) => e.to_string(),
            Failure::Unreadable(_) => "Could not read document".to_string(),
            Failure::Internal(_) => "Internal error".to_string(),
        }
    }

    /// Underlying cause, for clients that want more than the message
    fn detail(&self) -> Option<String> {
        match self {
            Failure::Unreadable(e) => Some(e.to_string()),
            _ => None,
        }
    }
}

impl From<Error> for Failure {
    fn from(err: Error) -> Self {
        match err {
            Error::Validation(e) => Failure::Rejected(e),
            Error::Extraction(e) => Failure::Unreadable(e),
            other => Failure::Internal(other.to_string()),
        }
    }
}

pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(index).post(upload_page))
        .route("/classify", post(upload_json))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

/// Bind and serve until the process is stopped
pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let table = config.keyword_table()?;
    let folder = config.upload_folder();
    std::fs::create_dir_all(&folder)
        .with_context(|| format!("Failed to create upload folder: {}", folder.display()))?;

    let app = router(
        AppState::new(table, UploadStore::new(folder)),
        config.server.max_upload_bytes,
    );

    let listener = tokio::net::TcpListener::bind(config.server.bind.as_str())
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind))?;
    info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

async fn index() -> Html<String> {
    Html(render_page(None))
}

async fn upload_page(State(state): State<AppState>, multipart: Multipart) -> Response {
    match process(&state, multipart).await {
        Ok(classification) => Html(render_page(Some(&classification.label))).into_response(),
        Err(failure) => {
            if let Failure::Internal(msg) = &failure {
                error!("upload failed: {}", msg);
            }
            (failure.status(), Html(render_page(Some(&failure.message())))).into_response()
        }
    }
}

async fn upload_json(State(state): State<AppState>, multipart: Multipart) -> Response {
    match process(&state, multipart).await {
        Ok(classification) => Json(classification).into_response(),
        Err(failure) => {
            if let Failure::Internal(msg) = &failure {
                error!("upload failed: {}", msg);
            }
            let mut body = serde_json::json!({ "error": failure.message() });
            if let Some(detail) = failure.detail() {
                body["detail"] = serde_json::Value::String(detail);
            }
            (failure.status(), Json(body)).into_response()
        }
    }
}

/// The `file` part's filename and bytes, or None when there is no file part
async fn read_file_part(mut multipart: Multipart) -> Result<Option<(String, Vec<u8>)>, Failure> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Failure::Malformed(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        // A plain form field called "file" is not a file part
        let Some(file_name) = field.file_name().map(str::to_string) else {
            return Ok(None);
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| Failure::Malformed(e.to_string()))?;
        return Ok(Some((file_name, bytes.to_vec())));
    }
    Ok(None)
}

async fn process(state: &AppState, multipart: Multipart) -> Result<Classification, Failure> {
    let (filename, content) = match read_file_part(multipart).await? {
        Some((name, content)) => (Some(name), content),
        None => (None, Vec::new()),
    };

    let document = accept(filename.as_deref(), content).map_err(|e| {
        warn!("rejected upload {:?}: {}", filename, e);
        Failure::Rejected(e)
    })?;

    let state = state.clone();
    tokio::task::spawn_blocking(move || -> Result<Classification, Error> {
        let _stored = state.store.save(&document)?;
        let classification = analyze(&document, &state.table).map_err(|e| {
            warn!("could not extract {}: {}", document.filename, e);
            e
        })?;
        Ok(classification)
    })
    .await
    .map_err(|e| Failure::Internal(e.to_string()))?
    .map_err(Failure::from)
}

fn render_page(category: Option<&str>) -> String {
    let result = category
        .map(|c| format!("<h3>Detected Category: {}</h3>\n", escape_html(c)))
        .unwrap_or_default();

    format!(
        r#"<!doctype html>
<title>Sport Category Detector</title>
<h2>Upload a PDF or Word document to detect the sport category</h2>
<form method=post enctype=multipart/form-data>
  <input type=file name=file>
  <input type=submit value=Upload>
</form>
{}"#,
        result
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
