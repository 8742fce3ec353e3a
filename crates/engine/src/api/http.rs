//! HTTP routes.

use axum::{
    body::Bytes,
    extract::{RawQuery, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use bestiary_domain::{Character, Monster};

use crate::app::App;
use crate::use_cases::character::{ExportError, ExportSummary};
use crate::use_cases::monster::{decode_urlencoded, FormDecodeError, FormFields};

/// Listing the form redirects to after a successful submission.
pub const MONSTER_TABLE_PATH: &str = "/monsterTable";

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/addMonster", post(add_monster))
        .route(MONSTER_TABLE_PATH, get(list_monsters))
        .route("/api/characters/export", post(export_character))
        .route("/api/characters/current", get(current_character))
}

async fn health() -> &'static str {
    "OK"
}

// =============================================================================
// Monsters
// =============================================================================

/// Accepts the authoring form from the body and the query string.
///
/// The body is only read when it is declared urlencoded; any other body is
/// ignored. Body values take precedence over query values for the same key.
async fn add_monster(
    State(app): State<Arc<App>>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let body_pairs = if is_urlencoded(&headers) {
        decode_urlencoded(&body).map_err(form_error)?
    } else {
        Vec::new()
    };
    let query_pairs = match query {
        Some(query) => decode_urlencoded(query.as_bytes()).map_err(form_error)?,
        None => Vec::new(),
    };

    let fields = FormFields::from_pairs(body_pairs.into_iter().chain(query_pairs));
    app.use_cases.monster.add.execute(&fields).await;

    Ok((StatusCode::FOUND, [(header::LOCATION, MONSTER_TABLE_PATH)]).into_response())
}

fn is_urlencoded(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|media| {
            media
                .trim()
                .eq_ignore_ascii_case("application/x-www-form-urlencoded")
        })
}

fn form_error(e: FormDecodeError) -> ApiError {
    tracing::warn!(error = %e, "Error parsing form data");
    ApiError::BadRequest(e.to_string())
}

async fn list_monsters(State(app): State<Arc<App>>) -> Json<Vec<Monster>> {
    Json(app.stores.monsters.snapshot().await)
}

// =============================================================================
// Characters
// =============================================================================

async fn export_character(
    State(app): State<Arc<App>>,
) -> Result<Json<ExportSummary>, ApiError> {
    let summary = app.use_cases.character.export.execute().await?;
    Ok(Json(summary))
}

async fn current_character(State(app): State<Arc<App>>) -> Result<Json<Character>, ApiError> {
    app.stores
        .characters
        .current()
        .await
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("No character has been exported yet".to_string()))
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg).into_response(),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(e: ExportError) -> Self {
        ApiError::Internal(e.to_string())
    }
}
