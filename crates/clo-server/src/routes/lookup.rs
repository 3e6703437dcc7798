use axum::extract::{Path, Query, State};
use axum::Json;

use super::ProfileQuery;
use crate::error::AppError;
use crate::state::AppState;

/// GET /api/profiles: profile names with an outcome table.
pub async fn list_profiles(State(app): State<AppState>) -> Json<Vec<String>> {
    Json(app.reference.outcomes.profile_names())
}

/// GET /api/outcomes?profile=: outcome codes of the resolved table.
pub async fn list_outcomes(
    State(app): State<AppState>,
    Query(q): Query<ProfileQuery>,
) -> Json<Vec<String>> {
    let profile = app.profile_or_default(q.profile.as_deref());
    Json(app.reference.outcomes.outcome_codes(&profile))
}

/// GET /api/get_blooms/{outcome}?profile=: taxonomy levels for the
/// outcome's domain.
pub async fn get_blooms(
    State(app): State<AppState>,
    Path(outcome): Path<String>,
    Query(q): Query<ProfileQuery>,
) -> Json<Vec<String>> {
    let profile = app.profile_or_default(q.profile.as_deref());
    Json(clo_core::generate::levels_for(&app.reference, &profile, &outcome))
}

/// GET /api/get_verbs/{outcome}/{level}?profile=
pub async fn get_verbs(
    State(app): State<AppState>,
    Path((outcome, level)): Path<(String, String)>,
    Query(q): Query<ProfileQuery>,
) -> Json<Vec<String>> {
    let profile = app.profile_or_default(q.profile.as_deref());
    Json(clo_core::generate::verbs_for(
        &app.reference,
        &profile,
        &outcome,
        &level,
    ))
}

/// GET /api/get_meta/{outcome}/{level}?profile=: bundled lookups for the
/// form; `{}` when the outcome is unknown.
pub async fn get_meta(
    State(app): State<AppState>,
    Path((outcome, level)): Path<(String, String)>,
    Query(q): Query<ProfileQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let profile = app.profile_or_default(q.profile.as_deref());
    let body = match clo_core::generate::meta(&app.reference, &profile, &outcome, &level) {
        Some(meta) => serde_json::to_value(meta)?,
        None => serde_json::json!({}),
    };
    Ok(Json(body))
}
