use axum::extract::{Path, State};
use axum::Json;

use crate::state::AppState;

/// GET /api/mapping: the full IEG → PEO → PLO graph with statements.
pub async fn get_mapping(State(app): State<AppState>) -> Json<clo_core::goals::GoalGraph> {
    Json(app.reference.goals.clone())
}

/// GET /api/get_peos/{ieg}: PEO codes linked to an IEG; `[]` on miss.
pub async fn get_peos(State(app): State<AppState>, Path(ieg): Path<String>) -> Json<Vec<String>> {
    Json(app.reference.goals.peos_for(&ieg))
}

/// GET /api/get_plos/{peo}: PLO codes linked to a PEO; `[]` on miss.
pub async fn get_plos(State(app): State<AppState>, Path(peo): Path<String>) -> Json<Vec<String>> {
    Json(app.reference.goals.plos_for(&peo))
}
