use axum::extract::{Path, State};
use axum::Json;
use clo_core::history::{History, RecordPatch};

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/history: the saved rows, oldest first.
pub async fn list_history(State(app): State<AppState>) -> Result<Json<History>, AppError> {
    let root = app.root.clone();
    let history = tokio::task::spawn_blocking(move || History::load(&root))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;
    Ok(Json(history))
}

/// PUT /api/history/{id}: edit course, sentence, assessment, evidence or
/// weight of one row.
pub async fn update_record(
    State(app): State<AppState>,
    Path(id): Path<u64>,
    Json(patch): Json<RecordPatch>,
) -> Result<Json<serde_json::Value>, AppError> {
    let _guard = app.history_lock.lock().await;
    let root = app.root.clone();
    let result = tokio::task::spawn_blocking(move || {
        let mut history = History::load(&root)?;
        let row = serde_json::to_value(history.update(id, patch)?)?;
        history.save(&root)?;
        Ok::<_, clo_core::CloError>(row)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(result))
}

/// DELETE /api/history/{id}
pub async fn delete_record(
    State(app): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let _guard = app.history_lock.lock().await;
    let root = app.root.clone();
    tokio::task::spawn_blocking(move || {
        let mut history = History::load(&root)?;
        history.remove(id)?;
        history.save(&root)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!({ "id": id, "status": "deleted" })))
}

/// GET /reset_table: replace the history with an empty table.
pub async fn reset_table(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let _guard = app.history_lock.lock().await;
    let root = app.root.clone();
    tokio::task::spawn_blocking(move || History::new().save(&root))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    tracing::info!("history table reset");
    Ok(Json(serde_json::json!({ "status": "reset" })))
}
