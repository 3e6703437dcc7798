use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use clo_core::export;
use clo_core::history::History;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Default, serde::Deserialize)]
pub struct DownloadQuery {
    #[serde(default)]
    pub format: Option<String>,
}

fn attachment(bytes: Vec<u8>, content_type: &'static str, file_name: String) -> Response {
    let disposition = format!("attachment; filename=\"{file_name}\"");
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response()
}

/// GET /download?format=xlsx|csv: the history table as a file.
pub async fn download(
    State(app): State<AppState>,
    Query(q): Query<DownloadQuery>,
) -> Result<Response, AppError> {
    let format = q
        .format
        .as_deref()
        .map(|f| f.trim().to_lowercase())
        .unwrap_or_else(|| "xlsx".to_string());
    let csv = match format.as_str() {
        "" | "xlsx" => false,
        "csv" => true,
        other => {
            return Err(AppError::bad_request(
                "format",
                format!("'{other}' is not one of xlsx, csv"),
            ))
        }
    };

    let root = app.root.clone();
    let config = app.config.clone();
    let bytes = tokio::task::spawn_blocking(move || {
        let history = History::load(&root)?;
        if csv {
            export::history_csv(&history)
        } else {
            export::history_xlsx(&history, &config.export)
        }
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    let export_cfg = &app.config.export;
    Ok(if csv {
        attachment(bytes, export::CSV_CONTENT_TYPE, export::file_name(export_cfg, "", "csv"))
    } else {
        attachment(bytes, export::XLSX_CONTENT_TYPE, export::file_name(export_cfg, "", "xlsx"))
    })
}

/// GET /download_rubric: one rubric row per saved CLO, as a workbook.
pub async fn download_rubric(State(app): State<AppState>) -> Result<Response, AppError> {
    let root = app.root.clone();
    let config = app.config.clone();
    let reference = app.reference.clone();
    let bytes = tokio::task::spawn_blocking(move || {
        let history = History::load(&root)?;
        export::rubric_xlsx(&history, &reference, &config.export)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(attachment(
        bytes,
        export::XLSX_CONTENT_TYPE,
        export::file_name(&app.config.export, "rubric", "xlsx"),
    ))
}
