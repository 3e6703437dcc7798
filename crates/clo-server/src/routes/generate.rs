use axum::extract::{FromRequest, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use clo_core::generate::GenerateRequest;
use clo_core::history::History;
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;

/// A generate request read from either a JSON body or URL-encoded form
/// fields. Rejected bodies become 400 errors with a JSON message.
pub struct GenerateBody(pub GenerateRequest);

impl<S> FromRequest<S> for GenerateBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            let Form(fields) = Form::<GenerateFields>::from_request(req, state)
                .await
                .map_err(|e| AppError::bad_request("body", e.body_text()))?;
            return fields.into_request().map(GenerateBody);
        }

        let Json(body) = Json::<GenerateRequest>::from_request(req, state)
            .await
            .map_err(|e| AppError::bad_request("body", e.body_text()))?;
        Ok(GenerateBody(body))
    }
}

/// Form fields arrive as strings; blanks mean "not given".
#[derive(Debug, Default, Deserialize)]
struct GenerateFields {
    #[serde(default)]
    profile: String,
    #[serde(default)]
    outcome: String,
    #[serde(default)]
    level: String,
    #[serde(default)]
    verb: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    course: String,
    #[serde(default)]
    weight: String,
    #[serde(default)]
    style: String,
    #[serde(default)]
    save: Option<String>,
}

impl GenerateFields {
    fn into_request(self) -> Result<GenerateRequest, AppError> {
        let weight = match self.weight.trim() {
            "" => None,
            w => Some(
                w.parse::<f64>()
                    .map_err(|_| AppError::bad_request("weight", format!("'{w}' is not a number")))?,
            ),
        };
        let style = match self.style.trim() {
            "" => None,
            s => Some(s.to_string()),
        };
        let save = match self.save.as_deref().map(|s| s.trim().to_ascii_lowercase()) {
            None => true,
            Some(s) => !matches!(s.as_str(), "false" | "0" | "off" | "no"),
        };
        Ok(GenerateRequest {
            profile: self.profile,
            outcome: self.outcome,
            level: self.level,
            verb: self.verb,
            content: self.content,
            course: self.course,
            weight,
            style,
            save,
        })
    }
}

/// POST /generate: compose a CLO, its variants and rubric, and append it
/// to the history table unless `save` is false.
pub async fn generate(
    State(app): State<AppState>,
    GenerateBody(req): GenerateBody,
) -> Result<Json<serde_json::Value>, AppError> {
    let generated = clo_core::generate::generate(&app.reference, &app.config.defaults, &req)?;
    let mut body = serde_json::to_value(&generated)?;

    if req.save {
        let _guard = app.history_lock.lock().await;
        let root = app.root.clone();
        let record = generated.clone();
        let id = tokio::task::spawn_blocking(move || {
            let mut history = History::load(&root)?;
            let id = history.append(&req, &record);
            history.save(&root)?;
            Ok::<_, clo_core::CloError>(id)
        })
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;
        body["id"] = serde_json::json!(id);
        tracing::debug!(id, outcome = %generated.outcome, "saved generated CLO");
    }

    Ok(Json(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_form_fields_are_not_given() {
        let req = GenerateFields {
            outcome: "PLO1".into(),
            weight: "  ".into(),
            ..Default::default()
        }
        .into_request()
        .unwrap();
        assert_eq!(req.weight, None);
        assert_eq!(req.style, None);
        assert!(req.save);
    }

    #[test]
    fn form_weight_and_save_are_parsed() {
        let req = GenerateFields {
            weight: "12.5".into(),
            save: Some("false".into()),
            ..Default::default()
        }
        .into_request()
        .unwrap();
        assert_eq!(req.weight, Some(12.5));
        assert!(!req.save);

        let err = GenerateFields {
            weight: "twenty".into(),
            ..Default::default()
        }
        .into_request()
        .err()
        .unwrap();
        assert!(err.0.to_string().contains("invalid weight"));
    }
}
