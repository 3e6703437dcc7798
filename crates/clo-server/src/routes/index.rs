use axum::extract::{Query, State};
use axum::response::Html;
use clo_core::types::Style;

use super::ProfileQuery;
use crate::error::AppError;
use crate::state::AppState;

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn options<'a>(values: impl IntoIterator<Item = (&'a str, &'a str)>, selected: &str) -> String {
    values
        .into_iter()
        .map(|(value, label)| {
            let sel = if value == selected { " selected" } else { "" };
            format!(
                "<option value=\"{}\"{sel}>{}</option>",
                escape(value),
                escape(label)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// GET /?profile=: the composer form, pre-populated with the profile's
/// outcome codes.
pub async fn index(
    State(app): State<AppState>,
    Query(q): Query<ProfileQuery>,
) -> Result<Html<String>, AppError> {
    let template = crate::embed::index_template()
        .ok_or_else(|| AppError(anyhow::anyhow!("form template missing from build")))?;
    let profile = app.profile_or_default(q.profile.as_deref());
    let reference = &app.reference;

    let profiles = reference.outcomes.profile_names();
    let codes = reference.outcomes.outcome_codes(&profile);
    let outcome_rows: Vec<(String, String)> = codes
        .iter()
        .map(|code| {
            let label = match reference.outcomes.lookup(&profile, code) {
                Some(row) if !row.skill_description.is_empty() => {
                    format!("{code} ({})", row.skill_description)
                }
                _ => code.clone(),
            };
            (code.clone(), label)
        })
        .collect();
    let default_style = app.config.defaults.style();

    let page = template
        .replace("{{INSTITUTION}}", &escape(&app.config.institution.name))
        .replace(
            "{{PROFILE_OPTIONS}}",
            &options(profiles.iter().map(|p| (p.as_str(), p.as_str())), &profile),
        )
        .replace(
            "{{OUTCOME_OPTIONS}}",
            &options(
                outcome_rows.iter().map(|(c, l)| (c.as_str(), l.as_str())),
                "",
            ),
        )
        .replace(
            "{{IEG_OPTIONS}}",
            &options(
                reference.goals.ieg.iter().map(|c| (c.as_str(), c.as_str())),
                "",
            ),
        )
        .replace(
            "{{STYLE_OPTIONS}}",
            &options(
                Style::all().iter().map(|s| (s.as_str(), s.connector())),
                default_style.as_str(),
            ),
        );
    Ok(Html(page))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html() {
        assert_eq!(escape("A&B <b>\"x\"</b>"), "A&amp;B &lt;b&gt;&quot;x&quot;&lt;/b&gt;");
    }

    #[test]
    fn options_mark_selected() {
        let html = options([("a", "A"), ("b", "B")], "b");
        assert_eq!(
            html,
            "<option value=\"a\">A</option>\n<option value=\"b\" selected>B</option>"
        );
    }
}
