use crate::sentence::{finish_sentence, normalize_condition, normalize_fragment, SentenceParts};
use serde::{Deserialize, Serialize};

/// Four quality bands for one CLO. Pure string templates; there is no
/// scoring behind them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rubric {
    pub excellent: String,
    pub good: String,
    pub satisfactory: String,
    pub poor: String,
}

impl Rubric {
    pub fn bands(&self) -> [(&'static str, &str); 4] {
        [
            ("Excellent", self.excellent.as_str()),
            ("Good", self.good.as_str()),
            ("Satisfactory", self.satisfactory.as_str()),
            ("Poor", self.poor.as_str()),
        ]
    }
}

fn band(lead: &str, skill: &str, condition: &str, values_clause: Option<String>) -> String {
    let head = [lead, skill, condition]
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    match values_clause {
        Some(tail) => finish_sentence(&format!("{head}, {tail}")),
        None => finish_sentence(&head),
    }
}

pub fn generate(parts: &SentenceParts) -> Rubric {
    let skill = normalize_fragment(&parts.skill);
    let condition = normalize_condition(&parts.condition, parts.domain);
    let values = normalize_fragment(&parts.values);
    let tail = |phrase: &str| (!values.is_empty()).then(|| format!("{phrase} {values}"));

    Rubric {
        excellent: band("consistently demonstrates", &skill, &condition, tail("fully upholding")),
        good: band("generally demonstrates", &skill, &condition, tail("mostly upholding")),
        satisfactory: band(
            "partially demonstrates",
            &skill,
            &condition,
            tail("with limited attention to"),
        ),
        poor: band("does not demonstrate", &skill, &condition, tail("and disregards")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Domain;

    fn parts() -> SentenceParts {
        SentenceParts {
            verb: "Perform".into(),
            content: "basic airway management".into(),
            skill: "Clinical Skills".into(),
            condition: "when performing practical procedures".into(),
            criterion: "competently".into(),
            values: "patient safety".into(),
            domain: Some(Domain::Psychomotor),
            ..Default::default()
        }
    }

    #[test]
    fn four_graded_bands() {
        let r = generate(&parts());
        assert_eq!(
            r.excellent,
            "Consistently demonstrates clinical skills by performing practical procedures, fully upholding patient safety."
        );
        assert!(r.good.starts_with("Generally demonstrates clinical skills"));
        assert!(r.satisfactory.ends_with("with limited attention to patient safety."));
        assert_eq!(
            r.poor,
            "Does not demonstrate clinical skills by performing practical procedures, and disregards patient safety."
        );
    }

    #[test]
    fn missing_values_drops_tail() {
        let mut p = parts();
        p.values.clear();
        p.condition.clear();
        let r = generate(&p);
        assert_eq!(r.excellent, "Consistently demonstrates clinical skills.");
        assert_eq!(r.poor, "Does not demonstrate clinical skills.");
    }

    #[test]
    fn bands_are_ordered() {
        let labels: Vec<_> = generate(&parts()).bands().iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, ["Excellent", "Good", "Satisfactory", "Poor"]);
    }
}
