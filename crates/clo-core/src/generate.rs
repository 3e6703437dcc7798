use crate::assessment::AssessmentLookup;
use crate::config::DefaultsConfig;
use crate::error::{CloError, Result};
use crate::outcome::{normalize_code, normalize_profile, OutcomeRecord};
use crate::reference::ReferenceData;
use crate::rubric::{self, Rubric};
use crate::sentence::{self, SentenceParts, VariantSentence};
use crate::types::{Domain, Style};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Meta (bundled lookup result)
// ---------------------------------------------------------------------------

/// Everything the form shows once an outcome and level are chosen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    pub profile: String,
    pub outcome: String,
    pub skill_code: String,
    pub skill: String,
    pub values: String,
    pub domain: String,
    pub criterion: String,
    pub condition: String,
    pub assessment: String,
    pub evidence: String,
}

fn effective_profile(profile: &str, defaults: &DefaultsConfig) -> String {
    let p = normalize_profile(profile);
    if p.is_empty() {
        normalize_profile(&defaults.profile)
    } else {
        p
    }
}

/// Taxonomy level names for the outcome's domain; empty on any miss.
pub fn levels_for(reference: &ReferenceData, profile: &str, outcome: &str) -> Vec<String> {
    reference
        .outcomes
        .lookup(profile, outcome)
        .map(|row| reference.taxonomy.levels(row.domain()))
        .unwrap_or_default()
}

/// Verb list for (outcome's domain, level); empty on any miss.
pub fn verbs_for(reference: &ReferenceData, profile: &str, outcome: &str, level: &str) -> Vec<String> {
    reference
        .outcomes
        .lookup(profile, outcome)
        .map(|row| reference.taxonomy.verbs(row.domain(), level))
        .unwrap_or_default()
}

fn meta_from_row(reference: &ReferenceData, profile: &str, row: &OutcomeRecord, level: &str) -> Meta {
    let domain = row.domain();
    let crit = reference.taxonomy.criterion(domain, level);
    let AssessmentLookup {
        assessment,
        evidence,
    } = reference.assessment.lookup(level, domain);
    Meta {
        profile: profile.to_string(),
        outcome: normalize_code(&row.code),
        skill_code: row.skill_code.clone(),
        skill: row.skill_description.clone(),
        values: row.values_tag.clone(),
        domain: domain.map(Domain::as_str).unwrap_or_default().to_string(),
        criterion: crit.criterion,
        condition: crit.condition,
        assessment,
        evidence,
    }
}

/// Bundled skill/values/domain/criterion/condition/assessment/evidence.
/// `None` when the outcome code is unknown for the profile.
pub fn meta(reference: &ReferenceData, profile: &str, outcome: &str, level: &str) -> Option<Meta> {
    let row = reference.outcomes.lookup(profile, outcome)?;
    Some(meta_from_row(reference, &normalize_profile(profile), row, level))
}

// ---------------------------------------------------------------------------
// GenerateRequest
// ---------------------------------------------------------------------------

fn default_save() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub profile: String,
    #[serde(default)]
    pub outcome: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub verb: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub course: String,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default = "default_save")]
    pub save: bool,
}

impl GenerateRequest {
    /// Required: outcome, level, verb, content. Weight, when given, is a
    /// percentage. Style, when given, must be a known style.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("outcome", &self.outcome),
            ("level", &self.level),
            ("verb", &self.verb),
            ("content", &self.content),
        ] {
            if value.trim().is_empty() {
                return Err(CloError::MissingField(name.to_string()));
            }
        }
        if let Some(w) = self.weight {
            if !w.is_finite() || !(0.0..=100.0).contains(&w) {
                return Err(CloError::invalid("weight", format!("{w} is not between 0 and 100")));
            }
        }
        if let Some(style) = &self.style {
            style.parse::<Style>()?;
        }
        Ok(())
    }

    fn style(&self, defaults: &DefaultsConfig) -> Result<Style> {
        match self.style.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s.parse(),
            _ => Ok(defaults.style()),
        }
    }
}

// ---------------------------------------------------------------------------
// Generated
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Generated {
    pub profile: String,
    pub outcome: String,
    pub level: String,
    pub style: Style,
    pub sentence: String,
    pub variants: Vec<VariantSentence>,
    pub rubric: Rubric,
    pub assessment: String,
    pub evidence: String,
    pub skill_values: String,
    pub domain: String,
    pub criterion: String,
    pub condition: String,
}

/// Build the sentence parts for an outcome/level from the reference tables.
/// Misses leave the corresponding fragments empty.
pub fn parts_for(
    reference: &ReferenceData,
    profile: &str,
    outcome: &str,
    level: &str,
    verb: &str,
    content: &str,
    style: Style,
) -> (SentenceParts, Meta) {
    let meta = reference
        .outcomes
        .lookup(profile, outcome)
        .map(|row| meta_from_row(reference, profile, row, level))
        .unwrap_or_else(|| Meta {
            profile: profile.to_string(),
            outcome: normalize_code(outcome),
            ..Default::default()
        });
    let domain = Domain::parse(&meta.domain);
    let parts = SentenceParts {
        verb: verb.to_string(),
        content: content.to_string(),
        skill: meta.skill.clone(),
        condition: meta.condition.clone(),
        criterion: meta.criterion.clone(),
        values: meta.values.clone(),
        domain,
        style,
        level_verbs: reference.taxonomy.verbs(domain, level),
    };
    (parts, meta)
}

/// Run the full pipeline: outcome → taxonomy → assessment → sentence →
/// variants → rubric.
pub fn generate(
    reference: &ReferenceData,
    defaults: &DefaultsConfig,
    req: &GenerateRequest,
) -> Result<Generated> {
    req.validate()?;
    let profile = effective_profile(&req.profile, defaults);
    let style = req.style(defaults)?;
    let (parts, meta) = parts_for(
        reference,
        &profile,
        &req.outcome,
        &req.level,
        &req.verb,
        &req.content,
        style,
    );

    let skill_values = reference
        .outcomes
        .lookup(&profile, &req.outcome)
        .map(OutcomeRecord::skill_values_summary)
        .unwrap_or_default();

    Ok(Generated {
        profile,
        outcome: meta.outcome.clone(),
        level: req.level.trim().to_string(),
        style,
        sentence: sentence::assemble(&parts),
        variants: sentence::variants(&parts),
        rubric: rubric::generate(&parts),
        assessment: meta.assessment,
        evidence: meta.evidence,
        skill_values,
        domain: meta.domain,
        criterion: meta.criterion,
        condition: meta.condition,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> GenerateRequest {
        GenerateRequest {
            profile: "Health Sciences".into(),
            outcome: "plo3".into(),
            level: "Mechanism".into(),
            verb: "Perform".into(),
            content: "basic airway management".into(),
            course: "NUR101".into(),
            weight: Some(20.0),
            style: None,
            save: true,
        }
    }

    #[test]
    fn pipeline_fills_every_field() {
        let reference = ReferenceData::builtin();
        let out = generate(&reference, &DefaultsConfig::default(), &request()).unwrap();
        assert_eq!(out.outcome, "PLO3");
        assert_eq!(out.domain, "psychomotor");
        assert_eq!(out.criterion, "competently");
        assert_eq!(
            out.sentence,
            "Perform basic airway management using clinical skills by performing learned procedures, operations, or techniques consistently competently guided by patient safety."
        );
        assert_eq!(out.assessment, "Practical test / OSCE station");
        assert_eq!(out.skill_values, "SC3: clinical skills | patient safety");
        assert_eq!(out.variants.len(), 6);
        assert!(out.rubric.excellent.starts_with("Consistently demonstrates clinical skills"));
    }

    #[test]
    fn every_builtin_condition_gets_domain_connector() {
        let reference = ReferenceData::builtin();
        let mut req = request();
        req.level = "Guided Response".into();
        req.verb = "practise".into();
        let out = generate(&reference, &DefaultsConfig::default(), &req).unwrap();
        assert!(out
            .sentence
            .contains("using clinical skills by following structured practice"));

        req.profile = "generic".into();
        req.outcome = "PLO9".into();
        req.level = "Characterization".into();
        req.verb = "uphold".into();
        let out = generate(&reference, &DefaultsConfig::default(), &req).unwrap();
        assert!(out
            .sentence
            .contains("using ethics and professionalism when sustaining academic"));
    }

    #[test]
    fn missing_required_field_is_error() {
        let reference = ReferenceData::builtin();
        let mut req = request();
        req.content = "   ".into();
        let err = generate(&reference, &DefaultsConfig::default(), &req).unwrap_err();
        assert!(matches!(err, CloError::MissingField(ref f) if f == "content"));
    }

    #[test]
    fn weight_out_of_range_is_error() {
        let mut req = request();
        req.weight = Some(140.0);
        assert!(matches!(req.validate(), Err(CloError::InvalidField { .. })));
        req.weight = Some(f64::NAN);
        assert!(req.validate().is_err());
        req.weight = None;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn unknown_outcome_still_generates() {
        let reference = ReferenceData::builtin();
        let mut req = request();
        req.outcome = "PLO77".into();
        let out = generate(&reference, &DefaultsConfig::default(), &req).unwrap();
        assert_eq!(out.sentence, "Perform basic airway management.");
        assert!(out.assessment.is_empty());
        assert!(out.domain.is_empty());
    }

    #[test]
    fn blank_profile_uses_configured_default() {
        let reference = ReferenceData::builtin();
        let mut defaults = DefaultsConfig::default();
        defaults.profile = "engineering".into();
        defaults.style = "aligned".into();
        let mut req = request();
        req.profile.clear();
        req.outcome = "PLO4".into();
        let out = generate(&reference, &defaults, &req).unwrap();
        assert_eq!(out.profile, "engineering");
        assert_eq!(out.style, Style::Aligned);
        assert!(out.sentence.contains("using modern tool usage"));
        assert!(out.sentence.ends_with("aligned with responsible practice."));
    }

    #[test]
    fn lookup_misses_are_empty() {
        let reference = ReferenceData::builtin();
        assert!(levels_for(&reference, "generic", "NOPE").is_empty());
        assert!(verbs_for(&reference, "generic", "PLO1", "Mechanism").is_empty());
        assert!(meta(&reference, "generic", "NOPE", "apply").is_none());

        let levels = levels_for(&reference, "generic", "plo4");
        assert_eq!(levels.first().map(String::as_str), Some("Receive"));
    }

    #[test]
    fn meta_bundles_lookups() {
        let reference = ReferenceData::builtin();
        let m = meta(&reference, "GENERIC", "plo2", "evaluate").unwrap();
        assert_eq!(m.profile, "generic");
        assert_eq!(m.skill_code, "SC2");
        assert_eq!(m.criterion, "independently and with sound judgment");
        assert!(m.assessment.contains("Critical review"));

        let miss = meta(&reference, "generic", "plo2", "transcend").unwrap();
        assert!(miss.criterion.is_empty());
        assert_eq!(miss.condition, "interpreting tasks");
        assert!(miss.assessment.is_empty());
    }
}
