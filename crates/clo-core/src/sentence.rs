use crate::types::{connector_for, Domain, Style};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Leading connectors stripped from a condition before the domain's own
/// connector is applied.
const STRIPPED_CONNECTORS: &[&str] = &["when", "by"];

// ---------------------------------------------------------------------------
// SentenceParts
// ---------------------------------------------------------------------------

/// The fragments a CLO sentence is assembled from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentenceParts {
    pub verb: String,
    pub content: String,
    pub skill: String,
    pub condition: String,
    pub criterion: String,
    pub values: String,
    pub domain: Option<Domain>,
    #[serde(default)]
    pub style: Style,
    /// Verbs of the chosen level; a content phrase that opens with any of
    /// them has that word dropped.
    #[serde(default)]
    pub level_verbs: Vec<String>,
}

// ---------------------------------------------------------------------------
// Fragment helpers
// ---------------------------------------------------------------------------

/// Lower-case, trim, and collapse inner whitespace.
pub fn normalize_fragment(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

static LEADING_WORD_RE: OnceLock<Regex> = OnceLock::new();

fn leading_word_re() -> &'static Regex {
    LEADING_WORD_RE.get_or_init(|| Regex::new(r"^([a-z][a-z'\-]*)(?:[\s,:;]+|$)").unwrap())
}

/// Drop a repeated action verb from the front of the content phrase so the
/// sentence never reads "apply apply …". Only the first word is checked.
pub fn strip_leading_verb(content: &str, verb: &str, level_verbs: &[String]) -> String {
    let content = normalize_fragment(content);
    let verb = normalize_fragment(verb);
    let Some(caps) = leading_word_re().captures(&content) else {
        return content;
    };
    let first = &caps[1];
    let repeated = (!verb.is_empty() && first == verb)
        || level_verbs.iter().any(|v| normalize_fragment(v) == first);
    if repeated {
        content[caps[0].len()..].trim().to_string()
    } else {
        content
    }
}

/// Normalize a condition clause for `domain`: strip a leading "when"/"by",
/// then prepend the domain's connector. Idempotent.
pub fn normalize_condition(condition: &str, domain: Option<Domain>) -> String {
    let mut rest = normalize_fragment(condition);
    loop {
        let stripped = STRIPPED_CONNECTORS.iter().find_map(|c| {
            if rest == *c {
                Some(String::new())
            } else {
                rest.strip_prefix(&format!("{c} ")).map(str::to_string)
            }
        });
        match stripped {
            Some(s) => rest = s,
            None => break,
        }
    }
    if rest.is_empty() {
        return rest;
    }
    format!("{} {rest}", connector_for(domain))
}

pub fn values_phrase(values: &str, style: Style) -> String {
    let values = normalize_fragment(values);
    if values.is_empty() {
        return values;
    }
    format!("{} {values}", style.connector())
}

/// Capitalize the first letter and end with exactly one period.
pub fn finish_sentence(s: &str) -> String {
    let body = s.trim().trim_end_matches(|c: char| c == '.' || c.is_whitespace());
    let mut chars = body.chars();
    match chars.next() {
        Some(first) => format!("{}{}.", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

fn join_nonempty<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(|p| p.as_ref().trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Assemble the base sentence:
/// `[verb content] [using skill] [condition] [criterion] [values phrase].`
pub fn assemble(parts: &SentenceParts) -> String {
    let verb = normalize_fragment(&parts.verb);
    let content = strip_leading_verb(&parts.content, &verb, &parts.level_verbs);
    let skill = normalize_fragment(&parts.skill);
    let using = if skill.is_empty() {
        String::new()
    } else {
        format!("using {skill}")
    };
    let sentence = join_nonempty(&[
        join_nonempty(&[verb, content]),
        using,
        normalize_condition(&parts.condition, parts.domain),
        normalize_fragment(&parts.criterion),
        values_phrase(&parts.values, parts.style),
    ]);
    finish_sentence(&sentence)
}

// ---------------------------------------------------------------------------
// Variants
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentenceVariant {
    Standard,
    CriticalThinking,
    ProblemSolving,
    ActionOriented,
    ProfessionalPractice,
    EthicalEmphasis,
}

impl SentenceVariant {
    pub fn all() -> &'static [SentenceVariant] {
        &[
            SentenceVariant::Standard,
            SentenceVariant::CriticalThinking,
            SentenceVariant::ProblemSolving,
            SentenceVariant::ActionOriented,
            SentenceVariant::ProfessionalPractice,
            SentenceVariant::EthicalEmphasis,
        ]
    }

    pub fn label(self) -> &'static str {
        match self {
            SentenceVariant::Standard => "Standard",
            SentenceVariant::CriticalThinking => "Critical Thinking",
            SentenceVariant::ProblemSolving => "Problem-Solving",
            SentenceVariant::ActionOriented => "Action-Oriented",
            SentenceVariant::ProfessionalPractice => "Professional Practice",
            SentenceVariant::EthicalEmphasis => "Ethical Emphasis",
        }
    }

    /// Replacement for the "using" that introduces the skill clause.
    fn skill_connector(self) -> Option<&'static str> {
        match self {
            SentenceVariant::CriticalThinking => Some("critically using"),
            SentenceVariant::ProblemSolving => {
                Some("by applying structured problem-solving approaches to")
            }
            SentenceVariant::ActionOriented => Some("through the practical application of"),
            SentenceVariant::ProfessionalPractice => {
                Some("in line with professional practice standards for")
            }
            SentenceVariant::Standard | SentenceVariant::EthicalEmphasis => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantSentence {
    pub variant: SentenceVariant,
    pub label: String,
    pub sentence: String,
}

const ETHICAL_CONNECTOR: &str = "with a strong ethical commitment to";

/// Apply one variant's find/replace to an already-assembled base sentence.
/// When the anchor phrase is absent the base sentence is returned unchanged.
pub fn apply_variant(base: &str, parts: &SentenceParts, variant: SentenceVariant) -> String {
    if let Some(connector) = variant.skill_connector() {
        let skill = normalize_fragment(&parts.skill);
        if skill.is_empty() {
            return base.to_string();
        }
        let anchor = format!(" using {skill}");
        return base.replacen(&anchor, &format!(" {connector} {skill}"), 1);
    }
    if variant == SentenceVariant::EthicalEmphasis {
        let phrase = values_phrase(&parts.values, parts.style);
        if phrase.is_empty() {
            return base.to_string();
        }
        let anchor = format!(" {phrase}");
        if let Some(pos) = base.rfind(&anchor) {
            let values = normalize_fragment(&parts.values);
            let mut out = String::with_capacity(base.len() + ETHICAL_CONNECTOR.len());
            out.push_str(&base[..pos]);
            out.push_str(&format!(" {ETHICAL_CONNECTOR} {values}"));
            out.push_str(&base[pos + anchor.len()..]);
            return out;
        }
    }
    base.to_string()
}

pub fn variants(parts: &SentenceParts) -> Vec<VariantSentence> {
    let base = assemble(parts);
    SentenceVariant::all()
        .iter()
        .map(|&variant| VariantSentence {
            variant,
            label: variant.label().to_string(),
            sentence: apply_variant(&base, parts, variant),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
