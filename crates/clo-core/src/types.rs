use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Domain
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Cognitive,
    Affective,
    Psychomotor,
}

impl Domain {
    pub fn all() -> &'static [Domain] {
        &[Domain::Cognitive, Domain::Affective, Domain::Psychomotor]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Domain::Cognitive => "cognitive",
            Domain::Affective => "affective",
            Domain::Psychomotor => "psychomotor",
        }
    }

    /// Lenient parse used at lookup time: case-insensitive, unknown → `None`.
    pub fn parse(s: &str) -> Option<Domain> {
        match s.trim().to_lowercase().as_str() {
            "cognitive" => Some(Domain::Cognitive),
            "affective" => Some(Domain::Affective),
            "psychomotor" => Some(Domain::Psychomotor),
            _ => None,
        }
    }

    /// Assessment tables are split between written (cognitive) and
    /// observed (affective, psychomotor) work.
    pub fn is_practical(self) -> bool {
        matches!(self, Domain::Affective | Domain::Psychomotor)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Domain {
    type Err = crate::error::CloError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Domain::parse(s).ok_or_else(|| {
            crate::error::CloError::invalid("domain", format!("unknown domain '{s}'"))
        })
    }
}

/// Connector that introduces the condition clause. Total over all inputs:
/// psychomotor reads "by performing…", everything else "when …".
pub fn connector_for(domain: Option<Domain>) -> &'static str {
    match domain {
        Some(Domain::Psychomotor) => "by",
        _ => "when",
    }
}

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

/// How the values clause is attached to the sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    #[default]
    Guided,
    Aligned,
    InAccordanceWith,
}

impl Style {
    pub fn all() -> &'static [Style] {
        &[Style::Guided, Style::Aligned, Style::InAccordanceWith]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Style::Guided => "guided",
            Style::Aligned => "aligned",
            Style::InAccordanceWith => "in_accordance_with",
        }
    }

    pub fn connector(self) -> &'static str {
        match self {
            Style::Guided => "guided by",
            Style::Aligned => "aligned with",
            Style::InAccordanceWith => "in accordance with",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Style {
    type Err = crate::error::CloError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_lowercase().replace(['_', '-'], " ");
        match norm.as_str() {
            "" | "guided" | "guided by" => Ok(Style::Guided),
            "aligned" | "aligned with" => Ok(Style::Aligned),
            "in accordance with" | "accordance" => Ok(Style::InAccordanceWith),
            _ => Err(crate::error::CloError::invalid(
                "style",
                format!("unknown style '{s}' (expected guided, aligned or in accordance with)"),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// GoalLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalLevel {
    Ieg,
    Peo,
    Plo,
}

impl GoalLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            GoalLevel::Ieg => "ieg",
            GoalLevel::Peo => "peo",
            GoalLevel::Plo => "plo",
        }
    }
}

impl fmt::Display for GoalLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
