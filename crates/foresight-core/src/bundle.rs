//! Service-side generation input and canned artifact bundle types.
//!
//! These are the wire shapes for `POST /v1/generate` and `GET /v1/runs/:id`,
//! shared by the server and the SDK client.

use serde::{Deserialize, Serialize};

/// Horizon in months for a generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(try_from = "u32", into = "u32")]
pub enum Horizon {
    Six,
    #[default]
    TwentyFour,
    Sixty,
}

impl Horizon {
    /// The horizon length in months.
    pub fn months(&self) -> u32 {
        match self {
            Horizon::Six => 6,
            Horizon::TwentyFour => 24,
            Horizon::Sixty => 60,
        }
    }
}

impl TryFrom<u32> for Horizon {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            6 => Ok(Horizon::Six),
            24 => Ok(Horizon::TwentyFour),
            60 => Ok(Horizon::Sixty),
            other => Err(format!("horizon must be 6, 24 or 60, got {}", other)),
        }
    }
}

impl From<Horizon> for u32 {
    fn from(value: Horizon) -> Self {
        value.months()
    }
}

/// Whose vantage point the templated vignettes take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Perspective {
    #[default]
    Me,
    We,
    Community,
}

impl Perspective {
    /// The label interpolated into vignette text.
    pub fn label(&self) -> &'static str {
        match self {
            Perspective::Me => "me",
            Perspective::We => "we",
            Perspective::Community => "community",
        }
    }
}

/// Switches one templated phrase between cautious and adventurous framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedBias {
    Conservative,
    Exploratory,
}

/// Body of `POST /v1/generate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateInput {
    /// Seeds all templated content.
    pub question: String,

    /// Defaults to 24 months when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizon: Option<Horizon>,

    /// Included in assumptions text; defaults to "N/A".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Defaults to "me".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perspective: Option<Perspective>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_bias: Option<SeedBias>,
}

impl GenerateInput {
    /// Minimal input with only a question.
    pub fn question(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            horizon: None,
            location: None,
            perspective: None,
            seed_bias: None,
        }
    }

    pub fn horizon_months(&self) -> u32 {
        self.horizon.unwrap_or_default().months()
    }

    pub fn location_or_default(&self) -> &str {
        self.location.as_deref().unwrap_or("N/A")
    }

    pub fn perspective_label(&self) -> &'static str {
        self.perspective.unwrap_or_default().label()
    }
}

/// Confidence grade on a quick take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Med,
    High,
}

/// One-screen summary section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickTake {
    pub one_line: String,
    pub bullets: Vec<String>,
    pub confidence: Confidence,
    pub assumptions: Vec<String>,
}

/// Which cone of plausibility a vignette describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConeName {
    Upside,
    Downside,
}

/// One cone-of-plausibility vignette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cone {
    pub name: ConeName,
    pub vignette: String,
    pub drivers: Vec<String>,
    pub uncertainties: Vec<String>,
    pub early_signals: Vec<String>,
}

/// A referenced external signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRef {
    pub title: String,
    pub summary: String,
    pub source_url: Option<String>,
}

/// A named driver and why it matters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub name: String,
    pub why: String,
}

/// Signals and drivers section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalsDrivers {
    pub signals: Vec<SignalRef>,
    pub drivers: Vec<Driver>,
}

/// A dated milestone with its consequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub when: String,
    pub what: String,
    pub so_what: String,
}

/// A point where a key uncertainty resolves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inflection {
    pub when: String,
    pub what: String,
}

/// Timeline section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub milestones: Vec<Milestone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inflections: Option<Vec<Inflection>>,
}

/// Effort/impact grading for a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    L,
    M,
    H,
}

/// Optional effort/impact tags on a move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveTag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effort: Option<Rating>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<Rating>,
}

/// Recommended moves section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Moves {
    pub no_regrets: Vec<String>,
    pub options: Vec<String>,
    pub watch_outs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<MoveTag>>,
}

/// The complete canned output bundle returned by `GET /v1/runs/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactBundle {
    pub quick_take: QuickTake,
    pub cones: Vec<Cone>,
    pub signals_drivers: SignalsDrivers,
    pub timeline: Timeline,
    pub moves: Moves,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizon_accepts_only_enum_values() {
        assert!(serde_json::from_str::<Horizon>("24").is_ok());
        assert!(serde_json::from_str::<Horizon>("999").is_err());
        let json = serde_json::to_string(&Horizon::Sixty).unwrap();
        assert_eq!(json, "60");
    }

    #[test]
    fn test_input_defaults() {
        let input: GenerateInput =
            serde_json::from_str("{\"question\": \"What next?\"}").unwrap();
        assert_eq!(input.horizon_months(), 24);
        assert_eq!(input.location_or_default(), "N/A");
        assert_eq!(input.perspective_label(), "me");
        assert!(input.seed_bias.is_none());
    }

    #[test]
    fn test_null_location_falls_back() {
        let input: GenerateInput =
            serde_json::from_str("{\"question\": \"q\", \"location\": null}").unwrap();
        assert_eq!(input.location_or_default(), "N/A");
    }

    #[test]
    fn test_cone_name_capitalized_on_wire() {
        let json = serde_json::to_string(&ConeName::Upside).unwrap();
        assert_eq!(json, "\"Upside\"");
    }
}
