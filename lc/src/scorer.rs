//! Fallback quality scorer
//!
//! A coarse keyword heuristic used when no higher-fidelity grader is
//! available. Each of four criteria is a binary, case-insensitive presence
//! check; there is no partial credit. CAPS alignment can therefore never
//! reach its maximum of 2 through this path.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Highest achievable total across all criteria
pub const MAX_SCORE: u8 = 5;

const FALLBACK_NOTES: [&str; 2] = [
    "Note: This is an automated fallback score based on keyword detection.",
    "For more accurate scoring, please try again when the API is available.",
];

static CAPS_KEYWORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)curriculum|caps|grade|learning objective").expect("valid regex"));

static BLOOMS_KEYWORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)remember|understand|apply|analyze|evaluate|create").expect("valid regex"));

static SCAFFOLDING_KEYWORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)support|guidance|independent|scaffold").expect("valid regex"));

static LOCAL_CONTEXT_KEYWORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)south africa|local|province|city|town").expect("valid regex"));

/// One of the four scored quality dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    CapsAlignment,
    BloomsAlignment,
    Scaffolding,
    LocalContext,
}

impl Criterion {
    /// Suggestion order
    pub const ALL: [Self; 4] = [
        Self::CapsAlignment,
        Self::BloomsAlignment,
        Self::Scaffolding,
        Self::LocalContext,
    ];

    pub fn max_score(&self) -> u8 {
        match self {
            Self::CapsAlignment => 2,
            Self::BloomsAlignment | Self::Scaffolding | Self::LocalContext => 1,
        }
    }

    fn keywords(&self) -> &'static Regex {
        match self {
            Self::CapsAlignment => &CAPS_KEYWORDS,
            Self::BloomsAlignment => &BLOOMS_KEYWORDS,
            Self::Scaffolding => &SCAFFOLDING_KEYWORDS,
            Self::LocalContext => &LOCAL_CONTEXT_KEYWORDS,
        }
    }

    fn feedback(&self, detected: bool) -> &'static str {
        match (self, detected) {
            (Self::CapsAlignment, true) => "Basic CAPS alignment detected",
            (Self::CapsAlignment, false) => "No clear CAPS alignment found",
            (Self::BloomsAlignment, true) => "Bloom's taxonomy level detected",
            (Self::BloomsAlignment, false) => "No clear cognitive level specified",
            (Self::Scaffolding, true) => "Scaffolding level indicated",
            (Self::Scaffolding, false) => "No clear scaffolding approach found",
            (Self::LocalContext, true) => "South African context detected",
            (Self::LocalContext, false) => "Limited South African context found",
        }
    }

    /// Improvement suggestion shown when the criterion is below its maximum
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::CapsAlignment => "Ensure the content aligns with CAPS curriculum requirements",
            Self::BloomsAlignment => "Adjust activities to better match the intended cognitive level",
            Self::Scaffolding => "Provide more appropriate support and guidance for the selected scaffolding level",
            Self::LocalContext => "Include more South African examples and context",
        }
    }

    fn detect(&self, text: &str) -> CriterionScore {
        let detected = self.keywords().is_match(text);
        debug!(criterion = ?self, %detected, "Criterion::detect: checked");
        CriterionScore {
            score: u8::from(detected),
            max_score: self.max_score(),
            feedback: self.feedback(detected).to_string(),
        }
    }
}

/// Score for a single criterion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionScore {
    pub score: u8,
    pub max_score: u8,
    pub feedback: String,
}

/// All four criterion scores
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaScores {
    pub caps_alignment: CriterionScore,
    pub blooms_alignment: CriterionScore,
    pub scaffolding: CriterionScore,
    #[serde(alias = "saContext")]
    pub local_context: CriterionScore,
}

impl CriteriaScores {
    pub fn get(&self, criterion: Criterion) -> &CriterionScore {
        match criterion {
            Criterion::CapsAlignment => &self.caps_alignment,
            Criterion::BloomsAlignment => &self.blooms_alignment,
            Criterion::Scaffolding => &self.scaffolding,
            Criterion::LocalContext => &self.local_context,
        }
    }

    fn clamped(mut self) -> Self {
        for (criterion, entry) in [
            (Criterion::CapsAlignment, &mut self.caps_alignment),
            (Criterion::BloomsAlignment, &mut self.blooms_alignment),
            (Criterion::Scaffolding, &mut self.scaffolding),
            (Criterion::LocalContext, &mut self.local_context),
        ] {
            entry.max_score = criterion.max_score();
            entry.score = entry.score.min(entry.max_score);
        }
        self
    }
}

/// Traffic-light band for a total score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreColor {
    Green,
    Yellow,
    Red,
}

impl ScoreColor {
    pub fn for_total(total: u8) -> Self {
        match total {
            t if t >= 4 => Self::Green,
            3 => Self::Yellow,
            _ => Self::Red,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
        }
    }
}

impl fmt::Display for ScoreColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complete quality score for a piece of text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub total_score: u8,
    pub max_score: u8,
    pub criteria_scores: CriteriaScores,
    pub feedback: Vec<String>,
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub is_fallback: bool,
}

impl ScoreResult {
    /// Build a result from criterion scores supplied by any grader
    ///
    /// Scores are clamped into `0..=max` and the maxima are reset to their
    /// fixed values; total and suggestions are derived.
    pub fn from_criteria(criteria_scores: CriteriaScores, feedback: Vec<String>, is_fallback: bool) -> Self {
        let criteria_scores = criteria_scores.clamped();
        let total_score = Criterion::ALL
            .iter()
            .map(|&c| criteria_scores.get(c).score)
            .sum();
        let suggestions = suggestions_for(&criteria_scores);

        Self {
            total_score,
            max_score: MAX_SCORE,
            criteria_scores,
            feedback,
            suggestions,
            is_fallback,
        }
    }

    /// At least basic CAPS alignment was found
    pub fn meets_minimum(&self) -> bool {
        self.criteria_scores.caps_alignment.score >= 1
    }

    pub fn color(&self) -> ScoreColor {
        ScoreColor::for_total(self.total_score)
    }

    /// e.g. "4/5 points"
    pub fn summary(&self) -> String {
        format!("{}/{} points", self.total_score, self.max_score)
    }
}

fn suggestions_for(scores: &CriteriaScores) -> Vec<String> {
    Criterion::ALL
        .iter()
        .filter(|&&c| scores.get(c).score < c.max_score())
        .map(|c| c.suggestion().to_string())
        .collect()
}

/// Suggestions for every criterion below its maximum, in criterion order
pub fn improvement_suggestions(score: &ScoreResult) -> Vec<String> {
    suggestions_for(&score.criteria_scores)
}

/// Whether `score` is within range for `criterion`
pub fn validate_criterion_score(score: u8, criterion: Criterion) -> bool {
    score <= criterion.max_score()
}

/// Whether the sum of `scores` is within the overall range
pub fn validate_total_score(scores: &[u8]) -> bool {
    scores.iter().map(|&s| u32::from(s)).sum::<u32>() <= u32::from(MAX_SCORE)
}

/// Score `text` with the keyword heuristics
///
/// Never fails: any input, including the empty string, yields a well-formed
/// result.
pub fn score_fallback(text: &str) -> ScoreResult {
    debug!(text_len = text.len(), "score_fallback: called");
    let criteria_scores = CriteriaScores {
        caps_alignment: Criterion::CapsAlignment.detect(text),
        blooms_alignment: Criterion::BloomsAlignment.detect(text),
        scaffolding: Criterion::Scaffolding.detect(text),
        local_context: Criterion::LocalContext.detect(text),
    };
    let feedback = FALLBACK_NOTES.iter().map(|s| s.to_string()).collect();

    ScoreResult::from_criteria(criteria_scores, feedback, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAPE_TOWN: &str = "This lesson plan targets Grade 7 CAPS learning objective, using the Remember level \
                             with high support and local examples from Cape Town.";

    #[test]
    fn test_all_criteria_detected() {
        let result = score_fallback(CAPE_TOWN);
        assert_eq!(result.criteria_scores.caps_alignment.score, 1);
        assert_eq!(result.criteria_scores.blooms_alignment.score, 1);
        assert_eq!(result.criteria_scores.scaffolding.score, 1);
        assert_eq!(result.criteria_scores.local_context.score, 1);
        assert_eq!(result.total_score, 4);
        assert!(result.meets_minimum());
        assert_eq!(result.color(), ScoreColor::Green);
        assert_eq!(result.summary(), "4/5 points");
        // CAPS tops out at 1 of 2, so its suggestion always remains
        assert_eq!(
            result.suggestions,
            vec!["Ensure the content aligns with CAPS curriculum requirements".to_string()]
        );
    }

    #[test]
    fn test_empty_text() {
        let result = score_fallback("");
        assert_eq!(result.total_score, 0);
        assert!(!result.meets_minimum());
        assert_eq!(result.color(), ScoreColor::Red);
        assert_eq!(result.suggestions.len(), 4);
        assert_eq!(result.criteria_scores.caps_alignment.feedback, "No clear CAPS alignment found");
        assert_eq!(result.criteria_scores.blooms_alignment.feedback, "No clear cognitive level specified");
        assert_eq!(result.criteria_scores.scaffolding.feedback, "No clear scaffolding approach found");
        assert_eq!(result.criteria_scores.local_context.feedback, "Limited South African context found");
        assert_eq!(result.suggestions[3], "Include more South African examples and context");
        assert!(result.is_fallback);
        assert_eq!(result.feedback.len(), 2);
    }

    #[test]
    fn test_case_insensitive_and_substring() {
        // "Capstone" contains "caps"; "TOWNSHIP" contains "town"
        let result = score_fallback("CAPSTONE project in a TOWNSHIP");
        assert_eq!(result.criteria_scores.caps_alignment.score, 1);
        assert_eq!(result.criteria_scores.local_context.score, 1);
        assert_eq!(result.criteria_scores.blooms_alignment.score, 0);
        assert_eq!(result.total_score, 2);
        assert_eq!(result.color(), ScoreColor::Red);
    }

    #[test]
    fn test_yellow_band() {
        let result = score_fallback("Evaluate the curriculum with guidance");
        assert_eq!(result.total_score, 3);
        assert_eq!(result.color(), ScoreColor::Yellow);
    }

    #[test]
    fn test_color_bands() {
        assert_eq!(ScoreColor::for_total(5), ScoreColor::Green);
        assert_eq!(ScoreColor::for_total(4), ScoreColor::Green);
        assert_eq!(ScoreColor::for_total(3), ScoreColor::Yellow);
        assert_eq!(ScoreColor::for_total(2), ScoreColor::Red);
        assert_eq!(ScoreColor::for_total(0), ScoreColor::Red);
    }

    #[test]
    fn test_from_criteria_clamps_out_of_range() {
        let entry = |score, max_score| CriterionScore {
            score,
            max_score,
            feedback: String::new(),
        };
        let result = ScoreResult::from_criteria(
            CriteriaScores {
                caps_alignment: entry(9, 9),
                blooms_alignment: entry(1, 1),
                scaffolding: entry(3, 1),
                local_context: entry(0, 7),
            },
            vec![],
            false,
        );
        assert_eq!(result.criteria_scores.caps_alignment.score, 2);
        assert_eq!(result.criteria_scores.scaffolding.score, 1);
        assert_eq!(result.criteria_scores.local_context.max_score, 1);
        assert_eq!(result.total_score, 4);
        assert_eq!(
            result.suggestions,
            vec!["Include more South African examples and context".to_string()]
        );
        assert!(!result.is_fallback);
    }

    #[test]
    fn test_validate_helpers() {
        assert!(validate_criterion_score(2, Criterion::CapsAlignment));
        assert!(!validate_criterion_score(2, Criterion::Scaffolding));
        assert!(validate_total_score(&[2, 1, 1, 1]));
        assert!(!validate_total_score(&[2, 2, 1, 1]));
        assert!(validate_total_score(&[]));
    }

    #[test]
    fn test_improvement_suggestions_matches_result() {
        let result = score_fallback("support");
        assert_eq!(improvement_suggestions(&result), result.suggestions);
        assert_eq!(result.suggestions.len(), 3);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(score_fallback("grade")).unwrap();
        assert_eq!(json["totalScore"], 1);
        assert_eq!(json["criteriaScores"]["capsAlignment"]["maxScore"], 2);
        assert_eq!(json["isFallback"], true);
    }
}
