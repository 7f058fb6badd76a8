//! Prompt parameters
//!
//! [`ParameterSet`] is the validated, immutable input to the composer.
//! [`ParameterRequest`] is the loosely-typed wire form a form or API caller
//! sends; [`ParameterRequest::validate`] turns one into the other and reports
//! every bad field at once.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::curriculum;
use crate::error::{ComposeError, ValidationErrors};

/// Lowercase and drop separators so "Lesson Plan", "lesson-plan" and
/// "LESSON_PLAN" compare equal
fn normalize_label(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Kind of learning material to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LearningObjectType {
    #[serde(rename = "Lesson Plan")]
    LessonPlan,
    Quiz,
    Worksheet,
    Project,
    Assessment,
}

impl LearningObjectType {
    pub const ALL: [Self; 5] = [
        Self::LessonPlan,
        Self::Quiz,
        Self::Worksheet,
        Self::Project,
        Self::Assessment,
    ];

    /// Display label, as shown on the form and sent over the wire
    pub fn label(&self) -> &'static str {
        match self {
            Self::LessonPlan => "Lesson Plan",
            Self::Quiz => "Quiz",
            Self::Worksheet => "Worksheet",
            Self::Project => "Project",
            Self::Assessment => "Assessment",
        }
    }
}

impl fmt::Display for LearningObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LearningObjectType {
    type Err = ComposeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(%s, "LearningObjectType::from_str: called");
        let wanted = normalize_label(s);
        Self::ALL
            .into_iter()
            .find(|t| normalize_label(t.label()) == wanted)
            .ok_or_else(|| ComposeError::invalid("learning object type", s))
    }
}

/// How much structure the learner is given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScaffoldingLevel {
    #[serde(rename = "High Support")]
    HighSupport,
    #[serde(rename = "Moderate Guidance")]
    ModerateGuidance,
    #[serde(rename = "Independent Application")]
    IndependentApplication,
}

impl ScaffoldingLevel {
    pub const ALL: [Self; 3] = [Self::HighSupport, Self::ModerateGuidance, Self::IndependentApplication];

    pub fn label(&self) -> &'static str {
        match self {
            Self::HighSupport => "High Support",
            Self::ModerateGuidance => "Moderate Guidance",
            Self::IndependentApplication => "Independent Application",
        }
    }
}

impl fmt::Display for ScaffoldingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ScaffoldingLevel {
    type Err = ComposeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(%s, "ScaffoldingLevel::from_str: called");
        let wanted = normalize_label(s);
        Self::ALL
            .into_iter()
            .find(|l| normalize_label(l.label()) == wanted)
            .ok_or_else(|| ComposeError::invalid("scaffolding level", s))
    }
}

/// Cognitive-complexity category from Bloom's taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BloomsLevel {
    Remember,
    Understand,
    Apply,
    Analyze,
    Evaluate,
    Create,
}

impl BloomsLevel {
    pub const ALL: [Self; 6] = [
        Self::Remember,
        Self::Understand,
        Self::Apply,
        Self::Analyze,
        Self::Evaluate,
        Self::Create,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Remember => "Remember",
            Self::Understand => "Understand",
            Self::Apply => "Apply",
            Self::Analyze => "Analyze",
            Self::Evaluate => "Evaluate",
            Self::Create => "Create",
        }
    }
}

impl fmt::Display for BloomsLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BloomsLevel {
    type Err = ComposeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(%s, "BloomsLevel::from_str: called");
        let wanted = normalize_label(s);
        Self::ALL
            .into_iter()
            .find(|l| normalize_label(l.label()) == wanted)
            .ok_or_else(|| ComposeError::invalid("Bloom's taxonomy level", s))
    }
}

/// Validated input to the composer
///
/// Grade and topic are carried as given; the composer itself does not check
/// that the topic belongs to the grade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSet {
    pub grade: u8,
    pub topic: String,
    pub learning_object_type: LearningObjectType,
    pub scaffolding_level: ScaffoldingLevel,
    pub blooms_level: BloomsLevel,
    pub include_local_context: bool,
}

/// Unvalidated parameters as submitted by a form or API caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParameterRequest {
    pub grade: Option<u8>,
    pub topic: Option<String>,
    pub learning_object_type: Option<String>,
    pub scaffolding_level: Option<String>,
    pub blooms_level: Option<String>,
    #[serde(alias = "includeSouthAfricanContext")]
    pub include_local_context: bool,
}

/// `None` and blank strings both count as "not selected"
fn selected(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl ParameterRequest {
    /// Check every field against its closed vocabulary
    ///
    /// The topic is resolved case-insensitively against the grade's topic set
    /// and replaced with its canonical spelling.
    pub fn validate(&self) -> Result<ParameterSet, ValidationErrors> {
        debug!(?self, "ParameterRequest::validate: called");
        let mut errors = ValidationErrors::new();

        let grade = match self.grade {
            None => {
                errors.add("grade", "Please select a grade");
                None
            }
            Some(g) if curriculum::topics_for_grade(g).is_none() => {
                errors.add("grade", "Invalid grade. Must be 7, 8, or 9.");
                None
            }
            Some(g) => Some(g),
        };

        let topic = match (selected(&self.topic), grade) {
            (None, _) => {
                errors.add("topic", "Please select a topic");
                None
            }
            (Some(t), Some(g)) => match curriculum::topic_by_name(g, t) {
                Some(canonical) => Some(canonical),
                None => {
                    errors.add("topic", format!("Topic '{}' is not part of the Grade {} curriculum", t, g));
                    None
                }
            },
            // Grade already reported; the topic cannot be checked without it
            (Some(_), None) => None,
        };

        let learning_object_type = match selected(&self.learning_object_type) {
            None => {
                errors.add("learningObjectType", "Please select a learning object type");
                None
            }
            Some(v) => v
                .parse::<LearningObjectType>()
                .map_err(|_| errors.add("learningObjectType", format!("Unknown learning object type '{}'", v)))
                .ok(),
        };

        let scaffolding_level = match selected(&self.scaffolding_level) {
            None => {
                errors.add("scaffoldingLevel", "Please select a scaffolding level");
                None
            }
            Some(v) => v
                .parse::<ScaffoldingLevel>()
                .map_err(|_| errors.add("scaffoldingLevel", format!("Unknown scaffolding level '{}'", v)))
                .ok(),
        };

        let blooms_level = match selected(&self.blooms_level) {
            None => {
                errors.add("bloomsLevel", "Please select a Bloom's taxonomy level");
                None
            }
            Some(v) => v
                .parse::<BloomsLevel>()
                .map_err(|_| errors.add("bloomsLevel", format!("Unknown Bloom's taxonomy level '{}'", v)))
                .ok(),
        };

        match (grade, topic, learning_object_type, scaffolding_level, blooms_level) {
            (Some(grade), Some(topic), Some(learning_object_type), Some(scaffolding_level), Some(blooms_level))
                if errors.is_empty() =>
            {
                debug!("ParameterRequest::validate: valid");
                Ok(ParameterSet {
                    grade,
                    topic: topic.to_string(),
                    learning_object_type,
                    scaffolding_level,
                    blooms_level,
                    include_local_context: self.include_local_context,
                })
            }
            _ => {
                debug!(error_count = errors.len(), "ParameterRequest::validate: invalid");
                Err(errors)
            }
        }
    }
}

impl From<&ParameterSet> for ParameterRequest {
    fn from(params: &ParameterSet) -> Self {
        Self {
            grade: Some(params.grade),
            topic: Some(params.topic.clone()),
            learning_object_type: Some(params.learning_object_type.label().to_string()),
            scaffolding_level: Some(params.scaffolding_level.label().to_string()),
            blooms_level: Some(params.blooms_level.label().to_string()),
            include_local_context: params.include_local_context,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> ParameterRequest {
        ParameterRequest {
            grade: Some(8),
            topic: Some("Labour".to_string()),
            learning_object_type: Some("Worksheet".to_string()),
            scaffolding_level: Some("Moderate Guidance".to_string()),
            blooms_level: Some("Analyze".to_string()),
            include_local_context: true,
        }
    }

    #[test]
    fn test_learning_object_type_parse() {
        assert_eq!("Lesson Plan".parse::<LearningObjectType>(), Ok(LearningObjectType::LessonPlan));
        assert_eq!("lesson-plan".parse::<LearningObjectType>(), Ok(LearningObjectType::LessonPlan));
        assert_eq!("QUIZ".parse::<LearningObjectType>(), Ok(LearningObjectType::Quiz));
        assert!("Essay".parse::<LearningObjectType>().is_err());
        assert!("".parse::<LearningObjectType>().is_err());
    }

    #[test]
    fn test_scaffolding_and_blooms_parse() {
        assert_eq!(
            "independent_application".parse::<ScaffoldingLevel>(),
            Ok(ScaffoldingLevel::IndependentApplication)
        );
        assert_eq!("evaluate".parse::<BloomsLevel>(), Ok(BloomsLevel::Evaluate));
        assert!("Synthesize".parse::<BloomsLevel>().is_err());
    }

    #[test]
    fn test_labels_round_trip_through_display() {
        for t in LearningObjectType::ALL {
            assert_eq!(t.to_string().parse::<LearningObjectType>(), Ok(t));
        }
        for l in ScaffoldingLevel::ALL {
            assert_eq!(l.to_string().parse::<ScaffoldingLevel>(), Ok(l));
        }
        for l in BloomsLevel::ALL {
            assert_eq!(l.to_string().parse::<BloomsLevel>(), Ok(l));
        }
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&LearningObjectType::LessonPlan).unwrap();
        assert_eq!(json, "\"Lesson Plan\"");
        let level: ScaffoldingLevel = serde_json::from_str("\"High Support\"").unwrap();
        assert_eq!(level, ScaffoldingLevel::HighSupport);
    }

    #[test]
    fn test_validate_ok() {
        let params = valid_request().validate().unwrap();
        assert_eq!(params.grade, 8);
        assert_eq!(params.topic, "Labour");
        assert_eq!(params.learning_object_type, LearningObjectType::Worksheet);
        assert_eq!(params.scaffolding_level, ScaffoldingLevel::ModerateGuidance);
        assert_eq!(params.blooms_level, BloomsLevel::Analyze);
        assert!(params.include_local_context);
    }

    #[test]
    fn test_validate_canonicalizes_topic() {
        let request = ParameterRequest {
            topic: Some("forms of ownership".to_string()),
            ..valid_request()
        };
        assert_eq!(request.validate().unwrap().topic, "Forms of Ownership");
    }

    #[test]
    fn test_validate_rejects_topic_from_other_grade() {
        let request = ParameterRequest {
            topic: Some("The Economy".to_string()),
            ..valid_request()
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get("topic"),
            Some("Topic 'The Economy' is not part of the Grade 8 curriculum")
        );
    }

    #[test]
    fn test_validate_reports_every_missing_field() {
        let errors = ParameterRequest::default().validate().unwrap_err();
        assert_eq!(errors.len(), 5);
        assert_eq!(errors.get("grade"), Some("Please select a grade"));
        assert_eq!(errors.get("topic"), Some("Please select a topic"));
        assert_eq!(errors.get("learningObjectType"), Some("Please select a learning object type"));
        assert_eq!(errors.get("scaffoldingLevel"), Some("Please select a scaffolding level"));
        assert_eq!(errors.get("bloomsLevel"), Some("Please select a Bloom's taxonomy level"));
    }

    #[test]
    fn test_validate_rejects_unknown_values() {
        let request = ParameterRequest {
            grade: Some(10),
            learning_object_type: Some("Essay".to_string()),
            blooms_level: Some("   ".to_string()),
            ..valid_request()
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(errors.get("grade"), Some("Invalid grade. Must be 7, 8, or 9."));
        assert_eq!(errors.get("learningObjectType"), Some("Unknown learning object type 'Essay'"));
        assert_eq!(errors.get("bloomsLevel"), Some("Please select a Bloom's taxonomy level"));
        // Topic cannot be checked without a valid grade
        assert_eq!(errors.get("topic"), None);
    }

    #[test]
    fn test_request_accepts_south_african_context_alias() {
        let json = r#"{
            "grade": 7,
            "topic": "Markets",
            "learningObjectType": "Quiz",
            "scaffoldingLevel": "High Support",
            "bloomsLevel": "Apply",
            "includeSouthAfricanContext": true
        }"#;
        let request: ParameterRequest = serde_json::from_str(json).unwrap();
        assert!(request.include_local_context);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_request_from_parameter_set_validates_back() {
        let params = valid_request().validate().unwrap();
        let request = ParameterRequest::from(&params);
        assert_eq!(request.validate().unwrap(), params);
    }
}
