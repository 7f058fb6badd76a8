//! Template composer
//!
//! Selects the base template for a learning-object type and fills its
//! placeholders from the vocabulary tables. Substitution is a single
//! first-occurrence replacement per placeholder, applied in a fixed order.
//!
//! A placeholder that a template does not contain is skipped: its computed
//! text is dropped and no error is raised. Only the lesson plan template
//! carries `[Duration]`, for example.

use tracing::debug;

use crate::error::ComposeError;
use crate::params::{BloomsLevel, LearningObjectType, ParameterSet, ScaffoldingLevel};
use crate::vocabulary;

const LESSON_PLAN: &str = include_str!("../templates/lesson_plan.tmpl");
const QUIZ: &str = include_str!("../templates/quiz.tmpl");
const WORKSHEET: &str = include_str!("../templates/worksheet.tmpl");
const PROJECT: &str = include_str!("../templates/project.tmpl");
const ASSESSMENT: &str = include_str!("../templates/assessment.tmpl");

const CONCEPTS: &str = "Key concepts will be generated based on the topic";

const DURATION: &str = "45 minutes";

/// Named slots in the base templates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Grade,
    Topic,
    LearningObjective,
    Concepts,
    Duration,
    ScaffoldingLevel,
    BloomsLevel,
    LocalContext,
}

impl Placeholder {
    /// Substitution order
    pub const ALL: [Self; 8] = [
        Self::Grade,
        Self::Topic,
        Self::LearningObjective,
        Self::Concepts,
        Self::Duration,
        Self::ScaffoldingLevel,
        Self::BloomsLevel,
        Self::LocalContext,
    ];

    /// Literal token as it appears in a template
    pub fn token(&self) -> &'static str {
        match self {
            Self::Grade => "[Grade]",
            Self::Topic => "[Topic]",
            Self::LearningObjective => "[LearningObjective]",
            Self::Concepts => "[Concepts]",
            Self::Duration => "[Duration]",
            Self::ScaffoldingLevel => "[ScaffoldingLevel]",
            Self::BloomsLevel => "[BloomsLevel]",
            Self::LocalContext => "[LocalContext]",
        }
    }
}

/// Parameters whose learning-object type has not been parsed yet
///
/// For callers holding the type as a raw label; [`compose_raw`] rejects an
/// unrecognized label with [`ComposeError::InvalidInput`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UncheckedParameters<'a> {
    pub grade: u8,
    pub topic: &'a str,
    pub learning_object_type: &'a str,
    pub scaffolding_level: ScaffoldingLevel,
    pub blooms_level: BloomsLevel,
    pub include_local_context: bool,
}

/// Base template for a learning-object type
pub fn template_for(learning_object_type: LearningObjectType) -> &'static str {
    match learning_object_type {
        LearningObjectType::LessonPlan => LESSON_PLAN,
        LearningObjectType::Quiz => QUIZ,
        LearningObjectType::Worksheet => WORKSHEET,
        LearningObjectType::Project => PROJECT,
        LearningObjectType::Assessment => ASSESSMENT,
    }
}

/// Topic sentence followed by the first two objectives for the grade
pub fn learning_objectives(grade: u8, topic: &str) -> String {
    debug!(%grade, %topic, "learning_objectives: called");
    let base = format!(
        "Students will understand and apply key concepts related to {} in the context of EMS.",
        topic
    );

    std::iter::once(base.as_str())
        .chain(vocabulary::grade_objectives(grade).iter().take(2).copied())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn bullets(items: &[&str]) -> String {
    items.iter().map(|item| format!("- {}", item)).collect::<Vec<_>>().join("\n")
}

/// Scaffolding description followed by its bulleted strategies
pub fn scaffolding_description(level: ScaffoldingLevel) -> String {
    debug!(%level, "scaffolding_description: called");
    let guidance = vocabulary::scaffolding_guidance(level);
    format!("{}\n\nStrategies:\n{}", guidance.description, bullets(guidance.strategies))
}

/// Bloom's description with key verbs, activities and assessment methods
pub fn blooms_description(level: BloomsLevel) -> String {
    debug!(%level, "blooms_description: called");
    let guidance = vocabulary::blooms_guidance(level);
    format!(
        "{}\n\nKey Verbs:\n{}\n\nSuggested Activities:\n{}\n\nAssessment Methods:\n{}",
        guidance.description,
        bullets(guidance.verbs),
        bullets(guidance.activities),
        bullets(guidance.assessment)
    )
}

/// South African context block for a learning-object type
pub fn local_context_block(learning_object_type: LearningObjectType) -> String {
    debug!(%learning_object_type, "local_context_block: called");
    let profile = vocabulary::local_context(learning_object_type);
    let mut block = String::from("South African Context:\n\n");

    block.push_str("Examples and Case Studies:\n");
    for example in profile.examples {
        block.push_str(&format!("- {}\n", example));
    }

    for (heading, items) in profile.optional_sections() {
        debug!(%heading, "local_context_block: adding section");
        block.push_str(&format!("\n{}:\n", heading));
        for item in items {
            block.push_str(&format!("- {}\n", item));
        }
    }

    block
}

/// Replace the first occurrence of `placeholder` in `prompt`
///
/// Leaves `prompt` untouched when the template has no such slot.
fn fill(prompt: String, placeholder: Placeholder, value: &str) -> String {
    let token = placeholder.token();
    match prompt.find(token) {
        Some(start) => {
            let mut filled = String::with_capacity(prompt.len() + value.len());
            filled.push_str(&prompt[..start]);
            filled.push_str(value);
            filled.push_str(&prompt[start + token.len()..]);
            filled
        }
        None => {
            debug!(%token, "fill: placeholder absent from template, skipping");
            prompt
        }
    }
}

/// Compose the prompt text for a validated parameter set
///
/// Deterministic: identical parameters always produce identical text.
pub fn compose(params: &ParameterSet) -> String {
    debug!(?params, "compose: called");
    let local_context = if params.include_local_context {
        local_context_block(params.learning_object_type)
    } else {
        String::new()
    };

    let prompt = Placeholder::ALL
        .into_iter()
        .fold(template_for(params.learning_object_type).to_string(), |prompt, placeholder| {
            let value = match placeholder {
                Placeholder::Grade => params.grade.to_string(),
                Placeholder::Topic => params.topic.clone(),
                Placeholder::LearningObjective => learning_objectives(params.grade, &params.topic),
                Placeholder::Concepts => CONCEPTS.to_string(),
                Placeholder::Duration => DURATION.to_string(),
                Placeholder::ScaffoldingLevel => scaffolding_description(params.scaffolding_level),
                Placeholder::BloomsLevel => blooms_description(params.blooms_level),
                Placeholder::LocalContext => local_context.clone(),
            };
            fill(prompt, placeholder, &value)
        });

    prompt.trim().to_string()
}

/// Compose from a raw learning-object type label
pub fn compose_raw(params: &UncheckedParameters<'_>) -> Result<String, ComposeError> {
    debug!(?params, "compose_raw: called");
    let learning_object_type = params.learning_object_type.parse::<LearningObjectType>()?;

    Ok(compose(&ParameterSet {
        grade: params.grade,
        topic: params.topic.to_string(),
        learning_object_type,
        scaffolding_level: params.scaffolding_level,
        blooms_level: params.blooms_level,
        include_local_context: params.include_local_context,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz_params() -> ParameterSet {
        ParameterSet {
            grade: 7,
            topic: "The Economy".to_string(),
            learning_object_type: LearningObjectType::Quiz,
            scaffolding_level: ScaffoldingLevel::HighSupport,
            blooms_level: BloomsLevel::Remember,
            include_local_context: false,
        }
    }

    #[test]
    fn test_every_template_has_required_placeholders() {
        for t in LearningObjectType::ALL {
            let template = template_for(t);
            for placeholder in Placeholder::ALL {
                if placeholder == Placeholder::Duration {
                    continue;
                }
                assert_eq!(
                    template.matches(placeholder.token()).count(),
                    1,
                    "{} in {} template",
                    placeholder.token(),
                    t
                );
            }
        }
        assert!(template_for(LearningObjectType::LessonPlan).contains("[Duration]"));
        assert!(!template_for(LearningObjectType::Quiz).contains("[Duration]"));
    }

    #[test]
    fn test_quiz_opening_line() {
        let prompt = compose(&quiz_params());
        assert!(prompt.starts_with("Create a comprehensive quiz for Grade 7 EMS on the topic of The Economy."));
        assert!(!prompt.contains("South African Context"));
    }

    #[test]
    fn test_learning_objectives_uses_first_two_grade_objectives() {
        let text = learning_objectives(9, "Entrepreneurship");
        let parts: Vec<&str> = text.split("\n\n").collect();
        assert_eq!(
            parts,
            vec![
                "Students will understand and apply key concepts related to Entrepreneurship in the context of EMS.",
                "Evaluate different economic systems and their impact on society",
                "Create and analyze business plans for entrepreneurial ventures",
            ]
        );
    }

    #[test]
    fn test_learning_objectives_for_uncovered_grade() {
        assert_eq!(
            learning_objectives(5, "Markets"),
            "Students will understand and apply key concepts related to Markets in the context of EMS."
        );
    }

    #[test]
    fn test_scaffolding_description_format() {
        let text = scaffolding_description(ScaffoldingLevel::ModerateGuidance);
        assert!(text.starts_with("Balanced support that gradually builds independence\n\nStrategies:\n- "));
        assert_eq!(text.lines().filter(|l| l.starts_with("- ")).count(), 8);
    }

    #[test]
    fn test_blooms_description_sections_in_order() {
        let text = blooms_description(BloomsLevel::Create);
        let verbs = text.find("Key Verbs:").unwrap();
        let activities = text.find("Suggested Activities:").unwrap();
        let assessment = text.find("Assessment Methods:").unwrap();
        assert!(text.starts_with("Produce new or original work"));
        assert!(verbs < activities && activities < assessment);
        assert!(text.ends_with("- Creative presentations"));
    }

    #[test]
    fn test_local_context_block_section_order() {
        let block = local_context_block(LearningObjectType::LessonPlan);
        assert!(block.starts_with("South African Context:\n\nExamples and Case Studies:\n- "));
        let resources = block.find("\nRecommended Resources:\n").unwrap();
        let terminology = block.find("\nLocal Terminology:\n").unwrap();
        assert!(resources < terminology);
        assert!(!block.contains("Contextual Considerations"));
        assert!(block.ends_with("- Use relevant local market terminology\n"));
    }

    #[test]
    fn test_local_context_block_quiz_considerations() {
        let block = local_context_block(LearningObjectType::Quiz);
        assert!(block.contains("\nContextual Considerations:\n- Use South African currency in calculations\n"));
        assert!(!block.contains("Recommended Resources"));
    }

    #[test]
    fn test_duration_only_in_lesson_plan() {
        let mut params = quiz_params();
        params.learning_object_type = LearningObjectType::LessonPlan;
        assert!(compose(&params).contains("Duration: 45 minutes"));

        params.learning_object_type = LearningObjectType::Worksheet;
        assert!(!compose(&params).contains("45 minutes"));
    }

    #[test]
    fn test_fill_missing_placeholder_is_noop() {
        let text = "No slots here".to_string();
        assert_eq!(fill(text, Placeholder::Duration, "45 minutes"), "No slots here");
    }

    #[test]
    fn test_fill_replaces_first_occurrence_only() {
        let text = "[Grade] and [Grade]".to_string();
        assert_eq!(fill(text, Placeholder::Grade, "8"), "8 and [Grade]");
    }

    #[test]
    fn test_compose_raw_accepts_label() {
        let prompt = compose_raw(&UncheckedParameters {
            grade: 8,
            topic: "Production",
            learning_object_type: "Project",
            scaffolding_level: ScaffoldingLevel::IndependentApplication,
            blooms_level: BloomsLevel::Create,
            include_local_context: true,
        })
        .unwrap();
        assert!(prompt.starts_with("Create a comprehensive project brief for Grade 8 EMS on the topic of Production."));
        assert!(prompt.contains("Include BEE requirements"));
    }

    #[test]
    fn test_compose_raw_rejects_unknown_type() {
        let result = compose_raw(&UncheckedParameters {
            grade: 7,
            topic: "The Economy",
            learning_object_type: "Essay",
            scaffolding_level: ScaffoldingLevel::HighSupport,
            blooms_level: BloomsLevel::Remember,
            include_local_context: false,
        });
        assert!(matches!(
            result,
            Err(ComposeError::InvalidInput { field: "learning object type", ref value }) if value == "Essay"
        ));
    }
}
