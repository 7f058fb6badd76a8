//! Vocabulary tables
//!
//! Fixed descriptive content keyed by grade, scaffolding level, Bloom's level
//! and learning-object type. Everything here is `&'static` and read-only.

use crate::params::{BloomsLevel, LearningObjectType, ScaffoldingLevel};

/// Description and ordered strategies for one scaffolding level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaffoldingGuidance {
    pub description: &'static str,
    pub strategies: &'static [&'static str],
}

/// Pedagogical guidance for one Bloom's level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BloomsGuidance {
    pub description: &'static str,
    pub verbs: &'static [&'static str],
    pub activities: &'static [&'static str],
    pub assessment: &'static [&'static str],
}

/// South African context material for one learning-object type
///
/// `examples` is always present; which of the other sub-sections exist
/// depends on the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalContextProfile {
    pub examples: &'static [&'static str],
    pub resources: Option<&'static [&'static str]>,
    pub terminology: Option<&'static [&'static str]>,
    pub activities: Option<&'static [&'static str]>,
    pub considerations: Option<&'static [&'static str]>,
}

impl LocalContextProfile {
    /// Optional sub-sections present for this type, with their headings, in
    /// rendering order: resources, terminology, activities, considerations
    pub fn optional_sections(&self) -> impl Iterator<Item = (&'static str, &'static [&'static str])> {
        [
            ("Recommended Resources", self.resources),
            ("Local Terminology", self.terminology),
            ("Suggested Activities", self.activities),
            ("Contextual Considerations", self.considerations),
        ]
        .into_iter()
        .filter_map(|(heading, items)| items.map(|items| (heading, items)))
    }

    /// Every item across all sub-sections, examples first
    pub fn all_items(&self) -> impl Iterator<Item = &'static str> {
        self.examples
            .iter()
            .copied()
            .chain(self.optional_sections().flat_map(|(_, items)| items.iter().copied()))
    }
}

const GRADE_7_OBJECTIVES: &[&str] = &[
    "Understand basic economic concepts and their application in daily life",
    "Develop foundational knowledge of economic systems and participants",
    "Apply basic economic principles to real-world situations",
    "Analyze simple economic scenarios and make informed decisions",
];

const GRADE_8_OBJECTIVES: &[&str] = &[
    "Apply economic concepts to analyze business and market structures",
    "Evaluate different forms of business ownership and their implications",
    "Understand the role of labor in economic production",
    "Analyze market dynamics and their impact on business decisions",
];

const GRADE_9_OBJECTIVES: &[&str] = &[
    "Evaluate different economic systems and their impact on society",
    "Create and analyze business plans for entrepreneurial ventures",
    "Apply financial literacy concepts to personal and business contexts",
    "Develop critical thinking skills for economic decision-making",
];

/// Grade-level learning objectives; empty for a grade outside 7-9
pub fn grade_objectives(grade: u8) -> &'static [&'static str] {
    match grade {
        7 => GRADE_7_OBJECTIVES,
        8 => GRADE_8_OBJECTIVES,
        9 => GRADE_9_OBJECTIVES,
        _ => &[],
    }
}

static HIGH_SUPPORT: ScaffoldingGuidance = ScaffoldingGuidance {
    description: "Maximum support and guidance for learners who need significant assistance",
    strategies: &[
        "Provide step-by-step instructions with clear examples",
        "Include visual aids and diagrams to support understanding",
        "Break down complex tasks into smaller, manageable parts",
        "Offer frequent checkpoints and immediate feedback",
        "Use guided practice with teacher modeling",
        "Include vocabulary support and concept definitions",
        "Provide templates and graphic organizers",
        "Allow for collaborative learning opportunities",
    ],
};

static MODERATE_GUIDANCE: ScaffoldingGuidance = ScaffoldingGuidance {
    description: "Balanced support that gradually builds independence",
    strategies: &[
        "Provide general guidelines and frameworks",
        "Include some examples and models",
        "Allow for some independent problem-solving",
        "Offer periodic check-ins and feedback",
        "Encourage peer collaboration and discussion",
        "Include some open-ended questions",
        "Provide basic templates or outlines",
        "Allow for some choice in approach",
    ],
};

static INDEPENDENT_APPLICATION: ScaffoldingGuidance = ScaffoldingGuidance {
    description: "Minimal support for learners ready to work independently",
    strategies: &[
        "Provide open-ended tasks and challenges",
        "Encourage creative problem-solving",
        "Allow for self-directed learning",
        "Include opportunities for extension and enrichment",
        "Promote critical thinking and analysis",
        "Encourage peer teaching and leadership",
        "Allow for choice in presentation and approach",
        "Include opportunities for real-world application",
    ],
};

pub fn scaffolding_guidance(level: ScaffoldingLevel) -> &'static ScaffoldingGuidance {
    match level {
        ScaffoldingLevel::HighSupport => &HIGH_SUPPORT,
        ScaffoldingLevel::ModerateGuidance => &MODERATE_GUIDANCE,
        ScaffoldingLevel::IndependentApplication => &INDEPENDENT_APPLICATION,
    }
}

static REMEMBER: BloomsGuidance = BloomsGuidance {
    description: "Recall facts and basic concepts",
    verbs: &["define", "list", "name", "recall", "identify", "match", "select"],
    activities: &[
        "Create flashcards for key terms",
        "Develop matching exercises",
        "Write definitions in own words",
        "Complete fill-in-the-blank exercises",
        "List key concepts and facts",
    ],
    assessment: &[
        "Multiple choice questions",
        "True/false statements",
        "Matching exercises",
        "Short answer recall questions",
    ],
};

static UNDERSTAND: BloomsGuidance = BloomsGuidance {
    description: "Explain ideas or concepts",
    verbs: &["explain", "summarize", "interpret", "describe", "compare", "contrast", "classify"],
    activities: &[
        "Write summaries of key concepts",
        "Create concept maps",
        "Explain processes in own words",
        "Compare and contrast ideas",
        "Paraphrase main points",
    ],
    assessment: &[
        "Short answer explanations",
        "Concept mapping",
        "Summarization tasks",
        "Compare/contrast exercises",
    ],
};

static APPLY: BloomsGuidance = BloomsGuidance {
    description: "Use information in new situations",
    verbs: &["solve", "use", "demonstrate", "calculate", "complete", "illustrate", "show"],
    activities: &[
        "Solve real-world problems",
        "Apply concepts to new scenarios",
        "Create examples",
        "Demonstrate processes",
        "Complete practice exercises",
    ],
    assessment: &[
        "Problem-solving tasks",
        "Case studies",
        "Application exercises",
        "Demonstration of skills",
    ],
};

static ANALYZE: BloomsGuidance = BloomsGuidance {
    description: "Draw connections among ideas",
    verbs: &["analyze", "organize", "compare", "examine", "investigate", "categorize", "differentiate"],
    activities: &[
        "Analyze case studies",
        "Investigate relationships",
        "Compare different approaches",
        "Examine cause and effect",
        "Break down complex problems",
    ],
    assessment: &[
        "Analysis of case studies",
        "Critical thinking questions",
        "Problem decomposition",
        "Relationship mapping",
    ],
};

static EVALUATE: BloomsGuidance = BloomsGuidance {
    description: "Justify a stand or decision",
    verbs: &["evaluate", "assess", "judge", "critique", "recommend", "argue", "defend"],
    activities: &[
        "Evaluate different solutions",
        "Assess effectiveness of approaches",
        "Make recommendations",
        "Defend positions",
        "Critique arguments",
    ],
    assessment: &[
        "Evaluation of solutions",
        "Critical reviews",
        "Recommendation reports",
        "Defense of positions",
    ],
};

static CREATE: BloomsGuidance = BloomsGuidance {
    description: "Produce new or original work",
    verbs: &["create", "design", "develop", "construct", "produce", "compose", "formulate"],
    activities: &[
        "Design new solutions",
        "Create original work",
        "Develop new approaches",
        "Construct models",
        "Compose original content",
    ],
    assessment: &[
        "Original project creation",
        "Design of new solutions",
        "Development of new approaches",
        "Creative presentations",
    ],
};

pub fn blooms_guidance(level: BloomsLevel) -> &'static BloomsGuidance {
    match level {
        BloomsLevel::Remember => &REMEMBER,
        BloomsLevel::Understand => &UNDERSTAND,
        BloomsLevel::Apply => &APPLY,
        BloomsLevel::Analyze => &ANALYZE,
        BloomsLevel::Evaluate => &EVALUATE,
        BloomsLevel::Create => &CREATE,
    }
}

static LESSON_PLAN_CONTEXT: LocalContextProfile = LocalContextProfile {
    examples: &[
        "Use local South African businesses as case studies",
        "Reference current economic policies and their impact",
        "Include examples from different provinces",
        "Discuss local market structures and competition",
        "Reference South African labor laws and regulations",
    ],
    resources: Some(&[
        "South African Reserve Bank publications",
        "Statistics South Africa data",
        "Local business news articles",
        "South African curriculum documents",
        "Provincial economic reports",
    ]),
    terminology: Some(&[
        "Use appropriate South African business terms",
        "Include local economic indicators",
        "Reference South African currency and financial terms",
        "Use relevant local market terminology",
    ]),
    activities: None,
    considerations: None,
};

static QUIZ_CONTEXT: LocalContextProfile = LocalContextProfile {
    examples: &[
        "Include questions about local economic policies",
        "Reference South African business case studies",
        "Use local market examples",
        "Include questions about provincial economies",
        "Reference South African labor market",
    ],
    resources: None,
    terminology: None,
    activities: None,
    considerations: Some(&[
        "Use South African currency in calculations",
        "Reference local business structures",
        "Include questions about BEE policies",
        "Use local economic indicators",
    ]),
};

static WORKSHEET_CONTEXT: LocalContextProfile = LocalContextProfile {
    examples: &[
        "Use local business scenarios",
        "Include South African market data",
        "Reference local economic policies",
        "Use provincial economic examples",
        "Include local business structures",
    ],
    resources: None,
    terminology: None,
    activities: Some(&[
        "Analyze local business case studies",
        "Research South African economic data",
        "Compare provincial economies",
        "Study local market structures",
    ]),
    considerations: None,
};

static PROJECT_CONTEXT: LocalContextProfile = LocalContextProfile {
    examples: &[
        "Research local business opportunities",
        "Analyze South African market trends",
        "Study provincial economic development",
        "Investigate local business structures",
        "Examine South African economic policies",
    ],
    resources: None,
    terminology: None,
    activities: None,
    considerations: Some(&[
        "Consider local market conditions",
        "Reference South African business regulations",
        "Include BEE requirements",
        "Use local economic data",
    ]),
};

static ASSESSMENT_CONTEXT: LocalContextProfile = LocalContextProfile {
    examples: &[
        "Use South African business case studies",
        "Reference local economic policies",
        "Include provincial economic data",
        "Use local market examples",
        "Reference South African labor laws",
    ],
    resources: None,
    terminology: None,
    activities: None,
    considerations: Some(&[
        "Use South African currency",
        "Reference local business structures",
        "Include BEE considerations",
        "Use local economic indicators",
    ]),
};

pub fn local_context(learning_object_type: LearningObjectType) -> &'static LocalContextProfile {
    match learning_object_type {
        LearningObjectType::LessonPlan => &LESSON_PLAN_CONTEXT,
        LearningObjectType::Quiz => &QUIZ_CONTEXT,
        LearningObjectType::Worksheet => &WORKSHEET_CONTEXT,
        LearningObjectType::Project => &PROJECT_CONTEXT,
        LearningObjectType::Assessment => &ASSESSMENT_CONTEXT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_grade_has_four_objectives() {
        for grade in [7, 8, 9] {
            assert_eq!(grade_objectives(grade).len(), 4);
        }
        assert!(grade_objectives(12).is_empty());
    }

    #[test]
    fn test_scaffolding_levels_have_eight_strategies() {
        for level in ScaffoldingLevel::ALL {
            let guidance = scaffolding_guidance(level);
            assert!(!guidance.description.is_empty());
            assert_eq!(guidance.strategies.len(), 8);
        }
    }

    #[test]
    fn test_blooms_guidance_lists_are_populated() {
        for level in BloomsLevel::ALL {
            let guidance = blooms_guidance(level);
            assert_eq!(guidance.verbs.len(), 7);
            assert_eq!(guidance.activities.len(), 5);
            assert_eq!(guidance.assessment.len(), 4);
        }
    }

    #[test]
    fn test_lesson_plan_sections() {
        let headings: Vec<&str> = local_context(LearningObjectType::LessonPlan)
            .optional_sections()
            .map(|(heading, _)| heading)
            .collect();
        assert_eq!(headings, vec!["Recommended Resources", "Local Terminology"]);
    }

    #[test]
    fn test_worksheet_has_only_activities() {
        let headings: Vec<&str> = local_context(LearningObjectType::Worksheet)
            .optional_sections()
            .map(|(heading, _)| heading)
            .collect();
        assert_eq!(headings, vec!["Suggested Activities"]);
    }

    #[test]
    fn test_every_type_has_examples() {
        for t in LearningObjectType::ALL {
            let profile = local_context(t);
            assert_eq!(profile.examples.len(), 5);
            assert!(profile.all_items().count() > profile.examples.len());
        }
    }
}
