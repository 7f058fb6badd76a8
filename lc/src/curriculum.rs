//! CAPS curriculum catalog
//!
//! Term 1 topics for each supported grade.

use serde::Serialize;
use tracing::debug;

const GRADES: &[u8] = &[7, 8, 9];

const GRADE_7_TOPICS: &[&str] = &["The Economy", "Needs and Wants", "Circular Flow", "Markets"];

const GRADE_8_TOPICS: &[&str] = &["Production", "Forms of Ownership", "Labour", "Markets"];

const GRADE_9_TOPICS: &[&str] = &[
    "Economic Systems",
    "Business Planning",
    "Financial Literacy",
    "Entrepreneurship",
];

/// A topic paired with the grade it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GradeTopic {
    pub grade: u8,
    pub name: &'static str,
}

/// Grades the curriculum covers, ascending
pub fn available_grades() -> &'static [u8] {
    GRADES
}

/// Topics taught in `grade`, or `None` when the grade is not covered
pub fn topics_for_grade(grade: u8) -> Option<&'static [&'static str]> {
    debug!(%grade, "topics_for_grade: called");
    match grade {
        7 => Some(GRADE_7_TOPICS),
        8 => Some(GRADE_8_TOPICS),
        9 => Some(GRADE_9_TOPICS),
        _ => {
            debug!(%grade, "topics_for_grade: grade not covered");
            None
        }
    }
}

/// Exact-match topic lookup
pub fn find_topic(grade: u8, name: &str) -> Option<&'static str> {
    debug!(%grade, %name, "find_topic: called");
    topics_for_grade(grade)?.iter().copied().find(|topic| *topic == name)
}

/// Case-insensitive topic lookup returning the canonical spelling
pub fn topic_by_name(grade: u8, name: &str) -> Option<&'static str> {
    debug!(%grade, %name, "topic_by_name: called");
    let wanted = name.trim().to_lowercase();
    topics_for_grade(grade)?
        .iter()
        .copied()
        .find(|topic| topic.to_lowercase() == wanted)
}

/// Every topic of every grade, grade-ascending
pub fn all_topics() -> Vec<GradeTopic> {
    GRADES
        .iter()
        .flat_map(|&grade| {
            topics_for_grade(grade)
                .unwrap_or_default()
                .iter()
                .map(move |&name| GradeTopic { grade, name })
        })
        .collect()
}
