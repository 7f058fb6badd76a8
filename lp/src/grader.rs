//! Model-backed rubric grading
//!
//! Asks the language model to score text against the four rubric criteria.
//! Whenever that is not possible the keyword scorer from `lessoncore` is used
//! instead and the result is marked `is_fallback`.

use std::sync::Arc;

use eyre::{Context, Result, eyre};
use lessoncore::{CriteriaScores, Criterion, CriterionScore, ScoreResult, score_fallback};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::llm::{CompletionRequest, LlmClient};
use crate::prompts::PromptLoader;

/// Token cap for a grading reply
const GRADE_MAX_TOKENS: u32 = 800;

/// Sampling temperature for grading requests
const GRADE_TEMPERATURE: f32 = 0.2;

/// Scores text, preferring the model and falling back to keywords
pub struct Grader {
    llm: Option<Arc<dyn LlmClient>>,
    prompts: Arc<PromptLoader>,
}

impl Grader {
    pub fn new(llm: Option<Arc<dyn LlmClient>>, prompts: Arc<PromptLoader>) -> Self {
        debug!(has_llm = llm.is_some(), "Grader::new: called");
        Self { llm, prompts }
    }

    /// Grade `text`; never fails
    pub async fn grade(&self, text: &str) -> ScoreResult {
        debug!(text_len = text.len(), "Grader::grade: called");
        let Some(llm) = &self.llm else {
            debug!("Grader::grade: no LLM client, using fallback");
            return score_fallback(text);
        };

        match self.grade_with_model(llm.as_ref(), text).await {
            Ok(result) => {
                info!(total = result.total_score, "Grader::grade: model score");
                result
            }
            Err(e) => {
                warn!(error = %e, "Grader::grade: model grading failed, using fallback");
                score_fallback(text)
            }
        }
    }

    async fn grade_with_model(&self, llm: &dyn LlmClient, text: &str) -> Result<ScoreResult> {
        debug!("Grader::grade_with_model: called");
        let mut request = CompletionRequest::single(
            self.prompts.system_prompt()?,
            self.prompts.grade_prompt(text)?,
            GRADE_MAX_TOKENS,
        );
        request.temperature = Some(GRADE_TEMPERATURE);

        let response = llm.complete(request).await.context("Grading request failed")?;
        let content = response.text().ok_or_else(|| eyre!("Empty grading reply"))?;
        parse_reply(content)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraderReply {
    caps_alignment: GradedCriterion,
    blooms_alignment: GradedCriterion,
    scaffolding: GradedCriterion,
    #[serde(alias = "saContext")]
    local_context: GradedCriterion,
    #[serde(default)]
    feedback: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct GradedCriterion {
    score: u8,
    #[serde(default)]
    feedback: String,
}

impl GradedCriterion {
    fn into_score(self, criterion: Criterion) -> CriterionScore {
        CriterionScore {
            score: self.score,
            max_score: criterion.max_score(),
            feedback: self.feedback,
        }
    }
}

/// Parse the model's JSON reply, tolerating prose or code fences around it
fn parse_reply(content: &str) -> Result<ScoreResult> {
    debug!(content_len = content.len(), "parse_reply: called");
    let start = content.find('{').ok_or_else(|| eyre!("No JSON object in grading reply"))?;
    let end = content.rfind('}').ok_or_else(|| eyre!("No JSON object in grading reply"))?;
    if end < start {
        return Err(eyre!("Malformed JSON object in grading reply"));
    }

    let reply: GraderReply =
        serde_json::from_str(&content[start..=end]).context("Failed to parse grading reply")?;

    let criteria = CriteriaScores {
        caps_alignment: reply.caps_alignment.into_score(Criterion::CapsAlignment),
        blooms_alignment: reply.blooms_alignment.into_score(Criterion::BloomsAlignment),
        scaffolding: reply.scaffolding.into_score(Criterion::Scaffolding),
        local_context: reply.local_context.into_score(Criterion::LocalContext),
    };
    Ok(ScoreResult::from_criteria(criteria, reply.feedback, false))
}
