//! CLI command definitions and terminal rendering

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use lessoncore::{
    BloomsLevel, LearningObjectType, ParameterRequest, ScaffoldingLevel, ScoreColor, ScoreResult, ValidationErrors,
    available_grades, topics_for_grade,
};
use std::path::PathBuf;
use tracing::debug;

/// lessonprompt - EMS lesson prompt generator
#[derive(Parser)]
#[command(
    name = "lp",
    about = "Compose, generate and score EMS lesson prompts",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compose a prompt from the built-in templates
    Compose {
        #[command(flatten)]
        params: PromptArgs,

        /// Also score the composed prompt with the keyword scorer
        #[arg(long)]
        score: bool,
    },

    /// Generate learning material with the language model
    Generate {
        #[command(flatten)]
        params: PromptArgs,

        /// Also score the generated text
        #[arg(long)]
        score: bool,
    },

    /// Score text against the quality rubric
    Score {
        /// Text to score (reads stdin when neither TEXT nor --file is given)
        text: Option<String>,

        /// Read the text from a file
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Use the keyword scorer only, never the language model
        #[arg(long)]
        offline: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List grades, topics and the selectable levels
    Catalog {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the HTTP API server
    Serve {
        /// Address to listen on (overrides server.bind)
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Check API key configuration and optionally call the model
    Check {
        /// Send a short test request to the model
        #[arg(long)]
        call: bool,
    },
}

/// Prompt parameters as typed on the command line
#[derive(Debug, Clone, Default, Args)]
pub struct PromptArgs {
    /// Grade (7, 8 or 9)
    #[arg(short, long)]
    pub grade: Option<u8>,

    /// Topic from the grade's curriculum
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Learning object type, e.g. "Lesson Plan" or lesson-plan
    #[arg(long = "type", value_name = "TYPE")]
    pub learning_object_type: Option<String>,

    /// Scaffolding level, e.g. "High Support"
    #[arg(short, long)]
    pub scaffolding: Option<String>,

    /// Bloom's taxonomy level, e.g. Remember
    #[arg(short, long)]
    pub blooms: Option<String>,

    /// Include South African context and examples
    #[arg(long)]
    pub local_context: bool,
}

impl From<&PromptArgs> for ParameterRequest {
    fn from(args: &PromptArgs) -> Self {
        Self {
            grade: args.grade,
            topic: args.topic.clone(),
            learning_object_type: args.learning_object_type.clone(),
            scaffolding_level: args.scaffolding.clone(),
            blooms_level: args.blooms.clone(),
            include_local_context: args.local_context,
        }
    }
}

/// Get the log file path
pub fn get_log_path() -> PathBuf {
    debug!("get_log_path: called");
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lessonprompt")
        .join("logs")
        .join("lessonprompt.log")
}

/// One line per invalid field, named by its command-line flag
pub fn render_validation_errors(errors: &ValidationErrors) -> String {
    debug!(count = errors.len(), "render_validation_errors: called");
    errors
        .fields()
        .iter()
        .map(|(field, message)| format!("  {} {}: {}", "✗".red(), flag_for(field), message))
        .collect::<Vec<_>>()
        .join("\n")
}

fn flag_for(field: &str) -> &str {
    match field {
        "grade" => "--grade",
        "topic" => "--topic",
        "learningObjectType" => "--type",
        "scaffoldingLevel" => "--scaffolding",
        "bloomsLevel" => "--blooms",
        other => other,
    }
}

/// Score report with the total colored by band
pub fn render_score(result: &ScoreResult) -> String {
    debug!(total = result.total_score, "render_score: called");
    let summary = result.summary();
    let headline = match result.color() {
        ScoreColor::Green => summary.green().bold(),
        ScoreColor::Yellow => summary.yellow().bold(),
        ScoreColor::Red => summary.red().bold(),
    };

    let mut out = format!("Score: {}", headline);
    if result.is_fallback {
        out.push_str(&format!(" {}", "(keyword fallback)".dimmed()));
    }
    out.push('\n');

    let criteria = [
        ("CAPS alignment", &result.criteria_scores.caps_alignment),
        ("Bloom's alignment", &result.criteria_scores.blooms_alignment),
        ("Scaffolding", &result.criteria_scores.scaffolding),
        ("Local context", &result.criteria_scores.local_context),
    ];
    for (name, entry) in criteria {
        out.push_str(&format!(
            "  {:<18} {}/{}  {}\n",
            name, entry.score, entry.max_score, entry.feedback
        ));
    }

    if !result.meets_minimum() {
        out.push_str(&format!("{}\n", "Does not meet the minimum CAPS alignment".red()));
    }

    if !result.suggestions.is_empty() {
        out.push_str("\nSuggestions:\n");
        for suggestion in &result.suggestions {
            out.push_str(&format!("  - {}\n", suggestion));
        }
    }

    if !result.feedback.is_empty() {
        out.push('\n');
        for note in &result.feedback {
            out.push_str(&format!("{}\n", note.dimmed()));
        }
    }
    out
}

/// Human-readable catalog listing
pub fn render_catalog() -> String {
    debug!("render_catalog: called");
    let mut out = String::new();
    for &grade in available_grades() {
        out.push_str(&format!("{}\n", format!("Grade {}", grade).bold()));
        for topic in topics_for_grade(grade).unwrap_or_default() {
            out.push_str(&format!("  - {}\n", topic));
        }
    }

    let sections: [(&str, Vec<&str>); 3] = [
        (
            "Learning object types",
            LearningObjectType::ALL.iter().map(|t| t.label()).collect(),
        ),
        (
            "Scaffolding levels",
            ScaffoldingLevel::ALL.iter().map(|s| s.label()).collect(),
        ),
        ("Bloom's levels", BloomsLevel::ALL.iter().map(|b| b.label()).collect()),
    ];
    for (title, labels) in sections {
        out.push_str(&format!("\n{}\n  {}\n", title.bold(), labels.join(", ")));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_compose_args() {
        let cli = Cli::try_parse_from([
            "lp",
            "compose",
            "--grade",
            "7",
            "--topic",
            "The Economy",
            "--type",
            "quiz",
            "--scaffolding",
            "high-support",
            "--blooms",
            "remember",
            "--local-context",
        ])
        .unwrap();

        match cli.command {
            Command::Compose { params, score } => {
                assert!(!score);
                let request = ParameterRequest::from(&params);
                let set = request.validate().unwrap();
                assert_eq!(set.learning_object_type, LearningObjectType::Quiz);
                assert_eq!(set.scaffolding_level, ScaffoldingLevel::HighSupport);
                assert!(set.include_local_context);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["lp", "catalog", "--log-level", "debug", "-c", "/tmp/lp.yml"]).unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/lp.yml")));
    }

    #[test]
    fn test_score_text_and_file_conflict() {
        assert!(Cli::try_parse_from(["lp", "score", "some text", "--file", "x.txt"]).is_err());
    }

    #[test]
    fn test_render_validation_errors_uses_flags() {
        let errors = ParameterRequest::default().validate().unwrap_err();
        let rendered = render_validation_errors(&errors);
        assert!(rendered.contains("--grade: Please select a grade"));
        assert!(rendered.contains("--type: Please select a learning object type"));
        assert!(rendered.contains("--blooms: Please select a Bloom's taxonomy level"));
        assert_eq!(rendered.lines().count(), 5);
    }

    #[test]
    fn test_render_score() {
        let result = lessoncore::score_fallback("");
        let rendered = render_score(&result);
        assert!(rendered.contains("0/5 points"));
        assert!(rendered.contains("Does not meet the minimum CAPS alignment"));
        assert!(rendered.contains("Include more South African examples and context"));
    }

    #[test]
    fn test_render_catalog() {
        let rendered = render_catalog();
        assert!(rendered.contains("Financial Literacy"));
        assert!(rendered.contains("Lesson Plan, Quiz, Worksheet, Project, Assessment"));
    }
}
