//! lessonprompt - EMS lesson prompt generator
//!
//! CLI entry point for composing, generating and scoring prompts and for
//! running the HTTP API.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result, eyre};
use tracing::{debug, info, warn};

use lessoncore::{ParameterRequest, ParameterSet, compose, score_fallback};
use lessonprompt::cli::{Cli, Command, PromptArgs, get_log_path, render_catalog, render_score, render_validation_errors};
use lessonprompt::config::{Config, environment};
use lessonprompt::generate::generate;
use lessonprompt::llm::{self, LlmClient, LlmError, create_client};
use lessonprompt::prompts::PromptLoader;
use lessonprompt::server::{self, AppState, Catalog, ScoreResponse};
use lessonprompt::Grader;

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Note: Can't log params here since logging isn't initialized yet
    let log_path = get_log_path();
    let log_dir = log_path.parent().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Determine log level with priority: CLI --log-level > config file > default (INFO)
    let level_str = cli_log_level.or(config_log_level);
    let level = match level_str.map(|s| s.to_uppercase()) {
        Some(s) => match s.as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());

    // Setup logging with priority: CLI > config > INFO default
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    info!("lessonprompt loaded config: model={}", config.llm.model);

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Command::Compose { params, score } => {
            debug!(score, "main: matched Compose command");
            cmd_compose(&params, score)
        }
        Command::Generate { params, score } => {
            debug!(score, "main: matched Generate command");
            cmd_generate(&config, &params, score).await
        }
        Command::Score {
            text,
            file,
            offline,
            json,
        } => {
            debug!(?file, offline, json, "main: matched Score command");
            cmd_score(&config, text, file, offline, json).await
        }
        Command::Catalog { json } => {
            debug!(json, "main: matched Catalog command");
            cmd_catalog(json)
        }
        Command::Serve { bind } => {
            debug!(?bind, "main: matched Serve command");
            cmd_serve(config, bind).await
        }
        Command::Check { call } => {
            debug!(call, "main: matched Check command");
            cmd_check(&config, call).await
        }
    }
}

/// Validate command-line parameters, printing every problem at once
fn validated(params: &PromptArgs) -> Result<ParameterSet> {
    debug!(?params, "validated: called");
    ParameterRequest::from(params).validate().map_err(|errors| {
        eprintln!("{}", render_validation_errors(&errors));
        eyre!("{}", errors)
    })
}

/// Compose a prompt from the templates
fn cmd_compose(params: &PromptArgs, score: bool) -> Result<()> {
    debug!(score, "cmd_compose: called");
    let params = validated(params)?;
    let prompt = compose(&params);
    println!("{}", prompt);

    if score {
        println!("\n{}", render_score(&score_fallback(&prompt)));
    }
    Ok(())
}

/// Generate material with the language model
async fn cmd_generate(config: &Config, params: &PromptArgs, score: bool) -> Result<()> {
    debug!(score, "cmd_generate: called");
    let params = validated(params)?;
    config.validate()?;
    let llm = create_client(&config.llm)?;
    let prompts = Arc::new(PromptLoader::new(config.server.prompts_dir.as_deref()));

    eprintln!(
        "{}",
        format!("Generating {} for Grade {}: {}...", params.learning_object_type, params.grade, params.topic).dimmed()
    );
    let text = generate(llm.as_ref(), &prompts, &params, &config.llm)
        .await
        .context("Failed to generate content")?;
    println!("{}", text);

    if score {
        let result = Grader::new(Some(llm), prompts).grade(&text).await;
        println!("\n{}", render_score(&result));
    }
    Ok(())
}

/// Score text from an argument, a file or stdin
async fn cmd_score(config: &Config, text: Option<String>, file: Option<PathBuf>, offline: bool, json: bool) -> Result<()> {
    debug!(offline, json, "cmd_score: called");
    let text = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => {
            fs::read_to_string(&path).context(format!("Failed to read {}", path.display()))?
        }
        (None, None) => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).context("Failed to read stdin")?;
            buf
        }
    };

    let llm: Option<Arc<dyn LlmClient>> = if offline {
        None
    } else {
        match create_client(&config.llm) {
            Ok(client) => Some(client),
            Err(e) => {
                warn!(error = %e, "cmd_score: no LLM client, using keyword scorer");
                None
            }
        }
    };

    let prompts = Arc::new(PromptLoader::new(config.server.prompts_dir.as_deref()));
    let result = Grader::new(llm, prompts).grade(&text).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&ScoreResponse::from(result))?);
    } else {
        print!("{}", render_score(&result));
    }
    Ok(())
}

/// List grades, topics and levels
fn cmd_catalog(json: bool) -> Result<()> {
    debug!(json, "cmd_catalog: called");
    if json {
        println!("{}", serde_json::to_string_pretty(&Catalog::build())?);
    } else {
        print!("{}", render_catalog());
    }
    Ok(())
}

/// Run the HTTP API until interrupted
async fn cmd_serve(mut config: Config, bind: Option<String>) -> Result<()> {
    debug!(?bind, "cmd_serve: called");
    if let Some(bind) = bind {
        config.server.bind = bind;
    }
    println!("Serving lessonprompt API on http://{}", config.server.bind);
    let state = AppState::from_config(config)?;
    server::serve(state).await
}

/// Report key configuration and optionally call the model
async fn cmd_check(config: &Config, call: bool) -> Result<()> {
    debug!(call, "cmd_check: called");
    let key_status = config.validate();

    match &key_status {
        Ok(()) => {
            let info = config.llm.api_key_info();
            println!(
                "{} {} is set ({}, {} chars)",
                "✓".green(),
                config.llm.api_key_env,
                info.api_key_prefix.as_deref().unwrap_or_default(),
                info.key_length
            );
        }
        Err(_) => println!("{} {} is not set", "✗".red(), config.llm.api_key_env),
    }
    println!("  provider:    {}", config.llm.provider);
    println!("  model:       {}", config.llm.model);
    println!("  base url:    {}", config.llm.base_url);
    println!("  environment: {}", environment());

    if !call {
        return Ok(());
    }

    key_status?;
    let llm = create_client(&config.llm)?;
    match llm::ping(llm.as_ref()).await {
        Ok(message) => {
            println!("{} Model replied: {}", "✓".green(), message);
            Ok(())
        }
        Err(e) => {
            println!("{} Model call failed", "✗".red());
            Err(describe(e))
        }
    }
}

fn describe(err: LlmError) -> eyre::Report {
    match err {
        LlmError::ApiError { status: 401, .. } => eyre!("The API key was rejected (401 Unauthorized)"),
        other => eyre!(other).wrap_err("Failed to connect to the LLM API"),
    }
}
