//! CLI entrypoint for courtroom
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use courtroom_application::{
    ConversationLogger, EvaluationScorer, NoConversationLogger, NoProgress, ProgressNotifier,
    TextGenerator, TrialOrchestrator, UnconfiguredGenerator,
};
use courtroom_domain::PromptTemplates;
use courtroom_infrastructure::{
    ConfigLoader, FileConfig, JsonTranscriptStore, JsonlConversationLogger, LocalDocumentSource,
    OpenAiGenerator,
};
use courtroom_presentation::{Cli, ProgressReporter, ReplConfig, TrialRepl};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_tracing(&cli);

    if cli.show_config {
        for line in ConfigLoader::describe_sources(cli.config.as_ref()) {
            println!("{}", line);
        }
        return Ok(());
    }

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };
    if let Some(model) = &cli.model {
        config.model.name = model.clone();
    }
    config.validate().context("Invalid configuration")?;

    info!("Starting courtroom with model {}", config.model.name);

    // === Dependency Injection ===
    let templates = Arc::new(config.prompt_templates());
    let settings = config.trial_settings();
    let (generator, scorer) = build_generator(&config, &templates)?;

    let progress: Arc<dyn ProgressNotifier> = if cli.quiet {
        Arc::new(NoProgress)
    } else {
        Arc::new(ProgressReporter::new())
    };

    let logger: Arc<dyn ConversationLogger> = match config
        .logging
        .conversation_log
        .as_deref()
        .and_then(JsonlConversationLogger::open)
    {
        Some(logger) => {
            info!("Conversation log: {}", logger.path().display());
            Arc::new(logger)
        }
        None => Arc::new(NoConversationLogger),
    };

    let mut orchestrator = TrialOrchestrator::new(
        generator,
        Arc::new(JsonTranscriptStore::new(&config.trial.transcripts_dir)),
        settings,
    )
    .with_templates(templates)
    .with_scorer(scorer)
    .with_logger(logger)
    .with_progress(progress);

    let documents_dir = config
        .retrieval
        .enabled
        .then(|| PathBuf::from(&config.retrieval.documents_dir));
    if let Some(dir) = &documents_dir {
        orchestrator = orchestrator.with_retrieval(Arc::new(LocalDocumentSource::new(
            dir,
            config.retrieval.max_passages,
        )));
    }

    let repl_config = ReplConfig::default().with_documents_dir(documents_dir);
    TrialRepl::new(orchestrator, repl_config).run().await;

    Ok(())
}

/// Console logging by verbosity, plus a daily log file when `--log-dir` is set.
fn init_tracing(cli: &Cli) -> Option<WorkerGuard> {
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    match &cli.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "courtroom.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            None
        }
    }
}

/// The generation backend and rubric scorer, degraded when no API key is set.
fn build_generator(
    config: &FileConfig,
    templates: &Arc<PromptTemplates>,
) -> Result<(Arc<dyn TextGenerator>, EvaluationScorer)> {
    let Some(api_key) = config.model.resolve_api_key() else {
        warn!(
            "No API key found (model.api_key or {}); roles will answer with placeholders",
            config.model.api_key_env
        );
        eprintln!(
            "Warning: no API key configured. Set {} to enable generated statements and scoring.",
            config.model.api_key_env
        );
        return Ok((Arc::new(UnconfiguredGenerator), EvaluationScorer::unconfigured()));
    };

    let generator: Arc<dyn TextGenerator> = Arc::new(
        OpenAiGenerator::new(
            api_key,
            &config.model.base_url,
            &config.model.name,
            config.model.timeout_seconds.map(Duration::from_secs),
        )
        .context("Failed to create generation client")?,
    );

    let scorer = if config.evaluation.enabled {
        EvaluationScorer::new(generator.clone(), config.trial_settings().evaluation)
            .with_templates(templates.clone())
    } else {
        EvaluationScorer::unconfigured()
    };

    Ok((generator, scorer))
}
