//! CLI entrypoint for Content Council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use council_application::{
    ConversationLogger, CouncilConfig, GenerationGateway, NoConversationLogger, NoProgress,
    ProgressChannel, ProgressNotifier, RunRefinementUseCase, RunRoundUseCase,
};
use council_domain::{ConfigIssue, OutputFormat, Topic};
use council_infrastructure::{
    ConfigLoader, FileConfig, JsonlConversationLogger, OpenAiCompatibleConfig,
    OpenAiCompatibleGateway,
};
use council_presentation::{Cli, ConsoleFormatter, OutputFormatter, ProgressReporter, drain};
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

const PROGRESS_CAPACITY: usize = 64;

type Generation = GenerationGateway<OpenAiCompatibleGateway>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_tracing(cli.verbose, cli.log_file.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    info!("Starting Content Council");

    let file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    if !file_config.output.color {
        colored::control::set_override(false);
    }

    let council = resolve_council_config(&cli, &file_config)?;

    let Some(topic) = cli.topic.clone() else {
        bail!("A topic is required, e.g. content-council \"Announce our 2.0 release\"");
    };
    let topic = Topic::new(topic)?;

    // === Dependency Injection ===
    let provider =
        OpenAiCompatibleConfig::from_file(&file_config.provider, council.behavior.timeout)?;
    let gateway = Arc::new(OpenAiCompatibleGateway::new(provider)?);

    let logger: Arc<dyn ConversationLogger> = match &cli.transcript {
        Some(path) => Arc::new(
            JsonlConversationLogger::create(path)
                .with_context(|| format!("Cannot open transcript {}", path.display()))?,
        ),
        None => Arc::new(NoConversationLogger),
    };

    let generation = Arc::new(
        GenerationGateway::new(gateway, council.tiers.clone())
            .with_behavior(council.behavior)
            .with_logger(Arc::clone(&logger)),
    );

    let cancellation = CancellationToken::new();
    {
        let token = cancellation.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling");
                token.cancel();
            }
        });
    }

    let format = file_config
        .output
        .resolve_format(cli.output.map(OutputFormat::from));

    if !cli.quiet && format != OutputFormat::Json {
        print_header(&topic, &council, cli.once);
    }

    let (progress, renderer): (Box<dyn ProgressNotifier>, _) = if cli.quiet {
        (Box::new(NoProgress), None)
    } else {
        let (channel, rx) = ProgressChannel::new(PROGRESS_CAPACITY);
        let renderer = tokio::spawn(drain(ProgressReporter::new(), rx));
        (Box::new(channel), Some(renderer))
    };

    let output = if cli.once {
        let context = cli
            .context
            .clone()
            .unwrap_or_else(|| topic.content().to_string());
        let use_case = RunRoundUseCase::new(generation)
            .with_policy(council.round_policy)
            .with_logger(logger)
            .with_cancellation(cancellation);

        let result = use_case.debate(&topic, &context, progress.as_ref()).await;
        finish_progress(progress, renderer).await;
        ConsoleFormatter.render(format, topic.content(), &result?)
    } else {
        if cli.context.is_some() {
            warn!("--context only applies with --once; refinement drafts from the topic");
        }
        let use_case = refinement(generation, &council, logger, cancellation);

        let result = use_case
            .run(&topic, council.loop_config, progress.as_ref())
            .await;
        finish_progress(progress, renderer).await;
        ConsoleFormatter.render(format, topic.content(), &result?)
    };

    println!("{}", output);

    Ok(())
}

/// Initialize logging based on verbosity level, optionally teeing into a
/// log file. The returned guard must live until exit so the file writer
/// flushes.
fn init_tracing(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Cannot open log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Merge CLI overrides into the file configuration and validate the result.
///
/// Warnings are logged; any error aborts before a single call is made.
fn resolve_council_config(cli: &Cli, file_config: &FileConfig) -> Result<CouncilConfig> {
    let (mut council, mut issues) = file_config.to_council_config();

    if let Some(threshold) = cli.threshold {
        council.loop_config.threshold = threshold;
    }
    if let Some(max_iterations) = cli.max_iterations {
        council.loop_config.max_iterations = max_iterations;
    }
    issues.extend(council.validate());

    report_issues(&issues)?;
    Ok(council)
}

fn report_issues(issues: &[ConfigIssue]) -> Result<()> {
    let mut errors = Vec::new();
    for issue in issues {
        if issue.is_error() {
            errors.push(issue.message.as_str());
        } else {
            warn!("config: {}", issue.message);
        }
    }
    if !errors.is_empty() {
        bail!("Invalid configuration:\n  {}", errors.join("\n  "));
    }
    Ok(())
}

fn refinement(
    generation: Arc<Generation>,
    council: &CouncilConfig,
    logger: Arc<dyn ConversationLogger>,
    cancellation: CancellationToken,
) -> RunRefinementUseCase<OpenAiCompatibleGateway> {
    RunRefinementUseCase::new(generation)
        .with_policy(council.round_policy)
        .with_logger(logger)
        .with_cancellation(cancellation)
}

/// Close the progress channel and wait for the renderer to flush.
async fn finish_progress(
    progress: Box<dyn ProgressNotifier>,
    renderer: Option<tokio::task::JoinHandle<()>>,
) {
    drop(progress);
    if let Some(renderer) = renderer {
        let _ = renderer.await;
    }
}

fn print_header(topic: &Topic, council: &CouncilConfig, once: bool) {
    println!();
    println!("+============================================================+");
    println!("|                Content Council                              |");
    println!("+============================================================+");
    println!();
    println!("Topic: {}", topic);
    println!(
        "Models: {} (fallback {})",
        council.tiers.primary, council.tiers.fallback
    );
    if once {
        println!("Mode: single debate round");
    } else {
        println!(
            "Mode: refine until {} or {} iteration(s)",
            council.loop_config.threshold, council.loop_config.max_iterations
        );
    }
    println!();
}
