//! CLI entrypoint for VoxPilot
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vox_application::ports::provider_client::ProviderClient;
use vox_application::ports::speech::{NoSpeech, SpeechSynthesizer};
use vox_application::{
    AssistantOrchestrator, EventChannel, OrchestratorSettings, ProviderGateway,
};
use vox_domain::ProviderId;
use vox_infrastructure::{BridgeClient, ClaudeCliClient, ConfigLoader, JsonlTranscriptLogger};
use vox_presentation::{AssistantRepl, Cli, ConsoleRenderer, ConsoleSpeech};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting VoxPilot");

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|err| anyhow::anyhow!(err))?
    };

    let preferred: ProviderId = match &cli.provider {
        Some(provider) => provider.parse()?,
        None => config.preferred_provider()?,
    };

    // === Dependency Injection ===
    let clients: Vec<Arc<dyn ProviderClient>> = vec![
        Arc::new(ClaudeCliClient::new(&config.claude.command)),
        Arc::new(BridgeClient::chatgpt(&config.bridges.chatgpt_url)),
        Arc::new(BridgeClient::gemini(&config.bridges.gemini_url)),
    ];
    let gateway = ProviderGateway::new(clients);

    let (events, receiver) = EventChannel::bounded(64);
    let renderer = ConsoleRenderer::spawn(receiver);

    let speech: Arc<dyn SpeechSynthesizer> = if cli.quiet {
        Arc::new(NoSpeech)
    } else {
        Arc::new(ConsoleSpeech::new())
    };

    let settings = OrchestratorSettings::default().with_preferred_provider(preferred);
    let mut orchestrator = AssistantOrchestrator::new(gateway, speech, events, settings);

    if config.transcript.enabled {
        let path = config.transcript.path.clone().or_else(|| {
            dirs::data_dir().map(|dir| dir.join("vox-pilot").join("transcript.jsonl"))
        });
        if let Some(path) = path
            && let Some(logger) = JsonlTranscriptLogger::new(&path)
        {
            info!(path = %path.display(), "transcript enabled");
            orchestrator = orchestrator.with_logger(Arc::new(logger));
        }
    }

    let orchestrator = Arc::new(orchestrator);
    orchestrator.activate();

    if let Some(question) = &cli.question {
        // One-shot mode: answer and exit.
        orchestrator.submit(question);
        orchestrator.wait_idle().await;
    } else {
        let repl = AssistantRepl::new(orchestrator.clone());
        repl.run().await?;
    }

    orchestrator.deactivate();

    // Dropping the orchestrator closes the event channel; the renderer
    // drains what is left and exits.
    drop(orchestrator);
    let _ = renderer.await;

    Ok(())
}
