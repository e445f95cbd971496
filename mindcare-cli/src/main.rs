//! CLI entry point for MindCare

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use dialoguer::Input;
use mindcare_chat::{ChatController, SendOutcome};
use mindcare_core::config::ConfigLoader;
use mindcare_core::logging::init_logging;
use mindcare_responder::{DelayPolicy, ScriptedResponder};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "mindcare")]
#[command(about = "Supportive chat assistant for student mental health")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration directory
    #[arg(short, long, global = true)]
    config_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session
    Chat {
        /// Seed the reply randomness for reproducible runs
        #[arg(short, long)]
        seed: Option<u64>,
        /// Skip the simulated reply delay
        #[arg(long)]
        no_delay: bool,
    },
    /// Classify a single message and print the reply as JSON
    Classify {
        /// Message to classify
        message: String,
        /// Seed the reply randomness
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Show configuration status
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_loader = if let Some(dir) = cli.config_dir {
        ConfigLoader::with_dir(dir)
    } else {
        ConfigLoader::new()
    };
    let config = config_loader.load()?;
    let _guard = init_logging(&config.logging);

    match cli.command {
        Commands::Chat { seed, no_delay } => {
            info!("Starting chat session");
            run_chat(&config, seed, no_delay).await?;
        }
        Commands::Classify { message, seed } => {
            run_classify(&message, seed)?;
        }
        Commands::Status => {
            run_status(&config_loader)?;
        }
    }

    Ok(())
}

fn build_responder(
    config: &mindcare_core::config::AssistantConfig,
    seed: Option<u64>,
    no_delay: bool,
) -> ScriptedResponder {
    let delay = if no_delay {
        DelayPolicy::zero()
    } else {
        DelayPolicy::new(config.base_delay_ms, config.jitter_ms)
    };

    match seed {
        Some(seed) => ScriptedResponder::with_seed(delay, seed),
        None => ScriptedResponder::new(delay),
    }
}

async fn run_chat(
    config: &mindcare_core::config::Config,
    seed: Option<u64>,
    no_delay: bool,
) -> Result<()> {
    let responder = Arc::new(build_responder(&config.assistant, seed, no_delay));
    let mut controller = ChatController::from_config(responder, &config.assistant);
    controller.start()?;

    println!("{}", style("MindCare Support Assistant").bold().cyan());
    println!(
        "{}",
        style("Safe, confidential, and supportive. For emergencies, call 988.").dim()
    );
    println!(
        "{}",
        style("Type /dismiss to clear a crisis alert, /quit to leave.\n").dim()
    );

    if let Some(welcome) = controller.transcript().first() {
        println!("{} {}\n", style("assistant>").green().bold(), welcome.content);
    }

    loop {
        let input: String = match Input::<String>::new().with_prompt("you").interact_text() {
            Ok(line) => line,
            Err(_) => break,
        };

        match input.trim() {
            "/quit" => break,
            "/dismiss" => {
                controller.dismiss_crisis_alert();
                println!("{}", style("Crisis alert dismissed.").dim());
                continue;
            }
            _ => {}
        }

        println!("{}", style("assistant is typing...").dim());
        match controller.send(&input).await? {
            SendOutcome::Replied(reply) => {
                println!("{} {}\n", style("assistant>").green().bold(), reply.text);
            }
            SendOutcome::RejectedBlank => {
                println!("{}", style("Share what's on your mind to get started.").dim());
            }
            SendOutcome::Busy => {
                println!("{}", style("Still replying, one moment...").dim());
            }
        }

        if controller.crisis_alert() {
            println!(
                "{}",
                style("High distress detected. If you're in crisis, please seek immediate help: call 988.")
                    .red()
                    .bold()
            );
            println!("{}\n", style("(/dismiss to clear this alert)").dim());
        }
    }

    controller.end();
    println!("{}", style("Take care of yourself.").cyan());
    Ok(())
}

fn run_classify(message: &str, seed: Option<u64>) -> Result<()> {
    let responder = ScriptedResponder::with_seed(DelayPolicy::zero(), seed.unwrap_or(0));
    let classification = responder.classify(message);
    println!("{}", serde_json::to_string_pretty(&classification)?);
    Ok(())
}

fn run_status(loader: &ConfigLoader) -> Result<()> {
    let config = loader.load()?;

    println!("{}", style("MindCare Status").bold().cyan());
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Directory: {}", loader.config_dir().display());
    println!();
    println!("{}", style("Assistant:").bold());
    println!(
        "  Reply delay: {}ms + 0..{}ms jitter",
        config.assistant.base_delay_ms, config.assistant.jitter_ms
    );
    println!("  Hotline: {}", config.assistant.hotline);
    println!(
        "  Welcome: {}",
        config
            .assistant
            .welcome
            .as_deref()
            .unwrap_or("(default)")
    );
    println!();
    println!("{}", style("Logging:").bold());
    println!(
        "  Level: {}, format: {}, dir: {}",
        config.logging.level, config.logging.format, config.logging.dir
    );

    Ok(())
}
