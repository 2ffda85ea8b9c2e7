//! Command-line front end for the promotional content pipeline.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use promo_pipeline::config::{self, AppConfig};
use promo_pipeline::{ContentStage, ImageStage, Orchestrator, PromptApproval, RunOutput};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "promo-pipeline")]
#[command(about = "Generate promotional copy and a matching image for a product")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Prompt for product descriptions and approve each result (default)
    Interactive,

    /// Run once for DESCRIPTION without approval
    Generate {
        /// Product description
        description: String,
    },

    /// Show which environment variables are set
    CheckEnv,
}

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::CheckEnv) = cli.command {
        dotenvy::dotenv().ok();
        print!("{}", config::report(|key| std::env::var(key).ok()));
        return Ok(());
    }

    let config = AppConfig::from_env()?;
    init_tracing(&config.log_level)?;
    config.log_redacted();

    match cli.command {
        Some(Commands::Generate { description }) => generate(&config, &description).await,
        _ => interactive(&config).await,
    }
}

fn init_tracing(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn orchestrator(config: &AppConfig) -> Result<Orchestrator> {
    Ok(Orchestrator::new(config.exec_ctx()?)
        .with_content_stage(ContentStage::new().with_model(&config.content_model))
        .with_image_stage(ImageStage::new().with_model(&config.artist_model))
        .with_output_root(&config.output_dir))
}

async fn generate(config: &AppConfig, description: &str) -> Result<()> {
    let output = orchestrator(config)?
        .run(description)
        .await
        .context("generation failed")?;
    print_output(&output);
    Ok(())
}

async fn interactive(config: &AppConfig) -> Result<()> {
    let prompt = Arc::new(PromptApproval::stdio());
    let orchestrator = orchestrator(config)?.with_approval(prompt.clone());

    println!("Promotional content generator. Type 'quit' or 'exit' to leave.");
    loop {
        let Some(line) = prompt.ask("\nProduct description: ").await? else {
            break;
        };
        match line.to_lowercase().as_str() {
            "quit" | "exit" => break,
            "" => continue,
            _ => {}
        }

        match orchestrator.run(&line).await {
            Ok(output) => print_output(&output),
            Err(e) => eprintln!("Error: {}", e),
        }
    }
    println!("Goodbye.");
    Ok(())
}

fn print_output(output: &RunOutput) {
    println!("\nTitle: {}", output.content.title());
    println!("Message: {}", output.content.message());
    println!("Tags: {}", output.content.tags().join(", "));
    println!(
        "Image: {}",
        promo_pipeline::output::image_path(&output.output_location, &output.image).display()
    );
}
