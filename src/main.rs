mod captions;
mod cli;
mod config;
mod errors;
mod formatter;
mod resolver;
mod server;
mod source;
mod store;
mod transcript;
mod video_id;

#[cfg(test)]
mod testing;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use tokio::net::TcpListener;

use config::{CommonArgs, ServeArgs, Settings};
use source::YoutubeSource;
use store::CaptionStore;
use transcript::TranscriptService;

#[derive(Parser, Debug)]
#[command(name = "subscript", version)]
#[command(about = "Fetch YouTube captions with a language fallback order")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// YouTube URL or video ID; omit to enter IDs interactively
    #[arg(value_name = "URL_OR_ID")]
    input: Option<String>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve captions over HTTP
    Serve {
        #[command(flatten)]
        serve: ServeArgs,

        #[command(flatten)]
        common: CommonArgs,
    },
    /// Print previously saved captions for a video
    Show {
        #[arg(value_name = "URL_OR_ID")]
        input: String,

        #[command(flatten)]
        common: CommonArgs,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(e) => report_failure(&e, &mut std::io::stderr()),
    }
}

fn report_failure<W: std::io::Write>(err: &anyhow::Error, out: &mut W) -> ExitCode {
    let _ = writeln!(out, "Error: {:#}", err);
    ExitCode::FAILURE
}

fn init_logging() {
    let filters = std::env::var("RUST_LOG").unwrap_or_else(|_| "subscript=info".to_string());
    pretty_env_logger::formatted_builder()
        .parse_filters(&filters)
        .init();
}

async fn run(args: Cli) -> Result<ExitCode> {
    match args.command {
        Some(Command::Serve { serve, common }) => {
            let service = Arc::new(TranscriptService::new(YoutubeSource, common.language_preferences()));
            let addr = serve.bind_addr();
            let listener = TcpListener::bind(addr)
                .await
                .with_context(|| format!("failed to bind {}", addr))?;
            server::serve(listener, service, shutdown_signal()).await?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Show { input, common }) => {
            let settings = Settings::from_args(&common)?;
            let store = CaptionStore::new(settings.output_dir);
            let mut stdout = std::io::stdout();
            match cli::show_saved(&store, &input, &mut stdout).await {
                Ok(()) => Ok(ExitCode::SUCCESS),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        None => {
            let settings = Settings::from_args(&args.common)?;
            let service = TranscriptService::new(YoutubeSource, settings.languages);
            let store = CaptionStore::new(settings.output_dir);
            log::debug!("Caption directory: {}", store.dir().display());
            let mut stdout = std::io::stdout();

            match args.input {
                Some(input) => match cli::process_video(&service, &store, &input, &mut stdout).await {
                    Ok(_) => Ok(ExitCode::SUCCESS),
                    Err(_) => Ok(ExitCode::FAILURE),
                },
                None => {
                    let stdin = BufReader::new(tokio::io::stdin());
                    cli::run_interactive(&service, &store, stdin, &mut stdout).await?;
                    Ok(ExitCode::SUCCESS)
                }
            }
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutting down");
}
