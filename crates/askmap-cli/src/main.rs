//! askmap: ask a question, see the places
//!
//! Usage examples
//! --------------
//!
//! - Country-name completion
//!   $ askmap suggest fr
//!
//! - Ask the AI and print the highlighted boundaries
//!   $ GEMINI_API_KEY=... askmap ask capital of France and Germany
//!
//! - Highlight one place directly
//!   $ askmap highlight peru
//!
//! - Type the query as if dictating it
//!   $ askmap listen
//!
//! - Source summary
//!   $ askmap --cache-dir ~/.cache/askmap stats
//!
//! The map is an in-memory surface; after each command its overlays and
//! viewport are printed. Logs go to stderr (`-v` or `RUST_LOG` for more).
mod args;
mod speech;

use crate::args::{CliArgs, Commands};
use crate::speech::{LineRecognizer, TerminalBell};
use anyhow::Context;
use askmap_core::boundary::BoundarySource;
use askmap_core::highlighter::{HighlightOutcome, Highlighter, LocationHighlighter};
use askmap_core::map::MemorySurface;
use askmap_core::suggestions::SuggestionIndex;
use askmap_core::voice::{SpeechEvent, VoiceInput};
use askmap_core::{http, AskMapConfig, Session, UiEvent};
use clap::Parser;
use futures::StreamExt;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = CliArgs::parse();
    init_tracing(args.options.verbose);

    let config = args.options.apply(AskMapConfig::from_env());
    tracing::debug!(model = %config.ai_model, cache_dir = ?config.cache_dir, "configuration resolved");
    let surface = Arc::new(MemorySurface::new());

    match args.command {
        Commands::Suggest { prefix } => {
            let index = load_index(&config).await?;
            let hits = index.filter_prefix(&prefix);
            if hits.is_empty() {
                println!("No suggestions for: {prefix}");
            }
            for name in hits {
                println!("{name}");
            }
        }

        Commands::Ask { query } => {
            let session = Session::connect(&config, surface.clone())
                .await
                .context("could not set up the AI session")?;
            session.dispatch(UiEvent::Input(query.join(" "))).await?;
            session.dispatch(UiEvent::Submit).await?;
            println!("{}", session.status());
            print_map(&surface);
        }

        Commands::Highlight { name } => {
            let client = http::build_client(&config)?;
            let highlighter = Highlighter::new(
                askmap_core::boundary::configured_source(client, &config),
                surface.clone(),
                config.match_mode,
            );
            match highlighter.highlight(&name.to_lowercase()).await {
                HighlightOutcome::Drawn(id) => println!("Highlighted {name} as {id}"),
                HighlightOutcome::NotFound => println!("Location not found on map: {name}"),
                HighlightOutcome::Unavailable => {
                    anyhow::bail!("boundary dataset could not be loaded from {}", config.boundaries_url)
                }
                HighlightOutcome::Superseded => {}
            }
            print_map(&surface);
        }

        Commands::Listen => {
            let (voice, mut events) = VoiceInput::new(
                Arc::new(LineRecognizer::new()),
                Arc::new(TerminalBell),
                config.locale.clone(),
            );
            let session = Session::connect(&config, surface.clone())
                .await
                .context("could not set up the AI session")?
                .with_voice(voice);

            session.dispatch(UiEvent::SpeakPressed).await?;
            eprintln!("{}", session.listening().label());

            while let Some(event) = events.next().await {
                let done = matches!(event, SpeechEvent::SpeechEnd | SpeechEvent::Error(_));
                session.dispatch(UiEvent::Speech(event)).await?;
                if done {
                    break;
                }
            }

            let query = session.query();
            if query.trim().is_empty() {
                println!("Nothing heard.");
                return Ok(());
            }
            println!("Query: {query}");
            session.dispatch(UiEvent::Submit).await?;
            println!("{}", session.status());
            print_map(&surface);
        }

        Commands::Stats => {
            let index = load_index(&config).await?;
            let client = http::build_client(&config)?;
            let atlas = askmap_core::boundary::configured_source(client, &config)
                .load()
                .await
                .context("could not load the boundary dataset")?;

            println!("Sources:");
            println!("  Country names: {} ({})", index.len(), config.countries_url);
            println!("  Boundaries: {} ({})", atlas.len(), config.boundaries_url);
            println!("  Model: {}", config.ai_model);
            println!("  Match mode: {:?}", config.match_mode);
            match &config.cache_dir {
                Some(dir) => println!("  Cache: {}", dir.display()),
                None => println!("  Cache: memory only"),
            }
        }
    }

    Ok(())
}

/// Stderr logging; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "warn,askmap_core=debug,askmap=debug"
    } else {
        "warn,askmap_core=info"
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .init();
}

async fn load_index(config: &AskMapConfig) -> anyhow::Result<SuggestionIndex> {
    let client = http::build_client(config)?;
    let source = askmap_core::suggestions::configured_source(client, config);
    let index = SuggestionIndex::new(config.match_mode, config.max_suggestions);
    index.load(source.as_ref()).await;
    if let Some(err) = index.load_error() {
        anyhow::bail!("could not load country names: {err}");
    }
    Ok(index)
}

fn print_map(surface: &MemorySurface) {
    let overlays = surface.overlays();
    if overlays.is_empty() {
        println!("Map: no highlights");
    } else {
        println!("Map:");
        for (id, overlay) in overlays {
            let b = overlay.bounds;
            println!(
                "  {id} {} [{:.2}, {:.2} .. {:.2}, {:.2}] {} polygon(s)",
                overlay.name,
                b.min_lon,
                b.min_lat,
                b.max_lon,
                b.max_lat,
                overlay.polygons.len()
            );
        }
    }
    let [lon, lat] = surface.viewport().center();
    println!("View centered at {lat:.2}, {lon:.2}");
}
