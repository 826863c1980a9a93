mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Args;
use pmoconfig::{Config, get_config};
use pmoplaylist::{
    OutcomeKind, PlaylistConfigExt, PlaylistOrchestrator, ResolveMode, SubmissionOutcome,
};
use pmoresolver::{HttpResolver, ResolverBuilder};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

const CMD_NEXT: &str = ":next";
const CMD_QUEUE: &str = ":queue";
const CMD_QUIT: &str = ":quit";

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config_dir {
        Some(dir) => Arc::new(Config::load_config(&dir.to_string_lossy())?),
        None => get_config(),
    };

    init_logging(&config, args.verbosity)?;

    let resolver = build_resolver(&config, &args)?;
    info!("🔗 Resolving through {}{}", resolver.base_url(), resolver.endpoint());

    let mut playlist = PlaylistOrchestrator::from_config_with(&config, Arc::new(resolver))?;
    if args.concurrent {
        playlist.set_mode(ResolveMode::Concurrent {
            max_in_flight: config.get_playlist_max_in_flight()?,
        });
    }

    let mut submissions = args.submissions.clone();
    if let Some(file) = &args.file {
        let batch = std::fs::read_to_string(file)
            .with_context(|| format!("Cannot read batch file {}", file.display()))?;
        submissions.push(batch);
    }

    let mut out = std::io::stdout();
    if submissions.is_empty() {
        let input = BufReader::new(tokio::io::stdin());
        run_interactive(&mut playlist, input, &mut out, args.json).await?;
    } else {
        for submission in &submissions {
            let outcomes = playlist.submit(submission).await;
            report(&mut out, &outcomes, args.json)?;
        }
        for _ in 0..args.play {
            next_track(&mut out, &mut playlist)?;
        }
    }

    Ok(())
}

/// Install the tracing subscriber; `RUST_LOG` wins over the configured level
fn init_logging(config: &Config, verbosity: u8) -> Result<()> {
    if !config.get_log_enable_console()? {
        return Ok(());
    }

    let level = match verbosity {
        0 => config.get_log_min_level()?.to_lowercase(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn build_resolver(config: &Config, args: &Args) -> Result<HttpResolver> {
    let mut builder = ResolverBuilder::from_config(config)?;
    if let Some(url) = &args.resolver_url {
        builder = builder.base_url(url.clone());
    }
    Ok(builder.build()?)
}

/// One line per outcome, the way the web page shows one toast per link
fn report(out: &mut impl Write, outcomes: &[SubmissionOutcome], json: bool) -> Result<()> {
    for outcome in outcomes {
        if json {
            writeln!(out, "{}", serde_json::to_string(outcome)?)?;
            continue;
        }

        let icon = match outcome.kind() {
            OutcomeKind::Added => "✅",
            OutcomeKind::Duplicate => "ℹ️",
            OutcomeKind::Failed | OutcomeKind::InvalidInput => "❌",
        };
        writeln!(out, "{} {}", icon, outcome.notice())?;

        if outcome.starts_playback() {
            if let Some(track) = outcome.track() {
                writeln!(out, "▶ Now playing: {}", track)?;
            }
        }
    }
    Ok(())
}

fn next_track(out: &mut impl Write, playlist: &mut PlaylistOrchestrator) -> Result<()> {
    match playlist.advance() {
        Ok(track) => writeln!(
            out,
            "▶ Now playing [{}/{}]: {}",
            playlist.queue().cursor() + 1,
            playlist.queue().len(),
            track
        )?,
        Err(_) => writeln!(out, "⏹ Playlist is empty")?,
    }
    Ok(())
}

fn print_queue(out: &mut impl Write, playlist: &PlaylistOrchestrator) -> Result<()> {
    let snapshot = playlist.snapshot();
    if snapshot.is_idle() {
        writeln!(out, "⏹ Playlist is empty")?;
        return Ok(());
    }
    for (i, track) in snapshot.tracks.iter().enumerate() {
        let marker = if i == snapshot.cursor { "▶" } else { " " };
        writeln!(out, "{} {:>3}. {}", marker, i + 1, track)?;
    }
    Ok(())
}

async fn run_interactive<R>(
    playlist: &mut PlaylistOrchestrator,
    input: R,
    out: &mut impl Write,
    json: bool,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    writeln!(
        out,
        "Paste a link or a JSON batch per line ({} / {} / {})",
        CMD_NEXT, CMD_QUEUE, CMD_QUIT
    )?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            CMD_QUIT => break,
            CMD_NEXT => next_track(out, playlist)?,
            CMD_QUEUE => print_queue(out, playlist)?,
            _ => {
                let outcomes = playlist.submit(&line).await;
                report(out, &outcomes, json)?;
            }
        }
        out.flush()?;
    }

    info!("Session ended with {} track(s) queued", playlist.queue().len());
    Ok(())
}
