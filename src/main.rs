use anyhow::Context;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use nova::lexicon::keys;
use nova::outputs::console;
use nova::{DispatchOutcome, Dispatcher, NovaConfig};

fn config_arg() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
        if let Some(path) = arg.strip_prefix("--config=") {
            return Some(PathBuf::from(path));
        }
    }
    None
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("nova=info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber).context("setting default subscriber failed")?;

    let config = NovaConfig::load(config_arg().as_deref()).context("loading config")?;
    tracing::info!(lang = %config.language, "starting nova");

    let dispatcher = Dispatcher::from_config(config, console::outputs()).context("building router")?;
    let followup = dispatcher.followup().clone();

    // Replies to an open question go straight to the follow-up engine; the
    // dispatcher is busy awaiting it, so they can't go through the channel.
    let (tx, mut rx) = mpsc::channel::<String>(32);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if line.trim().is_empty() {
                continue;
            }
            if followup.accepts_typed() {
                followup.submit_typed(&line);
                continue;
            }
            if tx.send(line).await.is_err() {
                break;
            }
        }
    });

    println!("Type a command (Ctrl+D to quit).");
    while let Some(line) = rx.recv().await {
        let outcome = dispatcher.dispatch(&line).await;
        tracing::debug!(?outcome, "dispatched");
        if exits(&outcome) {
            break;
        }
    }

    tracing::info!("nova stopped");
    Ok(())
}

fn exits(outcome: &DispatchOutcome) -> bool {
    match outcome {
        DispatchOutcome::Chained(parts) => parts.iter().any(exits),
        other => other.handled_key() == Some(&keys::EXIT_APP),
    }
}
