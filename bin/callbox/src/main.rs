//! callbox – entry point.
//!
//! Startup order:
//! 1. Parse command-line arguments and configuration from the environment.
//! 2. Initialise tracing on stderr (JSON or plain text).
//! 3. Build the call repository and perform the initial load.
//! 4. Run the requested command and print the resulting partition.

mod cli;
mod render;

use std::sync::Arc;

use anyhow::{Context, bail};
use callbox_core::types::{CallId, Partition};
use callbox_core::{CallRepository, Config, HttpCallStore, ViewController};
use chrono::Local;
use clap::Parser;
use tracing::{info, warn};

use crate::cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Configuration ───────────────────────────────────────────────────────
    let args = Cli::parse();
    let mut cfg = Config::from_env();
    if let Some(base_url) = args.base_url.clone() {
        cfg = cfg.with_base_url(base_url);
    }
    cfg.validate()?;

    // ── 2. Tracing ─────────────────────────────────────────────────────────────
    init_tracing(&cfg);
    info!(version = env!("CARGO_PKG_VERSION"), base_url = %cfg.base_url, "callbox starting");

    // ── 3. Repository + initial load ───────────────────────────────────────────
    let repo = Arc::new(CallRepository::from_config(&cfg)?);
    let mut view = ViewController::new(repo);
    view.show(starting_partition(&args.command));
    view.refresh().await.context("failed to fetch calls")?;

    // ── 4. Command ─────────────────────────────────────────────────────────────
    run(&mut view, args.command).await?;

    let groups = view.visible_by_day(&Local);
    print!("{}", render::render_partition(view.partition(), &groups, &Local));
    Ok(())
}

/// Partition to show before the initial load, so each command fetches once.
fn starting_partition(command: &Command) -> Partition {
    match command {
        Command::List { archived } => Partition::from_archived(*archived),
        Command::UnarchiveAll => Partition::Archived,
        Command::Toggle { .. } | Command::ArchiveAll => Partition::Active,
    }
}

async fn run(view: &mut ViewController<HttpCallStore>, command: Command) -> anyhow::Result<()> {
    match command {
        Command::List { .. } => {}
        Command::Toggle { id } => {
            let id = CallId::from(id);
            let Some(record) = view.find(&id) else {
                bail!("no call with id {id}");
            };
            // The snapshot already holds both partitions.
            view.show(Partition::from_archived(record.is_archived));

            if !view.toggle(&id).await? {
                warn!(%id, "call was not updated; showing server state");
                eprintln!("callbox: failed to update call {id}");
            }
        }
        Command::ArchiveAll => {
            view.apply_to_all(true).await?;
        }
        Command::UnarchiveAll => {
            view.apply_to_all(false).await?;
        }
    }
    Ok(())
}

/// Build the log-level filter, warning loudly if the configured value is not a
/// valid tracing filter expression.
fn init_tracing(cfg: &Config) {
    let env_filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => match cfg.log_level.parse::<tracing_subscriber::EnvFilter>() {
            Ok(f) => f,
            Err(e) => {
                eprintln!(
                    "WARN: CALLBOX_LOG='{}' is not a valid tracing filter ({}); \
                     falling back to 'info'",
                    cfg.log_level, e
                );
                tracing_subscriber::EnvFilter::new("info")
            }
        },
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    if cfg.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_load_targets_the_command_partition() {
        let archived = Command::List { archived: true };
        assert_eq!(starting_partition(&archived), Partition::Archived);
        assert_eq!(starting_partition(&Command::UnarchiveAll), Partition::Archived);
        assert_eq!(starting_partition(&Command::ArchiveAll), Partition::Active);
        let toggle = Command::Toggle { id: "1".into() };
        assert_eq!(starting_partition(&toggle), Partition::Active);
    }
}
