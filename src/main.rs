use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};

use swipestack::config::Config;
use swipestack::data::{ItemId, OrderId, UserId};
use swipestack::logging::init_tracing;
use swipestack::trace::{read_trace, replay};
use swipestack::ui::deferred::IntentHandler;
use swipestack::ui::events::HostEvent;
use swipestack::ui::gesture::{GestureHandler, TargetRef};
use swipestack::ui::runtime::Runtime;
use swipestack::ui::shell::{Shell, ShellEffect};

#[derive(Debug, Parser)]
#[command(name = "swipestack", version, about = "Drive the interaction core from traces or stdin")]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Replay a JSON-lines trace on its own clock and print every effect
    Replay { trace: PathBuf },
    /// Read JSON-line host events from stdin and drive them on the wall clock
    Listen,
    /// Load and validate the config, then print it
    CheckConfig,
}

/// Stands in for the content layer: logs what would run.
struct LoggingHandler;

impl GestureHandler for LoggingHandler {
    fn on_tap(&mut self, target: &TargetRef) {
        info!(target_id = %target.id, "tap");
    }

    fn on_swipe_left(&mut self, target: &TargetRef) {
        info!(target_id = %target.id, "swipe left");
    }

    fn on_swipe_right(&mut self, target: &TargetRef) {
        info!(target_id = %target.id, "swipe right");
    }

    fn on_swipe_up(&mut self, target: &TargetRef) {
        info!(target_id = %target.id, "swipe up");
    }

    fn on_swipe_down(&mut self, target: &TargetRef) {
        info!(target_id = %target.id, "swipe down");
    }

    fn on_long_press(&mut self, target: &TargetRef) {
        info!(target_id = %target.id, "long press");
    }
}

impl IntentHandler for LoggingHandler {
    fn buy(&mut self, item: &ItemId) {
        info!(%item, "buy");
    }

    fn start_chat(&mut self, seller: &UserId, item: Option<&ItemId>) {
        info!(%seller, ?item, "start chat");
    }

    fn create_listing(&mut self) {
        info!("create listing");
    }

    fn toggle_favorite(&mut self, item: &ItemId) {
        info!(%item, "toggle favorite");
    }

    fn report(&mut self, item: &ItemId) {
        info!(%item, "report");
    }

    fn open_dispute(&mut self, order: &OrderId) {
        info!(%order, "open dispute");
    }

    fn confirm_receipt(&mut self, order: &OrderId) {
        info!(%order, "confirm receipt");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Replay { trace } => run_replay(&load_config(cli.config.as_deref())?, &trace),
        Command::Listen => listen(load_config(cli.config.as_deref())?).await,
        Command::CheckConfig => check_config(cli.config.as_deref()),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    Ok(config)
}

fn shell_for(config: &Config) -> Shell {
    let mut shell = Shell::new(config);
    shell.set_handler(LoggingHandler);
    shell
}

/// Hand gesture actions to the content layer's callbacks.
fn deliver(effect: &ShellEffect, handler: &mut impl GestureHandler) {
    if let ShellEffect::Gesture(action) = effect {
        action.dispatch(handler);
    }
}

fn run_replay(config: &Config, trace: &Path) -> anyhow::Result<()> {
    let records = read_trace(trace)?;
    info!(records = records.len(), trace = %trace.display(), "replaying trace");
    let mut shell = shell_for(config);
    let effects = replay(&mut shell, records)?;
    shell.teardown();
    let mut handler = LoggingHandler;
    for effect in effects {
        deliver(&effect.effect, &mut handler);
        println!("{}", serde_json::to_string(&effect)?);
    }
    Ok(())
}

async fn listen(config: Config) -> anyhow::Result<()> {
    let (event_tx, event_rx) = mpsc::channel(64);
    let (effect_tx, mut effect_rx) = mpsc::channel(64);

    let driver = tokio::spawn(Runtime::new(shell_for(&config)).run(event_rx, effect_tx));
    let reader = tokio::spawn(read_events(event_tx));

    let printer = async {
        let mut stdout = tokio::io::stdout();
        let mut handler = LoggingHandler;
        while let Some(effect) = effect_rx.recv().await {
            deliver(&effect, &mut handler);
            let mut line = serde_json::to_vec(&effect)?;
            line.push(b'\n');
            stdout.write_all(&line).await?;
            stdout.flush().await?;
        }
        anyhow::Ok(())
    };

    tokio::select! {
        printed = printer => printed?,
        _ = tokio::signal::ctrl_c() => {
            info!("interrupted");
            reader.abort();
            return Ok(());
        }
    }

    reader.await.context("stdin reader panicked")??;
    driver.await.context("runtime task panicked")?;
    info!("input closed");
    Ok(())
}

async fn read_events(events: mpsc::Sender<HostEvent>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut number = 0usize;
    while let Some(line) = lines.next_line().await? {
        number += 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<HostEvent>(line) {
            Ok(event) => {
                if events.send(event).await.is_err() {
                    break;
                }
            }
            Err(err) => warn!(line = number, %err, "skipping malformed event"),
        }
    }
    Ok(())
}

fn check_config(path: Option<&Path>) -> anyhow::Result<()> {
    let source = path
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::config_path);
    let config = load_config(path)?;
    println!("# {}", source.display());
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
