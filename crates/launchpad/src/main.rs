//! Launchpad entry point.
//!
//! Only one instance runs at a time. A second invocation finds the lock
//! held, asks the running instance to toggle its window and exits.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use launchpad_core::config::{Config, Directories};
use launchpad_core::{
    Acquisition, ApplicationState, CommandInterpreter, ControlMessage, EntryIndex, InstanceLock,
    LoopControl, ProcessLauncher, RelayOutcome, UiEvent, lock_file_path, relay_toggle,
};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, error, info, warn};

mod cli;
mod console;
mod icons;
mod logging;
mod settings;
mod signals;

use cli::Cli;
use console::ConsolePresenter;
use icons::IconCache;
use settings::Settings;

const APP_NAME: &str = "launchpad";

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::setup_logging(cli.debug);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn load_config() -> Config {
    let loaded = Directories::new().and_then(|dirs| {
        debug!("Config file: {}", dirs.config_file.display());
        Config::load(&dirs.config_file)
    });
    loaded.unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {e}");
        Config::default()
    })
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start runtime")?;

    runtime.block_on(run_instance(cli))?;
    info!("Launchpad stopped");
    Ok(())
}

async fn run_instance(cli: &Cli) -> anyhow::Result<()> {
    let (control_tx, control_rx) = mpsc::unbounded_channel::<ControlMessage>();

    // Handlers must be in place before the pid becomes visible in the lock file
    signals::spawn_signal_listener(&control_tx).context("Failed to register signal handlers")?;

    let lock_path = lock_file_path(APP_NAME, |key| std::env::var(key).ok());

    // Any failure to take the lock counts as "another instance is running"
    let lock = match InstanceLock::acquire(&lock_path) {
        Ok(Acquisition::Owner(lock)) => lock,
        Ok(Acquisition::Contended) => {
            relay(&lock_path);
            return Ok(());
        }
        Err(e) => {
            debug!("Lock failed: {e}");
            relay(&lock_path);
            return Ok(());
        }
    };
    info!("Holding {}", lock.path().display());

    let config = load_config();
    let term = std::env::var("TERM").ok();
    let settings = Settings::resolve(cli, &config, term.as_deref());
    debug!("Settings: {settings:?}");

    load_style(&settings);
    if let Some(output) = &settings.output {
        info!("Placing launcher on output {output}");
    }

    event_loop(settings, control_rx).await;

    drop(lock);
    Ok(())
}

fn relay(lock_path: &std::path::Path) {
    match relay_toggle(lock_path) {
        RelayOutcome::Delivered(pid) => info!("Toggled running instance {pid}"),
        RelayOutcome::SendFailed(pid) => warn!("Could not signal running instance {pid}"),
        RelayOutcome::OwnerUnknown => warn!("Another instance holds the lock but its pid is unknown"),
    }
}

fn load_style(settings: &Settings) {
    let Some(style) = &settings.style else {
        return;
    };
    match std::fs::read_to_string(style) {
        Ok(css) => info!("Using style from {} ({} bytes)", style.display(), css.len()),
        Err(e) => error!("Failed to read style {}: {e}", style.display()),
    }
}

async fn event_loop(settings: Settings, mut control_rx: UnboundedReceiver<ControlMessage>) {
    let (ui_tx, mut ui_rx) = mpsc::unbounded_channel::<UiEvent>();

    // Stdin closing only stops input; signals keep driving the loop
    console::spawn_stdin_reader(ui_tx);

    let presenter = ConsolePresenter::new(
        std::io::stdout(),
        IconCache::from_env(settings.icon_size),
        settings.columns,
        settings.spacing,
    );
    let mut state = ApplicationState::new(
        EntryIndex::from_env(),
        CommandInterpreter::new(settings.terminal),
        ProcessLauncher::new(settings.mode),
        presenter,
    );
    state.start(settings.show_on_start);

    loop {
        let control = tokio::select! {
            Some(message) = control_rx.recv() => state.handle_control(message),
            Some(event) = ui_rx.recv() => state.handle_ui(event),
            else => LoopControl::Exit,
        };
        if control == LoopControl::Exit {
            break;
        }
    }
}
