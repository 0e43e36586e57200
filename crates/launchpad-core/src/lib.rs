//! Core library for the launchpad application launcher.
//!
//! Discovers desktop entries, keeps them in a sorted searchable index,
//! turns `Exec` lines into process invocations and coordinates a single
//! running instance through a lock file and Unix signals.

pub mod app;
pub mod command;
pub mod config;
pub mod entry;
pub mod index;
pub mod instance;
pub mod launcher;

mod error;

#[cfg(test)]
mod tests;

pub use app::{ApplicationState, LoopControl, Presenter, UiEvent};
pub use command::{CommandInterpreter, InvocationSpec, parse_command};
pub use entry::{DesktopEntry, Locale, parse_entry, parse_entry_file};
pub use error::{Error, Result};
pub use index::{EntryIndex, Query, ScanStats, source_dirs};
pub use instance::{
    Acquisition, ControlMessage, InstanceLock, RelayOutcome, lock_file_path, read_owner_pid,
    relay_toggle, send_control,
};
pub use launcher::{AfterLaunch, ProcessLauncher, RunMode};
