//! Detached process start.

use crate::command::InvocationSpec;
use crate::{Error, Result};
use std::os::unix::process::CommandExt;
use std::process::{Command, Stdio};
use tracing::{debug, info};

/// Whether the launcher stays resident between launches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Quit after the first launch or dismissal
    #[default]
    OneShot,
    /// Hide instead of quitting; shown again by a toggle
    Persistent,
}

/// What the UI should do once a launch succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterLaunch {
    Hide,
    Quit,
}

/// Starts invocations as detached children.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessLauncher {
    mode: RunMode,
}

impl ProcessLauncher {
    #[must_use]
    pub fn new(mode: RunMode) -> Self {
        Self { mode }
    }

    #[must_use]
    pub fn mode(&self) -> RunMode {
        self.mode
    }

    /// Start `spec` without waiting for it.
    ///
    /// The child inherits the environment plus `spec.env_overrides` (later
    /// duplicates win), gets `/dev/null` for stdio and runs in its own
    /// session so it outlives the launcher.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Launch`] if the process cannot be spawned.
    pub fn launch(&self, spec: &InvocationSpec) -> Result<AfterLaunch> {
        info!(
            "env vars: {:?}; command: '{}'; args: {:?}",
            spec.env_overrides, spec.executable, spec.arguments
        );

        if spec.executable.is_empty() {
            return Err(Error::Launch("empty command".to_string()));
        }

        let mut command = Command::new(&spec.executable);
        command
            .args(&spec.arguments)
            .envs(spec.env_pairs())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        // SAFETY: setsid is async-signal-safe and touches no parent state.
        unsafe {
            command.pre_exec(|| {
                libc::setsid();
                Ok(())
            });
        }

        let mut child = command
            .spawn()
            .map_err(|e| Error::Launch(format!("Failed to spawn {}: {e}", spec.executable)))?;

        let pid = child.id();
        debug!("Started {} as pid {pid}", spec.executable);

        // Reap the child in the background so it does not linger as a zombie.
        std::thread::spawn(move || {
            let _ = child.wait();
        });

        Ok(match self.mode {
            RunMode::Persistent => AfterLaunch::Hide,
            RunMode::OneShot => AfterLaunch::Quit,
        })
    }
}
