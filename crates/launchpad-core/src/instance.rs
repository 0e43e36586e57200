//! Single-instance coordination.
//!
//! The first process takes an exclusive `flock` on `<tmpdir>/<app>.lock` and
//! writes its pid there. Later invocations fail to take the lock, read the
//! pid and send the owner a [`ControlMessage::Toggle`] as `SIGUSR1`.

use crate::{Error, Result};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::os::fd::AsRawFd;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const FALLBACK_TEMP_DIR: &str = "/tmp";

/// Control messages exchanged between launcher processes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMessage {
    /// Show the window if hidden, hide it otherwise
    Toggle,
    /// Leave the event loop
    Terminate,
}

impl ControlMessage {
    /// Signal number carrying this message.
    #[must_use]
    pub fn signal(self) -> libc::c_int {
        match self {
            ControlMessage::Toggle => libc::SIGUSR1,
            ControlMessage::Terminate => libc::SIGTERM,
        }
    }

    /// Message carried by `signal`, if any.
    #[must_use]
    pub fn from_signal(signal: libc::c_int) -> Option<Self> {
        match signal {
            libc::SIGUSR1 => Some(ControlMessage::Toggle),
            libc::SIGTERM | libc::SIGINT => Some(ControlMessage::Terminate),
            _ => None,
        }
    }
}

/// `<tmpdir>/<app>.lock`, with tmpdir from `TMPDIR`, `TEMP`, `TMP` or `/tmp`.
#[must_use]
pub fn lock_file_path<F>(app: &str, env: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    let temp_dir = ["TMPDIR", "TEMP", "TMP"]
        .into_iter()
        .find_map(|key| env(key).filter(|value| !value.is_empty()))
        .unwrap_or_else(|| FALLBACK_TEMP_DIR.to_string());
    Path::new(&temp_dir).join(format!("{app}.lock"))
}

/// Result of trying to become the owning instance.
#[derive(Debug)]
pub enum Acquisition {
    Owner(InstanceLock),
    /// Another live process holds the lock
    Contended,
}

/// Held exclusive lock. The lock is released when the file is closed, at
/// the latest on process exit; the file itself stays on disk.
#[derive(Debug)]
pub struct InstanceLock {
    // Kept open; closing it releases the lock
    _file: File,
    path: PathBuf,
}

impl InstanceLock {
    /// Try to take the lock at `path` without blocking.
    ///
    /// On success the file is truncated and rewritten with this process's
    /// pid, replacing whatever a crashed previous owner left behind.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or written, or if
    /// `flock` fails for a reason other than contention.
    pub fn acquire(path: &Path) -> Result<Acquisition> {
        // Not truncated on open: the current owner's pid must survive a failed attempt.
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        // SAFETY: the descriptor belongs to `file`, which is alive for the call.
        let rc = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX | libc::LOCK_NB) };
        if rc != 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::WouldBlock {
                debug!("Lock {} is held by another process", path.display());
                return Ok(Acquisition::Contended);
            }
            return Err(Error::Lock(format!("flock {}: {err}", path.display())));
        }

        file.set_len(0)?;
        write!(file, "{}", std::process::id())?;
        file.flush()?;

        info!("Acquired instance lock {}", path.display());
        Ok(Acquisition::Owner(Self {
            _file: file,
            path: path.to_path_buf(),
        }))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Pid recorded in the lock file at `path`.
///
/// # Errors
///
/// Returns an error if the file is unreadable or does not hold a positive
/// decimal pid.
pub fn read_owner_pid(path: &Path) -> Result<libc::pid_t> {
    let contents = std::fs::read_to_string(path)?;
    let pid: libc::pid_t = contents
        .trim()
        .parse()
        .map_err(|e| Error::Lock(format!("invalid pid {contents:?}: {e}")))?;
    if pid <= 0 {
        return Err(Error::Lock(format!("invalid pid {pid}")));
    }
    Ok(pid)
}

/// Deliver `message` to the process `pid`.
///
/// # Errors
///
/// Returns an error if the signal cannot be sent.
pub fn send_control(pid: libc::pid_t, message: ControlMessage) -> Result<()> {
    // SAFETY: kill has no memory-safety preconditions.
    let rc = unsafe { libc::kill(pid, message.signal()) };
    if rc != 0 {
        return Err(Error::Lock(format!(
            "signal {message:?} to {pid}: {}",
            io::Error::last_os_error()
        )));
    }
    Ok(())
}

/// What happened when relaying a toggle to the owning instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    Delivered(libc::pid_t),
    SendFailed(libc::pid_t),
    /// Lock file unreadable or corrupt; nothing was sent
    OwnerUnknown,
}

/// Tell the owner of the lock at `path` to toggle its window.
///
/// Never fails: the caller exits either way.
#[must_use]
pub fn relay_toggle(path: &Path) -> RelayOutcome {
    let pid = match read_owner_pid(path) {
        Ok(pid) => pid,
        Err(e) => {
            debug!("Cannot read owner of {}: {}", path.display(), e);
            return RelayOutcome::OwnerUnknown;
        }
    };

    info!("Running instance found, sending toggle to {pid}");
    match send_control(pid, ControlMessage::Toggle) {
        Ok(()) => RelayOutcome::Delivered(pid),
        Err(e) => {
            debug!("{e}");
            RelayOutcome::SendFailed(pid)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_lock_file_path_precedence() {
        let env = env_from(&[("TMPDIR", "/a"), ("TEMP", "/b"), ("TMP", "/c")]);
        assert_eq!(
            lock_file_path("launchpad", env),
            PathBuf::from("/a/launchpad.lock")
        );

        let env = env_from(&[("TEMP", "/b"), ("TMP", "/c")]);
        assert_eq!(
            lock_file_path("launchpad", env),
            PathBuf::from("/b/launchpad.lock")
        );

        let env = env_from(&[("TMPDIR", ""), ("TMP", "/c")]);
        assert_eq!(
            lock_file_path("launchpad", env),
            PathBuf::from("/c/launchpad.lock")
        );

        let env = env_from(&[]);
        assert_eq!(
            lock_file_path("launchpad", env),
            PathBuf::from("/tmp/launchpad.lock")
        );
    }

    #[test]
    fn test_control_message_signal_mapping() {
        assert_eq!(ControlMessage::Toggle.signal(), libc::SIGUSR1);
        assert_eq!(ControlMessage::Terminate.signal(), libc::SIGTERM);
        assert_eq!(
            ControlMessage::from_signal(libc::SIGUSR1),
            Some(ControlMessage::Toggle)
        );
        assert_eq!(
            ControlMessage::from_signal(libc::SIGINT),
            Some(ControlMessage::Terminate)
        );
        assert_eq!(ControlMessage::from_signal(libc::SIGHUP), None);
    }
}
