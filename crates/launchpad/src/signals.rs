//! Unix signals as control messages for the event loop.

use launchpad_core::ControlMessage;
use tokio::signal::unix::{SignalKind, signal};
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

const FORWARDED_SIGNALS: [libc::c_int; 3] = [libc::SIGUSR1, libc::SIGTERM, libc::SIGINT];

/// Register SIGUSR1, SIGTERM and SIGINT, then forward them from tasks.
///
/// Handlers are installed before this returns. Call it before taking the
/// instance lock: once the pid is in the lock file another invocation may
/// send SIGUSR1, whose default action would kill the process.
pub fn spawn_signal_listener(tx: &UnboundedSender<ControlMessage>) -> std::io::Result<()> {
    for signo in FORWARDED_SIGNALS {
        let Some(message) = ControlMessage::from_signal(signo) else {
            continue;
        };
        let mut stream = signal(SignalKind::from_raw(signo))?;
        let tx = tx.clone();

        tokio::spawn(async move {
            while stream.recv().await.is_some() {
                debug!("Received signal {signo}: {message:?}");
                if tx.send(message).is_err() {
                    break;
                }
            }
        });
    }

    Ok(())
}
