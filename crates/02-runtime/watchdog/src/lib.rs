#![deny(missing_docs)]
//! Single-shot inactivity timer running on its own thread.
//!
//! The dispatch loop calls [`InactivityWatchdog::reset`] after every action and
//! every menu render. When no reset arrives within the timeout the watchdog
//! asks its [`SleepSwitch`] to put the machine to sleep, then disarms until the
//! next reset. The timer thread never blocks the dispatch loop and never sees
//! anything but the switch.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{unbounded, RecvTimeoutError, Sender};
use log::{debug, info, warn};
use rvm_abi::SleepSwitch;

/// Default inactivity window.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

enum Command {
    Reset,
    Shutdown,
}

/// Handle to the timer thread. Dropping it stops and joins the thread.
pub struct InactivityWatchdog {
    timeout: Duration,
    commands: Sender<Command>,
    fires: Arc<AtomicU64>,
    worker: Option<JoinHandle<()>>,
}

impl InactivityWatchdog {
    /// Starts the timer thread, armed for `timeout`.
    pub fn spawn(timeout: Duration, target: Arc<dyn SleepSwitch>) -> std::io::Result<Self> {
        let (commands, inbox) = unbounded::<Command>();
        let fires = Arc::new(AtomicU64::new(0));
        let worker_fires = Arc::clone(&fires);

        let worker = thread::Builder::new()
            .name("inactivity-watchdog".into())
            .spawn(move || {
                let mut armed = true;
                loop {
                    let next = if armed {
                        inbox.recv_timeout(timeout)
                    } else {
                        inbox.recv().map_err(|_| RecvTimeoutError::Disconnected)
                    };
                    match next {
                        Ok(Command::Reset) => armed = true,
                        Ok(Command::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
                        Err(RecvTimeoutError::Timeout) => {
                            armed = false;
                            worker_fires.fetch_add(1, Ordering::SeqCst);
                            if target.enter_sleep() {
                                info!("no activity for {timeout:?}; machine is asleep");
                            } else {
                                debug!("inactivity timeout while machine was not active");
                            }
                        }
                    }
                }
                debug!("inactivity watchdog stopped");
            })?;

        Ok(Self {
            timeout,
            commands,
            fires,
            worker: Some(worker),
        })
    }

    /// Cancels the pending fire and re-arms for a full timeout from now.
    pub fn reset(&self) {
        if self.commands.send(Command::Reset).is_err() {
            warn!("inactivity watchdog thread is gone; reset ignored");
        }
    }

    /// Configured inactivity window.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Number of timeouts that have fired since spawn.
    pub fn fire_count(&self) -> u64 {
        self.fires.load(Ordering::SeqCst)
    }
}

impl Drop for InactivityWatchdog {
    fn drop(&mut self) {
        let _ = self.commands.send(Command::Shutdown);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("inactivity watchdog thread panicked");
            }
        }
    }
}

impl std::fmt::Debug for InactivityWatchdog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InactivityWatchdog")
            .field("timeout", &self.timeout)
            .field("fire_count", &self.fire_count())
            .finish()
    }
}
