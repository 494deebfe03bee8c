//! Machine status shared with the inactivity timer thread.

use log::info;
use parking_lot::Mutex;
use rvm_abi::{MachineStatus, SleepSwitch};
use std::sync::Arc;

/// Mutex-guarded [`MachineStatus`] that can be cloned across threads.
///
/// Every other piece of machine state lives on the dispatch thread; this cell
/// is the only thing the timer thread writes.
#[derive(Clone, Debug, Default)]
pub struct StatusCell {
    inner: Arc<Mutex<MachineStatus>>,
}

impl StatusCell {
    pub fn new(status: MachineStatus) -> Self {
        Self {
            inner: Arc::new(Mutex::new(status)),
        }
    }

    pub fn get(&self) -> MachineStatus {
        *self.inner.lock()
    }

    pub fn set(&self, status: MachineStatus) {
        let mut guard = self.inner.lock();
        if *guard != status {
            info!("machine status {:?} -> {:?}", *guard, status);
            *guard = status;
        }
    }

    /// Moves `from` to `to` atomically; returns whether the swap happened.
    pub fn transition(&self, from: MachineStatus, to: MachineStatus) -> bool {
        let mut guard = self.inner.lock();
        if *guard == from {
            info!("machine status {from:?} -> {to:?}");
            *guard = to;
            true
        } else {
            false
        }
    }

    /// Wakes a sleeping machine. Returns `true` if it was asleep.
    pub fn wake_if_sleeping(&self) -> bool {
        self.transition(MachineStatus::Sleeping, MachineStatus::Active)
    }
}

impl SleepSwitch for StatusCell {
    fn enter_sleep(&self) -> bool {
        self.transition(MachineStatus::Active, MachineStatus::Sleeping)
    }
}
