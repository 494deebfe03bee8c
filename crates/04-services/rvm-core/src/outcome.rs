//! Result shapes returned to the dispatcher instead of sentinel errors.

use rvm_abi::{Material, Money};

/// Why an action or item was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// Item is wrinkled and must be straightened first.
    Wrinkled,
    /// The item's pile has reached its limit.
    PileFull(Material),
    /// Machine is powered off or broken.
    OutOfService,
}

/// Result of offering one item to the intake.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecycleOutcome {
    Accepted {
        material: Material,
        value: Money,
        /// Whether this item filled its pile.
        filled_pile: bool,
    },
    Rejected(RejectReason),
}

impl RecycleOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, RecycleOutcome::Accepted { .. })
    }
}

/// Result of running a user action through the sleep gate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome<T> {
    Executed(T),
    /// The machine was asleep; the action was consumed as a wake signal.
    WokeFromSleep,
    Rejected(RejectReason),
}

impl<T> ActionOutcome<T> {
    pub fn executed(self) -> Option<T> {
        match self {
            ActionOutcome::Executed(value) => Some(value),
            ActionOutcome::WokeFromSleep | ActionOutcome::Rejected(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ActionOutcome<U> {
        match self {
            ActionOutcome::Executed(value) => ActionOutcome::Executed(f(value)),
            ActionOutcome::WokeFromSleep => ActionOutcome::WokeFromSleep,
            ActionOutcome::Rejected(reason) => ActionOutcome::Rejected(reason),
        }
    }
}

/// Result of trying to close the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Closing<T> {
    Closed(T),
    /// Session total is zero; nothing was changed.
    NothingToProcess,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmptyOutcome {
    Emptied,
    /// Machine was not full; nothing was changed.
    NotFull,
}
