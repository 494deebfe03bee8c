#![allow(missing_docs)]

//! Control core of the reverse-vending kiosk.
//!
//! The crate owns the machine state machine, the per-material capacity ledger
//! and the open recycling session. Everything here runs on the dispatch thread
//! except [`StatusCell`], which is the one piece of state the inactivity timer
//! is allowed to touch.

pub mod config;
pub mod controller;
pub mod error;
pub mod finalizer;
pub mod ledger;
pub mod outcome;
pub mod session;
pub mod status;

pub use config::MachineConfig;
pub use controller::MachineStateController;
pub use error::CoreError;
pub use finalizer::TransactionFinalizer;
pub use ledger::CapacityLedger;
pub use outcome::{ActionOutcome, Closing, EmptyOutcome, RecycleOutcome, RejectReason};
pub use session::RecyclingSession;
pub use status::StatusCell;
