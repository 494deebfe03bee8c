//! Interactive dispatcher for the reverse-vending kiosk.
//!
//! [`Kiosk`] is the one context object a front end holds. Each turn the front
//! end calls [`Kiosk::refresh`] to settle the screen, renders it, calls
//! [`Kiosk::touch`] to restart the inactivity window, and feeds the next line
//! of input to [`Kiosk::handle_input`].

#![allow(missing_docs)]

pub mod action;
pub mod config;
pub mod error;
mod kiosk;

pub use action::{admin_menu, Action, Notice, Notices, Screen, Turn};
pub use config::KioskConfig;
pub use error::{ConfigError, KioskError, KioskResult};
pub use kiosk::{Kiosk, KioskBuilder};
