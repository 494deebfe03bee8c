use rvm_abi::{CatalogError, ItemError};
use rvm_core::CoreError;
use std::path::PathBuf;
use thiserror::Error;

pub type KioskResult<T> = Result<T, KioskError>;

#[derive(Debug, Error)]
pub enum KioskError {
    /// Menu choice outside the set the current screen offers.
    #[error("invalid option {input:?}")]
    InvalidOption { input: String },

    #[error("user id must not be empty")]
    EmptyUserId,

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The item generator failed; the kiosk cannot continue.
    #[error("item source failed: {0}")]
    ItemSource(#[from] ItemError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl KioskError {
    pub(crate) fn invalid(input: &str) -> Self {
        KioskError::InvalidOption {
            input: input.to_owned(),
        }
    }

    /// Whether the loop should re-prompt rather than stop.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            KioskError::InvalidOption { .. } | KioskError::EmptyUserId | KioskError::Catalog(_)
        )
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Machine(#[from] CoreError),

    #[error("inactivity timeout must be greater than zero")]
    ZeroTimeout,

    #[error("wrinkle ratio {0} is outside 0..=1")]
    WrinkleRatio(f64),
}
