//! JSON-backed persistence of the machine snapshot and the user table.
//!
//! Writes are best-effort: the kiosk keeps running when the disk is
//! unavailable, and a missing file loads as empty data.

#![allow(missing_docs)]

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use rvm_abi::MachineSnapshot;
use serde::{Deserialize, Serialize};
use services_accounts::UserRecord;
use thiserror::Error;

/// Default data file name.
pub const DEFAULT_DATA_FILE: &str = "appData.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed data file {path}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Everything the kiosk keeps between runs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine: Option<MachineSnapshot>,
    /// Older data files name this `userData`.
    #[serde(default, alias = "userData")]
    pub users: Vec<UserRecord>,
}

/// Reads and writes [`AppData`] at a fixed path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the data file. A missing file yields empty data.
    pub fn load(&self) -> Result<AppData, StoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("no data file at {}; starting fresh", self.path.display());
                return Ok(AppData::default());
            }
            Err(source) => return Err(self.io_error(source)),
        };
        serde_json::from_reader(BufReader::new(file)).map_err(|source| StoreError::Format {
            path: self.path.clone(),
            source,
        })
    }

    /// Writes the data file through a sibling temp file and a rename.
    pub fn save(&self, data: &AppData) -> Result<(), StoreError> {
        let tmp = self.path.with_extension("json.tmp");
        let file = File::create(&tmp).map_err(|source| self.io_error(source))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, data).map_err(|source| StoreError::Format {
            path: tmp.clone(),
            source,
        })?;
        writer.flush().map_err(|source| self.io_error(source))?;
        drop(writer);
        fs::rename(&tmp, &self.path).map_err(|source| self.io_error(source))?;
        debug!("saved app data to {}", self.path.display());
        Ok(())
    }

    /// Like [`Self::save`], logging instead of returning failures.
    pub fn save_best_effort(&self, data: &AppData) -> bool {
        match self.save(data) {
            Ok(()) => true,
            Err(err) => {
                warn!("could not persist app data: {err}");
                false
            }
        }
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
