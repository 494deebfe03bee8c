//! Kiosk configuration loaded from TOML.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rvm_abi::MaterialMap;
use rvm_core::config::DEFAULT_PILE_LIMIT;
use rvm_core::MachineConfig;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_ITEMS_PER_VISIT: usize = 8;
pub const DEFAULT_WRINKLE_RATIO: f64 = 0.5;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KioskConfig {
    /// Capacity of each material pile.
    pub pile_limits: MaterialMap<u32>,
    /// Idle seconds before the machine goes to sleep.
    pub inactivity_timeout_secs: u64,
    /// Items placed in the tray at start-up.
    pub items_per_visit: usize,
    /// Location of the JSON data file.
    pub data_path: PathBuf,
    /// Share of generated items that come out wrinkled.
    pub wrinkle_ratio: f64,
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            pile_limits: MaterialMap::splat(DEFAULT_PILE_LIMIT),
            inactivity_timeout_secs: DEFAULT_TIMEOUT_SECS,
            items_per_visit: DEFAULT_ITEMS_PER_VISIT,
            data_path: PathBuf::from(services_store::DEFAULT_DATA_FILE),
            wrinkle_ratio: DEFAULT_WRINKLE_RATIO,
        }
    }
}

impl KioskConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.machine_config().validate()?;
        if self.inactivity_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if !(0.0..=1.0).contains(&self.wrinkle_ratio) {
            return Err(ConfigError::WrinkleRatio(self.wrinkle_ratio));
        }
        Ok(())
    }

    pub fn machine_config(&self) -> MachineConfig {
        MachineConfig {
            pile_limits: self.pile_limits,
        }
    }

    pub fn inactivity_timeout(&self) -> Duration {
        Duration::from_secs(self.inactivity_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rvm_abi::Material;
    use rvm_core::CoreError;

    #[test]
    fn empty_file_is_defaults() {
        assert_eq!(KioskConfig::from_toml_str("").expect("valid"), KioskConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let config = KioskConfig::from_toml_str(
            r#"
            inactivity_timeout_secs = 5
            items_per_visit = 3
            wrinkle_ratio = 0.0

            [pile_limits]
            aluminium = 3
            glass = 4
            plastic = 5
            "#,
        )
        .expect("valid");
        assert_eq!(config.inactivity_timeout(), Duration::from_secs(5));
        assert_eq!(config.items_per_visit, 3);
        assert_eq!(config.machine_config().pile_limits.glass, 4);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            KioskConfig::from_toml_str("inactivity_timeout_secs = 0"),
            Err(ConfigError::ZeroTimeout)
        ));
        assert!(matches!(
            KioskConfig::from_toml_str("wrinkle_ratio = 1.5"),
            Err(ConfigError::WrinkleRatio(_))
        ));
        assert!(matches!(
            KioskConfig::from_toml_str("[pile_limits]\naluminium = 0\nglass = 1\nplastic = 1"),
            Err(ConfigError::Machine(CoreError::InvalidLimit {
                material: Material::Aluminium
            }))
        ));
        assert!(matches!(
            KioskConfig::from_toml_str("colour = \"green\""),
            Err(ConfigError::Parse(_))
        ));
    }
}
