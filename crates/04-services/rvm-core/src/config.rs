use rvm_abi::{Material, MaterialMap};

use crate::error::CoreError;

/// Default capacity of each pile.
pub const DEFAULT_PILE_LIMIT: u32 = 50;

/// Static parameters of one machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MachineConfig {
    /// Capacity of each material pile.
    pub pile_limits: MaterialMap<u32>,
}

impl MachineConfig {
    /// Uses the same capacity for every pile.
    pub fn uniform(limit: u32) -> Self {
        Self {
            pile_limits: MaterialMap::splat(limit),
        }
    }

    /// Rejects zero-capacity piles.
    pub fn validate(&self) -> Result<(), CoreError> {
        match Material::ALL
            .into_iter()
            .find(|&m| self.pile_limits[m] == 0)
        {
            Some(material) => Err(CoreError::InvalidLimit { material }),
            None => Ok(()),
        }
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self::uniform(DEFAULT_PILE_LIMIT)
    }
}
