//! Plain data view of the machine handed to the persistence collaborator.

use serde::{Deserialize, Serialize};

use crate::{FunctionalStatus, MachineStatus, MaterialMap, Money, PowerStatus};

/// Fill state of one pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    /// Pile capacity, always non-zero.
    pub limit: u32,
    /// Current fill level; never exceeds `limit`.
    pub limit_counter: u32,
    /// Items of this material accepted over the machine's lifetime.
    pub lifetime_total: u64,
    /// Items of this material accepted in the open session.
    pub session_count: u32,
}

impl LedgerEntry {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit,
            limit_counter: 0,
            lifetime_total: 0,
            session_count: 0,
        }
    }

    pub fn is_limit_reached(&self) -> bool {
        self.limit_counter >= self.limit
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub total_value: Money,
    pub per_material: MaterialMap<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineSnapshot {
    pub machine_id: String,
    pub status: MachineStatus,
    pub functional: FunctionalStatus,
    pub power: PowerStatus,
    pub ledger: MaterialMap<LedgerEntry>,
    pub session: SessionSnapshot,
}
