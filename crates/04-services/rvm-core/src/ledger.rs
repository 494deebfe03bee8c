//! Per-material pile capacity and counters.

use rvm_abi::{LedgerEntry, Material, MaterialMap};

use crate::config::MachineConfig;
use crate::error::{CoreError, CoreResult};

/// Fill levels and counters for every pile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapacityLedger {
    entries: MaterialMap<LedgerEntry>,
}

impl CapacityLedger {
    pub fn new(config: &MachineConfig) -> CoreResult<Self> {
        config.validate()?;
        Ok(Self {
            entries: config.pile_limits.map(|&limit| LedgerEntry::with_limit(limit)),
        })
    }

    /// Rebuilds a ledger from persisted entries, clamping counters back inside
    /// their invariants.
    pub fn from_entries(mut entries: MaterialMap<LedgerEntry>) -> CoreResult<Self> {
        for (material, entry) in entries.iter() {
            if entry.limit == 0 {
                return Err(CoreError::InvalidLimit { material });
            }
        }
        for entry in entries.iter_mut() {
            entry.limit_counter = entry.limit_counter.min(entry.limit);
            entry.session_count = entry.session_count.min(entry.limit_counter);
        }
        Ok(Self { entries })
    }

    pub fn entry(&self, material: Material) -> &LedgerEntry {
        &self.entries[material]
    }

    pub fn entries(&self) -> &MaterialMap<LedgerEntry> {
        &self.entries
    }

    pub fn is_limit_reached(&self, material: Material) -> bool {
        self.entries[material].is_limit_reached()
    }

    /// First full pile in [`Material::ALL`] order.
    pub fn first_full(&self) -> Option<Material> {
        Material::ALL
            .into_iter()
            .find(|&m| self.is_limit_reached(m))
    }

    pub fn any_full(&self) -> bool {
        self.first_full().is_some()
    }

    /// Counts one accepted item against `material`.
    ///
    /// Fails without touching any counter if the pile is already full.
    pub fn record(&mut self, material: Material) -> CoreResult<()> {
        let entry = &mut self.entries[material];
        if entry.is_limit_reached() {
            return Err(CoreError::PileFull(material));
        }
        entry.limit_counter += 1;
        entry.session_count += 1;
        entry.lifetime_total = entry.lifetime_total.saturating_add(1);
        Ok(())
    }

    pub fn session_counts(&self) -> MaterialMap<u32> {
        self.entries.map(|e| e.session_count)
    }

    pub fn reset_session_counts(&mut self) {
        for entry in self.entries.iter_mut() {
            entry.session_count = 0;
        }
    }

    /// Empties every pile. Lifetime totals are untouched; `session_count` is
    /// zeroed with the fill level so it never exceeds `limit_counter`.
    ///
    /// Receipts count from [`RecyclingSession`](crate::session::RecyclingSession),
    /// so an open session still reports the items it took before the emptying.
    pub fn empty_piles(&mut self) {
        for entry in self.entries.iter_mut() {
            entry.limit_counter = 0;
            entry.session_count = 0;
        }
    }
}
