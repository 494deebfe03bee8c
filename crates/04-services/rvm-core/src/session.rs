//! Value accumulated during one visit.

use rvm_abi::{Material, MaterialMap, Money, SessionSnapshot};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecyclingSession {
    total_value: Money,
    per_material: MaterialMap<u32>,
}

impl RecyclingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        Self {
            total_value: snapshot.total_value,
            per_material: snapshot.per_material,
        }
    }

    pub fn add(&mut self, material: Material, value: Money) {
        self.per_material[material] += 1;
        self.total_value += value;
    }

    pub fn total_value(&self) -> Money {
        self.total_value
    }

    pub fn per_material(&self) -> &MaterialMap<u32> {
        &self.per_material
    }

    pub fn item_count(&self) -> u64 {
        self.per_material.total()
    }

    /// True when there is nothing to put on a receipt.
    pub fn is_empty(&self) -> bool {
        self.total_value.is_zero()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            total_value: self.total_value,
            per_material: self.per_material,
        }
    }
}
