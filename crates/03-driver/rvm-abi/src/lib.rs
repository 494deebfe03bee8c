//! Shared kiosk types and collaborator traits.
//!
//! This crate defines the boundary between the machine core (layer 04) and the
//! collaborators it talks to: item generation, the charity catalog, user
//! statistics, and persistence. It carries no behaviour beyond small helpers on
//! the data types themselves.

#![allow(missing_docs)]

mod error;
mod material;
mod money;
mod records;
mod snapshot;

pub use error::{CatalogError, ItemError, ParseMoneyError};
pub use material::{Material, MaterialMap};
pub use money::Money;
pub use records::{Charity, DonationRecord, Receipt};
pub use snapshot::{LedgerEntry, MachineSnapshot, SessionSnapshot};

use serde::{Deserialize, Serialize};

/// Condition of an inserted item as reported by the item generator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemStatus {
    /// Item can be read by the intake sensor.
    #[default]
    Normal,
    /// Item is crumpled and will be refused until straightened.
    Wrinkled,
}

/// A recyclable item presented to the machine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Material of the item. `None` only when the upstream generator is broken.
    pub material: Option<Material>,
    pub status: ItemStatus,
    /// Container volume in millilitres.
    pub size_ml: u32,
    /// Redemption value.
    pub value: Money,
}

impl Item {
    /// Creates a normal (unwrinkled) item.
    pub fn new(material: Material, size_ml: u32, value: Money) -> Self {
        Self {
            material: Some(material),
            status: ItemStatus::Normal,
            size_ml,
            value,
        }
    }

    /// Returns a copy of the item with the given status.
    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_wrinkled(&self) -> bool {
        self.status == ItemStatus::Wrinkled
    }

    /// Flattens a wrinkled item so the intake accepts it.
    pub fn straighten(&mut self) {
        self.status = ItemStatus::Normal;
    }
}

/// Session-usability status of the machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MachineStatus {
    #[default]
    NotStarted,
    Active,
    Sleeping,
    Full,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FunctionalStatus {
    #[default]
    Operational,
    Broken,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PowerStatus {
    #[default]
    Off,
    On,
}

/// Who is currently standing in front of the machine.
///
/// The core only ever asks the two capability questions below; identity data
/// stays with the authentication collaborator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Principal {
    #[default]
    Guest,
    Recycler { user_id: String },
    Employee { user_id: String },
}

impl Principal {
    pub fn is_employee(&self) -> bool {
        matches!(self, Principal::Employee { .. })
    }

    pub fn is_registered_recycler(&self) -> bool {
        matches!(self, Principal::Recycler { .. })
    }

    /// Identifier of the authenticated user, if any.
    pub fn user_id(&self) -> Option<&str> {
        match self {
            Principal::Guest => None,
            Principal::Recycler { user_id } | Principal::Employee { user_id } => Some(user_id),
        }
    }
}

/// Produces items for the machine to consume.
pub trait ItemSource {
    fn create_item(&mut self) -> Result<Item, ItemError>;
}

/// Lookup of donation targets by the 1-based index shown to users.
pub trait CharityCatalog {
    fn charities(&self) -> &[Charity];

    fn resolve(&self, index: usize) -> Result<&Charity, CatalogError> {
        let charities = self.charities();
        index
            .checked_sub(1)
            .and_then(|idx| charities.get(idx))
            .ok_or(CatalogError::UnknownIndex {
                index,
                len: charities.len(),
            })
    }
}

/// Receives the per-material counts and value of each closed session.
pub trait SessionStatsSink {
    fn record_session(&mut self, items: &MaterialMap<u32>, total: Money);
}

/// Handle the inactivity timer uses to put the machine to sleep.
///
/// Implementations must only flip `Active` to `Sleeping` and report whether
/// the transition happened.
pub trait SleepSwitch: Send + Sync {
    fn enter_sleep(&self) -> bool;
}
