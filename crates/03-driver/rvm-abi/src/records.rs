use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{MaterialMap, Money};

/// Donation target offered at session close.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Charity {
    pub name: String,
    pub cause: String,
}

impl Charity {
    pub fn new(name: impl Into<String>, cause: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cause: cause.into(),
        }
    }
}

/// Immutable record of a session closed with a printed receipt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub id: String,
    pub issued_at: DateTime<Utc>,
    pub items: MaterialMap<u32>,
    pub total: Money,
}

impl Receipt {
    pub fn item_count(&self) -> u64 {
        self.items.total()
    }
}

/// Immutable record of a session closed with a donation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationRecord {
    pub id: String,
    pub donated_at: DateTime<Utc>,
    pub charity: Charity,
    pub items: MaterialMap<u32>,
    pub amount: Money,
}
