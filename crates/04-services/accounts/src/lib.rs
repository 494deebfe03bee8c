//! User directory, roles and lifetime recycling statistics.
//!
//! Users are looked up by the id printed on their card. The role decides which
//! capabilities the kiosk grants: employees reach the service menu, registered
//! recyclers accumulate lifetime totals and can view eco stats, and guests get
//! neither.

#![allow(missing_docs)]

mod eco;

pub use eco::{EcoStat, KWH_PER_MJ};

use log::{debug, info};
use rvm_abi::{Material, MaterialMap, Money, Principal, SessionStatsSink};
use serde::{Deserialize, Serialize};

/// Id of the record every unauthenticated visitor maps to.
pub const GUEST_USER_ID: &str = "Guest";

/// Lifetime totals of a registered recycler.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecyclerTotals {
    #[serde(rename = "totalAluminiumCansRecycled")]
    pub aluminium_cans: u64,
    #[serde(rename = "totalGlassBottlesRecycled")]
    pub glass_bottles: u64,
    #[serde(rename = "totalPlasticBottlesRecycled")]
    pub plastic_bottles: u64,
    #[serde(rename = "totalItemsRecycled")]
    pub total_items: u64,
    #[serde(rename = "totalValueRecycled")]
    pub total_value: Money,
}

impl RecyclerTotals {
    pub fn count(&self, material: Material) -> u64 {
        match material {
            Material::Aluminium => self.aluminium_cans,
            Material::Glass => self.glass_bottles,
            Material::Plastic => self.plastic_bottles,
        }
    }

    fn count_mut(&mut self, material: Material) -> &mut u64 {
        match material {
            Material::Aluminium => &mut self.aluminium_cans,
            Material::Glass => &mut self.glass_bottles,
            Material::Plastic => &mut self.plastic_bottles,
        }
    }
}

impl SessionStatsSink for RecyclerTotals {
    fn record_session(&mut self, items: &MaterialMap<u32>, total: Money) {
        for (material, &n) in items.iter() {
            let count = self.count_mut(material);
            *count = count.saturating_add(u64::from(n));
        }
        self.total_items = Material::ALL.into_iter().map(|m| self.count(m)).sum();
        self.total_value += total;
    }
}

/// Closed set of user roles, tagged by `userRole` in the data file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "userRole", rename_all = "lowercase")]
pub enum Role {
    Guest,
    Recycler(RecyclerTotals),
    #[serde(rename = "admin")]
    Employee {
        #[serde(rename = "canRepairRvm", default)]
        can_repair_rvm: bool,
    },
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Guest => "guest",
            Role::Recycler(_) => "recycler",
            Role::Employee { .. } => "admin",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub user_id: String,
    pub user_name: String,
    #[serde(flatten)]
    pub role: Role,
}

impl UserRecord {
    pub fn principal(&self) -> Principal {
        match self.role {
            Role::Guest => Principal::Guest,
            Role::Recycler(_) => Principal::Recycler {
                user_id: self.user_id.clone(),
            },
            Role::Employee { .. } => Principal::Employee {
                user_id: self.user_id.clone(),
            },
        }
    }

    pub fn recycler_totals(&self) -> Option<&RecyclerTotals> {
        match &self.role {
            Role::Recycler(totals) => Some(totals),
            _ => None,
        }
    }
}

/// In-memory user table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Directory {
    users: Vec<UserRecord>,
}

impl Directory {
    pub fn new(users: Vec<UserRecord>) -> Self {
        Self { users }
    }

    /// Table used when no data file exists yet.
    pub fn with_demo_users() -> Self {
        Self::new(vec![
            UserRecord {
                user_id: GUEST_USER_ID.into(),
                user_name: "Guest".into(),
                role: Role::Guest,
            },
            UserRecord {
                user_id: "R-1001".into(),
                user_name: "Riley".into(),
                role: Role::Recycler(RecyclerTotals::default()),
            },
            UserRecord {
                user_id: "E-2001".into(),
                user_name: "Service".into(),
                role: Role::Employee {
                    can_repair_rvm: true,
                },
            },
            UserRecord {
                user_id: "E-2002".into(),
                user_name: "Trainee".into(),
                role: Role::Employee {
                    can_repair_rvm: false,
                },
            },
        ])
    }

    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    pub fn find(&self, user_id: &str) -> Option<&UserRecord> {
        self.users.iter().find(|u| u.user_id == user_id)
    }

    /// Resolves a card id to the record and the principal it grants.
    pub fn authenticate(&self, user_id: &str) -> Option<(&UserRecord, Principal)> {
        match self.find(user_id) {
            Some(record) => {
                info!("user {} authenticated as {}", record.user_id, record.role.label());
                Some((record, record.principal()))
            }
            None => {
                debug!("unknown user id {user_id:?}");
                None
            }
        }
    }

    /// Whether `principal` is an employee cleared to repair the machine.
    pub fn can_repair(&self, principal: &Principal) -> bool {
        principal
            .user_id()
            .and_then(|id| self.find(id))
            .is_some_and(|record| {
                matches!(
                    record.role,
                    Role::Employee {
                        can_repair_rvm: true
                    }
                )
            })
    }

    /// Statistics sink for the recycler behind `principal`, if any.
    pub fn stats_for(&mut self, principal: &Principal) -> Option<&mut RecyclerTotals> {
        if !principal.is_registered_recycler() {
            return None;
        }
        let user_id = principal.user_id()?;
        self.users
            .iter_mut()
            .find(|u| u.user_id == user_id)
            .and_then(|u| match &mut u.role {
                Role::Recycler(totals) => Some(totals),
                _ => None,
            })
    }
}
