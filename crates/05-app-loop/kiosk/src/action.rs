//! Screens, the actions each screen accepts, and the notices actions produce.

use rvm_abi::{DonationRecord, Material, Money, Receipt};
use rvm_core::ActionOutcome;
use services_accounts::EcoStat;
use smallvec::SmallVec;

use crate::error::KioskError;

/// What the kiosk is currently asking the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    /// Guest or recycler menu.
    Main,
    /// Service menu; `full` adds the empty-piles entry, `broken` the repair entry.
    Admin { full: bool, broken: bool },
    /// Machine is full and no employee is logged in.
    Full,
    /// Front item is wrinkled: straighten or skip.
    Wrinkled,
    CharityPick,
    EcoStatPick,
    AuthPrompt,
}

impl Screen {
    /// Sub-screens are answered once and then fall back to a menu.
    pub fn is_prompt(self) -> bool {
        matches!(
            self,
            Screen::Wrinkled | Screen::CharityPick | Screen::EcoStatPick | Screen::AuthPrompt
        )
    }

    /// Maps one line of input to an action valid on this screen.
    pub fn parse(self, input: &str) -> Result<Action, KioskError> {
        let input = input.trim();
        if self == Screen::AuthPrompt {
            return if input.is_empty() {
                Err(KioskError::EmptyUserId)
            } else {
                Ok(Action::SubmitUserId(input.to_owned()))
            };
        }
        let choice: u32 = input.parse().map_err(|_| KioskError::invalid(input))?;
        let action = match (self, choice) {
            (Screen::Main, 1) => Action::Insert,
            (Screen::Main, 2) => Action::Receipt,
            (Screen::Main, 3) => Action::Donate,
            (Screen::Main, 4) => Action::Authenticate,
            (Screen::Main, 5) => Action::Quit,
            (Screen::Main, 6) => Action::EcoStats,
            (Screen::Admin { full, broken }, n) => admin_menu(full, broken)
                .into_iter()
                .nth((n as usize).wrapping_sub(1))
                .ok_or_else(|| KioskError::invalid(input))?,
            (Screen::Full, 1) => Action::Authenticate,
            (Screen::Full, 2) => Action::Quit,
            (Screen::Wrinkled, 1) => Action::Straighten,
            (Screen::Wrinkled, 2) => Action::Skip,
            (Screen::CharityPick, n) => Action::PickCharity(n as usize),
            (Screen::EcoStatPick, n) => {
                Action::PickEcoStat(EcoStat::from_choice(n).ok_or_else(|| KioskError::invalid(input))?)
            }
            _ => return Err(KioskError::invalid(input)),
        };
        Ok(action)
    }
}

/// A user request after parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Insert,
    Receipt,
    Donate,
    Authenticate,
    Quit,
    EcoStats,
    EmptyPiles,
    Repair,
    LogOut,
    Straighten,
    Skip,
    /// 1-based charity number.
    PickCharity(usize),
    PickEcoStat(EcoStat),
    SubmitUserId(String),
}

/// Something the front end should tell the user.
#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
    ItemAccepted { material: Material, value: Money },
    PileFilled(Material),
    TrayEmpty,
    Straightened,
    Skipped,
    ReceiptIssued(Receipt),
    DonationMade(DonationRecord),
    NothingToProcess,
    /// Full machine closed the open session on its own.
    MachineLimitReached,
    Authenticated { user_name: String, role: &'static str },
    AuthFailed,
    LoggedOut,
    PilesEmptied,
    AlreadyEmpty,
    Repaired,
    RepairNotPermitted,
    EnergySaved { stat: EcoStat, kwh: f64 },
    EcoStatsNeedLogin,
    Goodbye,
}

pub type Notices = SmallVec<[Notice; 4]>;

/// Service menu entries in display order.
pub fn admin_menu(full: bool, broken: bool) -> SmallVec<[Action; 3]> {
    let mut entries = SmallVec::new();
    if full {
        entries.push(Action::EmptyPiles);
    }
    if broken {
        entries.push(Action::Repair);
    }
    entries.push(Action::LogOut);
    entries
}

/// Result of one line of input.
pub type Turn = ActionOutcome<Notices>;
