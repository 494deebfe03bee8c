//! The kiosk context object and its dispatcher.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use inactivity_watchdog::InactivityWatchdog;
use log::{debug, info};
use rvm_abi::{
    Charity, CharityCatalog, FunctionalStatus, Item, ItemSource, MachineSnapshot, MachineStatus, Money, Principal,
    SessionStatsSink,
};
use rvm_core::{
    ActionOutcome, Closing, EmptyOutcome, MachineStateController, RecycleOutcome, RejectReason,
};
use services_accounts::{Directory, EcoStat};
use services_store::{AppData, JsonStore};
use smallvec::{smallvec, SmallVec};

use crate::action::{Action, Notice, Notices, Screen, Turn};
use crate::config::KioskConfig;
use crate::error::{KioskError, KioskResult};

/// Everything one kiosk run needs, owned in one place.
///
/// Input is handled on the calling thread. The watchdog thread only sees the
/// machine status cell.
pub struct Kiosk {
    machine: MachineStateController,
    watchdog: Option<InactivityWatchdog>,
    tray: VecDeque<Item>,
    catalog: Box<dyn CharityCatalog>,
    directory: Directory,
    principal: Principal,
    user_name: Option<String>,
    store: Option<JsonStore>,
    screen: Screen,
    running: bool,
}

impl Kiosk {
    pub fn builder() -> KioskBuilder {
        KioskBuilder::new()
    }

    pub fn machine(&self) -> &MachineStateController {
        &self.machine
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn charities(&self) -> &[Charity] {
        self.catalog.charities()
    }

    pub fn tray(&self) -> &VecDeque<Item> {
        &self.tray
    }

    pub fn session_total(&self) -> Money {
        self.machine.session().total_value()
    }

    pub fn session_items(&self) -> u64 {
        self.machine.session().item_count()
    }

    pub fn is_asleep(&self) -> bool {
        self.machine.status() == MachineStatus::Sleeping
    }

    pub fn watchdog(&self) -> Option<&InactivityWatchdog> {
        self.watchdog.as_ref()
    }

    /// Picks the screen for the next render.
    ///
    /// A full machine with an open session closes it with a receipt first.
    pub fn refresh(&mut self) -> Notices {
        if !self.screen.is_prompt() {
            self.screen = self.menu_screen();
        }
        let mut notices = Notices::new();
        if self.screen == Screen::Full && !self.machine.session().is_empty() {
            notices.push(Notice::MachineLimitReached);
            notices.extend(self.issue_receipt());
        }
        notices
    }

    /// Restarts the inactivity window. Call after every render.
    pub fn touch(&self) {
        if let Some(watchdog) = &self.watchdog {
            watchdog.reset();
        }
    }

    /// Handles one line of user input.
    ///
    /// Input that arrives while the machine sleeps only wakes it. The
    /// inactivity window restarts whatever the result.
    pub fn handle_input(&mut self, input: &str) -> KioskResult<Turn> {
        let result = self.gate(input);
        self.touch();
        result
    }

    fn gate(&mut self, input: &str) -> KioskResult<Turn> {
        let screen = self.screen;
        let parsed = match self.machine.attempt(|_| screen.parse(input)) {
            ActionOutcome::Executed(parsed) => parsed,
            woke => return Ok(woke.map(|_| Notices::new())),
        };
        let result = parsed.and_then(|action| self.dispatch(action));
        if matches!(&result, Err(err) if err.is_recoverable()) {
            // A bad answer to a prompt drops back to the menu; the session is kept.
            self.screen = self.menu_screen();
        }
        result
    }

    fn dispatch(&mut self, action: Action) -> KioskResult<Turn> {
        debug!("dispatch {action:?} on {:?}", self.screen);
        if self.screen == Screen::Main
            && !self.machine.machine_is_usable()
            && !allowed_out_of_service(&action)
        {
            return Ok(ActionOutcome::Rejected(RejectReason::OutOfService));
        }
        let notices = match action {
            Action::Insert => return self.insert(),
            Action::Receipt => self.issue_receipt(),
            Action::Donate => {
                if self.machine.session().is_empty() {
                    smallvec![Notice::NothingToProcess]
                } else {
                    self.screen = Screen::CharityPick;
                    SmallVec::new()
                }
            }
            Action::PickCharity(index) => self.donate(index)?,
            Action::Authenticate => {
                self.screen = Screen::AuthPrompt;
                SmallVec::new()
            }
            Action::SubmitUserId(user_id) => self.authenticate(&user_id),
            Action::Quit => {
                self.running = false;
                self.machine.power_off();
                self.persist();
                smallvec![Notice::Goodbye]
            }
            Action::EcoStats => {
                if self.principal.is_registered_recycler() {
                    self.screen = Screen::EcoStatPick;
                    SmallVec::new()
                } else {
                    smallvec![Notice::EcoStatsNeedLogin]
                }
            }
            Action::PickEcoStat(stat) => self.eco_stat(stat),
            Action::EmptyPiles => {
                let notice = match self.machine.empty_piles() {
                    EmptyOutcome::Emptied => {
                        self.persist();
                        Notice::PilesEmptied
                    }
                    EmptyOutcome::NotFull => Notice::AlreadyEmpty,
                };
                self.screen = self.menu_screen();
                smallvec![notice]
            }
            Action::Repair => {
                let notice = if self.directory.can_repair(&self.principal) {
                    self.machine.mark_repaired();
                    self.persist();
                    Notice::Repaired
                } else {
                    Notice::RepairNotPermitted
                };
                self.screen = self.menu_screen();
                smallvec![notice]
            }
            Action::LogOut => {
                info!("user logged out");
                self.principal = Principal::Guest;
                self.user_name = None;
                self.screen = self.menu_screen();
                smallvec![Notice::LoggedOut]
            }
            Action::Straighten => {
                if let Some(item) = self.tray.front_mut() {
                    item.straighten();
                }
                self.screen = self.menu_screen();
                smallvec![Notice::Straightened]
            }
            Action::Skip => {
                self.tray.rotate_left(1.min(self.tray.len()));
                self.screen = self.menu_screen();
                smallvec![Notice::Skipped]
            }
        };
        Ok(ActionOutcome::Executed(notices))
    }

    fn insert(&mut self) -> KioskResult<Turn> {
        let Some(item) = self.tray.front() else {
            return Ok(ActionOutcome::Executed(smallvec![Notice::TrayEmpty]));
        };
        match self.machine.recycle_item(item)? {
            RecycleOutcome::Accepted {
                material,
                value,
                filled_pile,
            } => {
                self.tray.pop_front();
                let mut notices: Notices = smallvec![Notice::ItemAccepted { material, value }];
                if filled_pile {
                    notices.push(Notice::PileFilled(material));
                }
                Ok(ActionOutcome::Executed(notices))
            }
            RecycleOutcome::Rejected(reason) => {
                if reason == RejectReason::Wrinkled {
                    self.screen = Screen::Wrinkled;
                }
                Ok(ActionOutcome::Rejected(reason))
            }
        }
    }

    fn issue_receipt(&mut self) -> Notices {
        let stats = stats_sink(&mut self.directory, &self.principal);
        let notice = match self.machine.finalizer().close_with_receipt(stats) {
            Closing::Closed(receipt) => Notice::ReceiptIssued(receipt),
            Closing::NothingToProcess => return smallvec![Notice::NothingToProcess],
        };
        self.persist();
        smallvec![notice]
    }

    fn donate(&mut self, index: usize) -> KioskResult<Notices> {
        let stats = stats_sink(&mut self.directory, &self.principal);
        let closing = self
            .machine
            .finalizer()
            .close_with_donation(self.catalog.as_ref(), index, stats)?;
        self.screen = self.menu_screen();
        match closing {
            Closing::Closed(record) => {
                self.persist();
                Ok(smallvec![Notice::DonationMade(record)])
            }
            Closing::NothingToProcess => Ok(smallvec![Notice::NothingToProcess]),
        }
    }

    fn authenticate(&mut self, user_id: &str) -> Notices {
        let notice = match self.directory.authenticate(user_id) {
            Some((record, principal)) => {
                let notice = Notice::Authenticated {
                    user_name: record.user_name.clone(),
                    role: record.role.label(),
                };
                self.user_name = Some(record.user_name.clone());
                self.principal = principal;
                notice
            }
            None => Notice::AuthFailed,
        };
        self.screen = self.menu_screen();
        smallvec![notice]
    }

    fn eco_stat(&mut self, stat: EcoStat) -> Notices {
        self.screen = self.menu_screen();
        let totals = self
            .principal
            .user_id()
            .and_then(|id| self.directory.find(id))
            .and_then(|record| record.recycler_totals());
        match totals {
            Some(totals) => smallvec![Notice::EnergySaved {
                stat,
                kwh: stat.energy_saved_kwh(totals),
            }],
            None => smallvec![Notice::EcoStatsNeedLogin],
        }
    }

    fn menu_screen(&self) -> Screen {
        if self.principal.is_employee() {
            Screen::Admin {
                full: self.machine.is_full(),
                broken: self.machine.functional() == FunctionalStatus::Broken,
            }
        } else if self.machine.is_full() {
            Screen::Full
        } else {
            Screen::Main
        }
    }

    /// Current data file contents.
    pub fn app_data(&self) -> AppData {
        AppData {
            machine: Some(self.machine.snapshot()),
            users: self.directory.users().to_vec(),
        }
    }

    fn persist(&self) {
        if let Some(store) = &self.store {
            store.save_best_effort(&self.app_data());
        }
    }
}

fn allowed_out_of_service(action: &Action) -> bool {
    matches!(action, Action::Authenticate | Action::Quit)
}

fn stats_sink<'a>(
    directory: &'a mut Directory,
    principal: &Principal,
) -> Option<&'a mut dyn SessionStatsSink> {
    directory
        .stats_for(principal)
        .map(|totals| totals as &mut dyn SessionStatsSink)
}

/// Assembles a [`Kiosk`] from its collaborators.
pub struct KioskBuilder {
    config: KioskConfig,
    items: Option<Box<dyn ItemSource>>,
    catalog: Option<Box<dyn CharityCatalog>>,
    directory: Option<Directory>,
    store: Option<JsonStore>,
    snapshot: Option<MachineSnapshot>,
    watchdog: bool,
    timeout: Option<Duration>,
}

impl KioskBuilder {
    pub fn new() -> Self {
        Self {
            config: KioskConfig::default(),
            items: None,
            catalog: None,
            directory: None,
            store: None,
            snapshot: None,
            watchdog: true,
            timeout: None,
        }
    }

    pub fn config(mut self, config: KioskConfig) -> Self {
        self.config = config;
        self
    }

    pub fn items(mut self, source: impl ItemSource + 'static) -> Self {
        self.items = Some(Box::new(source));
        self
    }

    pub fn catalog(mut self, catalog: impl CharityCatalog + 'static) -> Self {
        self.catalog = Some(Box::new(catalog));
        self
    }

    pub fn directory(mut self, directory: Directory) -> Self {
        self.directory = Some(directory);
        self
    }

    /// Persists after each session close and pile emptying.
    pub fn store(mut self, store: JsonStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Resumes a machine from a previous run.
    pub fn snapshot(mut self, snapshot: MachineSnapshot) -> Self {
        self.snapshot = Some(snapshot);
        self
    }

    /// Turns the inactivity watchdog thread on or off.
    pub fn watchdog(mut self, enabled: bool) -> Self {
        self.watchdog = enabled;
        self
    }

    /// Overrides the configured inactivity timeout with a finer-grained one.
    pub fn inactivity_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds and starts the kiosk.
    pub fn build(self) -> Result<Kiosk> {
        self.config.validate()?;
        let mut items = self.items.ok_or_else(|| anyhow!("missing item source"))?;
        let catalog = self
            .catalog
            .ok_or_else(|| anyhow!("missing charity catalog"))?;
        let directory = self
            .directory
            .ok_or_else(|| anyhow!("missing user directory"))?;

        let mut machine = match &self.snapshot {
            Some(snapshot) => MachineStateController::from_snapshot(snapshot)
                .context("restoring machine snapshot")?,
            None => MachineStateController::new(&self.config.machine_config())?,
        };
        machine.start_machine();

        let tray = (0..self.config.items_per_visit)
            .map(|_| items.create_item())
            .collect::<Result<VecDeque<_>, _>>()
            .map_err(KioskError::from)?;
        info!("tray filled with {} items", tray.len());

        let watchdog = if self.watchdog {
            let switch = Arc::new(machine.status_handle());
            let timeout = self
                .timeout
                .unwrap_or_else(|| self.config.inactivity_timeout());
            Some(
                InactivityWatchdog::spawn(timeout, switch)
                    .context("spawning inactivity watchdog")?,
            )
        } else {
            None
        };

        let mut kiosk = Kiosk {
            machine,
            watchdog,
            tray,
            catalog,
            directory,
            principal: Principal::Guest,
            user_name: None,
            store: self.store,
            screen: Screen::Main,
            running: true,
        };
        kiosk.screen = kiosk.menu_screen();
        Ok(kiosk)
    }
}

impl Default for KioskBuilder {
    fn default() -> Self {
        Self::new()
    }
}
