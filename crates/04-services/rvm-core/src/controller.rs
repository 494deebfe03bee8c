//! Machine state machine and item intake.

use log::{debug, info, warn};
use rvm_abi::{
    FunctionalStatus, Item, MachineSnapshot, MachineStatus, Material, Money, PowerStatus,
};
use uuid::Uuid;

use crate::config::MachineConfig;
use crate::error::{CoreError, CoreResult};
use crate::finalizer::TransactionFinalizer;
use crate::ledger::CapacityLedger;
use crate::outcome::{ActionOutcome, EmptyOutcome, RecycleOutcome, RejectReason};
use crate::session::RecyclingSession;
use crate::status::StatusCell;

/// Owns machine status, the capacity ledger and the open session.
///
/// All methods run on the dispatch thread. The only state another thread may
/// touch is the [`StatusCell`] handed out by [`Self::status_handle`].
#[derive(Debug)]
pub struct MachineStateController {
    machine_id: String,
    status: StatusCell,
    functional: FunctionalStatus,
    power: PowerStatus,
    ledger: CapacityLedger,
    session: RecyclingSession,
}

impl MachineStateController {
    /// Creates a powered-off machine with empty piles.
    pub fn new(config: &MachineConfig) -> CoreResult<Self> {
        Ok(Self {
            machine_id: Uuid::new_v4().to_string(),
            status: StatusCell::default(),
            functional: FunctionalStatus::Operational,
            power: PowerStatus::Off,
            ledger: CapacityLedger::new(config)?,
            session: RecyclingSession::new(),
        })
    }

    /// Restores a machine from a persisted snapshot.
    ///
    /// A snapshot taken while asleep comes back awake, and a ledger with a
    /// full pile always comes back `Full`.
    pub fn from_snapshot(snapshot: &MachineSnapshot) -> CoreResult<Self> {
        let ledger = CapacityLedger::from_entries(snapshot.ledger)?;
        let status = match snapshot.status {
            _ if ledger.any_full() => MachineStatus::Full,
            MachineStatus::Sleeping => MachineStatus::Active,
            MachineStatus::Full => MachineStatus::Active,
            other => other,
        };
        Ok(Self {
            machine_id: snapshot.machine_id.clone(),
            status: StatusCell::new(status),
            functional: snapshot.functional,
            power: snapshot.power,
            ledger,
            session: RecyclingSession::from_snapshot(&snapshot.session),
        })
    }

    pub fn snapshot(&self) -> MachineSnapshot {
        MachineSnapshot {
            machine_id: self.machine_id.clone(),
            status: self.status.get(),
            functional: self.functional,
            power: self.power,
            ledger: *self.ledger.entries(),
            session: self.session.snapshot(),
        }
    }

    /// Powers the machine on. A machine with a full pile stays `Full`.
    pub fn start_machine(&mut self) {
        self.power = PowerStatus::On;
        if self.ledger.any_full() {
            self.status.set(MachineStatus::Full);
        } else {
            self.status.set(MachineStatus::Active);
        }
        info!("machine {} started", self.machine_id);
    }

    pub fn machine_id(&self) -> &str {
        &self.machine_id
    }

    pub fn status(&self) -> MachineStatus {
        self.status.get()
    }

    /// Shared status handle for the inactivity timer.
    pub fn status_handle(&self) -> StatusCell {
        self.status.clone()
    }

    pub fn functional(&self) -> FunctionalStatus {
        self.functional
    }

    pub fn power(&self) -> PowerStatus {
        self.power
    }

    pub fn ledger(&self) -> &CapacityLedger {
        &self.ledger
    }

    pub fn session(&self) -> &RecyclingSession {
        &self.session
    }

    /// Operational, powered on and not full.
    pub fn machine_is_usable(&self) -> bool {
        self.functional == FunctionalStatus::Operational
            && self.power == PowerStatus::On
            && self.status.get() != MachineStatus::Full
    }

    pub fn is_full(&self) -> bool {
        self.status.get() == MachineStatus::Full
    }

    /// Runs `action` unless the machine is asleep.
    ///
    /// A sleeping machine is woken and the action is dropped without running.
    pub fn attempt<T>(&mut self, action: impl FnOnce(&mut Self) -> T) -> ActionOutcome<T> {
        if self.wake_if_sleeping() {
            return ActionOutcome::WokeFromSleep;
        }
        ActionOutcome::Executed(action(self))
    }

    fn wake_if_sleeping(&mut self) -> bool {
        let woke = self.status.wake_if_sleeping();
        if woke {
            info!("machine woken by user input; action discarded");
        }
        woke
    }

    /// Offers one item to the intake.
    ///
    /// Returns `Err` only for an item without a material. Refusals are
    /// reported through [`RecycleOutcome::Rejected`].
    pub fn recycle_item(&mut self, item: &Item) -> CoreResult<RecycleOutcome> {
        let material = item.material.ok_or(CoreError::MissingMaterial)?;
        if item.is_wrinkled() {
            debug!("refused wrinkled {material} item");
            return Ok(RecycleOutcome::Rejected(RejectReason::Wrinkled));
        }
        if self.ledger.is_limit_reached(material) {
            self.status.set(MachineStatus::Full);
            return Ok(RecycleOutcome::Rejected(RejectReason::PileFull(material)));
        }
        self.record_recycled(material, item.value)?;
        let filled_pile = self.ledger.is_limit_reached(material);
        if filled_pile {
            info!("{material} pile reached its limit");
            self.status.set(MachineStatus::Full);
        }
        debug!("accepted {material} item worth {}", item.value);
        Ok(RecycleOutcome::Accepted {
            material,
            value: item.value,
            filled_pile,
        })
    }

    /// Counts an accepted item in the ledger and the session together.
    pub fn record_recycled(&mut self, material: Material, value: Money) -> CoreResult<()> {
        self.ledger.record(material)?;
        self.session.add(material, value);
        Ok(())
    }

    /// Clears session counters. Fill levels and lifetime totals are kept.
    pub fn reset_session(&mut self) {
        self.ledger.reset_session_counts();
        self.session.reset();
    }

    pub fn full_pile(&self) -> Option<Material> {
        self.ledger.first_full()
    }

    /// Name of the first full pile, or an empty string.
    pub fn full_pile_name(&self) -> &'static str {
        self.full_pile().map_or("", Material::name)
    }

    /// Empties every pile and reactivates a full machine.
    pub fn empty_piles(&mut self) -> EmptyOutcome {
        if self.status.get() != MachineStatus::Full {
            warn!("empty piles requested while machine is not full");
            return EmptyOutcome::NotFull;
        }
        self.ledger.empty_piles();
        self.status.set(MachineStatus::Active);
        info!("piles emptied");
        EmptyOutcome::Emptied
    }

    /// Returns a broken machine to service. Only a restored snapshot can be broken.
    pub fn mark_repaired(&mut self) {
        info!("machine {} repaired", self.machine_id);
        self.functional = FunctionalStatus::Operational;
    }

    pub fn power_off(&mut self) {
        info!("machine {} powered off", self.machine_id);
        self.power = PowerStatus::Off;
    }

    /// Closes the open session; see [`TransactionFinalizer`].
    pub fn finalizer(&mut self) -> TransactionFinalizer<'_> {
        TransactionFinalizer::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rvm_abi::ItemStatus;

    fn started(limit: u32) -> MachineStateController {
        let mut machine =
            MachineStateController::new(&MachineConfig::uniform(limit)).expect("valid config");
        machine.start_machine();
        machine
    }

    fn can() -> Item {
        Item::new(Material::Aluminium, 330, Money::from_cents(15))
    }

    #[test]
    fn new_machine_is_not_started() {
        let machine = MachineStateController::new(&MachineConfig::default()).expect("valid");
        assert_eq!(machine.status(), MachineStatus::NotStarted);
        assert!(!machine.machine_is_usable());
    }

    #[test]
    fn start_powers_on_and_activates() {
        let machine = started(3);
        assert_eq!(machine.status(), MachineStatus::Active);
        assert_eq!(machine.power(), PowerStatus::On);
        assert!(machine.machine_is_usable());
    }

    #[test]
    fn missing_material_is_an_error() {
        let mut machine = started(3);
        let mut item = can();
        item.material = None;
        assert_eq!(machine.recycle_item(&item), Err(CoreError::MissingMaterial));
        assert!(machine.session().is_empty());
    }

    #[test]
    fn wrinkled_is_refused_without_mutation() {
        let mut machine = started(3);
        let before = machine.snapshot();
        let outcome = machine
            .recycle_item(&can().with_status(ItemStatus::Wrinkled))
            .expect("material present");
        assert_eq!(outcome, RecycleOutcome::Rejected(RejectReason::Wrinkled));
        assert_eq!(machine.snapshot(), before);
    }

    #[test]
    fn filling_a_pile_sets_full() {
        let mut machine = started(2);
        assert!(machine.recycle_item(&can()).expect("ok").is_accepted());
        assert_eq!(machine.status(), MachineStatus::Active);
        let outcome = machine.recycle_item(&can()).expect("ok");
        assert!(matches!(
            outcome,
            RecycleOutcome::Accepted {
                filled_pile: true,
                ..
            }
        ));
        assert!(machine.is_full());
        assert!(!machine.machine_is_usable());
        assert_eq!(machine.full_pile_name(), "ALUMINIUM");
    }

    #[test]
    fn empty_piles_requires_full() {
        let mut machine = started(2);
        assert_eq!(machine.empty_piles(), EmptyOutcome::NotFull);
        assert_eq!(machine.status(), MachineStatus::Active);
    }

    #[test]
    fn attempt_wakes_and_discards() {
        let mut machine = started(3);
        machine.status_handle().set(MachineStatus::Sleeping);
        let mut ran = false;
        let outcome = machine.attempt(|_| ran = true);
        assert_eq!(outcome, ActionOutcome::WokeFromSleep);
        assert!(!ran);
        assert_eq!(machine.status(), MachineStatus::Active);
        assert_eq!(machine.attempt(|_| 7), ActionOutcome::Executed(7));
    }

    #[test]
    fn broken_machine_is_not_usable() {
        let mut snapshot = started(3).snapshot();
        snapshot.functional = FunctionalStatus::Broken;
        let mut machine = MachineStateController::from_snapshot(&snapshot).expect("valid");
        machine.start_machine();
        assert!(!machine.machine_is_usable());
        machine.mark_repaired();
        assert!(machine.machine_is_usable());
        machine.power_off();
        assert!(!machine.machine_is_usable());
    }

    #[test]
    fn snapshot_restores_full_from_ledger() {
        let mut machine = started(1);
        machine.recycle_item(&can()).expect("ok");
        let mut snapshot = machine.snapshot();
        snapshot.status = MachineStatus::Active;
        let restored = MachineStateController::from_snapshot(&snapshot).expect("valid");
        assert_eq!(restored.status(), MachineStatus::Full);
        assert_eq!(restored.machine_id(), machine.machine_id());
        assert_eq!(restored.session().total_value(), Money::from_cents(15));
    }

    #[test]
    fn snapshot_taken_asleep_restores_awake() {
        let machine = started(3);
        let mut snapshot = machine.snapshot();
        snapshot.status = MachineStatus::Sleeping;
        let restored = MachineStateController::from_snapshot(&snapshot).expect("valid");
        assert_eq!(restored.status(), MachineStatus::Active);
    }
}
