use kiosk::{Notice, Screen};
use pretty_assertions::assert_eq;
use rvm_abi::{Material, MachineStatus, Principal};
use services_accounts::Directory;
use services_store::JsonStore;
use tempfile::tempdir;

use crate::support::{builder, press};

#[test]
fn recycler_session_survives_restart() {
    let dir = tempdir().expect("tempdir");
    let store = JsonStore::new(dir.path().join("appData.json"));

    let mut kiosk = builder(10, 2, 42)
        .watchdog(false)
        .store(store.clone())
        .build()
        .expect("kiosk");
    let machine_id = kiosk.machine().machine_id().to_owned();

    press(&mut kiosk, "4");
    assert_eq!(kiosk.screen(), Screen::AuthPrompt);
    let notices = press(&mut kiosk, "R-1001");
    assert!(matches!(notices[0], Notice::Authenticated { .. }));
    assert!(kiosk.principal().is_registered_recycler());

    press(&mut kiosk, "1");
    press(&mut kiosk, "1");
    let value = kiosk.session_total();
    let notices = press(&mut kiosk, "2");
    let Notice::ReceiptIssued(receipt) = &notices[0] else {
        panic!("expected a receipt, got {notices:?}");
    };
    assert_eq!(receipt.total, value);
    assert_eq!(receipt.item_count(), 2);
    assert_eq!(press(&mut kiosk, "5"), vec![Notice::Goodbye]);
    assert!(!kiosk.is_running());

    let data = store.load().expect("load");
    let snapshot = data.machine.clone().expect("machine saved");
    assert_eq!(snapshot.machine_id, machine_id);
    let lifetime: u64 = Material::ALL
        .into_iter()
        .map(|m| snapshot.ledger[m].lifetime_total)
        .sum();
    assert_eq!(lifetime, 2);

    let directory = Directory::new(data.users);
    let riley = directory.find("R-1001").expect("riley");
    let totals = riley.recycler_totals().expect("recycler");
    assert_eq!(totals.total_items, 2);
    assert_eq!(totals.total_value, value);

    let resumed = builder(10, 0, 1)
        .watchdog(false)
        .directory(directory)
        .snapshot(snapshot)
        .build()
        .expect("resume");
    assert_eq!(resumed.machine().machine_id(), machine_id);
    assert_eq!(resumed.machine().status(), MachineStatus::Active);
    assert!(resumed.machine().session().is_empty());
    assert_eq!(resumed.principal(), &Principal::Guest);
}

#[test]
fn full_machine_stays_full_until_serviced() {
    let dir = tempdir().expect("tempdir");
    let store = JsonStore::new(dir.path().join("appData.json"));

    let mut kiosk = builder(1, 1, 5)
        .watchdog(false)
        .store(store.clone())
        .build()
        .expect("kiosk");
    press(&mut kiosk, "1");
    let notices = kiosk.refresh();
    assert_eq!(notices[0], Notice::MachineLimitReached);
    assert!(matches!(notices[1], Notice::ReceiptIssued(_)));
    assert_eq!(kiosk.screen(), Screen::Full);
    press(&mut kiosk, "2");

    let data = store.load().expect("load");
    let mut kiosk = builder(1, 0, 5)
        .watchdog(false)
        .store(store.clone())
        .snapshot(data.machine.expect("machine saved"))
        .build()
        .expect("resume");
    assert_eq!(kiosk.machine().status(), MachineStatus::Full);
    kiosk.refresh();
    assert_eq!(kiosk.screen(), Screen::Full);

    press(&mut kiosk, "1");
    press(&mut kiosk, "E-2001");
    assert_eq!(
        kiosk.screen(),
        Screen::Admin {
            full: true,
            broken: false
        }
    );
    assert_eq!(press(&mut kiosk, "1"), vec![Notice::PilesEmptied]);
    assert_eq!(kiosk.machine().status(), MachineStatus::Active);

    let data = store.load().expect("reload");
    let snapshot = data.machine.expect("machine saved");
    assert!(Material::ALL
        .into_iter()
        .all(|m| snapshot.ledger[m].limit_counter == 0));
}
