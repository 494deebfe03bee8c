use std::thread;
use std::time::{Duration, Instant};

use kiosk::{Kiosk, Notice};
use pretty_assertions::assert_eq;
use rvm_abi::MachineStatus;
use rvm_core::ActionOutcome;

use crate::support::{builder, press};

const TIMEOUT: Duration = Duration::from_millis(50);

fn wait_for_sleep(kiosk: &Kiosk, within: Duration) -> bool {
    let deadline = Instant::now() + within;
    while Instant::now() < deadline {
        if kiosk.is_asleep() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    kiosk.is_asleep()
}

#[test]
fn idle_kiosk_falls_asleep_and_first_input_only_wakes() {
    let mut kiosk = builder(10, 3, 7)
        .inactivity_timeout(TIMEOUT)
        .build()
        .expect("kiosk");
    kiosk.touch();
    assert!(wait_for_sleep(&kiosk, Duration::from_secs(2)));
    assert_eq!(kiosk.machine().status(), MachineStatus::Sleeping);
    assert_eq!(kiosk.watchdog().map(|w| w.fire_count()), Some(1));

    let turn = kiosk.handle_input("1").expect("wake");
    assert_eq!(turn, ActionOutcome::WokeFromSleep);
    assert_eq!(kiosk.tray().len(), 3);
    assert_eq!(kiosk.machine().status(), MachineStatus::Active);

    let notices = press(&mut kiosk, "1");
    assert!(matches!(notices[0], Notice::ItemAccepted { .. }));
    assert_eq!(kiosk.tray().len(), 2);
    assert_eq!(kiosk.session_items(), 1);
}

#[test]
fn garbage_input_while_asleep_is_not_an_error() {
    let mut kiosk = builder(10, 1, 3)
        .inactivity_timeout(TIMEOUT)
        .build()
        .expect("kiosk");
    kiosk.touch();
    assert!(wait_for_sleep(&kiosk, Duration::from_secs(2)));

    let turn = kiosk.handle_input("not a number").expect("wake");
    assert_eq!(turn, ActionOutcome::WokeFromSleep);
    assert!(kiosk.handle_input("not a number").is_err());
}

#[test]
fn steady_activity_keeps_kiosk_awake() {
    let mut kiosk = builder(10, 0, 1)
        .inactivity_timeout(Duration::from_millis(120))
        .build()
        .expect("kiosk");
    let started = Instant::now();
    while started.elapsed() < Duration::from_millis(300) {
        kiosk.touch();
        thread::sleep(Duration::from_millis(15));
    }
    assert!(!kiosk.is_asleep());
    assert_eq!(kiosk.watchdog().map(|w| w.fire_count()), Some(0));

    let notices = press(&mut kiosk, "1");
    assert_eq!(notices, vec![Notice::TrayEmpty]);
}

#[test]
fn full_machine_is_not_put_to_sleep() {
    let mut kiosk = builder(1, 1, 11)
        .inactivity_timeout(TIMEOUT)
        .build()
        .expect("kiosk");
    press(&mut kiosk, "1");
    assert!(kiosk.machine().is_full());
    thread::sleep(TIMEOUT * 4);
    assert_eq!(kiosk.machine().status(), MachineStatus::Full);
}
