//! Timing behaviour of the inactivity watchdog against a fake switch.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use inactivity_watchdog::InactivityWatchdog;
use parking_lot::Mutex;
use rvm_abi::SleepSwitch;

#[derive(Default)]
struct FakeSwitch {
    active: Mutex<bool>,
    sleeps: Mutex<u32>,
}

impl FakeSwitch {
    fn active() -> Arc<Self> {
        let _ = env_logger::builder().is_test(true).try_init();
        Arc::new(Self {
            active: Mutex::new(true),
            sleeps: Mutex::new(0),
        })
    }

    fn wake(&self) {
        *self.active.lock() = true;
    }

    fn sleeps(&self) -> u32 {
        *self.sleeps.lock()
    }
}

impl SleepSwitch for FakeSwitch {
    fn enter_sleep(&self) -> bool {
        let mut active = self.active.lock();
        if *active {
            *active = false;
            *self.sleeps.lock() += 1;
            true
        } else {
            false
        }
    }
}

const TIMEOUT: Duration = Duration::from_millis(60);

#[test]
fn fires_once_without_activity() {
    let switch = FakeSwitch::active();
    let watchdog = InactivityWatchdog::spawn(TIMEOUT, switch.clone()).unwrap();
    thread::sleep(TIMEOUT * 5);
    assert_eq!(switch.sleeps(), 1);
    assert_eq!(watchdog.fire_count(), 1);
}

#[test]
fn resets_hold_off_the_fire() {
    let switch = FakeSwitch::active();
    let watchdog = InactivityWatchdog::spawn(TIMEOUT, switch.clone()).unwrap();
    for _ in 0..10 {
        thread::sleep(TIMEOUT / 4);
        watchdog.reset();
    }
    assert_eq!(switch.sleeps(), 0);
    assert_eq!(watchdog.fire_count(), 0);
}

#[test]
fn reset_after_fire_rearms() {
    let switch = FakeSwitch::active();
    let watchdog = InactivityWatchdog::spawn(TIMEOUT, switch.clone()).unwrap();
    thread::sleep(TIMEOUT * 3);
    assert_eq!(switch.sleeps(), 1);

    switch.wake();
    watchdog.reset();
    thread::sleep(TIMEOUT * 3);
    assert_eq!(switch.sleeps(), 2);
    assert_eq!(watchdog.fire_count(), 2);
}

#[test]
fn drop_joins_the_thread_before_firing() {
    let switch = FakeSwitch::active();
    let watchdog = InactivityWatchdog::spawn(Duration::from_secs(10), switch.clone()).unwrap();
    assert_eq!(watchdog.timeout(), Duration::from_secs(10));
    drop(watchdog);
    assert_eq!(switch.sleeps(), 0);
    assert_eq!(Arc::strong_count(&switch), 1);
}
