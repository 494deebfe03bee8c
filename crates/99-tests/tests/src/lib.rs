//! End-to-end suite for the kiosk stack.

#[cfg(test)]
mod idle_e2e;

#[cfg(test)]
mod restart_e2e;

#[cfg(test)]
pub(crate) mod support {
    use kiosk::{Kiosk, KioskBuilder, KioskConfig, Notice, Turn};
    use rvm_abi::MaterialMap;
    use rvm_core::ActionOutcome;
    use services_accounts::Directory;
    use services_charity::StaticCatalog;
    use services_items::ItemGenerator;

    pub fn config(limit: u32, items: usize) -> KioskConfig {
        KioskConfig {
            pile_limits: MaterialMap::splat(limit),
            items_per_visit: items,
            wrinkle_ratio: 0.0,
            ..KioskConfig::default()
        }
    }

    /// Builder wired with the production collaborators and no wrinkled items.
    pub fn builder(limit: u32, items: usize, seed: u64) -> KioskBuilder {
        let _ = env_logger::builder().is_test(true).try_init();
        Kiosk::builder()
            .config(config(limit, items))
            .items(ItemGenerator::seeded(seed, 0.0))
            .catalog(StaticCatalog::default())
            .directory(Directory::with_demo_users())
    }

    pub fn executed(turn: Turn) -> Vec<Notice> {
        match turn {
            ActionOutcome::Executed(notices) => notices.into_vec(),
            other => panic!("expected an executed action, got {other:?}"),
        }
    }

    /// Feeds one line and expects it to run.
    pub fn press(kiosk: &mut Kiosk, input: &str) -> Vec<Notice> {
        kiosk.refresh();
        executed(kiosk.handle_input(input).expect("input accepted"))
    }
}
