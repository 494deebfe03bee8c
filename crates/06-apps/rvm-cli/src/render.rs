//! Text rendering for screens, notices and receipts.

use std::fmt::Write;

use kiosk::{admin_menu, Action, Kiosk, Notice, Screen, Turn};
use rvm_abi::{Charity, DonationRecord, Item, Material, Money, Receipt};
use rvm_core::{ActionOutcome, RejectReason};
use services_accounts::EcoStat;

/// Everything a screen render reads.
pub struct MenuView<'a> {
    pub screen: Screen,
    pub user_name: Option<&'a str>,
    pub session_total: Money,
    pub session_items: u64,
    pub tray_len: usize,
    pub front_item: Option<&'a Item>,
    pub charities: &'a [Charity],
    pub full_pile: &'a str,
}

impl<'a> MenuView<'a> {
    pub fn of(kiosk: &'a Kiosk) -> Self {
        Self {
            screen: kiosk.screen(),
            user_name: kiosk
                .principal()
                .is_registered_recycler()
                .then(|| kiosk.user_name())
                .flatten(),
            session_total: kiosk.session_total(),
            session_items: kiosk.session_items(),
            tray_len: kiosk.tray().len(),
            front_item: kiosk.tray().front(),
            charities: kiosk.charities(),
            full_pile: kiosk.machine().full_pile_name(),
        }
    }
}

pub fn screen(view: &MenuView<'_>) -> String {
    let mut out = String::new();
    match view.screen {
        Screen::Main => {
            writeln!(out, "=== Reverse Vending Machine ===").expect("write header");
            if let Some(name) = view.user_name {
                writeln!(out, "Welcome back, {name}!").expect("write greeting");
            }
            writeln!(
                out,
                "Session value: {} | Items recycled: {} | Items left: {}",
                view.session_total, view.session_items, view.tray_len
            )
            .expect("write session");
            menu(
                &mut out,
                &[
                    "Insert item",
                    "Print receipt",
                    "Donate to charity",
                    "Authenticate",
                    "Quit",
                    "Eco stats",
                ],
            );
        }
        Screen::Admin { full, broken } => {
            writeln!(out, "=== Service Menu ===").expect("write header");
            if full {
                writeln!(out, "Machine full: {} pile", view.full_pile).expect("write pile");
            }
            if broken {
                writeln!(out, "Machine out of service").expect("write status");
            }
            let entries: Vec<&str> = admin_menu(full, broken).iter().map(admin_label).collect();
            menu(&mut out, &entries);
        }
        Screen::Full => {
            writeln!(
                out,
                "!!! Machine Limit Reached: {} pile is full !!!",
                view.full_pile
            )
            .expect("write banner");
            menu(&mut out, &["Authenticate", "Quit"]);
        }
        Screen::Wrinkled => {
            let detail = view
                .front_item
                .map(|front| format!(": {}", item(front)))
                .unwrap_or_default();
            writeln!(out, "Can't insert a wrinkled item{detail}").expect("write item");
            menu(&mut out, &["Straighten item", "Skip item"]);
        }
        Screen::CharityPick => {
            writeln!(out, "Donate {} to:", view.session_total).expect("write header");
            for (idx, charity) in view.charities.iter().enumerate() {
                writeln!(out, "{}. {} - {}", idx + 1, charity.name, charity.cause)
                    .expect("write charity");
            }
        }
        Screen::EcoStatPick => {
            writeln!(out, "Show energy saved by:").expect("write header");
            for (idx, stat) in EcoStat::ALL.iter().enumerate() {
                writeln!(out, "{}. {}", idx + 1, capitalise(stat.label())).expect("write stat");
            }
        }
        Screen::AuthPrompt => {
            writeln!(out, "Enter user id:").expect("write prompt");
        }
    }
    out
}

fn admin_label(action: &Action) -> &'static str {
    match action {
        Action::EmptyPiles => "Empty all piles",
        Action::Repair => "Repair machine",
        _ => "Log out",
    }
}

fn menu(out: &mut String, entries: &[&str]) {
    for (idx, entry) in entries.iter().enumerate() {
        writeln!(out, "{}. {entry}", idx + 1).expect("write menu entry");
    }
}

fn capitalise(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// One-line description of an item.
pub fn item(item: &Item) -> String {
    let material = item.material.map_or("UNKNOWN", Material::name);
    let wrinkled = if item.is_wrinkled() { " (wrinkled)" } else { "" };
    format!("{material} {} ml{wrinkled} worth {}", item.size_ml, item.value)
}

/// Listing of the generated tray shown at start-up.
pub fn tray<'a>(items: impl IntoIterator<Item = &'a Item>) -> String {
    let mut out = String::from("Generated items:\n");
    for (idx, entry) in items.into_iter().enumerate() {
        writeln!(out, "{}. {}", idx + 1, item(entry)).expect("write tray item");
    }
    out
}

pub fn receipt(receipt: &Receipt) -> String {
    let mut out = String::new();
    writeln!(out, "------------ RECEIPT ------------").expect("write header");
    writeln!(out, "Id: {}", receipt.id).expect("write id");
    writeln!(out, "Date: {}", receipt.issued_at.format("%Y-%m-%d %H:%M:%S UTC"))
        .expect("write date");
    for (material, count) in receipt.items.iter() {
        writeln!(out, "{}: {count}", material.container_label()).expect("write count");
    }
    writeln!(out, "Total items: {}", receipt.item_count()).expect("write items");
    writeln!(out, "Total value: {}", receipt.total).expect("write total");
    writeln!(out, "---------------------------------").expect("write footer");
    out
}

pub fn donation(record: &DonationRecord) -> String {
    format!(
        "Donated {} to {}. Thank you!\n",
        record.amount, record.charity.name
    )
}

pub fn notice(notice: &Notice) -> String {
    match notice {
        Notice::ItemAccepted { material, value } => {
            format!("Accepted {material} item worth {value}\n")
        }
        Notice::PileFilled(material) => format!("The {material} pile is now full\n"),
        Notice::TrayEmpty => {
            "You have recycled all of our bottles! Choose receipt or donation.\n".into()
        }
        Notice::Straightened => "Item straightened.\n".into(),
        Notice::Skipped => "Item moved to the back of the tray.\n".into(),
        Notice::ReceiptIssued(r) => receipt(r),
        Notice::DonationMade(record) => donation(record),
        Notice::NothingToProcess => "Nothing to process. Recycle something first.\n".into(),
        Notice::MachineLimitReached => "Machine limit reached; closing your session.\n".into(),
        Notice::Authenticated { user_name, role } => {
            format!("User {user_name} authenticated successfully. Role: {role}\n")
        }
        Notice::AuthFailed => "User authentication failed...\n".into(),
        Notice::LoggedOut => "Logging out...\n".into(),
        Notice::PilesEmptied => "All piles cleared!\n".into(),
        Notice::AlreadyEmpty => "Machine is already empty!\n".into(),
        Notice::Repaired => "Fixing.... Machine is back in service.\n".into(),
        Notice::RepairNotPermitted => "You are not cleared to repair this machine.\n".into(),
        Notice::EnergySaved { stat, kwh } => format!(
            "You have saved {kwh:.4} kWh of energy by recycling {}!\n",
            stat.label()
        ),
        Notice::EcoStatsNeedLogin => "You must be logged in to view eco stats.\n".into(),
        Notice::Goodbye => "Goodbye!\n".into(),
    }
}

pub fn turn(turn: &Turn) -> String {
    match turn {
        ActionOutcome::Executed(notices) => notices.iter().map(notice).collect(),
        ActionOutcome::WokeFromSleep => {
            "Machine woke up from sleep mode. Please choose again.\n".into()
        }
        ActionOutcome::Rejected(RejectReason::Wrinkled) => "Can't insert a wrinkled item.\n".into(),
        ActionOutcome::Rejected(RejectReason::PileFull(material)) => {
            format!("The {material} pile is full.\n")
        }
        ActionOutcome::Rejected(RejectReason::OutOfService) => {
            "Machine is out of service.\n".into()
        }
    }
}
