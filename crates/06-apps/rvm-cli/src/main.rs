//! Interactive console for the reverse-vending kiosk.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use kiosk::{Kiosk, KioskConfig};
use log::info;
use services_accounts::Directory;
use services_charity::StaticCatalog;
use services_items::ItemGenerator;
use services_store::JsonStore;

mod render;

/// Run a simulated reverse-vending machine on the terminal.
#[derive(Parser, Debug)]
#[command(author, version, about = "Reverse-vending kiosk console", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// JSON data file holding machine state and users.
    #[arg(short, long, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Seconds of inactivity before the machine sleeps.
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<u64>,

    /// Number of items placed in the tray.
    #[arg(long, value_name = "COUNT")]
    items: Option<usize>,

    /// Share of items that come out wrinkled (0..=1).
    #[arg(long, value_name = "RATIO")]
    wrinkle_ratio: Option<f64>,

    /// Seed for reproducible item generation.
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    /// Config file values with command-line overrides applied.
    fn resolve_config(&self) -> Result<KioskConfig> {
        let mut config = match &self.config {
            Some(path) => KioskConfig::load(path)?,
            None => KioskConfig::default(),
        };
        if let Some(data) = &self.data {
            config.data_path = data.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.inactivity_timeout_secs = secs;
        }
        if let Some(items) = self.items {
            config.items_per_visit = items;
        }
        if let Some(ratio) = self.wrinkle_ratio {
            config.wrinkle_ratio = ratio;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    let store = JsonStore::new(&config.data_path);
    let data = store
        .load()
        .with_context(|| format!("loading {}", config.data_path.display()))?;
    let directory = if data.users.is_empty() {
        Directory::with_demo_users()
    } else {
        Directory::new(data.users)
    };
    let items = match cli.seed {
        Some(seed) => ItemGenerator::seeded(seed, config.wrinkle_ratio),
        None => ItemGenerator::new(config.wrinkle_ratio),
    };

    let mut builder = Kiosk::builder()
        .config(config)
        .items(items)
        .catalog(StaticCatalog::default())
        .directory(directory)
        .store(store);
    if let Some(snapshot) = data.machine {
        builder = builder.snapshot(snapshot);
    }
    let mut kiosk = builder.build()?;
    info!("kiosk {} ready", kiosk.machine().machine_id());

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write!(out, "{}", render::tray(kiosk.tray()))?;
    run(&mut kiosk, stdin.lock(), &mut out)
}

/// Drives the kiosk until the user quits or input ends.
fn run(kiosk: &mut Kiosk, input: impl BufRead, out: &mut impl Write) -> Result<()> {
    let mut lines = input.lines();
    while kiosk.is_running() {
        for notice in kiosk.refresh() {
            write!(out, "{}", render::notice(&notice))?;
        }
        write!(out, "\n{}=> ", render::screen(&render::MenuView::of(kiosk)))?;
        out.flush()?;
        kiosk.touch();

        let Some(line) = lines.next() else {
            break;
        };
        match kiosk.handle_input(&line?) {
            Ok(turn) => write!(out, "{}", render::turn(&turn))?,
            Err(err) if err.is_recoverable() => {
                writeln!(out, "Error notified: {err}\nPlease try again.")?
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}
