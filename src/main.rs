#![deny(unsafe_code)]
pub mod commands;

use anyhow::Result;
use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

/// Custom styles for CLI help output
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());
use commands::blastscreen::Blastscreen;
use commands::classify::Classify;
use commands::command::Command;
use commands::config::Config;
use commands::eprimer3::Eprimer3;
use commands::primersearch::PrimerSearch;
use commands::prodigal::Prodigal;
use enum_dispatch::enum_dispatch;
use env_logger::Env;
use log::info;

#[derive(Parser, Debug)]
#[command(styles = STYLES)]
struct Args {
    #[clap(subcommand)]
    subcommand: Subcommand,
}

#[enum_dispatch(Command)]
#[derive(Parser, Debug)]
#[command(version)]
#[allow(clippy::large_enum_variant)]
enum Subcommand {
    // Setup
    #[command(display_order = 1)]
    Config(Config),

    // Pipeline stages
    #[command(display_order = 2)]
    Prodigal(Prodigal),
    #[command(display_order = 3)]
    Eprimer3(Eprimer3),
    #[command(display_order = 4)]
    Blastscreen(Blastscreen),

    // Declared, not yet implemented
    #[command(display_order = 5)]
    Primersearch(PrimerSearch),
    #[command(display_order = 6)]
    Classify(Classify),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    // Capture full command line BEFORE clap parsing for logging
    let command_line = std::env::args().collect::<Vec<_>>().join(" ");

    let args = Args::parse();

    info!("Running primedx version {}", env!("CARGO_PKG_VERSION"));
    args.subcommand.execute(&command_line)
}
