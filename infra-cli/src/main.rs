//! infra-cli - consultation room registration for health facilities
//!
//! Usage: infra-cli <COMMAND>
//!
//! Commands:
//!   wizard      Interactive registration wizard
//!   replay      Run a JSON script of wizard messages
//!   regions     List regions
//!   facilities  List the facilities of a region
//!   facility    Show one facility

mod catalog;
mod cli;
mod config;
mod reference;
mod wizard;

use anyhow::Result;
use clap::Parser;

use cli::commands::{self, Session};
use cli::{Cli, Commands};
use config::Config;

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .format_timestamp(None)
        .init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = Config::load(cli.config.as_deref())?;
    log::debug!("Config: {:?}", config);

    let data = reference::load_reference_data(&config.data.infrastructure, &config.data.regions);
    if let Some(banner) = cli::render::data_source_banner(data.source()) {
        eprintln!("{}\n", banner);
    }

    match cli.command {
        Commands::Wizard => {
            let mut session = Session::new(&data, config.wizard.rooms, config.export.directory);
            commands::handle_wizard(&mut session)
        }
        Commands::Replay { script } => {
            let mut session = Session::new(&data, config.wizard.rooms, config.export.directory);
            commands::handle_replay(&mut session, &script)
        }
        Commands::Regions { format } => commands::handle_regions(&data, format),
        Commands::Facilities { region, format } => {
            commands::handle_facilities(&data, &region, format)
        }
        Commands::Facility { id, format } => commands::handle_facility(&data, &id, format),
    }
}
