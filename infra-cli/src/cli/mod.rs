//! Command-line interface

pub mod commands;
pub mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Consultation room and schedule registration for health facilities
#[derive(Parser, Debug)]
#[command(name = "infra-cli")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config.toml (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Walk through the registration wizard interactively
    Wizard,

    /// Run a JSON script of wizard messages without prompts
    Replay {
        /// JSON array of messages
        script: PathBuf,
    },

    /// List regions (entidades)
    Regions {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// List the facilities of a region
    Facilities {
        region: String,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Show the room counts of one facility
    Facility {
        /// CLUES id
        id: String,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl Cli {
    /// Log filter implied by `-v` when `RUST_LOG` is not set
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_listing_flags() {
        let cli = Cli::try_parse_from([
            "infra-cli",
            "-vv",
            "--no-color",
            "facilities",
            "Aguascalientes",
            "--format",
            "csv",
        ])
        .unwrap();

        assert_eq!(cli.log_level(), "debug");
        assert!(cli.no_color);
        match cli.command {
            Commands::Facilities { region, format } => {
                assert_eq!(region, "Aguascalientes");
                assert_eq!(format, OutputFormat::Csv);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["infra-cli", "regions"]).unwrap();
        assert_eq!(cli.log_level(), "warn");
        assert!(cli.config.is_none());
        assert!(matches!(
            cli.command,
            Commands::Regions {
                format: OutputFormat::Table
            }
        ));
    }

    #[test]
    fn test_replay_requires_script() {
        assert!(Cli::try_parse_from(["infra-cli", "replay"]).is_err());
    }
}
