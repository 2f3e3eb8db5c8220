use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// pagesync: keep a page's host application informed of the viewport size
/// and scroll activity once its intro element appears.
#[derive(Parser, Debug)]
#[command(name = "pagesync", version, about)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level override, as an `EnvFilter` directive (e.g. `pagesync=debug`).
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open a window and sync the loaded page (default).
    Run {
        /// Page to load instead of the configured one.
        #[arg(long)]
        url: Option<String>,
    },

    /// Replay a scenario file headlessly and print the transcript.
    Simulate {
        scenario: PathBuf,

        /// Print one JSON object per line.
        #[arg(long)]
        json: bool,
    },

    /// Print the effective config as JSON.
    Config {
        /// Write the commented default config file instead.
        #[arg(long)]
        init: bool,
    },
}

impl Args {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Run { url: None })
    }
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_run() {
        let args = Args::try_parse_from(["pagesync"]).unwrap();
        assert_eq!(args.command(), Command::Run { url: None });
        assert!(args.config.is_none());
    }

    #[test]
    fn simulate_with_json() {
        let args =
            Args::try_parse_from(["pagesync", "simulate", "demos/late_intro.toml", "--json"])
                .unwrap();
        assert_eq!(
            args.command(),
            Command::Simulate {
                scenario: PathBuf::from("demos/late_intro.toml"),
                json: true,
            }
        );
    }

    #[test]
    fn global_flags_after_subcommand() {
        let args = Args::try_parse_from([
            "pagesync",
            "config",
            "--init",
            "--config",
            "/tmp/p.toml",
            "--log-level",
            "pagesync=trace",
        ])
        .unwrap();
        assert_eq!(args.command(), Command::Config { init: true });
        assert_eq!(args.config, Some(PathBuf::from("/tmp/p.toml")));
        assert_eq!(args.log_level.as_deref(), Some("pagesync=trace"));
    }

    #[test]
    fn simulate_requires_a_scenario() {
        assert!(Args::try_parse_from(["pagesync", "simulate"]).is_err());
    }
}
