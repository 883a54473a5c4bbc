use clap::{Parser, Subcommand};

/// Movie rental HTTP API
#[derive(Debug, Parser)]
#[command(name = "server", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Subcommand)]
pub enum Command {
    /// Serve the HTTP API (default)
    Serve,
    /// Load the starter genres, movies and customers, then exit
    Seed,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Serve)
    }
}

#[cfg(test)]
mod test {
    use clap::Parser;

    use crate::cli::{Cli, Command};

    #[test]
    fn serves_without_subcommand() {
        let cli = Cli::try_parse_from(["server"]).unwrap();
        assert_eq!(cli.command(), Command::Serve);
    }

    #[test]
    fn parses_seed() {
        let cli = Cli::try_parse_from(["server", "seed"]).unwrap();
        assert_eq!(cli.command(), Command::Seed);
    }

    #[test]
    fn rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["server", "drop"]).is_err());
    }
}
