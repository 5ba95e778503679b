use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "pc-quoter", version, about = "PC build quote service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the quote service (default)
    Serve,

    /// Fetch the catalog once and print it
    Catalog {
        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display the current configuration with secrets masked
    Show,
    /// Validate the configuration file
    Validate,
}

impl Cli {
    /// Get the command to execute, defaulting to Serve
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}
