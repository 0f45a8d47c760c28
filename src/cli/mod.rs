//! Command-line interface.
//!
//! With no subcommand the binary launches the post screen. The subcommands
//! talk to the same posts API headlessly.

pub mod completions;
pub mod posts;

use crate::config::Config;
use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Browse and add posts from a JSON posts API
#[derive(Parser, Debug)]
#[command(name = "postboard", version, about = "Browse and add posts from a JSON posts API", long_about = None, disable_help_subcommand = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file to use instead of ~/.config/postboard/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Posts API base URL (overrides the config file)
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// UI theme: dark, light or nocolor (also respects NO_COLOR env var)
    #[arg(long, global = true, value_name = "NAME")]
    pub theme: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch posts and print them
    List {
        /// Maximum number of posts (defaults to api.initial_limit)
        #[arg(short, long)]
        limit: Option<usize>,
        /// Output posts as JSON for scripting
        #[arg(long)]
        json: bool,
    },
    /// Create a post and print the result
    Add {
        /// Post title
        #[arg(short, long)]
        title: String,
        /// Post body
        #[arg(short, long)]
        body: String,
        /// Output the created post as JSON for scripting
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate for (detected from $SHELL when omitted)
        shell: Option<Shell>,
    },
}

impl Cli {
    /// Config file path: `--config` or the default location
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(crate::utils::get_config_path)
    }

    /// Whether the TUI should start (no subcommand given)
    pub fn launches_tui(&self) -> bool {
        self.command.is_none()
    }

    /// Execute a headless subcommand. Does nothing when no subcommand was given.
    pub fn execute(self, config: &Config) -> Result<()> {
        match self.command {
            Some(Commands::List { limit, json }) => {
                posts::cmd_list(config, limit.unwrap_or(config.api.initial_limit), json)
            }
            Some(Commands::Add { title, body, json }) => posts::cmd_add(config, title, body, json),
            Some(Commands::Completions { shell }) => completions::generate(shell),
            None => Ok(()),
        }
    }
}

/// Print a success message with a check mark prefix.
pub fn print_success(msg: &str) {
    println!("\u{2713} {}", msg);
}

/// Print an error message with an X prefix to stderr.
pub fn print_error(msg: &str) {
    eprintln!("\u{2717} {}", msg);
}
