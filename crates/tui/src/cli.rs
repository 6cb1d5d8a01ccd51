use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::model::{FilterMode, TaskId, ThemeMode};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "ticklist",
    version,
    about = "A small keyboard-first task list with a terminal UI and a JSON backend.",
    after_help = "Examples:\n  ticklist                 Launch the TUI (same as `ticklist tui`)\n  ticklist serve --seed    Serve the task API on 127.0.0.1:8000\n  ticklist list --filter active\n  ticklist add Water the plants\n  ticklist toggle 3"
)]
pub struct Cli {
    /// Override the data directory (defaults to platform-specific app dir)
    #[arg(long, value_name = "PATH", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Override the tracing filter (e.g. "info", "debug", or full directives)
    #[arg(long = "log", value_name = "DIRECTIVE", global = true)]
    pub log_filter: Option<String>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// Launch the keyboard-first terminal UI (default command)
    Tui(TuiArgs),
    /// Serve the task store as JSON over HTTP
    Serve(ServeArgs),
    /// Print tasks through a filter
    List(ListArgs),
    /// Add a task
    Add(AddArgs),
    /// Flip a task between active and completed
    Toggle(IdArgs),
    /// Delete a task by id
    Delete(IdArgs),
    /// Remove every completed task
    ClearCompleted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeChoice {
    Light,
    Dark,
    /// Follow the operating system preference
    System,
}

impl ThemeChoice {
    pub fn fixed(self) -> Option<ThemeMode> {
        match self {
            ThemeChoice::Light => Some(ThemeMode::Light),
            ThemeChoice::Dark => Some(ThemeMode::Dark),
            ThemeChoice::System => None,
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct TuiArgs {
    /// Colour theme; defaults to the last one chosen in the TUI
    #[arg(long, value_enum)]
    pub theme: Option<ThemeChoice>,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, value_name = "HOST:PORT", default_value = "127.0.0.1:8000")]
    pub addr: SocketAddr,

    /// Serve a browser front end from this directory
    #[arg(long = "web-root", value_name = "PATH")]
    pub web_root: Option<PathBuf>,

    /// Insert the sample tasks when the store is empty
    #[arg(long)]
    pub seed: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Which tasks to show
    #[arg(long, short, value_enum, default_value_t = FilterMode::All)]
    pub filter: FilterMode,
}

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Task text
    #[arg(value_name = "TEXT", required = true)]
    pub text: Vec<String>,
}

impl AddArgs {
    pub fn joined(&self) -> String {
        self.text.join(" ")
    }
}

#[derive(Args, Debug, Clone)]
pub struct IdArgs {
    /// Task id as shown by `ticklist list`
    #[arg(value_name = "ID")]
    pub id: TaskId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_filter_and_global_data_dir() {
        let cli = Cli::parse_from(["ticklist", "list", "--filter", "completed", "--data-dir", "/tmp/x"]);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
        match cli.command {
            Some(CliCommand::List(args)) => assert_eq!(args.filter, FilterMode::Completed),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn no_subcommand_means_tui() {
        let cli = Cli::parse_from(["ticklist"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn system_theme_has_no_fixed_mode() {
        assert_eq!(ThemeChoice::System.fixed(), None);
        assert_eq!(ThemeChoice::Dark.fixed(), Some(ThemeMode::Dark));
    }
}
