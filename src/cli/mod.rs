use clap::Parser;
use std::path::PathBuf;

pub mod dispatcher;
pub mod handlers;
pub mod shell;

/// crank: the Calendon build and run helper.
#[derive(Parser, Debug)]
#[command(author, version, about)]
#[command(disable_help_subcommand = true)]
#[command(trailing_var_arg = true)]
pub struct Cli {
    /// Root directory of the Calendon project, overriding CALENDON_HOME.
    #[arg(long)]
    pub home: Option<PathBuf>,

    /// The command to run, followed by its arguments. With no command,
    /// crank starts its interactive shell.
    #[arg(allow_hyphen_values = true)]
    pub args: Vec<String>,
}
