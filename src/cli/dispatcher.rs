// src/cli/dispatcher.rs

use anyhow::Result;
use colored::*;

use crate::cli::handlers;
use crate::core::context::ProjectContext;

/// Defines a crank command: its name, aliases, one-line help, and handler.
/// Handlers return the command's exit code; errors are reserved for
/// failures the command could not turn into user messaging itself.
pub struct CommandDefinition {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub help: &'static str,
    /// Persist the context after this command succeeds.
    saves_context: bool,
    handler: fn(&mut ProjectContext, Vec<String>) -> Result<i32>,
}

impl std::fmt::Debug for CommandDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandDefinition")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .finish()
    }
}

/// The single source of truth for all crank commands, used by both the
/// command line and the interactive shell. To add a command, add an entry
/// here.
pub static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        name: "clean",
        aliases: &[],
        help: "Remove build directories.",
        saves_context: false,
        handler: handlers::clean::handle,
    },
    CommandDefinition {
        name: "gen",
        aliases: &[],
        help: "Generate build types.",
        saves_context: false,
        handler: handlers::r#gen::handle,
    },
    CommandDefinition {
        name: "build",
        aliases: &[],
        help: "Do a build.",
        saves_context: false,
        handler: handlers::build::handle,
    },
    CommandDefinition {
        name: "check",
        aliases: &[],
        help: "Run tests.",
        saves_context: false,
        handler: handlers::check::handle,
    },
    CommandDefinition {
        name: "demo",
        aliases: &["demos"],
        help: "List the built demos which can be run.",
        saves_context: false,
        handler: handlers::demo::handle,
    },
    CommandDefinition {
        name: "run",
        aliases: &[],
        help: "Run a demo with the driver.",
        saves_context: false,
        handler: handlers::run::handle,
    },
    CommandDefinition {
        name: "new",
        aliases: &[],
        help: "Create a new demo.",
        saves_context: false,
        handler: handlers::new::handle,
    },
    CommandDefinition {
        name: "export",
        aliases: &[],
        help: "Create an exported version of Calendon.",
        saves_context: false,
        handler: handlers::export::handle,
    },
    CommandDefinition {
        name: "register",
        aliases: &["reg"],
        help: "Register a path as a safe program to run.",
        saves_context: true,
        handler: handlers::register::handle,
    },
    CommandDefinition {
        name: "default",
        aliases: &[],
        help: "Default a value across multiple Crank commands.",
        saves_context: true,
        handler: handlers::default::handle,
    },
    CommandDefinition {
        name: "reset",
        aliases: &[],
        help: "Clear a set default.",
        saves_context: true,
        handler: handlers::reset::handle,
    },
    CommandDefinition {
        name: "env",
        aliases: &[],
        help: "Print the Crank environment configuration.",
        saves_context: false,
        handler: handlers::env::handle,
    },
    CommandDefinition {
        name: "save",
        aliases: &[],
        help: "Save Crank configuration to file.",
        saves_context: false,
        handler: handlers::save::handle,
    },
];

/// Finds a command definition in the registry by its name or alias.
pub fn find_command(name: &str) -> Option<&'static CommandDefinition> {
    COMMAND_REGISTRY
        .iter()
        .find(|cmd| cmd.name == name || cmd.aliases.contains(&name))
}

/// Prints the one-line help for every registered command.
pub fn print_command_list() {
    for command in COMMAND_REGISTRY {
        println!("  {:<10} {}", command.name.cyan(), command.help);
    }
}

/// Routes one command invocation to its handler and applies the
/// context-persistence policy afterwards.
pub fn dispatch(ctx: &mut ProjectContext, name: &str, args: Vec<String>) -> Result<i32> {
    log::debug!("Dispatching '{}' with args: {:?}", name, args);

    let Some(command) = find_command(name) else {
        eprintln!("{}", format!("Unknown command '{name}'. Commands:").red());
        print_command_list();
        return Ok(1);
    };

    let exit_code = (command.handler)(ctx, args)?;
    if exit_code == 0 && command.saves_context {
        ctx.save()?;
        log::debug!("Saved context after '{}'", command.name);
    }
    Ok(exit_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_are_found_by_name_and_alias() {
        assert!(find_command("gen").is_some());
        assert_eq!(find_command("reg").map(|c| c.name), Some("register"));
        assert!(find_command("frobnicate").is_none());
    }

    #[test]
    fn registry_names_are_unique() {
        let mut names: Vec<&str> = COMMAND_REGISTRY
            .iter()
            .flat_map(|c| std::iter::once(c.name).chain(c.aliases.iter().copied()))
            .collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn mutating_commands_persist_the_context() {
        for name in ["register", "default", "reset"] {
            assert!(find_command(name).is_some_and(|c| c.saves_context), "{name}");
        }
        assert!(find_command("build").is_some_and(|c| !c.saves_context));
    }

    #[test]
    fn unknown_commands_fail_without_erroring() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = ProjectContext::new(dir.path());
        let code = dispatch(&mut ctx, "frobnicate", vec![]).unwrap();
        assert_eq!(code, 1);
    }

    #[test]
    fn successful_default_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = ProjectContext::new(dir.path());
        let code = dispatch(
            &mut ctx,
            "default",
            vec!["compiler".to_string(), "gcc".to_string()],
        )
        .unwrap();
        assert_eq!(code, 0);
        assert!(ctx.config_path().is_file());
    }
}
