// src/cli/shell.rs
//
// Crank's interactive mode: the same command registry as the command
// line, behind a line editor. Failed commands report and the session
// continues.

use anyhow::Result;
use colored::*;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::cli::dispatcher;
use crate::core::context::ProjectContext;

pub fn run(ctx: &mut ProjectContext) -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    println!("Crank interactive mode. Type 'help' for commands, 'exit' to leave.");

    loop {
        match editor.readline("crank> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line);
                if !execute_line(ctx, line) {
                    break;
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "Error".red().bold());
                break;
            }
        }
    }
    Ok(())
}

/// Runs one shell line. Returns false when the session should end.
fn execute_line(ctx: &mut ProjectContext, line: &str) -> bool {
    let Some(words) = shlex::split(line) else {
        eprintln!("{}", "Unbalanced quoting in command line.".yellow());
        return true;
    };
    let Some((name, rest)) = words.split_first() else {
        return true;
    };

    match name.as_str() {
        "exit" | "quit" => false,
        "help" => {
            dispatcher::print_command_list();
            true
        }
        _ => {
            match dispatcher::dispatch(ctx, name, rest.to_vec()) {
                Ok(0) => {}
                Ok(code) => println!("{}", format!("Command exited with code {code}").yellow()),
                Err(e) => eprintln!("{}: {e:#}", "Error".red().bold()),
            }
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_and_quit_end_the_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = ProjectContext::new(dir.path());
        assert!(!execute_line(&mut ctx, "exit"));
        assert!(!execute_line(&mut ctx, "quit"));
    }

    #[test]
    fn failures_keep_the_session_alive() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = ProjectContext::new(dir.path());
        assert!(execute_line(&mut ctx, "no-such-command"));
        assert!(execute_line(&mut ctx, "register too-few-args"));
        assert!(execute_line(&mut ctx, "\"unbalanced"));
    }

    #[test]
    fn shell_commands_mutate_the_context() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = ProjectContext::new(dir.path());
        assert!(execute_line(&mut ctx, "default compiler clang"));
        assert_eq!(ctx.compiler(), Some("clang"));
    }
}
