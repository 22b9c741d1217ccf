// src/cli/handlers/new.rs

use anyhow::{Context, Result};
use clap::Parser;
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;

use crate::core::context::ProjectContext;

#[derive(Parser, Debug, Default)]
#[command(no_binary_name = true, about = "Creates new content from a template.")]
struct NewArgs {
    /// The kind of content to create. Only 'demo' is currently supported.
    kind: String,

    /// The name of the new content.
    name: String,

    /// Show what would have been done without doing it.
    #[arg(long)]
    dry_run: bool,
}

pub fn handle(ctx: &mut ProjectContext, args: Vec<String>) -> Result<i32> {
    let new_args = NewArgs::try_parse_from(&args)?;

    // Types to eventually support:
    // test -> src/tests/unit/test-{name}.c
    // plugin -> src/plugins/{name}/{name}.c
    if new_args.kind != "demo" {
        println!("Unrecognized template name {}", new_args.kind);
        return Ok(1);
    }

    if !write_demo_template(ctx, &new_args.name, new_args.dry_run)? {
        println!("Unable to create content");
        return Ok(1);
    }

    println!("Regenerate the project to use your new demo");
    Ok(0)
}

fn write_demo_template(ctx: &ProjectContext, name: &str, dry_run: bool) -> Result<bool> {
    let realname = sanitize_for_file_name(name);
    if realname.is_empty() {
        println!("'{name}' leaves nothing usable as a file name");
        return Ok(false);
    }

    let demo_src_dir = ctx.home().join("src").join("demos");
    let demo_source_file = demo_src_dir.join(format!("{realname}.c"));
    if demo_source_file.exists() {
        println!(
            "Demo source file already exists: {}",
            demo_source_file.display()
        );
        return Ok(false);
    }

    if dry_run {
        println!("Would have written demo to {}", demo_source_file.display());
        return Ok(true);
    }

    fs::create_dir_all(&demo_src_dir)
        .with_context(|| format!("Could not create {}", demo_src_dir.display()))?;
    fs::write(&demo_source_file, demo_template(&realname))
        .with_context(|| format!("Could not write {}", demo_source_file.display()))?;
    Ok(true)
}

/// Strips characters which would be awkward or invalid in a file name.
fn sanitize_for_file_name(name: &str) -> String {
    lazy_static! {
        static ref FORBIDDEN: Regex = Regex::new(r#"[ \t\r\n%:<>{}\[\]"/\\?*-]"#)
            .expect("forbidden-character pattern is valid");
    }
    FORBIDDEN.replace_all(&name.to_lowercase(), "").into_owned()
}

fn demo_template(realname: &str) -> String {
    format!(
        r#"#include <calendon/cn.h>
#include <calendon/log.h>

CnLogHandle LogSysSample;

CN_GAME_API bool Game_Init(void)
{{
    cnLog_RegisterSystem(&LogSysSample, "{realname}", CnLogVerbosityTrace);
    CN_TRACE(LogSysSample, "{realname} loaded");
    return true;
}}

CN_GAME_API void Game_Draw(void)
{{
}}

CN_GAME_API void Game_Tick(uint64_t dt)
{{
    CN_UNUSED(dt);
}}

CN_GAME_API void Game_Shutdown(void)
{{
}}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn file_names_are_lowercased_and_stripped() {
        assert_eq!(sanitize_for_file_name("My Neat Demo"), "myneatdemo");
        assert_eq!(sanitize_for_file_name("a:b/c\\d*e?"), "abcde");
        assert_eq!(sanitize_for_file_name("tick-rate"), "tickrate");
        assert_eq!(sanitize_for_file_name("  \t"), "");
    }

    #[test]
    fn demo_template_is_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = ProjectContext::new(dir.path());

        assert!(write_demo_template(&ctx, "Planets", false).unwrap());
        let written = dir.path().join("src").join("demos").join("planets.c");
        assert!(written.is_file());
        assert!(fs::read_to_string(&written).unwrap().contains("planets"));

        // A second write must refuse rather than clobber.
        assert!(!write_demo_template(&ctx, "Planets", false).unwrap());
    }

    #[test]
    fn dry_run_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = ProjectContext::new(dir.path());
        assert!(write_demo_template(&ctx, "pong", true).unwrap());
        assert!(!Path::new(&dir.path().join("src").join("demos").join("pong.c")).exists());
    }
}
