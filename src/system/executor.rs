// src/system/executor.rs

use colored::*;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("No command specified to run.")]
    EmptyCommand,
    #[error("Command '{command}' could not be launched: {source}")]
    LaunchFailure {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Lost track of command '{command}' while waiting for it: {source}")]
    WaitFailure {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Command '{command}' exited with a non-zero error code.")]
    NonZeroExitStatus { command: String },
    #[error("Command '{command}' produced output that was not valid UTF-8")]
    InvalidUtf8Output {
        command: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// Which of the child's output streams a line arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamSource {
    Stdout,
    Stderr,
}

/// One decoded line of child output. Lines that are not valid UTF-8 are
/// decoded lossily rather than dropped.
#[derive(Debug, Clone)]
pub struct OutputLine {
    pub source: StreamSource,
    pub text: String,
}

/// Runs an external program while streaming its stdout and stderr to the
/// console, and returns the child's exit code.
///
/// Non-zero exit is not an error at this layer; it is simply the returned
/// code for the caller to interpret. Only a failure to launch or to reap
/// the child is an `ExecutionError`.
pub fn run_program(command_line: &[String], cwd: Option<&Path>) -> Result<i32, ExecutionError> {
    let rendered = command_line.join(" ");
    match cwd {
        Some(dir) => println!(
            "{} {} {}",
            "Running:".dimmed(),
            rendered.green(),
            format!("(in {})", dir.display()).dimmed()
        ),
        None => println!("{} {}", "Running:".dimmed(), rendered.green()),
    }
    run_program_with(command_line, cwd, print_line)
}

/// Console policy: stdout lines pass through untouched, stderr lines carry
/// an `err:` prefix so the two streams stay distinguishable in scrollback.
fn print_line(line: &OutputLine) {
    match line.source {
        StreamSource::Stdout => println!("{}", line.text),
        StreamSource::Stderr => eprintln!("{} {}", "err:".red(), line.text),
    }
}

/// The runner underneath [`run_program`], with the output sink made
/// explicit so callers (and tests) can observe lines instead of printing
/// them.
///
/// Each stream gets its own reader thread; reading both from one thread
/// can deadlock once the child fills the OS buffer of whichever pipe is
/// not currently being drained. The readers feed a channel, and the
/// invocation completes only when both readers have finished and every
/// queued line has been consumed. The child exiting is not that condition:
/// pipe buffers may still hold output after exit.
pub fn run_program_with<F>(
    command_line: &[String],
    cwd: Option<&Path>,
    mut sink: F,
) -> Result<i32, ExecutionError>
where
    F: FnMut(&OutputLine),
{
    let (program, args) = command_line
        .split_first()
        .ok_or(ExecutionError::EmptyCommand)?;

    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = cwd {
        command.current_dir(dunce::simplified(dir));
    }

    let mut child = command.spawn().map_err(|e| ExecutionError::LaunchFailure {
        command: command_line.join(" "),
        source: e,
    })?;

    let (tx, rx) = mpsc::channel();
    let out_thread = child.stdout.take().map(|stream| {
        let tx = tx.clone();
        thread::spawn(move || read_stream(stream, StreamSource::Stdout, &tx))
    });
    let err_thread = child.stderr.take().map(|stream| {
        let tx = tx.clone();
        thread::spawn(move || read_stream(stream, StreamSource::Stderr, &tx))
    });
    drop(tx);

    // Iteration ends only once both senders have hung up and the queue is
    // empty, which is exactly the completion condition described above.
    for line in rx {
        sink(&line);
    }

    for handle in [out_thread, err_thread].into_iter().flatten() {
        if handle.join().is_err() {
            log::warn!("An output reader thread panicked; some output may be missing.");
        }
    }

    let status = child.wait().map_err(|e| ExecutionError::WaitFailure {
        command: command_line.join(" "),
        source: e,
    })?;

    // Termination by signal carries no exit code; report the conventional
    // failure value.
    Ok(status.code().unwrap_or(-1))
}

/// Reads one stream line by line into the shared queue. Invalid UTF-8 is
/// decoded lossily; a read error ends the stream early.
fn read_stream<R: Read>(stream: R, source: StreamSource, tx: &mpsc::Sender<OutputLine>) {
    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let text = String::from_utf8_lossy(&buf).trim_end().to_string();
                if tx.send(OutputLine { source, text }).is_err() {
                    break;
                }
            }
            Err(e) => {
                log::debug!("Stopping {:?} reader: {}", source, e);
                break;
            }
        }
    }
}

/// Runs a short-lived helper and captures its standard output as a string.
/// Stderr passes through to the console. Unlike [`run_program`], a
/// non-zero exit here is an error: callers use this for lookups whose
/// output is meaningless on failure.
pub fn run_and_capture(command_line: &[String], cwd: Option<&Path>) -> Result<String, ExecutionError> {
    let (program, args) = command_line
        .split_first()
        .ok_or(ExecutionError::EmptyCommand)?;

    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit());
    if let Some(dir) = cwd {
        command.current_dir(dunce::simplified(dir));
    }

    let output = command.output().map_err(|e| ExecutionError::LaunchFailure {
        command: command_line.join(" "),
        source: e,
    })?;

    if !output.status.success() {
        return Err(ExecutionError::NonZeroExitStatus {
            command: command_line.join(" "),
        });
    }

    String::from_utf8(output.stdout).map_err(|e| ExecutionError::InvalidUtf8Output {
        command: command_line.join(" "),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_command_line_is_rejected() {
        let result = run_program_with(&[], None, |_| {});
        assert!(matches!(result, Err(ExecutionError::EmptyCommand)));
    }

    #[test]
    fn missing_executable_is_a_launch_failure() {
        let result = run_program_with(&argv(&["crank-no-such-program-here"]), None, |_| {});
        assert!(matches!(result, Err(ExecutionError::LaunchFailure { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn exit_code_passes_through() {
        let code = run_program_with(&argv(&["sh", "-c", "exit 7"]), None, |_| {}).unwrap();
        assert_eq!(code, 7);
    }

    #[cfg(unix)]
    #[test]
    fn successful_run_returns_zero() {
        let code = run_program_with(&argv(&["sh", "-c", "true"]), None, |_| {}).unwrap();
        assert_eq!(code, 0);
    }

    /// The child pushes well over 64KB through each pipe before exiting.
    /// A sequential reader would deadlock once one pipe's OS buffer fills;
    /// the runner must complete and every line from both streams must be
    /// observed. Interleaving order across streams is not asserted.
    #[cfg(unix)]
    #[test]
    fn heavy_output_on_both_streams_completes_with_all_lines() {
        let script = "i=0; while [ \"$i\" -lt 800 ]; do \
                      printf 'out%0125d\\n' \"$i\"; \
                      printf 'err%0125d\\n' \"$i\" 1>&2; \
                      i=$((i+1)); done";
        let mut out_lines = Vec::new();
        let mut err_lines = Vec::new();
        let code = run_program_with(&argv(&["sh", "-c", script]), None, |line| {
            match line.source {
                StreamSource::Stdout => out_lines.push(line.text.clone()),
                StreamSource::Stderr => err_lines.push(line.text.clone()),
            }
        })
        .unwrap();

        assert_eq!(code, 0);
        assert_eq!(out_lines.len(), 800);
        assert_eq!(err_lines.len(), 800);
        // Per-stream ordering holds even though cross-stream order may not.
        assert_eq!(out_lines.first().unwrap(), &format!("out{:0125}", 0));
        assert_eq!(out_lines.last().unwrap(), &format!("out{:0125}", 799));
        assert_eq!(err_lines.last().unwrap(), &format!("err{:0125}", 799));
    }

    /// Output written just before exit must still be drained; the child
    /// object finishing is not the runner's completion condition.
    #[cfg(unix)]
    #[test]
    fn output_written_before_exit_is_not_lost() {
        let mut seen = Vec::new();
        let code = run_program_with(
            &argv(&["sh", "-c", "echo first; echo last; exit 3"]),
            None,
            |line| seen.push(line.text.clone()),
        )
        .unwrap();
        assert_eq!(code, 3);
        assert_eq!(seen, vec!["first", "last"]);
    }

    #[cfg(unix)]
    #[test]
    fn working_directory_is_honored() {
        let dir = tempfile::tempdir().unwrap();
        let expected = dir.path().canonicalize().unwrap();
        let mut seen = Vec::new();
        let code = run_program_with(&argv(&["sh", "-c", "pwd"]), Some(dir.path()), |line| {
            seen.push(line.text.clone());
        })
        .unwrap();
        assert_eq!(code, 0);
        let reported = std::path::Path::new(&seen[0]).canonicalize().unwrap();
        assert_eq!(reported, expected);
    }

    #[cfg(unix)]
    #[test]
    fn invalid_utf8_output_is_decoded_lossily() {
        let mut seen = Vec::new();
        let code = run_program_with(
            &argv(&["sh", "-c", "printf 'a\\377b\\n'"]),
            None,
            |line| seen.push(line.text.clone()),
        )
        .unwrap();
        assert_eq!(code, 0);
        assert_eq!(seen.len(), 1);
        assert!(seen[0].starts_with('a') && seen[0].ends_with('b'));
    }

    #[cfg(unix)]
    #[test]
    fn capture_returns_stdout() {
        let output = run_and_capture(&argv(&["sh", "-c", "echo hello"]), None).unwrap();
        assert_eq!(output.trim(), "hello");
    }

    #[cfg(unix)]
    #[test]
    fn capture_fails_on_non_zero_exit() {
        let result = run_and_capture(&argv(&["sh", "-c", "exit 1"]), None);
        assert!(matches!(
            result,
            Err(ExecutionError::NonZeroExitStatus { .. })
        ));
    }
}
