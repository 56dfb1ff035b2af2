//! Blocking wrappers around external commands.
//!
//! Every call runs the child to completion before returning; there is no
//! concurrency anywhere in the sequence. A nonzero exit is an error, with
//! the child's own exit code preserved for propagation.

use {
    crate::output,
    std::{
        io,
        path::Path,
        process::Command,
        sync::atomic::{AtomicBool, Ordering},
    },
    thiserror::Error,
};

static ECHO: AtomicBool = AtomicBool::new(false);

/// Echo every external command line before it runs (the `DEBUG` flag).
pub fn set_echo(enabled: bool) {
    ECHO.store(enabled, Ordering::Relaxed);
}

/// Failure of an external command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The program could not be started at all.
    #[error("failed to run {program}: {source}")]
    Spawn { program: String, source: io::Error },

    /// The program ran and exited unsuccessfully.
    #[error("{program} {}", exit_summary(.code, .stderr))]
    Failed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
}

impl CommandError {
    /// Exit code to propagate when this failure aborts the process.
    pub fn exit_code(&self) -> i32 {
        match self {
            CommandError::Spawn { .. } => 1,
            CommandError::Failed { code, .. } => code.unwrap_or(1),
        }
    }
}

fn exit_summary(code: &Option<i32>, stderr: &str) -> String {
    let status = match code {
        Some(code) => format!("exited with code {code}"),
        None => "was terminated by a signal".to_string(),
    };
    let stderr = stderr.trim();
    if stderr.is_empty() {
        status
    } else {
        format!("{status}: {stderr}")
    }
}

/// Run a command with inherited stdio, so the child's own output streams
/// through to the terminal.
pub fn run_live(program: &str, args: &[&str], dir: Option<&Path>) -> Result<(), CommandError> {
    echo(program, args);
    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }
    let status = cmd.status().map_err(|source| CommandError::Spawn {
        program: program.to_string(),
        source,
    })?;
    if !status.success() {
        return Err(CommandError::Failed {
            program: program.to_string(),
            code: status.code(),
            stderr: String::new(),
        });
    }
    Ok(())
}

/// Run a command with captured output and return its trimmed stdout.
///
/// On failure the child's stderr is attached to the error.
pub fn run_capture(program: &str, args: &[&str], dir: Option<&Path>) -> Result<String, CommandError> {
    echo(program, args);
    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }
    let out = cmd.output().map_err(|source| CommandError::Spawn {
        program: program.to_string(),
        source,
    })?;
    if !out.status.success() {
        return Err(CommandError::Failed {
            program: program.to_string(),
            code: out.status.code(),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
        });
    }
    Ok(String::from_utf8_lossy(&out.stdout).trim().to_string())
}

fn echo(program: &str, args: &[&str]) {
    if ECHO.load(Ordering::Relaxed) {
        let mut line = program.to_string();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        output::command(&line);
    }
}

#[cfg(test)]
mod tests {
    use {super::*, tempfile::tempdir};

    #[test]
    fn capture_returns_trimmed_stdout() {
        let out = run_capture("sh", &["-c", "echo '  hello  '"], None).unwrap();
        assert_eq!(out, "hello");
    }

    #[test]
    fn failure_carries_code_and_stderr() {
        let err = run_capture("sh", &["-c", "echo oops >&2; exit 3"], None).unwrap_err();
        match &err {
            CommandError::Failed { code, stderr, .. } => {
                assert_eq!(*code, Some(3));
                assert!(stderr.contains("oops"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let err = run_live("definitely-not-a-real-program", &[], None).unwrap_err();
        assert!(matches!(err, CommandError::Spawn { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn live_failure_propagates_the_exit_code() {
        let err = run_live("sh", &["-c", "exit 7"], None).unwrap_err();
        assert_eq!(err.exit_code(), 7);
    }

    #[test]
    fn commands_run_in_the_given_directory() {
        let tmp = tempdir().unwrap();
        let out = run_capture("sh", &["-c", "pwd"], Some(tmp.path())).unwrap();
        assert_eq!(
            std::fs::canonicalize(out).unwrap(),
            std::fs::canonicalize(tmp.path()).unwrap()
        );
    }
}
