//! External process execution.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::Deserialize;

/// A program and its arguments, as written in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<String>")]
pub struct CommandSpec {
    /// Program name or path
    pub program: String,

    /// Arguments passed verbatim
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Create a command from a program and arguments.
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl TryFrom<Vec<String>> for CommandSpec {
    type Error = String;

    fn try_from(mut argv: Vec<String>) -> Result<Self, Self::Error> {
        if argv.is_empty() {
            return Err("command must have at least one element".to_string());
        }
        let program = argv.remove(0);
        Ok(Self {
            program,
            args: argv,
        })
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Errors that can occur when running an external command.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("`{program}` not found. Please install it first.")]
    NotFound { program: String },

    #[error("Failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed with {}", exit_description(.code))]
    Failed { command: String, code: Option<i32> },
}

impl ProcessError {
    /// Exit code of the failed process, if it exited normally.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Failed { code, .. } => *code,
            _ => None,
        }
    }
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// Runs external commands for the pipeline.
///
/// The generator only sees this trait, so tests can script command outcomes.
pub trait ProcessRunner {
    /// Run `command` in `cwd` and wait for it to finish.
    fn run(&self, command: &CommandSpec, cwd: &Path) -> Result<(), ProcessError>;
}

/// Runs commands as real child processes with inherited stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    fn resolve(program: &str, cwd: &Path) -> Result<PathBuf, ProcessError> {
        which::which_in(program, std::env::var_os("PATH"), cwd).map_err(|_| {
            ProcessError::NotFound {
                program: program.to_string(),
            }
        })
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&self, command: &CommandSpec, cwd: &Path) -> Result<(), ProcessError> {
        let program = Self::resolve(&command.program, cwd)?;

        tracing::debug!("Running `{}` in {}", command, cwd.display());

        let status = Command::new(program)
            .args(&command.args)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| ProcessError::Spawn {
                program: command.program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ProcessError::Failed {
                command: command.to_string(),
                code: status.code(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_command_from_argv() {
        let spec: CommandSpec = serde_json::from_str(r#"["npx", "typedoc", "--logLevel", "Warn"]"#).unwrap();

        assert_eq!(spec, CommandSpec::new("npx", ["typedoc", "--logLevel", "Warn"]));
        assert_eq!(spec.to_string(), "npx typedoc --logLevel Warn");
    }

    #[test]
    fn rejects_empty_argv() {
        let result: Result<CommandSpec, _> = serde_json::from_str("[]");

        assert!(result.is_err());
    }

    #[test]
    fn missing_program_is_not_found() {
        let spec = CommandSpec::new("sipdocs-definitely-not-installed", Vec::<String>::new());

        let result = SystemRunner.run(&spec, Path::new("."));

        assert!(matches!(result, Err(ProcessError::NotFound { .. })));
    }

    #[test]
    fn failure_keeps_exit_code() {
        let err = ProcessError::Failed {
            command: "npx typedoc".to_string(),
            code: Some(3),
        };

        assert_eq!(err.exit_code(), Some(3));
        assert_eq!(err.to_string(), "`npx typedoc` failed with exit code 3");
    }
}
