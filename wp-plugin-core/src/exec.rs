//! # Command Execution
//!
//! A thin wrapper around [`std::process::Command`] that echoes the command
//! line (`+ git push origin main`) before running it, the way shell `set -x`
//! does, so plugin logs show exactly what was executed.

use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, ExitStatus, Output, Stdio};

use thiserror::Error;
use tracing::debug;

/// Errors raised while running a command.
#[derive(Debug, Error)]
pub enum ExecError {
  #[error("could not find executable '{name}': {source}")]
  NotFound {
    name: String,
    #[source]
    source: which::Error,
  },
  #[error("failed to start '{program}': {source}")]
  Spawn {
    program: String,
    #[source]
    source: io::Error,
  },
  #[error("'{program}' exited with {status}")]
  Failed { program: String, status: ExitStatus },
  #[error("failed to write command trace: {0}")]
  Trace(#[source] io::Error),
}

/// A command with optional tracing and private output.
#[derive(Debug)]
pub struct Cmd {
  command: Command,
  trace: bool,
  private: bool,
}

impl Cmd {
  /// Create a command for `program` without resolving it on `PATH`.
  pub fn new<S: AsRef<OsStr>>(program: S) -> Self {
    Self {
      command: Command::new(program),
      trace: true,
      private: false,
    }
  }

  /// Resolve `name` on `PATH` and create a command for the absolute path.
  pub fn lookup(name: &str) -> Result<Self, ExecError> {
    let path = which::which(name).map_err(|source| ExecError::NotFound {
      name: name.to_string(),
      source,
    })?;
    debug!(name, path = %path.display(), "Resolved executable");

    Ok(Self::new(path))
  }

  pub fn arg<S: AsRef<OsStr>>(&mut self, arg: S) -> &mut Self {
    self.command.arg(arg);
    self
  }

  pub fn args<I, S>(&mut self, args: I) -> &mut Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
  {
    self.command.args(args);
    self
  }

  pub fn env<K: AsRef<OsStr>, V: AsRef<OsStr>>(&mut self, key: K, value: V) -> &mut Self {
    self.command.env(key, value);
    self
  }

  pub fn envs<I, K, V>(&mut self, vars: I) -> &mut Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<OsStr>,
    V: AsRef<OsStr>,
  {
    self.command.envs(vars);
    self
  }

  /// Start from an empty environment instead of inheriting the plugin's.
  pub fn env_clear(&mut self) -> &mut Self {
    self.command.env_clear();
    self
  }

  pub fn current_dir<P: AsRef<Path>>(&mut self, dir: P) -> &mut Self {
    self.command.current_dir(dir);
    self
  }

  pub fn stdout<T: Into<Stdio>>(&mut self, cfg: T) -> &mut Self {
    self.command.stdout(cfg);
    self
  }

  pub fn stderr<T: Into<Stdio>>(&mut self, cfg: T) -> &mut Self {
    self.command.stderr(cfg);
    self
  }

  /// Toggle echoing the command line before execution (on by default).
  pub fn trace(&mut self, trace: bool) -> &mut Self {
    self.trace = trace;
    self
  }

  /// Discard the command's standard output, e.g. for commands that print
  /// credentials. Takes precedence over [`Cmd::stdout`].
  pub fn private(&mut self, private: bool) -> &mut Self {
    self.private = private;
    self
  }

  /// The command line as printed by the trace, e.g. `+ echo hello`.
  pub fn trace_line(&self) -> String {
    let mut line = format!("+ {}", self.command.get_program().to_string_lossy());
    for arg in self.command.get_args() {
      line.push(' ');
      line.push_str(&arg.to_string_lossy());
    }
    line
  }

  /// Run the command to completion, tracing to stdout.
  pub fn run(&mut self) -> Result<(), ExecError> {
    self.run_traced(&mut io::stdout())
  }

  /// Run the command to completion, tracing to `writer`.
  pub fn run_traced<W: Write>(&mut self, writer: &mut W) -> Result<(), ExecError> {
    self.prepare(writer)?;

    let status = self.command.status().map_err(|source| ExecError::Spawn {
      program: self.program(),
      source,
    })?;

    self.check_status(status)
  }

  /// Run the command and capture its output, tracing to `writer`.
  ///
  /// Private commands report an empty stdout.
  pub fn output_traced<W: Write>(&mut self, writer: &mut W) -> Result<Output, ExecError> {
    self.prepare(writer)?;

    let output = self.command.output().map_err(|source| ExecError::Spawn {
      program: self.program(),
      source,
    })?;

    self.check_status(output.status)?;
    Ok(output)
  }

  fn prepare<W: Write>(&mut self, writer: &mut W) -> Result<(), ExecError> {
    if self.private {
      self.command.stdout(Stdio::null());
    }

    if self.trace {
      writeln!(writer, "{}", self.trace_line()).map_err(ExecError::Trace)?;
    }
    Ok(())
  }

  fn check_status(&self, status: ExitStatus) -> Result<(), ExecError> {
    if status.success() {
      return Ok(());
    }

    Err(ExecError::Failed {
      program: self.program(),
      status,
    })
  }

  fn program(&self) -> String {
    self.command.get_program().to_string_lossy().into_owned()
  }
}
