//! Process adapter for the tmux binary

use anyhow::Result;
use parking_lot::Mutex;
use std::ffi::OsString;
use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Default time a single tmux invocation may take before it is killed.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Result of one tmux invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The process exited zero; holds stdout with trailing whitespace trimmed.
    Success(String),
    /// The process could not be spawned or did not finish in time.
    Unavailable {
        /// Human-readable reason, for logs.
        reason: String,
    },
    /// The process ran and exited non-zero.
    Failed {
        /// Exit code, if the process was not killed by a signal.
        code: Option<i32>,
        /// Captured stderr, trimmed.
        stderr: String,
    },
}

impl Outcome {
    /// Whether the invocation succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Collapse the outcome into stdout, or an empty string on any failure.
    #[must_use]
    pub fn into_output(self) -> String {
        match self {
            Self::Success(output) => output,
            Self::Unavailable { .. } | Self::Failed { .. } => String::new(),
        }
    }
}

/// Something that can run tmux with an argument vector.
pub trait Runner {
    /// Run tmux once with `args` (not including the program itself).
    fn run(&self, args: &[String]) -> Outcome;

    /// Run several invocations in order, stopping after the first one that
    /// does not succeed.
    fn run_batch(&self, batch: &[Vec<String>]) -> Vec<Outcome> {
        run_until_failure(batch, |args| self.run(args))
    }
}

impl<R: Runner + ?Sized> Runner for &R {
    fn run(&self, args: &[String]) -> Outcome {
        (**self).run(args)
    }

    fn run_batch(&self, batch: &[Vec<String>]) -> Vec<Outcome> {
        (**self).run_batch(batch)
    }
}

fn run_until_failure(
    batch: &[Vec<String>],
    mut run: impl FnMut(&[String]) -> Outcome,
) -> Vec<Outcome> {
    let mut outcomes = Vec::with_capacity(batch.len());
    for args in batch {
        let outcome = run(args);
        let stop = !outcome.is_success();
        outcomes.push(outcome);
        if stop {
            break;
        }
    }
    outcomes
}

/// Run tmux and return trimmed stdout, or an empty string on any failure.
///
/// Failures are logged but never returned; an empty string means "no data".
pub fn execute<R: Runner + ?Sized>(runner: &R, args: &[String]) -> String {
    let outcome = runner.run(args);
    log_failure(args, &outcome);
    outcome.into_output()
}

/// Check that a tmux server is running by listing its sessions.
#[must_use]
pub fn is_available<R: Runner + ?Sized>(runner: &R) -> bool {
    let available = runner.run(&["list-sessions".to_string()]).is_success();
    debug!(available, "Probed tmux server");
    available
}

pub(crate) fn log_failure(args: &[String], outcome: &Outcome) {
    match outcome {
        Outcome::Success(_) => {}
        Outcome::Unavailable { reason } => warn!(?args, %reason, "tmux unavailable"),
        Outcome::Failed { code, stderr } => warn!(?args, ?code, %stderr, "tmux command failed"),
    }
}

/// Runs the real tmux binary as a child process.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    program: OsString,
    leading_args: Vec<String>,
    timeout: Duration,
}

impl SystemRunner {
    /// Create a runner for `program` with the default timeout.
    #[must_use]
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Build a runner from a configured command line such as `tmux -L work`.
    ///
    /// The first word is the program (subject to the environment override),
    /// the rest are prepended to every invocation.
    ///
    /// # Errors
    ///
    /// Returns an error if the command line is empty or cannot be split.
    pub fn from_command_line(command_line: &str, timeout: Duration) -> Result<Self> {
        let mut argv = crate::command::parse_command_line(command_line)?;
        let program = argv.remove(0);
        Ok(Self {
            program: super::tmux_bin(Some(&program)),
            leading_args: argv,
            timeout,
        })
    }

    /// Replace the per-invocation timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The per-invocation timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    fn command(&self, args: &[String]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.leading_args)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new(super::tmux_bin(None))
    }
}

impl Runner for SystemRunner {
    fn run(&self, args: &[String]) -> Outcome {
        debug!(program = ?self.program, ?args, "Running tmux");

        let mut child = match self.command(args).spawn() {
            Ok(child) => child,
            Err(err) => {
                return Outcome::Unavailable {
                    reason: format!("Failed to execute tmux: {err}"),
                };
            }
        };

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());
        let started = Instant::now();

        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) if started.elapsed() >= self.timeout => {
                    abandon(&mut child);
                    return Outcome::Unavailable {
                        reason: format!("tmux timed out after {}ms", self.timeout.as_millis()),
                    };
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(err) => {
                    abandon(&mut child);
                    return Outcome::Unavailable {
                        reason: format!("Failed to wait for tmux: {err}"),
                    };
                }
            }
        };

        let stdout = collect(stdout);
        let stderr = collect(stderr);

        if status.success() {
            Outcome::Success(stdout.trim_end().to_string())
        } else {
            Outcome::Failed {
                code: status.code(),
                stderr: stderr.trim().to_string(),
            }
        }
    }
}

/// Kill `child` and reap it so no zombie is left behind.
fn abandon(child: &mut Child) {
    if let Err(err) = child.kill() {
        debug!(error = %err, "tmux already exited");
    }
    if let Err(err) = child.wait() {
        warn!(error = %err, "Failed to reap tmux");
    }
}

fn drain<T: Read + Send + 'static>(pipe: Option<T>) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        buf
    })
}

fn collect(handle: JoinHandle<Vec<u8>>) -> String {
    let bytes = handle.join().unwrap_or_default();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Serializes invocations of the wrapped runner.
///
/// A batch holds the lock for its whole length, so a two-step switch is never
/// interleaved with another action's commands.
#[derive(Debug, Default)]
pub struct Serialized<R> {
    inner: R,
    lock: Mutex<()>,
}

impl<R: Runner> Serialized<R> {
    /// Wrap `inner`.
    #[must_use]
    pub const fn new(inner: R) -> Self {
        Self {
            inner,
            lock: Mutex::new(()),
        }
    }

    /// The wrapped runner.
    #[must_use]
    pub const fn inner(&self) -> &R {
        &self.inner
    }
}

impl<R: Runner> Runner for Serialized<R> {
    fn run(&self, args: &[String]) -> Outcome {
        let _guard = self.lock.lock();
        self.inner.run(args)
    }

    fn run_batch(&self, batch: &[Vec<String>]) -> Vec<Outcome> {
        let _guard = self.lock.lock();
        run_until_failure(batch, |args| self.inner.run(args))
    }
}
