//! Test support: logging setup and a recording command runner

use std::collections::HashMap;
use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};
use std::sync::{Mutex, Once};

use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::infrastructure::traits::CommandRunner;

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        if env::var("RUST_LOG").is_err() {
            env::set_var("RUST_LOG", "trace");
        }
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// One recorded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Program and arguments joined by single spaces.
    pub line: String,
    /// Working directory for interactive runs, `None` for captured runs.
    pub cwd: Option<PathBuf>,
}

/// [`CommandRunner`] that records every call instead of spawning processes.
///
/// Responses are keyed by the full command line (`docker compose config
/// --services`). Unknown commands succeed with empty output.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<RecordedCall>>,
    stdout: HashMap<String, String>,
    exit_codes: HashMap<String, i32>,
    missing: Vec<String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canned stdout for `line`.
    pub fn with_stdout(mut self, line: &str, stdout: &str) -> Self {
        self.stdout.insert(line.to_string(), stdout.to_string());
        self
    }

    /// Exit code for `line`.
    pub fn with_exit_code(mut self, line: &str, code: i32) -> Self {
        self.exit_codes.insert(line.to_string(), code);
        self
    }

    /// Make `program` fail to spawn with `NotFound`.
    pub fn without_program(mut self, program: &str) -> Self {
        self.missing.push(program.to_string());
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Recorded command lines only.
    pub fn lines(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.line).collect()
    }

    fn record(&self, cmd: &str, args: &[&str], cwd: Option<&Path>) -> io::Result<(String, ExitStatus)> {
        if self.missing.iter().any(|m| m == cmd) {
            return Err(io::Error::new(io::ErrorKind::NotFound, format!("{cmd}: not found")));
        }
        let line = std::iter::once(cmd).chain(args.iter().copied()).collect::<Vec<_>>().join(" ");
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                line: line.clone(),
                cwd: cwd.map(Path::to_path_buf),
            });
        }
        let code = self.exit_codes.get(&line).copied().unwrap_or(0);
        Ok((line, exit_status(code)))
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, cmd: &str, args: &[&str]) -> io::Result<Output> {
        let (line, status) = self.record(cmd, args, None)?;
        Ok(Output {
            status,
            stdout: self.stdout.get(&line).cloned().unwrap_or_default().into_bytes(),
            stderr: Vec::new(),
        })
    }

    fn run_interactive(&self, cmd: &str, args: &[&str], cwd: &Path) -> io::Result<ExitStatus> {
        self.record(cmd, args, Some(cwd)).map(|(_, status)| status)
    }
}

#[cfg(unix)]
fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    ExitStatus::from_raw(code as u32)
}
