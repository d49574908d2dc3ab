//! Completion helper run as a child process.
//!
//! The prompt goes to the helper's stdin and the completion is read from
//! its stdout. The child is killed once the timeout elapses.

use super::{CompletionRequest, TextCompletion};
use crate::error::{ForgeError, Result};
use std::io::{Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// A helper command line, already split into program and arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessCompletion {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl ProcessCompletion {
    /// Parse a command line with shell-words. No shell is involved.
    pub fn from_command(command: &str, timeout: Duration) -> Result<Self> {
        let mut parts = shell_words::split(command).map_err(|e| {
            ForgeError::UserError(format!(
                "failed to parse completion command '{}': {}\n\
                 Fix: check for unmatched quotes or invalid escape sequences.",
                command, e
            ))
        })?;

        if parts.is_empty() {
            return Err(ForgeError::UserError(
                "completion command is empty".to_string(),
            ));
        }

        let program = parts.remove(0);
        Ok(Self {
            program,
            args: parts,
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl TextCompletion for ProcessCompletion {
    fn generate(&self, request: &CompletionRequest) -> Result<String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .env("PROMPTFORGE_MAX_TOKENS", request.max_tokens.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                ForgeError::CompletionError(format!(
                    "failed to start '{}': {}",
                    self.program, e
                ))
            })?;

        // Feed stdin and drain stdout on their own threads so a helper that
        // never reads its input cannot block us past the timeout.
        if let Some(mut stdin) = child.stdin.take() {
            let prompt = request.prompt.clone();
            thread::spawn(move || {
                let _ = stdin.write_all(prompt.as_bytes());
            });
        }

        let (tx, rx) = mpsc::channel();
        if let Some(mut stdout) = child.stdout.take() {
            thread::spawn(move || {
                let mut out = String::new();
                let read = stdout.read_to_string(&mut out).map(|_| out);
                let _ = tx.send(read);
            });
        }

        let status = wait_with_timeout(&mut child, self.timeout)?;
        let Some(status) = status else {
            tracing::warn!(
                program = %self.program,
                timeout_ms = self.timeout.as_millis() as u64,
                "completion helper timed out"
            );
            return Err(ForgeError::CompletionError(format!(
                "'{}' timed out after {} ms",
                self.program,
                self.timeout.as_millis()
            )));
        };

        if !status.success() {
            return Err(ForgeError::CompletionError(format!(
                "'{}' exited with {}",
                self.program, status
            )));
        }

        match rx.recv_timeout(self.timeout) {
            Ok(Ok(out)) => Ok(out),
            Ok(Err(e)) => Err(ForgeError::CompletionError(format!(
                "failed to read output of '{}': {}",
                self.program, e
            ))),
            Err(_) => Err(ForgeError::CompletionError(format!(
                "'{}' produced no readable output",
                self.program
            ))),
        }
    }
}

/// Wait for the child, killing it when `timeout` elapses.
///
/// Returns `None` on timeout.
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<Option<ExitStatus>> {
    let start = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(Some(status)),
            Ok(None) => {
                if start.elapsed() >= timeout {
                    kill_process(child);
                    return Ok(None);
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(e) => {
                return Err(ForgeError::CompletionError(format!(
                    "failed to check helper status: {}",
                    e
                )));
            }
        }
    }
}

fn kill_process(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn request(prompt: &str) -> CompletionRequest {
        CompletionRequest {
            prompt: prompt.to_string(),
            max_tokens: 256,
            preserve: Vec::new(),
        }
    }

    #[test]
    fn echoes_stdin() {
        let helper = ProcessCompletion::from_command("cat", Duration::from_secs(5)).unwrap();
        assert_eq!(helper.generate(&request("hello helper")).unwrap(), "hello helper");
    }

    #[test]
    fn passes_arguments() {
        let helper =
            ProcessCompletion::from_command("sh -c 'echo \"$PROMPTFORGE_MAX_TOKENS\"'", Duration::from_secs(5))
                .unwrap();
        assert_eq!(helper.generate(&request("")).unwrap(), "256\n");
    }

    #[test]
    fn times_out() {
        let helper =
            ProcessCompletion::from_command("sleep 10", Duration::from_millis(200)).unwrap();
        let start = Instant::now();
        let err = helper.generate(&request("x")).unwrap_err();
        assert!(start.elapsed() < Duration::from_secs(5));
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn nonzero_exit_fails() {
        let helper = ProcessCompletion::from_command("false", Duration::from_secs(5)).unwrap();
        assert!(matches!(
            helper.generate(&request("x")),
            Err(ForgeError::CompletionError(_))
        ));
    }

    #[test]
    fn missing_program_fails() {
        let helper =
            ProcessCompletion::from_command("nonexistent_helper_xyz_123", Duration::from_secs(1))
                .unwrap();
        let err = helper.generate(&request("x")).unwrap_err();
        assert!(err.to_string().contains("failed to start"));
    }

    #[test]
    fn unparseable_command_is_user_error() {
        let err = ProcessCompletion::from_command("echo \"open", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, ForgeError::UserError(_)));
        assert!(ProcessCompletion::from_command("   ", Duration::from_secs(1)).is_err());
    }
}
