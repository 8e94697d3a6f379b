//! Claude CLI subprocess client.
//!
//! Talks to the locally-installed CLI: the first message of a session is
//! sent with the prompt flag and carries the persona system prompt, every
//! later message continues the CLI-side conversation with the continue
//! flag. The CLI has no progress output, so progress updates are
//! elapsed-time ticks while the process runs.

use async_trait::async_trait;
use std::process::Stdio;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info, warn};
use vox_application::ports::provider_client::{
    ProgressCallback, ProgressUpdate, ProviderClient, ProviderClientError, ProviderReply,
};
use vox_domain::ProviderId;

/// How long one CLI call may run before the process is killed.
const CALL_TIMEOUT: Duration = Duration::from_secs(180);

/// Timeout for the `--version` availability probe.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Interval between progress ticks during a call.
const PROGRESS_INTERVAL: Duration = Duration::from_secs(5);

/// Status line reported while the process runs.
const PROGRESS_STATUS: &str = "waiting for the assistant process";

/// Persona prompt prefixed to the first message of every CLI session.
const SYSTEM_PROMPT: &str = "\
You are VoxPilot, an AI voice assistant made by the VoxPilot team.

RULES:
- Only introduce yourself when explicitly asked; never open an answer with who you are
- Never mention Claude or Anthropic
- Keep answers short: two to three sentences unless more detail is requested
- Do not ask follow-up questions like \"Anything else?\"
- Answer the question directly

Now answer only the question below:

";

/// Pick the CLI flag for this point in the session.
fn prompt_flag(first_message: bool) -> &'static str {
    if first_message { "-p" } else { "-c" }
}

/// Build the stdin payload: the persona prompt rides along only once.
fn compose_input(first_message: bool, text: &str) -> String {
    if first_message {
        format!("{SYSTEM_PROMPT}{text}")
    } else {
        text.to_string()
    }
}

/// Client for the local Claude CLI.
pub struct ClaudeCliClient {
    command: String,
    /// First message of a CLI session uses `-p`; later ones `-c`.
    first_message: Mutex<bool>,
}

impl ClaudeCliClient {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            first_message: Mutex::new(true),
        }
    }

    fn is_first_message(&self) -> bool {
        *self.first_message.lock().expect("session flag lock poisoned")
    }

    fn mark_continued(&self) {
        *self.first_message.lock().expect("session flag lock poisoned") = false;
    }
}

#[async_trait]
impl ProviderClient for ClaudeCliClient {
    fn id(&self) -> ProviderId {
        ProviderId::Claude
    }

    async fn is_available(&self) -> bool {
        if which::which(&self.command).is_err() {
            debug!(command = %self.command, "CLI binary not found on PATH");
            return false;
        }

        let mut probe = Command::new(&self.command);
        probe.arg("--version");
        match tokio::time::timeout(PROBE_TIMEOUT, probe.output()).await {
            Ok(Ok(output)) => output.status.success(),
            Ok(Err(err)) => {
                warn!(command = %self.command, error = %err, "version probe failed");
                false
            }
            Err(_) => {
                warn!(command = %self.command, "version probe timed out");
                false
            }
        }
    }

    async fn send_message(
        &self,
        text: &str,
        progress: Option<ProgressCallback>,
    ) -> Result<ProviderReply, ProviderClientError> {
        let first = self.is_first_message();
        let flag = prompt_flag(first);
        let input = compose_input(first, text);
        let started = Instant::now();

        info!(flag, "dispatching to the CLI");

        let mut child = Command::new(&self.command)
            .arg(flag)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|err| {
                ProviderClientError::Process(format!("failed to start {}: {err}", self.command))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| ProviderClientError::Process("child stdin unavailable".to_string()))?;
        stdin
            .write_all(input.as_bytes())
            .await
            .map_err(|err| ProviderClientError::Process(format!("stdin write failed: {err}")))?;
        // Close stdin so the CLI sees end of input.
        drop(stdin);

        let wait = child.wait_with_output();
        tokio::pin!(wait);

        let deadline = tokio::time::sleep(CALL_TIMEOUT);
        tokio::pin!(deadline);

        let mut ticker = tokio::time::interval_at(
            tokio::time::Instant::now() + PROGRESS_INTERVAL,
            PROGRESS_INTERVAL,
        );

        let output = loop {
            tokio::select! {
                result = &mut wait => {
                    break result.map_err(|err| {
                        ProviderClientError::Process(format!("CLI wait failed: {err}"))
                    })?;
                }
                _ = ticker.tick() => {
                    if let Some(progress) = &progress {
                        progress(ProgressUpdate {
                            elapsed: started.elapsed(),
                            status: PROGRESS_STATUS.to_string(),
                        });
                    }
                }
                _ = &mut deadline => {
                    // Dropping the wait future drops the child, and
                    // kill_on_drop takes the process tree down with it.
                    warn!("CLI call timed out");
                    return Err(ProviderClientError::Timeout(CALL_TIMEOUT.as_secs()));
                }
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() && stdout.is_empty() {
            let message = if stderr.is_empty() {
                format!("CLI exited with {}", output.status)
            } else {
                stderr
            };
            return Err(ProviderClientError::Backend(message));
        }

        // The session is live on the CLI side now; continue it next time.
        self.mark_continued();

        let elapsed = started.elapsed();
        info!(
            chars = stdout.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "CLI replied"
        );

        Ok(ProviderReply {
            content: stdout,
            elapsed,
        })
    }

    async fn reset(&self) {
        *self.first_message.lock().expect("session flag lock poisoned") = true;
        debug!("CLI session reset, next message starts a new conversation");
    }
}
