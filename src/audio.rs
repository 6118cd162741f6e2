//! Speech rendering collaborators.
//!
//! The cache only needs `render(text, slow) -> bytes`. Failures are folded
//! into [`RenderOutcome::Empty`] at the call site so a broken synthesizer
//! degrades to silence instead of an error.

use std::io::{self, Read};
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use thiserror::Error;
use tracing::warn;
use wait_timeout::ChildExt;

use crate::config::TtsCommand;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("rendering timed out after {0:?}")]
    Timeout(Duration),

    #[error("renderer failed: {0}")]
    Failed(String),

    #[error("renderer IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub trait AudioRenderer: Send + Sync {
    fn render(&self, text: &str, slow: bool) -> Result<Vec<u8>, RenderError>;
}

/// What a render attempt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Audio(Vec<u8>),
    /// Nothing to play; `reason` says why.
    Empty { reason: String },
}

impl RenderOutcome {
    pub fn bytes(&self) -> &[u8] {
        match self {
            Self::Audio(bytes) => bytes,
            Self::Empty { .. } => &[],
        }
    }

    pub fn is_audio(&self) -> bool {
        matches!(self, Self::Audio(_))
    }
}

/// Renders `text`, logging and absorbing any failure.
pub fn render_or_empty(renderer: &dyn AudioRenderer, text: &str, slow: bool) -> RenderOutcome {
    match renderer.render(text, slow) {
        Ok(bytes) => RenderOutcome::Audio(bytes),
        Err(e) => {
            warn!(text, slow, error = %e, "audio render failed");
            RenderOutcome::Empty {
                reason: e.to_string(),
            }
        }
    }
}

/// Runs an external TTS program with the text as its last argument and
/// returns whatever it writes to stdout, e.g. `espeak-ng --stdout`.
///
/// With a timeout set, a program still running at the deadline is killed
/// and reaped before `RenderError::Timeout` is returned.
pub struct CommandRenderer {
    command: TtsCommand,
    timeout: Option<Duration>,
}

impl CommandRenderer {
    pub fn new(command: TtsCommand) -> Self {
        Self {
            command,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl AudioRenderer for CommandRenderer {
    fn render(&self, text: &str, slow: bool) -> Result<Vec<u8>, RenderError> {
        let mut cmd = Command::new(&self.command.program);
        cmd.args(&self.command.args);
        if slow {
            cmd.args(&self.command.slow_args);
        }
        let mut child = cmd
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // Pipes are drained off-thread so a chatty program cannot stall on a
        // full pipe while we wait on it.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = match self.timeout {
            Some(limit) => match child.wait_timeout(limit)? {
                Some(status) => status,
                None => {
                    // kill fails only if the child already exited; wait reaps it either way.
                    let _ = child.kill();
                    child.wait()?;
                    warn!(program = %self.command.program, ?limit, "tts program killed at deadline");
                    return Err(RenderError::Timeout(limit));
                }
            },
            None => child.wait()?,
        };

        let stdout = collect(stdout)?;
        if !status.success() {
            let stderr = collect(stderr).unwrap_or_default();
            let stderr = String::from_utf8_lossy(&stderr);
            return Err(RenderError::Failed(format!(
                "{} exited with {}: {}",
                self.command.program,
                status,
                stderr.trim()
            )));
        }
        Ok(stdout)
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<io::Result<Vec<u8>>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_end(&mut buf)?;
        }
        Ok(buf)
    })
}

fn collect(reader: JoinHandle<io::Result<Vec<u8>>>) -> Result<Vec<u8>, RenderError> {
    let bytes = reader
        .join()
        .map_err(|_| RenderError::Failed("pipe reader panicked".to_string()))??;
    Ok(bytes)
}

/// Bounds an in-process renderer's running time. The inner call keeps
/// running on its worker thread after a timeout; its result is discarded.
/// External programs should use [`CommandRenderer::with_timeout`] instead,
/// which kills the process.
pub struct TimeoutRenderer {
    inner: Arc<dyn AudioRenderer>,
    timeout: Duration,
}

impl TimeoutRenderer {
    pub fn new(inner: Arc<dyn AudioRenderer>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

impl AudioRenderer for TimeoutRenderer {
    fn render(&self, text: &str, slow: bool) -> Result<Vec<u8>, RenderError> {
        let (tx, rx) = mpsc::channel();
        let inner = Arc::clone(&self.inner);
        let text = text.to_string();
        thread::spawn(move || {
            let _ = tx.send(inner.render(&text, slow));
        });

        match rx.recv_timeout(self.timeout) {
            Ok(result) => result,
            Err(mpsc::RecvTimeoutError::Timeout) => Err(RenderError::Timeout(self.timeout)),
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                Err(RenderError::Failed("render worker exited without a result".to_string()))
            }
        }
    }
}

/// Renders nothing; for runs without a speech backend.
pub struct SilentRenderer;

impl AudioRenderer for SilentRenderer {
    fn render(&self, _text: &str, _slow: bool) -> Result<Vec<u8>, RenderError> {
        Err(RenderError::Failed("no speech backend configured".to_string()))
    }
}
