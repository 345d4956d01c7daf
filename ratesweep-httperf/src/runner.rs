//! Running httperf as a child process

use crate::error::{HttperfError, HttperfResult};
use crate::invocation::Invocation;
use async_trait::async_trait;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info, trace, warn};

/// Everything captured from one finished run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOutput {
    /// stdout and stderr lines interleaved in the order they were read
    pub lines: Vec<String>,
    pub exit_code: Option<i32>,
    pub elapsed: Duration,
}

/// Something that can execute an [`Invocation`] to completion
#[async_trait]
pub trait LoadGenerator: Send + Sync {
    async fn run(&self, invocation: &Invocation) -> HttperfResult<RunOutput>;
}

/// Runs the real httperf binary named by the invocation
#[derive(Debug, Clone, Default)]
pub struct HttperfRunner;

impl HttperfRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LoadGenerator for HttperfRunner {
    async fn run(&self, invocation: &Invocation) -> HttperfResult<RunOutput> {
        info!(
            uri = invocation.uri(),
            rate = invocation.rate(),
            "Starting httperf run"
        );
        debug!("Executing: {}", invocation);

        let started = Instant::now();

        let mut cmd = Command::new(invocation.program());
        cmd.args(invocation.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|source| HttperfError::Spawn {
            program: invocation.program().to_path_buf(),
            source,
        })?;

        let stdout = child
            .stdout
            .take()
            .ok_or(HttperfError::MissingPipe("stdout"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or(HttperfError::MissingPipe("stderr"))?;

        let mut stdout = BufReader::new(stdout);
        let mut stderr = BufReader::new(stderr);
        let mut stdout_buf = Vec::new();
        let mut stderr_buf = Vec::new();
        let mut stdout_open = true;
        let mut stderr_open = true;
        let mut lines = Vec::new();

        while stdout_open || stderr_open {
            tokio::select! {
                line = read_line_lossy(&mut stdout, &mut stdout_buf), if stdout_open => match line? {
                    Some(line) => {
                        trace!("httperf stdout: {}", line);
                        lines.push(line);
                    }
                    None => stdout_open = false,
                },
                line = read_line_lossy(&mut stderr, &mut stderr_buf), if stderr_open => match line? {
                    Some(line) => {
                        trace!("httperf stderr: {}", line);
                        lines.push(line);
                    }
                    None => stderr_open = false,
                },
            }
        }

        let status = child.wait().await?;
        let elapsed = started.elapsed();

        if !status.success() {
            warn!(
                uri = invocation.uri(),
                rate = invocation.rate(),
                "httperf exited with {}",
                status
            );
        }

        info!(
            uri = invocation.uri(),
            rate = invocation.rate(),
            lines = lines.len(),
            "httperf run finished in {:.2?}",
            elapsed
        );

        Ok(RunOutput {
            lines,
            exit_code: status.code(),
            elapsed,
        })
    }
}

/// Reads one line, replacing invalid UTF-8 instead of failing. `buf` must
/// outlive the call so a read cancelled by `select!` resumes where it stopped.
async fn read_line_lossy<R>(reader: &mut R, buf: &mut Vec<u8>) -> std::io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let read = reader.read_until(b'\n', buf).await?;
    if read == 0 && buf.is_empty() {
        return Ok(None);
    }
    while matches!(buf.last(), Some(b'\n' | b'\r')) {
        buf.pop();
    }
    let line = String::from_utf8_lossy(buf).into_owned();
    buf.clear();
    Ok(Some(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_line_lossy_replaces_invalid_bytes() {
        let mut reader: &[u8] = b"ok\r\nbad \xff host\ntail";
        let mut buf = Vec::new();

        let first = read_line_lossy(&mut reader, &mut buf).await.unwrap();
        let second = read_line_lossy(&mut reader, &mut buf).await.unwrap();
        let third = read_line_lossy(&mut reader, &mut buf).await.unwrap();
        let end = read_line_lossy(&mut reader, &mut buf).await.unwrap();

        assert_eq!(first.as_deref(), Some("ok"));
        assert_eq!(second.as_deref(), Some("bad \u{FFFD} host"));
        assert_eq!(third.as_deref(), Some("tail"));
        assert_eq!(end, None);
    }
}
