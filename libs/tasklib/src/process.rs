// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Process utilities

use crate::error::{Result, TaskError};
use std::collections::VecDeque;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

/// Stderr lines kept for the failure message.
const STDERR_TAIL_LINES: usize = 50;

/// Builds and runs a single invocation of an external tool.
#[derive(Debug, Clone)]
pub struct ToolRunner {
    tool: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl ToolRunner {
    pub fn new(tool: impl Into<PathBuf>) -> Self {
        Self {
            tool: tool.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Append one argument verbatim. Empty values are skipped.
    pub fn arg(&mut self, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        if !value.is_empty() {
            self.args.push(value);
        }
        self
    }

    pub fn cwd(&mut self, dir: impl Into<PathBuf>) -> &mut Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Command line as echoed to the log.
    pub fn command_line(&self) -> String {
        std::iter::once(self.tool.display().to_string())
            .chain(self.args.iter().map(|a| quote(a)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn tool_name(&self) -> String {
        self.tool
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.tool.display().to_string())
    }

    /// Run the tool to completion.
    ///
    /// Stdout is passed through. Stderr is passed through and its tail becomes
    /// the error message when the tool exits non-zero.
    pub async fn exec(&self) -> Result<i32> {
        let name = self.tool_name();
        let echo = format!("[command]{}\n", self.command_line());
        if let Err(e) = write_stdout(echo.as_bytes()) {
            log::debug!("unable to echo command line: {}", e);
        }

        let mut cmd = Command::new(&self.tool);
        cmd.args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn().map_err(|e| TaskError::Execution {
            code: None,
            message: format!("failed to start {}: {}", name, e),
        })?;

        let forward_stdout = pump(child.stdout.take(), write_stdout, 0);
        let capture_stderr = pump(child.stderr.take(), write_stderr, STDERR_TAIL_LINES);

        let (_, tail, status) = tokio::join!(forward_stdout, capture_stderr, child.wait());
        let status = status.map_err(|e| TaskError::Execution {
            code: None,
            message: format!("failed to wait for {}: {}", name, e),
        })?;

        log::debug!("{} exited with {}", name, status);

        match status.code() {
            Some(0) => Ok(0),
            Some(code) => {
                let captured = tail.into_iter().collect::<Vec<_>>().join("\n");
                let message = if captured.trim().is_empty() {
                    format!("{} failed with return code: {}", name, code)
                } else {
                    captured
                };
                Err(TaskError::Execution {
                    code: Some(code),
                    message,
                })
            }
            None => Err(TaskError::Execution {
                code: None,
                message: format!("{} was terminated by a signal", name),
            }),
        }
    }
}

fn write_stdout(bytes: &[u8]) -> io::Result<()> {
    let mut out = io::stdout().lock();
    out.write_all(bytes)?;
    out.flush()
}

fn write_stderr(bytes: &[u8]) -> io::Result<()> {
    io::stderr().lock().write_all(bytes)
}

/// Copy `reader` to `sink` byte for byte until EOF, keeping the last `keep`
/// lines (lossily decoded).
///
/// The pipe is drained even after the sink fails, so the child never sees a
/// closed pipe because of us.
async fn pump<R>(
    reader: Option<R>,
    sink: fn(&[u8]) -> io::Result<()>,
    keep: usize,
) -> VecDeque<String>
where
    R: AsyncRead + Unpin,
{
    let mut tail = VecDeque::new();
    let Some(reader) = reader else {
        return tail;
    };

    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    let mut sink_open = true;

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => {
                log::debug!("child output read failed: {}", e);
                break;
            }
        }

        if sink_open {
            if let Err(e) = sink(&buf) {
                log::debug!("output sink closed: {}", e);
                sink_open = false;
            }
        }

        if keep > 0 {
            if tail.len() == keep {
                tail.pop_front();
            }
            let line = String::from_utf8_lossy(&buf);
            tail.push_back(line.trim_end_matches(['\r', '\n']).to_string());
        }
    }

    tail
}

fn quote(arg: &str) -> String {
    if arg.contains(char::is_whitespace) || arg.contains('"') {
        format!("\"{}\"", arg.replace('"', "\\\""))
    } else {
        arg.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_args_are_skipped() {
        let mut runner = ToolRunner::new("/usr/bin/npm");
        runner.arg("install").arg("");
        assert_eq!(runner.args(), ["install"]);
    }

    #[test]
    fn test_argument_string_stays_one_token() {
        let mut runner = ToolRunner::new("/usr/bin/npm");
        runner.arg("run").arg("build --prod");
        assert_eq!(runner.args(), ["run", "build --prod"]);
        assert_eq!(runner.command_line(), "/usr/bin/npm run \"build --prod\"");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exec_success_returns_zero() {
        let mut runner = ToolRunner::new("/bin/sh");
        runner.arg("-c").arg("echo ok");
        assert_eq!(runner.exec().await.unwrap(), 0);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exec_failure_captures_stderr() {
        let mut runner = ToolRunner::new("/bin/sh");
        runner.arg("-c").arg("echo 'npm ERR! missing script: build' >&2; exit 1");

        let err = runner.exec().await.unwrap_err();
        assert_eq!(err.exit_code(), Some(1));
        assert!(err.to_string().contains("missing script: build"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exec_failure_without_stderr_reports_code() {
        let mut runner = ToolRunner::new("/bin/sh");
        runner.arg("-c").arg("exit 3");

        let err = runner.exec().await.unwrap_err();
        assert_eq!(err.exit_code(), Some(3));
        assert_eq!(err.to_string(), "sh failed with return code: 3");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exec_runs_in_cwd() {
        let tmp = tempfile::tempdir().unwrap();
        let mut runner = ToolRunner::new("/bin/sh");
        runner.arg("-c").arg("touch marker").cwd(tmp.path());

        runner.exec().await.unwrap();
        assert!(tmp.path().join("marker").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exec_survives_non_utf8_output() {
        let mut runner = ToolRunner::new("/bin/sh");
        runner.arg("-c").arg(
            "printf 'caf\\351\\n'; i=0; while [ $i -lt 5000 ]; do echo \"line $i\"; i=$((i+1)); done; exit 0",
        );
        assert_eq!(runner.exec().await.unwrap(), 0);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exec_keeps_stderr_after_non_utf8_line() {
        let mut runner = ToolRunner::new("/bin/sh");
        runner.arg("-c").arg(
            "printf 'bad \\377 byte\\n' >&2; i=0; while [ $i -lt 5000 ]; do echo \"err $i\" >&2; i=$((i+1)); done; exit 1",
        );

        let err = runner.exec().await.unwrap_err();
        assert_eq!(err.exit_code(), Some(1));
        let text = err.to_string();
        assert!(text.ends_with("err 4999"));
        assert_eq!(text.lines().count(), STDERR_TAIL_LINES);
    }

    #[tokio::test]
    async fn test_pump_keeps_lossy_tail() {
        let input: &[u8] = b"one\n\xfftwo\r\nthree";
        let tail = pump(Some(input), |_| Ok(()), 2).await;
        assert_eq!(tail, ["\u{fffd}two", "three"]);
    }

    #[tokio::test]
    async fn test_pump_drains_after_sink_fails() {
        let input: &[u8] = b"a\nb\nc\n";
        let tail = pump(
            Some(input),
            |_| Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed")),
            10,
        )
        .await;
        assert_eq!(tail.len(), 3);
    }

    #[tokio::test]
    async fn test_exec_missing_binary_fails_to_start() {
        let runner = ToolRunner::new("/definitely/not/a/real/tool");
        let err = runner.exec().await.unwrap_err();
        assert_eq!(err.exit_code(), None);
        assert!(err.to_string().starts_with("failed to start tool"));
    }
}
