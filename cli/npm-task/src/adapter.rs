// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Turns task inputs into one npm invocation and its exit status into a
//! task result.

use std::path::PathBuf;
use tasklib::{Result, TaskError, TaskHost, TaskManifest, TaskResult};

pub const NPM_TOOL: &str = "npm";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOutcome {
    pub result: TaskResult,
    pub exit_code: Option<i32>,
    pub message: String,
}

/// Run the task once against `host`. Never retries.
pub async fn run<H: TaskHost + ?Sized>(host: &H, manifest: &TaskManifest) -> TaskOutcome {
    match invoke(host).await {
        Ok(code) => TaskOutcome {
            result: TaskResult::from_exit_code(code),
            exit_code: Some(code),
            message: manifest.loc("NpmReturnCode", &[&code]),
        },
        Err(err @ TaskError::Execution { .. }) => {
            log::debug!("taskRunner fail");
            TaskOutcome {
                result: TaskResult::Failed,
                exit_code: err.exit_code(),
                message: manifest.loc("NpmFailed", &[&err]),
            }
        }
        Err(err) => TaskOutcome {
            result: TaskResult::Failed,
            exit_code: None,
            message: err.to_string(),
        },
    }
}

async fn invoke<H: TaskHost + ?Sized>(host: &H) -> Result<i32> {
    let npm = host.which(NPM_TOOL)?;

    let cwd = PathBuf::from(required_input(host, "cwd")?);
    host.mkdir_p(&cwd)?;
    host.cd(&cwd)?;

    let mut args = vec![required_input(host, "command")?];
    // passed as one token, never split
    if let Some(extra) = host.get_input("arguments", false)? {
        args.push(extra);
    }

    host.exec(&npm, &args).await
}

fn required_input<H: TaskHost + ?Sized>(host: &H, name: &str) -> Result<String> {
    host.get_input(name, true)?
        .ok_or_else(|| TaskError::Configuration(name.to_string()))
}
