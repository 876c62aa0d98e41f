// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! npm-task - npm Build Task
//!
//! Runs one npm command in a working folder on behalf of the build host and
//! reports the outcome back to it.

mod adapter;
mod logger;

use anyhow::{Context, Result};
use clap::Parser;
use tasklib::{set_result, Inputs, SystemHost, TaskManifest, TaskResult};

const TASK_JSON: &str = include_str!("../task.json");

/// npm build task
///
/// Inputs normally come from the host as INPUT_CWD, INPUT_COMMAND and
/// INPUT_ARGUMENTS. Flags given here take precedence.
#[derive(Parser, Debug)]
#[command(name = "npm-task")]
#[command(author = "The Rustux Authors")]
#[command(version)]
#[command(about = "Run an npm command as a build task", long_about = None)]
struct Args {
    /// Working folder (created if missing)
    #[arg(long)]
    cwd: Option<String>,

    /// npm command, e.g. install or run
    #[arg(long)]
    command: Option<String>,

    /// Passed to npm as a single argument after the command
    #[arg(long, allow_hyphen_values = true)]
    arguments: Option<String>,

    /// Emit debug output (also enabled by SYSTEM_DEBUG=true)
    #[arg(long)]
    debug: bool,
}

impl Args {
    fn inputs(&self) -> Inputs {
        let mut inputs = Inputs::from_env();
        for (name, value) in [
            ("cwd", &self.cwd),
            ("command", &self.command),
            ("arguments", &self.arguments),
        ] {
            if let Some(value) = value {
                inputs.set(name, value.as_str());
            }
        }
        inputs
    }

    fn debug_enabled(&self) -> bool {
        self.debug
            || std::env::var("SYSTEM_DEBUG")
                .map(|v| v.trim().eq_ignore_ascii_case("true"))
                .unwrap_or(false)
    }
}

#[tokio::main]
async fn run() -> Result<TaskResult> {
    let args = Args::parse();
    logger::init(args.debug_enabled()).context("failed to install logger")?;

    let manifest = TaskManifest::from_json(TASK_JSON).context("invalid embedded task.json")?;
    log::debug!("{} task {}", manifest.friendly_name, manifest.version);

    let host = SystemHost::new(args.inputs());
    let outcome = adapter::run(&host, &manifest).await;
    log::debug!("npm exit code: {:?}", outcome.exit_code);

    set_result(outcome.result, &outcome.message).context("failed to report task result")?;
    Ok(outcome.result)
}

fn main() -> Result<()> {
    if run()? == TaskResult::Failed {
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_parse() {
        let args = Args::parse_from([
            "npm-task",
            "--cwd",
            "/tmp/proj",
            "--command",
            "run",
            "--arguments",
            "--prod",
        ]);
        assert_eq!(args.cwd.as_deref(), Some("/tmp/proj"));
        assert_eq!(args.command.as_deref(), Some("run"));
        assert_eq!(args.arguments.as_deref(), Some("--prod"));
    }

    #[test]
    fn test_flags_become_inputs() {
        let args = Args::parse_from(["npm-task", "--command", "ci"]);
        let inputs = args.inputs();
        assert_eq!(inputs.get("command", true).unwrap().as_deref(), Some("ci"));
    }

    #[test]
    fn test_embedded_manifest_declares_inputs() {
        let manifest = TaskManifest::from_json(TASK_JSON).unwrap();
        assert!(manifest.input("cwd").unwrap().required);
        assert!(manifest.input("command").unwrap().required);
        assert!(!manifest.input("arguments").unwrap().required);
        assert_eq!(
            manifest.loc("NpmReturnCode", &[&0]),
            "npm exited with return code: 0"
        );
    }
}
