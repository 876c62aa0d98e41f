// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Host capabilities a task depends on

use crate::error::{Result, TaskError};
use crate::file;
use crate::input::Inputs;
use crate::process::ToolRunner;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// What a task needs from its environment.
///
/// `SystemHost` talks to the real machine; tests swap in a recording double.
#[async_trait]
pub trait TaskHost: Send + Sync {
    fn get_input(&self, name: &str, required: bool) -> Result<Option<String>>;

    fn which(&self, tool: &str) -> Result<PathBuf>;

    fn mkdir_p(&self, path: &Path) -> Result<()>;

    fn cd(&self, path: &Path) -> Result<()>;

    /// Run `tool` with `args` to completion. `Ok` only for exit code 0.
    async fn exec(&self, tool: &Path, args: &[String]) -> Result<i32>;
}

pub struct SystemHost {
    inputs: Inputs,
}

impl SystemHost {
    pub fn new(inputs: Inputs) -> Self {
        Self { inputs }
    }
}

#[async_trait]
impl TaskHost for SystemHost {
    fn get_input(&self, name: &str, required: bool) -> Result<Option<String>> {
        self.inputs.get(name, required)
    }

    fn which(&self, tool: &str) -> Result<PathBuf> {
        let path = which::which(tool).map_err(|e| TaskError::Resolution {
            tool: tool.to_string(),
            source: Some(e),
        })?;
        log::debug!("which {}: {}", tool, path.display());
        Ok(path)
    }

    fn mkdir_p(&self, path: &Path) -> Result<()> {
        file::mkdir_p(path)
    }

    fn cd(&self, path: &Path) -> Result<()> {
        file::cd(path)
    }

    async fn exec(&self, tool: &Path, args: &[String]) -> Result<i32> {
        let mut runner = ToolRunner::new(tool);
        for arg in args {
            runner.arg(arg.as_str());
        }
        runner.exec().await
    }
}
