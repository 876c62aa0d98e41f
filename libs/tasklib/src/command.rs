// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Host logging commands
//!
//! The host watches the task's stdout for lines of the form
//! `##vso[area.action key=value;key=value]message` and acts on them.

use std::fmt;
use std::io::{self, Write};

/// Logical outcome reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskResult {
    Succeeded,
    Failed,
}

impl TaskResult {
    pub fn from_exit_code(code: i32) -> Self {
        if code == 0 {
            TaskResult::Succeeded
        } else {
            TaskResult::Failed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskResult::Succeeded => "Succeeded",
            TaskResult::Failed => "Failed",
        }
    }
}

impl fmt::Display for TaskResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCommand {
    command: String,
    properties: Vec<(String, String)>,
    message: String,
}

impl TaskCommand {
    pub fn new(command: &str, message: impl Into<String>) -> Self {
        Self {
            command: command.to_string(),
            properties: Vec::new(),
            message: message.into(),
        }
    }

    pub fn property(mut self, key: &str, value: impl Into<String>) -> Self {
        self.properties.push((key.to_string(), value.into()));
        self
    }

    pub fn debug(message: impl Into<String>) -> Self {
        Self::new("task.debug", message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new("task.logissue", message).property("type", "warning")
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new("task.logissue", message).property("type", "error")
    }

    pub fn complete(result: TaskResult, message: impl Into<String>) -> Self {
        Self::new("task.complete", message).property("result", result.as_str())
    }
}

impl fmt::Display for TaskCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "##vso[{}", self.command)?;

        if !self.properties.is_empty() {
            f.write_str(" ")?;
            for (key, value) in &self.properties {
                write!(f, "{}={};", key, escape_property(value))?;
            }
        }

        write!(f, "]{}", escape_data(&self.message))
    }
}

fn escape_data(s: &str) -> String {
    s.replace('%', "%AZP25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape_data(s).replace(';', "%3B").replace(']', "%5D")
}

/// Write one line to stdout, where the host is listening.
pub fn write_line(line: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", line)?;
    stdout.flush()
}

/// Write a command line to stdout.
pub fn issue(command: &TaskCommand) -> io::Result<()> {
    write_line(&command.to_string())
}

/// Report the task result to the host.
///
/// A failure is also logged as an error issue so it shows up in the run summary.
pub fn set_result(result: TaskResult, message: &str) -> io::Result<()> {
    if result == TaskResult::Failed {
        issue(&TaskCommand::error(message))?;
    }
    issue(&TaskCommand::complete(result, message))
}
