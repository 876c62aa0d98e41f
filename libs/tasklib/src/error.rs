// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Task errors

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TaskError>;

/// Everything that can end a task invocation.
///
/// Each variant is terminal: the caller maps it to a single `Failed` result.
#[derive(Debug, Error)]
pub enum TaskError {
    /// A required input was absent or empty.
    #[error("Input required: {0}")]
    Configuration(String),

    /// The external executable is not on the search path.
    #[error("Unable to locate executable file: '{tool}'")]
    Resolution {
        tool: String,
        #[source]
        source: Option<which::Error>,
    },

    /// Creating or entering a directory failed.
    #[error("{action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The child could not be run, or it exited non-zero.
    #[error("{message}")]
    Execution { code: Option<i32>, message: String },
}

impl TaskError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        TaskError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Exit code of the child, when it got far enough to produce one.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            TaskError::Execution { code, .. } => *code,
            _ => None,
        }
    }
}
