// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! File utilities

use crate::error::{Result, TaskError};
use std::path::Path;

/// Create `path` and any missing parents. Succeeds if it already exists.
pub fn mkdir_p(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(TaskError::Configuration("path".to_string()));
    }

    if path.is_dir() {
        return Ok(());
    }

    log::debug!("mkdir -p {}", path.display());
    std::fs::create_dir_all(path).map_err(|e| TaskError::io("Unable to create directory", path, e))
}

/// Change the process's current directory.
pub fn cd(path: &Path) -> Result<()> {
    if !path.is_dir() {
        return Err(TaskError::io(
            "Not found cd:",
            path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory"),
        ));
    }

    log::debug!("cd {}", path.display());
    std::env::set_current_dir(path).map_err(|e| TaskError::io("Unable to cd to", path, e))
}
