// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! tasklib - Build Task Library
//!
//! Shared plumbing for build tasks: reading inputs, locating and running
//! tools, and reporting results back to the build host.

pub mod command;
pub mod error;
pub mod file;
pub mod host;
pub mod input;
pub mod manifest;
pub mod process;

pub use command::{set_result, TaskCommand, TaskResult};
pub use error::{Result, TaskError};
pub use file::{cd, mkdir_p};
pub use host::{SystemHost, TaskHost};
pub use input::Inputs;
pub use manifest::TaskManifest;
pub use process::ToolRunner;
