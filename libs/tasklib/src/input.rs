// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Task inputs
//!
//! The host hands inputs to a task as `INPUT_<NAME>` environment variables.
//! Values supplied on the command line override the environment.

use crate::error::{Result, TaskError};
use std::collections::HashMap;

/// Environment variable the host uses for input `name`.
pub fn input_env_var(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

#[derive(Debug, Clone, Default)]
pub struct Inputs {
    overrides: HashMap<String, String>,
    use_env: bool,
}

impl Inputs {
    /// Inputs read from the process environment.
    pub fn from_env() -> Self {
        Self {
            overrides: HashMap::new(),
            use_env: true,
        }
    }

    /// Inputs from explicit values only; the environment is ignored.
    pub fn isolated() -> Self {
        Self::default()
    }

    /// Pin `name` to `value`, shadowing the environment.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.overrides.insert(name.to_lowercase(), value.into());
        self
    }

    /// Trimmed value of `name`. Empty values count as absent.
    pub fn get(&self, name: &str, required: bool) -> Result<Option<String>> {
        let raw = match self.overrides.get(&name.to_lowercase()) {
            Some(v) => Some(v.clone()),
            None if self.use_env => std::env::var(input_env_var(name)).ok(),
            None => None,
        };

        let value = raw
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        match value {
            Some(v) => {
                log::debug!("{}={}", name, v);
                Ok(Some(v))
            }
            None if required => Err(TaskError::Configuration(name.to_string())),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_name() {
        assert_eq!(input_env_var("cwd"), "INPUT_CWD");
        assert_eq!(input_env_var("working dir"), "INPUT_WORKING_DIR");
    }

    #[test]
    fn test_override_is_trimmed() {
        let mut inputs = Inputs::isolated();
        inputs.set("command", "  install \n");
        assert_eq!(inputs.get("command", true).unwrap().as_deref(), Some("install"));
    }

    #[test]
    fn test_blank_required_input_is_configuration_error() {
        let mut inputs = Inputs::isolated();
        inputs.set("command", "   ");
        let err = inputs.get("command", true).unwrap_err();
        assert!(matches!(err, TaskError::Configuration(ref n) if n == "command"));
    }

    #[test]
    fn test_missing_optional_input_is_none() {
        let inputs = Inputs::isolated();
        assert_eq!(inputs.get("arguments", false).unwrap(), None);
    }

    #[test]
    fn test_reads_from_env() {
        std::env::set_var("INPUT_TASKLIB_TEST_ONLY", "from-env");
        let inputs = Inputs::from_env();
        assert_eq!(
            inputs.get("tasklib_test_only", true).unwrap().as_deref(),
            Some("from-env")
        );

        let mut pinned = Inputs::from_env();
        pinned.set("tasklib_test_only", "pinned");
        assert_eq!(
            pinned.get("tasklib_test_only", true).unwrap().as_deref(),
            Some("pinned")
        );
        std::env::remove_var("INPUT_TASKLIB_TEST_ONLY");
    }
}
