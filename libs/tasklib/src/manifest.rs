// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! Task manifest (`task.json`)

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskManifest {
    pub name: String,
    #[serde(default)]
    pub friendly_name: String,
    #[serde(default)]
    pub version: TaskVersion,
    #[serde(default)]
    pub inputs: Vec<InputDef>,
    #[serde(default)]
    pub messages: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TaskVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl fmt::Display for TaskVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDef {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub default_value: String,
}

impl TaskManifest {
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    pub fn input(&self, name: &str) -> Option<&InputDef> {
        self.inputs.iter().find(|i| i.name.eq_ignore_ascii_case(name))
    }

    /// Render message `key`, substituting `%s` / `%d` placeholders in order.
    ///
    /// Unknown keys render as the key itself so a missing string never hides
    /// the underlying information.
    pub fn loc(&self, key: &str, args: &[&dyn fmt::Display]) -> String {
        let template = match self.messages.get(key) {
            Some(t) => t.as_str(),
            None => {
                log::warn!("missing message: {}", key);
                return std::iter::once(key.to_string())
                    .chain(args.iter().map(|a| a.to_string()))
                    .collect::<Vec<_>>()
                    .join(" ");
            }
        };

        let mut out = String::with_capacity(template.len());
        let mut args = args.iter();
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '%' {
                match chars.peek() {
                    Some('s') | Some('d') => {
                        chars.next();
                        if let Some(arg) = args.next() {
                            out.push_str(&arg.to_string());
                        }
                        continue;
                    }
                    Some('%') => {
                        chars.next();
                        out.push('%');
                        continue;
                    }
                    _ => {}
                }
            }
            out.push(c);
        }

        out
    }
}
