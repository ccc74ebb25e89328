// Copyright 2024 Saptak Santra
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Host configuration
//!
//! ```json
//! {
//!   "mount_point": "#app",
//!   "stylesheet": "style.css",
//!   "required": ["ordering", "polyphone", "drawing"]
//! }
//! ```
//!
//! Every field is optional; missing fields take the defaults above.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::builtin::{DRAWING, ORDERING, POLYPHONE};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HostConfig {
    /// Selector of the element the root view is mounted on
    pub mount_point: String,
    /// Stylesheet handed to the UI layer, if any
    pub stylesheet: Option<PathBuf>,
    /// Capabilities that must be attached before mount
    pub required: Vec<String>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            mount_point: "#app".to_string(),
            stylesheet: Some(PathBuf::from("style.css")),
            required: [ORDERING, POLYPHONE, DRAWING]
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }
}

impl HostConfig {
    /// Config that requires nothing
    pub fn permissive() -> Self {
        Self {
            required: Vec::new(),
            ..Self::default()
        }
    }

    /// Parse config from JSON
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Serialize config to pretty JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HostError;

    #[test]
    fn test_default_requires_builtins() {
        let config = HostConfig::default();
        assert_eq!(config.mount_point, "#app");
        assert_eq!(config.required, vec!["ordering", "polyphone", "drawing"]);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = HostConfig::from_json_str(r##"{ "required": ["ordering"] }"##).unwrap();
        assert_eq!(config.mount_point, "#app");
        assert_eq!(config.required, vec!["ordering"]);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = HostConfig::from_json_str(r#"{ "plugins": [] }"#).unwrap_err();
        assert!(matches!(err, HostError::Config(_)));
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = HostConfig::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, HostError::Io(_)));
    }

    #[test]
    fn test_json_roundtrip_keeps_stylesheet() {
        let config = HostConfig::default();
        let json = config.to_json_pretty().unwrap();
        assert_eq!(HostConfig::from_json_str(&json).unwrap(), config);
    }
}
