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

//! Error types

use std::fmt;

/// Host error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// Capability already attached with a different implementation
    Conflict { capability: String },

    /// A declared dependency was never attached
    DependencyMissing {
        capability: String,
        dependency: String,
    },

    /// Capability requested but never attached
    NotAttached(String),

    /// Capability attached, but not of the requested concrete type
    CapabilityTypeMismatch {
        capability: String,
        expected: &'static str,
    },

    /// Configuration could not be parsed
    Config(String),

    /// IO error (config file, etc.)
    Io(String),

    /// Bootstrap failed before mount
    Bootstrap(BootstrapError),
}

/// Why bootstrap stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapReason {
    /// Two plugins claimed the capability with different implementations
    Conflict,
    /// The capability declares a dependency that is not attached
    DependencyMissing { dependency: String },
    /// The capability is required but no plugin attached it
    MissingRequired,
    /// The plugin returned some other error while attaching
    PluginFailed(String),
}

/// Fatal error raised during the attaching/verification phases.
///
/// Always halts mounting; the process has to be restarted with a corrected
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapError {
    pub capability: String,
    pub reason: BootstrapReason,
}

impl BootstrapError {
    pub fn new(capability: impl Into<String>, reason: BootstrapReason) -> Self {
        Self {
            capability: capability.into(),
            reason,
        }
    }

    /// Classify an error raised while attaching a plugin labelled `label`
    pub fn from_attach(label: &str, err: HostError) -> Self {
        match err {
            HostError::Conflict { capability } => Self::new(capability, BootstrapReason::Conflict),
            HostError::DependencyMissing {
                capability,
                dependency,
            } => Self::new(capability, BootstrapReason::DependencyMissing { dependency }),
            HostError::Bootstrap(inner) => inner,
            other => Self::new(label, BootstrapReason::PluginFailed(other.to_string())),
        }
    }
}

impl fmt::Display for BootstrapReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootstrapReason::Conflict => write!(f, "conflicting implementation"),
            BootstrapReason::DependencyMissing { dependency } => {
                write!(f, "dependency '{dependency}' is not attached")
            }
            BootstrapReason::MissingRequired => write!(f, "required capability is not attached"),
            BootstrapReason::PluginFailed(msg) => write!(f, "plugin failed: {msg}"),
        }
    }
}

impl fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bootstrap failed on capability '{}': {}",
            self.capability, self.reason
        )
    }
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::Conflict { capability } => {
                write!(f, "Capability '{capability}' already attached with a different implementation")
            }
            HostError::DependencyMissing {
                capability,
                dependency,
            } => write!(f, "Capability '{capability}' depends on '{dependency}', which is not attached"),
            HostError::NotAttached(name) => write!(f, "Capability not attached: {name}"),
            HostError::CapabilityTypeMismatch {
                capability,
                expected,
            } => write!(f, "Capability '{capability}' is not a {expected}"),
            HostError::Config(msg) => write!(f, "Config error: {msg}"),
            HostError::Io(msg) => write!(f, "IO error: {msg}"),
            HostError::Bootstrap(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for BootstrapError {}

impl std::error::Error for HostError {}

impl From<std::io::Error> for HostError {
    fn from(err: std::io::Error) -> Self {
        HostError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for HostError {
    fn from(err: serde_json::Error) -> Self {
        HostError::Config(err.to_string())
    }
}

impl From<BootstrapError> for HostError {
    fn from(err: BootstrapError) -> Self {
        HostError::Bootstrap(err)
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, HostError>;
