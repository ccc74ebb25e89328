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

use serde::Serialize;

use crate::error::Result;
use crate::registry::CapabilityRegistry;

/// Registry inspector for debugging
pub struct RegistryInspector;

impl RegistryInspector {
    /// Get attached capability count
    pub fn capability_count(registry: &CapabilityRegistry) -> usize {
        registry.len()
    }

    /// Get attachment summary, in attachment order
    pub fn attachment_summary(registry: &CapabilityRegistry) -> Vec<AttachmentInfo> {
        registry
            .records()
            .iter()
            .map(|record| {
                let descriptor = &record.descriptor;
                AttachmentInfo {
                    order: record.order,
                    name: descriptor.name().to_string(),
                    version: descriptor.version().to_string(),
                    dependencies: descriptor
                        .dependencies()
                        .iter()
                        .map(|dep| dep.to_string())
                        .collect(),
                    implementation: descriptor.implementation().type_name().to_string(),
                }
            })
            .collect()
    }

    /// Build a report including which required names are missing
    pub fn report<'a>(
        registry: &CapabilityRegistry,
        required: impl IntoIterator<Item = &'a str>,
    ) -> AttachmentReport {
        AttachmentReport {
            attached: Self::attachment_summary(registry),
            missing: registry
                .missing(required)
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }

    /// Print registry summary to console
    pub fn print_summary(registry: &CapabilityRegistry) {
        println!("=== Capability Registry ===");
        println!("Attached: {}", Self::capability_count(registry));
        for info in Self::attachment_summary(registry) {
            if info.dependencies.is_empty() {
                println!("  {}. {} v{} ({})", info.order, info.name, info.version, info.implementation);
            } else {
                println!(
                    "  {}. {} v{} ({}) after [{}]",
                    info.order,
                    info.name,
                    info.version,
                    info.implementation,
                    info.dependencies.join(", ")
                );
            }
        }
    }
}

/// Attachment information for debugging
#[derive(Clone, Debug, Serialize)]
pub struct AttachmentInfo {
    pub order: usize,
    pub name: String,
    pub version: String,
    pub dependencies: Vec<String>,
    pub implementation: String,
}

/// Serializable diagnostics snapshot
#[derive(Clone, Debug, Serialize)]
pub struct AttachmentReport {
    pub attached: Vec<AttachmentInfo>,
    pub missing: Vec<String>,
}

impl AttachmentReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
