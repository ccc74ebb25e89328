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

//! Plugin attachment protocol
//!
//! A plugin extends a [`CapabilityRegistry`] with one or more capabilities.
//! `attach` may only touch the registry it is handed and must be safe to call
//! more than once. Plugins that need a sibling attached first say so through
//! [`Plugin::dependencies`]; nothing else about sibling order may be assumed.

use crate::capability::CapabilityDescriptor;
use crate::error::{HostError, Result};
use crate::registry::CapabilityRegistry;

#[cfg(feature = "profiling")]
use tracing::info_span;

/// Plugin trait for modular capability registration
pub trait Plugin {
    /// Name used in logs and diagnostics
    fn plugin_name(&self) -> &'static str;

    /// Capabilities this plugin attaches, in attach order
    fn provides(&self) -> &[&'static str] {
        &[]
    }

    /// Capabilities that must be attached before this plugin runs
    fn dependencies(&self) -> &[&'static str] {
        &[]
    }

    /// Attach the plugin's capabilities to the registry
    fn attach(&self, registry: &mut CapabilityRegistry) -> Result<()>;
}

/// Boxed plugin, as queued by the host
pub type BoxedPlugin = Box<dyn Plugin>;

/// Capability a plugin-level failure is reported against.
///
/// The first provided capability, or the plugin name for plugins that do not
/// declare what they provide.
pub fn plugin_label(plugin: &dyn Plugin) -> &'static str {
    plugin
        .provides()
        .first()
        .copied()
        .unwrap_or_else(|| plugin.plugin_name())
}

/// Check declared dependencies, then run the plugin's `attach`
pub fn attach_plugin(registry: &mut CapabilityRegistry, plugin: &dyn Plugin) -> Result<()> {
    let name = plugin.plugin_name();

    #[cfg(feature = "profiling")]
    let span = info_span!("plugin.attach", plugin = name);
    #[cfg(feature = "profiling")]
    let _span_guard = span.enter();

    if let Some(missing) = plugin
        .dependencies()
        .iter()
        .find(|dep| !registry.has(dep))
    {
        return Err(HostError::DependencyMissing {
            capability: plugin_label(plugin).to_string(),
            dependency: missing.to_string(),
        });
    }

    tracing::debug!(plugin = name, "attaching plugin");
    plugin.attach(registry)
}

/// Plugin that attaches a single descriptor
#[derive(Debug, Clone)]
pub struct CapabilityPlugin {
    plugin_name: &'static str,
    provides: [&'static str; 1],
    descriptor: CapabilityDescriptor,
}

impl CapabilityPlugin {
    pub fn new(plugin_name: &'static str, descriptor: CapabilityDescriptor) -> Self {
        Self {
            plugin_name,
            provides: [descriptor.name()],
            descriptor,
        }
    }

    pub fn descriptor(&self) -> &CapabilityDescriptor {
        &self.descriptor
    }
}

impl Plugin for CapabilityPlugin {
    fn plugin_name(&self) -> &'static str {
        self.plugin_name
    }

    fn provides(&self) -> &[&'static str] {
        &self.provides
    }

    fn dependencies(&self) -> &[&'static str] {
        self.descriptor.dependencies()
    }

    fn attach(&self, registry: &mut CapabilityRegistry) -> Result<()> {
        registry.attach(self.descriptor.clone()).map(|_| ())
    }
}
