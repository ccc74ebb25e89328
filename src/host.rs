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

//! Host mount
//!
//! Drives `Uninitialized → Attaching → Verified → Mounted`. Any error while
//! attaching or verifying moves the host to `Failed`, which is terminal.

use std::path::Path;
use std::sync::Arc;

use crate::config::HostConfig;
use crate::error::{BootstrapError, BootstrapReason};
use crate::plugin::{attach_plugin, plugin_label, BoxedPlugin, Plugin};
use crate::registry::CapabilityRegistry;
use crate::view::{DiagnosticView, RootView};

#[cfg(feature = "profiling")]
use tracing::info_span;

/// Registry shared read-only with the view tree after mount
pub type Core = Arc<CapabilityRegistry>;

/// Lifecycle of a host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountState {
    Uninitialized,
    Attaching,
    Verified,
    Mounted,
    Failed,
}

/// Application host: owns the registry until mount
pub struct Host {
    config: HostConfig,
    registry: CapabilityRegistry,
    plugins: Vec<BoxedPlugin>,
    required: Vec<String>,
    state: MountState,
    failure: Option<BootstrapError>,
}

impl Host {
    /// Create a host with an empty registry
    pub fn new(config: HostConfig) -> Self {
        let required = config.required.clone();
        Self {
            config,
            registry: CapabilityRegistry::new(),
            plugins: Vec::new(),
            required,
            state: MountState::Uninitialized,
            failure: None,
        }
    }

    /// Queue a plugin; plugins attach in the order they were added.
    ///
    /// Ignored once bootstrap has started.
    pub fn add_plugin<P: Plugin + 'static>(&mut self, plugin: P) -> &mut Self {
        self.add_boxed_plugin(Box::new(plugin))
    }

    /// Queue already boxed plugins, keeping their order
    pub fn add_plugins(&mut self, plugins: impl IntoIterator<Item = BoxedPlugin>) -> &mut Self {
        for plugin in plugins {
            self.add_boxed_plugin(plugin);
        }
        self
    }

    fn add_boxed_plugin(&mut self, plugin: BoxedPlugin) -> &mut Self {
        if self.state != MountState::Uninitialized {
            tracing::warn!(
                plugin = plugin.plugin_name(),
                state = ?self.state,
                "plugin added after bootstrap started; ignoring"
            );
            return self;
        }
        tracing::info!(plugin = plugin.plugin_name(), "Registering plugin");
        self.plugins.push(plugin);
        self
    }

    /// Require a capability to be attached before mount
    pub fn require(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        if !self.required.contains(&name) {
            self.required.push(name);
        }
        self
    }

    pub fn state(&self) -> MountState {
        self.state
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    /// Registry as attached so far
    pub fn registry(&self) -> &CapabilityRegistry {
        &self.registry
    }

    /// Required capabilities, config entries first
    pub fn required(&self) -> &[String] {
        &self.required
    }

    /// Attach every queued plugin, then verify the required set.
    ///
    /// A failed host keeps returning the same error; there is no retry.
    pub fn bootstrap(&mut self) -> Result<(), BootstrapError> {
        match self.state {
            MountState::Failed => {
                if let Some(err) = &self.failure {
                    return Err(err.clone());
                }
            }
            MountState::Verified | MountState::Mounted => return Ok(()),
            MountState::Uninitialized | MountState::Attaching => {}
        }

        #[cfg(feature = "profiling")]
        let span = info_span!("host.bootstrap", plugins = self.plugins.len());
        #[cfg(feature = "profiling")]
        let _span_guard = span.enter();

        self.state = MountState::Attaching;
        match self.attach_all().and_then(|()| self.verify()) {
            Ok(()) => {
                self.state = MountState::Verified;
                tracing::info!(
                    capabilities = self.registry.len(),
                    "all required capabilities attached"
                );
                Ok(())
            }
            Err(err) => {
                tracing::error!(capability = %err.capability, reason = %err.reason, "bootstrap failed");
                self.state = MountState::Failed;
                self.failure = Some(err.clone());
                Err(err)
            }
        }
    }

    fn attach_all(&mut self) -> Result<(), BootstrapError> {
        for plugin in &self.plugins {
            attach_plugin(&mut self.registry, plugin.as_ref())
                .map_err(|err| BootstrapError::from_attach(plugin_label(plugin.as_ref()), err))?;
        }
        Ok(())
    }

    fn verify(&self) -> Result<(), BootstrapError> {
        let missing = self
            .registry
            .missing(self.required.iter().map(String::as_str));
        match missing.first() {
            Some(first) => {
                tracing::error!(missing = ?missing, "required capabilities not attached");
                Err(BootstrapError::new(*first, BootstrapReason::MissingRequired))
            }
            None => Ok(()),
        }
    }

    /// Bootstrap if needed, freeze the registry and mount the root view.
    ///
    /// On error the view is never touched.
    pub fn mount<V: RootView>(mut self, mut root: V) -> Result<Mounted<V>, BootstrapError> {
        self.bootstrap()?;

        let core: Core = Arc::new(self.registry);
        root.mount(&core);
        tracing::info!(mount_point = %self.config.mount_point, "root view mounted");

        Ok(Mounted {
            core,
            root,
            config: self.config,
        })
    }

    /// Mount and render the root view, or render the bootstrap diagnostic
    pub fn run<V: RootView>(self, root: V) -> Result<String, String> {
        match self.mount(root) {
            Ok(mounted) => Ok(mounted.render()),
            Err(err) => Err(DiagnosticView::new(err).render()),
        }
    }
}

impl Default for Host {
    fn default() -> Self {
        Self::new(HostConfig::default())
    }
}

/// A root view mounted on a verified core
pub struct Mounted<V> {
    core: Core,
    root: V,
    config: HostConfig,
}

impl<V: RootView> Mounted<V> {
    pub fn state(&self) -> MountState {
        MountState::Mounted
    }

    pub fn core(&self) -> &Core {
        &self.core
    }

    pub fn root(&self) -> &V {
        &self.root
    }

    pub fn mount_point(&self) -> &str {
        &self.config.mount_point
    }

    pub fn stylesheet(&self) -> Option<&Path> {
        self.config.stylesheet.as_deref()
    }

    /// Render the root view against the core
    pub fn render(&self) -> String {
        self.root.render(&self.core)
    }
}
