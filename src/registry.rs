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

//! Capability registry
//!
//! Name → implementation map that remembers attachment order. Writes need
//! `&mut self`; once the host mounts, the registry is frozen behind an `Arc`
//! and only read from.

use ahash::AHashMap;
use std::iter::FusedIterator;
use std::sync::Arc;

use crate::capability::{Capability, CapabilityDescriptor};
use crate::error::{HostError, Result};

#[cfg(feature = "profiling")]
use tracing::info_span;

/// What `attach` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachOutcome {
    /// Newly installed at this position
    Attached { order: usize },
    /// Identical descriptor was already installed; nothing changed
    AlreadyAttached { order: usize },
}

impl AttachOutcome {
    pub fn order(&self) -> usize {
        match *self {
            AttachOutcome::Attached { order } | AttachOutcome::AlreadyAttached { order } => order,
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, AttachOutcome::Attached { .. })
    }
}

/// Attachment record for one capability
#[derive(Debug, Clone)]
pub struct AttachmentRecord {
    pub order: usize,
    pub descriptor: CapabilityDescriptor,
}

/// Holds attached capabilities and resolves lookups by name
#[derive(Default)]
pub struct CapabilityRegistry {
    records: Vec<AttachmentRecord>,
    index: AHashMap<&'static str, usize>,
}

impl CapabilityRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a capability module.
    ///
    /// Dependencies are checked before anything is written, so a failed
    /// attach leaves the registry untouched.
    pub fn attach(&mut self, descriptor: CapabilityDescriptor) -> Result<AttachOutcome> {
        let name = descriptor.name();

        #[cfg(feature = "profiling")]
        let span = info_span!("registry.attach", capability = name, attached = self.records.len());
        #[cfg(feature = "profiling")]
        let _span_guard = span.enter();

        if let Some(&order) = self.index.get(name) {
            let existing = &self.records[order].descriptor;
            if existing.same_as(&descriptor) {
                tracing::debug!(capability = name, order, "capability already attached");
                return Ok(AttachOutcome::AlreadyAttached { order });
            }
            return Err(HostError::Conflict {
                capability: name.to_string(),
            });
        }

        if let Some(missing) = descriptor
            .dependencies()
            .iter()
            .find(|dep| !self.index.contains_key(*dep))
        {
            return Err(HostError::DependencyMissing {
                capability: name.to_string(),
                dependency: missing.to_string(),
            });
        }

        let order = self.records.len();
        tracing::info!(
            capability = name,
            version = descriptor.version(),
            order,
            "capability attached"
        );
        self.index.insert(name, order);
        self.records.push(AttachmentRecord { order, descriptor });
        Ok(AttachOutcome::Attached { order })
    }

    /// Check if a capability is attached
    pub fn has(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Get an attached implementation
    pub fn get(&self, name: &str) -> Result<&Arc<dyn Capability>> {
        self.record(name)
            .map(|record| record.descriptor.implementation())
            .ok_or_else(|| HostError::NotAttached(name.to_string()))
    }

    /// Get an attached implementation as its concrete type
    pub fn get_as<T: Capability>(&self, name: &str) -> Result<&T> {
        self.get(name)?
            .as_any()
            .downcast_ref::<T>()
            .ok_or_else(|| HostError::CapabilityTypeMismatch {
                capability: name.to_string(),
                expected: std::any::type_name::<T>(),
            })
    }

    /// Attachment record for a name
    pub fn record(&self, name: &str) -> Option<&AttachmentRecord> {
        self.index.get(name).map(|&order| &self.records[order])
    }

    /// Attached capability names, in attachment order.
    ///
    /// Each call starts a fresh pass over the records.
    pub fn list(&self) -> CapabilityNames<'_> {
        CapabilityNames {
            inner: self.records.iter(),
        }
    }

    /// All records in attachment order
    pub fn records(&self) -> &[AttachmentRecord] {
        &self.records
    }

    /// Names from `required` that are not attached, in the given order
    pub fn missing<'a, I>(&self, required: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        required.into_iter().filter(|name| !self.has(name)).collect()
    }

    /// Number of attached capabilities
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Iterator over attached capability names
#[derive(Clone)]
pub struct CapabilityNames<'a> {
    inner: std::slice::Iter<'a, AttachmentRecord>,
}

impl<'a> Iterator for CapabilityNames<'a> {
    type Item = &'static str;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|record| record.descriptor.name())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for CapabilityNames<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|record| record.descriptor.name())
    }
}

impl ExactSizeIterator for CapabilityNames<'_> {}

impl FusedIterator for CapabilityNames<'_> {}
