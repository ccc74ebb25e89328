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

//! Capability descriptors
//!
//! A descriptor pairs a capability name with the implementation that
//! provides it, plus the names it depends on.

use smallvec::SmallVec;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Dependency list, inline for the common case of a handful of names
pub type Dependencies = SmallVec<[&'static str; 4]>;

/// Trait implemented by every capability provider
pub trait Capability: Any + Send + Sync {
    /// Get type name
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Downcast to Any
    fn as_any(&self) -> &dyn Any;

    /// Whether `other` is the same implementation as `self`.
    ///
    /// Without an equality hook two separate instances never match; shared
    /// allocations are compared before this is asked.
    fn same_impl(&self, _other: &dyn Capability) -> bool {
        false
    }
}

/// Implements [`Capability`] for a provider type
///
/// The `eq` form compares separate instances through `PartialEq`.
#[macro_export]
macro_rules! impl_capability {
    ($t:ty) => {
        impl $crate::capability::Capability for $t {
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
        }
    };

    ($t:ty, eq) => {
        impl $crate::capability::Capability for $t {
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }

            fn same_impl(&self, other: &dyn $crate::capability::Capability) -> bool {
                other
                    .as_any()
                    .downcast_ref::<$t>()
                    .is_some_and(|other| other == self)
            }
        }
    };
}

/// Immutable description of a capability module
#[derive(Clone)]
pub struct CapabilityDescriptor {
    name: &'static str,
    version: &'static str,
    dependencies: Dependencies,
    implementation: Arc<dyn Capability>,
}

impl CapabilityDescriptor {
    /// Create a descriptor with version "0" and no dependencies
    pub fn new<C: Capability>(name: &'static str, implementation: C) -> Self {
        Self::from_arc(name, Arc::new(implementation))
    }

    /// Create a descriptor around an already shared implementation
    pub fn from_arc(name: &'static str, implementation: Arc<dyn Capability>) -> Self {
        Self {
            name,
            version: "0",
            dependencies: Dependencies::new(),
            implementation,
        }
    }

    /// Set the version string
    pub fn with_version(mut self, version: &'static str) -> Self {
        self.version = version;
        self
    }

    /// Declare a capability that must be attached first
    pub fn depends_on(mut self, dependency: &'static str) -> Self {
        if !self.dependencies.contains(&dependency) {
            self.dependencies.push(dependency);
        }
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn version(&self) -> &'static str {
        self.version
    }

    pub fn dependencies(&self) -> &[&'static str] {
        &self.dependencies
    }

    pub fn implementation(&self) -> &Arc<dyn Capability> {
        &self.implementation
    }

    /// Check whether two descriptors describe the same module.
    ///
    /// Version and dependency list must agree, and the implementation must be
    /// the same allocation or compare equal through [`Capability::same_impl`].
    pub fn same_as(&self, other: &CapabilityDescriptor) -> bool {
        if self.name != other.name
            || self.version != other.version
            || self.dependencies != other.dependencies
        {
            return false;
        }
        Arc::ptr_eq(&self.implementation, &other.implementation)
            || self
                .implementation
                .same_impl(other.implementation.as_ref())
    }
}

impl fmt::Debug for CapabilityDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapabilityDescriptor")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("dependencies", &self.dependencies)
            .field("implementation", &self.implementation.type_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(PartialEq)]
    struct Brush(u32);
    impl_capability!(Brush, eq);

    struct Pen;
    impl_capability!(Pen);

    #[test]
    fn test_same_allocation_is_identical() {
        let shared: Arc<dyn Capability> = Arc::new(Pen);
        let a = CapabilityDescriptor::from_arc("drawing", shared.clone());
        let b = CapabilityDescriptor::from_arc("drawing", shared);
        assert!(a.same_as(&b));
    }

    #[test]
    fn test_equal_instances_are_identical() {
        let a = CapabilityDescriptor::new("drawing", Brush(1)).with_version("1");
        let b = CapabilityDescriptor::new("drawing", Brush(1)).with_version("1");
        assert!(a.same_as(&b));
    }

    #[test]
    fn test_different_value_same_version_conflicts() {
        let a = CapabilityDescriptor::new("drawing", Brush(1));
        let b = CapabilityDescriptor::new("drawing", Brush(2));
        assert!(!a.same_as(&b));
    }

    #[test]
    fn test_instances_without_equality_hook_conflict() {
        let a = CapabilityDescriptor::new("drawing", Pen);
        let b = CapabilityDescriptor::new("drawing", Pen);
        assert!(!a.same_as(&b));
    }

    #[test]
    fn test_version_or_type_change_conflicts() {
        let v1 = CapabilityDescriptor::new("drawing", Brush(1)).with_version("1");
        let v2 = CapabilityDescriptor::new("drawing", Brush(1)).with_version("2");
        let pen = CapabilityDescriptor::new("drawing", Pen).with_version("1");
        assert!(!v1.same_as(&v2));
        assert!(!v1.same_as(&pen));
    }

    #[test]
    fn test_depends_on_deduplicates() {
        let d = CapabilityDescriptor::new("drawing", Brush(1))
            .depends_on("ordering")
            .depends_on("ordering");
        assert_eq!(d.dependencies(), &["ordering"]);
    }
}
