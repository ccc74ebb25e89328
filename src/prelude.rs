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

//! Convenient re-exports of commonly used types.
//!
//! The prelude can be imported with:
//! ```
//! use hanzi_host::prelude::*;
//! ```

pub use crate::builtin::{
    default_plugins, DrawOptions, DrawingPlugin, OrderingPlugin, PolyphonePlugin, PolyphoneTable,
    StrokeDrawing, StrokeOrder, DRAWING, ORDERING, POLYPHONE,
};
pub use crate::capability::{Capability, CapabilityDescriptor};
pub use crate::config::HostConfig;
pub use crate::error::{BootstrapError, BootstrapReason, HostError, Result};
pub use crate::host::{Core, Host, MountState, Mounted};
pub use crate::plugin::{CapabilityPlugin, Plugin};
pub use crate::registry::{AttachOutcome, CapabilityRegistry};
pub use crate::view::{CharacterPanel, DiagnosticView, RootView};
