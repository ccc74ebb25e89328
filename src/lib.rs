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

//! Hanzi Host - capability registry and bootstrap for a character-analysis UI
//!
//! Plugins attach named capabilities (stroke order, polyphone readings,
//! stroke drawing) to a registry; the host verifies the required set and
//! only then mounts the root view.

pub mod builtin;
pub mod capability;
pub mod config;
pub mod debug;
pub mod error;
pub mod host;
pub mod plugin;
pub mod prelude;
pub mod registry;
pub mod view;


pub use capability::*;
pub use config::*;
pub use debug::*;
pub use error::*;
pub use host::*;
pub use plugin::*;
pub use registry::*;
pub use view::*;
