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

//! Stroke-order capability.
//!
//! Maps a character to its strokes in writing order. The table is data, not
//! an algorithm; larger tables are loaded with [`StrokeOrder::from_json`].
//!
//! # Examples
//!
//! ```
//! use hanzi_host::builtin::StrokeOrder;
//!
//! let order = StrokeOrder::seed();
//! assert_eq!(order.stroke_count('十'), Some(2));
//! ```

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::capability::{Capability, CapabilityDescriptor};
use crate::error::Result;
use crate::impl_capability;
use crate::plugin::Plugin;
use crate::registry::CapabilityRegistry;

/// Capability name
pub const ORDERING: &str = "ordering";

/// Character → stroke names in writing order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StrokeOrder {
    strokes: AHashMap<char, Vec<String>>,
}

impl_capability!(StrokeOrder, eq);

impl PartialEq for StrokeOrder {
    fn eq(&self, other: &Self) -> bool {
        *self.strokes == *other.strokes
    }
}

impl StrokeOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Small built-in table
    pub fn seed() -> Self {
        let mut order = Self::new();
        order.insert('一', &["横"]);
        order.insert('十', &["横", "竖"]);
        order.insert('人', &["撇", "捺"]);
        order.insert('大', &["横", "撇", "捺"]);
        order.insert('中', &["竖", "横折", "横", "竖"]);
        order.insert('长', &["撇", "横", "竖提", "捺"]);
        order.insert('好', &["撇点", "撇", "横", "横撇", "竖钩", "横"]);
        order
    }

    /// Parse a table from JSON (`{"strokes": {"十": ["横", "竖"]}}`)
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn insert(&mut self, ch: char, strokes: &[&str]) {
        self.strokes
            .insert(ch, strokes.iter().map(|s| s.to_string()).collect());
    }

    /// Strokes of `ch` in writing order
    pub fn stroke_order(&self, ch: char) -> Option<&[String]> {
        self.strokes.get(&ch).map(Vec::as_slice)
    }

    pub fn stroke_count(&self, ch: char) -> Option<usize> {
        self.strokes.get(&ch).map(Vec::len)
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}

/// Attaches [`StrokeOrder`] as `ordering`
pub struct OrderingPlugin {
    table: Arc<dyn Capability>,
}

impl OrderingPlugin {
    pub fn new(table: StrokeOrder) -> Self {
        Self {
            table: Arc::new(table),
        }
    }
}

impl Default for OrderingPlugin {
    fn default() -> Self {
        Self::new(StrokeOrder::seed())
    }
}

impl Plugin for OrderingPlugin {
    fn plugin_name(&self) -> &'static str {
        "OrderingPlugin"
    }

    fn provides(&self) -> &[&'static str] {
        &[ORDERING]
    }

    fn attach(&self, registry: &mut CapabilityRegistry) -> Result<()> {
        registry.attach(CapabilityDescriptor::from_arc(ORDERING, self.table.clone()))?;
        Ok(())
    }
}
