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

//! Polyphone capability: the readings of a character and the word that
//! selects each non-default reading.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::capability::{Capability, CapabilityDescriptor};
use crate::error::Result;
use crate::impl_capability;
use crate::plugin::Plugin;
use crate::registry::CapabilityRegistry;

/// Capability name
pub const POLYPHONE: &str = "polyphone";

/// One reading of a character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    pub pinyin: String,
    /// Words in which this reading applies
    #[serde(default)]
    pub words: Vec<String>,
}

/// Character → readings, default reading first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolyphoneTable {
    readings: AHashMap<char, Vec<Reading>>,
}

impl_capability!(PolyphoneTable, eq);

impl PartialEq for PolyphoneTable {
    fn eq(&self, other: &Self) -> bool {
        *self.readings == *other.readings
    }
}

impl PolyphoneTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Small built-in table
    pub fn seed() -> Self {
        let mut table = Self::new();
        table.insert('长', "cháng", &["长度", "长江"]);
        table.insert('长', "zhǎng", &["长大", "校长"]);
        table.insert('好', "hǎo", &["好人"]);
        table.insert('好', "hào", &["爱好", "好奇"]);
        table.insert('中', "zhōng", &["中国"]);
        table.insert('中', "zhòng", &["中奖"]);
        table.insert('大', "dà", &["大小"]);
        table.insert('大', "dài", &["大夫"]);
        table.insert('人', "rén", &[]);
        table.insert('十', "shí", &[]);
        table.insert('一', "yī", &[]);
        table
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Append a reading; the first reading inserted for a char is its default
    pub fn insert(&mut self, ch: char, pinyin: &str, words: &[&str]) {
        self.readings.entry(ch).or_default().push(Reading {
            pinyin: pinyin.to_string(),
            words: words.iter().map(|w| w.to_string()).collect(),
        });
    }

    pub fn readings(&self, ch: char) -> Option<&[Reading]> {
        self.readings.get(&ch).map(Vec::as_slice)
    }

    pub fn is_polyphone(&self, ch: char) -> bool {
        self.readings.get(&ch).is_some_and(|r| r.len() > 1)
    }

    /// Pick the reading of `ch` inside `word`.
    ///
    /// Matches a listed word anywhere in `word`, so every occurrence of `ch`
    /// in a longer text gets the same reading; use [`resolve_at`] for that.
    /// Falls back to the default reading when no listed word is found;
    /// `None` only when the char is unknown.
    ///
    /// [`resolve_at`]: PolyphoneTable::resolve_at
    pub fn resolve(&self, ch: char, word: &str) -> Option<&str> {
        let readings = self.readings.get(&ch)?;
        readings
            .iter()
            .find(|r| r.words.iter().any(|w| word.contains(w.as_str())))
            .or_else(|| readings.first())
            .map(|r| r.pinyin.as_str())
    }

    /// Pick the reading of the char at char index `pos` in `text`.
    ///
    /// A listed word only counts when one of its occurrences in `text`
    /// covers `pos`. `None` when `pos` is out of range or the char is unknown.
    pub fn resolve_at(&self, text: &str, pos: usize) -> Option<&str> {
        let chars: Vec<char> = text.chars().collect();
        let ch = *chars.get(pos)?;
        let readings = self.readings.get(&ch)?;
        readings
            .iter()
            .find(|r| r.words.iter().any(|w| word_covers(&chars, pos, w)))
            .or_else(|| readings.first())
            .map(|r| r.pinyin.as_str())
    }
}

/// Whether `word` occurs in `chars` at a window that includes `pos`
fn word_covers(chars: &[char], pos: usize, word: &str) -> bool {
    let word: Vec<char> = word.chars().collect();
    word.iter()
        .enumerate()
        .filter(|(_, c)| **c == chars[pos])
        .any(|(offset, _)| {
            pos >= offset
                && chars
                    .get(pos - offset..pos - offset + word.len())
                    .is_some_and(|window| window == word.as_slice())
        })
}

/// Attaches [`PolyphoneTable`] as `polyphone`
pub struct PolyphonePlugin {
    table: Arc<dyn Capability>,
}

impl PolyphonePlugin {
    pub fn new(table: PolyphoneTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }
}

impl Default for PolyphonePlugin {
    fn default() -> Self {
        Self::new(PolyphoneTable::seed())
    }
}

impl Plugin for PolyphonePlugin {
    fn plugin_name(&self) -> &'static str {
        "PolyphonePlugin"
    }

    fn provides(&self) -> &[&'static str] {
        &[POLYPHONE]
    }

    fn attach(&self, registry: &mut CapabilityRegistry) -> Result<()> {
        registry.attach(CapabilityDescriptor::from_arc(POLYPHONE, self.table.clone()))?;
        Ok(())
    }
}
