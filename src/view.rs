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

//! Root views handed to the UI layer

use crate::builtin::{
    DrawOptions, PolyphoneTable, StrokeDrawing, StrokeOrder, DRAWING, ORDERING, POLYPHONE,
};
use crate::capability::Capability;
use crate::error::{BootstrapError, HostError};
use crate::host::Core;
use crate::registry::CapabilityRegistry;

/// Root of the view tree
pub trait RootView {
    /// Called once, after every required capability is attached
    fn mount(&mut self, core: &Core);

    /// Produce the view's output
    fn render(&self, core: &Core) -> String;
}

/// Look up an optional capability, treating absence as "feature off"
pub fn optional<'a, T: Capability>(core: &'a CapabilityRegistry, name: &str) -> Option<&'a T> {
    match core.get_as::<T>(name) {
        Ok(capability) => Some(capability),
        Err(HostError::NotAttached(_)) => None,
        Err(err) => {
            tracing::warn!(capability = name, error = %err, "capability unusable");
            None
        }
    }
}

/// Shown instead of the application when bootstrap fails
#[derive(Debug, Clone)]
pub struct DiagnosticView {
    error: BootstrapError,
}

impl DiagnosticView {
    pub fn new(error: BootstrapError) -> Self {
        Self { error }
    }

    pub fn error(&self) -> &BootstrapError {
        &self.error
    }

    pub fn render(&self) -> String {
        format!(
            "Application failed to start\n  capability: {}\n  reason: {}\n",
            self.error.capability, self.error.reason
        )
    }
}

/// Per-character panel: stroke order, reading and drawing frames.
///
/// Each section depends on one capability and is hidden when it is absent.
pub struct CharacterPanel {
    text: String,
    options: DrawOptions,
    degraded: Vec<&'static str>,
}

impl CharacterPanel {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            options: DrawOptions::default(),
            degraded: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: DrawOptions) -> Self {
        self.options = options;
        self
    }

    /// Capabilities whose section is hidden
    pub fn degraded(&self) -> &[&'static str] {
        &self.degraded
    }

    fn render_char(&self, core: &CapabilityRegistry, pos: usize, ch: char) -> String {
        let mut line = ch.to_string();

        if let Some(order) = optional::<StrokeOrder>(core, ORDERING) {
            match order.stroke_order(ch) {
                Some(strokes) => {
                    line.push_str(&format!("  strokes: {} ({})", strokes.join(" "), strokes.len()))
                }
                None => line.push_str("  strokes: ?"),
            }
        }

        if let Some(table) = optional::<PolyphoneTable>(core, POLYPHONE) {
            let reading = table.resolve_at(&self.text, pos).unwrap_or("?");
            let marker = if table.is_polyphone(ch) { "*" } else { "" };
            line.push_str(&format!("  pinyin: {reading}{marker}"));
        }

        if let Some(drawing) = optional::<StrokeDrawing>(core, DRAWING) {
            match drawing.plan(ch, &self.options) {
                Some(plan) => line.push_str(&format!("  frames: {}", plan.frame_count())),
                None => line.push_str("  frames: -"),
            }
        }

        line
    }
}

impl RootView for CharacterPanel {
    fn mount(&mut self, core: &Core) {
        let mut degraded = Vec::new();
        if optional::<StrokeOrder>(core, ORDERING).is_none() {
            degraded.push(ORDERING);
        }
        if optional::<PolyphoneTable>(core, POLYPHONE).is_none() {
            degraded.push(POLYPHONE);
        }
        if optional::<StrokeDrawing>(core, DRAWING).is_none() {
            degraded.push(DRAWING);
        }
        for name in &degraded {
            tracing::warn!(capability = *name, "feature hidden: capability unavailable");
        }
        self.degraded = degraded;
    }

    fn render(&self, core: &Core) -> String {
        let mut out = String::new();
        for (pos, ch) in self.text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            out.push_str(&self.render_char(core, pos, ch));
            out.push('\n');
        }
        if !self.degraded.is_empty() {
            out.push_str(&format!("degraded: {}\n", self.degraded.join(", ")));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::{OrderingPlugin, PolyphonePlugin};
    use crate::capability::CapabilityDescriptor;
    use crate::config::HostConfig;
    use crate::error::BootstrapReason;
    use crate::host::Host;
    use crate::plugin::CapabilityPlugin;

    #[test]
    fn test_panel_hides_missing_drawing() {
        let mut host = Host::new(HostConfig::permissive());
        host.add_plugin(OrderingPlugin::default())
            .add_plugin(PolyphonePlugin::default());
        let mounted = host.mount(CharacterPanel::new("校长")).ok().unwrap();

        assert_eq!(mounted.root().degraded(), &["drawing"]);
        let text = mounted.render();
        assert!(text.contains("长  strokes: 撇 横 竖提 捺 (4)  pinyin: zhǎng*"));
        assert!(!text.contains("frames"));
        assert!(text.ends_with("degraded: drawing\n"));
    }

    #[test]
    fn test_wrong_type_counts_as_degraded() {
        let mut host = Host::new(HostConfig::permissive());
        host.add_plugin(OrderingPlugin::default())
            .add_plugin(PolyphonePlugin::default())
            .add_plugin(CapabilityPlugin::new(
                "MislabelledDrawing",
                CapabilityDescriptor::new(DRAWING, StrokeOrder::seed()),
            ));
        let mounted = host.mount(CharacterPanel::new("大")).ok().unwrap();

        assert!(mounted.core().has(DRAWING));
        assert_eq!(mounted.root().degraded(), &["drawing"]);
        let text = mounted.render();
        assert!(!text.contains("frames"));
        assert!(text.ends_with("degraded: drawing\n"));
    }

    #[test]
    fn test_repeated_char_reads_by_position() {
        let mut host = Host::new(HostConfig::permissive());
        host.add_plugin(PolyphonePlugin::default());
        let mounted = host.mount(CharacterPanel::new("校长长度")).ok().unwrap();

        let text = mounted.render();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[1], "长  pinyin: zhǎng*");
        assert_eq!(lines[2], "长  pinyin: cháng*");
    }

    #[test]
    fn test_optional_on_empty_registry() {
        let registry = CapabilityRegistry::new();
        assert!(optional::<StrokeOrder>(&registry, ORDERING).is_none());
    }

    #[test]
    fn test_diagnostic_names_capability_and_reason() {
        let view = DiagnosticView::new(BootstrapError::new("drawing", BootstrapReason::Conflict));
        let text = view.render();
        assert!(text.contains("capability: drawing"));
        assert!(text.contains("conflicting implementation"));
    }
}
