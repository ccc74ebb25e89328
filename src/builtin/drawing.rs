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

//! Stroke drawing capability.
//!
//! Turns a character into a [`DrawPlan`]: the frames a renderer paints, one
//! per stroke when animating, or a single frame with every stroke otherwise.
//! Path data lives in this table, so drawing does not need `ordering`.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::capability::{Capability, CapabilityDescriptor};
use crate::error::Result;
use crate::impl_capability;
use crate::plugin::Plugin;
use crate::registry::CapabilityRegistry;

/// Capability name
pub const DRAWING: &str = "drawing";

/// Rendering options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawOptions {
    pub stroke_color: String,
    pub size: u32,
    pub animate: bool,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            stroke_color: "#333333".to_string(),
            size: 128,
            animate: true,
        }
    }
}

/// One painted frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawFrame {
    /// Path data visible in this frame
    pub paths: Vec<String>,
}

/// Frames for one character
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawPlan {
    pub character: char,
    pub options: DrawOptions,
    pub frames: Vec<DrawFrame>,
}

impl DrawPlan {
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Render the last frame as an SVG document
    pub fn to_svg(&self) -> String {
        let size = self.options.size;
        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{size}\" height=\"{size}\" viewBox=\"0 0 1024 1024\">"
        );
        if let Some(last) = self.frames.last() {
            for path in &last.paths {
                svg.push_str(&format!(
                    "<path d=\"{path}\" fill=\"none\" stroke=\"{}\" stroke-width=\"48\"/>",
                    self.options.stroke_color
                ));
            }
        }
        svg.push_str("</svg>");
        svg
    }
}

/// Character → SVG path per stroke
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StrokeDrawing {
    paths: AHashMap<char, Vec<String>>,
}

impl_capability!(StrokeDrawing, eq);

impl PartialEq for StrokeDrawing {
    fn eq(&self, other: &Self) -> bool {
        *self.paths == *other.paths
    }
}

impl StrokeDrawing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Small built-in table on a 1024×1024 grid
    pub fn seed() -> Self {
        let mut drawing = Self::new();
        drawing.insert('一', &["M 160 512 L 864 512"]);
        drawing.insert('十', &["M 160 480 L 864 480", "M 512 128 L 512 896"]);
        drawing.insert('人', &["M 512 128 Q 420 560 160 880", "M 500 420 Q 640 720 880 880"]);
        drawing.insert(
            '大',
            &[
                "M 160 400 L 864 400",
                "M 512 128 Q 440 640 160 880",
                "M 520 480 Q 660 740 880 880",
            ],
        );
        drawing
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn insert(&mut self, ch: char, paths: &[&str]) {
        self.paths
            .insert(ch, paths.iter().map(|p| p.to_string()).collect());
    }

    pub fn supports(&self, ch: char) -> bool {
        self.paths.contains_key(&ch)
    }

    /// Build the frames for `ch`; `None` if no path data exists
    pub fn plan(&self, ch: char, options: &DrawOptions) -> Option<DrawPlan> {
        let paths = self.paths.get(&ch)?;
        let frames = if options.animate {
            (1..=paths.len())
                .map(|n| DrawFrame {
                    paths: paths[..n].to_vec(),
                })
                .collect()
        } else {
            vec![DrawFrame {
                paths: paths.clone(),
            }]
        };
        Some(DrawPlan {
            character: ch,
            options: options.clone(),
            frames,
        })
    }
}

/// Attaches [`StrokeDrawing`] as `drawing`
pub struct DrawingPlugin {
    table: Arc<dyn Capability>,
}

impl DrawingPlugin {
    pub fn new(table: StrokeDrawing) -> Self {
        Self {
            table: Arc::new(table),
        }
    }
}

impl Default for DrawingPlugin {
    fn default() -> Self {
        Self::new(StrokeDrawing::seed())
    }
}

impl Plugin for DrawingPlugin {
    fn plugin_name(&self) -> &'static str {
        "DrawingPlugin"
    }

    fn provides(&self) -> &[&'static str] {
        &[DRAWING]
    }

    fn attach(&self, registry: &mut CapabilityRegistry) -> Result<()> {
        registry.attach(CapabilityDescriptor::from_arc(DRAWING, self.table.clone()))?;
        Ok(())
    }
}
