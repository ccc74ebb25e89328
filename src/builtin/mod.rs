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

// Built-in capabilities: stroke order, polyphone readings and stroke drawing

pub mod drawing;
pub mod ordering;
pub mod polyphone;

pub use drawing::{DrawFrame, DrawOptions, DrawPlan, DrawingPlugin, StrokeDrawing, DRAWING};
pub use ordering::{OrderingPlugin, StrokeOrder, ORDERING};
pub use polyphone::{PolyphonePlugin, PolyphoneTable, Reading, POLYPHONE};

use crate::plugin::BoxedPlugin;

/// The three built-in plugins, in the order the host attaches them
pub fn default_plugins() -> Vec<BoxedPlugin> {
    vec![
        Box::new(OrderingPlugin::default()),
        Box::new(PolyphonePlugin::default()),
        Box::new(DrawingPlugin::default()),
    ]
}
