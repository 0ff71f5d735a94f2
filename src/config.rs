//! Conversion configuration.
//!
//! The configuration is plain JSON. Every field has a default, so an empty
//! object (or no file at all) is a valid configuration:
//!
//! ```json
//! {
//!   "block_size": 64.0,
//!   "culled_face_material": "tools/toolsnodraw",
//!   "translucent_culling": true,
//!   "skybox": true,
//!   "blocks": {
//!     "minecraft:grass_block": {
//!       "material": "grass_side",
//!       "faces": { "up": "minecraft/grass_top", "down": "minecraft/dirt" }
//!     },
//!     "minecraft:spawner": { "kind": "translucent" }
//!   }
//! }
//! ```

use crate::block::BlockInfo;
use crate::error::Result;
use crate::types::Direction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Material applied to the skybox enclosure by default.
pub const DEFAULT_SKYBOX_MATERIAL: &str = "tools/toolsskybox";

/// Top-level conversion options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// World units per block edge.
    pub block_size: f32,
    /// Drop faces hidden by an adjacent drawable block.
    pub cull_hidden_faces: bool,
    /// When set, hidden faces are kept with this material instead of dropped.
    pub culled_face_material: Option<String>,
    /// Let translucent neighbors hide only faces of their own group, so
    /// solid blocks stay visible through glass, ice and leaves.
    pub translucent_culling: bool,
    /// Enclose the schematic in six skybox solids.
    pub skybox: bool,
    /// Material used for every face of the skybox enclosure.
    pub skybox_material: String,
    /// Per-block overrides keyed by `namespace:id` or bare id.
    pub blocks: HashMap<String, BlockConfig>,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            block_size: 1.0,
            cull_hidden_faces: true,
            culled_face_material: None,
            translucent_culling: false,
            skybox: false,
            skybox_material: DEFAULT_SKYBOX_MATERIAL.to_string(),
            blocks: HashMap::new(),
        }
    }
}

impl ConvertConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn with_block_size(mut self, block_size: f32) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn with_skybox(mut self, material: Option<&str>) -> Self {
        self.skybox = true;
        if let Some(material) = material {
            self.skybox_material = material.to_string();
        }
        self
    }

    pub fn with_translucent_culling(mut self, enabled: bool) -> Self {
        self.translucent_culling = enabled;
        self
    }

    pub fn with_culled_face_material(mut self, material: impl Into<String>) -> Self {
        self.culled_face_material = Some(material.into());
        self
    }

    /// Add or replace the override for one block id.
    pub fn with_block(mut self, name: impl Into<String>, block: BlockConfig) -> Self {
        self.blocks.insert(name.into(), block);
        self
    }

    /// Look up the override for a block, preferring the namespaced key.
    pub fn block(&self, info: &BlockInfo) -> Option<&BlockConfig> {
        self.blocks
            .get(&info.name())
            .or_else(|| self.blocks.get(&info.id))
    }
}

/// Per-block overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockConfig {
    /// Material path relative to the block's namespace.
    pub material: Option<String>,
    /// Full material paths for individual faces.
    pub faces: HashMap<Direction, String>,
    /// Force how the block is classified.
    pub kind: Option<KindOverride>,
}

impl BlockConfig {
    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = Some(material.into());
        self
    }

    pub fn with_face(mut self, direction: Direction, material: impl Into<String>) -> Self {
        self.faces.insert(direction, material.into());
        self
    }

    pub fn with_kind(mut self, kind: KindOverride) -> Self {
        self.kind = Some(kind);
        self
    }
}

/// Classification forced from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KindOverride {
    Solid,
    Translucent,
    Container,
    NonDrawable,
}
