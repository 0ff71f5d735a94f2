//! # Schematic Solids
//!
//! A Rust library for turning Sponge schematics into axis-aligned solids for
//! brush-based level formats.
//!
//! ## Overview
//!
//! A schematic is read from its NBT tag tree, its VarInt block data is
//! decoded into a dense grid of typed blocks, straight runs of identical
//! blocks are merged into groups, and every group or remaining block becomes
//! one box with up to six textured faces. Faces hidden by neighbors are
//! culled.
//!
//! ## Quick Start
//!
//! ```ignore
//! use schematic_solids::{ConvertConfig, Converter};
//!
//! let config = ConvertConfig::from_path("blocks.json")?;
//! let converter = Converter::with_config(config.with_block_size(64.0));
//!
//! let world = converter.convert_file("castle.schem")?;
//! for solid in world.solids() {
//!     println!("{} at {} size {:?}", solid.block, solid.origin, solid.size);
//! }
//! ```
//!
//! ## Stages
//!
//! The pipeline stages are public for callers that need the intermediate
//! data:
//!
//! ```ignore
//! use schematic_solids::{greedy_merge, BlockFactory, ConvertConfig, ModelBuilder, Schematic};
//!
//! let schematic = Schematic::from_bytes(&bytes, &BlockFactory::default())?;
//! let mut grid = schematic.into_grid();
//! let groups = greedy_merge(&mut grid);
//!
//! let config = ConvertConfig::default();
//! let mut builder = ModelBuilder::new(&grid, &config);
//! for group in &groups {
//!     builder.add_group(group);
//! }
//! for block in grid.iter() {
//!     builder.add_block(block);
//! }
//! let world = builder.build();
//! ```

pub mod block;
pub mod config;
pub mod error;
pub mod grid;
pub mod mesher;
pub mod model;
pub mod schematic;
pub mod types;

// Re-export main types for convenience
pub use block::{Block, BlockEntity, BlockFactory, BlockInfo, BlockKind};
pub use config::{BlockConfig, ConvertConfig, KindOverride};
pub use error::{Result, SchematicError};
pub use grid::BlockGrid;
pub use mesher::{greedy_merge, BlockGroup, Converter, GroupId, MergeAxis};
pub use model::{ConversionStats, Face, ModelBuilder, Solid, World};
pub use schematic::{Palette, Schematic, SchematicVersion};
pub use types::{Axis, Coordinates, Dimensions3D, Direction};

/// Convert schematic bytes with the default configuration.
pub fn convert_bytes(data: &[u8]) -> Result<World> {
    Converter::new().convert_bytes(data)
}

/// Convert a schematic file with the default configuration.
pub fn convert_file<P: AsRef<std::path::Path>>(path: P) -> Result<World> {
    Converter::new().convert_file(path)
}

#[cfg(feature = "wasm")]
pub mod wasm;
