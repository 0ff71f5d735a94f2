//! Conversion pipeline from schematic to solids.
//!
//! [`Converter`] runs every stage in sequence: parse the tag tree, decode
//! block data into a grid, merge runs, then build the model. A load either
//! produces a complete [`World`] or an error.

pub mod greedy;

pub use greedy::{greedy_merge, BlockGroup, GroupId, MergeAxis};

use crate::block::BlockFactory;
use crate::config::ConvertConfig;
use crate::error::Result;
use crate::model::{ModelBuilder, World};
use crate::schematic::Schematic;
use quartz_nbt::NbtCompound;
use std::path::Path;

/// Converts schematics with one configuration.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: ConvertConfig,
    factory: BlockFactory,
}

impl Converter {
    /// Create a converter with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a converter with custom configuration.
    pub fn with_config(config: ConvertConfig) -> Self {
        let factory = BlockFactory::from_config(&config);
        Self { config, factory }
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Decode a schematic tag tree into a populated grid.
    pub fn load(&self, root: &NbtCompound) -> Result<Schematic> {
        Schematic::from_nbt(root, &self.factory)
    }

    /// Decode schematic bytes, gzip-compressed or not.
    pub fn load_bytes(&self, bytes: &[u8]) -> Result<Schematic> {
        Schematic::from_bytes(bytes, &self.factory)
    }

    pub fn convert(&self, root: &NbtCompound) -> Result<World> {
        Ok(self.mesh(self.load(root)?))
    }

    pub fn convert_bytes(&self, bytes: &[u8]) -> Result<World> {
        Ok(self.mesh(self.load_bytes(bytes)?))
    }

    /// Read and convert a schematic file.
    pub fn convert_file<P: AsRef<Path>>(&self, path: P) -> Result<World> {
        let path = path.as_ref();
        tracing::info!("Loading schematic {}", path.display());
        let bytes = std::fs::read(path)?;
        self.convert_bytes(&bytes)
    }

    /// Merge runs and build the model for a loaded schematic.
    pub fn mesh(&self, schematic: Schematic) -> World {
        let dimensions = schematic.dimensions;
        let generic_blocks = schematic.generic_blocks();
        let mut grid = schematic.into_grid();

        let groups = greedy_merge(&mut grid);

        let mut builder = ModelBuilder::new(&grid, &self.config);
        if self.config.skybox {
            builder.add_skybox(dimensions);
        }
        for group in &groups {
            builder.add_group(group);
        }
        for block in grid.iter() {
            builder.add_block(block);
        }
        builder.record_generic_blocks(generic_blocks);
        let world = builder.build();

        let stats = world.stats();
        tracing::info!(
            "Converted {} schematic into {} solids ({} grouped, {} single, {} skybox)",
            dimensions,
            stats.total_solids(),
            stats.grouped_solids,
            stats.single_solids,
            stats.skybox_solids
        );
        if stats.generic_blocks > 0 {
            tracing::info!("{} blocks had unrecognized ids", stats.generic_blocks);
        }

        world
    }
}
