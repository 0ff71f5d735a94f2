//! Loading Sponge schematics into a populated [`BlockGrid`].

pub mod palette;
pub mod parser;
pub mod varint;

pub use palette::Palette;
pub use parser::{parse_schematic, SchematicData, SchematicVersion};

use crate::block::factory::ResolvedState;
use crate::block::{BlockEntity, BlockFactory};
use crate::error::Result;
use crate::grid::BlockGrid;
use crate::types::{Coordinates, Dimensions3D};
use quartz_nbt::io::Flavor;
use quartz_nbt::NbtCompound;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::io::Cursor;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// A decoded schematic: every voxel resolved to a typed block.
#[derive(Debug, Clone)]
pub struct Schematic {
    pub version: SchematicVersion,
    pub dimensions: Dimensions3D,
    grid: BlockGrid,
    palette_size: usize,
    block_entity_count: usize,
    generic_blocks: usize,
}

impl Schematic {
    /// Read schematic bytes, gzip-compressed or not.
    pub fn from_bytes(bytes: &[u8], factory: &BlockFactory) -> Result<Self> {
        let root = read_nbt_bytes(bytes)?;
        Self::from_nbt(&root, factory)
    }

    pub fn from_nbt(root: &NbtCompound, factory: &BlockFactory) -> Result<Self> {
        Self::from_data(parse_schematic(root)?, factory)
    }

    /// Decode block data and populate the grid.
    ///
    /// Each palette entry is classified once. Block entities are attached to
    /// the block at their position; when two share a position the first one
    /// wins.
    pub fn from_data(data: SchematicData, factory: &BlockFactory) -> Result<Self> {
        let SchematicData {
            version,
            dimensions,
            palette,
            block_entities,
            block_data,
        } = data;

        let codes = varint::decode_block_data(&block_data, dimensions.volume())?;

        let block_entity_count = block_entities.len();
        let mut entities: HashMap<Coordinates, BlockEntity> = HashMap::with_capacity(block_entity_count);
        for entity in block_entities {
            match entities.entry(entity.coordinates) {
                Entry::Occupied(_) => {
                    tracing::warn!(
                        "Duplicate block entity at {}, keeping the first one",
                        entity.coordinates
                    );
                }
                Entry::Vacant(slot) => {
                    slot.insert(entity);
                }
            }
        }

        let mut resolved: HashMap<u64, ResolvedState> = HashMap::with_capacity(palette.len());
        let mut grid = BlockGrid::new(dimensions);
        let mut generic_blocks = 0;

        for (index, code) in codes.into_iter().enumerate() {
            let state = match resolved.entry(code) {
                Entry::Occupied(slot) => slot.into_mut(),
                Entry::Vacant(slot) => {
                    let info = palette.get(code)?.clone();
                    slot.insert(factory.resolve(info))
                }
            };
            if state.is_generic() {
                generic_blocks += 1;
            }

            let coords = grid.coordinates_of(index);
            let entity = entities.remove(&coords);
            grid.set(coords, factory.create(state, coords, entity));
        }

        if !entities.is_empty() {
            tracing::debug!(
                "Dropped {} block entities outside {}",
                entities.len(),
                dimensions
            );
        }

        Ok(Self {
            version,
            dimensions,
            grid,
            palette_size: palette.len(),
            block_entity_count,
            generic_blocks,
        })
    }

    pub fn grid(&self) -> &BlockGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut BlockGrid {
        &mut self.grid
    }

    pub fn into_grid(self) -> BlockGrid {
        self.grid
    }

    pub fn palette_size(&self) -> usize {
        self.palette_size
    }

    /// Number of block entities listed in the file.
    pub fn block_entity_count(&self) -> usize {
        self.block_entity_count
    }

    /// Number of voxels whose id was not recognized.
    pub fn generic_blocks(&self) -> usize {
        self.generic_blocks
    }
}

/// Parse an NBT tag tree, detecting gzip compression from the magic bytes.
pub fn read_nbt_bytes(bytes: &[u8]) -> Result<NbtCompound> {
    let flavor = if bytes.starts_with(&GZIP_MAGIC) {
        Flavor::GzCompressed
    } else {
        Flavor::Uncompressed
    };
    let (root, _name) = quartz_nbt::io::read_nbt(&mut Cursor::new(bytes), flavor)?;
    Ok(root)
}
