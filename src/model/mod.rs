//! Exported geometric model.
//!
//! A [`World`] is the immutable result of a conversion: an ordered list of
//! axis-aligned [`Solid`]s, each with up to six textured [`Face`]s, plus
//! summary statistics. It is plain serde data for downstream level writers.

pub mod builder;

pub use builder::ModelBuilder;

use crate::mesher::greedy::MergeAxis;
use crate::types::{Coordinates, Direction};
use glam::Vec3;
use serde::Serialize;
use std::collections::BTreeMap;

/// Block-state name used for the skybox enclosure solids.
pub const SKYBOX_BLOCK: &str = "skybox";

/// One oriented, textured face of a solid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Face {
    pub direction: Direction,
    /// Material path, e.g. "minecraft/stone".
    pub texture: String,
    /// World-space corners, counter-clockwise seen from outside.
    pub vertices: [Vec3; 4],
}

impl Face {
    /// Outward unit normal derived from the winding.
    pub fn normal(&self) -> Vec3 {
        let [a, b, c, _] = self.vertices;
        (b - a).cross(c - a).normalize_or_zero()
    }
}

/// An axis-aligned box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solid {
    /// Minimum corner, in blocks.
    pub origin: Coordinates,
    /// Extent in blocks along x, y and z.
    pub size: [u32; 3],
    /// Block state of the representative block.
    pub block: String,
    pub faces: Vec<Face>,
}

impl Solid {
    pub fn face(&self, direction: Direction) -> Option<&Face> {
        self.faces.iter().find(|face| face.direction == direction)
    }

    /// Number of blocks covered.
    pub fn volume(&self) -> u64 {
        self.size.iter().map(|&s| s as u64).product()
    }
}

/// Counters collected while building a world.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionStats {
    /// Solids produced from merged groups.
    pub grouped_solids: usize,
    /// Solids produced from blocks that stayed ungrouped.
    pub single_solids: usize,
    pub skybox_solids: usize,
    pub groups_by_axis: BTreeMap<MergeAxis, usize>,
    /// Blocks whose id was not recognized and were exported as plain cubes.
    pub generic_blocks: usize,
    /// Faces hidden by neighbors, whether dropped or retextured.
    pub culled_faces: usize,
}

impl ConversionStats {
    pub fn total_solids(&self) -> usize {
        self.grouped_solids + self.single_solids + self.skybox_solids
    }
}

/// The converted model.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct World {
    solids: Vec<Solid>,
    stats: ConversionStats,
}

impl World {
    /// Solids in emission order: skybox, then groups, then single blocks.
    pub fn solids(&self) -> &[Solid] {
        &self.solids
    }

    pub fn stats(&self) -> &ConversionStats {
        &self.stats
    }

    pub fn is_empty(&self) -> bool {
        self.solids.is_empty()
    }

    pub fn face_count(&self) -> usize {
        self.solids.iter().map(|solid| solid.faces.len()).sum()
    }

    pub fn into_solids(self) -> Vec<Solid> {
        self.solids
    }
}
