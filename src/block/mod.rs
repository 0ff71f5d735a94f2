//! Typed blocks built from palette entries.
//!
//! A [`Block`] couples a parsed [`BlockInfo`] with its position, the
//! [`BlockKind`] that decides how it is meshed, the block entity stored at
//! the same position (if any), and the id of the group it was merged into.

pub mod factory;
pub mod info;
pub mod registry;

pub use factory::BlockFactory;
pub use info::BlockInfo;
pub use registry::{BlockRegistry, Classification};

use crate::mesher::greedy::GroupId;
use crate::types::Coordinates;
use quartz_nbt::NbtCompound;

/// How a block takes part in meshing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Full opaque cube.
    Solid,
    /// Full cube that only hides faces of blocks in the same group
    /// (glass, leaves, ice).
    Translucent(String),
    /// Full opaque cube whose state lives in a block entity.
    Container,
    /// Air, and shapes that cannot be expressed as one full cube.
    NonDrawable,
}

impl BlockKind {
    pub fn is_drawable(&self) -> bool {
        !matches!(self, BlockKind::NonDrawable)
    }
}

/// Extra data stored for one block position.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockEntity {
    pub coordinates: Coordinates,
    /// Block entity type, e.g. "minecraft:chest".
    pub id: Option<String>,
    /// Remaining payload, kept as-is.
    pub data: NbtCompound,
}

impl BlockEntity {
    pub fn new(coordinates: Coordinates, id: Option<String>, data: NbtCompound) -> Self {
        Self {
            coordinates,
            id,
            data,
        }
    }
}

/// One voxel of the schematic.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub coordinates: Coordinates,
    pub info: BlockInfo,
    pub kind: BlockKind,
    pub entity: Option<BlockEntity>,
    group: Option<GroupId>,
}

impl Block {
    pub fn new(
        coordinates: Coordinates,
        info: BlockInfo,
        kind: BlockKind,
        entity: Option<BlockEntity>,
    ) -> Self {
        Self {
            coordinates,
            info,
            kind,
            entity,
            group: None,
        }
    }

    pub fn is_drawable(&self) -> bool {
        self.kind.is_drawable()
    }

    /// The group this block was merged into, if any.
    pub fn group(&self) -> Option<GroupId> {
        self.group
    }

    pub fn is_grouped(&self) -> bool {
        self.group.is_some()
    }

    /// Drawable and not yet part of a group.
    pub fn is_mergeable(&self) -> bool {
        self.is_drawable() && !self.is_grouped()
    }

    /// Record group membership. Membership is write-once; returns false
    /// when the block already belongs to a group.
    pub(crate) fn assign_group(&mut self, group: GroupId) -> bool {
        if self.group.is_some() {
            return false;
        }
        self.group = Some(group);
        true
    }

    /// Two blocks merge when they share the same state and both or neither
    /// carry a block entity. Positions are ignored.
    pub fn merges_with(&self, other: &Block) -> bool {
        self.info == other.info && self.entity.is_some() == other.entity.is_some()
    }

    /// Whether this block, as a neighbor, hides the adjacent face of `other`.
    pub fn occludes(&self, other: &Block) -> bool {
        match &self.kind {
            BlockKind::NonDrawable => false,
            BlockKind::Translucent(group) => {
                matches!(&other.kind, BlockKind::Translucent(own) if own == group)
            }
            BlockKind::Solid | BlockKind::Container => true,
        }
    }
}

impl std::fmt::Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.info, self.coordinates)
    }
}
