//! Dense 3D block storage.
//!
//! Cells are stored in the Sponge scan order: Y outermost, then Z, then X,
//! so `index = (y * length + z) * width + x`. Decoding fills the grid in
//! exactly this order.

use crate::block::Block;
use crate::mesher::greedy::GroupId;
use crate::types::{Coordinates, Dimensions3D};

/// A dense grid of blocks sized exactly to the schematic dimensions.
#[derive(Debug, Clone)]
pub struct BlockGrid {
    dimensions: Dimensions3D,
    cells: Vec<Option<Block>>,
}

impl BlockGrid {
    /// Create an empty grid.
    pub fn new(dimensions: Dimensions3D) -> Self {
        let mut cells = Vec::new();
        cells.resize_with(dimensions.volume(), || None);
        Self { dimensions, cells }
    }

    pub fn dimensions(&self) -> Dimensions3D {
        self.dimensions
    }

    /// Flat index of a position, or `None` when it lies outside the grid.
    pub fn index_of(&self, coords: Coordinates) -> Option<usize> {
        if !self.dimensions.contains(coords) {
            return None;
        }
        let width = self.dimensions.width as usize;
        let length = self.dimensions.length as usize;
        Some((coords.y as usize * length + coords.z as usize) * width + coords.x as usize)
    }

    /// Position of a flat index.
    pub fn coordinates_of(&self, index: usize) -> Coordinates {
        index_to_coordinates(self.dimensions, index)
    }

    /// Store a block. Returns false when the position is outside the grid.
    pub fn set(&mut self, coords: Coordinates, block: Block) -> bool {
        match self.index_of(coords) {
            Some(index) => {
                debug_assert!(self.cells[index].is_none(), "cell {} set twice", coords);
                self.cells[index] = Some(block);
                true
            }
            None => false,
        }
    }

    /// Look up a block. Positions outside the grid are simply not found.
    pub fn get(&self, coords: Coordinates) -> Option<&Block> {
        self.index_of(coords)
            .and_then(|index| self.cells[index].as_ref())
    }

    pub fn contains(&self, coords: Coordinates) -> bool {
        self.get(coords).is_some()
    }

    pub fn is_drawable_at(&self, coords: Coordinates) -> bool {
        self.get(coords).is_some_and(Block::is_drawable)
    }

    /// Tag the block at `coords` as a member of `group`.
    ///
    /// Returns false when there is no block there or it is already grouped.
    pub fn assign_group(&mut self, coords: Coordinates, group: GroupId) -> bool {
        match self.index_of(coords) {
            Some(index) => match self.cells[index].as_mut() {
                Some(block) => block.assign_group(group),
                None => false,
            },
            None => false,
        }
    }

    /// Iterate over stored blocks in flat-index order.
    pub fn iter(&self) -> impl Iterator<Item = &Block> + '_ {
        self.cells.iter().filter_map(Option::as_ref)
    }

    /// Number of stored blocks.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }
}

/// Map a flat scan index to its position.
///
/// `y = i / (w*l)`, `z = (i % (w*l)) / w`, `x = (i % (w*l)) % w`. The Z
/// axis is not reflected.
pub fn index_to_coordinates(dimensions: Dimensions3D, index: usize) -> Coordinates {
    let width = dimensions.width as usize;
    let layer = dimensions.layer_area();
    let in_layer = index % layer;
    Coordinates::new(
        (in_layer % width) as i32,
        (index / layer) as i32,
        (in_layer / width) as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{BlockInfo, BlockKind};

    fn stone_at(coords: Coordinates) -> Block {
        Block::new(coords, BlockInfo::new("minecraft", "stone"), BlockKind::Solid, None)
    }

    #[test]
    fn test_index_coordinate_bijection() {
        let dims = Dimensions3D::new(3, 4, 5);
        let grid = BlockGrid::new(dims);
        for i in 0..dims.volume() {
            let coords = grid.coordinates_of(i);
            assert!(dims.contains(coords));
            assert_eq!(grid.index_of(coords), Some(i));
        }
    }

    #[test]
    fn test_scan_order() {
        let dims = Dimensions3D::new(2, 2, 3);
        // X varies fastest, then Z, then Y.
        assert_eq!(index_to_coordinates(dims, 0), Coordinates::new(0, 0, 0));
        assert_eq!(index_to_coordinates(dims, 1), Coordinates::new(1, 0, 0));
        assert_eq!(index_to_coordinates(dims, 2), Coordinates::new(0, 0, 1));
        assert_eq!(index_to_coordinates(dims, 5), Coordinates::new(1, 0, 2));
        assert_eq!(index_to_coordinates(dims, 6), Coordinates::new(0, 1, 0));
    }

    #[test]
    fn test_get_out_of_range_is_not_found() {
        let mut grid = BlockGrid::new(Dimensions3D::new(1, 1, 1));
        assert!(grid.set(Coordinates::new(0, 0, 0), stone_at(Coordinates::new(0, 0, 0))));
        assert!(grid.get(Coordinates::new(0, 0, 0)).is_some());
        assert!(grid.get(Coordinates::new(-1, 0, 0)).is_none());
        assert!(grid.get(Coordinates::new(0, 1, 0)).is_none());
        assert!(grid.get(Coordinates::new(0, 0, i32::MAX)).is_none());
        assert!(!grid.set(Coordinates::new(1, 0, 0), stone_at(Coordinates::new(1, 0, 0))));
    }

    #[test]
    fn test_assign_group() {
        let mut grid = BlockGrid::new(Dimensions3D::new(2, 1, 1));
        grid.set(Coordinates::new(0, 0, 0), stone_at(Coordinates::new(0, 0, 0)));

        assert!(grid.assign_group(Coordinates::new(0, 0, 0), GroupId(0)));
        assert!(!grid.assign_group(Coordinates::new(0, 0, 0), GroupId(1)));
        assert!(!grid.assign_group(Coordinates::new(1, 0, 0), GroupId(0)));
        assert_eq!(grid.get(Coordinates::new(0, 0, 0)).unwrap().group(), Some(GroupId(0)));
    }

    #[test]
    fn test_empty_dimensions() {
        let grid = BlockGrid::new(Dimensions3D::new(0, 5, 5));
        assert!(grid.is_empty());
        assert_eq!(grid.len(), 0);
        assert!(grid.get(Coordinates::new(0, 0, 0)).is_none());
    }
}
