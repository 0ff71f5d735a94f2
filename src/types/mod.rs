//! Shared types used throughout the library.

mod direction;

pub use direction::{Axis, Direction};

use serde::{Deserialize, Serialize};

/// A block position inside a schematic.
///
/// Coordinates outside the schematic bounds are valid values; lookups with
/// them simply find nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Coordinates {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Get the neighboring position in the given direction.
    pub fn neighbor(&self, direction: Direction) -> Self {
        self.offset(direction, 1)
    }

    /// Move `distance` cells in the given direction.
    pub fn offset(&self, direction: Direction, distance: i32) -> Self {
        let (dx, dy, dz) = direction.offset();
        Self {
            x: self.x + dx * distance,
            y: self.y + dy * distance,
            z: self.z + dz * distance,
        }
    }

    pub fn as_array(&self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[i32; 3]> for Coordinates {
    fn from(value: [i32; 3]) -> Self {
        Self::new(value[0], value[1], value[2])
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Size of a schematic along each axis.
///
/// Sponge stores these as NBT shorts that are read as unsigned, so a
/// single schematic can span up to 65535 blocks per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Dimensions3D {
    /// Extent along X.
    pub width: u16,
    /// Extent along Y.
    pub height: u16,
    /// Extent along Z.
    pub length: u16,
}

impl Dimensions3D {
    pub fn new(width: u16, height: u16, length: u16) -> Self {
        Self {
            width,
            height,
            length,
        }
    }

    /// Total number of voxels.
    pub fn volume(&self) -> usize {
        self.width as usize * self.height as usize * self.length as usize
    }

    /// Number of voxels in one horizontal (XZ) layer.
    pub fn layer_area(&self) -> usize {
        self.width as usize * self.length as usize
    }

    /// Check whether a position lies inside these bounds.
    pub fn contains(&self, coords: Coordinates) -> bool {
        coords.x >= 0
            && coords.y >= 0
            && coords.z >= 0
            && coords.x < self.width as i32
            && coords.y < self.height as i32
            && coords.z < self.length as i32
    }
}

impl std::fmt::Display for Dimensions3D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.height, self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbor_and_offset() {
        let pos = Coordinates::new(3, 5, 7);
        assert_eq!(pos.neighbor(Direction::Up), Coordinates::new(3, 6, 7));
        assert_eq!(pos.neighbor(Direction::North), Coordinates::new(3, 5, 8));
        assert_eq!(pos.offset(Direction::West, 3), Coordinates::new(0, 5, 7));
    }

    #[test]
    fn test_dimensions_contains() {
        let dims = Dimensions3D::new(2, 3, 4);
        assert_eq!(dims.volume(), 24);
        assert_eq!(dims.layer_area(), 8);
        assert!(dims.contains(Coordinates::new(1, 2, 3)));
        assert!(!dims.contains(Coordinates::new(2, 0, 0)));
        assert!(!dims.contains(Coordinates::new(0, -1, 0)));
        assert!(!dims.contains(Coordinates::new(0, 0, 4)));
    }

    #[test]
    fn test_volume_does_not_overflow() {
        let dims = Dimensions3D::new(u16::MAX, u16::MAX, u16::MAX);
        assert_eq!(dims.volume(), 65535usize * 65535 * 65535);
    }
}
