//! Assembly of solids from blocks and merged groups.

use super::{ConversionStats, Face, Solid, World, SKYBOX_BLOCK};
use crate::block::{Block, BlockInfo};
use crate::config::ConvertConfig;
use crate::grid::BlockGrid;
use crate::mesher::greedy::BlockGroup;
use crate::types::{Coordinates, Dimensions3D, Direction};
use glam::Vec3;

/// Accumulates solids and hands out one [`World`] at the end.
///
/// The builder only reads the grid; group tags must already be in place.
pub struct ModelBuilder<'a> {
    grid: &'a BlockGrid,
    config: &'a ConvertConfig,
    solids: Vec<Solid>,
    stats: ConversionStats,
}

impl<'a> ModelBuilder<'a> {
    pub fn new(grid: &'a BlockGrid, config: &'a ConvertConfig) -> Self {
        Self {
            grid,
            config,
            solids: Vec::new(),
            stats: ConversionStats::default(),
        }
    }

    /// Enclose `dimensions` in six one-block-thick solids.
    ///
    /// The top and bottom slabs cover the corners; the side walls fill the
    /// gaps between them, so the shell is closed without overlaps.
    pub fn add_skybox(&mut self, dimensions: Dimensions3D) {
        let w = dimensions.width as i32;
        let h = dimensions.height as i32;
        let l = dimensions.length as i32;
        let (wu, hu, lu) = (w as u32, h as u32, l as u32);

        let walls = [
            (Coordinates::new(-1, -1, -1), [wu + 2, 1, lu + 2]),
            (Coordinates::new(-1, h, -1), [wu + 2, 1, lu + 2]),
            (Coordinates::new(-1, 0, -1), [1, hu, lu + 2]),
            (Coordinates::new(w, 0, -1), [1, hu, lu + 2]),
            (Coordinates::new(0, 0, -1), [wu, hu, 1]),
            (Coordinates::new(0, 0, l), [wu, hu, 1]),
        ];

        for (origin, size) in walls {
            let faces = Direction::ALL
                .iter()
                .map(|&direction| self.face(origin, size, direction, self.config.skybox_material.clone()))
                .collect();
            self.solids.push(Solid {
                origin,
                size,
                block: SKYBOX_BLOCK.to_string(),
                faces,
            });
            self.stats.skybox_solids += 1;
        }
    }

    /// Add the solid for a merged group.
    pub fn add_group(&mut self, group: &BlockGroup) {
        let grid = self.grid;
        let Some(representative) = grid.get(group.representative()) else {
            tracing::warn!("Group {} has no block at {}", group.id, group.representative());
            return;
        };

        let solid = self.solid_for(representative, group.size());
        self.solids.push(solid);
        self.stats.grouped_solids += 1;
        *self.stats.groups_by_axis.entry(group.axis).or_insert(0) += 1;
    }

    /// Add the solid for a block that stayed ungrouped.
    ///
    /// Non-drawable and grouped blocks are ignored, so every block of the
    /// grid can be passed in.
    pub fn add_block(&mut self, block: &Block) {
        if !block.is_drawable() || block.is_grouped() {
            return;
        }
        let solid = self.solid_for(block, [1, 1, 1]);
        self.solids.push(solid);
        self.stats.single_solids += 1;
    }

    pub fn record_generic_blocks(&mut self, count: usize) {
        self.stats.generic_blocks += count;
    }

    pub fn build(self) -> World {
        World {
            solids: self.solids,
            stats: self.stats,
        }
    }

    fn solid_for(&mut self, representative: &Block, size: [u32; 3]) -> Solid {
        let origin = representative.coordinates;
        let mut faces = Vec::with_capacity(6);

        for direction in Direction::ALL {
            let hidden = self.config.cull_hidden_faces
                && self.is_face_hidden(representative, origin, size, direction);

            let texture = if hidden {
                self.stats.culled_faces += 1;
                match &self.config.culled_face_material {
                    Some(material) => material.clone(),
                    None => continue,
                }
            } else {
                self.texture_for(&representative.info, direction)
            };

            faces.push(self.face(origin, size, direction, texture));
        }

        Solid {
            origin,
            size,
            block: representative.info.to_string(),
            faces,
        }
    }

    /// Whether `neighbor` hides the adjacent face of `representative`.
    ///
    /// Any drawable neighbor hides it, unless translucent culling is on.
    fn hides(&self, neighbor: &Block, representative: &Block) -> bool {
        if self.config.translucent_culling {
            neighbor.occludes(representative)
        } else {
            neighbor.is_drawable()
        }
    }

    /// A side is hidden when every cell directly outside it holds a block
    /// that hides the representative.
    fn is_face_hidden(
        &self,
        representative: &Block,
        origin: Coordinates,
        size: [u32; 3],
        direction: Direction,
    ) -> bool {
        let axis = direction.axis().index();
        let outside = if direction.is_positive() {
            origin.as_array()[axis] + size[axis] as i32
        } else {
            origin.as_array()[axis] - 1
        };

        let start = origin.as_array();
        (0..size[0] as i32).all(|dx| {
            (0..size[1] as i32).all(|dy| {
                (0..size[2] as i32).all(|dz| {
                    let mut cell = [start[0] + dx, start[1] + dy, start[2] + dz];
                    if cell[axis] != start[axis] {
                        return true;
                    }
                    cell[axis] = outside;
                    self.grid
                        .get(Coordinates::from(cell))
                        .is_some_and(|neighbor| self.hides(neighbor, representative))
                })
            })
        })
    }

    /// Per-face override, then the configured material, then the id path.
    fn texture_for(&self, info: &BlockInfo, direction: Direction) -> String {
        if let Some(block) = self.config.block(info) {
            if let Some(texture) = block.faces.get(&direction) {
                return texture.clone();
            }
            if let Some(material) = &block.material {
                return format!("{}/{}", info.namespace, material);
            }
        }
        info.to_path()
    }

    fn face(&self, origin: Coordinates, size: [u32; 3], direction: Direction, texture: String) -> Face {
        let scale = self.config.block_size;
        let min = Vec3::new(origin.x as f32, origin.y as f32, origin.z as f32) * scale;
        let max = min + Vec3::new(size[0] as f32, size[1] as f32, size[2] as f32) * scale;

        Face {
            direction,
            texture,
            vertices: face_vertices(min, max, direction),
        }
    }
}

/// Corners of one side of the box `[min, max]`, counter-clockwise seen
/// from outside.
fn face_vertices(min: Vec3, max: Vec3, direction: Direction) -> [Vec3; 4] {
    // (u, v, axis) is a right-handed cycle, so walking u then v winds
    // counter-clockwise around +axis.
    let axis = direction.axis().index();
    let u = (axis + 1) % 3;
    let v = (axis + 2) % 3;
    let plane = if direction.is_positive() { max[axis] } else { min[axis] };

    let corner = |at_max_u: bool, at_max_v: bool| {
        let mut p = Vec3::ZERO;
        p[axis] = plane;
        p[u] = if at_max_u { max[u] } else { min[u] };
        p[v] = if at_max_v { max[v] } else { min[v] };
        p
    };

    let quad = [
        corner(false, false),
        corner(true, false),
        corner(true, true),
        corner(false, true),
    ];
    if direction.is_positive() {
        quad
    } else {
        [quad[0], quad[3], quad[2], quad[1]]
    }
}
