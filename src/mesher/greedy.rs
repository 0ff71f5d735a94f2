//! Greedy run merging.
//!
//! Collapses maximal straight runs of identical drawable blocks into
//! [`BlockGroup`]s so that each run is exported as one solid instead of one
//! solid per block. Runs are tried along +Y first, then +X, then +Z; the
//! first axis that extends wins and the choice is final.

use crate::block::Block;
use crate::grid::BlockGrid;
use crate::types::{Coordinates, Direction};
use serde::{Deserialize, Serialize};

/// Index of a group in the list returned by [`greedy_merge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(pub usize);

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Axis a group extends along from its origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeAxis {
    /// Extends towards +Y.
    Top,
    /// Extends towards +X.
    East,
    /// Extends towards +Z.
    North,
}

impl MergeAxis {
    /// Order in which axes are tried.
    pub const PRIORITY: [MergeAxis; 3] = [MergeAxis::Top, MergeAxis::East, MergeAxis::North];

    /// Direction a run extends in.
    pub fn direction(&self) -> Direction {
        match self {
            MergeAxis::Top => Direction::Up,
            MergeAxis::East => Direction::East,
            MergeAxis::North => Direction::North,
        }
    }
}

impl std::fmt::Display for MergeAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MergeAxis::Top => "top",
            MergeAxis::East => "east",
            MergeAxis::North => "north",
        };
        f.write_str(name)
    }
}

/// A straight run of identical blocks exported as one solid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockGroup {
    pub id: GroupId,
    pub axis: MergeAxis,
    /// Member positions ordered along the axis, origin first.
    pub members: Vec<Coordinates>,
}

impl BlockGroup {
    /// The origin block's position.
    pub fn representative(&self) -> Coordinates {
        self.members[0]
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Extent in blocks: run length on the merge axis, 1 elsewhere.
    pub fn size(&self) -> [u32; 3] {
        let mut size = [1; 3];
        size[self.axis.direction().axis().index()] = self.members.len() as u32;
        size
    }
}

/// Merge runs in the grid, tagging every member block with its group.
///
/// Cells are visited with Z outermost, then X, then Y. Cells that are not
/// drawable or already belong to a group are skipped. Groups are returned
/// in discovery order and `groups[i].id == GroupId(i)`.
pub fn greedy_merge(grid: &mut BlockGrid) -> Vec<BlockGroup> {
    let dims = grid.dimensions();
    let mut groups = Vec::new();

    for z in 0..dims.length as i32 {
        for x in 0..dims.width as i32 {
            for y in 0..dims.height as i32 {
                let origin = Coordinates::new(x, y, z);
                let Some(block) = grid.get(origin) else {
                    continue;
                };
                if !block.is_mergeable() {
                    continue;
                }

                let Some((axis, run)) = MergeAxis::PRIORITY.iter().find_map(|&axis| {
                    let run = extend_run(grid, block, axis);
                    (!run.is_empty()).then_some((axis, run))
                }) else {
                    continue;
                };

                let id = GroupId(groups.len());
                tracing::debug!(
                    "Group {}: {} x{} along {} from {}",
                    id,
                    block.info,
                    run.len() + 1,
                    axis,
                    origin
                );

                let mut members = Vec::with_capacity(run.len() + 1);
                members.push(origin);
                members.extend(run);
                for &member in &members {
                    grid.assign_group(member, id);
                }

                groups.push(BlockGroup { id, axis, members });
            }
        }
    }

    groups
}

/// Walk from `origin` along `axis`, collecting neighbors that can join it.
fn extend_run(grid: &BlockGrid, origin: &Block, axis: MergeAxis) -> Vec<Coordinates> {
    let direction = axis.direction();
    let mut run = Vec::new();
    let mut cursor = origin.coordinates.neighbor(direction);

    while let Some(next) = grid.get(cursor) {
        if !next.is_mergeable() || !next.merges_with(origin) {
            break;
        }
        run.push(cursor);
        cursor = cursor.neighbor(direction);
    }

    run
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockFactory;
    use crate::types::Dimensions3D;
    use std::collections::HashSet;

    /// Build a grid where `fill` picks the block state of each cell.
    fn grid_of(dims: Dimensions3D, fill: impl Fn(Coordinates) -> &'static str) -> BlockGrid {
        let factory = BlockFactory::default();
        let mut grid = BlockGrid::new(dims);
        for i in 0..dims.volume() {
            let coords = grid.coordinates_of(i);
            let block = factory.create_from_str(fill(coords), coords, None).unwrap();
            grid.set(coords, block);
        }
        grid
    }

    #[test]
    fn test_row_merges_east() {
        let mut grid = grid_of(Dimensions3D::new(3, 1, 1), |_| "minecraft:stone");
        let groups = greedy_merge(&mut grid);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].axis, MergeAxis::East);
        assert_eq!(groups[0].len(), 3);
        assert_eq!(groups[0].representative(), Coordinates::new(0, 0, 0));
        assert_eq!(groups[0].size(), [3, 1, 1]);
        assert!(grid.iter().all(|b| b.group() == Some(GroupId(0))));
    }

    #[test]
    fn test_vertical_run_wins() {
        // 2x2x1: both columns extend up and along X; Y is tried first.
        let mut grid = grid_of(Dimensions3D::new(2, 2, 1), |_| "minecraft:stone");
        let groups = greedy_merge(&mut grid);

        assert_eq!(groups.len(), 2);
        assert!(groups.iter().all(|g| g.axis == MergeAxis::Top));
        assert_eq!(groups[0].members, vec![Coordinates::new(0, 0, 0), Coordinates::new(0, 1, 0)]);
        assert_eq!(groups[1].members, vec![Coordinates::new(1, 0, 0), Coordinates::new(1, 1, 0)]);
    }

    #[test]
    fn test_east_run_wins_over_north() {
        // 2x1x2: each row extends along both X and Z; X is tried before Z.
        let mut grid = grid_of(Dimensions3D::new(2, 1, 2), |_| "minecraft:stone");
        let groups = greedy_merge(&mut grid);

        assert_eq!(groups.len(), 2);
        assert!(groups.iter().all(|g| g.axis == MergeAxis::East));
        assert!(!groups.iter().any(|g| g.axis == MergeAxis::North));
        assert_eq!(groups[0].members, vec![Coordinates::new(0, 0, 0), Coordinates::new(1, 0, 0)]);
        assert_eq!(groups[1].members, vec![Coordinates::new(0, 0, 1), Coordinates::new(1, 0, 1)]);
    }

    #[test]
    fn test_north_run() {
        let mut grid = grid_of(Dimensions3D::new(1, 1, 4), |c| {
            if c.z == 3 {
                "minecraft:dirt"
            } else {
                "minecraft:stone"
            }
        });
        let groups = greedy_merge(&mut grid);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].axis, MergeAxis::North);
        assert_eq!(groups[0].size(), [1, 1, 3]);
        assert!(grid.get(Coordinates::new(0, 0, 3)).unwrap().group().is_none());
    }

    #[test]
    fn test_runs_stop_at_different_blocks() {
        let mut grid = grid_of(Dimensions3D::new(4, 1, 1), |c| match c.x {
            0 | 1 => "minecraft:stone",
            2 => "minecraft:air",
            _ => "minecraft:stone",
        });
        let groups = greedy_merge(&mut grid);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 2);
        assert!(grid.get(Coordinates::new(3, 0, 0)).unwrap().group().is_none());
        assert!(grid.get(Coordinates::new(2, 0, 0)).unwrap().group().is_none());
    }

    #[test]
    fn test_properties_break_runs() {
        let mut grid = grid_of(Dimensions3D::new(2, 1, 1), |c| {
            if c.x == 0 {
                "minecraft:oak_log[axis=x]"
            } else {
                "minecraft:oak_log[axis=y]"
            }
        });
        assert!(greedy_merge(&mut grid).is_empty());
    }

    #[test]
    fn test_all_air_forms_no_groups() {
        let mut grid = grid_of(Dimensions3D::new(3, 3, 3), |_| "minecraft:air");
        assert!(greedy_merge(&mut grid).is_empty());
        assert!(grid.iter().all(|b| !b.is_grouped()));
    }

    #[test]
    fn test_grouped_cells_are_skipped() {
        // An L shape: the column at x=0 is taken by a Top group, so the
        // bottom row can only start its own run from x=1.
        let mut grid = grid_of(Dimensions3D::new(3, 2, 1), |c| {
            if c.y == 1 && c.x > 0 {
                "minecraft:air"
            } else {
                "minecraft:stone"
            }
        });
        let groups = greedy_merge(&mut grid);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].axis, MergeAxis::Top);
        assert_eq!(groups[1].axis, MergeAxis::East);
        assert_eq!(groups[1].members, vec![Coordinates::new(1, 0, 0), Coordinates::new(2, 0, 0)]);
    }

    fn mixed(c: Coordinates) -> &'static str {
        match (c.x * 7 + c.y * 3 + c.z * 5) % 4 {
            0 => "minecraft:air",
            1 => "minecraft:stone",
            2 => "minecraft:glass",
            _ => "minecraft:stone",
        }
    }

    #[test]
    fn test_coverage_is_complete_and_disjoint() {
        let mut grid = grid_of(Dimensions3D::new(5, 4, 6), mixed);
        let groups = greedy_merge(&mut grid);

        let mut seen = HashSet::new();
        for group in &groups {
            assert!(group.len() >= 2);
            for &member in &group.members {
                assert!(seen.insert(member), "{} in two groups", member);
                assert_eq!(grid.get(member).unwrap().group(), Some(group.id));
            }
        }
        for block in grid.iter() {
            match block.group() {
                Some(id) => {
                    assert!(block.is_drawable());
                    assert!(groups[id.0].members.contains(&block.coordinates));
                }
                None => assert!(!seen.contains(&block.coordinates)),
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let dims = Dimensions3D::new(6, 5, 4);
        let mut first = grid_of(dims, mixed);
        let mut second = grid_of(dims, mixed);
        assert_eq!(greedy_merge(&mut first), greedy_merge(&mut second));
    }
}
