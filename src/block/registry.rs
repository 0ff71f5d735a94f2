//! Block classification by id.
//!
//! Determines how a block takes part in meshing from its id alone, using
//! name heuristics. Per-block configuration overrides the heuristics.

use super::{BlockInfo, BlockKind};
use crate::config::{ConvertConfig, KindOverride};

/// Result of classifying a block id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub kind: BlockKind,
    /// False when no table or override matched and the block fell back to
    /// a generic solid.
    pub recognized: bool,
}

/// Classifies block ids, consulting configuration overrides first.
#[derive(Debug, Clone, Default)]
pub struct BlockRegistry {
    overrides: Vec<(String, KindOverride)>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry honoring the `kind` overrides in a configuration.
    pub fn from_config(config: &ConvertConfig) -> Self {
        let mut overrides: Vec<_> = config
            .blocks
            .iter()
            .filter_map(|(name, block)| block.kind.map(|kind| (name.clone(), kind)))
            .collect();
        // Namespaced keys sort before bare ids so they win on lookup.
        overrides.sort_by(|a, b| {
            b.0.contains(':')
                .cmp(&a.0.contains(':'))
                .then_with(|| a.0.cmp(&b.0))
        });
        Self { overrides }
    }

    /// Classify a block.
    pub fn classify(&self, info: &BlockInfo) -> Classification {
        if let Some(kind) = self.override_for(info) {
            let kind = match kind {
                KindOverride::Solid => BlockKind::Solid,
                KindOverride::Translucent => BlockKind::Translucent(info.id.clone()),
                KindOverride::Container => BlockKind::Container,
                KindOverride::NonDrawable => BlockKind::NonDrawable,
            };
            return Classification {
                kind,
                recognized: true,
            };
        }

        let id = info.id.as_str();
        let kind = if is_air(id) {
            Some(BlockKind::NonDrawable)
        } else if let Some(group) = translucent_group(id) {
            Some(BlockKind::Translucent(group))
        } else if SOLID_IDS.contains(&id) {
            Some(BlockKind::Solid)
        } else if !is_likely_full_cube(id) {
            Some(BlockKind::NonDrawable)
        } else if is_container(id) {
            Some(BlockKind::Container)
        } else if SOLID_SUFFIXES.iter().any(|suffix| id.ends_with(suffix)) {
            Some(BlockKind::Solid)
        } else {
            None
        };

        match kind {
            Some(kind) => Classification {
                kind,
                recognized: true,
            },
            None => Classification {
                kind: BlockKind::Solid,
                recognized: false,
            },
        }
    }

    fn override_for(&self, info: &BlockInfo) -> Option<KindOverride> {
        let name = info.name();
        self.overrides
            .iter()
            .find(|(key, _)| *key == name)
            .or_else(|| self.overrides.iter().find(|(key, _)| *key == info.id))
            .map(|(_, kind)| *kind)
    }
}

fn is_air(id: &str) -> bool {
    matches!(id, "air" | "cave_air" | "void_air" | "structure_void" | "light")
}

/// Translucent blocks only hide faces of the same group.
fn translucent_group(id: &str) -> Option<String> {
    // Glass panes are not full cubes; the shape check handles them.
    if id == "glass_pane" || id.ends_with("_glass_pane") {
        return None;
    }

    if id == "glass" || id.ends_with("_glass") {
        if id.contains("stained") {
            return Some("stained_glass".to_string());
        }
        if id == "tinted_glass" {
            return Some("tinted_glass".to_string());
        }
        return Some("glass".to_string());
    }

    if id == "ice" || id == "packed_ice" || id == "blue_ice" || id == "frosted_ice" {
        return Some(id.to_string());
    }

    if id.ends_with("_leaves") {
        return Some("leaves".to_string());
    }

    if id == "slime_block" || id == "honey_block" || id == "spawner" || id == "beacon" {
        return Some(id.to_string());
    }

    None
}

/// Full cubes whose state lives in a block entity.
fn is_container(id: &str) -> bool {
    matches!(
        id,
        "furnace"
            | "blast_furnace"
            | "smoker"
            | "barrel"
            | "dispenser"
            | "dropper"
            | "jukebox"
            | "beehive"
            | "bee_nest"
            | "command_block"
            | "chain_command_block"
            | "repeating_command_block"
            | "structure_block"
            | "jigsaw"
            | "chiseled_bookshelf"
            | "crafter"
            | "sculk_catalyst"
            | "trial_spawner"
            | "vault"
    )
}

/// Known full cubes, checked before the shape heuristic so that ids like
/// "bedrock" or "sea_lantern" are not mistaken for beds and lanterns.
const SOLID_IDS: &[&str] = &[
    "stone", "granite", "diorite", "andesite", "deepslate", "calcite", "tuff",
    "dirt", "coarse_dirt", "rooted_dirt", "mud", "clay", "gravel", "sand",
    "red_sand", "sandstone", "red_sandstone", "cobblestone", "mossy_cobblestone",
    "bedrock", "obsidian", "crying_obsidian", "netherrack", "end_stone",
    "glowstone", "sea_lantern", "bookshelf", "crafting_table", "terracotta",
    "prismarine", "dark_prismarine", "purpur_pillar", "quartz_pillar",
    "blackstone", "basalt", "smooth_basalt", "soul_sand", "soul_soil",
    "sponge", "wet_sponge", "pumpkin", "carved_pumpkin", "jack_o_lantern",
    "melon", "tnt", "observer", "target", "podzol", "mycelium", "packed_mud",
    "redstone_lamp", "shroomlight", "sculk", "mushroom_stem", "loom",
    "cartography_table", "fletching_table", "smithing_table",
];

/// Id suffixes of full-cube families.
const SOLID_SUFFIXES: &[&str] = &[
    "_planks", "_log", "_wood", "_stem", "_hyphae", "_wool", "_concrete",
    "_concrete_powder", "_terracotta", "_ore", "_bricks", "_block",
];

/// Heuristic check whether a block id likely represents a full cube.
fn is_likely_full_cube(id: &str) -> bool {
    let non_full_patterns = [
        "slab", "stairs", "fence", "wall", "door", "trapdoor",
        "sign", "banner", "button", "lever", "torch", "lantern",
        "pressure_plate", "carpet", "rail", "flower", "sapling",
        "glass_pane", "iron_bars", "chain", "rod", "candle",
        "head", "skull", "pot", "campfire", "anvil", "bell",
        "brewing_stand", "cauldron", "hopper", "lectern",
        "grindstone", "stonecutter", "enchanting_table",
        "repeater", "comparator", "daylight_detector",
        "piston", "tripwire", "string", "cobweb", "vine",
        "ladder", "scaffolding", "coral_fan", "pickle",
        "egg", "frogspawn", "dripleaf", "azalea", "roots",
        "sprouts", "fungus", "mushroom", "grass", "fern",
        "bush", "berry", "wart", "crop", "wheat",
        "carrots", "potatoes", "beetroots", "cocoa", "cactus",
        "sugar_cane", "bamboo", "kelp", "seagrass", "lichen",
        "pumpkin_stem", "melon_stem",
        "vein", "fire", "snow", "layer", "chest", "bed",
        "shulker_box", "conduit", "water", "lava", "bubble_column",
        "poppy", "dandelion", "orchid", "allium", "tulip",
        "oxeye_daisy", "cornflower", "lily_of_the_valley",
        "wither_rose", "sunflower", "lilac", "rose_bush",
        "peony", "pitcher_plant", "torchflower", "pink_petals",
    ];

    for pattern in &non_full_patterns {
        if id.contains(pattern) {
            // Some blocks contain these patterns but are full cubes,
            // e.g. "mushroom_block", "grass_block", "snow_block".
            if id.ends_with("_block") && !id.contains("piston") {
                continue;
            }
            return false;
        }
    }

    true
}
