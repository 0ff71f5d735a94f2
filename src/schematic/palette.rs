//! Block-state palette.

use crate::block::BlockInfo;
use crate::error::{Result, SchematicError};
use crate::schematic::parser::tag_type_name;
use quartz_nbt::{NbtCompound, NbtTag};
use std::collections::HashMap;

/// Maps the codes used in block data to block states.
///
/// In the tag tree the palette is a compound keyed by block-state string
/// with an `Int` code as value; it is stored here inverted, keyed by code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Palette {
    entries: HashMap<u32, BlockInfo>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a palette compound.
    pub fn from_nbt(field: &str, palette: &NbtCompound) -> Result<Self> {
        let mut entries = HashMap::with_capacity(palette.len());

        for (state, tag) in palette.inner() {
            let code = match tag {
                NbtTag::Int(code) => *code,
                other => {
                    return Err(SchematicError::invalid_field(
                        format!("{}.{}", field, state),
                        format!("expected Int code, found {}", tag_type_name(other)),
                    ))
                }
            };
            let code = u32::try_from(code).map_err(|_| {
                SchematicError::invalid_field(
                    format!("{}.{}", field, state),
                    format!("negative palette code {}", code),
                )
            })?;

            let info = BlockInfo::parse(state)?;
            if let Some(existing) = entries.insert(code, info) {
                return Err(SchematicError::invalid_field(
                    field,
                    format!("code {} used by both {} and {}", code, existing, state),
                ));
            }
        }

        Ok(Self { entries })
    }

    pub fn insert(&mut self, code: u32, info: BlockInfo) -> Option<BlockInfo> {
        self.entries.insert(code, info)
    }

    /// Resolve a decoded code.
    pub fn get(&self, code: u64) -> Result<&BlockInfo> {
        u32::try_from(code)
            .ok()
            .and_then(|code| self.entries.get(&code))
            .ok_or(SchematicError::PaletteIndexUnknown(code))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &BlockInfo)> + '_ {
        self.entries.iter().map(|(code, info)| (*code, info))
    }
}
