//! Error types for schematic conversion.

use thiserror::Error;

/// Result type alias using SchematicError.
pub type Result<T> = std::result::Result<T, SchematicError>;

/// Main error type for loading and converting schematics.
///
/// Every variant is fatal to the load it occurs in: no partially
/// populated grid or world is ever returned alongside an error.
#[derive(Error, Debug)]
pub enum SchematicError {
    /// A required tag is absent from the tag tree.
    #[error("Required field missing: {0}")]
    FieldMissing(String),

    /// A tag is present but has the wrong type or an unusable value.
    #[error("Invalid field {field}: {reason}")]
    InvalidField { field: String, reason: String },

    /// A VarInt in the block data spans more than 5 bytes.
    #[error("VarInt at byte {offset} is longer than 5 bytes (corrupted block data)")]
    VarIntOverflow { offset: usize },

    /// The block data does not hold exactly one value per voxel.
    #[error("Block data holds {actual} voxels, expected {expected}")]
    BlockDataLengthMismatch { expected: usize, actual: usize },

    /// A decoded palette code has no entry in the palette.
    #[error("Palette has no entry for code {0}")]
    PaletteIndexUnknown(u64),

    /// A block-state string could not be parsed.
    #[error("Invalid block state: {0}")]
    InvalidBlockState(String),

    /// Failed to read the NBT tag tree.
    #[error("NBT error: {0}")]
    Nbt(#[from] quartz_nbt::io::NbtIoError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse a JSON configuration.
    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),
}

impl SchematicError {
    pub(crate) fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        SchematicError::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
