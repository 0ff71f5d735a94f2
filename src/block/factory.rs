//! Creation of typed blocks from palette entries.

use super::{Block, BlockEntity, BlockInfo, BlockKind, BlockRegistry, Classification};
use crate::config::ConvertConfig;
use crate::types::Coordinates;

/// Builds [`Block`] values, classifying each distinct block state once.
#[derive(Debug, Clone, Default)]
pub struct BlockFactory {
    registry: BlockRegistry,
}

/// A palette entry with its classification resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedState {
    pub info: BlockInfo,
    pub classification: Classification,
}

impl ResolvedState {
    pub fn kind(&self) -> &BlockKind {
        &self.classification.kind
    }

    /// True when the id matched nothing and was degraded to a generic solid.
    pub fn is_generic(&self) -> bool {
        !self.classification.recognized
    }
}

impl BlockFactory {
    pub fn new(registry: BlockRegistry) -> Self {
        Self { registry }
    }

    pub fn from_config(config: &ConvertConfig) -> Self {
        Self::new(BlockRegistry::from_config(config))
    }

    /// Classify a block state.
    pub fn resolve(&self, info: BlockInfo) -> ResolvedState {
        let classification = self.registry.classify(&info);
        if !classification.recognized {
            tracing::debug!("Unrecognized block {}, treating as generic solid", info);
        }
        ResolvedState {
            info,
            classification,
        }
    }

    /// Create a block from a resolved state and the block entity found at
    /// the same position.
    pub fn create(
        &self,
        state: &ResolvedState,
        coordinates: Coordinates,
        entity: Option<BlockEntity>,
    ) -> Block {
        Block::new(coordinates, state.info.clone(), state.kind().clone(), entity)
    }

    /// Parse, classify and create a block in one step.
    pub fn create_from_str(
        &self,
        state: &str,
        coordinates: Coordinates,
        entity: Option<BlockEntity>,
    ) -> crate::Result<Block> {
        let resolved = self.resolve(BlockInfo::parse(state)?);
        Ok(self.create(&resolved, coordinates, entity))
    }
}
