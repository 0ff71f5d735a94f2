//! Block-state strings: `namespace:id[prop=value,...]`.

use crate::error::{Result, SchematicError};
use serde::Serialize;
use std::collections::BTreeMap;

/// Namespace assumed when a block-state string omits one.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Parsed identity of a block state.
///
/// Properties are kept sorted so that two infos built from differently
/// ordered palette strings compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BlockInfo {
    /// Namespace, e.g. "minecraft".
    pub namespace: String,
    /// Block ID without namespace, e.g. "oak_log".
    pub id: String,
    /// Block-state properties, e.g. {"axis": "y"}.
    pub properties: BTreeMap<String, String>,
}

impl BlockInfo {
    pub fn new(namespace: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            id: id.into(),
            properties: BTreeMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Parse a palette string such as `minecraft:oak_log[axis=y]`.
    pub fn parse(state: &str) -> Result<Self> {
        let invalid = || SchematicError::InvalidBlockState(state.to_string());
        let trimmed = state.trim();

        let (name, props) = match trimmed.find('[') {
            Some(open) => {
                let body = trimmed[open + 1..].strip_suffix(']').ok_or_else(invalid)?;
                (&trimmed[..open], Some(body))
            }
            None => (trimmed, None),
        };

        let (namespace, id) = match name.split_once(':') {
            Some((namespace, id)) => (namespace, id),
            None => (DEFAULT_NAMESPACE, name),
        };
        if namespace.is_empty() || id.is_empty() || id.contains(':') {
            return Err(invalid());
        }

        let mut info = BlockInfo::new(namespace, id);
        if let Some(body) = props {
            for pair in body.split(',').map(str::trim).filter(|p| !p.is_empty()) {
                let (key, value) = pair.split_once('=').ok_or_else(invalid)?;
                let key = key.trim();
                if key.is_empty() {
                    return Err(invalid());
                }
                info.properties.insert(key.to_string(), value.trim().to_string());
            }
        }

        Ok(info)
    }

    /// Full resource name, e.g. "minecraft:stone".
    pub fn name(&self) -> String {
        format!("{}:{}", self.namespace, self.id)
    }

    /// Default material path derived from the id, e.g. "minecraft/stone".
    pub fn to_path(&self) -> String {
        format!("{}/{}", self.namespace, self.id)
    }

    /// Get a property value.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}

impl std::str::FromStr for BlockInfo {
    type Err = SchematicError;

    fn from_str(s: &str) -> Result<Self> {
        BlockInfo::parse(s)
    }
}

impl std::fmt::Display for BlockInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.namespace, self.id)?;
        if !self.properties.is_empty() {
            write!(f, "[")?;
            for (i, (key, value)) in self.properties.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}={}", key, value)?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        let info = BlockInfo::parse("minecraft:stone").unwrap();
        assert_eq!(info.namespace, "minecraft");
        assert_eq!(info.id, "stone");
        assert!(info.properties.is_empty());
        assert_eq!(info.to_path(), "minecraft/stone");
    }

    #[test]
    fn test_parse_without_namespace() {
        let info = BlockInfo::parse("dirt").unwrap();
        assert_eq!(info.namespace, DEFAULT_NAMESPACE);
        assert_eq!(info.id, "dirt");
    }

    #[test]
    fn test_parse_properties() {
        let info = BlockInfo::parse("minecraft:oak_stairs[half=bottom, facing=north]").unwrap();
        assert_eq!(info.id, "oak_stairs");
        assert_eq!(info.property("facing"), Some("north"));
        assert_eq!(info.property("half"), Some("bottom"));
        assert_eq!(info.to_string(), "minecraft:oak_stairs[facing=north,half=bottom]");
    }

    #[test]
    fn test_property_order_does_not_matter() {
        let a = BlockInfo::parse("minecraft:oak_log[axis=y,waterlogged=false]").unwrap();
        let b = BlockInfo::parse("minecraft:oak_log[waterlogged=false,axis=y]").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_empty_property_list() {
        let info = BlockInfo::parse("minecraft:glass[]").unwrap();
        assert!(info.properties.is_empty());
        assert_eq!(info.to_string(), "minecraft:glass");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "minecraft:", ":stone", "minecraft:oak_log[axis=y", "minecraft:oak_log[axis]", "a:b:c"] {
            assert!(
                matches!(BlockInfo::parse(bad), Err(SchematicError::InvalidBlockState(_))),
                "expected {:?} to be rejected",
                bad
            );
        }
    }
}
