//! Extraction of schematic fields from an NBT tag tree.
//!
//! The Sponge v2 layout keeps everything at the root:
//!
//! ```text
//! Width, Height, Length: Short
//! Palette:       Compound { "minecraft:stone": Int(1), ... }
//! BlockEntities: List<Compound { Pos: IntArray[3], Id: String, ... }>
//! BlockData:     ByteArray (VarInt palette codes)
//! ```
//!
//! Version 1 names the entity list `TileEntities`. Version 3 wraps the body
//! in a `Schematic` compound and moves palette, data and entities into a
//! `Blocks` container, with entity payloads under `Data`.

use crate::block::BlockEntity;
use crate::error::{Result, SchematicError};
use crate::schematic::palette::Palette;
use crate::types::{Coordinates, Dimensions3D};
use quartz_nbt::{NbtCompound, NbtList, NbtTag};

/// Sponge schematic format generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchematicVersion {
    V1,
    V2,
    V3,
}

/// Raw fields extracted from a schematic tag tree.
#[derive(Debug, Clone)]
pub struct SchematicData {
    pub version: SchematicVersion,
    pub dimensions: Dimensions3D,
    pub palette: Palette,
    pub block_entities: Vec<BlockEntity>,
    pub block_data: Vec<u8>,
}

/// Extract dimensions, palette, block entities and block data.
///
/// Any absent required tag fails with [`SchematicError::FieldMissing`].
pub fn parse_schematic(root: &NbtCompound) -> Result<SchematicData> {
    let body = match root.get::<_, &NbtCompound>("Schematic") {
        Ok(inner) => inner,
        Err(_) => root,
    };

    let dimensions = Dimensions3D::new(
        read_dimension(body, "Width")?,
        read_dimension(body, "Height")?,
        read_dimension(body, "Length")?,
    );

    if let Ok(blocks) = body.get::<_, &NbtCompound>("Blocks") {
        let palette = Palette::from_nbt("Blocks.Palette", compound(blocks, "Palette", "Blocks.Palette")?)?;
        let block_entities =
            parse_block_entities(list(blocks, "BlockEntities", "Blocks.BlockEntities")?, "Blocks.BlockEntities")?;
        let block_data = byte_array(blocks, "Data", "Blocks.Data")?;

        return Ok(SchematicData {
            version: SchematicVersion::V3,
            dimensions,
            palette,
            block_entities,
            block_data,
        });
    }

    let palette = Palette::from_nbt("Palette", compound(body, "Palette", "Palette")?)?;

    let (version, entities_field) = if !body.contains_key("BlockEntities") && body.contains_key("TileEntities") {
        (SchematicVersion::V1, "TileEntities")
    } else {
        (SchematicVersion::V2, "BlockEntities")
    };
    let block_entities = parse_block_entities(list(body, entities_field, entities_field)?, entities_field)?;
    let block_data = byte_array(body, "BlockData", "BlockData")?;

    Ok(SchematicData {
        version,
        dimensions,
        palette,
        block_entities,
        block_data,
    })
}

fn required<'a>(parent: &'a NbtCompound, name: &str, path: &str) -> Result<&'a NbtTag> {
    parent
        .get::<_, &NbtTag>(name)
        .map_err(|_| SchematicError::FieldMissing(path.to_string()))
}

fn wrong_type(path: &str, expected: &str, found: &NbtTag) -> SchematicError {
    SchematicError::invalid_field(
        path,
        format!("expected {}, found {}", expected, tag_type_name(found)),
    )
}

fn compound<'a>(parent: &'a NbtCompound, name: &str, path: &str) -> Result<&'a NbtCompound> {
    match required(parent, name, path)? {
        NbtTag::Compound(inner) => Ok(inner),
        other => Err(wrong_type(path, "Compound", other)),
    }
}

fn list<'a>(parent: &'a NbtCompound, name: &str, path: &str) -> Result<&'a NbtList> {
    match required(parent, name, path)? {
        NbtTag::List(inner) => Ok(inner),
        other => Err(wrong_type(path, "List", other)),
    }
}

fn byte_array(parent: &NbtCompound, name: &str, path: &str) -> Result<Vec<u8>> {
    match required(parent, name, path)? {
        NbtTag::ByteArray(bytes) => Ok(bytes.iter().map(|&b| b as u8).collect()),
        other => Err(wrong_type(path, "ByteArray", other)),
    }
}

/// Dimensions are shorts read as unsigned.
fn read_dimension(parent: &NbtCompound, name: &str) -> Result<u16> {
    match required(parent, name, name)? {
        NbtTag::Short(value) => Ok(*value as u16),
        other => Err(wrong_type(name, "Short", other)),
    }
}

fn parse_block_entities(entries: &NbtList, path: &str) -> Result<Vec<BlockEntity>> {
    let mut block_entities = Vec::with_capacity(entries.len());

    for (i, tag) in entries.iter().enumerate() {
        let entry_path = format!("{}[{}]", path, i);
        let NbtTag::Compound(entry) = tag else {
            return Err(wrong_type(&entry_path, "Compound", tag));
        };

        let coordinates = block_entity_position(entry, &entry_path)?;
        let id = entry
            .get::<_, &str>("Id")
            .or_else(|_| entry.get::<_, &str>("id"))
            .ok()
            .map(str::to_string);
        let data = match entry.get::<_, &NbtCompound>("Data") {
            Ok(data) => data.clone(),
            Err(_) => entry.clone(),
        };

        block_entities.push(BlockEntity::new(coordinates, id, data));
    }

    Ok(block_entities)
}

/// Read `Pos: IntArray[3]`, falling back to separate `x`/`y`/`z` ints.
fn block_entity_position(entry: &NbtCompound, path: &str) -> Result<Coordinates> {
    match entry.get::<_, &NbtTag>("Pos") {
        Ok(NbtTag::IntArray(pos)) if pos.len() == 3 => Ok(Coordinates::new(pos[0], pos[1], pos[2])),
        Ok(other) => Err(SchematicError::invalid_field(
            format!("{}.Pos", path),
            format!("expected IntArray of length 3, found {}", tag_type_name(other)),
        )),
        Err(_) => match (
            entry.get::<_, i32>("x"),
            entry.get::<_, i32>("y"),
            entry.get::<_, i32>("z"),
        ) {
            (Ok(x), Ok(y), Ok(z)) => Ok(Coordinates::new(x, y, z)),
            _ => Err(SchematicError::FieldMissing(format!("{}.Pos", path))),
        },
    }
}

/// Human-readable name of a tag's type.
pub(crate) fn tag_type_name(tag: &NbtTag) -> &'static str {
    match tag {
        NbtTag::Byte(_) => "Byte",
        NbtTag::Short(_) => "Short",
        NbtTag::Int(_) => "Int",
        NbtTag::Long(_) => "Long",
        NbtTag::Float(_) => "Float",
        NbtTag::Double(_) => "Double",
        NbtTag::ByteArray(_) => "ByteArray",
        NbtTag::String(_) => "String",
        NbtTag::List(_) => "List",
        NbtTag::Compound(_) => "Compound",
        NbtTag::IntArray(_) => "IntArray",
        NbtTag::LongArray(_) => "LongArray",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schematic::varint::encode_block_data;

    fn v2_root() -> NbtCompound {
        let mut palette = NbtCompound::new();
        palette.insert("minecraft:air", NbtTag::Int(0));
        palette.insert("minecraft:stone", NbtTag::Int(1));

        let mut chest = NbtCompound::new();
        chest.insert("Pos", NbtTag::IntArray(vec![1, 0, 0]));
        chest.insert("Id", NbtTag::String("minecraft:barrel".into()));
        chest.insert("CustomName", NbtTag::String("loot".into()));
        let mut entities = NbtList::new();
        entities.push(NbtTag::Compound(chest));

        let data: Vec<i8> = encode_block_data(&[1, 0])
            .into_iter()
            .map(|b| b as i8)
            .collect();

        let mut root = NbtCompound::new();
        root.insert("Version", NbtTag::Int(2));
        root.insert("Width", NbtTag::Short(2));
        root.insert("Height", NbtTag::Short(1));
        root.insert("Length", NbtTag::Short(1));
        root.insert("Palette", NbtTag::Compound(palette));
        root.insert("BlockEntities", NbtTag::List(entities));
        root.insert("BlockData", NbtTag::ByteArray(data));
        root
    }

    #[test]
    fn test_parse_v2() {
        let data = parse_schematic(&v2_root()).unwrap();
        assert_eq!(data.version, SchematicVersion::V2);
        assert_eq!(data.dimensions, Dimensions3D::new(2, 1, 1));
        assert_eq!(data.palette.len(), 2);
        assert_eq!(data.block_data, vec![1, 0]);
        assert_eq!(data.block_entities.len(), 1);

        let entity = &data.block_entities[0];
        assert_eq!(entity.coordinates, Coordinates::new(1, 0, 0));
        assert_eq!(entity.id.as_deref(), Some("minecraft:barrel"));
        assert_eq!(entity.data.get::<_, &str>("CustomName").unwrap(), "loot");
    }

    #[test]
    fn test_missing_fields() {
        for field in ["Width", "Height", "Length", "Palette", "BlockEntities", "BlockData"] {
            let mut root = NbtCompound::new();
            for (name, tag) in v2_root().inner() {
                if name != field {
                    root.insert(name.clone(), tag.clone());
                }
            }
            match parse_schematic(&root) {
                Err(SchematicError::FieldMissing(missing)) => assert_eq!(missing, field),
                other => panic!("expected FieldMissing({}), got {:?}", field, other.map(|d| d.dimensions)),
            }
        }
    }

    #[test]
    fn test_wrong_dimension_type() {
        let mut root = v2_root();
        root.insert("Width", NbtTag::Int(2));
        assert!(matches!(
            parse_schematic(&root),
            Err(SchematicError::InvalidField { .. })
        ));
    }

    #[test]
    fn test_dimensions_are_unsigned() {
        let mut root = v2_root();
        root.insert("Length", NbtTag::Short(-1));
        let data = parse_schematic(&root).unwrap();
        assert_eq!(data.dimensions.length, u16::MAX);
    }

    #[test]
    fn test_parse_v1_tile_entities() {
        let mut root = NbtCompound::new();
        for (name, tag) in v2_root().inner() {
            let name = if name == "BlockEntities" { "TileEntities".to_string() } else { name.clone() };
            root.insert(name, tag.clone());
        }
        let data = parse_schematic(&root).unwrap();
        assert_eq!(data.version, SchematicVersion::V1);
        assert_eq!(data.block_entities.len(), 1);
    }

    #[test]
    fn test_parse_v3_layout() {
        let v2 = v2_root();
        let mut payload = NbtCompound::new();
        payload.insert("Items", NbtTag::List(NbtList::new()));
        let mut entity = NbtCompound::new();
        entity.insert("Pos", NbtTag::IntArray(vec![0, 0, 0]));
        entity.insert("Id", NbtTag::String("minecraft:furnace".into()));
        entity.insert("Data", NbtTag::Compound(payload));
        let mut entities = NbtList::new();
        entities.push(NbtTag::Compound(entity));

        let mut blocks = NbtCompound::new();
        blocks.insert("Palette", v2.get::<_, &NbtTag>("Palette").unwrap().clone());
        blocks.insert("Data", v2.get::<_, &NbtTag>("BlockData").unwrap().clone());
        blocks.insert("BlockEntities", NbtTag::List(entities));

        let mut body = NbtCompound::new();
        body.insert("Version", NbtTag::Int(3));
        body.insert("Width", NbtTag::Short(2));
        body.insert("Height", NbtTag::Short(1));
        body.insert("Length", NbtTag::Short(1));
        body.insert("Blocks", NbtTag::Compound(blocks));

        let mut root = NbtCompound::new();
        root.insert("Schematic", NbtTag::Compound(body));

        let data = parse_schematic(&root).unwrap();
        assert_eq!(data.version, SchematicVersion::V3);
        assert_eq!(data.block_data, vec![1, 0]);
        let entity = &data.block_entities[0];
        assert_eq!(entity.id.as_deref(), Some("minecraft:furnace"));
        assert!(entity.data.contains_key("Items"));
        assert!(!entity.data.contains_key("Pos"));
    }

    #[test]
    fn test_v3_missing_data_reports_path() {
        let mut blocks = NbtCompound::new();
        blocks.insert("Palette", NbtTag::Compound(NbtCompound::new()));
        blocks.insert("BlockEntities", NbtTag::List(NbtList::new()));
        let mut body = NbtCompound::new();
        body.insert("Width", NbtTag::Short(1));
        body.insert("Height", NbtTag::Short(1));
        body.insert("Length", NbtTag::Short(1));
        body.insert("Blocks", NbtTag::Compound(blocks));

        match parse_schematic(&body) {
            Err(SchematicError::FieldMissing(path)) => assert_eq!(path, "Blocks.Data"),
            other => panic!("unexpected result: {:?}", other.map(|d| d.version)),
        }
    }

    #[test]
    fn test_block_entity_xyz_position() {
        let mut entry = NbtCompound::new();
        entry.insert("x", NbtTag::Int(4));
        entry.insert("y", NbtTag::Int(5));
        entry.insert("z", NbtTag::Int(6));
        assert_eq!(
            block_entity_position(&entry, "BlockEntities[0]").unwrap(),
            Coordinates::new(4, 5, 6)
        );

        let empty = NbtCompound::new();
        assert!(matches!(
            block_entity_position(&empty, "BlockEntities[0]"),
            Err(SchematicError::FieldMissing(path)) if path == "BlockEntities[0].Pos"
        ));
    }
}
