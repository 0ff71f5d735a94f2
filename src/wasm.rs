//! WASM bindings for schematic-solids.
//!
//! This module provides JavaScript-friendly APIs for use in the browser.

use crate::{ConvertConfig, Converter, World};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the browser console
    console_error_panic_hook::set_once();
}

/// Conversion options settable from JavaScript.
#[wasm_bindgen]
pub struct ConvertOptions {
    block_size: f32,
    cull_hidden_faces: bool,
    translucent_culling: bool,
    skybox: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        let config = ConvertConfig::default();
        Self {
            block_size: config.block_size,
            cull_hidden_faces: config.cull_hidden_faces,
            translucent_culling: config.translucent_culling,
            skybox: config.skybox,
        }
    }
}

#[wasm_bindgen]
impl ConvertOptions {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ConvertOptions {
        ConvertOptions::default()
    }

    #[wasm_bindgen(setter)]
    pub fn set_block_size(&mut self, value: f32) {
        self.block_size = value;
    }

    #[wasm_bindgen(setter)]
    pub fn set_cull_hidden_faces(&mut self, value: bool) {
        self.cull_hidden_faces = value;
    }

    #[wasm_bindgen(setter)]
    pub fn set_translucent_culling(&mut self, value: bool) {
        self.translucent_culling = value;
    }

    #[wasm_bindgen(setter)]
    pub fn set_skybox(&mut self, value: bool) {
        self.skybox = value;
    }

    fn apply(&self, mut config: ConvertConfig) -> ConvertConfig {
        config.block_size = self.block_size;
        config.cull_hidden_faces = self.cull_hidden_faces;
        config.translucent_culling = self.translucent_culling;
        config.skybox = self.skybox;
        config
    }
}

/// Result of a conversion.
#[wasm_bindgen]
pub struct ConversionResult {
    json: String,
    solid_count: usize,
    face_count: usize,
    generic_blocks: usize,
}

#[wasm_bindgen]
impl ConversionResult {
    /// The world serialized as JSON.
    #[wasm_bindgen(getter)]
    pub fn json(&self) -> String {
        self.json.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn solid_count(&self) -> usize {
        self.solid_count
    }

    #[wasm_bindgen(getter)]
    pub fn face_count(&self) -> usize {
        self.face_count
    }

    #[wasm_bindgen(getter)]
    pub fn generic_blocks(&self) -> usize {
        self.generic_blocks
    }
}

fn to_js_error(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

fn parse_config(config_json: Option<String>) -> Result<ConvertConfig, JsError> {
    match config_json {
        Some(json) => ConvertConfig::from_json_str(&json).map_err(to_js_error),
        None => Ok(ConvertConfig::default()),
    }
}

fn world_json(world: &World) -> Result<String, JsError> {
    serde_json::to_string(world).map_err(to_js_error)
}

/// Convert schematic bytes (gzipped or raw NBT) and return the world as JSON.
#[wasm_bindgen(js_name = convertSchematic)]
pub fn convert_schematic(data: &[u8], config_json: Option<String>) -> Result<String, JsError> {
    let config = parse_config(config_json)?;
    let world = Converter::with_config(config)
        .convert_bytes(data)
        .map_err(to_js_error)?;
    world_json(&world)
}

/// Convert schematic bytes with options layered over an optional JSON config.
#[wasm_bindgen(js_name = convertSchematicWithOptions)]
pub fn convert_schematic_with_options(
    data: &[u8],
    config_json: Option<String>,
    options: Option<ConvertOptions>,
) -> Result<ConversionResult, JsError> {
    let mut config = parse_config(config_json)?;
    if let Some(options) = &options {
        config = options.apply(config);
    }

    let world = Converter::with_config(config)
        .convert_bytes(data)
        .map_err(to_js_error)?;

    Ok(ConversionResult {
        json: world_json(&world)?,
        solid_count: world.solids().len(),
        face_count: world.face_count(),
        generic_blocks: world.stats().generic_blocks,
    })
}
