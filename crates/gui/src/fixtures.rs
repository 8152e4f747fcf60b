//! Factory functions for creating test data.
//!
//! Provides catalog/settings helpers and an in-memory GLB writer so asset
//! loading can be exercised without shipping binary model files.

use std::path::{Path, PathBuf};

use shared::{Catalog, HexColor, Swatch};

use crate::scene::{Material, Mesh, SceneGraph, SceneNode};
use crate::state::AppSettings;
use crate::viewport::mesh::{self, MeshData, VERTEX_STRIDE};

// ── Catalog / settings factories ────────────────────────────────

/// Catalog with `n` generated swatches (`Swatch 0`, `Swatch 1`, ...)
pub fn catalog_with_swatches(n: usize) -> Catalog {
    let swatches = (0..n)
        .map(|i| {
            let v = (i * 20 % 256) as u8;
            Swatch::new(&format!("Swatch {i}"), HexColor::from_rgb(v, 0x40, 0xFF - v))
        })
        .collect();
    Catalog {
        swatches,
        ..Catalog::default()
    }
}

/// Default settings with a different catalog
pub fn settings_with_catalog(catalog: Catalog) -> AppSettings {
    let mut settings = AppSettings::default();
    settings.storefront.catalog = catalog;
    settings
}

/// Default settings resolving `/`-rooted references against `root`
pub fn settings_with_asset_root(root: &Path, model_path: &str) -> AppSettings {
    let mut settings = AppSettings::default();
    settings.asset_root = root.to_path_buf();
    settings.storefront.catalog.model_path = model_path.to_string();
    settings
}

// ── Scene factories ─────────────────────────────────────────────

/// Parts of a simple chair, each with its own distinct material color
pub fn chair_parts() -> Vec<(&'static str, MeshData, [f32; 4])> {
    vec![
        ("Seat", mesh::cube(1.0, 0.2, 1.0), [0.8, 0.2, 0.2, 1.0]),
        ("Back", mesh::cube(1.0, 1.0, 0.1), [0.2, 0.8, 0.2, 1.0]),
        ("Legs", mesh::cube(0.1, 0.6, 0.1), [0.2, 0.2, 0.8, 0.5]),
    ]
}

/// In-memory scene equivalent to [`chair_glb`], with nested nodes
pub fn chair_scene() -> SceneGraph {
    let mut graph = SceneGraph::new();
    let root = graph.add_node(SceneNode::new("Chair"), None);
    for (name, data, [r, g, b, a]) in chair_parts() {
        let mut node = SceneNode::new(name);
        node.meshes.push(Mesh {
            data,
            material: Material {
                base_color: [r, g, b],
                opacity: a,
                transparent: a < 1.0,
                ..Material::default()
            },
        });
        graph.add_node(node, Some(root));
    }
    graph
}

/// GLB bytes of the chair
pub fn chair_glb() -> Vec<u8> {
    let parts = chair_parts();
    let refs: Vec<(&str, &MeshData, [f32; 4])> =
        parts.iter().map(|(n, m, c)| (*n, m, *c)).collect();
    build_glb(&refs)
}

/// Write the chair GLB into `dir` and return its path
pub fn write_chair_glb(dir: &Path, file_name: &str) -> std::io::Result<PathBuf> {
    let path = dir.join(file_name);
    std::fs::write(&path, chair_glb())?;
    Ok(path)
}

// ── GLB writer ──────────────────────────────────────────────────

/// GLB magic number: "glTF"
const GLB_MAGIC: u32 = 0x46546C67;
/// GLB version 2
const GLB_VERSION: u32 = 2;
/// JSON chunk type
const CHUNK_TYPE_JSON: u32 = 0x4E4F534A;
/// BIN chunk type
const CHUNK_TYPE_BIN: u32 = 0x004E4942;

/// glTF component types
const FLOAT: u32 = 5126;
const UNSIGNED_INT: u32 = 5125;

/// glTF buffer view targets
const ARRAY_BUFFER: u32 = 34962;
const ELEMENT_ARRAY_BUFFER: u32 = 34963;

/// Build a GLB (binary glTF) file.
///
/// Each entry becomes a node with one mesh and its own material
/// (`baseColorFactor` = the given RGBA; alpha below 1 uses blend mode).
/// Meshes without vertices or indices are skipped; if nothing remains the
/// result is empty.
pub fn build_glb(meshes: &[(&str, &MeshData, [f32; 4])]) -> Vec<u8> {
    // ── Phase 1: Build binary buffer ─────────────────────────
    let mut bin_data: Vec<u8> = Vec::new();

    struct MeshMeta {
        name: String,
        color: [f32; 4],
        vertex_count: usize,
        index_count: usize,
        pos_offset: usize,
        pos_length: usize,
        norm_offset: usize,
        norm_length: usize,
        idx_offset: usize,
        idx_length: usize,
        pos_min: [f32; 3],
        pos_max: [f32; 3],
    }

    let mut metas: Vec<MeshMeta> = Vec::new();

    for (name, mesh, color) in meshes {
        let vertex_count = mesh.vertex_count();
        let index_count = mesh.indices.len();
        if vertex_count == 0 || index_count == 0 {
            continue;
        }

        let mut positions: Vec<f32> = Vec::with_capacity(vertex_count * 3);
        let mut normals: Vec<f32> = Vec::with_capacity(vertex_count * 3);
        let mut pos_min = [f32::MAX; 3];
        let mut pos_max = [f32::MIN; 3];

        for vertex in mesh.vertices.chunks_exact(VERTEX_STRIDE) {
            positions.extend_from_slice(&vertex[0..3]);
            normals.extend_from_slice(&vertex[3..6]);
            for axis in 0..3 {
                pos_min[axis] = pos_min[axis].min(vertex[axis]);
                pos_max[axis] = pos_max[axis].max(vertex[axis]);
            }
        }

        let pos_offset = bin_data.len();
        bin_data.extend_from_slice(&floats_to_bytes(&positions));
        let pos_length = bin_data.len() - pos_offset;

        let norm_offset = bin_data.len();
        bin_data.extend_from_slice(&floats_to_bytes(&normals));
        let norm_length = bin_data.len() - norm_offset;

        let idx_offset = bin_data.len();
        bin_data.extend_from_slice(&u32s_to_bytes(&mesh.indices));
        let idx_length = bin_data.len() - idx_offset;

        metas.push(MeshMeta {
            name: name.to_string(),
            color: *color,
            vertex_count,
            index_count,
            pos_offset,
            pos_length,
            norm_offset,
            norm_length,
            idx_offset,
            idx_length,
            pos_min,
            pos_max,
        });
    }

    if metas.is_empty() {
        return Vec::new();
    }

    // ── Phase 2: Build glTF JSON ─────────────────────────────
    let mut accessors = Vec::new();
    let mut buffer_views = Vec::new();
    let mut gltf_meshes = Vec::new();
    let mut materials = Vec::new();
    let mut nodes = Vec::new();

    for (i, meta) in metas.iter().enumerate() {
        let base = i * 3;

        buffer_views.push(serde_json::json!({
            "buffer": 0,
            "byteOffset": meta.pos_offset,
            "byteLength": meta.pos_length,
            "target": ARRAY_BUFFER
        }));
        buffer_views.push(serde_json::json!({
            "buffer": 0,
            "byteOffset": meta.norm_offset,
            "byteLength": meta.norm_length,
            "target": ARRAY_BUFFER
        }));
        buffer_views.push(serde_json::json!({
            "buffer": 0,
            "byteOffset": meta.idx_offset,
            "byteLength": meta.idx_length,
            "target": ELEMENT_ARRAY_BUFFER
        }));

        accessors.push(serde_json::json!({
            "bufferView": base,
            "componentType": FLOAT,
            "count": meta.vertex_count,
            "type": "VEC3",
            "min": meta.pos_min,
            "max": meta.pos_max
        }));
        accessors.push(serde_json::json!({
            "bufferView": base + 1,
            "componentType": FLOAT,
            "count": meta.vertex_count,
            "type": "VEC3"
        }));
        accessors.push(serde_json::json!({
            "bufferView": base + 2,
            "componentType": UNSIGNED_INT,
            "count": meta.index_count,
            "type": "SCALAR"
        }));

        let alpha_mode = if meta.color[3] < 1.0 { "BLEND" } else { "OPAQUE" };
        materials.push(serde_json::json!({
            "name": format!("{} material", meta.name),
            "alphaMode": alpha_mode,
            "pbrMetallicRoughness": {
                "baseColorFactor": meta.color,
                "metallicFactor": 0.9,
                "roughnessFactor": 0.1
            }
        }));

        gltf_meshes.push(serde_json::json!({
            "name": meta.name,
            "primitives": [{
                "attributes": {
                    "POSITION": base,
                    "NORMAL": base + 1
                },
                "indices": base + 2,
                "material": i
            }]
        }));

        nodes.push(serde_json::json!({
            "name": meta.name,
            "mesh": i
        }));
    }

    let node_indices: Vec<usize> = (0..metas.len()).collect();
    let gltf_json = serde_json::json!({
        "asset": {
            "version": "2.0",
            "generator": "Ikarus 3D fixtures"
        },
        "scene": 0,
        "scenes": [{
            "name": "Scene",
            "nodes": node_indices
        }],
        "nodes": nodes,
        "meshes": gltf_meshes,
        "materials": materials,
        "accessors": accessors,
        "bufferViews": buffer_views,
        "buffers": [{
            "byteLength": bin_data.len()
        }]
    });

    assemble_glb(&gltf_json, bin_data)
}

/// Wrap a hand-written glTF document in a GLB container with no BIN chunk
pub fn glb_from_json(gltf_json: &serde_json::Value) -> Vec<u8> {
    assemble_glb(gltf_json, Vec::new())
}

fn assemble_glb(gltf_json: &serde_json::Value, mut bin_data: Vec<u8>) -> Vec<u8> {
    let mut json_bytes = serde_json::to_string(gltf_json)
        .unwrap_or_default()
        .into_bytes();

    // JSON is padded with spaces, BIN with zeros
    while json_bytes.len() % 4 != 0 {
        json_bytes.push(b' ');
    }
    while bin_data.len() % 4 != 0 {
        bin_data.push(0);
    }

    let json_chunk_length = json_bytes.len() as u32;
    let bin_chunk_length = bin_data.len() as u32;
    let mut total_length: u32 = 12 + 8 + json_chunk_length;
    if !bin_data.is_empty() {
        total_length += 8 + bin_chunk_length;
    }

    let mut glb = Vec::with_capacity(total_length as usize);
    glb.extend_from_slice(&GLB_MAGIC.to_le_bytes());
    glb.extend_from_slice(&GLB_VERSION.to_le_bytes());
    glb.extend_from_slice(&total_length.to_le_bytes());

    glb.extend_from_slice(&json_chunk_length.to_le_bytes());
    glb.extend_from_slice(&CHUNK_TYPE_JSON.to_le_bytes());
    glb.extend_from_slice(&json_bytes);

    if !bin_data.is_empty() {
        glb.extend_from_slice(&bin_chunk_length.to_le_bytes());
        glb.extend_from_slice(&CHUNK_TYPE_BIN.to_le_bytes());
        glb.extend_from_slice(&bin_data);
    }

    glb
}

fn floats_to_bytes(data: &[f32]) -> Vec<u8> {
    data.iter().flat_map(|f| f.to_le_bytes()).collect()
}

fn u32s_to_bytes(data: &[u32]) -> Vec<u8> {
    data.iter().flat_map(|v| v.to_le_bytes()).collect()
}
