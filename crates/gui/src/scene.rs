//! Loaded product scene: a node hierarchy whose meshes each carry one material.

use glam::{Mat4, Quat, Vec3};
use shared::HexColor;

use crate::viewport::mesh::MeshData;

/// Metalness of the material applied by [`SceneGraph::apply_color`]
pub const APPLIED_METALNESS: f32 = 0.2;
/// Roughness of the material applied by [`SceneGraph::apply_color`]
pub const APPLIED_ROUGHNESS: f32 = 0.7;

/// Surface description used by the shader
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Linear 0..1 RGB
    pub base_color: [f32; 3],
    pub metalness: f32,
    pub roughness: f32,
    /// Alpha used when not opaque
    pub opacity: f32,
    pub transparent: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            base_color: [0.7, 0.7, 0.7],
            metalness: 0.0,
            roughness: 1.0,
            opacity: 1.0,
            transparent: false,
        }
    }
}

impl Material {
    /// Fresh opaque material for a shopper color
    pub fn standard(color: HexColor) -> Self {
        Self {
            base_color: color.to_f32(),
            metalness: APPLIED_METALNESS,
            roughness: APPLIED_ROUGHNESS,
            opacity: 1.0,
            transparent: false,
        }
    }

    /// Neutral grey used while the asset is still loading
    pub fn placeholder() -> Self {
        Self {
            base_color: HexColor::from_rgb(0x88, 0x88, 0x88).to_f32(),
            ..Self::default()
        }
    }
}

/// Drawable geometry with its material
#[derive(Debug, Clone)]
pub struct Mesh {
    pub data: MeshData,
    pub material: Material,
}

/// One node of the hierarchy
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    /// Transform relative to the parent
    pub local: Mat4,
    pub children: Vec<usize>,
    /// Meshes attached to this node (one per glTF primitive)
    pub meshes: Vec<Mesh>,
}

impl SceneNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            local: Mat4::IDENTITY,
            children: Vec::new(),
            meshes: Vec::new(),
        }
    }
}

/// A mesh ready to draw: world transform + material, addressed by (node, mesh)
#[derive(Debug, Clone, Copy)]
pub struct DrawItem {
    pub node: usize,
    pub mesh: usize,
    pub model: Mat4,
    pub material: Material,
}

/// Node hierarchy of a loaded asset
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    pub nodes: Vec<SceneNode>,
    pub roots: Vec<usize>,
    /// Last color applied to every mesh
    applied_color: Option<HexColor>,
    /// Incremented whenever materials are replaced
    material_version: u64,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node; `parent: None` makes it a root
    pub fn add_node(&mut self, node: SceneNode, parent: Option<usize>) -> usize {
        let index = self.nodes.len();
        self.nodes.push(node);
        match parent.and_then(|p| self.nodes.get_mut(p)) {
            Some(parent) => parent.children.push(index),
            None => self.roots.push(index),
        }
        index
    }

    pub fn mesh_count(&self) -> usize {
        self.nodes.iter().map(|n| n.meshes.len()).sum()
    }

    pub fn applied_color(&self) -> Option<HexColor> {
        self.applied_color
    }

    pub fn material_version(&self) -> u64 {
        self.material_version
    }

    /// Replace the material of every mesh with a fresh [`Material::standard`]
    /// for `color`. Returns the number of meshes touched.
    pub fn apply_color(&mut self, color: HexColor) -> usize {
        let mut count = 0;
        self.for_each_mesh_mut(|mesh| {
            mesh.material = Material::standard(color);
            count += 1;
        });
        self.applied_color = Some(color);
        if count > 0 {
            self.material_version += 1;
        }
        tracing::debug!("Applied color {color} to {count} meshes");
        count
    }

    /// Apply `color` only if it differs from the last applied one.
    /// Returns the mesh count when materials were replaced.
    pub fn sync_color(&mut self, color: HexColor) -> Option<usize> {
        if self.applied_color == Some(color) {
            return None;
        }
        Some(self.apply_color(color))
    }

    /// Depth-first walk over every mesh reachable from the roots
    pub fn for_each_mesh_mut(&mut self, mut f: impl FnMut(&mut Mesh)) {
        let mut stack: Vec<usize> = self.roots.iter().rev().copied().collect();
        let mut visited = vec![false; self.nodes.len()];
        while let Some(index) = stack.pop() {
            if std::mem::replace(&mut visited[index], true) {
                continue;
            }
            let node = &mut self.nodes[index];
            for mesh in &mut node.meshes {
                f(mesh);
            }
            stack.extend(node.children.iter().rev().copied());
        }
    }

    /// Every reachable mesh with its accumulated world transform
    pub fn draw_items(&self) -> Vec<DrawItem> {
        let mut items = Vec::new();
        let mut stack: Vec<(usize, Mat4)> = self
            .roots
            .iter()
            .rev()
            .map(|&r| (r, Mat4::IDENTITY))
            .collect();
        let mut visited = vec![false; self.nodes.len()];
        while let Some((index, parent)) = stack.pop() {
            if std::mem::replace(&mut visited[index], true) {
                continue;
            }
            let node = &self.nodes[index];
            let world = parent * node.local;
            for (mesh_index, mesh) in node.meshes.iter().enumerate() {
                items.push(DrawItem {
                    node: index,
                    mesh: mesh_index,
                    model: world,
                    material: mesh.material,
                });
            }
            stack.extend(node.children.iter().rev().map(|&c| (c, world)));
        }
        items
    }

    pub fn mesh(&self, node: usize, mesh: usize) -> Option<&Mesh> {
        self.nodes.get(node).and_then(|n| n.meshes.get(mesh))
    }

    /// World-space bounds of all meshes
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut result: Option<(Vec3, Vec3)> = None;
        for item in self.draw_items() {
            let Some(mesh) = self.mesh(item.node, item.mesh) else {
                continue;
            };
            let Some((min, max)) = mesh.data.bounds() else {
                continue;
            };
            for corner in box_corners(min, max) {
                let p = item.model.transform_point3(corner);
                result = Some(match result {
                    Some((lo, hi)) => (lo.min(p), hi.max(p)),
                    None => (p, p),
                });
            }
        }
        result
    }

    /// Build from a parsed glTF document and its buffers.
    ///
    /// Fails when a node is reached twice, which covers cyclic hierarchies
    /// and nodes shared between parents.
    pub fn from_gltf(
        document: &gltf::Document,
        buffers: &[gltf::buffer::Data],
    ) -> Result<Self, String> {
        let mut graph = Self::new();
        let Some(scene) = document.default_scene().or_else(|| document.scenes().next()) else {
            return Ok(graph);
        };

        let mut visited = vec![false; document.nodes().count()];
        let mut stack: Vec<(gltf::Node, Option<usize>)> =
            scene.nodes().map(|node| (node, None)).collect();
        stack.reverse();

        while let Some((node, parent)) = stack.pop() {
            let seen = visited
                .get_mut(node.index())
                .ok_or_else(|| format!("Node {} is out of range", node.index()))?;
            if std::mem::replace(seen, true) {
                return Err(format!(
                    "Node {} appears more than once in the hierarchy",
                    node.index()
                ));
            }

            let index = graph.add_node(scene_node_from_gltf(&node, buffers), parent);
            let children: Vec<_> = node.children().collect();
            stack.extend(children.into_iter().rev().map(|child| (child, Some(index))));
        }
        Ok(graph)
    }
}

fn scene_node_from_gltf(node: &gltf::Node, buffers: &[gltf::buffer::Data]) -> SceneNode {
    let mut scene_node = SceneNode::new(node.name().unwrap_or("Node"));
    let (translation, rotation, scale) = node.transform().decomposed();
    scene_node.local = Mat4::from_scale_rotation_translation(
        Vec3::from(scale),
        Quat::from_array(rotation),
        Vec3::from(translation),
    );

    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                continue;
            }
            if let Some(data) = read_primitive(&primitive, buffers) {
                scene_node.meshes.push(Mesh {
                    data,
                    material: convert_material(&primitive.material()),
                });
            }
        }
    }
    scene_node
}

fn read_primitive(primitive: &gltf::Primitive, buffers: &[gltf::buffer::Data]) -> Option<MeshData> {
    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|d| &d.0[..]));
    let positions: Vec<[f32; 3]> = reader.read_positions()?.collect();
    let normals: Option<Vec<[f32; 3]>> = reader.read_normals().map(|n| n.collect());
    let indices: Vec<u32> = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => (0..positions.len() as u32).collect(),
    };
    Some(MeshData::from_parts(&positions, normals.as_deref(), indices))
}

fn convert_material(material: &gltf::Material) -> Material {
    let pbr = material.pbr_metallic_roughness();
    let [r, g, b, a] = pbr.base_color_factor();
    let transparent = material.alpha_mode() == gltf::material::AlphaMode::Blend;
    Material {
        base_color: [r, g, b],
        metalness: pbr.metallic_factor(),
        roughness: pbr.roughness_factor(),
        opacity: if transparent { a } else { 1.0 },
        transparent,
    }
}

fn box_corners(min: Vec3, max: Vec3) -> [Vec3; 8] {
    [
        Vec3::new(min.x, min.y, min.z),
        Vec3::new(max.x, min.y, min.z),
        Vec3::new(min.x, max.y, min.z),
        Vec3::new(max.x, max.y, min.z),
        Vec3::new(min.x, min.y, max.z),
        Vec3::new(max.x, min.y, max.z),
        Vec3::new(min.x, max.y, max.z),
        Vec3::new(max.x, max.y, max.z),
    ]
}
