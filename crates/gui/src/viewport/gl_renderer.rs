use std::collections::HashMap;

use glow::HasContext;

use super::camera::ArcBallCamera;
use super::mesh::{MeshData, VERTEX_STRIDE};
use ikarus_gui_lib::scene::DrawItem;

// ── Render parameters ────────────────────────────────────────

/// Ambient light intensity
pub const AMBIENT_INTENSITY: f32 = 0.6;
/// Directional light position (shines toward the origin)
pub const DIRECTIONAL_POSITION: [f32; 3] = [10.0, 10.0, 5.0];
pub const DIRECTIONAL_INTENSITY: f32 = 1.0;
/// Point light position
pub const POINT_POSITION: [f32; 3] = [-10.0, -10.0, -5.0];
pub const POINT_INTENSITY: f32 = 0.3;

/// Parameters for rendering the stage
pub struct RenderParams {
    /// Viewport rectangle [x, y, width, height] in pixels
    pub viewport: [f32; 4],
    /// Background color RGB
    pub bg_color: [u8; 3],
}

/// Meshes are addressed by (node index, mesh index) within a scene
pub type MeshKey = (usize, usize);

// ── GPU mesh handles ─────────────────────────────────────────

struct GpuMesh {
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    ibo: glow::Buffer,
    index_count: i32,
}

// ── Main GL renderer ─────────────────────────────────────────

pub struct GlRenderer {
    mesh_program: glow::Program,
    /// Uploaded geometry of the current scene
    scene_meshes: HashMap<MeshKey, GpuMesh>,
    /// Generation of the uploaded geometry
    uploaded_generation: Option<u64>,
}

impl GlRenderer {
    pub fn new(gl: &glow::Context) -> Result<Self, String> {
        let mesh_program = compile_program(gl, MESH_VERT, MESH_FRAG)?;
        Ok(Self {
            mesh_program,
            scene_meshes: HashMap::new(),
            uploaded_generation: None,
        })
    }

    /// Upload scene geometry, replacing previous meshes. Materials are not
    /// part of the upload; they are passed per draw.
    pub fn sync_geometry(
        &mut self,
        gl: &glow::Context,
        geometry: &[(MeshKey, MeshData)],
        generation: u64,
    ) {
        if self.uploaded_generation == Some(generation) {
            return;
        }
        self.uploaded_generation = Some(generation);

        for (_, mesh) in self.scene_meshes.drain() {
            delete_mesh(gl, &mesh);
        }

        for (key, data) in geometry {
            match upload_mesh(gl, data) {
                Ok(gpu_mesh) => {
                    self.scene_meshes.insert(*key, gpu_mesh);
                }
                Err(e) => tracing::error!("Failed to upload mesh {key:?}: {e}"),
            }
        }
        tracing::debug!("Uploaded {} meshes (generation {generation})", self.scene_meshes.len());
    }

    /// Render the scene
    pub fn paint(
        &self,
        gl: &glow::Context,
        camera: &ArcBallCamera,
        items: &[DrawItem],
        params: &RenderParams,
    ) {
        if params.viewport[3] <= 0.0 {
            return;
        }
        let aspect = params.viewport[2] / params.viewport[3];
        let vp = camera.view_projection(aspect);
        let program = self.mesh_program;

        unsafe {
            gl.viewport(
                params.viewport[0] as i32,
                params.viewport[1] as i32,
                params.viewport[2] as i32,
                params.viewport[3] as i32,
            );
            gl.scissor(
                params.viewport[0] as i32,
                params.viewport[1] as i32,
                params.viewport[2] as i32,
                params.viewport[3] as i32,
            );
            gl.enable(glow::SCISSOR_TEST);

            gl.clear_color(
                params.bg_color[0] as f32 / 255.0,
                params.bg_color[1] as f32 / 255.0,
                params.bg_color[2] as f32 / 255.0,
                1.0,
            );
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);

            gl.enable(glow::DEPTH_TEST);
            gl.depth_func(glow::LESS);

            gl.use_program(Some(program));
            set_uniform_vec3(gl, program, "u_eye", &camera.eye_position());
            set_uniform_f32(gl, program, "u_ambient", AMBIENT_INTENSITY);
            let dir = glam::Vec3::from(DIRECTIONAL_POSITION).normalize();
            set_uniform_vec3(gl, program, "u_dir_light", &dir);
            set_uniform_f32(gl, program, "u_dir_intensity", DIRECTIONAL_INTENSITY);
            set_uniform_vec3(gl, program, "u_point_pos", &glam::Vec3::from(POINT_POSITION));
            set_uniform_f32(gl, program, "u_point_intensity", POINT_INTENSITY);

            // Opaque first, then blended
            for transparent in [false, true] {
                if transparent {
                    gl.enable(glow::BLEND);
                    gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
                    gl.depth_mask(false);
                }
                for item in items.iter().filter(|i| i.material.transparent == transparent) {
                    let Some(mesh) = self.scene_meshes.get(&(item.node, item.mesh)) else {
                        continue;
                    };
                    let m = &item.material;
                    set_uniform_mat4(gl, program, "u_mvp", &(vp * item.model));
                    set_uniform_mat4(gl, program, "u_model", &item.model);
                    set_uniform_vec3(gl, program, "u_color", &glam::Vec3::from(m.base_color));
                    set_uniform_f32(gl, program, "u_opacity", m.opacity);
                    set_uniform_f32(gl, program, "u_metalness", m.metalness);
                    set_uniform_f32(gl, program, "u_roughness", m.roughness);
                    draw_mesh(gl, mesh);
                }
            }

            gl.depth_mask(true);
            gl.disable(glow::BLEND);
            gl.disable(glow::DEPTH_TEST);
            gl.disable(glow::SCISSOR_TEST);
            gl.use_program(None);
        }
    }

    /// Release all GL objects (called on exit)
    pub fn destroy(&mut self, gl: &glow::Context) {
        unsafe {
            gl.delete_program(self.mesh_program);
        }
        for (_, mesh) in self.scene_meshes.drain() {
            delete_mesh(gl, &mesh);
        }
    }
}

// ── GPU upload ───────────────────────────────────────────────

fn upload_mesh(gl: &glow::Context, data: &MeshData) -> Result<GpuMesh, String> {
    unsafe {
        let vao = gl.create_vertex_array()?;
        gl.bind_vertex_array(Some(vao));

        let vbo = gl.create_buffer()?;
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            bytemuck_cast_slice(&data.vertices),
            glow::STATIC_DRAW,
        );

        let stride = (VERTEX_STRIDE * 4) as i32;
        // position: location 0
        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
        // normal: location 1
        gl.enable_vertex_attrib_array(1);
        gl.vertex_attrib_pointer_f32(1, 3, glow::FLOAT, false, stride, 3 * 4);

        let ibo = gl.create_buffer()?;
        gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ibo));
        gl.buffer_data_u8_slice(
            glow::ELEMENT_ARRAY_BUFFER,
            bytemuck_cast_slice(&data.indices),
            glow::STATIC_DRAW,
        );

        gl.bind_vertex_array(None);

        Ok(GpuMesh {
            vao,
            vbo,
            ibo,
            index_count: data.indices.len() as i32,
        })
    }
}

fn delete_mesh(gl: &glow::Context, mesh: &GpuMesh) {
    unsafe {
        gl.delete_vertex_array(mesh.vao);
        gl.delete_buffer(mesh.vbo);
        gl.delete_buffer(mesh.ibo);
    }
}

// ── Draw calls ───────────────────────────────────────────────

unsafe fn draw_mesh(gl: &glow::Context, mesh: &GpuMesh) {
    gl.bind_vertex_array(Some(mesh.vao));
    gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(mesh.ibo));
    gl.draw_elements(glow::TRIANGLES, mesh.index_count, glow::UNSIGNED_INT, 0);
    gl.bind_vertex_array(None);
}

// ── Shader compilation ───────────────────────────────────────

fn compile_program(gl: &glow::Context, vert_src: &str, frag_src: &str) -> Result<glow::Program, String> {
    unsafe {
        let program = gl.create_program()?;

        let vert = gl.create_shader(glow::VERTEX_SHADER)?;
        gl.shader_source(vert, vert_src);
        gl.compile_shader(vert);
        if !gl.get_shader_compile_status(vert) {
            let log = gl.get_shader_info_log(vert);
            tracing::error!("Vertex shader error: {log}");
        }

        let frag = gl.create_shader(glow::FRAGMENT_SHADER)?;
        gl.shader_source(frag, frag_src);
        gl.compile_shader(frag);
        if !gl.get_shader_compile_status(frag) {
            let log = gl.get_shader_info_log(frag);
            tracing::error!("Fragment shader error: {log}");
        }

        gl.attach_shader(program, vert);
        gl.attach_shader(program, frag);
        gl.link_program(program);
        let linked = gl.get_program_link_status(program);

        gl.delete_shader(vert);
        gl.delete_shader(frag);

        if !linked {
            let log = gl.get_program_info_log(program);
            gl.delete_program(program);
            return Err(format!("Program link error: {log}"));
        }
        Ok(program)
    }
}

// ── Uniform setters ──────────────────────────────────────────

fn set_uniform_mat4(gl: &glow::Context, program: glow::Program, name: &str, mat: &glam::Mat4) {
    unsafe {
        let loc = gl.get_uniform_location(program, name);
        gl.uniform_matrix_4_f32_slice(loc.as_ref(), false, &mat.to_cols_array());
    }
}

fn set_uniform_vec3(gl: &glow::Context, program: glow::Program, name: &str, v: &glam::Vec3) {
    unsafe {
        let loc = gl.get_uniform_location(program, name);
        gl.uniform_3_f32(loc.as_ref(), v.x, v.y, v.z);
    }
}

fn set_uniform_f32(gl: &glow::Context, program: glow::Program, name: &str, v: f32) {
    unsafe {
        let loc = gl.get_uniform_location(program, name);
        gl.uniform_1_f32(loc.as_ref(), v);
    }
}

// ── Byte cast helper ─────────────────────────────────────────

fn bytemuck_cast_slice<T: Copy>(slice: &[T]) -> &[u8] {
    unsafe {
        std::slice::from_raw_parts(
            slice.as_ptr() as *const u8,
            std::mem::size_of_val(slice),
        )
    }
}

// ── Shaders ──────────────────────────────────────────────────

const MESH_VERT: &str = r#"#version 330 core
uniform mat4 u_mvp;
uniform mat4 u_model;

layout(location = 0) in vec3 a_position;
layout(location = 1) in vec3 a_normal;

out vec3 v_normal;
out vec3 v_world;

void main() {
    gl_Position = u_mvp * vec4(a_position, 1.0);
    v_normal = mat3(u_model) * a_normal;
    v_world = (u_model * vec4(a_position, 1.0)).xyz;
}
"#;

const MESH_FRAG: &str = r#"#version 330 core
uniform vec3 u_color;
uniform float u_opacity;
uniform float u_metalness;
uniform float u_roughness;
uniform vec3 u_eye;
uniform float u_ambient;
uniform vec3 u_dir_light;
uniform float u_dir_intensity;
uniform vec3 u_point_pos;
uniform float u_point_intensity;

in vec3 v_normal;
in vec3 v_world;

out vec4 frag_color;

vec3 shade(vec3 n, vec3 v, vec3 l, float intensity) {
    float diffuse = max(dot(n, l), 0.0);
    vec3 h = normalize(l + v);
    float shininess = mix(64.0, 4.0, u_roughness);
    float spec = pow(max(dot(n, h), 0.0), shininess) * (1.0 - u_roughness);
    vec3 spec_color = mix(vec3(0.04), u_color, u_metalness);
    return intensity * (diffuse * u_color * (1.0 - u_metalness) + spec * spec_color);
}

void main() {
    vec3 n = normalize(v_normal);
    vec3 v = normalize(u_eye - v_world);
    vec3 color = u_ambient * u_color;
    color += shade(n, v, normalize(u_dir_light), u_dir_intensity);
    color += shade(n, v, normalize(u_point_pos - v_world), u_point_intensity);
    frag_color = vec4(min(color, vec3(1.0)), u_opacity);
}
"#;
