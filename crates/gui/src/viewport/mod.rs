//! Product model viewer with OpenGL rendering

mod gl_renderer;
pub use ikarus_gui_lib::viewport::{camera, mesh};

use std::sync::{Arc, Mutex};

use egui::Ui;

use crate::asset::{AssetError, AssetLoader, LoadHandle};
use crate::scene::{DrawItem, Material, Mesh, SceneGraph, SceneNode};
use crate::state::AppState;
use camera::ArcBallCamera;
use gl_renderer::{GlRenderer, MeshKey};
use mesh::MeshData;

/// Where the viewer is in its one-shot load
enum LoadState {
    /// Not shown yet
    Idle,
    Loading(LoadHandle),
    Ready,
    /// Terminal; the error panel replaces the stage
    Failed(AssetError),
}

/// Interactive 3D view of the configured product
pub struct ModelViewer {
    camera: ArcBallCamera,
    gl_renderer: Option<Arc<Mutex<GlRenderer>>>,
    loader: Option<AssetLoader>,
    load: LoadState,
    /// Placeholder cube until the asset is ready, then the asset itself
    scene: SceneGraph,
    /// Geometry shared with the paint callback, re-uploaded when `generation` changes
    geometry: Arc<Vec<(MeshKey, MeshData)>>,
    generation: u64,
    /// Draw list handed to the paint callback, rebuilt only after a recolor or a new scene
    draw_items: Arc<Vec<DrawItem>>,
    /// (generation, material version) the draw list was built from
    drawn: (u64, u64),
}

impl ModelViewer {
    pub fn new() -> Self {
        let scene = placeholder_scene();
        let geometry = Arc::new(collect_geometry(&scene));
        let draw_items = Arc::new(scene.draw_items());
        let drawn = (0, scene.material_version());
        Self {
            camera: ArcBallCamera::new(),
            gl_renderer: None,
            loader: None,
            load: LoadState::Idle,
            scene,
            geometry,
            generation: 0,
            draw_items,
            drawn,
        }
    }

    /// Initialize GL renderer (must be called with a GL context)
    pub fn init_gl(&mut self, gl: &glow::Context) {
        match GlRenderer::new(gl) {
            Ok(renderer) => self.gl_renderer = Some(Arc::new(Mutex::new(renderer))),
            Err(e) => tracing::error!("GL renderer unavailable, using flat stage: {e}"),
        }
    }

    /// Release GL resources
    pub fn destroy_gl(&mut self, gl: &glow::Context) {
        if let Some(renderer) = self.gl_renderer.take() {
            if let Ok(mut r) = renderer.lock() {
                r.destroy(gl);
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.load, LoadState::Idle | LoadState::Loading(_))
    }

    pub fn show(&mut self, ui: &mut Ui, state: &AppState) {
        self.start_if_idle(ui.ctx(), state);
        self.poll_load(state);

        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

        if let LoadState::Failed(err) = &self.load {
            draw_error_panel(ui, rect, err);
            return;
        }

        self.handle_camera(ui, &response);

        if !ui.is_rect_visible(rect) {
            return;
        }

        if self.gl_renderer.is_some() {
            self.render_gl(ui, rect, state);
        } else {
            draw_flat_stage(ui, rect, state);
        }

        if self.is_loading() {
            ui.painter_at(rect).text(
                rect.center_bottom() - egui::vec2(0.0, 16.0),
                egui::Align2::CENTER_BOTTOM,
                "Loading 3D Model...",
                egui::FontId::proportional(13.0),
                egui::Color32::from_gray(110),
            );
        }
    }

    // ── Loading ────────────────────────────────────────────────

    fn start_if_idle(&mut self, ctx: &egui::Context, state: &AppState) {
        if !matches!(self.load, LoadState::Idle) {
            return;
        }
        let reference = state.model_reference();
        if self.loader.is_none() {
            match AssetLoader::new() {
                Ok(loader) => self.loader = Some(loader),
                Err(source) => {
                    self.fail(AssetError::Io {
                        reference: reference.raw,
                        source,
                    });
                    return;
                }
            }
        }
        if let Some(loader) = &self.loader {
            let ctx = ctx.clone();
            let handle = loader.start(reference, move || ctx.request_repaint());
            self.load = LoadState::Loading(handle);
        }
    }

    fn poll_load(&mut self, state: &AppState) {
        let outcome = match &mut self.load {
            LoadState::Loading(handle) => handle.poll(),
            _ => None,
        };
        match outcome {
            Some(Ok(scene)) => {
                tracing::info!("Model loaded ({} meshes)", scene.mesh_count());
                self.set_scene(scene);
                self.load = LoadState::Ready;
            }
            Some(Err(e)) => self.fail(e),
            None => {}
        }

        if matches!(self.load, LoadState::Ready) {
            self.scene.sync_color(state.selection.color());
        }
        self.refresh_draw_items();
    }

    fn refresh_draw_items(&mut self) {
        let key = (self.generation, self.scene.material_version());
        if self.drawn != key {
            self.draw_items = Arc::new(self.scene.draw_items());
            self.drawn = key;
        }
    }

    fn fail(&mut self, err: AssetError) {
        tracing::error!("Cannot load 3D model: {err}");
        self.load = LoadState::Failed(err);
    }

    fn set_scene(&mut self, scene: SceneGraph) {
        self.geometry = Arc::new(collect_geometry(&scene));
        self.generation += 1;
        self.scene = scene;
    }

    /// Reference the viewer is loading or has loaded
    #[cfg(test)]
    fn reference(&self) -> Option<&str> {
        match &self.load {
            LoadState::Loading(handle) => Some(handle.reference()),
            LoadState::Failed(err) => Some(err.reference()),
            _ => None,
        }
    }

    // ── Camera ─────────────────────────────────────────────────

    fn handle_camera(&mut self, ui: &Ui, response: &egui::Response) {
        let shift = ui.input(|i| i.modifiers.shift);
        if response.dragged_by(egui::PointerButton::Secondary)
            || (shift && response.dragged_by(egui::PointerButton::Primary))
        {
            let delta = response.drag_delta();
            self.camera.pan(-delta.x, delta.y);
        } else if response.dragged_by(egui::PointerButton::Primary) {
            let delta = response.drag_delta();
            self.camera.rotate(-delta.x * 0.5, delta.y * 0.5);
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll.abs() > 0.1 {
                self.camera.zoom(scroll * 0.01);
            }
        }
    }

    // ── Rendering ──────────────────────────────────────────────

    fn render_gl(&self, ui: &mut Ui, rect: egui::Rect, state: &AppState) {
        let Some(gl_renderer) = &self.gl_renderer else {
            return;
        };
        let renderer = gl_renderer.clone();
        let camera = self.camera;
        let geometry = self.geometry.clone();
        let generation = self.generation;
        let items = self.draw_items.clone();
        let bg_color = state.settings().viewport.background_color;

        let callback = egui::PaintCallback {
            rect,
            callback: Arc::new(egui_glow::CallbackFn::new(move |info, painter| {
                let gl = painter.gl();
                let clip = info.clip_rect_in_pixels();
                let params = gl_renderer::RenderParams {
                    viewport: [
                        clip.left_px as f32,
                        clip.from_bottom_px as f32,
                        clip.width_px as f32,
                        clip.height_px as f32,
                    ],
                    bg_color,
                };
                if let Ok(mut r) = renderer.lock() {
                    r.sync_geometry(gl, &geometry, generation);
                    r.paint(gl, &camera, &items, &params);
                }
            })),
        };
        ui.painter().add(callback);
    }
}

/// Grey unit cube shown while the asset loads
fn placeholder_scene() -> SceneGraph {
    let mut scene = SceneGraph::new();
    let mut node = SceneNode::new("Placeholder");
    node.meshes.push(Mesh {
        data: mesh::cube(1.0, 1.0, 1.0),
        material: Material::placeholder(),
    });
    scene.add_node(node, None);
    scene
}

fn collect_geometry(scene: &SceneGraph) -> Vec<(MeshKey, MeshData)> {
    scene
        .nodes
        .iter()
        .enumerate()
        .flat_map(|(n, node)| {
            node.meshes
                .iter()
                .enumerate()
                .map(move |(m, mesh)| ((n, m), mesh.data.clone()))
        })
        .collect()
}

fn draw_error_panel(ui: &Ui, rect: egui::Rect, err: &AssetError) {
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(0xFE, 0xF2, 0xF2));
    let lines = [
        (
            "Cannot load 3D model".to_string(),
            egui::FontId::proportional(18.0),
            egui::Color32::from_rgb(0xB9, 0x1C, 0x1C),
        ),
        (
            format!("File: {}", err.reference()),
            egui::FontId::monospace(12.0),
            egui::Color32::from_gray(70),
        ),
        (
            "Check if file exists in public folder".to_string(),
            egui::FontId::proportional(12.0),
            egui::Color32::from_gray(110),
        ),
    ];
    let mut y = rect.center().y - 30.0;
    for (text, font, color) in lines {
        painter.text(
            egui::pos2(rect.center().x, y),
            egui::Align2::CENTER_TOP,
            text,
            font,
            color,
        );
        y += 22.0;
    }
}

/// Stage without GL: a rounded block in the selected color
fn draw_flat_stage(ui: &Ui, rect: egui::Rect, state: &AppState) {
    let painter = ui.painter_at(rect);
    let [r, g, b] = state.settings().viewport.background_color;
    painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(r, g, b));
    let [r, g, b] = state.selection.color().rgb();
    let block = egui::Rect::from_center_size(rect.center(), rect.size() * egui::vec2(0.4, 0.5));
    painter.rect_filled(block, 24.0, egui::Color32::from_rgb(r, g, b));
}
