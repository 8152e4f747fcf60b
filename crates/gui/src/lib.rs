// Library crate: exposes testable modules for integration tests.
// GUI-specific modules (app, ui, GL rendering) remain in the binary crate.

pub mod asset;
pub mod fixtures;
pub mod harness;
pub mod scene;
pub mod state;

/// Viewport types that need no GL context (camera math, CPU meshes).
/// The renderer and the egui viewer stay in the binary crate.
pub mod viewport {
    pub mod camera;
    pub mod mesh;
}
