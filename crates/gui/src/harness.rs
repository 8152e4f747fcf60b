//! Headless harness for driving the storefront without a window.
//!
//! Every method performs the same state change the corresponding UI control
//! performs, so integration tests exercise the real code paths.

use shared::{ArmStyle, CartItem, CartItemId, HexColor, LegFinish, Selection};

use crate::scene::SceneGraph;
use crate::state::{
    AppSettings, AppState, Arrangement, CollapseEvent, CollapseSource, LayoutMode, SectionId,
    SwatchInstance,
};

/// Headless storefront: page-shell state plus an optional loaded model
pub struct StorefrontHarness {
    pub state: AppState,
    model: Option<SceneGraph>,
}

impl Default for StorefrontHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl StorefrontHarness {
    /// Harness with the built-in storefront configuration
    pub fn new() -> Self {
        Self::with_settings(AppSettings::default())
    }

    pub fn with_settings(settings: AppSettings) -> Self {
        Self {
            state: AppState::new(settings),
            model: None,
        }
    }

    /// Harness from a settings JSON document
    pub fn from_settings_json(json: &str) -> Result<Self, String> {
        Ok(Self::with_settings(AppSettings::from_json(json)?))
    }

    // ── Selection ─────────────────────────────────────────────

    pub fn selection(&self) -> &Selection {
        self.state.selection.current()
    }

    pub fn select_color(&mut self, color: HexColor) -> bool {
        self.state.select_color(color)
    }

    /// Click the first swatch with this name
    pub fn select_swatch(&mut self, name: &str) -> bool {
        let color = self
            .state
            .catalog()
            .swatches
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.color);
        match color {
            Some(color) => self.select_color(color),
            None => false,
        }
    }

    pub fn set_arm_style(&mut self, arm_style: ArmStyle) {
        self.state.set_arm_style(arm_style);
    }

    pub fn set_leg_finish(&mut self, leg_finish: LegFinish) {
        self.state.set_leg_finish(leg_finish);
    }

    pub fn swatch_instances(&self) -> Vec<SwatchInstance> {
        self.state.swatch_instances()
    }

    pub fn selected_swatch_count(&self) -> usize {
        self.swatch_instances().iter().filter(|s| s.selected).count()
    }

    // ── Cart ──────────────────────────────────────────────────

    pub fn cart(&self) -> &[CartItem] {
        self.state.cart.items()
    }

    pub fn add_to_cart(&mut self) -> CartItemId {
        self.state.add_to_cart()
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.state.remove_cart_item(id)
    }

    pub fn toggle_cart(&mut self) {
        self.state.toggle_cart();
    }

    pub fn close_cart(&mut self) {
        self.state.close_cart();
    }

    pub fn drawer_open(&self) -> bool {
        self.state.cart.open
    }

    /// Export the cart lines as JSON
    pub fn export_cart_json(&self) -> String {
        serde_json::to_string_pretty(self.cart()).unwrap_or_default()
    }

    // ── Configurator sections ─────────────────────────────────

    pub fn collapse_all(&mut self, source: CollapseSource) -> CollapseEvent {
        self.state.collapse_all(source)
    }

    pub fn toggle_section(&mut self, id: SectionId) {
        self.state.toggle_section(id);
    }

    pub fn is_open(&self, id: SectionId) -> bool {
        self.state.configurator.is_open(id)
    }

    pub fn open_sections(&self) -> Vec<SectionId> {
        self.state.configurator.open_sections()
    }

    // ── Layout ────────────────────────────────────────────────

    pub fn set_layout(&mut self, mode: LayoutMode) {
        self.state.set_layout(mode);
    }

    pub fn arrangement_at(&self, width: f32) -> Arrangement {
        self.state.arrangement(width)
    }

    // ── Model ─────────────────────────────────────────────────

    /// Hand a loaded scene to the harness, as the viewer does on load
    pub fn attach_model(&mut self, scene: SceneGraph) {
        self.model = Some(scene);
        self.sync_model();
    }

    /// Re-apply the selection color to the model if it changed.
    /// Returns the number of meshes recolored.
    pub fn sync_model(&mut self) -> Option<usize> {
        let color = self.state.selection.color();
        self.model.as_mut().and_then(|scene| scene.sync_color(color))
    }

    pub fn model(&self) -> Option<&SceneGraph> {
        self.model.as_ref()
    }
}
