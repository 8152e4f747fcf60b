pub mod accordion;
pub mod cart;
pub mod layout;
pub mod selection;
pub mod settings;

use std::path::PathBuf;
use std::sync::Arc;

use shared::{ArmStyle, CartItemId, Catalog, HexColor, LegFinish, StorefrontConfig, Swatch};

pub use accordion::{CollapseEvent, CollapseSource, ConfiguratorState, SectionId};
pub use cart::CartState;
pub use layout::{Arrangement, LayoutMode, Region};
pub use selection::SelectionState;
pub use settings::AppSettings;

use crate::asset::AssetReference;

/// Swatch groups shown in the "Arm Finish" section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwatchGroup {
    Leather,
    Section,
    Aluminum,
}

impl SwatchGroup {
    pub fn all() -> &'static [SwatchGroup] {
        &[SwatchGroup::Leather, SwatchGroup::Section, SwatchGroup::Aluminum]
    }

    pub fn title(&self) -> &'static str {
        match self {
            SwatchGroup::Leather => "LEATHER",
            SwatchGroup::Section => "SECTION",
            SwatchGroup::Aluminum => "ALUMINUM",
        }
    }

    /// Swatches per row; `None` lays the group out as a single row
    pub fn columns(&self) -> Option<usize> {
        match self {
            SwatchGroup::Leather => Some(6),
            SwatchGroup::Section | SwatchGroup::Aluminum => None,
        }
    }

    /// Catalog slice shown by this group
    pub fn swatches<'a>(&self, catalog: &'a Catalog) -> &'a [Swatch] {
        match self {
            SwatchGroup::Leather => &catalog.swatches,
            SwatchGroup::Section => catalog.swatch_range(0, 6),
            SwatchGroup::Aluminum => catalog.swatch_range(10, 16),
        }
    }
}

/// One rendered swatch button
#[derive(Debug, Clone, PartialEq)]
pub struct SwatchInstance {
    pub group: SwatchGroup,
    pub index: usize,
    pub swatch: Swatch,
    pub selected: bool,
}

/// Combined application state
pub struct AppState {
    settings: Arc<AppSettings>,
    pub selection: SelectionState,
    pub cart: CartState,
    pub layout: LayoutMode,
    pub configurator: ConfiguratorState,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppSettings::default())
    }
}

impl AppState {
    pub fn new(settings: AppSettings) -> Self {
        let selection = SelectionState::new(&settings.storefront.catalog);
        Self {
            settings: Arc::new(settings),
            selection,
            cart: CartState::default(),
            layout: LayoutMode::default(),
            configurator: ConfiguratorState::default(),
        }
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// Shared handle to the immutable settings
    pub fn settings_arc(&self) -> Arc<AppSettings> {
        self.settings.clone()
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.settings.storefront
    }

    pub fn catalog(&self) -> &Catalog {
        &self.settings.storefront.catalog
    }

    pub fn select_color(&mut self, color: HexColor) -> bool {
        let catalog = &self.settings.storefront.catalog;
        self.selection.select_color(catalog, color)
    }

    pub fn set_arm_style(&mut self, arm_style: ArmStyle) {
        self.selection.set_arm_style(arm_style);
    }

    pub fn set_leg_finish(&mut self, leg_finish: LegFinish) {
        self.selection.set_leg_finish(leg_finish);
    }

    /// Snapshot the current selection into the cart and open the drawer
    pub fn add_to_cart(&mut self) -> CartItemId {
        let catalog = &self.settings.storefront.catalog;
        let id = self
            .cart
            .add(&catalog.product_name, self.selection.current(), catalog.price);
        self.cart.open = true;
        id
    }

    pub fn remove_cart_item(&mut self, id: &str) -> bool {
        self.cart.remove(id)
    }

    pub fn toggle_cart(&mut self) {
        self.cart.toggle_open();
    }

    pub fn close_cart(&mut self) {
        self.cart.open = false;
    }

    /// Publish one collapse event and let every section handle it
    pub fn collapse_all(&mut self, source: CollapseSource) -> CollapseEvent {
        let event = self.configurator.collapse_all(source);
        self.configurator.dispatch();
        event
    }

    pub fn toggle_section(&mut self, id: SectionId) {
        self.configurator.toggle(id);
    }

    pub fn set_layout(&mut self, mode: LayoutMode) {
        if self.layout != mode {
            tracing::info!("Layout mode: {}", mode.hint());
            self.layout = mode;
        }
    }

    /// Region order for a window of the given logical width
    pub fn arrangement(&self, width: f32) -> Arrangement {
        Arrangement::resolve(width, self.layout, self.settings.storefront.breakpoint)
    }

    /// Every swatch button of the "Arm Finish" section, in display order
    pub fn swatch_instances(&self) -> Vec<SwatchInstance> {
        let catalog = self.catalog();
        let mut out = Vec::new();
        for &group in SwatchGroup::all() {
            for (index, swatch) in group.swatches(catalog).iter().enumerate() {
                out.push(SwatchInstance {
                    group,
                    index,
                    swatch: swatch.clone(),
                    selected: self.selection.is_selected(swatch.color),
                });
            }
        }
        out
    }

    pub fn asset_root(&self) -> &PathBuf {
        &self.settings.asset_root
    }

    pub fn model_reference(&self) -> AssetReference {
        AssetReference::resolve(&self.catalog().model_path, &self.settings.asset_root)
    }

    pub fn gallery_references(&self) -> Vec<AssetReference> {
        self.catalog()
            .gallery
            .iter()
            .map(|raw| AssetReference::resolve(raw, &self.settings.asset_root))
            .collect()
    }
}
