//! Page header (brand, layout toggle, cart button) and footer

use egui::{Color32, RichText, Ui};

use crate::app::styles::color;
use crate::state::{AppState, LayoutMode};

pub fn show(ui: &mut Ui, state: &mut AppState) {
    let settings = state.settings_arc();
    let theme = &settings.storefront.theme;

    ui.horizontal(|ui| {
        // Logo tile
        let (tile, _) = ui.allocate_exact_size(egui::vec2(32.0, 32.0), egui::Sense::hover());
        ui.painter().rect_filled(tile, 8.0, color(theme.button.bg));
        ui.painter().text(
            tile.center(),
            egui::Align2::CENTER_CENTER,
            "UI",
            egui::FontId::proportional(13.0),
            color(theme.button.fg),
        );
        ui.label(RichText::new("Ikarus 3D").size(18.0).strong());

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            cart_button(ui, state, theme);
            ui.add_space(12.0);
            for &mode in LayoutMode::all().iter().rev() {
                if ui
                    .selectable_label(state.layout == mode, mode.label())
                    .on_hover_text(mode.hint())
                    .clicked()
                {
                    state.set_layout(mode);
                }
            }
        });
    });
}

fn cart_button(ui: &mut Ui, state: &mut AppState, theme: &shared::Theme) {
    let response = ui.button("Cart");
    if response.clicked() {
        state.toggle_cart();
    }
    let count = state.cart.len();
    if count > 0 {
        let badge = response.rect.right_top() + egui::vec2(-2.0, 2.0);
        ui.painter().circle_filled(badge, 8.0, color(theme.button.bg));
        ui.painter().text(
            badge,
            egui::Align2::CENTER_CENTER,
            count.to_string(),
            egui::FontId::proportional(10.0),
            Color32::WHITE,
        );
    }
}

pub fn footer(ui: &mut Ui) {
    ui.vertical_centered(|ui| {
        ui.weak("© 2024 Ikarus 3D. All Rights Reserved.");
    });
}
