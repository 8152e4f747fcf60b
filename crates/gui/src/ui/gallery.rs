//! Decorative product gallery thumbnails

use egui::Ui;
use shared::Theme;

use crate::state::AppState;

const THUMB_SIZE: f32 = 84.0;

/// Vertical thumbnail column (wide layouts)
pub fn column(ui: &mut Ui, state: &AppState) {
    let theme = &state.config().theme;
    ui.vertical(|ui| {
        ui.spacing_mut().item_spacing.y = theme.gallery.gap;
        for uri in thumbnail_uris(state) {
            thumbnail(ui, theme, uri);
        }
    });
}

/// Horizontally scrolling strip (narrow layout)
pub fn strip(ui: &mut Ui, state: &AppState) {
    let theme = &state.config().theme;
    egui::ScrollArea::horizontal()
        .id_salt("gallery_strip")
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = theme.gallery.gap;
                for uri in thumbnail_uris(state) {
                    thumbnail(ui, theme, uri);
                }
            });
        });
}

fn thumbnail_uris(state: &AppState) -> Vec<String> {
    state
        .gallery_references()
        .iter()
        .map(|r| r.to_uri())
        .collect()
}

fn thumbnail(ui: &mut Ui, theme: &Theme, uri: String) {
    ui.add(
        egui::Image::new(uri)
            .fit_to_exact_size(egui::vec2(THUMB_SIZE, THUMB_SIZE))
            .corner_radius(theme.gallery.radius)
            .show_loading_spinner(true),
    );
}
