//! Round color swatch button

use egui::{Color32, Response, Sense, Stroke, Ui};
use shared::{Swatch, Theme};

use crate::app::styles::color;

/// Diameter of a swatch in points
pub const SWATCH_SIZE: f32 = 30.0;
const PREVIEW_SIZE: f32 = 72.0;

/// Draw one swatch. Selected swatches get an accent ring and a check badge;
/// hovering shows an enlarged preview with the swatch name.
pub fn swatch(ui: &mut Ui, theme: &Theme, swatch: &Swatch, selected: bool) -> Response {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(SWATCH_SIZE, SWATCH_SIZE), Sense::click());
    let fill = color(swatch.color);

    if ui.is_rect_visible(rect) {
        let painter = ui.painter();
        let center = rect.center();
        let radius = SWATCH_SIZE * 0.5 - 3.0;
        painter.circle_filled(center, radius, fill);

        if selected {
            painter.circle_stroke(center, radius + 2.5, Stroke::new(2.0, color(theme.button.bg)));
            let badge = center + egui::vec2(radius * 0.7, -radius * 0.7);
            painter.circle_filled(badge, 6.0, color(theme.button.bg));
            painter.text(
                badge,
                egui::Align2::CENTER_CENTER,
                "✔",
                egui::FontId::proportional(8.0),
                Color32::WHITE,
            );
        } else if response.hovered() {
            painter.circle_stroke(center, radius + 2.0, Stroke::new(1.0, Color32::from_gray(170)));
        }
    }

    let response = response.on_hover_ui(|ui| {
        ui.vertical_centered(|ui| {
            let (preview, _) =
                ui.allocate_exact_size(egui::vec2(PREVIEW_SIZE, PREVIEW_SIZE), Sense::hover());
            ui.painter().circle_filled(preview.center(), PREVIEW_SIZE * 0.5, fill);
            ui.label(&swatch.name);
        });
    });
    response.on_hover_cursor(egui::CursorIcon::PointingHand)
}
