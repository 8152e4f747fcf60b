//! Product stage: model viewer framed as a card with a column of tool icons

use egui::Ui;

use crate::state::AppState;
use crate::viewport::ModelViewer;

/// Decorative tool icons down the right edge. They do nothing when clicked.
const TOOLS: [(&str, &str); 5] = [
    ("◎", "Focus"),
    ("📏", "Measure"),
    ("⛶", "Fullscreen"),
    ("+", "Zoom in"),
    ("−", "Zoom out"),
];

const TOOL_SIZE: f32 = 30.0;
const MIN_STAGE_HEIGHT: f32 = 260.0;

pub fn show(ui: &mut Ui, state: &AppState, viewer: &mut ModelViewer, aspect: f32) {
    let width = ui.available_width();
    let height = (width / aspect).max(MIN_STAGE_HEIGHT);
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, height), egui::Sense::hover());

    let mut stage_ui = ui.new_child(egui::UiBuilder::new().max_rect(rect));
    stage_ui.set_clip_rect(rect);
    viewer.show(&mut stage_ui, state);

    let mut y = rect.top() + 12.0;
    for (icon, label) in TOOLS {
        let r = egui::Rect::from_min_size(
            egui::pos2(rect.right() - TOOL_SIZE - 12.0, y),
            egui::vec2(TOOL_SIZE, TOOL_SIZE),
        );
        ui.put(r, egui::Button::new(icon).corner_radius(8.0))
            .on_hover_text(label);
        y += TOOL_SIZE + 6.0;
    }
}
