//! Slide-in cart drawer anchored to the right edge of the window

use egui::{Color32, RichText};
use shared::format_price;

use crate::app::styles::color;
use crate::state::AppState;

/// Drawer width in points (capped to 90% of the window)
const DRAWER_WIDTH: f32 = 360.0;

pub fn show(ctx: &egui::Context, state: &mut AppState) {
    if !state.cart.open {
        return;
    }

    let screen = ctx.screen_rect();
    let width = DRAWER_WIDTH.min(screen.width() * 0.9);

    // ── Backdrop ─────────────────────────────────────────────
    let mut close = false;
    egui::Area::new(egui::Id::new("cart_backdrop"))
        .order(egui::Order::Middle)
        .fixed_pos(screen.min)
        .show(ctx, |ui| {
            let response = ui.allocate_rect(screen, egui::Sense::click());
            ui.painter()
                .rect_filled(screen, 0.0, Color32::from_black_alpha(90));
            if response.clicked() {
                close = true;
            }
        });

    // ── Panel ────────────────────────────────────────────────
    let mut remove: Option<String> = None;
    egui::Area::new(egui::Id::new("cart_drawer"))
        .order(egui::Order::Foreground)
        .fixed_pos(egui::pos2(screen.right() - width, screen.top()))
        .show(ctx, |ui| {
            egui::Frame::new()
                .fill(Color32::WHITE)
                .inner_margin(egui::Margin::same(16))
                .show(ui, |ui| {
                    ui.set_width(width - 32.0);
                    ui.set_min_height(screen.height() - 32.0);

                    ui.horizontal(|ui| {
                        ui.heading(RichText::new("Your Cart").strong());
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Close").clicked() {
                                close = true;
                            }
                        });
                    });
                    ui.separator();

                    if state.cart.is_empty() {
                        ui.add_space(24.0);
                        ui.vertical_centered(|ui| {
                            ui.weak("Cart is empty");
                        });
                        return;
                    }

                    egui::ScrollArea::vertical()
                        .id_salt("cart_items")
                        .show(ui, |ui| {
                            for item in state.cart.items() {
                                ui.horizontal(|ui| {
                                    let (chip, _) = ui.allocate_exact_size(
                                        egui::vec2(28.0, 28.0),
                                        egui::Sense::hover(),
                                    );
                                    ui.painter().rect_filled(chip, 6.0, color(item.color));
                                    ui.vertical(|ui| {
                                        ui.label(RichText::new(&item.name).strong());
                                        ui.weak(item.summary());
                                    });
                                    ui.with_layout(
                                        egui::Layout::right_to_left(egui::Align::Center),
                                        |ui| {
                                            if ui.small_button("Remove").clicked() {
                                                remove = Some(item.id.clone());
                                            }
                                            ui.label(format_price(item.price));
                                        },
                                    );
                                });
                                ui.separator();
                            }
                        });
                });
        });

    if let Some(id) = remove {
        state.remove_cart_item(&id);
    }
    if close {
        state.close_cart();
    }
}
