//! Configurator panel: product header, option sections, price and "Add to cart"

use egui::{RichText, Ui};
use shared::{format_price, ArmStyle, LegFinish, Theme};

use super::swatch::swatch;
use crate::app::styles;
use crate::state::{AppState, CollapseSource, SectionId, SwatchGroup};

const COLLAPSE_ICON: &str = "≡⚙";

pub fn show(ui: &mut Ui, state: &mut AppState, narrow: bool) {
    // Pending collapse requests are handled before any section is drawn
    state.configurator.dispatch();

    let settings = state.settings_arc();
    let theme = &settings.storefront.theme;
    let catalog = &settings.storefront.catalog;

    styles::card_frame(theme).show(ui, |ui| {
        // ── Product header ───────────────────────────────────
        ui.horizontal(|ui| {
            let (bar, _) = ui.allocate_exact_size(egui::vec2(4.0, 22.0), egui::Sense::hover());
            ui.painter().rect_filled(bar, 2.0, styles::color(theme.button.bg));
            ui.heading(RichText::new(&catalog.product_name).strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if collapse_button(ui).clicked() {
                    state.collapse_all(CollapseSource::PanelHeader);
                }
            });
        });
        ui.add_space(8.0);

        // ── Section group header ─────────────────────────────
        ui.horizontal(|ui| {
            ui.label(RichText::new("Customize your Chair").strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if collapse_button(ui).clicked() {
                    state.collapse_all(CollapseSource::SectionGroupHeader);
                }
            });
        });
        ui.separator();

        for &id in SectionId::all() {
            section(ui, state, theme, id, narrow);
            ui.separator();
        }

        // ── Price + add to cart ──────────────────────────────
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.weak("Product Price");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    RichText::new(format_price(catalog.price.base))
                        .strikethrough()
                        .weak(),
                );
                ui.label(
                    RichText::new(format_price(catalog.price.sale))
                        .size(22.0)
                        .strong(),
                );
            });
        });
        ui.add_space(8.0);
        let add = styles::primary_button(theme, "Add to cart")
            .min_size(egui::vec2(ui.available_width(), 40.0));
        if ui.add(add).clicked() {
            state.add_to_cart();
        }
    });
}

fn collapse_button(ui: &mut Ui) -> egui::Response {
    ui.small_button(COLLAPSE_ICON).on_hover_text("Collapse all")
}

fn section(ui: &mut Ui, state: &mut AppState, theme: &Theme, id: SectionId, narrow: bool) {
    let open = state.configurator.is_open(id);
    let subtitle = match id {
        SectionId::Arms => state.selection.arm_style().label().to_string(),
        SectionId::ArmFinish => state
            .catalog()
            .swatch_by_color(state.selection.color())
            .map(|s| s.name.clone())
            .unwrap_or_default(),
        SectionId::LegsFinish => state.selection.leg_finish().label().to_string(),
    };

    // ── Header row ───────────────────────────────────────────
    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.label(RichText::new(id.title()).strong());
            if !subtitle.is_empty() {
                ui.weak(&subtitle);
            }
        });
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let toggle = if open { "–" } else { "+" };
            if ui.button(toggle).clicked() {
                state.toggle_section(id);
            }
            if narrow && collapse_button(ui).clicked() {
                state.collapse_all(CollapseSource::Section(id));
            }
        });
    });

    if !state.configurator.is_open(id) {
        return;
    }

    // ── Body ─────────────────────────────────────────────────
    ui.add_space(4.0);
    match id {
        SectionId::Arms => {
            let mut current = state.selection.arm_style();
            ui.horizontal(|ui| {
                for &style in ArmStyle::all() {
                    ui.radio_value(&mut current, style, styles::body_text(theme, style.label()));
                }
            });
            state.set_arm_style(current);
        }
        SectionId::ArmFinish => {
            for &group in SwatchGroup::all() {
                swatch_group(ui, state, theme, group);
            }
        }
        SectionId::LegsFinish => {
            let mut current = state.selection.leg_finish();
            ui.horizontal(|ui| {
                for &finish in LegFinish::all() {
                    ui.radio_value(&mut current, finish, styles::body_text(theme, finish.label()));
                }
            });
            state.set_leg_finish(current);
        }
    }
    ui.add_space(4.0);
}

fn swatch_group(ui: &mut Ui, state: &mut AppState, theme: &Theme, group: SwatchGroup) {
    let instances: Vec<_> = state
        .swatch_instances()
        .into_iter()
        .filter(|s| s.group == group)
        .collect();

    ui.label(RichText::new(group.title()).small().weak());
    let mut clicked = None;
    let per_row = group.columns().unwrap_or(instances.len()).max(1);
    for row in instances.chunks(per_row) {
        ui.horizontal(|ui| {
            for instance in row {
                if swatch(ui, theme, &instance.swatch, instance.selected).clicked() {
                    clicked = Some(instance.swatch.color);
                }
            }
        });
    }
    if let Some(color) = clicked {
        state.select_color(color);
    }
    ui.add_space(4.0);
}
