//! Application style configuration

use eframe::egui;
use shared::theme::Typography;
use shared::{HexColor, Theme};

pub fn color(c: HexColor) -> egui::Color32 {
    let [r, g, b] = c.rgb();
    egui::Color32::from_rgb(r, g, b)
}

/// Configure the storefront look from the theme
pub fn configure_styles(ctx: &egui::Context, theme: &Theme, font_size: f32) {
    let mut style = (*ctx.style()).clone();

    // Light storefront theme
    style.visuals = egui::Visuals::light();

    let button_radius = egui::CornerRadius::same(theme.button.radius);
    style.visuals.window_corner_radius = egui::CornerRadius::same(theme.layout.card_radius);
    style.visuals.menu_corner_radius = egui::CornerRadius::same(6);
    style.visuals.widgets.noninteractive.corner_radius = egui::CornerRadius::same(4);
    style.visuals.widgets.inactive.corner_radius = button_radius;
    style.visuals.widgets.hovered.corner_radius = button_radius;
    style.visuals.widgets.active.corner_radius = button_radius;

    let stroke = egui::Stroke::new(theme.stroke.weight, color(theme.stroke.color));
    style.visuals.widgets.noninteractive.bg_stroke = stroke;
    style.visuals.window_stroke = stroke;

    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);
    style.spacing.menu_margin = egui::Margin::same(6);

    style.visuals.panel_fill = egui::Color32::from_rgb(0xF8, 0xFA, 0xFC);
    style.visuals.window_fill = color(theme.layout.section_bg);
    style.visuals.extreme_bg_color = color(theme.layout.section_bg);

    style.visuals.selection.bg_fill = color(theme.button.bg);
    style.visuals.hyperlink_color = color(theme.button.bg);

    apply_text_styles(&mut style, font_family(&theme.typography), font_size);

    ctx.set_style(style);
}

fn font_family(typography: &Typography) -> egui::FontFamily {
    if typography.is_monospace() {
        egui::FontFamily::Monospace
    } else {
        egui::FontFamily::Proportional
    }
}

fn apply_text_styles(style: &mut egui::Style, family: egui::FontFamily, font_size: f32) {
    let font = |size: f32| egui::FontId::new(size, family.clone());
    style.text_styles.insert(egui::TextStyle::Body, font(font_size));
    style.text_styles.insert(egui::TextStyle::Button, font(font_size * 0.9));
    style.text_styles.insert(egui::TextStyle::Small, font(font_size * 0.75));
    style.text_styles.insert(egui::TextStyle::Heading, font(font_size * 1.4));
    style.text_styles.insert(
        egui::TextStyle::Monospace,
        egui::FontId::monospace(font_size * 0.85),
    );
}

/// Body text in the theme's weight
pub fn body_text(theme: &Theme, text: impl Into<String>) -> egui::RichText {
    let text = egui::RichText::new(text);
    if theme.typography.is_bold() {
        text.strong()
    } else {
        text
    }
}

/// Filled accent button in the theme's colors
pub fn primary_button(theme: &Theme, text: &str) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text.to_string()).color(color(theme.button.fg)).strong())
        .fill(color(theme.button.bg))
        .corner_radius(theme.button.radius)
}

/// White card frame used for sections
pub fn card_frame(theme: &Theme) -> egui::Frame {
    egui::Frame::new()
        .fill(color(theme.layout.section_bg))
        .stroke(egui::Stroke::new(theme.stroke.weight, color(theme.stroke.color)))
        .corner_radius(theme.layout.card_radius)
        .inner_margin(egui::Margin::same(theme.layout.container_padding.round() as i8))
}
