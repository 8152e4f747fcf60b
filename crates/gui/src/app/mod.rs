//! Main application module

pub mod styles;

use eframe::egui;

use crate::state::{AppSettings, AppState, Arrangement, Region};
use crate::ui::{cart_drawer, configurator, gallery, header, stage};
use crate::viewport::ModelViewer;

const GALLERY_COLUMN_WIDTH: f32 = 96.0;

/// Storefront application
pub struct StorefrontApp {
    state: AppState,
    viewer: ModelViewer,
}

impl StorefrontApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: AppSettings) -> Self {
        let state = AppState::new(settings);

        egui_extras::install_image_loaders(&cc.egui_ctx);
        styles::configure_styles(
            &cc.egui_ctx,
            &state.config().theme,
            state.settings().font_size(),
        );

        let mut viewer = ModelViewer::new();

        // Initialize GL renderer if glow context is available
        if let Some(gl) = cc.gl.as_ref() {
            viewer.init_gl(gl);
        } else {
            tracing::warn!("No GL context, the stage shows a flat preview");
        }

        Self { state, viewer }
    }
}

impl eframe::App for StorefrontApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let padding = self.state.config().theme.layout.container_padding;
        let frame = egui::Frame::side_top_panel(&ctx.style())
            .inner_margin(egui::Margin::symmetric(padding.round() as i8, 10));

        // ── Header ───────────────────────────────────────────
        egui::TopBottomPanel::top("header")
            .frame(frame)
            .show(ctx, |ui| {
                header::show(ui, &mut self.state);
            });

        // ── Footer ───────────────────────────────────────────
        egui::TopBottomPanel::bottom("footer")
            .frame(frame)
            .show(ctx, |ui| {
                header::footer(ui);
            });

        // ── Page body ────────────────────────────────────────
        let arrangement = self.state.arrangement(ctx.screen_rect().width());
        egui::CentralPanel::default()
            .frame(egui::Frame::central_panel(&ctx.style()).inner_margin(egui::Margin::same(padding.round() as i8)))
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .id_salt("page_scroll")
                    .show(ui, |ui| {
                        self.show_body(ui, arrangement);
                    });
            });

        // ── Cart drawer (overlay) ────────────────────────────
        cart_drawer::show(ctx, &mut self.state);
    }

    fn on_exit(&mut self, gl: Option<&glow::Context>) {
        if let Some(gl) = gl {
            self.viewer.destroy_gl(gl);
        }
    }
}

impl StorefrontApp {
    fn show_body(&mut self, ui: &mut egui::Ui, arrangement: Arrangement) {
        if arrangement == Arrangement::SideBySide {
            let width = ui.available_width();
            let spacing = ui.spacing().item_spacing.x;
            let config_width = (width * 0.32).clamp(300.0, 420.0);
            let stage_width = (width - GALLERY_COLUMN_WIDTH - config_width - 2.0 * spacing).max(200.0);
            ui.horizontal_top(|ui| {
                for region in arrangement.regions() {
                    let region_width = match region {
                        Region::GalleryColumn => GALLERY_COLUMN_WIDTH,
                        Region::Stage => stage_width,
                        _ => config_width,
                    };
                    ui.allocate_ui(egui::vec2(region_width, ui.available_height()), |ui| {
                        ui.set_width(region_width);
                        self.show_region(ui, *region, arrangement);
                    });
                }
            });
        } else {
            for region in arrangement.regions() {
                self.show_region(ui, *region, arrangement);
                ui.add_space(12.0);
            }
        }
    }

    fn show_region(&mut self, ui: &mut egui::Ui, region: Region, arrangement: Arrangement) {
        match region {
            Region::GalleryColumn => gallery::column(ui, &self.state),
            Region::GalleryStrip => gallery::strip(ui, &self.state),
            Region::Stage => stage::show(
                ui,
                &self.state,
                &mut self.viewer,
                arrangement.stage_aspect(),
            ),
            Region::Configurator => {
                configurator::show(ui, &mut self.state, arrangement.is_narrow())
            }
        }
    }
}
