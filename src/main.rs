//! shape-morph - Generative Shape Morphing
//!
//! Continuously morphs between randomly generated sets of polygonal shapes.
//! A new target set is drawn every interval and the previous one blends into
//! it with eased interpolation.
//!
//! ## Controls
//! - `H` - show/hide the tweak panel
//! - `R` - regenerate immediately
//! - `C` - toggle draw mode cycling

use eframe::egui;
use rand::rngs::StdRng;

mod morph;
mod params;
mod render;
mod settings;

use morph::{AnimationController, Canvas, DrawMode, Easing, RngSource};
use params::{ParamKey, ParamStore, ParamValue, Rgb};
use render::{CanvasRenderer, Renderer};
use settings::AppSettings;

/// Background behind the canvas
const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(14, 14, 18);

fn main() -> eframe::Result<()> {
    env_logger::init();
    log::info!("Starting shape-morph");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 640.0])
            .with_title("shape-morph"),
        ..Default::default()
    };

    eframe::run_native(
        "shape-morph",
        options,
        Box::new(|cc| Ok(Box::new(MorphApp::new(cc)))),
    )
}

/// Main application state
struct MorphApp {
    params: ParamStore,
    controller: AnimationController<RngSource<StdRng>>,
    show_panel: bool,
    /// Canvas size from the last frame, used for out-of-band regeneration
    canvas: Canvas,
    /// Last configuration or I/O message shown in the status bar
    status: String,
}

/// Keyboard shortcuts pressed this frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Shortcuts {
    toggle_panel: bool,
    regenerate: bool,
    toggle_cycle: bool,
}

impl Shortcuts {
    /// Nothing fires while a text field has keyboard focus
    fn from_keys(text_focus: bool, pressed: impl Fn(egui::Key) -> bool) -> Self {
        if text_focus {
            return Self::default();
        }
        Self {
            toggle_panel: pressed(egui::Key::H),
            regenerate: pressed(egui::Key::R),
            toggle_cycle: pressed(egui::Key::C),
        }
    }
}

impl MorphApp {
    fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = Self {
            params: ParamStore::default(),
            controller: AnimationController::new(RngSource::from_entropy()),
            show_panel: true,
            canvas: Canvas::new(600.0, 600.0),
            status: String::new(),
        };
        AppSettings::load().apply(&mut app);
        app
    }

    fn now_ms(ctx: &egui::Context) -> f64 {
        ctx.input(|i| i.time) * 1000.0
    }

    fn set_param(&mut self, key: ParamKey, value: ParamValue) {
        if let Err(e) = self.params.set(key, value) {
            log::warn!("Rejected {}: {}", key.name(), e);
            self.status = e.to_string();
        }
    }

    fn regenerate(&mut self, ctx: &egui::Context) {
        match self.params.morph_params() {
            Ok(params) => self
                .controller
                .force_transition(Self::now_ms(ctx), self.canvas, &params),
            Err(e) => self.status = e.to_string(),
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        let text_focus = ctx.wants_keyboard_input();
        let keys = ctx.input(|i| Shortcuts::from_keys(text_focus, |key| i.key_pressed(key)));

        if keys.toggle_panel {
            self.show_panel = !self.show_panel;
        }
        if keys.regenerate {
            self.regenerate(ctx);
        }
        if keys.toggle_cycle {
            let cycling = self
                .params
                .get(ParamKey::CycleDrawMode)
                .value
                .as_bool()
                .unwrap_or_default();
            self.set_param(ParamKey::CycleDrawMode, ParamValue::Bool(!cycling));
        }
    }

    /// One widget per parameter, driven by its type and range
    fn param_widgets(&mut self, ui: &mut egui::Ui) {
        for &key in ParamKey::ALL {
            let param = *self.params.get(key);

            if key == ParamKey::CurrentDrawMode {
                let index = param.value.as_f32().unwrap_or_default() as u8;
                ui.label(format!("{}: {}", key.label(), DrawMode::from_index(index).name()));
                continue;
            }

            let edited = match (param.value, param.range) {
                (ParamValue::Float(mut v), Some(r)) => ui
                    .add(
                        egui::Slider::new(&mut v, r.min..=r.max)
                            .step_by(f64::from(r.step))
                            .text(key.label()),
                    )
                    .changed()
                    .then_some(ParamValue::Float(v)),
                (ParamValue::Float(mut v), None) => ui
                    .add(egui::DragValue::new(&mut v).prefix(format!("{}: ", key.label())))
                    .changed()
                    .then_some(ParamValue::Float(v)),
                (ParamValue::Int(mut v), Some(r)) => ui
                    .add(egui::Slider::new(&mut v, r.min as i64..=r.max as i64).text(key.label()))
                    .changed()
                    .then_some(ParamValue::Int(v)),
                (ParamValue::Int(mut v), None) => ui
                    .add(egui::DragValue::new(&mut v).prefix(format!("{}: ", key.label())))
                    .changed()
                    .then_some(ParamValue::Int(v)),
                (ParamValue::Bool(mut v), _) => ui
                    .checkbox(&mut v, key.label())
                    .changed()
                    .then_some(ParamValue::Bool(v)),
                (ParamValue::Color(c), _) => {
                    let mut rgb = [c.r, c.g, c.b];
                    let changed = ui
                        .horizontal(|ui| {
                            let changed = ui.color_edit_button_srgb(&mut rgb).changed();
                            ui.label(key.label());
                            changed
                        })
                        .inner;
                    changed.then(|| ParamValue::Color(Rgb::new(rgb[0], rgb[1], rgb[2])))
                }
            };

            if let Some(value) = edited {
                self.set_param(key, value);
            }
        }
    }

    fn tweak_panel(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.heading("Morph");
        ui.separator();

        self.param_widgets(ui);
        ui.separator();

        let mut easing = self.controller.easing();
        egui::ComboBox::from_label("Easing")
            .selected_text(easing.name())
            .show_ui(ui, |ui| {
                for e in Easing::ALL {
                    ui.selectable_value(&mut easing, *e, e.name());
                }
            });
        self.controller.set_easing(easing);

        ui.separator();

        if ui.button("⟳ Regenerate (R)").clicked() {
            self.regenerate(ctx);
        }

        ui.collapsing("Presets", |ui| {
            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    AppSettings::from_app(self).save();
                    self.status = "Settings saved".to_string();
                }
                if ui.button("Reset").clicked() {
                    self.params = ParamStore::default();
                    self.controller.set_easing(Easing::default());
                    self.status = "Defaults restored".to_string();
                }
            });
            ui.horizontal(|ui| {
                if ui.button("Export…").clicked() {
                    self.export_preset();
                }
                if ui.button("Import…").clicked() {
                    self.import_preset();
                }
            });
        });
    }

    fn export_preset(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Preset", &["json"])
            .set_file_name("preset.json")
            .save_file()
        else {
            return;
        };
        self.status = match AppSettings::from_app(self).write_to(&path) {
            Ok(()) => format!("Exported {}", path.display()),
            Err(e) => {
                log::warn!("Preset export failed: {}", e);
                e.to_string()
            }
        };
    }

    fn import_preset(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Preset", &["json"])
            .pick_file()
        else {
            return;
        };
        match AppSettings::read_from(&path) {
            Ok(preset) => {
                preset.apply(self);
                log::info!("Imported preset {}", path.display());
                self.status = format!("Imported {}", path.display());
            }
            Err(e) => {
                log::warn!("Preset import failed: {}", e);
                self.status = e.to_string();
            }
        }
    }

    fn draw_canvas(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::hover());
        let rect = response.rect;
        self.canvas = Canvas::new(rect.width(), rect.height());

        let params = match self.params.morph_params() {
            Ok(params) => params,
            Err(e) => {
                self.status = e.to_string();
                return;
            }
        };

        match self.controller.tick(Self::now_ms(ctx), self.canvas, &params) {
            Ok(frame) => {
                self.set_param(
                    ParamKey::CurrentDrawMode,
                    ParamValue::Int(i64::from(frame.style.mode.index())),
                );
                CanvasRenderer::new(&painter, rect.min).draw(&frame, &params);
            }
            Err(e) => {
                log::warn!("Shape generation failed: {}", e);
                self.status = e.to_string();
            }
        }
    }
}

impl eframe::App for MorphApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.request_repaint();
        self.handle_keys(ctx);

        if self.show_panel {
            egui::SidePanel::left("tweak_panel")
                .min_width(240.0)
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| self.tweak_panel(ui, ctx));
                });
        }

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let shapes = self.controller.target().map_or(0, |s| s.len());
                ui.small(format!("Shapes: {}", shapes));
                ui.separator();
                ui.small(format!("Progress: {:.2}", self.controller.progress()));
                ui.separator();
                let cycler = self.controller.cycler();
                ui.small(format!("Cycle: {} (slot {})", cycler.active().name(), cycler.counter()));
                ui.separator();
                ui.small(&self.status);
            });
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(BACKGROUND))
            .show(ctx, |ui| self.draw_canvas(ui, ctx));
    }
}

impl Drop for MorphApp {
    fn drop(&mut self) {
        AppSettings::from_app(self).save();
    }
}
