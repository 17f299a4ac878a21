//! Desktop preview app for myrtio-grid-composer patterns
//!
//! Renders the LED grid in a window with interactive controls.
//! All state changes go through the session intent channel.

use std::time::Instant as StdInstant;

use eframe::egui::{self};
use log::{info, warn};
use myrtio_grid_composer::{
    ConfigError, DeviceError, DisplayDevice, GridFrame, GridSize, Instant, IntentChannel, IntentSender,
    OutputDriver, PATTERNS, Palette, PaletteSuggester, PatternId, Rgb, SessionConfig,
    SessionController, SessionIntent, SuggestionError, filter::apply_brightness,
    suggestion::parse_suggestion,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Frame buffer size, enough for the dense static grid
const MAX_CELLS: usize = 96 * 128;

/// Intent channel size
const INTENT_CHANNEL_SIZE: usize = 16;

/// Gap between cells in pixels
const CELL_GAP: f32 = 1.0;

/// Static intent channel for communication between UI and session
static INTENTS_CHANNEL: IntentChannel<INTENT_CHANNEL_SIZE> =
    IntentChannel::<INTENT_CHANNEL_SIZE>::new();

/// Palettes served by [`ThemeSuggester`]
const THEMES: [(&str, [&str; 6]); 4] = [
    (
        "aurora",
        ["#001450", "#005f78", "#14aa5f", "#00a0c8", "#6e1eaa", "#c832aa"],
    ),
    (
        "lava",
        ["#200000", "#801000", "#ff3000", "#ff7a00", "#ffc040", "#400010"],
    ),
    (
        "ocean",
        ["#001a33", "#003f6b", "#00709e", "#2aa7c9", "#7fd6e8", "#e0f7fa"],
    ),
    (
        "forest",
        ["#0b2e13", "#1e5128", "#4e9f3d", "#8fb339", "#d8e9a8", "#5c3d2e"],
    ),
];

type PreviewSession =
    SessionController<'static, FrameCapture, SmallRng, WindowDevice, MAX_CELLS, INTENT_CHANNEL_SIZE>;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_title("Grid Composer Preview"),
        ..Default::default()
    };

    eframe::run_native(
        "myrtio-grid-preview",
        options,
        Box::new(|cc| Ok(Box::new(PreviewApp::new(&cc.egui_ctx)?))),
    )
}

/// Keeps the last published frame for painting
#[derive(Default)]
struct FrameCapture {
    cells: Vec<Rgb>,
    size: GridSize,
    brightness: f32,
}

impl OutputDriver for FrameCapture {
    fn write(&mut self, frame: &GridFrame<'_>, brightness: f32) {
        self.cells.clear();
        self.cells.extend_from_slice(frame.cells());
        self.size = frame.size();
        self.brightness = brightness;
    }
}

/// Fullscreen through the window viewport; no wake lock on desktop
struct WindowDevice {
    ctx: egui::Context,
}

impl DisplayDevice for WindowDevice {
    type WakeLock = ();

    fn request_fullscreen(&mut self) -> Result<(), DeviceError> {
        self.ctx
            .send_viewport_cmd(egui::ViewportCommand::Fullscreen(true));
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<(), DeviceError> {
        self.ctx
            .send_viewport_cmd(egui::ViewportCommand::Fullscreen(false));
        Ok(())
    }

    fn acquire_wake_lock(&mut self) -> Result<(), DeviceError> {
        Err(DeviceError::Unsupported)
    }

    fn release_wake_lock(&mut self, _lock: ()) {}
}

/// Offline stand-in for the palette suggestion service
struct ThemeSuggester;

impl PaletteSuggester for ThemeSuggester {
    fn suggest(&mut self, theme: &str) -> Result<Palette, SuggestionError> {
        let theme = theme.to_lowercase();
        THEMES
            .iter()
            .find(|(name, _)| theme.contains(*name))
            .ok_or(SuggestionError::Unavailable)
            .and_then(|(_, colors)| parse_suggestion(colors.as_slice()))
    }
}

struct PreviewApp {
    /// The session instance
    session: PreviewSession,
    /// Intent sender for UI changes
    intent_sender: IntentSender<'static, INTENT_CHANNEL_SIZE>,
    /// Wall-clock reference for session time
    started: StdInstant,
    /// Whether the viewport has reported fullscreen since it was requested
    seen_fullscreen: bool,
    /// Theme text box contents
    theme: String,
    /// Result of the last suggestion request
    suggestion_status: Option<String>,
    /// Hide controls and show only the grid
    controls_hidden: bool,
}

impl PreviewApp {
    fn new(ctx: &egui::Context) -> Result<Self, ConfigError> {
        let config = SessionConfig::default();
        let session = PreviewSession::new(
            INTENTS_CHANNEL.receiver(),
            FrameCapture::default(),
            SmallRng::from_os_rng(),
            WindowDevice { ctx: ctx.clone() },
            &config,
        )?;
        info!("preview started with {}", config.pattern.as_str());

        Ok(Self {
            session,
            intent_sender: INTENTS_CHANNEL.sender(),
            started: StdInstant::now(),
            seen_fullscreen: false,
            theme: String::new(),
            suggestion_status: None,
            controls_hidden: false,
        })
    }

    /// Queue an intent for the next frame
    fn send(&self, intent: SessionIntent) {
        if let Err(err) = self.intent_sender.try_send(intent) {
            warn!("dropped intent: {err}");
        }
    }

    /// Session time derived from the wall clock
    fn now(&self) -> Instant {
        #[allow(clippy::cast_possible_truncation)]
        let elapsed = self.started.elapsed().as_millis() as u64;
        Instant::from_millis(elapsed)
    }

    /// Report a fullscreen exit the session did not ask for
    fn track_fullscreen(&mut self, ctx: &egui::Context) {
        let Some(fullscreen) = ctx.input(|i| i.viewport().fullscreen) else {
            return;
        };
        if !self.session.is_fullscreen() {
            self.seen_fullscreen = false;
            return;
        }
        if fullscreen {
            self.seen_fullscreen = true;
        } else if self.seen_fullscreen {
            self.seen_fullscreen = false;
            self.send(SessionIntent::FullscreenExited);
        }
    }

    fn request_suggestion(&mut self) {
        let result = self
            .session
            .request_palette(&mut ThemeSuggester, &self.theme);
        self.suggestion_status = Some(match result {
            Ok(()) => "palette applied".to_owned(),
            Err(err) => err.to_string(),
        });
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        let params = self.session.params().clone();
        let animated = params.animation_enabled();

        ui.horizontal(|ui| {
            // <PatternControls>
            ui.vertical(|ui| {
                ui.horizontal(|ui| {
                    ui.label("Pattern:");
                    let mut selected = params.pattern();
                    egui::ComboBox::from_id_salt("pattern_selector")
                        .selected_text(selected.descriptor().name)
                        .show_ui(ui, |ui| {
                            for descriptor in PATTERNS {
                                ui.selectable_value(
                                    &mut selected,
                                    descriptor.id,
                                    descriptor.name,
                                );
                            }
                        });
                    if selected != params.pattern() {
                        self.send(SessionIntent::SelectPattern(selected));
                    }
                });

                ui.add_space(4.0);

                ui.horizontal(|ui| {
                    if ui
                        .button(if animated { "⏸ Pause" } else { "▶ Play" })
                        .clicked()
                    {
                        self.send(SessionIntent::SetAnimationEnabled(!animated));
                    }
                    if ui.button("⛶ Fullscreen").clicked() {
                        self.send(SessionIntent::ToggleFullscreen);
                    }
                    if ui.button("Hide controls").clicked() {
                        self.controls_hidden = true;
                    }
                });

                ui.add_space(4.0);

                ui.horizontal(|ui| {
                    ui.label("Speed:");
                    let mut speed = params.speed();
                    ui.add_enabled(animated, egui::Slider::new(&mut speed, 1.0..=100.0));
                    if speed != params.speed() {
                        self.send(SessionIntent::SetSpeed(speed));
                    }
                });

                ui.horizontal(|ui| {
                    ui.label("Brightness:");
                    let mut brightness = params.brightness();
                    ui.add(egui::Slider::new(&mut brightness, 0.2..=1.5));
                    if brightness != params.brightness() {
                        self.send(SessionIntent::SetBrightness(brightness));
                    }
                });
            });
            // </PatternControls>
            ui.add_space(16.0);
            // <PaletteControls>
            ui.vertical(|ui| {
                ui.horizontal(|ui| {
                    ui.label("Palette:");
                    let editable = if params.pattern() == PatternId::SolidColor {
                        1
                    } else {
                        params.palette().len()
                    };
                    for (index, color) in params.palette().iter().take(editable).enumerate() {
                        let mut rgb = [color.r, color.g, color.b];
                        if ui.color_edit_button_srgb(&mut rgb).changed() {
                            let [r, g, b] = rgb;
                            self.send(SessionIntent::SetColor {
                                index,
                                color: Rgb { r, g, b },
                            });
                        }
                    }
                    if ui.button("Reset").clicked() {
                        self.send(SessionIntent::SetPalette(Palette::default()));
                    }
                });

                ui.add_space(4.0);

                ui.horizontal(|ui| {
                    ui.label("Theme:");
                    let response = ui.text_edit_singleline(&mut self.theme);
                    let submitted =
                        response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if ui.button("Suggest").clicked() || submitted {
                        self.request_suggestion();
                    }
                });

                if let Some(status) = &self.suggestion_status {
                    ui.label(status);
                }
            });
            // </PaletteControls>
        });
    }

    fn grid(&self, ui: &mut egui::Ui) {
        let capture = self.session.output();
        let size = capture.size;
        if size.is_empty() || capture.cells.len() < size.count() {
            return;
        }

        let available = ui.available_size();
        let (response, painter) = ui.allocate_painter(available, egui::Sense::click());

        let cols = f32::from(size.cols);
        let rows = f32::from(size.rows);
        let pitch = (available.x / cols).min(available.y / rows);
        let cell = (pitch - CELL_GAP).max(1.0);
        let origin = response.rect.center() - egui::vec2(pitch * cols, pitch * rows) / 2.0;

        for (y, row) in capture.cells.chunks_exact(usize::from(size.cols)).enumerate() {
            for (x, &color) in row.iter().enumerate() {
                let color = apply_brightness(color, capture.brightness);
                #[allow(clippy::cast_precision_loss)]
                let rect = egui::Rect::from_min_size(
                    origin + egui::vec2(x as f32 * pitch, y as f32 * pitch),
                    egui::vec2(cell, cell),
                );
                painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(color.r, color.g, color.b));
            }
        }

        if response.double_clicked() {
            self.send(SessionIntent::CyclePrimaryColor);
        }
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.track_fullscreen(ctx);

        let now = self.now();
        self.session.on_frame(now);

        // Request continuous repaint for animation and queued intents
        ctx.request_repaint();

        if self.controls_hidden && ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.controls_hidden = false;
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                if !self.controls_hidden {
                    egui::Frame::new().inner_margin(8.0).show(ui, |ui| {
                        self.controls(ui);
                    });
                    ui.add_space(8.0);
                }
                self.grid(ui);
            });
    }
}

impl Drop for PreviewApp {
    fn drop(&mut self) {
        self.session.shutdown();
    }
}
