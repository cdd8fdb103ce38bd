use std::time::Instant;

use cgmath::Point2;
use eframe::egui;
use eframe::egui::epaint::Mesh;
use fireworks::audio::AudioUnlock;
use fireworks::surface::StateStack;
use fireworks::{Fireworks, HostEvent, Rgb, Show, ShowParams, Surface};

gflags::define! {
    --config: &str = "fireworks.toml"
}
gflags::define! {
    --log_filter: &str = "warn,fireworks=info"
}
gflags::define! {
    -h, --help = false
}

fn color32(rgb: Rgb, alpha: f32) -> egui::Color32 {
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(rgb.r, rgb.g, rgb.b, a)
}

fn pos2(p: egui::Pos2) -> Point2<f32> {
    Point2::new(p.x, p.y)
}

// Draws onto the central panel. Surface coordinates are relative to the
// panel's top-left corner.
struct PainterSurface<'a> {
    painter: &'a egui::Painter,
    origin: egui::Pos2,
    background_top: Rgb,
    background_bottom: Rgb,
    state: StateStack,
}

impl Surface for PainterSurface<'_> {
    // The clear paints the background gradient, since egui has no
    // transparent layer underneath.
    fn clear(&mut self, width: f32, height: f32) {
        let rect = egui::Rect::from_min_size(self.origin, egui::vec2(width, height));
        let top = color32(self.background_top, 1.0);
        let bottom = color32(self.background_bottom, 1.0);
        let mut mesh = Mesh::default();
        mesh.colored_vertex(rect.left_top(), top);
        mesh.colored_vertex(rect.right_top(), top);
        mesh.colored_vertex(rect.right_bottom(), bottom);
        mesh.colored_vertex(rect.left_bottom(), bottom);
        mesh.add_triangle(0, 1, 2);
        mesh.add_triangle(0, 2, 3);
        self.painter.add(egui::Shape::mesh(mesh));
    }

    fn save(&mut self) {
        self.state.save();
    }

    fn restore(&mut self) {
        self.state.restore();
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.state.set_alpha(alpha);
    }

    fn set_fill_color(&mut self, color: Rgb) {
        self.state.set_fill(color);
    }

    fn fill_circle(&mut self, center: Point2<f32>, radius: f32) {
        let state = self.state.current();
        let center = self.origin + egui::vec2(center.x, center.y);
        self.painter
            .circle_filled(center, radius, color32(state.fill, state.alpha));
    }
}

struct FireworksApp {
    show: Show,
    params: ShowParams,
    last_frame_time: Instant,
}

impl FireworksApp {
    fn new(params: ShowParams) -> Self {
        let fireworks = Fireworks::new(
            params.window_width,
            params.window_height,
            params.burst,
            params.particle,
        );
        let audio = open_soundtrack(&params);
        let show = Show::mount(&params, fireworks, audio, Instant::now());
        Self {
            show,
            params,
            last_frame_time: Instant::now(),
        }
    }

    fn render_stats(&self, ctx: &egui::Context, frame_time: f32) {
        egui::Area::new("stats")
            .fixed_pos(egui::pos2(8.0, 8.0))
            .show(ctx, |ui| {
                ui.label(format!("FPS: {:.1}", 1.0 / frame_time.max(f32::EPSILON)));
                ui.label(format!("Frame Time: {:.3}ms", frame_time * 1000.0));
                ui.label(format!("Particles: {}", self.show.fireworks().len()));
            });
    }
}

impl eframe::App for FireworksApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;

        let interacted = ctx.input(|i| {
            i.pointer.any_pressed()
                || i.events
                    .iter()
                    .any(|e| matches!(e, egui::Event::Key { pressed: true, .. }))
        });
        if interacted {
            self.show.handle(HostEvent::Interaction);
        }

        let mut keep_running = false;
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let (rect, response) =
                    ui.allocate_exact_size(ui.available_size(), egui::Sense::click());

                let fireworks = self.show.fireworks();
                if rect.width() != fireworks.width || rect.height() != fireworks.height {
                    self.show.handle(HostEvent::Resize {
                        width: rect.width(),
                        height: rect.height(),
                    });
                }

                if response.clicked() {
                    if let Some(position) = response.interact_pointer_pos() {
                        self.show.handle(HostEvent::Click {
                            position: pos2(position),
                            surface_origin: pos2(rect.min),
                        });
                    }
                }

                let painter = ui.painter_at(rect);
                let mut surface = PainterSurface {
                    painter: &painter,
                    origin: rect.min,
                    background_top: self.params.background_top.into(),
                    background_bottom: self.params.background_bottom.into(),
                    state: StateStack::default(),
                };
                keep_running = self.show.frame(now, &mut surface);
            });

        if self.params.show_stats {
            self.render_stats(ctx, frame_time);
        }

        if keep_running {
            ctx.request_repaint();
        }
    }
}

#[cfg(feature = "music")]
fn open_soundtrack(params: &ShowParams) -> AudioUnlock {
    let Some(path) = params.soundtrack.as_deref() else {
        return AudioUnlock::silent();
    };
    match fireworks::audio::RodioTrack::open(path) {
        Ok(track) => AudioUnlock::new(Some(Box::new(track))),
        Err(e) => {
            log::warn!("Soundtrack {} unavailable: {}", path, e);
            AudioUnlock::silent()
        }
    }
}

#[cfg(not(feature = "music"))]
fn open_soundtrack(params: &ShowParams) -> AudioUnlock {
    if let Some(path) = params.soundtrack.as_deref() {
        log::info!("Built without the music feature, not playing {}", path);
    }
    AudioUnlock::silent()
}

fn main() -> anyhow::Result<()> {
    gflags::parse();
    if HELP.flag {
        gflags::print_help_and_exit(0);
    }
    scrub_log::init_with_filter_string(LOG_FILTER.flag)
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {:?}", e))?;

    let params = fireworks::config::load_or_default(CONFIG.flag);
    let options = eframe::NativeOptions {
        renderer: eframe::Renderer::Wgpu,
        initial_window_size: Some(egui::vec2(params.window_width, params.window_height)),
        fullscreen: params.fullscreen,
        vsync: true,
        ..Default::default()
    };

    eframe::run_native(
        "Fireworks",
        options,
        Box::new(move |_cc| Box::new(FireworksApp::new(params))),
    )
    .map_err(|e| anyhow::anyhow!("{}", e))
}
