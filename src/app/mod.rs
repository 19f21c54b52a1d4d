//! `ViewerApp`: the eframe shell around [`MapViewer`].
//!
//! Per frame: translate egui input, feed it to the viewer, carry out any
//! window commands, then replay the scene through the egui backend and
//! schedule the next repaint at the target frame rate.

pub mod input;

use eframe::egui;

use map_measure::config::ViewerConfig;
use map_measure::pacing::FramePacer;
use map_measure::render::egui_backend::EguiRenderer;
use map_measure::render::scene::Scene;
use map_measure::{MapViewer, Mode, Viewport, WindowCommand};

// ─── Application state ───────────────────────────────────────────────────────

const BACKGROUND: egui::Color32 = egui::Color32::from_gray(26);

pub struct ViewerApp {
    viewer: MapViewer,
    scene: Scene,
    renderer: EguiRenderer,
    pacer: FramePacer,
}

impl ViewerApp {
    pub fn new(config: &ViewerConfig, scene: Scene, renderer: EguiRenderer) -> Self {
        Self {
            viewer: MapViewer::new(config),
            scene,
            renderer,
            pacer: FramePacer::new(config.target_fps),
        }
    }
}

fn apply(ctx: &egui::Context, command: WindowCommand) {
    log::debug!("window command {:?}", command);
    match command {
        WindowCommand::SetFullscreen(on) => {
            ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(on));
        }
        WindowCommand::Close => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
    }
}

// ─── Frame loop ──────────────────────────────────────────────────────────────

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.pacer.begin_frame();

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(BACKGROUND))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let frame_input = ctx.input(|i| input::collect(i, rect));

                if let Some(fullscreen) = frame_input.fullscreen {
                    self.viewer.sync_fullscreen(fullscreen);
                }
                for event in frame_input.events {
                    if let Some(command) = self.viewer.handle(event) {
                        apply(ctx, command);
                    }
                }
                if frame_input.keys.any() {
                    log::trace!("move {:?}", frame_input.keys);
                }
                self.viewer.advance(frame_input.keys);

                if self.viewer.mode() == Mode::Measuring {
                    ctx.set_cursor_icon(egui::CursorIcon::Crosshair);
                }

                if Viewport::new(rect.width(), rect.height()).is_degenerate() {
                    return;
                }
                let mut frame = self.renderer.frame(rect);
                self.scene.draw(&mut frame, &self.viewer);
                ui.painter().extend(frame.finish());
            });

        ctx.request_repaint_after(self.pacer.remaining());
    }
}
