use std::process::ExitCode;

use eframe::egui;

use map_measure::render::egui_backend::EguiRenderer;
use map_measure::render::scene::Scene;
use map_measure::{ViewerConfig, ViewerError};

mod app;

use app::ViewerApp;

fn main() -> ExitCode {
    env_logger::init();

    match run(ViewerConfig::from_env()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: ViewerConfig) -> Result<(), ViewerError> {
    let [width, height] = config.window_size;
    log::info!(
        "{} starting ({}x{}, assets in {})",
        config.title,
        width,
        height,
        config.assets_dir.display()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width as f32, height as f32])
            .with_title(config.title.clone()),
        ..Default::default()
    };

    let title = config.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            let mut renderer = EguiRenderer::new(&cc.egui_ctx);
            let scene = Scene::load(&mut renderer, &config)?;
            Ok(Box::new(ViewerApp::new(&config, scene, renderer)))
        }),
    )
    .map_err(|e| ViewerError::Window(e.to_string()))
}
