//! egui input → viewer events.
//!
//! Discrete presses (clicks, R, Escape, F11) become [`InputEvent`]s; held
//! W/A/S/D become the per-frame [`MoveKeys`].

use eframe::egui;

use map_measure::{InputEvent, Key, MoveKeys, NdcPoint, Viewport};

/// Everything the viewer needs from one frame of egui input.
#[derive(Debug, Default)]
pub struct FrameInput {
    pub events: Vec<InputEvent>,
    pub keys: MoveKeys,
    /// Fullscreen state as last reported by the window, if known.
    pub fullscreen: Option<bool>,
}

const KEY_BINDINGS: [(egui::Key, Key); 3] = [
    (egui::Key::R, Key::ToggleMode),
    (egui::Key::Escape, Key::Escape),
    (egui::Key::F11, Key::Fullscreen),
];

pub fn collect(input: &egui::InputState, rect: egui::Rect) -> FrameInput {
    let events = input
        .events
        .iter()
        .filter_map(|event| translate(event, rect))
        .collect();

    FrameInput {
        events,
        keys: MoveKeys {
            up: input.key_down(egui::Key::W),
            down: input.key_down(egui::Key::S),
            left: input.key_down(egui::Key::A),
            right: input.key_down(egui::Key::D),
        },
        fullscreen: input.viewport().fullscreen,
    }
}

/// Only fresh presses count: key auto-repeat and releases are dropped.
fn translate(event: &egui::Event, rect: egui::Rect) -> Option<InputEvent> {
    match event {
        egui::Event::Key {
            key,
            pressed: true,
            repeat: false,
            ..
        } => KEY_BINDINGS
            .iter()
            .find(|(bound, _)| bound == key)
            .map(|&(_, k)| InputEvent::KeyPress(k)),
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed: true,
            ..
        } => click_to_ndc(rect, *pos).map(InputEvent::Click),
        _ => None,
    }
}

/// Screen position to NDC relative to the drawing rect. Clicks outside the
/// rect, or on a collapsed one, are dropped.
pub fn click_to_ndc(rect: egui::Rect, pos: egui::Pos2) -> Option<NdcPoint> {
    let viewport = Viewport::new(rect.width(), rect.height());
    if viewport.is_degenerate() || !rect.contains(pos) {
        return None;
    }
    Some(viewport.screen_to_ndc(pos.x - rect.min.x, pos.y - rect.min.y))
}
