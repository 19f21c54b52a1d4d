//! `MapViewer`: the interaction state of the application.
//!
//! Owns the mode, the walking camera and the measurement session. Input
//! events and per-frame key state go in; window commands come out. Nothing
//! here touches the renderer.

use crate::config::ViewerConfig;
use crate::geom::NdcPoint;
use crate::measure::{MeasurementSession, PointEdit};
use crate::mode::{IconRegion, InputEvent, Key, Mode, WindowCommand};
use crate::view::{MoveKeys, ViewState};

#[derive(Debug, Clone)]
pub struct MapViewer {
    mode: Mode,
    view: ViewState,
    session: MeasurementSession,
    mode_icon: IconRegion,
    fullscreen: bool,
}

impl MapViewer {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            mode: Mode::default(),
            view: ViewState::new(config.map_zoom, config.walk_speed, config.unit_scale),
            session: MeasurementSession::new(config.point_radius, config.unit_scale),
            mode_icon: IconRegion::MODE_TOGGLE,
            fullscreen: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn session(&self) -> &MeasurementSession {
        &self.session
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    /// Keep the fullscreen flag in sync with what the window reports.
    pub fn sync_fullscreen(&mut self, fullscreen: bool) {
        self.fullscreen = fullscreen;
    }

    /// Route one discrete input event.
    pub fn handle(&mut self, event: InputEvent) -> Option<WindowCommand> {
        match event {
            InputEvent::Click(pos) => {
                self.click(pos);
                None
            }
            InputEvent::KeyPress(Key::ToggleMode) => {
                self.toggle_mode();
                None
            }
            InputEvent::KeyPress(Key::Escape) => {
                if self.fullscreen {
                    self.fullscreen = false;
                    Some(WindowCommand::SetFullscreen(false))
                } else {
                    Some(WindowCommand::Close)
                }
            }
            InputEvent::KeyPress(Key::Fullscreen) => {
                self.fullscreen = !self.fullscreen;
                Some(WindowCommand::SetFullscreen(self.fullscreen))
            }
        }
    }

    /// Icon clicks toggle the mode in any state; other clicks edit points
    /// while measuring and are ignored while walking.
    fn click(&mut self, pos: NdcPoint) -> Option<PointEdit> {
        if self.mode_icon.contains(pos) {
            self.toggle_mode();
            return None;
        }
        match self.mode {
            Mode::Measuring => Some(self.session.toggle_point(pos)),
            Mode::Walking => None,
        }
    }

    fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        log::debug!("mode -> {:?}", self.mode);
    }

    /// Per-frame update. Moves the camera only while walking.
    pub fn advance(&mut self, keys: MoveKeys) {
        if self.mode == Mode::Walking {
            self.view.step(keys);
        }
    }

    /// Distance shown in the HUD for the current mode.
    pub fn readout_value(&self) -> f32 {
        match self.mode {
            Mode::Walking => self.view.walked,
            Mode::Measuring => self.session.total(),
        }
    }

    /// Whole units only; the font atlas carries digits.
    pub fn readout(&self) -> String {
        format!("{}", self.readout_value().max(0.0).trunc() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewer() -> MapViewer {
        MapViewer::new(&ViewerConfig::default())
    }

    const ICON: NdcPoint = NdcPoint::new(0.78, 0.78);

    #[test]
    fn icon_click_toggles_in_both_modes() {
        let mut v = viewer();
        assert_eq!(v.mode(), Mode::Walking);
        v.handle(InputEvent::Click(ICON));
        assert_eq!(v.mode(), Mode::Measuring);
        v.handle(InputEvent::Click(ICON));
        assert_eq!(v.mode(), Mode::Walking);
    }

    #[test]
    fn key_toggles_mode() {
        let mut v = viewer();
        assert_eq!(v.handle(InputEvent::KeyPress(Key::ToggleMode)), None);
        assert_eq!(v.mode(), Mode::Measuring);
    }

    #[test]
    fn walking_clicks_do_not_place_points() {
        let mut v = viewer();
        v.handle(InputEvent::Click(NdcPoint::new(0.0, 0.0)));
        assert!(v.session().is_empty());
    }

    #[test]
    fn measuring_clicks_edit_points() {
        let mut v = viewer();
        v.handle(InputEvent::KeyPress(Key::ToggleMode));
        v.handle(InputEvent::Click(NdcPoint::new(-0.5, -0.5)));
        v.handle(InputEvent::Click(NdcPoint::new(0.5, 0.5)));
        assert_eq!(v.session().points().len(), 2);
        assert_eq!(v.session().segments().len(), 1);
        // icon click does not add a point
        v.handle(InputEvent::Click(ICON));
        assert_eq!(v.session().points().len(), 2);
        assert_eq!(v.mode(), Mode::Walking);
    }

    #[test]
    fn session_survives_mode_switches() {
        let mut v = viewer();
        v.handle(InputEvent::KeyPress(Key::ToggleMode));
        v.handle(InputEvent::Click(NdcPoint::new(0.1, 0.1)));
        v.handle(InputEvent::KeyPress(Key::ToggleMode));
        v.handle(InputEvent::KeyPress(Key::ToggleMode));
        assert_eq!(v.session().points().len(), 1);
    }

    #[test]
    fn camera_moves_only_while_walking() {
        let mut v = viewer();
        let right = MoveKeys {
            right: true,
            ..MoveKeys::default()
        };
        v.advance(right);
        let walked = v.view().offset;
        assert!(walked[0] > 0.0);

        v.handle(InputEvent::KeyPress(Key::ToggleMode));
        v.advance(right);
        assert_eq!(v.view().offset, walked);
    }

    #[test]
    fn readout_follows_mode() {
        let mut v = viewer();
        let up = MoveKeys {
            up: true,
            ..MoveKeys::default()
        };
        for _ in 0..10 {
            v.advance(up);
        }
        // 10 × 0.002 × 1000 = 20 (float error may land just under)
        let walked: u64 = v.readout().parse().unwrap();
        assert!(walked == 19 || walked == 20);

        v.handle(InputEvent::KeyPress(Key::ToggleMode));
        assert_eq!(v.readout(), "0");
        v.handle(InputEvent::Click(NdcPoint::new(-0.5, -0.5)));
        v.handle(InputEvent::Click(NdcPoint::new(0.5, -0.5)));
        // map-space length 0.5
        assert_eq!(v.readout(), "500");
    }

    #[test]
    fn escape_leaves_fullscreen_then_closes() {
        let mut v = viewer();
        assert_eq!(
            v.handle(InputEvent::KeyPress(Key::Fullscreen)),
            Some(WindowCommand::SetFullscreen(true))
        );
        assert!(v.is_fullscreen());
        assert_eq!(
            v.handle(InputEvent::KeyPress(Key::Escape)),
            Some(WindowCommand::SetFullscreen(false))
        );
        assert_eq!(
            v.handle(InputEvent::KeyPress(Key::Escape)),
            Some(WindowCommand::Close)
        );
    }

    #[test]
    fn synced_fullscreen_changes_escape() {
        let mut v = viewer();
        v.sync_fullscreen(true);
        assert_eq!(
            v.handle(InputEvent::KeyPress(Key::Escape)),
            Some(WindowCommand::SetFullscreen(false))
        );
    }
}
