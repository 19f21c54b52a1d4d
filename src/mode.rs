//! Viewer modes and the input vocabulary the controller understands.

use crate::geom::NdcPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Zoomed map, keyboard pan, odometer.
    #[default]
    Walking,
    /// Full map, click to place or remove points.
    Measuring,
}

impl Mode {
    /// The only transition: every trigger flips the mode.
    pub fn toggled(self) -> Self {
        match self {
            Mode::Walking => Mode::Measuring,
            Mode::Measuring => Mode::Walking,
        }
    }
}

/// Keys with a discrete meaning (held movement keys travel separately as
/// [`crate::view::MoveKeys`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ToggleMode,
    Escape,
    Fullscreen,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Left button press at an NDC position.
    Click(NdcPoint),
    KeyPress(Key),
}

/// Requests the shell must carry out on the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowCommand {
    SetFullscreen(bool),
    Close,
}

/// Axis-aligned on-screen box in NDC, open on all sides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconRegion {
    pub center: NdcPoint,
    /// Full edge length.
    pub scale: f32,
}

impl IconRegion {
    /// The mode icon in the top-right corner.
    pub const MODE_TOGGLE: IconRegion = IconRegion {
        center: NdcPoint::new(0.78, 0.78),
        scale: 0.3,
    };

    pub fn contains(&self, p: NdcPoint) -> bool {
        let half = self.scale * 0.5;
        p.x > self.center.x - half
            && p.x < self.center.x + half
            && p.y > self.center.y - half
            && p.y < self.center.y + half
    }
}
