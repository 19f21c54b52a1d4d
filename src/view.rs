//! Walking-mode camera: pan offset over the map and the walked distance.

/// Half-size of the texture window that shows the whole map.
pub const FULL_MAP_ZOOM: f32 = 0.5;

/// Directional keys held during a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveKeys {
    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    /// Pan offset from the map centre, in map units.
    pub offset: [f32; 2],
    /// Odometer, in display units.
    pub walked: f32,
    zoom: f32,
    speed: f32,
    unit_scale: f32,
}

impl ViewState {
    pub fn new(zoom: f32, speed: f32, unit_scale: f32) -> Self {
        Self {
            offset: [0.0, 0.0],
            walked: 0.0,
            zoom,
            speed,
            unit_scale,
        }
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Largest allowed `|offset|` per axis.
    pub fn bound(&self) -> f32 {
        (0.5 - self.zoom).max(0.0)
    }

    /// Apply one frame of movement. Returns the distance added to the
    /// odometer.
    pub fn step(&mut self, keys: MoveKeys) -> f32 {
        let last = self.offset;
        let mut next = self.offset;

        if keys.up {
            next[1] += self.speed;
        }
        if keys.down {
            next[1] -= self.speed;
        }
        if keys.left {
            next[0] -= self.speed;
        }
        if keys.right {
            next[0] += self.speed;
        }

        let bound = self.bound();
        self.offset = [next[0].clamp(-bound, bound), next[1].clamp(-bound, bound)];

        let dx = self.offset[0] - last[0];
        let dy = self.offset[1] - last[1];
        let delta = (dx * dx + dy * dy).sqrt() * self.unit_scale;
        self.walked += delta;
        delta
    }
}
