//! Coordinate spaces.
//!
//! - map space: `[0,1]²`, the whole map image regardless of pan/zoom
//! - NDC: `[-1,1]²`, what the renderer backend consumes
//! - screen pixels: top-left origin, y grows downwards

/// A point in normalized map space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MapPoint {
    pub x: f32,
    pub y: f32,
}

/// A point in normalized device coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NdcPoint {
    pub x: f32,
    pub y: f32,
}

impl MapPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// `ndc = map·2 - 1`
    pub fn to_ndc(self) -> NdcPoint {
        NdcPoint::new(self.x * 2.0 - 1.0, self.y * 2.0 - 1.0)
    }

    pub fn distance(self, other: MapPoint) -> f32 {
        euclid(self.x - other.x, self.y - other.y)
    }
}

impl NdcPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// `map = (ndc + 1) / 2`
    pub fn to_map(self) -> MapPoint {
        MapPoint::new((self.x + 1.0) * 0.5, (self.y + 1.0) * 0.5)
    }

    pub fn distance(self, other: NdcPoint) -> f32 {
        euclid(self.x - other.x, self.y - other.y)
    }
}

/// Pixel size of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Screen pixel (top-left origin) to NDC (bottom-left origin, y flipped).
    pub fn screen_to_ndc(&self, px: f32, py: f32) -> NdcPoint {
        NdcPoint::new(
            (px / self.width) * 2.0 - 1.0,
            -((py / self.height) * 2.0 - 1.0),
        )
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

#[inline]
fn euclid(dx: f32, dy: f32) -> f32 {
    (dx * dx + dy * dy).sqrt()
}
