//! Measurement session: user-placed points joined into a polyline.
//!
//! Clicks arrive in NDC, points are stored in map space. A click near an
//! existing point removes it, anywhere else it adds one; the segment list
//! and total are rebuilt from scratch after every edit.

use crate::geom::{MapPoint, NdcPoint};

/// Straight piece between two consecutive points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: MapPoint,
    pub end: MapPoint,
    /// Euclidean map-space length × unit scale.
    pub distance: f32,
}

/// What a click did to the point list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointEdit {
    Added { index: usize, point: MapPoint },
    Removed { index: usize, point: MapPoint },
}

#[derive(Debug, Clone)]
pub struct MeasurementSession {
    points: Vec<MapPoint>,
    segments: Vec<Segment>,
    total: f32,
    /// NDC distance under which a click hits a point.
    point_radius: f32,
    unit_scale: f32,
}

impl MeasurementSession {
    pub fn new(point_radius: f32, unit_scale: f32) -> Self {
        Self {
            points: Vec::new(),
            segments: Vec::new(),
            total: 0.0,
            point_radius,
            unit_scale,
        }
    }

    pub fn points(&self) -> &[MapPoint] {
        &self.points
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn total(&self) -> f32 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Index of the stored point nearest to `click` within the pick radius.
    /// Ties keep the earliest point.
    pub fn hit_test(&self, click: NdcPoint) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (i, p) in self.points.iter().enumerate() {
            let d = p.to_ndc().distance(click);
            if d >= self.point_radius {
                continue;
            }
            if best.map_or(true, |(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }
        best.map(|(i, _)| i)
    }

    /// Remove the point under `click`, or add one there.
    pub fn toggle_point(&mut self, click: NdcPoint) -> PointEdit {
        let edit = match self.hit_test(click) {
            Some(index) => {
                let point = self.points.remove(index);
                PointEdit::Removed { index, point }
            }
            None => {
                let point = click.to_map();
                self.points.push(point);
                PointEdit::Added {
                    index: self.points.len() - 1,
                    point,
                }
            }
        };
        self.rebuild();
        log::debug!("{:?}, {} points, total {:.1}", edit, self.points.len(), self.total);
        edit
    }

    /// Recompute segments and total from the point list.
    pub fn rebuild(&mut self) {
        let scale = self.unit_scale;
        self.segments = self
            .points
            .windows(2)
            .map(|w| Segment {
                start: w[0],
                end: w[1],
                distance: w[0].distance(w[1]) * scale,
            })
            .collect();
        self.total = self.segments.iter().map(|s| s.distance).sum();
    }
}
