//! Viewer configuration.
//!
//! Every tunable lives in [`ViewerConfig`]; `Default` carries the stock
//! values and [`ViewerConfig::from_env`] lets a handful of them be
//! overridden without recompiling.

use std::path::PathBuf;

pub const DEFAULT_WINDOW_WIDTH: u32 = 1200;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 800;
pub const DEFAULT_MAP_ZOOM: f32 = 0.15;
pub const DEFAULT_WALK_SPEED: f32 = 0.002;
pub const DEFAULT_POINT_RADIUS: f32 = 0.015;
pub const DEFAULT_UNIT_SCALE: f32 = 1000.0;
pub const DEFAULT_TARGET_FPS: u32 = 75;

/// Asset file names, resolved against [`ViewerConfig::assets_dir`].
#[derive(Debug, Clone)]
pub struct AssetNames {
    pub map: String,
    pub font: String,
    pub walk_icon: String,
    pub measure_icon: String,
    pub center_icon: String,
    pub text_background: String,
    pub signature: String,
}

impl Default for AssetNames {
    fn default() -> Self {
        Self {
            map: "map.png".into(),
            font: "font.png".into(),
            walk_icon: "walk.png".into(),
            measure_icon: "ruler.png".into(),
            center_icon: "center.png".into(),
            text_background: "scroll.png".into(),
            signature: "signature.png".into(),
        }
    }
}

/// Glyph grid of the font atlas image.
#[derive(Debug, Clone, Copy)]
pub struct AtlasGrid {
    pub columns: u32,
    pub rows: u32,
    pub first_char: char,
}

impl Default for AtlasGrid {
    /// Digits only: one row of `0`..`9`.
    fn default() -> Self {
        Self {
            columns: 10,
            rows: 1,
            first_char: '0',
        }
    }
}

/// Where and how the distance readout is drawn.
#[derive(Debug, Clone, Copy)]
pub struct ReadoutStyle {
    /// Top-left of the first glyph, in screen pixels.
    pub origin: [f32; 2],
    pub scale: f32,
    pub color: [f32; 3],
}

impl Default for ReadoutStyle {
    fn default() -> Self {
        Self {
            origin: [75.0, 95.0],
            scale: 0.7,
            color: [0.0, 0.0, 0.0],
        }
    }
}

#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub title: String,
    pub window_size: [u32; 2],
    pub assets_dir: PathBuf,
    pub assets: AssetNames,
    pub atlas: AtlasGrid,
    pub readout: ReadoutStyle,
    /// Half-size of the visible map window in walking mode (map units).
    pub map_zoom: f32,
    /// Pan per frame per held direction key (map units).
    pub walk_speed: f32,
    /// Pick radius for point deletion (NDC units).
    pub point_radius: f32,
    /// Map units → displayed distance units.
    pub unit_scale: f32,
    pub target_fps: u32,
    pub signature_alpha: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "Map Measurement Tool".into(),
            window_size: [DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT],
            assets_dir: PathBuf::from("assets"),
            assets: AssetNames::default(),
            atlas: AtlasGrid::default(),
            readout: ReadoutStyle::default(),
            map_zoom: DEFAULT_MAP_ZOOM,
            walk_speed: DEFAULT_WALK_SPEED,
            point_radius: DEFAULT_POINT_RADIUS,
            unit_scale: DEFAULT_UNIT_SCALE,
            target_fps: DEFAULT_TARGET_FPS,
            signature_alpha: 0.75,
        }
    }
}

impl ViewerConfig {
    /// Defaults, then environment overrides:
    ///
    /// | variable                  | field         |
    /// |---------------------------|---------------|
    /// | `MAP_MEASURE_ASSETS`      | `assets_dir`  |
    /// | `MAP_MEASURE_FPS`         | `target_fps`  |
    /// | `MAP_MEASURE_ZOOM`        | `map_zoom`    |
    /// | `MAP_MEASURE_WALK_SPEED`  | `walk_speed`  |
    /// | `MAP_MEASURE_UNIT_SCALE`  | `unit_scale`  |
    ///
    /// Unparseable or non-finite values are ignored.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// [`ViewerConfig::from_env`] over an arbitrary variable source.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(dir) = var("MAP_MEASURE_ASSETS") {
            config.assets_dir = PathBuf::from(dir);
        }
        config.target_fps = parse_or(var("MAP_MEASURE_FPS"), config.target_fps).max(1);
        // zoom must leave a non-negative pan range
        config.map_zoom = finite_or(var("MAP_MEASURE_ZOOM"), config.map_zoom).clamp(0.01, 0.5);
        config.walk_speed = finite_or(var("MAP_MEASURE_WALK_SPEED"), config.walk_speed).max(0.0);
        config.unit_scale = finite_or(var("MAP_MEASURE_UNIT_SCALE"), config.unit_scale);
        config
    }

    pub fn asset_path(&self, name: &str) -> PathBuf {
        self.assets_dir.join(name)
    }
}

fn parse_or<T>(value: Option<String>, default: T) -> T
where
    T: std::str::FromStr,
{
    value
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

/// Like [`parse_or`], but `NaN` and infinities also fall back.
fn finite_or(value: Option<String>, default: f32) -> f32 {
    Some(parse_or(value, default))
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_stock_viewer() {
        let c = ViewerConfig::default();
        assert_eq!(c.window_size, [1200, 800]);
        assert_eq!(c.target_fps, 75);
        assert_eq!(c.atlas.columns, 10);
        assert_eq!(c.atlas.rows, 1);
        assert_eq!(c.atlas.first_char, '0');
        assert!((c.map_zoom - 0.15).abs() < f32::EPSILON);
        assert!((c.point_radius - 0.015).abs() < f32::EPSILON);
    }

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn parse_or_falls_back_on_garbage() {
        assert_eq!(parse_or(Some("not-a-number".into()), 42u32), 42);
        assert_eq!(parse_or(Some("90".into()), 42u32), 90);
        assert_eq!(parse_or(None, 1.5f32), 1.5);
    }

    #[test]
    fn no_overrides_keeps_defaults() {
        let c = ViewerConfig::from_vars(vars(&[]));
        let d = ViewerConfig::default();
        assert_eq!(c.assets_dir, d.assets_dir);
        assert_eq!(c.target_fps, d.target_fps);
        assert_eq!(c.map_zoom, d.map_zoom);
        assert_eq!(c.walk_speed, d.walk_speed);
        assert_eq!(c.unit_scale, d.unit_scale);
    }

    #[test]
    fn overrides_are_applied_and_clamped() {
        let c = ViewerConfig::from_vars(vars(&[
            ("MAP_MEASURE_ASSETS", "/tmp/maps"),
            ("MAP_MEASURE_FPS", "0"),
            ("MAP_MEASURE_ZOOM", "0.9"),
            ("MAP_MEASURE_WALK_SPEED", "-0.01"),
            ("MAP_MEASURE_UNIT_SCALE", "250"),
        ]));
        assert_eq!(c.assets_dir, PathBuf::from("/tmp/maps"));
        assert_eq!(c.target_fps, 1);
        assert_eq!(c.map_zoom, 0.5);
        assert_eq!(c.walk_speed, 0.0);
        assert_eq!(c.unit_scale, 250.0);

        let c = ViewerConfig::from_vars(vars(&[("MAP_MEASURE_ZOOM", "0.001")]));
        assert_eq!(c.map_zoom, 0.01);
    }

    #[test]
    fn non_finite_overrides_are_ignored() {
        let d = ViewerConfig::default();
        let c = ViewerConfig::from_vars(vars(&[
            ("MAP_MEASURE_ZOOM", "NaN"),
            ("MAP_MEASURE_WALK_SPEED", "NaN"),
            ("MAP_MEASURE_UNIT_SCALE", "inf"),
        ]));
        assert_eq!(c.map_zoom, d.map_zoom);
        assert_eq!(c.walk_speed, d.walk_speed);
        assert_eq!(c.unit_scale, d.unit_scale);

        let mut view = crate::view::ViewState::new(c.map_zoom, c.walk_speed, c.unit_scale);
        view.step(crate::view::MoveKeys {
            up: true,
            ..Default::default()
        });
        assert!(view.offset.iter().all(|o| o.is_finite()));
    }

    #[test]
    fn asset_path_joins_dir() {
        let c = ViewerConfig::default();
        assert_eq!(c.asset_path(&c.assets.map), PathBuf::from("assets").join("map.png"));
    }
}
