//! Map measurement viewer.
//!
//! A single-window map viewer with two modes: *Walking* pans a zoomed view
//! of the map with the keyboard and counts the distance covered, while
//! *Measuring* shows the whole map and sums the length of a clicked
//! polyline. Distances are drawn with a bitmap font sampled from a glyph
//! atlas texture.
//!
//! Window, input and GPU plumbing live in the binary; everything here is
//! toolkit-agnostic apart from [`render::egui_backend`].

pub mod config;
pub mod error;
pub mod font;
pub mod geom;
pub mod measure;
pub mod mode;
pub mod pacing;
pub mod render;
pub mod view;
pub mod viewer;

pub use config::ViewerConfig;
pub use error::ViewerError;
pub use geom::{MapPoint, NdcPoint, Viewport};
pub use measure::MeasurementSession;
pub use mode::{InputEvent, Key, Mode, WindowCommand};
pub use view::MoveKeys;
pub use viewer::MapViewer;
