//! Bitmap font: glyph-grid atlas lookup and monospaced text quads.

pub mod atlas;
pub mod bitmap;

pub use atlas::{GlyphAtlas, GlyphRect};
pub use bitmap::{layout_text, BitmapFont, GlyphQuad, GLYPH_BASE_PX};
