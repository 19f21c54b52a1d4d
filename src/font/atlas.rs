/// Glyph-grid atlas indexing.
///
/// The atlas is a single image cut into `columns × rows` equal cells, one
/// per character starting at `first_codepoint`. Row 0 is the top row of the
/// image; texture coordinates use the bottom-left origin, so `v` decreases
/// as the row index grows.

use crate::config::AtlasGrid;
use crate::error::ViewerError;

/// Texture-space rectangle of one glyph cell. `(u1, v1)` is the top-left
/// corner, `(u2, v2)` the bottom-right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphRect {
    pub u1: f32,
    pub v1: f32,
    pub u2: f32,
    pub v2: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphAtlas {
    columns: u32,
    rows: u32,
    first_codepoint: u32,
    cell_width: f32,
    cell_height: f32,
}

impl GlyphAtlas {
    pub fn new(columns: u32, rows: u32, first_char: char) -> Result<Self, ViewerError> {
        if columns == 0 || rows == 0 {
            return Err(ViewerError::InvalidAtlas { columns, rows });
        }
        Ok(Self {
            columns,
            rows,
            first_codepoint: first_char as u32,
            cell_width: 1.0 / columns as f32,
            cell_height: 1.0 / rows as f32,
        })
    }

    pub fn from_grid(grid: &AtlasGrid) -> Result<Self, ViewerError> {
        Self::new(grid.columns, grid.rows, grid.first_char)
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cell_count(&self) -> u32 {
        self.columns * self.rows
    }

    /// Cell index of `ch`; characters outside the grid fall back to cell 0.
    pub fn index_of(&self, ch: char) -> u32 {
        (ch as u32)
            .checked_sub(self.first_codepoint)
            .filter(|&i| i < self.cell_count())
            .unwrap_or(0)
    }

    pub fn locate(&self, ch: char) -> GlyphRect {
        let index = self.index_of(ch);
        let col = index % self.columns;
        let row = index / self.columns;

        let u1 = col as f32 * self.cell_width;
        let v1 = 1.0 - row as f32 * self.cell_height;
        GlyphRect {
            u1,
            v1,
            u2: u1 + self.cell_width,
            v2: v1 - self.cell_height,
        }
    }
}
