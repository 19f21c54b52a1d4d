//! Start-up errors.
//!
//! Only initialization can fail fatally. Everything that happens inside the
//! frame loop (bad glyphs, null handles) is recovered locally and logged.

use std::path::PathBuf;

use crate::render::ProgramKind;

#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    #[error("glyph atlas grid must be non-empty, got {columns}x{rows}")]
    InvalidAtlas { columns: u32, rows: u32 },
    #[error("required texture failed to load: {}", path.display())]
    MissingTexture { path: PathBuf },
    #[error("required program failed to build: {kind:?}")]
    MissingProgram { kind: ProgramKind },
    #[error("viewer window failed: {0}")]
    Window(String),
}
