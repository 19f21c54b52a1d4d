//! Rendering seam.
//!
//! The scene talks to the GPU only through [`ResourceLoader`] (start-up) and
//! [`RenderBackend`] (per frame), using opaque handles where 0 means
//! "failed to load". [`egui_backend`] is the production implementation.

pub mod scene;
pub mod egui_backend;

#[cfg(test)]
pub(crate) mod testing;

use std::path::Path;

use crate::geom::Viewport;

// ── Handles ──

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $name(pub u32);

        impl $name {
            /// Sentinel returned by a loader that failed.
            pub const NULL: Self = Self(0);

            pub fn is_null(self) -> bool {
                self.0 == 0
            }
        }
    };
}

handle!(
    /// GPU-resident texture.
    TextureHandle
);
handle!(
    /// Linked program (shader pair).
    ProgramHandle
);
handle!(
    /// Retained vertex buffer.
    BufferHandle
);

/// The four programs the viewer draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgramKind {
    /// Textured full-screen quad, texture window from `uOffset`/`uZoom`.
    Map,
    /// Untextured geometry filled with `uColor`.
    Solid,
    /// Textured quad placed by `uPos`/`uScale`, faded by `uAlpha`.
    Icon,
    /// Textured glyph quads tinted by `uColor`.
    Font,
}

/// Value assigned to a named uniform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Uniform {
    Int(i32),
    Float(f32),
    Vec2([f32; 2]),
    Vec4([f32; 4]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    Triangles,
    TriangleFan,
    Lines,
}

// ── Vertex layout (position + texture coordinate, interleaved) ──

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub tex_coord: [f32; 2],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, u: f32, v: f32) -> Self {
        Self {
            position: [x, y],
            tex_coord: [u, v],
        }
    }

    /// Untextured vertex; the texture coordinate is left at zero.
    pub const fn at(x: f32, y: f32) -> Self {
        Self::new(x, y, 0.0, 0.0)
    }
}

/// View a vertex slice as the flat float stream a GPU upload sees.
pub fn as_floats(vertices: &[Vertex]) -> &[f32] {
    bytemuck::cast_slice(vertices)
}

/// Unit quad centred on the origin, two triangles.
pub const UNIT_QUAD: [Vertex; 6] = [
    Vertex::new(-0.5, -0.5, 0.0, 0.0),
    Vertex::new(0.5, -0.5, 1.0, 0.0),
    Vertex::new(0.5, 0.5, 1.0, 1.0),
    Vertex::new(-0.5, -0.5, 0.0, 0.0),
    Vertex::new(0.5, 0.5, 1.0, 1.0),
    Vertex::new(-0.5, 0.5, 0.0, 1.0),
];

/// Full-screen quad, two triangles.
pub const SCREEN_QUAD: [Vertex; 6] = [
    Vertex::new(-1.0, -1.0, 0.0, 0.0),
    Vertex::new(1.0, -1.0, 1.0, 0.0),
    Vertex::new(1.0, 1.0, 1.0, 1.0),
    Vertex::new(-1.0, -1.0, 0.0, 0.0),
    Vertex::new(1.0, 1.0, 1.0, 1.0),
    Vertex::new(-1.0, 1.0, 0.0, 1.0),
];

// ── Collaborators ──

/// Turns asset descriptions into handles. Failures yield the `NULL` handle.
pub trait ResourceLoader {
    fn load_texture(&mut self, path: &Path) -> TextureHandle;
    fn load_program(&mut self, kind: ProgramKind) -> ProgramHandle;
    /// Allocate a buffer holding up to `capacity` vertices.
    fn create_buffer(&mut self, capacity: usize) -> BufferHandle;
}

/// Accepts draw calls for one frame.
///
/// Texture coordinates use the bottom-left origin convention; positions are
/// NDC. Calls referring to null handles are skipped by the backend.
pub trait RenderBackend {
    fn viewport(&self) -> Viewport;
    fn use_program(&mut self, program: ProgramHandle);
    fn bind_texture(&mut self, texture: TextureHandle);
    /// Uniforms belong to the active program and persist until overwritten.
    fn set_uniform(&mut self, name: &'static str, value: Uniform);
    fn set_line_width(&mut self, width: f32);
    /// Overwrite the start of `buffer` in place.
    fn write_buffer(&mut self, buffer: BufferHandle, vertices: &[Vertex]);
    fn draw(&mut self, topology: Topology, buffer: BufferHandle, count: usize);
}

/// A buffer acquired once and rewritten for every draw.
#[derive(Debug, Clone, Copy)]
pub struct VertexBuffer {
    handle: BufferHandle,
    capacity: usize,
}

impl VertexBuffer {
    pub fn acquire(loader: &mut impl ResourceLoader, capacity: usize) -> Self {
        let handle = loader.create_buffer(capacity);
        if handle.is_null() {
            log::warn!("vertex buffer allocation failed (capacity {})", capacity);
        }
        Self { handle, capacity }
    }

    pub fn is_ready(&self) -> bool {
        !self.handle.is_null()
    }

    /// Upload `vertices` and draw them. Returns the number of vertices drawn.
    pub fn draw(
        &self,
        backend: &mut impl RenderBackend,
        topology: Topology,
        vertices: &[Vertex],
    ) -> usize {
        if !self.is_ready() {
            log::warn!("draw skipped: vertex buffer not allocated");
            return 0;
        }
        let count = if vertices.len() > self.capacity {
            log::warn!(
                "{} vertices exceed buffer capacity {}, truncating",
                vertices.len(),
                self.capacity
            );
            self.capacity
        } else {
            vertices.len()
        };
        backend.write_buffer(self.handle, &vertices[..count]);
        backend.draw(topology, self.handle, count);
        count
    }
}
