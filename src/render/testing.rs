//! Backend double that records every call.

use std::path::{Path, PathBuf};

use super::{
    BufferHandle, ProgramHandle, ProgramKind, RenderBackend, ResourceLoader, TextureHandle,
    Topology, Uniform, Vertex,
};
use crate::geom::Viewport;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    UseProgram(ProgramHandle),
    BindTexture(TextureHandle),
    SetUniform(&'static str, Uniform),
    LineWidth(f32),
    Write { buffer: BufferHandle, vertices: Vec<Vertex> },
    Draw { topology: Topology, buffer: BufferHandle, count: usize },
}

pub struct RecordingBackend {
    pub viewport: Viewport,
    pub calls: Vec<Call>,
    /// Texture paths that fail to load.
    pub missing: Vec<PathBuf>,
    pub fail_programs: bool,
    pub fail_buffers: bool,
    next_id: u32,
}

impl RecordingBackend {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            viewport: Viewport::new(width, height),
            calls: Vec::new(),
            missing: Vec::new(),
            fail_programs: false,
            fail_buffers: false,
            next_id: 1,
        }
    }

    fn next(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn draws(&self) -> Vec<&Call> {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Draw { .. }))
            .collect()
    }

    /// Vertex payloads of every buffer write, in order.
    pub fn writes(&self) -> Vec<&[Vertex]> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Write { vertices, .. } => Some(vertices.as_slice()),
                _ => None,
            })
            .collect()
    }

    pub fn bound_textures(&self) -> Vec<TextureHandle> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::BindTexture(t) => Some(*t),
                _ => None,
            })
            .collect()
    }

    pub fn uniforms_named(&self, name: &str) -> Vec<Uniform> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::SetUniform(n, u) if *n == name => Some(*u),
                _ => None,
            })
            .collect()
    }
}

impl ResourceLoader for RecordingBackend {
    fn load_texture(&mut self, path: &Path) -> TextureHandle {
        if self.missing.iter().any(|m| m == path) {
            return TextureHandle::NULL;
        }
        TextureHandle(self.next())
    }

    fn load_program(&mut self, _kind: ProgramKind) -> ProgramHandle {
        if self.fail_programs {
            return ProgramHandle::NULL;
        }
        ProgramHandle(self.next())
    }

    fn create_buffer(&mut self, _capacity: usize) -> BufferHandle {
        if self.fail_buffers {
            return BufferHandle::NULL;
        }
        BufferHandle(self.next())
    }
}

impl RenderBackend for RecordingBackend {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn use_program(&mut self, program: ProgramHandle) {
        self.calls.push(Call::UseProgram(program));
    }

    fn bind_texture(&mut self, texture: TextureHandle) {
        self.calls.push(Call::BindTexture(texture));
    }

    fn set_uniform(&mut self, name: &'static str, value: Uniform) {
        self.calls.push(Call::SetUniform(name, value));
    }

    fn set_line_width(&mut self, width: f32) {
        self.calls.push(Call::LineWidth(width));
    }

    fn write_buffer(&mut self, buffer: BufferHandle, vertices: &[Vertex]) {
        self.calls.push(Call::Write {
            buffer,
            vertices: vertices.to_vec(),
        });
    }

    fn draw(&mut self, topology: Topology, buffer: BufferHandle, count: usize) {
        self.calls.push(Call::Draw {
            topology,
            buffer,
            count,
        });
    }
}
