//! egui implementation of the render collaborators.
//!
//! egui owns tessellation and the GPU pipeline, so the four viewer programs
//! are interpreted here on the CPU: each draw call turns the bound buffer
//! into an `egui::Shape` using the active program's uniforms.
//!
//! - `Map`:   texture window `0.5 + uOffset + (uv - 0.5)·2·uZoom`
//! - `Icon`:  position `pos·uScale + uPos`, alpha × `uAlpha`
//! - `Font`:  texture tinted by `uColor`
//! - `Solid`: flat `uColor`

use std::collections::HashMap;
use std::path::Path;

use egui::{epaint, Color32, Pos2, Rect, Shape, Stroke, TextureId, TextureOptions};

use super::{
    as_floats, BufferHandle, ProgramHandle, ProgramKind, RenderBackend, ResourceLoader, TextureHandle,
    Topology, Uniform, Vertex,
};
use crate::geom::Viewport;

struct Program {
    kind: ProgramKind,
    uniforms: HashMap<&'static str, Uniform>,
}

impl Program {
    fn float(&self, name: &str, default: f32) -> f32 {
        match self.uniforms.get(name) {
            Some(Uniform::Float(v)) => *v,
            _ => default,
        }
    }

    fn vec2(&self, name: &str, default: [f32; 2]) -> [f32; 2] {
        match self.uniforms.get(name) {
            Some(Uniform::Vec2(v)) => *v,
            _ => default,
        }
    }

    fn vec4(&self, name: &str, default: [f32; 4]) -> [f32; 4] {
        match self.uniforms.get(name) {
            Some(Uniform::Vec4(v)) => *v,
            _ => default,
        }
    }
}

struct Buffer {
    capacity: usize,
    data: Vec<Vertex>,
}

/// Long-lived side: textures, programs and buffers.
pub struct EguiRenderer {
    ctx: egui::Context,
    textures: Vec<egui::TextureHandle>,
    programs: Vec<Program>,
    buffers: Vec<Buffer>,
}

impl EguiRenderer {
    pub fn new(ctx: &egui::Context) -> Self {
        Self {
            ctx: ctx.clone(),
            textures: Vec::new(),
            programs: Vec::new(),
            buffers: Vec::new(),
        }
    }

    /// Start a frame that paints into `rect`.
    pub fn frame(&mut self, rect: Rect) -> EguiFrame<'_> {
        EguiFrame {
            renderer: self,
            rect,
            program: ProgramHandle::NULL,
            texture: TextureHandle::NULL,
            line_width: 1.0,
            shapes: Vec::new(),
        }
    }

    fn texture_id(&self, handle: TextureHandle) -> Option<TextureId> {
        slot(handle.0).and_then(|i| self.textures.get(i)).map(|t| t.id())
    }
}

impl Drop for EguiRenderer {
    fn drop(&mut self) {
        log::debug!(
            "releasing {} textures, {} buffers",
            self.textures.len(),
            self.buffers.len()
        );
    }
}

/// Handles are 1-based so that 0 stays the null sentinel.
fn slot(id: u32) -> Option<usize> {
    (id as usize).checked_sub(1)
}

/// Handle for the element about to be pushed onto a list of `len`.
fn next_handle(len: usize) -> u32 {
    u32::try_from(len).map_or(0, |n| n.saturating_add(1))
}

impl ResourceLoader for EguiRenderer {
    fn load_texture(&mut self, path: &Path) -> TextureHandle {
        let img = match image::open(path) {
            Ok(img) => img.to_rgba8(),
            Err(e) => {
                log::warn!("texture {}: {}", path.display(), e);
                return TextureHandle::NULL;
            }
        };
        let (w, h) = img.dimensions();
        let color = egui::ColorImage::from_rgba_unmultiplied([w as usize, h as usize], img.as_raw());
        let handle = self
            .ctx
            .load_texture(path.display().to_string(), color, TextureOptions::LINEAR);
        let id = next_handle(self.textures.len());
        self.textures.push(handle);
        log::info!("texture {} loaded ({}x{})", path.display(), w, h);
        TextureHandle(id)
    }

    fn load_program(&mut self, kind: ProgramKind) -> ProgramHandle {
        let id = next_handle(self.programs.len());
        self.programs.push(Program {
            kind,
            uniforms: HashMap::new(),
        });
        ProgramHandle(id)
    }

    fn create_buffer(&mut self, capacity: usize) -> BufferHandle {
        let id = next_handle(self.buffers.len());
        self.buffers.push(Buffer {
            capacity,
            data: Vec::with_capacity(capacity),
        });
        BufferHandle(id)
    }
}

/// One frame of draw calls, collected as shapes.
pub struct EguiFrame<'a> {
    renderer: &'a mut EguiRenderer,
    rect: Rect,
    program: ProgramHandle,
    texture: TextureHandle,
    line_width: f32,
    shapes: Vec<Shape>,
}

impl EguiFrame<'_> {
    /// Shapes to hand to `egui::Painter::extend`.
    pub fn finish(self) -> Vec<Shape> {
        self.shapes
    }
}

/// NDC (bottom-left origin) to a point inside `rect` (top-left origin).
pub fn ndc_to_pos(rect: Rect, ndc: [f32; 2]) -> Pos2 {
    Pos2::new(
        rect.min.x + (ndc[0] + 1.0) * 0.5 * rect.width(),
        rect.min.y + (1.0 - ndc[1]) * 0.5 * rect.height(),
    )
}

/// Bottom-left-origin texture coordinate to egui's top-left origin.
fn flip_uv(uv: [f32; 2]) -> Pos2 {
    Pos2::new(uv[0], 1.0 - uv[1])
}

fn color(rgba: [f32; 4]) -> Color32 {
    egui::Rgba::from_rgba_unmultiplied(rgba[0], rgba[1], rgba[2], rgba[3]).into()
}

impl RenderBackend for EguiFrame<'_> {
    fn viewport(&self) -> Viewport {
        Viewport::new(self.rect.width(), self.rect.height())
    }

    fn use_program(&mut self, program: ProgramHandle) {
        self.program = program;
    }

    fn bind_texture(&mut self, texture: TextureHandle) {
        self.texture = texture;
    }

    fn set_uniform(&mut self, name: &'static str, value: Uniform) {
        match slot(self.program.0).and_then(|i| self.renderer.programs.get_mut(i)) {
            Some(program) => {
                program.uniforms.insert(name, value);
            }
            None => log::warn!("uniform {} set without an active program", name),
        }
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    fn write_buffer(&mut self, buffer: BufferHandle, vertices: &[Vertex]) {
        let Some(buf) = slot(buffer.0).and_then(|i| self.renderer.buffers.get_mut(i)) else {
            log::warn!("write to unknown buffer {:?}", buffer);
            return;
        };
        let n = vertices.len().min(buf.capacity);
        buf.data.clear();
        buf.data.extend_from_slice(&vertices[..n]);
        log::trace!("buffer {:?} <- {} floats", buffer, as_floats(&buf.data).len());
    }

    fn draw(&mut self, topology: Topology, buffer: BufferHandle, count: usize) {
        let renderer = &*self.renderer;
        let Some(program) = slot(self.program.0).and_then(|i| renderer.programs.get(i)) else {
            log::warn!("draw skipped: no active program");
            return;
        };
        let Some(buf) = slot(buffer.0).and_then(|i| renderer.buffers.get(i)) else {
            log::warn!("draw skipped: unknown buffer {:?}", buffer);
            return;
        };
        let vertices = &buf.data[..count.min(buf.data.len())];

        let textured = program.kind != ProgramKind::Solid;
        let texture_id = if textured {
            match renderer.texture_id(self.texture) {
                Some(id) => id,
                None => {
                    log::warn!("draw skipped: {:?} with no texture bound", program.kind);
                    return;
                }
            }
        } else {
            TextureId::default()
        };

        let tint = match program.kind {
            ProgramKind::Map => [1.0; 4],
            ProgramKind::Icon => [1.0, 1.0, 1.0, program.float("uAlpha", 1.0)],
            ProgramKind::Font | ProgramKind::Solid => program.vec4("uColor", [1.0; 4]),
        };
        let tint = color(tint);

        let offset = program.vec2("uOffset", [0.0, 0.0]);
        let zoom = program.float("uZoom", 0.5);
        let pos = program.vec2("uPos", [0.0, 0.0]);
        let scale = program.float("uScale", 1.0);

        let shade = |v: &Vertex| -> epaint::Vertex {
            let position = match program.kind {
                ProgramKind::Icon => [
                    v.position[0] * scale + pos[0],
                    v.position[1] * scale + pos[1],
                ],
                _ => v.position,
            };
            let uv = match program.kind {
                ProgramKind::Map => flip_uv([
                    0.5 + offset[0] + (v.tex_coord[0] - 0.5) * 2.0 * zoom,
                    0.5 + offset[1] + (v.tex_coord[1] - 0.5) * 2.0 * zoom,
                ]),
                ProgramKind::Solid => epaint::WHITE_UV,
                _ => flip_uv(v.tex_coord),
            };
            epaint::Vertex {
                pos: ndc_to_pos(self.rect, position),
                uv,
                color: tint,
            }
        };

        match topology {
            Topology::Lines => {
                let stroke = Stroke::new(self.line_width, tint);
                for pair in vertices.chunks_exact(2) {
                    let a = ndc_to_pos(self.rect, pair[0].position);
                    let b = ndc_to_pos(self.rect, pair[1].position);
                    self.shapes.push(Shape::line_segment([a, b], stroke));
                }
            }
            Topology::Triangles | Topology::TriangleFan => {
                let mut mesh = epaint::Mesh::with_texture(texture_id);
                mesh.vertices.extend(vertices.iter().map(shade));
                let n = vertices.len() as u32;
                if topology == Topology::Triangles {
                    mesh.indices.extend(0..n - n % 3);
                } else {
                    for i in 1..n.saturating_sub(1) {
                        mesh.indices.extend([0, i, i + 1]);
                    }
                }
                if !mesh.indices.is_empty() {
                    self.shapes.push(Shape::mesh(mesh));
                }
            }
        }
    }
}
