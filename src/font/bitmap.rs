//! Monospaced bitmap text.
//!
//! [`layout_text`] turns a string into screen quads; [`BitmapFont`] uploads
//! them one glyph at a time through its retained buffer.

use super::atlas::{GlyphAtlas, GlyphRect};
use crate::geom::Viewport;
use crate::render::{
    ProgramHandle, RenderBackend, ResourceLoader, TextureHandle, Topology, Uniform, Vertex,
    VertexBuffer,
};

/// Base glyph cell size in pixels at scale 1.0 (width and height).
pub const GLYPH_BASE_PX: f32 = 32.0;

/// Spaces advance by this fraction of a glyph width.
const SPACE_ADVANCE: f32 = 0.5;

/// One visible character, ready for upload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphQuad {
    pub ch: char,
    /// Top-left corner in screen pixels.
    pub origin: [f32; 2],
    /// Cell size in screen pixels.
    pub size: [f32; 2],
    pub uv: GlyphRect,
}

impl GlyphQuad {
    /// Two triangles in NDC: TL, BL, BR, TL, BR, TR.
    pub fn vertices(&self, viewport: Viewport) -> [Vertex; 6] {
        let tl = viewport.screen_to_ndc(self.origin[0], self.origin[1]);
        let br = viewport.screen_to_ndc(self.origin[0] + self.size[0], self.origin[1] + self.size[1]);
        let GlyphRect { u1, v1, u2, v2 } = self.uv;

        let top_left = Vertex::new(tl.x, tl.y, u1, v1);
        let bottom_left = Vertex::new(tl.x, br.y, u1, v2);
        let bottom_right = Vertex::new(br.x, br.y, u2, v2);
        let top_right = Vertex::new(br.x, tl.y, u2, v1);

        [top_left, bottom_left, bottom_right, top_left, bottom_right, top_right]
    }
}

/// Lay `text` out from `origin` (screen pixels, top-left origin).
///
/// `'\n'` returns to `origin.x` one line down, `' '` advances half a cell,
/// every other character produces exactly one quad.
pub fn layout_text(atlas: &GlyphAtlas, text: &str, origin: [f32; 2], scale: f32) -> Vec<GlyphQuad> {
    let glyph_w = GLYPH_BASE_PX * scale;
    let glyph_h = GLYPH_BASE_PX * scale;

    let mut quads = Vec::with_capacity(text.len());
    let [mut x, mut y] = origin;

    for ch in text.chars() {
        match ch {
            '\n' => {
                x = origin[0];
                y += glyph_h;
            }
            ' ' => x += glyph_w * SPACE_ADVANCE,
            _ => {
                quads.push(GlyphQuad {
                    ch,
                    origin: [x, y],
                    size: [glyph_w, glyph_h],
                    uv: atlas.locate(ch),
                });
                x += glyph_w;
            }
        }
    }

    quads
}

/// Text renderer over a glyph-grid atlas texture.
///
/// Starts uninitialized; [`BitmapFont::init`] hands it its texture, program
/// and buffer. Rendering before that (or with null handles) logs and draws
/// nothing.
pub struct BitmapFont {
    atlas: GlyphAtlas,
    texture: TextureHandle,
    program: ProgramHandle,
    buffer: Option<VertexBuffer>,
}

impl BitmapFont {
    pub fn new(atlas: GlyphAtlas) -> Self {
        Self {
            atlas,
            texture: TextureHandle::NULL,
            program: ProgramHandle::NULL,
            buffer: None,
        }
    }

    pub fn init(
        &mut self,
        loader: &mut impl ResourceLoader,
        texture: TextureHandle,
        program: ProgramHandle,
    ) {
        self.texture = texture;
        self.program = program;
        self.buffer = Some(VertexBuffer::acquire(loader, 6));
        log::info!(
            "bitmap font initialised: grid {}x{}",
            self.atlas.columns(),
            self.atlas.rows()
        );
    }

    pub fn is_ready(&self) -> bool {
        !self.texture.is_null()
            && !self.program.is_null()
            && self.buffer.map_or(false, |b| b.is_ready())
    }

    /// Draw `text` with its first glyph's top-left at `(x, y)` pixels.
    /// Issues one draw call per visible glyph and returns how many were drawn.
    pub fn render_text(
        &self,
        backend: &mut impl RenderBackend,
        text: &str,
        x: f32,
        y: f32,
        scale: f32,
        color: [f32; 3],
    ) -> usize {
        let Some(buffer) = self.buffer.filter(|_| self.is_ready()) else {
            log::warn!("bitmap font not initialised, skipping {:?}", text);
            return 0;
        };

        backend.use_program(self.program);
        backend.bind_texture(self.texture);
        backend.set_uniform("uTexture", Uniform::Int(0));
        backend.set_uniform("uColor", Uniform::Vec4([color[0], color[1], color[2], 1.0]));

        let viewport = backend.viewport();
        let mut drawn = 0;
        for quad in layout_text(&self.atlas, text, [x, y], scale) {
            let vertices = quad.vertices(viewport);
            if buffer.draw(backend, Topology::Triangles, &vertices) > 0 {
                drawn += 1;
            }
        }
        drawn
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::{Call, RecordingBackend};

    const EPS: f32 = 1e-5;

    fn digits() -> GlyphAtlas {
        GlyphAtlas::new(10, 1, '0').unwrap()
    }

    #[test]
    fn cursor_advances_per_glyph() {
        let quads = layout_text(&digits(), "123", [10.0, 20.0], 1.0);
        assert_eq!(quads.len(), 3);
        assert_eq!(quads[0].origin, [10.0, 20.0]);
        assert_eq!(quads[1].origin, [42.0, 20.0]);
        assert_eq!(quads[2].origin, [74.0, 20.0]);
        assert_eq!(quads[0].size, [32.0, 32.0]);
    }

    #[test]
    fn space_is_half_width_and_emits_nothing() {
        let quads = layout_text(&digits(), "1 2", [0.0, 0.0], 2.0);
        assert_eq!(quads.len(), 2);
        // 64 px glyph, 32 px space
        assert_eq!(quads[1].origin, [96.0, 0.0]);
    }

    #[test]
    fn newline_returns_to_origin_column() {
        let quads = layout_text(&digits(), "12\n3", [5.0, 5.0], 0.5);
        assert_eq!(quads.len(), 3);
        assert_eq!(quads[2].origin, [5.0, 21.0]);
        assert_eq!(quads[2].ch, '3');
    }

    #[test]
    fn unknown_chars_still_get_a_quad() {
        let atlas = digits();
        let quads = layout_text(&atlas, "x", [0.0, 0.0], 1.0);
        assert_eq!(quads.len(), 1);
        assert_eq!(quads[0].uv, atlas.locate('0'));
    }

    #[test]
    fn quad_vertices_are_ndc_with_flipped_y() {
        let atlas = digits();
        let quad = layout_text(&atlas, "0", [0.0, 0.0], 1.0)[0];
        let v = quad.vertices(Viewport::new(320.0, 320.0));

        // TL at screen (0,0) → NDC (-1, 1); BR at (32,32) → (-0.8, 0.8)
        assert_eq!(v[0].position, [-1.0, 1.0]);
        assert!((v[2].position[0] + 0.8).abs() < EPS);
        assert!((v[2].position[1] - 0.8).abs() < EPS);
        // TL, BL, BR, TL, BR, TR
        assert_eq!(v[0], v[3]);
        assert_eq!(v[2], v[4]);
        assert_eq!(v[1].position[0], v[0].position[0]);
        assert_eq!(v[5].position[1], v[0].position[1]);
        // top edge samples v1, bottom edge v2
        assert_eq!(v[0].tex_coord, [quad.uv.u1, quad.uv.v1]);
        assert_eq!(v[1].tex_coord, [quad.uv.u1, quad.uv.v2]);
        assert_eq!(v[5].tex_coord, [quad.uv.u2, quad.uv.v1]);
    }

    #[test]
    fn one_draw_per_visible_glyph() {
        let mut rec = RecordingBackend::new(1200.0, 800.0);
        let mut font = BitmapFont::new(digits());
        font.init(&mut rec, TextureHandle(7), ProgramHandle(8));

        let drawn = font.render_text(&mut rec, "12 3\n45", 75.0, 95.0, 0.7, [0.0, 0.0, 0.0]);
        assert_eq!(drawn, 5);
        assert_eq!(rec.draws().len(), 5);
        for w in rec.writes() {
            assert_eq!(w.len(), 6);
        }
        assert!(rec.calls.contains(&Call::BindTexture(TextureHandle(7))));
        assert!(rec.calls.contains(&Call::UseProgram(ProgramHandle(8))));
        assert_eq!(
            rec.uniforms_named("uColor"),
            vec![Uniform::Vec4([0.0, 0.0, 0.0, 1.0])]
        );
    }

    #[test]
    fn uses_backend_viewport_for_ndc() {
        let mut rec = RecordingBackend::new(800.0, 400.0);
        let mut font = BitmapFont::new(digits());
        font.init(&mut rec, TextureHandle(1), ProgramHandle(1));
        font.render_text(&mut rec, "1", 400.0, 200.0, 1.0, [1.0, 1.0, 1.0]);
        let first = rec.writes()[0][0];
        assert_eq!(first.position, [0.0, 0.0]);
    }

    #[test]
    fn uninitialised_font_is_a_no_op() {
        let mut rec = RecordingBackend::new(1200.0, 800.0);
        let font = BitmapFont::new(digits());
        assert!(!font.is_ready());
        assert_eq!(font.render_text(&mut rec, "123", 0.0, 0.0, 1.0, [0.0; 3]), 0);
        assert!(rec.calls.is_empty());
    }

    #[test]
    fn null_texture_is_a_no_op() {
        let mut rec = RecordingBackend::new(1200.0, 800.0);
        let mut font = BitmapFont::new(digits());
        font.init(&mut rec, TextureHandle::NULL, ProgramHandle(2));
        assert_eq!(font.render_text(&mut rec, "9", 0.0, 0.0, 1.0, [0.0; 3]), 0);
        assert!(rec.draws().is_empty());
    }
}
