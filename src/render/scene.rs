//! Per-frame scene: map, HUD icons, measurement geometry and the readout.
//!
//! All handles are acquired once in [`Scene::load`]; [`Scene::draw`] only
//! rewrites the retained buffers.

use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::font::{BitmapFont, GlyphAtlas};
use crate::geom::NdcPoint;
use crate::measure::MeasurementSession;
use crate::mode::{IconRegion, Mode};
use crate::view::FULL_MAP_ZOOM;
use crate::viewer::MapViewer;

use super::{
    ProgramHandle, ProgramKind, RenderBackend, ResourceLoader, TextureHandle, Topology, Uniform,
    Vertex, VertexBuffer, SCREEN_QUAD, UNIT_QUAD,
};

const CIRCLE_SEGMENTS: usize = 20;
/// Fan centre + one vertex per segment + the closing vertex.
const DISC_VERTICES: usize = CIRCLE_SEGMENTS + 2;
const POINT_DISC_RADIUS: f32 = 0.01;
const LINE_WIDTH: f32 = 2.0;
const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// A textured HUD quad: where it sits and how big it is (NDC).
#[derive(Debug, Clone, Copy)]
struct Placement {
    pos: [f32; 2],
    scale: f32,
    alpha: f32,
}

const CENTER_MARKER: Placement = Placement {
    pos: [0.0, 0.0],
    scale: 0.15,
    alpha: 1.0,
};
const TEXT_BACKGROUND: Placement = Placement {
    pos: [-0.735, 0.735],
    scale: 0.4,
    alpha: 1.0,
};
const SIGNATURE_POS: [f32; 2] = [0.80, -0.75];
const SIGNATURE_SCALE: f32 = 0.3;

#[derive(Debug, Clone, Copy)]
struct Textures {
    map: TextureHandle,
    walk_icon: TextureHandle,
    measure_icon: TextureHandle,
    center_icon: TextureHandle,
    text_background: TextureHandle,
    signature: TextureHandle,
}

#[derive(Debug, Clone, Copy)]
struct Programs {
    map: ProgramHandle,
    solid: ProgramHandle,
    icon: ProgramHandle,
}

pub struct Scene {
    textures: Textures,
    programs: Programs,
    font: BitmapFont,
    quad: VertexBuffer,
    shape: VertexBuffer,
    signature_alpha: f32,
    readout_origin: [f32; 2],
    readout_scale: f32,
    readout_color: [f32; 3],
}

impl Scene {
    /// Acquire every resource. The map texture and all programs are
    /// required; other textures degrade to skipped draws.
    pub fn load(loader: &mut impl ResourceLoader, config: &ViewerConfig) -> Result<Self, ViewerError> {
        let atlas = GlyphAtlas::from_grid(&config.atlas)?;

        let map_path = config.asset_path(&config.assets.map);
        let map = loader.load_texture(&map_path);
        if map.is_null() {
            return Err(ViewerError::MissingTexture { path: map_path });
        }

        let mut optional = |name: &str| {
            let path = config.asset_path(name);
            let handle = loader.load_texture(&path);
            if handle.is_null() {
                log::warn!("optional texture {} not loaded", path.display());
            }
            handle
        };
        let font_texture = optional(&config.assets.font);
        let textures = Textures {
            map,
            walk_icon: optional(&config.assets.walk_icon),
            measure_icon: optional(&config.assets.measure_icon),
            center_icon: optional(&config.assets.center_icon),
            text_background: optional(&config.assets.text_background),
            signature: optional(&config.assets.signature),
        };

        let mut required = |kind: ProgramKind| {
            let handle = loader.load_program(kind);
            if handle.is_null() {
                Err(ViewerError::MissingProgram { kind })
            } else {
                Ok(handle)
            }
        };
        let programs = Programs {
            map: required(ProgramKind::Map)?,
            solid: required(ProgramKind::Solid)?,
            icon: required(ProgramKind::Icon)?,
        };
        let font_program = required(ProgramKind::Font)?;

        let mut font = BitmapFont::new(atlas);
        font.init(loader, font_texture, font_program);

        let quad = VertexBuffer::acquire(loader, SCREEN_QUAD.len());
        let shape = VertexBuffer::acquire(loader, DISC_VERTICES);

        log::info!("scene loaded from {}", config.assets_dir.display());

        Ok(Self {
            textures,
            programs,
            font,
            quad,
            shape,
            signature_alpha: config.signature_alpha,
            readout_origin: config.readout.origin,
            readout_scale: config.readout.scale,
            readout_color: config.readout.color,
        })
    }

    pub fn font(&self) -> &BitmapFont {
        &self.font
    }

    pub fn draw(&self, backend: &mut impl RenderBackend, viewer: &MapViewer) {
        match viewer.mode() {
            Mode::Walking => {
                let view = viewer.view();
                self.draw_map(backend, view.offset, view.zoom());
                self.draw_icon(backend, self.textures.center_icon, CENTER_MARKER);
                self.draw_icon(backend, self.textures.walk_icon, mode_icon());
            }
            Mode::Measuring => {
                self.draw_map(backend, [0.0, 0.0], FULL_MAP_ZOOM);
                self.draw_measurement(backend, viewer.session());
                self.draw_icon(backend, self.textures.measure_icon, mode_icon());
            }
        }

        self.draw_icon(
            backend,
            self.textures.signature,
            Placement {
                pos: SIGNATURE_POS,
                scale: SIGNATURE_SCALE,
                alpha: self.signature_alpha,
            },
        );
        self.draw_icon(backend, self.textures.text_background, TEXT_BACKGROUND);

        let [x, y] = self.readout_origin;
        self.font.render_text(
            backend,
            &viewer.readout(),
            x,
            y,
            self.readout_scale,
            self.readout_color,
        );
    }

    fn draw_map(&self, backend: &mut impl RenderBackend, offset: [f32; 2], zoom: f32) {
        backend.use_program(self.programs.map);
        backend.bind_texture(self.textures.map);
        backend.set_uniform("uTexture", Uniform::Int(0));
        backend.set_uniform("uOffset", Uniform::Vec2(offset));
        backend.set_uniform("uZoom", Uniform::Float(zoom));
        self.quad.draw(backend, Topology::Triangles, &SCREEN_QUAD);
    }

    fn draw_icon(&self, backend: &mut impl RenderBackend, texture: TextureHandle, at: Placement) {
        if texture.is_null() {
            return;
        }
        backend.use_program(self.programs.icon);
        backend.bind_texture(texture);
        backend.set_uniform("uTexture", Uniform::Int(0));
        backend.set_uniform("uAlpha", Uniform::Float(at.alpha));
        backend.set_uniform("uPos", Uniform::Vec2(at.pos));
        backend.set_uniform("uScale", Uniform::Float(at.scale));
        self.quad.draw(backend, Topology::Triangles, &UNIT_QUAD);
    }

    fn draw_measurement(&self, backend: &mut impl RenderBackend, session: &MeasurementSession) {
        if session.is_empty() {
            return;
        }
        backend.use_program(self.programs.solid);
        backend.set_uniform("uColor", Uniform::Vec4(BLACK));

        backend.set_line_width(LINE_WIDTH);
        for seg in session.segments() {
            let a = seg.start.to_ndc();
            let b = seg.end.to_ndc();
            self.shape
                .draw(backend, Topology::Lines, &[Vertex::at(a.x, a.y), Vertex::at(b.x, b.y)]);
        }

        for p in session.points() {
            let disc = disc_fan(p.to_ndc(), POINT_DISC_RADIUS);
            self.shape.draw(backend, Topology::TriangleFan, &disc);
        }
    }
}

fn mode_icon() -> Placement {
    let IconRegion { center, scale } = IconRegion::MODE_TOGGLE;
    Placement {
        pos: [center.x, center.y],
        scale,
        alpha: 1.0,
    }
}

/// Triangle fan approximating a filled circle.
fn disc_fan(center: NdcPoint, radius: f32) -> [Vertex; DISC_VERTICES] {
    let mut out = [Vertex::at(center.x, center.y); DISC_VERTICES];
    for (i, v) in out.iter_mut().skip(1).enumerate() {
        let angle = i as f32 * std::f32::consts::TAU / CIRCLE_SEGMENTS as f32;
        *v = Vertex::at(
            center.x + angle.cos() * radius,
            center.y + angle.sin() * radius,
        );
    }
    out
}
