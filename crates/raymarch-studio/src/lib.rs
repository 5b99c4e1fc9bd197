//! Pieces shared by the demo binaries.

use raymarch_engine::device::{DrawMode, Gpu};
use raymarch_engine::gl::{
    GlResult, IndexBuffer, IndexBufferConfig, VertexArray, VertexArrayConfig, VertexBufferConfig,
};
use raymarch_engine::glow;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{Key, NamedKey};

pub const QUAD_VERT: &str = include_str!("../shaders/quad.vert");

type Gl = glow::Context;

/// Two triangles covering clip space, with UVs running 0..1.
pub struct FullScreenQuad {
    vertices: VertexArray<Gl>,
    indices: IndexBuffer<Gl>,
}

impl FullScreenQuad {
    pub fn new(gpu: &Gpu<Gl>) -> GlResult<Self> {
        #[rustfmt::skip]
        let positions = vec![
            -1.0, -1.0, 0.0,
             1.0, -1.0, 0.0,
             1.0,  1.0, 0.0,
            -1.0,  1.0, 0.0,
        ];
        #[rustfmt::skip]
        let uvs = vec![
            0.0, 0.0,
            1.0, 0.0,
            1.0, 1.0,
            0.0, 1.0,
        ];

        let vertices = gpu.create_vertex_array(&VertexArrayConfig {
            usage: glow::STATIC_DRAW,
            buffers: vec![
                VertexBufferConfig::floats("a_positions", 3, positions),
                VertexBufferConfig::floats("a_uvs", 2, uvs),
            ],
        })?;
        let indices = gpu.create_index_buffer(&IndexBufferConfig {
            data: vec![0, 1, 2, 0, 2, 3],
            usage: glow::STATIC_DRAW,
        })?;

        Ok(Self { vertices, indices })
    }

    /// Draws with whatever program is bound.
    pub fn draw(&self, gpu: &Gpu<Gl>) {
        self.vertices.bind();
        self.indices.bind();
        gpu.draw_elements(self.indices.count(), DrawMode::Triangles);
        self.vertices.unbind();
    }
}

/// Escape pressed.
pub fn is_escape(event: &WindowEvent) -> bool {
    matches!(
        event,
        WindowEvent::KeyboardInput {
            event: KeyEvent {
                logical_key: Key::Named(NamedKey::Escape),
                state: ElementState::Pressed,
                ..
            },
            ..
        }
    )
}
