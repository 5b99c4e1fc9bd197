use std::rc::Rc;

use super::backend::GlBackend;
use super::buffer::{VertexBuffer, VertexBufferConfig};
use super::error::{GlError, GlResult};

#[derive(Debug, Clone, PartialEq)]
pub struct VertexArrayConfig {
    /// Usage hint shared by every buffer.
    pub usage: u32,
    /// Attribute streams; stream `i` feeds attribute location `i`.
    pub buffers: Vec<VertexBufferConfig>,
}

/// A vertex array object composing several attribute streams.
pub struct VertexArray<B: GlBackend> {
    gl: Rc<B>,
    vao: B::VertexArray,
    buffers: Vec<VertexBuffer<B>>,
}

impl<B: GlBackend> VertexArray<B> {
    pub fn new(gl: Rc<B>, config: &VertexArrayConfig) -> GlResult<Self> {
        let vao = gl
            .create_vertex_array()
            .map_err(|e| GlError::alloc("vertex array", e))?;

        gl.bind_vertex_array(Some(vao));

        // Owned by `va` from here on so a failing buffer still releases the VAO.
        let mut va = Self { gl, vao, buffers: Vec::with_capacity(config.buffers.len()) };
        for (location, cfg) in config.buffers.iter().enumerate() {
            let buffer = VertexBuffer::new(va.gl.clone(), cfg, config.usage)?;
            buffer.attach(location as u32);
            va.buffers.push(buffer);
        }

        va.gl.bind_vertex_array(None);
        va.gl.bind_buffer(glow::ARRAY_BUFFER, None);

        Ok(va)
    }

    pub fn bind(&self) {
        self.gl.bind_vertex_array(Some(self.vao));
    }

    pub fn unbind(&self) {
        self.gl.bind_vertex_array(None);
    }

    /// Looks up an attribute stream by name.
    pub fn buffer(&self, name: &str) -> Option<&VertexBuffer<B>> {
        self.buffers.iter().find(|b| b.name() == name)
    }

    pub fn buffers(&self) -> &[VertexBuffer<B>] {
        &self.buffers
    }
}

impl<B: GlBackend> Drop for VertexArray<B> {
    fn drop(&mut self) {
        self.gl.delete_vertex_array(self.vao);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gl::recording::{Call, RecordingBackend};

    fn quad_config() -> VertexArrayConfig {
        VertexArrayConfig {
            usage: glow::STATIC_DRAW,
            buffers: vec![
                VertexBufferConfig::floats("a_positions", 3, vec![0.0; 12]),
                VertexBufferConfig::floats("a_uvs", 2, vec![0.0; 8]),
            ],
        }
    }

    #[test]
    fn attribute_locations_follow_buffer_order() {
        let gl = Rc::new(RecordingBackend::default());
        let _va = VertexArray::new(gl.clone(), &quad_config()).unwrap();

        let pointers: Vec<Call> = gl
            .calls()
            .into_iter()
            .filter(|c| matches!(c, Call::VertexAttribPointer(..)))
            .collect();
        assert_eq!(
            pointers,
            vec![
                Call::VertexAttribPointer(0, 3, glow::FLOAT, false),
                Call::VertexAttribPointer(1, 2, glow::FLOAT, false),
            ]
        );
        assert_eq!(gl.calls().last(), Some(&Call::BindBuffer(glow::ARRAY_BUFFER, None)));
    }

    #[test]
    fn buffers_are_found_by_name() {
        let gl = Rc::new(RecordingBackend::default());
        let va = VertexArray::new(gl, &quad_config()).unwrap();

        assert_eq!(va.buffer("a_uvs").map(|b| b.components()), Some(2));
        assert!(va.buffer("a_normals").is_none());
        assert_eq!(va.buffers().len(), 2);
    }

    #[test]
    fn drop_releases_vao_and_buffers() {
        let gl = Rc::new(RecordingBackend::default());
        let va = VertexArray::new(gl.clone(), &quad_config()).unwrap();
        drop(va);

        let calls = gl.calls();
        assert!(calls.iter().any(|c| matches!(c, Call::DeleteVertexArray(_))));
        assert_eq!(calls.iter().filter(|c| matches!(c, Call::DeleteBuffer(_))).count(), 2);
    }
}
