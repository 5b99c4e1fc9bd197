use std::rc::Rc;

use super::backend::GlBackend;
use super::error::{GlError, GlResult};

/// Describes one vertex attribute stream.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexBufferConfig {
    /// Attribute name, used for lookup on the owning `VertexArray`.
    pub name: String,
    /// Components per vertex (1..=4).
    pub components: u32,
    pub data: Vec<f32>,
    /// Component type as seen by the shader (`FLOAT`).
    pub ty: u32,
    pub normalized: bool,
}

impl VertexBufferConfig {
    /// A float attribute with `components` components per vertex.
    pub fn floats(name: impl Into<String>, components: u32, data: Vec<f32>) -> Self {
        Self {
            name: name.into(),
            components,
            data,
            ty: glow::FLOAT,
            normalized: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexBufferConfig {
    pub data: Vec<u16>,
    /// `STATIC_DRAW`, `DYNAMIC_DRAW` or `STREAM_DRAW`.
    pub usage: u32,
}

/// One `ARRAY_BUFFER` holding a single attribute stream.
pub struct VertexBuffer<B: GlBackend> {
    gl: Rc<B>,
    buffer: B::Buffer,
    name: String,
    components: u32,
    ty: u32,
    normalized: bool,
    usage: u32,
}

impl<B: GlBackend> VertexBuffer<B> {
    pub fn new(gl: Rc<B>, config: &VertexBufferConfig, usage: u32) -> GlResult<Self> {
        let buffer = gl
            .create_buffer()
            .map_err(|e| GlError::alloc("vertex buffer", e))?;

        gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
        gl.buffer_data(glow::ARRAY_BUFFER, bytemuck::cast_slice(&config.data), usage);

        log::trace!("vertex buffer `{}`: {} floats", config.name, config.data.len());

        Ok(Self {
            gl,
            buffer,
            name: config.name.clone(),
            components: config.components,
            ty: config.ty,
            normalized: config.normalized,
            usage,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn components(&self) -> u32 {
        self.components
    }

    pub fn usage(&self) -> u32 {
        self.usage
    }

    pub fn handle(&self) -> B::Buffer {
        self.buffer
    }

    pub fn bind(&self) {
        self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.buffer));
    }

    pub fn unbind(&self) {
        self.gl.bind_buffer(glow::ARRAY_BUFFER, None);
    }

    /// Overwrites part of the buffer starting at `offset` bytes.
    ///
    /// The buffer is bound as a side effect.
    pub fn set(&self, data: &[f32], offset: usize) {
        self.bind();
        self.gl
            .buffer_sub_data(glow::ARRAY_BUFFER, offset as i32, bytemuck::cast_slice(data));
    }

    /// Points attribute `location` at this buffer (tightly packed).
    pub(crate) fn attach(&self, location: u32) {
        self.bind();
        self.gl.enable_vertex_attrib_array(location);
        self.gl.vertex_attrib_pointer_f32(
            location,
            self.components as i32,
            self.ty,
            self.normalized,
            0,
            0,
        );
    }
}

impl<B: GlBackend> Drop for VertexBuffer<B> {
    fn drop(&mut self) {
        self.gl.delete_buffer(self.buffer);
    }
}

/// One `ELEMENT_ARRAY_BUFFER` of `u16` indices.
pub struct IndexBuffer<B: GlBackend> {
    gl: Rc<B>,
    buffer: B::Buffer,
    count: usize,
    usage: u32,
}

impl<B: GlBackend> IndexBuffer<B> {
    pub fn new(gl: Rc<B>, config: &IndexBufferConfig) -> GlResult<Self> {
        let buffer = gl
            .create_buffer()
            .map_err(|e| GlError::alloc("index buffer", e))?;

        gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(buffer));
        gl.buffer_data(
            glow::ELEMENT_ARRAY_BUFFER,
            bytemuck::cast_slice(&config.data),
            config.usage,
        );

        Ok(Self {
            gl,
            buffer,
            count: config.data.len(),
            usage: config.usage,
        })
    }

    /// Number of indices uploaded at construction.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn usage(&self) -> u32 {
        self.usage
    }

    pub fn bind(&self) {
        self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(self.buffer));
    }

    pub fn unbind(&self) {
        self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);
    }

    /// Overwrites indices starting at `offset` bytes. Does not change `count`.
    pub fn set(&self, data: &[u16], offset: usize) {
        self.bind();
        self.gl.buffer_sub_data(
            glow::ELEMENT_ARRAY_BUFFER,
            offset as i32,
            bytemuck::cast_slice(data),
        );
    }
}

impl<B: GlBackend> Drop for IndexBuffer<B> {
    fn drop(&mut self) {
        self.gl.delete_buffer(self.buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gl::recording::{Call, RecordingBackend};

    #[test]
    fn vertex_buffer_uploads_floats_as_bytes() {
        let gl = Rc::new(RecordingBackend::default());
        let cfg = VertexBufferConfig::floats("a_positions", 2, vec![1.0, 2.0]);
        let vb = VertexBuffer::new(gl.clone(), &cfg, glow::STATIC_DRAW).unwrap();

        let expected: Vec<u8> = [1.0f32, 2.0].iter().flat_map(|f| f.to_ne_bytes()).collect();
        assert!(gl.calls().contains(&Call::BufferData(glow::ARRAY_BUFFER, expected, glow::STATIC_DRAW)));
        assert_eq!(vb.name(), "a_positions");
    }

    #[test]
    fn vertex_buffer_partial_update_uses_byte_offset() {
        let gl = Rc::new(RecordingBackend::default());
        let cfg = VertexBufferConfig::floats("a_uvs", 2, vec![0.0; 8]);
        let vb = VertexBuffer::new(gl.clone(), &cfg, glow::DYNAMIC_DRAW).unwrap();
        gl.clear_calls();

        vb.set(&[0.5], 8);
        assert_eq!(
            gl.calls(),
            vec![
                Call::BindBuffer(glow::ARRAY_BUFFER, Some(vb.handle())),
                Call::BufferSubData(glow::ARRAY_BUFFER, 8, 0.5f32.to_ne_bytes().to_vec()),
            ]
        );
    }

    #[test]
    fn index_buffer_counts_indices() {
        let gl = Rc::new(RecordingBackend::default());
        let cfg = IndexBufferConfig { data: vec![0, 1, 2, 0, 2, 3], usage: glow::STATIC_DRAW };
        let ib = IndexBuffer::new(gl.clone(), &cfg).unwrap();
        assert_eq!(ib.count(), 6);

        ib.set(&[7], 2);
        assert_eq!(ib.count(), 6);
        assert_eq!(
            gl.calls().last(),
            Some(&Call::BufferSubData(glow::ELEMENT_ARRAY_BUFFER, 2, 7u16.to_ne_bytes().to_vec()))
        );
    }

    #[test]
    fn index_buffer_unbind_binds_none() {
        let gl = Rc::new(RecordingBackend::default());
        let cfg = IndexBufferConfig { data: vec![0], usage: glow::STATIC_DRAW };
        let ib = IndexBuffer::new(gl.clone(), &cfg).unwrap();
        ib.unbind();
        assert_eq!(gl.calls().last(), Some(&Call::BindBuffer(glow::ELEMENT_ARRAY_BUFFER, None)));
    }

    #[test]
    fn buffer_allocation_failure() {
        let gl = Rc::new(RecordingBackend::default());
        gl.fail_allocations.set(true);
        let cfg = IndexBufferConfig { data: vec![0], usage: glow::STATIC_DRAW };
        assert!(matches!(
            IndexBuffer::new(gl, &cfg),
            Err(GlError::ResourceAllocation { resource: "index buffer", .. })
        ));
    }
}
