use std::rc::Rc;

use super::backend::GlBackend;
use super::error::{GlError, GlResult};
use super::shader::Shader;

/// Scalar/vector/matrix members supported in a uniform block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UboFieldKind {
    Float,
    Vec2,
    Vec3,
    Vec4,
    Mat4,
}

impl UboFieldKind {
    /// Number of `f32`s a caller writes for this field.
    pub const fn floats(self) -> usize {
        match self {
            Self::Float => 1,
            Self::Vec2 => 2,
            Self::Vec3 => 3,
            Self::Vec4 => 4,
            Self::Mat4 => 16,
        }
    }

    /// std140 base alignment in bytes.
    const fn align(self) -> usize {
        match self {
            Self::Float => 4,
            Self::Vec2 => 8,
            Self::Vec3 | Self::Vec4 | Self::Mat4 => 16,
        }
    }
}

/// Uniform block layout, either named fields or an opaque float block.
#[derive(Debug, Clone, PartialEq)]
pub enum UboConfig {
    Fields(Vec<(String, UboFieldKind)>),
    Raw(Vec<f32>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UboField {
    pub name: String,
    pub kind: UboFieldKind,
    /// Byte offset inside the block.
    pub offset: usize,
}

/// Computes std140 offsets for `fields` and the total block size
/// (rounded up to a multiple of 16).
pub fn std140_layout(fields: &[(String, UboFieldKind)]) -> (Vec<UboField>, usize) {
    let mut offset = 0usize;
    let mut out = Vec::with_capacity(fields.len());

    for (name, kind) in fields {
        offset = offset.next_multiple_of(kind.align());
        out.push(UboField { name: name.clone(), kind: *kind, offset });
        offset += kind.floats() * 4;
    }

    (out, offset.next_multiple_of(16))
}

/// A uniform buffer backing one named uniform block.
pub struct Ubo<B: GlBackend> {
    gl: Rc<B>,
    buffer: B::Buffer,
    block_name: String,
    fields: Vec<UboField>,
    size: usize,
}

impl<B: GlBackend> Ubo<B> {
    /// Allocates the buffer (zeroed for `Fields`, initialized for `Raw`).
    pub fn new(gl: Rc<B>, block_name: impl Into<String>, config: &UboConfig) -> GlResult<Self> {
        let (fields, initial) = match config {
            UboConfig::Fields(fields) => {
                let (fields, size) = std140_layout(fields);
                (fields, vec![0u8; size])
            }
            UboConfig::Raw(data) => (Vec::new(), bytemuck::cast_slice(data).to_vec()),
        };

        let buffer = gl
            .create_buffer()
            .map_err(|e| GlError::alloc("uniform buffer", e))?;

        gl.bind_buffer(glow::UNIFORM_BUFFER, Some(buffer));
        gl.buffer_data(glow::UNIFORM_BUFFER, &initial, glow::DYNAMIC_DRAW);
        gl.bind_buffer(glow::UNIFORM_BUFFER, None);

        Ok(Self {
            gl,
            buffer,
            block_name: block_name.into(),
            fields,
            size: initial.len(),
        })
    }

    pub fn handle(&self) -> B::Buffer {
        self.buffer
    }

    pub fn block_name(&self) -> &str {
        &self.block_name
    }

    pub fn fields(&self) -> &[UboField] {
        &self.fields
    }

    /// Block size in bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn bind(&self) {
        self.gl.bind_buffer(glow::UNIFORM_BUFFER, Some(self.buffer));
    }

    pub fn unbind(&self) {
        self.gl.bind_buffer(glow::UNIFORM_BUFFER, None);
    }

    /// Writes one named field. `data` must hold exactly the field's floats.
    pub fn set(&self, name: &str, data: &[f32]) -> GlResult<()> {
        let field = self
            .fields
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| GlError::UboField {
                name: name.to_string(),
                reason: "no such field".to_string(),
            })?;

        if data.len() != field.kind.floats() {
            return Err(GlError::UboField {
                name: name.to_string(),
                reason: format!("expected {} floats, got {}", field.kind.floats(), data.len()),
            });
        }

        self.bind();
        self.gl.buffer_sub_data(
            glow::UNIFORM_BUFFER,
            field.offset as i32,
            bytemuck::cast_slice(data),
        );
        self.unbind();
        Ok(())
    }

    /// Overwrites raw block contents starting at `offset` bytes.
    pub fn set_raw(&self, data: &[f32], offset: usize) {
        self.bind();
        self.gl
            .buffer_sub_data(glow::UNIFORM_BUFFER, offset as i32, bytemuck::cast_slice(data));
        self.unbind();
    }

    /// Connects this buffer to `shader`'s block of the same name through
    /// binding point `binding`.
    pub fn bind_to(&self, shader: &Shader<B>, binding: u32) -> GlResult<()> {
        let program = shader.handle();
        let index = self
            .gl
            .uniform_block_index(program, &self.block_name)
            .ok_or_else(|| GlError::UniformBlock { name: self.block_name.clone() })?;

        self.gl.uniform_block_binding(program, index, binding);
        self.gl
            .bind_buffer_base(glow::UNIFORM_BUFFER, binding, Some(self.buffer));
        Ok(())
    }
}

impl<B: GlBackend> Drop for Ubo<B> {
    fn drop(&mut self) {
        self.gl.delete_buffer(self.buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gl::recording::{Call, RecordingBackend};

    fn fields(list: &[(&str, UboFieldKind)]) -> Vec<(String, UboFieldKind)> {
        list.iter().map(|(n, k)| (n.to_string(), *k)).collect()
    }

    #[test]
    fn std140_offsets() {
        use UboFieldKind::*;
        let (layout, size) = std140_layout(&fields(&[
            ("time", Float),
            ("resolution", Vec2),
            ("camera", Vec3),
            ("exposure", Float),
            ("view", Mat4),
        ]));

        let offsets: Vec<usize> = layout.iter().map(|f| f.offset).collect();
        // float@0, vec2 aligned to 8, vec3 aligned to 16, float packs after vec3
        assert_eq!(offsets, vec![0, 8, 16, 28, 32]);
        assert_eq!(size, 96);
    }

    #[test]
    fn set_writes_at_field_offset() {
        let gl = Rc::new(RecordingBackend::default());
        let cfg = UboConfig::Fields(fields(&[("time", UboFieldKind::Float), ("tint", UboFieldKind::Vec4)]));
        let ubo = Ubo::new(gl.clone(), "Frame", &cfg).unwrap();
        assert_eq!(ubo.size(), 32);
        gl.clear_calls();

        ubo.set("tint", &[1.0, 0.5, 0.25, 1.0]).unwrap();
        let expected: Vec<u8> = [1.0f32, 0.5, 0.25, 1.0].iter().flat_map(|f| f.to_ne_bytes()).collect();
        assert!(gl.calls().contains(&Call::BufferSubData(glow::UNIFORM_BUFFER, 16, expected)));
    }

    #[test]
    fn set_rejects_unknown_field_and_bad_length() {
        let gl = Rc::new(RecordingBackend::default());
        let cfg = UboConfig::Fields(fields(&[("time", UboFieldKind::Float)]));
        let ubo = Ubo::new(gl, "Frame", &cfg).unwrap();

        assert!(matches!(ubo.set("nope", &[0.0]), Err(GlError::UboField { .. })));
        assert!(matches!(ubo.set("time", &[0.0, 1.0]), Err(GlError::UboField { .. })));
    }

    #[test]
    fn raw_block_uploads_initial_data() {
        let gl = Rc::new(RecordingBackend::default());
        let ubo = Ubo::new(gl.clone(), "Raw", &UboConfig::Raw(vec![2.0; 4])).unwrap();
        assert_eq!(ubo.size(), 16);
        assert!(ubo.fields().is_empty());
    }

    #[test]
    fn bind_to_resolves_block_by_name() {
        let gl = Rc::new(RecordingBackend::default());
        gl.uniform_blocks.borrow_mut().extend(["Other".to_string(), "Frame".to_string()]);
        let shader = Shader::new(gl.clone(), "vs", "fs").unwrap();
        let ubo = Ubo::new(gl.clone(), "Frame", &UboConfig::Raw(vec![0.0; 4])).unwrap();
        gl.clear_calls();

        ubo.bind_to(&shader, 2).unwrap();
        assert_eq!(
            gl.calls(),
            vec![
                Call::UniformBlockBinding(shader.handle(), 1, 2),
                Call::BindBufferBase(glow::UNIFORM_BUFFER, 2, Some(ubo.handle())),
            ]
        );
    }

    #[test]
    fn bind_to_missing_block_fails() {
        let gl = Rc::new(RecordingBackend::default());
        let shader = Shader::new(gl.clone(), "vs", "fs").unwrap();
        let ubo = Ubo::new(gl, "Frame", &UboConfig::Raw(vec![0.0; 4])).unwrap();
        assert!(matches!(ubo.bind_to(&shader, 0), Err(GlError::UniformBlock { .. })));
    }
}
