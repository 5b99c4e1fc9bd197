use std::fmt::Debug;

/// A uniform reported by program reflection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveUniform {
    pub name: String,
    /// GL type enum (`FLOAT_VEC2`, `SAMPLER_2D`, ...).
    pub utype: u32,
    /// Array length; 1 for non-array uniforms.
    pub size: i32,
}

/// Immediate-mode graphics context boundary.
///
/// This is the subset of GL / GLES 3 / WebGL2 the resource wrappers need.
/// Enum parameters are raw GL constants (see `glow::*`). Handle types are
/// opaque; `None` in a bind call restores the default binding.
///
/// All calls must happen on the thread that owns the context.
pub trait GlBackend {
    type Buffer: Copy + Debug + PartialEq;
    type Texture: Copy + Debug + PartialEq;
    type Framebuffer: Copy + Debug + PartialEq;
    type VertexArray: Copy + Debug + PartialEq;
    type Shader: Copy + Debug + PartialEq;
    type Program: Copy + Debug + PartialEq;
    type UniformLocation: Clone + Debug;

    // ── buffers ───────────────────────────────────────────────────────────

    fn create_buffer(&self) -> Result<Self::Buffer, String>;
    fn delete_buffer(&self, buffer: Self::Buffer);
    fn bind_buffer(&self, target: u32, buffer: Option<Self::Buffer>);
    fn bind_buffer_base(&self, target: u32, index: u32, buffer: Option<Self::Buffer>);
    fn buffer_data(&self, target: u32, data: &[u8], usage: u32);
    fn buffer_sub_data(&self, target: u32, offset: i32, data: &[u8]);

    // ── textures ──────────────────────────────────────────────────────────

    fn create_texture(&self) -> Result<Self::Texture, String>;
    fn delete_texture(&self, texture: Self::Texture);
    fn active_texture(&self, unit: u32);
    fn bind_texture(&self, target: u32, texture: Option<Self::Texture>);
    fn tex_parameter_i32(&self, target: u32, parameter: u32, value: i32);
    fn pixel_store_i32(&self, parameter: u32, value: i32);
    #[allow(clippy::too_many_arguments)]
    fn tex_image_2d(
        &self,
        target: u32,
        level: i32,
        internal_format: i32,
        width: i32,
        height: i32,
        format: u32,
        ty: u32,
        pixels: Option<&[u8]>,
    );
    fn generate_mipmap(&self, target: u32);

    // ── framebuffers ──────────────────────────────────────────────────────

    fn create_framebuffer(&self) -> Result<Self::Framebuffer, String>;
    fn delete_framebuffer(&self, framebuffer: Self::Framebuffer);
    fn bind_framebuffer(&self, target: u32, framebuffer: Option<Self::Framebuffer>);
    fn framebuffer_texture_2d(
        &self,
        target: u32,
        attachment: u32,
        texture_target: u32,
        texture: Option<Self::Texture>,
        level: i32,
    );
    fn check_framebuffer_status(&self, target: u32) -> u32;
    fn draw_buffers(&self, buffers: &[u32]);

    // ── vertex arrays ─────────────────────────────────────────────────────

    fn create_vertex_array(&self) -> Result<Self::VertexArray, String>;
    fn delete_vertex_array(&self, vertex_array: Self::VertexArray);
    fn bind_vertex_array(&self, vertex_array: Option<Self::VertexArray>);
    fn enable_vertex_attrib_array(&self, index: u32);
    fn vertex_attrib_pointer_f32(
        &self,
        index: u32,
        size: i32,
        ty: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    );

    // ── programs ──────────────────────────────────────────────────────────

    fn create_shader(&self, stage: u32) -> Result<Self::Shader, String>;
    fn delete_shader(&self, shader: Self::Shader);
    fn shader_source(&self, shader: Self::Shader, source: &str);
    fn compile_shader(&self, shader: Self::Shader);
    fn shader_compile_status(&self, shader: Self::Shader) -> bool;
    fn shader_info_log(&self, shader: Self::Shader) -> String;

    fn create_program(&self) -> Result<Self::Program, String>;
    fn delete_program(&self, program: Self::Program);
    fn attach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn detach_shader(&self, program: Self::Program, shader: Self::Shader);
    fn link_program(&self, program: Self::Program);
    fn program_link_status(&self, program: Self::Program) -> bool;
    fn program_info_log(&self, program: Self::Program) -> String;
    fn use_program(&self, program: Option<Self::Program>);

    fn active_uniforms(&self, program: Self::Program) -> Vec<ActiveUniform>;
    fn uniform_location(&self, program: Self::Program, name: &str) -> Option<Self::UniformLocation>;
    fn uniform_block_index(&self, program: Self::Program, name: &str) -> Option<u32>;
    fn uniform_block_binding(&self, program: Self::Program, index: u32, binding: u32);

    fn uniform_f32(&self, location: &Self::UniformLocation, values: &[f32]);
    fn uniform_i32(&self, location: &Self::UniformLocation, values: &[i32]);
    fn uniform_matrix_f32(&self, location: &Self::UniformLocation, dim: u32, values: &[f32]);

    // ── fixed-function state + draws ──────────────────────────────────────

    fn clear(&self, mask: u32);
    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32);
    fn enable(&self, capability: u32);
    fn disable(&self, capability: u32);
    fn sample_coverage(&self, value: f32, invert: bool);
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    fn blend_func(&self, src: u32, dst: u32);
    fn cull_face(&self, face: u32);
    fn depth_mask(&self, flag: bool);
    fn draw_arrays(&self, mode: u32, first: i32, count: i32);
    fn draw_elements(&self, mode: u32, count: i32, element_type: u32, offset: i32);
    #[allow(clippy::too_many_arguments)]
    fn read_pixels(
        &self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        format: u32,
        ty: u32,
        pixels: &mut [u8],
    );
}
