//! `GlBackend` implementation for `glow::Context`.
//!
//! Every call forwards to the matching `glow::HasContext` method. The glow
//! methods are `unsafe` because they issue raw GL calls; the wrappers in this
//! crate only pass handles they created on the same context, and the context
//! is made current on the calling thread by `device::GlSurface` before any
//! wrapper exists.

use glow::HasContext;

use super::backend::{ActiveUniform, GlBackend};

type Ctx = glow::Context;

impl GlBackend for glow::Context {
    type Buffer = <Ctx as HasContext>::Buffer;
    type Texture = <Ctx as HasContext>::Texture;
    type Framebuffer = <Ctx as HasContext>::Framebuffer;
    type VertexArray = <Ctx as HasContext>::VertexArray;
    type Shader = <Ctx as HasContext>::Shader;
    type Program = <Ctx as HasContext>::Program;
    type UniformLocation = <Ctx as HasContext>::UniformLocation;

    fn create_buffer(&self) -> Result<Self::Buffer, String> {
        unsafe { HasContext::create_buffer(self) }
    }

    fn delete_buffer(&self, buffer: Self::Buffer) {
        unsafe { HasContext::delete_buffer(self, buffer) }
    }

    fn bind_buffer(&self, target: u32, buffer: Option<Self::Buffer>) {
        unsafe { HasContext::bind_buffer(self, target, buffer) }
    }

    fn bind_buffer_base(&self, target: u32, index: u32, buffer: Option<Self::Buffer>) {
        unsafe { HasContext::bind_buffer_base(self, target, index, buffer) }
    }

    fn buffer_data(&self, target: u32, data: &[u8], usage: u32) {
        unsafe { self.buffer_data_u8_slice(target, data, usage) }
    }

    fn buffer_sub_data(&self, target: u32, offset: i32, data: &[u8]) {
        unsafe { self.buffer_sub_data_u8_slice(target, offset, data) }
    }

    fn create_texture(&self) -> Result<Self::Texture, String> {
        unsafe { HasContext::create_texture(self) }
    }

    fn delete_texture(&self, texture: Self::Texture) {
        unsafe { HasContext::delete_texture(self, texture) }
    }

    fn active_texture(&self, unit: u32) {
        unsafe { HasContext::active_texture(self, glow::TEXTURE0 + unit) }
    }

    fn bind_texture(&self, target: u32, texture: Option<Self::Texture>) {
        unsafe { HasContext::bind_texture(self, target, texture) }
    }

    fn tex_parameter_i32(&self, target: u32, parameter: u32, value: i32) {
        unsafe { HasContext::tex_parameter_i32(self, target, parameter, value) }
    }

    fn pixel_store_i32(&self, parameter: u32, value: i32) {
        unsafe { HasContext::pixel_store_i32(self, parameter, value) }
    }

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
    ) {
        unsafe {
            HasContext::tex_image_2d(
                self,
                target,
                level,
                internal_format,
                width,
                height,
                0,
                format,
                ty,
                glow::PixelUnpackData::Slice(pixels),
            )
        }
    }

    fn generate_mipmap(&self, target: u32) {
        unsafe { HasContext::generate_mipmap(self, target) }
    }

    fn create_framebuffer(&self) -> Result<Self::Framebuffer, String> {
        unsafe { HasContext::create_framebuffer(self) }
    }

    fn delete_framebuffer(&self, framebuffer: Self::Framebuffer) {
        unsafe { HasContext::delete_framebuffer(self, framebuffer) }
    }

    fn bind_framebuffer(&self, target: u32, framebuffer: Option<Self::Framebuffer>) {
        unsafe { HasContext::bind_framebuffer(self, target, framebuffer) }
    }

    fn framebuffer_texture_2d(
        &self,
        target: u32,
        attachment: u32,
        texture_target: u32,
        texture: Option<Self::Texture>,
        level: i32,
    ) {
        unsafe {
            HasContext::framebuffer_texture_2d(self, target, attachment, texture_target, texture, level)
        }
    }

    fn check_framebuffer_status(&self, target: u32) -> u32 {
        unsafe { HasContext::check_framebuffer_status(self, target) }
    }

    fn draw_buffers(&self, buffers: &[u32]) {
        unsafe { HasContext::draw_buffers(self, buffers) }
    }

    fn create_vertex_array(&self) -> Result<Self::VertexArray, String> {
        unsafe { HasContext::create_vertex_array(self) }
    }

    fn delete_vertex_array(&self, vertex_array: Self::VertexArray) {
        unsafe { HasContext::delete_vertex_array(self, vertex_array) }
    }

    fn bind_vertex_array(&self, vertex_array: Option<Self::VertexArray>) {
        unsafe { HasContext::bind_vertex_array(self, vertex_array) }
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        unsafe { HasContext::enable_vertex_attrib_array(self, index) }
    }

    fn vertex_attrib_pointer_f32(
        &self,
        index: u32,
        size: i32,
        ty: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        unsafe { HasContext::vertex_attrib_pointer_f32(self, index, size, ty, normalized, stride, offset) }
    }

    fn create_shader(&self, stage: u32) -> Result<Self::Shader, String> {
        unsafe { HasContext::create_shader(self, stage) }
    }

    fn delete_shader(&self, shader: Self::Shader) {
        unsafe { HasContext::delete_shader(self, shader) }
    }

    fn shader_source(&self, shader: Self::Shader, source: &str) {
        unsafe { HasContext::shader_source(self, shader, source) }
    }

    fn compile_shader(&self, shader: Self::Shader) {
        unsafe { HasContext::compile_shader(self, shader) }
    }

    fn shader_compile_status(&self, shader: Self::Shader) -> bool {
        unsafe { self.get_shader_compile_status(shader) }
    }

    fn shader_info_log(&self, shader: Self::Shader) -> String {
        unsafe { self.get_shader_info_log(shader) }
    }

    fn create_program(&self) -> Result<Self::Program, String> {
        unsafe { HasContext::create_program(self) }
    }

    fn delete_program(&self, program: Self::Program) {
        unsafe { HasContext::delete_program(self, program) }
    }

    fn attach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { HasContext::attach_shader(self, program, shader) }
    }

    fn detach_shader(&self, program: Self::Program, shader: Self::Shader) {
        unsafe { HasContext::detach_shader(self, program, shader) }
    }

    fn link_program(&self, program: Self::Program) {
        unsafe { HasContext::link_program(self, program) }
    }

    fn program_link_status(&self, program: Self::Program) -> bool {
        unsafe { self.get_program_link_status(program) }
    }

    fn program_info_log(&self, program: Self::Program) -> String {
        unsafe { self.get_program_info_log(program) }
    }

    fn use_program(&self, program: Option<Self::Program>) {
        unsafe { HasContext::use_program(self, program) }
    }

    fn active_uniforms(&self, program: Self::Program) -> Vec<ActiveUniform> {
        unsafe {
            let count = self.get_active_uniforms(program);
            (0..count)
                .filter_map(|index| self.get_active_uniform(program, index))
                .map(|u| ActiveUniform {
                    name: u.name,
                    utype: u.utype,
                    size: u.size,
                })
                .collect()
        }
    }

    fn uniform_location(&self, program: Self::Program, name: &str) -> Option<Self::UniformLocation> {
        unsafe { self.get_uniform_location(program, name) }
    }

    fn uniform_block_index(&self, program: Self::Program, name: &str) -> Option<u32> {
        unsafe { self.get_uniform_block_index(program, name) }
    }

    fn uniform_block_binding(&self, program: Self::Program, index: u32, binding: u32) {
        unsafe { HasContext::uniform_block_binding(self, program, index, binding) }
    }

    fn uniform_f32(&self, location: &Self::UniformLocation, values: &[f32]) {
        let location = Some(location);
        unsafe {
            match values.len() {
                1 => self.uniform_1_f32_slice(location, values),
                2 => self.uniform_2_f32_slice(location, values),
                3 => self.uniform_3_f32_slice(location, values),
                4 => self.uniform_4_f32_slice(location, values),
                n => log::warn!("uniform_f32: unsupported component count {n}"),
            }
        }
    }

    fn uniform_i32(&self, location: &Self::UniformLocation, values: &[i32]) {
        let location = Some(location);
        unsafe {
            match values.len() {
                1 => self.uniform_1_i32_slice(location, values),
                2 => self.uniform_2_i32_slice(location, values),
                3 => self.uniform_3_i32_slice(location, values),
                4 => self.uniform_4_i32_slice(location, values),
                n => log::warn!("uniform_i32: unsupported component count {n}"),
            }
        }
    }

    fn uniform_matrix_f32(&self, location: &Self::UniformLocation, dim: u32, values: &[f32]) {
        let location = Some(location);
        unsafe {
            match dim {
                3 => self.uniform_matrix_3_f32_slice(location, false, values),
                4 => self.uniform_matrix_4_f32_slice(location, false, values),
                n => log::warn!("uniform_matrix_f32: unsupported dimension {n}"),
            }
        }
    }

    fn clear(&self, mask: u32) {
        unsafe { HasContext::clear(self, mask) }
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        unsafe { HasContext::clear_color(self, r, g, b, a) }
    }

    fn enable(&self, capability: u32) {
        unsafe { HasContext::enable(self, capability) }
    }

    fn disable(&self, capability: u32) {
        unsafe { HasContext::disable(self, capability) }
    }

    fn sample_coverage(&self, value: f32, invert: bool) {
        unsafe { HasContext::sample_coverage(self, value, invert) }
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { HasContext::viewport(self, x, y, width, height) }
    }

    fn blend_func(&self, src: u32, dst: u32) {
        unsafe { HasContext::blend_func(self, src, dst) }
    }

    fn cull_face(&self, face: u32) {
        unsafe { HasContext::cull_face(self, face) }
    }

    fn depth_mask(&self, flag: bool) {
        unsafe { HasContext::depth_mask(self, flag) }
    }

    fn draw_arrays(&self, mode: u32, first: i32, count: i32) {
        unsafe { HasContext::draw_arrays(self, mode, first, count) }
    }

    fn draw_elements(&self, mode: u32, count: i32, element_type: u32, offset: i32) {
        unsafe { HasContext::draw_elements(self, mode, count, element_type, offset) }
    }

    fn read_pixels(
        &self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        format: u32,
        ty: u32,
        pixels: &mut [u8],
    ) {
        unsafe {
            HasContext::read_pixels(
                self,
                x,
                y,
                width,
                height,
                format,
                ty,
                glow::PixelPackData::Slice(Some(pixels)),
            )
        }
    }
}
