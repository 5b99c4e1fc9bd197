//! A `GlBackend` that records every call instead of talking to a driver.

use std::cell::{Cell, RefCell};

use super::backend::{ActiveUniform, GlBackend};

/// One recorded backend call. Handles are plain ids.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateBuffer(u32),
    DeleteBuffer(u32),
    BindBuffer(u32, Option<u32>),
    BindBufferBase(u32, u32, Option<u32>),
    BufferData(u32, Vec<u8>, u32),
    BufferSubData(u32, i32, Vec<u8>),
    CreateTexture(u32),
    DeleteTexture(u32),
    ActiveTexture(u32),
    BindTexture(u32, Option<u32>),
    TexParameter(u32, u32, i32),
    PixelStore(u32, i32),
    TexImage2d {
        target: u32,
        internal_format: i32,
        width: i32,
        height: i32,
        format: u32,
        ty: u32,
        pixels: Option<Vec<u8>>,
    },
    GenerateMipmap(u32),
    CreateFramebuffer(u32),
    DeleteFramebuffer(u32),
    BindFramebuffer(u32, Option<u32>),
    FramebufferTexture2d(u32, u32, u32, Option<u32>),
    CheckFramebufferStatus(u32),
    DrawBuffers(Vec<u32>),
    CreateVertexArray(u32),
    DeleteVertexArray(u32),
    BindVertexArray(Option<u32>),
    EnableVertexAttribArray(u32),
    VertexAttribPointer(u32, i32, u32, bool),
    CreateShader(u32, u32),
    DeleteShader(u32),
    CompileShader(u32),
    CreateProgram(u32),
    DeleteProgram(u32),
    AttachShader(u32, u32),
    DetachShader(u32, u32),
    LinkProgram(u32),
    UseProgram(Option<u32>),
    UniformBlockBinding(u32, u32, u32),
    UniformF32(String, Vec<f32>),
    UniformI32(String, Vec<i32>),
    UniformMatrix(String, u32, Vec<f32>),
    Clear(u32),
    ClearColor([f32; 4]),
    Enable(u32),
    Disable(u32),
    SampleCoverage(f32, bool),
    Viewport(i32, i32, i32, i32),
    BlendFunc(u32, u32),
    CullFace(u32),
    DepthMask(bool),
    DrawArrays(u32, i32, i32),
    DrawElements(u32, i32, u32, i32),
    ReadPixels(i32, i32, i32, i32),
}

#[derive(Debug)]
pub struct RecordingBackend {
    calls: RefCell<Vec<Call>>,
    next_id: Cell<u32>,
    pub framebuffer_status: Cell<u32>,
    pub fail_allocations: Cell<bool>,
    pub compile_ok: Cell<bool>,
    pub link_ok: Cell<bool>,
    pub uniforms: RefCell<Vec<ActiveUniform>>,
    pub uniform_blocks: RefCell<Vec<String>>,
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
            framebuffer_status: Cell::new(glow::FRAMEBUFFER_COMPLETE),
            fail_allocations: Cell::new(false),
            compile_ok: Cell::new(true),
            link_ok: Cell::new(true),
            uniforms: RefCell::new(Vec::new()),
            uniform_blocks: RefCell::new(Vec::new()),
        }
    }
}

impl RecordingBackend {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn with_uniform(self, name: &str, utype: u32) -> Self {
        self.uniforms.borrow_mut().push(ActiveUniform {
            name: name.to_string(),
            utype,
            size: 1,
        });
        self
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn alloc(&self, make: impl FnOnce(u32) -> Call) -> Result<u32, String> {
        if self.fail_allocations.get() {
            return Err("out of handles".to_string());
        }
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.record(make(id));
        Ok(id)
    }
}

impl GlBackend for RecordingBackend {
    type Buffer = u32;
    type Texture = u32;
    type Framebuffer = u32;
    type VertexArray = u32;
    type Shader = u32;
    type Program = u32;
    type UniformLocation = String;

    fn create_buffer(&self) -> Result<u32, String> {
        self.alloc(Call::CreateBuffer)
    }

    fn delete_buffer(&self, buffer: u32) {
        self.record(Call::DeleteBuffer(buffer));
    }

    fn bind_buffer(&self, target: u32, buffer: Option<u32>) {
        self.record(Call::BindBuffer(target, buffer));
    }

    fn bind_buffer_base(&self, target: u32, index: u32, buffer: Option<u32>) {
        self.record(Call::BindBufferBase(target, index, buffer));
    }

    fn buffer_data(&self, target: u32, data: &[u8], usage: u32) {
        self.record(Call::BufferData(target, data.to_vec(), usage));
    }

    fn buffer_sub_data(&self, target: u32, offset: i32, data: &[u8]) {
        self.record(Call::BufferSubData(target, offset, data.to_vec()));
    }

    fn create_texture(&self) -> Result<u32, String> {
        self.alloc(Call::CreateTexture)
    }

    fn delete_texture(&self, texture: u32) {
        self.record(Call::DeleteTexture(texture));
    }

    fn active_texture(&self, unit: u32) {
        self.record(Call::ActiveTexture(unit));
    }

    fn bind_texture(&self, target: u32, texture: Option<u32>) {
        self.record(Call::BindTexture(target, texture));
    }

    fn tex_parameter_i32(&self, target: u32, parameter: u32, value: i32) {
        self.record(Call::TexParameter(target, parameter, value));
    }

    fn pixel_store_i32(&self, parameter: u32, value: i32) {
        self.record(Call::PixelStore(parameter, value));
    }

    fn tex_image_2d(
        &self,
        target: u32,
        _level: i32,
        internal_format: i32,
        width: i32,
        height: i32,
        format: u32,
        ty: u32,
        pixels: Option<&[u8]>,
    ) {
        self.record(Call::TexImage2d {
            target,
            internal_format,
            width,
            height,
            format,
            ty,
            pixels: pixels.map(<[u8]>::to_vec),
        });
    }

    fn generate_mipmap(&self, target: u32) {
        self.record(Call::GenerateMipmap(target));
    }

    fn create_framebuffer(&self) -> Result<u32, String> {
        self.alloc(Call::CreateFramebuffer)
    }

    fn delete_framebuffer(&self, framebuffer: u32) {
        self.record(Call::DeleteFramebuffer(framebuffer));
    }

    fn bind_framebuffer(&self, target: u32, framebuffer: Option<u32>) {
        self.record(Call::BindFramebuffer(target, framebuffer));
    }

    fn framebuffer_texture_2d(
        &self,
        target: u32,
        attachment: u32,
        texture_target: u32,
        texture: Option<u32>,
        _level: i32,
    ) {
        self.record(Call::FramebufferTexture2d(target, attachment, texture_target, texture));
    }

    fn check_framebuffer_status(&self, target: u32) -> u32 {
        self.record(Call::CheckFramebufferStatus(target));
        self.framebuffer_status.get()
    }

    fn draw_buffers(&self, buffers: &[u32]) {
        self.record(Call::DrawBuffers(buffers.to_vec()));
    }

    fn create_vertex_array(&self) -> Result<u32, String> {
        self.alloc(Call::CreateVertexArray)
    }

    fn delete_vertex_array(&self, vertex_array: u32) {
        self.record(Call::DeleteVertexArray(vertex_array));
    }

    fn bind_vertex_array(&self, vertex_array: Option<u32>) {
        self.record(Call::BindVertexArray(vertex_array));
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(Call::EnableVertexAttribArray(index));
    }

    fn vertex_attrib_pointer_f32(
        &self,
        index: u32,
        size: i32,
        ty: u32,
        normalized: bool,
        _stride: i32,
        _offset: i32,
    ) {
        self.record(Call::VertexAttribPointer(index, size, ty, normalized));
    }

    fn create_shader(&self, stage: u32) -> Result<u32, String> {
        self.alloc(|id| Call::CreateShader(stage, id))
    }

    fn delete_shader(&self, shader: u32) {
        self.record(Call::DeleteShader(shader));
    }

    fn shader_source(&self, _shader: u32, _source: &str) {}

    fn compile_shader(&self, shader: u32) {
        self.record(Call::CompileShader(shader));
    }

    fn shader_compile_status(&self, _shader: u32) -> bool {
        self.compile_ok.get()
    }

    fn shader_info_log(&self, _shader: u32) -> String {
        "0:1: syntax error".to_string()
    }

    fn create_program(&self) -> Result<u32, String> {
        self.alloc(Call::CreateProgram)
    }

    fn delete_program(&self, program: u32) {
        self.record(Call::DeleteProgram(program));
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        self.record(Call::AttachShader(program, shader));
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        self.record(Call::DetachShader(program, shader));
    }

    fn link_program(&self, program: u32) {
        self.record(Call::LinkProgram(program));
    }

    fn program_link_status(&self, _program: u32) -> bool {
        self.link_ok.get()
    }

    fn program_info_log(&self, _program: u32) -> String {
        "link failed".to_string()
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(Call::UseProgram(program));
    }

    fn active_uniforms(&self, _program: u32) -> Vec<ActiveUniform> {
        self.uniforms.borrow().clone()
    }

    fn uniform_location(&self, _program: u32, name: &str) -> Option<String> {
        Some(name.to_string())
    }

    fn uniform_block_index(&self, _program: u32, name: &str) -> Option<u32> {
        self.uniform_blocks
            .borrow()
            .iter()
            .position(|b| b == name)
            .map(|i| i as u32)
    }

    fn uniform_block_binding(&self, program: u32, index: u32, binding: u32) {
        self.record(Call::UniformBlockBinding(program, index, binding));
    }

    fn uniform_f32(&self, location: &String, values: &[f32]) {
        self.record(Call::UniformF32(location.clone(), values.to_vec()));
    }

    fn uniform_i32(&self, location: &String, values: &[i32]) {
        self.record(Call::UniformI32(location.clone(), values.to_vec()));
    }

    fn uniform_matrix_f32(&self, location: &String, dim: u32, values: &[f32]) {
        self.record(Call::UniformMatrix(location.clone(), dim, values.to_vec()));
    }

    fn clear(&self, mask: u32) {
        self.record(Call::Clear(mask));
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.record(Call::ClearColor([r, g, b, a]));
    }

    fn enable(&self, capability: u32) {
        self.record(Call::Enable(capability));
    }

    fn disable(&self, capability: u32) {
        self.record(Call::Disable(capability));
    }

    fn sample_coverage(&self, value: f32, invert: bool) {
        self.record(Call::SampleCoverage(value, invert));
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(Call::Viewport(x, y, width, height));
    }

    fn blend_func(&self, src: u32, dst: u32) {
        self.record(Call::BlendFunc(src, dst));
    }

    fn cull_face(&self, face: u32) {
        self.record(Call::CullFace(face));
    }

    fn depth_mask(&self, flag: bool) {
        self.record(Call::DepthMask(flag));
    }

    fn draw_arrays(&self, mode: u32, first: i32, count: i32) {
        self.record(Call::DrawArrays(mode, first, count));
    }

    fn draw_elements(&self, mode: u32, count: i32, element_type: u32, offset: i32) {
        self.record(Call::DrawElements(mode, count, element_type, offset));
    }

    fn read_pixels(
        &self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        _format: u32,
        _ty: u32,
        pixels: &mut [u8],
    ) {
        pixels.fill(0xff);
        self.record(Call::ReadPixels(x, y, width, height));
    }
}
