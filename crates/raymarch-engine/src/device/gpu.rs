use std::rc::Rc;

use glam::Vec3;

use crate::coords::SurfaceSize;
use crate::gl::{
    FrameBuffer, GlBackend, GlResult, IndexBuffer, IndexBufferConfig, Shader, Texture,
    TextureConfig, TextureCubeMap, Ubo, UboConfig, VertexArray, VertexArrayConfig, VertexBuffer,
    VertexBufferConfig,
};
use crate::loader::{DecodedImage, ImageLoader};

use super::events::{SurfaceEvent, SurfaceEvents};

/// Buffers cleared by [`Gpu::clear`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ClearOption {
    Color,
    Depth,
    Stencil,
}

impl ClearOption {
    fn bit(self) -> u32 {
        match self {
            Self::Color => glow::COLOR_BUFFER_BIT,
            Self::Depth => glow::DEPTH_BUFFER_BIT,
            Self::Stencil => glow::STENCIL_BUFFER_BIT,
        }
    }
}

/// Fixed-function state toggled by [`Gpu::enable`] / [`Gpu::disable`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Capability {
    CullFace,
    Depth,
    Blend,
    /// Alpha-to-coverage style sample masking.
    Multisample,
}

impl Capability {
    fn cap(self) -> u32 {
        match self {
            Self::CullFace => glow::CULL_FACE,
            Self::Depth => glow::DEPTH_TEST,
            Self::Blend => glow::BLEND,
            Self::Multisample => glow::SAMPLE_COVERAGE,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Face {
    Front,
    Back,
    FrontAndBack,
}

impl Face {
    fn gl(self) -> u32 {
        match self {
            Self::Front => glow::FRONT,
            Self::Back => glow::BACK,
            Self::FrontAndBack => glow::FRONT_AND_BACK,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DrawMode {
    Points,
    Lines,
    Triangles,
}

impl DrawMode {
    fn gl(self) -> u32 {
        match self {
            Self::Points => glow::POINTS,
            Self::Lines => glow::LINES,
            Self::Triangles => glow::TRIANGLES,
        }
    }
}

/// Graphics context facade.
///
/// Owns the backend handle, tracks the drawable size and builds every
/// resource wrapper. Resize notifications arrive through an explicit
/// [`SurfaceEvents`] subscription and are applied by
/// [`process_events`](Self::process_events) while full-screen mode is on.
/// The latest surface size is remembered either way, so switching
/// full-screen on snaps to it immediately.
pub struct Gpu<B: GlBackend> {
    gl: Rc<B>,
    size: SurfaceSize,
    surface_size: SurfaceSize,
    full_screen: bool,
    events: SurfaceEvents,
}

impl<B: GlBackend> Gpu<B> {
    /// Wraps `backend` and sets the viewport to `initial_size`.
    pub fn new(backend: Rc<B>, initial_size: SurfaceSize, events: SurfaceEvents) -> Self {
        let gpu = Self {
            gl: backend,
            size: initial_size,
            surface_size: initial_size,
            full_screen: false,
            events,
        };
        gpu.viewport(0, 0, initial_size);
        gpu
    }

    /// Backend shared by every resource this facade creates.
    pub fn gl(&self) -> &Rc<B> {
        &self.gl
    }

    /// Current drawable size in physical pixels.
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn full_screen(&self) -> bool {
        self.full_screen
    }

    /// When on, surface resizes are followed by [`process_events`](Self::process_events).
    ///
    /// Turning it on drains pending events and resizes to the last known
    /// surface size right away.
    pub fn set_full_screen(&mut self, on: bool) {
        self.full_screen = on;
        if on {
            self.process_events();
            if self.size != self.surface_size {
                self.resize(self.surface_size);
            }
        }
    }

    /// Stores `size` as-is and matches the viewport to it.
    pub fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
        self.viewport(0, 0, size);
        log::debug!("surface resized to {}x{}", size.width, size.height);
    }

    /// Applies queued surface events. Returns whether the size changed.
    ///
    /// Events are consumed even when full-screen mode is off; the surface
    /// size they carry is kept for [`set_full_screen`](Self::set_full_screen).
    pub fn process_events(&mut self) -> bool {
        let before = self.size;
        for event in self.events.drain() {
            match event {
                SurfaceEvent::Resized(size) => {
                    self.surface_size = size;
                    if self.full_screen {
                        self.resize(size);
                    }
                }
            }
        }
        self.size != before
    }

    // ---- state ----

    /// Clears the selected buffers. An empty selection issues no call.
    pub fn clear(&self, options: &[ClearOption]) {
        let mask = options.iter().fold(0, |m, o| m | o.bit());
        if mask != 0 {
            self.gl.clear(mask);
        }
    }

    pub fn enable(&self, caps: &[Capability]) {
        for cap in caps {
            self.gl.enable(cap.cap());
            if *cap == Capability::Multisample {
                self.gl.sample_coverage(0.5, false);
            }
        }
    }

    pub fn disable(&self, caps: &[Capability]) {
        for cap in caps {
            self.gl.disable(cap.cap());
        }
    }

    pub fn clear_color(&self, rgb: Vec3, alpha: f32) {
        self.gl.clear_color(rgb.x, rgb.y, rgb.z, alpha);
    }

    pub fn viewport(&self, x: i32, y: i32, size: SurfaceSize) {
        let (w, h) = size.as_gl();
        self.gl.viewport(x, y, w, h);
    }

    /// `src` / `dst` are GL blend factors (`glow::SRC_ALPHA`, ...).
    pub fn blend_func(&self, src: u32, dst: u32) {
        self.gl.blend_func(src, dst);
    }

    pub fn cull_face(&self, face: Face) {
        self.gl.cull_face(face.gl());
    }

    pub fn depth_mask(&self, write: bool) {
        self.gl.depth_mask(write);
    }

    // ---- draw ----

    pub fn draw_arrays(&self, count: usize, mode: DrawMode) {
        self.gl.draw_arrays(mode.gl(), 0, count as i32);
    }

    /// Draws `count` `u16` indices from the bound index buffer.
    pub fn draw_elements(&self, count: usize, mode: DrawMode) {
        self.gl
            .draw_elements(mode.gl(), count as i32, glow::UNSIGNED_SHORT, 0);
    }

    pub fn draw_buffers(&self, buffers: &[u32]) {
        self.gl.draw_buffers(buffers);
    }

    /// Reads back an RGBA8 block from the bound read framebuffer.
    pub fn read_pixels(&self, x: i32, y: i32, size: SurfaceSize) -> Vec<u8> {
        let (w, h) = size.as_gl();
        let mut pixels = vec![0u8; size.width as usize * size.height as usize * 4];
        self.gl
            .read_pixels(x, y, w, h, glow::RGBA, glow::UNSIGNED_BYTE, &mut pixels);
        pixels
    }

    // ---- factories ----

    pub fn create_shader(&self, vertex: &str, fragment: &str) -> GlResult<Shader<B>> {
        Shader::new(self.gl.clone(), vertex, fragment)
    }

    pub fn create_vertex_buffer(
        &self,
        config: &VertexBufferConfig,
        usage: u32,
    ) -> GlResult<VertexBuffer<B>> {
        VertexBuffer::new(self.gl.clone(), config, usage)
    }

    pub fn create_index_buffer(&self, config: &IndexBufferConfig) -> GlResult<IndexBuffer<B>> {
        IndexBuffer::new(self.gl.clone(), config)
    }

    pub fn create_vertex_array(&self, config: &VertexArrayConfig) -> GlResult<VertexArray<B>> {
        VertexArray::new(self.gl.clone(), config)
    }

    pub fn create_texture(&self, image: &DecodedImage, config: TextureConfig) -> GlResult<Texture<B>> {
        Texture::from_image(self.gl.clone(), image, config)
    }

    pub fn create_empty_texture(
        &self,
        size: SurfaceSize,
        config: TextureConfig,
    ) -> GlResult<Texture<B>> {
        Texture::empty(self.gl.clone(), size, config)
    }

    pub fn create_cube_map_from_images(
        &self,
        faces: &[DecodedImage],
    ) -> GlResult<TextureCubeMap<B>> {
        TextureCubeMap::from_images(self.gl.clone(), faces)
    }

    /// Loads six faces (+X, -X, +Y, -Y, +Z, -Z) and builds a cube map.
    pub async fn create_cube_map_from_paths<L>(
        &self,
        loader: &L,
        paths: &[&str],
    ) -> GlResult<TextureCubeMap<B>>
    where
        L: ImageLoader + ?Sized,
    {
        TextureCubeMap::from_files(self.gl.clone(), loader, paths).await
    }

    pub async fn load_texture<L>(
        &self,
        loader: &L,
        path: &str,
        config: TextureConfig,
    ) -> GlResult<Texture<B>>
    where
        L: ImageLoader + ?Sized,
    {
        let image = loader.load(path).await?;
        self.create_texture(&image, config)
    }

    pub fn create_ubo(&self, block_name: &str, config: &UboConfig) -> GlResult<Ubo<B>> {
        Ubo::new(self.gl.clone(), block_name, config)
    }

    /// New framebuffer whose attachments bind from texture unit `tex_offset`.
    pub fn create_frame_buffer(&self, tex_offset: u32) -> GlResult<FrameBuffer<B>> {
        FrameBuffer::new(self.gl.clone(), tex_offset)
    }
}
