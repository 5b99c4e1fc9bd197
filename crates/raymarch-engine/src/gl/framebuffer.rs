//! Render targets.
//!
//! A [`FrameBuffer`] owns its attachment textures and remembers which texture
//! units they occupy. Units start at the caller-supplied `tex_offset`; color
//! attachment `i` samples from unit `tex_offset + i` and the depth attachment
//! from the unit right after the last color attachment. [`FrameBuffer::offset`]
//! is the first unit past all of them, so several framebuffers can be chained
//! on one context by feeding one's offset into the next one's constructor.
//! Nothing checks that two framebuffers do not overlap.

use std::rc::Rc;

use crate::coords::SurfaceSize;

use super::backend::GlBackend;
use super::error::{GlError, GlResult};
use super::texture::{Texture, TextureConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentKind {
    Color,
    Depth,
    Stencil,
}

/// One render-target request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attachment {
    pub kind: AttachmentKind,
    pub size: SurfaceSize,
}

impl Attachment {
    pub fn color(size: SurfaceSize) -> Self {
        Self { kind: AttachmentKind::Color, size }
    }

    pub fn depth(size: SurfaceSize) -> Self {
        Self { kind: AttachmentKind::Depth, size }
    }

    pub fn stencil(size: SurfaceSize) -> Self {
        Self { kind: AttachmentKind::Stencil, size }
    }
}

const COLOR_STORAGE: TextureConfig = TextureConfig {
    min_filter: glow::NEAREST,
    mag_filter: glow::NEAREST,
    wrap_s: glow::CLAMP_TO_EDGE,
    wrap_t: glow::CLAMP_TO_EDGE,
    flip_y: false,
    internal_format: glow::RGBA16F,
    format: glow::RGBA,
    ty: glow::HALF_FLOAT,
};

const DEPTH_STORAGE: TextureConfig = TextureConfig {
    internal_format: glow::DEPTH_COMPONENT24,
    format: glow::DEPTH_COMPONENT,
    ty: glow::UNSIGNED_INT,
    ..COLOR_STORAGE
};

const STENCIL_STORAGE: TextureConfig = TextureConfig {
    internal_format: glow::DEPTH24_STENCIL8,
    format: glow::DEPTH_STENCIL,
    ty: glow::UNSIGNED_INT_24_8,
    ..COLOR_STORAGE
};

pub struct FrameBuffer<B: GlBackend> {
    gl: Rc<B>,
    framebuffer: B::Framebuffer,
    tex_offset: u32,
    color: Vec<Texture<B>>,
    depth: Option<Texture<B>>,
    stencil: Option<Texture<B>>,
}

impl<B: GlBackend> FrameBuffer<B> {
    pub fn new(gl: Rc<B>, tex_offset: u32) -> GlResult<Self> {
        let framebuffer = gl
            .create_framebuffer()
            .map_err(|e| GlError::alloc("framebuffer", e))?;

        log::debug!("framebuffer {framebuffer:?} created at texture unit offset {tex_offset}");

        Ok(Self {
            gl,
            framebuffer,
            tex_offset,
            color: Vec::new(),
            depth: None,
            stencil: None,
        })
    }

    /// Adds a render target.
    ///
    /// Color targets always append. Depth and stencil targets are created
    /// once; asking again keeps the existing texture. Completeness is
    /// checked after each new texture is attached, and a texture that leaves
    /// the framebuffer incomplete is detached and dropped, so the unit
    /// bookkeeping only ever counts committed attachments.
    pub fn attachment(&mut self, attachment: Attachment) -> GlResult<()> {
        let size = attachment.size;
        match attachment.kind {
            AttachmentKind::Color => {
                let (tex, point) = self.add_color(size)?;
                self.commit(point, tex, |fb, tex| fb.color.push(tex))
            }
            AttachmentKind::Depth if self.depth.is_some() => Ok(()),
            AttachmentKind::Depth => {
                let tex = self.add_single(size, DEPTH_STORAGE, glow::DEPTH_ATTACHMENT)?;
                self.commit(glow::DEPTH_ATTACHMENT, tex, |fb, tex| fb.depth = Some(tex))
            }
            AttachmentKind::Stencil if self.stencil.is_some() => Ok(()),
            AttachmentKind::Stencil => {
                let tex = self.add_single(size, STENCIL_STORAGE, glow::STENCIL_ATTACHMENT)?;
                self.commit(glow::STENCIL_ATTACHMENT, tex, |fb, tex| fb.stencil = Some(tex))
            }
        }
    }

    /// Keeps `tex` if the framebuffer is complete, otherwise detaches it
    /// from `point` and lets it drop.
    fn commit(
        &mut self,
        point: u32,
        tex: Texture<B>,
        keep: impl FnOnce(&mut Self, Texture<B>),
    ) -> GlResult<()> {
        if let Err(e) = self.check_complete() {
            self.gl
                .bind_framebuffer(glow::FRAMEBUFFER, Some(self.framebuffer));
            self.gl
                .framebuffer_texture_2d(glow::FRAMEBUFFER, point, glow::TEXTURE_2D, None, 0);
            self.gl.bind_framebuffer(glow::FRAMEBUFFER, None);
            return Err(e);
        }
        keep(self, tex);
        Ok(())
    }

    fn add_color(&self, size: SurfaceSize) -> GlResult<(Texture<B>, u32)> {
        let count = self.color.len() as u32;
        let tex = Texture::empty(self.gl.clone(), size, COLOR_STORAGE)?;

        tex.bind(count + self.tex_offset);
        self.gl.tex_parameter_i32(
            glow::TEXTURE_2D,
            glow::TEXTURE_COMPARE_FUNC,
            glow::LEQUAL as i32,
        );
        self.gl
            .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_COMPARE_MODE, glow::NONE as i32);

        let point = glow::COLOR_ATTACHMENT0 + 1 + count + self.tex_offset;
        self.attach(point, &tex);
        tex.unbind();

        Ok((tex, point))
    }

    fn add_single(
        &self,
        size: SurfaceSize,
        storage: TextureConfig,
        point: u32,
    ) -> GlResult<Texture<B>> {
        let tex = Texture::empty(self.gl.clone(), size, storage)?;
        self.attach(point, &tex);
        Ok(tex)
    }

    fn attach(&self, point: u32, tex: &Texture<B>) {
        self.gl
            .bind_framebuffer(glow::FRAMEBUFFER, Some(self.framebuffer));
        self.gl.framebuffer_texture_2d(
            glow::FRAMEBUFFER,
            point,
            glow::TEXTURE_2D,
            Some(tex.handle()),
            0,
        );
    }

    fn check_complete(&self) -> GlResult<()> {
        self.gl
            .bind_framebuffer(glow::FRAMEBUFFER, Some(self.framebuffer));
        let status = self.gl.check_framebuffer_status(glow::FRAMEBUFFER);
        self.gl.bind_framebuffer(glow::FRAMEBUFFER, None);

        if status != glow::FRAMEBUFFER_COMPLETE {
            log::error!("framebuffer {:?} incomplete: {status:#x}", self.framebuffer);
            return Err(GlError::IncompleteFramebuffer { status });
        }
        Ok(())
    }

    /// Makes this the render target and rebinds its attachments to their units.
    pub fn bind(&self) {
        self.gl
            .bind_framebuffer(glow::FRAMEBUFFER, Some(self.framebuffer));

        for (i, tex) in self.color.iter().enumerate() {
            tex.bind(self.tex_offset + i as u32);
        }
        if let Some(depth) = &self.depth {
            depth.bind(self.tex_offset + self.color.len() as u32);
        }
    }

    /// Restores the default render target.
    pub fn unbind(&self) {
        self.gl.bind_framebuffer(glow::FRAMEBUFFER, None);
    }

    pub fn unbind_textures(&self) {
        for tex in &self.color {
            tex.unbind();
        }
    }

    /// First texture unit past this framebuffer's attachments.
    pub fn offset(&self) -> u32 {
        self.tex_offset + self.color.len() as u32 + u32::from(self.depth.is_some())
    }

    /// Draw-buffer list: `tex_offset` padding entries, then one entry per
    /// color slot.
    pub fn draw_buffers(&self) -> Vec<u32> {
        let mut out = vec![glow::NONE; self.tex_offset as usize];
        out.extend(
            (0..self.color.len() as u32).map(|i| glow::COLOR_ATTACHMENT0 + self.tex_offset + i),
        );
        if out.is_empty() {
            out.push(glow::NONE);
        }
        out
    }

    pub fn tex_offset(&self) -> u32 {
        self.tex_offset
    }

    pub fn color_textures(&self) -> &[Texture<B>] {
        &self.color
    }

    pub fn depth_texture(&self) -> Option<&Texture<B>> {
        self.depth.as_ref()
    }

    pub fn stencil_texture(&self) -> Option<&Texture<B>> {
        self.stencil.as_ref()
    }

    pub fn handle(&self) -> B::Framebuffer {
        self.framebuffer
    }
}

impl<B: GlBackend> Drop for FrameBuffer<B> {
    fn drop(&mut self) {
        self.gl.delete_framebuffer(self.framebuffer);
    }
}
