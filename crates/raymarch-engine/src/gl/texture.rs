use std::rc::Rc;

use crate::coords::SurfaceSize;
use crate::loader::DecodedImage;

use super::backend::GlBackend;
use super::error::{GlError, GlResult};

/// Sampler + storage configuration for a 2D texture.
///
/// Defaults: nearest filtering, repeat wrapping, RGBA8 storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureConfig {
    pub min_filter: u32,
    pub mag_filter: u32,
    pub wrap_s: u32,
    pub wrap_t: u32,
    /// Flip image rows before upload (image data is stored top row first,
    /// GL samples bottom row first).
    pub flip_y: bool,
    pub internal_format: u32,
    pub format: u32,
    pub ty: u32,
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self {
            min_filter: glow::NEAREST,
            mag_filter: glow::NEAREST,
            wrap_s: glow::REPEAT,
            wrap_t: glow::REPEAT,
            flip_y: false,
            internal_format: glow::RGBA8,
            format: glow::RGBA,
            ty: glow::UNSIGNED_BYTE,
        }
    }
}

/// One 2D texture object.
pub struct Texture<B: GlBackend> {
    gl: Rc<B>,
    texture: B::Texture,
    size: SurfaceSize,
}

impl<B: GlBackend> Texture<B> {
    /// Uploads decoded RGBA8 pixels and generates the mip chain.
    ///
    /// Fails with [`GlError::ImageData`] before touching GL when the pixel
    /// buffer does not match the image dimensions.
    pub fn from_image(gl: Rc<B>, image: &DecodedImage, cfg: TextureConfig) -> GlResult<Self> {
        image.validate()?;
        let texture = Self::allocate(gl, image.size(), &cfg)?;

        let flipped;
        let pixels = if cfg.flip_y {
            flipped = image.flipped_vertically();
            &flipped.pixels
        } else {
            &image.pixels
        };

        let (w, h) = image.size().as_gl();
        texture.gl.tex_image_2d(
            glow::TEXTURE_2D,
            0,
            glow::RGBA8 as i32,
            w,
            h,
            glow::RGBA,
            glow::UNSIGNED_BYTE,
            Some(pixels),
        );
        texture.gl.generate_mipmap(glow::TEXTURE_2D);
        texture.unbind();

        log::debug!("texture {:?} uploaded from {}x{} image", texture.texture, w, h);
        Ok(texture)
    }

    /// Allocates storage of `size` with no pixel data (render targets).
    pub fn empty(gl: Rc<B>, size: SurfaceSize, cfg: TextureConfig) -> GlResult<Self> {
        let texture = Self::allocate(gl, size, &cfg)?;

        let (w, h) = size.as_gl();
        texture.gl.tex_image_2d(
            glow::TEXTURE_2D,
            0,
            cfg.internal_format as i32,
            w,
            h,
            cfg.format,
            cfg.ty,
            None,
        );
        texture.unbind();

        Ok(texture)
    }

    /// Creates the texture object, binds it on unit 0 and applies sampler state.
    ///
    /// The texture is left bound; callers upload storage and unbind.
    fn allocate(gl: Rc<B>, size: SurfaceSize, cfg: &TextureConfig) -> GlResult<Self> {
        let texture = gl
            .create_texture()
            .map_err(|e| GlError::alloc("texture", e))?;

        let texture = Self { gl, texture, size };
        texture.bind(0);

        let gl = &texture.gl;
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, cfg.min_filter as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, cfg.mag_filter as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, cfg.wrap_s as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, cfg.wrap_t as i32);

        Ok(texture)
    }

    pub fn handle(&self) -> B::Texture {
        self.texture
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Makes `unit` the active texture unit and binds this texture to it.
    pub fn bind(&self, unit: u32) {
        self.gl.active_texture(unit);
        self.gl.bind_texture(glow::TEXTURE_2D, Some(self.texture));
    }

    /// Unbinds whatever 2D texture is bound on the active unit.
    pub fn unbind(&self) {
        self.gl.bind_texture(glow::TEXTURE_2D, None);
    }
}

impl<B: GlBackend> Drop for Texture<B> {
    fn drop(&mut self) {
        self.gl.delete_texture(self.texture);
    }
}
