use std::rc::Rc;

use crate::loader::{load_cube_map_images, DecodedImage, ImageLoader, CUBE_MAP_FACES};

use super::backend::GlBackend;
use super::error::{GlError, GlResult};

/// A cube map texture built from six faces (+X, -X, +Y, -Y, +Z, -Z).
pub struct TextureCubeMap<B: GlBackend> {
    gl: Rc<B>,
    texture: B::Texture,
}

impl<B: GlBackend> TextureCubeMap<B> {
    /// Loads the six face images through `loader`, then uploads them.
    pub async fn from_files<L>(gl: Rc<B>, loader: &L, paths: &[&str]) -> GlResult<Self>
    where
        L: ImageLoader + ?Sized,
    {
        let images = load_cube_map_images(loader, paths).await?;
        Self::from_images(gl, &images)
    }

    /// Uploads six faces as RGB8 with linear filtering and edge clamping.
    ///
    /// Faces are flipped vertically before upload.
    pub fn from_images(gl: Rc<B>, images: &[DecodedImage]) -> GlResult<Self> {
        if images.len() != CUBE_MAP_FACES {
            return Err(GlError::CubeMapFaces { count: images.len() });
        }
        for image in images {
            image.validate()?;
        }

        let texture = gl
            .create_texture()
            .map_err(|e| GlError::alloc("cube map texture", e))?;

        gl.bind_texture(glow::TEXTURE_CUBE_MAP, Some(texture));
        // RGB rows are not 4-byte aligned for odd widths.
        gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
        for (i, image) in images.iter().enumerate() {
            let face = image.flipped_vertically();
            let (w, h) = face.size().as_gl();
            gl.tex_image_2d(
                glow::TEXTURE_CUBE_MAP_POSITIVE_X + i as u32,
                0,
                glow::RGB8 as i32,
                w,
                h,
                glow::RGB,
                glow::UNSIGNED_BYTE,
                Some(&face.to_rgb()),
            );
        }

        gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 4);

        let target = glow::TEXTURE_CUBE_MAP;
        gl.tex_parameter_i32(target, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
        gl.tex_parameter_i32(target, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);
        gl.tex_parameter_i32(target, glow::TEXTURE_WRAP_S, glow::CLAMP_TO_EDGE as i32);
        gl.tex_parameter_i32(target, glow::TEXTURE_WRAP_T, glow::CLAMP_TO_EDGE as i32);
        gl.tex_parameter_i32(target, glow::TEXTURE_WRAP_R, glow::CLAMP_TO_EDGE as i32);

        log::debug!("cube map {texture:?} uploaded");
        Ok(Self { gl, texture })
    }

    pub fn handle(&self) -> B::Texture {
        self.texture
    }

    pub fn bind(&self, unit: u32) {
        self.gl.active_texture(unit);
        self.gl.bind_texture(glow::TEXTURE_CUBE_MAP, Some(self.texture));
    }

    pub fn unbind(&self) {
        self.gl.bind_texture(glow::TEXTURE_CUBE_MAP, None);
    }
}

impl<B: GlBackend> Drop for TextureCubeMap<B> {
    fn drop(&mut self) {
        self.gl.delete_texture(self.texture);
    }
}
