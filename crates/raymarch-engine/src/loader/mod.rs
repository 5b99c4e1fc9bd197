//! Image loading.
//!
//! The GL layer never touches the file system itself. It asks an
//! [`ImageLoader`] for decoded pixels:
//! - [`FsImageLoader`] reads and decodes files with the `image` crate
//! - tests plug in in-memory loaders
//!
//! Loading is `async` so hosts with a non-blocking source (fetch, asset
//! servers) can implement the trait directly; each future resolves once.

mod fs;
mod decoded;

pub use self::fs::FsImageLoader;
pub use self::decoded::DecodedImage;

use std::future::Future;

use crate::gl::{GlError, GlResult};

/// Cube map face order: +X, -X, +Y, -Y, +Z, -Z.
pub const CUBE_MAP_FACES: usize = 6;

/// Produces exactly one decoded image per path, or an error.
pub trait ImageLoader {
    fn load(&self, path: &str) -> impl Future<Output = GlResult<DecodedImage>>;
}

/// Loads every path in order. The first failure aborts the whole load.
pub async fn load_images<L: ImageLoader + ?Sized>(
    loader: &L,
    paths: &[&str],
) -> GlResult<Vec<DecodedImage>> {
    let mut out = Vec::with_capacity(paths.len());
    for path in paths {
        out.push(loader.load(path).await?);
    }
    Ok(out)
}

/// Loads the six faces of a cube map, preserving face order.
///
/// No partial result is returned: any failing face fails the whole load.
pub async fn load_cube_map_images<L: ImageLoader + ?Sized>(
    loader: &L,
    paths: &[&str],
) -> GlResult<[DecodedImage; CUBE_MAP_FACES]> {
    if paths.len() != CUBE_MAP_FACES {
        return Err(GlError::CubeMapFaces { count: paths.len() });
    }

    let images = load_images(loader, paths).await?;
    images
        .try_into()
        .map_err(|v: Vec<DecodedImage>| GlError::CubeMapFaces { count: v.len() })
}
