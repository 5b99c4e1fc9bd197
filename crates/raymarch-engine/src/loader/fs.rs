use std::path::{Path, PathBuf};

use crate::gl::{GlError, GlResult};

use super::{DecodedImage, ImageLoader};

/// Loads images from the local file system.
///
/// Relative paths resolve against `root` when one is set, otherwise against
/// the process working directory. A leading `//` collapses to `/` so asset
/// paths written for a web server root keep working.
#[derive(Debug, Clone, Default)]
pub struct FsImageLoader {
    root: Option<PathBuf>,
}

impl FsImageLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: Some(root.into()) }
    }

    pub fn resolve(&self, path: &str) -> PathBuf {
        let path = match path.strip_prefix("//") {
            Some(rest) => format!("/{rest}"),
            None => path.to_string(),
        };

        match &self.root {
            Some(root) => root.join(path.trim_start_matches('/')),
            None => PathBuf::from(path),
        }
    }

    fn decode(full: &Path, display: &str) -> GlResult<DecodedImage> {
        let fail = |reason: String| GlError::ImageLoad { path: display.to_string(), reason };

        let bytes = std::fs::read(full).map_err(|e| fail(e.to_string()))?;
        let img = image::load_from_memory(&bytes).map_err(|e| fail(e.to_string()))?;

        log::debug!("decoded {} ({}x{})", full.display(), img.width(), img.height());
        Ok(img.to_rgba8().into())
    }
}

impl ImageLoader for FsImageLoader {
    async fn load(&self, path: &str) -> GlResult<DecodedImage> {
        let full = self.resolve(path);
        Self::decode(&full, path)
    }
}
