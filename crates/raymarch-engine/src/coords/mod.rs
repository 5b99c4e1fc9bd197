//! Size types shared by the surface, textures and framebuffers.

mod size;

pub use size::SurfaceSize;
