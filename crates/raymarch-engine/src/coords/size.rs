/// Drawable surface size in physical pixels.
///
/// Used for the facade's stored canvas size, texture storage and framebuffer
/// attachments. No clamping is applied anywhere; a zero-sized surface is a
/// valid value (minimized window).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width and height as `f32`, the layout shaders expect for `u_resolution`.
    #[inline]
    pub fn as_vec2(self) -> glam::Vec2 {
        glam::Vec2::new(self.width as f32, self.height as f32)
    }

    /// Width and height as GL `GLsizei` values.
    #[inline]
    pub(crate) fn as_gl(self) -> (i32, i32) {
        (self.width as i32, self.height as i32)
    }
}

impl From<(u32, u32)> for SurfaceSize {
    #[inline]
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for SurfaceSize {
    #[inline]
    fn from(size: winit::dpi::PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dimension_is_empty() {
        assert!(SurfaceSize::new(0, 10).is_empty());
        assert!(SurfaceSize::new(10, 0).is_empty());
        assert!(!SurfaceSize::new(1, 1).is_empty());
    }

    #[test]
    fn converts_from_physical_size() {
        let s: SurfaceSize = winit::dpi::PhysicalSize::new(1920u32, 1080u32).into();
        assert_eq!(s, SurfaceSize::new(1920, 1080));
        assert_eq!(s.as_vec2(), glam::Vec2::new(1920.0, 1080.0));
    }
}
