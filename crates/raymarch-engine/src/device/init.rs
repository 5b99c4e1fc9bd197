/// Initialization parameters for the GL context and its default framebuffer.
///
/// These are requests; the display may hand back a config with more bits or
/// samples than asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlInit {
    pub depth_bits: u8,
    pub stencil_bits: u8,

    /// MSAA samples on the default framebuffer. `0` disables multisampling.
    pub samples: u8,
}

impl Default for GlInit {
    fn default() -> Self {
        Self {
            depth_bits: 24,
            stencil_bits: 8,
            samples: 0,
        }
    }
}
