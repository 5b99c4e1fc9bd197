use std::num::NonZeroU32;

use anyhow::{anyhow, Context, Result};
use glutin::config::{Config, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, NotCurrentGlContext, PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface as _, Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

use crate::coords::SurfaceSize;

use super::init::GlInit;

/// A window plus the GL context and surface drawing into it.
///
/// The context is current on the thread that created it for as long as this
/// value lives.
pub struct GlSurface {
    // Drop order: surface and context go before the window they point at.
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    window: Window,
}

impl GlSurface {
    /// Creates the window, picks a framebuffer config and makes a context current.
    ///
    /// Returns the surface together with a `glow` context loaded from it.
    pub fn new(
        event_loop: &ActiveEventLoop,
        attrs: WindowAttributes,
        init: GlInit,
        vsync: bool,
    ) -> Result<(Self, glow::Context)> {
        let mut template = ConfigTemplateBuilder::new()
            .with_depth_size(init.depth_bits)
            .with_stencil_size(init.stencil_bits);
        if init.samples > 0 {
            template = template.with_multisampling(init.samples);
        }

        let (window, config) = DisplayBuilder::new()
            .with_window_attributes(Some(attrs.clone()))
            .build(event_loop, template, pick_config)
            .map_err(|e| anyhow!("failed to create GL display: {e}"))?;

        let window = match window {
            Some(window) => window,
            None => glutin_winit::finalize_window(event_loop, attrs, &config)
                .context("failed to create window")?,
        };

        log::info!(
            "GL config: {} samples, depth {}, stencil {}",
            config.num_samples(),
            config.depth_size(),
            config.stencil_size()
        );

        let raw_handle = window
            .window_handle()
            .ok()
            .map(|handle| handle.as_raw());
        let display = config.display();

        let desktop = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .build(raw_handle);
        let gles = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::Gles(Some(Version::new(3, 0))))
            .build(raw_handle);

        let not_current = unsafe {
            display
                .create_context(&config, &desktop)
                .or_else(|_| display.create_context(&config, &gles))
        }
        .context("failed to create GL context")?;

        let surface_attrs = window
            .build_surface_attributes(Default::default())
            .context("failed to describe window surface")?;
        let surface = unsafe { display.create_window_surface(&config, &surface_attrs) }
            .context("failed to create window surface")?;

        let context = not_current
            .make_current(&surface)
            .context("failed to make GL context current")?;

        let interval = if vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = surface.set_swap_interval(&context, interval) {
            log::warn!("could not set swap interval: {e}");
        }

        let gl = unsafe { glow::Context::from_loader_function_cstr(|s| display.get_proc_address(s)) };

        Ok((Self { surface, context, window }, gl))
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn size(&self) -> SurfaceSize {
        self.window.inner_size().into()
    }

    /// Resizes the drawable. Zero-sized requests (minimized window) are ignored.
    pub fn resize(&self, size: SurfaceSize) {
        let (Some(w), Some(h)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
            return;
        };
        self.surface.resize(&self.context, w, h);
    }

    /// Presents the back buffer.
    pub fn swap_buffers(&self) -> Result<()> {
        self.window.pre_present_notify();
        self.surface
            .swap_buffers(&self.context)
            .context("failed to swap buffers")
    }
}

/// Prefers the config with the most samples.
fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    configs
        .reduce(|best, c| if c.num_samples() > best.num_samples() { c } else { best })
        .expect("display reported no GL configs")
}
