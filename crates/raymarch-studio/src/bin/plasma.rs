//! Animated full-screen fragment shader driven by `u_time` and `u_resolution`.

use anyhow::{Context, Result};
use raymarch_engine::core::{App, AppControl, FrameCtx};
use raymarch_engine::device::{ClearOption, GlInit, Gpu};
use raymarch_engine::gl::{GlResult, Shader};
use raymarch_engine::glow;
use raymarch_engine::logging::{init_logging, LoggingConfig};
use raymarch_engine::window::{Runtime, RuntimeConfig};
use raymarch_studio::{is_escape, FullScreenQuad, QUAD_VERT};
use winit::event::WindowEvent;

const PLASMA_FRAG: &str = include_str!("../../shaders/plasma.frag");

type Gl = glow::Context;

#[derive(Default)]
struct PlasmaApp {
    scene: Option<(Shader<Gl>, FullScreenQuad)>,
    fps: FpsCounter,
}

/// Frames counted over roughly one-second windows.
#[derive(Default)]
struct FpsCounter {
    window_start: f32,
    frames: u32,
}

impl FpsCounter {
    /// Counts a frame at `elapsed` seconds; returns the rate once a window closes.
    fn tick(&mut self, elapsed: f32) -> Option<f32> {
        self.frames += 1;
        let span = elapsed - self.window_start;
        if span < 1.0 {
            return None;
        }
        let fps = self.frames as f32 / span;
        self.window_start = elapsed;
        self.frames = 0;
        Some(fps)
    }
}

impl App for PlasmaApp {
    fn on_start(&mut self, gpu: &mut Gpu<Gl>) -> Result<()> {
        gpu.set_full_screen(true);

        let shader = gpu
            .create_shader(QUAD_VERT, PLASMA_FRAG)
            .context("plasma shader")?;
        let quad = FullScreenQuad::new(gpu).context("quad geometry")?;

        self.scene = Some((shader, quad));
        Ok(())
    }

    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        if is_escape(event) {
            AppControl::Exit
        } else {
            AppControl::Continue
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl {
        let Some((shader, quad)) = &self.scene else {
            return AppControl::Continue;
        };
        let gpu = &*ctx.gpu;

        gpu.clear(&[ClearOption::Color]);

        shader.bind();
        if let Err(e) = set_uniforms(shader, gpu, ctx.time.elapsed) {
            log::error!("{e}");
            return AppControl::Exit;
        }
        quad.draw(gpu);
        shader.unbind();

        if let Some(fps) = self.fps.tick(ctx.time.elapsed) {
            ctx.runtime.set_title(format!("plasma ({fps:.0} fps)"));
            log::debug!("frame {} at {:.1}s", ctx.time.frame_index, ctx.time.elapsed);
        }

        AppControl::Continue
    }
}

fn set_uniforms(shader: &Shader<Gl>, gpu: &Gpu<Gl>, time: f32) -> GlResult<()> {
    shader.set_uniform("u_time", time)?;
    shader.set_uniform("u_resolution", gpu.size().as_vec2())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_reports_once_per_second() {
        let mut fps = FpsCounter::default();
        for i in 1..60 {
            assert_eq!(fps.tick(i as f32 / 60.0), None);
        }
        assert_eq!(fps.tick(1.0), Some(60.0));
        assert_eq!(fps.tick(1.5), None);
        assert_eq!(fps.tick(2.0), Some(2.0));
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    Runtime::run(
        RuntimeConfig {
            title: "plasma".to_string(),
            ..Default::default()
        },
        GlInit::default(),
        PlasmaApp::default(),
    )
}
