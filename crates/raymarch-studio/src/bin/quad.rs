//! Draws a full-screen quad. With an image path argument the quad is
//! textured with that image; otherwise it shows its UV gradient.

use anyhow::{Context, Result};
use raymarch_engine::core::{App, AppControl, FrameCtx};
use raymarch_engine::device::{ClearOption, GlInit, Gpu};
use raymarch_engine::gl::{Shader, Texture, TextureConfig, UniformValue};
use raymarch_engine::glam::Vec3;
use raymarch_engine::glow;
use raymarch_engine::loader::FsImageLoader;
use raymarch_engine::logging::{init_logging, LoggingConfig};
use raymarch_engine::window::{Runtime, RuntimeConfig};
use raymarch_studio::{is_escape, FullScreenQuad, QUAD_VERT};
use winit::event::WindowEvent;

const QUAD_FRAG: &str = include_str!("../../shaders/quad.frag");

type Gl = glow::Context;

struct QuadApp {
    image: Option<String>,
    scene: Option<Scene>,
}

struct Scene {
    shader: Shader<Gl>,
    quad: FullScreenQuad,
    texture: Option<Texture<Gl>>,
}

impl App for QuadApp {
    fn on_start(&mut self, gpu: &mut Gpu<Gl>) -> Result<()> {
        gpu.set_full_screen(true);

        let shader = gpu
            .create_shader(QUAD_VERT, QUAD_FRAG)
            .context("quad shader")?;
        let quad = FullScreenQuad::new(gpu).context("quad geometry")?;

        let texture = match &self.image {
            Some(path) => {
                let cfg = TextureConfig { flip_y: true, ..Default::default() };
                let tex = pollster::block_on(gpu.load_texture(&FsImageLoader::new(), path, cfg))
                    .with_context(|| format!("loading `{path}`"))?;
                Some(tex)
            }
            None => None,
        };

        self.scene = Some(Scene { shader, quad, texture });
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
        let Some(scene) = &self.scene else {
            return AppControl::Continue;
        };
        let gpu = &*ctx.gpu;

        gpu.clear_color(Vec3::ZERO, 1.0);
        gpu.clear(&[ClearOption::Color]);

        scene.shader.bind();
        if let Err(e) = bind_texture(scene) {
            log::error!("{e}");
            return AppControl::Exit;
        }
        scene.quad.draw(gpu);
        scene.shader.unbind();

        AppControl::Continue
    }
}

fn bind_texture(scene: &Scene) -> raymarch_engine::gl::GlResult<()> {
    let textured = scene.texture.is_some() && scene.shader.has_uniform("u_texture");
    if let Some(tex) = scene.texture.as_ref().filter(|_| textured) {
        tex.bind(0);
        scene.shader.set_uniform("u_texture", UniformValue::Sampler(0))?;
    }
    if scene.shader.has_uniform("u_textured") {
        scene.shader.set_uniform("u_textured", i32::from(textured))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let app = QuadApp {
        image: std::env::args().nth(1),
        scene: None,
    };

    Runtime::run(
        RuntimeConfig {
            title: "quad".to_string(),
            ..Default::default()
        },
        GlInit::default(),
        app,
    )
}
