use std::rc::Rc;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::coords::SurfaceSize;
use crate::core::{App as CoreApp, AppControl, FrameCtx};
use crate::device::{surface_events, GlInit, GlSurface, Gpu, SurfaceEvent, SurfaceEventSender};
use crate::time::FrameClock;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    /// Wait for vertical blank on swap.
    pub vsync: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "raymarch".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
            vsync: true,
        }
    }
}

/// Runtime context passed to the application.
///
/// Commands are buffered and applied after the current callback returns.
#[derive(Default)]
pub struct RuntimeCtx {
    commands: Vec<Command>,
}

impl RuntimeCtx {
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.commands.push(Command::SetTitle(title.into()));
    }

    pub fn exit(&mut self) {
        self.commands.push(Command::Exit);
    }
}

enum Command {
    SetTitle(String),
    Exit,
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window with a GL context and drives `app` until it exits or
    /// the window closes. Redraws continuously.
    pub fn run<A>(config: RuntimeConfig, gl_init: GlInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gl_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        state.result
    }
}

struct WindowEntry {
    gpu: Gpu<glow::Context>,
    events: SurfaceEventSender,
    clock: FrameClock,
    surface: GlSurface,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gl_init: GlInit,

    // Declared before `entry` so app-owned GL objects are released while the
    // context is still alive.
    app: A,
    entry: Option<WindowEntry>,

    exit_requested: bool,
    result: Result<()>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gl_init: GlInit, app: A) -> Self {
        Self {
            config,
            gl_init,
            app,
            entry: None,
            exit_requested: false,
            result: Ok(()),
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.result = Err(err);
        self.exit_requested = true;
        event_loop.exit();
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let (surface, gl) = GlSurface::new(event_loop, attrs, self.gl_init, self.config.vsync)?;

        let size = surface.size();
        let (events, subscription) = surface_events();
        let mut gpu = Gpu::new(Rc::new(gl), size, subscription);
        log::info!("window created at {}x{}", size.width, size.height);

        self.app
            .on_start(&mut gpu)
            .context("application failed to start")?;

        self.entry = Some(WindowEntry {
            gpu,
            events,
            clock: FrameClock::default(),
            surface,
        });
        Ok(())
    }

    fn apply_commands(&mut self, event_loop: &ActiveEventLoop, mut ctx: RuntimeCtx) {
        for cmd in ctx.commands.drain(..) {
            match cmd {
                Command::SetTitle(title) => {
                    if let Some(entry) = &self.entry {
                        entry.surface.window().set_title(&title);
                    }
                }
                Command::Exit => self.exit_requested = true,
            }
        }

        if self.exit_requested {
            event_loop.exit();
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(entry) = self.entry.as_mut() else {
            return;
        };

        entry.gpu.process_events();
        let time = entry.clock.tick();

        let mut runtime_ctx = RuntimeCtx::default();
        let control = {
            let mut ctx = FrameCtx {
                gpu: &mut entry.gpu,
                time,
                runtime: &mut runtime_ctx,
            };
            self.app.on_frame(&mut ctx)
        };

        if let Err(e) = entry.surface.swap_buffers() {
            self.fail(event_loop, e);
            return;
        }

        if control == AppControl::Exit {
            runtime_ctx.exit();
        }
        self.apply_commands(event_loop, runtime_ctx);
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            self.fail(event_loop, e.context("failed to create initial window"));
            return;
        }

        if let Some(entry) = &self.entry {
            entry.surface.window().request_redraw();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw: animated shaders need a frame every vblank.
        if let Some(entry) = &self.entry {
            entry.surface.window().request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        if self.app.on_window_event(&event) == AppControl::Exit {
            self.exit_requested = true;
            event_loop.exit();
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                self.exit_requested = true;
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if let Some(entry) = &self.entry {
                    let size = SurfaceSize::from(new_size);
                    entry.surface.resize(size);
                    if !entry.events.send(SurfaceEvent::Resized(size)) {
                        log::warn!("resize dropped: no surface subscriber");
                    }
                    entry.surface.window().request_redraw();
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        log::debug!("event loop exiting");
    }
}
