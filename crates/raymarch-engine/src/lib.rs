//! Raymarch engine crate.
//!
//! Thin object wrappers over an OpenGL context (buffers, textures, cube maps,
//! framebuffers, shaders, uniform blocks), a `Gpu` facade that builds them,
//! and the window runtime that drives an application frame by frame.

pub mod coords;
pub mod core;
pub mod device;
pub mod gl;
pub mod loader;
pub mod logging;
pub mod time;
pub mod window;

pub use glam;
pub use glow;
