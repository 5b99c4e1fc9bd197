//! Contract between the window runtime and applications.
//!
//! Applications implement [`App`]; the runtime owns the event loop, the GL
//! surface and the [`Gpu`](crate::device::Gpu) facade and hands out a
//! [`FrameCtx`] each frame.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::FrameCtx;
