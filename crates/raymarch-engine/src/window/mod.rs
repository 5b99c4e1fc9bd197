//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the GL surface, and forwards resizes to
//! the `Gpu` facade through its surface-event subscription.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx};
