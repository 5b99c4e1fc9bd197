//! GL device + surface management.
//!
//! This module is responsible for:
//! - creating the window, GL context and window surface (`GlSurface`)
//! - the `Gpu` facade that builds resources and forwards state/draw calls
//! - the resize subscription connecting the window runtime to the facade

mod events;
mod gpu;
mod init;
mod surface;

pub use events::{surface_events, SurfaceEvent, SurfaceEventSender, SurfaceEvents};
pub use gpu::{Capability, ClearOption, DrawMode, Face, Gpu};
pub use init::GlInit;
pub use surface::GlSurface;
