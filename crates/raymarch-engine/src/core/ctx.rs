use crate::device::Gpu;
use crate::time::FrameTime;
use crate::window::RuntimeCtx;

/// Per-frame context passed to `core::App::on_frame`.
///
/// Surface events have already been applied to `gpu` when the callback runs.
pub struct FrameCtx<'a> {
    pub gpu: &'a mut Gpu<glow::Context>,
    pub time: FrameTime,
    pub runtime: &'a mut RuntimeCtx,
}
