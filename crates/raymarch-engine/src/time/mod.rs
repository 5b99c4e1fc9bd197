//! Frame timing.
//!
//! One `FrameClock` per render loop; call `tick()` once per presented frame
//! to obtain `FrameTime` (clamped delta plus total elapsed seconds).

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
