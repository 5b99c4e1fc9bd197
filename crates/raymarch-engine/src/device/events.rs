use std::sync::mpsc::{self, Receiver, Sender};

use crate::coords::SurfaceSize;

/// Something that happened to the presentation surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// New drawable size in physical pixels.
    Resized(SurfaceSize),
}

/// Sending half of a surface-event subscription. Owned by the window runtime.
#[derive(Debug, Clone)]
pub struct SurfaceEventSender {
    tx: Sender<SurfaceEvent>,
}

impl SurfaceEventSender {
    /// Returns `false` once the receiving side has been dropped.
    pub fn send(&self, event: SurfaceEvent) -> bool {
        self.tx.send(event).is_ok()
    }
}

/// Receiving half of a surface-event subscription.
#[derive(Debug)]
pub struct SurfaceEvents {
    rx: Receiver<SurfaceEvent>,
}

impl SurfaceEvents {
    /// Returns every event queued since the last drain without blocking.
    pub fn drain(&self) -> Vec<SurfaceEvent> {
        self.rx.try_iter().collect()
    }
}

/// Creates a connected sender/receiver pair.
pub fn surface_events() -> (SurfaceEventSender, SurfaceEvents) {
    let (tx, rx) = mpsc::channel();
    (SurfaceEventSender { tx }, SurfaceEvents { rx })
}
