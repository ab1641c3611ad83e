//! Host-side scheduling of engine transitions.

use tokio::task::JoinHandle;

/// The spawned task that will fire the engine's pending transition.
///
/// Holds at most one task. Arming a new one aborts the previous task; the
/// engine ignores superseded tokens regardless, so an abort that loses a race
/// is harmless.
#[derive(Debug, Default)]
pub struct TransitionTimer {
    handle: Option<JoinHandle<()>>,
}

impl TransitionTimer {
    pub fn arm(&mut self, handle: JoinHandle<()>) {
        if let Some(previous) = self.handle.replace(handle) {
            previous.abort();
        }
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_armed(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for TransitionTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
