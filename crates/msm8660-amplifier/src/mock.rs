//! Mock control backend for testing without the A2220 device.

use crate::device::A2220Control;
use crate::routing::AmpPath;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Recording A2220 backend. Clones share the same command log, so a test
/// can keep one clone and hand the other to [`crate::Amplifier::with_control`].
#[derive(Clone, Default)]
pub struct MockAmpControl {
    inner: Arc<MockInner>,
}

#[derive(Default)]
struct MockInner {
    commands: Mutex<Vec<AmpPath>>,
    fail: AtomicBool,
}

impl MockAmpControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path codes the hardware accepted, in order.
    pub fn commands(&self) -> Vec<AmpPath> {
        self.inner
            .commands
            .lock()
            .map(|commands| commands.clone())
            .unwrap_or_default()
    }

    /// Make subsequent commands fail, as a wedged device would.
    pub fn set_fail(&self, fail: bool) {
        self.inner.fail.store(fail, Ordering::SeqCst);
    }
}

impl A2220Control for MockAmpControl {
    fn set_config(&mut self, path: AmpPath) -> io::Result<()> {
        if self.inner.fail.load(Ordering::SeqCst) {
            return Err(io::Error::other("injected A2220 failure"));
        }
        if let Ok(mut commands) = self.inner.commands.lock() {
            commands.push(path);
        }
        Ok(())
    }
}
