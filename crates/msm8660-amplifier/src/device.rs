//! Amplifier device handle
//!
//! Owns the A2220 control device and the last-applied routing path. The
//! hardware accepts exactly one opener, so construction claims a
//! process-wide slot and a second open fails busy until the first handle
//! is dropped.

use crate::routing::{AmpPath, AudioMode, InputDevice, route_input};
use std::fs::{File, OpenOptions};
use std::io;
use std::os::fd::AsRawFd;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AmplifierError {
    #[error("amplifier device is already open")]
    Busy,

    #[error("cannot open {path}: {source}")]
    CannotOpen { path: PathBuf, source: io::Error },
}

/// Control seam over the A2220. The real backend issues the SET_CONFIG
/// ioctl against the character device; tests substitute a recording mock.
pub trait A2220Control: Send {
    fn set_config(&mut self, path: AmpPath) -> io::Result<()>;
}

nix::ioctl_write_int!(a2220_set_config, b'u', 0x03);

struct DeviceControl {
    device: File,
}

impl A2220Control for DeviceControl {
    fn set_config(&mut self, path: AmpPath) -> io::Result<()> {
        unsafe { a2220_set_config(self.device.as_raw_fd(), path.code() as u64) }
            .map(|_| ())
            .map_err(io::Error::from)
    }
}

/// Amplifier configuration.
#[derive(Debug, Clone)]
pub struct AmplifierConfig {
    pub device_path: PathBuf,
}

impl Default for AmplifierConfig {
    fn default() -> Self {
        Self {
            device_path: PathBuf::from("/dev/audience_a2220"),
        }
    }
}

static DEVICE_CLAIMED: AtomicBool = AtomicBool::new(false);

struct AmpState {
    mode: AudioMode,
    last_path: AmpPath,
    control: Box<dyn A2220Control>,
}

/// Handle to the A2220 amplifier, shared across the audio framework's
/// threads. Hardware writes are serialized behind the state lock and
/// skipped when the requested path is already applied.
pub struct Amplifier {
    state: Mutex<AmpState>,
}

impl Amplifier {
    /// Open the control device. At most one live handle per process.
    pub fn open(config: &AmplifierConfig) -> Result<Self, AmplifierError> {
        Self::claim()?;

        let device = match OpenOptions::new()
            .read(true)
            .write(true)
            .open(&config.device_path)
        {
            Ok(device) => device,
            Err(e) => {
                DEVICE_CLAIMED.store(false, Ordering::SeqCst);
                tracing::error!("unable to open {}: {}", config.device_path.display(), e);
                return Err(AmplifierError::CannotOpen {
                    path: config.device_path.clone(),
                    source: e,
                });
            }
        };
        tracing::debug!("amplifier device opened, fd={}", device.as_raw_fd());

        Ok(Self::from_control(Box::new(DeviceControl { device })))
    }

    /// Build an amplifier over a custom control backend. Claims the same
    /// process-wide slot as [`Amplifier::open`].
    pub fn with_control(control: Box<dyn A2220Control>) -> Result<Self, AmplifierError> {
        Self::claim()?;
        Ok(Self::from_control(control))
    }

    fn claim() -> Result<(), AmplifierError> {
        if DEVICE_CLAIMED
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            tracing::error!("unable to open second instance of the A2220 amplifier");
            return Err(AmplifierError::Busy);
        }
        Ok(())
    }

    fn from_control(control: Box<dyn A2220Control>) -> Self {
        Self {
            state: Mutex::new(AmpState {
                mode: AudioMode::Normal,
                last_path: AmpPath::Suspend,
                control,
            }),
        }
    }

    /// Record the current call mode. No hardware side effect; the mode only
    /// feeds later routing decisions.
    pub fn set_mode(&self, mode: AudioMode) {
        if let Ok(mut state) = self.state.lock() {
            state.mode = mode;
        }
    }

    /// Enable or disable noise-suppression routing for an input device.
    ///
    /// The requested path is applied under the lock; if it equals the
    /// last-applied path the hardware write is skipped entirely. A failed
    /// write leaves the cached path unchanged so the next call retries.
    pub fn enable_input_devices(&self, device: InputDevice, enable: bool) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };

        let path = route_input(state.mode, device, enable);
        if state.last_path == path {
            return;
        }

        match state.control.set_config(path) {
            Ok(()) => {
                state.last_path = path;
                tracing::trace!("A2220 path set to {:?}", path);
            }
            Err(e) => tracing::error!("A2220 set_config failed: {}", e),
        }
    }
}

impl Drop for Amplifier {
    fn drop(&mut self) {
        DEVICE_CLAIMED.store(false, Ordering::SeqCst);
    }
}
