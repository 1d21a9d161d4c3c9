//! Audience A2220 amplifier module
//!
//! Thin adapter between the platform audio service and the A2220
//! noise-suppression chip's control device. Call-mode changes are pure state
//! updates; enabling an input device maps the mode/device pair to a hardware
//! routing path and issues it via ioctl, skipping writes the chip has
//! already applied.
//!
//! # Example
//!
//! ```no_run
//! use msm8660_amplifier::{Amplifier, AmplifierConfig, AudioMode, InputDevice};
//!
//! # fn main() -> Result<(), msm8660_amplifier::AmplifierError> {
//! let amp = Amplifier::open(&AmplifierConfig::default())?;
//! amp.set_mode(AudioMode::InCall);
//! amp.enable_input_devices(InputDevice::VoipHandsetMic, true);
//! # Ok(())
//! # }
//! ```

pub mod device;
pub mod mock;
pub mod routing;

pub use device::{A2220Control, Amplifier, AmplifierConfig, AmplifierError};
pub use routing::{AmpPath, AudioMode, InputDevice};
