//! MSM8660 power module
//!
//! Thin adapter between the platform power service and the kernel's
//! cpufreq/GPU/input-boost control files. A profile is a compiled-in bundle
//! of governor tunables; selecting one fans the matching table out to sysfs,
//! best effort. Screen transitions and boost-pulse hints adjust a small set
//! of knobs on top of the selected profile.
//!
//! # Example
//!
//! ```no_run
//! use msm8660_power::{PowerConfig, PowerController, PowerHint};
//!
//! let power = PowerController::new(PowerConfig::default());
//! power.power_hint(PowerHint::SetProfile(2));
//! power.set_interactive(false); // screen off
//! ```

pub mod controller;
pub mod profile;
mod sysfs;

pub use controller::{Feature, Governor, PowerConfig, PowerController, PowerHint};
pub use profile::{
    GenericSettings, InteractiveSettings, OndemandSettings, PROFILE_COUNT, PowerProfile,
};
