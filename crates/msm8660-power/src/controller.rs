//! Power profile controller
//!
//! Applies profile tuning tables to the cpufreq/GPU/input-boost control files,
//! handles screen on/off transitions, and services performance hints from the
//! host framework. All per-operation failures are logged and swallowed: hints
//! are fire-and-forget and must never abort the caller.

use crate::profile::{GenericSettings, InteractiveSettings, OndemandSettings, PowerProfile};
use crate::{PROFILE_COUNT, sysfs};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Scaling governor classification, by prefix match on the live name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Governor {
    Ondemand,
    Interactive,
    Other,
}

impl Governor {
    /// Classify a governor name as read from sysfs (already stripped).
    pub fn classify(name: &str) -> Self {
        if name.starts_with("ondemand") {
            Governor::Ondemand
        } else if name.starts_with("interactive") {
            Governor::Interactive
        } else {
            Governor::Other
        }
    }
}

/// Performance hint from the host framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerHint {
    /// Vsync pacing; nothing for us to do.
    Vsync,
    /// UI interaction; handled by the cpu input boost driver.
    Interaction,
    /// App launch; triggers a boost pulse.
    Launch,
    /// Explicit CPU boost request; same handling as launch.
    CpuBoost,
    /// Select a power profile by index.
    SetProfile(i32),
    /// Battery-saver state from the framework.
    LowPower(bool),
    /// Touch disable request; nothing for us to do.
    DisableTouch,
    /// Hint code this module does not know about.
    Other(u32),
}

/// Queryable module features.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    SupportedProfiles,
}

/// Control file layout. Defaults match the MSM8660 kernel.
#[derive(Debug, Clone)]
pub struct PowerConfig {
    /// Per-policy cpufreq directory (scaling_governor, scaling_max_freq, ...).
    pub cpufreq_dir: PathBuf,
    /// Ondemand governor tunables.
    pub ondemand_dir: PathBuf,
    /// Interactive governor tunables.
    pub interactive_dir: PathBuf,
    /// cpu_input_boost driver controls.
    pub input_boost_dir: PathBuf,
    /// GPU scaling governor control file.
    pub gpu_governor_path: PathBuf,
}

impl Default for PowerConfig {
    fn default() -> Self {
        Self {
            cpufreq_dir: PathBuf::from("/sys/devices/system/cpu/cpu0/cpufreq"),
            ondemand_dir: PathBuf::from("/sys/devices/system/cpu/cpufreq/ondemand"),
            interactive_dir: PathBuf::from("/sys/devices/system/cpu/cpufreq/interactive"),
            input_boost_dir: PathBuf::from("/sys/kernel/cpu_input_boost"),
            gpu_governor_path: PathBuf::from(
                "/sys/class/kgsl/kgsl-3d0/pwrscale/trustzone/governor",
            ),
        }
    }
}

/// Mutable controller state, all serialized behind one lock.
struct ControllerState {
    current_profile: Option<PowerProfile>,
    low_power: bool,
    boostpulse: Option<File>,
    input_boost: Option<File>,
}

/// Power profile controller, constructed once by the host integration layer
/// and shared across its threads.
pub struct PowerController {
    config: PowerConfig,
    state: Mutex<ControllerState>,
}

impl PowerController {
    pub fn new(config: PowerConfig) -> Self {
        tracing::info!("power module initialized");
        Self {
            config,
            state: Mutex::new(ControllerState {
                current_profile: None,
                low_power: false,
                boostpulse: None,
                input_boost: None,
            }),
        }
    }

    /// Select a power profile by index. Out-of-range indices are rejected;
    /// re-selecting the current profile is a no-op.
    pub fn set_profile(&self, index: i32) {
        let Some(profile) = PowerProfile::from_index(index) else {
            tracing::error!("unknown profile: {}", index);
            return;
        };

        let Ok(mut state) = self.state.lock() else {
            return;
        };
        if state.current_profile == Some(profile) {
            return;
        }

        tracing::debug!("setting profile {:?}", profile);

        match self.read_governor() {
            None => tracing::error!("can't read scaling governor"),
            Some(name) => {
                let writes = match Governor::classify(&name) {
                    Governor::Ondemand => self.ondemand_fanout(profile.ondemand()),
                    Governor::Interactive => self.interactive_fanout(profile.interactive()),
                    Governor::Other => self.generic_fanout(profile.generic()),
                };
                for (path, value) in &writes {
                    sysfs::write_str(path, value);
                }
            }
        }

        state.current_profile = Some(profile);
    }

    /// Screen state transition. Off (or low-power mode) caps the maximum
    /// frequency at the power-save tier; on restores the profile's own cap.
    pub fn set_interactive(&self, on: bool) {
        let Ok(state) = self.state.lock() else {
            return;
        };
        let Some(profile) = state.current_profile else {
            tracing::debug!("set_interactive: no power profile selected yet");
            return;
        };

        tracing::trace!("set_interactive: {}", on);

        let max_freq = if !on || state.low_power {
            PowerProfile::PowerSave.generic().scaling_max_freq
        } else {
            profile.generic().scaling_max_freq
        };
        sysfs::write_int(&self.config.cpufreq_dir.join("scaling_max_freq"), max_freq);

        match self.read_governor() {
            None => tracing::error!("can't read scaling governor"),
            Some(name) => match Governor::classify(&name) {
                Governor::Ondemand => sysfs::write_int(
                    &self.config.ondemand_dir.join("io_is_busy"),
                    u32::from(on),
                ),
                Governor::Interactive => sysfs::write_int(
                    &self.config.interactive_dir.join("io_is_busy"),
                    u32::from(on),
                ),
                Governor::Other => {}
            },
        }
    }

    /// Service a performance hint.
    pub fn power_hint(&self, hint: PowerHint) {
        match hint {
            PowerHint::Vsync => {}
            // Handled by the cpu input boost driver.
            PowerHint::Interaction => {}
            PowerHint::Launch => {
                tracing::trace!("power_hint: launch");
                self.boost_pulse();
            }
            PowerHint::CpuBoost => {
                tracing::trace!("power_hint: cpu boost");
                self.boost_pulse();
            }
            PowerHint::SetProfile(index) => self.set_profile(index),
            // The actual throttling is handled by the framework; the flag
            // only changes how screen transitions cap the max frequency.
            PowerHint::LowPower(enabled) => {
                if let Ok(mut state) = self.state.lock() {
                    state.low_power = enabled;
                }
            }
            PowerHint::DisableTouch => tracing::debug!("power_hint: disable touch"),
            PowerHint::Other(raw) => tracing::debug!("unknown power hint: {}", raw),
        }
    }

    /// Query a module feature.
    pub fn get_feature(&self, feature: Feature) -> i32 {
        match feature {
            Feature::SupportedProfiles => PROFILE_COUNT as i32,
        }
    }

    fn read_governor(&self) -> Option<String> {
        let path = self.config.cpufreq_dir.join("scaling_governor");
        match sysfs::read_line(&path) {
            Ok(name) => Some(name),
            Err(e) => {
                tracing::error!("Error reading {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Fire a transient frequency boost. The interactive boostpulse file is
    /// preferred, the cpu_input_boost control is the fallback; whichever
    /// opens first stays cached until a write fails.
    fn boost_pulse(&self) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        let Some(profile) = state.current_profile else {
            tracing::debug!("boost_pulse: no power profile selected yet");
            return;
        };
        if profile.interactive().boostpulse_duration == 0 {
            return;
        }

        if state.boostpulse.is_none() {
            state.boostpulse = open_boost_file(&self.config.interactive_dir.join("boostpulse"));
        }
        if let Some(file) = state.boostpulse.as_mut() {
            if let Err(e) = file.write_all(b"1") {
                tracing::error!("Error writing to boostpulse: {}", e);
                state.boostpulse = None;
            }
            return;
        }

        if state.input_boost.is_none() {
            state.input_boost = open_boost_file(&self.config.input_boost_dir.join("ib_boost"));
        }
        if let Some(file) = state.input_boost.as_mut() {
            tracing::trace!("boost_pulse: writing to ib_boost");
            if let Err(e) = file.write_all(b"1") {
                tracing::error!("Error writing to ib_boost: {}", e);
                state.input_boost = None;
            }
        }
    }

    /// Ordered write plan for the ondemand table. The kernel applies
    /// thresholds as they land, so the order is part of the contract.
    fn ondemand_fanout(&self, settings: &OndemandSettings) -> Vec<(PathBuf, String)> {
        let ondemand = &self.config.ondemand_dir;
        vec![
            (
                self.config.input_boost_dir.join("enabled"),
                settings.input_boost_on.to_string(),
            ),
            (
                ondemand.join("up_threshold"),
                settings.up_threshold.to_string(),
            ),
            (ondemand.join("io_is_busy"), settings.io_is_busy.to_string()),
            (
                ondemand.join("sampling_down_factor"),
                settings.sampling_down_factor.to_string(),
            ),
            (
                ondemand.join("down_differential"),
                settings.down_differential.to_string(),
            ),
            (
                ondemand.join("up_threshold_multi_core"),
                settings.up_threshold_multi_core.to_string(),
            ),
            (
                ondemand.join("optimal_freq"),
                settings.optimal_freq.to_string(),
            ),
            (ondemand.join("sync_freq"), settings.sync_freq.to_string()),
            (
                ondemand.join("up_threshold_any_cpu_load"),
                settings.up_threshold_any_cpu_load.to_string(),
            ),
            (
                ondemand.join("sampling_rate"),
                settings.sampling_rate.to_string(),
            ),
            (
                self.config.cpufreq_dir.join("scaling_max_freq"),
                settings.scaling_max_freq.to_string(),
            ),
            (
                self.config.cpufreq_dir.join("scaling_min_freq"),
                settings.scaling_min_freq.to_string(),
            ),
            (
                self.config.input_boost_dir.join("ib_freqs"),
                settings.input_boost_freqs.to_string(),
            ),
            (
                self.config.gpu_governor_path.clone(),
                settings.gpu_governor.to_string(),
            ),
        ]
    }

    /// Ordered write plan for the interactive table.
    fn interactive_fanout(&self, settings: &InteractiveSettings) -> Vec<(PathBuf, String)> {
        let interactive = &self.config.interactive_dir;
        vec![
            (
                self.config.input_boost_dir.join("enabled"),
                settings.input_boost_on.to_string(),
            ),
            (interactive.join("boost"), settings.boost.to_string()),
            (
                interactive.join("boostpulse_duration"),
                settings.boostpulse_duration.to_string(),
            ),
            (
                interactive.join("go_hispeed_load"),
                settings.go_hispeed_load.to_string(),
            ),
            (
                interactive.join("hispeed_freq"),
                settings.hispeed_freq.to_string(),
            ),
            (
                interactive.join("io_is_busy"),
                settings.io_is_busy.to_string(),
            ),
            (
                interactive.join("min_sample_time"),
                settings.min_sample_time.to_string(),
            ),
            (
                interactive.join("sampling_down_factor"),
                settings.sampling_down_factor.to_string(),
            ),
            (
                interactive.join("target_loads"),
                settings.target_loads.to_string(),
            ),
            (
                self.config.cpufreq_dir.join("scaling_max_freq"),
                settings.scaling_max_freq.to_string(),
            ),
            (
                self.config.cpufreq_dir.join("scaling_min_freq"),
                settings.scaling_min_freq.to_string(),
            ),
            (
                self.config.input_boost_dir.join("ib_freqs"),
                settings.input_boost_freqs.to_string(),
            ),
            (
                self.config.gpu_governor_path.clone(),
                settings.gpu_governor.to_string(),
            ),
        ]
    }

    /// Ordered write plan for the generic fallback table.
    fn generic_fanout(&self, settings: &GenericSettings) -> Vec<(PathBuf, String)> {
        vec![
            (
                self.config.input_boost_dir.join("enabled"),
                settings.input_boost_on.to_string(),
            ),
            (
                self.config.cpufreq_dir.join("scaling_max_freq"),
                settings.scaling_max_freq.to_string(),
            ),
            (
                self.config.cpufreq_dir.join("scaling_min_freq"),
                settings.scaling_min_freq.to_string(),
            ),
            (
                self.config.input_boost_dir.join("ib_freqs"),
                settings.input_boost_freqs.to_string(),
            ),
            (
                self.config.gpu_governor_path.clone(),
                settings.gpu_governor.to_string(),
            ),
        ]
    }
}

fn open_boost_file(path: &Path) -> Option<File> {
    OpenOptions::new().write(true).open(path).ok()
}
