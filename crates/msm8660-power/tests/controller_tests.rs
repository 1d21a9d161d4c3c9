//! Integration tests for the power profile controller, run against a
//! scratch directory standing in for the kernel's control files.

use msm8660_power::{Feature, PowerConfig, PowerController, PowerHint};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

struct SysfsTestEnv {
    #[allow(dead_code)]
    temp_dir: TempDir,
    root: PathBuf,
    config: PowerConfig,
}

impl SysfsTestEnv {
    fn new(governor: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();

        for dir in ["cpufreq", "ondemand", "interactive", "input_boost"] {
            fs::create_dir_all(root.join(dir)).unwrap();
        }
        fs::write(root.join("cpufreq/scaling_governor"), governor).unwrap();

        let config = PowerConfig {
            cpufreq_dir: root.join("cpufreq"),
            ondemand_dir: root.join("ondemand"),
            interactive_dir: root.join("interactive"),
            input_boost_dir: root.join("input_boost"),
            gpu_governor_path: root.join("gpu_governor"),
        };

        Self {
            temp_dir,
            root,
            config,
        }
    }

    fn controller(&self) -> PowerController {
        PowerController::new(self.config.clone())
    }

    fn write(&self, rel: &str, contents: &str) {
        fs::write(self.root.join(rel), contents).unwrap();
    }

    fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.root.join(rel)).unwrap()
    }

    fn exists(&self, rel: &str) -> bool {
        self.root.join(rel).exists()
    }
}

#[test]
fn test_balanced_profile_under_interactive_governor() {
    let env = SysfsTestEnv::new("interactive\n");
    let power = env.controller();

    // Profile index 2 is balanced.
    power.set_profile(2);

    assert_eq!(env.read("interactive/boost"), "0");
    assert_eq!(env.read("interactive/boostpulse_duration"), "40000");
    assert_eq!(env.read("interactive/hispeed_freq"), "1134000");
    assert_eq!(env.read("cpufreq/scaling_max_freq"), "1512000");
    assert_eq!(env.read("cpufreq/scaling_min_freq"), "384000");
    assert_eq!(env.read("input_boost/enabled"), "0");
    assert_eq!(env.read("input_boost/ib_freqs"), "1134000 1242000");
    assert_eq!(env.read("gpu_governor"), "ondemand");
}

#[test]
fn test_reselecting_same_profile_writes_only_once() {
    let env = SysfsTestEnv::new("interactive\n");
    let power = env.controller();

    power.set_profile(2);
    assert_eq!(env.read("cpufreq/scaling_max_freq"), "1512000");

    // A second selection of the current profile must not touch the files.
    env.write("cpufreq/scaling_max_freq", "sentinel");
    power.set_profile(2);
    assert_eq!(env.read("cpufreq/scaling_max_freq"), "sentinel");

    // Selecting a different profile writes again.
    power.set_profile(4);
    assert_eq!(env.read("cpufreq/scaling_max_freq"), "1512000");
    assert_eq!(env.read("cpufreq/scaling_min_freq"), "1512000");
}

#[test]
fn test_invalid_profile_index_is_rejected() {
    let env = SysfsTestEnv::new("interactive\n");
    let power = env.controller();

    power.set_profile(-1);
    power.set_profile(5);
    assert!(!env.exists("cpufreq/scaling_max_freq"));

    // No profile became current, so screen transitions stay no-ops too.
    power.set_interactive(true);
    assert!(!env.exists("cpufreq/scaling_max_freq"));
}

#[test]
fn test_governor_name_with_trailing_crlf() {
    let env = SysfsTestEnv::new("ondemand\r\n");
    let power = env.controller();

    power.set_profile(0);

    assert_eq!(env.read("ondemand/up_threshold"), "90");
    assert_eq!(env.read("ondemand/io_is_busy"), "0");
    assert_eq!(env.read("ondemand/sampling_rate"), "50000");
    assert_eq!(env.read("cpufreq/scaling_max_freq"), "1026000");
}

#[test]
fn test_ondemand_profile_fanout() {
    let env = SysfsTestEnv::new("ondemand\n");
    let power = env.controller();

    power.power_hint(PowerHint::SetProfile(1));

    assert_eq!(env.read("input_boost/enabled"), "1");
    assert_eq!(env.read("ondemand/optimal_freq"), "918000");
    assert_eq!(env.read("ondemand/sync_freq"), "1026000");
    assert_eq!(env.read("cpufreq/scaling_max_freq"), "1242000");
    assert_eq!(env.read("cpufreq/scaling_min_freq"), "192000");
    // The interactive tunables stay untouched.
    assert!(!env.exists("interactive/hispeed_freq"));
}

#[test]
fn test_unknown_governor_falls_back_to_generic_table() {
    let env = SysfsTestEnv::new("conservative\n");
    let power = env.controller();

    power.set_profile(1);

    assert_eq!(env.read("input_boost/enabled"), "1");
    assert_eq!(env.read("cpufreq/scaling_max_freq"), "1242000");
    assert_eq!(env.read("input_boost/ib_freqs"), "1134000 1242000");
    assert_eq!(env.read("gpu_governor"), "ondemand");
    assert!(!env.exists("ondemand/up_threshold"));
    assert!(!env.exists("interactive/boost"));
}

#[test]
fn test_screen_off_caps_max_freq_at_power_save_tier() {
    let env = SysfsTestEnv::new("interactive\n");
    let power = env.controller();

    power.set_profile(4);
    assert_eq!(env.read("cpufreq/scaling_max_freq"), "1512000");

    power.set_interactive(false);
    assert_eq!(env.read("cpufreq/scaling_max_freq"), "1026000");
    assert_eq!(env.read("interactive/io_is_busy"), "0");

    power.set_interactive(true);
    assert_eq!(env.read("cpufreq/scaling_max_freq"), "1512000");
    assert_eq!(env.read("interactive/io_is_busy"), "1");
}

#[test]
fn test_low_power_mode_caps_even_while_interactive() {
    let env = SysfsTestEnv::new("ondemand\n");
    let power = env.controller();

    power.set_profile(2);

    power.power_hint(PowerHint::LowPower(true));
    power.set_interactive(true);
    assert_eq!(env.read("cpufreq/scaling_max_freq"), "1026000");
    assert_eq!(env.read("ondemand/io_is_busy"), "1");

    power.power_hint(PowerHint::LowPower(false));
    power.set_interactive(true);
    assert_eq!(env.read("cpufreq/scaling_max_freq"), "1512000");
}

#[test]
fn test_boost_pulse_without_profile_touches_nothing() {
    let env = SysfsTestEnv::new("interactive\n");
    env.write("interactive/boostpulse", "");
    let power = env.controller();

    power.power_hint(PowerHint::Launch);
    power.power_hint(PowerHint::CpuBoost);
    assert_eq!(env.read("interactive/boostpulse"), "");
}

#[test]
fn test_boost_pulse_writes_to_boostpulse() {
    let env = SysfsTestEnv::new("interactive\n");
    env.write("interactive/boostpulse", "");
    let power = env.controller();

    power.set_profile(2);
    power.power_hint(PowerHint::Launch);
    assert_eq!(env.read("interactive/boostpulse"), "1");
}

#[test]
fn test_boost_pulse_falls_back_to_input_boost() {
    // No boostpulse control file; the input-boost driver takes over.
    let env = SysfsTestEnv::new("interactive\n");
    env.write("input_boost/ib_boost", "");
    let power = env.controller();

    power.set_profile(2);
    power.power_hint(PowerHint::CpuBoost);
    assert_eq!(env.read("input_boost/ib_boost"), "1");
}

#[test]
fn test_boost_pulse_reopens_after_write_failure() {
    let env = SysfsTestEnv::new("interactive\n");
    // A boostpulse control that opens fine but rejects every write.
    std::os::unix::fs::symlink("/dev/full", env.root.join("interactive/boostpulse")).unwrap();
    let power = env.controller();

    power.set_profile(2);
    power.power_hint(PowerHint::Launch);

    // The failed write must drop the cached handle: once the control file
    // is replaced, the next hint reopens it instead of reusing the stale
    // descriptor.
    fs::remove_file(env.root.join("interactive/boostpulse")).unwrap();
    env.write("interactive/boostpulse", "");
    power.power_hint(PowerHint::Launch);
    assert_eq!(env.read("interactive/boostpulse"), "1");
}

#[test]
fn test_noop_hints_touch_nothing() {
    let env = SysfsTestEnv::new("interactive\n");
    let power = env.controller();

    power.power_hint(PowerHint::Vsync);
    power.power_hint(PowerHint::Interaction);
    power.power_hint(PowerHint::DisableTouch);
    power.power_hint(PowerHint::Other(42));
    assert!(!env.exists("cpufreq/scaling_max_freq"));
}

#[test]
fn test_supported_profiles_feature() {
    let env = SysfsTestEnv::new("interactive\n");
    let power = env.controller();
    assert_eq!(power.get_feature(Feature::SupportedProfiles), 5);
}

#[test]
fn test_governor_read_failure_skips_fanout_but_records_profile() {
    let env = SysfsTestEnv::new("interactive\n");
    let power = env.controller();

    fs::remove_file(env.root.join("cpufreq/scaling_governor")).unwrap();
    power.set_profile(2);
    assert!(!env.exists("cpufreq/scaling_max_freq"));

    // The profile still became current, so reselecting it stays a no-op
    // even after the governor file comes back.
    env.write("cpufreq/scaling_governor", "interactive\n");
    power.set_profile(2);
    assert!(!env.exists("cpufreq/scaling_max_freq"));

    power.set_profile(3);
    assert_eq!(env.read("cpufreq/scaling_max_freq"), "1512000");
    assert_eq!(env.read("cpufreq/scaling_min_freq"), "810000");
}
