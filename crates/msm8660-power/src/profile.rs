//! Power profiles and their per-governor tuning tables
//!
//! Each profile is a compiled-in bundle of governor knobs. Which table gets
//! applied depends on the scaling governor that is live when the profile is
//! selected: ondemand and interactive have dedicated tables, everything else
//! falls back to the reduced generic table.

/// Number of selectable power profiles.
pub const PROFILE_COUNT: usize = 5;

/// Power profile, selected by index from the host framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerProfile {
    PowerSave,
    BiasPower,
    Balanced,
    BiasPerformance,
    HighPerformance,
}

impl PowerProfile {
    /// Parse a profile index from the host. Out-of-range values are rejected.
    pub fn from_index(index: i32) -> Option<Self> {
        match index {
            0 => Some(PowerProfile::PowerSave),
            1 => Some(PowerProfile::BiasPower),
            2 => Some(PowerProfile::Balanced),
            3 => Some(PowerProfile::BiasPerformance),
            4 => Some(PowerProfile::HighPerformance),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Tuning values applied when the ondemand governor is active.
    pub fn ondemand(self) -> &'static OndemandSettings {
        &ONDEMAND_PROFILES[self.index()]
    }

    /// Tuning values applied when the interactive governor is active.
    pub fn interactive(self) -> &'static InteractiveSettings {
        &INTERACTIVE_PROFILES[self.index()]
    }

    /// Reduced tuning set applied under any other governor.
    pub fn generic(self) -> &'static GenericSettings {
        &GENERIC_PROFILES[self.index()]
    }
}

/// Tunables written when the ondemand governor is active.
#[derive(Debug)]
pub struct OndemandSettings {
    pub input_boost_on: u32,
    pub up_threshold: u32,
    pub io_is_busy: u32,
    pub sampling_down_factor: u32,
    pub down_differential: u32,
    pub up_threshold_multi_core: u32,
    pub optimal_freq: u32,
    pub sync_freq: u32,
    pub up_threshold_any_cpu_load: u32,
    pub sampling_rate: u32,
    pub scaling_max_freq: u32,
    pub scaling_min_freq: u32,
    pub input_boost_freqs: &'static str,
    pub gpu_governor: &'static str,
}

/// Tunables written when the interactive governor is active.
#[derive(Debug)]
pub struct InteractiveSettings {
    pub input_boost_on: u32,
    pub boost: u32,
    pub boostpulse_duration: u32,
    pub go_hispeed_load: u32,
    pub hispeed_freq: u32,
    pub io_is_busy: u32,
    pub min_sample_time: u32,
    pub sampling_down_factor: u32,
    pub target_loads: &'static str,
    pub scaling_max_freq: u32,
    pub scaling_min_freq: u32,
    pub input_boost_freqs: &'static str,
    pub gpu_governor: &'static str,
}

/// Reduced tunable set for governors without a dedicated table.
#[derive(Debug)]
pub struct GenericSettings {
    pub input_boost_on: u32,
    pub scaling_max_freq: u32,
    pub scaling_min_freq: u32,
    pub input_boost_freqs: &'static str,
    pub gpu_governor: &'static str,
}

pub(crate) static ONDEMAND_PROFILES: [OndemandSettings; PROFILE_COUNT] = [
    // PowerSave
    OndemandSettings {
        input_boost_on: 0,
        up_threshold: 90,
        io_is_busy: 0,
        sampling_down_factor: 4,
        down_differential: 10,
        up_threshold_multi_core: 70,
        optimal_freq: 756000,
        sync_freq: 810000,
        up_threshold_any_cpu_load: 80,
        sampling_rate: 50000,
        scaling_max_freq: 1026000,
        scaling_min_freq: 192000,
        input_boost_freqs: "756000 540000",
        gpu_governor: "ondemand",
    },
    // BiasPower
    OndemandSettings {
        input_boost_on: 1,
        up_threshold: 90,
        io_is_busy: 1,
        sampling_down_factor: 4,
        down_differential: 10,
        up_threshold_multi_core: 70,
        optimal_freq: 918000,
        sync_freq: 1026000,
        up_threshold_any_cpu_load: 80,
        sampling_rate: 50000,
        scaling_max_freq: 1242000,
        scaling_min_freq: 192000,
        input_boost_freqs: "1134000 1242000",
        gpu_governor: "ondemand",
    },
    // Balanced
    OndemandSettings {
        input_boost_on: 1,
        up_threshold: 90,
        io_is_busy: 1,
        sampling_down_factor: 4,
        down_differential: 10,
        up_threshold_multi_core: 70,
        optimal_freq: 918000,
        sync_freq: 1026000,
        up_threshold_any_cpu_load: 80,
        sampling_rate: 50000,
        scaling_max_freq: 1512000,
        scaling_min_freq: 384000,
        input_boost_freqs: "1134000 1242000",
        gpu_governor: "ondemand",
    },
    // BiasPerformance
    OndemandSettings {
        input_boost_on: 1,
        up_threshold: 90,
        io_is_busy: 1,
        sampling_down_factor: 4,
        down_differential: 10,
        up_threshold_multi_core: 70,
        optimal_freq: 918000,
        sync_freq: 1026000,
        up_threshold_any_cpu_load: 80,
        sampling_rate: 50000,
        scaling_max_freq: 1512000,
        scaling_min_freq: 810000,
        input_boost_freqs: "1134000 1242000",
        gpu_governor: "ondemand",
    },
    // HighPerformance
    OndemandSettings {
        input_boost_on: 0,
        up_threshold: 90,
        io_is_busy: 1,
        sampling_down_factor: 4,
        down_differential: 10,
        up_threshold_multi_core: 70,
        optimal_freq: 1512000,
        sync_freq: 1512000,
        up_threshold_any_cpu_load: 80,
        sampling_rate: 50000,
        scaling_max_freq: 1512000,
        scaling_min_freq: 1512000,
        input_boost_freqs: "1512000 1512000",
        gpu_governor: "performance",
    },
];

pub(crate) static INTERACTIVE_PROFILES: [InteractiveSettings; PROFILE_COUNT] = [
    // PowerSave
    InteractiveSettings {
        input_boost_on: 0,
        boost: 0,
        boostpulse_duration: 40000,
        go_hispeed_load: 90,
        hispeed_freq: 1026000,
        io_is_busy: 1,
        min_sample_time: 39000,
        sampling_down_factor: 4,
        target_loads: "85 1500000:90",
        scaling_max_freq: 1026000,
        scaling_min_freq: 192000,
        input_boost_freqs: "756000 540000",
        gpu_governor: "ondemand",
    },
    // BiasPower
    InteractiveSettings {
        input_boost_on: 0,
        boost: 0,
        boostpulse_duration: 40000,
        go_hispeed_load: 90,
        hispeed_freq: 1134000,
        io_is_busy: 1,
        min_sample_time: 39000,
        sampling_down_factor: 4,
        target_loads: "85 1500000:90",
        scaling_max_freq: 1242000,
        scaling_min_freq: 192000,
        input_boost_freqs: "1134000 1242000",
        gpu_governor: "ondemand",
    },
    // Balanced
    InteractiveSettings {
        input_boost_on: 0,
        boost: 0,
        boostpulse_duration: 40000,
        go_hispeed_load: 90,
        hispeed_freq: 1134000,
        io_is_busy: 1,
        min_sample_time: 39000,
        sampling_down_factor: 4,
        target_loads: "85 1500000:90",
        scaling_max_freq: 1512000,
        scaling_min_freq: 384000,
        input_boost_freqs: "1134000 1242000",
        gpu_governor: "ondemand",
    },
    // BiasPerformance
    InteractiveSettings {
        input_boost_on: 0,
        boost: 0,
        boostpulse_duration: 40000,
        go_hispeed_load: 90,
        hispeed_freq: 1134000,
        io_is_busy: 1,
        min_sample_time: 39000,
        sampling_down_factor: 4,
        target_loads: "85 1500000:90",
        scaling_max_freq: 1512000,
        scaling_min_freq: 810000,
        input_boost_freqs: "1134000 1242000",
        gpu_governor: "ondemand",
    },
    // HighPerformance
    InteractiveSettings {
        input_boost_on: 0,
        boost: 1,
        boostpulse_duration: 40000,
        go_hispeed_load: 90,
        hispeed_freq: 1134000,
        io_is_busy: 1,
        min_sample_time: 39000,
        sampling_down_factor: 4,
        target_loads: "85 1500000:90",
        scaling_max_freq: 1512000,
        scaling_min_freq: 1512000,
        input_boost_freqs: "1512000 1512000",
        gpu_governor: "performance",
    },
];

pub(crate) static GENERIC_PROFILES: [GenericSettings; PROFILE_COUNT] = [
    // PowerSave
    GenericSettings {
        input_boost_on: 0,
        scaling_max_freq: 1026000,
        scaling_min_freq: 192000,
        input_boost_freqs: "756000 540000",
        gpu_governor: "ondemand",
    },
    // BiasPower
    GenericSettings {
        input_boost_on: 1,
        scaling_max_freq: 1242000,
        scaling_min_freq: 192000,
        input_boost_freqs: "1134000 1242000",
        gpu_governor: "ondemand",
    },
    // Balanced
    GenericSettings {
        input_boost_on: 1,
        scaling_max_freq: 1512000,
        scaling_min_freq: 384000,
        input_boost_freqs: "1134000 1242000",
        gpu_governor: "ondemand",
    },
    // BiasPerformance
    GenericSettings {
        input_boost_on: 1,
        scaling_max_freq: 1512000,
        scaling_min_freq: 810000,
        input_boost_freqs: "1134000 1242000",
        gpu_governor: "ondemand",
    },
    // HighPerformance
    GenericSettings {
        input_boost_on: 0,
        scaling_max_freq: 1512000,
        scaling_min_freq: 1512000,
        input_boost_freqs: "1512000 1512000",
        gpu_governor: "performance",
    },
];
