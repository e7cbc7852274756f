//! Device classification and effect-tier dispatch.
//!
//! The profile is computed once at startup from whatever signals the
//! browser exposes. Missing signals count as "capable" so a locked-down
//! environment never loses effects it could have run.

/// Raw environment signals sampled at startup. Everything optional stays
/// `None` when the browser does not expose it.
#[derive(Debug, Clone, Default)]
pub struct Signals {
    pub device_memory_gb: Option<f64>,
    pub cores: Option<u32>,
    pub user_agent: String,
    pub reduced_motion: bool,
    pub touch: bool,
    pub save_data: bool,
    pub slow_network: bool,
    pub viewport_width: f64,
}

/// One-time snapshot of device constraints used to gate effect intensity.
/// `is_mobile` is the only field recomputed later (on resize).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityProfile {
    pub is_mobile: bool,
    pub is_low_end_device: bool,
    pub prefers_reduced_motion: bool,
    pub is_touch: bool,
}

/// Which of the two mutually exclusive effect sets runs this page load.
/// Decided once; never re-evaluated on resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectTier {
    Minimal,
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Desktop,
    Mobile,
    LowEndMobile,
}

/// Widths at or below this are treated as mobile layout.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

/// Below this width the glyph-rain field is hidden and purged outright.
pub const GLYPH_FIELD_MIN_WIDTH: f64 = 360.0;

const LOW_MEMORY_GB: f64 = 2.0;
const LOW_CORE_COUNT: u32 = 2;

// UA substrings for platform generations old enough to struggle with the
// full effect set.
const LEGACY_UA_MARKERS: &[&str] = &["android 4", "android 5", "iphone os 9", "iphone os 10"];

pub fn is_mobile_width(width: f64) -> bool {
    width <= MOBILE_BREAKPOINT
}

impl CapabilityProfile {
    pub fn classify(signals: &Signals) -> Self {
        let low_memory = signals
            .device_memory_gb
            .map_or(false, |gb| gb <= LOW_MEMORY_GB);
        let low_cores = signals.cores.map_or(false, |n| n <= LOW_CORE_COUNT);
        let ua = signals.user_agent.to_ascii_lowercase();
        let legacy_ua = LEGACY_UA_MARKERS.iter().any(|m| ua.contains(m));

        CapabilityProfile {
            is_mobile: is_mobile_width(signals.viewport_width),
            is_low_end_device: low_memory || low_cores || legacy_ua,
            prefers_reduced_motion: signals.reduced_motion,
            is_touch: signals.touch,
        }
    }

    /// Minimal iff reduced motion is requested, or the device is both
    /// mobile and low-end. Everything else gets the full set.
    pub fn tier(&self) -> EffectTier {
        if self.prefers_reduced_motion || (self.is_mobile && self.is_low_end_device) {
            EffectTier::Minimal
        } else {
            EffectTier::Full
        }
    }

    pub fn device_class(&self) -> DeviceClass {
        if !self.is_mobile {
            DeviceClass::Desktop
        } else if self.is_low_end_device {
            DeviceClass::LowEndMobile
        } else {
            DeviceClass::Mobile
        }
    }
}

/// Per-class animator tuning: particle census and glyph-rain cadence.
#[derive(Debug, Clone, Copy)]
pub struct Tuning {
    pub particle_count: u32,
    /// Animation duration band for particles, seconds.
    pub particle_duration_s: (f64, f64),
    pub glyph_interval_ms: u32,
    /// Upper bound on concurrently alive glyph nodes.
    pub glyph_cap: usize,
}

impl Tuning {
    pub fn for_class(class: DeviceClass) -> Self {
        match class {
            DeviceClass::Desktop => Tuning {
                particle_count: 50,
                particle_duration_s: (10.0, 25.0),
                glyph_interval_ms: 200,
                glyph_cap: 100,
            },
            DeviceClass::Mobile => Tuning {
                particle_count: 20,
                particle_duration_s: (8.0, 18.0),
                glyph_interval_ms: 300,
                glyph_cap: 30,
            },
            DeviceClass::LowEndMobile => Tuning {
                particle_count: 10,
                particle_duration_s: (8.0, 14.0),
                glyph_interval_ms: 400,
                glyph_cap: 30,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capable_desktop() -> Signals {
        Signals {
            device_memory_gb: Some(8.0),
            cores: Some(8),
            user_agent: "Mozilla/5.0 (X11; Linux x86_64)".into(),
            viewport_width: 1920.0,
            ..Signals::default()
        }
    }

    #[test]
    fn missing_signals_default_to_capable() {
        let profile = CapabilityProfile::classify(&Signals {
            viewport_width: 1280.0,
            ..Signals::default()
        });
        assert!(!profile.is_low_end_device);
        assert_eq!(profile.tier(), EffectTier::Full);
        assert_eq!(profile.device_class(), DeviceClass::Desktop);
    }

    #[test]
    fn reduced_motion_forces_minimal_regardless_of_hardware() {
        let mut signals = capable_desktop();
        signals.reduced_motion = true;
        let profile = CapabilityProfile::classify(&signals);
        assert_eq!(profile.tier(), EffectTier::Minimal);
    }

    #[test]
    fn low_end_alone_keeps_full_tier_on_desktop() {
        let mut signals = capable_desktop();
        signals.device_memory_gb = Some(1.0);
        let profile = CapabilityProfile::classify(&signals);
        assert!(profile.is_low_end_device);
        assert_eq!(profile.tier(), EffectTier::Full);
    }

    #[test]
    fn low_end_mobile_gets_minimal() {
        let signals = Signals {
            device_memory_gb: Some(2.0),
            cores: Some(4),
            viewport_width: 390.0,
            ..Signals::default()
        };
        let profile = CapabilityProfile::classify(&signals);
        assert_eq!(profile.tier(), EffectTier::Minimal);
        assert_eq!(profile.device_class(), DeviceClass::LowEndMobile);
    }

    #[test]
    fn legacy_user_agent_is_low_end() {
        let signals = Signals {
            user_agent: "Mozilla/5.0 (Linux; Android 4.4.2; GT-I9505)".into(),
            viewport_width: 1024.0,
            ..Signals::default()
        };
        assert!(CapabilityProfile::classify(&signals).is_low_end_device);
    }

    #[test]
    fn tuning_scales_down_with_device_class() {
        let desktop = Tuning::for_class(DeviceClass::Desktop);
        let mobile = Tuning::for_class(DeviceClass::Mobile);
        let low = Tuning::for_class(DeviceClass::LowEndMobile);
        assert!(desktop.particle_count > mobile.particle_count);
        assert!(mobile.particle_count > low.particle_count);
        assert!(desktop.glyph_interval_ms < mobile.glyph_interval_ms);
        assert!(desktop.glyph_cap > mobile.glyph_cap);
    }
}
