//! Neural HUD - event-driven HUD state core
//!
//! Core modules:
//! - `bus`: Typed publish/subscribe handle (injected, no global singleton)
//! - `hud`: Notification queue, heat meter, upgrade badges and the router feeding them
//! - `palette`: Colors, heat gradient and badge style table
//! - `settings`: Data-driven HUD timings and rates
//!
//! Nothing here renders. The presentation layer reads a [`hud::HudFrame`]
//! snapshot each frame and draws it however it likes.

pub mod bus;
pub mod hud;
pub mod palette;
pub mod settings;

pub use bus::{EventBus, SubscriberId};
pub use hud::{DomainEvent, Hud, HudFrame, HudPresenter, PresenterStatus, Unlock, UpgradeKind};
pub use settings::{HudSettings, SettingsError};

/// HUD configuration constants
pub mod consts {
    /// Demo frame timestep (60 Hz presentation)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Notification slide/fade in (seconds)
    pub const NOTIFY_EASE_IN: f32 = 0.3;
    /// Notification fully visible (seconds)
    pub const NOTIFY_HOLD: f32 = 3.0;
    /// Notification slide/fade out (seconds)
    pub const NOTIFY_EASE_OUT: f32 = 0.3;
    /// Pause between two queued notifications (seconds)
    pub const NOTIFY_GAP: f32 = 0.3;

    /// Heat bar exponential smoothing rate (1/s)
    pub const METER_SMOOTHING_RATE: f32 = 10.0;
    /// Overheat warning blink rate (Hz)
    pub const METER_BLINK_RATE: f32 = 3.0;

    /// Badges start pulsing below this many seconds remaining
    pub const BADGE_LOW_THRESHOLD: f32 = 3.0;
    /// Low-time badge pulse rate (Hz)
    pub const BADGE_PULSE_FREQUENCY: f32 = 4.0;

    /// Label shown when a notification has no name
    pub const UNKNOWN_LABEL: &str = "???";
}

/// Cubic ease-out: fast start, gentle landing. `t` is clamped to [0, 1].
#[inline]
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Shared blink/pulse function: "on" for the first half of each cycle.
///
/// `phase` is measured in cycles (1.0 = one full period).
#[inline]
pub fn pulse_on(phase: f32) -> bool {
    (phase * std::f32::consts::TAU).sin() > 0.0
}

/// Fraction of the remaining distance covered this tick by exponential smoothing
#[inline]
pub fn smoothing_factor(dt: f32, rate: f32) -> f32 {
    (dt * rate).clamp(0.0, 1.0)
}

/// Ratio clamped to [0, 1]; a non-positive or non-finite denominator yields 0
#[inline]
pub fn clamped_fraction(current: f32, max: f32) -> f32 {
    if max <= 0.0 || !max.is_finite() || !current.is_finite() {
        return 0.0;
    }
    (current / max).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_out_cubic_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);
        // Front-loaded: halfway through time is well past halfway in progress
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-6);
    }

    #[test]
    fn test_pulse_on_halves() {
        assert!(!pulse_on(0.0));
        assert!(pulse_on(0.25));
        assert!(!pulse_on(0.75));
        assert!(pulse_on(1.25));
    }

    #[test]
    fn test_clamped_fraction() {
        assert_eq!(clamped_fraction(0.0, 0.0), 0.0);
        assert_eq!(clamped_fraction(50.0, -10.0), 0.0);
        assert_eq!(clamped_fraction(150.0, 100.0), 1.0);
        assert_eq!(clamped_fraction(-5.0, 100.0), 0.0);
        assert!((clamped_fraction(25.0, 100.0) - 0.25).abs() < 1e-6);
        assert_eq!(clamped_fraction(f32::NAN, 100.0), 0.0);
    }
}
