//! Weapon heat meter
//!
//! `update` only records the target; `advance` does the animating. Calling
//! `update` repeatedly with the same values changes nothing.

use serde::Serialize;

use crate::palette::Rgba;
use crate::settings::MeterSettings;
use crate::{clamped_fraction, pulse_on, smoothing_factor};

/// What the presentation layer draws for the meter this frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeterFrame {
    /// Fill width (0-1)
    pub fraction: f32,
    pub overheated: bool,
    /// Overheat warning on this tick (blinks while overheated)
    pub warning_visible: bool,
    pub color: Rgba,
    /// Rounded fill percent, e.g. "73%"
    pub percent_label: String,
}

/// Smoothed, thresholded meter state
#[derive(Debug, Clone)]
pub struct TimedMeter {
    current_fraction: f32,
    target_fraction: f32,
    overheated: bool,
    /// Blink position in cycles; only moves while overheated
    blink_phase: f32,
    settings: MeterSettings,
}

impl TimedMeter {
    pub fn new(settings: MeterSettings) -> Self {
        Self {
            current_fraction: 0.0,
            target_fraction: 0.0,
            overheated: false,
            blink_phase: 0.0,
            settings,
        }
    }

    /// Record a new reading. `max <= 0` reads as empty.
    pub fn update(&mut self, current: f32, max: f32, overheated: bool) {
        if max <= 0.0 {
            log::debug!("Meter max {} is not positive, showing empty", max);
        }
        self.target_fraction = clamped_fraction(current, max);
        self.overheated = overheated;
        if !overheated {
            self.blink_phase = 0.0;
        }
    }

    /// Step the animation by `dt` seconds of unscaled time
    pub fn advance(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        let k = smoothing_factor(dt, self.settings.smoothing_rate);
        self.current_fraction += (self.target_fraction - self.current_fraction) * k;

        if self.overheated {
            self.blink_phase = (self.blink_phase + dt * self.settings.blink_rate).rem_euclid(1.0);
        } else {
            self.blink_phase = 0.0;
        }
    }

    /// Back to empty, no animation
    pub fn reset(&mut self) {
        self.current_fraction = 0.0;
        self.target_fraction = 0.0;
        self.overheated = false;
        self.blink_phase = 0.0;
    }

    pub fn current_fraction(&self) -> f32 {
        self.current_fraction
    }

    pub fn target_fraction(&self) -> f32 {
        self.target_fraction
    }

    pub fn overheated(&self) -> bool {
        self.overheated
    }

    pub fn blink_phase(&self) -> f32 {
        self.blink_phase
    }

    pub fn warning_visible(&self) -> bool {
        self.overheated && pulse_on(self.blink_phase)
    }

    /// Fill color for the displayed fraction
    pub fn color(&self) -> Rgba {
        self.settings.gradient.sample(self.current_fraction)
    }

    pub fn frame(&self) -> MeterFrame {
        MeterFrame {
            fraction: self.current_fraction,
            overheated: self.overheated,
            warning_visible: self.warning_visible(),
            color: self.color(),
            percent_label: format!("{:.0}%", self.current_fraction * 100.0),
        }
    }
}

impl Default for TimedMeter {
    fn default() -> Self {
        Self::new(MeterSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_DT;
    use crate::palette::{COOL, CRITICAL};
    use proptest::prelude::*;

    #[test]
    fn test_update_does_not_animate() {
        let mut meter = TimedMeter::default();
        meter.update(50.0, 100.0, false);
        assert_eq!(meter.target_fraction(), 0.5);
        assert_eq!(meter.current_fraction(), 0.0);

        // Idempotent
        meter.update(50.0, 100.0, false);
        assert_eq!(meter.target_fraction(), 0.5);
        assert_eq!(meter.current_fraction(), 0.0);
    }

    #[test]
    fn test_zero_max_is_empty() {
        let mut meter = TimedMeter::default();
        meter.update(0.0, 0.0, false);
        assert_eq!(meter.target_fraction(), 0.0);
        meter.update(10.0, -5.0, true);
        assert_eq!(meter.target_fraction(), 0.0);
    }

    #[test]
    fn test_repeated_zero_max_stays_empty() {
        let mut meter = TimedMeter::default();
        meter.update(60.0, 100.0, false);
        meter.advance(1.0);
        for _ in 0..600 {
            meter.update(0.0, 0.0, false);
            meter.advance(FRAME_DT);
        }
        assert_eq!(meter.target_fraction(), 0.0);
        assert!(meter.current_fraction() < 1e-3);
        assert!(!meter.warning_visible());
    }

    #[test]
    fn test_advance_approaches_target() {
        let mut meter = TimedMeter::default();
        meter.update(100.0, 100.0, false);
        meter.advance(FRAME_DT);
        let first = meter.current_fraction();
        assert!(first > 0.0 && first < 1.0);

        for _ in 0..120 {
            meter.advance(FRAME_DT);
        }
        assert!((meter.current_fraction() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_large_step_snaps_to_target() {
        let mut meter = TimedMeter::default();
        meter.update(30.0, 100.0, false);
        meter.advance(1.0);
        assert!((meter.current_fraction() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_blink_cycles_while_overheated() {
        let mut meter = TimedMeter::default();
        let period = 1.0 / crate::consts::METER_BLINK_RATE;

        meter.update(100.0, 100.0, true);
        meter.advance(period * 0.1);
        assert!(meter.warning_visible());
        meter.advance(period * 0.5);
        assert!(!meter.warning_visible());
        meter.advance(period * 0.5);
        assert!(meter.warning_visible());
    }

    #[test]
    fn test_cooling_hides_warning_immediately() {
        let mut meter = TimedMeter::default();
        meter.update(100.0, 100.0, true);
        meter.advance(0.05);
        assert!(meter.warning_visible());

        meter.update(0.0, 100.0, false);
        assert!(!meter.warning_visible());
        assert_eq!(meter.blink_phase(), 0.0);
    }

    #[test]
    fn test_color_follows_displayed_fraction() {
        let mut meter = TimedMeter::default();
        assert_eq!(meter.color(), COOL);
        meter.update(100.0, 100.0, true);
        meter.advance(1.0);
        assert_eq!(meter.color(), CRITICAL);
        assert_eq!(meter.frame().percent_label, "100%");
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut meter = TimedMeter::default();
        meter.update(80.0, 100.0, true);
        meter.advance(0.2);
        meter.reset();

        let fresh = TimedMeter::default();
        assert_eq!(meter.frame(), fresh.frame());
        assert_eq!(meter.target_fraction(), 0.0);
        assert_eq!(meter.blink_phase(), 0.0);
    }

    proptest! {
        #[test]
        fn prop_converges_without_overshoot(
            start in 0.0f32..=1.0,
            target in 0.0f32..=1.0,
            steps in proptest::collection::vec(0.0f32..0.5, 1..200),
        ) {
            let mut meter = TimedMeter::default();
            meter.update(start, 1.0, false);
            meter.advance(10.0);
            meter.update(target, 1.0, false);

            let mut distance = (meter.current_fraction() - target).abs();
            for dt in steps {
                meter.advance(dt);
                let now = meter.current_fraction();
                let next = (now - target).abs();
                prop_assert!(next <= distance + 1e-6);
                if start <= target {
                    prop_assert!(now <= target + 1e-6);
                } else {
                    prop_assert!(now >= target - 1e-6);
                }
                distance = next;
            }
        }
    }
}
