//! HUD settings
//!
//! Timings and rates for every HUD component. Stored as JSON; any field left
//! out of the file falls back to its default.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::hud::UpgradeKind;
use crate::palette::{self, BadgeStyle, BadgeStyleTable, Gradient, Rgba};

/// Settings load/validation failures
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{field} must be finite and non-negative, got {value}")]
    InvalidValue { field: &'static str, value: f32 },

    #[error("{field} must be greater than zero, got {value}")]
    NonPositiveRate { field: &'static str, value: f32 },

    #[error("notification needs a non-zero ease_in or hold to ever be visible")]
    InvisibleNotification,

    #[error("gradient needs at least one stop")]
    EmptyGradient,

    #[error("no badge style for {0:?}")]
    MissingBadgeStyle(UpgradeKind),

    #[error("badge style for {0:?} defined more than once")]
    DuplicateBadgeStyle(UpgradeKind),
}

/// Unlock notification timing (seconds) and slide anchors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationTimings {
    pub ease_in: f32,
    pub hold: f32,
    pub ease_out: f32,
    /// Pause after ease-out before the next queued notification
    pub gap: f32,
    /// Off-screen anchor the panel slides from/to
    pub hidden_position: Vec2,
    /// On-screen resting anchor
    pub shown_position: Vec2,
}

impl Default for NotificationTimings {
    fn default() -> Self {
        Self {
            ease_in: NOTIFY_EASE_IN,
            hold: NOTIFY_HOLD,
            ease_out: NOTIFY_EASE_OUT,
            gap: NOTIFY_GAP,
            hidden_position: Vec2::new(0.0, 120.0),
            shown_position: Vec2::new(0.0, -40.0),
        }
    }
}

impl NotificationTimings {
    /// Full display cycle for one notification, gap included
    pub fn cycle_duration(&self) -> f32 {
        self.ease_in + self.hold + self.ease_out + self.gap
    }
}

/// Heat meter smoothing and warning blink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeterSettings {
    /// Exponential approach rate toward the target fraction (1/s)
    pub smoothing_rate: f32,
    /// Overheat warning blink rate (Hz)
    pub blink_rate: f32,
    pub gradient: Gradient,
}

impl Default for MeterSettings {
    fn default() -> Self {
        Self {
            smoothing_rate: METER_SMOOTHING_RATE,
            blink_rate: METER_BLINK_RATE,
            gradient: Gradient::heat(),
        }
    }
}

/// Upgrade badge countdown display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BadgeSettings {
    /// Pulse once remaining time drops to this (seconds)
    pub low_threshold: f32,
    /// Pulse rate (Hz), independent of the badge duration
    pub pulse_frequency: f32,
    pub warning_color: Rgba,
    pub styles: Vec<BadgeStyle>,
}

impl Default for BadgeSettings {
    fn default() -> Self {
        Self {
            low_threshold: BADGE_LOW_THRESHOLD,
            pulse_frequency: BADGE_PULSE_FREQUENCY,
            warning_color: palette::CRITICAL,
            styles: palette::default_badge_styles(),
        }
    }
}

/// All HUD settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudSettings {
    pub notification: NotificationTimings,
    pub meter: MeterSettings,
    pub badges: BadgeSettings,
}

impl HudSettings {
    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json_pretty(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file. A missing file yields defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let settings = Self::from_json(&json)?;
                log::info!("Loaded HUD settings from {}", path.display());
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Reject values that would stall or reverse animations
    pub fn validate(&self) -> Result<(), SettingsError> {
        let n = &self.notification;
        let m = &self.meter;
        let b = &self.badges;
        let checks = [
            ("notification.ease_in", n.ease_in),
            ("notification.hold", n.hold),
            ("notification.ease_out", n.ease_out),
            ("notification.gap", n.gap),
            ("badges.low_threshold", b.low_threshold),
        ];
        for (field, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(SettingsError::InvalidValue { field, value });
            }
        }
        let rates = [
            ("meter.smoothing_rate", m.smoothing_rate),
            ("meter.blink_rate", m.blink_rate),
            ("badges.pulse_frequency", b.pulse_frequency),
        ];
        for (field, value) in rates {
            if !value.is_finite() || value <= 0.0 {
                return Err(SettingsError::NonPositiveRate { field, value });
            }
        }
        if n.ease_in == 0.0 && n.hold == 0.0 {
            return Err(SettingsError::InvisibleNotification);
        }
        if m.gradient.stops().is_empty() {
            return Err(SettingsError::EmptyGradient);
        }
        BadgeStyleTable::from_styles(&b.styles)?;
        Ok(())
    }
}
