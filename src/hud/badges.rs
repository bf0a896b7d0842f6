//! Active upgrade badges
//!
//! One countdown per upgrade kind. Re-activating a kind restarts its
//! countdown with the new duration; it never stacks.

use serde::Serialize;

use super::events::UpgradeKind;
use crate::palette::{BadgeStyleTable, Rgba};
use crate::pulse_on;
use crate::settings::{BadgeSettings, SettingsError};

/// A live badge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BadgeEntry {
    pub kind: UpgradeKind,
    /// Seconds left (>= 0)
    pub remaining: f32,
    /// Seconds at activation (> 0)
    pub total: f32,
}

impl BadgeEntry {
    /// Remaining share of the full duration (0-1)
    pub fn fraction(&self) -> f32 {
        (self.remaining / self.total).clamp(0.0, 1.0)
    }
}

/// What the presentation layer draws for one badge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BadgeFrame {
    pub kind: UpgradeKind,
    /// Short label from the style table
    pub label: String,
    /// e.g. "4.3s"
    pub remaining_label: String,
    pub fraction: f32,
    pub color: Rgba,
}

/// Independently expiring upgrade countdowns
#[derive(Debug, Clone)]
pub struct TimedBadgeSet {
    /// Live entries in first-activation order
    entries: Vec<BadgeEntry>,
    /// Low-time pulse position in cycles, wrapped to [0, 1)
    pulse_phase: f32,
    styles: BadgeStyleTable,
    low_threshold: f32,
    pulse_frequency: f32,
    warning_color: Rgba,
}

impl TimedBadgeSet {
    /// Build from settings, validating the style table covers every kind
    pub fn new(settings: &BadgeSettings) -> Result<Self, SettingsError> {
        Ok(Self {
            entries: Vec::new(),
            pulse_phase: 0.0,
            styles: BadgeStyleTable::from_styles(&settings.styles)?,
            low_threshold: settings.low_threshold,
            pulse_frequency: settings.pulse_frequency,
            warning_color: settings.warning_color,
        })
    }

    /// Start (or restart) the countdown for `kind`
    pub fn activate(&mut self, kind: UpgradeKind, duration: f32) {
        if !duration.is_finite() || duration <= 0.0 {
            log::warn!("Ignoring {:?} activation with duration {}", kind, duration);
            return;
        }
        match self.entries.iter_mut().find(|e| e.kind == kind) {
            Some(entry) => {
                entry.remaining = duration;
                entry.total = duration;
                log::debug!("{} refreshed ({:.1}s)", kind.as_str(), duration);
            }
            None => {
                self.entries.push(BadgeEntry {
                    kind,
                    remaining: duration,
                    total: duration,
                });
                log::debug!("{} active ({:.1}s)", kind.as_str(), duration);
            }
        }
    }

    /// Count every badge down by `dt`. Returns kinds that hit zero this tick
    /// (already removed).
    pub fn tick(&mut self, dt: f32) -> Vec<UpgradeKind> {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.pulse_phase = (self.pulse_phase + dt * self.pulse_frequency).rem_euclid(1.0);

        let mut expired = Vec::new();
        self.entries.retain_mut(|entry| {
            entry.remaining = (entry.remaining - dt).max(0.0);
            if entry.remaining == 0.0 {
                expired.push(entry.kind);
                false
            } else {
                true
            }
        });
        for kind in &expired {
            log::debug!("{} ran out", kind.as_str());
        }
        expired
    }

    /// Upstream says `kind` ended. Removes it immediately, whatever the
    /// local countdown says. Returns false if it was not active.
    pub fn expire(&mut self, kind: UpgradeKind) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.kind != kind);
        let removed = self.entries.len() != before;
        if removed {
            log::debug!("{} expired upstream", kind.as_str());
        }
        removed
    }

    /// Seconds left for `kind`, or 0 if not active
    pub fn remaining_time(&self, kind: UpgradeKind) -> f32 {
        self.get(kind).map(|e| e.remaining).unwrap_or(0.0)
    }

    pub fn get(&self, kind: UpgradeKind) -> Option<&BadgeEntry> {
        self.entries.iter().find(|e| e.kind == kind)
    }

    pub fn is_active(&self, kind: UpgradeKind) -> bool {
        self.get(kind).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[BadgeEntry] {
        &self.entries
    }

    /// Clear all badges without reporting expiry
    pub fn reset(&mut self) {
        self.entries.clear();
        self.pulse_phase = 0.0;
    }

    /// Badge color: base hue, alternating with the warning hue when low
    pub fn pulse_color(&self, entry: &BadgeEntry) -> Rgba {
        let base = self.styles.get(entry.kind).color;
        if entry.remaining <= self.low_threshold && pulse_on(self.pulse_phase) {
            self.warning_color
        } else {
            base
        }
    }

    pub fn frames(&self) -> Vec<BadgeFrame> {
        self.entries
            .iter()
            .map(|entry| BadgeFrame {
                kind: entry.kind,
                label: self.styles.get(entry.kind).label.clone(),
                remaining_label: format!("{:.1}s", entry.remaining),
                fraction: entry.fraction(),
                color: self.pulse_color(entry),
            })
            .collect()
    }
}

impl Default for TimedBadgeSet {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            pulse_phase: 0.0,
            styles: BadgeStyleTable::default(),
            low_threshold: crate::consts::BADGE_LOW_THRESHOLD,
            pulse_frequency: crate::consts::BADGE_PULSE_FREQUENCY,
            warning_color: crate::palette::CRITICAL,
        }
    }
}
