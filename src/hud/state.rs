//! HUD component state and the per-frame snapshot

use serde::Serialize;

use super::badges::{BadgeFrame, TimedBadgeSet};
use super::events::UpgradeKind;
use super::meter::{MeterFrame, TimedMeter};
use super::notification::{NotificationFrame, NotificationQueue};
use crate::settings::{HudSettings, SettingsError};

/// Read-only snapshot handed to the presentation layer each frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudFrame {
    pub notification: Option<NotificationFrame>,
    pub heat: MeterFrame,
    /// Active badges, first-activation order
    pub badges: Vec<BadgeFrame>,
    /// Badges whose countdown ran out this frame
    pub expired: Vec<UpgradeKind>,
}

/// Everything the HUD remembers between frames
#[derive(Debug, Clone, Default)]
pub struct HudState {
    pub notifications: NotificationQueue,
    pub heat: TimedMeter,
    pub badges: TimedBadgeSet,
}

impl HudState {
    pub fn new(settings: &HudSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            notifications: NotificationQueue::new(settings.notification.clone()),
            heat: TimedMeter::new(settings.meter.clone()),
            badges: TimedBadgeSet::new(&settings.badges)?,
        })
    }

    /// Advance all animations by `dt` seconds of unscaled time
    pub fn tick(&mut self, dt: f32) -> HudFrame {
        self.notifications.tick(dt);
        self.heat.advance(dt);
        let expired = self.badges.tick(dt);
        self.snapshot(expired)
    }

    /// Current snapshot without advancing time
    pub fn snapshot(&self, expired: Vec<UpgradeKind>) -> HudFrame {
        HudFrame {
            notification: self.notifications.frame(),
            heat: self.heat.frame(),
            badges: self.badges.frames(),
            expired,
        }
    }

    /// Back to the pre-first-event state
    pub fn reset(&mut self) {
        self.notifications.reset();
        self.heat.reset();
        self.badges.reset();
    }
}
