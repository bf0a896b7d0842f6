//! Domain events consumed by the HUD
//!
//! Produced by gameplay systems, delivered over the [`EventBus`](crate::bus::EventBus).

use serde::{Deserialize, Serialize};

/// Weapon upgrade types shown as timed badges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UpgradeKind {
    SpreadShot,
    Piercing,
    RapidFire,
    Homing,
    DamageBoost,
}

impl UpgradeKind {
    /// Every upgrade kind, in table order
    pub const ALL: [UpgradeKind; 5] = [
        UpgradeKind::SpreadShot,
        UpgradeKind::Piercing,
        UpgradeKind::RapidFire,
        UpgradeKind::Homing,
        UpgradeKind::DamageBoost,
    ];

    /// Dense index into per-kind tables
    pub fn index(self) -> usize {
        match self {
            UpgradeKind::SpreadShot => 0,
            UpgradeKind::Piercing => 1,
            UpgradeKind::RapidFire => 2,
            UpgradeKind::Homing => 3,
            UpgradeKind::DamageBoost => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UpgradeKind::SpreadShot => "Spread Shot",
            UpgradeKind::Piercing => "Piercing",
            UpgradeKind::RapidFire => "Rapid Fire",
            UpgradeKind::Homing => "Homing",
            UpgradeKind::DamageBoost => "Damage Boost",
        }
    }
}

/// Icon shown next to an unlock notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IconKind {
    #[default]
    Trophy,
    Combat,
    Survival,
    Score,
    Secret,
}

/// An achievement/unlock payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unlock {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub icon: IconKind,
}

impl Unlock {
    pub fn new(name: impl Into<String>, description: impl Into<String>, icon: IconKind) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            icon,
        }
    }

    /// Name to display (placeholder when blank)
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            crate::consts::UNKNOWN_LABEL
        } else {
            &self.name
        }
    }
}

/// Events the HUD reacts to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DomainEvent {
    /// Achievement or unlock to announce
    Unlock(Unlock),
    /// Weapon heat (or any meter) changed
    MeterChanged {
        current: f32,
        max: f32,
        overheated: bool,
    },
    /// Upgrade picked up (or refreshed)
    BadgeActivated { kind: UpgradeKind, duration: f32 },
    /// Upgrade ended upstream
    BadgeExpired { kind: UpgradeKind },
    /// New run started
    GameReset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upgrade_index_matches_table_order() {
        for (i, kind) in UpgradeKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_blank_name_shows_placeholder() {
        let unlock = Unlock::new("  ", "Mystery", IconKind::Secret);
        assert_eq!(unlock.display_name(), "???");
        let unlock = Unlock::new("First Blood", "Kill your first enemy", IconKind::Combat);
        assert_eq!(unlock.display_name(), "First Blood");
    }

    #[test]
    fn test_event_json_shape() {
        let json = r#"{"BadgeActivated":{"kind":"Homing","duration":8.0}}"#;
        let event: DomainEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            DomainEvent::BadgeActivated {
                kind: UpgradeKind::Homing,
                duration: 8.0
            }
        );

        let reset: DomainEvent = serde_json::from_str(r#""GameReset""#).unwrap();
        assert_eq!(reset, DomainEvent::GameReset);
    }
}
