//! HUD colors
//!
//! - Heat gradient: fill color by fraction, cool to critical
//! - Badge style table: per-upgrade color and short label, checked for
//!   completeness once at startup so per-frame lookups never miss

use glam::Vec4;
use serde::{Deserialize, Serialize};

use crate::hud::UpgradeKind;
use crate::settings::SettingsError;

/// Linear RGBA, each channel 0-1
pub type Rgba = Vec4;

pub const COOL: Rgba = Vec4::new(0.2, 0.8, 1.0, 1.0);
pub const WARM: Rgba = Vec4::new(1.0, 0.85, 0.2, 1.0);
pub const HOT: Rgba = Vec4::new(1.0, 0.5, 0.1, 1.0);
pub const CRITICAL: Rgba = Vec4::new(1.0, 0.15, 0.1, 1.0);

/// One point on a gradient ramp
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Fraction (0-1) at which `color` is exact
    pub at: f32,
    pub color: Rgba,
}

/// Piecewise-linear color ramp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<GradientStop>", into = "Vec<GradientStop>")]
pub struct Gradient {
    stops: Vec<GradientStop>,
}

impl Default for Gradient {
    fn default() -> Self {
        Self::heat()
    }
}

impl Gradient {
    /// Build from stops (sorted by position). Empty ramps are rejected.
    pub fn new(mut stops: Vec<GradientStop>) -> Result<Self, SettingsError> {
        if stops.is_empty() {
            return Err(SettingsError::EmptyGradient);
        }
        stops.sort_by(|a, b| a.at.total_cmp(&b.at));
        Ok(Self { stops })
    }

    /// Weapon heat ramp: cyan, yellow, orange, red
    pub fn heat() -> Self {
        Self {
            stops: vec![
                GradientStop { at: 0.0, color: COOL },
                GradientStop { at: 0.5, color: WARM },
                GradientStop { at: 0.8, color: HOT },
                GradientStop { at: 1.0, color: CRITICAL },
            ],
        }
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Color at `fraction` (clamped to the end stops)
    pub fn sample(&self, fraction: f32) -> Rgba {
        let Some(first) = self.stops.first() else {
            return CRITICAL;
        };
        if fraction.is_nan() || fraction <= first.at {
            return first.color;
        }
        if let Some(last) = self.stops.last() {
            if fraction >= last.at {
                return last.color;
            }
        }
        for pair in self.stops.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if fraction <= hi.at {
                let span = hi.at - lo.at;
                if span <= f32::EPSILON {
                    return hi.color;
                }
                return lo.color.lerp(hi.color, (fraction - lo.at) / span);
            }
        }
        first.color
    }
}

impl TryFrom<Vec<GradientStop>> for Gradient {
    type Error = SettingsError;

    fn try_from(stops: Vec<GradientStop>) -> Result<Self, Self::Error> {
        Self::new(stops)
    }
}

impl From<Gradient> for Vec<GradientStop> {
    fn from(gradient: Gradient) -> Self {
        gradient.stops
    }
}

/// Color and label for one upgrade badge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeStyle {
    pub kind: UpgradeKind,
    pub color: Rgba,
    /// Short label drawn on the badge (e.g. "SPR")
    pub label: String,
}

/// Default badge styles, one per upgrade kind
pub fn default_badge_styles() -> Vec<BadgeStyle> {
    let style = |kind, color, label: &str| BadgeStyle {
        kind,
        color,
        label: label.to_string(),
    };
    vec![
        style(UpgradeKind::SpreadShot, Vec4::new(1.0, 0.6, 0.1, 1.0), "SPR"),
        style(UpgradeKind::Piercing, Vec4::new(0.2, 0.9, 1.0, 1.0), "PRC"),
        style(UpgradeKind::RapidFire, Vec4::new(1.0, 0.9, 0.2, 1.0), "RPD"),
        style(UpgradeKind::Homing, Vec4::new(0.9, 0.3, 1.0, 1.0), "HOM"),
        style(UpgradeKind::DamageBoost, Vec4::new(1.0, 0.3, 0.3, 1.0), "DMG"),
    ]
}

/// Complete kind -> style mapping, indexed by [`UpgradeKind::index`]
#[derive(Debug, Clone)]
pub struct BadgeStyleTable {
    styles: Vec<BadgeStyle>,
}

impl BadgeStyleTable {
    /// Validate that every upgrade kind has exactly one style
    pub fn from_styles(styles: &[BadgeStyle]) -> Result<Self, SettingsError> {
        let mut slots: Vec<Option<BadgeStyle>> = vec![None; UpgradeKind::ALL.len()];
        for style in styles {
            let slot = &mut slots[style.kind.index()];
            if slot.is_some() {
                return Err(SettingsError::DuplicateBadgeStyle(style.kind));
            }
            *slot = Some(style.clone());
        }

        let mut table = Vec::with_capacity(slots.len());
        for (kind, slot) in UpgradeKind::ALL.iter().zip(slots) {
            table.push(slot.ok_or(SettingsError::MissingBadgeStyle(*kind))?);
        }
        Ok(Self { styles: table })
    }

    pub fn get(&self, kind: UpgradeKind) -> &BadgeStyle {
        &self.styles[kind.index()]
    }
}

impl Default for BadgeStyleTable {
    fn default() -> Self {
        Self {
            styles: default_badge_styles(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Rgba, b: Rgba) -> bool {
        (a - b).abs().max_element() < 1e-5
    }

    #[test]
    fn test_gradient_endpoints_and_midpoints() {
        let g = Gradient::heat();
        assert!(close(g.sample(0.0), COOL));
        assert!(close(g.sample(-1.0), COOL));
        assert!(close(g.sample(1.0), CRITICAL));
        assert!(close(g.sample(5.0), CRITICAL));
        assert!(close(g.sample(0.5), WARM));
        assert!(close(g.sample(0.25), COOL.lerp(WARM, 0.5)));
    }

    #[test]
    fn test_gradient_sorts_and_rejects_empty() {
        assert!(matches!(Gradient::new(Vec::new()), Err(SettingsError::EmptyGradient)));

        let g = Gradient::new(vec![
            GradientStop { at: 1.0, color: CRITICAL },
            GradientStop { at: 0.0, color: COOL },
        ])
        .unwrap();
        assert_eq!(g.stops()[0].at, 0.0);
        assert!(close(g.sample(0.5), COOL.lerp(CRITICAL, 0.5)));
    }

    #[test]
    fn test_default_styles_cover_every_kind() {
        let table = BadgeStyleTable::from_styles(&default_badge_styles()).unwrap();
        for kind in UpgradeKind::ALL {
            assert_eq!(table.get(kind).kind, kind);
        }
        assert_eq!(table.get(UpgradeKind::Homing).label, "HOM");
    }

    #[test]
    fn test_style_table_rejects_gaps_and_duplicates() {
        let mut styles = default_badge_styles();
        styles.retain(|s| s.kind != UpgradeKind::RapidFire);
        assert!(matches!(
            BadgeStyleTable::from_styles(&styles),
            Err(SettingsError::MissingBadgeStyle(UpgradeKind::RapidFire))
        ));

        let mut styles = default_badge_styles();
        styles.push(styles[0].clone());
        assert!(matches!(
            BadgeStyleTable::from_styles(&styles),
            Err(SettingsError::DuplicateBadgeStyle(UpgradeKind::SpreadShot))
        ));
    }
}
