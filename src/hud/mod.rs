//! HUD update core
//!
//! Domain events come in over the bus, the router hands each one to the
//! component that owns it, and the presentation layer reads a [`HudFrame`]
//! every frame. All timing uses unscaled (wall-clock) seconds so the HUD keeps
//! animating while gameplay is paused.

pub mod badges;
pub mod events;
pub mod meter;
pub mod notification;
pub mod router;
pub mod runtime;
pub mod state;

pub use badges::{BadgeEntry, BadgeFrame, TimedBadgeSet};
pub use events::{DomainEvent, IconKind, Unlock, UpgradeKind};
pub use meter::{MeterFrame, TimedMeter};
pub use notification::{DisplayPhase, NotificationFrame, NotificationQueue};
pub use router::HudRouter;
pub use runtime::{Hud, HudPresenter, PresenterStatus};
pub use state::{HudFrame, HudState};
