//! Domain event fan-out
//!
//! Each event variant goes to exactly one HUD component. The router keeps no
//! HUD state of its own, only its bus subscription.

use super::events::DomainEvent;
use super::state::HudState;
use crate::bus::{EventBus, SubscriberId};

pub struct HudRouter {
    bus: EventBus<DomainEvent>,
    id: SubscriberId,
}

impl HudRouter {
    /// Register with `bus` (not subscribed until [`HudRouter::subscribe`])
    pub fn new(bus: &EventBus<DomainEvent>) -> Self {
        Self {
            bus: bus.clone(),
            id: bus.register(),
        }
    }

    /// Start receiving events. Safe to call repeatedly.
    pub fn subscribe(&self) {
        if self.bus.subscribe(self.id) {
            log::info!("HUD router subscribed");
        }
    }

    /// Stop receiving events. Safe to call repeatedly.
    pub fn unsubscribe(&self) {
        if self.bus.unsubscribe(self.id) {
            log::info!("HUD router unsubscribed");
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.bus.is_subscribed(self.id)
    }

    /// Deliver every pending event to `state`, in publish order.
    /// Returns the number of events handled.
    pub fn pump(&self, state: &mut HudState) -> usize {
        let events = self.bus.drain(self.id);
        let count = events.len();
        for event in events {
            Self::dispatch(event, state);
        }
        count
    }

    /// Route one event to the component that owns it
    pub fn dispatch(event: DomainEvent, state: &mut HudState) {
        match event {
            DomainEvent::Unlock(unlock) => state.notifications.enqueue(unlock),
            DomainEvent::MeterChanged {
                current,
                max,
                overheated,
            } => state.heat.update(current, max, overheated),
            DomainEvent::BadgeActivated { kind, duration } => state.badges.activate(kind, duration),
            DomainEvent::BadgeExpired { kind } => {
                state.badges.expire(kind);
            }
            DomainEvent::GameReset => Self::on_reset(state),
        }
    }

    /// Game (re)start: every component back to its initial state
    pub fn on_reset(state: &mut HudState) {
        log::debug!("HUD reset");
        state.reset();
    }
}

impl Drop for HudRouter {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hud::{IconKind, Unlock, UpgradeKind};

    fn setup() -> (EventBus<DomainEvent>, HudRouter, HudState) {
        let bus = EventBus::new();
        let router = HudRouter::new(&bus);
        router.subscribe();
        (bus, router, HudState::default())
    }

    #[test]
    fn test_not_subscribed_until_asked() {
        let bus = EventBus::new();
        let router = HudRouter::new(&bus);
        assert!(!router.is_subscribed());
        assert_eq!(bus.publish(DomainEvent::GameReset), 0);
    }

    #[test]
    fn test_each_event_reaches_its_component() {
        let (bus, router, mut state) = setup();
        bus.publish(DomainEvent::Unlock(Unlock::new("A", "a", IconKind::Trophy)));
        bus.publish(DomainEvent::MeterChanged {
            current: 40.0,
            max: 80.0,
            overheated: false,
        });
        bus.publish(DomainEvent::BadgeActivated {
            kind: UpgradeKind::Homing,
            duration: 5.0,
        });

        assert_eq!(router.pump(&mut state), 3);
        assert!(state.notifications.is_showing());
        assert_eq!(state.heat.target_fraction(), 0.5);
        assert_eq!(state.badges.remaining_time(UpgradeKind::Homing), 5.0);

        bus.publish(DomainEvent::BadgeExpired {
            kind: UpgradeKind::Homing,
        });
        router.pump(&mut state);
        assert!(!state.badges.is_active(UpgradeKind::Homing));
    }

    #[test]
    fn test_same_tick_events_apply_in_order() {
        let (bus, router, mut state) = setup();
        bus.publish(DomainEvent::BadgeActivated {
            kind: UpgradeKind::Piercing,
            duration: 5.0,
        });
        bus.publish(DomainEvent::BadgeExpired {
            kind: UpgradeKind::Piercing,
        });
        bus.publish(DomainEvent::BadgeActivated {
            kind: UpgradeKind::Piercing,
            duration: 2.0,
        });
        router.pump(&mut state);
        assert_eq!(state.badges.remaining_time(UpgradeKind::Piercing), 2.0);
    }

    #[test]
    fn test_double_subscribe_single_delivery() {
        let (bus, router, mut state) = setup();
        router.subscribe();
        assert_eq!(bus.subscriber_count(), 1);

        bus.publish(DomainEvent::Unlock(Unlock::new("A", "a", IconKind::Trophy)));
        bus.publish(DomainEvent::Unlock(Unlock::new("B", "b", IconKind::Trophy)));
        router.pump(&mut state);
        // A showing, B waiting: each delivered once
        assert_eq!(state.notifications.pending_len(), 1);
    }

    #[test]
    fn test_reset_event_clears_everything() {
        let (bus, router, mut state) = setup();
        bus.publish(DomainEvent::MeterChanged {
            current: 100.0,
            max: 100.0,
            overheated: true,
        });
        bus.publish(DomainEvent::BadgeActivated {
            kind: UpgradeKind::RapidFire,
            duration: 9.0,
        });
        router.pump(&mut state);
        state.tick(0.1);

        bus.publish(DomainEvent::GameReset);
        router.pump(&mut state);
        assert_eq!(state.heat.current_fraction(), 0.0);
        assert!(!state.heat.overheated());
        assert!(state.badges.is_empty());
    }

    #[test]
    fn test_drop_unsubscribes() {
        let bus = EventBus::new();
        {
            let router = HudRouter::new(&bus);
            router.subscribe();
            assert_eq!(bus.subscriber_count(), 1);
        }
        assert_eq!(bus.subscriber_count(), 0);
    }
}
