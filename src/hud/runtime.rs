//! HUD context: wires the bus, router and component state together and hands
//! each frame to the presentation layer.
//!
//! Lifecycle:
//! 1. `Hud::new` validates settings and registers with the bus
//! 2. `activate` subscribes
//! 3. `frame(dt, presenter)` once per rendered frame
//! 4. `teardown` (or a presenter reporting `Detached`) unsubscribes and drains
//!
//! After teardown `frame` does nothing until `activate` is called again.

use super::events::DomainEvent;
use super::router::HudRouter;
use super::state::{HudFrame, HudState};
use crate::bus::EventBus;
use crate::settings::{HudSettings, SettingsError};

/// Presenter's answer after receiving a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenterStatus {
    /// Keep going
    Attached,
    /// The host object is gone; stop producing updates
    Detached,
}

/// Anything that draws a [`HudFrame`]
pub trait HudPresenter {
    fn present(&mut self, frame: &HudFrame) -> PresenterStatus;
}

impl<F> HudPresenter for F
where
    F: FnMut(&HudFrame) -> PresenterStatus,
{
    fn present(&mut self, frame: &HudFrame) -> PresenterStatus {
        self(frame)
    }
}

pub struct Hud {
    router: HudRouter,
    state: HudState,
    active: bool,
}

impl Hud {
    pub fn new(bus: &EventBus<DomainEvent>, settings: &HudSettings) -> Result<Self, SettingsError> {
        Ok(Self {
            router: HudRouter::new(bus),
            state: HudState::new(settings)?,
            active: false,
        })
    }

    /// Subscribe and start producing frames. Idempotent.
    pub fn activate(&mut self) {
        self.router.subscribe();
        if !self.active {
            log::info!("HUD activated");
        }
        self.active = true;
    }

    /// Unsubscribe and drop queued notifications. Idempotent.
    pub fn teardown(&mut self) {
        self.router.unsubscribe();
        self.state.notifications.reset();
        if self.active {
            log::info!("HUD torn down");
        }
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Game (re)start without going through the bus
    pub fn on_reset(&mut self) {
        HudRouter::on_reset(&mut self.state);
    }

    pub fn state(&self) -> &HudState {
        &self.state
    }

    /// Handle pending events, advance by `dt` (unscaled seconds) and present.
    ///
    /// Returns false if no frame was produced (inactive, or the presenter
    /// detached during this call).
    pub fn frame(&mut self, dt: f32, presenter: &mut impl HudPresenter) -> bool {
        if !self.active {
            return false;
        }
        self.router.pump(&mut self.state);
        let frame = self.state.tick(dt);
        match presenter.present(&frame) {
            PresenterStatus::Attached => true,
            PresenterStatus::Detached => {
                log::info!("Presenter detached");
                self.teardown();
                false
            }
        }
    }
}
