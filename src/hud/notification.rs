//! Unlock notification queue
//!
//! Bursts of unlocks are shown one at a time, in arrival order. Each display
//! cycle is a small state machine advanced by `tick(dt)`:
//!
//! ```text
//! Idle -> EasingIn -> Holding -> EasingOut -> Gap -> (next | Idle)
//! ```
//!
//! There is exactly one cycle in flight: `enqueue` only starts one when the
//! queue is idle, otherwise the payload waits its turn.

use std::collections::VecDeque;

use glam::Vec2;
use serde::Serialize;

use super::events::{IconKind, Unlock};
use crate::ease_out_cubic;
use crate::settings::NotificationTimings;

/// Display cycle stage
#[derive(Debug, Clone, PartialEq)]
enum Cycle {
    Idle,
    EasingIn { payload: Unlock, elapsed: f32 },
    Holding { payload: Unlock, elapsed: f32 },
    EasingOut { payload: Unlock, elapsed: f32 },
    Gap { elapsed: f32 },
}

/// Public view of the cycle stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DisplayPhase {
    Idle,
    EasingIn,
    Holding,
    EasingOut,
    Gap,
}

/// What the presentation layer draws for the active notification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationFrame {
    pub name: String,
    pub description: String,
    pub icon: IconKind,
    pub position: Vec2,
    pub opacity: f32,
}

/// FIFO of pending unlocks plus the single in-flight display cycle
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    pending: VecDeque<Unlock>,
    cycle: Cycle,
    timings: NotificationTimings,
}

impl NotificationQueue {
    pub fn new(timings: NotificationTimings) -> Self {
        Self {
            pending: VecDeque::new(),
            cycle: Cycle::Idle,
            timings,
        }
    }

    /// Queue a payload. Starts a display cycle if none is running.
    pub fn enqueue(&mut self, payload: Unlock) {
        if matches!(self.cycle, Cycle::Idle) {
            log::debug!("Showing unlock '{}'", payload.display_name());
            self.cycle = Cycle::EasingIn {
                payload,
                elapsed: 0.0,
            };
        } else {
            log::debug!(
                "Queued unlock '{}' ({} waiting)",
                payload.display_name(),
                self.pending.len() + 1
            );
            self.pending.push_back(payload);
        }
    }

    /// True while a display cycle (including the trailing gap) is running
    pub fn is_showing(&self) -> bool {
        !matches!(self.cycle, Cycle::Idle)
    }

    /// Payloads waiting behind the active one
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn phase(&self) -> DisplayPhase {
        match self.cycle {
            Cycle::Idle => DisplayPhase::Idle,
            Cycle::EasingIn { .. } => DisplayPhase::EasingIn,
            Cycle::Holding { .. } => DisplayPhase::Holding,
            Cycle::EasingOut { .. } => DisplayPhase::EasingOut,
            Cycle::Gap { .. } => DisplayPhase::Gap,
        }
    }

    /// Advance the active cycle by `dt` seconds of unscaled time.
    ///
    /// Time left over when a stage ends carries into the next one, so a long
    /// frame can cross several stages.
    pub fn tick(&mut self, dt: f32) {
        let mut budget = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        while budget > 0.0 && !matches!(self.cycle, Cycle::Idle) {
            let cycle = std::mem::replace(&mut self.cycle, Cycle::Idle);
            let (next, rest) = self.step(cycle, budget);
            self.cycle = next;
            budget = rest;
        }
    }

    /// One stage step: returns the new stage and unused time
    fn step(&mut self, cycle: Cycle, budget: f32) -> (Cycle, f32) {
        let t = &self.timings;
        match cycle {
            Cycle::Idle => (Cycle::Idle, 0.0),
            Cycle::EasingIn { payload, elapsed } => match overflow(elapsed + budget, t.ease_in) {
                None => (
                    Cycle::EasingIn {
                        payload,
                        elapsed: elapsed + budget,
                    },
                    0.0,
                ),
                Some(rest) => (
                    Cycle::Holding {
                        payload,
                        elapsed: 0.0,
                    },
                    rest,
                ),
            },
            Cycle::Holding { payload, elapsed } => match overflow(elapsed + budget, t.hold) {
                None => (
                    Cycle::Holding {
                        payload,
                        elapsed: elapsed + budget,
                    },
                    0.0,
                ),
                Some(rest) => (
                    Cycle::EasingOut {
                        payload,
                        elapsed: 0.0,
                    },
                    rest,
                ),
            },
            Cycle::EasingOut { payload, elapsed } => match overflow(elapsed + budget, t.ease_out) {
                None => (
                    Cycle::EasingOut {
                        payload,
                        elapsed: elapsed + budget,
                    },
                    0.0,
                ),
                Some(rest) => {
                    log::debug!("Dismissed unlock '{}'", payload.display_name());
                    (Cycle::Gap { elapsed: 0.0 }, rest)
                }
            },
            Cycle::Gap { elapsed } => match overflow(elapsed + budget, t.gap) {
                None => (
                    Cycle::Gap {
                        elapsed: elapsed + budget,
                    },
                    0.0,
                ),
                Some(rest) => match self.pending.pop_front() {
                    Some(payload) => {
                        log::debug!("Showing unlock '{}'", payload.display_name());
                        (
                            Cycle::EasingIn {
                                payload,
                                elapsed: 0.0,
                            },
                            rest,
                        )
                    }
                    None => {
                        log::debug!("Notification queue drained");
                        (Cycle::Idle, 0.0)
                    }
                },
            },
        }
    }

    /// Snapshot of the visible notification, if any (none during the gap)
    pub fn frame(&self) -> Option<NotificationFrame> {
        let t = &self.timings;
        let (payload, progress) = match &self.cycle {
            Cycle::Idle | Cycle::Gap { .. } => return None,
            Cycle::EasingIn { payload, elapsed } => {
                (payload, ease_out_cubic(stage_progress(*elapsed, t.ease_in)))
            }
            Cycle::Holding { payload, .. } => (payload, 1.0),
            Cycle::EasingOut { payload, elapsed } => {
                (payload, 1.0 - stage_progress(*elapsed, t.ease_out))
            }
        };

        Some(NotificationFrame {
            name: payload.display_name().to_string(),
            description: payload.description.clone(),
            icon: payload.icon,
            position: t.hidden_position.lerp(t.shown_position, progress),
            opacity: progress,
        })
    }

    /// Drop everything, including the in-flight cycle
    pub fn reset(&mut self) {
        self.pending.clear();
        self.cycle = Cycle::Idle;
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(NotificationTimings::default())
    }
}

/// Time past the end of a stage, or None if the stage is still running
#[inline]
fn overflow(elapsed: f32, duration: f32) -> Option<f32> {
    (elapsed >= duration).then(|| elapsed - duration)
}

/// Linear 0-1 progress through a stage (zero-length stages are complete)
#[inline]
fn stage_progress(elapsed: f32, duration: f32) -> f32 {
    if duration <= 0.0 {
        1.0
    } else {
        (elapsed / duration).clamp(0.0, 1.0)
    }
}
