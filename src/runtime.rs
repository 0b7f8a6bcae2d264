//! The per-tick driver.
//!
//! The host calls [`tick`] once per frame with that frame's [`TickDelta`];
//! every running tween registered on the current thread advances by it.
//! Tweens register themselves when started and are pruned once they go idle
//! or are dropped. Everything is thread-local: tweens built on one thread
//! are driven by that thread's ticks, matching the crate's single-threaded
//! cooperative model.

use crate::tween::AnyTween;
use std::cell::RefCell;
use std::rc::Weak;

/// Frame timing as reported by the host for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickDelta {
    /// Seconds since the last tick on the host's scaled clock (already
    /// multiplied by the global time scale).
    pub scaled: f32,
    /// Raw seconds since the last tick, unaffected by the time scale.
    pub unscaled: f32,
    /// The host's global time scale signal; non-positive means globally
    /// paused, which freezes scaled tweens.
    pub time_scale: f32,
}

impl TickDelta {
    pub fn new(scaled: f32, unscaled: f32, time_scale: f32) -> Self {
        TickDelta {
            scaled,
            unscaled,
            time_scale,
        }
    }

    /// For hosts without separate clocks: both clocks advance by `seconds`
    /// at time scale 1.
    pub fn from_seconds(seconds: f32) -> Self {
        TickDelta::new(seconds, seconds, 1.0)
    }
}

struct Runtime {
    scheduled: RefCell<Vec<Weak<dyn AnyTween>>>,
}

impl Runtime {
    const fn new() -> Self {
        Runtime {
            scheduled: RefCell::new(Vec::new()),
        }
    }

    fn tick(&self, delta: TickDelta) {
        // Advance a snapshot: callbacks may start new tweens (registered for
        // the NEXT tick, which is the intended one-tick startup delay) or
        // stop scheduled ones mid-pass.
        let pass: Vec<_> = self.scheduled.borrow().clone();
        for weak in pass {
            if let Some(tween) = weak.upgrade() {
                tween.tick(&delta);
            }
        }

        // Prune dropped and idle entries; idle tweens are told so they
        // re-register on their next start.
        self.scheduled.borrow_mut().retain(|weak| match weak.upgrade() {
            Some(tween) if tween.is_active() => true,
            Some(tween) => {
                tween.unschedule();
                false
            }
            None => false,
        });
    }

    fn schedule(&self, tween: Weak<dyn AnyTween>) {
        self.scheduled.borrow_mut().push(tween);
    }

    fn scheduled_count(&self) -> usize {
        self.scheduled.borrow().len()
    }
}

thread_local! {
    static RUNTIME: Runtime = const { Runtime::new() };
}

/// Advance every running tween on this thread by one frame.
pub fn tick(delta: TickDelta) {
    RUNTIME.with(|runtime| runtime.tick(delta));
}

/// Number of tweens currently scheduled on this thread, including ones that
/// finished since the last tick and have not been pruned yet.
pub fn scheduled_count() -> usize {
    RUNTIME.with(Runtime::scheduled_count)
}

pub(crate) fn schedule(tween: Weak<dyn AnyTween>) {
    RUNTIME.with(|runtime| runtime.schedule(tween));
}
