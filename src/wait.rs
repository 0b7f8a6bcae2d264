//! Poll-able wait predicates.
//!
//! The crate has no scheduler of its own, so waiting is cooperative: these
//! types expose an `is_pending` check for the host's sequencing construct
//! (coroutine, task, state machine) to poll once per tick.

use crate::layer::TweenLayer;
use crate::tween::{AnyTween, Tween};
use std::rc::Weak;

/// Pending while a single tween is still animating.
///
/// Holds the tween weakly: a tween that was dropped is treated as finished.
pub struct WaitForTween {
    tween: Weak<dyn AnyTween>,
}

impl WaitForTween {
    pub fn new<T: Copy + 'static>(tween: &Tween<T>) -> Self {
        WaitForTween {
            tween: tween.as_weak(),
        }
    }

    /// True while the tween is alive and active.
    pub fn is_pending(&self) -> bool {
        self.tween
            .upgrade()
            .is_some_and(|tween| tween.is_active())
    }
}

/// Pending while any live tween in a layer is still animating.
pub struct WaitForLayer {
    layer: TweenLayer,
}

impl WaitForLayer {
    pub fn new(layer: &TweenLayer) -> Self {
        WaitForLayer {
            layer: layer.clone(),
        }
    }

    /// True while any live member of the layer is active.
    pub fn is_pending(&self) -> bool {
        self.layer.has_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{self, TickDelta};

    #[test]
    fn wait_for_tween_clears_on_completion() {
        let tween = Tween::between(0.0_f32, 1.0, 2.0).build().unwrap();
        let wait = WaitForTween::new(&tween);

        assert!(wait.is_pending());
        runtime::tick(TickDelta::from_seconds(1.0));
        assert!(wait.is_pending());
        runtime::tick(TickDelta::from_seconds(1.0));
        assert!(!wait.is_pending());
    }

    #[test]
    fn wait_for_dropped_tween_is_never_pending() {
        let tween = Tween::between(0.0_f32, 1.0, 10.0).build().unwrap();
        let wait = WaitForTween::new(&tween);
        assert!(wait.is_pending());
        drop(tween);
        assert!(!wait.is_pending());
    }

    #[test]
    fn wait_for_layer_clears_when_the_last_member_finishes() {
        let layer = TweenLayer::new();
        let _quick = Tween::between(0.0_f32, 1.0, 1.0)
            .layer(&layer)
            .build()
            .unwrap();
        let slow = Tween::between(0.0_f32, 1.0, 3.0)
            .layer(&layer)
            .build()
            .unwrap();
        let wait = WaitForLayer::new(&layer);

        runtime::tick(TickDelta::from_seconds(2.0));
        // The quick tween is done, the slow one keeps the layer pending.
        assert!(wait.is_pending());

        runtime::tick(TickDelta::from_seconds(2.0));
        assert!(!wait.is_pending());
        assert!(!slow.is_active());
    }

    #[test]
    fn wait_for_layer_ignores_stopped_members() {
        let layer = TweenLayer::new();
        let tween = Tween::between(0.0_f32, 1.0, 10.0)
            .layer(&layer)
            .build()
            .unwrap();
        let wait = WaitForLayer::new(&layer);

        assert!(wait.is_pending());
        tween.stop(false);
        assert!(!wait.is_pending());
    }
}
