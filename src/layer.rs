//! Grouped playback control.
//!
//! A [`TweenLayer`] tracks a set of tweens without owning them, so whole
//! groups can be started, stopped, paused or time-scaled at once. Membership
//! is weak: a tween whose last handle is dropped disappears from its layer,
//! and a layer never keeps a tween alive.

use crate::tween::{validate_duration, AnyTween, TweenError};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

struct LayerInner {
    paused: Cell<bool>,
    speed: Cell<f32>,
    members: RefCell<Vec<Weak<dyn AnyTween>>>,
}

/// Handle to a layer. Clones share the same layer; tweens register with the
/// layer they are built on (the default layer unless chosen otherwise).
#[derive(Clone)]
pub struct TweenLayer {
    inner: Rc<LayerInner>,
}

impl TweenLayer {
    /// A fresh, empty layer with speed 1 and pause off.
    pub fn new() -> Self {
        TweenLayer {
            inner: Rc::new(LayerInner {
                paused: Cell::new(false),
                speed: Cell::new(1.0),
                members: RefCell::new(Vec::new()),
            }),
        }
    }

    /// The layer tweens land on when none is chosen. One per thread, alive
    /// for the thread's lifetime, speed 1 and unpaused until told otherwise.
    pub fn default_layer() -> Self {
        thread_local! {
            static DEFAULT: TweenLayer = TweenLayer::new();
        }
        DEFAULT.with(TweenLayer::clone)
    }

    /// All member tweens consume ticks without advancing while set.
    pub fn is_paused(&self) -> bool {
        self.inner.paused.get()
    }

    pub fn set_paused(&self, paused: bool) {
        self.inner.paused.set(paused);
    }

    /// Playback speed (time factor) applied to every member tween.
    pub fn speed(&self) -> f32 {
        self.inner.speed.get()
    }

    /// Clamped to be non-negative; a speed of 0 freezes the layer's tweens
    /// without stopping them.
    pub fn set_speed(&self, speed: f32) {
        self.inner.speed.set(speed.max(0.0));
    }

    /// Start (or restart) every live member, optionally overriding their
    /// durations. Members that have been dropped are skipped silently.
    pub fn start_all(&self, duration: Option<f32>) -> Result<(), TweenError> {
        if let Some(duration) = duration {
            validate_duration(duration)?;
        }
        for tween in self.live_members() {
            // Duration was validated above, so start cannot fail.
            let _ = tween.start_erased(duration);
        }
        Ok(())
    }

    /// Stop every live member.
    pub fn stop_all(&self, invoke_complete: bool) {
        for tween in self.live_members() {
            tween.stop_erased(invoke_complete);
        }
    }

    /// Whether any live member is still animating.
    pub fn has_active(&self) -> bool {
        self.inner
            .members
            .borrow()
            .iter()
            .any(|weak| weak.upgrade().is_some_and(|tween| tween.is_active()))
    }

    /// Number of live members, mostly for diagnostics.
    pub fn len(&self) -> usize {
        self.inner
            .members
            .borrow()
            .iter()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn same_as(&self, other: &TweenLayer) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn add_member(&self, tween: Weak<dyn AnyTween>) {
        self.inner.members.borrow_mut().push(tween);
    }

    /// Remove the member whose allocation sits at `target`. Used both for
    /// layer reassignment and for a tween's drop-time deregistration.
    pub(crate) fn remove_member(&self, target: *const ()) {
        self.inner
            .members
            .borrow_mut()
            .retain(|weak| weak.as_ptr() as *const () != target);
    }

    /// Snapshot of the live members. Iterating a copy keeps start_all and
    /// stop_all safe against callbacks that add or remove members of this
    /// same layer mid-iteration; it also drops dead entries as housekeeping.
    fn live_members(&self) -> Vec<Rc<dyn AnyTween>> {
        let mut members = self.inner.members.borrow_mut();
        members.retain(|weak| weak.strong_count() > 0);
        members.iter().filter_map(Weak::upgrade).collect()
    }
}

impl Default for TweenLayer {
    fn default() -> Self {
        TweenLayer::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{self, TickDelta};
    use crate::tween::Tween;

    #[test]
    fn start_all_skips_dropped_members() {
        let layer = TweenLayer::new();
        let first = Tween::between(0.0_f32, 1.0, 1.0)
            .layer(&layer)
            .auto_start(false)
            .build()
            .unwrap();
        let second = Tween::between(0.0_f32, 1.0, 1.0)
            .layer(&layer)
            .auto_start(false)
            .build()
            .unwrap();
        let doomed = Tween::between(0.0_f32, 1.0, 1.0)
            .layer(&layer)
            .auto_start(false)
            .build()
            .unwrap();
        drop(doomed);

        layer.start_all(None).unwrap();
        assert!(first.is_active());
        assert!(second.is_active());
        assert_eq!(layer.len(), 2);
    }

    #[test]
    fn start_all_can_override_durations_but_validates_them() {
        let layer = TweenLayer::new();
        let tween = Tween::between(0.0_f32, 1.0, 1.0)
            .layer(&layer)
            .auto_start(false)
            .build()
            .unwrap();

        assert_eq!(
            layer.start_all(Some(-2.0)),
            Err(TweenError::InvalidDuration(-2.0))
        );
        assert!(!tween.is_active());

        layer.start_all(Some(3.0)).unwrap();
        assert!(tween.is_active());
        assert_eq!(tween.total_duration(), 3.0);
    }

    #[test]
    fn stop_all_stops_only_this_layers_members() {
        let layer = TweenLayer::new();
        let other_layer = TweenLayer::new();
        let grouped = Tween::between(0.0_f32, 1.0, 1.0)
            .layer(&layer)
            .build()
            .unwrap();
        let elsewhere = Tween::between(0.0_f32, 1.0, 1.0)
            .layer(&other_layer)
            .build()
            .unwrap();

        layer.stop_all(false);
        assert!(!grouped.is_active());
        assert!(elsewhere.is_active());
    }

    #[test]
    fn reassigning_the_layer_moves_batch_control() {
        let old_layer = TweenLayer::new();
        let new_layer = TweenLayer::new();
        let tween = Tween::between(0.0_f32, 1.0, 1.0)
            .layer(&old_layer)
            .build()
            .unwrap();

        tween.set_layer(&new_layer);
        assert!(tween.layer().same_as(&new_layer));
        assert_eq!(old_layer.len(), 0);
        assert_eq!(new_layer.len(), 1);

        // The old layer no longer reaches it; the new one does.
        old_layer.stop_all(false);
        assert!(tween.is_active());
        new_layer.stop_all(false);
        assert!(!tween.is_active());
    }

    #[test]
    fn zero_speed_freezes_members_without_stopping_them() {
        let layer = TweenLayer::new();
        let tween = Tween::between(0.0_f32, 1.0, 2.0)
            .layer(&layer)
            .build()
            .unwrap();

        layer.set_speed(0.0);
        runtime::tick(TickDelta::from_seconds(1.0));
        assert!(tween.is_active());
        assert_eq!(tween.elapsed_time(), 0.0);

        layer.set_speed(1.0);
        runtime::tick(TickDelta::from_seconds(1.0));
        assert_eq!(tween.elapsed_time(), 1.0);
    }

    #[test]
    fn speed_scales_member_advancement() {
        let layer = TweenLayer::new();
        let tween = Tween::between(0.0_f32, 1.0, 2.0)
            .layer(&layer)
            .build()
            .unwrap();

        layer.set_speed(2.0);
        runtime::tick(TickDelta::from_seconds(0.5));
        assert_eq!(tween.elapsed_time(), 1.0);
    }

    #[test]
    fn speed_is_clamped_to_non_negative() {
        let layer = TweenLayer::new();
        layer.set_speed(-3.0);
        assert_eq!(layer.speed(), 0.0);
        layer.set_speed(1.5);
        assert_eq!(layer.speed(), 1.5);
    }

    #[test]
    fn layer_pause_blocks_members() {
        let layer = TweenLayer::new();
        let tween = Tween::between(0.0_f32, 1.0, 2.0)
            .layer(&layer)
            .build()
            .unwrap();

        layer.set_paused(true);
        runtime::tick(TickDelta::from_seconds(1.0));
        assert!(tween.is_active());
        assert_eq!(tween.elapsed_time(), 0.0);
    }

    #[test]
    fn dropping_a_tween_deregisters_it_immediately() {
        let layer = TweenLayer::new();
        let tween = Tween::between(0.0_f32, 1.0, 1.0)
            .layer(&layer)
            .build()
            .unwrap();
        assert_eq!(layer.len(), 1);
        drop(tween);
        assert_eq!(layer.len(), 0);
        assert!(!layer.has_active());
    }

    #[test]
    fn default_layer_is_shared() {
        let tween = Tween::between(0.0_f32, 1.0, 1.0).build().unwrap();
        assert!(tween.layer().same_as(&TweenLayer::default_layer()));
        assert!(TweenLayer::default_layer().has_active());
        tween.stop(false);
        assert!(!TweenLayer::default_layer().has_active());
    }
}
