//! The tween state machine.
//!
//! A [`Tween`] advances one value from start to end over a duration, driven
//! by [`runtime::tick`](crate::runtime::tick). It is built with
//! [`Tween::between`] (or [`Tween::with_interpolator`] for custom value
//! types), starts by default, and reports back through optional start /
//! update / complete callbacks.

use crate::ease::Easing;
use crate::interp::TweenValue;
use crate::layer::TweenLayer;
use crate::runtime::{self, TickDelta};
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::{Rc, Weak};
use thiserror::Error;
use tracing::error;

/// Largest unscaled delta a single tick may contribute. Keeps real-time
/// tweens from jumping after the host was suspended for a while.
const MAX_UNSCALED_DELTA: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TweenError {
    #[error("tween duration must be finite and non-negative, got {0}")]
    InvalidDuration(f32),
}

pub(crate) fn validate_duration(duration: f32) -> Result<(), TweenError> {
    if duration.is_finite() && duration >= 0.0 {
        Ok(())
    } else {
        Err(TweenError::InvalidDuration(duration))
    }
}

/// Type-erased control surface, used by layers and the runtime.
pub(crate) trait AnyTween {
    fn tick(&self, delta: &TickDelta);
    fn is_active(&self) -> bool;
    fn unschedule(&self);
    fn start_erased(&self, duration: Option<f32>) -> Result<(), TweenError>;
    fn stop_erased(&self, invoke_complete: bool);
}

struct TweenInner<T: Copy + 'static> {
    start: T,
    end: T,
    interpolate: Box<dyn Fn(T, T, f32) -> T>,
    easing: Easing,
    duration: Cell<f32>,
    elapsed: Cell<f32>,
    current: Cell<Option<T>>,
    active: Cell<bool>,
    paused: Cell<bool>,
    unscaled: Cell<bool>,
    scheduled: Cell<bool>,
    // Bumped on every start; lets finish() tell a restart issued by the
    // terminal update apart from a plain run-through.
    generation: Cell<u64>,
    layer: RefCell<TweenLayer>,
    self_ref: RefCell<Option<Weak<dyn AnyTween>>>,
    on_start: RefCell<Option<Box<dyn FnMut()>>>,
    on_update: RefCell<Option<Box<dyn FnMut(T)>>>,
    on_complete: RefCell<Option<Box<dyn FnMut()>>>,
}

impl<T: Copy + 'static> TweenInner<T> {
    fn start(&self, duration: Option<f32>) -> Result<(), TweenError> {
        if let Some(duration) = duration {
            validate_duration(duration)?;
            self.duration.set(duration);
        }

        // Restarting an active tween stops it silently: no completion
        // callback, the animation simply begins over.
        self.generation.set(self.generation.get().wrapping_add(1));
        self.active.set(true);
        self.paused.set(false);
        self.elapsed.set(0.0);
        self.current.set(None);

        if !self.scheduled.get() {
            if let Some(weak) = self.self_ref.borrow().clone() {
                self.scheduled.set(true);
                runtime::schedule(weak);
            }
        }

        self.emit_start();
        if !self.active.get() {
            // The start callback panicked and stopped us.
            return Ok(());
        }

        // A zero-duration tween has no iterative phase: it delivers its end
        // value and completes before start() returns.
        if self.duration.get() == 0.0 {
            self.finish();
        }
        Ok(())
    }

    fn stop(&self, invoke_complete: bool) {
        if !self.active.get() {
            return;
        }
        self.active.set(false);
        if invoke_complete {
            self.emit_complete();
        }
    }

    /// One tick of advancement. The tick is consumed without advancing when
    /// the instance or its layer is paused, the layer speed is zero, or - for
    /// scaled tweens - the host reports a non-positive global time scale.
    fn advance(&self, delta: &TickDelta) {
        if !self.active.get() {
            return;
        }
        let layer = self.layer.borrow().clone();
        if !self.can_update(&layer, delta) {
            return;
        }

        let frame_delta = if self.unscaled.get() {
            delta.unscaled.clamp(0.0, MAX_UNSCALED_DELTA)
        } else {
            delta.scaled
        };
        let elapsed = self.elapsed.get() + frame_delta * layer.speed();
        let total = self.duration.get();
        if elapsed >= total {
            self.elapsed.set(total);
            self.finish();
        } else {
            self.elapsed.set(elapsed);
            self.apply_progress(elapsed / total);
        }
    }

    fn can_update(&self, layer: &TweenLayer, delta: &TickDelta) -> bool {
        !self.paused.get()
            && !layer.is_paused()
            && layer.speed() > 0.0
            && (self.unscaled.get() || delta.time_scale > 0.0)
    }

    /// Interpolate at the given raw progress and publish the result. Returns
    /// false when the update callback panicked (the tween is stopped then).
    fn apply_progress(&self, progress: f32) -> bool {
        let eased = self.easing.apply(progress);
        let value = (self.interpolate)(self.start, self.end, eased);
        self.current.set(Some(value));
        self.emit_update(value)
    }

    /// Terminal handling: one final update at progress exactly 1.0, so the
    /// end value is delivered regardless of floating-point drift during the
    /// iterative phase, then completion.
    fn finish(&self) {
        let run = self.generation.get();
        if !self.apply_progress(1.0) {
            return;
        }
        if self.generation.get() != run {
            // The final update restarted the tween; the new run owns the
            // state from here on.
            return;
        }
        if !self.active.get() {
            // The final update callback stopped the tween itself; it has
            // explicitly declined completion.
            return;
        }
        self.active.set(false);
        self.emit_complete();
    }

    fn emit_start(&self) {
        let Some(mut callback) = self.on_start.borrow_mut().take() else {
            return;
        };
        let result = catch_unwind(AssertUnwindSafe(|| callback()));
        *self.on_start.borrow_mut() = Some(callback);
        if let Err(payload) = result {
            error!(
                "tween start callback panicked: {}; stopping tween",
                panic_message(&*payload)
            );
            self.stop(false);
        }
    }

    fn emit_update(&self, value: T) -> bool {
        let Some(mut callback) = self.on_update.borrow_mut().take() else {
            return true;
        };
        let result = catch_unwind(AssertUnwindSafe(|| callback(value)));
        *self.on_update.borrow_mut() = Some(callback);
        if let Err(payload) = result {
            error!(
                "tween update callback panicked: {}; stopping tween",
                panic_message(&*payload)
            );
            self.stop(false);
            return false;
        }
        true
    }

    fn emit_complete(&self) {
        let Some(mut callback) = self.on_complete.borrow_mut().take() else {
            return;
        };
        let result = catch_unwind(AssertUnwindSafe(|| callback()));
        *self.on_complete.borrow_mut() = Some(callback);
        if let Err(payload) = result {
            error!(
                "tween completion callback panicked: {}",
                panic_message(&*payload)
            );
        }
    }
}

impl<T: Copy + 'static> AnyTween for TweenInner<T> {
    fn tick(&self, delta: &TickDelta) {
        self.advance(delta);
    }

    fn is_active(&self) -> bool {
        self.active.get()
    }

    fn unschedule(&self) {
        self.scheduled.set(false);
    }

    fn start_erased(&self, duration: Option<f32>) -> Result<(), TweenError> {
        self.start(duration)
    }

    fn stop_erased(&self, invoke_complete: bool) {
        self.stop(invoke_complete);
    }
}

impl<T: Copy + 'static> Drop for TweenInner<T> {
    fn drop(&mut self) {
        // Deterministic deregistration: the layer does not keep dead entries
        // around until someone iterates it.
        let layer = self.layer.borrow().clone();
        layer.remove_member(self as *const Self as *const ());
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "opaque panic payload"
    }
}

/// Handle to a single animation instance.
///
/// Handles are cheap to clone and share identity: every clone controls the
/// same animation. The instance is destroyed when the last handle is dropped;
/// layer membership and runtime scheduling never keep it alive.
pub struct Tween<T: Copy + 'static> {
    inner: Rc<TweenInner<T>>,
}

impl<T: Copy + 'static> Clone for Tween<T> {
    fn clone(&self) -> Self {
        Tween {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: TweenValue> Tween<T> {
    /// Animate from `start` to `end` over `duration` seconds using the
    /// built-in interpolation for `T`.
    pub fn between(start: T, end: T, duration: f32) -> TweenBuilder<T> {
        TweenBuilder::new(start, end, duration, T::interpolate)
    }
}

impl<T: Copy + 'static> Tween<T> {
    /// Animate with an explicit interpolation function, for value types
    /// without a built-in one or for non-standard blending.
    pub fn with_interpolator(
        start: T,
        end: T,
        duration: f32,
        interpolate: impl Fn(T, T, f32) -> T + 'static,
    ) -> TweenBuilder<T> {
        TweenBuilder::new(start, end, duration, interpolate)
    }

    /// Begin or restart the animation, optionally with a new duration.
    /// Restarting an active tween stops it silently first. The first value
    /// update is delivered by the next [`runtime::tick`].
    pub fn start(&self, duration: Option<f32>) -> Result<(), TweenError> {
        self.inner.start(duration)
    }

    /// End the animation prematurely. No-op when idle. Safe to call from
    /// inside this tween's own callbacks.
    pub fn stop(&self, invoke_complete: bool) {
        self.inner.stop(invoke_complete);
    }

    pub fn is_active(&self) -> bool {
        self.inner.active.get()
    }

    pub fn is_paused(&self) -> bool {
        self.inner.paused.get()
    }

    /// Pause or resume advancement. A paused tween stays active but consumes
    /// ticks without advancing.
    pub fn set_paused(&self, paused: bool) {
        self.inner.paused.set(paused);
    }

    pub fn is_unscaled(&self) -> bool {
        self.inner.unscaled.get()
    }

    /// Sample the unscaled clock instead of the scaled one. Unscaled tweens
    /// keep advancing while the host's global time scale is zero.
    pub fn set_unscaled(&self, unscaled: bool) {
        self.inner.unscaled.set(unscaled);
    }

    pub fn start_value(&self) -> T {
        self.inner.start
    }

    pub fn end_value(&self) -> T {
        self.inner.end
    }

    /// The most recently published value, or `None` before the first update.
    pub fn current_value(&self) -> Option<T> {
        self.inner.current.get()
    }

    pub fn total_duration(&self) -> f32 {
        self.inner.duration.get()
    }

    pub fn elapsed_time(&self) -> f32 {
        self.inner.elapsed.get()
    }

    /// Fraction of the duration elapsed, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        let total = self.inner.duration.get();
        if total == 0.0 {
            1.0
        } else {
            self.inner.elapsed.get() / total
        }
    }

    /// Preview the value at a hypothetical progress without touching any
    /// state.
    pub fn sample(&self, progress: f32) -> T {
        let eased = self.inner.easing.apply(progress);
        (self.inner.interpolate)(self.inner.start, self.inner.end, eased)
    }

    /// The layer currently controlling this tween.
    pub fn layer(&self) -> TweenLayer {
        self.inner.layer.borrow().clone()
    }

    /// Move this tween to another layer: removed from the old layer's set and
    /// added to the new one as a single step.
    pub fn set_layer(&self, layer: &TweenLayer) {
        let current = self.inner.layer.borrow().clone();
        if current.same_as(layer) {
            return;
        }
        current.remove_member(Rc::as_ptr(&self.inner) as *const ());
        *self.inner.layer.borrow_mut() = layer.clone();
        if let Some(weak) = self.inner.self_ref.borrow().clone() {
            layer.add_member(weak);
        }
    }

    pub(crate) fn as_weak(&self) -> Weak<dyn AnyTween> {
        // Downgrade at the concrete type, then unsize.
        let weak = Rc::downgrade(&self.inner);
        let weak: Weak<dyn AnyTween> = weak;
        weak
    }
}

/// Configures a [`Tween`] before it is created.
pub struct TweenBuilder<T: Copy + 'static> {
    start: T,
    end: T,
    duration: f32,
    interpolate: Box<dyn Fn(T, T, f32) -> T>,
    easing: Easing,
    unscaled: bool,
    auto_start: bool,
    layer: Option<TweenLayer>,
    on_start: Option<Box<dyn FnMut()>>,
    on_update: Option<Box<dyn FnMut(T)>>,
    on_complete: Option<Box<dyn FnMut()>>,
}

impl<T: Copy + 'static> TweenBuilder<T> {
    fn new(
        start: T,
        end: T,
        duration: f32,
        interpolate: impl Fn(T, T, f32) -> T + 'static,
    ) -> Self {
        TweenBuilder {
            start,
            end,
            duration,
            interpolate: Box::new(interpolate),
            easing: Easing::default(),
            unscaled: false,
            auto_start: true,
            layer: None,
            on_start: None,
            on_update: None,
            on_complete: None,
        }
    }

    /// Easing curve to shape the animation; defaults to linear.
    pub fn easing(mut self, easing: impl Into<Easing>) -> Self {
        self.easing = easing.into();
        self
    }

    /// Sample the unscaled clock instead of the scaled one.
    pub fn unscaled(mut self, unscaled: bool) -> Self {
        self.unscaled = unscaled;
        self
    }

    /// Whether the tween starts as soon as it is built (the default). Pass
    /// false to start it manually later.
    pub fn auto_start(mut self, auto_start: bool) -> Self {
        self.auto_start = auto_start;
        self
    }

    /// Layer to register with; defaults to [`TweenLayer::default_layer`].
    pub fn layer(mut self, layer: &TweenLayer) -> Self {
        self.layer = Some(layer.clone());
        self
    }

    /// Invoked every time the animation is started or restarted.
    pub fn on_start(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_start = Some(Box::new(callback));
        self
    }

    /// Invoked with the current value on every advancement, including the
    /// final update at the end value.
    pub fn on_update(mut self, callback: impl FnMut(T) + 'static) -> Self {
        self.on_update = Some(Box::new(callback));
        self
    }

    /// Invoked once when the animation completes (or when stopped with
    /// `invoke_complete`).
    pub fn on_complete(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Validate and create the tween. Fails fast on a negative or non-finite
    /// duration.
    pub fn build(self) -> Result<Tween<T>, TweenError> {
        validate_duration(self.duration)?;
        let layer = self.layer.unwrap_or_else(TweenLayer::default_layer);
        let inner = Rc::new(TweenInner {
            start: self.start,
            end: self.end,
            interpolate: self.interpolate,
            easing: self.easing,
            duration: Cell::new(self.duration),
            elapsed: Cell::new(0.0),
            current: Cell::new(None),
            active: Cell::new(false),
            paused: Cell::new(false),
            unscaled: Cell::new(self.unscaled),
            scheduled: Cell::new(false),
            generation: Cell::new(0),
            layer: RefCell::new(layer.clone()),
            self_ref: RefCell::new(None),
            on_start: RefCell::new(self.on_start),
            on_update: RefCell::new(self.on_update),
            on_complete: RefCell::new(self.on_complete),
        });
        // Downgrade at the concrete type, then unsize.
        let weak = Rc::downgrade(&inner);
        let weak: Weak<dyn AnyTween> = weak;
        *inner.self_ref.borrow_mut() = Some(weak.clone());
        layer.add_member(weak);

        let tween = Tween { inner };
        if self.auto_start {
            tween.start(None)?;
        }
        Ok(tween)
    }
}
