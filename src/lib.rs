//! Twixt
//!
//! Animates values over time: pick a start, an end, a duration and an easing
//! curve, then drive everything forward once per frame with [`runtime::tick`].

//! Tween a single value:
//! ```
//! use twixt::*;
//!
//! let tween = Tween::between(0.0_f32, 10.0, 2.0)
//!     .easing(EaseKind::QuadInOut)
//!     .on_update(|value| println!("now at {value}"))
//!     .build()
//!     .unwrap();
//!
//! // Once per frame, with the frame's delta time:
//! runtime::tick(TickDelta::from_seconds(1.0));
//! runtime::tick(TickDelta::from_seconds(1.0));
//!
//! assert!(!tween.is_active());
//! assert_eq!(tween.current_value(), Some(10.0));
//! ```
//!
//! Group tweens on a layer to pause, retime or stop them as a batch:
//! ```
//! use twixt::*;
//!
//! let ui = TweenLayer::new();
//! let fade = Tween::between(1.0_f32, 0.0, 1.0).layer(&ui).build().unwrap();
//! let slide = Tween::between(0.0_f32, 64.0, 2.0).layer(&ui).build().unwrap();
//!
//! // Everything on the layer runs at double speed.
//! ui.set_speed(2.0);
//! runtime::tick(TickDelta::from_seconds(1.0));
//!
//! assert!(!fade.is_active());
//! assert_eq!(slide.current_value(), Some(64.0));
//! ```
//!
//! For host loops with their own sequencing (coroutines, state machines),
//! [`WaitForTween`] and [`WaitForLayer`] expose a poll-able "still running"
//! check.

pub mod ease;
mod interp;
mod layer;
pub mod runtime;
mod tween;
mod wait;

pub use ease::{EaseKind, Easing};
pub use interp::TweenValue;
pub use layer::TweenLayer;
pub use runtime::TickDelta;
pub use tween::{Tween, TweenBuilder, TweenError};
pub use wait::{WaitForLayer, WaitForTween};
