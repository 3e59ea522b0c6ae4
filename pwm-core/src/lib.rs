//! Portable timer/PWM duty-cycle core for the RGB LED demo.
//!
//! This crate holds everything about the demo that does not depend on a
//! concrete microcontroller:
//!
//! - the clock/prescaler model that derives the timer's effective tick
//!   frequency ([`clock`])
//! - the fixed pin bindings of the logical LED channels ([`binding`])
//! - the timer configuration ([`config`])
//! - the PWM engine that programs the compare channels and owns the only
//!   duty-cycle update path ([`engine`])
//! - the duty-cycle animators that feed the engine ([`animation`])
//!
//! The engine talks to the hardware through the [`engine::PwmChannels`]
//! trait. The firmware crate implements it over the real timer peripheral;
//! the tests implement it over simulated shadow registers, which is what
//! makes this crate testable on the host.

#![no_std]

pub mod animation;
pub mod binding;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;

pub use animation::{Fade, StepSequence};
pub use binding::{ChannelBinding, LedChannel, Port};
pub use config::TimerConfig;
pub use engine::{PwmChannels, PwmEngine};
pub use error::{ConfigError, RangeError};
