//! STM32U545RE firmware demo for the timer/PWM duty-cycle core.
//!
//! The portable logic lives in the `pwm-core` crate; this crate binds it
//! to the board: the RGB LED pin map, the timer configuration and the
//! adapter that implements the engine's hardware trait over the STM32
//! timer peripheral.

#![no_std]

pub mod board;
