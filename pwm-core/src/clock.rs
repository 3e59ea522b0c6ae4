//! Clock/prescaler model.
//!
//! The timer counts at the base clock divided by a power-of-two
//! prescaler. The division is exact integer truncation, so the result is
//! simply the base frequency shifted right by the prescaler exponent.

use crate::error::ConfigError;

/// Computes the timer's effective tick frequency in Hz.
///
/// `effective_tick_hz = base_clock_hz / 2^prescaler_exponent`
///
/// Fails with [`ConfigError::PrescalerTooLarge`] when the exponent is at
/// least the numeric width (the shift itself would be undefined) or when
/// the shift leaves no bits set (a 0 Hz timer never counts). Pure
/// computation, no side effects.
pub const fn effective_tick_hz(
    base_clock_hz: u32,
    prescaler_exponent: u8,
) -> Result<u32, ConfigError> {
    if prescaler_exponent as u32 >= u32::BITS {
        return Err(ConfigError::PrescalerTooLarge {
            base_clock_hz,
            prescaler_exponent,
        });
    }

    let tick_hz = base_clock_hz >> prescaler_exponent;
    if tick_hz == 0 {
        return Err(ConfigError::PrescalerTooLarge {
            base_clock_hz,
            prescaler_exponent,
        });
    }

    Ok(tick_hz)
}
