//! Timer configuration.

use crate::clock;
use crate::error::ConfigError;

/// Immutable timer configuration, fixed before the timer starts.
///
/// A `TimerConfig` is constructed once at startup, validated by
/// [`crate::PwmEngine::initialize`], and read-only afterwards. The PWM
/// frequency is never changed after initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerConfig {
    /// Clock feeding the timer before the prescaler, in Hz.
    pub base_clock_hz: u32,
    /// Power-of-two prescaler: the counter ticks at `base >> exponent`.
    pub prescaler_exponent: u8,
    /// Counter value at which the timer wraps. Duty values range over
    /// `0..=top_value`.
    pub top_value: u16,
    /// Number of compare channels in use, 1 to 3.
    pub channel_count: u8,
}

impl TimerConfig {
    pub const fn new(
        base_clock_hz: u32,
        prescaler_exponent: u8,
        top_value: u16,
        channel_count: u8,
    ) -> TimerConfig {
        TimerConfig {
            base_clock_hz,
            prescaler_exponent,
            top_value,
            channel_count,
        }
    }

    /// Checks the whole configuration and returns the effective tick
    /// frequency it yields.
    pub const fn validate(&self) -> Result<u32, ConfigError> {
        if self.top_value == 0 {
            return Err(ConfigError::ZeroTopValue);
        }
        if self.channel_count == 0 || self.channel_count > 3 {
            return Err(ConfigError::ChannelCountOutOfRange {
                channel_count: self.channel_count,
            });
        }
        clock::effective_tick_hz(self.base_clock_hz, self.prescaler_exponent)
    }

    /// PWM output frequency in Hz: one period is `top_value + 1` ticks.
    pub const fn pwm_hz(&self) -> Result<u32, ConfigError> {
        match self.validate() {
            Ok(tick_hz) => Ok(tick_hz / (self.top_value as u32 + 1)),
            Err(error) => Err(error),
        }
    }
}
