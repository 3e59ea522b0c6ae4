use crate::binding::LedChannel;

/// Fatal configuration error, detected while setting up the timer.
///
/// Running with a misconfigured timer means undefined hardware state, so
/// the demo treats any of these as a reason to abort startup instead of
/// continuing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The prescaler shifts every bit out of the base clock, which would
    /// leave the counter ticking at 0 Hz.
    PrescalerTooLarge {
        base_clock_hz: u32,
        prescaler_exponent: u8,
    },
    /// The top (period) value must be at least 1.
    ZeroTopValue,
    /// The timer drives between 1 and 3 compare channels.
    ChannelCountOutOfRange { channel_count: u8 },
    /// The number of pin bindings does not match the configured channel
    /// count.
    BindingCountMismatch { expected: u8, got: u8 },
    /// The pin number is outside the 0..=15 range of a GPIO port.
    InvalidPin { pin: u8 },
    /// The route (alternate function) number is outside 0..=15.
    InvalidRoute { route: u8 },
}

/// Recoverable error returned by the duty-cycle update path.
///
/// A rejected update leaves the timer completely untouched: the value is
/// checked before any register write. Values are never silently clamped
/// to the top value, as clamping would hide bugs in the animation code
/// that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RangeError {
    /// The requested duty value exceeds the configured top value.
    DutyOutOfRange {
        channel: LedChannel,
        value: u16,
        top: u16,
    },
    /// The requested period is zero or exceeds the configured top value.
    PeriodOutOfRange { value: u16, top: u16 },
    /// The channel is not among the configured compare channels.
    ChannelNotConfigured { channel: LedChannel },
}
