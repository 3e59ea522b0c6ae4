//! Logical LED channels and their fixed pin bindings.

use crate::error::ConfigError;

/// Logical LED channel, one per timer compare channel.
///
/// This is represented as a `u8` so that it doubles as the compare
/// channel index.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedChannel {
    Red = 0,
    Green = 1,
    Blue = 2,
}

impl LedChannel {
    /// Compare channel index of this LED, starting at 0.
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// GPIO port of the target device.
///
/// Instead of a raw letter or number we use an enum, so a port that does
/// not exist on the device cannot be named at all and the port half of a
/// binding is checked at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Port {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

/// Fixed association between a logical LED channel and a physical pin.
///
/// Bindings are built `const` at compile time and never reassigned at
/// runtime: each logical channel maps to exactly one (port, pin) pair for
/// the lifetime of the program. `route` is the alternate function number
/// that connects the timer's compare output to the pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelBinding {
    pub channel: LedChannel,
    pub port: Port,
    pub pin: u8,
    pub route: u8,
}

impl ChannelBinding {
    pub const fn new(channel: LedChannel, port: Port, pin: u8, route: u8) -> ChannelBinding {
        ChannelBinding {
            channel,
            port,
            pin,
            route,
        }
    }

    /// Checks that the pin and route numbers exist on the target.
    ///
    /// GPIO ports have 16 pins and the alternate function field is 4 bits
    /// wide, so anything above 15 cannot be programmed.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.pin > 15 {
            return Err(ConfigError::InvalidPin { pin: self.pin });
        }
        if self.route > 15 {
            return Err(ConfigError::InvalidRoute { route: self.route });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_pins_and_routes() {
        let binding = ChannelBinding::new(LedChannel::Red, Port::A, 0, 1);
        assert_eq!(binding.validate(), Ok(()));

        let binding = ChannelBinding::new(LedChannel::Blue, Port::B, 15, 15);
        assert_eq!(binding.validate(), Ok(()));
    }

    #[test]
    fn rejects_pin_beyond_the_port() {
        let binding = ChannelBinding::new(LedChannel::Green, Port::B, 16, 1);
        assert_eq!(binding.validate(), Err(ConfigError::InvalidPin { pin: 16 }));
    }

    #[test]
    fn rejects_route_beyond_the_mux() {
        let binding = ChannelBinding::new(LedChannel::Green, Port::B, 3, 16);
        assert_eq!(
            binding.validate(),
            Err(ConfigError::InvalidRoute { route: 16 })
        );
    }

    #[test]
    fn channel_doubles_as_compare_index() {
        assert_eq!(LedChannel::Red.index(), 0);
        assert_eq!(LedChannel::Green.index(), 1);
        assert_eq!(LedChannel::Blue.index(), 2);
    }
}
