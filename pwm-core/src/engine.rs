//! Timer/PWM engine.
//!
//! The engine owns the configured timer and is the only path through
//! which duty cycles reach the hardware. Every update goes through the
//! hardware's buffered (shadow) registers: a new compare or top value is
//! written to the shadow copy and applied by the hardware at the next
//! period rollover, never in the middle of a period. The animator task is
//! the single writer of these registers, so that buffering is the only
//! synchronization the design needs against the free-running counter.

use crate::binding::{ChannelBinding, LedChannel};
use crate::config::TimerConfig;
use crate::error::{ConfigError, RangeError};

/// Number of compare channels the engine can drive.
pub const MAX_CHANNELS: usize = 3;

/// Hardware side of the engine.
///
/// The firmware crate implements this over the real timer peripheral;
/// the tests implement it over simulated shadow registers. The engine
/// performs all range checking before calling into the trait, so an
/// implementation may assume `value <= top` holds for every write.
pub trait PwmChannels {
    /// Writes `value` into the channel's buffered compare register.
    ///
    /// The new duty cycle takes effect at the next period rollover.
    fn write_compare(&mut self, channel: LedChannel, value: u16, top: u16);

    /// Writes `value` into the buffered top (period) register.
    fn write_top(&mut self, value: u16);

    /// Connects the channel's compare output to its pin.
    fn enable_channel(&mut self, channel: LedChannel);

    /// Starts the counter free-running.
    fn start(&mut self);
}

/// Initial compare values are staggered across the channels (half, a
/// quarter, an eighth of the period) so the LEDs come up at visibly
/// different brightness. Purely cosmetic starting condition.
const fn staggered_compare(top: u16, index: usize) -> u16 {
    top >> (index + 1)
}

/// Owner of a running PWM timer.
///
/// Created by [`PwmEngine::initialize`], which consumes the hardware
/// handle. Because the handle is moved in, a second initialization of the
/// same timer peripheral cannot be expressed. Once initialized the timer
/// free-runs until power-off; there is no stop operation.
pub struct PwmEngine<H: PwmChannels> {
    hw: H,
    config: TimerConfig,
    tick_hz: u32,
    compare: [u16; MAX_CHANNELS],
}

impl<H: PwmChannels> PwmEngine<H> {
    /// Validates the configuration and bindings, programs the timer and
    /// starts it.
    ///
    /// Programming order: shared top value, then the per-channel compare
    /// values, then the channel outputs, and the counter last, so no pin
    /// ever toggles against a half-programmed timer. Any
    /// [`ConfigError`] is returned before the first register write.
    pub fn initialize(
        hw: H,
        config: TimerConfig,
        bindings: &[ChannelBinding],
    ) -> Result<PwmEngine<H>, ConfigError> {
        let tick_hz = config.validate()?;

        if bindings.len() != config.channel_count as usize {
            return Err(ConfigError::BindingCountMismatch {
                expected: config.channel_count,
                got: bindings.len() as u8,
            });
        }
        for binding in bindings {
            binding.validate()?;
        }

        let mut engine = PwmEngine {
            hw,
            config,
            tick_hz,
            compare: [0; MAX_CHANNELS],
        };

        engine.hw.write_top(config.top_value);
        for binding in bindings {
            let index = binding.channel.index();
            let initial = staggered_compare(config.top_value, index);
            engine.hw.write_compare(binding.channel, initial, config.top_value);
            engine.compare[index] = initial;
        }
        for binding in bindings {
            engine.hw.enable_channel(binding.channel);
        }
        engine.hw.start();

        Ok(engine)
    }

    /// Effective counting frequency after the prescaler, in Hz.
    pub fn tick_hz(&self) -> u32 {
        self.tick_hz
    }

    /// Counter value at which the timer wraps; duty values range over
    /// `0..=top_value()`.
    pub fn top_value(&self) -> u16 {
        self.config.top_value
    }

    /// Last duty value requested for the channel.
    pub fn duty(&self, channel: LedChannel) -> u16 {
        self.compare[channel.index()]
    }

    /// Requests a new duty cycle for one channel.
    ///
    /// The value lands in the buffered compare register and is applied by
    /// the hardware at the next period rollover, so this is safe to call
    /// at any rate while the timer runs. A value above the top value is
    /// rejected with [`RangeError`] and the timer is left untouched.
    pub fn set_duty_cycle(&mut self, channel: LedChannel, value: u16) -> Result<(), RangeError> {
        self.check(channel, value)?;
        self.hw.write_compare(channel, value, self.config.top_value);
        self.compare[channel.index()] = value;
        Ok(())
    }

    /// Applies one (red, green, blue) duty tuple.
    ///
    /// All three values are validated before the first register write, so
    /// a rejected tuple leaves every channel unchanged.
    pub fn set_rgb(&mut self, red: u16, green: u16, blue: u16) -> Result<(), RangeError> {
        let tuple = [
            (LedChannel::Red, red),
            (LedChannel::Green, green),
            (LedChannel::Blue, blue),
        ];

        for (channel, value) in tuple {
            self.check(channel, value)?;
        }
        for (channel, value) in tuple {
            self.hw.write_compare(channel, value, self.config.top_value);
            self.compare[channel.index()] = value;
        }
        Ok(())
    }

    /// Requests a new period (top) value.
    ///
    /// This is the control path of the single-channel variant that treats
    /// the period itself as the duty parameter. Same buffered discipline
    /// as [`PwmEngine::set_duty_cycle`]: the write is applied at the next
    /// rollover. The value must stay in `1..=top_value()` — zero would
    /// stall the output and a larger period would break the invariant
    /// that every compare value fits inside the period.
    pub fn set_period(&mut self, value: u16) -> Result<(), RangeError> {
        if value == 0 || value > self.config.top_value {
            return Err(RangeError::PeriodOutOfRange {
                value,
                top: self.config.top_value,
            });
        }
        self.hw.write_top(value);
        Ok(())
    }

    fn check(&self, channel: LedChannel, value: u16) -> Result<(), RangeError> {
        if channel.index() >= self.config.channel_count as usize {
            return Err(RangeError::ChannelNotConfigured { channel });
        }
        if value > self.config.top_value {
            return Err(RangeError::DutyOutOfRange {
                channel,
                value,
                top: self.config.top_value,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::Port;

    const TOP: u16 = 1000;

    /// Simulated timer with buffered compare/top registers: writes land
    /// in the pending slot and become active on `rollover`, mirroring the
    /// hardware's period-boundary update.
    #[derive(Default)]
    struct MockPwm {
        active_compare: [u16; MAX_CHANNELS],
        pending_compare: [Option<u16>; MAX_CHANNELS],
        active_top: u16,
        pending_top: Option<u16>,
        enabled: [bool; MAX_CHANNELS],
        started: bool,
    }

    impl MockPwm {
        fn rollover(&mut self) {
            if let Some(top) = self.pending_top.take() {
                self.active_top = top;
            }
            for index in 0..MAX_CHANNELS {
                if let Some(value) = self.pending_compare[index].take() {
                    self.active_compare[index] = value;
                }
            }
        }
    }

    impl PwmChannels for MockPwm {
        fn write_compare(&mut self, channel: LedChannel, value: u16, top: u16) {
            assert!(value <= top, "engine must range-check before writing");
            self.pending_compare[channel.index()] = Some(value);
        }

        fn write_top(&mut self, value: u16) {
            self.pending_top = Some(value);
        }

        fn enable_channel(&mut self, channel: LedChannel) {
            assert!(
                self.pending_compare[channel.index()].is_some(),
                "channel must be programmed before its output is enabled"
            );
            self.enabled[channel.index()] = true;
        }

        fn start(&mut self) {
            assert!(
                self.pending_top.is_some(),
                "period must be programmed before the counter starts"
            );
            self.started = true;
        }
    }

    fn bindings() -> [ChannelBinding; 3] {
        [
            ChannelBinding::new(LedChannel::Red, Port::A, 0, 1),
            ChannelBinding::new(LedChannel::Green, Port::B, 3, 1),
            ChannelBinding::new(LedChannel::Blue, Port::B, 10, 1),
        ]
    }

    fn engine() -> PwmEngine<MockPwm> {
        let config = TimerConfig::new(19_000_000, 4, TOP, 3);
        PwmEngine::initialize(MockPwm::default(), config, &bindings()).unwrap()
    }

    #[test]
    fn initialize_programs_and_starts_the_timer() {
        let engine = engine();

        assert_eq!(engine.tick_hz(), 1_187_500);
        assert_eq!(engine.top_value(), TOP);
        assert!(engine.hw.started);
        assert_eq!(engine.hw.enabled, [true, true, true]);
        assert_eq!(engine.hw.pending_top, Some(TOP));
    }

    #[test]
    fn initialize_staggers_the_initial_compare_values() {
        let engine = engine();

        assert_eq!(engine.duty(LedChannel::Red), TOP / 2);
        assert_eq!(engine.duty(LedChannel::Green), TOP / 4);
        assert_eq!(engine.duty(LedChannel::Blue), TOP / 8);
    }

    #[test]
    fn initialize_rejects_binding_count_mismatch() {
        let config = TimerConfig::new(19_000_000, 4, TOP, 2);
        let result = PwmEngine::initialize(MockPwm::default(), config, &bindings());
        assert_eq!(
            result.err(),
            Some(ConfigError::BindingCountMismatch {
                expected: 2,
                got: 3
            })
        );
    }

    #[test]
    fn initialize_rejects_invalid_bindings() {
        let config = TimerConfig::new(19_000_000, 4, TOP, 1);
        let bad = [ChannelBinding::new(LedChannel::Red, Port::A, 16, 1)];
        let result = PwmEngine::initialize(MockPwm::default(), config, &bad);
        assert_eq!(result.err(), Some(ConfigError::InvalidPin { pin: 16 }));
    }

    #[test]
    fn initialize_rejects_invalid_config() {
        let config = TimerConfig::new(19_000_000, 4, 0, 3);
        let result = PwmEngine::initialize(MockPwm::default(), config, &bindings());
        assert_eq!(result.err(), Some(ConfigError::ZeroTopValue));
    }

    #[test]
    fn duty_update_is_applied_at_the_next_rollover() {
        let mut engine = engine();
        engine.hw.rollover();
        let before = engine.hw.active_compare[0];

        engine.set_duty_cycle(LedChannel::Red, 1000).unwrap();

        // Buffered: the active register still holds the old value until
        // the period boundary.
        assert_eq!(engine.hw.active_compare[0], before);
        engine.hw.rollover();
        assert_eq!(engine.hw.active_compare[0], 1000);
    }

    #[test]
    fn duty_above_top_is_rejected_and_leaves_the_timer_untouched() {
        let mut engine = engine();
        engine.hw.rollover();
        let before = engine.hw.active_compare[0];

        let result = engine.set_duty_cycle(LedChannel::Red, 1001);

        assert_eq!(
            result,
            Err(RangeError::DutyOutOfRange {
                channel: LedChannel::Red,
                value: 1001,
                top: TOP,
            })
        );
        assert_eq!(engine.hw.pending_compare[0], None);
        engine.hw.rollover();
        assert_eq!(engine.hw.active_compare[0], before);
    }

    #[test]
    fn unconfigured_channel_is_rejected() {
        let config = TimerConfig::new(19_000_000, 4, TOP, 1);
        let single = [ChannelBinding::new(LedChannel::Red, Port::A, 0, 1)];
        let mut engine = PwmEngine::initialize(MockPwm::default(), config, &single).unwrap();

        let result = engine.set_duty_cycle(LedChannel::Green, 100);

        assert_eq!(
            result,
            Err(RangeError::ChannelNotConfigured {
                channel: LedChannel::Green
            })
        );
        assert_eq!(engine.hw.pending_compare[1], None);
    }

    #[test]
    fn rgb_tuple_is_applied_to_all_three_channels() {
        let mut engine = engine();

        engine.set_rgb(1000, 220, 50).unwrap();
        engine.hw.rollover();

        assert_eq!(engine.hw.active_compare, [1000, 220, 50]);
    }

    #[test]
    fn rejected_rgb_tuple_changes_nothing() {
        let mut engine = engine();
        engine.set_rgb(1000, 220, 50).unwrap();
        engine.hw.rollover();

        let result = engine.set_rgb(500, 1100, 25);

        assert!(result.is_err());
        assert_eq!(engine.hw.pending_compare, [None, None, None]);
        engine.hw.rollover();
        assert_eq!(engine.hw.active_compare, [1000, 220, 50]);
    }

    #[test]
    fn period_update_goes_through_the_buffer() {
        let mut engine = engine();
        engine.hw.rollover();

        engine.set_period(255).unwrap();

        assert_eq!(engine.hw.active_top, TOP);
        engine.hw.rollover();
        assert_eq!(engine.hw.active_top, 255);
    }

    #[test]
    fn period_bounds_are_enforced() {
        let mut engine = engine();
        engine.hw.rollover();

        assert_eq!(
            engine.set_period(0),
            Err(RangeError::PeriodOutOfRange { value: 0, top: TOP })
        );
        assert_eq!(
            engine.set_period(1001),
            Err(RangeError::PeriodOutOfRange {
                value: 1001,
                top: TOP
            })
        );
        assert_eq!(engine.hw.pending_top, None);
    }

    #[test]
    fn reference_scenario() {
        // base clock 19 MHz, prescaler 2^4, top 1000.
        let mut engine = engine();

        assert_eq!(engine.tick_hz(), 1_187_500);
        assert!(engine.set_duty_cycle(LedChannel::Red, 1000).is_ok());
        assert!(engine.set_duty_cycle(LedChannel::Red, 1001).is_err());
    }
}
