//! Board support: RGB LED pin map and the PWM hardware adapter.
//!
//! The RGB LED is driven from a single timer so that all three channels
//! share one period (top) value:
//!
//! - RED on pin A0 (PA0), Channel 1 of TIM 2
//! - GREEN on pin D3 (PB3), Channel 2 of TIM 2
//! - BLUE on pin D6 (PB10), Channel 3 of TIM 2
//!
//! All three pins reach TIM2 through alternate function 1.

use embassy_stm32::Peri;
use embassy_stm32::gpio::OutputType;
use embassy_stm32::peripherals::{PA0, PB3, PB10, TIM2};
use embassy_stm32::time::hz;
use embassy_stm32::timer::{
    Ch1, Ch2, Ch3, Channel,
    simple_pwm::{PwmPin, SimplePwm},
};
use pwm_core::{ChannelBinding, ConfigError, LedChannel, Port, PwmChannels, TimerConfig};

/// With the default RCC configuration the device runs from MSIS, so the
/// timer sees a 4 MHz kernel clock.
pub const TIMER_CLOCK_HZ: u32 = 4_000_000;

/// Prescaler exponent for both demos: the counter ticks at
/// `4 MHz / 2^2 = 1 MHz`.
pub const PRESCALER_EXPONENT: u8 = 2;

/// Configuration of the three-channel demo: duty values range over
/// 0..=1000, the PWM period is about 1 kHz.
pub const RGB_CONFIG: TimerConfig = TimerConfig::new(TIMER_CLOCK_HZ, PRESCALER_EXPONENT, 1000, 3);

/// Configuration of the single-channel fade demo. The top value leaves
/// headroom above the 255 brightness ceiling because the ramp may
/// overshoot its bound by one step for a single tick.
pub const FADE_CONFIG: TimerConfig = TimerConfig::new(TIMER_CLOCK_HZ, PRESCALER_EXPONENT, 300, 1);

/// Fixed pin bindings of the logical LED channels. Built at compile time
/// and never reassigned.
pub const BINDINGS: [ChannelBinding; 3] = [
    ChannelBinding::new(LedChannel::Red, Port::A, 0, 1),
    ChannelBinding::new(LedChannel::Green, Port::B, 3, 1),
    ChannelBinding::new(LedChannel::Blue, Port::B, 10, 1),
];

/// Binding of the fade demo, red channel only.
pub const RED_BINDING: [ChannelBinding; 1] = [BINDINGS[0]];

/// The compare channel of TIM 2 that drives the LED channel.
fn timer_channel(channel: LedChannel) -> Channel {
    match channel {
        LedChannel::Red => Channel::Ch1,
        LedChannel::Green => Channel::Ch2,
        LedChannel::Blue => Channel::Ch3,
    }
}

/// PWM hardware adapter over TIM 2.
///
/// Implements the engine's [`PwmChannels`] trait. `SimplePwm` keeps the
/// compare preload (shadow) registers and the auto-reload preload
/// enabled, so every write made through this adapter is latched by the
/// hardware at the next period rollover — the buffered-update contract
/// the engine relies on.
pub struct RgbPwm {
    pwm: SimplePwm<'static, TIM2>,
    tick_hz: u32,
}

impl RgbPwm {
    /// Configures PA0, PB3 and PB10 as push-pull timer outputs and sets
    /// up TIM 2 for the three-channel demo.
    ///
    /// The pin peripherals are consumed, so a second configuration of
    /// the same pins cannot be expressed.
    pub fn new(
        tim: Peri<'static, TIM2>,
        red: Peri<'static, PA0>,
        green: Peri<'static, PB3>,
        blue: Peri<'static, PB10>,
        config: &TimerConfig,
    ) -> Result<RgbPwm, ConfigError> {
        let tick_hz = config.validate()?;
        let pwm_hz = config.pwm_hz()?;

        // The `PwmPin` sets the correct configuration of the MODER and
        // the Alternate Function of each pin.
        let red_pwm_pin: PwmPin<'_, TIM2, Ch1> = PwmPin::new(red, OutputType::PushPull);
        let green_pwm_pin: PwmPin<'_, TIM2, Ch2> = PwmPin::new(green, OutputType::PushPull);
        let blue_pwm_pin: PwmPin<'_, TIM2, Ch3> = PwmPin::new(blue, OutputType::PushPull);

        let pwm = SimplePwm::new(
            tim,                 // Timer 2 peripheral
            Some(red_pwm_pin),   // Channel 1 output (PA0)
            Some(green_pwm_pin), // Channel 2 output (PB3)
            Some(blue_pwm_pin),  // Channel 3 output (PB10)
            None,                // Channel 4 not used
            hz(pwm_hz),          // PWM frequency derived from the config
            Default::default(),  // Default configuration
        );

        Ok(RgbPwm { pwm, tick_hz })
    }

    /// Single-channel variant: only the red LED on PA0 is routed.
    pub fn single(
        tim: Peri<'static, TIM2>,
        red: Peri<'static, PA0>,
        config: &TimerConfig,
    ) -> Result<RgbPwm, ConfigError> {
        let tick_hz = config.validate()?;
        let pwm_hz = config.pwm_hz()?;

        let red_pwm_pin: PwmPin<'_, TIM2, Ch1> = PwmPin::new(red, OutputType::PushPull);

        let pwm = SimplePwm::new(
            tim,
            Some(red_pwm_pin),
            None,
            None,
            None,
            hz(pwm_hz),
            Default::default(),
        );

        Ok(RgbPwm { pwm, tick_hz })
    }
}

impl PwmChannels for RgbPwm {
    fn write_compare(&mut self, channel: LedChannel, value: u16, top: u16) {
        // The engine guarantees value <= top, and the fraction maps the
        // logical 0..=top range exactly onto the hardware compare range.
        // The write lands in the preloaded compare register.
        self.pwm
            .channel(timer_channel(channel))
            .set_duty_cycle_fraction(value, top);
    }

    fn write_top(&mut self, value: u16) {
        // The period is re-derived from the tick rate. The auto-reload
        // register is preloaded, so the new period also switches at the
        // rollover.
        self.pwm.set_frequency(hz(self.tick_hz / (value as u32 + 1)));
    }

    fn enable_channel(&mut self, channel: LedChannel) {
        self.pwm.channel(timer_channel(channel)).enable();
    }

    fn start(&mut self) {
        // The counter is already free-running after `SimplePwm::new`;
        // the outputs stay inert until the channels are enabled.
    }
}
