//! Alternate RGB demo: continuous brightness ramp on the red channel.
//!
//! The animator task advances a linear ramp every 20 ms and applies the
//! updated level to channel 0. The ramp direction reflects at the
//! brightness bounds; because it starts at the lower bound with a step
//! that divides the range, the triangle wave touches the bounds exactly.

#![no_std]
#![no_main]

use defmt::{debug, info};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_time::Timer;
use panic_probe as _;

use pwm_core::{Fade, LedChannel, PwmEngine};
use rgb_demo::board::{self, RgbPwm};

/// Amount by which the brightness changes per tick.
const FADE_STEP_SIZE: i32 = 5;

/// Maximum brightness, the upper ramp bound.
const BRIGHTNESS: i32 = 255;

/// Ramp tick interval, milliseconds.
const FADE_TICK_MS: u64 = 20;

/// Heartbeat message delay, seconds.
const HEARTBEAT_DELAY_SECS: u64 = 10;

#[embassy_executor::task]
async fn animator(mut engine: PwmEngine<RgbPwm>) {
    let mut fade = Fade::new(0, FADE_STEP_SIZE, 0, BRIGHTNESS);

    loop {
        Timer::after_millis(FADE_TICK_MS).await;

        // The updated level is the one applied to hardware. Started at
        // the lower bound the ramp never goes negative, so the cast
        // cannot lose the sign.
        let level = fade.tick();
        engine.set_duty_cycle(LedChannel::Red, level as u16).unwrap();
        debug!("dc {}", level);
    }
}

#[embassy_executor::task]
async fn heartbeat() {
    loop {
        Timer::after_secs(HEARTBEAT_DELAY_SECS).await;
        info!("Heartbeat");
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let peripherals = embassy_stm32::init(Default::default());
    info!("Device started");

    // A configuration error is fatal: abort startup instead of running
    // with an undefined timer state.
    let hw = match RgbPwm::single(peripherals.TIM2, peripherals.PA0, &board::FADE_CONFIG) {
        Ok(hw) => hw,
        Err(error) => defmt::panic!("PWM pin setup rejected: {}", error),
    };
    let engine = match PwmEngine::initialize(hw, board::FADE_CONFIG, &board::RED_BINDING) {
        Ok(engine) => engine,
        Err(error) => defmt::panic!("timer configuration rejected: {}", error),
    };

    info!("Timer frequency {} Hz", engine.tick_hz());

    // The animator is spawned only after `initialize` has returned, so
    // every duty-cycle update hits a fully configured, running timer.
    spawner.spawn(animator(engine)).unwrap();
    spawner.spawn(heartbeat()).unwrap();

    loop {
        Timer::after_secs(1).await;
    }
}
