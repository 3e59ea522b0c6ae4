//! Canonical RGB demo: discrete duty-cycle steps.
//!
//! A heartbeat task logs a status line every 10 seconds while the
//! animator task cycles the RGB LED through a fixed table of duty-cycle
//! tuples, holding each one for two seconds.

#![no_std]
#![no_main]

use defmt::info;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_time::Timer;
use panic_probe as _;

use pwm_core::{PwmEngine, StepSequence};
use rgb_demo::board::{self, RgbPwm};

/// Duty-cycle tuples (red, green, blue), applied in order and wrapping
/// back to the first after the last.
const DUTY_STEPS: [(u16, u16, u16); 3] = [(1000, 220, 50), (500, 110, 25), (0, 0, 0)];

/// How long each tuple is held, in milliseconds.
const DUTY_CYCLE_DELAY_MS: u64 = 2000;

/// Heartbeat message delay, seconds.
const HEARTBEAT_DELAY_SECS: u64 = 10;

#[embassy_executor::task]
async fn animator(mut engine: PwmEngine<RgbPwm>) {
    let mut sequence = StepSequence::new(&DUTY_STEPS);

    loop {
        Timer::after_millis(DUTY_CYCLE_DELAY_MS).await;

        // The tuple is applied atomically: validated as a whole, and
        // each compare write is latched at the next period rollover.
        let (red, green, blue) = sequence.advance();
        engine.set_rgb(red, green, blue).unwrap();
        info!("dc {},{},{}", red, green, blue);
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
    let hw = match RgbPwm::new(
        peripherals.TIM2,
        peripherals.PA0,
        peripherals.PB3,
        peripherals.PB10,
        &board::RGB_CONFIG,
    ) {
        Ok(hw) => hw,
        Err(error) => defmt::panic!("PWM pin setup rejected: {}", error),
    };
    let engine = match PwmEngine::initialize(hw, board::RGB_CONFIG, &board::BINDINGS) {
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
