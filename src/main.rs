//! t3-keyboard firmware for nRF52840.
//!
//! Spawns one debouncing task per button and the UI task that owns the
//! text-entry session and the OLED.
//!
//! Usage: `cargo run --release --features embedded --target thumbv7em-none-eabihf`

#![no_std]
#![no_main]

mod ui;

use defmt::info;
use embassy_executor::Spawner;
use embassy_nrf::gpio::{AnyPin, Pin};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use t3_keyboard::ButtonEvent;
use ui::PressEvent;
use {defmt_rtt as _, panic_probe as _};

bind_interrupts!(struct Irqs {
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

/// Classified button presses, consumed by the UI task.
static PRESSES: Channel<CriticalSectionRawMutex, PressEvent, 4> = Channel::new();

#[embassy_executor::task(pool_size = 4)]
async fn button_runner(pin: AnyPin, button: ButtonEvent) -> ! {
    ui::buttons::button_task(pin, button, &PRESSES.sender()).await
}

#[embassy_executor::task]
async fn ui_runner(i2c: Twim<'static, peripherals::TWISPI0>) -> ! {
    ui::ui_task(i2c, PRESSES.receiver()).await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_nrf::init(Default::default());
    info!("t3-keyboard starting");

    let i2c = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim::Config::default());

    spawner.must_spawn(button_runner(p.P0_11.degrade(), ButtonEvent::Up));
    spawner.must_spawn(button_runner(p.P0_24.degrade(), ButtonEvent::Select));
    spawner.must_spawn(button_runner(p.P0_12.degrade(), ButtonEvent::Down));
    spawner.must_spawn(button_runner(p.P0_25.degrade(), ButtonEvent::Back));
    spawner.must_spawn(ui_runner(i2c));
}
