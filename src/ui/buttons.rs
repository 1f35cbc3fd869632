//! GPIO button input with async debouncing and gesture detection.
//!
//! Four physical buttons (active-low with internal pull-up):
//!   - UP, SELECT, DOWN - click arms/cycles keys, hold switches keyboards
//!   - BACK             - click cancels or closes, double click deletes
//!
//! Each button is handled by an async task that waits for a GPIO edge,
//! debounces it, classifies the gesture, and sends a `PressEvent` to the
//! UI channel.

use crate::ui::PressEvent;
use defmt::info;
use embassy_nrf::gpio::{AnyPin, Input, Pull};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Sender;
use embassy_time::{with_timeout, Duration, Timer};
use t3_keyboard::config::{BUTTON_DEBOUNCE_MS, DOUBLE_CLICK_MS, LONG_PRESS_MS};
use t3_keyboard::input::{wants_double_click, wants_hold};
use t3_keyboard::{ButtonEvent, Gesture};

async fn debounce() {
    Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;
}

/// Run a single button polling loop.
///
/// Holds are reported as soon as the threshold passes; clicks on BACK
/// wait out the double-click window first.
pub async fn button_task(
    pin: AnyPin,
    button: ButtonEvent,
    tx: &Sender<'static, CriticalSectionRawMutex, PressEvent, 4>,
) -> ! {
    let mut btn = Input::new(pin, Pull::Up);

    loop {
        // Wait for falling edge (button press, active-low).
        btn.wait_for_falling_edge().await;
        debounce().await;

        if !btn.is_low() {
            continue;
        }

        let released = if wants_hold(button) {
            with_timeout(Duration::from_millis(LONG_PRESS_MS), btn.wait_for_high())
                .await
                .is_ok()
        } else {
            btn.wait_for_high().await;
            true
        };

        let gesture = if !released {
            Gesture::Hold
        } else if wants_double_click(button)
            && with_timeout(Duration::from_millis(DOUBLE_CLICK_MS), btn.wait_for_low())
                .await
                .is_ok()
        {
            Gesture::DoubleClick
        } else {
            Gesture::Click
        };

        info!("Button: {} {}", button, gesture);
        tx.send(PressEvent { button, gesture }).await;

        // Wait for release to avoid repeat triggers.
        btn.wait_for_high().await;
        debounce().await;
    }
}
