//! User interface subsystem - OLED display + physical buttons.
//!
//! The UI task owns the text-entry session. Button presses and the mode
//! timer are funnelled through one loop so the session sees a single
//! ordered stream of events, and the OLED is redrawn whenever the
//! session asks for it.
//!
//! ## Components
//!
//! - **Display**: SSD1306 128×64 OLED via I²C
//! - **Buttons**: 4 tactile switches with debouncing (UP, SELECT, DOWN, BACK)

pub mod buttons;
pub mod display;

use defmt::{info, Format};
use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Receiver;
use embassy_time::{Instant, Timer};
use t3_keyboard::{
    translate, ButtonEvent, DeadlineTimer, Gesture, InputEvent, Layout, Session, SessionConfig,
    BRACKETS, LOWERCASE, NUMBERS, PUNCTUATION, UPPERCASE,
};

/// A classified press on one button.
#[derive(Clone, Copy, PartialEq, Eq, Format)]
pub struct PressEvent {
    pub button: ButtonEvent,
    pub gesture: Gesture,
}

// Keyboard sets: hold UP for letters, SELECT for digits, DOWN for symbols.
static SET_UP: [Layout; 2] = [LOWERCASE, UPPERCASE];
static SET_SELECT: [Layout; 1] = [NUMBERS];
static SET_DOWN: [Layout; 2] = [PUNCTUATION, BRACKETS];

/// Run text-entry sessions back to back, forever.
pub async fn ui_task<I2C>(i2c: I2C, rx: Receiver<'static, CriticalSectionRawMutex, PressEvent, 4>) -> !
where
    I2C: embedded_hal::i2c::I2c,
{
    let mut display = display::init(i2c);

    loop {
        let mut on_close = |text: &str| info!("Entered: {}", text);
        let mut session = Session::new(
            [&SET_UP, &SET_SELECT, &SET_DOWN],
            DeadlineTimer::new(),
            SessionConfig::default(),
        )
        .with_close_handler(&mut on_close);

        display::draw_session(&mut display, &session);
        run_session(&mut session, &rx, &mut display).await;
    }
}

/// Feed events into `session` until the user closes it.
async fn run_session<I2C>(
    session: &mut Session<'_>,
    rx: &Receiver<'static, CriticalSectionRawMutex, PressEvent, 4>,
    display: &mut display::Display<I2C>,
) where
    I2C: embedded_hal::i2c::I2c,
{
    loop {
        let event = next_event(session, rx).await;
        let Some(event) = event else {
            continue;
        };

        session.timer_mut().set_now(Instant::now().as_millis());
        let response = session.process_event(event);
        if response.closed {
            return;
        }
        if response.redraw.any() {
            display::draw_session(display, session);
        }
    }
}

/// Wait for the next button press or the mode timer, whichever comes first.
async fn next_event(
    session: &mut Session<'_>,
    rx: &Receiver<'static, CriticalSectionRawMutex, PressEvent, 4>,
) -> Option<InputEvent> {
    let press = match session.timer().deadline() {
        Some(at) => match select(rx.receive(), Timer::at(Instant::from_millis(at))).await {
            Either::First(press) => press,
            Either::Second(()) => return session.timer_mut().poll(Instant::now().as_millis()),
        },
        None => rx.receive().await,
    };
    translate(press.button, press.gesture)
}
