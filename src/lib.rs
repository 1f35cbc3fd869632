//! T3 multi-tap text entry for three-button devices.
//!
//! Three channels (UP, SELECT, DOWN) each own a cyclable set of 3×3
//! layouts. Short presses walk a row of keys, a timeout resolves the
//! armed key, and ambiguous keys are settled by one more channel press.
//! BACK cancels, double BACK deletes, BACK from idle finishes.
//!
//! This crate is the host-testable core; the embedded binary in `main.rs`
//! adds buttons and the OLED.
//!
//! Usage: `cargo test --lib`

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod buffer;
pub mod config;
pub mod error;
pub mod input;
pub mod layout;
pub mod registry;
pub mod session;
pub mod timer;

pub use buffer::InputBuffer;
pub use config::SessionConfig;
pub use error::{Error, LayoutError, Result};
pub use input::{translate, ButtonEvent, Gesture};
pub use layout::{KeyGroup, Layout, BRACKETS, LOWERCASE, NUMBERS, PUNCTUATION, UPPERCASE};
pub use registry::{Channel, KeyboardRegistry, SetChange};
pub use session::{InputEvent, InputState, KeyView, Redraw, Response, Session};
pub use timer::{DeadlineTimer, ModeTimer, TimerToken};
