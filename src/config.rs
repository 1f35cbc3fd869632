//! Application-wide constants and compile-time configuration.
//!
//! All timing parameters, buffer bounds and display geometry live here
//! so they can be tuned in one place.

// Resolution

/// Countdown before an armed key resolves (ms).
///
/// One value for every armed wait; there is no per-key timeout.
pub const MODE_TIMEOUT_MS: u32 = 600;

// Input buffer

/// Default maximum number of characters the user may enter.
pub const DEFAULT_MAX_LENGTH: usize = 24;

/// Hard upper bound for any configured maximum length (characters).
pub const INPUT_CAPACITY: usize = 64;

/// Backing storage for the input buffer (bytes). Four UTF-8 bytes per char.
pub const INPUT_CAPACITY_BYTES: usize = INPUT_CAPACITY * 4;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; actual `embassy_nrf::peripherals::*` types are
// selected in `main.rs`.  Adjust for your custom PCB.
//
//   Button UP      → P0.11
//   Button SELECT  → P0.24
//   Button DOWN    → P0.12
//   Button BACK    → P0.25
//   I²C SDA        → P0.26
//   I²C SCL        → P0.27

/// Button debounce time (ms).
pub const BUTTON_DEBOUNCE_MS: u64 = 50;

/// Hold time after which a press counts as a long press (ms).
pub const LONG_PRESS_MS: u64 = 500;

/// Window in which a second BACK press turns into a backspace (ms).
pub const DOUBLE_CLICK_MS: u64 = 300;

// Display geometry (SSD1306 128×64)

/// Baseline of the input text line.
pub const INPUT_Y: i32 = 10;

/// Top-left corner of the key grid.
pub const KEY_X_OFFSET: i32 = 2;
pub const KEY_Y_OFFSET: i32 = 16;

/// Distance between key origins.
pub const KEY_X_SPACING: i32 = 42;
pub const KEY_Y_SPACING: i32 = 16;

/// Key cell size.
pub const KEY_WIDTH: u32 = 40;
pub const KEY_HEIGHT: u32 = 15;

/// Runtime configuration supplied by the embedding application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionConfig<'a> {
    /// Maximum number of characters; clamped to `1..=INPUT_CAPACITY`.
    /// `Session::try_new` rejects values above the capacity instead.
    pub max_length: usize,
    /// Text the buffer starts with, truncated to `max_length`.
    pub initial_text: Option<&'a str>,
}

impl Default for SessionConfig<'_> {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            initial_text: None,
        }
    }
}

impl<'a> SessionConfig<'a> {
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn with_initial_text(mut self, text: &'a str) -> Self {
        self.initial_text = Some(text);
        self
    }

    /// The effective bound after clamping.
    pub fn effective_max_length(&self) -> usize {
        self.max_length.clamp(1, INPUT_CAPACITY)
    }
}
