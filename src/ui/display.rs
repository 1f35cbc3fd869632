//! SSD1306 OLED display wrapper.
//!
//! Draws the input line on top and the 3×3 key grid below. The armed key
//! is drawn inverted.

use core::fmt::Write;

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Text};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;
use t3_keyboard::config::{
    INPUT_Y, KEY_HEIGHT, KEY_WIDTH, KEY_X_OFFSET, KEY_X_SPACING, KEY_Y_OFFSET, KEY_Y_SPACING,
};
use t3_keyboard::{KeyView, ModeTimer, Session};

/// Characters that fit on the input line.
const INPUT_COLUMNS: usize = 20;

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// Initialise the SSD1306 display and clear the screen.
pub fn init<I2C>(i2c: I2C) -> Display<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    let _ = display.init();
    display.clear_buffer();
    let _ = display.flush();
    display
}

fn text_style(color: BinaryColor) -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(color)
        .build()
}

/// Render the whole session: input line and key grid.
pub fn draw_session<I2C, T>(display: &mut Display<I2C>, session: &Session<'_, T>)
where
    I2C: embedded_hal::i2c::I2c,
    T: ModeTimer,
{
    display.clear_buffer();

    draw_input(display, session.text());
    for row in 1..=3 {
        for col in 1..=3 {
            if let Some(view) = session.key_view(row, col) {
                draw_key(display, row, col, &view);
            }
        }
    }

    let _ = display.flush();
}

/// Input text with a trailing caret; long text scrolls to keep the tail visible.
fn draw_input<I2C>(display: &mut Display<I2C>, text: &str)
where
    I2C: embedded_hal::i2c::I2c,
{
    let skip = text.chars().count().saturating_sub(INPUT_COLUMNS - 1);
    let tail = text
        .char_indices()
        .nth(skip)
        .map_or("", |(i, _)| &text[i..]);

    let mut line: heapless::String<{ INPUT_COLUMNS * 4 }> = heapless::String::new();
    let _ = line.push_str(tail);
    let _ = line.push('_');
    let _ = Text::new(line.as_str(), Point::new(0, INPUT_Y), text_style(BinaryColor::On))
        .draw(display);
}

fn draw_key<I2C>(display: &mut Display<I2C>, row: u8, col: u8, view: &KeyView)
where
    I2C: embedded_hal::i2c::I2c,
{
    let origin = Point::new(
        KEY_X_OFFSET + (col as i32 - 1) * KEY_X_SPACING,
        KEY_Y_OFFSET + (row as i32 - 1) * KEY_Y_SPACING,
    );
    let cell = Rectangle::new(origin, Size::new(KEY_WIDTH, KEY_HEIGHT));

    let (frame, text_color) = if view.pressed {
        (PrimitiveStyle::with_fill(BinaryColor::On), BinaryColor::Off)
    } else {
        (PrimitiveStyle::with_stroke(BinaryColor::On, 1), BinaryColor::On)
    };
    let _ = cell.into_styled(frame).draw(display);

    let mut label: heapless::String<12> = heapless::String::new();
    for c in view.label.iter() {
        let _ = write!(label, "{c}");
    }
    let baseline = cell.center() + Point::new(0, 3);
    let _ = Text::with_alignment(label.as_str(), baseline, text_style(text_color), Alignment::Center)
        .draw(display);
}
