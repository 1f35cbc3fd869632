//! Physical buttons and the gestures the front end recognises on them.
//!
//! The hardware layer debounces pins and classifies each press; this
//! module maps the result onto session events.

use crate::registry::Channel;
use crate::session::InputEvent;

/// Physical button events (after debouncing).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    Up,
    Select,
    Down,
    Back,
}

impl ButtonEvent {
    /// Input channel behind this button; BACK has none.
    pub fn channel(self) -> Option<Channel> {
        match self {
            ButtonEvent::Up => Some(Channel::Up),
            ButtonEvent::Select => Some(Channel::Select),
            ButtonEvent::Down => Some(Channel::Down),
            ButtonEvent::Back => None,
        }
    }
}

/// How a button was pressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gesture {
    Click,
    /// Held past the long-press threshold.
    Hold,
    /// Two clicks inside the double-click window. Only BACK reports these.
    DoubleClick,
}

/// Map a recognised gesture to a session event.
pub fn translate(button: ButtonEvent, gesture: Gesture) -> Option<InputEvent> {
    match (button.channel(), gesture) {
        (Some(ch), Gesture::Click) => Some(InputEvent::ChannelPress(ch)),
        (Some(ch), Gesture::Hold) => Some(InputEvent::ChannelLongPress(ch)),
        (None, Gesture::Click) => Some(InputEvent::BackPress),
        (None, Gesture::DoubleClick) => Some(InputEvent::BackspacePress),
        _ => None,
    }
}

/// Whether `button` distinguishes double clicks.
///
/// The front end must delay a single click on such buttons until the
/// double-click window closes.
pub fn wants_double_click(button: ButtonEvent) -> bool {
    button == ButtonEvent::Back
}

/// Whether `button` distinguishes long presses.
pub fn wants_hold(button: ButtonEvent) -> bool {
    button.channel().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_buttons_map_click_and_hold() {
        assert_eq!(
            translate(ButtonEvent::Up, Gesture::Click),
            Some(InputEvent::ChannelPress(Channel::Up))
        );
        assert_eq!(
            translate(ButtonEvent::Down, Gesture::Hold),
            Some(InputEvent::ChannelLongPress(Channel::Down))
        );
        assert_eq!(translate(ButtonEvent::Select, Gesture::DoubleClick), None);
    }

    #[test]
    fn back_maps_click_and_double_click() {
        assert_eq!(
            translate(ButtonEvent::Back, Gesture::Click),
            Some(InputEvent::BackPress)
        );
        assert_eq!(
            translate(ButtonEvent::Back, Gesture::DoubleClick),
            Some(InputEvent::BackspacePress)
        );
        assert_eq!(translate(ButtonEvent::Back, Gesture::Hold), None);
    }

    #[test]
    fn gesture_capabilities() {
        assert!(wants_double_click(ButtonEvent::Back));
        assert!(!wants_double_click(ButtonEvent::Up));
        assert!(wants_hold(ButtonEvent::Select));
        assert!(!wants_hold(ButtonEvent::Back));
    }
}
