//! Keyboard-set registry.
//!
//! Each of the three input channels owns an ordered list of layouts the
//! user cycles through by holding that channel's button. Exactly one
//! channel supplies the layout currently on screen.

use crate::layout::{KeyGroup, Layout};

/// One of the three primary input channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    Up = 0,
    Select = 1,
    Down = 2,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Up, Channel::Select, Channel::Down];

    /// Slot index (0-based).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Grid row this channel arms (1-based).
    pub fn row(self) -> u8 {
        self as u8 + 1
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Result of a long press on a channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetChange {
    /// The channel has no layouts; nothing happened.
    Ignored,
    /// Active channel held but it has a single layout.
    Unchanged,
    /// Advanced to the next layout of the active channel.
    Cycled,
    /// Another channel became active at its first layout.
    Switched,
}

impl SetChange {
    pub fn changed(self) -> bool {
        matches!(self, SetChange::Cycled | SetChange::Switched)
    }
}

/// The three keyboard sets plus the active channel/layout selection.
#[derive(Clone, Debug)]
pub struct KeyboardRegistry<'a> {
    sets: [&'a [Layout]; 3],
    /// `None` when no set holds a layout.
    active: Option<Channel>,
    layout_index: usize,
}

impl<'a> KeyboardRegistry<'a> {
    /// Select the first non-empty set in Up → Select → Down order.
    ///
    /// With every set empty the registry is disabled.
    pub fn new(sets: [&'a [Layout]; 3]) -> Self {
        let active = Channel::ALL
            .into_iter()
            .find(|ch| !sets[ch.index()].is_empty());
        if active.is_none() {
            error!("No keyboards defined");
        }
        Self {
            sets,
            active,
            layout_index: 0,
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.active.is_none()
    }

    pub fn active_channel(&self) -> Option<Channel> {
        self.active
    }

    pub fn active_layout_index(&self) -> usize {
        self.layout_index
    }

    pub fn active_layout(&self) -> Option<&'a Layout> {
        let ch = self.active?;
        self.sets[ch.index()].get(self.layout_index)
    }

    pub fn layout_count(&self, channel: Channel) -> usize {
        self.sets[channel.index()].len()
    }

    /// Advance the active channel's layout, wrapping. Single-layout sets stay put.
    pub fn cycle_layout(&mut self) -> bool {
        let Some(ch) = self.active else {
            return false;
        };
        let count = self.layout_count(ch);
        if count <= 1 {
            return false;
        }
        self.layout_index = (self.layout_index + 1) % count;
        info!("Cycling keyboard: {} -> {}", ch, self.layout_index);
        true
    }

    /// Make `channel` active at its first layout.
    ///
    /// No-op for an empty channel or the channel already active.
    pub fn switch_active_channel(&mut self, channel: Channel) -> bool {
        if self.layout_count(channel) == 0 || self.active == Some(channel) {
            return false;
        }
        info!("Changing keyboard set: {}", channel);
        self.active = Some(channel);
        self.layout_index = 0;
        true
    }

    /// Long-press handling: cycle when `channel` is active, otherwise switch to it.
    pub fn long_press(&mut self, channel: Channel) -> SetChange {
        if self.layout_count(channel) == 0 {
            return SetChange::Ignored;
        }
        if self.active == Some(channel) {
            if self.cycle_layout() {
                SetChange::Cycled
            } else {
                SetChange::Unchanged
            }
        } else if self.switch_active_channel(channel) {
            SetChange::Switched
        } else {
            SetChange::Unchanged
        }
    }

    /// Candidates at 1-based `(row, col)` of the active layout.
    ///
    /// Empty when disabled or out of range.
    pub fn resolve_candidates(&self, row: u8, col: u8) -> KeyGroup {
        self.active_layout()
            .and_then(|layout| layout.group(row, col))
            .copied()
            .unwrap_or(KeyGroup::EMPTY)
    }
}
