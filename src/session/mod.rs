//! Input resolution state machine.
//!
//! A session tracks which key is armed, whether the user is picking one
//! candidate out of an ambiguous key, and the text entered so far.
//!
//! ## Flow
//!
//! 1. A short press on a channel arms the first key of that channel's row.
//!    Further presses on the same channel walk the row's keys 1 → 2 → 3 → 1,
//!    each restarting the countdown. A press on another channel jumps rows.
//!    Channels without a keyboard set ignore short and long presses alike.
//! 2. When the countdown expires, a key with a single candidate commits it.
//!    A key with more candidates enters disambiguation: its 1st/2nd/3rd
//!    candidate is offered on the Up/Select/Down channel.
//! 3. Any channel press during disambiguation commits that channel's
//!    candidate and returns to idle.
//!
//! BACK cancels the armed key or the disambiguation; from idle it closes
//! the session. A double BACK removes the last character.
//!
//! Events are processed one at a time by [`Session::process_event`]. The
//! returned [`Response`] tells the renderer what to redraw.


use crate::buffer::InputBuffer;
use crate::config::{SessionConfig, INPUT_CAPACITY, MODE_TIMEOUT_MS};
use crate::error::{Error, Result};
use crate::layout::{KeyGroup, Layout};
use crate::registry::{Channel, KeyboardRegistry};
use crate::timer::{DeadlineTimer, ModeTimer, TimerToken};

/// Events the session consumes, already decoded from raw buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    ChannelPress(Channel),
    ChannelLongPress(Channel),
    TimerExpired(TimerToken),
    BackPress,
    /// Double press of BACK.
    BackspacePress,
}

/// Where the session is in resolving a character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputState {
    #[default]
    Idle,
    /// Key at 1-based `(row, col)` is armed with a live countdown.
    Armed { row: u8, col: u8 },
    /// Waiting for a channel press to pick `candidates[channel]`.
    Disambiguating { candidates: KeyGroup },
}

/// What the renderer should refresh.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Redraw {
    /// Key grid (cursor, mode or layout changed).
    pub keys: bool,
    /// Input text.
    pub input: bool,
}

impl Redraw {
    pub const NONE: Self = Self {
        keys: false,
        input: false,
    };
    pub const KEYS: Self = Self {
        keys: true,
        input: false,
    };
    pub const INPUT: Self = Self {
        keys: false,
        input: true,
    };

    pub fn any(self) -> bool {
        self.keys || self.input
    }
}

/// Effects of one processed event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Response {
    pub redraw: Redraw,
    /// Character appended to the buffer, if any.
    pub committed: Option<char>,
    /// The session finished and delivered its text.
    pub closed: bool,
}

impl Response {
    const fn redraw(redraw: Redraw) -> Self {
        Self {
            redraw,
            committed: None,
            closed: false,
        }
    }

    fn commit(committed: Option<char>) -> Self {
        Self {
            redraw: Redraw {
                keys: true,
                input: committed.is_some(),
            },
            committed,
            closed: false,
        }
    }
}

/// How one key of the grid should be drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyView {
    pub label: KeyGroup,
    /// The key is armed.
    pub pressed: bool,
}

/// Handler receiving the final text when the user closes the session.
pub type CloseHandler<'a> = &'a mut dyn FnMut(&str);

/// One text-entry session.
pub struct Session<'a, T: ModeTimer = DeadlineTimer> {
    registry: KeyboardRegistry<'a>,
    buffer: InputBuffer,
    state: InputState,
    timer: T,
    /// Token of the outstanding countdown.
    live_token: Option<TimerToken>,
    last_token: TimerToken,
    on_close: Option<CloseHandler<'a>>,
    closed: bool,
}

impl<'a, T: ModeTimer> Session<'a, T> {
    /// Create a session over the Up/Select/Down keyboard sets.
    ///
    /// With every set empty the session is disabled: channel presses are
    /// ignored and only BACK (close) still works.
    pub fn new(sets: [&'a [Layout]; 3], timer: T, config: SessionConfig<'_>) -> Self {
        info!("Initializing T3 session");
        if config.effective_max_length() != config.max_length {
            warn!(
                "Max length {} out of range, using {}",
                config.max_length,
                config.effective_max_length()
            );
        }
        let mut buffer = InputBuffer::new(config.effective_max_length());
        if let Some(text) = config.initial_text {
            buffer.set_text(text);
        }
        Self {
            registry: KeyboardRegistry::new(sets),
            buffer,
            state: InputState::Idle,
            timer,
            live_token: None,
            last_token: TimerToken::default(),
            on_close: None,
            closed: false,
        }
    }

    /// Like [`Session::new`], but refuses a configuration without layouts
    /// or with a maximum length beyond [`INPUT_CAPACITY`].
    pub fn try_new(sets: [&'a [Layout]; 3], timer: T, config: SessionConfig<'_>) -> Result<Self> {
        if config.max_length > INPUT_CAPACITY {
            return Err(Error::MaxLength(config.max_length));
        }
        let session = Self::new(sets, timer, config);
        if session.is_disabled() {
            return Err(Error::NoKeyboards);
        }
        Ok(session)
    }

    pub fn with_close_handler(mut self, handler: CloseHandler<'a>) -> Self {
        self.on_close = Some(handler);
        self
    }

    /// Apply one event. Events after close are ignored.
    pub fn process_event(&mut self, event: InputEvent) -> Response {
        if self.closed {
            return Response::default();
        }
        match event {
            InputEvent::ChannelPress(ch) => self.press(ch),
            InputEvent::ChannelLongPress(ch) => self.long_press(ch),
            InputEvent::TimerExpired(token) => self.expire(token),
            InputEvent::BackPress => self.back(),
            InputEvent::BackspacePress => self.backspace(),
        }
    }

    fn press(&mut self, ch: Channel) -> Response {
        // Covers the disabled registry too: every count is zero there.
        if self.registry.layout_count(ch) == 0 {
            return Response::default();
        }

        let (row, col) = match self.state {
            InputState::Disambiguating { candidates } => {
                let committed = candidates
                    .get(ch.index())
                    .filter(|&c| self.buffer.append(c));
                if let Some(c) = committed {
                    info!("Adding char: {}", c);
                }
                self.leave_selection();
                return Response::commit(committed);
            }
            InputState::Armed { row, col } if row == ch.row() => {
                debug!("Cycling column");
                (row, col % 3 + 1)
            }
            _ => {
                debug!("Changing row: {}", ch.row());
                (ch.row(), 1)
            }
        };

        self.state = InputState::Armed { row, col };
        self.start_timer();
        Response::redraw(Redraw::KEYS)
    }

    fn long_press(&mut self, ch: Channel) -> Response {
        if self.registry.layout_count(ch) == 0 {
            return Response::default();
        }
        let left_selection = matches!(self.state, InputState::Disambiguating { .. });
        if left_selection {
            self.leave_selection();
        }
        if self.registry.long_press(ch).changed() || left_selection {
            Response::redraw(Redraw::KEYS)
        } else {
            Response::default()
        }
    }

    fn expire(&mut self, token: TimerToken) -> Response {
        if self.live_token != Some(token) {
            debug!("Discarding stale timer {}", token);
            return Response::default();
        }
        self.live_token = None;
        info!("Timer timeout");

        let InputState::Armed { row, col } = self.state else {
            return Response::default();
        };

        let group = self.registry.resolve_candidates(row, col);
        if group.len() > 1 {
            info!("Toggling mode: selecting");
            self.state = InputState::Disambiguating { candidates: group };
            return Response::redraw(Redraw::KEYS);
        }

        let committed = group.first().filter(|&c| self.buffer.append(c));
        if let Some(c) = committed {
            info!("Adding char: {}", c);
        }
        self.state = InputState::Idle;
        Response::commit(committed)
    }

    fn back(&mut self) -> Response {
        match self.state {
            InputState::Armed { .. } => {
                self.cancel_timer();
                self.state = InputState::Idle;
                Response::redraw(Redraw::KEYS)
            }
            InputState::Disambiguating { .. } => {
                info!("Cancelling char selection");
                self.leave_selection();
                Response::redraw(Redraw::KEYS)
            }
            InputState::Idle => self.close(),
        }
    }

    fn backspace(&mut self) -> Response {
        if self.buffer.remove_last() {
            info!("Backspace");
            Response::redraw(Redraw::INPUT)
        } else {
            Response::default()
        }
    }

    fn close(&mut self) -> Response {
        info!("Closing session: {}", self.buffer.as_str());
        self.closed = true;
        if let Some(handler) = self.on_close.as_mut() {
            handler(self.buffer.as_str());
        }
        Response {
            redraw: Redraw::NONE,
            committed: None,
            closed: true,
        }
    }

    fn leave_selection(&mut self) {
        self.cancel_timer();
        self.state = InputState::Idle;
    }

    fn start_timer(&mut self) {
        let token = self.last_token.next();
        self.last_token = token;
        if self.live_token.is_some() {
            debug!("Rescheduling timer");
            self.timer.reschedule(MODE_TIMEOUT_MS, token);
        } else {
            debug!("Starting timer");
            self.timer.arm(MODE_TIMEOUT_MS, token);
        }
        self.live_token = Some(token);
    }

    fn cancel_timer(&mut self) {
        if self.live_token.take().is_some() {
            debug!("Cancelling timer");
            self.timer.cancel();
        }
    }

    // Read accessors for the renderer and the embedding application.

    pub fn state(&self) -> InputState {
        self.state
    }

    /// Armed key as 1-based `(row, col)`; `(0, 0)` when nothing is armed.
    pub fn cursor(&self) -> (u8, u8) {
        match self.state {
            InputState::Armed { row, col } => (row, col),
            _ => (0, 0),
        }
    }

    pub fn is_selecting(&self) -> bool {
        matches!(self.state, InputState::Disambiguating { .. })
    }

    pub fn is_disabled(&self) -> bool {
        self.registry.is_disabled()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn text(&self) -> &str {
        self.buffer.as_str()
    }

    /// Replace the entered text, truncated to the maximum length.
    pub fn set_text(&mut self, text: &str) -> Response {
        self.buffer.set_text(text);
        Response::redraw(Redraw::INPUT)
    }

    pub fn buffer(&self) -> &InputBuffer {
        &self.buffer
    }

    pub fn registry(&self) -> &KeyboardRegistry<'a> {
        &self.registry
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    /// How the key at 1-based `(row, col)` should look, `None` if hidden.
    ///
    /// While disambiguating only the centre column is shown, each row
    /// carrying the candidate its channel would pick.
    pub fn key_view(&self, row: u8, col: u8) -> Option<KeyView> {
        if !(1..=3).contains(&row) || !(1..=3).contains(&col) {
            return None;
        }
        match self.state {
            InputState::Disambiguating { candidates } => {
                if col != 2 {
                    return None;
                }
                let label = match candidates.get(row as usize - 1) {
                    Some(c) => KeyGroup::new(&[c]),
                    None => KeyGroup::EMPTY,
                };
                Some(KeyView {
                    label,
                    pressed: false,
                })
            }
            state => Some(KeyView {
                label: self.registry.resolve_candidates(row, col),
                pressed: state == InputState::Armed { row, col },
            }),
        }
    }
}
