//! Integration tests for t3-keyboard host-testable logic.
//!
//! These drive a session with the deadline timer and a simulated clock,
//! the same way the firmware event loop does.

use t3_keyboard::config::MODE_TIMEOUT_MS;
use t3_keyboard::{
    translate, ButtonEvent, DeadlineTimer, Error, Gesture, InputEvent, InputState, KeyGroup,
    Layout, Session, SessionConfig, BRACKETS, LOWERCASE, NUMBERS, PUNCTUATION, UPPERCASE,
};

static LETTERS: [Layout; 2] = [LOWERCASE, UPPERCASE];
static DIGITS: [Layout; 1] = [NUMBERS];
static SYMBOLS: [Layout; 2] = [PUNCTUATION, BRACKETS];

/// Session plus a millisecond clock.
struct Harness<'a> {
    session: Session<'a>,
    now: u64,
}

impl<'a> Harness<'a> {
    fn new(sets: [&'a [Layout]; 3]) -> Self {
        Self::with_session(Session::new(sets, DeadlineTimer::new(), SessionConfig::default()))
    }

    fn with_session(session: Session<'a>) -> Self {
        Self { session, now: 0 }
    }

    fn button(&mut self, button: ButtonEvent, gesture: Gesture) {
        let event = translate(button, gesture).expect("gesture maps to an event");
        self.session.timer_mut().set_now(self.now);
        self.session.process_event(event);
    }

    fn click(&mut self, button: ButtonEvent) {
        self.button(button, Gesture::Click);
        self.advance(100);
    }

    /// Move the clock forward, delivering any expiry on the way.
    fn advance(&mut self, ms: u64) {
        self.now += ms;
        if let Some(event) = self.session.timer_mut().poll(self.now) {
            self.session.process_event(event);
        }
    }

    fn wait_timeout(&mut self) {
        self.advance(u64::from(MODE_TIMEOUT_MS));
    }
}

fn standard() -> Harness<'static> {
    Harness::new([&LETTERS, &DIGITS, &SYMBOLS])
}

#[test]
fn single_candidate_key_commits_on_timeout() {
    let mut h = standard();
    h.button(ButtonEvent::Select, Gesture::Hold);
    h.click(ButtonEvent::Down);
    assert_eq!(h.session.state(), InputState::Armed { row: 3, col: 1 });

    h.wait_timeout();
    assert_eq!(h.session.text(), "7");
    assert_eq!(h.session.state(), InputState::Idle);
}

#[test]
fn up_key_disambiguates_abc() {
    let mut h = standard();
    h.click(ButtonEvent::Up);
    assert_eq!(h.session.cursor(), (1, 1));

    h.wait_timeout();
    assert_eq!(
        h.session.state(),
        InputState::Disambiguating {
            candidates: KeyGroup::new(&['a', 'b', 'c'])
        }
    );

    h.click(ButtonEvent::Up);
    assert_eq!(h.session.text(), "a");
}

#[test]
fn triple_select_walks_the_middle_row() {
    let mut h = standard();
    let mut cursors = Vec::new();
    for _ in 0..3 {
        h.click(ButtonEvent::Select);
        cursors.push(h.session.cursor());
    }
    assert_eq!(cursors, [(2, 1), (2, 2), (2, 3)]);

    h.wait_timeout();
    h.click(ButtonEvent::Down);
    assert_eq!(h.session.text(), "r");
}

#[test]
fn jkl_third_candidate_via_down() {
    let mut h = standard();
    h.click(ButtonEvent::Select);
    h.wait_timeout();
    h.click(ButtonEvent::Down);
    assert_eq!(h.session.text(), "l");
}

#[test]
fn bottom_right_key_offers_space() {
    for (pick, expected) in [(ButtonEvent::Up, "y"), (ButtonEvent::Down, " ")] {
        let mut h = standard();
        h.click(ButtonEvent::Down);
        h.click(ButtonEvent::Down);
        h.click(ButtonEvent::Down);
        assert_eq!(h.session.cursor(), (3, 3));

        h.wait_timeout();
        assert!(h.session.is_selecting());
        h.click(pick);
        assert_eq!(h.session.text(), expected);
    }
}

#[test]
fn presses_inside_window_keep_pushing_the_deadline() {
    let mut h = standard();
    h.click(ButtonEvent::Up);
    for _ in 0..5 {
        // 100ms per click, well inside the window.
        h.click(ButtonEvent::Up);
    }
    assert_eq!(h.session.cursor(), (1, 3));
    assert!(h.session.timer().is_pending());

    h.wait_timeout();
    assert!(h.session.is_selecting());
}

#[test]
fn no_layouts_leaves_everything_idle() {
    let mut h = Harness::new([&[], &[], &[]]);
    assert!(h.session.is_disabled());
    for button in [ButtonEvent::Up, ButtonEvent::Select, ButtonEvent::Down] {
        h.click(button);
        h.button(button, Gesture::Hold);
        h.wait_timeout();
    }
    assert_eq!(h.session.state(), InputState::Idle);
    assert!(h.session.text().is_empty());
    assert!(!h.session.timer().is_pending());
}

#[test]
fn type_a_word_then_close() {
    let mut delivered = None;
    let mut on_close = |text: &str| delivered = Some(text.to_string());
    {
        let session = Session::new(
            [&LETTERS, &DIGITS, &SYMBOLS],
            DeadlineTimer::new(),
            SessionConfig::default(),
        )
        .with_close_handler(&mut on_close);
        let mut h = Harness::with_session(session);

        // "hi": both letters sit on the top-right key 'ghi'.
        for _ in 0..3 {
            h.click(ButtonEvent::Up);
        }
        h.wait_timeout();
        h.click(ButtonEvent::Select);
        for _ in 0..3 {
            h.click(ButtonEvent::Up);
        }
        h.wait_timeout();
        h.click(ButtonEvent::Down);
        assert_eq!(h.session.text(), "hi");

        h.button(ButtonEvent::Back, Gesture::DoubleClick);
        assert_eq!(h.session.text(), "h");

        let response = h.session.process_event(InputEvent::BackPress);
        assert!(response.closed);
        assert!(h.session.is_closed());
    }
    assert_eq!(delivered.as_deref(), Some("h"));
}

#[test]
fn initial_text_is_truncated() {
    let session: Session<'_> = Session::new(
        [&LETTERS, &[], &[]],
        DeadlineTimer::new(),
        SessionConfig::default()
            .with_max_length(4)
            .with_initial_text("truncate me"),
    );
    assert_eq!(session.text(), "trun");
    assert_eq!(session.buffer().max_len(), 4);
}

#[test]
fn oversized_max_length_is_refused() {
    let text = "x".repeat(80);
    let config = SessionConfig::default()
        .with_max_length(100)
        .with_initial_text(&text);
    let result: Result<Session<'_>, _> =
        Session::try_new([&LETTERS, &DIGITS, &SYMBOLS], DeadlineTimer::new(), config);
    assert_eq!(result.err(), Some(Error::MaxLength(100)));
}

#[test]
fn decoded_layout_drives_a_session() {
    let mut encoded = String::from("x\0\0\0yz\0\0");
    encoded.push_str(&"\0".repeat(28));
    let layouts = [encoded.parse::<Layout>().expect("valid layout")];

    let mut h = Harness::new([&layouts, &[], &[]]);
    h.click(ButtonEvent::Up);
    h.wait_timeout();
    assert_eq!(h.session.text(), "x");

    // Select has no keyboard set: the press is ignored.
    h.click(ButtonEvent::Select);
    assert_eq!(h.session.state(), InputState::Idle);

    // Empty key: timeout commits nothing.
    for _ in 0..3 {
        h.click(ButtonEvent::Up);
    }
    assert_eq!(h.session.cursor(), (1, 3));
    h.wait_timeout();
    assert_eq!(h.session.text(), "x");
    assert_eq!(h.session.state(), InputState::Idle);
}
