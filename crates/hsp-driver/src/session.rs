use std::collections::BTreeMap;

use hsp_types::{KeyCode, Point, ScreenSize, SignalKind, SignalRecord};

use crate::error::DriverError;
use crate::handler::{dispatch, SignalHandler};
use crate::shortcut::{Mode, Shortcut, ShortcutOutcome};
use crate::trace::CursorTrace;

/// State an overlay keeps while consuming the hook's records.
///
/// Feed every decoded record through [`observe`](Self::observe). The
/// session keeps the screen size, the cursor and its trace, click and
/// per-kind counts, the last foreground window title, and the overlay
/// mode driven by the shortcut keys.
///
/// ```text
/// HookInstalled       → screen
/// MouseMoved          → cursor, trace
/// MouseClicked        → clicks, last_click
/// KeyPressed          → shortcut → mode / quit_requested
/// WindowTitleChanged  → title
/// WindowCreation*     → window_created
/// ```
#[derive(Clone, Debug, Default)]
pub struct Session {
    window_created: Option<bool>,
    screen: Option<ScreenSize>,
    cursor: Option<Point>,
    trace: CursorTrace,
    clicks: u64,
    last_click: Option<Point>,
    title: Option<String>,
    mode: Mode,
    last_shortcut: Option<(Shortcut, ShortcutOutcome)>,
    quit_requested: bool,
    counts: BTreeMap<SignalKind, u64>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Returns [`DriverError::ZeroTraceCapacity`] if `capacity` is 0.
    pub fn with_trace_capacity(capacity: usize) -> Result<Self, DriverError> {
        Ok(Self {
            trace: CursorTrace::with_capacity(capacity)?,
            ..Self::default()
        })
    }

    /// Count `record` and apply it to the session state.
    pub fn observe(&mut self, record: &SignalRecord) {
        *self.counts.entry(record.kind()).or_default() += 1;
        dispatch(self, record);
    }

    /// `Some(true)` once the hook reported its window, `Some(false)` if
    /// creation failed, `None` before either.
    pub fn window_created(&self) -> Option<bool> {
        self.window_created
    }

    pub fn screen(&self) -> Option<ScreenSize> {
        self.screen
    }

    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    pub fn trace(&self) -> &CursorTrace {
        &self.trace
    }

    pub fn clicks(&self) -> u64 {
        self.clicks
    }

    pub fn last_click(&self) -> Option<Point> {
        self.last_click
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn last_shortcut(&self) -> Option<(Shortcut, ShortcutOutcome)> {
        self.last_shortcut
    }

    /// Set once F1 has been pressed.
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn count(&self, kind: SignalKind) -> u64 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Per-kind counts for every kind seen at least once, in tag order.
    pub fn counts(&self) -> impl Iterator<Item = (SignalKind, u64)> + '_ {
        self.counts.iter().map(|(kind, n)| (*kind, *n))
    }

    pub fn total_records(&self) -> u64 {
        self.counts.values().sum()
    }
}

impl SignalHandler for Session {
    fn on_window_created(&mut self, succeeded: bool) {
        self.window_created = Some(succeeded);
    }

    fn on_hook_installed(&mut self, screen: ScreenSize) {
        self.screen = Some(screen);
    }

    fn on_mouse_moved(&mut self, point: Point) {
        self.cursor = Some(point);
        self.trace.record(point);
    }

    fn on_mouse_clicked(&mut self, point: Point) {
        self.clicks += 1;
        self.last_click = Some(point);
    }

    fn on_key_pressed(&mut self, key: KeyCode) {
        let Some(shortcut) = Shortcut::from_key(key) else {
            return;
        };
        let outcome = shortcut.apply(&mut self.mode);
        if shortcut == Shortcut::Quit {
            self.quit_requested = true;
        }
        self.last_shortcut = Some((shortcut, outcome));
    }

    fn on_window_title(&mut self, title: &str) {
        self.title = Some(title.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hsp_decoder::decode_all;
    use hsp_encoder::SignalEncoder;

    fn run(stream: &[u8]) -> Session {
        let mut session = Session::new();
        for record in decode_all(stream).unwrap() {
            session.observe(&record);
        }
        session
    }

    #[test]
    fn startup_sequence() {
        let stream = SignalEncoder::new()
            .window_creation_succeeded()
            .hook_installed(1920, 1080)
            .encode()
            .unwrap();
        let session = run(&stream);

        assert_eq!(session.window_created(), Some(true));
        assert_eq!(session.screen(), Some(ScreenSize::new(1920, 1080)));
        assert_eq!(session.mode(), Mode::Typing);
        assert_eq!(session.total_records(), 2);
    }

    #[test]
    fn cursor_trace_and_clicks() {
        let stream = SignalEncoder::new()
            .mouse_moved(1, 1)
            .mouse_moved(2, 2)
            .mouse_clicked(2, 2)
            .window_title("No foreground window.")
            .encode()
            .unwrap();
        let session = run(&stream);

        assert_eq!(session.cursor(), Some(Point::new(2, 2)));
        assert_eq!(session.trace().len(), 2);
        assert_eq!(session.clicks(), 1);
        assert_eq!(session.last_click(), Some(Point::new(2, 2)));
        assert_eq!(session.title(), Some("No foreground window."));
        assert_eq!(session.count(SignalKind::MouseMoved), 2);
        assert_eq!(session.count(SignalKind::KeyPressed), 0);
    }

    #[test]
    fn shortcuts_drive_mode() {
        let stream = SignalEncoder::new()
            .key_pressed(KeyCode::F4)
            .key_pressed(KeyCode::F5)
            .key_pressed(KeyCode::Escape)
            .encode()
            .unwrap();
        let session = run(&stream);

        assert_eq!(session.mode(), Mode::Webcam);
        assert_eq!(
            session.last_shortcut(),
            Some((Shortcut::EraseBlackboard, ShortcutOutcome::Rejected))
        );
        assert!(!session.quit_requested());
    }

    #[test]
    fn f1_requests_quit() {
        let mut session = Session::new();
        session.observe(&SignalRecord::KeyPressed(KeyCode::F1));
        assert!(session.quit_requested());
    }

    #[test]
    fn unbound_key_counted_but_ignored() {
        let mut session = Session::new();
        session.observe(&SignalRecord::KeyPressed(KeyCode::Other(0x41)));
        assert_eq!(session.count(SignalKind::KeyPressed), 1);
        assert_eq!(session.last_shortcut(), None);
    }

    #[test]
    fn trace_capacity_is_configurable() {
        let mut session = Session::with_trace_capacity(2).unwrap();
        for i in 0..4 {
            session.observe(&SignalRecord::MouseMoved(Point::new(i, i)));
        }
        assert_eq!(session.trace().len(), 2);
        assert_eq!(session.trace().capacity(), 2);
    }
}
