use hsp_types::KeyCode;

/// Overlay mode. Each mode owns the mouse differently: typing passes
/// input through, blackboard draws, webcam moves the camera window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    Typing,
    Blackboard,
    Webcam,
}

impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Self::Typing => "typing",
            Self::Blackboard => "blackboard",
            Self::Webcam => "webcam",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Action bound to one of the forwarded keys.
///
/// ```text
/// ┌─────┬─────────────────┬──────────────────────────────┐
/// │ Key │ Shortcut        │ Takes effect in              │
/// ├─────┼─────────────────┼──────────────────────────────┤
/// │ Esc │ EraseBlackboard │ blackboard mode              │
/// │ F1  │ Quit            │ any mode                     │
/// │ F2  │ TypingMode      │ any mode but typing          │
/// │ F3  │ BlackboardMode  │ any mode but blackboard      │
/// │ F4  │ WebcamMode      │ any mode but webcam          │
/// │ F5  │ ToggleWebcam    │ webcam mode                  │
/// │ F6  │ ResetWebcam     │ webcam mode                  │
/// └─────┴─────────────────┴──────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shortcut {
    EraseBlackboard,
    Quit,
    TypingMode,
    BlackboardMode,
    WebcamMode,
    ToggleWebcam,
    ResetWebcam,
}

/// Whether a shortcut did anything in the mode it was pressed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShortcutOutcome {
    Applied,
    /// Wrong mode for this shortcut, or already in the target mode.
    Rejected,
}

impl Shortcut {
    /// The shortcut bound to `key`, if any.
    pub fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::Escape => Some(Self::EraseBlackboard),
            KeyCode::F1 => Some(Self::Quit),
            KeyCode::F2 => Some(Self::TypingMode),
            KeyCode::F3 => Some(Self::BlackboardMode),
            KeyCode::F4 => Some(Self::WebcamMode),
            KeyCode::F5 => Some(Self::ToggleWebcam),
            KeyCode::F6 => Some(Self::ResetWebcam),
            KeyCode::Other(_) => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::EraseBlackboard => "erase-blackboard",
            Self::Quit => "quit",
            Self::TypingMode => "typing-mode",
            Self::BlackboardMode => "blackboard-mode",
            Self::WebcamMode => "webcam-mode",
            Self::ToggleWebcam => "toggle-webcam",
            Self::ResetWebcam => "reset-webcam",
        }
    }

    /// Apply the shortcut in `mode`, switching it if this is a mode
    /// shortcut.
    pub fn apply(self, mode: &mut Mode) -> ShortcutOutcome {
        let applied = match self {
            Self::Quit => true,
            Self::EraseBlackboard => *mode == Mode::Blackboard,
            Self::ToggleWebcam | Self::ResetWebcam => *mode == Mode::Webcam,
            Self::TypingMode => switch(mode, Mode::Typing),
            Self::BlackboardMode => switch(mode, Mode::Blackboard),
            Self::WebcamMode => switch(mode, Mode::Webcam),
        };

        if applied {
            ShortcutOutcome::Applied
        } else {
            ShortcutOutcome::Rejected
        }
    }
}

impl std::fmt::Display for Shortcut {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn switch(mode: &mut Mode, target: Mode) -> bool {
    if *mode == target {
        return false;
    }
    *mode = target;
    true
}
