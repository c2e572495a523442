use hsp_wire::layout::{TAG_WIDTH, TITLE_LENGTH_WIDTH};

use crate::key::KeyCode;
use crate::kind::SignalKind;
use crate::point::{Point, ScreenSize};

/// One fully decoded signal from the hook process.
///
/// Each variant carries only the fields its tag defines. Coordinates in
/// `MouseMoved` and `MouseClicked` have already been through
/// [`Point::from_hook`]; screen dimensions are taken as sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignalRecord {
  /// The hook process could not create its message window and exited.
  WindowCreationFailed,

  /// The hook process created its message window.
  WindowCreationSucceeded,

  /// Global hooks are in place. Carries the primary screen size.
  HookInstalled(ScreenSize),

  MouseMoved(Point),

  /// Left button pressed at this position.
  MouseClicked(Point),

  KeyPressed(KeyCode),

  /// Title of the foreground window, sent after each click.
  WindowTitleChanged(String),
}

impl SignalRecord {
  pub fn kind(&self) -> SignalKind {
    match self {
      Self::WindowCreationFailed => SignalKind::WindowCreationFailed,
      Self::WindowCreationSucceeded => SignalKind::WindowCreationSucceeded,
      Self::HookInstalled(_) => SignalKind::HookInstalled,
      Self::MouseMoved(_) => SignalKind::MouseMoved,
      Self::MouseClicked(_) => SignalKind::MouseClicked,
      Self::KeyPressed(_) => SignalKind::KeyPressed,
      Self::WindowTitleChanged(_) => SignalKind::WindowTitleChanged,
    }
  }

  /// Number of bytes this record occupies on the wire.
  ///
  /// For titles this counts UTF-8 bytes of the text, which equals the
  /// declared UTF-16 unit count only for ASCII titles.
  pub fn wire_len(&self) -> usize {
    match self {
      Self::WindowTitleChanged(title) => TAG_WIDTH + TITLE_LENGTH_WIDTH + title.len(),
      other => other
        .kind()
        .fixed_width()
        .unwrap_or(TAG_WIDTH + TITLE_LENGTH_WIDTH),
    }
  }

  /// The cursor position for mouse records.
  pub fn point(&self) -> Option<Point> {
    match self {
      Self::MouseMoved(p) | Self::MouseClicked(p) => Some(*p),
      _ => None,
    }
  }
}
