use hsp_wire::layout::{tag, KEY_CODE_WIDTH, POINT_PAYLOAD_WIDTH, TAG_WIDTH};

use crate::error::TypeError;

/// Record kinds, one per tag value.
///
/// Unlike a forward-compatible catch-all, an unrecognized tag is an
/// error here: every kind determines its own payload width, so a record
/// of unknown kind cannot be stepped over.
///
/// ```text
/// ┌──────┬─────────────────────────┬─────────────────────┐
/// │ Wire │ Variant                 │ Payload             │
/// ├──────┼─────────────────────────┼─────────────────────┤
/// │ 0    │ WindowCreationFailed    │ none                │
/// │ 1    │ WindowCreationSucceeded │ none                │
/// │ 2    │ HookInstalled           │ width, height       │
/// │ 3    │ MouseMoved              │ x, y                │
/// │ 4    │ MouseClicked            │ x, y                │
/// │ 5    │ KeyPressed              │ virtual key code    │
/// │ 6    │ WindowTitleChanged      │ length + 1, text    │
/// └──────┴─────────────────────────┴─────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SignalKind {
  WindowCreationFailed,
  WindowCreationSucceeded,
  HookInstalled,
  MouseMoved,
  MouseClicked,
  KeyPressed,
  WindowTitleChanged,
}

/// How the payload after the tag is sized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PayloadShape {
  /// Tag only.
  Empty,
  /// A fixed number of symbols follows the tag.
  Fixed(usize),
  /// A 32-symbol declared length followed by that many UTF-16 units
  /// minus one, as UTF-8 text.
  LengthPrefixed,
}

impl SignalKind {
  /// Every kind, in tag order.
  pub const ALL: [SignalKind; 7] = [
    Self::WindowCreationFailed,
    Self::WindowCreationSucceeded,
    Self::HookInstalled,
    Self::MouseMoved,
    Self::MouseClicked,
    Self::KeyPressed,
    Self::WindowTitleChanged,
  ];

  /// The tag value written on the wire.
  pub fn wire_id(self) -> u8 {
    match self {
      Self::WindowCreationFailed => tag::WINDOW_CREATION_FAILED,
      Self::WindowCreationSucceeded => tag::WINDOW_CREATION_SUCCESS,
      Self::HookInstalled => tag::HOOK_INSTALLED,
      Self::MouseMoved => tag::MOUSE_MOVE,
      Self::MouseClicked => tag::MOUSE_CLICK,
      Self::KeyPressed => tag::KEY_DOWN,
      Self::WindowTitleChanged => tag::WINDOW_TITLE,
    }
  }

  /// Map a tag value to its kind.
  ///
  /// # Errors
  ///
  /// Returns [`TypeError::UnknownKind`] for any value above 6.
  pub fn from_wire_id(id: u8) -> Result<Self, TypeError> {
    match id {
      tag::WINDOW_CREATION_FAILED => Ok(Self::WindowCreationFailed),
      tag::WINDOW_CREATION_SUCCESS => Ok(Self::WindowCreationSucceeded),
      tag::HOOK_INSTALLED => Ok(Self::HookInstalled),
      tag::MOUSE_MOVE => Ok(Self::MouseMoved),
      tag::MOUSE_CLICK => Ok(Self::MouseClicked),
      tag::KEY_DOWN => Ok(Self::KeyPressed),
      tag::WINDOW_TITLE => Ok(Self::WindowTitleChanged),
      other => Err(TypeError::UnknownKind { value: other }),
    }
  }

  pub fn payload_shape(self) -> PayloadShape {
    match self {
      Self::WindowCreationFailed | Self::WindowCreationSucceeded => PayloadShape::Empty,
      Self::HookInstalled | Self::MouseMoved | Self::MouseClicked => {
        PayloadShape::Fixed(POINT_PAYLOAD_WIDTH)
      }
      Self::KeyPressed => PayloadShape::Fixed(KEY_CODE_WIDTH),
      Self::WindowTitleChanged => PayloadShape::LengthPrefixed,
    }
  }

  /// Total record width in symbols for fixed-shape kinds.
  ///
  /// Returns `None` for [`SignalKind::WindowTitleChanged`], whose width
  /// depends on its declared length.
  pub fn fixed_width(self) -> Option<usize> {
    match self.payload_shape() {
      PayloadShape::Empty => Some(TAG_WIDTH),
      PayloadShape::Fixed(width) => Some(TAG_WIDTH + width),
      PayloadShape::LengthPrefixed => None,
    }
  }

  /// Lowercase, hyphenated name used in rendered output and on the
  /// command line.
  pub fn name(self) -> &'static str {
    match self {
      Self::WindowCreationFailed => "window-creation-failed",
      Self::WindowCreationSucceeded => "window-creation-succeeded",
      Self::HookInstalled => "hook-installed",
      Self::MouseMoved => "mouse-moved",
      Self::MouseClicked => "mouse-clicked",
      Self::KeyPressed => "key-pressed",
      Self::WindowTitleChanged => "window-title-changed",
    }
  }

  /// Inverse of [`name`](Self::name). Underscores are accepted in place
  /// of hyphens.
  pub fn from_name(name: &str) -> Option<Self> {
    let normalized = name.trim().replace('_', "-");
    Self::ALL.into_iter().find(|kind| kind.name() == normalized)
  }
}

impl std::fmt::Display for SignalKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.name())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn all_kinds_roundtrip() {
    for (expected, kind) in SignalKind::ALL.into_iter().enumerate() {
      assert_eq!(usize::from(kind.wire_id()), expected);
      assert_eq!(SignalKind::from_wire_id(kind.wire_id()).unwrap(), kind);
    }
  }

  #[test]
  fn unknown_tag_rejected() {
    assert!(matches!(
      SignalKind::from_wire_id(7),
      Err(TypeError::UnknownKind { value: 7 })
    ));
    assert!(matches!(
      SignalKind::from_wire_id(0xFF),
      Err(TypeError::UnknownKind { value: 0xFF })
    ));
  }

  #[test]
  fn fixed_widths() {
    assert_eq!(SignalKind::WindowCreationFailed.fixed_width(), Some(8));
    assert_eq!(SignalKind::WindowCreationSucceeded.fixed_width(), Some(8));
    assert_eq!(SignalKind::HookInstalled.fixed_width(), Some(72));
    assert_eq!(SignalKind::MouseMoved.fixed_width(), Some(72));
    assert_eq!(SignalKind::MouseClicked.fixed_width(), Some(72));
    assert_eq!(SignalKind::KeyPressed.fixed_width(), Some(16));
    assert_eq!(SignalKind::WindowTitleChanged.fixed_width(), None);
  }

  #[test]
  fn names_parse_back() {
    for kind in SignalKind::ALL {
      assert_eq!(SignalKind::from_name(kind.name()), Some(kind));
    }
    assert_eq!(
      SignalKind::from_name("mouse_moved"),
      Some(SignalKind::MouseMoved)
    );
    assert_eq!(SignalKind::from_name("scroll"), None);
  }
}
