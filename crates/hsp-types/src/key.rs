/// Windows virtual key codes carried by key-press records.
///
/// The hook only forwards key-down events for Escape and F1 through F6,
/// so those get names. Anything else a different build of the hook
/// might send is kept as `Other(u8)`.
///
/// ```text
/// ┌──────┬────────┐
/// │ Wire │ Key    │
/// ├──────┼────────┤
/// │ 0x1B │ Escape │
/// │ 0x70 │ F1     │
/// │ 0x71 │ F2     │
/// │ 0x72 │ F3     │
/// │ 0x73 │ F4     │
/// │ 0x74 │ F5     │
/// │ 0x75 │ F6     │
/// └──────┴────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
  Escape,
  F1,
  F2,
  F3,
  F4,
  F5,
  F6,
  /// Any other virtual key code, preserved as sent.
  Other(u8),
}

impl KeyCode {
  pub fn to_wire_byte(self) -> u8 {
    match self {
      Self::Escape => 0x1B,
      Self::F1 => 0x70,
      Self::F2 => 0x71,
      Self::F3 => 0x72,
      Self::F4 => 0x73,
      Self::F5 => 0x74,
      Self::F6 => 0x75,
      Self::Other(code) => code,
    }
  }

  /// Known codes map to named variants; every other byte becomes
  /// `Other`.
  pub fn from_wire_byte(value: u8) -> Self {
    match value {
      0x1B => Self::Escape,
      0x70 => Self::F1,
      0x71 => Self::F2,
      0x72 => Self::F3,
      0x73 => Self::F4,
      0x74 => Self::F5,
      0x75 => Self::F6,
      other => Self::Other(other),
    }
  }

  /// Parse a key name (`esc`, `escape`, `f1`..`f6`) or a numeric code
  /// (`27`, `0x1b`).
  pub fn parse(text: &str) -> Option<Self> {
    let lower = text.trim().to_ascii_lowercase();
    let named = match lower.as_str() {
      "esc" | "escape" => Some(Self::Escape),
      "f1" => Some(Self::F1),
      "f2" => Some(Self::F2),
      "f3" => Some(Self::F3),
      "f4" => Some(Self::F4),
      "f5" => Some(Self::F5),
      "f6" => Some(Self::F6),
      _ => None,
    };
    if named.is_some() {
      return named;
    }

    let code = match lower.strip_prefix("0x") {
      Some(hex) => u8::from_str_radix(hex, 16).ok()?,
      None => lower.parse::<u8>().ok()?,
    };
    Some(Self::from_wire_byte(code))
  }
}

impl std::fmt::Display for KeyCode {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Escape => f.write_str("Esc"),
      Self::F1 => f.write_str("F1"),
      Self::F2 => f.write_str("F2"),
      Self::F3 => f.write_str("F3"),
      Self::F4 => f.write_str("F4"),
      Self::F5 => f.write_str("F5"),
      Self::F6 => f.write_str("F6"),
      Self::Other(code) => write!(f, "{code:#04X}"),
    }
  }
}
