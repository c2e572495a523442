/// A cursor position in screen pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
  pub x: u32,
  pub y: u32,
}

/// Primary screen dimensions reported when the hook is installed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ScreenSize {
  pub width: u32,
  pub height: u32,
}

impl Point {
  pub fn new(x: u32, y: u32) -> Self {
    Self { x, y }
  }

  /// Build a point from raw hook coordinates, clamping underflow.
  ///
  /// With the cursor pinned to the top or left edge the hook sometimes
  /// reports a coordinate just below zero, which arrives as a value
  /// near `u32::MAX`. Any coordinate with its top bit set is taken to
  /// be that artifact and becomes 0. Everything below 2^31 passes
  /// through untouched; this is not a general bounds clamp.
  pub fn from_hook(raw_x: u32, raw_y: u32) -> Self {
    Self {
      x: clamp_underflow(raw_x),
      y: clamp_underflow(raw_y),
    }
  }
}

impl ScreenSize {
  pub fn new(width: u32, height: u32) -> Self {
    Self { width, height }
  }

  /// Whether `point` lies on this screen.
  pub fn contains(self, point: Point) -> bool {
    point.x < self.width && point.y < self.height
  }
}

/// Zero a coordinate whose binary form has no leading zero bit.
fn clamp_underflow(raw: u32) -> u32 {
  if raw.leading_zeros() == 0 { 0 } else { raw }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn clamp_all_ones() {
    assert_eq!(Point::from_hook(u32::MAX, 10), Point::new(0, 10));
  }

  #[test]
  fn clamp_threshold() {
    assert_eq!(Point::from_hook(1 << 31, 0).x, 0);
    assert_eq!(Point::from_hook(0x7FFF_FFFF, 0).x, 2_147_483_647);
  }

  #[test]
  fn clamp_each_axis_independently() {
    assert_eq!(Point::from_hook(640, u32::MAX - 3), Point::new(640, 0));
  }

  #[test]
  fn ordinary_values_untouched() {
    assert_eq!(Point::from_hook(0, 1079), Point::new(0, 1079));
  }

  #[test]
  fn screen_contains() {
    let screen = ScreenSize::new(1920, 1080);
    assert!(screen.contains(Point::new(0, 0)));
    assert!(screen.contains(Point::new(1919, 1079)));
    assert!(!screen.contains(Point::new(1920, 5)));
  }
}
