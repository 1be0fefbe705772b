//! Grid snapping and bounds clamping.
//!
//! Pure functions shared by the scene model (placement on drop) and the
//! interaction layer (drag / resize).

use kurbo::{Rect, Size};

/// Smallest width or height a component may be resized to, in pixels.
pub const MIN_COMPONENT_SIZE: f64 = 20.0;

/// Grid configuration in effect for placement and gestures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSettings {
    /// Grid pitch in pixels. Values ≤ 0 disable snapping.
    pub size: f64,
    /// Whether coordinates are rounded to the grid.
    pub enabled: bool,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            size: 10.0,
            enabled: true,
        }
    }
}

impl GridSettings {
    /// Snap `value` if snapping is on, otherwise return it unchanged.
    pub fn apply(&self, value: f64) -> f64 {
        if self.enabled {
            snap(value, self.size)
        } else {
            value
        }
    }

    /// Snap `value` and keep it inside `[0, max]`, stepping back to the
    /// largest grid multiple that still fits when rounding overshoots.
    pub fn apply_within(&self, value: f64, max: f64) -> f64 {
        let max = max.max(0.0);
        let clamped = value.clamp(0.0, max);
        if !self.enabled || self.size <= 0.0 {
            return clamped;
        }
        let snapped = snap(clamped, self.size);
        if snapped > max {
            (max / self.size).floor() * self.size
        } else {
            snapped.max(0.0)
        }
    }
}

/// Round `value` to the nearest multiple of `pitch`.
///
/// `snap(v, g) == g * round(v / g)`; idempotent. A non-positive pitch
/// returns `value` unchanged.
pub fn snap(value: f64, pitch: f64) -> f64 {
    if pitch <= 0.0 || !pitch.is_finite() {
        return value;
    }
    pitch * (value / pitch).round()
}

/// Clamp a top-left position so a box of `size` stays inside `container`.
/// When the box is larger than the container it is pinned to the origin.
pub fn clamp_position(x: f64, y: f64, size: Size, container: Size) -> (f64, f64) {
    let max_x = (container.width - size.width).max(0.0);
    let max_y = (container.height - size.height).max(0.0);
    (x.clamp(0.0, max_x), y.clamp(0.0, max_y))
}

/// Clamp a rectangle within a container, preserving its size where possible.
pub fn clamp_rect(rect: Rect, container: Size) -> Rect {
    let size = rect.size();
    let (x, y) = clamp_position(rect.x0, rect.y0, size, container);
    Rect::from_origin_size((x, y), size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snap_rounds_to_nearest_multiple() {
        assert_eq!(snap(14.0, 10.0), 10.0);
        assert_eq!(snap(15.0, 10.0), 20.0);
        assert_eq!(snap(-14.0, 10.0), -10.0);
        assert_eq!(snap(7.4, 2.5), 7.5);
    }

    #[test]
    fn snap_matches_formula_and_is_idempotent() {
        for pitch in [1.0, 5.0, 8.0, 10.0, 12.5, 25.0] {
            let mut v = -113.0;
            while v < 517.0 {
                let s = snap(v, pitch);
                assert_eq!(s, pitch * (v / pitch).round());
                assert_eq!(snap(s, pitch), s, "not idempotent for v={v} g={pitch}");
                v += 3.7;
            }
        }
    }

    #[test]
    fn snap_with_zero_pitch_is_identity() {
        assert_eq!(snap(13.3, 0.0), 13.3);
        assert_eq!(snap(13.3, -4.0), 13.3);
    }

    #[test]
    fn clamp_position_keeps_box_inside() {
        let container = Size::new(794.0, 1123.0);
        let size = Size::new(200.0, 50.0);
        assert_eq!(clamp_position(-40.0, 2000.0, size, container), (0.0, 1073.0));
        assert_eq!(clamp_position(700.0, 10.0, size, container), (594.0, 10.0));
    }

    #[test]
    fn oversized_box_pins_to_origin() {
        let container = Size::new(100.0, 100.0);
        let size = Size::new(300.0, 50.0);
        assert_eq!(clamp_position(30.0, 30.0, size, container), (0.0, 30.0));
    }

    #[test]
    fn apply_within_never_overshoots() {
        let grid = GridSettings::default();
        // 596 rounds to 600, which is past the limit.
        assert_eq!(grid.apply_within(598.0, 596.0), 590.0);
        assert_eq!(grid.apply_within(598.0, 594.0), 590.0);
        assert_eq!(grid.apply_within(-30.0, 594.0), 0.0);
        assert_eq!(grid.apply_within(333.0, 594.0), 330.0);
    }

    #[test]
    fn apply_within_without_snapping_only_clamps() {
        let grid = GridSettings {
            size: 10.0,
            enabled: false,
        };
        assert_eq!(grid.apply_within(598.0, 594.0), 594.0);
        assert_eq!(grid.apply_within(123.4, 594.0), 123.4);
    }

    #[test]
    fn clamp_rect_preserves_size() {
        let r = clamp_rect(Rect::new(-10.0, -10.0, 90.0, 40.0), Size::new(200.0, 200.0));
        assert_eq!(r, Rect::new(0.0, 0.0, 100.0, 50.0));
    }
}
