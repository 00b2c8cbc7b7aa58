// Directional hit test: which edge of a rect is the pointer approaching.

use crate::geometry::{Axis, Point, Rect};

/// The edge region of a rect that a point falls in, split by its diagonals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Top,
    Bottom,
    Left,
    Right,
    /// The point was outside the rect.
    None,
}

impl Zone {
    /// Axis a drop in this zone splits along: top/bottom stack vertically,
    /// left/right sit side by side. `None` has no axis.
    pub fn axis(self) -> Option<Axis> {
        match self {
            Zone::Top | Zone::Bottom => Some(Axis::Vertical),
            Zone::Left | Zone::Right => Some(Axis::Horizontal),
            Zone::None => None,
        }
    }
}

/// Classify `location` against the two diagonals of `rect`.
///
/// The falling diagonal runs from the top-left to the bottom-right corner,
/// the rising one mirrors it, and the four triangles they cut out map to
/// the four edges. Points outside the rect resolve to [`Zone::None`].
pub fn resolve_zone(rect: Rect, location: Point) -> Zone {
    if !rect.contains_point(location) {
        return Zone::None;
    }
    let slope = rect.height / rect.width;
    let falling = location.x * slope + (rect.y - slope * rect.x);
    let rising = rect.max_y() - falling + rect.y;
    if location.y < falling {
        if location.y < rising {
            Zone::Top
        } else {
            Zone::Right
        }
    } else if location.y < rising {
        Zone::Left
    } else {
        Zone::Bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::top(400.0, 50.0, Zone::Top)]
    #[case::bottom(400.0, 750.0, Zone::Bottom)]
    #[case::left(50.0, 400.0, Zone::Left)]
    #[case::right(750.0, 400.0, Zone::Right)]
    #[case::upper_right_quadrant_near_top(500.0, 100.0, Zone::Top)]
    #[case::upper_right_quadrant_near_right(700.0, 300.0, Zone::Right)]
    fn square_canvas_zones(#[case] x: f32, #[case] y: f32, #[case] expected: Zone) {
        let rect = Rect::new(0.0, 0.0, 800.0, 800.0);
        assert_eq!(resolve_zone(rect, Point::new(x, y)), expected);
    }

    #[rstest]
    #[case::top(300.0, 10.0, Zone::Top)]
    #[case::left(20.0, 50.0, Zone::Left)]
    #[case::right(580.0, 50.0, Zone::Right)]
    #[case::bottom(300.0, 90.0, Zone::Bottom)]
    fn wide_rect_uses_aspect_ratio_for_diagonals(
        #[case] x: f32,
        #[case] y: f32,
        #[case] expected: Zone,
    ) {
        let rect = Rect::new(0.0, 0.0, 600.0, 100.0);
        assert_eq!(resolve_zone(rect, Point::new(x, y)), expected);
    }

    #[test]
    fn offset_rect_is_classified_in_its_own_frame() {
        let rect = Rect::new(400.0, 0.0, 400.0, 800.0);
        assert_eq!(resolve_zone(rect, Point::new(420.0, 400.0)), Zone::Left);
        assert_eq!(resolve_zone(rect, Point::new(780.0, 400.0)), Zone::Right);
        assert_eq!(resolve_zone(rect, Point::new(600.0, 20.0)), Zone::Top);
    }

    #[test]
    fn point_outside_resolves_to_none() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(resolve_zone(rect, Point::new(150.0, 50.0)), Zone::None);
        assert_eq!(Zone::None.axis(), None);
    }

    #[test]
    fn zone_axes() {
        assert_eq!(Zone::Top.axis(), Some(Axis::Vertical));
        assert_eq!(Zone::Bottom.axis(), Some(Axis::Vertical));
        assert_eq!(Zone::Left.axis(), Some(Axis::Horizontal));
        assert_eq!(Zone::Right.axis(), Some(Axis::Horizontal));
    }
}
