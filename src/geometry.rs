// Canvas geometry: points, sizes, rectangles and equal-slice partitioning.

/// A location in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Width and height of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Direction along which a stack arranges its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    /// Children side by side, left to right (the split varies x).
    #[default]
    Horizontal,
    /// Children stacked top to bottom (the split varies y).
    Vertical,
}

/// An axis-aligned rectangle in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The zero rectangle at the origin.
    pub const ZERO: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Rectangle anchored at the origin with the given size.
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Half-open containment: the near edges are inside, the far edges are not.
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.max_x() && point.y >= self.y && point.y < self.max_y()
    }

    /// Split this rectangle into `count` equal slices along `axis`.
    pub fn split(&self, count: usize, axis: Axis) -> Vec<Rect> {
        split(*self, count, axis)
    }
}

/// Partition `rect` into `count` equal slices along `axis`, ordered from the
/// origin outwards. Returns an empty vec for `count == 0`.
///
/// Each slice offset is `index * unit` from the origin rather than a running
/// sum, so rounding error does not accumulate across slices.
pub fn split(rect: Rect, count: usize, axis: Axis) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    match axis {
        Axis::Horizontal => {
            let unit = rect.width / count as f32;
            (0..count)
                .map(|i| Rect::new(rect.x + unit * i as f32, rect.y, unit, rect.height))
                .collect()
        }
        Axis::Vertical => {
            let unit = rect.height / count as f32;
            (0..count)
                .map(|i| Rect::new(rect.x, rect.y + unit * i as f32, rect.width, unit))
                .collect()
        }
    }
}
