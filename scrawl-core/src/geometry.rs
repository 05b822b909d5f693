//! # Geometry
//!
//! Plain 2D value types shared by tools, culling and the draw list.
//! Units are logical pixels of whatever surface the caller names, +X right, +Y down.

/// A 2D position.
#[derive(Copy, Clone, PartialEq, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}
impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }
    /// Scale a normalized (0..1) point onto a surface.
    #[must_use]
    pub fn scaled(self, size: Size) -> Self {
        Self {
            x: self.x * size.width,
            y: self.y * size.height,
        }
    }
}

/// Extent of a surface or rectangle.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}
impl Size {
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle, origin at the top-left.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}
impl Rect {
    pub const ZERO: Self = Self {
        origin: Point::ZERO,
        size: Size::new(0.0, 0.0),
    };
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }
    /// The rect covering a whole surface of the given size.
    #[must_use]
    pub const fn from_size(size: Size) -> Self {
        Self {
            origin: Point::ZERO,
            size,
        }
    }
    #[must_use]
    pub fn min_x(&self) -> f32 {
        self.origin.x.min(self.origin.x + self.size.width)
    }
    #[must_use]
    pub fn max_x(&self) -> f32 {
        self.origin.x.max(self.origin.x + self.size.width)
    }
    #[must_use]
    pub fn min_y(&self) -> f32 {
        self.origin.y.min(self.origin.y + self.size.height)
    }
    #[must_use]
    pub fn max_y(&self) -> f32 {
        self.origin.y.max(self.origin.y + self.size.height)
    }
    /// A rect with no area. Zero-width lines and single points are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.size.width > 0.0 && self.size.height > 0.0)
    }
    /// Grow by `amount` on every side. Negative amounts shrink.
    #[must_use = "returns a new rect without modifying `self`"]
    pub fn padded(self, amount: f32) -> Self {
        Self {
            origin: Point::new(self.origin.x - amount, self.origin.y - amount),
            size: Size::new(
                self.size.width + amount + amount,
                self.size.height + amount + amount,
            ),
        }
    }
    /// Whether `other` lies entirely within `self`, edges inclusive.
    /// Overlap alone is not containment.
    #[must_use]
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.min_x() <= other.min_x()
            && self.min_y() <= other.min_y()
            && self.max_x() >= other.max_x()
            && self.max_y() >= other.max_y()
    }
    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.min_x()
            && point.x <= self.max_x()
            && point.y >= self.min_y()
            && point.y <= self.max_y()
    }
}

/// The axis-aligned rect spanning `points`, grown by `padding` on every side.
///
/// An empty slice spans zero at the origin before padding.
#[must_use]
pub fn min_bounding_rect(points: &[Point], padding: f32) -> Rect {
    let fold = |init: Option<(f32, f32)>, value: f32| match init {
        None => Some((value, value)),
        Some((min, max)) => Some((min.min(value), max.max(value))),
    };
    let (min_x, max_x) = points
        .iter()
        .map(|p| p.x)
        .fold(None, fold)
        .unwrap_or((0.0, 0.0));
    let (min_y, max_y) = points
        .iter()
        .map(|p| p.y)
        .fold(None, fold)
        .unwrap_or((0.0, 0.0));

    Rect::new(min_x, min_y, max_x - min_x, max_y - min_y).padded(padding)
}

/// A renderable outline, already scaled onto a surface.
///
/// Open paths are polylines, closed paths join the last vertex back to the first.
#[derive(Clone, PartialEq, Debug)]
pub struct Path {
    pub vertices: Vec<Point>,
    pub closed: bool,
}
impl Path {
    #[must_use]
    pub fn polyline(vertices: Vec<Point>) -> Self {
        Self {
            vertices,
            closed: false,
        }
    }
    #[must_use]
    pub fn polygon(vertices: Vec<Point>) -> Self {
        Self {
            vertices,
            closed: true,
        }
    }
    #[must_use]
    pub fn bounding_rect(&self) -> Rect {
        min_bounding_rect(&self.vertices, 0.0)
    }
    /// Bounds used to decide occlusion, including the stroke's line width.
    #[must_use]
    pub fn bounding_rect_for_culling(&self, line_width: f32) -> Rect {
        min_bounding_rect(&self.vertices, line_width)
    }
}
