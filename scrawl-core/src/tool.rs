//! # Tools
//!
//! A tool turns the raw points of one stroke into a renderable [`Path`] for any surface size, and
//! knows how wide it draws and what undoing it is called.
//!
//! Points are stored normalized, `0..1` across the surface, so the same stroke can be laid out at
//! any zoom. Line widths are stored relative to a surface [`LINE_WIDTH_REFERENCE`] pixels wide.

use crate::color::Color;
use crate::geometry::{Path, Point, Rect, Size};
use crate::serialize::{self, Record, RecordExt, Serializable};
use crate::util::FiniteF32;

/// Surface width at which a tool's stored line width is drawn unscaled.
pub const LINE_WIDTH_REFERENCE: f32 = 1000.0;
/// Segments used to approximate an oval.
const OVAL_SEGMENTS: usize = 32;
/// Arrow head length, as a fraction of the shaft.
const ARROW_HEAD_FRACTION: f32 = 0.2;
/// Half-angle between the shaft and each barb of an arrow head.
const ARROW_HEAD_ANGLE: f32 = std::f32::consts::FRAC_PI_6;

#[derive(
    strum::AsRefStr,
    strum::EnumString,
    strum::EnumIter,
    PartialEq,
    Eq,
    Copy,
    Clone,
    Hash,
    Debug,
    Default,
)]
#[strum(serialize_all = "snake_case")]
pub enum ToolKind {
    /// Freehand stroke through every point.
    #[default]
    Pen,
    /// Freehand, translucent.
    Highlighter,
    /// Straight segment from the first point to the last.
    Line,
    /// A [`ToolKind::Line`] with a head at the last point.
    Arrow,
    /// Axis-aligned rectangle with the first and last points as opposite corners.
    Rectangle,
    /// Ellipse inscribed in the [`ToolKind::Rectangle`] of the same points.
    Oval,
    /// Freehand stroke which removes earlier content instead of adding to it.
    Eraser,
}
impl ToolKind {
    #[must_use]
    pub fn is_eraser(self) -> bool {
        matches!(self, Self::Eraser)
    }
    /// How many points a path of this kind needs before it can be built.
    #[must_use]
    pub fn min_points(self) -> usize {
        match self {
            Self::Pen | Self::Highlighter | Self::Eraser => 1,
            Self::Line | Self::Arrow | Self::Rectangle | Self::Oval => 2,
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolGeometryError {
    #[error("{kind:?} point {index} is not finite at this surface size")]
    NonFinite { kind: ToolKind, index: usize },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tool {
    kind: ToolKind,
    line_width: FiniteF32,
    color: Color,
    points: Vec<Point>,
}
impl Tool {
    #[must_use]
    pub fn new(kind: ToolKind, line_width: FiniteF32, color: Color) -> Self {
        Self {
            kind,
            line_width,
            color,
            points: Vec::new(),
        }
    }
    #[must_use]
    pub fn with_points(mut self, points: impl IntoIterator<Item = Point>) -> Self {
        self.points.extend(points);
        self
    }
    #[must_use]
    pub fn kind(&self) -> ToolKind {
        self.kind
    }
    #[must_use]
    pub fn is_eraser(&self) -> bool {
        self.kind.is_eraser()
    }
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }
    /// Line width when drawn onto a surface of `size`.
    #[must_use]
    pub fn line_width(&self, size: Size) -> f32 {
        self.line_width.get() * size.width / LINE_WIDTH_REFERENCE
    }
    /// Label for the action which undoes this stroke, in the user's language.
    #[must_use]
    pub fn localized_undo_name(&self) -> String {
        crate::labels::Labels::get().undo_name(self.kind).to_owned()
    }
    /// Lay the stroke out onto a surface of `size`.
    ///
    /// `Ok(None)` if the stroke has too few points to form its shape.
    /// # Errors
    /// If any scaled point is not finite.
    pub fn build_path(&self, size: Size) -> Result<Option<Path>, ToolGeometryError> {
        if self.points.len() < self.kind.min_points() {
            return Ok(None);
        }
        let scaled = self
            .points
            .iter()
            .enumerate()
            .map(|(index, point)| {
                let scaled = point.scaled(size);
                if scaled.is_finite() {
                    Ok(scaled)
                } else {
                    Err(ToolGeometryError::NonFinite {
                        kind: self.kind,
                        index,
                    })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        // Checked by `min_points` above.
        let (Some(&first), Some(&last)) = (scaled.first(), scaled.last()) else {
            return Ok(None);
        };

        let path = match self.kind {
            ToolKind::Pen | ToolKind::Highlighter | ToolKind::Eraser => Path::polyline(scaled),
            ToolKind::Line => Path::polyline(vec![first, last]),
            ToolKind::Arrow => {
                let length = first.distance(last);
                if length <= 0.0 {
                    return Ok(None);
                }
                let head = length * ARROW_HEAD_FRACTION;
                // Angle pointing back along the shaft.
                let back = (first.y - last.y).atan2(first.x - last.x);
                let barb = |angle: f32| {
                    let (sin, cos) = angle.sin_cos();
                    Point::new(last.x + head * cos, last.y + head * sin)
                };
                Path::polyline(vec![
                    first,
                    last,
                    barb(back + ARROW_HEAD_ANGLE),
                    last,
                    barb(back - ARROW_HEAD_ANGLE),
                ])
            }
            ToolKind::Rectangle => Path::polygon(vec![
                first,
                Point::new(last.x, first.y),
                last,
                Point::new(first.x, last.y),
            ]),
            ToolKind::Oval => {
                let center = Point::new((first.x + last.x) / 2.0, (first.y + last.y) / 2.0);
                let radii = [(last.x - first.x).abs() / 2.0, (last.y - first.y).abs() / 2.0];
                #[allow(clippy::cast_precision_loss)]
                let vertices = (0..OVAL_SEGMENTS)
                    .map(|segment| {
                        let angle =
                            std::f32::consts::TAU * segment as f32 / OVAL_SEGMENTS as f32;
                        let (sin, cos) = angle.sin_cos();
                        Point::new(center.x + radii[0] * cos, center.y + radii[1] * sin)
                    })
                    .collect();
                Path::polygon(vertices)
            }
        };
        Ok(Some(path))
    }
    /// Drop points which fall outside a surface of `size`. They can never affect what's visible on it.
    pub fn prune_out_of_bounds(&mut self, size: Size) {
        let bounds = Rect::from_size(size);
        let before = self.points.len();
        self.points
            .retain(|point| bounds.contains_point(point.scaled(size)));
        let pruned = before - self.points.len();
        if pruned != 0 {
            log::trace!("pruned {pruned} out-of-bounds {:?} points", self.kind);
        }
    }
    /// The area an eraser stroke of this path clears.
    #[must_use]
    pub fn erased_rect(&self, path: &Path) -> Rect {
        path.bounding_rect()
    }
}

impl Serializable for Tool {
    const TYPE: &'static str = "tool";
    fn serialize(&self) -> Result<Record, serialize::Error> {
        let mut record = serialize::record_for::<Self>();
        record.insert("kind".to_owned(), self.kind.as_ref().into());
        record.insert(
            "line_width".to_owned(),
            serialize::number("line_width", self.line_width.get())?,
        );
        record.insert(
            "color".to_owned(),
            serde_json::Value::Object(self.color.serialize()?),
        );
        let points = self
            .points
            .iter()
            .map(|&point| serialize::point_value("points", point))
            .collect::<Result<Vec<_>, _>>()?;
        record.insert("points".to_owned(), points.into());
        Ok(record)
    }
    fn construct(record: &Record) -> Result<Self, serialize::Error> {
        serialize::check_type::<Self>(record)?;
        let kind = record
            .require_str("kind")?
            .parse()
            .map_err(|_| serialize::Error::MissingField("kind".to_owned()))?;
        let line_width = FiniteF32::new_non_negative(record.require_f32("line_width")?)
            .map_err(|_| serialize::Error::MissingField("line_width".to_owned()))?;
        let color = Color::construct(record.require_record("color")?)?;
        let points = record
            .require_list("points")?
            .iter()
            .map(|value| serialize::point_from_value("points", value))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            kind,
            line_width,
            color,
            points,
        })
    }
}
