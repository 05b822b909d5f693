use crate::color::Color;
use crate::geometry::Point;
use crate::serialize::{self, Record, RecordExt, Serializable};
use crate::util::FiniteF32;

pub type TextID = crate::StableID<Text>;

/// Default size of new text, in logical points at the reference surface width.
pub const DEFAULT_FONT_SIZE: f32 = 24.0;

/// A text annotation placed on a canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct Text {
    id: TextID,
    pub value: String,
    /// Top-left of the text, normalized `0..1` across the surface.
    pub location: Point,
    pub font_size: FiniteF32,
    pub color: Color,
}
impl Text {
    /// New text with a fresh ID.
    #[must_use]
    pub fn new(value: impl Into<String>, location: Point) -> Self {
        Self::with_id(TextID::default(), value, location)
    }
    #[must_use]
    pub fn with_id(id: TextID, value: impl Into<String>, location: Point) -> Self {
        Self {
            id,
            value: value.into(),
            location,
            // Constant is finite.
            font_size: FiniteF32::new(DEFAULT_FONT_SIZE).unwrap_or(FiniteF32::ONE),
            color: Color::BLACK,
        }
    }
    #[must_use]
    pub fn id(&self) -> TextID {
        self.id
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl Serializable for Text {
    const TYPE: &'static str = "text";
    fn serialize(&self) -> Result<Record, serialize::Error> {
        let mut record = serialize::record_for::<Self>();
        record.insert(
            "id".to_owned(),
            self.id.uuid().hyphenated().to_string().into(),
        );
        record.insert("value".to_owned(), self.value.clone().into());
        record.insert(
            "location".to_owned(),
            serialize::point_value("location", self.location)?,
        );
        record.insert(
            "font_size".to_owned(),
            serialize::number("font_size", self.font_size.get())?,
        );
        record.insert(
            "color".to_owned(),
            serde_json::Value::Object(self.color.serialize()?),
        );
        Ok(record)
    }
    fn construct(record: &Record) -> Result<Self, serialize::Error> {
        serialize::check_type::<Self>(record)?;
        let id = TextID::from_uuid(record.require_uuid("id")?);
        let value = record.require_str("value")?.to_owned();
        let location = serialize::point_from_value(
            "location",
            record
                .get("location")
                .ok_or_else(|| serialize::Error::MissingField("location".to_owned()))?,
        )?;
        let font_size = FiniteF32::new_non_negative(record.require_f32("font_size")?)
            .map_err(|_| serialize::Error::MissingField("font_size".to_owned()))?;
        let color = Color::construct(record.require_record("color")?)?;
        Ok(Self {
            id,
            value,
            location,
            font_size,
            color,
        })
    }
}
