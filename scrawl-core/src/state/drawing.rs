use crate::geometry::{Path, Size};
use crate::serialize::{self, Record, RecordExt, Serializable};
use crate::tool::{Tool, ToolGeometryError};

pub type DrawingID = crate::StableID<Drawing>;

/// One stroke on a canvas.
#[derive(Clone, Debug)]
pub struct Drawing {
    id: DrawingID,
    pub tool: Tool,
    /// Set when the stroke is entirely hidden by later strokes, and need not be rendered.
    /// Only meaningful after the owning canvas has run culling.
    pub is_culled: bool,
}
impl Drawing {
    /// A new stroke with a fresh ID.
    #[must_use]
    pub fn new(tool: Tool) -> Self {
        Self::with_id(DrawingID::default(), tool)
    }
    #[must_use]
    pub fn with_id(id: DrawingID, tool: Tool) -> Self {
        Self {
            id,
            tool,
            is_culled: false,
        }
    }
    #[must_use]
    pub fn id(&self) -> DrawingID {
        self.id
    }
    pub fn create_path(&self, size: Size) -> Result<Option<Path>, ToolGeometryError> {
        self.tool.build_path(size)
    }
    /// Drop tool points which cannot land on a surface of `size`.
    pub fn prune_out_of_bounds(&mut self, size: Size) {
        self.tool.prune_out_of_bounds(size);
    }
}
/// Equal by identity and content. Culling state is derived, and ignored.
impl PartialEq for Drawing {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.tool == other.tool
    }
}

impl Serializable for Drawing {
    const TYPE: &'static str = "drawing";
    fn serialize(&self) -> Result<Record, serialize::Error> {
        let mut record = serialize::record_for::<Self>();
        record.insert(
            "id".to_owned(),
            self.id.uuid().hyphenated().to_string().into(),
        );
        record.insert(
            "tool".to_owned(),
            serde_json::Value::Object(self.tool.serialize()?),
        );
        Ok(record)
    }
    fn construct(record: &Record) -> Result<Self, serialize::Error> {
        serialize::check_type::<Self>(record)?;
        let id = DrawingID::from_uuid(record.require_uuid("id")?);
        let tool = Tool::construct(record.require_record("tool")?)?;
        Ok(Self::with_id(id, tool))
    }
}
