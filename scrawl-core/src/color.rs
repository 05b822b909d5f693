use crate::serialize::{self, Record, RecordExt, Serializable};
use crate::util::{FiniteF32, FiniteF32Error};

/// A straight (non-premultiplied) sRGB color with alpha, channels nominally in `[0, 1]`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, bytemuck::Zeroable, Debug)]
#[repr(transparent)]
pub struct Color([FiniteF32; 4]);
impl Color {
    pub const WHITE: Self = Self([FiniteF32::ONE; 4]);
    pub const BLACK: Self = Self([
        FiniteF32::ZERO,
        FiniteF32::ZERO,
        FiniteF32::ZERO,
        FiniteF32::ONE,
    ]);
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Result<Self, FiniteF32Error> {
        Ok(Self([
            FiniteF32::new(r)?,
            FiniteF32::new(g)?,
            FiniteF32::new(b)?,
            FiniteF32::new(a)?,
        ]))
    }
    #[must_use]
    pub fn as_array(&self) -> [f32; 4] {
        self.0.map(FiniteF32::get)
    }
}
impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}
// Safety: FiniteF32 is NoUninit, arrays have no uninit bytes of their own.
unsafe impl bytemuck::NoUninit for Color {}

const CHANNELS: [&str; 4] = ["r", "g", "b", "a"];

impl Serializable for Color {
    const TYPE: &'static str = "color";
    fn serialize(&self) -> Result<Record, serialize::Error> {
        let mut record = serialize::record_for::<Self>();
        for (key, value) in CHANNELS.into_iter().zip(self.as_array()) {
            record.insert(key.to_owned(), serialize::number(key, value)?);
        }
        Ok(record)
    }
    fn construct(record: &Record) -> Result<Self, serialize::Error> {
        serialize::check_type::<Self>(record)?;
        let mut channels = [FiniteF32::ZERO; 4];
        for (key, channel) in CHANNELS.into_iter().zip(&mut channels) {
            // require_f32 already rejects non-finite values.
            *channel = FiniteF32::new(record.require_f32(key)?)
                .map_err(|_| serialize::Error::NonFiniteNumber(key.to_owned()))?;
        }
        Ok(Self(channels))
    }
}
