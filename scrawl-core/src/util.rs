//! Utility types, used throughout the crate.

/// A float which is never NaN nor infinite.
// Because of the preconditions invalidating many bitpatterns, this is not Pod.
#[derive(Copy, Clone, PartialEq, PartialOrd, bytemuck::NoUninit, bytemuck::Zeroable, Debug)]
#[repr(transparent)]
pub struct FiniteF32(f32);
impl FiniteF32 {
    pub const ZERO: Self = Self(0.0);
    pub const ONE: Self = Self(1.0);
    pub fn new(val: f32) -> Result<Self, FiniteF32Error> {
        if val.is_finite() {
            Ok(Self(val))
        } else {
            Err(FiniteF32Error::NotFinite)
        }
    }
    /// Like [`FiniteF32::new`], additionally rejecting values below zero.
    /// Widths and sizes use this.
    pub fn new_non_negative(val: f32) -> Result<Self, FiniteF32Error> {
        let val = Self::new(val)?;
        if val.0 < 0.0 {
            Err(FiniteF32Error::Negative)
        } else {
            Ok(val)
        }
    }
    #[must_use]
    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for FiniteF32 {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<f32> for FiniteF32 {
    type Error = FiniteF32Error;
    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
impl From<FiniteF32> for f32 {
    fn from(value: FiniteF32) -> Self {
        value.get()
    }
}
impl From<FiniteF32> for f64 {
    fn from(value: FiniteF32) -> Self {
        f64::from(value.get())
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FiniteF32Error {
    #[error("not finite")]
    NotFinite,
    #[error("negative")]
    Negative,
}

// No component is ever NaN, so PartialEq acts like Eq.
impl Eq for FiniteF32 {}
impl std::hash::Hash for FiniteF32 {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        // -0.0 == 0.0 must hash the same.
        let val = if self.0 == 0.0 { 0.0f32 } else { self.0 };
        state.write_u32(val.to_bits());
    }
}
