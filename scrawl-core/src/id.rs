//! # IDs
//! Annotations are identified by a random UUID, stable across saves and sharable between devices.
//! `StableID<T>` wraps that UUID and namespaces it by the type `T`, so a drawing's ID can never be
//! handed to a text lookup by accident.
//!
//! A fresh ID comes from `StableID::default()`. Decoded IDs are rebuilt with [`StableID::from_uuid`].

pub struct StableID<T: std::any::Any> {
    id: uuid::Uuid,
    // Namespace marker. `fn() -> T` keeps the ID Send + Sync no matter what T is,
    // since no T is ever stored.
    _phantom: std::marker::PhantomData<fn() -> T>,
}
impl<T: std::any::Any> Clone for StableID<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T: std::any::Any> Copy for StableID<T> {}
impl<T: std::any::Any> std::cmp::PartialEq<StableID<T>> for StableID<T> {
    fn eq(&self, other: &StableID<T>) -> bool {
        // Namespace already checked at compile time.
        self.id == other.id
    }
}
impl<T: std::any::Any> std::cmp::Eq for StableID<T> {}
impl<T: std::any::Any> std::cmp::PartialOrd for StableID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl<T: std::any::Any> std::cmp::Ord for StableID<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.id.cmp(&other.id)
    }
}
impl<T: std::any::Any> std::hash::Hash for StableID<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T: std::any::Any> StableID<T> {
    /// Wrap an existing UUID, such as one read back from a record.
    #[must_use]
    pub const fn from_uuid(id: uuid::Uuid) -> Self {
        Self {
            id,
            _phantom: std::marker::PhantomData,
        }
    }
    #[must_use]
    pub fn uuid(&self) -> uuid::Uuid {
        self.id
    }
}
impl<T: std::any::Any> Default for StableID<T> {
    /// A new random (v4) ID.
    fn default() -> Self {
        Self::from_uuid(uuid::Uuid::new_v4())
    }
}
impl<T: std::any::Any> std::fmt::Display for StableID<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // rsplit always yields at least one element, even for empty strings.
        write!(
            f,
            "{}#{}",
            std::any::type_name::<T>().rsplit("::").next().unwrap_or_default(),
            self.id.hyphenated()
        )
    }
}
impl<T: std::any::Any> std::fmt::Debug for StableID<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <StableID<T> as std::fmt::Display>::fmt(self, f)
    }
}
