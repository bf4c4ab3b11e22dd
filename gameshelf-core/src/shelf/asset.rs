//! Asset addressing for shelf slots
//!
//! Maps a slot to the reference the rendering layer should load. The engine
//! neither caches nor prefetches; loading (and load failures) stay entirely
//! on the rendering side and never touch selection or navigation state.

use super::types::Slot;

/// Marker handed to renderers that key their texture caches by string.
pub const ADD_MARKER: &str = "gameshelf://add-slot";

/// Displayable reference for one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetRef<'a> {
    /// Caller-supplied resource string, unmodified.
    Resource(&'a str),
    /// The add slot carries no resource.
    AddMarker,
}

impl<'a> AssetRef<'a> {
    /// String form for cache keys. Hosts must not use [`ADD_MARKER`] as a real
    /// resource reference.
    pub fn as_str(&self) -> &'a str {
        match *self {
            AssetRef::Resource(resource) => resource,
            AssetRef::AddMarker => ADD_MARKER,
        }
    }

    /// True for the add slot.
    pub fn is_add_marker(&self) -> bool {
        matches!(self, AssetRef::AddMarker)
    }
}

/// Resolve a slot to its asset reference.
pub fn resolve(slot: &Slot) -> AssetRef<'_> {
    match slot {
        Slot::Real { resource, .. } => AssetRef::Resource(resource),
        Slot::AddSlot => AssetRef::AddMarker,
    }
}
