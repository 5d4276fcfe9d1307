//! Selection-name packing for pick hit records.
//!
//! During picking every candidate is tagged with a single integer that
//! identifies the (group, element) pair it came from. The packing is a
//! stable public contract between the engine and the scene.

use serde::{Deserialize, Serialize};

/// Maximum number of elements a single group may hold.
///
/// Names are packed as `group * SELECTION_MULTIPLIER + element`, so any
/// element index at or above this value would collide with the next
/// group's name range.
pub const SELECTION_MULTIPLIER: u32 = 0x1_0000;

/// Errors raised by selection-name packing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    /// The element index does not fit under [`SELECTION_MULTIPLIER`].
    #[error("element index {element} in group {group} exceeds the packing limit")]
    ElementIndexOverflow {
        /// Group index of the offending element.
        group: u32,
        /// Element index that overflowed.
        element: u32,
    },
}

/// A packed (group, element) identifier carried by hit records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectionName(pub u32);

impl SelectionName {
    /// Packs a group/element index pair.
    ///
    /// The scene collaborator guarantees `element < SELECTION_MULTIPLIER`;
    /// violating that makes decoding ambiguous, so it is rejected here
    /// rather than tolerated.
    pub fn encode(group: u32, element: u32) -> Result<Self, NameError> {
        if element >= SELECTION_MULTIPLIER {
            return Err(NameError::ElementIndexOverflow { group, element });
        }
        Ok(Self(group * SELECTION_MULTIPLIER + element))
    }

    /// Unpacks into (group, element) indices.
    pub fn decode(self) -> (u32, u32) {
        (self.0 / SELECTION_MULTIPLIER, self.0 % SELECTION_MULTIPLIER)
    }
}
