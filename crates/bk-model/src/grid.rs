//! Grid spacing modes for drag snapping and nudges.

use serde::{Deserialize, Serialize};

/// How far bricks move per grid step when dragged or nudged.
///
/// Spacings are in model units; a standard brick stud is 20 units wide,
/// so coarse snapping moves whole studs at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridSpacing {
    /// Finest movement, one model unit.
    Fine,
    /// Half-plate resolution.
    #[default]
    Medium,
    /// Whole-stud resolution.
    Coarse,
}

impl GridSpacing {
    /// Spacing in model units.
    pub fn units(self) -> f32 {
        match self {
            GridSpacing::Fine => 1.0,
            GridSpacing::Medium => 10.0,
            GridSpacing::Coarse => 20.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spacings_are_ordered() {
        assert!(GridSpacing::Fine.units() < GridSpacing::Medium.units());
        assert!(GridSpacing::Medium.units() < GridSpacing::Coarse.units());
    }
}
