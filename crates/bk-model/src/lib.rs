//! Brick Editor Scene Data
//!
//! This crate contains the scene-side data structures the viewport engine
//! borrows during picking and framing:
//! - [`BoundingBox`]: axis-aligned bounds for bricks and aggregates
//! - [`TriangleMesh`] / [`Vertex`]: pickable brick geometry
//! - [`Brick`], [`Group`], [`Model`]: the hierarchical scene graph
//! - [`SelectionName`]: (group, element) index packing for hit records
//! - [`GridSpacing`]: nudge/drag grid granularities
//!
//! The engine never owns scene elements; it reaches them through the
//! capability traits in [`traits`] ([`Boundable`], [`Drawable`],
//! [`Selectable`]) for the duration of a single call.

pub mod bounds;
pub mod container;
pub mod element;
pub mod grid;
pub mod mesh;
pub mod name;
pub mod traits;

pub use bounds::*;
pub use container::*;
pub use element::*;
pub use grid::*;
pub use mesh::*;
pub use name::*;
pub use traits::*;
