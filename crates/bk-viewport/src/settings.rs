//! Persisted per-view orientation and projection state.
//!
//! Hosts keep one snapshot per named viewport (e.g. each pane of a
//! four-way split), keyed by a caller-supplied string. On disk the store
//! is RON with an explicit format version; loading a store written by a
//! different version is a typed error rather than a silent guess.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::camera::{ProjectionMode, ViewOrientation, ViewTransform};

/// Current on-disk format version.
pub const VIEW_SETTINGS_VERSION: u32 = 1;

/// Errors raised by the settings store.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SettingsError {
    /// Filesystem failure.
    #[error("IO error: {0}")]
    Io(String),
    /// Serialization failure.
    #[error("serialization error: {0}")]
    Serialize(String),
    /// Deserialization failure.
    #[error("deserialization error: {0}")]
    Deserialize(String),
    /// The store was written by a different format version.
    #[error("settings format version {found} is not supported (expected {VIEW_SETTINGS_VERSION})")]
    VersionMismatch {
        /// Version found in the file.
        found: u32,
    },
    /// A persisted tag does not name a known orientation or projection.
    #[error("persisted tag {value} is not a known {kind}")]
    UnknownTag {
        /// Which tag family failed to decode.
        kind: &'static str,
        /// The offending raw value.
        value: u32,
    },
}

/// The two opaque integers persisted per named view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewSnapshot {
    /// Orientation tag, see [`ViewOrientation::tag`].
    pub orientation: u32,
    /// Projection-mode tag, see [`ProjectionMode::tag`].
    pub projection: u32,
}

impl ViewSnapshot {
    /// Captures the restorable part of a view.
    pub fn capture(view: &ViewTransform) -> Self {
        Self {
            orientation: view.orientation().tag(),
            projection: view.projection().tag(),
        }
    }

    /// Applies the snapshot, replacing orientation and projection.
    pub fn apply(&self, view: &mut ViewTransform) -> Result<(), SettingsError> {
        let orientation =
            ViewOrientation::from_tag(self.orientation).ok_or(SettingsError::UnknownTag {
                kind: "orientation",
                value: self.orientation,
            })?;
        let projection =
            ProjectionMode::from_tag(self.projection).ok_or(SettingsError::UnknownTag {
                kind: "projection mode",
                value: self.projection,
            })?;
        view.set_orientation(orientation);
        view.set_projection(projection);
        Ok(())
    }
}

/// Versioned collection of view snapshots keyed by view name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewSettingsStore {
    /// File format version.
    pub version: u32,
    views: BTreeMap<String, ViewSnapshot>,
}

impl Default for ViewSettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewSettingsStore {
    /// Creates an empty store at the current format version.
    pub fn new() -> Self {
        Self {
            version: VIEW_SETTINGS_VERSION,
            views: BTreeMap::new(),
        }
    }

    /// Stores a snapshot under `key`, replacing any previous one.
    pub fn set(&mut self, key: impl Into<String>, snapshot: ViewSnapshot) {
        self.views.insert(key.into(), snapshot);
    }

    /// Snapshot stored under `key`.
    pub fn get(&self, key: &str) -> Option<ViewSnapshot> {
        self.views.get(key).copied()
    }

    /// Removes the snapshot under `key`.
    pub fn remove(&mut self, key: &str) -> Option<ViewSnapshot> {
        self.views.remove(key)
    }

    /// Saves the store to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let content = self.to_bytes()?;
        std::fs::write(path.as_ref(), content).map_err(|e| SettingsError::Io(e.to_string()))
    }

    /// Serializes the store to bytes (for hosts with their own storage).
    pub fn to_bytes(&self) -> Result<Vec<u8>, SettingsError> {
        let content = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| SettingsError::Serialize(e.to_string()))?;
        Ok(content.into_bytes())
    }

    /// Loads a store from a file, rejecting other format versions.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| SettingsError::Io(e.to_string()))?;
        Self::from_str_checked(&content)
    }

    /// Loads a store from bytes.
    pub fn load_from_bytes(data: &[u8]) -> Result<Self, SettingsError> {
        let content =
            std::str::from_utf8(data).map_err(|e| SettingsError::Deserialize(e.to_string()))?;
        Self::from_str_checked(content)
    }

    fn from_str_checked(content: &str) -> Result<Self, SettingsError> {
        let store: Self =
            ron::from_str(content).map_err(|e| SettingsError::Deserialize(e.to_string()))?;
        if store.version != VIEW_SETTINGS_VERSION {
            return Err(SettingsError::VersionMismatch {
                found: store.version,
            });
        }
        Ok(store)
    }
}
