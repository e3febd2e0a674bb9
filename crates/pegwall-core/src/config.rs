//! Planner configuration.
//!
//! Stored as JSON. Every field has a default, so partial files are fine and
//! a missing file yields [`PlannerConfig::default`].

use crate::error::{PegwallError, Result};
use crate::grid::WallSpec;
use crate::input::{DEFAULT_WALL_Z, WallPlane};
use crate::storage::HANDOFF_KEY;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[cfg(not(target_arch = "wasm32"))]
use crate::storage::FileStorage;
#[cfg(target_arch = "wasm32")]
use crate::storage::LocalStorage;
#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Wall shown before the user enters dimensions.
    pub default_wall: WallSpec,
    /// Depth of the wall plane in scene units.
    pub wall_plane_z: f64,
    /// Key the layout is handed off under.
    pub storage_key: String,
    /// Directory for saved layouts. `None` uses the platform default.
    pub storage_dir: Option<PathBuf>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            default_wall: WallSpec::default(),
            wall_plane_z: DEFAULT_WALL_Z,
            storage_key: HANDOFF_KEY.to_string(),
            storage_dir: None,
        }
    }
}

impl PlannerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| PegwallError::Config(format!("Invalid config: {}", e)))?;
        // Reject walls that would not pass WallSpec::new
        WallSpec::new(config.default_wall.width_inches, config.default_wall.height_inches)?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| PegwallError::Config(e.to_string()))
    }

    pub fn wall_plane(&self) -> WallPlane {
        WallPlane::new(self.wall_plane_z)
    }
}

/// Default config file location: `<config dir>/pegwall/config.json`.
#[cfg(not(target_arch = "wasm32"))]
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("pegwall").join("config.json"))
}

#[cfg(not(target_arch = "wasm32"))]
impl PlannerConfig {
    /// Load from `path`, falling back to defaults when the file is missing.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path).map_err(|e| {
            PegwallError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// Load from [`config_path`], or defaults when there is no config dir.
    pub fn load_default() -> Result<Self> {
        match config_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PegwallError::Config(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
        std::fs::write(path, self.to_json()?)
            .map_err(|e| PegwallError::Config(format!("Failed to write {}: {}", path.display(), e)))
    }

    /// Open file storage in the configured directory.
    pub fn open_storage(&self) -> Result<FileStorage> {
        let storage = match &self.storage_dir {
            Some(dir) => FileStorage::new(dir.clone())?,
            None => FileStorage::default_location()?,
        };
        Ok(storage)
    }
}

#[cfg(target_arch = "wasm32")]
impl PlannerConfig {
    /// Open browser storage, keeping the configured hand-off key unprefixed.
    pub fn open_storage(&self) -> Result<LocalStorage> {
        Ok(LocalStorage::with_handoff_key(&self.storage_key)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PlannerConfig::default();
        assert_eq!(config.default_wall, WallSpec::default());
        assert_eq!(config.wall_plane(), WallPlane::default());
        assert_eq!(config.storage_key, "pegwall_data");
        assert_eq!(config.storage_dir, None);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = PlannerConfig::from_json(r#"{ "wall_plane_z": -3.0 }"#).unwrap();
        assert_eq!(config.wall_plane_z, -3.0);
        assert_eq!(config.storage_key, HANDOFF_KEY);
        assert_eq!(config.default_wall, WallSpec::default());
    }

    #[test]
    fn test_json_round_trip() {
        let config = PlannerConfig {
            default_wall: WallSpec::from_hole_counts(5, 8),
            storage_dir: Some(PathBuf::from("/tmp/pegwall")),
            ..PlannerConfig::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(PlannerConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(PlannerConfig::from_json("nope"), Err(PegwallError::Config(_))));
        assert!(matches!(
            PlannerConfig::from_json(
                r#"{ "default_wall": { "width_inches": 0.0, "height_inches": 10.0 } }"#
            ),
            Err(PegwallError::InvalidWall { .. })
        ));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_load_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        assert_eq!(PlannerConfig::load(&path).unwrap(), PlannerConfig::default());

        let config = PlannerConfig {
            storage_dir: Some(dir.path().join("layouts")),
            ..PlannerConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(PlannerConfig::load(&path).unwrap(), config);

        let storage = config.open_storage().unwrap();
        assert_eq!(storage.base_path(), dir.path().join("layouts").as_path());
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_handoff_through_configured_storage() {
        use crate::layout::WallLayout;
        use crate::storage::test_support::block_on;

        let dir = tempfile::tempdir().unwrap();
        let config = PlannerConfig {
            storage_key: "hallway".to_string(),
            storage_dir: Some(dir.path().to_path_buf()),
            ..PlannerConfig::default()
        };
        let storage = config.open_storage().unwrap();
        let layout = WallLayout::from_config(&config);

        block_on(layout.save_handoff(&storage, &config)).unwrap();
        assert!(dir.path().join("hallway.json").exists());

        let restored = block_on(WallLayout::load_handoff(&storage, &config)).unwrap();
        assert_eq!(restored.wall(), layout.wall());
    }
}
