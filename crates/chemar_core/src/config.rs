//! # Scene Configuration
//!
//! Placement constants and the marker-label table, loaded once at startup.
//!
//! ```toml
//! vertical_offset = 0.1
//! atom_scale = 0.5
//!
//! [labels]
//! Carbon = "Carbon"
//! Oxygen1 = "Oxygen"
//! Oxygen2 = "Oxygen"
//! ```
//!
//! Missing keys fall back to the defaults; a `[labels]` table replaces the
//! default table entirely.

use chemar_shared::{
    ElementTable, ATOM_SCALE, ORBIT_SPEED_DEG_PER_SEC, ORBIT_YAW_DEG, VERTICAL_OFFSET,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ChemarError, ChemarResult};

/// Configuration for a reaction scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    /// Stand-off between a marker and its atom along the marker's up axis (metres).
    pub vertical_offset: f32,
    /// Uniform scale for spawned atoms.
    pub atom_scale: f32,
    /// Local yaw of each atom's electron orbit (degrees).
    pub orbit_yaw_deg: f32,
    /// Electron orbit speed (degrees per second).
    pub orbit_speed_deg_per_sec: f32,
    /// Marker label → element lookup.
    pub labels: ElementTable,
    /// Capacity of the notification bus, when one is used.
    pub bus_capacity: usize,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            vertical_offset: VERTICAL_OFFSET,
            atom_scale: ATOM_SCALE,
            orbit_yaw_deg: ORBIT_YAW_DEG,
            orbit_speed_deg_per_sec: ORBIT_SPEED_DEG_PER_SEC,
            labels: ElementTable::default(),
            bus_capacity: 256,
        }
    }
}

impl SceneConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ChemarError::ConfigParse`] for malformed TOML and
    /// [`ChemarError::InvalidConfig`] for out-of-range values.
    pub fn from_toml_str(source: &str) -> ChemarResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ChemarError::ConfigIo`] if the file cannot be read, otherwise
    /// the same errors as [`SceneConfig::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> ChemarResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|err| ChemarError::ConfigIo {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
        Self::from_toml_str(&source)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ChemarError::InvalidConfig`] describing the first bad value.
    pub fn validate(&self) -> ChemarResult<()> {
        if !self.vertical_offset.is_finite() || self.vertical_offset < 0.0 {
            return Err(ChemarError::InvalidConfig(format!(
                "vertical_offset must be finite and >= 0, got {}",
                self.vertical_offset
            )));
        }
        if !self.atom_scale.is_finite() || self.atom_scale <= 0.0 {
            return Err(ChemarError::InvalidConfig(format!(
                "atom_scale must be finite and > 0, got {}",
                self.atom_scale
            )));
        }
        if !self.orbit_yaw_deg.is_finite() || !self.orbit_speed_deg_per_sec.is_finite() {
            return Err(ChemarError::InvalidConfig(
                "orbit angles must be finite".to_string(),
            ));
        }
        if self.labels.is_empty() {
            return Err(ChemarError::InvalidConfig(
                "label table is empty, no marker could ever resolve".to_string(),
            ));
        }
        if self.bus_capacity == 0 {
            return Err(ChemarError::InvalidConfig(
                "bus_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chemar_shared::ElementKind;

    #[test]
    fn test_defaults_are_valid() {
        let config = SceneConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.vertical_offset, 0.1);
        assert_eq!(config.atom_scale, 0.5);
        assert_eq!(config.labels.resolve("Oxygen2"), Some(ElementKind::Oxygen));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SceneConfig::from_toml_str("vertical_offset = 0.25").unwrap();
        assert_eq!(config.vertical_offset, 0.25);
        assert_eq!(config.atom_scale, 0.5);
        assert_eq!(config.labels, ElementTable::default());
    }

    #[test]
    fn test_labels_replace_default_table() {
        let config = SceneConfig::from_toml_str(
            r#"
            [labels]
            "Deck-C" = "Carbon"
            "#,
        )
        .unwrap();
        assert_eq!(config.labels.len(), 1);
        assert_eq!(config.labels.resolve("Deck-C"), Some(ElementKind::Carbon));
        assert_eq!(config.labels.resolve("Carbon"), None);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            SceneConfig::from_toml_str("atom_scale = 0.0"),
            Err(ChemarError::InvalidConfig(_))
        ));
        assert!(matches!(
            SceneConfig::from_toml_str("vertical_offset = -1.0"),
            Err(ChemarError::InvalidConfig(_))
        ));
        assert!(matches!(
            SceneConfig::from_toml_str("bus_capacity = 0"),
            Err(ChemarError::InvalidConfig(_))
        ));
        assert!(matches!(
            SceneConfig::from_toml_str("[labels]"),
            Err(ChemarError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        assert!(matches!(
            SceneConfig::from_toml_str("vertical_offset = "),
            Err(ChemarError::ConfigParse(_))
        ));
        assert!(matches!(
            SceneConfig::from_toml_str("unknown_key = 1"),
            Err(ChemarError::ConfigParse(_))
        ));
        assert!(matches!(
            SceneConfig::from_toml_str(r#"labels = { Carbon = "Carbonite" }"#),
            Err(ChemarError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = SceneConfig::from_file("/definitely/not/here/scene.toml").unwrap_err();
        assert!(matches!(err, ChemarError::ConfigIo { .. }));
    }

    #[test]
    fn test_loads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.toml");
        std::fs::write(
            &path,
            "vertical_offset = 0.2\norbit_speed_deg_per_sec = 30.0\nbus_capacity = 4\n",
        )
        .unwrap();

        let config = SceneConfig::from_file(&path).unwrap();
        assert_eq!(config.vertical_offset, 0.2);
        assert_eq!(config.orbit_speed_deg_per_sec, 30.0);
        assert_eq!(config.bus_capacity, 4);
        assert_eq!(config.labels, ElementTable::default());
    }
}
