//! Persisted collider configuration
//!
//! Authoring-time offsets and flags are stored per collider, keyed by the
//! collider's unique name. A collider with nothing stored gets
//! [`ColliderSettings::default`].

use crate::config::{Config, Deserialize, Serialize};
use crate::foundation::math::Vec3;
use std::collections::BTreeMap;

/// Offsets applied on top of the owner's live position every frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColliderOffsets {
    /// Added to the owner position to get the sphere center
    pub sphere_center: Vec3,
    /// Added to the base radius
    pub sphere_radius: f32,
    /// Added to the AABB min corner
    pub aabb_min: Vec3,
    /// Added to the AABB max corner
    pub aabb_max: Vec3,
    /// Added to the owner position to get the OBB rotation pivot
    pub obb_rotation_center: Vec3,
    /// Added to the owner position to get the OBB sizing pivot
    pub obb_scale_center: Vec3,
    /// OBB half-extents
    pub obb_size: Vec3,
}

impl Default for ColliderOffsets {
    fn default() -> Self {
        Self {
            sphere_center: Vec3::zeros(),
            sphere_radius: 0.0,
            aabb_min: Vec3::zeros(),
            aabb_max: Vec3::zeros(),
            obb_rotation_center: Vec3::zeros(),
            obb_scale_center: Vec3::zeros(),
            obb_size: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

/// Everything persisted for one collider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColliderSettings {
    /// Shape offsets
    pub offsets: ColliderOffsets,
    /// Sphere shape active
    pub sphere_enabled: bool,
    /// AABB shape active
    pub aabb_enabled: bool,
    /// OBB shape active
    pub obb_enabled: bool,
    /// Drawn by the debug visualizer
    pub visible: bool,
    /// Takes part in collision tests
    pub enabled: bool,
}

impl Default for ColliderSettings {
    fn default() -> Self {
        Self {
            offsets: ColliderOffsets::default(),
            sphere_enabled: true,
            aabb_enabled: true,
            obb_enabled: true,
            visible: true,
            enabled: true,
        }
    }
}

/// Typed load/save of collider settings keyed by unique collider name
pub trait SettingsStore {
    /// Stored settings for `name`, if any
    fn load(&self, name: &str) -> Option<ColliderSettings>;

    /// Store settings for `name`, replacing what was there
    fn save(&mut self, name: &str, settings: ColliderSettings);

    /// Stored settings for `name`, or the documented defaults
    fn load_or_default(&self, name: &str) -> ColliderSettings {
        self.load(name).unwrap_or_default()
    }
}

/// Settings for many colliders, persisted as one RON or TOML file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColliderSettingsTable {
    colliders: BTreeMap<String, ColliderSettings>,
}

impl ColliderSettingsTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Names with stored settings, in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.colliders.keys().map(String::as_str)
    }

    /// Drop the entry for `name`
    pub fn remove(&mut self, name: &str) -> Option<ColliderSettings> {
        self.colliders.remove(name)
    }
}

impl Config for ColliderSettingsTable {}

impl SettingsStore for ColliderSettingsTable {
    fn load(&self, name: &str) -> Option<ColliderSettings> {
        self.colliders.get(name).copied()
    }

    fn save(&mut self, name: &str, settings: ColliderSettings) {
        self.colliders.insert(name.to_string(), settings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let settings = ColliderSettings::default();
        assert_eq!(settings.offsets.sphere_center, Vec3::zeros());
        assert_eq!(settings.offsets.sphere_radius, 0.0);
        assert_eq!(settings.offsets.aabb_min, Vec3::zeros());
        assert_eq!(settings.offsets.aabb_max, Vec3::zeros());
        assert_eq!(settings.offsets.obb_scale_center, Vec3::zeros());
        assert_eq!(settings.offsets.obb_size, Vec3::new(1.0, 1.0, 1.0));
        assert!(settings.sphere_enabled && settings.aabb_enabled && settings.obb_enabled);
        assert!(settings.visible && settings.enabled);
    }

    #[test]
    fn test_missing_entry_loads_defaults() {
        let table = ColliderSettingsTable::new();
        assert!(table.load("Enemy").is_none());
        assert_eq!(table.load_or_default("Enemy"), ColliderSettings::default());
    }

    #[test]
    fn test_save_replaces_entry() {
        let mut table = ColliderSettingsTable::new();
        let mut settings = ColliderSettings::default();
        table.save("Enemy", settings);
        settings.offsets.sphere_radius = 2.0;
        settings.obb_enabled = false;
        table.save("Enemy", settings);

        assert_eq!(table.len(), 1);
        assert_eq!(table.load("Enemy"), Some(settings));
    }

    #[test]
    fn test_partial_ron_fills_defaults() {
        let text = r#"(colliders: {"Boss": (offsets: (sphere_radius: 3.0), aabb_enabled: false)})"#;
        let table: ColliderSettingsTable = ron::from_str(text).unwrap();
        let boss = table.load("Boss").unwrap();
        assert_eq!(boss.offsets.sphere_radius, 3.0);
        assert_eq!(boss.offsets.obb_size, Vec3::new(1.0, 1.0, 1.0));
        assert!(!boss.aabb_enabled);
        assert!(boss.sphere_enabled);
    }

    #[test]
    fn test_table_file_round_trip() {
        let path = std::env::temp_dir().join(format!("collider_settings_{}.ron", std::process::id()));
        let mut table = ColliderSettingsTable::new();
        let mut settings = ColliderSettings::default();
        settings.offsets.obb_size = Vec3::new(2.0, 0.5, 1.0);
        table.save("Player", settings);
        table.save("Enemy_1", ColliderSettings::default());

        table.save_to_file(&path).unwrap();
        let loaded = ColliderSettingsTable::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, table);
        assert_eq!(loaded.names().collect::<Vec<_>>(), vec!["Enemy_1", "Player"]);
    }
}
