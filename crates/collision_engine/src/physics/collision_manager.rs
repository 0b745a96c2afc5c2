//! Collision world
//!
//! [`CollisionManager`] owns every collider in one world, sweeps all pairs
//! once per frame and turns per-frame overlap results into Enter / Stay /
//! Exit transitions.
//!
//! There is no broad phase: every unordered pair of enabled colliders is
//! tested. Each pair goes through exactly one shape combination, picked by
//! fixed priority from the shapes both sides have active:
//!
//! 1. sphere / sphere
//! 2. AABB / AABB
//! 3. OBB / OBB
//! 4. AABB / sphere (either way round)
//! 5. OBB / sphere (either way round)
//! 6. AABB / OBB (either way round)
//!
//! A pair with no shape combination in common never collides.

use crate::debug::collision_debug::CollisionDebugVisualizer;
use crate::debug::draw::LineRenderer;
use crate::foundation::collections::{new_key_type, ordered_pair, HandleArena};
use crate::foundation::math::Mat4;
use crate::physics::collider::{Collidable, Collider, Hook, ShapeKind};
use crate::physics::collision::intersection;
use crate::physics::collision_config::CollisionConfig;
use crate::physics::error::CollisionError;
use crate::physics::settings::{ColliderSettings, SettingsStore};
use std::collections::HashMap;

new_key_type! {
    /// Generation-checked reference to a collider in a [`CollisionManager`]
    pub struct ColliderHandle;
}

/// Unordered collider pair, stored with the smaller handle first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionPair {
    /// Smaller handle
    pub collider_a: ColliderHandle,
    /// Larger handle
    pub collider_b: ColliderHandle,
}

impl CollisionPair {
    /// Create a pair; argument order does not matter
    pub fn new(a: ColliderHandle, b: ColliderHandle) -> Self {
        let (collider_a, collider_b) = ordered_pair(a, b);
        Self { collider_a, collider_b }
    }

    /// Check if `handle` is one side of the pair
    pub fn involves(&self, handle: ColliderHandle) -> bool {
        self.collider_a == handle || self.collider_b == handle
    }
}

/// Transition kinds reported in the frame event log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionEventKind {
    /// The pair started overlapping this frame
    Enter,
    /// The pair overlaps this frame (reported on the Enter frame too)
    Stay,
    /// The pair stopped overlapping this frame
    Exit,
}

/// One transition produced by a sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionEvent {
    /// What happened
    pub kind: CollisionEventKind,
    /// The pair it happened to
    pub pair: CollisionPair,
}

/// Registry, pairwise sweep and pair-state table for one collision world
pub struct CollisionManager {
    colliders: HandleArena<ColliderHandle, Collider>,
    names: HashMap<String, ColliderHandle>,

    /// Whether each pair overlapped in the previous sweep; missing means no
    pair_states: HashMap<CollisionPair, bool>,

    frame_events: Vec<CollisionEvent>,
    config: CollisionConfig,
    debug_visualizer: CollisionDebugVisualizer,
}

impl CollisionManager {
    /// Create an empty world with default configuration
    pub fn new() -> Self {
        Self::with_config(CollisionConfig::default())
    }

    /// Create an empty world
    pub fn with_config(config: CollisionConfig) -> Self {
        Self {
            colliders: HandleArena::with_key(),
            names: HashMap::new(),
            pair_states: HashMap::new(),
            frame_events: Vec::new(),
            debug_visualizer: CollisionDebugVisualizer::new(config.sphere_segments),
            config,
        }
    }

    /// World configuration
    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// Register a collider with default settings
    ///
    /// `name` is made unique by appending `_1`, `_2`, … if it is taken; the
    /// name actually used is available from [`Collider::name`].
    pub fn add_collider(&mut self, name: &str, owner: Box<dyn Collidable>) -> ColliderHandle {
        self.insert_collider(name, owner, |_| ColliderSettings::default())
    }

    /// Register a collider, loading its settings from `store` under its unique name
    pub fn add_collider_with_settings(
        &mut self,
        name: &str,
        owner: Box<dyn Collidable>,
        store: &dyn SettingsStore,
    ) -> ColliderHandle {
        self.insert_collider(name, owner, |unique_name| store.load_or_default(unique_name))
    }

    fn insert_collider(
        &mut self,
        name: &str,
        owner: Box<dyn Collidable>,
        settings_for: impl FnOnce(&str) -> ColliderSettings,
    ) -> ColliderHandle {
        let unique_name = self.unique_name(name);
        if unique_name != name {
            log::debug!("Collider name {name:?} taken, registered as {unique_name:?}");
        }

        let settings = settings_for(&unique_name);
        let base_radius = self.config.base_sphere_radius;
        let base_half_extent = self.config.base_aabb_half_extent;
        let color = self.config.debug_colors.shape_default;

        let handle = self.colliders.insert_with_key(|handle| {
            Collider::new(
                handle,
                unique_name.clone(),
                owner,
                &settings,
                base_radius,
                base_half_extent,
                color,
            )
        });
        self.names.insert(unique_name, handle);

        log::debug!("Registered collider {handle:?} ({} total)", self.colliders.len());
        handle
    }

    fn unique_name(&self, requested: &str) -> String {
        if !self.names.contains_key(requested) {
            return requested.to_string();
        }

        (1_u32..)
            .map(|suffix| format!("{requested}_{suffix}"))
            .find(|candidate| !self.names.contains_key(candidate))
            .unwrap_or_else(|| requested.to_string())
    }

    /// Unregister a collider and forget every pair it was part of
    ///
    /// No Out hooks fire for pairs that were overlapping at removal.
    pub fn remove_collider(&mut self, handle: ColliderHandle) -> Result<Collider, CollisionError> {
        let collider = self
            .colliders
            .remove(handle)
            .ok_or(CollisionError::StaleHandle(handle))?;
        self.names.remove(collider.name());

        let before = self.pair_states.len();
        let mut dropped_contacts = 0;
        self.pair_states.retain(|pair, colliding| {
            let keep = !pair.involves(handle);
            if !keep && *colliding {
                dropped_contacts += 1;
            }
            keep
        });

        log::debug!(
            "Removed collider {:?} ({handle:?}), pruned {} pair states",
            collider.name(),
            before - self.pair_states.len()
        );
        if dropped_contacts > 0 {
            log::trace!("{} was in contact with {dropped_contacts} colliders when removed", collider.name());
        }

        Ok(collider)
    }

    /// Unregister the collider registered under `name`
    pub fn remove_by_name(&mut self, name: &str) -> Result<Collider, CollisionError> {
        let handle = self.find(name).ok_or_else(|| CollisionError::UnknownName(name.to_string()))?;
        self.remove_collider(handle)
    }

    /// Look up a collider
    pub fn get(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.colliders.get(handle)
    }

    /// Look up a collider mutably
    pub fn get_mut(&mut self, handle: ColliderHandle) -> Option<&mut Collider> {
        self.colliders.get_mut(handle)
    }

    fn try_get_mut(&mut self, handle: ColliderHandle) -> Result<&mut Collider, CollisionError> {
        self.colliders.get_mut(handle).ok_or(CollisionError::StaleHandle(handle))
    }

    /// Handle of the collider registered under `name`
    pub fn find(&self, name: &str) -> Option<ColliderHandle> {
        self.names.get(name).copied()
    }

    /// Handles of all registered colliders
    pub fn handles(&self) -> impl Iterator<Item = ColliderHandle> + '_ {
        self.colliders.keys()
    }

    /// All registered colliders
    pub fn colliders(&self) -> impl Iterator<Item = &Collider> {
        self.colliders.values()
    }

    /// Get the number of registered colliders
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Check if no colliders are registered
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Make `kind` the only active shape of a collider
    pub fn set_collision_type(&mut self, handle: ColliderHandle, kind: ShapeKind) -> Result<(), CollisionError> {
        self.try_get_mut(handle)?.set_collision_type(kind);
        Ok(())
    }

    /// Turn one shape kind of a collider on or off
    pub fn set_shape_enabled(
        &mut self,
        handle: ColliderHandle,
        kind: ShapeKind,
        enabled: bool,
    ) -> Result<(), CollisionError> {
        self.try_get_mut(handle)?.set_shape_enabled(kind, enabled);
        Ok(())
    }

    /// Include or exclude a collider from collision tests
    pub fn set_enabled(&mut self, handle: ColliderHandle, enabled: bool) -> Result<(), CollisionError> {
        self.try_get_mut(handle)?.set_enabled(enabled);
        Ok(())
    }

    /// Show or hide a collider in debug drawing
    pub fn set_visible(&mut self, handle: ColliderHandle, visible: bool) -> Result<(), CollisionError> {
        self.try_get_mut(handle)?.set_visible(visible);
        Ok(())
    }

    /// Write a collider's offsets and flags to `store` under its unique name
    pub fn save_settings(&self, handle: ColliderHandle, store: &mut dyn SettingsStore) -> Result<(), CollisionError> {
        let collider = self.get(handle).ok_or(CollisionError::StaleHandle(handle))?;
        store.save(collider.name(), collider.settings());
        Ok(())
    }

    /// Write every collider's settings to `store`
    pub fn save_all_settings(&self, store: &mut dyn SettingsStore) {
        for collider in self.colliders.values() {
            store.save(collider.name(), collider.settings());
        }
    }

    /// Whether the pair overlapped in the last sweep that tested it
    pub fn was_colliding(&self, a: ColliderHandle, b: ColliderHandle) -> bool {
        self.pair_states
            .get(&CollisionPair::new(a, b))
            .copied()
            .unwrap_or(false)
    }

    /// Transitions produced by the last sweep, in firing order
    pub fn frame_events(&self) -> &[CollisionEvent] {
        &self.frame_events
    }

    /// Run one frame: sweep all pairs, then refresh world transforms
    ///
    /// The sweep tests the shapes computed at the end of the previous
    /// update (or at registration), so owner movement made before this call
    /// is seen by the next one.
    pub fn update(&mut self) {
        self.check_all_collisions();
        self.update_world_transform();
    }

    /// Test every unordered pair of distinct, enabled colliders once
    pub fn check_all_collisions(&mut self) {
        self.frame_events.clear();
        for collider in self.colliders.values_mut() {
            collider.set_colliding(false);
        }

        let handles: Vec<ColliderHandle> = self
            .colliders
            .iter()
            .filter(|(_, collider)| collider.is_enabled())
            .map(|(handle, _)| handle)
            .collect();

        for (index, &a) in handles.iter().enumerate() {
            for &b in &handles[index + 1..] {
                self.check_collision_pair(a, b);
            }
        }
    }

    /// Test one pair and fire the hooks its transition calls for
    ///
    /// Does nothing for a self-pair, a stale handle, or a disabled side.
    pub fn check_collision_pair(&mut self, a: ColliderHandle, b: ColliderHandle) {
        let Some([collider_a, collider_b]) = self.colliders.get_disjoint_mut([a, b]) else {
            return;
        };
        if !collider_a.is_enabled() || !collider_b.is_enabled() {
            return;
        }

        let is_colliding_now = test_pair(collider_a, collider_b);
        if is_colliding_now {
            collider_a.set_colliding(true);
            collider_b.set_colliding(true);
        }

        let pair = CollisionPair::new(a, b);
        let was_colliding = self.pair_states.get(&pair).copied().unwrap_or(false);

        if is_colliding_now && !was_colliding {
            log::trace!("Collision enter: {} <-> {}", collider_a.name(), collider_b.name());
            collider_a.notify(Hook::Enter, collider_b);
            collider_b.notify(Hook::Enter, collider_a);
            self.frame_events.push(CollisionEvent { kind: CollisionEventKind::Enter, pair });
        }

        if is_colliding_now {
            collider_a.notify(Hook::Collision, collider_b);
            collider_b.notify(Hook::Collision, collider_a);
            self.frame_events.push(CollisionEvent { kind: CollisionEventKind::Stay, pair });
        } else if was_colliding {
            log::trace!("Collision out: {} <-> {}", collider_a.name(), collider_b.name());
            collider_a.notify(Hook::Out, collider_b);
            collider_b.notify(Hook::Out, collider_a);
            self.frame_events.push(CollisionEvent { kind: CollisionEventKind::Exit, pair });
        }

        self.pair_states.insert(pair, is_colliding_now);
    }

    /// Recompute world shapes and debug colors of every enabled collider
    pub fn update_world_transform(&mut self) {
        let colors = self.config.debug_colors;
        for collider in self.colliders.values_mut().filter(|collider| collider.is_enabled()) {
            collider.update_world_transform();
            collider.set_color(colors.for_state(collider.is_colliding()));
        }
    }

    /// Draw every visible, enabled collider as wireframe lines
    pub fn draw(&self, view_projection: &Mat4, renderer: &mut dyn LineRenderer) {
        renderer.set_view_projection(view_projection);
        for collider in self.colliders.values() {
            if collider.is_enabled() && collider.is_visible() {
                self.debug_visualizer.draw_collider(renderer, collider);
            }
        }
    }

    /// Visualizer used by [`draw`](Self::draw)
    pub fn debug_visualizer_mut(&mut self) -> &mut CollisionDebugVisualizer {
        &mut self.debug_visualizer
    }

    /// Remove all colliders and pair state
    pub fn clear(&mut self) {
        self.colliders.clear();
        self.names.clear();
        self.pair_states.clear();
        self.frame_events.clear();
    }
}

impl Default for CollisionManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the single shape test the pair's active shapes select
fn test_pair(a: &Collider, b: &Collider) -> bool {
    use ShapeKind::{Aabb, Obb, Sphere};

    let both = |kind: ShapeKind| a.has_shape(kind) && b.has_shape(kind);
    let cross = |first: ShapeKind, second: ShapeKind| {
        (a.has_shape(first) && b.has_shape(second)) || (a.has_shape(second) && b.has_shape(first))
    };

    if both(Sphere) {
        intersection::sphere_sphere(a.sphere(), b.sphere())
    } else if both(Aabb) {
        intersection::aabb_aabb(a.aabb(), b.aabb())
    } else if both(Obb) {
        intersection::obb_obb(a.obb(), b.obb())
    } else if cross(Aabb, Sphere) {
        if a.has_shape(Aabb) && b.has_shape(Sphere) {
            intersection::aabb_sphere(a.aabb(), b.sphere())
        } else {
            intersection::aabb_sphere(b.aabb(), a.sphere())
        }
    } else if cross(Obb, Sphere) {
        if a.has_shape(Obb) && b.has_shape(Sphere) {
            intersection::obb_sphere(a.obb(), b.sphere())
        } else {
            intersection::obb_sphere(b.obb(), a.sphere())
        }
    } else if cross(Aabb, Obb) {
        if a.has_shape(Aabb) && b.has_shape(Obb) {
            intersection::aabb_obb(a.aabb(), b.obb())
        } else {
            intersection::aabb_obb(b.aabb(), a.obb())
        }
    } else {
        false
    }
}
