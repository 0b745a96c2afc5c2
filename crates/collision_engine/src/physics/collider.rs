//! Collider component
//!
//! A [`Collider`] turns its owner's transform into world-space shapes once
//! per frame and forwards collision transitions to the owner's hooks.
//!
//! The owner is anything [`Collidable`]: it must be able to report where it
//! is ([`Positionable`]) and may react to contacts ([`CollisionHandler`]).

use crate::foundation::math::{euler_rotation, Vec3, Vec4};
use crate::physics::collision::{Aabb, Obb, Sphere};
use crate::physics::collision_manager::ColliderHandle;
use crate::physics::settings::{ColliderOffsets, ColliderSettings};
use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Shape kinds active on a collider; any combination is allowed
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ShapeFlags: u8 {
        /// Sphere around the owner
        const SPHERE = 1 << 0;
        /// Axis-aligned box around the owner
        const AABB = 1 << 1;
        /// Box rotated with the owner
        const OBB = 1 << 2;
    }
}

/// A single shape kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Sphere
    Sphere,
    /// Axis-aligned box
    Aabb,
    /// Oriented box
    Obb,
}

impl ShapeKind {
    /// The flag bit for this kind
    pub fn flag(self) -> ShapeFlags {
        match self {
            Self::Sphere => ShapeFlags::SPHERE,
            Self::Aabb => ShapeFlags::AABB,
            Self::Obb => ShapeFlags::OBB,
        }
    }
}

impl From<ShapeKind> for ShapeFlags {
    fn from(kind: ShapeKind) -> Self {
        kind.flag()
    }
}

/// Source of a collider's world transform
pub trait Positionable {
    /// World-space center of the owner
    fn center_position(&self) -> Vec3;

    /// World-space Euler rotation of the owner in radians (X, then Y, then Z)
    fn center_rotation(&self) -> Vec3;
}

/// The other collider in a contact, as seen from a hook
#[derive(Debug, Clone, Copy)]
pub struct CollisionPeer<'a> {
    /// Handle of the other collider
    pub handle: ColliderHandle,
    /// Unique name of the other collider
    pub name: &'a str,
    /// The other collider itself: its world shapes, flags and owner
    pub collider: &'a Collider,
}

/// Contact reactions; every hook defaults to doing nothing
pub trait CollisionHandler {
    /// Every frame the pair overlaps, including the first
    fn on_collision(&mut self, _other: &CollisionPeer<'_>) {}

    /// The frame the pair starts overlapping
    fn on_collision_enter(&mut self, _other: &CollisionPeer<'_>) {}

    /// The frame the pair stops overlapping
    fn on_collision_out(&mut self, _other: &CollisionPeer<'_>) {}
}

/// Anything that can own a collider
pub trait Collidable: Positionable + CollisionHandler {}

impl<T: Positionable + CollisionHandler> Collidable for T {}

/// Which transition a hook call reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Hook {
    Collision,
    Enter,
    Out,
}

/// Per-entity collision component
///
/// Created by [`CollisionManager::add_collider`](crate::physics::CollisionManager::add_collider),
/// which owns it until removal.
pub struct Collider {
    handle: ColliderHandle,
    name: String,
    owner: Box<dyn Collidable>,

    /// Authoring-time offsets applied on top of the owner transform
    pub offsets: ColliderOffsets,
    shapes: ShapeFlags,
    visible: bool,
    enabled: bool,
    color: Vec4,

    base_radius: f32,
    base_half_extent: Vec3,

    sphere: Sphere,
    aabb: Aabb,
    obb: Obb,

    is_colliding: bool,
}

impl Collider {
    pub(crate) fn new(
        handle: ColliderHandle,
        name: String,
        owner: Box<dyn Collidable>,
        settings: &ColliderSettings,
        base_radius: f32,
        base_half_extent: Vec3,
        color: Vec4,
    ) -> Self {
        let mut collider = Self {
            handle,
            name,
            owner,
            offsets: ColliderOffsets::default(),
            shapes: ShapeFlags::all(),
            visible: true,
            enabled: true,
            color,
            base_radius,
            base_half_extent,
            sphere: Sphere::default(),
            aabb: Aabb::default(),
            obb: Obb::default(),
            is_colliding: false,
        };
        collider.apply_settings(settings);
        collider.update_world_transform();
        collider
    }

    /// Handle this collider is registered under
    pub fn handle(&self) -> ColliderHandle {
        self.handle
    }

    /// Unique name in the owning world
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The owning entity
    pub fn owner(&self) -> &dyn Collidable {
        self.owner.as_ref()
    }

    /// The owning entity, mutably
    pub fn owner_mut(&mut self) -> &mut dyn Collidable {
        self.owner.as_mut()
    }

    /// World-space sphere as of the last transform update
    pub fn sphere(&self) -> &Sphere {
        &self.sphere
    }

    /// World-space AABB as of the last transform update
    pub fn aabb(&self) -> &Aabb {
        &self.aabb
    }

    /// World-space OBB as of the last transform update
    pub fn obb(&self) -> &Obb {
        &self.obb
    }

    /// Active shape kinds
    pub fn shapes(&self) -> ShapeFlags {
        self.shapes
    }

    /// Check if a shape kind is active
    pub fn has_shape(&self, kind: ShapeKind) -> bool {
        self.shapes.contains(kind.flag())
    }

    /// Turn one shape kind on or off, leaving the others alone
    pub fn set_shape_enabled(&mut self, kind: ShapeKind, enabled: bool) {
        self.shapes.set(kind.flag(), enabled);
    }

    /// Make `kind` the only active shape
    pub fn set_collision_type(&mut self, kind: ShapeKind) {
        self.shapes = kind.flag();
    }

    /// Check if the collider takes part in collision tests
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Include or exclude the collider from collision tests
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Check if the collider is drawn by the debug visualizer
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show or hide the collider in debug drawing
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Whether any pair involving this collider overlapped in the last sweep
    ///
    /// Reset at the start of each sweep and only ever raised by a pair, so a
    /// later non-overlapping pair does not clear an earlier contact.
    pub fn is_colliding(&self) -> bool {
        self.is_colliding
    }

    /// Debug display color, refreshed on every transform update
    pub fn color(&self) -> Vec4 {
        self.color
    }

    /// Radius the sphere offset is added to
    pub fn base_radius(&self) -> f32 {
        self.base_radius
    }

    /// Overwrite offsets and flags from persisted settings
    pub fn apply_settings(&mut self, settings: &ColliderSettings) {
        self.offsets = settings.offsets;
        self.shapes = ShapeFlags::empty();
        self.shapes.set(ShapeFlags::SPHERE, settings.sphere_enabled);
        self.shapes.set(ShapeFlags::AABB, settings.aabb_enabled);
        self.shapes.set(ShapeFlags::OBB, settings.obb_enabled);
        self.visible = settings.visible;
        self.enabled = settings.enabled;
    }

    /// Snapshot of offsets and flags in persisted form
    pub fn settings(&self) -> ColliderSettings {
        ColliderSettings {
            offsets: self.offsets,
            sphere_enabled: self.has_shape(ShapeKind::Sphere),
            aabb_enabled: self.has_shape(ShapeKind::Aabb),
            obb_enabled: self.has_shape(ShapeKind::Obb),
            visible: self.visible,
            enabled: self.enabled,
        }
    }

    /// Recompute the world-space shapes from the owner's current transform
    pub fn update_world_transform(&mut self) {
        let position = self.owner.center_position();
        let rotation = euler_rotation(self.owner.center_rotation());
        let offsets = &self.offsets;

        self.sphere = Sphere::new(
            position + offsets.sphere_center,
            self.base_radius + offsets.sphere_radius,
        );

        self.aabb = Aabb::new(
            position - self.base_half_extent + offsets.aabb_min,
            position + self.base_half_extent + offsets.aabb_max,
        );

        self.obb = Obb::from_rotation(
            position + offsets.obb_rotation_center,
            position + offsets.obb_scale_center,
            offsets.obb_size,
            &rotation,
        );
    }

    pub(crate) fn set_colliding(&mut self, colliding: bool) {
        self.is_colliding = colliding;
    }

    pub(crate) fn set_color(&mut self, color: Vec4) {
        self.color = color;
    }

    pub(crate) fn peer(&self) -> CollisionPeer<'_> {
        CollisionPeer {
            handle: self.handle,
            name: &self.name,
            collider: self,
        }
    }

    /// Run one of the owner's hooks against `other`
    pub(crate) fn notify(&mut self, hook: Hook, other: &Collider) {
        let peer = other.peer();
        match hook {
            Hook::Collision => self.owner.on_collision(&peer),
            Hook::Enter => self.owner.on_collision_enter(&peer),
            Hook::Out => self.owner.on_collision_out(&peer),
        }
    }
}

impl fmt::Debug for Collider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collider")
            .field("handle", &self.handle)
            .field("name", &self.name)
            .field("shapes", &self.shapes)
            .field("enabled", &self.enabled)
            .field("visible", &self.visible)
            .field("is_colliding", &self.is_colliding)
            .finish_non_exhaustive()
    }
}
