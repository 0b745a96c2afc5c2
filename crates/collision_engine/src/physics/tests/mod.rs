//! Collision world scenario tests
//!
//! Every test builds its own [`CollisionManager`](super::CollisionManager);
//! owners are [`Probe`]s whose transform can be moved from outside and which
//! record every hook call.


use crate::foundation::math::Vec3;
use crate::physics::collider::{Collidable, CollisionHandler, CollisionPeer, Positionable};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// A recorded hook call, tagged with the other collider's name
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Call {
    Enter(String),
    Collision(String),
    Out(String),
}

/// Shared-state owner: clones see the same transform and call log
#[derive(Clone, Default)]
pub(super) struct Probe {
    position: Rc<Cell<Vec3>>,
    rotation: Rc<Cell<Vec3>>,
    calls: Rc<RefCell<Vec<Call>>>,
}

impl Probe {
    pub(super) fn at(position: Vec3) -> Self {
        let probe = Self::default();
        probe.move_to(position);
        probe
    }

    pub(super) fn move_to(&self, position: Vec3) {
        self.position.set(position);
    }

    pub(super) fn rotate_to(&self, euler: Vec3) {
        self.rotation.set(euler);
    }

    pub(super) fn owner(&self) -> Box<dyn Collidable> {
        Box::new(self.clone())
    }

    /// Calls recorded since the last take
    pub(super) fn take_calls(&self) -> Vec<Call> {
        self.calls.borrow_mut().drain(..).collect()
    }
}

impl Positionable for Probe {
    fn center_position(&self) -> Vec3 {
        self.position.get()
    }

    fn center_rotation(&self) -> Vec3 {
        self.rotation.get()
    }
}

impl CollisionHandler for Probe {
    fn on_collision(&mut self, other: &CollisionPeer<'_>) {
        self.calls.borrow_mut().push(Call::Collision(other.name.to_string()));
    }

    fn on_collision_enter(&mut self, other: &CollisionPeer<'_>) {
        self.calls.borrow_mut().push(Call::Enter(other.name.to_string()));
    }

    fn on_collision_out(&mut self, other: &CollisionPeer<'_>) {
        self.calls.borrow_mut().push(Call::Out(other.name.to_string()));
    }
}
