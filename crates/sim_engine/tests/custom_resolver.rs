//! Driving the physics world from host-owned entity storage

use approx::assert_relative_eq;
use sim_engine::prelude::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Host body whose position is shared with collision callbacks
struct Body {
    position: Rc<Cell<Vec3>>,
}

impl Positioned for Body {
    fn position(&self) -> Vec3 {
        self.position.get()
    }

    fn set_position(&mut self, position: Vec3) {
        self.position.set(position);
    }
}

/// Bodies indexed by entity id
#[derive(Default)]
struct Bodies {
    bodies: Vec<Body>,
}

impl Bodies {
    fn add(&mut self, position: Vec3) -> (Entity, Rc<Cell<Vec3>>) {
        let shared = Rc::new(Cell::new(position));
        self.bodies.push(Body { position: Rc::clone(&shared) });
        (Entity::from_raw(self.bodies.len() as u32 - 1), shared)
    }
}

impl EntityResolver for Bodies {
    fn resolve(&self, entity: Entity) -> Option<&dyn Positioned> {
        self.bodies.get(entity.id() as usize).map(|b| b as &dyn Positioned)
    }

    fn resolve_mut(&mut self, entity: Entity) -> Option<&mut dyn Positioned> {
        self.bodies.get_mut(entity.id() as usize).map(|b| b as &mut dyn Positioned)
    }
}

fn physics() -> PhysicsWorld {
    let mut physics = PhysicsWorld::new();
    physics.set_layer_collision(CollisionLayers::DEFAULT, CollisionLayers::DEFAULT, true);
    physics
}

#[test]
fn host_storage_is_resolved_and_pushed() {
    let mut bodies = Bodies::default();
    let (a, pos_a) = bodies.add(Vec3::new(0.0, 0.0, 0.0));
    let (b, pos_b) = bodies.add(Vec3::new(1.0, 0.0, 0.0));

    let mut physics = physics();
    physics.add_collider(CollisionVolume::sphere(a, Vec3::zeros(), 1.0));
    physics.add_collider(CollisionVolume::sphere(b, Vec3::zeros(), 1.0));

    let events = physics.update(&mut bodies, 0.016);
    assert_eq!(events.len(), 1);
    assert!(events[0].resolved);
    assert_relative_eq!(pos_a.get().x, -0.5, epsilon = 1e-5);
    assert_relative_eq!(pos_b.get().x, 1.5, epsilon = 1e-5);
}

#[test]
fn callbacks_see_positions_before_resolution() {
    let mut bodies = Bodies::default();
    let (a, pos_a) = bodies.add(Vec3::new(0.0, 0.0, 0.0));
    let (b, pos_b) = bodies.add(Vec3::new(1.0, 0.0, 0.0));

    let mut physics = physics();
    physics.add_collider(CollisionVolume::sphere(a, Vec3::zeros(), 1.0));
    physics.add_collider(CollisionVolume::sphere(b, Vec3::zeros(), 1.0));

    let seen = Rc::new(RefCell::new(Vec::new()));
    for (entity, own, other) in [(a, &pos_a, &pos_b), (b, &pos_b, &pos_a)] {
        let (own, other, seen) = (Rc::clone(own), Rc::clone(other), Rc::clone(&seen));
        physics.register_collision_callback(entity, move |me, _| {
            seen.borrow_mut().push((me, own.get(), other.get()));
        });
    }

    physics.update(&mut bodies, 0.016);

    let seen = seen.borrow();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0], (a, Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0)));
    assert_eq!(seen[1], (b, Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 0.0)));
    assert!(pos_a.get().x < 0.0);
    assert!(pos_b.get().x > 1.0);
}

#[test]
fn unresolvable_entity_keeps_last_position() {
    let mut bodies = Bodies::default();
    let (a, _) = bodies.add(Vec3::new(0.0, 0.0, 0.0));
    let ghost = Entity::from(42);

    let mut physics = physics();
    physics.add_collider(CollisionVolume::sphere(a, Vec3::zeros(), 1.0));
    let handle = physics.add_collider(CollisionVolume::sphere(ghost, Vec3::new(0.5, 0.0, 0.0), 1.0));

    let events = physics.update(&mut bodies, 0.016);
    assert_eq!(events.len(), 1);
    assert!(!events[0].resolved);
    assert_eq!(physics.collider(handle).unwrap().position(), Vec3::new(0.5, 0.0, 0.0));
}
