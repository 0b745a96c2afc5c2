//! Collision demo application
//!
//! Flies a ship through a short asteroid field without a window: every frame
//! the bodies move, the collision world is updated and its transitions are
//! logged. At the end the colliders are drawn into a line buffer and their
//! settings are written back to disk.
//!
//! Usage: `collision_demo [collision.toml] [colliders.ron]`

use collision_engine::config::Config;
use collision_engine::foundation::logging;
use collision_engine::foundation::math::{constants, utils, Mat4, Vec3};
use collision_engine::physics::{
    ColliderHandle, ColliderSettings, ColliderSettingsTable, CollisionConfig, CollisionEventKind,
    CollisionHandler, CollisionManager, CollisionPeer, Positionable, SettingsStore, ShapeKind,
};
use collision_engine::debug::DebugDrawSystem;
use std::cell::RefCell;
use std::rc::Rc;

const FRAME_COUNT: u32 = 24;
const DELTA_TIME: f32 = 0.5;

/// Simulated state shared between the demo loop and the collider owner
#[derive(Debug, Default)]
struct Body {
    position: Vec3,
    rotation: Vec3,
    velocity: Vec3,
    spin: Vec3,
    hits: u32,
}

impl Body {
    fn integrate(&mut self, delta_time: f32) {
        self.position += self.velocity * delta_time;
        self.rotation += self.spin * delta_time;
    }
}

/// Collider owner that reads its transform from a shared [`Body`]
struct Actor {
    body: Rc<RefCell<Body>>,
}

impl Positionable for Actor {
    fn center_position(&self) -> Vec3 {
        self.body.borrow().position
    }

    fn center_rotation(&self) -> Vec3 {
        self.body.borrow().rotation
    }
}

impl CollisionHandler for Actor {
    fn on_collision_enter(&mut self, other: &CollisionPeer<'_>) {
        let mut body = self.body.borrow_mut();
        body.hits += 1;
        log::info!("  contact with {} (hit #{})", other.name, body.hits);
    }

    fn on_collision_out(&mut self, other: &CollisionPeer<'_>) {
        log::debug!("  clear of {}", other.name);
    }
}

struct DemoWorld {
    collisions: CollisionManager,
    bodies: Vec<(ColliderHandle, Rc<RefCell<Body>>)>,
}

impl DemoWorld {
    fn new(config: CollisionConfig) -> Self {
        Self {
            collisions: CollisionManager::with_config(config),
            bodies: Vec::new(),
        }
    }

    fn spawn(&mut self, name: &str, body: Body, settings: &dyn SettingsStore) -> ColliderHandle {
        let body = Rc::new(RefCell::new(body));
        let owner = Box::new(Actor { body: Rc::clone(&body) });
        let handle = self.collisions.add_collider_with_settings(name, owner, settings);
        self.bodies.push((handle, body));
        handle
    }

    fn step(&mut self, delta_time: f32) {
        for (_, body) in &self.bodies {
            body.borrow_mut().integrate(delta_time);
        }
        self.collisions.update();
    }

    fn name_of(&self, handle: ColliderHandle) -> &str {
        self.collisions.get(handle).map_or("<removed>", |collider| collider.name())
    }

    fn log_frame_events(&self, frame: u32) {
        for event in self.collisions.frame_events() {
            let a = self.name_of(event.pair.collider_a);
            let b = self.name_of(event.pair.collider_b);
            match event.kind {
                CollisionEventKind::Enter => log::info!("frame {frame}: {a} <-> {b} entered"),
                CollisionEventKind::Stay => log::trace!("frame {frame}: {a} <-> {b} touching"),
                CollisionEventKind::Exit => log::info!("frame {frame}: {a} <-> {b} separated"),
            }
        }
    }
}

/// A long thin hull; only its oriented box takes part in collisions
fn default_ship_settings() -> ColliderSettings {
    let mut settings = ColliderSettings::default();
    settings.offsets.obb_size = Vec3::new(1.5, 0.4, 0.6);
    settings.sphere_enabled = false;
    settings.aabb_enabled = false;
    settings
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| "collision.toml".to_string());
    let settings_path = args.next().unwrap_or_else(|| "colliders.ron".to_string());

    log::info!("Starting collision demo");
    let config = CollisionConfig::load_or_default(&config_path)?;
    let mut settings = <ColliderSettingsTable as Config>::load_or_default(&settings_path)?;
    log::info!("Loaded {} stored collider settings from {settings_path}", settings.len());

    if settings.load("Ship").is_none() {
        settings.save("Ship", default_ship_settings());
    }

    let mut world = DemoWorld::new(config);
    let ship = world.spawn(
        "Ship",
        Body {
            velocity: Vec3::new(1.0, 0.0, 0.0),
            spin: Vec3::new(constants::QUARTER_PI * 0.25, 0.0, 0.0),
            ..Body::default()
        },
        &settings,
    );

    for (index, x) in [4.0_f32, 8.0, 12.0].into_iter().enumerate() {
        let y = if index % 2 == 0 { 0.5 } else { -0.75 };
        world.spawn(
            "Asteroid",
            Body {
                position: Vec3::new(x, y, 0.0),
                spin: utils::euler_deg_to_rad(Vec3::new(0.0, 0.0, 45.0)),
                ..Body::default()
            },
            &settings,
        );
    }

    // Drifts into the last asteroid; spheres only
    let debris = world.spawn(
        "Debris",
        Body {
            position: Vec3::new(12.0, 6.0, 0.0),
            velocity: Vec3::new(0.0, -0.5, 0.0),
            ..Body::default()
        },
        &settings,
    );
    world.collisions.set_collision_type(debris, ShapeKind::Sphere)?;

    for frame in 0..FRAME_COUNT {
        world.step(DELTA_TIME);
        world.log_frame_events(frame);

        if frame == FRAME_COUNT / 2 {
            log::info!("frame {frame}: debris burns up");
            world.collisions.remove_collider(debris)?;
            world.bodies.retain(|(handle, _)| *handle != debris);
        }
    }

    for (handle, body) in &world.bodies {
        log::info!("{}: {} hits", world.name_of(*handle), body.borrow().hits);
    }

    let view_projection = Mat4::new_orthographic(-2.0, 16.0, -8.0, 8.0, -10.0, 10.0);
    let mut lines = DebugDrawSystem::new();
    world.collisions.draw(&view_projection, &mut lines);
    let on_screen = lines
        .clip_space_lines()
        .filter(|(start, end, _)| start.x.abs() <= 1.0 && end.x.abs() <= 1.0)
        .count();
    log::info!("Debug draw: {} lines, {on_screen} fully inside the view", lines.line_count());

    let ship_collider = world.collisions.get(ship).ok_or("ship collider missing")?;
    log::info!("Ship finished at {:?}", ship_collider.obb().center());

    world.collisions.save_all_settings(&mut settings);
    settings.save_to_file(&settings_path)?;
    log::info!("Saved {} collider settings to {settings_path}", settings.len());

    Ok(())
}
