//! Generated levels driving the collision world

use approx::assert_relative_eq;
use sim_engine::prelude::*;
use tempfile::tempdir;

#[test]
fn assembled_level_runs_physics_ticks() {
    let config = SimulationConfig {
        generator: GeneratorConfig { seed: Some(8), num_rooms: 6, ..GeneratorConfig::default() },
        ..SimulationConfig::default()
    };
    let mut generator = LevelGenerator::new(config.generator.clone());
    generator.generate();

    let mut world = World::new();
    let mut physics = PhysicsWorld::from_config(&config.physics);
    let level = generator.instantiate(&LevelAssembler::new(), &mut world, &mut physics);
    assert_eq!(level.rooms.len(), generator.rooms().len());

    let before: Vec<Vec3> = world.entities().map(|&e| world.position_of(e).unwrap()).collect();

    // Level geometry sits on layers the default matrix never checks
    for _ in 0..config.ticks {
        let events = physics.update(&mut world, config.delta_time);
        assert!(events.is_empty());
    }

    let after: Vec<Vec3> = world.entities().map(|&e| world.position_of(e).unwrap()).collect();
    assert_eq!(before, after);
}

#[test]
fn actors_in_a_room_are_separated() {
    let mut generator = LevelGenerator::with_seed(3);
    generator.connect_rooms(vec![Room::new(Vec3::zeros(), 20.0, 4.0, 20.0, RoomType::Default)]);

    let mut world = World::new();
    let mut physics = PhysicsWorld::new();
    physics.set_layer_collision(CollisionLayers::PLAYER, CollisionLayers::PLAYER, true);
    generator.instantiate(&LevelAssembler::new(), &mut world, &mut physics);

    let a = world.create_object("a", "actor", Vec3::new(0.0, 0.0, 0.0));
    let b = world.create_object("b", "actor", Vec3::new(1.0, 0.0, 0.0));
    physics.add_collider(CollisionVolume::sphere(a, Vec3::zeros(), 1.0).with_layer(CollisionLayers::PLAYER));
    physics.add_collider(CollisionVolume::sphere(b, Vec3::zeros(), 1.0).with_layer(CollisionLayers::PLAYER));

    let events = physics.update(&mut world, 1.0 / 60.0);
    assert_eq!(events.len(), 1);
    assert_relative_eq!(world.position_of(a).unwrap().x, -0.5, epsilon = 1e-5);
    assert_relative_eq!(world.position_of(b).unwrap().x, 1.5, epsilon = 1e-5);

    assert!(physics.update(&mut world, 1.0 / 60.0).is_empty());
}

#[test]
fn settings_round_trip_through_toml_and_ron() {
    let dir = tempdir().unwrap();
    let mut config = SimulationConfig::default();
    config.ticks = 12;
    config.generator.seed = Some(99);
    config.generator.num_rooms = 4;
    config.physics.layer_pairs.push((CollisionLayers::PLAYER, CollisionLayers::ENEMY));

    for name in ["settings.toml", "settings.ron"] {
        let path = dir.path().join(name);
        config.save_to_file(&path).unwrap();
        let loaded = SimulationConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config, "{name}");
    }
}

#[test]
fn loaded_settings_reproduce_level() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("generator.toml");
    let config = GeneratorConfig { seed: Some(2025), num_rooms: 7, ..GeneratorConfig::default() };
    config.save_to_file(&path).unwrap();

    let mut from_disk = LevelGenerator::new(GeneratorConfig::load_from_file(&path).unwrap());
    let mut in_memory = LevelGenerator::new(config);
    assert_eq!(from_disk.generate().0, in_memory.generate().0);
}
