// tree entity management: startup scatter, regeneration, placement, clearing

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::config;
use super::{
    builder, mesh, ClearEvent, GenerationStatus, Params, PlaceTreeEvent, RegenerateEvent, Seed,
};

#[derive(Component)]
pub struct Tree {
    pub seed: u64,
    pub position: Vec3,
}

// scatter positions roughly on a ring around the origin with normal jitter,
// so the startup scene shows parameter variety without trees overlapping
pub fn grove_positions(count: usize, ring_radius: f32, sigma: f32, seed: u64) -> Vec<Vec3> {
    let mut rng = StdRng::seed_from_u64(seed);
    let jitter = Normal::new(0.0, sigma).unwrap();
    let mut positions = Vec::with_capacity(count);

    for i in 0..count {
        let angle = (i as f32 / count.max(1) as f32) * std::f32::consts::TAU
            + rng.random_range(-0.3..0.3);
        let radius = ring_radius + jitter.sample(&mut rng);

        positions.push(Vec3::new(angle.cos() * radius, 0.0, angle.sin() * radius));
    }

    positions
}

// generate and spawn a single tree entity at a world position
pub fn spawn_tree(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    params: &Params,
    seed: u64,
    position: Vec3,
) -> Result<(), super::ArchetypeError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let tree_mesh = builder::generate(&params.0, Vec3::ZERO, Vec3::Y, Vec3::Z, &mut rng)?;
    let mesh_handle = meshes.add(mesh::to_render_mesh(&tree_mesh));

    // slight bark color variation per tree
    let shade = rng.random_range(-0.04_f32..0.04_f32);
    let material = materials.add(StandardMaterial {
        base_color: Color::srgb(
            (0.42 + shade).clamp(0.0, 1.0),
            (0.30 + shade).clamp(0.0, 1.0),
            (0.19 + shade).clamp(0.0, 1.0),
        ),
        perceptual_roughness: 0.9,
        ..default()
    });

    commands.spawn((
        Tree { seed, position },
        Mesh3d(mesh_handle),
        MeshMaterial3d(material),
        Transform::from_translation(position),
    ));

    Ok(())
}

// startup scene: a small stand of trees around the origin
pub fn spawn_initial_grove(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    seed: Res<Seed>,
    params: Res<Params>,
    mut status: ResMut<GenerationStatus>,
) {
    let positions = grove_positions(
        config::GROVE_TREE_COUNT,
        config::GROVE_RING_RADIUS,
        config::GROVE_JITTER_SIGMA,
        seed.0,
    );

    for (i, position) in positions.into_iter().enumerate() {
        let tree_seed = seed.0.wrapping_add(i as u64);
        if let Err(e) = spawn_tree(&mut commands, &mut meshes, &mut materials, &params, tree_seed, position) {
            status.0 = Some(e.to_string());
            return;
        }
    }
    status.0 = None;
}

// rebuild every tree in place with the new seed and current parameters
pub fn handle_regeneration(
    mut commands: Commands,
    mut events: EventReader<RegenerateEvent>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut seed: ResMut<Seed>,
    params: Res<Params>,
    query: Query<(Entity, &Tree)>,
    mut status: ResMut<GenerationStatus>,
) {
    for event in events.read() {
        seed.0 = event.seed;

        // keep the layout, replace the geometry
        let mut positions: Vec<Vec3> = query.iter().map(|(_, tree)| tree.position).collect();
        for (entity, _) in query.iter() {
            commands.entity(entity).try_despawn();
        }

        if positions.is_empty() {
            // scene was cleared, fall back to the startup scatter
            positions = grove_positions(
                config::GROVE_TREE_COUNT,
                config::GROVE_RING_RADIUS,
                config::GROVE_JITTER_SIGMA,
                event.seed,
            );
        }

        status.0 = None;
        for (i, position) in positions.into_iter().enumerate() {
            let tree_seed = event.seed.wrapping_add(i as u64);
            if let Err(e) = spawn_tree(&mut commands, &mut meshes, &mut materials, &params, tree_seed, position) {
                status.0 = Some(e.to_string());
                break;
            }
        }
    }
}

// place one new tree at a picked ground point
pub fn handle_placement(
    mut commands: Commands,
    mut events: EventReader<PlaceTreeEvent>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    seed: Res<Seed>,
    params: Res<Params>,
    query: Query<&Tree>,
    mut status: ResMut<GenerationStatus>,
) {
    for event in events.read() {
        // distinct per-tree seed; offsets existing seeds by the tree count
        let tree_seed = seed.0.wrapping_add(query.iter().count() as u64 + 1);
        match spawn_tree(&mut commands, &mut meshes, &mut materials, &params, tree_seed, event.position) {
            Ok(()) => status.0 = None,
            Err(e) => status.0 = Some(e.to_string()),
        }
    }
}

pub fn handle_clear(
    mut commands: Commands,
    mut events: EventReader<ClearEvent>,
    query: Query<Entity, With<Tree>>,
) {
    for _event in events.read() {
        for entity in query.iter() {
            commands.entity(entity).try_despawn();
        }
    }
}
