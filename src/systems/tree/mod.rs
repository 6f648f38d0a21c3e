// this is the entry point for the tree generation plugin
use bevy::prelude::*;

use crate::config::INITIAL_SEED;

pub mod archetype;
pub mod builder;
pub mod grove;
pub mod mesh;
pub mod sampler;

pub use archetype::{ArchetypeError, BranchProfile, Interval, TreeArchetype};
pub use builder::{generate, index_count, vertex_count, TreeMesh};
pub use sampler::TreeRng;

// resources
#[derive(Resource)]
pub struct Seed(pub u64);

// the archetype every spawned tree is generated from
#[derive(Resource, Default)]
pub struct Params(pub TreeArchetype);

// last configuration error, shown in the panel instead of failing silently
#[derive(Resource, Default)]
pub struct GenerationStatus(pub Option<String>);

// true while the user is in click-to-place mode
#[derive(Resource, Default)]
pub struct PlacementArmed(pub bool);

// Event for regeneration
#[derive(Event)]
pub struct RegenerateEvent {
    pub seed: u64,
}

// Event for clearing all trees
#[derive(Event)]
pub struct ClearEvent;

// Event for placing a single tree at a picked ground position
#[derive(Event)]
pub struct PlaceTreeEvent {
    pub position: Vec3,
}

// main plugin for generation
pub struct TreeGenerationPlugin;

impl Plugin for TreeGenerationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Seed(INITIAL_SEED))
            .insert_resource(Params::default())
            .insert_resource(GenerationStatus::default())
            .insert_resource(PlacementArmed::default())
            .add_event::<RegenerateEvent>()
            .add_event::<ClearEvent>()
            .add_event::<PlaceTreeEvent>()
            .add_event::<crate::systems::export::ExportEvent>()
            .add_systems(Startup, grove::spawn_initial_grove)
            .add_systems(
                Update,
                (
                    grove::handle_regeneration,
                    grove::handle_clear,
                    grove::handle_placement,
                    crate::systems::export::handle_export,
                ),
            );
    }
}
