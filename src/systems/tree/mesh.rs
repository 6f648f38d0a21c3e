// TreeMesh -> bevy render mesh conversion
// positions, normals and indices only; UV generation is out of scope

use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;

use super::builder::TreeMesh;

pub fn to_render_mesh(tree: &TreeMesh) -> Mesh {
    let positions: Vec<[f32; 3]> = tree.vertices.iter().map(|v| v.to_array()).collect();
    let normals: Vec<[f32; 3]> = tree.normals.iter().map(|n| n.to_array()).collect();

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    );

    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_indices(Indices::U32(tree.triangles.clone()));

    mesh
}
